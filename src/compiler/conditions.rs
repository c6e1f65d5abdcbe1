use crate::{
    bind::{Bind, Binds},
    error::{Error, Result},
    expr::{Condition, ConditionGroup, Operand, Predicate},
    expression::{Expression, ExpressionBuilder},
    operator::Operator,
};

use super::{Compiler, EmptyInPolicy};

impl Compiler {
    /// Compiles a predicate tree. Nested groups are parenthesized when they
    /// sit next to other predicates, empty items are left out.
    pub fn compile_conditions(&self, group: &ConditionGroup) -> Result<Expression> {
        let mut fragments = Vec::with_capacity(group.len());
        for item in group.items() {
            let (fragment, nested) = match item {
                Predicate::Condition(condition) => (self.compile_condition(condition)?, false),
                Predicate::Group(group) => (self.compile_conditions(group)?, true),
                Predicate::Raw(raw) => (raw.clone(), false),
            };
            if !fragment.is_empty() {
                fragments.push((fragment, nested));
            }
        }

        let parenthesize = fragments.len() > 1;
        let mut builder = ExpressionBuilder::new(group.conjunction().separator());
        for (fragment, nested) in fragments {
            if nested && parenthesize {
                builder.push(fragment.wrap());
            } else {
                builder.push(fragment);
            }
        }
        Ok(builder.finish())
    }

    pub fn compile_condition(&self, condition: &Condition) -> Result<Expression> {
        let operator: Operator = condition.operator().parse()?;
        let column = self.render(condition.column())?;
        let operand = condition.operand();
        match operator {
            Operator::In | Operator::NotIn => self.compile_in(&column, operator, operand),
            Operator::Between | Operator::NotBetween => {
                self.compile_between(&column, operator, operand)
            }
            Operator::Eq
            | Operator::NotEq
            | Operator::Diamond
            | Operator::Lt
            | Operator::Gt
            | Operator::Lte
            | Operator::Gte
            | Operator::Like
            | Operator::NotLike
            | Operator::Is
            | Operator::IsNot => self.compile_basic(&column, operator, operand),
        }
    }

    fn compile_basic(&self, column: &str, operator: Operator, operand: &Operand) -> Result<Expression> {
        match operand {
            Operand::Value(Bind::Null) if operator.is_exact_equality() => {
                let check = if operator.is_negated() { "is not null" } else { "is null" };
                Ok(Expression::raw(format!("{column} {check}")))
            }
            Operand::Value(value) => Ok(Expression::new(
                format!("{column} {operator} ?"),
                value.clone(),
            )),
            Operand::Column(other) => {
                let other = self.render(other)?;
                Ok(Expression::raw(format!("{column} {operator} {other}")))
            }
            Operand::List(_) | Operand::Columns(_) => Err(Error::ExpectedScalar(operator)),
        }
    }

    fn compile_in(&self, column: &str, operator: Operator, operand: &Operand) -> Result<Expression> {
        let (list, binds) = match operand {
            Operand::List(values) if values.is_empty() => return Ok(self.empty_in(operator)),
            Operand::Columns(columns) if columns.is_empty() => return Ok(self.empty_in(operator)),
            Operand::List(values) => (
                vec!["?"; values.len()].join(", "),
                values.iter().cloned().collect::<Binds>(),
            ),
            Operand::Columns(columns) => {
                let columns = columns
                    .iter()
                    .map(|column| self.render(column))
                    .collect::<Result<Vec<_>>>()?;
                (columns.join(", "), Binds::None)
            }
            Operand::Value(_) | Operand::Column(_) => return Err(Error::ExpectedList(operator)),
        };
        Ok(Expression::new(format!("{column} {operator} ({list})"), binds))
    }

    fn empty_in(&self, operator: Operator) -> Expression {
        match (self.options.empty_in, operator.is_negated()) {
            (EmptyInPolicy::Drop, _) => Expression::default(),
            (EmptyInPolicy::Constant, false) => Expression::raw("0 = 1"),
            (EmptyInPolicy::Constant, true) => Expression::raw("1 = 1"),
        }
    }

    fn compile_between(&self, column: &str, operator: Operator, operand: &Operand) -> Result<Expression> {
        match operand {
            Operand::List(values) if values.len() == 2 => Ok(Expression::new(
                format!("{column} {operator} ? and ?"),
                values.iter().cloned().collect::<Binds>(),
            )),
            Operand::Columns(columns) if columns.len() == 2 => {
                let low = self.render(&columns[0])?;
                let high = self.render(&columns[1])?;
                Ok(Expression::raw(format!("{column} {operator} {low} and {high}")))
            }
            Operand::List(values) => Err(Error::BetweenArity {
                operator,
                count: values.len(),
            }),
            Operand::Columns(columns) => Err(Error::BetweenArity {
                operator,
                count: columns.len(),
            }),
            Operand::Value(_) | Operand::Column(_) => Err(Error::BetweenArity { operator, count: 1 }),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        Ident,
        compiler::CompileOptions,
        dialect::MySql,
        expr::{Conjunction, Operand},
    };

    use super::*;

    fn compile(group: &ConditionGroup) -> Expression {
        Compiler::for_dialect::<MySql>().compile_conditions(group).unwrap()
    }

    fn condition<V: crate::expr::IntoOperand>(column: &str, operator: &str, value: V) -> Predicate {
        Condition::new(column, operator, value).into()
    }

    #[test]
    fn test_and_or_flat() {
        let mut group = ConditionGroup::default();
        group
            .push(Conjunction::And, condition("a", "=", 1))
            .push(Conjunction::Or, condition("b", "=", 2))
            .push(Conjunction::Or, condition("c", "=", 3));
        let expression = compile(&group);
        assert_eq!("`a` = ? or `b` = ? or `c` = ?", expression.sql());
        assert_eq!(&[Bind::I32(1), Bind::I32(2), Bind::I32(3)], expression.bindings());
    }

    #[test]
    fn test_or_with_nested_and() {
        let mut inner = ConditionGroup::default();
        inner.add(condition("b", "=", 2)).add(condition("c", "=", 3));
        let mut group = ConditionGroup::default();
        group
            .push(Conjunction::And, condition("a", "=", 1))
            .push(Conjunction::Or, Predicate::Group(inner));
        assert_eq!("`a` = ? or (`b` = ? and `c` = ?)", compile(&group).sql());
    }

    #[test]
    fn test_or_group_among_and() {
        let mut group = ConditionGroup::default();
        group
            .push(Conjunction::And, condition("is_paid", "=", true))
            .push(Conjunction::And, condition("category", "!=", "books"))
            .push(Conjunction::And, condition("created_at", ">", "2024-01-01"))
            .push(Conjunction::Or, condition("status", "=", "new"));
        assert_eq!(
            "`is_paid` = ? and `category` != ? and (`created_at` > ? or `status` = ?)",
            compile(&group).sql()
        );
    }

    #[test]
    fn test_null_collapses() {
        let mut group = ConditionGroup::default();
        group
            .add(condition("a", "=", Bind::Null))
            .add(condition("b", "!=", Bind::Null))
            .add(condition("c", "<>", Option::<i32>::None));
        let expression = compile(&group);
        assert_eq!("`a` is null and `b` is not null and `c` is not null", expression.sql());
        assert!(expression.bindings().is_empty());
    }

    #[test]
    fn test_is_binds_null() {
        let mut group = ConditionGroup::default();
        group.add(condition("a", "is", Bind::Null));
        let expression = compile(&group);
        assert_eq!("`a` is ?", expression.sql());
        assert_eq!(&[Bind::Null], expression.bindings());
    }

    #[test]
    fn test_in() {
        let mut group = ConditionGroup::default();
        group
            .add(condition("a", "in", [1, 2, 3]))
            .add(condition("b", "NOT IN", vec!["x"]));
        let expression = compile(&group);
        assert_eq!("`a` in (?, ?, ?) and `b` not in (?)", expression.sql());
        assert_eq!(4, expression.bindings().len());
    }

    #[test]
    fn test_empty_in_vanishes() {
        let mut group = ConditionGroup::default();
        group
            .add(condition("a", "in", Vec::<i32>::new()))
            .add(condition("b", "=", 1));
        let expression = compile(&group);
        assert_eq!("`b` = ?", expression.sql());
        assert_eq!(&[Bind::I32(1)], expression.bindings());
    }

    #[test]
    fn test_empty_in_constant_policy() {
        let compiler = Compiler::for_dialect::<MySql>().with_options(CompileOptions {
            empty_in: EmptyInPolicy::Constant,
        });
        let mut group = ConditionGroup::default();
        group
            .add(condition("a", "in", Vec::<i32>::new()))
            .add(condition("b", "not in", Vec::<i32>::new()));
        let expression = compile_with(&compiler, &group);
        assert_eq!("0 = 1 and 1 = 1", expression.sql());
    }

    fn compile_with(compiler: &Compiler, group: &ConditionGroup) -> Expression {
        compiler.compile_conditions(group).unwrap()
    }

    #[test]
    fn test_between() {
        let mut group = ConditionGroup::default();
        group
            .add(condition("age", "between", [18, 30]))
            .add(condition("score", "not between", [1, 2]));
        let expression = compile(&group);
        assert_eq!("`age` between ? and ? and `score` not between ? and ?", expression.sql());
        assert_eq!(
            &[Bind::I32(18), Bind::I32(30), Bind::I32(1), Bind::I32(2)],
            expression.bindings()
        );
    }

    #[test]
    fn test_between_columns() {
        let mut group = ConditionGroup::default();
        let range = Operand::Columns(vec![Ident::new("t.low"), Ident::new("t.high")]);
        group.add(condition("a", "between", range));
        let expression = compile(&group);
        assert_eq!("`a` between `t`.`low` and `t`.`high`", expression.sql());
        assert!(expression.bindings().is_empty());
    }

    #[test]
    fn test_between_arity() {
        let mut group = ConditionGroup::default();
        group.add(condition("age", "between", [18, 30, 40]));
        let err = Compiler::for_dialect::<MySql>()
            .compile_conditions(&group)
            .unwrap_err();
        assert!(matches!(err, Error::BetweenArity { count: 3, .. }));
        assert_eq!(
            "There must be exactly two values for between condition, got 3",
            err.to_string()
        );
    }

    #[test]
    fn test_unsupported_operator() {
        let mut group = ConditionGroup::default();
        group.add(condition("a", "~", 1));
        let err = Compiler::for_dialect::<MySql>()
            .compile_conditions(&group)
            .unwrap_err();
        assert!(matches!(err, Error::UnsupportedOperator(ref op) if op == "~"));
    }

    #[test]
    fn test_shape_errors() {
        let compiler = Compiler::for_dialect::<MySql>();
        let err = compiler
            .compile_condition(&Condition::new("a", "in", 1))
            .unwrap_err();
        assert!(matches!(err, Error::ExpectedList(Operator::In)));
        let err = compiler
            .compile_condition(&Condition::new("a", "=", [1, 2]))
            .unwrap_err();
        assert!(matches!(err, Error::ExpectedScalar(Operator::Eq)));
    }

    #[test]
    fn test_column_operand() {
        let expression = Compiler::for_dialect::<MySql>()
            .compile_condition(&Condition::columns("t.id", "=", "t1.t_id"))
            .unwrap();
        assert_eq!("`t`.`id` = `t1`.`t_id`", expression.sql());
        assert!(expression.bindings().is_empty());
    }

    #[test]
    fn test_raw_passes_through_and_empty_group_vanishes() {
        let mut group = ConditionGroup::default();
        group
            .add(Expression::new("a = ? or b = ?", [1, 2]))
            .add(ConditionGroup::default())
            .add(condition("c", "=", 3));
        let expression = compile(&group);
        assert_eq!("a = ? or b = ? and `c` = ?", expression.sql());
        assert_eq!(3, expression.bindings().len());
    }

    #[test]
    fn test_lone_group_is_not_parenthesized() {
        let mut inner = ConditionGroup::or();
        inner.add(condition("a", "=", 1)).add(condition("b", "=", 2));
        let mut group = ConditionGroup::default();
        group.add(inner);
        assert_eq!("`a` = ? or `b` = ?", compile(&group).sql());
    }
}
