mod cte;
mod filter;
mod join;
mod union;

pub use cte::WithClause;
pub use filter::{HavingClause, WhereClause};
pub use join::{HasJoinConditions, JoinClause, JoinGroup, JoinType};
pub use union::UnionClause;

use sqlweave_derive::or_variant;

use crate::{
    bind::{Bind, IntoBind, IntoBinds},
    expr::{Condition, ConditionGroup, Conjunction, IntoOperand, Operand, Predicate},
    expression::Expression,
    ident::IntoIdent,
};

/// Fluent predicate methods shared by every clause owning a [`ConditionGroup`].
///
/// Each `where_*` method has an `or_where_*` twin joining the new predicate
/// to the previous one with `or` instead of `and`.
pub trait HasConditions: Sized {
    /// Clause handed to `where_group` closures.
    type Nested: HasConditions + Default;

    fn conditions_mut(&mut self) -> &mut ConditionGroup;

    fn into_conditions(self) -> ConditionGroup;

    fn push_predicate<P: Into<Predicate>>(&mut self, conjunction: Conjunction, predicate: P) -> &mut Self {
        self.conditions_mut().push(conjunction, predicate.into());
        self
    }

    /// `column operator ?`. The operator is checked when the query compiles.
    #[or_variant]
    fn where_clause<C, O, V>(&mut self, column: C, operator: O, value: V) -> &mut Self
    where
        C: IntoIdent,
        O: AsRef<str>,
        V: IntoOperand,
    {
        self.push_predicate(Conjunction::And, Condition::new(column, operator, value))
    }

    #[or_variant]
    fn where_eq<C, V>(&mut self, column: C, value: V) -> &mut Self
    where
        C: IntoIdent,
        V: IntoOperand,
    {
        self.push_predicate(Conjunction::And, Condition::new(column, "=", value))
    }

    /// Compares two columns, e.g. `where_column("a.id", "=", "b.a_id")`.
    #[or_variant]
    fn where_column<C, O, R>(&mut self, column: C, operator: O, other: R) -> &mut Self
    where
        C: IntoIdent,
        O: AsRef<str>,
        R: IntoIdent,
    {
        self.push_predicate(Conjunction::And, Condition::columns(column, operator, other))
    }

    #[or_variant]
    fn where_null<C: IntoIdent>(&mut self, column: C) -> &mut Self {
        self.push_predicate(Conjunction::And, Condition::new(column, "=", Bind::Null))
    }

    #[or_variant]
    fn where_not_null<C: IntoIdent>(&mut self, column: C) -> &mut Self {
        self.push_predicate(Conjunction::And, Condition::new(column, "!=", Bind::Null))
    }

    /// An empty list drops the predicate unless the compiler is configured otherwise.
    #[or_variant]
    fn where_in<C, I>(&mut self, column: C, values: I) -> &mut Self
    where
        C: IntoIdent,
        I: IntoIterator,
        I::Item: IntoBind,
    {
        let values = Operand::List(values.into_iter().map(IntoBind::into_bind).collect());
        self.push_predicate(Conjunction::And, Condition::new(column, "in", values))
    }

    #[or_variant]
    fn where_not_in<C, I>(&mut self, column: C, values: I) -> &mut Self
    where
        C: IntoIdent,
        I: IntoIterator,
        I::Item: IntoBind,
    {
        let values = Operand::List(values.into_iter().map(IntoBind::into_bind).collect());
        self.push_predicate(Conjunction::And, Condition::new(column, "not in", values))
    }

    #[or_variant]
    fn where_between<C, L, H>(&mut self, column: C, low: L, high: H) -> &mut Self
    where
        C: IntoIdent,
        L: IntoBind,
        H: IntoBind,
    {
        let range = Operand::List(vec![low.into_bind(), high.into_bind()]);
        self.push_predicate(Conjunction::And, Condition::new(column, "between", range))
    }

    #[or_variant]
    fn where_not_between<C, L, H>(&mut self, column: C, low: L, high: H) -> &mut Self
    where
        C: IntoIdent,
        L: IntoBind,
        H: IntoBind,
    {
        let range = Operand::List(vec![low.into_bind(), high.into_bind()]);
        self.push_predicate(Conjunction::And, Condition::new(column, "not between", range))
    }

    /// `column between low and high` with both bounds taken from columns.
    #[or_variant]
    fn where_between_columns<C, L, H>(&mut self, column: C, low: L, high: H) -> &mut Self
    where
        C: IntoIdent,
        L: IntoIdent,
        H: IntoIdent,
    {
        let range = Operand::Columns(vec![low.into_ident(), high.into_ident()]);
        self.push_predicate(Conjunction::And, Condition::new(column, "between", range))
    }

    #[or_variant]
    fn where_raw<S, B>(&mut self, sql: S, binds: B) -> &mut Self
    where
        S: Into<String>,
        B: IntoBinds,
    {
        self.push_predicate(Conjunction::And, Expression::new(sql, binds))
    }

    /// Predicates added inside the closure end up parenthesized as one item.
    #[or_variant]
    fn where_group<F>(&mut self, group: F) -> &mut Self
    where
        F: FnOnce(&mut Self::Nested),
    {
        let mut nested = Self::Nested::default();
        group(&mut nested);
        self.push_predicate(Conjunction::And, nested.into_conditions())
    }
}
