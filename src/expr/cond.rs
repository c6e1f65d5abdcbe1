use smol_str::SmolStr;

use crate::{
    bind::{Bind, IntoBind},
    ident::{Ident, IntoIdent},
};

/// Right hand side of a condition.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    Value(Bind),
    List(Vec<Bind>),
    Column(Ident),
    Columns(Vec<Ident>),
}

impl Operand {
    pub fn is_column(&self) -> bool {
        matches!(self, Operand::Column(_) | Operand::Columns(_))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Operand::Value(Bind::Null))
    }
}

pub trait IntoOperand {
    fn into_operand(self) -> Operand;
}

impl IntoOperand for Operand {
    fn into_operand(self) -> Operand {
        self
    }
}

impl IntoOperand for Ident {
    fn into_operand(self) -> Operand {
        Operand::Column(self)
    }
}

impl<T: IntoBind> IntoOperand for T {
    fn into_operand(self) -> Operand {
        Operand::Value(self.into_bind())
    }
}

impl<T: IntoBind> IntoOperand for Vec<T> {
    fn into_operand(self) -> Operand {
        Operand::List(self.into_iter().map(IntoBind::into_bind).collect())
    }
}

impl<T: IntoBind, const N: usize> IntoOperand for [T; N] {
    fn into_operand(self) -> Operand {
        Operand::List(self.into_iter().map(IntoBind::into_bind).collect())
    }
}

/// A single `column operator value` predicate.
///
/// The operator is only normalized here, it is validated when compiled.
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    column: Ident,
    operator: SmolStr,
    operand: Operand,
}

impl Condition {
    pub fn new<C, O, V>(column: C, operator: O, value: V) -> Self
    where
        C: IntoIdent,
        O: AsRef<str>,
        V: IntoOperand,
    {
        Self {
            column: column.into_ident(),
            operator: normalize(operator.as_ref()),
            operand: value.into_operand(),
        }
    }

    /// Compares two columns, nothing gets bound.
    pub fn columns<C, O, R>(column: C, operator: O, other: R) -> Self
    where
        C: IntoIdent,
        O: AsRef<str>,
        R: IntoIdent,
    {
        Self::new(column, operator, Operand::Column(other.into_ident()))
    }

    pub fn column(&self) -> &Ident {
        &self.column
    }

    pub fn operator(&self) -> &str {
        self.operator.as_str()
    }

    pub fn operand(&self) -> &Operand {
        &self.operand
    }

    pub fn right_is_column(&self) -> bool {
        self.operand.is_column()
    }
}

fn normalize(operator: &str) -> SmolStr {
    let operator = operator.trim();
    if operator.bytes().any(|b| b.is_ascii_uppercase()) {
        SmolStr::new(operator.to_ascii_lowercase())
    } else {
        SmolStr::new(operator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operator_normalized() {
        let condition = Condition::new("a", " NOT IN ", [1, 2]);
        assert_eq!("not in", condition.operator());
        assert_eq!(
            &Operand::List(vec![Bind::I32(1), Bind::I32(2)]),
            condition.operand()
        );
    }

    #[test]
    fn test_arbitrary_operator_is_accepted() {
        let condition = Condition::new("a", "~~", 1);
        assert_eq!("~~", condition.operator());
    }

    #[test]
    fn test_column_operand() {
        let condition = Condition::columns("t.id", "=", "t1.t_id");
        assert!(condition.right_is_column());
        let condition = Condition::new("t.id", "=", crate::ident("t1.t_id"));
        assert!(condition.right_is_column());
        let condition = Condition::new("a", "=", Option::<i32>::None);
        assert!(condition.operand().is_null());
    }
}
