use std::{fmt, str::FromStr};

use crate::{error::Error, writer::FormatWriter};

/// The closed set of comparison operators a condition may use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Eq,
    NotEq,
    Diamond,
    Lt,
    Gt,
    Lte,
    Gte,
    In,
    NotIn,
    Between,
    NotBetween,
    Like,
    NotLike,
    Is,
    IsNot,
}

impl Operator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Eq => "=",
            Operator::NotEq => "!=",
            Operator::Diamond => "<>",
            Operator::Lt => "<",
            Operator::Gt => ">",
            Operator::Lte => "<=",
            Operator::Gte => ">=",
            Operator::In => "in",
            Operator::NotIn => "not in",
            Operator::Between => "between",
            Operator::NotBetween => "not between",
            Operator::Like => "like",
            Operator::NotLike => "not like",
            Operator::Is => "is",
            Operator::IsNot => "is not",
        }
    }

    /// `=`, `!=` and `<>`, the operators that collapse to `is [not] null`.
    pub fn is_exact_equality(&self) -> bool {
        matches!(self, Operator::Eq | Operator::NotEq | Operator::Diamond)
    }

    pub fn is_negated(&self) -> bool {
        matches!(
            self,
            Operator::NotEq
                | Operator::Diamond
                | Operator::NotIn
                | Operator::NotBetween
                | Operator::NotLike
                | Operator::IsNot
        )
    }
}

impl FromStr for Operator {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let operator = match value.trim().to_ascii_lowercase().as_str() {
            "=" => Operator::Eq,
            "!=" => Operator::NotEq,
            "<>" => Operator::Diamond,
            "<" => Operator::Lt,
            ">" => Operator::Gt,
            "<=" => Operator::Lte,
            ">=" => Operator::Gte,
            "in" => Operator::In,
            "not in" => Operator::NotIn,
            "between" => Operator::Between,
            "not between" => Operator::NotBetween,
            "like" => Operator::Like,
            "not like" => Operator::NotLike,
            "is" => Operator::Is,
            "is not" => Operator::IsNot,
            _ => return Err(Error::UnsupportedOperator(value.to_owned())),
        };
        Ok(operator)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FormatWriter for Operator {
    fn format_writer<W: fmt::Write>(
        &self,
        context: &mut crate::writer::FormatContext<'_, W>,
    ) -> fmt::Result {
        context.writer.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_normalizes() {
        assert_eq!(Operator::NotIn, " NOT IN ".parse().unwrap());
        assert_eq!(Operator::Diamond, "<>".parse().unwrap());
        assert_eq!(Operator::Like, "Like".parse().unwrap());
    }

    #[test]
    fn test_parse_unsupported() {
        let err = "~~".parse::<Operator>().unwrap_err();
        assert_eq!("Unsupported operator '~~'", err.to_string());
    }

    #[test]
    fn test_round_trip_every_operator() {
        let all = [
            Operator::Eq,
            Operator::NotEq,
            Operator::Diamond,
            Operator::Lt,
            Operator::Gt,
            Operator::Lte,
            Operator::Gte,
            Operator::In,
            Operator::NotIn,
            Operator::Between,
            Operator::NotBetween,
            Operator::Like,
            Operator::NotLike,
            Operator::Is,
            Operator::IsNot,
        ];
        for operator in all {
            assert_eq!(operator, operator.as_str().parse().unwrap());
        }
    }

    #[test]
    fn test_exact_equality() {
        assert!(Operator::Eq.is_exact_equality());
        assert!(Operator::Diamond.is_exact_equality());
        assert!(!Operator::Is.is_exact_equality());
        assert!(Operator::NotBetween.is_negated());
    }
}
