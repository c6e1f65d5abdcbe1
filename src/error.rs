use thiserror::Error;

use crate::operator::Operator;

/// Errors raised while building or compiling a statement.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Missing from clause")]
    MissingFrom,

    #[error("Unsupported operator '{0}'")]
    UnsupportedOperator(String),

    #[error("There must be exactly two values for {operator} condition, got {count}")]
    BetweenArity { operator: Operator, count: usize },

    #[error("Operator '{0}' expects a list of values")]
    ExpectedList(Operator),

    #[error("Operator '{0}' expects a single value")]
    ExpectedScalar(Operator),

    #[error("Invalid direction [{0}]")]
    InvalidDirection(String),

    #[error("Unsupported driver '{0}'")]
    UnsupportedDriver(String),

    #[error("Empty update values")]
    EmptyUpdate,

    #[error("Empty insert values")]
    EmptyInsert,

    #[error("Insert row {row} has no value for column '{column}'")]
    MissingInsertValue { row: usize, column: String },

    #[error("failed to write sql: {0}")]
    Format(#[from] std::fmt::Error),

    #[error("connection error: {0}")]
    Connection(#[source] Box<dyn std::error::Error + Send + Sync>),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
