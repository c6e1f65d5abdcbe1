mod bind;
mod builder;
mod clause;
mod col;
mod compiler;
mod connection;
mod dialect;
mod error;
mod expr;
mod expression;
mod ident;
mod operator;
mod paginate;
mod registry;
mod row;
mod set;
mod writer;

pub use bind::{Array, Bind, Binds, IntoBind, IntoBinds};
pub use builder::{Builder, QueryKind};
pub use clause::{
    HasConditions, HasJoinConditions, HavingClause, JoinClause, JoinGroup, JoinType, UnionClause,
    WhereClause, WithClause,
};
pub use col::{Column, Columns, IntoColumn, IntoColumns};
pub use compiler::{CompileOptions, Compiler, EmptyInPolicy};
pub use connection::{Connection, Rows};
pub use dialect::{Dialect, Grammar, HasDialect, MySql, Postgres, Sqlite};
pub use error::{Error, Result};
pub use expr::{
    Condition, ConditionGroup, Conjunction, IntoOperand, Operand, Order, OrderExpr, Ordering,
    Predicate,
};
pub use expression::Expression;
pub use ident::{Ident, IntoIdent, IntoTableRef, TableRef};
pub use operator::Operator;
pub use paginate::Paginator;
pub use registry::{GrammarFactory, Registry};
pub use row::Row;
pub use set::{Assignment, Assignments};

pub mod prelude {
    pub use crate::clause::{HasConditions, HasJoinConditions};
    pub use crate::{Builder, MySql, Ordering, Postgres, Sqlite, ident, raw};
}

/// A column reference, usable wherever a value is expected to compare two columns.
pub fn ident<T: IntoIdent>(value: T) -> Ident {
    value.into_ident()
}

/// A raw sql fragment with its bindings.
pub fn raw<S: Into<String>, B: IntoBinds>(sql: S, binds: B) -> Expression {
    Expression::new(sql, binds)
}

#[cfg(test)]
pub(crate) mod tests {
    use crate::{dialect, writer};

    pub(crate) fn format_writer<W: writer::FormatWriter>(writer: W, dialect: dialect::Dialect) -> String {
        let mut str = String::new();
        let mut context = writer::FormatContext::new(&mut str, &dialect);
        writer.format_writer(&mut context).unwrap();
        str
    }
}
