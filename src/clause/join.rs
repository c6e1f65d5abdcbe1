use sqlweave_derive::or_variant;

use crate::{
    TableRef,
    expr::{Condition, ConditionGroup, Conjunction},
    ident::IntoIdent,
    writer::FormatWriter,
};

use super::HasConditions;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum JoinType {
    #[default]
    Inner,
    Left,
    Right,
    Cross,
}

impl FormatWriter for JoinType {
    fn format_writer<W: std::fmt::Write>(
        &self,
        context: &mut crate::writer::FormatContext<'_, W>,
    ) -> std::fmt::Result {
        match self {
            JoinType::Inner => context.writer.write_str("inner join"),
            JoinType::Left => context.writer.write_str("left join"),
            JoinType::Right => context.writer.write_str("right join"),
            JoinType::Cross => context.writer.write_str("cross join"),
        }
    }
}

/// `on*` methods for every clause building a join predicate.
///
/// They compare two columns, the `where*` methods from [`HasConditions`]
/// bind values. Both land in the same group.
pub trait HasJoinConditions: HasConditions {
    #[or_variant]
    fn on<C, O, CC>(&mut self, column: C, operator: O, other_column: CC) -> &mut Self
    where
        C: IntoIdent,
        O: AsRef<str>,
        CC: IntoIdent,
    {
        self.push_predicate(
            Conjunction::And,
            Condition::columns(column, operator, other_column),
        )
    }

    #[or_variant]
    fn on_eq<C, CC>(&mut self, column: C, other_column: CC) -> &mut Self
    where
        C: IntoIdent,
        CC: IntoIdent,
    {
        self.push_predicate(Conjunction::And, Condition::columns(column, "=", other_column))
    }
}

/// A joined table with its own `on` predicate tree.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinClause {
    ty: JoinType,
    table: TableRef,
    conditions: ConditionGroup,
}

impl JoinClause {
    pub(crate) fn new(ty: JoinType, table: TableRef) -> Self {
        Self {
            ty,
            table,
            conditions: ConditionGroup::default(),
        }
    }

    pub fn join_type(&self) -> JoinType {
        self.ty
    }

    pub fn table(&self) -> &TableRef {
        &self.table
    }

    pub fn conditions(&self) -> &ConditionGroup {
        &self.conditions
    }
}

impl HasConditions for JoinClause {
    type Nested = JoinGroup;

    fn conditions_mut(&mut self) -> &mut ConditionGroup {
        &mut self.conditions
    }

    fn into_conditions(self) -> ConditionGroup {
        self.conditions
    }
}

impl HasJoinConditions for JoinClause {}

/// Parenthesized part of a join predicate, handed to `where_group` closures.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct JoinGroup {
    conditions: ConditionGroup,
}

impl HasConditions for JoinGroup {
    type Nested = JoinGroup;

    fn conditions_mut(&mut self) -> &mut ConditionGroup {
        &mut self.conditions
    }

    fn into_conditions(self) -> ConditionGroup {
        self.conditions
    }
}

impl HasJoinConditions for JoinGroup {}
