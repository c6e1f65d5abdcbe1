use std::sync::{Arc, OnceLock};

use sqlweave_derive::or_variant;

use crate::{
    bind::{Bind, IntoBind, IntoBinds},
    clause::{
        HasConditions, HavingClause, JoinClause, JoinType, UnionClause, WhereClause, WithClause,
    },
    col::{Column, Columns, IntoColumns},
    compiler::Compiler,
    connection::{Connection, Rows},
    dialect::HasDialect,
    error::{Error, Result},
    expr::{Condition, ConditionGroup, Conjunction, IntoOperand, Ordering},
    expression::Expression,
    ident::{IntoIdent, IntoTableRef, TableRef},
    paginate::Paginator,
    row::Row,
    set::Assignments,
};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum QueryKind {
    #[default]
    Select,
    Update,
    Delete,
    Insert,
}

/// A statement under construction.
///
/// The builder only records clauses, compilation lives in [`Compiler`].
/// The compiled sql and bindings are cached on first access and never
/// recomputed, mutating the builder afterwards has no effect on them until
/// [`Builder::invalidate`] is called.
#[derive(Debug, Clone)]
pub struct Builder {
    compiler: Arc<Compiler>,
    kind: QueryKind,
    maybe_table: Option<TableRef>,
    columns: Columns,
    distinct: bool,
    joins: Vec<JoinClause>,
    maybe_where: Option<WhereClause>,
    groups: Columns,
    maybe_having: Option<HavingClause>,
    paginator: Paginator,
    unions: Vec<UnionClause>,
    union_paginator: Paginator,
    maybe_with: Option<WithClause>,
    assignments: Assignments,
    rows: Vec<Row>,
    lazy: bool,
    compiled: OnceLock<Expression>,
}

impl Builder {
    /// An empty select compiled with the grammar of `D`.
    pub fn new<D: HasDialect>() -> Self {
        Self::with_compiler(Compiler::for_dialect::<D>())
    }

    pub fn with_compiler<C: Into<Arc<Compiler>>>(compiler: C) -> Self {
        Self {
            compiler: compiler.into(),
            kind: QueryKind::Select,
            maybe_table: None,
            columns: Columns::None,
            distinct: false,
            joins: Vec::new(),
            maybe_where: None,
            groups: Columns::None,
            maybe_having: None,
            paginator: Paginator::default(),
            unions: Vec::new(),
            union_paginator: Paginator::default(),
            maybe_with: None,
            assignments: Assignments::default(),
            rows: Vec::new(),
            lazy: false,
            compiled: OnceLock::new(),
        }
    }

    /// A fresh builder sharing this builder's compiler.
    pub fn new_query(&self) -> Self {
        Self::with_compiler(Arc::clone(&self.compiler))
    }

    // select list

    pub fn select<C: IntoColumns>(&mut self, columns: C) -> &mut Self {
        self.kind = QueryKind::Select;
        self.columns = columns.into_columns();
        self
    }

    pub fn add_select<C: IntoColumns>(&mut self, columns: C) -> &mut Self {
        self.columns.append(columns.into_columns());
        self
    }

    pub fn select_as<C: IntoIdent, A: IntoIdent>(&mut self, column: C, alias: A) -> &mut Self {
        self.columns.push(Column::aliased(column, alias));
        self
    }

    pub fn select_raw<S, B>(&mut self, sql: S, binds: B) -> &mut Self
    where
        S: Into<String>,
        B: IntoBinds,
    {
        let raw = Expression::new(sql, binds);
        if !raw.is_empty() {
            self.columns.push(Column::Raw(raw));
        }
        self
    }

    pub fn distinct(&mut self) -> &mut Self {
        self.distinct = true;
        self
    }

    pub fn from<T: IntoTableRef>(&mut self, table: T) -> &mut Self {
        self.maybe_table = Some(table.into_table_ref());
        self
    }

    pub fn from_as<T: IntoIdent, A: IntoIdent>(&mut self, table: T, alias: A) -> &mut Self {
        self.maybe_table = Some(TableRef::aliased(table, alias));
        self
    }

    // joins

    pub fn join<T, F>(&mut self, table: T, on: F) -> &mut Self
    where
        T: IntoTableRef,
        F: FnOnce(&mut JoinClause),
    {
        self.join_with(JoinType::Inner, table, on)
    }

    pub fn left_join<T, F>(&mut self, table: T, on: F) -> &mut Self
    where
        T: IntoTableRef,
        F: FnOnce(&mut JoinClause),
    {
        self.join_with(JoinType::Left, table, on)
    }

    pub fn right_join<T, F>(&mut self, table: T, on: F) -> &mut Self
    where
        T: IntoTableRef,
        F: FnOnce(&mut JoinClause),
    {
        self.join_with(JoinType::Right, table, on)
    }

    pub fn cross_join<T: IntoTableRef>(&mut self, table: T) -> &mut Self {
        self.join_with(JoinType::Cross, table, |_| {})
    }

    fn join_with<T, F>(&mut self, ty: JoinType, table: T, on: F) -> &mut Self
    where
        T: IntoTableRef,
        F: FnOnce(&mut JoinClause),
    {
        let mut join = JoinClause::new(ty, table.into_table_ref());
        on(&mut join);
        self.joins.push(join);
        self
    }

    // group by / having

    /// Columns already grouped on are skipped.
    pub fn group_by<C: IntoColumns>(&mut self, columns: C) -> &mut Self {
        for column in columns.into_columns().into_vec() {
            if !self.groups.as_slice().contains(&column) {
                self.groups.push(column);
            }
        }
        self
    }

    pub fn group_by_raw<S, B>(&mut self, sql: S, binds: B) -> &mut Self
    where
        S: Into<String>,
        B: IntoBinds,
    {
        self.group_by(Column::Raw(Expression::new(sql, binds)))
    }

    fn having_mut(&mut self) -> &mut HavingClause {
        self.maybe_having.get_or_insert_default()
    }

    #[or_variant]
    pub fn having<C, O, V>(&mut self, column: C, operator: O, value: V) -> &mut Self
    where
        C: IntoIdent,
        O: AsRef<str>,
        V: IntoOperand,
    {
        self.having_mut()
            .push_predicate(Conjunction::And, Condition::new(column, operator, value));
        self
    }

    #[or_variant]
    pub fn having_eq<C, V>(&mut self, column: C, value: V) -> &mut Self
    where
        C: IntoIdent,
        V: IntoOperand,
    {
        self.having_mut()
            .push_predicate(Conjunction::And, Condition::new(column, "=", value));
        self
    }

    #[or_variant]
    pub fn having_raw<S, B>(&mut self, sql: S, binds: B) -> &mut Self
    where
        S: Into<String>,
        B: IntoBinds,
    {
        self.having_mut()
            .push_predicate(Conjunction::And, Expression::new(sql, binds));
        self
    }

    #[or_variant]
    pub fn having_group<F>(&mut self, group: F) -> &mut Self
    where
        F: FnOnce(&mut HavingClause),
    {
        let mut nested = HavingClause::default();
        group(&mut nested);
        self.having_mut()
            .push_predicate(Conjunction::And, nested.into_conditions());
        self
    }

    // order / limit / offset

    // once a union exists these apply to the union result
    fn paginator_mut(&mut self) -> &mut Paginator {
        if self.unions.is_empty() {
            &mut self.paginator
        } else {
            &mut self.union_paginator
        }
    }

    /// Ordering the same column again replaces its direction.
    pub fn order_by<C: IntoIdent>(&mut self, column: C, ordering: Ordering) -> &mut Self {
        self.paginator_mut()
            .order
            .column(column.into_ident(), ordering);
        self
    }

    pub fn order_by_asc<C: IntoIdent>(&mut self, column: C) -> &mut Self {
        self.order_by(column, Ordering::Asc)
    }

    pub fn order_by_desc<C: IntoIdent>(&mut self, column: C) -> &mut Self {
        self.order_by(column, Ordering::Desc)
    }

    pub fn order_by_raw<S, B>(&mut self, sql: S, binds: B) -> &mut Self
    where
        S: Into<String>,
        B: IntoBinds,
    {
        self.paginator_mut().order.raw(Expression::new(sql, binds));
        self
    }

    pub fn limit(&mut self, limit: u64) -> &mut Self {
        self.paginator_mut().set_limit(limit);
        self
    }

    /// An offset of zero is not rendered.
    pub fn offset(&mut self, offset: u64) -> &mut Self {
        self.paginator_mut().set_offset(offset);
        self
    }

    /// Limits to `per_page` rows starting at the zero based `page`.
    pub fn for_page(&mut self, page: u64, per_page: u64) -> &mut Self {
        self.paginator_mut().paginate(page, per_page);
        self
    }

    // unions / ctes

    pub fn union<F: FnOnce(&mut Builder)>(&mut self, query: F) -> &mut Self {
        self.push_union(query, false)
    }

    pub fn union_all<F: FnOnce(&mut Builder)>(&mut self, query: F) -> &mut Self {
        self.push_union(query, true)
    }

    fn push_union<F: FnOnce(&mut Builder)>(&mut self, query: F, all: bool) -> &mut Self {
        let mut sub = self.new_query();
        query(&mut sub);
        self.unions.push(UnionClause::new(sub, all));
        self
    }

    pub fn with<A, F>(&mut self, alias: A, query: F) -> &mut Self
    where
        A: IntoIdent,
        F: FnOnce(&mut Builder),
    {
        let mut sub = self.new_query();
        query(&mut sub);
        self.maybe_with
            .get_or_insert_default()
            .add(alias.into_ident(), sub);
        self
    }

    /// Same as [`Builder::with`] and marks the whole clause `recursive`.
    pub fn with_recursive<A, F>(&mut self, alias: A, query: F) -> &mut Self
    where
        A: IntoIdent,
        F: FnOnce(&mut Builder),
    {
        self.with(alias, query);
        self.maybe_with.get_or_insert_default().set_recursive();
        self
    }

    // update / insert / delete

    pub fn set<C: IntoIdent, V: IntoBind>(&mut self, column: C, value: V) -> &mut Self {
        self.kind = QueryKind::Update;
        self.assignments.value(column.into_ident(), value);
        self
    }

    pub fn set_raw<S, B>(&mut self, sql: S, binds: B) -> &mut Self
    where
        S: Into<String>,
        B: IntoBinds,
    {
        self.kind = QueryKind::Update;
        self.assignments.raw(Expression::new(sql, binds));
        self
    }

    pub fn insert<F: FnOnce(&mut Row)>(&mut self, row: F) -> &mut Self {
        let mut value = Row::new();
        row(&mut value);
        self.insert_row(value)
    }

    pub fn values<I, K, V>(&mut self, values: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: IntoIdent,
        V: IntoBind,
    {
        self.insert_row(values.into_iter().collect())
    }

    pub fn insert_row(&mut self, row: Row) -> &mut Self {
        self.kind = QueryKind::Insert;
        if !row.is_empty() {
            self.rows.push(row);
        }
        self
    }

    pub fn delete(&mut self) -> &mut Self {
        self.kind = QueryKind::Delete;
        self
    }

    /// Makes [`Builder::fetch_iter`] stream rows from a cursor instead of
    /// buffering the whole result set.
    pub fn lazy(&mut self) -> &mut Self {
        self.lazy = true;
        self
    }

    // getters

    pub fn is_lazy(&self) -> bool {
        self.lazy
    }

    pub fn kind(&self) -> QueryKind {
        self.kind
    }

    pub fn compiler(&self) -> &Compiler {
        &self.compiler
    }

    pub fn table(&self) -> Option<&TableRef> {
        self.maybe_table.as_ref()
    }

    pub fn columns(&self) -> &Columns {
        &self.columns
    }

    pub fn is_distinct(&self) -> bool {
        self.distinct
    }

    pub fn joins(&self) -> &[JoinClause] {
        &self.joins
    }

    pub fn where_conditions(&self) -> Option<&ConditionGroup> {
        self.maybe_where.as_ref().map(WhereClause::conditions)
    }

    pub fn groups(&self) -> &Columns {
        &self.groups
    }

    pub fn having_conditions(&self) -> Option<&ConditionGroup> {
        self.maybe_having.as_ref().map(HavingClause::conditions)
    }

    pub fn paginator(&self) -> &Paginator {
        &self.paginator
    }

    pub fn unions(&self) -> &[UnionClause] {
        &self.unions
    }

    pub fn union_paginator(&self) -> &Paginator {
        &self.union_paginator
    }

    pub fn ctes(&self) -> Option<&WithClause> {
        self.maybe_with.as_ref()
    }

    pub fn assignments(&self) -> &Assignments {
        &self.assignments
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    // compilation

    /// Compiles once and returns the cached statement afterwards.
    pub fn compiled(&self) -> Result<&Expression> {
        if let Some(expression) = self.compiled.get() {
            return Ok(expression);
        }
        let expression = self.compiler.compile(self)?;
        Ok(self.compiled.get_or_init(|| expression))
    }

    pub fn to_sql(&self) -> Result<&str> {
        Ok(self.compiled()?.sql())
    }

    pub fn bindings(&self) -> Result<&[Bind]> {
        Ok(self.compiled()?.bindings())
    }

    /// Drops the cached statement so the next access compiles again.
    pub fn invalidate(&mut self) -> &mut Self {
        self.compiled = OnceLock::new();
        self
    }

    // execution

    pub fn fetch<C: Connection>(&self, connection: &C) -> Result<Vec<C::Row>> {
        let statement = self.compiled()?;
        tracing::debug!(sql = statement.sql(), "fetching rows");
        connection
            .query(statement.sql(), statement.bindings())
            .map_err(|err| Error::Connection(Box::new(err)))
    }

    pub fn fetch_iter<'c, C: Connection>(&self, connection: &'c C) -> Result<Rows<'c, C>> {
        if !self.lazy {
            return Ok(Rows::Buffered(self.fetch(connection)?.into_iter()));
        }
        let statement = self.compiled()?;
        tracing::debug!(sql = statement.sql(), "opening cursor");
        connection
            .cursor(statement.sql(), statement.bindings())
            .map(Rows::Streamed)
            .map_err(|err| Error::Connection(Box::new(err)))
    }

    pub fn execute<C: Connection>(&self, connection: &C) -> Result<u64> {
        let statement = self.compiled()?;
        tracing::debug!(sql = statement.sql(), "executing statement");
        connection
            .execute(statement.sql(), statement.bindings())
            .map_err(|err| Error::Connection(Box::new(err)))
    }
}

impl HasConditions for Builder {
    type Nested = WhereClause;

    fn conditions_mut(&mut self) -> &mut ConditionGroup {
        self.maybe_where.get_or_insert_default().conditions_mut()
    }

    fn into_conditions(self) -> ConditionGroup {
        self.maybe_where
            .map(WhereClause::into_conditions)
            .unwrap_or_default()
    }
}
