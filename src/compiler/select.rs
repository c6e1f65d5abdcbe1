use crate::{
    Builder,
    clause::JoinClause,
    col::{Column, Columns},
    error::{Error, Result},
    expr::{ConditionGroup, OrderExpr},
    expression::{Expression, ExpressionBuilder},
    paginate::Paginator,
};

use super::Compiler;

impl Compiler {
    pub(crate) fn compile_select(&self, query: &Builder) -> Result<Expression> {
        let main = Expression::concat([
            self.compile_columns(query)?,
            self.compile_joins(query.joins())?,
            self.compile_filter(query.where_conditions(), "where ")?,
            self.compile_group_by(query.groups())?,
            self.compile_filter(query.having_conditions(), "having ")?,
            self.compile_paginator(query.paginator())?,
        ]);
        if query.unions().is_empty() {
            return Ok(main);
        }

        let mut statement = main.wrap();
        for union in query.unions() {
            let keyword = if union.is_all() { "union all " } else { "union " };
            let sub = union.query().compiled()?.clone();
            statement = statement.merge(sub.wrap().prefix(keyword));
        }
        Ok(statement.merge(self.compile_paginator(query.union_paginator())?))
    }

    pub(crate) fn compile_ctes(&self, query: &Builder) -> Result<Expression> {
        let Some(ctes) = query.ctes() else {
            return Ok(Expression::default());
        };
        let prefix = if ctes.is_recursive() { "with recursive " } else { "with " };
        let mut builder = ExpressionBuilder::new(", ").prefix(prefix);
        for (alias, sub) in ctes.iter() {
            let alias = self.render(alias)?;
            let sub = sub.compiled()?.clone();
            builder.push(sub.wrap().prefix(&format!("{alias} as ")));
        }
        Ok(builder.finish())
    }

    fn compile_columns(&self, query: &Builder) -> Result<Expression> {
        let table = query.table().ok_or(Error::MissingFrom)?;
        let prefix = if query.is_distinct() { "select distinct " } else { "select " };
        let mut builder = ExpressionBuilder::new(", ").prefix(prefix);
        for column in query.columns().iter() {
            builder.push(self.compile_column(column)?);
        }
        if builder.is_empty() {
            builder.push_sql("*");
        }
        let from = format!("from {}", self.render(table)?);
        Ok(builder.finish().merge(Expression::raw(from)))
    }

    fn compile_column(&self, column: &Column) -> Result<Expression> {
        match column {
            Column::Raw(raw) => Ok(raw.clone()),
            column => Ok(Expression::raw(self.render(column)?)),
        }
    }

    fn compile_joins(&self, joins: &[JoinClause]) -> Result<Expression> {
        let mut builder = ExpressionBuilder::new(" ");
        for join in joins {
            let head = format!(
                "{} {}",
                self.render(&join.join_type())?,
                self.render(join.table())?
            );
            let on = self.compile_conditions(join.conditions())?.prefix("on ");
            builder.push(Expression::raw(head).merge(on));
        }
        Ok(builder.finish())
    }

    pub(crate) fn compile_filter(
        &self,
        conditions: Option<&ConditionGroup>,
        keyword: &str,
    ) -> Result<Expression> {
        match conditions {
            Some(group) => Ok(self.compile_conditions(group)?.prefix(keyword)),
            None => Ok(Expression::default()),
        }
    }

    fn compile_group_by(&self, groups: &Columns) -> Result<Expression> {
        let mut builder = ExpressionBuilder::new(", ").prefix("group by ");
        for column in groups.iter() {
            builder.push(self.compile_column(column)?);
        }
        Ok(builder.finish())
    }

    fn compile_paginator(&self, paginator: &Paginator) -> Result<Expression> {
        let mut builder = ExpressionBuilder::new(", ").prefix("order by ");
        for projection in paginator.order().projections() {
            match projection {
                OrderExpr::Raw(raw) => builder.push(raw.clone()),
                column => builder.push(Expression::raw(self.render(column)?)),
            };
        }
        let mut expression = builder.finish();
        if let Some(limit) = paginator.limit() {
            expression = expression.merge(Expression::raw(format!("limit {limit}")));
        }
        if let Some(offset) = paginator.offset() {
            expression = expression.merge(Expression::raw(format!("offset {offset}")));
        }
        Ok(expression)
    }
}
