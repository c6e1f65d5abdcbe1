use crate::{
    Builder, Ident,
    bind::Binds,
    error::{Error, Result},
    expression::{Expression, ExpressionBuilder},
    set::Assignment,
};

use super::Compiler;

impl Compiler {
    pub(crate) fn compile_update(&self, query: &Builder) -> Result<Expression> {
        let table = query.table().ok_or(Error::MissingFrom)?;
        if query.assignments().is_empty() {
            return Err(Error::EmptyUpdate);
        }
        let mut sets = ExpressionBuilder::new(", ").prefix("set ");
        for assignment in query.assignments().iter() {
            match assignment {
                Assignment::Value(column, value) => {
                    let column = self.render(column)?;
                    sets.push(Expression::new(format!("{column} = ?"), value.clone()))
                }
                Assignment::Raw(raw) => sets.push(raw.clone()),
            };
        }
        Ok(Expression::concat([
            Expression::raw(format!("update {}", self.render(table)?)),
            sets.finish(),
            self.compile_filter(query.where_conditions(), "where ")?,
        ]))
    }

    pub(crate) fn compile_delete(&self, query: &Builder) -> Result<Expression> {
        let table = query.table().ok_or(Error::MissingFrom)?;
        let statement = Expression::raw(format!("delete from {}", self.render(table)?));
        Ok(statement.merge(self.compile_filter(query.where_conditions(), "where ")?))
    }

    /// Every row is laid out along the columns of the first one.
    pub(crate) fn compile_insert(&self, query: &Builder) -> Result<Expression> {
        let table = query.table().ok_or(Error::MissingFrom)?;
        let rows = query.rows();
        let Some(first) = rows.first() else {
            return Err(Error::EmptyInsert);
        };
        let columns: Vec<&Ident> = first.columns().collect();
        let names = columns
            .iter()
            .map(|column| self.render(*column))
            .collect::<Result<Vec<_>>>()?;
        let placeholders = format!("({})", vec!["?"; columns.len()].join(", "));

        let mut values = ExpressionBuilder::new(", ").prefix("values ");
        for (index, row) in rows.iter().enumerate() {
            let mut binds = Binds::None;
            for column in &columns {
                let value = row.get(column).ok_or_else(|| Error::MissingInsertValue {
                    row: index,
                    column: column.as_str().to_owned(),
                })?;
                binds.push(value.clone());
            }
            values.push(Expression::new(placeholders.as_str(), binds));
        }

        let head = format!("insert into {} ({})", self.render(table)?, names.join(", "));
        Ok(Expression::raw(head).merge(values.finish()))
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        bind::Bind,
        clause::HasConditions,
        dialect::{MySql, Sqlite},
    };

    use super::*;

    #[test]
    fn test_update() {
        let mut builder = Builder::new::<MySql>();
        builder
            .from("users")
            .set("name", "bob")
            .set_raw("visits = visits + ?", 1)
            .set("name", "alice")
            .where_eq("id", 7);
        assert_eq!(
            "update `users` set `name` = ?, visits = visits + ? where `id` = ?",
            builder.to_sql().unwrap()
        );
        assert_eq!(
            &[Bind::String("alice".into()), Bind::I32(1), Bind::I32(7)],
            builder.bindings().unwrap()
        );
    }

    #[test]
    fn test_update_without_values() {
        let mut builder = Builder::new::<MySql>();
        builder.from("users").set_raw("  ", ());
        let err = builder.to_sql().unwrap_err();
        assert_eq!("Empty update values", err.to_string());
    }

    #[test]
    fn test_delete() {
        let mut builder = Builder::new::<Sqlite>();
        builder.from("users").delete().where_in("id", [1, 2]);
        assert_eq!(
            "delete from \"users\" where \"id\" in (?, ?)",
            builder.to_sql().unwrap()
        );
        let mut builder = Builder::new::<Sqlite>();
        builder.from("users").delete();
        assert_eq!("delete from \"users\"", builder.to_sql().unwrap());
    }

    #[test]
    fn test_insert_rows() {
        let mut builder = Builder::new::<MySql>();
        builder
            .from("users")
            .insert(|row| {
                row.field("name", "bob").field("age", 30);
            })
            .values([("age", 41), ("name", 7)]);
        assert_eq!(
            "insert into `users` (`name`, `age`) values (?, ?), (?, ?)",
            builder.to_sql().unwrap()
        );
        assert_eq!(
            &[
                Bind::String("bob".into()),
                Bind::I32(30),
                Bind::I32(7),
                Bind::I32(41)
            ],
            builder.bindings().unwrap()
        );
    }

    #[test]
    fn test_insert_errors() {
        let mut builder = Builder::new::<MySql>();
        builder.from("users").insert(|_| {});
        assert!(matches!(builder.to_sql().unwrap_err(), Error::EmptyInsert));

        let mut builder = Builder::new::<MySql>();
        builder
            .from("users")
            .values([("a", 1), ("b", 2)])
            .values([("a", 3)]);
        let err = builder.to_sql().unwrap_err();
        assert!(matches!(err, Error::MissingInsertValue { row: 1, ref column } if column == "b"));
    }

    #[test]
    fn test_update_with_cte() {
        let mut builder = Builder::new::<MySql>();
        builder
            .with("stale", |q| {
                q.select("id").from("sessions").where_clause("age", ">", 30);
            })
            .from("users")
            .set("active", false)
            .where_raw("id in (select id from stale)", ());
        assert_eq!(
            "with `stale` as (select `id` from `sessions` where `age` > ?) update `users` set `active` = ? where id in (select id from stale)",
            builder.to_sql().unwrap()
        );
        assert_eq!(&[Bind::I32(30), Bind::Bool(false)], builder.bindings().unwrap());
    }
}
