use crate::bind::{Bind, Binds, IntoBinds};

/// A fragment of SQL together with the values bound to its placeholders.
///
/// The sql is trimmed on construction. A fragment whose sql ends up empty
/// carries no bindings, so every `?` in `sql` lines up with `bindings`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Expression {
    sql: String,
    binds: Binds,
}

impl Expression {
    pub fn new<S, B>(sql: S, binds: B) -> Self
    where
        S: Into<String>,
        B: IntoBinds,
    {
        let mut sql = sql.into();
        let trimmed = sql.trim();
        if trimmed.len() != sql.len() {
            sql = trimmed.to_owned();
        }
        if sql.is_empty() {
            return Self::default();
        }
        Self {
            sql,
            binds: binds.into_binds(),
        }
    }

    pub fn raw<S: Into<String>>(sql: S) -> Self {
        Self::new(sql, ())
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn bindings(&self) -> &[Bind] {
        self.binds.as_slice()
    }

    pub fn is_empty(&self) -> bool {
        self.sql.is_empty()
    }

    pub fn into_parts(self) -> (String, Vec<Bind>) {
        (self.sql, self.binds.into_vec())
    }

    /// Appends `other` separated by a single space.
    pub fn merge(mut self, other: Expression) -> Self {
        if other.is_empty() {
            return self;
        }
        if self.is_empty() {
            return other;
        }
        self.sql.push(' ');
        self.sql.push_str(&other.sql);
        self.binds.append(other.binds);
        self
    }

    /// Space separated concatenation of every non empty part.
    pub fn concat<I>(parts: I) -> Self
    where
        I: IntoIterator<Item = Expression>,
    {
        parts.into_iter().fold(Self::default(), Self::merge)
    }

    pub fn wrap(self) -> Self {
        self.surround("(", ")")
    }

    pub fn surround(mut self, before: &str, after: &str) -> Self {
        if self.is_empty() {
            return self;
        }
        self.sql.insert_str(0, before);
        self.sql.push_str(after);
        self
    }

    pub fn prefix(self, prefix: &str) -> Self {
        self.surround(prefix, "")
    }
}

/// Collects fragments with a separator, skipping the empty ones.
/// The prefix is only written when at least one fragment made it in.
#[derive(Debug, Default)]
pub(crate) struct ExpressionBuilder<'a> {
    prefix: &'a str,
    separator: &'a str,
    sql: String,
    binds: Binds,
}

impl<'a> ExpressionBuilder<'a> {
    pub(crate) fn new(separator: &'a str) -> Self {
        Self {
            separator,
            ..Default::default()
        }
    }

    pub(crate) fn prefix(mut self, prefix: &'a str) -> Self {
        self.prefix = prefix;
        self
    }

    pub(crate) fn push(&mut self, expression: Expression) -> &mut Self {
        if expression.is_empty() {
            return self;
        }
        if !self.sql.is_empty() {
            self.sql.push_str(self.separator);
        }
        self.sql.push_str(&expression.sql);
        self.binds.append(expression.binds);
        self
    }

    pub(crate) fn push_sql<S: Into<String>>(&mut self, sql: S) -> &mut Self {
        self.push(Expression::raw(sql))
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.sql.is_empty()
    }

    pub(crate) fn finish(self) -> Expression {
        if self.sql.is_empty() {
            return Expression::default();
        }
        let mut sql = String::with_capacity(self.prefix.len() + self.sql.len());
        sql.push_str(self.prefix);
        sql.push_str(&self.sql);
        Expression::new(sql, self.binds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_trims() {
        let expression = Expression::new("  a = ?  ", 1);
        assert_eq!("a = ?", expression.sql());
        assert_eq!(&[Bind::I32(1)], expression.bindings());
    }

    #[test]
    fn test_blank_drops_bindings() {
        let expression = Expression::new("   ", [1, 2, 3]);
        assert!(expression.is_empty());
        assert!(expression.bindings().is_empty());
    }

    #[test]
    fn test_merge_skips_empty() {
        let merged = Expression::new("a = ?", 1)
            .merge(Expression::default())
            .merge(Expression::new("b = ?", 2));
        assert_eq!("a = ? b = ?", merged.sql());
        assert_eq!(&[Bind::I32(1), Bind::I32(2)], merged.bindings());
        let merged = Expression::default().merge(Expression::raw("x"));
        assert_eq!("x", merged.sql());
    }

    #[test]
    fn test_wrap_and_prefix() {
        assert_eq!("(a)", Expression::raw("a").wrap().sql());
        assert_eq!("where a", Expression::raw("a").prefix("where ").sql());
        assert!(Expression::default().wrap().is_empty());
        assert!(Expression::default().prefix("where ").is_empty());
    }

    #[test]
    fn test_builder() {
        let mut builder = ExpressionBuilder::new(", ").prefix("group by ");
        builder
            .push_sql("`a`")
            .push(Expression::default())
            .push(Expression::new("b + ?", 1));
        let expression = builder.finish();
        assert_eq!("group by `a`, b + ?", expression.sql());
        assert_eq!(1, expression.bindings().len());

        let empty = ExpressionBuilder::new(", ").prefix("group by ").finish();
        assert!(empty.is_empty());
    }
}
