use std::fmt;

/// Database specific identifier quoting.
pub trait Grammar: fmt::Debug + Send + Sync {
    /// Character opening and closing a quoted identifier.
    fn quote(&self) -> char;

    /// Quote a single identifier segment, doubling embedded quote characters.
    fn wrap_identifier(&self, name: &str) -> String {
        let quote = self.quote();
        let mut quoted = String::with_capacity(name.len() + 2);
        quoted.push(quote);
        for char in name.chars() {
            if char == quote {
                quoted.push(quote);
            }
            quoted.push(char);
        }
        quoted.push(quote);
        quoted
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dialect {
    Postgres,
    MySql,
    Sqlite,
}

impl Grammar for Dialect {
    fn quote(&self) -> char {
        match self {
            Dialect::Postgres | Dialect::Sqlite => '"',
            Dialect::MySql => '`',
        }
    }
}

pub trait HasDialect {
    const DIALECT: Dialect;
}

pub struct Postgres;

impl HasDialect for Postgres {
    const DIALECT: Dialect = Dialect::Postgres;
}

pub struct MySql;

impl HasDialect for MySql {
    const DIALECT: Dialect = Dialect::MySql;
}

pub struct Sqlite;

impl HasDialect for Sqlite {
    const DIALECT: Dialect = Dialect::Sqlite;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_identifier() {
        assert_eq!("`users`", Dialect::MySql.wrap_identifier("users"));
        assert_eq!("\"users\"", Dialect::Postgres.wrap_identifier("users"));
        assert_eq!("\"users\"", Dialect::Sqlite.wrap_identifier("users"));
    }

    #[test]
    fn test_wrap_identifier_doubles_quote() {
        assert_eq!("`us``ers`", Dialect::MySql.wrap_identifier("us`ers"));
        assert_eq!("\"us\"\"ers\"", Dialect::Postgres.wrap_identifier("us\"ers"));
        assert_eq!("\"us`ers\"", Dialect::Postgres.wrap_identifier("us`ers"));
    }
}
