use std::{collections::HashMap, fmt, sync::Arc};

use smol_str::SmolStr;

use crate::{
    Builder,
    compiler::{CompileOptions, Compiler},
    dialect::{Dialect, Grammar},
    error::{Error, Result},
};

pub type GrammarFactory = Arc<dyn Fn() -> Arc<dyn Grammar> + Send + Sync>;

/// Maps a driver tag such as `"mysql"` to the grammar used for it.
///
/// Each registry is an independent value, so tests and applications can
/// override a driver without touching any process wide state.
#[derive(Clone, Default)]
pub struct Registry {
    factories: HashMap<SmolStr, GrammarFactory>,
    options: CompileOptions,
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut drivers: Vec<&str> = self.factories.keys().map(SmolStr::as_str).collect();
        drivers.sort_unstable();
        f.debug_struct("Registry")
            .field("drivers", &drivers)
            .field("options", &self.options)
            .finish()
    }
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry knowing the bundled `mysql`, `pgsql`/`postgres` and `sqlite` drivers.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry
            .register("mysql", || Arc::new(Dialect::MySql))
            .register("pgsql", || Arc::new(Dialect::Postgres))
            .register("postgres", || Arc::new(Dialect::Postgres))
            .register("sqlite", || Arc::new(Dialect::Sqlite));
        registry
    }

    pub fn register<D, F>(&mut self, driver: D, factory: F) -> &mut Self
    where
        D: Into<SmolStr>,
        F: Fn() -> Arc<dyn Grammar> + Send + Sync + 'static,
    {
        let driver = driver.into();
        tracing::debug!(driver = %driver, "registering grammar");
        self.factories.insert(driver, Arc::new(factory));
        self
    }

    /// Options applied to every compiler handed out by this registry.
    pub fn options(&mut self, options: CompileOptions) -> &mut Self {
        self.options = options;
        self
    }

    pub fn contains(&self, driver: &str) -> bool {
        self.factories.contains_key(driver)
    }

    pub fn grammar(&self, driver: &str) -> Result<Arc<dyn Grammar>> {
        let factory = self
            .factories
            .get(driver)
            .ok_or_else(|| Error::UnsupportedDriver(driver.to_owned()))?;
        tracing::debug!(driver, "resolved grammar");
        Ok(factory())
    }

    pub fn compiler(&self, driver: &str) -> Result<Compiler> {
        let grammar = self.grammar(driver)?;
        Ok(Compiler::from_grammar(grammar).with_options(self.options))
    }

    /// A fresh query builder compiling for `driver`.
    pub fn builder(&self, driver: &str) -> Result<Builder> {
        Ok(Builder::with_compiler(self.compiler(driver)?))
    }
}

#[cfg(test)]
mod tests {
    use crate::compiler::EmptyInPolicy;
    use crate::prelude::*;

    use super::*;

    #[derive(Debug)]
    struct Brackets;

    impl Grammar for Brackets {
        fn quote(&self) -> char {
            '['
        }

        fn wrap_identifier(&self, name: &str) -> String {
            format!("[{}]", name.replace(']', "]]"))
        }
    }

    #[test]
    fn test_defaults() {
        let registry = Registry::with_defaults();
        let grammar = registry.grammar("mysql").unwrap();
        assert_eq!("`t`", grammar.wrap_identifier("t"));
        let grammar = registry.grammar("pgsql").unwrap();
        assert_eq!("\"t\"", grammar.wrap_identifier("t"));
        assert!(registry.contains("sqlite"));
    }

    #[test]
    fn test_unsupported_driver() {
        let registry = Registry::with_defaults();
        let err = registry.grammar("oracle").unwrap_err();
        assert!(matches!(err, Error::UnsupportedDriver(ref driver) if driver == "oracle"));
        assert_eq!("Unsupported driver 'oracle'", err.to_string());
    }

    #[test]
    fn test_override_per_instance() {
        let mut registry = Registry::with_defaults();
        registry.register("mysql", || Arc::new(Brackets));
        let mut builder = registry.builder("mysql").unwrap();
        builder.from("users").where_eq("id", 1);
        assert_eq!(
            "select * from [users] where [id] = ?",
            builder.to_sql().unwrap()
        );

        let untouched = Registry::with_defaults();
        let mut builder = untouched.builder("mysql").unwrap();
        builder.from("users");
        assert_eq!("select * from `users`", builder.to_sql().unwrap());
    }

    #[test]
    fn test_options_flow_to_builder() {
        let mut registry = Registry::with_defaults();
        registry.options(CompileOptions {
            empty_in: EmptyInPolicy::Constant,
        });
        let mut builder = registry.builder("sqlite").unwrap();
        builder.from("t").where_in("id", Vec::<i32>::new());
        assert_eq!(
            "select * from \"t\" where 0 = 1",
            builder.to_sql().unwrap()
        );
    }
}
