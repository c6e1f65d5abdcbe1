mod conditions;
mod mutation;
mod select;

use std::sync::Arc;

use crate::{
    Builder,
    builder::QueryKind,
    dialect::{Grammar, HasDialect},
    error::Result,
    expression::Expression,
    writer::{FormatContext, FormatWriter},
};

/// What an `in`/`not in` condition with an empty list compiles to.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum EmptyInPolicy {
    /// The condition is left out of the statement entirely.
    #[default]
    Drop,
    /// `in` becomes `0 = 1` and `not in` becomes `1 = 1`.
    Constant,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CompileOptions {
    pub empty_in: EmptyInPolicy,
}

/// Turns a [`Builder`] into sql plus bindings for one grammar.
///
/// Compiling never mutates the builder and always yields the same output for
/// the same input.
#[derive(Debug, Clone)]
pub struct Compiler {
    grammar: Arc<dyn Grammar>,
    options: CompileOptions,
}

impl Compiler {
    pub fn new<G: Grammar + 'static>(grammar: G) -> Self {
        Self::from_grammar(Arc::new(grammar))
    }

    pub fn from_grammar(grammar: Arc<dyn Grammar>) -> Self {
        Self {
            grammar,
            options: CompileOptions::default(),
        }
    }

    pub fn for_dialect<D: HasDialect>() -> Self {
        Self::new(D::DIALECT)
    }

    pub fn with_options(mut self, options: CompileOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> CompileOptions {
        self.options
    }

    pub fn grammar(&self) -> &dyn Grammar {
        self.grammar.as_ref()
    }

    /// Quotes a column expression such as `t.name as n`.
    pub fn wrap(&self, value: &str) -> Result<String> {
        let mut sql = String::with_capacity(value.len() + 4);
        FormatContext::new(&mut sql, self.grammar()).write_column(value)?;
        Ok(sql)
    }

    pub fn compile(&self, query: &Builder) -> Result<Expression> {
        tracing::trace!(kind = ?query.kind(), "compiling query");
        let statement = match query.kind() {
            QueryKind::Select => self.compile_select(query)?,
            QueryKind::Update => self.compile_update(query)?,
            QueryKind::Delete => self.compile_delete(query)?,
            QueryKind::Insert => self.compile_insert(query)?,
        };
        let statement = self.compile_ctes(query)?.merge(statement);
        tracing::debug!(
            sql = statement.sql(),
            bindings = statement.bindings().len(),
            "compiled query"
        );
        Ok(statement)
    }

    pub(crate) fn render<T: FormatWriter + ?Sized>(&self, value: &T) -> Result<String> {
        let mut sql = String::with_capacity(32);
        let mut context = FormatContext::new(&mut sql, self.grammar());
        value.format_writer(&mut context)?;
        Ok(sql)
    }
}
