use indexmap::IndexMap;

use crate::{Builder, Ident};

/// Common table expressions, kept in declaration order.
#[derive(Debug, Clone, Default)]
pub struct WithClause {
    queries: IndexMap<Ident, Builder>,
    recursive: bool,
}

impl WithClause {
    /// Declaring an alias again replaces its query in place.
    pub(crate) fn add(&mut self, alias: Ident, query: Builder) {
        self.queries.insert(alias, query);
    }

    pub(crate) fn set_recursive(&mut self) {
        self.recursive = true;
    }

    pub fn is_recursive(&self) -> bool {
        self.recursive
    }

    pub fn is_empty(&self) -> bool {
        self.queries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Ident, &Builder)> {
        self.queries.iter()
    }
}
