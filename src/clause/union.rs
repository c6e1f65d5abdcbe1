use crate::Builder;

/// A `union [all] (...)` entry.
#[derive(Debug, Clone)]
pub struct UnionClause {
    query: Builder,
    all: bool,
}

impl UnionClause {
    pub(crate) fn new(query: Builder, all: bool) -> Self {
        Self { query, all }
    }

    pub fn query(&self) -> &Builder {
        &self.query
    }

    pub fn is_all(&self) -> bool {
        self.all
    }
}
