use indexmap::IndexMap;

use crate::{
    Ident,
    bind::{Bind, IntoBind},
    ident::IntoIdent,
};

/// One row of an insert statement, columns kept in insertion order.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Row {
    values: IndexMap<Ident, Bind>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field<K, V>(&mut self, column: K, value: V) -> &mut Self
    where
        K: IntoIdent,
        V: IntoBind,
    {
        self.values.insert(column.into_ident(), value.into_bind());
        self
    }

    pub fn get(&self, column: &Ident) -> Option<&Bind> {
        self.values.get(column)
    }

    pub fn columns(&self) -> impl Iterator<Item = &Ident> {
        self.values.keys()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: IntoIdent, V: IntoBind> FromIterator<(K, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut row = Row::new();
        for (column, value) in iter {
            row.field(column, value);
        }
        row
    }
}
