use crate::{
    Ident,
    bind::{Bind, IntoBind},
    expression::Expression,
};

/// One `set` entry of an update.
#[derive(Debug, Clone, PartialEq)]
pub enum Assignment {
    Value(Ident, Bind),
    Raw(Expression),
}

/// Update assignments in declaration order; assigning a column twice keeps
/// its first position with the latest value.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Assignments {
    entries: Vec<Assignment>,
}

impl Assignments {
    pub(crate) fn value<V: IntoBind>(&mut self, column: Ident, value: V) {
        let value = value.into_bind();
        let existing = self.entries.iter_mut().find_map(|entry| match entry {
            Assignment::Value(ident, current) if *ident == column => Some(current),
            _ => None,
        });
        match existing {
            Some(current) => *current = value,
            None => self.entries.push(Assignment::Value(column, value)),
        }
    }

    pub(crate) fn raw(&mut self, raw: Expression) {
        if !raw.is_empty() {
            self.entries.push(Assignment::Raw(raw));
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Assignment> {
        self.entries.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
