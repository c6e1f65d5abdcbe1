use crate::expression::Expression;

use super::cond::Condition;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Conjunction {
    #[default]
    And,
    Or,
}

impl Conjunction {
    pub fn separator(&self) -> &'static str {
        match self {
            Conjunction::And => " and ",
            Conjunction::Or => " or ",
        }
    }
}

/// One item of a predicate tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    Condition(Condition),
    Group(ConditionGroup),
    Raw(Expression),
}

impl Predicate {
    /// A group holding a single item is replaced by that item.
    pub fn squash(self) -> Self {
        match self {
            Predicate::Group(mut group) if group.items.len() == 1 => {
                group.items.remove(0).squash()
            }
            other => other,
        }
    }
}

impl From<Condition> for Predicate {
    fn from(value: Condition) -> Self {
        Predicate::Condition(value)
    }
}

impl From<ConditionGroup> for Predicate {
    fn from(value: ConditionGroup) -> Self {
        Predicate::Group(value)
    }
}

impl From<Expression> for Predicate {
    fn from(value: Expression) -> Self {
        Predicate::Raw(value)
    }
}

/// Ordered predicates combined with a single conjunction. Nested groups are
/// the parenthesized sub expressions.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ConditionGroup {
    items: Vec<Predicate>,
    conjunction: Conjunction,
}

impl ConditionGroup {
    pub fn new(conjunction: Conjunction) -> Self {
        Self {
            items: Vec::new(),
            conjunction,
        }
    }

    pub fn or() -> Self {
        Self::new(Conjunction::Or)
    }

    pub fn add<P: Into<Predicate>>(&mut self, predicate: P) -> &mut Self {
        self.items.push(predicate.into());
        self
    }

    pub fn pop(&mut self) -> Option<Predicate> {
        self.items.pop()
    }

    pub fn last(&self) -> Option<&Predicate> {
        self.items.last()
    }

    pub fn last_mut(&mut self) -> Option<&mut Predicate> {
        self.items.last_mut()
    }

    pub fn items(&self) -> &[Predicate] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn conjunction(&self) -> Conjunction {
        self.conjunction
    }

    pub fn is_or(&self) -> bool {
        self.conjunction == Conjunction::Or
    }

    /// Adds a predicate the way a fluent `where`/`or_where` call does.
    ///
    /// `And` appends. `Or` extends a trailing or-group when there is one,
    /// otherwise the last item and the new predicate become a new or-group.
    pub fn push(&mut self, conjunction: Conjunction, predicate: Predicate) -> &mut Self {
        let predicate = predicate.squash();
        match conjunction {
            Conjunction::And => {
                self.items.push(predicate);
            }
            Conjunction::Or => match self.items.last_mut() {
                Some(Predicate::Group(last)) if last.is_or() => {
                    last.items.push(predicate);
                }
                _ => {
                    let mut group = Self::or();
                    if let Some(last) = self.items.pop() {
                        group.items.push(last);
                    }
                    group.items.push(predicate);
                    self.items.push(Predicate::Group(group).squash());
                }
            },
        }
        self
    }
}
