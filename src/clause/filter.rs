use crate::expr::ConditionGroup;

use super::HasConditions;

#[derive(Debug, Default, Clone, PartialEq)]
pub struct WhereClause {
    conditions: ConditionGroup,
}

impl WhereClause {
    pub fn conditions(&self) -> &ConditionGroup {
        &self.conditions
    }
}

impl HasConditions for WhereClause {
    type Nested = WhereClause;

    fn conditions_mut(&mut self) -> &mut ConditionGroup {
        &mut self.conditions
    }

    fn into_conditions(self) -> ConditionGroup {
        self.conditions
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct HavingClause {
    conditions: ConditionGroup,
}

impl HavingClause {
    pub fn conditions(&self) -> &ConditionGroup {
        &self.conditions
    }
}

impl HasConditions for HavingClause {
    type Nested = HavingClause;

    fn conditions_mut(&mut self) -> &mut ConditionGroup {
        &mut self.conditions
    }

    fn into_conditions(self) -> ConditionGroup {
        self.conditions
    }
}
