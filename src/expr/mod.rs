mod cond;
mod group;
mod order;

pub use cond::{Condition, IntoOperand, Operand};
pub use group::{ConditionGroup, Conjunction, Predicate};
pub use order::{Order, OrderExpr, Ordering};
