//! Plans and plan items.

#[allow(clippy::module_inception)]
mod plan;
mod plan_item;

pub use plan::{FlattenedItems, Plan};
pub use plan_item::{
    Forgettable, IfThenElse, PlanItem, Preconfirm, QueryInvocation, RaisedQuestion,
    ServiceActionInvocation,
};
