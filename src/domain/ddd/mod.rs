//! Domain model: the goal → plan table of one DDD and its parameters.

#[allow(clippy::module_inception)]
mod domain;
mod parameters;

pub use domain::{Domain, DomainBuilder, PlanEntry, Preferred, QuestionsInPlan};
pub use parameters::{AskFeature, GraphicalType, Parameters, QuestionSource, SortOrder};
