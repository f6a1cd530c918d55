//! Ontology vocabulary: sorts, predicates, individuals and actions.

mod action;
mod individual;
mod predicate;
mod sort;

pub use action::{Action, TOP, UP};
pub use individual::{Individual, IndividualValue};
pub use predicate::Predicate;
pub use sort::{BuiltinSort, Sort};
