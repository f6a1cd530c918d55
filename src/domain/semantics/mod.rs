//! Semantic object model: propositions, questions, goals, moves and
//! conditions, each with structural equality and a canonical rendering in
//! the expression notation.

mod condition;
mod goal;
mod icm;
mod moves;
mod proposition;
mod question;
mod service;
mod value;

pub use condition::{Condition, FactScope};
pub use goal::Goal;
pub use icm::{IcmContent, IcmMove, IcmPolarity, IcmType};
pub use moves::{Answer, CoreMove, Move, Realization};
pub use proposition::{
    KnowledgePreconditionProposition, PreconfirmationProposition, PredicateProposition,
    PrereportProposition, Proposition, PropositionSet, RejectedPropositions,
    ServiceActionProposition, ServiceResultProposition, UnderstandingProposition,
};
pub use question::{LambdaAbstraction, Question};
pub use service::ServiceActionOutcome;
pub use value::{SemanticSet, SemanticValue};

use std::fmt::Display;

/// Comma-separated rendering used inside `[...]` and `{...}`.
pub(crate) fn join<T: Display>(items: &[T]) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
