//! Domain layer: the semantic object model and the plan model built on it.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (polarity, speakers, numbers, errors)
//! - `ontology` - Sorts, predicates, individuals and actions
//! - `semantics` - Propositions, questions, goals, moves and conditions
//! - `plan` - Plan items and plans
//! - `ddd` - The goal → plan table of a dialogue domain

pub mod ddd;
pub mod foundation;
pub mod ontology;
pub mod plan;
pub mod semantics;
