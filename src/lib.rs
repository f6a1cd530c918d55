//! DDD Semantics - Knowledge layer of a dialogue manager
//!
//! This crate holds the semantic object model a dialogue domain description
//! (DDD) is written in, a parser for its expression notation, and the domain
//! model that maps goals to plans and answers questions about them.
//!
//! - [`domain`] - value types (ontology, semantics, plans) and the [`Domain`](domain::ddd::Domain)
//! - [`ports`] - the [`Ontology`](ports::Ontology) read model
//! - [`adapters`] - in-memory ontology, expression parser, description loader
//! - [`config`] - configuration and tracing setup

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
