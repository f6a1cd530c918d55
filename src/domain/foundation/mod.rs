//! Foundation module - Shared domain primitives.
//!
//! Contains the small value objects and error types that the ontology,
//! semantic and plan layers are built from.

mod errors;
mod numeric;
mod polarity;
mod speaker;
mod text;
mod unordered;

pub use errors::{DomainError, DomainModelError, ErrorCode, OntologyError, PlanError, ValidationError};
pub use numeric::{Confidence, Real};
pub use polarity::Polarity;
pub use speaker::Speaker;
pub use text::{Quoted, Word};
pub use unordered::{hash_unordered, multiset_eq};
