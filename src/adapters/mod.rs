//! Adapters - Implementations of port interfaces and the text front ends.
//!
//! - `ontology` - In-memory [`Ontology`](crate::ports::Ontology) built from declarations
//! - `parser` - Expression notation to semantic values
//! - `loader` - Declarative DDD descriptions (JSON/YAML) to a domain

pub mod loader;
pub mod ontology;
pub mod parser;

pub use loader::{DddDescription, LoadedDdd};
pub use ontology::InMemoryOntology;
pub use parser::{ParseError, Parser};
