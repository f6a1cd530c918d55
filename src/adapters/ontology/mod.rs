//! Ontology adapters.

mod in_memory;

pub use in_memory::{InMemoryOntology, OntologyBuilder};
