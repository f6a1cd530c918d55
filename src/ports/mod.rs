//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `Ontology` - Read model of a DDD's sorts, predicates, individuals and actions

mod ontology;

pub use ontology::Ontology;
