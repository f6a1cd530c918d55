//! Expression Parser - Text notation to semantic values.
//!
//! Parses the notation used in domain descriptions (`?X.dest_city(X)`,
//! `findout(?X.price(X))`, `icm:und*pos:USR*dest_city(paris)`, ...) against
//! an [`Ontology`](crate::ports::Ontology). Parsing is pure apart from trace
//! logging; the same text always yields equal values.

mod cursor;
mod deprecated;
mod error;
mod expression;
mod parameters;

pub use deprecated::{canonical_functor, DeprecatedForm, Notation, DEPRECATED_FORMS};
pub use error::ParseError;
pub use expression::Parser;

use crate::domain::semantics::SemanticValue;
use crate::ports::Ontology;

/// Parses `text` with default settings.
///
/// # Errors
///
/// See [`Parser::parse`].
pub fn parse(
    ddd_name: &str,
    ontology: &dyn Ontology,
    domain_name: &str,
    text: &str,
) -> Result<SemanticValue, ParseError> {
    Parser::new(ddd_name, ontology, domain_name).parse(text)
}
