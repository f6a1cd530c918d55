//! Parse errors.

use std::fmt::Display;
use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode, OntologyError, PlanError, ValidationError};

/// Every way an expression can be rejected. There is no partial parse.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("{message} at position {position} in '{input}'")]
    Syntax {
        message: String,
        position: usize,
        input: String,
    },

    #[error("Unknown term '{term}'")]
    UnknownTerm { term: String },

    #[error("'{found}' is not a valid {kind}. Perhaps you mean '{suggestion}'.")]
    Deprecated {
        found: String,
        kind: String,
        suggestion: String,
    },

    #[error("Expected {expected} but got '{found}'")]
    UnexpectedValue { expected: String, found: String },

    #[error("Expected a boolean predicate in yes/no question but '{predicate}' has sort {sort}")]
    NonBooleanYesNoQuestion { predicate: String, sort: String },

    #[error("Unknown parameter '{0}'")]
    UnknownParameter(String),

    #[error("Expression nesting exceeds the maximum depth of {0}")]
    TooDeep(usize),

    #[error(transparent)]
    Ontology(#[from] OntologyError),

    #[error(transparent)]
    Plan(#[from] PlanError),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl ParseError {
    pub fn unknown_term(term: impl Into<String>) -> Self {
        ParseError::UnknownTerm { term: term.into() }
    }

    pub fn unexpected(expected: impl Into<String>, found: impl Display) -> Self {
        ParseError::UnexpectedValue {
            expected: expected.into(),
            found: found.to_string(),
        }
    }
}

impl From<ParseError> for DomainError {
    fn from(err: ParseError) -> Self {
        match err {
            ParseError::Ontology(inner) => inner.into(),
            ParseError::Plan(inner) => inner.into(),
            ParseError::Validation(inner) => inner.into(),
            ParseError::Deprecated { .. } => DomainError::new(ErrorCode::DeprecatedSyntax, err.to_string()),
            other => DomainError::new(ErrorCode::ParseFailed, other.to_string()),
        }
    }
}
