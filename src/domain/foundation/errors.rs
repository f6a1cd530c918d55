//! Error types for the semantic model.

use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use thiserror::Error;

/// Errors that occur during value object construction.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Creates an empty field validation error.
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField { field: field.into() }
    }

    /// Creates an invalid format validation error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Errors raised when semantic values disagree with the ontology.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OntologyError {
    #[error("Sortal mismatch between predicate {predicate} (sort {predicate_sort}) and individual {individual} (sort {individual_sort})")]
    SortMismatch {
        predicate: String,
        predicate_sort: String,
        individual: String,
        individual_sort: String,
    },

    #[error("Unknown sort '{0}'")]
    UnknownSort(String),

    #[error("Unknown predicate '{0}'")]
    UnknownPredicate(String),

    #[error("Unknown individual '{0}'")]
    UnknownIndividual(String),

    #[error("Unknown action '{0}'")]
    UnknownAction(String),

    #[error("'{value}' is not a valid value of sort {sort}: {reason}")]
    InvalidValue {
        sort: String,
        value: String,
        reason: String,
    },
}

impl OntologyError {
    /// Creates a sort mismatch error from display names.
    pub fn sort_mismatch(
        predicate: impl Into<String>,
        predicate_sort: impl Into<String>,
        individual: impl Into<String>,
        individual_sort: impl Into<String>,
    ) -> Self {
        OntologyError::SortMismatch {
            predicate: predicate.into(),
            predicate_sort: predicate_sort.into(),
            individual: individual.into(),
            individual_sort: individual_sort.into(),
        }
    }

    /// Creates an invalid value error.
    pub fn invalid_value(
        sort: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        OntologyError::InvalidValue {
            sort: sort.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }
}

/// Errors raised while assembling plans and plan items.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlanError {
    #[error("{0}")]
    UnableToDetermineOntology(String),

    #[error("Expected all items of both branches in ontology {expected} but found {found}")]
    MixedOntologies { expected: String, found: String },

    #[error("Expected 'min_results' to be 0 or above but got {0}.")]
    MinResultsNotSupported(i64),

    #[error("Expected 'max_results' to be None or above 0 but got {0}.")]
    MaxResultsNotSupported(i64),
}

impl PlanError {
    /// A plan with no ontology-specific content.
    pub fn no_semantic_content() -> Self {
        PlanError::UnableToDetermineOntology("Expected semantic content but found none".to_string())
    }

    /// A plan whose items come from several ontologies.
    pub fn several_ontologies(names: &[String]) -> Self {
        PlanError::UnableToDetermineOntology(format!(
            "Expected all plan items in one ontology but they're from [{}]",
            names.join(", ")
        ))
    }
}

/// Errors raised while constructing a [`Domain`](crate::domain::ddd::Domain).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainModelError {
    #[error("Expected a single plan for goal {goal} but found more than one")]
    InvalidPlans { goal: String },

    #[error(transparent)]
    Plan(#[from] PlanError),
}

/// Error codes organized by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Validation errors
    ValidationFailed,
    EmptyField,
    InvalidFormat,

    // Expression errors
    ParseFailed,
    DeprecatedSyntax,

    // Ontology errors
    SortMismatch,
    UnknownName,
    InvalidValue,

    // Plan errors
    InvalidPlans,
    UnableToDetermineOntology,
    MinResultsNotSupported,
    MaxResultsNotSupported,

    // Infrastructure errors
    DescriptionUnreadable,
    InternalError,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::ValidationFailed => "VALIDATION_FAILED",
            ErrorCode::EmptyField => "EMPTY_FIELD",
            ErrorCode::InvalidFormat => "INVALID_FORMAT",
            ErrorCode::ParseFailed => "PARSE_FAILED",
            ErrorCode::DeprecatedSyntax => "DEPRECATED_SYNTAX",
            ErrorCode::SortMismatch => "SORT_MISMATCH",
            ErrorCode::UnknownName => "UNKNOWN_NAME",
            ErrorCode::InvalidValue => "INVALID_VALUE",
            ErrorCode::InvalidPlans => "INVALID_PLANS",
            ErrorCode::UnableToDetermineOntology => "UNABLE_TO_DETERMINE_ONTOLOGY",
            ErrorCode::MinResultsNotSupported => "MIN_RESULTS_NOT_SUPPORTED",
            ErrorCode::MaxResultsNotSupported => "MAX_RESULTS_NOT_SUPPORTED",
            ErrorCode::DescriptionUnreadable => "DESCRIPTION_UNREADABLE",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        };
        write!(f, "{}", s)
    }
}

/// Standard domain error with code, message, and optional details.
#[derive(Debug, Clone)]
pub struct DomainError {
    pub code: ErrorCode,
    pub message: String,
    pub details: HashMap<String, String>,
}

impl DomainError {
    /// Creates a new domain error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: HashMap::new(),
        }
    }

    /// Adds a detail to the error.
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl Error for DomainError {}

impl From<ValidationError> for DomainError {
    fn from(err: ValidationError) -> Self {
        let code = match err {
            ValidationError::EmptyField { .. } => ErrorCode::EmptyField,
            ValidationError::InvalidFormat { .. } => ErrorCode::InvalidFormat,
        };
        DomainError::new(code, err.to_string())
    }
}

impl From<OntologyError> for DomainError {
    fn from(err: OntologyError) -> Self {
        let code = match err {
            OntologyError::SortMismatch { .. } => ErrorCode::SortMismatch,
            OntologyError::InvalidValue { .. } => ErrorCode::InvalidValue,
            OntologyError::UnknownSort(_)
            | OntologyError::UnknownPredicate(_)
            | OntologyError::UnknownIndividual(_)
            | OntologyError::UnknownAction(_) => ErrorCode::UnknownName,
        };
        DomainError::new(code, err.to_string())
    }
}

impl From<PlanError> for DomainError {
    fn from(err: PlanError) -> Self {
        let code = match err {
            PlanError::UnableToDetermineOntology(_) | PlanError::MixedOntologies { .. } => {
                ErrorCode::UnableToDetermineOntology
            }
            PlanError::MinResultsNotSupported(_) => ErrorCode::MinResultsNotSupported,
            PlanError::MaxResultsNotSupported(_) => ErrorCode::MaxResultsNotSupported,
        };
        DomainError::new(code, err.to_string())
    }
}

impl From<DomainModelError> for DomainError {
    fn from(err: DomainModelError) -> Self {
        match err {
            DomainModelError::InvalidPlans { goal } => {
                DomainError::new(ErrorCode::InvalidPlans, format!("Duplicate plans for goal {}", goal))
                    .with_detail("goal", goal)
            }
            DomainModelError::Plan(plan_err) => plan_err.into(),
        }
    }
}
