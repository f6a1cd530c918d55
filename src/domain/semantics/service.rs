//! Service action outcomes.

use std::fmt;

use crate::domain::foundation::Word;

/// Result reported back after a service action was invoked.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ServiceActionOutcome {
    Successful,
    Failed { reason: String },
}

impl ServiceActionOutcome {
    pub fn failed(reason: impl Into<String>) -> Self {
        ServiceActionOutcome::Failed {
            reason: reason.into(),
        }
    }

    pub fn is_successful(&self) -> bool {
        matches!(self, ServiceActionOutcome::Successful)
    }
}

impl fmt::Display for ServiceActionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceActionOutcome::Successful => write!(f, "SuccessfulServiceAction()"),
            ServiceActionOutcome::Failed { reason } => write!(f, "FailedServiceAction({})", Word(reason)),
        }
    }
}
