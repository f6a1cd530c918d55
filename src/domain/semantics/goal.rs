//! Dialogue goals: the keys of a domain's plan table.

use std::fmt;

use crate::domain::foundation::Speaker;
use crate::domain::ontology::Action;

use super::Question;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Goal {
    /// Perform an action.
    Perform(Action),
    /// Resolve an issue. `Speaker::Sys` goals are the system's, `Speaker::Usr` the user's.
    Resolve { question: Question, speaker: Speaker },
    /// React to an event reported by a service.
    Handle {
        ontology_name: String,
        service_action: String,
    },
}

impl Goal {
    pub fn perform(action: Action) -> Self {
        Goal::Perform(action)
    }

    pub fn resolve(question: Question) -> Self {
        Goal::Resolve {
            question,
            speaker: Speaker::Sys,
        }
    }

    pub fn resolve_user(question: Question) -> Self {
        Goal::Resolve {
            question,
            speaker: Speaker::Usr,
        }
    }

    pub fn handle(ontology_name: impl Into<String>, service_action: impl Into<String>) -> Self {
        Goal::Handle {
            ontology_name: ontology_name.into(),
            service_action: service_action.into(),
        }
    }

    pub fn action(&self) -> Option<&Action> {
        match self {
            Goal::Perform(action) => Some(action),
            _ => None,
        }
    }

    /// The issue of a resolve goal.
    pub fn issue(&self) -> Option<&Question> {
        match self {
            Goal::Resolve { question, .. } => Some(question),
            _ => None,
        }
    }

    pub fn is_top_goal(&self) -> bool {
        self.action().is_some_and(Action::is_top)
    }

    pub fn is_up_goal(&self) -> bool {
        self.action().is_some_and(Action::is_up)
    }

    pub fn ontology_name(&self) -> Option<&str> {
        match self {
            Goal::Perform(action) => Some(action.ontology_name()),
            Goal::Resolve { question, .. } => question.ontology_name(),
            Goal::Handle { ontology_name, .. } => Some(ontology_name),
        }
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Goal::Perform(action) => write!(f, "perform({})", action),
            Goal::Resolve {
                question,
                speaker: Speaker::Usr,
            } => write!(f, "resolve_user({})", question),
            Goal::Resolve { question, .. } => write!(f, "resolve({})", question),
            Goal::Handle { service_action, .. } => write!(f, "handle({})", service_action),
        }
    }
}
