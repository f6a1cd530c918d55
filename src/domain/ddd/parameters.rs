//! Per-question and per-goal options that shape how a question is raised.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::ontology::{Action, Predicate};
use crate::domain::semantics::{PropositionSet, Question};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GraphicalType {
    Text,
    List,
}

/// Where the answers to a question come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionSource {
    Service,
    Domain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    Alphabetic,
}

/// A feature predicate to ask about alongside a question.
///
/// With `kpq` set, the system first asks whether the user knows the answer.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AskFeature {
    pub predicate_name: String,
    pub kpq: bool,
}

impl AskFeature {
    pub fn new(predicate_name: impl Into<String>) -> Self {
        Self {
            predicate_name: predicate_name.into(),
            kpq: false,
        }
    }

    pub fn with_kpq(predicate_name: impl Into<String>) -> Self {
        Self {
            predicate_name: predicate_name.into(),
            kpq: true,
        }
    }
}

impl fmt::Display for AskFeature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.kpq {
            write!(f, "kpq({})", self.predicate_name)
        } else {
            write!(f, "{}", self.predicate_name)
        }
    }
}

/// Options attached to a question or goal. Unset options fall back to the
/// domain defaults.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Parameters {
    pub graphical_type: Option<GraphicalType>,
    pub source: Option<QuestionSource>,
    pub sort_order: Option<SortOrder>,
    pub background: Vec<Predicate>,
    pub allow_goal_accommodation: Option<bool>,
    pub max_spoken_alts: Option<u32>,
    pub related_information: Vec<Question>,
    pub ask_features: Vec<AskFeature>,
    pub verbalize: Option<bool>,
    pub incremental: Option<bool>,
    pub alts: Option<PropositionSet>,
    pub service_query: Option<Question>,
    pub device: Option<String>,
    pub on_zero_hits_action: Option<Action>,
    pub on_too_many_hits_action: Option<Action>,
    pub label_questions: Vec<Question>,
    pub format: Option<String>,
}

impl Parameters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
