//! Serde shapes of a declarative DDD description.
//!
//! Names refer to ontology declarations; everything semantic (goals, plan
//! items, conditions, questions, parameters) is written in the expression
//! notation and parsed once the ontology exists.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::domain::foundation::{DomainError, ErrorCode};

/// A complete DDD: one ontology and one domain over it.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct DddDescription {
    pub ontology: OntologyDescription,
    pub domain: DomainDescription,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct OntologyDescription {
    pub name: String,
    #[serde(default)]
    pub sorts: Vec<SortDescription>,
    #[serde(default)]
    pub predicates: Vec<PredicateDescription>,
    #[serde(default)]
    pub individuals: Vec<IndividualDescription>,
    #[serde(default)]
    pub actions: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct SortDescription {
    pub name: String,
    /// Accepts individuals that are not declared up front.
    #[serde(default)]
    pub dynamic: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct PredicateDescription {
    pub name: String,
    pub sort: String,
    #[serde(default)]
    pub feature_of: Option<String>,
    #[serde(default)]
    pub multiple_instances: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct IndividualDescription {
    pub name: String,
    pub sort: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct DomainDescription {
    pub name: String,
    #[serde(default)]
    pub plans: Vec<PlanDescription>,
    #[serde(default)]
    pub default_questions: Vec<String>,
    #[serde(default)]
    pub dependencies: Vec<DependencyDescription>,
    #[serde(default)]
    pub parameters: Vec<ParametersDescription>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct PlanDescription {
    pub goal: String,
    /// Plan items, first one on top.
    #[serde(default)]
    pub plan: Vec<String>,
    #[serde(default)]
    pub preferred: Option<PreferenceDescription>,
    #[serde(default)]
    pub postconds: Vec<String>,
    #[serde(default)]
    pub postplan: Vec<String>,
    /// Action names.
    #[serde(default)]
    pub superactions: Vec<String>,
    #[serde(default)]
    pub unrestricted_accommodation: bool,
}

/// `true`/`false`, or a condition under which the goal is preferred.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(untagged)]
pub enum PreferenceDescription {
    Flag(bool),
    When(String),
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct DependencyDescription {
    pub question: String,
    pub depends_on: Vec<String>,
}

/// Parameters attached to either a question or a goal.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum ParametersDescription {
    Question { question: String, parameters: String },
    Goal { goal: String, parameters: String },
}

impl DddDescription {
    pub fn from_json(text: &str) -> Result<Self, DomainError> {
        serde_json::from_str(text).map_err(|e| unreadable("json", e))
    }

    pub fn from_yaml(text: &str) -> Result<Self, DomainError> {
        serde_yaml::from_str(text).map_err(|e| unreadable("yaml", e))
    }

    /// Reads a description file; `.json` is read as JSON, anything else as YAML.
    pub fn load_from_path(path: &Path) -> Result<Self, DomainError> {
        tracing::info!(path = %path.display(), "Reading DDD description");
        let text = std::fs::read_to_string(path).map_err(|e| {
            DomainError::new(ErrorCode::DescriptionUnreadable, e.to_string())
                .with_detail("path", path.display().to_string())
        })?;
        let is_json = path
            .extension()
            .and_then(|extension| extension.to_str())
            .is_some_and(|extension| extension.eq_ignore_ascii_case("json"));
        let description = if is_json {
            Self::from_json(&text)
        } else {
            Self::from_yaml(&text)
        };
        description.map_err(|e| e.with_detail("path", path.display().to_string()))
    }
}

fn unreadable(format: &str, err: impl std::fmt::Display) -> DomainError {
    DomainError::new(ErrorCode::DescriptionUnreadable, format!("Invalid {} description: {}", format, err))
        .with_detail("format", format)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yaml_description_uses_defaults() {
        let description = DddDescription::from_yaml(
            "ontology:\n  name: o\ndomain:\n  name: d\n  plans:\n    - goal: perform(top)\n",
        )
        .unwrap();
        assert!(description.ontology.sorts.is_empty());
        let plan = &description.domain.plans[0];
        assert_eq!(plan.goal, "perform(top)");
        assert!(plan.plan.is_empty());
        assert_eq!(plan.preferred, None);
        assert!(!plan.unrestricted_accommodation);
    }

    #[test]
    fn preference_is_flag_or_condition() {
        let flag: PreferenceDescription = serde_json::from_str("true").unwrap();
        assert_eq!(flag, PreferenceDescription::Flag(true));
        let condition: PreferenceDescription = serde_json::from_str("\"has_value(dest_city)\"").unwrap();
        assert_eq!(condition, PreferenceDescription::When("has_value(dest_city)".to_string()));
    }

    #[test]
    fn parameters_are_tagged_by_target() {
        let parameters: ParametersDescription =
            serde_json::from_str(r#"{"question": {"question": "?X.dest_city(X)", "parameters": "{verbalize=False}"}}"#)
                .unwrap();
        assert!(matches!(parameters, ParametersDescription::Question { .. }));
    }

    #[test]
    fn malformed_json_is_unreadable() {
        let err = DddDescription::from_json("{").unwrap_err();
        assert_eq!(err.code, ErrorCode::DescriptionUnreadable);
        assert_eq!(err.details.get("format"), Some(&"json".to_string()));
    }

    #[test]
    fn missing_file_is_unreadable() {
        let err = DddDescription::load_from_path(Path::new("/nonexistent/ddd.yaml")).unwrap_err();
        assert_eq!(err.code, ErrorCode::DescriptionUnreadable);
        assert!(err.details.contains_key("path"));
    }
}
