//! Predicates.

use std::fmt;

use super::Sort;

/// A named relation over one sort, optionally refining another predicate.
///
/// `feature_of_name` links a feature predicate (e.g. `dest_city_type`) to the
/// predicate it refines (`dest_city`); the domain treats that link as an
/// implicit question dependency.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Predicate {
    ontology_name: String,
    name: String,
    sort: Sort,
    feature_of_name: Option<String>,
    multiple_instances: bool,
}

impl Predicate {
    pub fn new(ontology_name: impl Into<String>, name: impl Into<String>, sort: Sort) -> Self {
        Self {
            ontology_name: ontology_name.into(),
            name: name.into(),
            sort,
            feature_of_name: None,
            multiple_instances: false,
        }
    }

    /// Marks this predicate as a feature of `predicate_name`.
    pub fn with_feature_of(mut self, predicate_name: impl Into<String>) -> Self {
        self.feature_of_name = Some(predicate_name.into());
        self
    }

    /// Allows several individuals to hold at once.
    pub fn with_multiple_instances(mut self) -> Self {
        self.multiple_instances = true;
        self
    }

    pub fn ontology_name(&self) -> &str {
        &self.ontology_name
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sort(&self) -> &Sort {
        &self.sort
    }

    pub fn feature_of_name(&self) -> Option<&str> {
        self.feature_of_name.as_deref()
    }

    pub fn allows_multiple_instances(&self) -> bool {
        self.multiple_instances
    }

    /// True when this predicate refines `other`.
    pub fn is_feature_of(&self, other: &Predicate) -> bool {
        self.feature_of_name.as_deref() == Some(other.name())
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
