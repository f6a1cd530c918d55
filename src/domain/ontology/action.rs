//! Actions the system can perform.

use std::fmt;

/// Name of the implicit root action.
pub const TOP: &str = "top";

/// Name of the implicit action that returns to the previous goal.
pub const UP: &str = "up";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Action {
    ontology_name: String,
    name: String,
}

impl Action {
    pub fn new(ontology_name: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            ontology_name: ontology_name.into(),
            name: name.into(),
        }
    }

    pub fn top(ontology_name: impl Into<String>) -> Self {
        Self::new(ontology_name, TOP)
    }

    pub fn up(ontology_name: impl Into<String>) -> Self {
        Self::new(ontology_name, UP)
    }

    pub fn ontology_name(&self) -> &str {
        &self.ontology_name
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_top(&self) -> bool {
        self.name == TOP
    }

    pub fn is_up(&self) -> bool {
        self.name == UP
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
