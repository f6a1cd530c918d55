//! DDD selection configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;

/// Which DDD to work with
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct DddConfig {
    /// DDD name, attached to parsed moves and log records
    #[serde(default = "default_name")]
    pub name: String,

    /// Path to a JSON or YAML domain description
    pub description_path: Option<PathBuf>,
}

impl DddConfig {
    /// Validate DDD configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::MissingRequired("ddd.name"));
        }
        Ok(())
    }
}

impl Default for DddConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            description_path: None,
        }
    }
}

fn default_name() -> String {
    "default_ddd".to_string()
}
