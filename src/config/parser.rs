//! Expression parser configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Expression parser configuration
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ParserConfig {
    /// Maximum nesting of sub-expressions before a parse is rejected
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,

    /// Suggest replacements for deprecated notation instead of reporting
    /// an unknown term
    #[serde(default = "default_deprecation_hints")]
    pub deprecation_hints: bool,
}

impl ParserConfig {
    /// Validate parser configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.max_depth == 0 {
            return Err(ValidationError::InvalidMaxDepth);
        }
        Ok(())
    }
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
            deprecation_hints: default_deprecation_hints(),
        }
    }
}

fn default_max_depth() -> usize {
    64
}

fn default_deprecation_hints() -> bool {
    true
}
