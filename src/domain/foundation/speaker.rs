//! Dialogue participants.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ValidationError;

/// The participant a move or understanding is attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Speaker {
    /// The dialogue system itself.
    Sys,
    /// The human user.
    Usr,
    /// A model (e.g. an NLU component) speaking on the user's behalf.
    Model,
}

impl Speaker {
    pub fn as_str(&self) -> &'static str {
        match self {
            Speaker::Sys => "SYS",
            Speaker::Usr => "USR",
            Speaker::Model => "MODEL",
        }
    }
}

impl fmt::Display for Speaker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Speaker {
    type Err = ValidationError;

    /// Speaker names are upper case only; `usr` is rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SYS" => Ok(Speaker::Sys),
            "USR" => Ok(Speaker::Usr),
            "MODEL" => Ok(Speaker::Model),
            other => Err(ValidationError::invalid_format(
                "speaker",
                format!("expected SYS, USR or MODEL but got '{}'", other),
            )),
        }
    }
}
