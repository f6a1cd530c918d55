//! Polarity of propositions and individuals.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether a value is asserted or negated.
///
/// Negation is rendered as a `~` prefix in the expression notation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Polarity {
    #[default]
    Positive,
    Negative,
}

impl Polarity {
    /// Returns the opposite polarity.
    pub fn negate(self) -> Self {
        match self {
            Polarity::Positive => Polarity::Negative,
            Polarity::Negative => Polarity::Positive,
        }
    }

    pub fn is_positive(&self) -> bool {
        matches!(self, Polarity::Positive)
    }

    pub fn is_negative(&self) -> bool {
        matches!(self, Polarity::Negative)
    }

    /// Prefix used when unparsing.
    pub fn prefix(&self) -> &'static str {
        match self {
            Polarity::Positive => "",
            Polarity::Negative => "~",
        }
    }
}

impl fmt::Display for Polarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Polarity::Positive => "POS",
            Polarity::Negative => "NEG",
        };
        write!(f, "{}", s)
    }
}
