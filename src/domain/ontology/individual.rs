//! Individuals: values of a sort, optionally negated.

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::domain::foundation::{Polarity, Quoted, Real};

use super::Sort;

/// The raw value carried by an individual.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum IndividualValue {
    /// A name from the ontology's enumeration, e.g. `paris`.
    Symbol(String),
    Integer(i64),
    Real(Real),
    /// A string-sorted value, stored without its quotes.
    Text(String),
    /// An ISO-8601 timestamp, kept verbatim.
    DateTime(String),
    PersonName(String),
}

impl fmt::Display for IndividualValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndividualValue::Symbol(name) => write!(f, "{}", name),
            IndividualValue::Integer(value) => write!(f, "{}", value),
            IndividualValue::Real(value) => write!(f, "{}", value),
            IndividualValue::Text(text) => write!(f, "{}", Quoted::double(text)),
            IndividualValue::DateTime(iso) => write!(f, "datetime({})", iso),
            IndividualValue::PersonName(name) => write!(f, "person_name({})", name),
        }
    }
}

/// A value of some sort.
///
/// Two individuals are equal when value, sort and polarity all match; the
/// ontology name is informational.
#[derive(Debug, Clone)]
pub struct Individual {
    ontology_name: String,
    value: IndividualValue,
    sort: Sort,
    polarity: Polarity,
}

impl Individual {
    pub fn new(ontology_name: impl Into<String>, value: IndividualValue, sort: Sort) -> Self {
        Self {
            ontology_name: ontology_name.into(),
            value,
            sort,
            polarity: Polarity::Positive,
        }
    }

    pub fn ontology_name(&self) -> &str {
        &self.ontology_name
    }

    pub fn value(&self) -> &IndividualValue {
        &self.value
    }

    pub fn sort(&self) -> &Sort {
        &self.sort
    }

    pub fn polarity(&self) -> Polarity {
        self.polarity
    }

    pub fn is_positive(&self) -> bool {
        self.polarity.is_positive()
    }

    /// Returns the negated individual; negating twice gives back an equal value.
    pub fn negate(&self) -> Self {
        Self {
            polarity: self.polarity.negate(),
            ..self.clone()
        }
    }
}

impl PartialEq for Individual {
    fn eq(&self, other: &Self) -> bool {
        self.polarity == other.polarity && self.value == other.value && self.sort == other.sort
    }
}

impl Eq for Individual {}

impl Hash for Individual {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
        self.sort.hash(state);
        self.polarity.hash(state);
    }
}

impl fmt::Display for Individual {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.polarity.prefix(), self.value)
    }
}
