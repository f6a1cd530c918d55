//! Sorts: the type tags of individuals and predicates.

use std::fmt;
use std::hash::{Hash, Hasher};

/// Sorts that every ontology knows without declaring them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinSort {
    Integer,
    Real,
    String,
    Boolean,
    DateTime,
    PersonName,
    Image,
    Webview,
    Domain,
}

impl BuiltinSort {
    pub const ALL: [BuiltinSort; 9] = [
        BuiltinSort::Integer,
        BuiltinSort::Real,
        BuiltinSort::String,
        BuiltinSort::Boolean,
        BuiltinSort::DateTime,
        BuiltinSort::PersonName,
        BuiltinSort::Image,
        BuiltinSort::Webview,
        BuiltinSort::Domain,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            BuiltinSort::Integer => "integer",
            BuiltinSort::Real => "real",
            BuiltinSort::String => "string",
            BuiltinSort::Boolean => "boolean",
            BuiltinSort::DateTime => "datetime",
            BuiltinSort::PersonName => "person_name",
            BuiltinSort::Image => "image",
            BuiltinSort::Webview => "webview",
            BuiltinSort::Domain => "domain",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|sort| sort.name() == name)
    }

    /// Builtin sorts with an open value space accept individuals created at runtime.
    pub fn is_dynamic(&self) -> bool {
        !matches!(self, BuiltinSort::Boolean | BuiltinSort::Domain)
    }
}

/// A type tag, compared by name.
#[derive(Debug, Clone)]
pub enum Sort {
    Builtin(BuiltinSort),
    Custom { name: String, dynamic: bool },
}

impl Sort {
    /// A custom sort with a fixed enumeration of individuals.
    pub fn custom(name: impl Into<String>) -> Self {
        Sort::Custom {
            name: name.into(),
            dynamic: false,
        }
    }

    /// A custom sort that permits individuals outside the ontology's enumeration.
    pub fn dynamic(name: impl Into<String>) -> Self {
        Sort::Custom {
            name: name.into(),
            dynamic: true,
        }
    }

    pub fn builtin(sort: BuiltinSort) -> Self {
        Sort::Builtin(sort)
    }

    pub fn name(&self) -> &str {
        match self {
            Sort::Builtin(builtin) => builtin.name(),
            Sort::Custom { name, .. } => name,
        }
    }

    pub fn as_builtin(&self) -> Option<BuiltinSort> {
        match self {
            Sort::Builtin(builtin) => Some(*builtin),
            Sort::Custom { .. } => None,
        }
    }

    pub fn is_builtin(&self) -> bool {
        matches!(self, Sort::Builtin(_))
    }

    pub fn is_dynamic(&self) -> bool {
        match self {
            Sort::Builtin(builtin) => builtin.is_dynamic(),
            Sort::Custom { dynamic, .. } => *dynamic,
        }
    }

    pub fn is_string_sort(&self) -> bool {
        self.as_builtin() == Some(BuiltinSort::String)
    }

    pub fn is_integer_sort(&self) -> bool {
        self.as_builtin() == Some(BuiltinSort::Integer)
    }

    pub fn is_real_sort(&self) -> bool {
        self.as_builtin() == Some(BuiltinSort::Real)
    }

    pub fn is_boolean_sort(&self) -> bool {
        self.as_builtin() == Some(BuiltinSort::Boolean)
    }

    pub fn is_datetime_sort(&self) -> bool {
        self.as_builtin() == Some(BuiltinSort::DateTime)
    }

    pub fn is_person_name_sort(&self) -> bool {
        self.as_builtin() == Some(BuiltinSort::PersonName)
    }

    pub fn is_domain_sort(&self) -> bool {
        self.as_builtin() == Some(BuiltinSort::Domain)
    }
}

impl PartialEq for Sort {
    fn eq(&self, other: &Self) -> bool {
        self.name() == other.name()
    }
}

impl Eq for Sort {}

impl Hash for Sort {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name().hash(state);
    }
}

impl fmt::Display for Sort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
