//! Obsolete notation: rejected forms with suggested replacements, and
//! accepted legacy aliases.

use once_cell::sync::Lazy;
use std::collections::HashMap;

use super::ParseError;

/// Where in the notation a deprecated name appears.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Notation {
    /// `name(argument)`
    Functor,
    /// `?X.name(X)`
    Lambda,
}

/// A rejected form. `{}` in the templates stands for the captured argument
/// (functors) or bound variable (lambdas).
#[derive(Debug)]
pub struct DeprecatedForm {
    pub notation: Notation,
    pub name: &'static str,
    pub kind: &'static str,
    pub found: &'static str,
    pub suggestion: &'static str,
}

impl DeprecatedForm {
    pub fn error(&self, captured: &str) -> ParseError {
        ParseError::Deprecated {
            found: self.found.replace("{}", captured),
            kind: self.kind.to_string(),
            suggestion: self.suggestion.replace("{}", captured),
        }
    }
}

pub static DEPRECATED_FORMS: &[DeprecatedForm] = &[
    DeprecatedForm {
        notation: Notation::Lambda,
        name: "action",
        kind: "question",
        found: "?{}.action({})",
        suggestion: "?{}.goal({})",
    },
    DeprecatedForm {
        notation: Notation::Functor,
        name: "action",
        kind: "proposition",
        found: "action({})",
        suggestion: "goal(perform({}))",
    },
    DeprecatedForm {
        notation: Notation::Functor,
        name: "issue",
        kind: "proposition",
        found: "issue({})",
        suggestion: "goal(resolve({}))",
    },
];

static FORMS_BY_NAME: Lazy<HashMap<(Notation, &'static str), &'static DeprecatedForm>> = Lazy::new(|| {
    DEPRECATED_FORMS
        .iter()
        .map(|form| ((form.notation, form.name), form))
        .collect()
});

/// Legacy functor names still accepted, mapped to their current names.
static FUNCTOR_ALIASES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("dev_perform", "invoke_service_action"),
        ("dev_query", "invoke_service_query"),
    ])
});

pub fn lookup(notation: Notation, name: &str) -> Option<&'static DeprecatedForm> {
    FORMS_BY_NAME.get(&(notation, name)).copied()
}

pub fn canonical_functor(name: &str) -> &str {
    FUNCTOR_ALIASES.get(name).copied().unwrap_or(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_form_is_reachable_by_lookup() {
        for form in DEPRECATED_FORMS {
            assert!(std::ptr::eq(lookup(form.notation, form.name).unwrap(), form));
        }
    }

    #[test]
    fn lambda_and_functor_forms_are_distinct() {
        assert_eq!(lookup(Notation::Lambda, "action").unwrap().kind, "question");
        assert_eq!(lookup(Notation::Functor, "action").unwrap().kind, "proposition");
        assert!(lookup(Notation::Lambda, "issue").is_none());
    }

    #[test]
    fn functor_form_fills_in_argument() {
        let err = lookup(Notation::Functor, "issue").unwrap().error("?X.price(X)");
        assert_eq!(
            err.to_string(),
            "'issue(?X.price(X))' is not a valid proposition. Perhaps you mean 'goal(resolve(?X.price(X)))'."
        );
    }

    #[test]
    fn aliases_map_to_current_names() {
        assert_eq!(canonical_functor("dev_perform"), "invoke_service_action");
        assert_eq!(canonical_functor("dev_query"), "invoke_service_query");
        assert_eq!(canonical_functor("findout"), "findout");
    }
}
