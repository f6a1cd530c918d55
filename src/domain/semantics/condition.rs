//! Conditions tested by `if ... then ... else` plan items, preference rules
//! and downdate checks.

use std::fmt;

use crate::domain::ontology::Predicate;

use super::{Proposition, Question};

/// Which part of the information state a condition consults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FactScope {
    #[default]
    Any,
    Shared,
    Private,
    SharedOrPrivate,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Condition {
    /// Some fact about the predicate is known.
    HasValue { predicate: Predicate, scope: FactScope },
    /// The proposition itself is known.
    IsTrue { proposition: Proposition, scope: FactScope },
    /// A domain query iterator has items left.
    QueryHasMoreItems(Question),
}

impl Condition {
    pub fn is_true(proposition: Proposition) -> Self {
        Condition::IsTrue {
            proposition,
            scope: FactScope::Any,
        }
    }

    pub fn has_value(predicate: Predicate) -> Self {
        Condition::HasValue {
            predicate,
            scope: FactScope::Any,
        }
    }

    /// Evaluates the condition against facts taken from the requested scope.
    ///
    /// Query iteration depends on dialogue state this layer does not hold, so
    /// `QueryHasMoreItems` is never true here.
    pub fn is_true_given(&self, facts: &[Proposition]) -> bool {
        match self {
            Condition::HasValue { predicate, .. } => facts
                .iter()
                .any(|fact| fact.predicate() == Some(predicate)),
            Condition::IsTrue { proposition, .. } => facts.contains(proposition),
            Condition::QueryHasMoreItems(_) => false,
        }
    }

    pub fn scope(&self) -> Option<FactScope> {
        match self {
            Condition::HasValue { scope, .. } | Condition::IsTrue { scope, .. } => Some(*scope),
            Condition::QueryHasMoreItems(_) => None,
        }
    }

    pub fn ontology_name(&self) -> Option<&str> {
        match self {
            Condition::HasValue { predicate, .. } => Some(predicate.ontology_name()),
            Condition::IsTrue { proposition, .. } => proposition.ontology_name(),
            Condition::QueryHasMoreItems(question) => question.ontology_name(),
        }
    }
}

impl From<Proposition> for Condition {
    fn from(proposition: Proposition) -> Self {
        Condition::is_true(proposition)
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Condition::HasValue { predicate, scope } => {
                let functor = match scope {
                    FactScope::Any => "has_value",
                    FactScope::Shared => "has_shared_value",
                    FactScope::Private => "has_private_value",
                    FactScope::SharedOrPrivate => "has_shared_or_private_value",
                };
                write!(f, "{}({})", functor, predicate)
            }
            Condition::IsTrue { proposition, scope } => match scope {
                FactScope::Any => write!(f, "{}", proposition),
                FactScope::Shared => write!(f, "is_shared_commitment({})", proposition),
                FactScope::Private => write!(f, "is_private_belief({})", proposition),
                FactScope::SharedOrPrivate => {
                    write!(f, "is_private_belief_or_shared_commitment({})", proposition)
                }
            },
            Condition::QueryHasMoreItems(question) => write!(f, "query_has_more_items({})", question),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ontology::{Individual, IndividualValue, Sort};
    use crate::domain::semantics::PredicateProposition;

    fn dest_city() -> Predicate {
        Predicate::new("travel", "dest_city", Sort::custom("city"))
    }

    fn dest_city_paris() -> Proposition {
        let paris = Individual::new("travel", IndividualValue::Symbol("paris".to_string()), Sort::custom("city"));
        PredicateProposition::positive(dest_city(), paris).unwrap().into()
    }

    #[test]
    fn has_value_is_true_when_any_fact_uses_predicate() {
        let condition = Condition::has_value(dest_city());
        assert!(condition.is_true_given(&[dest_city_paris()]));
        assert!(!condition.is_true_given(&[]));
    }

    #[test]
    fn is_true_requires_the_proposition() {
        let condition = Condition::is_true(dest_city_paris());
        assert!(condition.is_true_given(&[dest_city_paris()]));
        assert!(!condition.is_true_given(&[dest_city_paris().negate()]));
    }

    #[test]
    fn query_condition_is_false_without_state() {
        let condition = Condition::QueryHasMoreItems(Question::wh(dest_city()));
        assert!(!condition.is_true_given(&[dest_city_paris()]));
    }

    #[test]
    fn unparse_scoped_conditions() {
        let shared = Condition::IsTrue {
            proposition: dest_city_paris(),
            scope: FactScope::Shared,
        };
        assert_eq!(shared.to_string(), "is_shared_commitment(dest_city(paris))");
        assert_eq!(Condition::is_true(dest_city_paris()).to_string(), "dest_city(paris)");
        let private = Condition::HasValue {
            predicate: dest_city(),
            scope: FactScope::Private,
        };
        assert_eq!(private.to_string(), "has_private_value(dest_city)");
    }
}
