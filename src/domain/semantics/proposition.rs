//! Propositions: the closed family of things that can be true or false.

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::domain::foundation::{hash_unordered, multiset_eq, OntologyError, Polarity, Speaker, Word};
use crate::domain::ontology::{Individual, Predicate};

use super::{join, Goal, Question, ServiceActionOutcome};

/// A predicate applied to an individual, or a nullary predicate.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PredicateProposition {
    predicate: Predicate,
    individual: Option<Individual>,
    polarity: Polarity,
}

impl PredicateProposition {
    /// Creates a proposition, rejecting an individual of the wrong sort.
    ///
    /// # Errors
    ///
    /// Returns [`OntologyError::SortMismatch`] when the individual's sort
    /// differs from the predicate's sort.
    pub fn new(
        predicate: Predicate,
        individual: Option<Individual>,
        polarity: Polarity,
    ) -> Result<Self, OntologyError> {
        if let Some(individual) = &individual {
            if individual.sort() != predicate.sort() {
                return Err(OntologyError::sort_mismatch(
                    predicate.name(),
                    predicate.sort().name(),
                    individual.to_string(),
                    individual.sort().name(),
                ));
            }
        }
        Ok(Self {
            predicate,
            individual,
            polarity,
        })
    }

    /// Shorthand for a positive proposition about `individual`.
    pub fn positive(predicate: Predicate, individual: Individual) -> Result<Self, OntologyError> {
        Self::new(predicate, Some(individual), Polarity::Positive)
    }

    /// A positive proposition over a nullary predicate.
    pub fn nullary(predicate: Predicate) -> Self {
        Self {
            predicate,
            individual: None,
            polarity: Polarity::Positive,
        }
    }

    pub fn predicate(&self) -> &Predicate {
        &self.predicate
    }

    pub fn individual(&self) -> Option<&Individual> {
        self.individual.as_ref()
    }

    pub fn polarity(&self) -> Polarity {
        self.polarity
    }

    pub fn negate(&self) -> Self {
        Self {
            polarity: self.polarity.negate(),
            ..self.clone()
        }
    }

    /// Whether both propositions can be believed at once.
    pub fn is_incompatible_with(&self, other: &Proposition) -> bool {
        let Proposition::Predicate(other) = other else {
            return false;
        };
        if self.negate() == *other {
            return true;
        }
        if self.polarity.is_positive()
            && other.polarity.is_positive()
            && self.predicate == other.predicate
            && self.individual != other.individual
            && !self.predicate.allows_multiple_instances()
        {
            return true;
        }
        if self.predicate.is_feature_of(&other.predicate) && other.polarity.is_negative() {
            return true;
        }
        self.polarity.is_negative() && other.predicate.is_feature_of(&self.predicate)
    }
}

impl fmt::Display for PredicateProposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.individual {
            Some(individual) => write!(f, "{}{}({})", self.polarity.prefix(), self.predicate, individual),
            None => write!(f, "{}{}()", self.polarity.prefix(), self.predicate),
        }
    }
}

/// Set of propositions; equality and hashing ignore element order.
#[derive(Debug, Clone, Default)]
pub struct PropositionSet {
    propositions: Vec<Proposition>,
    polarity: Polarity,
}

impl PropositionSet {
    pub fn new(propositions: Vec<Proposition>) -> Self {
        Self::with_polarity(propositions, Polarity::Positive)
    }

    pub fn with_polarity(propositions: Vec<Proposition>, polarity: Polarity) -> Self {
        Self {
            propositions,
            polarity,
        }
    }

    pub fn propositions(&self) -> &[Proposition] {
        &self.propositions
    }

    pub fn iter(&self) -> impl Iterator<Item = &Proposition> {
        self.propositions.iter()
    }

    pub fn len(&self) -> usize {
        self.propositions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.propositions.is_empty()
    }

    pub fn polarity(&self) -> Polarity {
        self.polarity
    }

    pub fn contains(&self, proposition: &Proposition) -> bool {
        self.propositions.contains(proposition)
    }

    pub fn negate(&self) -> Self {
        Self {
            polarity: self.polarity.negate(),
            ..self.clone()
        }
    }

    /// The shared predicate when every member is a proposition over the same predicate.
    pub fn predicate(&self) -> Option<&Predicate> {
        let mut predicates = self.propositions.iter().map(Proposition::predicate);
        let first = predicates.next()??;
        predicates
            .all(|predicate| predicate == Some(first))
            .then_some(first)
    }

    pub fn ontology_name(&self) -> Option<&str> {
        self.propositions.iter().find_map(Proposition::ontology_name)
    }
}

impl PartialEq for PropositionSet {
    fn eq(&self, other: &Self) -> bool {
        self.polarity == other.polarity && multiset_eq(&self.propositions, &other.propositions)
    }
}

impl Eq for PropositionSet {}

impl Hash for PropositionSet {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.polarity.hash(state);
        hash_unordered(&self.propositions, state);
    }
}

impl fmt::Display for PropositionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}set([{}])", self.polarity.prefix(), join(&self.propositions))
    }
}

/// Confirmation, before invocation, of a service action with its arguments.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PreconfirmationProposition {
    pub ontology_name: String,
    pub service_action: String,
    pub arguments: Vec<Proposition>,
    pub polarity: Polarity,
}

/// Report, before invocation, of a service action; argument order is irrelevant.
#[derive(Debug, Clone)]
pub struct PrereportProposition {
    pub ontology_name: String,
    pub service_action: String,
    pub arguments: Vec<Proposition>,
    pub polarity: Polarity,
}

impl PartialEq for PrereportProposition {
    fn eq(&self, other: &Self) -> bool {
        self.ontology_name == other.ontology_name
            && self.service_action == other.service_action
            && self.polarity == other.polarity
            && multiset_eq(&self.arguments, &other.arguments)
    }
}

impl Eq for PrereportProposition {}

impl Hash for PrereportProposition {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.ontology_name.hash(state);
        self.service_action.hash(state);
        self.polarity.hash(state);
        hash_unordered(&self.arguments, state);
    }
}

/// Outcome of invoking a service action with the given arguments.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ServiceResultProposition {
    pub ontology_name: String,
    pub service_action: String,
    pub arguments: Vec<Proposition>,
    pub outcome: ServiceActionOutcome,
}

impl fmt::Display for ServiceResultProposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ServiceResultProposition({}, [{}], {})",
            self.service_action,
            join(&self.arguments),
            self.outcome
        )
    }
}

/// Start or termination of a service action.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ServiceActionProposition {
    pub ontology_name: String,
    pub service_action: String,
    pub polarity: Polarity,
}

impl ServiceActionProposition {
    pub fn new(ontology_name: impl Into<String>, service_action: impl Into<String>) -> Self {
        Self {
            ontology_name: ontology_name.into(),
            service_action: service_action.into(),
            polarity: Polarity::Positive,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RejectedPropositions {
    pub rejected: PropositionSet,
    pub reason: Option<String>,
    pub polarity: Polarity,
}

/// What a speaker was understood to have said. The speaker may be unknown.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UnderstandingProposition {
    pub speaker: Option<Speaker>,
    pub content: Box<Proposition>,
    pub polarity: Polarity,
}

/// Whether the answer to a question is known.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KnowledgePreconditionProposition {
    pub question: Box<Question>,
    pub polarity: Polarity,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Proposition {
    Predicate(PredicateProposition),
    Goal { goal: Goal, polarity: Polarity },
    Set(PropositionSet),
    Resolvedness(Question),
    Preconfirmation(PreconfirmationProposition),
    Prereport(PrereportProposition),
    ServiceResult(ServiceResultProposition),
    ServiceActionStarted(ServiceActionProposition),
    ServiceActionTerminated(ServiceActionProposition),
    Rejected(RejectedPropositions),
    Understanding(UnderstandingProposition),
    KnowledgePrecondition(KnowledgePreconditionProposition),
    Mute,
    Unmute,
    Quit,
}

impl Proposition {
    /// A positive goal proposition.
    pub fn goal(goal: Goal) -> Self {
        Proposition::Goal {
            goal,
            polarity: Polarity::Positive,
        }
    }

    /// The polarity, for variants that have one.
    pub fn polarity(&self) -> Option<Polarity> {
        match self {
            Proposition::Predicate(p) => Some(p.polarity()),
            Proposition::Goal { polarity, .. } => Some(*polarity),
            Proposition::Set(set) => Some(set.polarity()),
            Proposition::Preconfirmation(p) => Some(p.polarity),
            Proposition::Prereport(p) => Some(p.polarity),
            Proposition::ServiceActionStarted(p) | Proposition::ServiceActionTerminated(p) => {
                Some(p.polarity)
            }
            Proposition::Rejected(p) => Some(p.polarity),
            Proposition::Understanding(p) => Some(p.polarity),
            Proposition::KnowledgePrecondition(p) => Some(p.polarity),
            Proposition::Resolvedness(_)
            | Proposition::ServiceResult(_)
            | Proposition::Mute
            | Proposition::Unmute
            | Proposition::Quit => None,
        }
    }

    /// Variants without a polarity count as positive.
    pub fn is_positive(&self) -> bool {
        self.polarity().map_or(true, |polarity| polarity.is_positive())
    }

    /// Flips the polarity. Variants without one are returned unchanged.
    pub fn negate(&self) -> Self {
        match self {
            Proposition::Predicate(p) => Proposition::Predicate(p.negate()),
            Proposition::Goal { goal, polarity } => Proposition::Goal {
                goal: goal.clone(),
                polarity: polarity.negate(),
            },
            Proposition::Set(set) => Proposition::Set(set.negate()),
            Proposition::Preconfirmation(p) => Proposition::Preconfirmation(PreconfirmationProposition {
                polarity: p.polarity.negate(),
                ..p.clone()
            }),
            Proposition::Prereport(p) => Proposition::Prereport(PrereportProposition {
                polarity: p.polarity.negate(),
                ..p.clone()
            }),
            Proposition::ServiceActionStarted(p) => {
                Proposition::ServiceActionStarted(ServiceActionProposition {
                    polarity: p.polarity.negate(),
                    ..p.clone()
                })
            }
            Proposition::ServiceActionTerminated(p) => {
                Proposition::ServiceActionTerminated(ServiceActionProposition {
                    polarity: p.polarity.negate(),
                    ..p.clone()
                })
            }
            Proposition::Rejected(p) => Proposition::Rejected(RejectedPropositions {
                polarity: p.polarity.negate(),
                ..p.clone()
            }),
            Proposition::Understanding(p) => Proposition::Understanding(UnderstandingProposition {
                polarity: p.polarity.negate(),
                ..p.clone()
            }),
            Proposition::KnowledgePrecondition(p) => {
                Proposition::KnowledgePrecondition(KnowledgePreconditionProposition {
                    polarity: p.polarity.negate(),
                    ..p.clone()
                })
            }
            Proposition::Resolvedness(_)
            | Proposition::ServiceResult(_)
            | Proposition::Mute
            | Proposition::Unmute
            | Proposition::Quit => self.clone(),
        }
    }

    pub fn predicate(&self) -> Option<&Predicate> {
        match self {
            Proposition::Predicate(p) => Some(p.predicate()),
            _ => None,
        }
    }

    pub fn as_predicate_proposition(&self) -> Option<&PredicateProposition> {
        match self {
            Proposition::Predicate(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_goal(&self) -> Option<&Goal> {
        match self {
            Proposition::Goal { goal, .. } => Some(goal),
            _ => None,
        }
    }

    pub fn is_service_result(&self) -> bool {
        matches!(self, Proposition::ServiceResult(_))
    }

    /// Only predicate propositions have incompatibility rules.
    pub fn is_incompatible_with(&self, other: &Proposition) -> bool {
        match self {
            Proposition::Predicate(p) => p.is_incompatible_with(other),
            _ => false,
        }
    }

    /// The ontology the proposition belongs to, if it is ontology specific.
    pub fn ontology_name(&self) -> Option<&str> {
        match self {
            Proposition::Predicate(p) => Some(p.predicate().ontology_name()),
            Proposition::Goal { goal, .. } => goal.ontology_name(),
            Proposition::Set(set) => set.ontology_name(),
            Proposition::Resolvedness(question) => question.ontology_name(),
            Proposition::Preconfirmation(p) => Some(&p.ontology_name),
            Proposition::Prereport(p) => Some(&p.ontology_name),
            Proposition::ServiceResult(p) => Some(&p.ontology_name),
            Proposition::ServiceActionStarted(p) | Proposition::ServiceActionTerminated(p) => {
                Some(&p.ontology_name)
            }
            Proposition::Rejected(p) => p.rejected.ontology_name(),
            Proposition::Understanding(p) => p.content.ontology_name(),
            Proposition::KnowledgePrecondition(p) => p.question.ontology_name(),
            Proposition::Mute | Proposition::Unmute | Proposition::Quit => None,
        }
    }
}

impl From<PredicateProposition> for Proposition {
    fn from(proposition: PredicateProposition) -> Self {
        Proposition::Predicate(proposition)
    }
}

impl From<PropositionSet> for Proposition {
    fn from(set: PropositionSet) -> Self {
        Proposition::Set(set)
    }
}

impl fmt::Display for Proposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Proposition::Predicate(p) => write!(f, "{}", p),
            Proposition::Goal { goal, polarity } => write!(f, "{}goal({})", polarity.prefix(), goal),
            Proposition::Set(set) => write!(f, "{}", set),
            Proposition::Resolvedness(question) => write!(f, "resolved({})", question),
            Proposition::Preconfirmation(p) => write!(
                f,
                "{}preconfirmed({}, [{}])",
                p.polarity.prefix(),
                p.service_action,
                join(&p.arguments)
            ),
            Proposition::Prereport(p) => write!(
                f,
                "{}prereported({}, [{}])",
                p.polarity.prefix(),
                p.service_action,
                join(&p.arguments)
            ),
            Proposition::ServiceResult(p) => write!(f, "{}", p),
            Proposition::ServiceActionStarted(p) => {
                write!(f, "{}service_action_started({})", p.polarity.prefix(), p.service_action)
            }
            Proposition::ServiceActionTerminated(p) => {
                write!(f, "{}service_action_terminated({})", p.polarity.prefix(), p.service_action)
            }
            Proposition::Rejected(p) => match &p.reason {
                Some(reason) => write!(f, "{}rejected({}, {})", p.polarity.prefix(), p.rejected, Word(reason)),
                None => write!(f, "{}rejected({})", p.polarity.prefix(), p.rejected),
            },
            Proposition::Understanding(p) => {
                let speaker = p.speaker.map_or("None", |speaker| speaker.as_str());
                write!(f, "{}und({}, {})", p.polarity.prefix(), speaker, p.content)
            }
            Proposition::KnowledgePrecondition(p) => {
                write!(f, "{}know_answer({})", p.polarity.prefix(), p.question)
            }
            Proposition::Mute => write!(f, "mute"),
            Proposition::Unmute => write!(f, "unmute"),
            Proposition::Quit => write!(f, "quit"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ontology::{IndividualValue, Sort};

    const ONTOLOGY: &str = "travel";

    fn city(name: &str) -> Individual {
        Individual::new(ONTOLOGY, IndividualValue::Symbol(name.to_string()), Sort::custom("city"))
    }

    fn dest_city() -> Predicate {
        Predicate::new(ONTOLOGY, "dest_city", Sort::custom("city"))
    }

    fn dest_city_type() -> Predicate {
        Predicate::new(ONTOLOGY, "dest_city_type", Sort::custom("city_type")).with_feature_of("dest_city")
    }

    fn about(predicate: Predicate, individual: Individual) -> Proposition {
        PredicateProposition::positive(predicate, individual).unwrap().into()
    }

    #[test]
    fn mismatched_sort_is_rejected() {
        let price = Predicate::new(ONTOLOGY, "price", Sort::builtin(crate::domain::ontology::BuiltinSort::Real));
        let result = PredicateProposition::positive(price, city("paris"));
        assert!(matches!(result, Err(OntologyError::SortMismatch { .. })));
    }

    #[test]
    fn unparse_predicate_propositions() {
        assert_eq!(about(dest_city(), city("paris")).to_string(), "dest_city(paris)");
        assert_eq!(about(dest_city(), city("paris")).negate().to_string(), "~dest_city(paris)");
        let need_visa = Predicate::new(ONTOLOGY, "need_visa", Sort::builtin(crate::domain::ontology::BuiltinSort::Boolean));
        assert_eq!(Proposition::from(PredicateProposition::nullary(need_visa)).to_string(), "need_visa()");
    }

    #[test]
    fn proposition_is_incompatible_with_its_negation() {
        let paris = about(dest_city(), city("paris"));
        assert!(paris.is_incompatible_with(&paris.negate()));
        assert!(paris.negate().is_incompatible_with(&paris));
    }

    #[test]
    fn different_individuals_are_incompatible_for_single_instance_predicate() {
        let paris = about(dest_city(), city("paris"));
        let london = about(dest_city(), city("london"));
        assert!(paris.is_incompatible_with(&london));
        assert!(london.is_incompatible_with(&paris));
    }

    #[test]
    fn different_individuals_are_compatible_for_multi_instance_predicate() {
        let predicate = dest_city().with_multiple_instances();
        let paris = about(predicate.clone(), city("paris"));
        let london = about(predicate, city("london"));
        assert!(!paris.is_incompatible_with(&london));
    }

    #[test]
    fn feature_proposition_is_incompatible_with_negated_base() {
        let city_type = Individual::new(ONTOLOGY, IndividualValue::Symbol("capital".to_string()), Sort::custom("city_type"));
        let feature = about(dest_city_type(), city_type);
        let negated_base = about(dest_city(), city("paris")).negate();
        assert!(feature.is_incompatible_with(&negated_base));
        assert!(negated_base.is_incompatible_with(&feature));
    }

    #[test]
    fn non_predicate_propositions_are_never_incompatible() {
        assert!(!Proposition::Mute.is_incompatible_with(&Proposition::Mute));
    }

    #[test]
    fn proposition_set_equality_ignores_order() {
        let paris = about(dest_city(), city("paris"));
        let london = about(dest_city(), city("london"));
        assert_eq!(
            PropositionSet::new(vec![paris.clone(), london.clone()]),
            PropositionSet::new(vec![london, paris])
        );
    }

    #[test]
    fn proposition_set_polarity_matters() {
        let set = PropositionSet::new(vec![about(dest_city(), city("paris"))]);
        assert_ne!(set, set.negate());
        assert_eq!(set.negate().to_string(), "~set([dest_city(paris)])");
    }

    #[test]
    fn prereport_ignores_argument_order_but_preconfirmation_does_not() {
        let paris = about(dest_city(), city("paris"));
        let london = about(dest_city(), city("london"));
        let prereport = |args: Vec<Proposition>| PrereportProposition {
            ontology_name: ONTOLOGY.to_string(),
            service_action: "MakeReservation".to_string(),
            arguments: args,
            polarity: Polarity::Positive,
        };
        let preconfirmation = |args: Vec<Proposition>| PreconfirmationProposition {
            ontology_name: ONTOLOGY.to_string(),
            service_action: "MakeReservation".to_string(),
            arguments: args,
            polarity: Polarity::Positive,
        };
        assert_eq!(
            prereport(vec![paris.clone(), london.clone()]),
            prereport(vec![london.clone(), paris.clone()])
        );
        assert_ne!(
            preconfirmation(vec![paris.clone(), london.clone()]),
            preconfirmation(vec![london, paris])
        );
    }

    #[test]
    fn control_propositions_are_singletons() {
        assert_eq!(Proposition::Quit, Proposition::Quit);
        assert_eq!(Proposition::Mute.negate(), Proposition::Mute);
        assert_eq!(Proposition::Mute.ontology_name(), None);
    }

    #[test]
    fn understanding_without_speaker_unparses_none() {
        let und = Proposition::Understanding(UnderstandingProposition {
            speaker: None,
            content: Box::new(about(dest_city(), city("paris"))),
            polarity: Polarity::Positive,
        });
        assert_eq!(und.to_string(), "und(None, dest_city(paris))");
    }
}
