//! The union of everything the expression notation can denote.

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::domain::foundation::{hash_unordered, multiset_eq};
use crate::domain::ontology::{Action, Individual, Predicate};
use crate::domain::plan::PlanItem;

use super::{join, Condition, Goal, LambdaAbstraction, Move, Proposition, Question, ServiceActionOutcome};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SemanticValue {
    Individual(Individual),
    Predicate(Predicate),
    Action(Action),
    Proposition(Proposition),
    Lambda(LambdaAbstraction),
    Question(Question),
    Goal(Goal),
    Move(Move),
    PlanItem(PlanItem),
    Condition(Condition),
    ServiceOutcome(ServiceActionOutcome),
    Yes,
    No,
    Set(SemanticSet),
}

impl SemanticValue {
    /// Lower-case name of the variant, for messages.
    pub fn kind(&self) -> &'static str {
        match self {
            SemanticValue::Individual(_) => "individual",
            SemanticValue::Predicate(_) => "predicate",
            SemanticValue::Action(_) => "action",
            SemanticValue::Proposition(_) => "proposition",
            SemanticValue::Lambda(_) => "lambda abstraction",
            SemanticValue::Question(_) => "question",
            SemanticValue::Goal(_) => "goal",
            SemanticValue::Move(_) => "move",
            SemanticValue::PlanItem(_) => "plan item",
            SemanticValue::Condition(_) => "condition",
            SemanticValue::ServiceOutcome(_) => "service action outcome",
            SemanticValue::Yes | SemanticValue::No => "yes/no answer",
            SemanticValue::Set(_) => "set",
        }
    }

    pub fn as_proposition(&self) -> Option<&Proposition> {
        match self {
            SemanticValue::Proposition(proposition) => Some(proposition),
            _ => None,
        }
    }

    pub fn as_question(&self) -> Option<&Question> {
        match self {
            SemanticValue::Question(question) => Some(question),
            _ => None,
        }
    }

    pub fn as_move(&self) -> Option<&Move> {
        match self {
            SemanticValue::Move(mv) => Some(mv),
            _ => None,
        }
    }

    pub fn as_plan_item(&self) -> Option<&PlanItem> {
        match self {
            SemanticValue::PlanItem(item) => Some(item),
            _ => None,
        }
    }
}

impl fmt::Display for SemanticValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SemanticValue::Individual(individual) => write!(f, "{}", individual),
            SemanticValue::Predicate(predicate) => write!(f, "{}", predicate),
            SemanticValue::Action(action) => write!(f, "{}", action),
            SemanticValue::Proposition(proposition) => write!(f, "{}", proposition),
            SemanticValue::Lambda(lambda) => write!(f, "{}", lambda),
            SemanticValue::Question(question) => write!(f, "{}", question),
            SemanticValue::Goal(goal) => write!(f, "{}", goal),
            SemanticValue::Move(mv) => write!(f, "{}", mv),
            SemanticValue::PlanItem(item) => write!(f, "{}", item),
            SemanticValue::Condition(condition) => write!(f, "{}", condition),
            SemanticValue::ServiceOutcome(outcome) => write!(f, "{}", outcome),
            SemanticValue::Yes => write!(f, "yes"),
            SemanticValue::No => write!(f, "no"),
            SemanticValue::Set(set) => write!(f, "{}", set),
        }
    }
}

/// An unordered collection of distinct semantic values, written `{a, b}`.
#[derive(Debug, Clone, Default)]
pub struct SemanticSet {
    items: Vec<SemanticValue>,
}

impl SemanticSet {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Adds `value` unless an equal value is already present.
    pub fn add(&mut self, value: SemanticValue) {
        if !self.items.contains(&value) {
            self.items.push(value);
        }
    }

    pub fn contains(&self, value: &SemanticValue) -> bool {
        self.items.contains(value)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SemanticValue> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl FromIterator<SemanticValue> for SemanticSet {
    fn from_iter<I: IntoIterator<Item = SemanticValue>>(iter: I) -> Self {
        let mut set = SemanticSet::new();
        for value in iter {
            set.add(value);
        }
        set
    }
}

impl PartialEq for SemanticSet {
    fn eq(&self, other: &Self) -> bool {
        multiset_eq(&self.items, &other.items)
    }
}

impl Eq for SemanticSet {}

impl Hash for SemanticSet {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_unordered(&self.items, state);
    }
}

impl fmt::Display for SemanticSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}}}", join(&self.items))
    }
}
