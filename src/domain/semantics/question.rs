//! Questions and lambda abstractions.

use std::fmt;

use crate::domain::ontology::{Predicate, Sort};

use super::{Proposition, PropositionSet};

/// A proposition with its argument abstracted away, written `X.pred(X)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LambdaAbstraction {
    Predicate(Predicate),
    /// `X.goal(X)`: which goal the user has.
    Goal,
}

impl fmt::Display for LambdaAbstraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LambdaAbstraction::Predicate(predicate) => write!(f, "X.{}(X)", predicate),
            LambdaAbstraction::Goal => write!(f, "X.goal(X)"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Question {
    Wh(LambdaAbstraction),
    YesNo(Box<Proposition>),
    Alt(PropositionSet),
    /// Whether the answer to the wrapped question is known.
    KnowledgePrecondition(Box<Question>),
}

impl Question {
    pub fn wh(predicate: Predicate) -> Self {
        Question::Wh(LambdaAbstraction::Predicate(predicate))
    }

    pub fn yes_no(proposition: Proposition) -> Self {
        Question::YesNo(Box::new(proposition))
    }

    pub fn alt(alternatives: PropositionSet) -> Self {
        Question::Alt(alternatives)
    }

    pub fn knowledge_precondition(question: Question) -> Self {
        Question::KnowledgePrecondition(Box::new(question))
    }

    pub fn is_wh_question(&self) -> bool {
        matches!(self, Question::Wh(_))
    }

    pub fn is_yes_no_question(&self) -> bool {
        matches!(self, Question::YesNo(_))
    }

    pub fn is_alt_question(&self) -> bool {
        matches!(self, Question::Alt(_))
    }

    pub fn is_knowledge_precondition_question(&self) -> bool {
        matches!(self, Question::KnowledgePrecondition(_))
    }

    pub fn is_understanding_question(&self) -> bool {
        matches!(self, Question::YesNo(p) if matches!(**p, Proposition::Understanding(_)))
    }

    /// The predicate the question is about, when there is exactly one.
    pub fn predicate(&self) -> Option<&Predicate> {
        match self {
            Question::Wh(LambdaAbstraction::Predicate(predicate)) => Some(predicate),
            Question::Wh(LambdaAbstraction::Goal) => None,
            Question::YesNo(proposition) => proposition.predicate(),
            Question::Alt(alternatives) => alternatives.predicate(),
            Question::KnowledgePrecondition(_) => None,
        }
    }

    pub fn sort(&self) -> Option<&Sort> {
        self.predicate().map(Predicate::sort)
    }

    pub fn alternatives(&self) -> Option<&PropositionSet> {
        match self {
            Question::Alt(alternatives) => Some(alternatives),
            _ => None,
        }
    }

    pub fn ontology_name(&self) -> Option<&str> {
        match self {
            Question::Wh(LambdaAbstraction::Predicate(predicate)) => Some(predicate.ontology_name()),
            Question::Wh(LambdaAbstraction::Goal) => None,
            Question::YesNo(proposition) => proposition.ontology_name(),
            Question::Alt(alternatives) => alternatives.ontology_name(),
            Question::KnowledgePrecondition(question) => question.ontology_name(),
        }
    }
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Question::Wh(lambda) => write!(f, "?{}", lambda),
            Question::YesNo(proposition) => write!(f, "?{}", proposition),
            Question::Alt(alternatives) => write!(f, "?{}", alternatives),
            Question::KnowledgePrecondition(question) => write!(f, "?know_answer({})", question),
        }
    }
}
