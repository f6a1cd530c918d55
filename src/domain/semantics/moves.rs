//! Dialogue moves and their realization metadata.

use std::fmt;

use crate::domain::foundation::{Confidence, Quoted, Speaker};
use crate::domain::ontology::{Action, Individual};

use super::{join, IcmMove, Proposition, Question, ServiceResultProposition};

/// The content of an answer move.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Answer {
    Proposition(Proposition),
    /// A short answer, e.g. `paris`, to be combined with the question under discussion.
    Individual(Individual),
    Yes,
    No,
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Answer::Proposition(proposition) => write!(f, "{}", proposition),
            Answer::Individual(individual) => write!(f, "{}", individual),
            Answer::Yes => write!(f, "yes"),
            Answer::No => write!(f, "no"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CoreMove {
    Answer(Answer),
    Ask(Question),
    Request(Action),
    Report(ServiceResultProposition),
    Prereport {
        ontology_name: String,
        service_action: String,
        arguments: Vec<Proposition>,
    },
    Greet,
    Mute,
    Unmute,
    Quit,
    Icm(IcmMove),
}

impl CoreMove {
    pub fn type_name(&self) -> &'static str {
        match self {
            CoreMove::Answer(_) => "answer",
            CoreMove::Ask(_) => "ask",
            CoreMove::Request(_) => "request",
            CoreMove::Report(_) => "report",
            CoreMove::Prereport { .. } => "prereport",
            CoreMove::Greet => "greet",
            CoreMove::Mute => "mute",
            CoreMove::Unmute => "unmute",
            CoreMove::Quit => "quit",
            CoreMove::Icm(_) => "icm",
        }
    }
}

impl fmt::Display for CoreMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoreMove::Answer(answer) => write!(f, "answer({})", answer),
            CoreMove::Ask(question) => write!(f, "ask({})", question),
            CoreMove::Request(action) => write!(f, "request({})", action),
            CoreMove::Report(result) => write!(f, "report({})", result),
            CoreMove::Prereport {
                service_action,
                arguments,
                ..
            } => write!(f, "prereport({}, [{}])", service_action, join(arguments)),
            CoreMove::Icm(icm) => write!(f, "{}", icm),
            other => write!(f, "{}", other.type_name()),
        }
    }
}

/// Who realized a move, how confidently it was recognised, and from what text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Realization {
    pub speaker: Option<Speaker>,
    pub understanding_confidence: Confidence,
    pub perception_confidence: Confidence,
    pub utterance: Option<String>,
    pub ddd_name: Option<String>,
}

impl Realization {
    pub fn by(speaker: Speaker) -> Self {
        Self {
            speaker: Some(speaker),
            ..Self::default()
        }
    }
}

/// A move, optionally decorated with realization metadata.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Move {
    content: CoreMove,
    realization: Option<Realization>,
}

impl Move {
    pub fn new(content: CoreMove) -> Self {
        Self {
            content,
            realization: None,
        }
    }

    pub fn realized(content: CoreMove, realization: Realization) -> Self {
        Self {
            content,
            realization: Some(realization),
        }
    }

    pub fn answer(answer: Answer) -> Self {
        Self::new(CoreMove::Answer(answer))
    }

    pub fn ask(question: Question) -> Self {
        Self::new(CoreMove::Ask(question))
    }

    pub fn request(action: Action) -> Self {
        Self::new(CoreMove::Request(action))
    }

    pub fn icm(icm: IcmMove) -> Self {
        Self::new(CoreMove::Icm(icm))
    }

    pub fn content(&self) -> &CoreMove {
        &self.content
    }

    pub fn realization(&self) -> Option<&Realization> {
        self.realization.as_ref()
    }

    pub fn speaker(&self) -> Option<Speaker> {
        self.realization.as_ref().and_then(|realization| realization.speaker)
    }

    pub fn as_icm(&self) -> Option<&IcmMove> {
        match &self.content {
            CoreMove::Icm(icm) => Some(icm),
            _ => None,
        }
    }

    pub fn is_icm(&self) -> bool {
        self.as_icm().is_some()
    }

    /// The same move with its metadata replaced.
    pub fn with_realization(self, realization: Realization) -> Self {
        Self::realized(self.content, realization)
    }
}

impl From<CoreMove> for Move {
    fn from(content: CoreMove) -> Self {
        Move::new(content)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(realization) = &self.realization else {
            return write!(f, "{}", self.content);
        };
        let wrapper = if self.is_icm() { "ICMMove" } else { "Move" };
        write!(f, "{}({}", wrapper, self.content)?;
        if let Some(speaker) = realization.speaker {
            write!(f, ", speaker={}", speaker)?;
        }
        write!(
            f,
            ", understanding_confidence={}, perception_confidence={}",
            realization.understanding_confidence, realization.perception_confidence
        )?;
        if let Some(utterance) = &realization.utterance {
            write!(f, ", utterance={}", Quoted::single(utterance))?;
        }
        if let Some(ddd_name) = &realization.ddd_name {
            write!(f, ", ddd_name={}", Quoted::single(ddd_name))?;
        }
        write!(f, ")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::semantics::{IcmPolarity, IcmType};

    #[test]
    fn undecorated_move_unparses_core_only() {
        assert_eq!(Move::new(CoreMove::Greet).to_string(), "greet");
        assert_eq!(Move::answer(Answer::Yes).to_string(), "answer(yes)");
    }

    #[test]
    fn realized_move_unparses_metadata() {
        let realization = Realization {
            speaker: Some(Speaker::Usr),
            understanding_confidence: Confidence::try_new(0.45).unwrap(),
            perception_confidence: Confidence::CERTAIN,
            utterance: Some("hello".to_string()),
            ddd_name: Some("mockup_ddd".to_string()),
        };
        let greet = Move::realized(CoreMove::Greet, realization);
        assert_eq!(
            greet.to_string(),
            "Move(greet, speaker=USR, understanding_confidence=0.45, perception_confidence=1.0, utterance='hello', ddd_name='mockup_ddd')"
        );
    }

    #[test]
    fn realized_icm_uses_icm_wrapper() {
        let icm = IcmMove::new(IcmType::Acc).with_polarity(IcmPolarity::Pos);
        let realized = Move::icm(icm).with_realization(Realization::by(Speaker::Sys));
        assert_eq!(
            realized.to_string(),
            "ICMMove(icm:acc*pos, speaker=SYS, understanding_confidence=1.0, perception_confidence=1.0)"
        );
    }

    #[test]
    fn realization_is_part_of_equality() {
        let plain = Move::new(CoreMove::Mute);
        let realized = Move::new(CoreMove::Mute).with_realization(Realization::by(Speaker::Sys));
        assert_ne!(plain, realized);
        assert_eq!(realized.speaker(), Some(Speaker::Sys));
    }
}
