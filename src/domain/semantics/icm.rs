//! Interaction Control Moves: grounding feedback such as understanding,
//! acceptance and perception.

use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{Quoted, Speaker, ValidationError};
use crate::domain::ontology::Action;

use super::{Goal, Proposition};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IcmType {
    /// Understanding.
    Und,
    /// Acceptance.
    Acc,
    /// Perception.
    Per,
    /// Semantic interpretation.
    Sem,
    Reraise,
    Resume,
    Accommodate,
    Loadplan,
}

impl IcmType {
    pub fn as_str(&self) -> &'static str {
        match self {
            IcmType::Und => "und",
            IcmType::Acc => "acc",
            IcmType::Per => "per",
            IcmType::Sem => "sem",
            IcmType::Reraise => "reraise",
            IcmType::Resume => "resume",
            IcmType::Accommodate => "accommodate",
            IcmType::Loadplan => "loadplan",
        }
    }
}

impl FromStr for IcmType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "und" => Ok(IcmType::Und),
            "acc" => Ok(IcmType::Acc),
            "per" => Ok(IcmType::Per),
            "sem" => Ok(IcmType::Sem),
            "reraise" => Ok(IcmType::Reraise),
            "resume" => Ok(IcmType::Resume),
            "accommodate" => Ok(IcmType::Accommodate),
            "loadplan" => Ok(IcmType::Loadplan),
            other => Err(ValidationError::invalid_format(
                "icm_type",
                format!("unknown ICM type '{}'", other),
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IcmPolarity {
    Pos,
    Neg,
    /// Interrogative, e.g. asking for confirmation of an understanding.
    Int,
}

impl IcmPolarity {
    pub fn as_str(&self) -> &'static str {
        match self {
            IcmPolarity::Pos => "pos",
            IcmPolarity::Neg => "neg",
            IcmPolarity::Int => "int",
        }
    }
}

impl FromStr for IcmPolarity {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pos" => Ok(IcmPolarity::Pos),
            "neg" => Ok(IcmPolarity::Neg),
            "int" => Ok(IcmPolarity::Int),
            other => Err(ValidationError::invalid_format(
                "icm_polarity",
                format!("expected pos, neg or int but got '{}'", other),
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum IcmContent {
    /// The issue under discussion; only used by `icm:acc*neg:issue`.
    Issue,
    Text(String),
    Proposition(Proposition),
    Action(Action),
    Goal(Goal),
}

impl fmt::Display for IcmContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IcmContent::Issue => write!(f, "issue"),
            IcmContent::Text(text) => write!(f, "{}", Quoted::double(text)),
            IcmContent::Proposition(proposition) => write!(f, "{}", proposition),
            IcmContent::Action(action) => write!(f, "{}", action),
            IcmContent::Goal(goal) => write!(f, "{}", goal),
        }
    }
}

/// The core of an ICM, written `icm:TYPE[*POLARITY][:[SPEAKER*]CONTENT]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IcmMove {
    icm_type: IcmType,
    polarity: Option<IcmPolarity>,
    content_speaker: Option<Speaker>,
    content: Option<IcmContent>,
}

impl IcmMove {
    pub fn new(icm_type: IcmType) -> Self {
        Self {
            icm_type,
            polarity: None,
            content_speaker: None,
            content: None,
        }
    }

    pub fn with_polarity(mut self, polarity: IcmPolarity) -> Self {
        self.polarity = Some(polarity);
        self
    }

    pub fn with_content(mut self, content: IcmContent) -> Self {
        self.content = Some(content);
        self
    }

    /// The participant whose utterance the content came from.
    pub fn with_content_speaker(mut self, speaker: Speaker) -> Self {
        self.content_speaker = Some(speaker);
        self
    }

    pub fn icm_type(&self) -> IcmType {
        self.icm_type
    }

    pub fn polarity(&self) -> Option<IcmPolarity> {
        self.polarity
    }

    pub fn content_speaker(&self) -> Option<Speaker> {
        self.content_speaker
    }

    pub fn content(&self) -> Option<&IcmContent> {
        self.content.as_ref()
    }

    /// `icm:acc*neg`: the system rejects what was said.
    pub fn is_negative_acceptance(&self) -> bool {
        self.icm_type == IcmType::Acc && self.polarity == Some(IcmPolarity::Neg)
    }

    /// Understanding feedback raises a question unless it positively confirms negative content.
    pub fn is_question_raising(&self) -> bool {
        if self.icm_type != IcmType::Und {
            return false;
        }
        let negative_content = matches!(
            &self.content,
            Some(IcmContent::Proposition(proposition)) if !proposition.is_positive()
        );
        !(self.polarity == Some(IcmPolarity::Pos) && negative_content)
    }

    pub fn ontology_name(&self) -> Option<&str> {
        match &self.content {
            Some(IcmContent::Proposition(proposition)) => proposition.ontology_name(),
            Some(IcmContent::Action(action)) => Some(action.ontology_name()),
            Some(IcmContent::Goal(goal)) => goal.ontology_name(),
            _ => None,
        }
    }
}

impl fmt::Display for IcmMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "icm:{}", self.icm_type.as_str())?;
        if let Some(polarity) = self.polarity {
            write!(f, "*{}", polarity.as_str())?;
        }
        if let Some(content) = &self.content {
            write!(f, ":")?;
            if let Some(speaker) = self.content_speaker {
                write!(f, "{}*", speaker)?;
            }
            write!(f, "{}", content)?;
        }
        Ok(())
    }
}
