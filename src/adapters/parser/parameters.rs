//! The `{key=value, ...}` notation for question and goal parameters.

use tracing::trace;

use crate::domain::ddd::{AskFeature, GraphicalType, Parameters, QuestionSource, SortOrder};
use crate::domain::foundation::OntologyError;
use crate::domain::semantics::{Proposition, SemanticValue};

use super::expression::{Parser, Reader};
use super::ParseError;

impl Parser<'_> {
    /// Parses a parameter block. Unknown keys are rejected.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::UnknownParameter`] for an unrecognised key and
    /// other parse errors for malformed values.
    pub fn parse_parameters(&self, text: &str) -> Result<Parameters, ParseError> {
        let mut reader = self.reader(text);
        let parameters = reader.parameters()?;
        reader.finish()?;
        trace!(ddd = %self.ddd_name(), parameters = text, "Parsed parameters");
        Ok(parameters)
    }
}

impl<'p> Reader<'p> {
    fn parameters(&mut self) -> Result<Parameters, ParseError> {
        let mut parameters = Parameters::default();
        self.cursor.expect('{')?;
        if self.cursor.eat('}') {
            return Ok(parameters);
        }
        loop {
            let key = self.cursor.expect_identifier()?;
            self.cursor.expect('=')?;
            self.parameter(key, &mut parameters)?;
            if !self.cursor.eat(',') {
                break;
            }
        }
        self.cursor.expect('}')?;
        Ok(parameters)
    }

    fn parameter(&mut self, key: &str, parameters: &mut Parameters) -> Result<(), ParseError> {
        match key {
            "graphical_type" => {
                parameters.graphical_type = Some(match self.cursor.expect_identifier()? {
                    "list" => GraphicalType::List,
                    "text" => GraphicalType::Text,
                    other => return Err(ParseError::unexpected("list or text", other)),
                })
            }
            "source" => {
                parameters.source = Some(match self.cursor.expect_identifier()? {
                    "service" => QuestionSource::Service,
                    "domain" => QuestionSource::Domain,
                    other => return Err(ParseError::unexpected("service or domain", other)),
                })
            }
            "sort_order" => {
                parameters.sort_order = Some(match self.cursor.expect_identifier()? {
                    "alphabetic" => SortOrder::Alphabetic,
                    other => return Err(ParseError::unexpected("alphabetic", other)),
                })
            }
            "incremental" => parameters.incremental = Some(self.boolean()?),
            "verbalize" => parameters.verbalize = Some(self.boolean()?),
            "allow_goal_accommodation" => parameters.allow_goal_accommodation = Some(self.boolean()?),
            "alts" => {
                parameters.alts = Some(match self.expression()? {
                    SemanticValue::Proposition(Proposition::Set(alternatives)) => alternatives,
                    other => return Err(ParseError::unexpected("a set of propositions", other)),
                })
            }
            "service_query" => parameters.service_query = Some(self.question_argument()?),
            "device" => parameters.device = Some(self.text_argument()?),
            "format" => parameters.format = Some(self.text_argument()?),
            "max_spoken_alts" => {
                let value = self.integer()?;
                let value = u32::try_from(value).map_err(|_| ParseError::unexpected("a non-negative integer", value))?;
                parameters.max_spoken_alts = Some(value);
            }
            "background" => parameters.background = self.list(|reader| reader.predicate_argument())?,
            "related_information" => parameters.related_information = self.list(|reader| reader.question_argument())?,
            "label_questions" => parameters.label_questions = self.list(|reader| reader.question_argument())?,
            "ask_features" => parameters.ask_features = self.list(|reader| reader.ask_feature())?,
            "on_zero_hits_action" => parameters.on_zero_hits_action = Some(self.action_argument()?),
            "on_too_many_hits_action" => parameters.on_too_many_hits_action = Some(self.action_argument()?),
            other => return Err(ParseError::UnknownParameter(other.to_string())),
        }
        Ok(())
    }

    /// `predicate` or `kpq(predicate)`.
    fn ask_feature(&mut self) -> Result<AskFeature, ParseError> {
        let name = self.cursor.expect_identifier()?;
        let (name, kpq) = if name == "kpq" && self.cursor.eat('(') {
            let inner = self.cursor.expect_identifier()?;
            self.cursor.expect(')')?;
            (inner, true)
        } else {
            (name, false)
        };
        if !self.ontology.has_predicate(name) {
            return Err(OntologyError::UnknownPredicate(name.to_string()).into());
        }
        Ok(if kpq {
            AskFeature::with_kpq(name)
        } else {
            AskFeature::new(name)
        })
    }
}
