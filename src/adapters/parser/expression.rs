//! Recursive-descent reader for the expression notation.
//!
//! Names resolve against the ontology in a fixed order: keywords, then
//! individuals, actions and predicates. Every call to [`Parser::parse`]
//! builds fresh values.

use tracing::{debug, trace};

use crate::config::ParserConfig;
use crate::domain::foundation::{Confidence, OntologyError, Polarity, Real, Speaker};
use crate::domain::ontology::{Action, BuiltinSort, Individual, IndividualValue, Predicate, Sort};
use crate::domain::plan::{Forgettable, PlanItem, Preconfirm, QueryInvocation, ServiceActionInvocation};
use crate::domain::semantics::{
    Answer, Condition, CoreMove, FactScope, Goal, IcmContent, IcmMove, IcmPolarity, IcmType,
    KnowledgePreconditionProposition, LambdaAbstraction, Move, PreconfirmationProposition, PredicateProposition,
    PrereportProposition, Proposition, PropositionSet, Question, Realization, RejectedPropositions, SemanticSet,
    SemanticValue, ServiceActionOutcome, ServiceActionProposition, ServiceResultProposition,
    UnderstandingProposition,
};
use crate::ports::Ontology;

use super::cursor::Cursor;
use super::deprecated::{self, DeprecatedForm, Notation};
use super::ParseError;

/// Parses expressions against one ontology on behalf of one domain.
pub struct Parser<'o> {
    ddd_name: String,
    domain_name: String,
    ontology: &'o dyn Ontology,
    max_depth: usize,
    deprecation_hints: bool,
}

impl<'o> Parser<'o> {
    pub fn new(ddd_name: impl Into<String>, ontology: &'o dyn Ontology, domain_name: impl Into<String>) -> Self {
        let defaults = ParserConfig::default();
        Self {
            ddd_name: ddd_name.into(),
            domain_name: domain_name.into(),
            ontology,
            max_depth: defaults.max_depth,
            deprecation_hints: defaults.deprecation_hints,
        }
    }

    pub fn with_config(mut self, config: &ParserConfig) -> Self {
        self.max_depth = config.max_depth;
        self.deprecation_hints = config.deprecation_hints;
        self
    }

    pub fn ddd_name(&self) -> &str {
        &self.ddd_name
    }

    pub fn domain_name(&self) -> &str {
        &self.domain_name
    }

    pub fn ontology(&self) -> &dyn Ontology {
        self.ontology
    }

    /// Parses a complete expression.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] for unknown names, sort mismatches, deprecated
    /// forms, malformed syntax and trailing input.
    pub fn parse(&self, text: &str) -> Result<SemanticValue, ParseError> {
        let mut reader = self.reader(text);
        let value = reader.expression()?;
        reader.finish()?;
        trace!(ddd = %self.ddd_name, expression = text, kind = value.kind(), "Parsed expression");
        Ok(value)
    }

    /// Parses an expression that must denote a plan item. Moves and goals
    /// that share notation with plan items (`greet`, `handle(..)`) are
    /// converted.
    pub fn parse_plan_item(&self, text: &str) -> Result<PlanItem, ParseError> {
        into_plan_item(self.parse(text)?)
    }

    pub fn parse_proposition(&self, text: &str) -> Result<Proposition, ParseError> {
        into_proposition(self.parse(text)?)
    }

    pub fn parse_question(&self, text: &str) -> Result<Question, ParseError> {
        match self.parse(text)? {
            SemanticValue::Question(question) => Ok(question),
            other => Err(ParseError::unexpected("a question", other)),
        }
    }

    pub fn parse_goal(&self, text: &str) -> Result<Goal, ParseError> {
        match self.parse(text)? {
            SemanticValue::Goal(goal) => Ok(goal),
            other => Err(ParseError::unexpected("a goal", other)),
        }
    }

    /// Parses a condition; a bare proposition becomes an `is true` condition.
    pub fn parse_condition(&self, text: &str) -> Result<Condition, ParseError> {
        match self.parse(text)? {
            SemanticValue::Condition(condition) => Ok(condition),
            other => into_proposition(other).map(Condition::is_true),
        }
    }

    pub fn parse_move(&self, text: &str) -> Result<Move, ParseError> {
        match self.parse(text)? {
            SemanticValue::Move(utterance) => Ok(utterance),
            other => Err(ParseError::unexpected("a move", other)),
        }
    }

    pub(super) fn reader<'p>(&'p self, text: &'p str) -> Reader<'p> {
        Reader {
            ontology: self.ontology,
            domain_name: &self.domain_name,
            deprecation_hints: self.deprecation_hints,
            cursor: Cursor::new(text, self.max_depth),
        }
    }
}

/// One pass over one input string.
pub(super) struct Reader<'p> {
    pub(super) ontology: &'p dyn Ontology,
    domain_name: &'p str,
    deprecation_hints: bool,
    pub(super) cursor: Cursor<'p>,
}

impl<'p> Reader<'p> {
    pub(super) fn finish(&mut self) -> Result<(), ParseError> {
        if self.cursor.at_end() {
            Ok(())
        } else {
            Err(self.cursor.error(format!("Unexpected trailing input '{}'", self.cursor.rest())))
        }
    }

    pub(super) fn expression(&mut self) -> Result<SemanticValue, ParseError> {
        self.cursor.enter()?;
        let value = self.expression_at_depth();
        self.cursor.leave();
        value
    }

    fn expression_at_depth(&mut self) -> Result<SemanticValue, ParseError> {
        self.cursor.skip_whitespace();
        match self.cursor.peek() {
            None => Err(self.cursor.error("Unexpected end of input")),
            Some('~') => {
                self.cursor.bump();
                negated(self.expression()?)
            }
            Some('?') => {
                self.cursor.bump();
                self.question_body().map(SemanticValue::Question)
            }
            Some('{') => self.set_literal(),
            Some('"' | '\'') => {
                let text = self.cursor.quoted()?;
                self.text_individual(&text).map(SemanticValue::Individual)
            }
            Some(c) if c.is_ascii_digit() || c == '-' => self.number_literal().map(SemanticValue::Individual),
            Some(c) if c.is_alphabetic() || c == '_' => self.term(),
            Some(c) => Err(self.cursor.error(format!("Unexpected character '{}'", c))),
        }
    }

    fn question_body(&mut self) -> Result<Question, ParseError> {
        match self.expression()? {
            SemanticValue::Lambda(lambda) => Ok(Question::Wh(lambda)),
            SemanticValue::Predicate(predicate) => {
                ensure_boolean(&predicate)?;
                Ok(Question::yes_no(PredicateProposition::nullary(predicate).into()))
            }
            SemanticValue::Proposition(Proposition::Set(alternatives)) => Ok(Question::alt(alternatives)),
            SemanticValue::Proposition(Proposition::KnowledgePrecondition(precondition))
                if precondition.polarity.is_positive() =>
            {
                Ok(Question::knowledge_precondition(*precondition.question))
            }
            SemanticValue::Proposition(Proposition::Predicate(proposition)) if proposition.individual().is_none() => {
                ensure_boolean(proposition.predicate())?;
                Ok(Question::yes_no(proposition.into()))
            }
            SemanticValue::Proposition(proposition) => Ok(Question::yes_no(proposition)),
            other => Err(ParseError::unexpected("a lambda abstraction or proposition after '?'", other)),
        }
    }

    fn term(&mut self) -> Result<SemanticValue, ParseError> {
        let name = self.cursor.expect_identifier()?;
        match self.cursor.peek() {
            Some('(') => {
                self.cursor.bump();
                self.functor(name)
            }
            Some('.') if self.cursor.peek_second().is_some_and(char::is_alphabetic) => {
                self.cursor.bump();
                self.lambda(name).map(SemanticValue::Lambda)
            }
            Some(':') if name == "icm" => self.icm().map(|icm| SemanticValue::Move(Move::icm(icm))),
            _ if name == "if" => self.if_then_else().map(SemanticValue::PlanItem),
            _ => self.atom(name),
        }
    }

    fn atom(&self, name: &str) -> Result<SemanticValue, ParseError> {
        let value = match name {
            "yes" => SemanticValue::Yes,
            "no" => SemanticValue::No,
            "greet" => SemanticValue::Move(Move::new(CoreMove::Greet)),
            "mute" => SemanticValue::Move(Move::new(CoreMove::Mute)),
            "unmute" => SemanticValue::Move(Move::new(CoreMove::Unmute)),
            "quit" => SemanticValue::Move(Move::new(CoreMove::Quit)),
            "forget_all" => SemanticValue::PlanItem(PlanItem::ForgetAll),
            "respond_to_insult" => SemanticValue::PlanItem(PlanItem::RespondToInsult),
            "respond_to_thank_you" => SemanticValue::PlanItem(PlanItem::RespondToThankYou),
            "signal_action_completion" => SemanticValue::PlanItem(PlanItem::GoalPerformed { postconfirm: false }),
            _ => return self.named_entity(name),
        };
        Ok(value)
    }

    fn named_entity(&self, name: &str) -> Result<SemanticValue, ParseError> {
        if let Some(individual) = self.ontology.individual(name) {
            return Ok(SemanticValue::Individual(individual));
        }
        if let Some(action) = self.ontology.action(name) {
            return Ok(SemanticValue::Action(action));
        }
        if let Some(predicate) = self.ontology.predicate(name) {
            return Ok(SemanticValue::Predicate(predicate.clone()));
        }
        Err(ParseError::unknown_term(name))
    }

    fn lambda(&mut self, variable: &str) -> Result<LambdaAbstraction, ParseError> {
        let name = self.cursor.expect_identifier()?;
        self.cursor.expect('(')?;
        let bound = self.cursor.expect_identifier()?;
        self.cursor.expect(')')?;
        if bound != variable {
            return Err(self.cursor.error(format!(
                "Expected '{}.{}({})' to bind its own variable",
                variable, name, bound
            )));
        }
        if name == "goal" {
            return Ok(LambdaAbstraction::Goal);
        }
        if let Some(predicate) = self.ontology.predicate(name) {
            return Ok(LambdaAbstraction::Predicate(predicate.clone()));
        }
        if let Some(form) = self.deprecated(Notation::Lambda, name) {
            return Err(form.error(variable));
        }
        Err(ParseError::unknown_term(name))
    }

    /// Parses the arguments of `name(` and the closing parenthesis.
    fn functor(&mut self, name: &'p str) -> Result<SemanticValue, ParseError> {
        let ontology_name = self.ontology.name().to_string();
        let value = match deprecated::canonical_functor(name) {
            "goal" => SemanticValue::Proposition(Proposition::goal(self.goal_argument()?)),
            "perform" => SemanticValue::Goal(Goal::perform(self.action_argument()?)),
            "resolve" => SemanticValue::Goal(Goal::resolve(self.question_argument()?)),
            "resolve_user" => SemanticValue::Goal(Goal::resolve_user(self.question_argument()?)),
            "handle" => SemanticValue::Goal(Goal::handle(ontology_name, self.cursor.expect_identifier()?)),
            "resolved" => SemanticValue::Proposition(Proposition::Resolvedness(self.question_argument()?)),
            "preconfirmed" => {
                let (service_action, arguments) = self.service_action_with_arguments()?;
                SemanticValue::Proposition(Proposition::Preconfirmation(PreconfirmationProposition {
                    ontology_name,
                    service_action,
                    arguments,
                    polarity: Polarity::Positive,
                }))
            }
            "prereported" => {
                let (service_action, arguments) = self.service_action_with_arguments()?;
                SemanticValue::Proposition(Proposition::Prereport(PrereportProposition {
                    ontology_name,
                    service_action,
                    arguments,
                    polarity: Polarity::Positive,
                }))
            }
            "service_action_started" => {
                let service_action = self.cursor.expect_identifier()?;
                SemanticValue::Proposition(Proposition::ServiceActionStarted(ServiceActionProposition::new(
                    ontology_name,
                    service_action,
                )))
            }
            "service_action_terminated" => {
                let service_action = self.cursor.expect_identifier()?;
                SemanticValue::Proposition(Proposition::ServiceActionTerminated(ServiceActionProposition::new(
                    ontology_name,
                    service_action,
                )))
            }
            "rejected" => SemanticValue::Proposition(self.rejected()?),
            "und" => SemanticValue::Proposition(self.understanding()?),
            "know_answer" => {
                let question = self.question_argument()?;
                SemanticValue::Proposition(Proposition::KnowledgePrecondition(KnowledgePreconditionProposition {
                    question: Box::new(question),
                    polarity: Polarity::Positive,
                }))
            }
            "set" => SemanticValue::Proposition(Proposition::Set(PropositionSet::new(self.proposition_list()?))),
            "ServiceResultProposition" => {
                SemanticValue::Proposition(Proposition::ServiceResult(self.service_result(ontology_name)?))
            }
            "SuccessfulServiceAction" => SemanticValue::ServiceOutcome(ServiceActionOutcome::Successful),
            "FailedServiceAction" => SemanticValue::ServiceOutcome(ServiceActionOutcome::failed(self.text_argument()?)),
            "datetime" => {
                let raw = self.cursor.raw_until_close()?;
                SemanticValue::Individual(self.builtin_individual(IndividualValue::DateTime(raw.to_string()), BuiltinSort::DateTime)?)
            }
            "person_name" => {
                let raw = self.cursor.raw_until_close()?;
                SemanticValue::Individual(
                    self.builtin_individual(IndividualValue::PersonName(raw.to_string()), BuiltinSort::PersonName)?,
                )
            }
            "answer" => SemanticValue::Move(Move::answer(self.answer_argument()?)),
            "ask" => SemanticValue::Move(Move::ask(self.question_argument()?)),
            "request" => SemanticValue::Move(Move::request(self.action_argument()?)),
            "report" => SemanticValue::Move(Move::new(CoreMove::Report(self.service_result_argument()?))),
            "prereport" => {
                let (service_action, arguments) = self.service_action_with_arguments()?;
                SemanticValue::Move(Move::new(CoreMove::Prereport {
                    ontology_name,
                    service_action,
                    arguments,
                }))
            }
            "Move" => SemanticValue::Move(self.decorated_move(false)?),
            "ICMMove" => SemanticValue::Move(self.decorated_move(true)?),
            "findout" => {
                let question = self.raised_question_argument(name)?;
                SemanticValue::PlanItem(PlanItem::findout(self.domain_name, question))
            }
            "raise" => {
                let question = self.raised_question_argument(name)?;
                SemanticValue::PlanItem(PlanItem::raise(self.domain_name, question))
            }
            "bind" => SemanticValue::PlanItem(PlanItem::Bind(self.raised_question_argument(name)?)),
            "respond" => SemanticValue::PlanItem(PlanItem::Respond(self.question_argument()?)),
            "consultDB" => SemanticValue::PlanItem(PlanItem::ConsultDb(self.question_argument()?)),
            "forget_issue" => SemanticValue::PlanItem(PlanItem::ForgetIssue(self.question_argument()?)),
            "reset_domain_query" => SemanticValue::PlanItem(PlanItem::ResetDomainQuery(self.question_argument()?)),
            "do" => SemanticValue::PlanItem(PlanItem::Do(self.action_argument()?)),
            "jumpto" => SemanticValue::PlanItem(PlanItem::JumpTo(self.goal_argument()?)),
            "invoke_service_query" => SemanticValue::PlanItem(PlanItem::InvokeServiceQuery(self.query_invocation()?)),
            "invoke_domain_query" => SemanticValue::PlanItem(PlanItem::InvokeDomainQuery(self.query_invocation()?)),
            "invoke_service_action" => {
                SemanticValue::PlanItem(PlanItem::InvokeServiceAction(self.service_action_invocation(ontology_name)?))
            }
            "service_report" => SemanticValue::PlanItem(PlanItem::ServiceReport(self.proposition_argument()?)),
            "action_report" => SemanticValue::PlanItem(PlanItem::ActionReport(self.proposition_argument()?)),
            "question_report" => SemanticValue::PlanItem(PlanItem::QuestionReport(self.proposition_argument()?)),
            "assume" => SemanticValue::PlanItem(PlanItem::Assume(self.proposition_argument()?)),
            "assume_shared" => SemanticValue::PlanItem(PlanItem::AssumeShared(self.proposition_argument()?)),
            "assume_issue" => {
                let issue = self.question_argument()?;
                let mut insist = false;
                self.keyword_arguments(|reader, key| match key {
                    "insist" => {
                        insist = reader.boolean()?;
                        Ok(())
                    }
                    other => Err(ParseError::UnknownParameter(other.to_string())),
                })?;
                SemanticValue::PlanItem(PlanItem::AssumeIssue { issue, insist })
            }
            "forget" => SemanticValue::PlanItem(PlanItem::Forget(self.forgettable()?)),
            "forget_shared" => SemanticValue::PlanItem(PlanItem::ForgetShared(self.forgettable()?)),
            "emit_icm" => SemanticValue::PlanItem(PlanItem::EmitIcm(self.icm_argument()?)),
            "emit_move" => SemanticValue::PlanItem(PlanItem::EmitMove(self.move_argument()?)),
            "log" => SemanticValue::PlanItem(PlanItem::Log {
                message: self.text_argument()?,
            }),
            "get_done" => {
                let action = self.action_argument()?;
                let mut step = None;
                self.keyword_arguments(|reader, key| match key {
                    "step" => {
                        step = Some(reader.text_argument()?);
                        Ok(())
                    }
                    other => Err(ParseError::UnknownParameter(other.to_string())),
                })?;
                SemanticValue::PlanItem(PlanItem::GetDone { action, step })
            }
            "signal_action_completion" => {
                let postconfirm = if self.cursor.eat_keyword("postconfirm") {
                    self.cursor.expect('=')?;
                    self.boolean()?
                } else {
                    false
                };
                SemanticValue::PlanItem(PlanItem::GoalPerformed { postconfirm })
            }
            "signal_action_failure" => SemanticValue::PlanItem(PlanItem::GoalAborted {
                reason: self.text_argument()?,
            }),
            "end_turn" => SemanticValue::PlanItem(PlanItem::EndTurn {
                timeout: Real::new(self.float()?),
            }),
            "iterate" => SemanticValue::PlanItem(PlanItem::Iterate {
                iterator: self.cursor.expect_identifier()?.to_string(),
            }),
            "change_ddd" => SemanticValue::PlanItem(PlanItem::ChangeDdd {
                name: self.text_argument()?,
            }),
            "has_value" | "has_shared_value" | "has_private_value" | "has_shared_or_private_value" => {
                SemanticValue::Condition(Condition::HasValue {
                    predicate: self.predicate_argument()?,
                    scope: fact_scope(name),
                })
            }
            "is_shared_commitment" | "is_private_belief" | "is_private_belief_or_shared_commitment" => {
                SemanticValue::Condition(Condition::IsTrue {
                    proposition: self.proposition_argument()?,
                    scope: fact_scope(name),
                })
            }
            "query_has_more_items" => SemanticValue::Condition(Condition::QueryHasMoreItems(self.question_argument()?)),
            _ => return self.application(name),
        };
        self.cursor.expect(')')?;
        Ok(value)
    }

    /// `predicate(individual)` or a deprecated functor.
    fn application(&mut self, name: &str) -> Result<SemanticValue, ParseError> {
        if let Some(predicate) = self.ontology.predicate(name) {
            let proposition = self.predicate_proposition(predicate.clone())?;
            self.cursor.expect(')')?;
            return Ok(SemanticValue::Proposition(Proposition::Predicate(proposition)));
        }
        if let Some(form) = self.deprecated(Notation::Functor, name) {
            let argument = self.cursor.raw_until_close()?;
            return Err(form.error(argument));
        }
        Err(ParseError::unknown_term(name))
    }

    fn predicate_proposition(&mut self, predicate: Predicate) -> Result<PredicateProposition, ParseError> {
        self.cursor.skip_whitespace();
        if self.cursor.peek() == Some(')') {
            return Ok(PredicateProposition::nullary(predicate));
        }
        if let Some(individual) = self.new_dynamic_individual(predicate.sort())? {
            return Ok(PredicateProposition::positive(predicate, individual)?);
        }
        let individual = match self.expression()? {
            SemanticValue::Individual(individual) => individual,
            other => {
                return Err(ParseError::unexpected(
                    format!("an individual of sort {}", predicate.sort()),
                    other,
                ))
            }
        };
        let individual = coerce_to_sort(individual, predicate.sort());
        Ok(PredicateProposition::positive(predicate, individual)?)
    }

    /// An undeclared bare name is a new individual when the sort is a
    /// dynamic custom sort.
    fn new_dynamic_individual(&mut self, sort: &Sort) -> Result<Option<Individual>, ParseError> {
        if sort.is_builtin() || !sort.is_dynamic() {
            return Ok(None);
        }
        let before = self.cursor.position();
        if let Some(name) = self.cursor.identifier() {
            if !self.ontology.has_individual(name) && self.cursor.peek_is(')') {
                let individual = self
                    .ontology
                    .create_individual(IndividualValue::Symbol(name.to_string()), sort)?;
                return Ok(Some(individual));
            }
        }
        self.cursor.restore(before);
        Ok(None)
    }

    fn number_literal(&mut self) -> Result<Individual, ParseError> {
        let text = self
            .cursor
            .number()
            .ok_or_else(|| self.cursor.error("Expected a number"))?;
        if text.contains(|c: char| matches!(c, '.' | 'e' | 'E')) {
            let value: f64 = text
                .parse()
                .map_err(|_| self.cursor.error(format!("Invalid number '{}'", text)))?;
            self.builtin_individual(IndividualValue::Real(Real::new(value)), BuiltinSort::Real)
        } else {
            let value: i64 = text
                .parse()
                .map_err(|_| self.cursor.error(format!("Invalid number '{}'", text)))?;
            self.builtin_individual(IndividualValue::Integer(value), BuiltinSort::Integer)
        }
    }

    fn text_individual(&self, text: &str) -> Result<Individual, ParseError> {
        self.builtin_individual(IndividualValue::Text(text.to_string()), BuiltinSort::String)
    }

    fn builtin_individual(&self, value: IndividualValue, sort: BuiltinSort) -> Result<Individual, ParseError> {
        Ok(self.ontology.create_individual(value, &Sort::builtin(sort))?)
    }

    fn set_literal(&mut self) -> Result<SemanticValue, ParseError> {
        self.cursor.expect('{')?;
        let mut set = SemanticSet::new();
        if self.cursor.eat('}') {
            return Ok(SemanticValue::Set(set));
        }
        loop {
            set.add(self.expression()?);
            if !self.cursor.eat(',') {
                break;
            }
        }
        self.cursor.expect('}')?;
        Ok(SemanticValue::Set(set))
    }

    /// `[item, ...]`, possibly empty.
    pub(super) fn list<T>(
        &mut self,
        mut item: impl FnMut(&mut Self) -> Result<T, ParseError>,
    ) -> Result<Vec<T>, ParseError> {
        self.cursor.expect('[')?;
        let mut items = Vec::new();
        if self.cursor.eat(']') {
            return Ok(items);
        }
        loop {
            items.push(item(self)?);
            if !self.cursor.eat(',') {
                break;
            }
        }
        self.cursor.expect(']')?;
        Ok(items)
    }

    /// Trailing `, key=value` pairs before a closing parenthesis.
    fn keyword_arguments(
        &mut self,
        mut assign: impl FnMut(&mut Self, &'p str) -> Result<(), ParseError>,
    ) -> Result<(), ParseError> {
        while self.cursor.eat(',') {
            let key = self.cursor.expect_identifier()?;
            self.cursor.expect('=')?;
            assign(self, key)?;
        }
        Ok(())
    }

    pub(super) fn question_argument(&mut self) -> Result<Question, ParseError> {
        match self.expression()? {
            SemanticValue::Question(question) => Ok(question),
            other => Err(ParseError::unexpected("a question", other)),
        }
    }

    fn raised_question_argument(&mut self, item: &str) -> Result<Question, ParseError> {
        match self.expression()? {
            SemanticValue::Question(question) => Ok(question),
            other => Err(ParseError::unexpected(format!("a question in '{}'", item), other)),
        }
    }

    fn proposition_argument(&mut self) -> Result<Proposition, ParseError> {
        into_proposition(self.expression()?)
    }

    fn proposition_list(&mut self) -> Result<Vec<Proposition>, ParseError> {
        self.list(|reader| reader.proposition_argument())
    }

    fn goal_argument(&mut self) -> Result<Goal, ParseError> {
        match self.expression()? {
            SemanticValue::Goal(goal) => Ok(goal),
            other => Err(ParseError::unexpected("a goal", other)),
        }
    }

    pub(super) fn action_argument(&mut self) -> Result<Action, ParseError> {
        let name = self.cursor.expect_identifier()?;
        self.ontology
            .action(name)
            .ok_or_else(|| OntologyError::UnknownAction(name.to_string()).into())
    }

    pub(super) fn predicate_argument(&mut self) -> Result<Predicate, ParseError> {
        let name = self.cursor.expect_identifier()?;
        self.ontology
            .predicate(name)
            .cloned()
            .ok_or_else(|| OntologyError::UnknownPredicate(name.to_string()).into())
    }

    /// A quoted string or a bare name.
    pub(super) fn text_argument(&mut self) -> Result<String, ParseError> {
        if self.cursor.peek_is_quote() {
            self.cursor.quoted()
        } else {
            Ok(self.cursor.expect_identifier()?.to_string())
        }
    }

    pub(super) fn boolean(&mut self) -> Result<bool, ParseError> {
        match self.cursor.expect_identifier()? {
            "True" | "true" => Ok(true),
            "False" | "false" => Ok(false),
            other => Err(ParseError::unexpected("True or False", other)),
        }
    }

    fn float(&mut self) -> Result<f64, ParseError> {
        self.cursor.skip_whitespace();
        let text = self
            .cursor
            .number()
            .ok_or_else(|| self.cursor.error("Expected a number"))?;
        text.parse()
            .map_err(|_| self.cursor.error(format!("Invalid number '{}'", text)))
    }

    pub(super) fn integer(&mut self) -> Result<i64, ParseError> {
        self.cursor.skip_whitespace();
        let text = self
            .cursor
            .number()
            .ok_or_else(|| self.cursor.error("Expected an integer"))?;
        text.parse()
            .map_err(|_| self.cursor.error(format!("Expected an integer but got '{}'", text)))
    }

    fn service_action_with_arguments(&mut self) -> Result<(String, Vec<Proposition>), ParseError> {
        let service_action = self.cursor.expect_identifier()?.to_string();
        self.cursor.expect(',')?;
        let arguments = self.proposition_list()?;
        Ok((service_action, arguments))
    }

    fn service_result(&mut self, ontology_name: String) -> Result<ServiceResultProposition, ParseError> {
        let (service_action, arguments) = self.service_action_with_arguments()?;
        self.cursor.expect(',')?;
        let outcome = match self.expression()? {
            SemanticValue::ServiceOutcome(outcome) => outcome,
            other => return Err(ParseError::unexpected("a service action outcome", other)),
        };
        Ok(ServiceResultProposition {
            ontology_name,
            service_action,
            arguments,
            outcome,
        })
    }

    fn service_result_argument(&mut self) -> Result<ServiceResultProposition, ParseError> {
        match self.expression()? {
            SemanticValue::Proposition(Proposition::ServiceResult(result)) => Ok(result),
            other => Err(ParseError::unexpected("a service result proposition", other)),
        }
    }

    fn rejected(&mut self) -> Result<Proposition, ParseError> {
        let rejected = match self.expression()? {
            SemanticValue::Proposition(Proposition::Set(set)) => set,
            other => return Err(ParseError::unexpected("a set of propositions", other)),
        };
        let reason = if self.cursor.eat(',') {
            Some(self.text_argument()?)
        } else {
            None
        };
        Ok(Proposition::Rejected(RejectedPropositions {
            rejected,
            reason,
            polarity: Polarity::Positive,
        }))
    }

    fn understanding(&mut self) -> Result<Proposition, ParseError> {
        let speaker = self.optional_speaker()?;
        self.cursor.expect(',')?;
        let content = self.proposition_argument()?;
        Ok(Proposition::Understanding(UnderstandingProposition {
            speaker,
            content: Box::new(content),
            polarity: Polarity::Positive,
        }))
    }

    fn optional_speaker(&mut self) -> Result<Option<Speaker>, ParseError> {
        match self.cursor.expect_identifier()? {
            "None" => Ok(None),
            word => Ok(Some(word.parse::<Speaker>()?)),
        }
    }

    fn answer_argument(&mut self) -> Result<Answer, ParseError> {
        match self.expression()? {
            SemanticValue::Proposition(proposition) => Ok(Answer::Proposition(proposition)),
            SemanticValue::Individual(individual) => Ok(Answer::Individual(individual)),
            SemanticValue::Yes => Ok(Answer::Yes),
            SemanticValue::No => Ok(Answer::No),
            other => Err(ParseError::unexpected("a proposition, individual, yes or no", other)),
        }
    }

    fn move_argument(&mut self) -> Result<Move, ParseError> {
        match self.expression()? {
            SemanticValue::Move(utterance) => Ok(utterance),
            other => Err(ParseError::unexpected("a move", other)),
        }
    }

    fn icm_argument(&mut self) -> Result<IcmMove, ParseError> {
        let utterance = self.move_argument()?;
        utterance
            .as_icm()
            .cloned()
            .ok_or_else(|| ParseError::unexpected("an ICM", &utterance))
    }

    /// `Move(core, key=value, ...)` and `ICMMove(icm, key=value, ...)`.
    fn decorated_move(&mut self, icm_only: bool) -> Result<Move, ParseError> {
        let core = self.move_argument()?;
        if icm_only && !core.is_icm() {
            return Err(ParseError::unexpected("an ICM", core));
        }
        let mut realization: Option<Realization> = None;
        self.keyword_arguments(|reader, key| {
            let entry = realization.get_or_insert_with(Realization::default);
            match key {
                "speaker" => entry.speaker = reader.optional_speaker()?,
                "understanding_confidence" => entry.understanding_confidence = Confidence::try_new(reader.float()?)?,
                "perception_confidence" => entry.perception_confidence = Confidence::try_new(reader.float()?)?,
                "utterance" => entry.utterance = Some(reader.cursor.quoted()?),
                "ddd_name" => entry.ddd_name = Some(reader.text_argument()?),
                other => return Err(ParseError::UnknownParameter(other.to_string())),
            }
            Ok(())
        })?;
        Ok(match realization {
            Some(realization) => core.with_realization(realization),
            None => core,
        })
    }

    fn forgettable(&mut self) -> Result<Forgettable, ParseError> {
        match self.expression()? {
            SemanticValue::Predicate(predicate) => Ok(Forgettable::Predicate(predicate)),
            other => into_proposition(other).map(Forgettable::Proposition),
        }
    }

    fn query_invocation(&mut self) -> Result<QueryInvocation, ParseError> {
        let issue = self.question_argument()?;
        let mut min_results = 1;
        let mut max_results = Some(1);
        self.keyword_arguments(|reader, key| {
            match key {
                "min_results" => min_results = reader.integer()?,
                "max_results" => {
                    max_results = if reader.cursor.eat_keyword("None") {
                        None
                    } else {
                        Some(reader.integer()?)
                    }
                }
                other => return Err(ParseError::UnknownParameter(other.to_string())),
            }
            Ok(())
        })?;
        Ok(QueryInvocation::try_new(issue, min_results, max_results)?)
    }

    fn service_action_invocation(&mut self, ontology_name: String) -> Result<ServiceActionInvocation, ParseError> {
        let service_action = self.cursor.expect_identifier()?;
        let mut invocation = ServiceActionInvocation::new(ontology_name, service_action);
        if !self.cursor.eat(',') {
            return Ok(invocation);
        }
        self.cursor.expect('{')?;
        if self.cursor.eat('}') {
            return Ok(invocation);
        }
        loop {
            let key = self.cursor.expect_identifier()?;
            self.cursor.expect('=')?;
            match key {
                "preconfirm" => {
                    invocation.preconfirm = match self.cursor.expect_identifier()? {
                        "interrogative" => Some(Preconfirm::Interrogative),
                        "assertive" => Some(Preconfirm::Assertive),
                        "None" => None,
                        other => return Err(ParseError::unexpected("interrogative or assertive", other)),
                    }
                }
                "postconfirm" => invocation.postconfirm = self.boolean()?,
                "downdate_plan" => invocation.downdate_plan = self.boolean()?,
                other => return Err(ParseError::UnknownParameter(other.to_string())),
            }
            if !self.cursor.eat(',') {
                break;
            }
        }
        self.cursor.expect('}')?;
        Ok(invocation)
    }

    /// `icm:TYPE[*POLARITY][:[SPEAKER*]CONTENT]`, written without spaces.
    fn icm(&mut self) -> Result<IcmMove, ParseError> {
        self.cursor.bump();
        let type_name = self
            .cursor
            .identifier()
            .ok_or_else(|| self.cursor.error("Expected an ICM type"))?;
        let mut icm = IcmMove::new(type_name.parse::<IcmType>()?);
        if self.cursor.eat_raw('*') {
            let polarity = self
                .cursor
                .identifier()
                .ok_or_else(|| self.cursor.error("Expected an ICM polarity"))?;
            icm = icm.with_polarity(polarity.parse::<IcmPolarity>()?);
        }
        if self.cursor.eat_raw(':') {
            let before = self.cursor.position();
            if let Some(word) = self.cursor.identifier() {
                if self.cursor.eat_raw('*') {
                    icm = icm.with_content_speaker(word.parse::<Speaker>()?);
                } else {
                    self.cursor.restore(before);
                }
            }
            let content = self.icm_content(&icm)?;
            icm = icm.with_content(content);
        }
        Ok(icm)
    }

    fn icm_content(&mut self, icm: &IcmMove) -> Result<IcmContent, ParseError> {
        if self.cursor.peek_is_quote() {
            return Ok(IcmContent::Text(self.cursor.quoted()?));
        }
        if self.cursor.peek_bare_word("issue") {
            self.cursor.identifier();
            return if icm.is_negative_acceptance() {
                Ok(IcmContent::Issue)
            } else {
                Err(self.cursor.error("Only 'icm:acc*neg' takes 'issue' as content"))
            };
        }
        match self.expression()? {
            SemanticValue::Proposition(proposition) => Ok(IcmContent::Proposition(proposition)),
            SemanticValue::Action(action) => Ok(IcmContent::Action(action)),
            SemanticValue::Goal(goal) => Ok(IcmContent::Goal(goal)),
            other => Err(ParseError::unexpected("ICM content", other)),
        }
    }

    /// `if CONDITION then BRANCH else BRANCH`; either branch may be empty.
    fn if_then_else(&mut self) -> Result<PlanItem, ParseError> {
        let condition = match self.expression()? {
            SemanticValue::Condition(condition) => condition,
            other => Condition::is_true(into_proposition(other)?),
        };
        if !self.cursor.eat_keyword("then") {
            return Err(self.cursor.error("Expected 'then'"));
        }
        let consequent = if self.cursor.peek_keyword("else") {
            Vec::new()
        } else {
            self.branch()?
        };
        if !self.cursor.eat_keyword("else") {
            return Err(self.cursor.error("Expected 'else'"));
        }
        self.cursor.skip_whitespace();
        let alternative = match self.cursor.peek() {
            None | Some(',' | ']' | ')') => Vec::new(),
            _ => self.branch()?,
        };
        Ok(PlanItem::if_then_else(condition, consequent, alternative)?)
    }

    fn branch(&mut self) -> Result<Vec<PlanItem>, ParseError> {
        self.cursor.skip_whitespace();
        if self.cursor.peek() == Some('[') {
            self.list(|reader| into_plan_item(reader.expression()?))
        } else {
            Ok(vec![into_plan_item(self.expression()?)?])
        }
    }

    fn deprecated(&self, notation: Notation, name: &str) -> Option<&'static DeprecatedForm> {
        if !self.deprecation_hints {
            return None;
        }
        let form = deprecated::lookup(notation, name)?;
        debug!(name, kind = form.kind, "Rejected deprecated notation");
        Some(form)
    }
}

fn negated(value: SemanticValue) -> Result<SemanticValue, ParseError> {
    match value {
        SemanticValue::Proposition(proposition) => Ok(SemanticValue::Proposition(proposition.negate())),
        SemanticValue::Individual(individual) => Ok(SemanticValue::Individual(individual.negate())),
        other => Err(ParseError::unexpected("a proposition or individual after '~'", other)),
    }
}

fn ensure_boolean(predicate: &Predicate) -> Result<(), ParseError> {
    if predicate.sort().is_boolean_sort() {
        Ok(())
    } else {
        Err(ParseError::NonBooleanYesNoQuestion {
            predicate: predicate.name().to_string(),
            sort: predicate.sort().name().to_string(),
        })
    }
}

/// Integer literals are accepted where a real is expected.
fn coerce_to_sort(individual: Individual, sort: &Sort) -> Individual {
    match individual.value() {
        IndividualValue::Integer(value) if sort.is_real_sort() => {
            let coerced = Individual::new(
                individual.ontology_name(),
                IndividualValue::Real(Real::new(*value as f64)),
                sort.clone(),
            );
            if individual.is_positive() {
                coerced
            } else {
                coerced.negate()
            }
        }
        _ => individual,
    }
}

fn fact_scope(functor: &str) -> FactScope {
    match functor {
        "has_shared_value" | "is_shared_commitment" => FactScope::Shared,
        "has_private_value" | "is_private_belief" => FactScope::Private,
        "has_shared_or_private_value" | "is_private_belief_or_shared_commitment" => FactScope::SharedOrPrivate,
        _ => FactScope::Any,
    }
}

pub(super) fn into_proposition(value: SemanticValue) -> Result<Proposition, ParseError> {
    match value {
        SemanticValue::Proposition(proposition) => Ok(proposition),
        SemanticValue::Move(utterance) => {
            let proposition = match (utterance.realization(), utterance.content()) {
                (None, CoreMove::Mute) => Some(Proposition::Mute),
                (None, CoreMove::Unmute) => Some(Proposition::Unmute),
                (None, CoreMove::Quit) => Some(Proposition::Quit),
                _ => None,
            };
            proposition.ok_or_else(|| ParseError::unexpected("a proposition", &utterance))
        }
        other => Err(ParseError::unexpected("a proposition", other)),
    }
}

pub(super) fn into_plan_item(value: SemanticValue) -> Result<PlanItem, ParseError> {
    match value {
        SemanticValue::PlanItem(item) => Ok(item),
        SemanticValue::Move(utterance) => {
            let item = match (utterance.realization(), utterance.content()) {
                (None, CoreMove::Greet) => Some(PlanItem::Greet),
                (None, CoreMove::Mute) => Some(PlanItem::Mute),
                (None, CoreMove::Unmute) => Some(PlanItem::Unmute),
                (None, CoreMove::Quit) => Some(PlanItem::Quit),
                _ => None,
            };
            item.ok_or_else(|| ParseError::unexpected("a plan item", &utterance))
        }
        SemanticValue::Goal(Goal::Handle {
            ontology_name,
            service_action,
        }) => Ok(PlanItem::Handle {
            ontology_name,
            service_action,
        }),
        other => Err(ParseError::unexpected("a plan item", other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ontology::InMemoryOntology;

    fn ontology() -> InMemoryOntology {
        InMemoryOntology::builder("mockup_ontology")
            .sort("city")
            .predicate("dest_city", "city")
            .predicate("dept_city", "city")
            .predicate("price", "real")
            .predicate("number_of_passengers", "integer")
            .predicate("number_to_call", "string")
            .predicate("need_visa", "boolean")
            .predicate("selected_person", "person_name")
            .predicate("selected_datetime", "datetime")
            .individual("paris", "city")
            .individual("london", "city")
            .action("buy")
            .build()
            .unwrap()
    }

    fn parse(text: &str) -> Result<SemanticValue, ParseError> {
        let ontology = ontology();
        Parser::new("mockup_ddd", &ontology, "mockup_domain").parse(text)
    }

    fn unparsed(text: &str) -> String {
        parse(text).unwrap().to_string()
    }

    #[test]
    fn individual_and_negated_individual() {
        let SemanticValue::Individual(paris) = parse("paris").unwrap() else {
            panic!("expected an individual");
        };
        assert!(paris.is_positive());
        assert_eq!(paris.sort().name(), "city");

        let SemanticValue::Individual(not_paris) = parse("~paris").unwrap() else {
            panic!("expected an individual");
        };
        assert_eq!(not_paris, paris.negate());
    }

    #[test]
    fn predicate_propositions_with_and_without_argument() {
        assert_eq!(unparsed("dest_city(paris)"), "dest_city(paris)");
        assert_eq!(unparsed("~dest_city(paris)"), "~dest_city(paris)");
        assert_eq!(unparsed("need_visa()"), "need_visa()");
        assert_eq!(unparsed("~need_visa()"), "~need_visa()");
    }

    #[test]
    fn sort_mismatch_is_an_ontology_error() {
        let err = parse("dest_city(1234)").unwrap_err();
        assert!(matches!(err, ParseError::Ontology(OntologyError::SortMismatch { .. })));
    }

    #[test]
    fn integer_literal_becomes_real_for_real_predicate() {
        let proposition = match parse("price(1234)").unwrap() {
            SemanticValue::Proposition(Proposition::Predicate(proposition)) => proposition,
            other => panic!("unexpected {}", other),
        };
        let individual = proposition.individual().unwrap();
        assert_eq!(individual.value(), &IndividualValue::Real(Real::new(1234.0)));
        assert!(individual.sort().is_real_sort());
    }

    #[test]
    fn builtin_literals() {
        let SemanticValue::Individual(text) = parse("\"123\"").unwrap() else {
            panic!("expected an individual");
        };
        assert_eq!(text.value(), &IndividualValue::Text("123".to_string()));
        assert!(text.sort().is_string_sort());

        let SemanticValue::Individual(when) = parse("datetime(2018-04-11T22:00:00.000Z)").unwrap() else {
            panic!("expected an individual");
        };
        assert!(when.sort().is_datetime_sort());

        let SemanticValue::Individual(name) = parse("person_name(John)").unwrap() else {
            panic!("expected an individual");
        };
        assert_eq!(name.value(), &IndividualValue::PersonName("John".to_string()));
    }

    #[test]
    fn malformed_datetime_is_rejected() {
        let err = parse("datetime(yesterday)").unwrap_err();
        assert!(matches!(err, ParseError::Ontology(OntologyError::InvalidValue { .. })));
    }

    #[test]
    fn questions_of_each_kind() {
        assert!(parse("?X.dest_city(X)").unwrap().as_question().unwrap().is_wh_question());
        assert!(parse("?need_visa()").unwrap().as_question().unwrap().is_yes_no_question());
        assert!(parse("?need_visa").unwrap().as_question().unwrap().is_yes_no_question());
        assert!(parse("?dest_city(paris)").unwrap().as_question().unwrap().is_yes_no_question());
        assert!(parse("?set([dest_city(paris), dest_city(london)])")
            .unwrap()
            .as_question()
            .unwrap()
            .is_alt_question());
        assert!(parse("?know_answer(?X.dest_city(X))")
            .unwrap()
            .as_question()
            .unwrap()
            .is_knowledge_precondition_question());
        assert!(parse("?und(USR, dest_city(paris))")
            .unwrap()
            .as_question()
            .unwrap()
            .is_understanding_question());
    }

    #[test]
    fn yes_no_question_needs_boolean_predicate() {
        let err = parse("?dest_city").unwrap_err();
        assert_eq!(
            err,
            ParseError::NonBooleanYesNoQuestion {
                predicate: "dest_city".to_string(),
                sort: "city".to_string(),
            }
        );
    }

    #[test]
    fn goals() {
        assert_eq!(unparsed("perform(top)"), "perform(top)");
        assert_eq!(unparsed("resolve(?X.price(X))"), "resolve(?X.price(X))");
        let SemanticValue::Goal(goal) = parse("resolve_user(?X.dest_city(X))").unwrap() else {
            panic!("expected a goal");
        };
        assert!(matches!(goal, Goal::Resolve { speaker: Speaker::Usr, .. }));
        assert_eq!(
            parse("handle(ReservationConfirmed)").unwrap(),
            SemanticValue::Goal(Goal::handle("mockup_ontology", "ReservationConfirmed"))
        );
    }

    #[test]
    fn resolve_requires_a_question() {
        assert!(parse("resolve(dest_city(paris))").is_err());
        assert!(matches!(
            parse("perform(fly)"),
            Err(ParseError::Ontology(OntologyError::UnknownAction(_)))
        ));
    }

    #[test]
    fn goal_propositions_and_lambda_goal() {
        assert_eq!(unparsed("goal(perform(buy))"), "goal(perform(buy))");
        assert_eq!(unparsed("~goal(perform(buy))"), "~goal(perform(buy))");
        assert_eq!(parse("X.goal(X)").unwrap(), SemanticValue::Lambda(LambdaAbstraction::Goal));
        assert!(parse("?X.goal(X)").unwrap().as_question().unwrap().is_wh_question());
    }

    #[test]
    fn lambda_must_bind_its_own_variable() {
        assert!(matches!(parse("?X.dest_city(Y)"), Err(ParseError::Syntax { .. })));
    }

    #[test]
    fn knowledge_precondition_propositions() {
        let positive = parse("know_answer(?X.dest_city(X))").unwrap();
        let negative = parse("~know_answer(?X.dest_city(X))").unwrap();
        assert_eq!(
            negative.as_proposition().unwrap(),
            &positive.as_proposition().unwrap().negate()
        );
    }

    #[test]
    fn service_propositions() {
        let SemanticValue::Proposition(Proposition::Preconfirmation(preconfirmation)) =
            parse("preconfirmed(MakeReservation, [dest_city(paris)])").unwrap()
        else {
            panic!("expected a preconfirmation");
        };
        assert_eq!(preconfirmation.service_action, "MakeReservation");
        assert_eq!(preconfirmation.arguments.len(), 1);
        assert!(parse("?preconfirmed(MakeReservation, [])").unwrap().as_question().is_some());
        assert!(!parse("~prereported(MakeReservation, [])")
            .unwrap()
            .as_proposition()
            .unwrap()
            .is_positive());
        assert_eq!(
            parse("service_action_started(SomeServiceAction)").unwrap(),
            SemanticValue::Proposition(Proposition::ServiceActionStarted(ServiceActionProposition::new(
                "mockup_ontology",
                "SomeServiceAction"
            )))
        );
    }

    #[test]
    fn rejected_propositions_with_optional_reason() {
        let SemanticValue::Proposition(Proposition::Rejected(rejected)) =
            parse("rejected(set([dest_city(paris)]), some_reason)").unwrap()
        else {
            panic!("expected rejected propositions");
        };
        assert_eq!(rejected.reason.as_deref(), Some("some_reason"));
        let SemanticValue::Proposition(Proposition::Rejected(rejected)) =
            parse("rejected(set([dest_city(paris)]))").unwrap()
        else {
            panic!("expected rejected propositions");
        };
        assert_eq!(rejected.reason, None);
    }

    #[test]
    fn understanding_with_and_without_speaker() {
        let SemanticValue::Proposition(Proposition::Understanding(und)) =
            parse("und(USR, dest_city(paris))").unwrap()
        else {
            panic!("expected an understanding proposition");
        };
        assert_eq!(und.speaker, Some(Speaker::Usr));
        let SemanticValue::Proposition(Proposition::Understanding(und)) =
            parse("und(None, dest_city(paris))").unwrap()
        else {
            panic!("expected an understanding proposition");
        };
        assert_eq!(und.speaker, None);
        assert!(!parse("~und(USR, dest_city(paris))")
            .unwrap()
            .as_proposition()
            .unwrap()
            .is_positive());
    }

    #[test]
    fn answer_moves() {
        let answer = parse("answer(yes)").unwrap();
        assert_eq!(answer, SemanticValue::Move(Move::answer(Answer::Yes)));
        assert_eq!(parse("no").unwrap(), SemanticValue::No);
        assert_eq!(unparsed("answer(paris)"), "answer(paris)");
        assert_eq!(unparsed("answer(dest_city(paris))"), "answer(dest_city(paris))");
        assert!(parse("answer(\"a string\")").unwrap().as_move().is_some());
        assert!(parse("answer(1234.0)").unwrap().as_move().is_some());
    }

    #[test]
    fn decorated_move_metadata() {
        let SemanticValue::Move(answer) = parse(
            "Move(answer(dest_city(paris)), speaker=USR, understanding_confidence=0.45, utterance='paris')",
        )
        .unwrap() else {
            panic!("expected a move");
        };
        let realization = answer.realization().unwrap();
        assert_eq!(realization.speaker, Some(Speaker::Usr));
        assert_eq!(realization.understanding_confidence.value(), 0.45);
        assert_eq!(realization.perception_confidence, Confidence::CERTAIN);
        assert_eq!(realization.utterance.as_deref(), Some("paris"));
    }

    #[test]
    fn undecorated_move_wrapper_is_transparent() {
        assert_eq!(parse("Move(greet)").unwrap(), parse("greet").unwrap());
    }

    #[test]
    fn unknown_move_parameter_is_rejected() {
        assert_eq!(
            parse("Move(greet, loudness=3)").unwrap_err(),
            ParseError::UnknownParameter("loudness".to_string())
        );
    }

    #[test]
    fn report_and_prereport_moves() {
        let SemanticValue::Move(report) = parse(
            "report(ServiceResultProposition(MakeReservation, [dest_city(paris)], FailedServiceAction(no_itinerary)))",
        )
        .unwrap() else {
            panic!("expected a move");
        };
        let CoreMove::Report(result) = report.content() else {
            panic!("expected a report");
        };
        assert_eq!(result.outcome, ServiceActionOutcome::failed("no_itinerary"));
        assert!(parse("prereport(MakeReservation, [])").unwrap().as_move().is_some());
        assert_eq!(
            parse("SuccessfulServiceAction()").unwrap(),
            SemanticValue::ServiceOutcome(ServiceActionOutcome::Successful)
        );
    }

    #[test]
    fn icm_moves() {
        let SemanticValue::Move(utterance) = parse("icm:und*int:USR*dest_city(paris)").unwrap() else {
            panic!("expected a move");
        };
        let icm = utterance.as_icm().unwrap();
        assert_eq!(icm.icm_type(), IcmType::Und);
        assert_eq!(icm.polarity(), Some(IcmPolarity::Int));
        assert_eq!(icm.content_speaker(), Some(Speaker::Usr));
        assert_eq!(icm.content().unwrap().to_string(), "dest_city(paris)");

        assert_eq!(unparsed("icm:acc*neg:issue"), "icm:acc*neg:issue");
        assert_eq!(unparsed("icm:per*pos:\"a string\""), "icm:per*pos:\"a string\"");
        assert_eq!(unparsed("icm:reraise:top"), "icm:reraise:top");
        assert_eq!(unparsed("icm:resume:perform(buy)"), "icm:resume:perform(buy)");
        assert_eq!(unparsed("icm:loadplan"), "icm:loadplan");
    }

    #[test]
    fn icm_rejects_lowercase_speaker_and_misplaced_issue() {
        assert!(parse("icm:und*int:usr*dest_city(paris)").is_err());
        assert!(parse("icm:acc*pos:issue").is_err());
        assert!(matches!(parse("icm:acc*neg:unsupported"), Err(ParseError::UnknownTerm { .. })));
    }

    #[test]
    fn realized_icm_move() {
        let SemanticValue::Move(utterance) =
            parse("ICMMove(icm:acc*pos, speaker=SYS, understanding_confidence=1.0)").unwrap()
        else {
            panic!("expected a move");
        };
        assert_eq!(utterance.speaker(), Some(Speaker::Sys));
        assert!(utterance.is_icm());
        assert!(parse("ICMMove(greet)").is_err());
    }

    #[test]
    fn question_raising_plan_items() {
        let SemanticValue::PlanItem(PlanItem::Findout(findout)) = parse("findout(?X.dest_city(X))").unwrap() else {
            panic!("expected findout");
        };
        assert_eq!(findout.domain_name, "mockup_domain");
        assert!(matches!(parse("raise(?X.dest_city(X))").unwrap(), SemanticValue::PlanItem(PlanItem::Raise(_))));
        assert!(matches!(parse("bind(?X.dest_city(X))").unwrap(), SemanticValue::PlanItem(PlanItem::Bind(_))));
        assert!(parse("findout(dest_city)").is_err());
        assert!(parse("raise(dest_city(paris))").is_err());
    }

    #[test]
    fn query_invocation_bounds() {
        let SemanticValue::PlanItem(PlanItem::InvokeServiceQuery(query)) =
            parse("invoke_service_query(?X.price(X))").unwrap()
        else {
            panic!("expected a service query");
        };
        assert_eq!((query.min_results(), query.max_results()), (1, Some(1)));

        let SemanticValue::PlanItem(PlanItem::InvokeDomainQuery(query)) =
            parse("invoke_domain_query(?X.price(X), min_results=0, max_results=None)").unwrap()
        else {
            panic!("expected a domain query");
        };
        assert_eq!((query.min_results(), query.max_results()), (0, None));

        assert!(matches!(
            parse("invoke_service_query(?X.price(X), min_results=-1)"),
            Err(ParseError::Plan(_))
        ));
    }

    #[test]
    fn dev_query_alias() {
        assert_eq!(
            parse("dev_query(?X.price(X))").unwrap(),
            parse("invoke_service_query(?X.price(X))").unwrap()
        );
    }

    #[test]
    fn service_action_invocation_options() {
        let SemanticValue::PlanItem(PlanItem::InvokeServiceAction(invocation)) = parse(
            "invoke_service_action(MakeReservation, {postconfirm=True, preconfirm=assertive, downdate_plan=False})",
        )
        .unwrap() else {
            panic!("expected a service action");
        };
        assert!(invocation.postconfirm);
        assert_eq!(invocation.preconfirm, Some(Preconfirm::Assertive));
        assert!(!invocation.downdate_plan);

        let SemanticValue::PlanItem(PlanItem::InvokeServiceAction(invocation)) =
            parse("dev_perform(MakeReservation)").unwrap()
        else {
            panic!("expected a service action");
        };
        assert!(invocation.downdate_plan);
        assert_eq!(invocation.preconfirm, None);
    }

    #[test]
    fn if_then_else_with_empty_branches() {
        let SemanticValue::PlanItem(PlanItem::IfThenElse(item)) =
            parse("if dest_city(paris) then findout(?X.price(X)) else").unwrap()
        else {
            panic!("expected if-then-else");
        };
        assert_eq!(item.consequent().len(), 1);
        assert!(item.alternative().is_empty());

        let SemanticValue::PlanItem(PlanItem::IfThenElse(item)) =
            parse("if has_shared_value(dest_city) then else [forget(dest_city), forget_all]").unwrap()
        else {
            panic!("expected if-then-else");
        };
        assert!(item.consequent().is_empty());
        assert_eq!(item.alternative().len(), 2);
    }

    #[test]
    fn simple_plan_items() {
        assert!(matches!(parse("do(buy)").unwrap(), SemanticValue::PlanItem(PlanItem::Do(_))));
        assert!(matches!(parse("jumpto(perform(buy))").unwrap(), SemanticValue::PlanItem(PlanItem::JumpTo(_))));
        assert!(matches!(parse("assume_shared(dest_city(paris))").unwrap(), SemanticValue::PlanItem(PlanItem::AssumeShared(_))));
        assert_eq!(
            parse("log(\"message\")").unwrap(),
            SemanticValue::PlanItem(PlanItem::Log {
                message: "message".to_string()
            })
        );
        assert!(matches!(
            parse("assume_issue(?X.dest_city(X), insist=True)").unwrap(),
            SemanticValue::PlanItem(PlanItem::AssumeIssue { insist: true, .. })
        ));
        assert!(matches!(
            parse("signal_action_completion(postconfirm=True)").unwrap(),
            SemanticValue::PlanItem(PlanItem::GoalPerformed { postconfirm: true })
        ));
        assert!(matches!(
            parse("get_done(buy, step=confirm)").unwrap(),
            SemanticValue::PlanItem(PlanItem::GetDone { step: Some(_), .. })
        ));
        assert!(matches!(parse("emit_icm(icm:per*neg)").unwrap(), SemanticValue::PlanItem(PlanItem::EmitIcm(_))));
        assert!(parse("emit_icm(greet)").is_err());
    }

    #[test]
    fn plan_item_reading_of_moves_and_handle_goals() {
        let ontology = ontology();
        let parser = Parser::new("mockup_ddd", &ontology, "mockup_domain");
        assert_eq!(parser.parse_plan_item("greet").unwrap(), PlanItem::Greet);
        assert_eq!(parser.parse_plan_item("quit").unwrap(), PlanItem::Quit);
        assert_eq!(
            parser.parse_plan_item("handle(ReservationConfirmed)").unwrap(),
            PlanItem::Handle {
                ontology_name: "mockup_ontology".to_string(),
                service_action: "ReservationConfirmed".to_string(),
            }
        );
        assert!(parser.parse_plan_item("perform(buy)").is_err());
        assert_eq!(parser.parse_proposition("mute").unwrap(), Proposition::Mute);
    }

    #[test]
    fn conditions() {
        let ontology = ontology();
        let parser = Parser::new("mockup_ddd", &ontology, "mockup_domain");
        assert_eq!(
            parser.parse_condition("has_private_value(dest_city)").unwrap().scope(),
            Some(FactScope::Private)
        );
        assert_eq!(
            parser.parse_condition("is_shared_commitment(dest_city(paris))").unwrap().scope(),
            Some(FactScope::Shared)
        );
        assert_eq!(
            parser.parse_condition("dest_city(paris)").unwrap(),
            Condition::is_true(parser.parse_proposition("dest_city(paris)").unwrap())
        );
        assert!(matches!(
            parser.parse_condition("query_has_more_items(?X.price(X))").unwrap(),
            Condition::QueryHasMoreItems(_)
        ));
    }

    #[test]
    fn sets() {
        assert_eq!(parse("{}").unwrap(), SemanticValue::Set(SemanticSet::new()));
        assert_eq!(parse("{paris, london}").unwrap(), parse("{london, paris}").unwrap());
        assert_eq!(
            parse("set([dest_city(paris), dest_city(london)])").unwrap(),
            parse("set([dest_city(london), dest_city(paris)])").unwrap()
        );
    }

    #[test]
    fn parse_returns_fresh_values() {
        let SemanticValue::Set(mut first) = parse("{}").unwrap() else {
            panic!("expected a set");
        };
        first.add(SemanticValue::Yes);
        assert_eq!(parse("{}").unwrap(), SemanticValue::Set(SemanticSet::new()));
    }

    #[test]
    fn deprecated_forms_suggest_replacements() {
        assert_eq!(
            parse("?X.action(X)").unwrap_err().to_string(),
            "'?X.action(X)' is not a valid question. Perhaps you mean '?X.goal(X)'."
        );
        assert_eq!(
            parse("set([action(make_domestic_reservation), action(make_international_reservation)])")
                .unwrap_err()
                .to_string(),
            "'action(make_domestic_reservation)' is not a valid proposition. Perhaps you mean 'goal(perform(make_domestic_reservation))'."
        );
        assert_eq!(
            parse("set([issue(?X.price(X))])").unwrap_err().to_string(),
            "'issue(?X.price(X))' is not a valid proposition. Perhaps you mean 'goal(resolve(?X.price(X)))'."
        );
    }

    #[test]
    fn deprecation_hints_can_be_disabled() {
        let ontology = ontology();
        let config = ParserConfig {
            deprecation_hints: false,
            ..ParserConfig::default()
        };
        let parser = Parser::new("mockup_ddd", &ontology, "mockup_domain").with_config(&config);
        assert_eq!(
            parser.parse("?X.action(X)").unwrap_err(),
            ParseError::UnknownTerm {
                term: "action".to_string()
            }
        );
    }

    #[test]
    fn nesting_depth_is_bounded() {
        let ontology = ontology();
        let config = ParserConfig {
            max_depth: 4,
            ..ParserConfig::default()
        };
        let parser = Parser::new("mockup_ddd", &ontology, "mockup_domain").with_config(&config);
        assert!(parser.parse("goal(perform(buy))").is_ok());
        assert_eq!(
            parser.parse("~~~~~dest_city(paris)").unwrap_err(),
            ParseError::TooDeep(4)
        );
    }

    #[test]
    fn unknown_terms_and_trailing_input() {
        assert_eq!(
            parse("unknown_term").unwrap_err(),
            ParseError::UnknownTerm {
                term: "unknown_term".to_string()
            }
        );
        assert!(matches!(parse("paris london"), Err(ParseError::Syntax { .. })));
        assert!(matches!(parse(""), Err(ParseError::Syntax { .. })));
    }

    #[test]
    fn predicate_and_action_names() {
        assert!(matches!(parse("dest_city").unwrap(), SemanticValue::Predicate(_)));
        assert!(matches!(parse("buy").unwrap(), SemanticValue::Action(_)));
    }
}
