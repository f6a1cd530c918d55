//! Plan items: the instructions a plan is made of.

use std::fmt;

use crate::domain::foundation::{PlanError, Quoted, Real, Word};
use crate::domain::ontology::{Action, Predicate};
use crate::domain::semantics::{join, Condition, Goal, IcmMove, Move, Proposition, Question};

/// A question raised on behalf of a domain.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RaisedQuestion {
    pub domain_name: String,
    pub question: Question,
}

/// Bounds on how many results a query invocation asks for.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryInvocation {
    issue: Question,
    min_results: u32,
    max_results: Option<u32>,
}

impl QueryInvocation {
    /// Creates a query invocation.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError::MinResultsNotSupported`] for a negative minimum and
    /// [`PlanError::MaxResultsNotSupported`] for a maximum below 1.
    pub fn try_new(issue: Question, min_results: i64, max_results: Option<i64>) -> Result<Self, PlanError> {
        let min_results =
            u32::try_from(min_results).map_err(|_| PlanError::MinResultsNotSupported(min_results))?;
        let max_results = match max_results {
            Some(max) if max < 1 => return Err(PlanError::MaxResultsNotSupported(max)),
            Some(max) => Some(u32::try_from(max).map_err(|_| PlanError::MaxResultsNotSupported(max))?),
            None => None,
        };
        Ok(Self {
            issue,
            min_results,
            max_results,
        })
    }

    pub fn issue(&self) -> &Question {
        &self.issue
    }

    pub fn min_results(&self) -> u32 {
        self.min_results
    }

    pub fn max_results(&self) -> Option<u32> {
        self.max_results
    }
}

impl fmt::Display for QueryInvocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, min_results={}, max_results=", self.issue, self.min_results)?;
        match self.max_results {
            Some(max) => write!(f, "{}", max),
            None => write!(f, "None"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Preconfirm {
    /// Ask the user before invoking.
    Interrogative,
    /// Tell the user before invoking.
    Assertive,
}

impl Preconfirm {
    pub fn as_str(&self) -> &'static str {
        match self {
            Preconfirm::Interrogative => "interrogative",
            Preconfirm::Assertive => "assertive",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ServiceActionInvocation {
    pub ontology_name: String,
    pub service_action: String,
    pub preconfirm: Option<Preconfirm>,
    pub postconfirm: bool,
    /// Whether the enclosing plan is done once the action terminates.
    pub downdate_plan: bool,
}

impl ServiceActionInvocation {
    pub fn new(ontology_name: impl Into<String>, service_action: impl Into<String>) -> Self {
        Self {
            ontology_name: ontology_name.into(),
            service_action: service_action.into(),
            preconfirm: None,
            postconfirm: false,
            downdate_plan: true,
        }
    }
}

impl fmt::Display for ServiceActionInvocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invoke_service_action({}, {{", self.service_action)?;
        if let Some(preconfirm) = self.preconfirm {
            write!(f, "preconfirm={}, ", preconfirm.as_str())?;
        }
        write!(
            f,
            "postconfirm={}, downdate_plan={}}})",
            python_bool(self.postconfirm),
            python_bool(self.downdate_plan)
        )
    }
}

/// What a `forget` item removes: everything about a predicate, or one fact.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Forgettable {
    Predicate(Predicate),
    Proposition(Proposition),
}

impl fmt::Display for Forgettable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Forgettable::Predicate(predicate) => write!(f, "{}", predicate),
            Forgettable::Proposition(proposition) => write!(f, "{}", proposition),
        }
    }
}

/// A conditional branch inside a plan.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IfThenElse {
    condition: Condition,
    consequent: Vec<PlanItem>,
    alternative: Vec<PlanItem>,
}

impl IfThenElse {
    /// Creates a conditional; every ontology-specific item in either branch
    /// must come from the same ontology.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError::MixedOntologies`] when the branches disagree.
    pub fn try_new(
        condition: Condition,
        consequent: Vec<PlanItem>,
        alternative: Vec<PlanItem>,
    ) -> Result<Self, PlanError> {
        let mut expected: Option<String> = None;
        for item in consequent.iter().chain(alternative.iter()) {
            let Some(found) = item.ontology_name() else {
                continue;
            };
            match &expected {
                None => expected = Some(found),
                Some(name) if *name == found => {}
                Some(name) => {
                    return Err(PlanError::MixedOntologies {
                        expected: name.clone(),
                        found,
                    })
                }
            }
        }
        Ok(Self {
            condition,
            consequent,
            alternative,
        })
    }

    pub fn condition(&self) -> &Condition {
        &self.condition
    }

    pub fn consequent(&self) -> &[PlanItem] {
        &self.consequent
    }

    pub fn alternative(&self) -> &[PlanItem] {
        &self.alternative
    }

    pub(crate) fn branches_mut(&mut self) -> (&mut Vec<PlanItem>, &mut Vec<PlanItem>) {
        (&mut self.consequent, &mut self.alternative)
    }
}

impl fmt::Display for IfThenElse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "if {} then", self.condition)?;
        write_branch(f, &self.consequent)?;
        write!(f, " else")?;
        write_branch(f, &self.alternative)
    }
}

fn write_branch(f: &mut fmt::Formatter<'_>, items: &[PlanItem]) -> fmt::Result {
    match items {
        [] => Ok(()),
        [single] => write!(f, " {}", single),
        many => write!(f, " [{}]", join(many)),
    }
}

fn python_bool(value: bool) -> &'static str {
    if value {
        "True"
    } else {
        "False"
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PlanItem {
    Findout(RaisedQuestion),
    Raise(RaisedQuestion),
    Bind(Question),
    Respond(Question),
    ConsultDb(Question),
    Do(Action),
    JumpTo(Goal),
    IfThenElse(IfThenElse),
    InvokeServiceQuery(QueryInvocation),
    InvokeDomainQuery(QueryInvocation),
    InvokeServiceAction(ServiceActionInvocation),
    ServiceReport(Proposition),
    ActionReport(Proposition),
    QuestionReport(Proposition),
    Assume(Proposition),
    AssumeShared(Proposition),
    AssumeIssue { issue: Question, insist: bool },
    ForgetAll,
    Forget(Forgettable),
    ForgetShared(Forgettable),
    ForgetIssue(Question),
    EmitIcm(IcmMove),
    EmitMove(Move),
    Handle { ontology_name: String, service_action: String },
    Log { message: String },
    GetDone { action: Action, step: Option<String> },
    /// The current action was performed.
    GoalPerformed { postconfirm: bool },
    /// The current action could not be performed.
    GoalAborted { reason: String },
    EndTurn { timeout: Real },
    ResetDomainQuery(Question),
    Iterate { iterator: String },
    ChangeDdd { name: String },
    Greet,
    Mute,
    Unmute,
    Quit,
    RespondToInsult,
    RespondToThankYou,
}

impl PlanItem {
    pub fn findout(domain_name: impl Into<String>, question: Question) -> Self {
        PlanItem::Findout(RaisedQuestion {
            domain_name: domain_name.into(),
            question,
        })
    }

    pub fn raise(domain_name: impl Into<String>, question: Question) -> Self {
        PlanItem::Raise(RaisedQuestion {
            domain_name: domain_name.into(),
            question,
        })
    }

    pub fn if_then_else(
        condition: Condition,
        consequent: Vec<PlanItem>,
        alternative: Vec<PlanItem>,
    ) -> Result<Self, PlanError> {
        IfThenElse::try_new(condition, consequent, alternative).map(PlanItem::IfThenElse)
    }

    /// The type tag used in the expression notation.
    pub fn type_name(&self) -> &'static str {
        match self {
            PlanItem::Findout(_) => "findout",
            PlanItem::Raise(_) => "raise",
            PlanItem::Bind(_) => "bind",
            PlanItem::Respond(_) => "respond",
            PlanItem::ConsultDb(_) => "consultDB",
            PlanItem::Do(_) => "do",
            PlanItem::JumpTo(_) => "jumpto",
            PlanItem::IfThenElse(_) => "if_then_else",
            PlanItem::InvokeServiceQuery(_) => "invoke_service_query",
            PlanItem::InvokeDomainQuery(_) => "invoke_domain_query",
            PlanItem::InvokeServiceAction(_) => "invoke_service_action",
            PlanItem::ServiceReport(_) => "service_report",
            PlanItem::ActionReport(_) => "action_report",
            PlanItem::QuestionReport(_) => "question_report",
            PlanItem::Assume(_) => "assume",
            PlanItem::AssumeShared(_) => "assume_shared",
            PlanItem::AssumeIssue { .. } => "assume_issue",
            PlanItem::ForgetAll => "forget_all",
            PlanItem::Forget(_) => "forget",
            PlanItem::ForgetShared(_) => "forget_shared",
            PlanItem::ForgetIssue(_) => "forget_issue",
            PlanItem::EmitIcm(_) => "emit_icm",
            PlanItem::EmitMove(_) => "emit_move",
            PlanItem::Handle { .. } => "handle",
            PlanItem::Log { .. } => "log",
            PlanItem::GetDone { .. } => "get_done",
            PlanItem::GoalPerformed { .. } => "signal_action_completion",
            PlanItem::GoalAborted { .. } => "signal_action_failure",
            PlanItem::EndTurn { .. } => "end_turn",
            PlanItem::ResetDomainQuery(_) => "reset_domain_query",
            PlanItem::Iterate { .. } => "iterate",
            PlanItem::ChangeDdd { .. } => "change_ddd",
            PlanItem::Greet => "greet",
            PlanItem::Mute => "mute",
            PlanItem::Unmute => "unmute",
            PlanItem::Quit => "quit",
            PlanItem::RespondToInsult => "respond_to_insult",
            PlanItem::RespondToThankYou => "respond_to_thank_you",
        }
    }

    /// The question carried by question-typed items (`findout`, `raise`, `bind`).
    pub fn raised_question(&self) -> Option<&Question> {
        match self {
            PlanItem::Findout(raised) | PlanItem::Raise(raised) => Some(&raised.question),
            PlanItem::Bind(question) => Some(question),
            _ => None,
        }
    }

    /// The question an item is about, for every item type that has one.
    pub fn question(&self) -> Option<&Question> {
        match self {
            PlanItem::Findout(raised) | PlanItem::Raise(raised) => Some(&raised.question),
            PlanItem::Bind(question)
            | PlanItem::Respond(question)
            | PlanItem::ConsultDb(question)
            | PlanItem::ForgetIssue(question)
            | PlanItem::ResetDomainQuery(question) => Some(question),
            PlanItem::AssumeIssue { issue, .. } => Some(issue),
            PlanItem::InvokeServiceQuery(query) | PlanItem::InvokeDomainQuery(query) => Some(query.issue()),
            _ => None,
        }
    }

    /// Whether the item puts a question on the agenda.
    pub fn is_question_raising(&self) -> bool {
        match self {
            PlanItem::Findout(_) | PlanItem::Raise(_) => true,
            PlanItem::EmitIcm(icm) => icm.is_question_raising(),
            _ => false,
        }
    }

    /// Whether executing the item ends the system's turn.
    pub fn is_turn_yielding(&self) -> bool {
        match self {
            PlanItem::Respond(_) | PlanItem::Greet => true,
            PlanItem::EmitIcm(icm) => icm.is_negative_acceptance(),
            PlanItem::ServiceReport(content) | PlanItem::ActionReport(content) => content.is_service_result(),
            _ => false,
        }
    }

    /// The ontology of the item's semantic content, if any.
    pub fn ontology_name(&self) -> Option<String> {
        let name = match self {
            PlanItem::Do(action) | PlanItem::GetDone { action, .. } => Some(action.ontology_name()),
            PlanItem::JumpTo(goal) => goal.ontology_name(),
            PlanItem::IfThenElse(branching) => {
                return branching
                    .condition()
                    .ontology_name()
                    .map(str::to_string)
                    .or_else(|| {
                        branching
                            .consequent()
                            .iter()
                            .chain(branching.alternative())
                            .find_map(PlanItem::ontology_name)
                    })
            }
            PlanItem::InvokeServiceAction(invocation) => Some(invocation.ontology_name.as_str()),
            PlanItem::Handle { ontology_name, .. } => Some(ontology_name.as_str()),
            PlanItem::ServiceReport(p)
            | PlanItem::ActionReport(p)
            | PlanItem::QuestionReport(p)
            | PlanItem::Assume(p)
            | PlanItem::AssumeShared(p) => p.ontology_name(),
            PlanItem::Forget(target) | PlanItem::ForgetShared(target) => match target {
                Forgettable::Predicate(predicate) => Some(predicate.ontology_name()),
                Forgettable::Proposition(proposition) => proposition.ontology_name(),
            },
            PlanItem::EmitIcm(icm) => icm.ontology_name(),
            other => other.question().and_then(Question::ontology_name),
        };
        name.map(str::to_string)
    }
}

impl fmt::Display for PlanItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = self.type_name();
        match self {
            PlanItem::Findout(raised) | PlanItem::Raise(raised) => write!(f, "{}({})", tag, raised.question),
            PlanItem::Bind(question)
            | PlanItem::Respond(question)
            | PlanItem::ConsultDb(question)
            | PlanItem::ForgetIssue(question)
            | PlanItem::ResetDomainQuery(question) => write!(f, "{}({})", tag, question),
            PlanItem::Do(action) => write!(f, "do({})", action),
            PlanItem::JumpTo(goal) => write!(f, "jumpto({})", goal),
            PlanItem::IfThenElse(branching) => write!(f, "{}", branching),
            PlanItem::InvokeServiceQuery(query) | PlanItem::InvokeDomainQuery(query) => {
                write!(f, "{}({})", tag, query)
            }
            PlanItem::InvokeServiceAction(invocation) => write!(f, "{}", invocation),
            PlanItem::ServiceReport(p)
            | PlanItem::ActionReport(p)
            | PlanItem::QuestionReport(p)
            | PlanItem::Assume(p)
            | PlanItem::AssumeShared(p) => write!(f, "{}({})", tag, p),
            PlanItem::AssumeIssue { issue, insist } => {
                if *insist {
                    write!(f, "assume_issue({}, insist=True)", issue)
                } else {
                    write!(f, "assume_issue({})", issue)
                }
            }
            PlanItem::Forget(target) | PlanItem::ForgetShared(target) => write!(f, "{}({})", tag, target),
            PlanItem::EmitIcm(icm) => write!(f, "emit_icm({})", icm),
            PlanItem::EmitMove(mv) => write!(f, "emit_move({})", mv),
            PlanItem::Handle { service_action, .. } => write!(f, "handle({})", service_action),
            PlanItem::Log { message } => write!(f, "log({})", Quoted::double(message)),
            PlanItem::GetDone { action, step } => match step {
                Some(step) => write!(f, "get_done({}, step={})", action, Quoted::double(step)),
                None => write!(f, "get_done({})", action),
            },
            PlanItem::GoalPerformed { postconfirm } => {
                write!(f, "signal_action_completion(postconfirm={})", python_bool(*postconfirm))
            }
            PlanItem::GoalAborted { reason } => write!(f, "signal_action_failure({})", Quoted::double(reason)),
            PlanItem::EndTurn { timeout } => write!(f, "end_turn({})", timeout),
            PlanItem::Iterate { iterator } => write!(f, "iterate({})", iterator),
            PlanItem::ChangeDdd { name } => write!(f, "change_ddd({})", Word(name)),
            PlanItem::ForgetAll
            | PlanItem::Greet
            | PlanItem::Mute
            | PlanItem::Unmute
            | PlanItem::Quit
            | PlanItem::RespondToInsult
            | PlanItem::RespondToThankYou => write!(f, "{}", tag),
        }
    }
}
