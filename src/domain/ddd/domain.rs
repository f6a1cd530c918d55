//! Domain - Goals, their plans, and the question relations derived from them.
//!
//! A domain is built once from a plan table and then only queried. Every
//! query is a pure function of the table and the ontology it was built with.

use indexmap::IndexMap;
use std::collections::{HashMap, HashSet, VecDeque};
use std::fmt;
use std::sync::Arc;

use crate::domain::foundation::{DomainModelError, PlanError};
use crate::domain::ontology::{Action, Predicate};
use crate::domain::plan::{Plan, PlanItem};
use crate::domain::semantics::{
    Condition, Goal, PredicateProposition, Proposition, PropositionSet, Question, ServiceActionProposition,
};
use crate::ports::Ontology;

use super::parameters::{AskFeature, GraphicalType, Parameters, QuestionSource, SortOrder};

/// When a goal is preferred over others during accommodation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Preferred {
    #[default]
    Never,
    Always,
    /// Preferred while the condition holds.
    When(Condition),
}

/// One row of the plan table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanEntry {
    goal: Goal,
    plan: Plan,
    preferred: Preferred,
    postconds: Vec<Condition>,
    postplan: Vec<PlanItem>,
    superactions: Vec<Action>,
    unrestricted_accommodation: bool,
}

impl PlanEntry {
    pub fn new(goal: Goal, plan: Plan) -> Self {
        Self {
            goal,
            plan,
            preferred: Preferred::Never,
            postconds: Vec::new(),
            postplan: Vec::new(),
            superactions: Vec::new(),
            unrestricted_accommodation: false,
        }
    }

    pub fn with_preference(mut self, preferred: Preferred) -> Self {
        self.preferred = preferred;
        self
    }

    pub fn with_postconds(mut self, postconds: Vec<Condition>) -> Self {
        self.postconds = postconds;
        self
    }

    pub fn with_postplan(mut self, postplan: Vec<PlanItem>) -> Self {
        self.postplan = postplan;
        self
    }

    pub fn with_superactions(mut self, superactions: Vec<Action>) -> Self {
        self.superactions = superactions;
        self
    }

    pub fn with_unrestricted_accommodation(mut self, allowed: bool) -> Self {
        self.unrestricted_accommodation = allowed;
        self
    }

    pub fn goal(&self) -> &Goal {
        &self.goal
    }

    pub fn plan(&self) -> &Plan {
        &self.plan
    }

    pub fn preference(&self) -> &Preferred {
        &self.preferred
    }

    pub fn postconds(&self) -> &[Condition] {
        &self.postconds
    }

    pub fn postplan(&self) -> &[PlanItem] {
        &self.postplan
    }

    pub fn superactions(&self) -> &[Action] {
        &self.superactions
    }

    pub fn allows_unrestricted_accommodation(&self) -> bool {
        self.unrestricted_accommodation
    }
}

/// Collects the plan table and per-question declarations of a domain.
pub struct DomainBuilder {
    ddd_name: String,
    name: String,
    ontology: Arc<dyn Ontology>,
    entries: Vec<PlanEntry>,
    default_questions: Vec<Question>,
    dependencies: IndexMap<Question, Vec<Question>>,
    question_parameters: HashMap<Question, Parameters>,
    goal_parameters: HashMap<Goal, Parameters>,
}

impl DomainBuilder {
    pub fn plan(mut self, entry: PlanEntry) -> Self {
        self.entries.push(entry);
        self
    }

    pub fn default_question(mut self, question: Question) -> Self {
        self.default_questions.push(question);
        self
    }

    /// Declares that `question` depends on each of `depends_on`.
    pub fn dependency(mut self, question: Question, depends_on: Vec<Question>) -> Self {
        self.dependencies.entry(question).or_default().extend(depends_on);
        self
    }

    pub fn question_parameters(mut self, question: Question, parameters: Parameters) -> Self {
        self.question_parameters.insert(question, parameters);
        self
    }

    pub fn goal_parameters(mut self, goal: Goal, parameters: Parameters) -> Self {
        self.goal_parameters.insert(goal, parameters);
        self
    }

    /// Builds the domain, adding empty plans for `perform(top)` and
    /// `perform(up)` unless declared.
    ///
    /// # Errors
    ///
    /// - [`DomainModelError::InvalidPlans`] when a goal has more than one plan
    /// - [`DomainModelError::Plan`] when a plan mixes ontologies
    pub fn build(self) -> Result<Domain, DomainModelError> {
        let mut plans: IndexMap<Goal, PlanEntry> = IndexMap::with_capacity(self.entries.len() + 2);
        for entry in self.entries {
            if plans.contains_key(&entry.goal) {
                tracing::warn!(domain = %self.name, goal = %entry.goal, "Duplicate plan for goal");
                return Err(DomainModelError::InvalidPlans {
                    goal: entry.goal.to_string(),
                });
            }
            if let Err(err) = entry.plan.ontology_name() {
                if err != PlanError::no_semantic_content() {
                    return Err(err.into());
                }
            }
            plans.insert(entry.goal.clone(), entry);
        }

        for action in [Action::top(self.ontology.name()), Action::up(self.ontology.name())] {
            let goal = Goal::perform(action);
            if !plans.contains_key(&goal) {
                plans.insert(goal.clone(), PlanEntry::new(goal, Plan::empty()));
            }
        }

        tracing::debug!(
            ddd = %self.ddd_name,
            domain = %self.name,
            goals = plans.len(),
            "Built domain"
        );

        Ok(Domain {
            ddd_name: self.ddd_name,
            name: self.name,
            ontology: self.ontology,
            plans,
            default_questions: self.default_questions,
            dependencies: self.dependencies,
            question_parameters: self.question_parameters,
            goal_parameters: self.goal_parameters,
        })
    }
}

/// An immutable table from goals to plans, with the queries the dialogue
/// manager asks of it.
#[derive(Clone)]
pub struct Domain {
    ddd_name: String,
    name: String,
    ontology: Arc<dyn Ontology>,
    plans: IndexMap<Goal, PlanEntry>,
    default_questions: Vec<Question>,
    dependencies: IndexMap<Question, Vec<Question>>,
    question_parameters: HashMap<Question, Parameters>,
    goal_parameters: HashMap<Goal, Parameters>,
}

impl Domain {
    pub fn builder(ddd_name: impl Into<String>, name: impl Into<String>, ontology: Arc<dyn Ontology>) -> DomainBuilder {
        DomainBuilder {
            ddd_name: ddd_name.into(),
            name: name.into(),
            ontology,
            entries: Vec::new(),
            default_questions: Vec::new(),
            dependencies: IndexMap::new(),
            question_parameters: HashMap::new(),
            goal_parameters: HashMap::new(),
        }
    }

    pub fn ddd_name(&self) -> &str {
        &self.ddd_name
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ontology(&self) -> &dyn Ontology {
        self.ontology.as_ref()
    }

    pub fn default_questions(&self) -> &[Question] {
        &self.default_questions
    }

    // === Goals and plans ===

    pub fn get_plan(&self, goal: &Goal) -> Option<&Plan> {
        self.plans.get(goal).map(PlanEntry::plan)
    }

    pub fn has_goal(&self, goal: &Goal) -> bool {
        self.plans.contains_key(goal)
    }

    pub fn plan_entries(&self) -> impl Iterator<Item = &PlanEntry> {
        self.plans.values()
    }

    pub fn get_all_goals(&self) -> HashSet<&Goal> {
        self.plans.keys().collect()
    }

    /// Declared goals in declaration order, followed by the implicit
    /// `perform(top)` and `perform(up)` when they were not declared.
    pub fn get_all_goals_in_defined_order(&self) -> Vec<&Goal> {
        self.plans.keys().collect()
    }

    pub fn goal_is_preferred(&self, goal: &Goal) -> bool {
        self.plans
            .get(goal)
            .is_some_and(|entry| entry.preferred == Preferred::Always)
    }

    /// Whether the goal's preference condition holds given `facts`.
    pub fn goal_is_conditionally_preferred(&self, goal: &Goal, facts: &[Proposition]) -> bool {
        match self.plans.get(goal).map(PlanEntry::preference) {
            Some(Preferred::When(condition)) => condition.is_true_given(facts),
            _ => false,
        }
    }

    pub fn is_silently_accommodatable(&self, goal: &Goal) -> bool {
        self.plans
            .get(goal)
            .is_some_and(PlanEntry::allows_unrestricted_accommodation)
    }

    /// Whether the goal may be accommodated without an ICM to the user:
    /// either its plan allows unrestricted accommodation or its parameters
    /// set `allow_goal_accommodation`.
    pub fn goal_allows_accommodation_without_feedback(&self, goal: &Goal) -> bool {
        self.is_silently_accommodatable(goal)
            || self
                .goal_parameters
                .get(goal)
                .and_then(|parameters| parameters.allow_goal_accommodation)
                .unwrap_or(false)
    }

    /// Conditions under which the goal counts as done: declared
    /// postconditions, then one per downdating service action invocation.
    pub fn get_downdate_conditions(&self, goal: &Goal) -> Vec<Condition> {
        let Some(entry) = self.plans.get(goal) else {
            return Vec::new();
        };
        let implicit = entry.plan.iter().filter_map(|item| match item {
            PlanItem::InvokeServiceAction(invocation) if invocation.downdate_plan => {
                Some(Condition::is_true(Proposition::ServiceActionTerminated(
                    ServiceActionProposition::new(&invocation.ontology_name, &invocation.service_action),
                )))
            }
            _ => None,
        });
        entry.postconds.iter().cloned().chain(implicit).collect()
    }

    pub fn get_postplan(&self, goal: &Goal) -> &[PlanItem] {
        self.plans.get(goal).map(PlanEntry::postplan).unwrap_or(&[])
    }

    pub fn get_superactions(&self, goal: &Goal) -> &[Action] {
        self.plans.get(goal).map(PlanEntry::superactions).unwrap_or(&[])
    }

    /// Names of actions the user is asked to carry out (`get_done` items).
    pub fn get_names_of_user_targeted_actions(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for entry in self.plans.values() {
            for item in entry.plan.iter() {
                if let PlanItem::GetDone { action, .. } = item {
                    if !names.contains(&action.name()) {
                        names.push(action.name());
                    }
                }
            }
        }
        names
    }

    // === Question relations ===

    pub fn is_default_question(&self, question: &Question) -> bool {
        self.default_questions.contains(question)
    }

    /// Whether resolving `dependent` depends on first resolving `question`.
    ///
    /// Holds when `dependent` is the issue of a resolve goal whose plan raises
    /// `question`, when declared explicitly, when `question` asks about a
    /// feature of `dependent`'s predicate, or when `question` follows from
    /// `dependent`'s `ask_features`.
    pub fn is_depending_on(&self, dependent: &Question, question: &Question) -> bool {
        self.plans.values().any(|entry| {
            entry.goal.issue() == Some(dependent) && entry.plan.raised_questions().any(|raised| raised == question)
        }) || self
            .dependencies
            .get(dependent)
            .is_some_and(|declared| declared.contains(question))
            || self.feature_questions(dependent).contains(question)
    }

    /// The issue of the first resolve goal whose plan raises `question`.
    pub fn get_dependent_question(&self, question: &Question) -> Option<&Question> {
        self.plans.values().find_map(|entry| {
            let issue = entry.goal.issue()?;
            entry
                .plan
                .raised_questions()
                .any(|raised| raised == question)
                .then_some(issue)
        })
    }

    /// Whether `subgoal` is offered, directly or transitively, as an
    /// alternative of a question raised in `supergoal`'s plan. A goal never
    /// dominates itself.
    pub fn dominates(&self, supergoal: &Goal, subgoal: &Goal) -> bool {
        if supergoal == subgoal {
            return false;
        }
        let mut visited = HashSet::new();
        self.dominates_via(supergoal, subgoal, &mut visited)
    }

    fn dominates_via<'a>(&'a self, supergoal: &Goal, subgoal: &Goal, visited: &mut HashSet<&'a Goal>) -> bool {
        let Some((goal, entry)) = self.plans.get_key_value(supergoal) else {
            return false;
        };
        if !visited.insert(goal) {
            return false;
        }
        for item in entry.plan.iter() {
            let question = match item {
                PlanItem::Findout(raised) | PlanItem::Raise(raised) => &raised.question,
                _ => continue,
            };
            for candidate in self.goals_offered_by(question) {
                if candidate == *subgoal || self.dominates_via(&candidate, subgoal, visited) {
                    return true;
                }
            }
        }
        false
    }

    /// Goals reachable from a raised question: the goal alternatives of an
    /// alternative question, or the resolve goal of a planned issue.
    fn goals_offered_by(&self, question: &Question) -> Vec<Goal> {
        match question.alternatives() {
            Some(alternatives) => alternatives.iter().filter_map(Proposition::as_goal).cloned().collect(),
            None => self
                .plans
                .keys()
                .filter(|goal| goal.issue() == Some(question))
                .cloned()
                .collect(),
        }
    }

    /// Every question raised in `plan`, followed by the questions reachable
    /// from them through features and `ask_features`, each yielded once.
    pub fn get_questions_in_plan(&self, plan: &Plan) -> QuestionsInPlan<'_> {
        QuestionsInPlan {
            domain: self,
            pending: plan.raised_questions().cloned().collect(),
            seen: HashSet::new(),
        }
    }

    /// Questions of every plan and post-plan, each yielded once.
    pub fn get_plan_questions(&self) -> Vec<Question> {
        let mut questions: Vec<Question> = Vec::new();
        for entry in self.plans.values() {
            let postplan = Plan::new(entry.postplan.clone());
            for question in self
                .get_questions_in_plan(&entry.plan)
                .chain(self.get_questions_in_plan(&postplan))
            {
                if !questions.contains(&question) {
                    questions.push(question);
                }
            }
        }
        questions
    }

    /// Questions asked alongside `question`: one per ontology feature of its
    /// predicate, then one per declared ask feature (preceded by its
    /// knowledge precondition question when `kpq` is set).
    fn feature_questions(&self, question: &Question) -> Vec<Question> {
        let mut questions: Vec<Question> = Vec::new();
        if let Some(predicate) = question.predicate() {
            questions.extend(
                self.ontology
                    .features_of(predicate.name())
                    .into_iter()
                    .map(|feature| Question::wh(feature.clone())),
            );
        }
        for feature in self.get_ask_features(question) {
            let Some(predicate) = self.ontology.predicate(&feature.predicate_name) else {
                continue;
            };
            let feature_question = Question::wh(predicate.clone());
            if feature.kpq {
                questions.push(Question::knowledge_precondition(feature_question.clone()));
            }
            questions.push(feature_question);
        }
        questions
    }

    /// For a WH question over a sort with declared individuals, one
    /// proposition per individual, in declaration order.
    pub fn get_resolving_answers(&self, question: &Question) -> Vec<Proposition> {
        let Some(predicate) = question.predicate().filter(|_| question.is_wh_question()) else {
            return Vec::new();
        };
        self.ontology
            .individuals_of_sort(predicate.sort())
            .into_iter()
            .filter_map(|individual| PredicateProposition::positive(predicate.clone(), individual).ok())
            .map(Proposition::from)
            .collect()
    }

    // === Parameters ===

    pub fn question_parameters(&self, question: &Question) -> Option<&Parameters> {
        self.question_parameters.get(question)
    }

    pub fn goal_parameters(&self, goal: &Goal) -> Option<&Parameters> {
        self.goal_parameters.get(goal)
    }

    pub fn get_verbalize(&self, question: &Question) -> bool {
        self.question_parameters(question)
            .and_then(|parameters| parameters.verbalize)
            .unwrap_or(true)
    }

    pub fn get_alternatives(&self, question: &Question) -> Option<&PropositionSet> {
        self.question_parameters(question)?.alts.as_ref()
    }

    pub fn get_source(&self, question: &Question) -> QuestionSource {
        self.question_parameters(question)
            .and_then(|parameters| parameters.source)
            .unwrap_or(QuestionSource::Domain)
    }

    pub fn get_graphical_type(&self, question: &Question) -> GraphicalType {
        self.question_parameters(question)
            .and_then(|parameters| parameters.graphical_type)
            .unwrap_or(GraphicalType::Text)
    }

    pub fn get_max_spoken_alts(&self, question: &Question) -> Option<u32> {
        self.question_parameters(question)?.max_spoken_alts
    }

    pub fn get_background(&self, question: &Question) -> &[Predicate] {
        self.question_parameters(question)
            .map(|parameters| parameters.background.as_slice())
            .unwrap_or(&[])
    }

    pub fn get_related_information(&self, question: &Question) -> &[Question] {
        self.question_parameters(question)
            .map(|parameters| parameters.related_information.as_slice())
            .unwrap_or(&[])
    }

    pub fn get_sort_order(&self, question: &Question) -> Option<SortOrder> {
        self.question_parameters(question)?.sort_order
    }

    pub fn get_allow_goal_accommodation(&self, question: &Question) -> bool {
        self.question_parameters(question)
            .and_then(|parameters| parameters.allow_goal_accommodation)
            .unwrap_or(false)
    }

    pub fn get_ask_features(&self, question: &Question) -> &[AskFeature] {
        self.question_parameters(question)
            .map(|parameters| parameters.ask_features.as_slice())
            .unwrap_or(&[])
    }

    pub fn get_service_query(&self, question: &Question) -> Option<&Question> {
        self.question_parameters(question)?.service_query.as_ref()
    }

    pub fn get_incremental(&self, question: &Question) -> bool {
        self.question_parameters(question)
            .and_then(|parameters| parameters.incremental)
            .unwrap_or(false)
    }
}

impl fmt::Debug for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Domain")
            .field("ddd_name", &self.ddd_name)
            .field("name", &self.name)
            .field("ontology", &self.ontology.name())
            .field("goals", &self.plans.len())
            .finish_non_exhaustive()
    }
}

/// Lazy breadth-first walk over the questions of a plan.
pub struct QuestionsInPlan<'a> {
    domain: &'a Domain,
    pending: VecDeque<Question>,
    seen: HashSet<Question>,
}

impl Iterator for QuestionsInPlan<'_> {
    type Item = Question;

    fn next(&mut self) -> Option<Question> {
        while let Some(question) = self.pending.pop_front() {
            if self.seen.contains(&question) {
                continue;
            }
            self.pending.extend(self.domain.feature_questions(&question));
            self.seen.insert(question.clone());
            return Some(question);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ontology::InMemoryOntology;
    use crate::domain::foundation::Polarity;
    use crate::domain::ontology::Sort;
    use crate::domain::plan::{IfThenElse, ServiceActionInvocation};

    const DOMAIN: &str = "mockup_domain";

    fn ontology() -> Arc<dyn Ontology> {
        Arc::new(
            InMemoryOntology::builder("mockup_ontology")
                .sort("city")
                .sort("city_type")
                .sort("country")
                .predicate("dest_city", "city")
                .predicate("dept_city", "city")
                .predicate("dest_country", "country")
                .feature("dest_city_type", "city_type", "dest_city")
                .predicate("price", "real")
                .individual("paris", "city")
                .individual("london", "city")
                .action("buy")
                .action("always_preferred")
                .action("conditionally_preferred")
                .action("accommodate_unrestricted")
                .action("downdate_plan_true")
                .action("downdate_plan_false")
                .action("instructional")
                .action("user_targeted_action")
                .build()
                .unwrap(),
        )
    }

    struct Fixture {
        ontology: Arc<dyn Ontology>,
    }

    impl Fixture {
        fn new() -> Self {
            Self { ontology: ontology() }
        }

        fn question(&self, predicate: &str) -> Question {
            Question::wh(self.ontology.predicate(predicate).unwrap().clone())
        }

        fn perform(&self, action: &str) -> Goal {
            Goal::perform(self.ontology.action(action).unwrap())
        }

        fn dest_city_paris(&self) -> Proposition {
            let predicate = self.ontology.predicate("dest_city").unwrap().clone();
            let paris = self.ontology.individual("paris").unwrap();
            PredicateProposition::positive(predicate, paris).unwrap().into()
        }

        fn findout(&self, predicate: &str) -> PlanItem {
            PlanItem::findout(DOMAIN, self.question(predicate))
        }

        fn service_action(&self, downdate_plan: bool) -> PlanItem {
            let mut invocation = ServiceActionInvocation::new("mockup_ontology", "mock_service_action");
            invocation.downdate_plan = downdate_plan;
            PlanItem::InvokeServiceAction(invocation)
        }

        fn domain(&self) -> Domain {
            let condition = Condition::is_true(self.dest_city_paris());
            let mut price_parameters = Parameters::new();
            price_parameters.verbalize = Some(true);
            let mut dest_city_parameters = Parameters::new();
            dest_city_parameters.verbalize = Some(false);

            Domain::builder("mockup_ddd", DOMAIN, self.ontology.clone())
                .plan(PlanEntry::new(
                    Goal::resolve(self.question("price")),
                    Plan::new(vec![self.findout("dest_city"), self.findout("dept_city")]),
                ))
                .plan(
                    PlanEntry::new(self.perform("buy"), Plan::new(vec![self.findout("price")]))
                        .with_postconds(vec![condition.clone()]),
                )
                .plan(
                    PlanEntry::new(self.perform("always_preferred"), Plan::empty())
                        .with_preference(Preferred::Always)
                        .with_postplan(vec![self.findout("price")])
                        .with_superactions(vec![self.ontology.action("buy").unwrap()]),
                )
                .plan(
                    PlanEntry::new(self.perform("conditionally_preferred"), Plan::empty())
                        .with_preference(Preferred::When(condition)),
                )
                .plan(
                    PlanEntry::new(self.perform("accommodate_unrestricted"), Plan::empty())
                        .with_unrestricted_accommodation(true),
                )
                .plan(PlanEntry::new(
                    self.perform("downdate_plan_true"),
                    Plan::new(vec![self.service_action(true)]),
                ))
                .plan(PlanEntry::new(
                    self.perform("downdate_plan_false"),
                    Plan::new(vec![self.service_action(false)]),
                ))
                .plan(PlanEntry::new(
                    self.perform("instructional"),
                    Plan::new(vec![PlanItem::GetDone {
                        action: self.ontology.action("user_targeted_action").unwrap(),
                        step: None,
                    }]),
                ))
                .default_question(self.question("dest_city"))
                .dependency(self.question("dest_country"), vec![self.question("dest_city")])
                .question_parameters(self.question("dest_city"), dest_city_parameters)
                .question_parameters(self.question("price"), price_parameters)
                .build()
                .unwrap()
        }
    }

    #[test]
    fn top_and_up_are_added_after_declared_goals() {
        let fixture = Fixture::new();
        let domain = fixture.domain();
        let goals = domain.get_all_goals_in_defined_order();
        assert_eq!(goals.len(), 10);
        assert_eq!(goals[0], &Goal::resolve(fixture.question("price")));
        assert!(goals[8].is_top_goal());
        assert!(goals[9].is_up_goal());
        assert_eq!(domain.get_all_goals().len(), 10);
    }

    #[test]
    fn top_plan_is_empty_by_default() {
        let fixture = Fixture::new();
        let domain = fixture.domain();
        assert_eq!(domain.get_plan(&fixture.perform("top")), Some(&Plan::empty()));
        assert_eq!(domain.get_plan(&fixture.perform("up")), Some(&Plan::empty()));
    }

    #[test]
    fn duplicate_goal_is_rejected() {
        let fixture = Fixture::new();
        let result = Domain::builder("mockup_ddd", DOMAIN, fixture.ontology.clone())
            .plan(PlanEntry::new(fixture.perform("top"), Plan::empty()))
            .plan(PlanEntry::new(fixture.perform("top"), Plan::empty()))
            .build();
        assert_eq!(
            result.unwrap_err(),
            DomainModelError::InvalidPlans {
                goal: "perform(top)".to_string()
            }
        );
    }

    #[test]
    fn has_goal_only_for_planned_goals() {
        let fixture = Fixture::new();
        let domain = fixture.domain();
        assert!(domain.has_goal(&Goal::resolve(fixture.question("price"))));
        assert!(!domain.has_goal(&Goal::resolve(fixture.question("dest_city"))));
        assert!(domain.has_goal(&fixture.perform("buy")));
        assert!(!domain.has_goal(&fixture.perform("user_targeted_action")));
    }

    #[test]
    fn preference_follows_plan_declaration() {
        let fixture = Fixture::new();
        let domain = fixture.domain();
        assert!(domain.goal_is_preferred(&fixture.perform("always_preferred")));
        assert!(!domain.goal_is_preferred(&fixture.perform("buy")));
        let facts = vec![fixture.dest_city_paris()];
        assert!(domain.goal_is_conditionally_preferred(&fixture.perform("conditionally_preferred"), &facts));
        assert!(!domain.goal_is_conditionally_preferred(&fixture.perform("conditionally_preferred"), &[]));
    }

    #[test]
    fn silent_accommodation_follows_flag() {
        let fixture = Fixture::new();
        let domain = fixture.domain();
        assert!(domain.is_silently_accommodatable(&fixture.perform("accommodate_unrestricted")));
        assert!(!domain.is_silently_accommodatable(&fixture.perform("conditionally_preferred")));
        assert!(domain.goal_allows_accommodation_without_feedback(&fixture.perform("accommodate_unrestricted")));
    }

    #[test]
    fn downdate_conditions_include_postconds() {
        let fixture = Fixture::new();
        let domain = fixture.domain();
        assert_eq!(
            domain.get_downdate_conditions(&fixture.perform("buy")),
            vec![Condition::is_true(fixture.dest_city_paris())]
        );
        assert!(domain.get_downdate_conditions(&fixture.perform("always_preferred")).is_empty());
        assert!(domain
            .get_downdate_conditions(&Goal::resolve(fixture.question("price")))
            .is_empty());
    }

    #[test]
    fn downdate_conditions_include_terminated_service_actions() {
        let fixture = Fixture::new();
        let domain = fixture.domain();
        let terminated = Proposition::ServiceActionTerminated(ServiceActionProposition::new(
            "mockup_ontology",
            "mock_service_action",
        ));
        assert_eq!(
            domain.get_downdate_conditions(&fixture.perform("downdate_plan_true")),
            vec![Condition::is_true(terminated)]
        );
        assert!(domain
            .get_downdate_conditions(&fixture.perform("downdate_plan_false"))
            .is_empty());
    }

    #[test]
    fn postplan_and_superactions_default_to_empty() {
        let fixture = Fixture::new();
        let domain = fixture.domain();
        assert_eq!(domain.get_postplan(&fixture.perform("always_preferred")), &[fixture.findout("price")]);
        assert!(domain.get_postplan(&fixture.perform("buy")).is_empty());
        assert_eq!(
            domain.get_superactions(&fixture.perform("always_preferred")),
            &[fixture.ontology.action("buy").unwrap()]
        );
        assert!(domain.get_superactions(&fixture.perform("buy")).is_empty());
    }

    #[test]
    fn goal_issue_depends_on_questions_in_its_plan() {
        let fixture = Fixture::new();
        let domain = fixture.domain();
        assert!(domain.is_depending_on(&fixture.question("price"), &fixture.question("dest_city")));
        assert!(!domain.is_depending_on(&fixture.question("dest_city"), &fixture.question("price")));
    }

    #[test]
    fn declared_dependency_is_one_way() {
        let fixture = Fixture::new();
        let domain = fixture.domain();
        assert!(domain.is_depending_on(&fixture.question("dest_country"), &fixture.question("dest_city")));
        assert!(!domain.is_depending_on(&fixture.question("dest_city"), &fixture.question("dest_country")));
    }

    #[test]
    fn question_depends_on_its_feature_questions() {
        let fixture = Fixture::new();
        let domain = fixture.domain();
        assert!(domain.is_depending_on(&fixture.question("dest_city"), &fixture.question("dest_city_type")));
    }

    #[test]
    fn dependency_check_handles_alternative_questions() {
        let fixture = Fixture::new();
        let domain = fixture.domain();
        let alternatives = Question::alt(PropositionSet::new(vec![
            fixture.dest_city_paris(),
            fixture.dest_city_paris().negate(),
        ]));
        assert!(!domain.is_depending_on(&alternatives, &alternatives));
    }

    #[test]
    fn dependent_question_is_goal_issue() {
        let fixture = Fixture::new();
        let domain = fixture.domain();
        assert_eq!(
            domain.get_dependent_question(&fixture.question("dest_city")),
            Some(&fixture.question("price"))
        );
        assert_eq!(domain.get_dependent_question(&fixture.question("price")), None);
    }

    #[test]
    fn resolving_answers_enumerate_individuals_in_order() {
        let fixture = Fixture::new();
        let domain = fixture.domain();
        let london = PredicateProposition::positive(
            fixture.ontology.predicate("dest_city").unwrap().clone(),
            fixture.ontology.individual("london").unwrap(),
        )
        .unwrap();
        assert_eq!(
            domain.get_resolving_answers(&fixture.question("dest_city")),
            vec![fixture.dest_city_paris(), london.into()]
        );
    }

    #[test]
    fn verbalize_defaults_to_true() {
        let fixture = Fixture::new();
        let domain = fixture.domain();
        assert!(domain.get_verbalize(&fixture.question("price")));
        assert!(domain.get_verbalize(&fixture.question("dept_city")));
        assert!(!domain.get_verbalize(&fixture.question("dest_city")));
    }

    #[test]
    fn default_question_is_recognised() {
        let fixture = Fixture::new();
        let domain = fixture.domain();
        assert!(domain.is_default_question(&fixture.question("dest_city")));
        assert!(!domain.is_default_question(&fixture.question("price")));
    }

    #[test]
    fn questions_in_plan_include_features() {
        let fixture = Fixture::new();
        let domain = fixture.domain();
        let plan = Plan::new(vec![
            fixture.findout("price"),
            PlanItem::raise(DOMAIN, fixture.question("dest_city")),
        ]);
        let questions: Vec<Question> = domain.get_questions_in_plan(&plan).collect();
        assert_eq!(
            questions,
            vec![
                fixture.question("price"),
                fixture.question("dest_city"),
                fixture.question("dest_city_type")
            ]
        );
    }

    #[test]
    fn questions_in_plan_look_inside_conditionals() {
        let fixture = Fixture::new();
        let domain = fixture.domain();
        let branching = IfThenElse::try_new(
            Condition::is_true(fixture.dest_city_paris()),
            vec![fixture.findout("price")],
            vec![PlanItem::Bind(fixture.question("dest_city"))],
        )
        .unwrap();
        let plan = Plan::new(vec![PlanItem::IfThenElse(branching)]);
        let questions: HashSet<Question> = domain.get_questions_in_plan(&plan).collect();
        let expected: HashSet<Question> = [
            fixture.question("price"),
            fixture.question("dest_city"),
            fixture.question("dest_city_type"),
        ]
        .into_iter()
        .collect();
        assert_eq!(questions, expected);
    }

    #[test]
    fn questions_in_plan_follow_kpq_ask_features() {
        let fixture = Fixture::new();
        let mut parameters = Parameters::new();
        parameters.ask_features = vec![AskFeature::with_kpq("dest_country")];
        let domain = Domain::builder("mockup_ddd", DOMAIN, fixture.ontology.clone())
            .question_parameters(fixture.question("dept_city"), parameters)
            .build()
            .unwrap();
        let plan = Plan::new(vec![fixture.findout("dept_city")]);
        let questions: Vec<Question> = domain.get_questions_in_plan(&plan).collect();
        assert_eq!(
            questions,
            vec![
                fixture.question("dept_city"),
                Question::knowledge_precondition(fixture.question("dest_country")),
                fixture.question("dest_country"),
            ]
        );
        assert!(domain.is_depending_on(
            &fixture.question("dept_city"),
            &Question::knowledge_precondition(fixture.question("dest_country"))
        ));
    }

    #[test]
    fn plan_questions_cover_all_plans() {
        let fixture = Fixture::new();
        let domain = fixture.domain();
        let questions: HashSet<String> = domain.get_plan_questions().iter().map(ToString::to_string).collect();
        let expected: HashSet<String> = ["?X.dept_city(X)", "?X.dest_city_type(X)", "?X.dest_city(X)", "?X.price(X)"]
            .into_iter()
            .map(String::from)
            .collect();
        assert_eq!(questions, expected);
    }

    #[test]
    fn user_targeted_actions_come_from_get_done_items() {
        let fixture = Fixture::new();
        let domain = fixture.domain();
        assert_eq!(domain.get_names_of_user_targeted_actions(), vec!["user_targeted_action"]);
    }

    #[test]
    fn dominance_is_transitive_and_irreflexive() {
        let fixture = Fixture::new();
        let goal_alternatives = |goals: Vec<Goal>| {
            PlanItem::findout(
                DOMAIN,
                Question::alt(PropositionSet::new(goals.into_iter().map(Proposition::goal).collect())),
            )
        };
        let a = fixture.perform("always_preferred");
        let b = fixture.perform("buy");
        let c = fixture.perform("instructional");
        let domain = Domain::builder("mockup_ddd", DOMAIN, fixture.ontology.clone())
            .plan(PlanEntry::new(a.clone(), Plan::new(vec![goal_alternatives(vec![b.clone(), a.clone()])])))
            .plan(PlanEntry::new(b.clone(), Plan::new(vec![goal_alternatives(vec![c.clone()])])))
            .build()
            .unwrap();
        assert!(domain.dominates(&a, &b));
        assert!(domain.dominates(&a, &c));
        assert!(!domain.dominates(&c, &a));
        assert!(!domain.dominates(&a, &a));
    }

    #[test]
    fn negative_goal_alternatives_still_count_for_dominance() {
        let fixture = Fixture::new();
        let a = fixture.perform("always_preferred");
        let b = fixture.perform("buy");
        let alternative = Proposition::Goal {
            goal: b.clone(),
            polarity: Polarity::Negative,
        };
        let domain = Domain::builder("mockup_ddd", DOMAIN, fixture.ontology.clone())
            .plan(PlanEntry::new(
                a.clone(),
                Plan::new(vec![PlanItem::findout(
                    DOMAIN,
                    Question::alt(PropositionSet::new(vec![alternative])),
                )]),
            ))
            .build()
            .unwrap();
        assert!(domain.dominates(&a, &b));
    }

    #[test]
    fn parameter_accessors_fall_back_to_defaults() {
        let fixture = Fixture::new();
        let domain = fixture.domain();
        let question = fixture.question("dept_city");
        assert_eq!(domain.get_source(&question), QuestionSource::Domain);
        assert_eq!(domain.get_graphical_type(&question), GraphicalType::Text);
        assert_eq!(domain.get_max_spoken_alts(&question), None);
        assert!(domain.get_background(&question).is_empty());
        assert!(domain.get_related_information(&question).is_empty());
        assert!(domain.get_alternatives(&question).is_none());
        assert!(domain.get_service_query(&question).is_none());
        assert!(!domain.get_incremental(&question));
        assert!(!domain.get_allow_goal_accommodation(&question));
        assert_eq!(domain.get_sort_order(&question), None);
    }

    #[test]
    fn mixed_ontology_plan_is_rejected() {
        let fixture = Fixture::new();
        let foreign = Question::wh(crate::domain::ontology::Predicate::new(
            "other_ontology",
            "dest_city",
            Sort::custom("city"),
        ));
        let result = Domain::builder("mockup_ddd", DOMAIN, fixture.ontology.clone())
            .plan(PlanEntry::new(
                fixture.perform("buy"),
                Plan::new(vec![fixture.findout("price"), PlanItem::findout(DOMAIN, foreign)]),
            ))
            .build();
        assert!(matches!(result, Err(DomainModelError::Plan(_))));
    }
}
