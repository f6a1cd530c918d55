//! Declarative DDD loading.
//!
//! Turns a [`DddDescription`] into an [`InMemoryOntology`] and a [`Domain`].
//! The ontology is built first; every expression in the domain part is then
//! parsed against it.

mod description;

pub use description::{
    DddDescription, DependencyDescription, DomainDescription, IndividualDescription, OntologyDescription,
    ParametersDescription, PlanDescription, PredicateDescription, PreferenceDescription, SortDescription,
};

use std::sync::Arc;

use crate::adapters::ontology::InMemoryOntology;
use crate::adapters::parser::{ParseError, Parser};
use crate::config::{AppConfig, ParserConfig};
use crate::domain::ddd::{Domain, PlanEntry, Preferred};
use crate::domain::foundation::{DomainError, ErrorCode, OntologyError};
use crate::domain::ontology::Action;
use crate::domain::plan::{Plan, PlanItem};
use crate::domain::semantics::{Condition, Question};
use crate::ports::Ontology;

/// A loaded DDD.
#[derive(Debug, Clone)]
pub struct LoadedDdd {
    pub ontology: Arc<InMemoryOntology>,
    pub domain: Domain,
}

/// Loads the DDD named by `config.ddd`.
///
/// # Errors
///
/// Fails with [`ErrorCode::DescriptionUnreadable`] when no description path
/// is configured or the file cannot be read, and with the converted parse or
/// model error when the description is invalid.
pub fn load_configured(config: &AppConfig) -> Result<LoadedDdd, DomainError> {
    let path = config.ddd.description_path.as_deref().ok_or_else(|| {
        DomainError::new(ErrorCode::DescriptionUnreadable, "No description path configured")
            .with_detail("ddd", config.ddd.name.clone())
    })?;
    let description = DddDescription::load_from_path(path)?;
    build(&config.ddd.name, &description, &config.parser)
}

/// Builds the ontology and domain of `description`.
pub fn build(ddd_name: &str, description: &DddDescription, config: &ParserConfig) -> Result<LoadedDdd, DomainError> {
    let ontology = Arc::new(build_ontology(&description.ontology)?);
    let domain = build_domain(ddd_name, &description.domain, ontology.clone(), config)?;
    tracing::info!(
        ddd = ddd_name,
        ontology = %description.ontology.name,
        domain = %description.domain.name,
        goals = description.domain.plans.len(),
        "Loaded DDD"
    );
    Ok(LoadedDdd { ontology, domain })
}

pub fn build_ontology(description: &OntologyDescription) -> Result<InMemoryOntology, OntologyError> {
    let mut builder = InMemoryOntology::builder(&description.name);
    for sort in &description.sorts {
        builder = if sort.dynamic {
            builder.dynamic_sort(&sort.name)
        } else {
            builder.sort(&sort.name)
        };
    }
    for predicate in &description.predicates {
        builder = builder.declare_predicate(
            predicate.name.clone(),
            predicate.sort.clone(),
            predicate.feature_of.clone(),
            predicate.multiple_instances,
        );
    }
    for individual in &description.individuals {
        builder = builder.individual(&individual.name, &individual.sort);
    }
    for action in &description.actions {
        builder = builder.action(action);
    }
    builder.build()
}

pub fn build_domain(
    ddd_name: &str,
    description: &DomainDescription,
    ontology: Arc<InMemoryOntology>,
    config: &ParserConfig,
) -> Result<Domain, DomainError> {
    let parser = Parser::new(ddd_name, ontology.as_ref(), &description.name).with_config(config);
    let mut builder = Domain::builder(ddd_name, &description.name, ontology.clone());

    for entry in &description.plans {
        builder = builder.plan(plan_entry(&parser, entry)?);
    }
    for text in &description.default_questions {
        builder = builder.default_question(parser.parse_question(text)?);
    }
    for dependency in &description.dependencies {
        let depends_on = questions(&parser, &dependency.depends_on)?;
        builder = builder.dependency(parser.parse_question(&dependency.question)?, depends_on);
    }
    for parameters in &description.parameters {
        builder = match parameters {
            ParametersDescription::Question { question, parameters } => {
                builder.question_parameters(parser.parse_question(question)?, parser.parse_parameters(parameters)?)
            }
            ParametersDescription::Goal { goal, parameters } => {
                builder.goal_parameters(parser.parse_goal(goal)?, parser.parse_parameters(parameters)?)
            }
        };
    }

    Ok(builder.build()?)
}

fn plan_entry(parser: &Parser<'_>, description: &PlanDescription) -> Result<PlanEntry, DomainError> {
    let goal = parser.parse_goal(&description.goal)?;
    let plan = Plan::new(plan_items(parser, &description.plan)?);
    let preferred = match &description.preferred {
        None | Some(PreferenceDescription::Flag(false)) => Preferred::Never,
        Some(PreferenceDescription::Flag(true)) => Preferred::Always,
        Some(PreferenceDescription::When(condition)) => Preferred::When(parser.parse_condition(condition)?),
    };
    let postconds = description
        .postconds
        .iter()
        .map(|text| parser.parse_condition(text))
        .collect::<Result<Vec<Condition>, _>>()?;
    let superactions = description
        .superactions
        .iter()
        .map(|name| action(parser.ontology(), name))
        .collect::<Result<Vec<Action>, _>>()?;

    Ok(PlanEntry::new(goal, plan)
        .with_preference(preferred)
        .with_postconds(postconds)
        .with_postplan(plan_items(parser, &description.postplan)?)
        .with_superactions(superactions)
        .with_unrestricted_accommodation(description.unrestricted_accommodation))
}

fn plan_items(parser: &Parser<'_>, texts: &[String]) -> Result<Vec<PlanItem>, ParseError> {
    texts.iter().map(|text| parser.parse_plan_item(text)).collect()
}

fn questions(parser: &Parser<'_>, texts: &[String]) -> Result<Vec<Question>, ParseError> {
    texts.iter().map(|text| parser.parse_question(text)).collect()
}

fn action(ontology: &dyn Ontology, name: &str) -> Result<Action, OntologyError> {
    ontology
        .action(name)
        .ok_or_else(|| OntologyError::UnknownAction(name.to_string()))
}
