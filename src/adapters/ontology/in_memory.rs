//! In-memory ontology built from declarations.
//!
//! Used by the declarative loader and throughout the tests. Declaration order
//! is kept so that enumerations (e.g. resolving answers) are deterministic.

use indexmap::IndexMap;

use crate::domain::foundation::OntologyError;
use crate::domain::ontology::{Action, BuiltinSort, Individual, IndividualValue, Predicate, Sort, TOP, UP};
use crate::ports::Ontology;

/// Immutable ontology held in insertion-ordered maps.
///
/// # Example
///
/// ```ignore
/// let ontology = InMemoryOntology::builder("TravelOntology")
///     .sort("city")
///     .predicate("dest_city", "city")
///     .individual("paris", "city")
///     .action("buy")
///     .build()?;
/// assert!(ontology.has_individual("paris"));
/// ```
#[derive(Debug, Clone)]
pub struct InMemoryOntology {
    name: String,
    sorts: IndexMap<String, Sort>,
    predicates: IndexMap<String, Predicate>,
    individuals: IndexMap<String, Sort>,
    actions: IndexMap<String, Action>,
}

impl InMemoryOntology {
    pub fn builder(name: impl Into<String>) -> OntologyBuilder {
        OntologyBuilder::new(name)
    }
}

impl Ontology for InMemoryOntology {
    fn name(&self) -> &str {
        &self.name
    }

    fn sort(&self, name: &str) -> Option<Sort> {
        self.sorts
            .get(name)
            .cloned()
            .or_else(|| BuiltinSort::from_name(name).map(Sort::builtin))
    }

    fn predicate(&self, name: &str) -> Option<&Predicate> {
        self.predicates.get(name)
    }

    fn predicates(&self) -> Vec<&Predicate> {
        self.predicates.values().collect()
    }

    fn individual_sort(&self, name: &str) -> Option<&Sort> {
        self.individuals.get(name)
    }

    fn individuals_of_sort(&self, sort: &Sort) -> Vec<Individual> {
        self.individuals
            .iter()
            .filter(|(_, individual_sort)| *individual_sort == sort)
            .map(|(name, individual_sort)| {
                Individual::new(&self.name, IndividualValue::Symbol(name.clone()), individual_sort.clone())
            })
            .collect()
    }

    fn action(&self, name: &str) -> Option<Action> {
        self.actions.get(name).cloned()
    }
}

struct PredicateDeclaration {
    name: String,
    sort: String,
    feature_of: Option<String>,
    multiple_instances: bool,
}

/// Collects declarations and resolves sort references on [`build`](Self::build).
pub struct OntologyBuilder {
    name: String,
    sorts: Vec<Sort>,
    predicates: Vec<PredicateDeclaration>,
    individuals: Vec<(String, String)>,
    actions: Vec<String>,
}

impl OntologyBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sorts: Vec::new(),
            predicates: Vec::new(),
            individuals: Vec::new(),
            actions: Vec::new(),
        }
    }

    /// Declares a custom sort with a fixed enumeration.
    pub fn sort(mut self, name: impl Into<String>) -> Self {
        self.sorts.push(Sort::custom(name));
        self
    }

    /// Declares a custom sort that accepts runtime individuals.
    pub fn dynamic_sort(mut self, name: impl Into<String>) -> Self {
        self.sorts.push(Sort::dynamic(name));
        self
    }

    pub fn predicate(self, name: impl Into<String>, sort: impl Into<String>) -> Self {
        self.declare_predicate(name.into(), sort.into(), None, false)
    }

    /// Declares a predicate refining `feature_of`.
    pub fn feature(self, name: impl Into<String>, sort: impl Into<String>, feature_of: impl Into<String>) -> Self {
        self.declare_predicate(name.into(), sort.into(), Some(feature_of.into()), false)
    }

    pub fn multi_instance_predicate(self, name: impl Into<String>, sort: impl Into<String>) -> Self {
        self.declare_predicate(name.into(), sort.into(), None, true)
    }

    pub fn declare_predicate(
        mut self,
        name: String,
        sort: String,
        feature_of: Option<String>,
        multiple_instances: bool,
    ) -> Self {
        self.predicates.push(PredicateDeclaration {
            name,
            sort,
            feature_of,
            multiple_instances,
        });
        self
    }

    pub fn individual(mut self, name: impl Into<String>, sort: impl Into<String>) -> Self {
        self.individuals.push((name.into(), sort.into()));
        self
    }

    pub fn action(mut self, name: impl Into<String>) -> Self {
        self.actions.push(name.into());
        self
    }

    /// Resolves all sort references. `top` and `up` are always declared.
    ///
    /// # Errors
    ///
    /// Returns [`OntologyError::UnknownSort`] when a predicate or individual
    /// names an undeclared, non-builtin sort, and
    /// [`OntologyError::UnknownPredicate`] for a feature of an undeclared predicate.
    pub fn build(self) -> Result<InMemoryOntology, OntologyError> {
        let sorts: IndexMap<String, Sort> = self
            .sorts
            .into_iter()
            .map(|sort| (sort.name().to_string(), sort))
            .collect();
        let resolve = |name: &str| -> Result<Sort, OntologyError> {
            sorts
                .get(name)
                .cloned()
                .or_else(|| BuiltinSort::from_name(name).map(Sort::builtin))
                .ok_or_else(|| OntologyError::UnknownSort(name.to_string()))
        };

        let mut predicates = IndexMap::new();
        for declaration in &self.predicates {
            let mut predicate = Predicate::new(&self.name, &declaration.name, resolve(&declaration.sort)?);
            if let Some(feature_of) = &declaration.feature_of {
                predicate = predicate.with_feature_of(feature_of);
            }
            if declaration.multiple_instances {
                predicate = predicate.with_multiple_instances();
            }
            predicates.insert(declaration.name.clone(), predicate);
        }
        for predicate in predicates.values() {
            if let Some(feature_of) = predicate.feature_of_name() {
                if !predicates.contains_key(feature_of) {
                    return Err(OntologyError::UnknownPredicate(feature_of.to_string()));
                }
            }
        }

        let mut individuals = IndexMap::new();
        for (name, sort) in &self.individuals {
            individuals.insert(name.clone(), resolve(sort)?);
        }

        let mut actions = IndexMap::new();
        for name in [TOP, UP].into_iter().map(str::to_string).chain(self.actions) {
            actions
                .entry(name.clone())
                .or_insert_with(|| Action::new(&self.name, name));
        }

        tracing::debug!(
            ontology = %self.name,
            predicates = predicates.len(),
            individuals = individuals.len(),
            actions = actions.len(),
            "Built in-memory ontology"
        );

        Ok(InMemoryOntology {
            name: self.name,
            sorts,
            predicates,
            individuals,
            actions,
        })
    }
}
