//! Ontology Port - Read model of a DDD's vocabulary.
//!
//! The parser and the domain model both resolve names through this trait.
//! Implementations are owned by whoever assembles a domain and are only ever
//! read by the core.

use chrono::DateTime;

use crate::domain::foundation::OntologyError;
use crate::domain::ontology::{Action, BuiltinSort, Individual, IndividualValue, Predicate, Sort};

/// Port for looking up sorts, predicates, individuals and actions by name.
///
/// # Contract
///
/// Implementations must:
/// - Resolve every builtin sort by name, declared or not
/// - Enumerate individuals of a sort in declaration order
/// - Never change their answers after construction
pub trait Ontology: Send + Sync {
    /// The ontology's name; every value it creates carries it.
    fn name(&self) -> &str;

    /// Looks up a declared or builtin sort.
    fn sort(&self, name: &str) -> Option<Sort>;

    fn predicate(&self, name: &str) -> Option<&Predicate>;

    /// All declared predicates in declaration order.
    fn predicates(&self) -> Vec<&Predicate>;

    /// The sort of a declared individual.
    fn individual_sort(&self, name: &str) -> Option<&Sort>;

    /// Declared individuals of `sort`, in declaration order.
    fn individuals_of_sort(&self, sort: &Sort) -> Vec<Individual>;

    fn action(&self, name: &str) -> Option<Action>;

    fn has_predicate(&self, name: &str) -> bool {
        self.predicate(name).is_some()
    }

    fn has_individual(&self, name: &str) -> bool {
        self.individual_sort(name).is_some()
    }

    fn has_action(&self, name: &str) -> bool {
        self.action(name).is_some()
    }

    /// A declared individual as a positive value.
    fn individual(&self, name: &str) -> Option<Individual> {
        self.individual_sort(name).map(|sort| {
            Individual::new(self.name(), IndividualValue::Symbol(name.to_string()), sort.clone())
        })
    }

    /// Predicates declared as features of `predicate_name`.
    fn features_of(&self, predicate_name: &str) -> Vec<&Predicate> {
        self.predicates()
            .into_iter()
            .filter(|predicate| predicate.feature_of_name() == Some(predicate_name))
            .collect()
    }

    /// Creates an individual of `sort` from a raw value.
    ///
    /// # Errors
    ///
    /// Returns [`OntologyError::InvalidValue`] when the value does not belong to
    /// the sort, e.g. an undeclared name for a non-dynamic sort or a malformed
    /// timestamp.
    fn create_individual(&self, value: IndividualValue, sort: &Sort) -> Result<Individual, OntologyError> {
        let accepted = match (&value, sort.as_builtin()) {
            (IndividualValue::Integer(_), Some(BuiltinSort::Integer)) => Ok(()),
            (IndividualValue::Real(_), Some(BuiltinSort::Real)) => Ok(()),
            (IndividualValue::Text(_), Some(BuiltinSort::String)) => Ok(()),
            (IndividualValue::PersonName(_), Some(BuiltinSort::PersonName)) => Ok(()),
            (IndividualValue::DateTime(iso), Some(BuiltinSort::DateTime)) => DateTime::parse_from_rfc3339(iso)
                .map(|_| ())
                .map_err(|err| err.to_string()),
            (IndividualValue::Symbol(name), None) => {
                if self.individual_sort(name) == Some(sort) || sort.is_dynamic() {
                    Ok(())
                } else {
                    Err(format!("'{}' is not an individual of sort {}", name, sort))
                }
            }
            _ => Err(format!("value cannot belong to sort {}", sort)),
        };
        accepted.map_err(|reason| OntologyError::invalid_value(sort.name(), value.to_string(), reason))?;
        Ok(Individual::new(self.name(), value, sort.clone()))
    }

    /// Creates the negation of an individual of `sort`.
    ///
    /// # Errors
    ///
    /// Same as [`Ontology::create_individual`].
    fn create_negative_individual(&self, value: IndividualValue, sort: &Sort) -> Result<Individual, OntologyError> {
        self.create_individual(value, sort).map(|individual| individual.negate())
    }
}
