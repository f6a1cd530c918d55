//! Plans: stacks of plan items with nested conditionals.

use std::fmt;
use std::slice;

use crate::domain::foundation::PlanError;
use crate::domain::semantics::{join, Question};

use super::PlanItem;

/// An ordered stack of plan items; the first item is the top.
///
/// Iteration with [`Plan::iter`] flattens `if ... then ... else` items into
/// their branches, consequent first.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Plan {
    items: Vec<PlanItem>,
}

impl Plan {
    /// Creates a plan whose first item is executed first.
    pub fn new(items: Vec<PlanItem>) -> Self {
        Self { items }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// The items as stored, without flattening.
    pub fn items(&self) -> &[PlanItem] {
        &self.items
    }

    pub fn push(&mut self, item: PlanItem) {
        self.items.insert(0, item);
    }

    pub fn pop(&mut self) -> Option<PlanItem> {
        if self.items.is_empty() {
            None
        } else {
            Some(self.items.remove(0))
        }
    }

    pub fn top(&self) -> Option<&PlanItem> {
        self.items.first()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Flattened traversal of the plan.
    pub fn iter(&self) -> FlattenedItems<'_> {
        FlattenedItems {
            stack: vec![self.items.iter()],
        }
    }

    pub fn contains(&self, item: &PlanItem) -> bool {
        self.iter().any(|candidate| candidate == item)
    }

    /// Removes every occurrence of `item`, including inside conditional branches.
    pub fn remove(&mut self, item: &PlanItem) {
        remove_nested(&mut self.items, item);
    }

    /// Questions of `findout`, `raise` and `bind` items, in traversal order.
    pub fn raised_questions(&self) -> impl Iterator<Item = &Question> {
        self.iter().filter_map(PlanItem::raised_question)
    }

    /// The single ontology the plan's ontology-specific items belong to.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError::UnableToDetermineOntology`] when no item carries
    /// ontology-specific content or when items span several ontologies.
    pub fn ontology_name(&self) -> Result<String, PlanError> {
        let mut names: Vec<String> = Vec::new();
        for name in self.items.iter().filter_map(PlanItem::ontology_name) {
            if !names.contains(&name) {
                names.push(name);
            }
        }
        match names.len() {
            0 => Err(PlanError::no_semantic_content()),
            1 => Ok(names.remove(0)),
            _ => Err(PlanError::several_ontologies(&names)),
        }
    }
}

fn remove_nested(items: &mut Vec<PlanItem>, target: &PlanItem) {
    items.retain(|item| item != target);
    for item in items.iter_mut() {
        if let PlanItem::IfThenElse(branching) = item {
            let (consequent, alternative) = branching.branches_mut();
            remove_nested(consequent, target);
            remove_nested(alternative, target);
        }
    }
}

impl FromIterator<PlanItem> for Plan {
    fn from_iter<I: IntoIterator<Item = PlanItem>>(iter: I) -> Self {
        Plan::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Plan {
    type Item = &'a PlanItem;
    type IntoIter = FlattenedItems<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Plan([{}])", join(&self.items))
    }
}

/// Depth-first iterator over a plan's items with conditionals expanded.
pub struct FlattenedItems<'a> {
    stack: Vec<slice::Iter<'a, PlanItem>>,
}

impl<'a> Iterator for FlattenedItems<'a> {
    type Item = &'a PlanItem;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let current = self.stack.last_mut()?;
            match current.next() {
                Some(PlanItem::IfThenElse(branching)) => {
                    self.stack.push(branching.alternative().iter());
                    self.stack.push(branching.consequent().iter());
                }
                Some(item) => return Some(item),
                None => {
                    self.stack.pop();
                }
            }
        }
    }
}
