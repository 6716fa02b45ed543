//! The parameter table.
//!
//! [`ParameterTable`] is an ordered sequence of [`Relation`] rows. Rows are
//! only ever appended; later passes may change a row's modifier, bounds or
//! free flag but never remove or reorder rows, so row order is stable for a
//! given input.

use std::{fmt, ops::Index};

use indexmap::IndexSet;
use log::trace;

use crate::{INTERCEPT, relation::Relation, variables::Variables};

/// Ordered collection of parameter table rows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParameterTable {
    relations: Vec<Relation>,
}

impl ParameterTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a row.
    pub fn push(&mut self, relation: Relation) {
        trace!(relation:%; "Appending row");
        self.relations.push(relation);
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.relations.len()
    }

    /// Returns `true` if the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.relations.is_empty()
    }

    /// Borrow all rows in table order.
    pub fn relations(&self) -> &[Relation] {
        &self.relations
    }

    /// Iterate over rows in table order.
    pub fn iter(&self) -> std::slice::Iter<'_, Relation> {
        self.relations.iter()
    }

    /// Mutably borrow the row at `index`.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Relation> {
        self.relations.get_mut(index)
    }

    /// Iterate mutably over all rows carrying the label `name`.
    pub fn labelled_mut<'a>(&'a mut self, name: &'a str) -> impl Iterator<Item = &'a mut Relation> {
        self.relations
            .iter_mut()
            .filter(move |relation| relation.has_label(name))
    }

    /// Returns `true` if any row carries the label `name`.
    pub fn has_label(&self, name: &str) -> bool {
        self.relations.iter().any(|relation| relation.has_label(name))
    }

    /// Distinct variable names, excluding the intercept marker.
    ///
    /// Names are ordered by first appearance in the left-hand side column,
    /// followed by names that only appear in the right-hand side column.
    pub fn variable_names(&self) -> IndexSet<&str> {
        self.relations
            .iter()
            .filter(|relation| relation.op().is_edge())
            .map(Relation::lhs)
            .chain(
                self.relations
                    .iter()
                    .filter(|relation| relation.op().is_edge())
                    .map(Relation::rhs),
            )
            .filter(|name| *name != INTERCEPT)
            .collect()
    }

    /// Classify the variables of this table into latents and manifests.
    pub fn variables(&self) -> Variables {
        Variables::classify(self)
    }
}

impl Index<usize> for ParameterTable {
    type Output = Relation;

    fn index(&self, index: usize) -> &Self::Output {
        &self.relations[index]
    }
}

impl<'a> IntoIterator for &'a ParameterTable {
    type Item = &'a Relation;
    type IntoIter = std::slice::Iter<'a, Relation>;

    fn into_iter(self) -> Self::IntoIter {
        self.relations.iter()
    }
}

impl FromIterator<Relation> for ParameterTable {
    fn from_iter<T: IntoIterator<Item = Relation>>(iter: T) -> Self {
        Self {
            relations: iter.into_iter().collect(),
        }
    }
}

/// Renders the table as model syntax, one row per line, followed by the
/// bounds of every bounded label.
impl fmt::Display for ParameterTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for relation in &self.relations {
            writeln!(f, "{relation}")?;
        }

        let mut seen = IndexSet::new();
        for relation in &self.relations {
            let Some(label) = relation.modifier().and_then(|m| m.as_label()) else {
                continue;
            };
            if !seen.insert(label) {
                continue;
            }
            if let Some(lower) = relation.lower_bound() {
                writeln!(f, "{label} > {lower}")?;
            }
            if let Some(upper) = relation.upper_bound() {
                writeln!(f, "{label} < {upper}")?;
            }
        }
        Ok(())
    }
}
