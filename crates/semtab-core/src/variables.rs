//! Latent/manifest classification.
//!
//! A name is latent iff it is the left-hand side of some loading. Every
//! other name appearing in an edge row is manifest, except the intercept
//! marker. The classification is derived from a [`ParameterTable`] and never
//! authoritative: it is recomputed from the table whenever needed.

use indexmap::IndexSet;

use crate::{relation::Operator, table::ParameterTable};

/// Latent and manifest variable names, in order of first appearance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Variables {
    latents: IndexSet<String>,
    manifests: IndexSet<String>,
}

impl Variables {
    /// Classify the variables referenced by `table`.
    pub fn classify(table: &ParameterTable) -> Self {
        let latents: IndexSet<String> = table
            .iter()
            .filter(|relation| relation.op() == Operator::Loading)
            .map(|relation| relation.lhs().to_string())
            .collect();

        let manifests = table
            .variable_names()
            .into_iter()
            .filter(|name| !latents.contains(*name))
            .map(str::to_string)
            .collect();

        Self { latents, manifests }
    }

    /// Latent variables.
    pub fn latents(&self) -> &IndexSet<String> {
        &self.latents
    }

    /// Manifest variables.
    pub fn manifests(&self) -> &IndexSet<String> {
        &self.manifests
    }

    /// Returns `true` if `name` is a latent variable.
    pub fn is_latent(&self, name: &str) -> bool {
        self.latents.contains(name)
    }

    /// Returns `true` if `name` is a manifest variable.
    pub fn is_manifest(&self, name: &str) -> bool {
        self.manifests.contains(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{INTERCEPT, relation::Relation};

    #[test]
    fn test_classify_factor_model() {
        let table: ParameterTable = ["x1", "x2", "x3"]
            .into_iter()
            .map(|x| Relation::new("f", Operator::Loading, x))
            .collect();

        let vars = table.variables();

        assert_eq!(vars.latents().iter().collect::<Vec<_>>(), vec!["f"]);
        assert_eq!(
            vars.manifests().iter().collect::<Vec<_>>(),
            vec!["x1", "x2", "x3"]
        );
    }

    #[test]
    fn test_intercept_marker_is_never_a_variable() {
        let table: ParameterTable = [
            Relation::new("y", Operator::Regression, INTERCEPT),
            Relation::new("y", Operator::Regression, "x"),
        ]
        .into_iter()
        .collect();

        let vars = table.variables();

        assert!(vars.latents().is_empty());
        assert!(vars.is_manifest("y"));
        assert!(vars.is_manifest("x"));
        assert!(!vars.is_manifest(INTERCEPT));
    }

    #[test]
    fn test_latent_predicting_latent() {
        let table: ParameterTable = [
            Relation::new("g", Operator::Loading, "f"),
            Relation::new("f", Operator::Loading, "x1"),
        ]
        .into_iter()
        .collect();

        let vars = table.variables();

        assert!(vars.is_latent("g"));
        assert!(vars.is_latent("f"));
        assert!(!vars.is_manifest("f"));
        assert!(vars.is_manifest("x1"));
    }
}
