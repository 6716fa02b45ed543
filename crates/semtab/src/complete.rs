//! Automatic model completion.
//!
//! Each pass appends the rows a model leaves implicit. The passes never
//! remove, reorder or modify existing rows, and running a pass twice adds
//! nothing the second time.

use indexmap::IndexSet;
use log::debug;

use semtab_core::{
    INTERCEPT,
    relation::{Operator, Relation},
    table::ParameterTable,
};

/// Append `name ~~ name` for every variable without a variance row.
///
/// Variables are visited in table order: left-hand sides first, then
/// names that only appear on right-hand sides.
///
/// Returns the number of rows appended.
pub fn add_variances(table: &mut ParameterTable) -> usize {
    let missing: Vec<String> = table
        .variable_names()
        .into_iter()
        .filter(|name| !table.iter().any(|relation| relation.is_variance_of(name)))
        .map(str::to_string)
        .collect();

    for name in &missing {
        table.push(Relation::new(name.as_str(), Operator::Covariance, name.as_str()));
    }
    debug!(rows = missing.len(); "Added variances");
    missing.len()
}

/// Append `name ~ 1` for every manifest variable without an intercept.
///
/// Returns the number of rows appended.
pub fn add_intercepts(table: &mut ParameterTable, manifests: &IndexSet<String>) -> usize {
    let missing: Vec<&String> = manifests
        .iter()
        .filter(|name| !table.iter().any(|relation| relation.is_intercept_of(name)))
        .collect();

    for name in &missing {
        table.push(Relation::new(name.as_str(), Operator::Regression, INTERCEPT));
    }
    debug!(rows = missing.len(); "Added intercepts");
    missing.len()
}

/// Append a free covariance between every pair of exogenous `variables`
/// that is not yet connected by a `~~` row.
///
/// A variable is exogenous if nothing in the model predicts it: it is never
/// an indicator of a loading and never the outcome of a regression other
/// than its intercept. Pairs are visited in set order.
///
/// Returns the number of rows appended.
pub fn add_covariances(table: &mut ParameterTable, variables: &IndexSet<String>) -> usize {
    let exogenous: Vec<&String> = variables
        .iter()
        .filter(|name| is_exogenous(table, name))
        .collect();

    let mut added = 0;
    for (i, a) in exogenous.iter().enumerate() {
        for b in &exogenous[i + 1..] {
            if table.iter().any(|relation| relation.connects(a, b)) {
                continue;
            }
            table.push(Relation::new(a.as_str(), Operator::Covariance, b.as_str()));
            added += 1;
        }
    }
    debug!(exogenous = exogenous.len(), rows = added; "Added exogenous covariances");
    added
}

/// Returns `true` if no row of `table` predicts `name`.
pub fn is_exogenous(table: &ParameterTable, name: &str) -> bool {
    !table.iter().any(|relation| match relation.op() {
        Operator::Loading => relation.rhs() == name,
        Operator::Regression => relation.lhs() == name && relation.rhs() != INTERCEPT,
        Operator::Covariance | Operator::Define => false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(rows: &[(&str, Operator, &str)]) -> ParameterTable {
        rows.iter()
            .map(|(lhs, op, rhs)| Relation::new(*lhs, *op, *rhs))
            .collect()
    }

    fn rows(table: &ParameterTable) -> Vec<String> {
        table.iter().map(ToString::to_string).collect()
    }

    fn names(names: &[&str]) -> IndexSet<String> {
        names.iter().map(|name| name.to_string()).collect()
    }

    #[test]
    fn test_add_variances_in_table_order() {
        let mut table = table(&[
            ("f", Operator::Loading, "x1"),
            ("y", Operator::Regression, "f"),
            ("x1", Operator::Covariance, "x1"),
            ("y", Operator::Regression, INTERCEPT),
        ]);

        assert_eq!(add_variances(&mut table), 2);
        assert_eq!(rows(&table)[4..], ["f ~~ f", "y ~~ y"]);
    }

    #[test]
    fn test_add_variances_skips_covariance_rows() {
        let mut table = table(&[("a", Operator::Covariance, "b")]);

        assert_eq!(add_variances(&mut table), 2);
        assert_eq!(rows(&table), ["a ~~ b", "a ~~ a", "b ~~ b"]);
    }

    #[test]
    fn test_add_intercepts() {
        let mut table = table(&[
            ("f", Operator::Loading, "x1"),
            ("f", Operator::Loading, "x2"),
            ("x2", Operator::Regression, INTERCEPT),
        ]);

        assert_eq!(add_intercepts(&mut table, &names(&["x1", "x2"])), 1);
        assert_eq!(rows(&table)[3], "x1 ~ 1");
    }

    #[test]
    fn test_add_covariances_between_exogenous() {
        let mut table = table(&[
            ("y", Operator::Regression, "x1"),
            ("y", Operator::Regression, "x2"),
            ("y", Operator::Regression, "x3"),
            ("x3", Operator::Covariance, "x1"),
        ]);

        let added = add_covariances(&mut table, &names(&["y", "x1", "x2", "x3"]));

        assert_eq!(added, 2);
        assert_eq!(rows(&table)[4..], ["x1 ~~ x2", "x2 ~~ x3"]);
    }

    #[test]
    fn test_exogeneity_rules() {
        let table = table(&[
            ("f", Operator::Loading, "x1"),
            ("y", Operator::Regression, "w"),
            ("z", Operator::Regression, INTERCEPT),
        ]);

        assert!(is_exogenous(&table, "f"));
        assert!(!is_exogenous(&table, "x1"));
        assert!(!is_exogenous(&table, "y"));
        assert!(is_exogenous(&table, "w"));
        assert!(is_exogenous(&table, "z"));
    }

    #[test]
    fn test_single_exogenous_adds_nothing() {
        let mut table = table(&[("y", Operator::Regression, "x")]);

        assert_eq!(add_covariances(&mut table, &names(&["y", "x"])), 0);
    }
}
