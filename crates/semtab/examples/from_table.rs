//! Example: Completing a parameter table built in code
//!
//! This example builds a table from relations directly, without parsing
//! model syntax, and runs the completion and identification passes on it.

use semtab::{
    complete, identify,
    relation::{Modifier, Operator, Relation},
    table::ParameterTable,
};

fn main() {
    println!("Building parameter table from relations...\n");

    // A latent `f` measured by three indicators, the second one labelled
    let mut table: ParameterTable = [
        Relation::new("f", Operator::Loading, "x1"),
        Relation::new("f", Operator::Loading, "x2").with_modifier(Some(Modifier::label("l2"))),
        Relation::new("f", Operator::Loading, "x3"),
        Relation::new("y", Operator::Regression, "f"),
    ]
    .into_iter()
    .collect();

    // Classify before completion; the passes work on this snapshot
    let variables = table.variables();
    println!("latents:   {:?}", variables.latents());
    println!("manifests: {:?}\n", variables.manifests());

    let variances = complete::add_variances(&mut table);
    let intercepts = complete::add_intercepts(&mut table, variables.manifests());
    let covariances = complete::add_covariances(&mut table, variables.manifests());
    println!(
        "added {variances} variances, {intercepts} intercepts and {covariances} covariances\n"
    );

    for diagnostic in identify::scale_loadings(&mut table, variables.latents()) {
        println!("{diagnostic}");
    }

    println!("{table}");
}
