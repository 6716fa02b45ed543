//! Identification constraints.
//!
//! A latent variable has no natural scale. It is identified either by
//! fixing its variance or by fixing its first free loading to `1.0`.
//! Latents the user already scaled are reported, never changed.

use indexmap::IndexSet;
use log::debug;

use semtab_core::{
    relation::{Modifier, Operator, Relation},
    table::ParameterTable,
};
use semtab_parser::error::{Diagnostic, ErrorCode};

/// Value written into the modifier of a scaling parameter.
pub const SCALING_VALUE: &str = "1.0";

/// Fix the variance of every latent to [`SCALING_VALUE`].
///
/// Only the first `latent ~~ latent` row is considered. A fixed variance is
/// left alone with a note; a labelled variance or a missing variance row
/// leaves the latent unscaled and is reported as a warning.
pub fn scale_latent_variances(
    table: &mut ParameterTable,
    latents: &IndexSet<String>,
) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();
    let mut scaled = 0usize;

    for latent in latents {
        let index = table
            .iter()
            .position(|relation| relation.is_variance_of(latent));
        let Some(relation) = index.and_then(|index| table.get_mut(index)) else {
            diagnostics.push(
                Diagnostic::warning(format!("latent `{latent}` has no variance to fix"))
                    .with_code(ErrorCode::W202)
                    .with_help("enable add_variances or add `f ~~ f` to the model"),
            );
            continue;
        };

        match relation.modifier() {
            None => {
                relation.set_modifier(Some(Modifier::fixed(SCALING_VALUE)));
                scaled += 1;
            }
            Some(Modifier::Fixed(value)) => diagnostics.push(already_scaled(
                relation,
                format!("variance of `{latent}` is already fixed to {value}"),
            )),
            Some(Modifier::Label(label)) => diagnostics.push(labelled(
                relation,
                format!("variance of `{latent}` carries the label `{label}` and cannot be fixed"),
            )),
        }
    }

    debug!(scaled, skipped = diagnostics.len(); "Scaled latent variances");
    diagnostics
}

/// Fix the first free loading of every latent to [`SCALING_VALUE`].
///
/// A latent with a fixed loading is left alone with a note. A latent whose
/// loadings all carry labels is reported as a warning.
pub fn scale_loadings(table: &mut ParameterTable, latents: &IndexSet<String>) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();
    let mut scaled = 0usize;

    for latent in latents {
        let loading_of = |relation: &Relation| {
            relation.op() == Operator::Loading && relation.lhs() == latent.as_str()
        };

        if let Some(relation) = table
            .iter()
            .find(|relation| loading_of(*relation) && relation.modifier().is_some_and(Modifier::is_fixed))
        {
            diagnostics.push(already_scaled(
                relation,
                format!("`{latent}` already has a fixed loading on `{}`", relation.rhs()),
            ));
            continue;
        }

        let index = table
            .iter()
            .position(|relation| loading_of(relation) && relation.modifier().is_none());
        match index.and_then(|index| table.get_mut(index)) {
            Some(relation) => {
                relation.set_modifier(Some(Modifier::fixed(SCALING_VALUE)));
                scaled += 1;
            }
            None => {
                let mut diagnostic =
                    Diagnostic::warning(format!("every loading of `{latent}` is labelled"))
                        .with_code(ErrorCode::W202)
                        .with_help("fix one loading, e.g. `f =~ 1*x1`, or scale the latent variance");
                if let Some(span) = table
                    .iter()
                    .find(|relation| loading_of(*relation))
                    .and_then(Relation::span)
                {
                    diagnostic = diagnostic.with_label(span, "no free loading to fix");
                }
                diagnostics.push(diagnostic);
            }
        }
    }

    debug!(scaled, skipped = diagnostics.len(); "Scaled loadings");
    diagnostics
}

fn already_scaled(relation: &Relation, message: String) -> Diagnostic {
    let diagnostic = Diagnostic::note(message).with_code(ErrorCode::W200);
    match relation.span() {
        Some(span) => diagnostic.with_label(span, "scaled here"),
        None => diagnostic,
    }
}

fn labelled(relation: &Relation, message: String) -> Diagnostic {
    let diagnostic = Diagnostic::warning(message)
        .with_code(ErrorCode::W201)
        .with_help("use a numeric value such as `1*f` or disable scale_latent_variances");
    match relation.span() {
        Some(span) => diagnostic.with_label(span, "labelled here"),
        None => diagnostic,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn latents(names: &[&str]) -> IndexSet<String> {
        names.iter().map(|name| name.to_string()).collect()
    }

    fn loading(lhs: &str, rhs: &str, modifier: Option<Modifier>) -> Relation {
        Relation::new(lhs, Operator::Loading, rhs).with_modifier(modifier)
    }

    fn variance(name: &str, modifier: Option<Modifier>) -> Relation {
        Relation::new(name, Operator::Covariance, name).with_modifier(modifier)
    }

    #[test]
    fn test_scale_loadings_fixes_first_free_loading() {
        let mut table: ParameterTable = [
            loading("f", "x1", Some(Modifier::label("a"))),
            loading("f", "x2", None),
            loading("f", "x3", None),
        ]
        .into_iter()
        .collect();

        let diagnostics = scale_loadings(&mut table, &latents(&["f"]));

        assert!(diagnostics.is_empty());
        assert_eq!(table[1].modifier(), Some(&Modifier::fixed("1.0")));
        assert_eq!(table[2].modifier(), None);
        assert!(table[1].is_free());
    }

    #[test]
    fn test_scale_loadings_respects_manual_scaling() {
        let mut table: ParameterTable = [
            loading("f", "x1", None),
            loading("f", "x2", Some(Modifier::fixed("2"))),
        ]
        .into_iter()
        .collect();

        let diagnostics = scale_loadings(&mut table, &latents(&["f"]));

        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].code(), Some(ErrorCode::W200));
        assert!(diagnostics[0].severity().is_note());
        assert_eq!(table[0].modifier(), None);
    }

    #[test]
    fn test_scale_loadings_all_labelled() {
        let mut table: ParameterTable = [loading("f", "x1", Some(Modifier::label("a")))]
            .into_iter()
            .collect();

        let diagnostics = scale_loadings(&mut table, &latents(&["f"]));

        assert_eq!(diagnostics[0].code(), Some(ErrorCode::W202));
        assert!(diagnostics[0].severity().is_warning());
    }

    #[test]
    fn test_scale_latent_variances() {
        let mut table: ParameterTable = [
            variance("f", None),
            variance("g", Some(Modifier::fixed(".5"))),
            variance("h", Some(Modifier::label("v"))),
        ]
        .into_iter()
        .collect();

        let diagnostics = scale_latent_variances(&mut table, &latents(&["f", "g", "h", "k"]));

        assert_eq!(table[0].modifier(), Some(&Modifier::fixed("1.0")));
        assert_eq!(table[1].modifier(), Some(&Modifier::fixed(".5")));
        assert_eq!(table[2].modifier(), Some(&Modifier::label("v")));
        let codes: Vec<_> = diagnostics.iter().filter_map(Diagnostic::code).collect();
        assert_eq!(codes, vec![ErrorCode::W200, ErrorCode::W201, ErrorCode::W202]);
    }

    #[test]
    fn test_scaling_is_stable() {
        let mut table: ParameterTable = [loading("f", "x1", None), variance("f", None)]
            .into_iter()
            .collect();
        let latents = latents(&["f"]);

        scale_loadings(&mut table, &latents);
        let again = scale_loadings(&mut table, &latents);

        assert_eq!(again.len(), 1);
        assert_eq!(again[0].code(), Some(ErrorCode::W200));
    }
}
