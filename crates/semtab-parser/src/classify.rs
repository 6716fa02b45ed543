//! Statement classification and splitting.
//!
//! Every cleaned statement has exactly one kind, decided by the first
//! operator found outside of brace regions in a fixed priority order.

use std::fmt;

use log::trace;

use semtab_core::relation::{Modifier, Operator};

use crate::{
    error::{Diagnostic, DiagnosticCollector, ErrorCode, Result},
    number::is_numeric_literal,
    split::{find_top_level, is_opaque_block, split_all, split_once},
    statement::Statement,
};

/// Characters a relation or declaration name must not contain.
pub(crate) const RELATION_NAME_FORBIDDEN: &str = "!+*=~: ";

/// Characters a definition name must not contain.
pub(crate) const DEFINITION_NAME_FORBIDDEN: &str = "+*=~: ";

/// Which side of a parameter a bound limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundKind {
    /// `label > value`
    Lower,
    /// `label < value`
    Upper,
}

impl BoundKind {
    pub fn symbol(self) -> &'static str {
        match self {
            BoundKind::Lower => ">",
            BoundKind::Upper => "<",
        }
    }
}

/// The kind of a cleaned statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementKind {
    /// A `{...}` block passed through verbatim.
    Opaque,
    /// A `=~`, `~~` or `~` relation.
    Relation(Operator),
    /// A `name := expression` definition.
    Definition,
    /// A bound on a labelled parameter.
    Bound(BoundKind),
    /// A `!name` declaration of a new parameter.
    Declaration,
}

impl fmt::Display for StatementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatementKind::Opaque => write!(f, "opaque block"),
            StatementKind::Relation(op) => write!(f, "relation `{op}`"),
            StatementKind::Definition => write!(f, "definition"),
            StatementKind::Bound(kind) => write!(f, "bound `{}`", kind.symbol()),
            StatementKind::Declaration => write!(f, "declaration"),
        }
    }
}

/// Classify statement text.
///
/// Returns `None` if the statement contains none of the supported operators.
///
/// # Example
///
/// ```
/// use semtab_core::relation::Operator;
/// use semtab_parser::{StatementKind, classify};
///
/// assert_eq!(classify("f=~x1"), Some(StatementKind::Relation(Operator::Loading)));
/// assert_eq!(classify("{a~~b}"), Some(StatementKind::Opaque));
/// assert_eq!(classify("x1"), None);
/// ```
pub fn classify(text: &str) -> Option<StatementKind> {
    if is_opaque_block(text) {
        return Some(StatementKind::Opaque);
    }

    if let Some(op) = Operator::PRIORITY
        .into_iter()
        .find(|op| find_top_level(text, op.as_str()).is_some())
    {
        return Some(match op {
            Operator::Define => StatementKind::Definition,
            op => StatementKind::Relation(op),
        });
    }

    if let Some(kind) = [BoundKind::Lower, BoundKind::Upper]
        .into_iter()
        .find(|kind| find_top_level(text, kind.symbol()).is_some())
    {
        return Some(StatementKind::Bound(kind));
    }

    text.starts_with('!').then_some(StatementKind::Declaration)
}

/// One `modifier*variable` term of a right-hand side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Term<'a> {
    pub modifier: Option<&'a str>,
    pub variable: &'a str,
}

impl Term<'_> {
    pub fn to_modifier(&self) -> Option<Modifier> {
        self.modifier.map(|text| {
            if is_numeric_literal(text) {
                Modifier::fixed(text)
            } else {
                Modifier::label(text)
            }
        })
    }
}

/// Split `text` at `operator` and check the left-hand side.
pub(crate) fn split_relation<'a>(
    statement: &'a Statement,
    operator: &str,
    forbidden: &str,
) -> Result<(&'a str, &'a str)> {
    let text = statement.as_str();
    let Some((lhs, rhs)) = split_once(text, operator) else {
        return Err(Diagnostic::error(format!("operator `{operator}` not found"))
            .with_code(ErrorCode::E202)
            .with_label(statement.span(), "expected here"));
    };
    check_name(statement, lhs, forbidden)?;
    Ok((lhs, rhs))
}

/// Check that a left-hand side name is non-empty and free of `forbidden`.
pub(crate) fn check_name(statement: &Statement, name: &str, forbidden: &str) -> Result<()> {
    if name.is_empty() {
        return Err(Diagnostic::error("missing left-hand side")
            .with_code(ErrorCode::E200)
            .with_label(statement.span_of_str(name), "expected a name here")
            .with_secondary_label(statement.span(), "in this statement"));
    }

    if let Some(c) = name.chars().find(|c| forbidden.contains(*c)) {
        return Err(Diagnostic::error(format!(
            "left-hand side `{name}` contains `{c}`"
        ))
        .with_code(ErrorCode::E200)
        .with_label(statement.span_of_str(name), "invalid name")
        .with_help(format!(
            "names must not contain spaces or any of `{}`",
            forbidden.trim_end()
        )));
    }
    Ok(())
}

/// Split a right-hand side into terms.
///
/// Terms are separated by top-level `+`; each term is `variable` or
/// `modifier*variable`. A `NA` modifier is reported as a warning to
/// `collector`.
pub(crate) fn split_terms<'a>(
    statement: &'a Statement,
    rhs: &'a str,
    collector: &mut DiagnosticCollector,
) -> Result<Vec<Term<'a>>> {
    split_all(rhs, "+")
        .into_iter()
        .map(|term| {
            let pieces = split_all(term, "*");
            if pieces.iter().any(|piece| piece.is_empty()) {
                let span = if term.is_empty() {
                    statement.span_of_str(rhs)
                } else {
                    statement.span_of_str(term)
                };
                return Err(Diagnostic::error(format!(
                    "empty term in `{}`",
                    statement.as_str()
                ))
                .with_code(ErrorCode::E203)
                .with_label(span, "expected `variable` or `modifier*variable`"));
            }

            let term = match pieces.as_slice() {
                [variable] => Term {
                    modifier: None,
                    variable: *variable,
                },
                [modifier, variable] => Term {
                    modifier: Some(*modifier),
                    variable: *variable,
                },
                _ => {
                    return Err(Diagnostic::error(format!(
                        "term `{term}` has more than one modifier"
                    ))
                    .with_code(ErrorCode::E201)
                    .with_label(statement.span_of_str(term), "expected `modifier*variable`")
                    .with_help("use a single label or value per term"));
                }
            };

            if term.modifier == Some("NA") {
                collector.emit(
                    Diagnostic::warning("`NA` used as modifier")
                        .with_code(ErrorCode::W100)
                        .with_label(statement.span_of_str(pieces[0]), "treated as a label named `NA`")
                        .with_help(
                            "`NA` does not free a parameter; disable scale_loadings to estimate \
                             every loading and enable scale_latent_variances instead",
                        ),
                );
            }
            trace!(term:?; "Split term");
            Ok(term)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn terms(rhs: &str) -> Result<Vec<(Option<String>, String)>> {
        let statement = Statement::from(rhs);
        let mut collector = DiagnosticCollector::new();
        let terms = split_terms(&statement, statement.as_str(), &mut collector)?;
        Ok(terms
            .into_iter()
            .map(|term| (term.modifier.map(String::from), term.variable.to_string()))
            .collect())
    }

    #[test]
    fn test_classify_priority() {
        assert_eq!(
            classify("f=~x1+a~~b"),
            Some(StatementKind::Relation(Operator::Loading))
        );
        assert_eq!(
            classify("x~~y"),
            Some(StatementKind::Relation(Operator::Covariance))
        );
        assert_eq!(
            classify("y~x"),
            Some(StatementKind::Relation(Operator::Regression))
        );
        assert_eq!(classify("b:=a*2"), Some(StatementKind::Definition));
        assert_eq!(classify("b:=a>2"), Some(StatementKind::Definition));
        assert_eq!(classify("a>.2"), Some(StatementKind::Bound(BoundKind::Lower)));
        assert_eq!(classify("a<1"), Some(StatementKind::Bound(BoundKind::Upper)));
        assert_eq!(classify("!b"), Some(StatementKind::Declaration));
        assert_eq!(classify("x1"), None);
    }

    #[test]
    fn test_classify_ignores_operators_in_braces() {
        assert_eq!(classify("{raw+=anything}"), Some(StatementKind::Opaque));
        assert_eq!(classify("x{a~b}"), None);
        assert_eq!(
            classify("{a}~x"),
            Some(StatementKind::Relation(Operator::Regression))
        );
    }

    #[test]
    fn test_split_terms_with_modifiers() {
        assert_eq!(
            terms("x1+a*x2+.5*x3").expect("valid"),
            vec![
                (None, "x1".to_string()),
                (Some("a".to_string()), "x2".to_string()),
                (Some(".5".to_string()), "x3".to_string()),
            ]
        );
    }

    #[test]
    fn test_split_terms_keeps_braced_modifier() {
        assert_eq!(
            terms("{a*b}*x").expect("valid"),
            vec![(Some("{a*b}".to_string()), "x".to_string())]
        );
    }

    #[test]
    fn test_split_terms_errors() {
        let code = |rhs| terms(rhs).expect_err("invalid").code();
        assert_eq!(code("a*b*x"), Some(ErrorCode::E201));
        assert_eq!(code("x1++x2"), Some(ErrorCode::E203));
        assert_eq!(code("x1+"), Some(ErrorCode::E203));
        assert_eq!(code("*x"), Some(ErrorCode::E203));
        assert_eq!(code(""), Some(ErrorCode::E203));
    }

    #[test]
    fn test_na_modifier_warns() {
        let statement = Statement::from("NA*x1+x2");
        let mut collector = DiagnosticCollector::new();
        split_terms(&statement, statement.as_str(), &mut collector).expect("valid");

        let warnings = collector.finish().expect("warnings are not fatal");
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].code(), Some(ErrorCode::W100));
        assert_eq!(warnings[0].primary_span(), Some(semtab_core::span::Span::new(0..2)));
    }

    #[test]
    fn test_term_modifier_kind() {
        let fixed = Term {
            modifier: Some("1.0"),
            variable: "x",
        };
        let label = Term {
            modifier: Some("NA"),
            variable: "x",
        };
        assert_eq!(fixed.to_modifier(), Some(Modifier::fixed("1.0")));
        assert_eq!(label.to_modifier(), Some(Modifier::label("NA")));
    }

    #[test]
    fn test_split_relation_checks_lhs() {
        let statement = Statement::from("=~x1");
        let err = split_relation(&statement, "=~", RELATION_NAME_FORBIDDEN).expect_err("no lhs");
        assert_eq!(err.code(), Some(ErrorCode::E200));

        let statement = Statement::from("a+b~x");
        let err = split_relation(&statement, "~", RELATION_NAME_FORBIDDEN).expect_err("bad lhs");
        assert_eq!(err.code(), Some(ErrorCode::E200));

        let statement = Statement::from("y~x");
        assert_eq!(
            split_relation(&statement, "~", RELATION_NAME_FORBIDDEN).expect("valid"),
            ("y", "x")
        );
    }
}
