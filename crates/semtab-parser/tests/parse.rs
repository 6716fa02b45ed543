//! End-to-end tests of the parsing pipeline.

use semtab_core::relation::{Modifier, Operator};
use semtab_parser::{clean, error::ErrorCode, parse, validate};

#[test]
fn test_lower_bound_on_label() {
    let model = parse("a > .2\nf =~ a*x1").expect("valid model");

    assert_eq!(model.table.len(), 1);
    let row = &model.table[0];
    assert_eq!(row.lhs(), "f");
    assert_eq!(row.op(), Operator::Loading);
    assert_eq!(row.rhs(), "x1");
    assert_eq!(row.modifier(), Some(&Modifier::label("a")));
    assert_eq!(row.lower_bound(), Some(".2"));
    assert_eq!(row.upper_bound(), None);
}

#[test]
fn test_dangling_continuation() {
    let err = parse("x ~;").expect_err("continuation before `;`");

    assert_eq!(err.diagnostics().len(), 1);
    assert_eq!(err.diagnostics()[0].code(), Some(ErrorCode::E002));
}

#[test]
fn test_opaque_block_is_verbatim() {
    let statements = clean("{raw += anything}").expect("balanced");
    assert_eq!(statements, vec!["{raw += anything}"]);
    assert!(validate(&statements).is_ok());

    let model = parse("{raw += anything}").expect("valid model");
    assert_eq!(model.user_defined_blocks, vec!["{raw += anything}"]);
    assert!(model.table.is_empty());
}

#[test]
fn test_loading_takes_precedence_over_covariance() {
    let model = parse("f =~ x1 + a~~b").expect("valid model");

    assert!(model.table.iter().all(|row| row.op() == Operator::Loading));
    assert_eq!(model.table[1].rhs(), "a~~b");
}

#[test]
fn test_full_model() {
    let source = r#"
        === political democracy ===
        # measurement model
        ind60 =~ x1 + x2 + x3
        dem60 =~ y1 + a*y2 + b*y3 +
                 c*y4
        # regressions
        dem60 ~ ind60
        # residual correlations
        y1 ~~ y5; y2 ~~ y4
        a > 0; a < 10
        !d
        d := b - c
        {mxAlgebra(a*2, name = "twice")}
    "#;

    let model = parse(source).expect("valid model");

    assert_eq!(model.model_name.as_deref(), Some("politicaldemocracy"));
    assert_eq!(model.table.len(), 10);
    assert_eq!(model.table[4].lower_bound(), Some("0"));
    assert_eq!(model.table[4].upper_bound(), Some("10"));
    assert_eq!(model.table[7].op(), Operator::Regression);
    assert_eq!(model.algebra.is_free("d"), Some(false));
    assert_eq!(model.algebra.definitions()[0].expression(), "b-c");
    assert_eq!(
        model.user_defined_blocks,
        vec![r#"{mxAlgebra(a*2, name = "twice")}"#]
    );
    assert!(model.warnings.is_empty());
}

#[test]
fn test_definition_fixes_labelled_rows() {
    let model = parse("y ~ a*x + b*z\nb := a^2").expect("valid model");

    assert!(model.table[0].is_free());
    assert!(!model.table[1].is_free());
}

#[test]
fn test_errors_point_into_source() {
    let source = "y ~ x\nf =~ a*b*x1";
    let err = parse(source).expect_err("ambiguous modifier");

    let diagnostic = &err.diagnostics()[0];
    assert_eq!(diagnostic.code(), Some(ErrorCode::E201));
    let span = diagnostic.primary_span().expect("labelled");
    assert_eq!(&source[span.range()], "a*b*x1");
}

#[test]
fn test_operator_not_found() {
    let err = parse("y ~ x\nx1 x2").expect_err("no operator");

    assert!(err.has_code(ErrorCode::E202));
}

#[test]
fn test_bound_symbol_inside_relation() {
    let source = "y ~ x > 0";
    let err = parse(source).expect_err("`>` only belongs to bounds");

    let diagnostic = &err.diagnostics()[0];
    assert_eq!(diagnostic.code(), Some(ErrorCode::E101));
    let span = diagnostic.primary_span().expect("labelled");
    assert_eq!(&source[span.range()], ">");
}

#[test]
fn test_header_after_leading_comment() {
    let model = parse("# my model\n=== cfa ===\nf =~ x1 + x2").expect("valid model");

    assert_eq!(model.model_name.as_deref(), Some("cfa"));
    assert_eq!(model.table.len(), 2);
}
