//! Character-level validation of cleaned statements.

use log::debug;

use crate::{
    Span,
    classify::{StatementKind, classify},
    error::{Diagnostic, DiagnosticCollector, ErrorCode, ParseError, Result},
    split::{is_opaque_block, split_once},
    statement::Statement,
};

/// Non-alphanumeric characters allowed anywhere outside of brace regions.
const ALLOWED_SYMBOLS: &[char] = &['_', '=', '~', '*', '+', '-', '.'];

/// Validate cleaned statements.
///
/// Every statement must start with a letter, `_`, `!` or `{`, and contain
/// only supported characters outside of brace regions. `<` and `>` belong to
/// bounds, `!` only leads a declaration and `:` only appears in the `:=` of a
/// definition, whose expression is not checked. All invalid statements are
/// reported.
///
/// # Example
///
/// ```
/// use semtab_parser::{Statement, validate};
///
/// let ok = [Statement::from("f=~a*x1"), Statement::from("a>.2")];
/// assert!(validate(&ok).is_ok());
///
/// let bad = [Statement::from("1x~y"), Statement::from("y~x$")];
/// assert_eq!(validate(&bad).unwrap_err().diagnostics().len(), 2);
/// ```
pub fn validate(statements: &[Statement]) -> std::result::Result<(), ParseError> {
    let mut collector = DiagnosticCollector::new();
    for statement in statements {
        collector.capture(validate_statement(statement));
    }
    let diagnostics = collector.finish()?;
    debug!(statements = statements.len(), warnings = diagnostics.len(); "Statements validated");
    Ok(())
}

fn validate_statement(statement: &Statement) -> Result<()> {
    let text = statement.as_str();
    let Some(first) = text.chars().next() else {
        return Ok(());
    };

    if !(first.is_alphabetic() || matches!(first, '_' | '!' | '{')) {
        return Err(Diagnostic::error(format!("statement `{text}` has an invalid start"))
            .with_code(ErrorCode::E100)
            .with_label(statement.span_of(0..first.len_utf8()), "unexpected character")
            .with_help("statements start with a variable or parameter name, e.g. `y1 ~ x` or `a > .4`"));
    }

    if is_opaque_block(text) {
        return Ok(());
    }

    // (start of the checked part, the checked part, extra allowed symbol)
    let (start, checked, bound_symbol) = match classify(text) {
        Some(StatementKind::Definition) => {
            (0, split_once(text, ":=").map_or(text, |(name, _)| name), None)
        }
        Some(StatementKind::Declaration) => (1, &text[1..], None),
        Some(StatementKind::Bound(kind)) => (0, text, Some(kind.symbol())),
        _ => (0, text, None),
    };

    let mut depth = 0usize;
    for (at, c) in checked.char_indices() {
        let at = start + at;
        match c {
            '{' => depth += 1,
            '}' => depth = depth.saturating_sub(1),
            _ if depth > 0 => {}
            c if c.is_alphanumeric() || ALLOWED_SYMBOLS.contains(&c) => {}
            c if bound_symbol.is_some_and(|symbol| symbol.contains(c)) => {}
            c => {
                let span: Span = statement.span_of(at..at + c.len_utf8());
                return Err(Diagnostic::error(format!("unsupported character `{c}`"))
                    .with_code(ErrorCode::E101)
                    .with_label(span, "not allowed here")
                    .with_secondary_label(statement.span(), "in this statement")
                    .with_help("wrap verbatim text in `{...}`"));
            }
        }
    }
    Ok(())
}
