//! Cleaning of raw model text into statements.
//!
//! The cleaner strips whitespace and comments, joins continuation lines and
//! splits the text at newlines and semicolons. Brace blocks are copied
//! verbatim, newlines included.

use log::trace;

use crate::{
    Span,
    error::{Diagnostic, ErrorCode, ParseError},
    lexer::{PositionedToken, Token, tokenize},
    statement::Statement,
};

/// Characters that leave a statement open across a line break.
const CONTINUATION_CHARS: &[char] = &['+', '*', '=', '~', ':'];

/// Split raw model text into cleaned statements.
///
/// Fails on the first unbalanced brace or on a `;` that ends a statement
/// right after an operator.
///
/// # Example
///
/// ```
/// use semtab_parser::clean;
///
/// let statements = clean("f =~ x1 +\n     x2 # loadings\ny ~ f; x1 ~~ x2").unwrap();
/// assert_eq!(statements, vec!["f=~x1+x2", "y~f", "x1~~x2"]);
/// ```
pub fn clean(source: &str) -> Result<Vec<Statement>, ParseError> {
    clean_from(source, 0)
}

/// Clean `source`, which starts at byte offset `base` of the full input.
pub(crate) fn clean_from(source: &str, base: usize) -> Result<Vec<Statement>, ParseError> {
    let mut cleaner = Cleaner::default();
    for token in tokenize(source, base)? {
        cleaner.feed(token)?;
    }
    let statements = cleaner.finish();
    trace!(statements:?; "Cleaned source");
    Ok(statements)
}

#[derive(Debug, Default)]
struct Cleaner {
    statements: Vec<Statement>,
    buffer: Option<Statement>,
    open: bool,
}

impl Cleaner {
    fn feed(&mut self, PositionedToken { token, span }: PositionedToken<'_>) -> Result<(), Diagnostic> {
        match token {
            Token::Whitespace | Token::Comment => {}
            Token::Newline => {
                if !self.open {
                    self.flush();
                }
            }
            Token::Semicolon => {
                if self.open {
                    let statement_span = self
                        .buffer
                        .as_ref()
                        .map_or(span, |buffer| buffer.span().union(span));
                    return Err(Diagnostic::error("statement ends with an operator before `;`")
                        .with_code(ErrorCode::E002)
                        .with_label(span, "statement cannot continue past `;`")
                        .with_secondary_label(statement_span, "incomplete statement")
                        .with_help("complete the statement or continue it on the next line"));
                }
                self.flush();
            }
            Token::CloseBrace => {
                return Err(Diagnostic::error("unmatched `}`")
                    .with_code(ErrorCode::E001)
                    .with_label(span, "no `{` to close"));
            }
            Token::Block(block) => {
                self.append(block, span);
                self.open = false;
            }
            Token::Text(text) => {
                self.append(text, span);
                self.open = text.ends_with(CONTINUATION_CHARS);
            }
        }
        Ok(())
    }

    fn append(&mut self, text: &str, span: Span) {
        let buffer = self.buffer.get_or_insert_with(Statement::new);
        for (offset, c) in text.char_indices() {
            buffer.push(c, span.start() + offset);
        }
    }

    fn flush(&mut self) {
        if let Some(statement) = self.buffer.take().filter(|buffer| !buffer.is_empty()) {
            self.statements.push(statement);
        }
    }

    fn finish(mut self) -> Vec<Statement> {
        self.flush();
        self.statements
    }
}


#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use super::*;

    // ===================
    // Strategies
    // ===================

    /// A statement already free of whitespace, comments and continuations.
    fn clean_statement_strategy() -> impl Strategy<Value = String> {
        (
            "[a-z][a-z0-9_]{0,5}",
            prop_oneof![Just("=~"), Just("~~"), Just("~")],
            "[a-z][a-z0-9]{0,5}",
        )
            .prop_map(|(lhs, op, rhs)| format!("{lhs}{op}{rhs}"))
    }

    fn brace_text_strategy() -> impl Strategy<Value = String> {
        "[ab{}\n ]{0,24}"
    }

    // ===================
    // Property Test Functions
    // ===================

    /// Cleaning already clean statements returns them unchanged.
    fn check_clean_round_trip(statements: &[String], separator: &str) -> Result<(), TestCaseError> {
        let source = statements.join(separator);
        let cleaned = clean(&source).map_err(|err| TestCaseError::fail(err.to_string()))?;
        let texts: Vec<&str> = cleaned.iter().map(Statement::as_str).collect();
        prop_assert_eq!(texts, statements.iter().map(String::as_str).collect::<Vec<_>>());
        Ok(())
    }

    /// `clean` reports unbalanced braces exactly when the braces are unbalanced.
    fn check_brace_balance(text: &str) -> Result<(), TestCaseError> {
        let mut depth = 0i32;
        let mut balanced = true;
        for c in text.chars() {
            match c {
                '{' => depth += 1,
                '}' => depth -= 1,
                _ => {}
            }
            if depth < 0 {
                balanced = false;
                break;
            }
        }
        balanced &= depth == 0;

        match clean(text) {
            Ok(_) => prop_assert!(balanced, "`{text:?}` accepted"),
            Err(err) => {
                prop_assert!(!balanced, "`{text:?}` rejected");
                prop_assert!(err.has_code(ErrorCode::E001));
            }
        }
        Ok(())
    }

    // ===================
    // Proptest Wrappers
    // ===================

    proptest! {
        #[test]
        fn clean_round_trip(
            statements in prop::collection::vec(clean_statement_strategy(), 0..8),
            separator in prop_oneof![Just("\n"), Just(";"), Just(" ;\n")],
        ) {
            check_clean_round_trip(&statements, separator)?;
        }

        #[test]
        fn brace_balance(text in brace_text_strategy()) {
            check_brace_balance(&text)?;
        }
    }
}
