//! Brace-aware splitting primitives.
//!
//! Text inside `{...}` is opaque: operators and delimiters that appear in a
//! brace region never split the surrounding statement. Only top-level
//! occurrences (brace depth 0) are considered by every function here.

use winnow::{
    Parser as _,
    combinator::alt,
    stream::{LocatingSlice, Location as _, Stream as _},
    token::{any, literal},
};

use crate::lexer::{IResult, Input, brace_block};

/// Byte offset of the first top-level occurrence of `pattern` in `text`.
pub fn find_top_level(text: &str, pattern: &str) -> Option<usize> {
    TopLevelMatches::new(text, pattern).next()
}

/// Split `text` once at the first top-level occurrence of `operator`.
///
/// Returns `None` if the operator does not occur outside of braces.
///
/// # Example
///
/// ```
/// use semtab_parser::split_once;
///
/// assert_eq!(split_once("f=~x1+x2", "=~"), Some(("f", "x1+x2")));
/// assert_eq!(split_once("{a:=b}", ":="), None);
/// ```
pub fn split_once<'a>(text: &'a str, operator: &str) -> Option<(&'a str, &'a str)> {
    let at = find_top_level(text, operator)?;
    Some((&text[..at], &text[at + operator.len()..]))
}

/// Split `text` at every top-level occurrence of `delimiter`.
///
/// Empty pieces are kept, so joining the result with `delimiter` gives back
/// the input.
///
/// # Example
///
/// ```
/// use semtab_parser::split_all;
///
/// assert_eq!(split_all("a*x1+{b+c}*x2", "+"), vec!["a*x1", "{b+c}*x2"]);
/// assert_eq!(split_all("x1++x2", "+"), vec!["x1", "", "x2"]);
/// ```
pub fn split_all<'a>(text: &'a str, delimiter: &str) -> Vec<&'a str> {
    let mut pieces = Vec::new();
    let mut start = 0;
    for at in TopLevelMatches::new(text, delimiter) {
        pieces.push(&text[start..at]);
        start = at + delimiter.len();
    }
    pieces.push(&text[start..]);
    pieces
}

/// Returns `true` if `text` is a single brace block: it starts with `{` and
/// the brace closing that first `{` is the last character.
pub fn is_opaque_block(text: &str) -> bool {
    let mut input = LocatingSlice::new(text);
    brace_block(&mut input).is_ok() && input.is_empty()
}

/// Iterator over byte offsets of non-overlapping top-level matches.
struct TopLevelMatches<'a> {
    input: Input<'a>,
    pattern: &'a str,
}

impl<'a> TopLevelMatches<'a> {
    fn new(text: &'a str, pattern: &'a str) -> Self {
        Self {
            input: LocatingSlice::new(text),
            pattern,
        }
    }
}

impl Iterator for TopLevelMatches<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        if self.pattern.is_empty() {
            return None;
        }

        while !self.input.is_empty() {
            let at = self.input.current_token_start();
            let found: IResult<&str> = literal(self.pattern).parse_next(&mut self.input);
            if found.is_ok() {
                return Some(at);
            }
            // An unclosed `{` hides the rest of the text.
            let skipped: IResult<&str> = alt((brace_block, any.take())).parse_next(&mut self.input);
            if skipped.is_err() {
                self.input.finish();
                return None;
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_once_at_first_occurrence() {
        assert_eq!(split_once("y~x1+x2", "~"), Some(("y", "x1+x2")));
        assert_eq!(split_once("a>b>c", ">"), Some(("a", "b>c")));
    }

    #[test]
    fn test_split_once_missing_operator() {
        assert_eq!(split_once("x1", "~"), None);
        assert_eq!(split_once("", "~"), None);
    }

    #[test]
    fn test_split_once_skips_brace_regions() {
        assert_eq!(split_once("{a~b}~c", "~"), Some(("{a~b}", "c")));
        assert_eq!(find_top_level("{x:=y}", ":="), None);
    }

    #[test]
    fn test_split_once_longer_operator() {
        assert_eq!(split_once("f=~x", "=~"), Some(("f", "x")));
        assert_eq!(split_once("x~~y", "~~"), Some(("x", "y")));
        assert_eq!(split_once("b:=a*2", ":="), Some(("b", "a*2")));
    }

    #[test]
    fn test_split_all_keeps_empty_pieces() {
        assert_eq!(split_all("x1+", "+"), vec!["x1", ""]);
        assert_eq!(split_all("", "+"), vec![""]);
        assert_eq!(split_all("a*b*c", "*"), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_split_all_respects_nested_braces() {
        assert_eq!(
            split_all("{a+{b+c}}+d+{e}", "+"),
            vec!["{a+{b+c}}", "d", "{e}"]
        );
    }

    #[test]
    fn test_split_all_unclosed_brace_swallows_rest() {
        assert_eq!(split_all("a+{b+c", "+"), vec!["a", "{b+c"]);
        assert_eq!(split_all("a+{b{c}+d", "+"), vec!["a", "{b{c}+d"]);
    }

    #[test]
    fn test_stray_close_brace_is_plain_text() {
        assert_eq!(split_all("a}+b", "+"), vec!["a}", "b"]);
    }

    #[test]
    fn test_matches_do_not_overlap() {
        assert_eq!(split_all("~~~~", "~~"), vec!["", "", ""]);
    }

    #[test]
    fn test_is_opaque_block() {
        assert!(is_opaque_block("{raw+=anything}"));
        assert!(is_opaque_block("{a{b}c}"));
        assert!(!is_opaque_block("{a}b"));
        assert!(!is_opaque_block("{a}{b}"));
        assert!(!is_opaque_block("a{b}"));
        assert!(!is_opaque_block("{unclosed"));
    }
}
