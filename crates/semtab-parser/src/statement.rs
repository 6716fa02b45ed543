//! Cleaned statements with source mapping.

use std::{fmt, ops::Range};

use crate::Span;

/// One cleaned statement.
///
/// The cleaner drops whitespace, comments and line continuations, so the
/// statement text is not a contiguous slice of the source. Every byte of the
/// text remembers the source offset it was copied from, which lets later
/// phases point diagnostics at the original input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    text: String,
    origins: Vec<usize>,
}

impl Statement {
    pub(crate) fn new() -> Self {
        Self {
            text: String::new(),
            origins: Vec::new(),
        }
    }

    /// Append a character copied from source offset `offset`.
    pub(crate) fn push(&mut self, c: char, offset: usize) {
        let start = self.text.len();
        self.text.push(c);
        self.origins
            .extend((0..self.text.len() - start).map(|i| offset + i));
    }

    /// Get the statement text.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Returns `true` if nothing has been appended.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// The source span covered by the whole statement.
    pub fn span(&self) -> Span {
        self.span_of(0..self.text.len())
    }

    /// The source span covered by the byte range `range` of the statement
    /// text. Ranges are clamped to the statement.
    pub fn span_of(&self, range: Range<usize>) -> Span {
        let end = range.end.min(self.origins.len());
        let start = range.start.min(end);
        match (self.origins.get(start), end.checked_sub(1)) {
            (Some(&first), Some(last)) if start < end => Span::new(first..self.origins[last] + 1),
            _ => {
                let at = self
                    .origins
                    .get(start)
                    .or(self.origins.last())
                    .copied()
                    .unwrap_or_default();
                Span::new(at..at)
            }
        }
    }

    /// The source span of a sub-slice of [`Statement::as_str`].
    ///
    /// `part` must be borrowed from this statement's text; otherwise the span
    /// of the whole statement is returned.
    pub fn span_of_str(&self, part: &str) -> Span {
        let base = self.text.as_ptr() as usize;
        let at = part.as_ptr() as usize;
        if at < base || at + part.len() > base + self.text.len() {
            return self.span();
        }
        let start = at - base;
        if part.is_empty() {
            return self.span_of(start..start);
        }
        self.span_of(start..start + part.len())
    }
}

/// A statement whose text maps byte-for-byte onto offsets `0..len`.
impl From<&str> for Statement {
    fn from(text: &str) -> Self {
        Self {
            text: text.to_string(),
            origins: (0..text.len()).collect(),
        }
    }
}

impl AsRef<str> for Statement {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

impl PartialEq<&str> for Statement {
    fn eq(&self, other: &&str) -> bool {
        self.text == *other
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn statement_from(pairs: &[(char, usize)]) -> Statement {
        let mut statement = Statement::new();
        for &(c, offset) in pairs {
            statement.push(c, offset);
        }
        statement
    }

    #[test]
    fn test_span_follows_source_offsets() {
        // "f =~ x" cleaned to "f=~x"
        let statement = statement_from(&[('f', 0), ('=', 2), ('~', 3), ('x', 5)]);

        assert_eq!(statement.as_str(), "f=~x");
        assert_eq!(statement.span(), Span::new(0..6));
        assert_eq!(statement.span_of(1..3), Span::new(2..4));
        assert_eq!(statement.span_of(3..4), Span::new(5..6));
    }

    #[test]
    fn test_span_of_str_uses_borrowed_offsets() {
        let statement = statement_from(&[('a', 10), ('*', 11), ('x', 13)]);
        let text = statement.as_str();

        assert_eq!(statement.span_of_str(&text[2..]), Span::new(13..14));
        assert_eq!(statement.span_of_str("x"), statement.span());
    }

    #[test]
    fn test_span_of_multibyte_character() {
        let statement = statement_from(&[('é', 4), ('x', 7)]);

        assert_eq!(statement.span_of(0..2), Span::new(4..6));
        assert_eq!(statement.span(), Span::new(4..8));
    }

    #[test]
    fn test_empty_range_is_empty_span() {
        let statement = Statement::from("abc");

        assert!(statement.span_of(3..3).is_empty());
        assert!(statement.span_of(1..1).is_empty());
        assert_eq!(statement.span_of(1..1).start(), 1);
    }

    #[test]
    fn test_from_str_identity_mapping() {
        let statement = Statement::from("y~x");

        assert_eq!(statement, "y~x");
        assert_eq!(statement.span(), Span::new(0..3));
    }
}
