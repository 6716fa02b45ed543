//! Severity levels for diagnostics.
//!
//! This module defines the severity of diagnostic messages,
//! distinguishing between fatal errors, advisory warnings and
//! informational notes.

use std::fmt;

/// The severity level of a diagnostic.
///
/// Severity determines how the diagnostic should be handled:
/// - [`Severity::Error`] indicates a fatal issue that aborts compilation
/// - [`Severity::Warning`] indicates an advisory issue that should be addressed
/// - [`Severity::Note`] reports a decision the compiler made on the user's behalf
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// A fatal error that prevents successful compilation.
    ///
    /// No parameter table is produced when an error is emitted.
    Error,

    /// A non-fatal warning about potential issues.
    ///
    /// Warnings indicate syntax that may not do what the user intended but
    /// doesn't prevent compilation from succeeding.
    Warning,

    /// An informational note, e.g. an automatic step that was skipped.
    Note,
}

impl Severity {
    /// Returns `true` if this is an error severity.
    pub fn is_error(&self) -> bool {
        matches!(self, Severity::Error)
    }

    /// Returns `true` if this is a warning severity.
    pub fn is_warning(&self) -> bool {
        matches!(self, Severity::Warning)
    }

    /// Returns `true` if this is a note severity.
    pub fn is_note(&self) -> bool {
        matches!(self, Severity::Note)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Note => write!(f, "note"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_predicates() {
        assert!(Severity::Error.is_error());
        assert!(Severity::Warning.is_warning());
        assert!(Severity::Note.is_note());
        assert!(!Severity::Note.is_error());
    }

    #[test]
    fn test_severity_display() {
        assert_eq!(Severity::Error.to_string(), "error");
        assert_eq!(Severity::Warning.to_string(), "warning");
        assert_eq!(Severity::Note.to_string(), "note");
    }
}
