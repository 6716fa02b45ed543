//! Error codes for the semtab diagnostic system.
//!
//! Error codes are organized by phase:
//! - `E0xx` - Cleaner errors
//! - `E1xx` - Validation errors
//! - `E2xx` - Statement splitting errors
//! - `E3xx` - Table building errors
//! - `W1xx` - Syntax warnings
//! - `W2xx` - Identification warnings and notes

use std::fmt;

/// Error codes for categorizing diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // Cleaner Errors (E0xx)
    // =========================================================================
    /// Unbalanced braces.
    ///
    /// A `}` was found without a matching `{`, or the input ended inside a
    /// brace block.
    E001,

    /// Dangling continuation.
    ///
    /// A statement was terminated with `;` right after an operator character
    /// (e.g., `x ~;`), so it cannot continue on the next line.
    E002,

    /// Missing model.
    ///
    /// The input contains no statements after the optional model name header.
    E003,

    // =========================================================================
    // Validation Errors (E1xx)
    // =========================================================================
    /// Invalid statement start.
    ///
    /// Statements must start with a letter, `_`, `!` or `{`.
    E100,

    /// Invalid character.
    ///
    /// A character outside of a brace block is not supported by the syntax.
    E101,

    // =========================================================================
    // Splitting Errors (E2xx)
    // =========================================================================
    /// Invalid left-hand side.
    ///
    /// The left-hand side of a relation, definition or declaration is empty
    /// or contains an operator character or a space.
    E200,

    /// Ambiguous modifier.
    ///
    /// A right-hand side term contains more than one `*`.
    E201,

    /// Operator not found.
    ///
    /// The statement contains none of the supported operators.
    E202,

    /// Empty term.
    ///
    /// A right-hand side term or one of its `*` pieces is empty (e.g., `f =~ x1 + + x2`).
    E203,

    // =========================================================================
    // Table Building Errors (E3xx)
    // =========================================================================
    /// Unknown bound target.
    ///
    /// A bound refers to a label that no relation carries.
    E300,

    // =========================================================================
    // Syntax Warnings (W1xx)
    // =========================================================================
    /// `NA` used as modifier.
    ///
    /// `NA*x` is treated as a label called `NA`; it does not free a parameter.
    W100,

    // =========================================================================
    // Identification Warnings (W2xx)
    // =========================================================================
    /// Scaling already manual.
    ///
    /// A latent variable was already scaled by a fixed value, so automatic
    /// scaling was skipped.
    W200,

    /// Scaling conflict.
    ///
    /// The parameter chosen for automatic scaling carries a label instead of
    /// a fixed value.
    W201,

    /// Identification failed.
    ///
    /// No unlabeled parameter was available to fix the scale of a latent
    /// variable.
    W202,
}

impl ErrorCode {
    /// Returns the numeric code as a string (e.g., "E001").
    pub fn as_str(&self) -> &'static str {
        match self {
            // Cleaner errors
            ErrorCode::E001 => "E001",
            ErrorCode::E002 => "E002",
            ErrorCode::E003 => "E003",
            // Validation errors
            ErrorCode::E100 => "E100",
            ErrorCode::E101 => "E101",
            // Splitting errors
            ErrorCode::E200 => "E200",
            ErrorCode::E201 => "E201",
            ErrorCode::E202 => "E202",
            ErrorCode::E203 => "E203",
            // Table building errors
            ErrorCode::E300 => "E300",
            // Warnings
            ErrorCode::W100 => "W100",
            ErrorCode::W200 => "W200",
            ErrorCode::W201 => "W201",
            ErrorCode::W202 => "W202",
        }
    }

    /// Returns a short description of what this error code means.
    pub fn description(&self) -> &'static str {
        match self {
            // Cleaner errors
            ErrorCode::E001 => "unbalanced braces",
            ErrorCode::E002 => "dangling continuation",
            ErrorCode::E003 => "missing model",
            // Validation errors
            ErrorCode::E100 => "invalid statement start",
            ErrorCode::E101 => "invalid character",
            // Splitting errors
            ErrorCode::E200 => "invalid left-hand side",
            ErrorCode::E201 => "ambiguous modifier",
            ErrorCode::E202 => "operator not found",
            ErrorCode::E203 => "empty term",
            // Table building errors
            ErrorCode::E300 => "unknown bound target",
            // Warnings
            ErrorCode::W100 => "NA used as modifier",
            ErrorCode::W200 => "scaling already manual",
            ErrorCode::W201 => "scaling conflict",
            ErrorCode::W202 => "identification failed",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
