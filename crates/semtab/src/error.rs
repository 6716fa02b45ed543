//! Error types for semtab operations.
//!
//! This module provides the main error type [`SemtabError`] which wraps
//! the error conditions that can occur while compiling a model.

use std::io;

use thiserror::Error;

use semtab_parser::error::ParseError;

/// The main error type for semtab operations.
///
/// # Diagnostic Variants
///
/// The `Parse` variant keeps the model source next to the diagnostics, so
/// callers can render them with source snippets.
#[derive(Debug, Error)]
pub enum SemtabError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Parse { err: ParseError, src: String },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl SemtabError {
    /// Create a new `Parse` error with the associated source code.
    pub fn new_parse_error(err: ParseError, src: impl Into<String>) -> Self {
        Self::Parse {
            err,
            src: src.into(),
        }
    }
}
