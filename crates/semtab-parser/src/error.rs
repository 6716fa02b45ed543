//! Error and diagnostic system for the semtab parser.
//!
//! This module provides an error handling system with:
//! - Error codes for documentation and searchability
//! - Multiple labeled spans for rich error context
//! - Severity levels
//! - Diagnostic collector for accumulating multiple errors
//!
//! # Overview
//!
//! The error system is built around the [`Diagnostic`] type, which represents
//! a single error, warning or note with optional error code, multiple source
//! locations, and help text. Fatal diagnostics are wrapped in [`ParseError`]
//! for returning from the parsing lifecycle; non-fatal ones are returned next
//! to a successful result.
//!
//! # Example
//!
//! ```
//! # use semtab_parser::error::{Diagnostic, ErrorCode};
//! # use semtab_parser::Span;
//!
//! let span = Span::new(12..20);
//! let statement_span = Span::new(0..20);
//!
//! let diag = Diagnostic::error("no relation carries the label `a`")
//!     .with_code(ErrorCode::E300)
//!     .with_label(span, "bound on unknown parameter")
//!     .with_secondary_label(statement_span, "in this statement")
//!     .with_help("attach the label to a relation, e.g. `f =~ a*x1`");
//! ```

mod collector;
mod diagnostic;
mod error_code;
mod label;
mod parse_error;
mod severity;

pub(crate) use collector::DiagnosticCollector;
pub(crate) use parse_error::Result;

pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;
pub use label::Label;
pub use parse_error::ParseError;
pub use severity::Severity;
