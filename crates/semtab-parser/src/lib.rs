//! # semtab Parser
//!
//! Parser for lavaan-style structural equation model syntax. This crate
//! turns model text into a [`ParsedModel`]: the parameter table, the
//! algebra block and the verbatim user-defined blocks, before any
//! automatic completion.
//!
//! ## Usage
//!
//! ```
//! # use semtab_parser::{parse, error::ParseError};
//!
//! fn main() -> Result<(), ParseError> {
//!     let source = r#"
//!         === mediation ===
//!         m ~ a*x
//!         y ~ b*m + x
//!         ab := a*b
//!     "#;
//!
//!     let model = parse(source)?;
//!     assert_eq!(model.model_name.as_deref(), Some("mediation"));
//!     assert_eq!(model.table.len(), 3);
//!     Ok(())
//! }
//! ```

mod builder;
mod classify;
mod clean;
pub mod error;
mod header;
mod lexer;
mod number;
mod split;
mod statement;
mod validate;

pub use builder::{ParsedModel, build};
pub use classify::{BoundKind, StatementKind, classify};
pub use clean::clean;
pub use header::{ModelSource, split_model_name};
pub use number::is_numeric_literal;
pub use semtab_core::span::Span;
pub use split::{find_top_level, is_opaque_block, split_all, split_once};
pub use statement::Statement;
pub use validate::validate;

use log::{debug, info};

use error::{Diagnostic, ErrorCode, ParseError};

/// Parse model text into a [`ParsedModel`].
///
/// This is the main entry point of the crate. It runs the parsing pipeline:
///
/// 1. **Header** - Split off an optional `=== name ===` line
/// 2. **Clean** - Strip whitespace and comments, split into statements
/// 3. **Validate** - Check statement starts and characters
/// 4. **Build** - Classify statements and fill the parameter table
///
/// # Errors
///
/// Returns a [`ParseError`] holding every diagnostic of the first failing
/// phase. Warnings of a successful parse are in [`ParsedModel::warnings`].
pub fn parse(source: &str) -> Result<ParsedModel, ParseError> {
    info!(bytes = source.len(); "Parsing model");

    // Step 1: Header
    let header = split_model_name(source);

    // Step 2: Clean
    let statements = clean::clean_from(header.syntax(), header.offset())?;
    debug!(statements = statements.len(); "Source cleaned");
    if statements.is_empty() {
        let at = source.len();
        return Err(Diagnostic::error("found no model in the source")
            .with_code(ErrorCode::E003)
            .with_label(Span::new(header.offset()..at), "expected model statements")
            .with_help("add relations such as `f =~ x1 + x2`")
            .into());
    }

    // Step 3: Validate
    validate(&statements)?;

    // Step 4: Build
    let mut model = build(&statements)?;
    model.model_name = header.into_name();
    info!(rows = model.table.len(), warnings = model.warnings.len(); "Model parsed");
    Ok(model)
}
