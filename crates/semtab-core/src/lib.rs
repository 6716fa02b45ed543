//! semtab Core Types and Definitions
//!
//! This crate provides the foundational types of a compiled structural
//! equation model. It includes:
//!
//! - **Spans**: Source locations for diagnostics ([`span::Span`])
//! - **Relations**: Single rows of a parameter table ([`relation`] module)
//! - **Parameter tables**: The ordered row collection ([`table::ParameterTable`])
//! - **Algebra**: New parameters and derived definitions ([`algebra::AlgebraBlock`])
//! - **Variables**: Latent/manifest classification ([`variables::Variables`])

pub mod algebra;
pub mod relation;
pub mod span;
pub mod table;
pub mod variables;

/// Right-hand side marker of a regression row that denotes an intercept.
pub const INTERCEPT: &str = "1";
