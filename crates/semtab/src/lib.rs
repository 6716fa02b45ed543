//! semtab - Compile structural equation model syntax into parameter tables.
//!
//! Parsing, completion and identification for lavaan-style model syntax.
//! The result is a [`CompiledModel`] whose parameter table is ready for a
//! model-fitting engine.

pub mod complete;
pub mod config;
pub mod identify;

mod error;

pub use semtab_core::{INTERCEPT, algebra, relation, span, table, variables};
pub use semtab_parser::error::{Diagnostic, ErrorCode, ParseError, Severity};

pub use config::CompileOptions;
pub use error::SemtabError;

use std::{fmt, fs, path::Path};

use log::{debug, info, trace, warn};

use algebra::AlgebraBlock;
use table::ParameterTable;
use variables::Variables;

/// A fully compiled model.
#[derive(Debug, Clone, Default)]
pub struct CompiledModel {
    /// The completed and identified parameter table.
    pub table: ParameterTable,
    /// Declared new parameters and `:=` definitions.
    pub algebra: AlgebraBlock,
    /// Latent and manifest variables of the parsed model, before completion.
    pub variables: Variables,
    /// `{...}` statements, verbatim.
    pub user_defined_blocks: Vec<String>,
    /// Warnings and notes from every stage, in emission order.
    pub warnings: Vec<Diagnostic>,
    /// Name from the `=== name ===` header, if any.
    pub model_name: Option<String>,
}

/// Renders the model as syntax that compiles back to the same table:
/// the name header, the rows with their bounds, the algebra block and the
/// user-defined blocks.
impl fmt::Display for CompiledModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(name) = &self.model_name {
            writeln!(f, "=== {name} ===")?;
        }
        write!(f, "{}", self.table)?;
        if !self.algebra.is_empty() {
            write!(f, "{}", self.algebra)?;
        }
        for block in &self.user_defined_blocks {
            writeln!(f, "{block}")?;
        }
        Ok(())
    }
}

/// Compiler for model syntax.
///
/// # Examples
///
/// ```
/// use semtab::{CompileOptions, ModelCompiler};
///
/// let compiler = ModelCompiler::new(CompileOptions::default());
/// let model = compiler.compile("f =~ x1 + x2 + x3").expect("valid model");
///
/// assert_eq!(model.table[0].to_string(), "f =~ 1.0*x1");
/// assert!(model.variables.is_latent("f"));
///
/// // Or use default options
/// let compiler = ModelCompiler::default();
/// ```
#[derive(Debug, Default)]
pub struct ModelCompiler {
    options: CompileOptions,
}

impl ModelCompiler {
    /// Create a new compiler with the given options.
    pub fn new(options: CompileOptions) -> Self {
        Self { options }
    }

    /// Returns the options used by this compiler.
    pub fn options(&self) -> &CompileOptions {
        &self.options
    }

    /// Compile model syntax.
    ///
    /// Runs, in order: parsing, variable classification, completion
    /// (variances, intercepts, latent then manifest covariances) and
    /// identification (latent variances, then loadings). Passes disabled in
    /// the options are skipped; both scaling passes may run together.
    ///
    /// # Errors
    ///
    /// Returns `SemtabError::Parse` for malformed syntax. No partial table is
    /// returned.
    pub fn compile(&self, source: &str) -> Result<CompiledModel, SemtabError> {
        info!("Compiling model");
        let parsed = semtab_parser::parse(source)
            .map_err(|err| SemtabError::new_parse_error(err, source))?;
        debug!(rows = parsed.table.len(); "Model parsed successfully");

        let mut table = parsed.table;
        let mut warnings = parsed.warnings;
        let variables = table.variables();
        trace!(variables:?; "Classified variables");

        let options = &self.options;
        if options.add_variances {
            complete::add_variances(&mut table);
        }
        if options.add_intercepts {
            complete::add_intercepts(&mut table, variables.manifests());
        }
        if options.add_exogenous_latent_covariances {
            complete::add_covariances(&mut table, variables.latents());
        }
        if options.add_exogenous_manifest_covariances {
            complete::add_covariances(&mut table, variables.manifests());
        }

        if options.scale_latent_variances && options.scale_loadings {
            warn!("Scaling latents by both variance and first loading");
        }
        if options.scale_latent_variances {
            warnings.extend(identify::scale_latent_variances(&mut table, variables.latents()));
        }
        if options.scale_loadings {
            warnings.extend(identify::scale_loadings(&mut table, variables.latents()));
        }

        info!(rows = table.len(), warnings = warnings.len(); "Model compiled");
        Ok(CompiledModel {
            table,
            algebra: parsed.algebra,
            variables,
            user_defined_blocks: parsed.user_defined_blocks,
            warnings,
            model_name: parsed.model_name,
        })
    }

    /// Read and compile a model file.
    ///
    /// # Errors
    ///
    /// Returns `SemtabError::Io` if the file cannot be read, otherwise the
    /// errors of [`ModelCompiler::compile`].
    pub fn compile_file(&self, path: impl AsRef<Path>) -> Result<CompiledModel, SemtabError> {
        let path = path.as_ref();
        info!(path:? = path; "Reading model file");
        let source = fs::read_to_string(path)?;
        self.compile(&source)
    }
}

/// Compile model syntax with the given options.
///
/// Shorthand for `ModelCompiler::new(options).compile(source)`.
///
/// # Example
///
/// ```
/// use semtab::{CompileOptions, compile};
///
/// let model = compile("y ~ x", CompileOptions::parse_only()).expect("valid model");
/// assert_eq!(model.table.len(), 1);
/// ```
pub fn compile(source: &str, options: CompileOptions) -> Result<CompiledModel, SemtabError> {
    ModelCompiler::new(options).compile(source)
}
