//! CLI logic for the semtab model compiler.
//!
//! Reads a model file, compiles it into a parameter table and writes the
//! rendered model to a file or standard output.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::{fs, io::Write};

use log::{info, warn};
use miette::GraphicalReportHandler;

use semtab::{ModelCompiler, SemtabError};

use error_adapter::warning_reportables;

/// Run the semtab CLI application
///
/// Compiles the input file with the loaded compile options. Warnings are
/// logged with source snippets; the compiled model is written to the output
/// path, or to standard output when none is given.
///
/// # Errors
///
/// Returns `SemtabError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Parsing errors
pub fn run(args: &Args) -> Result<(), SemtabError> {
    info!(
        input_path = args.input,
        output_path:? = args.output;
        "Compiling model"
    );

    let app_config = config::load_config(args.config.as_ref())?;

    let source = fs::read_to_string(&args.input)?;

    let compiler = ModelCompiler::new(*app_config.compile());
    let model = compiler.compile(&source)?;

    let reporter = GraphicalReportHandler::new();
    for reportable in warning_reportables(&model.warnings, &source) {
        let mut writer = String::new();
        if reporter.render_report(&mut writer, &reportable).is_ok() {
            warn!("{writer}");
        }
    }

    let rendered = model.to_string();
    match &args.output {
        Some(output) => {
            fs::write(output, rendered)?;
            info!(output_file = output, rows = model.table.len(); "Parameter table written");
        }
        None => {
            std::io::stdout().lock().write_all(rendered.as_bytes())?;
        }
    }

    Ok(())
}
