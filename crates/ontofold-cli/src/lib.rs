//! CLI logic for the Ontofold abstraction tool.
//!
//! Reads an OntoUML project, abstracts one of its diagrams and writes the
//! augmented project back out as JSON.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::fs;

use log::{info, warn};

use ontofold::{
    Abstractor, OntofoldError, identifier::Id, options::AbstractionOptions, semantic::Project,
};

/// Run the Ontofold CLI application
///
/// This function abstracts the selected diagram of the input project and
/// writes the resulting project, and optionally its issues, to disk.
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `OntofoldError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Malformed project JSON
/// - Unknown diagrams or elements
/// - Diagrams inconsistent with their model
pub fn run(args: &Args) -> Result<(), OntofoldError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing project"
    );

    let app_config = config::load_config(args.config.as_ref())?;

    let source = fs::read_to_string(&args.input)?;
    let project: Project = serde_json::from_str(&source)?;

    let options = AbstractionOptions {
        active_diagram_id: args.diagram.as_deref().map(Id::new),
        active_element_id: args.element.as_deref().map(Id::new),
        abstraction_rule: args.rule,
    };

    let output = Abstractor::new(app_config).abstract_project(&project, &options)?;

    for issue in &output.issues {
        warn!(
            code:% = issue.code(),
            element = issue.source().name();
            "{}", issue.description().unwrap_or_else(|| issue.title())
        );
    }

    fs::write(&args.output, serde_json::to_string_pretty(&output.result)?)?;

    if let Some(path) = &args.issues {
        fs::write(path, serde_json::to_string_pretty(&output.issues)?)?;
        info!(issues_file = path; "Issues exported");
    }

    info!(
        output_file = args.output,
        issues = output.issues.len();
        "Abstraction exported successfully"
    );

    Ok(())
}
