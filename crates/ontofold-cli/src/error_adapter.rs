//! Error adapter for converting OntofoldError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan};

use ontofold::{OntofoldError, structure::GraphError};

/// Adapter rendering an [`OntofoldError`] through miette.
pub struct ErrorAdapter<'a>(pub &'a OntofoldError);

impl ErrorAdapter<'_> {
    fn help_text(&self) -> Option<String> {
        match self.0 {
            OntofoldError::Json(err) => Some(format!(
                "the input must be an OntoUML project document (line {}, column {})",
                err.line(),
                err.column()
            )),
            OntofoldError::UnknownDiagram(_) => {
                Some("pass the id of one of the project's diagrams with --diagram".to_string())
            }
            OntofoldError::UnknownElement(_) => Some(
                "pass the id of a class drawn on the selected diagram with --element".to_string(),
            ),
            OntofoldError::ElementNotOnDiagram { .. } => Some(
                "pick an element drawn on that diagram, or omit --diagram to search them all"
                    .to_string(),
            ),
            OntofoldError::NoDiagramSelected => {
                Some("use --diagram, --element or both".to_string())
            }
            OntofoldError::Graph(GraphError::MissingElement { .. })
            | OntofoldError::Graph(GraphError::InconsistentView { .. }) => {
                Some("the diagram is out of sync with the model; re-save it and retry".to_string())
            }
            _ => None,
        }
    }
}

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(self.0)
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            OntofoldError::Io(_) => "ontofold::io",
            OntofoldError::Json(_) => "ontofold::json",
            OntofoldError::Graph(_) => "ontofold::graph",
            OntofoldError::UnknownDiagram(_)
            | OntofoldError::UnknownElement(_)
            | OntofoldError::ElementNotOnDiagram { .. }
            | OntofoldError::NoDiagramSelected => "ontofold::options",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.help_text()
            .map(|help| Box::new(help) as Box<dyn fmt::Display>)
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        None
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}

/// Wrap an [`OntofoldError`] for rendering.
pub fn to_reportable(err: &OntofoldError) -> ErrorAdapter<'_> {
    ErrorAdapter(err)
}
