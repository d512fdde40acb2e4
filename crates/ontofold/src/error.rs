//! Error types for Ontofold operations.
//!
//! [`OntofoldError`] covers every fatal request-level failure. Findings that
//! do not stop a run are reported as issues next to the result instead.

use std::io;

use thiserror::Error;

use ontofold_core::identifier::Id;

use crate::structure::GraphError;

/// The main error type for Ontofold operations.
#[derive(Debug, Error)]
pub enum OntofoldError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),

    #[error("diagram `{0}` does not exist in the project")]
    UnknownDiagram(Id),

    #[error("element `{0}` is not shown on any diagram of the project")]
    UnknownElement(Id),

    #[error("element `{element}` is not shown on diagram `{diagram}`")]
    ElementNotOnDiagram { element: Id, diagram: Id },

    #[error("no diagram selected: provide a diagram or an element to abstract from")]
    NoDiagramSelected,
}
