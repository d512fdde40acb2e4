//! Errors raised while building or rewriting a model graph.

use thiserror::Error;

use ontofold_core::{identifier::Id, semantic::ElementType};

#[derive(Debug, Error)]
pub enum GraphError {
    #[error("view `{view}` references element `{element}`, which is not in the model")]
    MissingElement { view: Id, element: Id },

    #[error("element `{id}` is a {found:?}, expected a {expected:?}")]
    UnexpectedElement {
        id: Id,
        expected: ElementType,
        found: ElementType,
    },

    #[error("relation `{id}` has {ends} ends, expected 2")]
    MalformedRelation { id: Id, ends: usize },

    #[error("view `{view}` does not connect the classes of `{element}`")]
    InconsistentView { view: Id, element: Id },

    #[error("no node `{0}` in the model graph")]
    UnknownNode(Id),

    #[error("relation `{0}` is not attached to a class")]
    DetachedRelation(Id),

    #[error("element `{0}` has no view on the diagram")]
    MissingRepresentation(Id),
}
