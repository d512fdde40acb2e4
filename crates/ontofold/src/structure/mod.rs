//! The rewritable graph an abstraction run works on.

mod error;
mod graph_node;
mod model_graph;

pub use error::GraphError;
pub use graph_node::GraphNode;
pub use model_graph::{GraphStats, ModelGraph, Retarget};
