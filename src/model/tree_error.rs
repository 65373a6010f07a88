//! Errors raised while assembling a [TangleTree](crate::model::TangleTree).

use crate::model::tree::VertexIndex;

/// Structural problems detected when a builder finishes a tree.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    #[error("tree has no vertices")]
    EmptyTree,

    #[error("strain '{0}' labels more than one leaf")]
    DuplicateStrain(String),

    #[error("vertex {index} is not connected to the root")]
    Disconnected { index: VertexIndex },

    #[error("vertex {child} is listed as child of vertex {parent}, but has another parent")]
    InconsistentParent {
        child: VertexIndex,
        parent: VertexIndex,
    },

    #[error("vertex {index} refers to child {child}, which was not added before it")]
    UnknownChild {
        index: VertexIndex,
        child: VertexIndex,
    },
}
