//! Data model for trees in a tanglegram.
//!
//! # Tree representation
//! Trees are represented by [TangleTree], which uses the arena pattern to store
//! [Vertex] nodes, referenced by [VertexIndex]. Vertices have any number of
//! ordered children; the order is the drawing order, top to bottom.
//!
//! Besides the arena, a tree keeps two non-owning views:
//! - a flattened post-order list of vertex indices ([`TangleTree::nodes`])
//! - a table from strain identifier to leaf ([`TangleTree::leaf_for_strain`])
//!
//! # Building trees
//! Trees are typically constructed during parsing via the [TreeBuilder]
//! trait, which decouples parsers from concrete tree types.
//! [TangleTreeBuilder] produces [TangleTree]s with leaf counts, strain table
//! and initial layout in place.

pub mod tree;
pub mod tree_builder;
pub mod tree_error;
pub mod vertex;

pub use tree::{PostOrderIter, PreOrderIter, TangleTree, VertexIndex};
pub use tree_builder::{TangleTreeBuilder, TreeBuilder};
pub use tree_error::TreeError;
pub use vertex::{BranchLength, Vertex};
