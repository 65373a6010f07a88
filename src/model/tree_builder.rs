//! Trait and implementation for constructing trees during parsing.
//!
//! The [`TreeBuilder`] trait decouples parsers from concrete tree representations.
//! Parsers call builder methods as they read Newick syntax, and the
//! builder assembles whatever tree structure it wants.
//!
//! # Built-in implementation
//! * [`TangleTreeBuilder`] - Builds [`TangleTree`], ready for untangling:
//!   flattened post-order, leaf counts, strain lookup and an initial layout
//!   are all in place once [`finish_tree`](TreeBuilder::finish_tree) returns.
//!
//! # Builder lifecycle
//! A builder can construct multiple trees sequentially:
//!
//! ```text
//! Empty ──→ init_next() ──→ Building ──→ add_*/set_name ──→ finish_tree() ──→ Empty
//!   ↑                                                                           │
//!   └───────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Vertices are added bottom-up: children before their parent.
//! The vertex added last becomes the root.

use crate::layout;
use crate::model::tree::{TangleTree, VertexIndex};
use crate::model::tree_error::TreeError;
use crate::model::vertex::{BranchLength, Vertex};
use std::collections::HashMap;

// =#========================================================================#=
// TREE BUILDER (trait)
// =#========================================================================T=
/// Abstraction for constructing trees during parsing.
///
/// Parsers are generic over this trait, calling its methods as they encounter
/// leaves and internal vertices in the input. The parser drives the lifecycle:
///
/// 1. [`init_next`](Self::init_next) -> prepare for a new tree
/// 2. [`add_leaf`](Self::add_leaf), [`add_internal`](Self::add_internal) -> build structure
/// 3. [`set_name`](Self::set_name) -> optionally assign a name
/// 4. [`finish_tree`](Self::finish_tree) -> finalize and return the tree
pub trait TreeBuilder {
    /// The type used to identify vertices during construction.
    ///
    /// Returned by the `add_*` methods, then passed to subsequent calls to
    /// connect parent-child relationships.
    type VertexIdx: Copy;

    /// The tree type produced by this builder.
    type Tree;

    /// Prepares the builder for constructing a new tree.
    ///
    /// # Arguments
    /// * `num_leaves` — Expected number of leaves (hint for allocation)
    fn init_next(&mut self, num_leaves: usize);

    /// Adds a leaf vertex to the tree under construction.
    ///
    /// # Arguments
    /// * `branch_len` — Branch length to parent, if specified in the Newick
    /// * `label` — Strain of the leaf, `None` for an unlabelled leaf
    fn add_leaf(&mut self, branch_len: Option<f64>, label: Option<String>) -> Self::VertexIdx;

    /// Adds an internal vertex with the given children, in drawing order.
    ///
    /// # Arguments
    /// * `children` — Indices returned by previous `add_*` calls
    /// * `branch_len` — Branch length to parent, if specified
    /// * `label` — Optional name of the internal vertex
    fn add_internal(
        &mut self,
        children: Vec<Self::VertexIdx>,
        branch_len: Option<f64>,
        label: Option<String>,
    ) -> Self::VertexIdx;

    /// Sets the name of the currently constructed tree.
    fn set_name(&mut self, tree_name: String);

    /// Finalizes the building process and returns the resulting tree.
    ///
    /// Transitions builder from a "construction" state to an "empty" state.
    fn finish_tree(&mut self) -> Result<Self::Tree, TreeError>;
}

// =#========================================================================#=
// TANGLE TREE BUILDER
// =#========================================================================$=
/// Builder that constructs [TangleTree] instances.
///
/// # Example
/// ```
/// use tanglegram::model::{TangleTreeBuilder, TreeBuilder};
///
/// let mut builder = TangleTreeBuilder::new();
/// builder.init_next(3);
/// let a = builder.add_leaf(Some(1.0), Some("A".to_string()));
/// let b = builder.add_leaf(Some(1.0), Some("B".to_string()));
/// let c = builder.add_leaf(Some(2.0), Some("C".to_string()));
/// let ab = builder.add_internal(vec![a, b], Some(1.0), None);
/// builder.add_internal(vec![ab, c], None, None);
///
/// let tree = builder.finish_tree()?;
/// assert_eq!(tree.num_leaves(), 3);
/// assert_eq!(tree.leaf_for_strain("C").unwrap().y_value(), 3.0);
/// # Ok::<(), tanglegram::model::TreeError>(())
/// ```
#[derive(Debug, Default)]
pub struct TangleTreeBuilder {
    vertices: Vec<Vertex>,
    name: Option<String>,
}

impl TangleTreeBuilder {
    /// Creates a new builder in the empty state.
    pub fn new() -> Self {
        Self::default()
    }
}

impl TreeBuilder for TangleTreeBuilder {
    type VertexIdx = VertexIndex;
    type Tree = TangleTree;

    fn init_next(&mut self, num_leaves: usize) {
        // Capacity of a binary tree; multifurcations need fewer
        self.vertices = Vec::with_capacity((2 * num_leaves).saturating_sub(1));
        self.name = None;
    }

    fn add_leaf(&mut self, branch_len: Option<f64>, label: Option<String>) -> VertexIndex {
        let index = self.vertices.len();
        self.vertices.push(Vertex::new_leaf(
            index,
            branch_len.map(BranchLength::new),
            label,
        ));
        index
    }

    fn add_internal(
        &mut self,
        children: Vec<VertexIndex>,
        branch_len: Option<f64>,
        label: Option<String>,
    ) -> VertexIndex {
        let index = self.vertices.len();
        // Unknown children are reported by finish_tree
        for &child in &children {
            if let Some(vertex) = self.vertices.get_mut(child) {
                vertex.set_parent(index);
            }
        }
        self.vertices.push(Vertex::new_internal(
            index,
            children,
            branch_len.map(BranchLength::new),
            label,
        ));
        index
    }

    fn set_name(&mut self, tree_name: String) {
        self.name = Some(tree_name);
    }

    fn finish_tree(&mut self) -> Result<TangleTree, TreeError> {
        let mut vertices = std::mem::take(&mut self.vertices);
        let name = self.name.take();
        let root_index = vertices.len().checked_sub(1).ok_or(TreeError::EmptyTree)?;

        check_child_references(&vertices)?;
        let nodes = post_order_indices(&vertices, root_index)?;

        // Leaf counts bottom-up; an internal vertex added without children is a leaf
        for &index in &nodes {
            let count = if vertices[index].is_leaf() {
                1
            } else {
                vertices[index]
                    .children()
                    .iter()
                    .map(|&child| vertices[child].leaf_count())
                    .sum()
            };
            vertices[index].set_leaf_count(count);
        }

        let mut strain_to_node = HashMap::with_capacity(vertices[root_index].leaf_count());
        for &index in &nodes {
            if let Some(strain) = vertices[index].strain() {
                if strain_to_node.insert(strain.to_string(), index).is_some() {
                    return Err(TreeError::DuplicateStrain(strain.to_string()));
                }
            }
        }

        let mut tree = TangleTree::from_parts(vertices, root_index, nodes, strain_to_node, name);
        layout::layout_tree(&mut tree);
        Ok(tree)
    }
}

/// Checks that every child exists and points back to the vertex listing it.
fn check_child_references(vertices: &[Vertex]) -> Result<(), TreeError> {
    for vertex in vertices {
        for &child in vertex.children() {
            // Children have to be added before their parent
            if child >= vertex.index() {
                return Err(TreeError::UnknownChild {
                    index: vertex.index(),
                    child,
                });
            }
            if vertices[child].parent() != Some(vertex.index()) {
                return Err(TreeError::InconsistentParent {
                    child,
                    parent: vertex.index(),
                });
            }
        }
    }
    Ok(())
}

/// Collects vertex indices in post-order from `root_index`, checking that
/// every vertex is reached exactly once.
fn post_order_indices(
    vertices: &[Vertex],
    root_index: VertexIndex,
) -> Result<Vec<VertexIndex>, TreeError> {
    let mut seen = vec![false; vertices.len()];
    let mut nodes = Vec::with_capacity(vertices.len());
    let mut stack = vec![(root_index, false)];

    while let Some((index, children_visited)) = stack.pop() {
        let vertex = &vertices[index];
        if children_visited || vertex.is_leaf() {
            if seen[index] {
                return Err(TreeError::InconsistentParent {
                    child: index,
                    parent: vertex.parent().unwrap_or(index),
                });
            }
            seen[index] = true;
            nodes.push(index);
        } else {
            stack.push((index, true));
            for &child in vertex.children().iter().rev() {
                stack.push((child, false));
            }
        }
    }

    match seen.iter().position(|&reached| !reached) {
        Some(index) => Err(TreeError::Disconnected { index }),
        None => Ok(nodes),
    }
}
