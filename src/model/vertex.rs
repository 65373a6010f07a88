//! Vertex module for tanglegram tree representation.

use crate::model::tree::VertexIndex;
use std::ops::Deref;

// =#========================================================================#=
// VERTEX
// =#========================================================================#=
/// Represents a vertex (node) in a phylogenetic tree drawn in a tanglegram.
///
/// A vertex is a leaf if it has no children, otherwise it is an internal
/// vertex (or the root) with any number of ordered children.
///
/// # Invariants
/// - `index` is index in arena
/// - `parent` is `None` only for the root (and during construction)
/// - `children` order is the drawing order, first child is drawn on top;
///   only this order and `y_value` change after construction
/// - `leaf_count` is the number of leaf descendants (1 for a leaf),
///   set once by the builder and never recomputed
/// - `label` of a leaf is its strain identifier
#[derive(PartialEq, Debug, Clone)]
pub struct Vertex {
    /// Index of this vertex in the tree arena
    index: VertexIndex,
    /// Index of the parent vertex, `None` for the root
    parent: Option<VertexIndex>,
    /// Indices of the child vertices, in drawing order
    children: Vec<VertexIndex>,
    /// Strain of a leaf, or optional name of an internal vertex
    label: Option<String>,
    /// Distance to parent node (optional, non-negative if present)
    branch_length: Option<BranchLength>,
    /// Vertical coordinate, assigned by the layout engine
    y_value: f64,
    /// Number of leaves in the subtree rooted at this vertex
    leaf_count: usize,
}

impl Vertex {
    /// Creates a new leaf vertex.
    ///
    /// # Arguments
    /// * `index` - The unique index of this vertex in the tree (arena)
    /// * `branch_length` - Distance to parent node (non-negative)
    /// * `label` - Strain identifier of this leaf
    pub fn new_leaf(
        index: VertexIndex,
        branch_length: Option<BranchLength>,
        label: Option<String>,
    ) -> Self {
        Vertex {
            index,
            parent: None,
            children: Vec::new(),
            label,
            branch_length,
            y_value: 0.0,
            leaf_count: 1,
        }
    }

    /// Creates a new internal vertex (or root).
    ///
    /// # Arguments
    /// * `index` - The unique index of this vertex in the tree (arena)
    /// * `children` - Child indices in drawing order
    /// * `branch_length` - Distance to parent node (non-negative)
    /// * `label` - Optional name of this vertex
    pub fn new_internal(
        index: VertexIndex,
        children: Vec<VertexIndex>,
        branch_length: Option<BranchLength>,
        label: Option<String>,
    ) -> Self {
        Vertex {
            index,
            parent: None,
            children,
            label,
            branch_length,
            y_value: 0.0,
            leaf_count: 0,
        }
    }

    /// Returns the index of this vertex.
    pub fn index(&self) -> VertexIndex {
        self.index
    }

    /// Returns `true` if this vertex is a leaf.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Returns `true` if this vertex has at least one child.
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Returns `true` if this vertex is the root.
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Returns the children in their current order (empty for leaves).
    pub fn children(&self) -> &[VertexIndex] {
        &self.children
    }

    /// Returns the number of children.
    pub fn num_children(&self) -> usize {
        self.children.len()
    }

    /// Mutable access to the child order; the set of children must be kept.
    pub(crate) fn children_mut(&mut self) -> &mut Vec<VertexIndex> {
        &mut self.children
    }

    /// Returns the index of the parent, or `None` for the root.
    pub fn parent(&self) -> Option<VertexIndex> {
        self.parent
    }

    pub(crate) fn set_parent(&mut self, parent: VertexIndex) {
        self.parent = Some(parent);
    }

    /// Returns the label, i.e. the strain for leaves.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Returns the strain identifier if this is a labelled leaf, else `None`.
    pub fn strain(&self) -> Option<&str> {
        if self.is_leaf() {
            self.label.as_deref()
        } else {
            None
        }
    }

    /// Returns whether this vertex has a [BranchLength].
    pub fn has_branch_length(&self) -> bool {
        self.branch_length.is_some()
    }

    /// Returns the branch length, if set.
    pub fn branch_length(&self) -> Option<BranchLength> {
        self.branch_length
    }

    /// Returns the vertical coordinate of this vertex.
    pub fn y_value(&self) -> f64 {
        self.y_value
    }

    pub(crate) fn set_y_value(&mut self, y_value: f64) {
        self.y_value = y_value;
    }

    /// Returns the number of leaves below (and including) this vertex.
    pub fn leaf_count(&self) -> usize {
        self.leaf_count
    }

    pub(crate) fn set_leaf_count(&mut self, leaf_count: usize) {
        self.leaf_count = leaf_count;
    }
}

// =#========================================================================#=
// BRANCH LENGTH
// =#========================================================================#=
/// Branch length in a phylogenetic tree, enforced non-negative.
///
/// Represents the evolutionary distance between a vertex and its parent.
/// The value is guaranteed to be non-negative and finite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BranchLength(f64);

impl BranchLength {
    /// Creates a new branch length.
    ///
    /// # Arguments
    /// * `length` - The branch length value (must be non-negative)
    ///
    /// # Panics
    /// Panics if `length` is negative or not finite.
    pub fn new(length: f64) -> Self {
        assert!(
            length >= 0.0,
            "Branch length must be non-negative, got {}",
            length
        );
        assert!(
            length.is_finite(),
            "Branch length must be finite, got {}",
            length
        );
        BranchLength(length)
    }

    /// Creates a branch length if `length` is non-negative and finite.
    pub fn try_new(length: f64) -> Option<Self> {
        (length >= 0.0 && length.is_finite()).then_some(BranchLength(length))
    }
}

impl Deref for BranchLength {
    type Target = f64;
    fn deref(&self) -> &f64 {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leaf_has_no_children_and_counts_itself() {
        let leaf = Vertex::new_leaf(0, None, Some("Kea".to_string()));
        assert!(leaf.is_leaf());
        assert!(!leaf.has_children());
        assert_eq!(leaf.leaf_count(), 1);
        assert_eq!(leaf.strain(), Some("Kea"));
    }

    #[test]
    fn test_internal_label_is_not_a_strain() {
        let internal = Vertex::new_internal(2, vec![0, 1], None, Some("Nestor".to_string()));
        assert!(internal.has_children());
        assert_eq!(internal.label(), Some("Nestor"));
        assert_eq!(internal.strain(), None);
    }

    #[test]
    fn test_try_new_rejects_negative() {
        assert!(BranchLength::try_new(-0.5).is_none());
        assert_eq!(*BranchLength::try_new(0.5).unwrap(), 0.5);
    }

    #[test]
    #[should_panic]
    fn test_new_panics_on_infinite() {
        BranchLength::new(f64::INFINITY);
    }
}
