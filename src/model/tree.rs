//! Provides the tree representation shared by layout and untangling.
//!
//! Provides core data structures for representing phylogenetic trees:
//! * [TangleTree] - Main tree structure using the arena pattern
//!   for efficient memory layout, with a flattened traversal and
//!   a strain lookup table.
//! * [VertexIndex] as type used to index vertices in tree
//! * [PostOrderIter] and [PreOrderIter] following the *current* child order

use crate::model::vertex::Vertex;
use std::collections::HashMap;

/// Index of a vertex in a tree (arena).
pub type VertexIndex = usize;

// =$========================================================================$=
// TREE
// =$========================================================================$=
/// A phylogenetic tree with ordered, arbitrary-arity children,
/// represented using the arena pattern on [Vertex].
///
/// Vertices are stored in a contiguous vector and referenced by
/// [VertexIndex]. Neither the flattened traversal `nodes` nor the
/// `strain_to_node` table own any vertex; both only hold indices into
/// the arena.
///
/// # Structure
/// - All vertices (root, internal, and leaves) are stored in the arena.
/// - Index of root is maintained.
/// - `nodes` lists all vertices in post-order of the child order at
///   construction time. Since untangling only permutes siblings, the
///   list stays a valid post-order of the *topology* (children before
///   parents), but not of the current drawing order; anything that
///   depends on drawing order consults the children directly.
/// - `strain_to_node` maps each leaf strain to its leaf.
///
/// # Construction
/// Trees are built through [TangleTreeBuilder](crate::model::TangleTreeBuilder),
/// usually driven by the [Newick parser](crate::newick::NewickParser).
/// A finished tree has leaf counts, lookup table and an initial layout.
#[derive(Debug, Clone)]
pub struct TangleTree {
    /// Vertices of this tree (arena pattern)
    vertices: Vec<Vertex>,

    /// Index of the root of this tree
    root_index: VertexIndex,

    /// Flattened post-order view (children before parents)
    nodes: Vec<VertexIndex>,

    /// Leaf lookup by strain identifier
    strain_to_node: HashMap<String, VertexIndex>,

    /// Name of tree; optional
    name: Option<String>,
}

// ============================================================================
// New, Getters / Accessors, etc. (pub)
// ============================================================================
impl TangleTree {
    /// Assembles a tree from parts prepared by the builder.
    pub(crate) fn from_parts(
        vertices: Vec<Vertex>,
        root_index: VertexIndex,
        nodes: Vec<VertexIndex>,
        strain_to_node: HashMap<String, VertexIndex>,
        name: Option<String>,
    ) -> Self {
        TangleTree {
            vertices,
            root_index,
            nodes,
            strain_to_node,
            name,
        }
    }

    /// Returns reference to name of this tree, or `None` if not set.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Set a name for this tree.
    pub fn set_name(&mut self, name: String) {
        self.name = Some(name);
    }

    /// Returns a reference to the root vertex.
    pub fn root(&self) -> &Vertex {
        &self[self.root_index]
    }

    /// Returns the index of the root.
    pub fn root_index(&self) -> VertexIndex {
        self.root_index
    }

    /// Returns a reference to the vertex at the given index.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn vertex(&self, index: VertexIndex) -> &Vertex {
        &self[index]
    }

    /// Returns all vertices in post-order (children before parents).
    pub fn nodes(&self) -> &[VertexIndex] {
        &self.nodes
    }

    /// Returns an iterator over the vertices in arena order.
    pub fn vertices(&self) -> impl Iterator<Item = &Vertex> {
        self.vertices.iter()
    }

    /// Returns the number of vertices in this tree.
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the number of leaves in this tree.
    pub fn num_leaves(&self) -> usize {
        self.root().leaf_count()
    }

    /// Returns the number of non-leaf vertices (including the root, unless it is a leaf).
    pub fn num_internal(&self) -> usize {
        self.vertices.iter().filter(|v| v.has_children()).count()
    }

    /// Returns the leaf carrying the given strain, if present in this tree.
    pub fn leaf_for_strain(&self, strain: &str) -> Option<&Vertex> {
        self.index_of_strain(strain).map(|index| &self[index])
    }

    /// Returns the index of the leaf carrying the given strain.
    pub fn index_of_strain(&self, strain: &str) -> Option<VertexIndex> {
        self.strain_to_node.get(strain).copied()
    }

    /// Returns `true` if a leaf carries the given strain.
    pub fn contains_strain(&self, strain: &str) -> bool {
        self.strain_to_node.contains_key(strain)
    }

    /// Returns an iterator over all strains (in no particular order).
    pub fn strains(&self) -> impl Iterator<Item = &str> {
        self.strain_to_node.keys().map(String::as_str)
    }

    /// Returns the strains of all labelled leaves in current drawing order
    /// (top to bottom).
    pub fn leaf_order(&self) -> Vec<&str> {
        self.pre_order_iter().filter_map(Vertex::strain).collect()
    }

    /// Mutable access to a vertex; restricted to the crate since only
    /// child order and y-values may change after construction.
    pub(crate) fn vertex_mut(&mut self, index: VertexIndex) -> &mut Vertex {
        &mut self.vertices[index]
    }
}

// ============================================================================
// Validation (pub)
// ============================================================================
impl TangleTree {
    /// Validates the tree structure and all index references.
    ///
    /// Checks:
    /// - Root index is valid and the root has no parent
    /// - All vertex indices match their position in the arena
    /// - All child indices are valid and point back to correct parent
    /// - Every non-root vertex is listed exactly once among its parent's children
    /// - Leaf counts equal the sum over children (leaves count 1)
    /// - `strain_to_node` points at leaves carrying that strain, for every strain
    /// - `nodes` lists every vertex exactly once, children before parents
    ///
    /// # Returns
    /// `true` if tree is valid, `false` otherwise
    pub fn is_valid(&self) -> bool {
        let n = self.vertices.len();
        if self.root_index >= n || !self.vertices[self.root_index].is_root() {
            return false;
        }

        let mut times_listed = vec![0usize; n];
        for (index, vertex) in self.vertices.iter().enumerate() {
            if vertex.index() != index {
                return false;
            }
            if index != self.root_index && vertex.is_root() {
                return false;
            }

            let mut expected_leaf_count = 0;
            for &child in vertex.children() {
                if child >= n || self.vertices[child].parent() != Some(index) {
                    return false;
                }
                times_listed[child] += 1;
                expected_leaf_count += self.vertices[child].leaf_count();
            }
            if vertex.is_leaf() {
                expected_leaf_count = 1;
            }
            if vertex.leaf_count() != expected_leaf_count {
                return false;
            }
        }

        for (index, &count) in times_listed.iter().enumerate() {
            let expected = if index == self.root_index { 0 } else { 1 };
            if count != expected {
                return false;
            }
        }

        // Strain table and labelled leaves must agree both ways
        let labelled_leaves = self.vertices.iter().filter(|v| v.strain().is_some()).count();
        if labelled_leaves != self.strain_to_node.len() {
            return false;
        }
        for (strain, &index) in &self.strain_to_node {
            if index >= n || self.vertices[index].strain() != Some(strain.as_str()) {
                return false;
            }
        }

        // Flattened view: permutation, children before parents
        if self.nodes.len() != n {
            return false;
        }
        let mut position = vec![usize::MAX; n];
        for (pos, &index) in self.nodes.iter().enumerate() {
            if index >= n || position[index] != usize::MAX {
                return false;
            }
            position[index] = pos;
        }
        self.vertices.iter().all(|vertex| {
            vertex
                .children()
                .iter()
                .all(|&child| position[child] < position[vertex.index()])
        })
    }
}

impl std::ops::Index<VertexIndex> for TangleTree {
    type Output = Vertex;

    fn index(&self, index: VertexIndex) -> &Self::Output {
        &self.vertices[index]
    }
}

// =$========================================================================$=
// ITERATORS
// =$========================================================================$=
impl TangleTree {
    /// Returns an iterator over the tree in post-order (children before parents),
    /// following the current child order.
    ///
    /// # Example
    /// ```
    /// use tanglegram::newick::parse_str;
    ///
    /// let tree = parse_str("((A,B),C);").unwrap();
    /// let labels: Vec<_> = tree.post_order_iter().filter_map(|v| v.strain()).collect();
    /// assert_eq!(labels, vec!["A", "B", "C"]);
    /// assert!(tree.post_order_iter().last().unwrap().is_root());
    /// ```
    pub fn post_order_iter(&self) -> PostOrderIter<'_> {
        PostOrderIter::new(self, self.root_index)
    }

    /// Returns a post-order iterator over the subtree rooted at `index`.
    pub fn post_order_iter_from(&self, index: VertexIndex) -> PostOrderIter<'_> {
        PostOrderIter::new(self, index)
    }

    /// Returns an iterator over the tree in pre-order (parents before children),
    /// following the current child order.
    ///
    /// # Example
    /// ```
    /// use tanglegram::newick::parse_str;
    ///
    /// let tree = parse_str("((A,B),C);").unwrap();
    /// let first = tree.pre_order_iter().next().unwrap();
    /// assert!(first.is_root());
    /// ```
    pub fn pre_order_iter(&self) -> PreOrderIter<'_> {
        PreOrderIter::new(self, self.root_index)
    }
}

/// Iterator for post-order traversal (children before parents).
///
/// This iterator uses a stack-based approach to traverse the tree without recursion.
/// Each vertex is visited after all its descendants have been visited.
pub struct PostOrderIter<'a> {
    tree: &'a TangleTree,
    stack: Vec<(VertexIndex, bool)>, // (index, children_visited)
}

impl<'a> PostOrderIter<'a> {
    fn new(tree: &'a TangleTree, start: VertexIndex) -> Self {
        PostOrderIter {
            tree,
            stack: vec![(start, false)],
        }
    }
}

impl<'a> Iterator for PostOrderIter<'a> {
    type Item = &'a Vertex;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((index, children_visited)) = self.stack.pop() {
            let vertex = &self.tree[index];

            if children_visited || vertex.is_leaf() {
                return Some(vertex);
            }

            self.stack.push((index, true));
            // Push children in reverse, so first child is processed first
            for &child in vertex.children().iter().rev() {
                self.stack.push((child, false));
            }
        }
        None
    }
}

/// Iterator for pre-order traversal (parents before children).
///
/// This iterator uses a stack-based approach to traverse the tree without recursion.
/// Each vertex is visited before any of its descendants.
pub struct PreOrderIter<'a> {
    tree: &'a TangleTree,
    stack: Vec<VertexIndex>,
}

impl<'a> PreOrderIter<'a> {
    fn new(tree: &'a TangleTree, start: VertexIndex) -> Self {
        PreOrderIter {
            tree,
            stack: vec![start],
        }
    }
}

impl<'a> Iterator for PreOrderIter<'a> {
    type Item = &'a Vertex;

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.stack.pop()?;
        let vertex = &self.tree[index];

        for &child in vertex.children().iter().rev() {
            self.stack.push(child);
        }

        Some(vertex)
    }
}
