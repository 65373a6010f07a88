//! Layout engine assigning vertical coordinates (y-values) to vertices.
//!
//! Leaves are placed one unit apart in the order they are reached following
//! the current child order; an internal vertex sits at the mean of its
//! direct children's y-values, so sibling subtrees weigh equally regardless
//! of their size or depth.
//!
//! Two entry points:
//! * [layout_tree] - full pass over a tree, first leaf at `y = 1`
//! * [layout_subtree] - re-lays only the subtree of a vertex, continuing
//!   after a given previous leaf y-value
//!
//! Both are deterministic and touch nothing outside the given subtree.

use crate::model::{TangleTree, VertexIndex};

/// Baseline of a full layout pass; the first leaf is placed at `BASELINE + 1`.
pub const BASELINE: f64 = 0.0;

/// Assigns y-values to every vertex of the tree from its current child order.
///
/// # Example
/// ```
/// use tanglegram::layout::layout_tree;
/// use tanglegram::newick::parse_str;
///
/// let mut tree = parse_str("((A,B),C,D);").unwrap();
/// layout_tree(&mut tree);
/// assert_eq!(tree.leaf_for_strain("A").unwrap().y_value(), 1.0);
/// assert_eq!(tree.leaf_for_strain("D").unwrap().y_value(), 4.0);
/// // (1.5 + 3 + 4) / 3
/// assert!((tree.root().y_value() - 8.5 / 3.0).abs() < 1e-12);
/// ```
pub fn layout_tree(tree: &mut TangleTree) {
    let root = tree.root_index();
    layout_subtree(tree, root, BASELINE);
}

/// Assigns y-values to the subtree rooted at `index`, placing its first leaf
/// at `previous_y + 1`.
///
/// # Arguments
/// * `tree` - Tree containing the subtree
/// * `index` - Root of the subtree to lay out
/// * `previous_y` - y-value of the leaf drawn directly before this subtree
///
/// # Returns
/// The y-value of the last leaf of the subtree, i.e. the baseline for
/// whatever is drawn after it.
pub fn layout_subtree(tree: &mut TangleTree, index: VertexIndex, previous_y: f64) -> f64 {
    let mut y = previous_y;
    let mut stack = vec![(index, false)]; // (index, children_visited)

    while let Some((current, children_visited)) = stack.pop() {
        let vertex = &tree[current];

        if vertex.is_leaf() {
            y += 1.0;
            tree.vertex_mut(current).set_y_value(y);
        } else if children_visited {
            let children = vertex.children();
            let sum: f64 = children.iter().map(|&child| tree[child].y_value()).sum();
            let mean = sum / children.len() as f64;
            tree.vertex_mut(current).set_y_value(mean);
        } else {
            stack.push((current, true));
            for &child in vertex.children().iter().rev() {
                stack.push((child, false));
            }
        }
    }

    y
}

/// Finds the leaf drawn topmost below `index`, by repeatedly descending into
/// the child with the smallest y-value (the first one on ties).
///
/// Relies on y-values being current for the subtree.
pub fn leftmost_leaf(tree: &TangleTree, index: VertexIndex) -> VertexIndex {
    let mut current = index;
    while tree[current].has_children() {
        let children = tree[current].children();
        let mut smallest = children[0];
        for &child in &children[1..] {
            if tree[child].y_value() < tree[smallest].y_value() {
                smallest = child;
            }
        }
        current = smallest;
    }
    current
}
