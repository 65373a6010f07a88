//! Untangling of two trees drawn side by side.
//!
//! The optimizer reorders siblings in one tree ("moving") so its leaves line
//! up with the matching leaves of the other tree ("fixed"), scored by the
//! [Pearson correlation](correlation::pearson_correlation) of matched leaf
//! y-values. Topology is never changed, only child order.
//!
//! [Untangler::untangle] runs two passes of coordinate descent:
//! 1. reorder the second tree against the first,
//! 2. reorder the first tree against the (now reordered) second,
//!
//! and finally lays out both trees from scratch.
//!
//! # Search per vertex
//! Vertices are visited in post-order, so a parent decides using already
//! optimized descendants. Vertices with at least
//! [`max_leaf_count`](UntangleConfig::max_leaf_count) leaves are skipped.
//! * Two children: try the reversed order, keep it only if the score
//!   strictly increases.
//! * More children: greedy insertion. For each position `i` (except the
//!   last), every not yet placed child is tried at `i` with the others
//!   following in their previous order; the best scoring one is fixed.
//!   This is `O(k²)` trials for `k` children and not guaranteed optimal.
//!
//! Undefined scores (`NaN`, e.g. no shared strains) never count as an
//! improvement.
//!
//! # Example
//! ```
//! use tanglegram::newick::parse_str;
//! use tanglegram::untangle::untangle;
//!
//! let mut left = parse_str("((A,B),(C,D));").unwrap();
//! let mut right = parse_str("((D,C),(B,A));").unwrap();
//! untangle(&mut left, &mut right);
//! assert_eq!(left.leaf_order(), right.leaf_order());
//! ```

pub mod correlation;

use crate::layout::{self, layout_subtree, leftmost_leaf};
use crate::model::{TangleTree, VertexIndex};
use correlation::pearson_correlation;
use std::time::Instant;
use tracing::{debug, info, trace};

/// Subtrees with at least this many leaves are not reordered.
pub const DEFAULT_MAX_LEAF_COUNT: usize = 250;

// =#========================================================================#=
// CONFIGURATION
// =#========================================================================$=
/// Configuration of an [Untangler].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UntangleConfig {
    /// Vertices with `leaf_count >= max_leaf_count` are skipped.
    pub max_leaf_count: usize,
}

impl Default for UntangleConfig {
    fn default() -> Self {
        Self {
            max_leaf_count: DEFAULT_MAX_LEAF_COUNT,
        }
    }
}

impl UntangleConfig {
    /// Sets the leaf count bound of vertices considered for reordering.
    pub fn with_max_leaf_count(mut self, max_leaf_count: usize) -> Self {
        self.max_leaf_count = max_leaf_count;
        self
    }
}

// =#========================================================================#=
// REPORT
// =#========================================================================$=
/// Correlations observed during [Untangler::untangle]; informational only.
///
/// Any of the values may be `NaN` if the trees share fewer than two strains.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UntangleReport {
    /// Correlation before any reordering
    pub initial: f64,
    /// After the first pass, which reorders the second tree against the first
    pub after_reordering_second: f64,
    /// After the second pass, which reorders the first tree against the (reordered) second
    pub after_reordering_first: f64,
    /// After the final full layout of both trees
    pub after_layout: f64,
}

// =#========================================================================#=
// UNTANGLER
// =#========================================================================$=
/// Sibling-reordering optimizer for a pair of trees.
#[derive(Debug, Clone, Default)]
pub struct Untangler {
    config: UntangleConfig,
}

impl Untangler {
    /// Creates an untangler with the given configuration.
    pub fn new(config: UntangleConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &UntangleConfig {
        &self.config
    }

    /// Reorders children in both trees to improve the alignment of matching
    /// leaves, then lays out both trees from scratch.
    ///
    /// Trees must have been laid out (as done by the builder) before.
    pub fn untangle(&self, first: &mut TangleTree, second: &mut TangleTree) -> UntangleReport {
        let start = Instant::now();

        let initial = pearson_correlation(first, second);
        let after_reordering_second = self.optimize_one_direction(second, first);
        info!("Untangling {} -> {}", initial, after_reordering_second);

        let after_reordering_first = self.optimize_one_direction(first, second);
        info!("Untangling {} -> {}", after_reordering_second, after_reordering_first);

        layout::layout_tree(second);
        layout::layout_tree(first);
        let after_layout = pearson_correlation(first, second);

        info!(
            elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
            initial,
            after_layout,
            "untangle finished"
        );

        UntangleReport {
            initial,
            after_reordering_second,
            after_reordering_first,
            after_layout,
        }
    }

    /// Reorders the children of `moving` to increase its correlation with
    /// `fixed`, visiting vertices in post-order.
    ///
    /// # Returns
    /// The correlation after the pass (possibly `NaN`).
    pub fn optimize_one_direction(&self, moving: &mut TangleTree, fixed: &TangleTree) -> f64 {
        let mut correlation = pearson_correlation(fixed, moving);

        for position in 0..moving.nodes().len() {
            let index = moving.nodes()[position];
            let vertex = &moving[index];
            if vertex.num_children() < 2 {
                continue;
            }
            if vertex.leaf_count() >= self.config.max_leaf_count {
                debug!(
                    vertex = index,
                    leaf_count = vertex.leaf_count(),
                    "skipping vertex above leaf count bound"
                );
                continue;
            }

            // Topmost leaf of the current order anchors all trial layouts
            let baseline = moving[leftmost_leaf(moving, index)].y_value() - 1.0;

            correlation = if vertex.num_children() == 2 {
                try_reversal(moving, fixed, index, baseline, correlation)
            } else {
                greedy_insertion(moving, fixed, index, baseline)
            };
        }

        correlation
    }
}

/// Reverses the children of `index`, keeping the reversal only if the
/// correlation strictly increases. Returns the resulting correlation.
fn try_reversal(
    moving: &mut TangleTree,
    fixed: &TangleTree,
    index: VertexIndex,
    baseline: f64,
    correlation: f64,
) -> f64 {
    moving.vertex_mut(index).children_mut().reverse();
    layout_subtree(moving, index, baseline);
    let new_correlation = pearson_correlation(fixed, moving);
    trace!(vertex = index, correlation, new_correlation, "tried reversal");

    if new_correlation > correlation {
        debug!(vertex = index, correlation, new_correlation, "kept reversal");
        new_correlation
    } else {
        moving.vertex_mut(index).children_mut().reverse();
        layout_subtree(moving, index, baseline);
        correlation
    }
}

/// Greedily fixes the child at each position of `index`, choosing the one
/// with the best correlation when moved there. Returns the resulting
/// correlation.
fn greedy_insertion(
    moving: &mut TangleTree,
    fixed: &TangleTree,
    index: VertexIndex,
    baseline: f64,
) -> f64 {
    let num_children = moving[index].num_children();

    for position in 0..num_children - 1 {
        let previous = moving[index].children().to_vec();
        let mut best_children = previous.clone();
        let mut best_correlation = f64::NEG_INFINITY;

        // Candidate `position` itself leaves the order unchanged and is tried first
        for candidate in position..num_children {
            let trial = moved_to(&previous, candidate, position);
            moving.vertex_mut(index).children_mut().clone_from(&trial);
            layout_subtree(moving, index, baseline);
            let new_correlation = pearson_correlation(fixed, moving);
            trace!(vertex = index, position, candidate, new_correlation, "tried insertion");

            if new_correlation > best_correlation {
                best_correlation = new_correlation;
                best_children = trial;
            }
        }

        if best_children != previous {
            debug!(vertex = index, position, best_correlation, "kept insertion");
        }
        *moving.vertex_mut(index).children_mut() = best_children;
        layout_subtree(moving, index, baseline);
    }

    pearson_correlation(fixed, moving)
}

/// Returns `order` with the element at `from` moved to `to` (`to <= from`),
/// the elements in between shifted back by one.
fn moved_to(order: &[VertexIndex], from: usize, to: usize) -> Vec<VertexIndex> {
    let mut moved = Vec::with_capacity(order.len());
    moved.extend_from_slice(&order[..to]);
    moved.push(order[from]);
    moved.extend(
        order[to..]
            .iter()
            .enumerate()
            .filter(|&(offset, _)| to + offset != from)
            .map(|(_, &child)| child),
    );
    moved
}

/// Untangles two trees with the default [UntangleConfig].
///
/// Mutates child order and y-values of both trees in place.
/// See [Untangler::untangle].
pub fn untangle(first: &mut TangleTree, second: &mut TangleTree) {
    Untangler::default().untangle(first, second);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_moved_to_front() {
        assert_eq!(moved_to(&[10, 11, 12, 13], 2, 0), vec![12, 10, 11, 13]);
    }

    #[test]
    fn test_moved_to_same_position_is_identity() {
        assert_eq!(moved_to(&[10, 11, 12], 1, 1), vec![10, 11, 12]);
    }

    #[test]
    fn test_moved_to_keeps_prefix() {
        assert_eq!(moved_to(&[10, 11, 12, 13], 3, 1), vec![10, 13, 11, 12]);
    }
}
