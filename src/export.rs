//! Serializable snapshot of tree layouts for a renderer.
//!
//! After untangling, a renderer needs the child order and the y-value of
//! every vertex. [TangleLayout] bundles both trees and the resulting
//! correlation, and serializes to JSON with `serde_json`.

use crate::model::{TangleTree, VertexIndex};
use crate::untangle::correlation::pearson_correlation;
use serde::Serialize;

/// Position and children of a single vertex.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeLayout {
    pub index: VertexIndex,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strain: Option<String>,
    pub y_value: f64,
    pub leaf_count: usize,
    pub children: Vec<VertexIndex>,
}

/// All vertices of one tree in pre-order of the current child order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TreeLayout {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub root: VertexIndex,
    pub nodes: Vec<NodeLayout>,
}

impl TreeLayout {
    /// Captures the current layout of `tree`.
    pub fn from_tree(tree: &TangleTree) -> Self {
        let nodes = tree
            .pre_order_iter()
            .map(|vertex| NodeLayout {
                index: vertex.index(),
                strain: vertex.strain().map(str::to_string),
                y_value: vertex.y_value(),
                leaf_count: vertex.leaf_count(),
                children: vertex.children().to_vec(),
            })
            .collect();

        TreeLayout {
            name: tree.name().map(str::to_string),
            root: tree.root_index(),
            nodes,
        }
    }
}

/// Layout of both sides of a tanglegram.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TangleLayout {
    pub left: TreeLayout,
    pub right: TreeLayout,
    /// Correlation of matched leaves; `null` in JSON when undefined
    pub correlation: Option<f64>,
}

impl TangleLayout {
    /// Captures the current layout of both trees.
    pub fn from_trees(left: &TangleTree, right: &TangleTree) -> Self {
        let correlation = pearson_correlation(left, right);
        TangleLayout {
            left: TreeLayout::from_tree(left),
            right: TreeLayout::from_tree(right),
            correlation: (!correlation.is_nan()).then_some(correlation),
        }
    }

    /// Serializes the layout as pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
