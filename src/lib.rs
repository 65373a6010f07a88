//! Tanglegram is a library to untangle two phylogenetic trees drawn side by side.
//!
//! In a tanglegram, leaves of two trees that carry the same strain are
//! connected by lines. This crate reorders siblings in both trees so these
//! lines cross as little as possible, without changing either topology.
//! Core functionality provided:
//! - Tree model: [TangleTree] in arena layout with ordered children of any
//!   arity, leaf counts, and a strain lookup table. See [crate::model].
//! - Layout: vertical coordinates from the current child order, leaves one
//!   unit apart, internal vertices at the mean of their children.
//!   See [crate::layout].
//! - Untangling: post-order search over sibling orders scored by the
//!   Pearson correlation of matched leaf positions. See [crate::untangle].
//! - Newick reader/writer to get trees in and untangled trees out.
//!   See [crate::newick].
//! - Export of the resulting layout as JSON for a renderer.
//!   See [crate::export].
//!
//! Limitations:
//! - Heuristic: the result is a local optimum, not the best possible order
//! - Subtrees with 250 or more leaves are not reordered (configurable)
//! - Exactly two trees
//!
//! # Example
//! ```
//! use tanglegram::{parse_newick_str, untangle};
//!
//! let mut left = parse_newick_str("((A,B),(C,(D,E)));").unwrap();
//! let mut right = parse_newick_str("(((E,D),C),(B,A));").unwrap();
//! untangle(&mut left, &mut right);
//! assert_eq!(left.leaf_order(), right.leaf_order());
//! ```
//!
//! For control over the size bound and a report of the correlations, use
//! [Untangler](crate::untangle::Untangler) with an
//! [UntangleConfig](crate::untangle::UntangleConfig).

pub mod export;
pub mod layout;
pub mod model;
pub mod newick;
pub mod parser;
pub mod untangle;

pub use crate::model::TangleTree;
pub use crate::untangle::untangle;

use crate::parser::ParsingError;
use std::path::Path;

// ============================================================================
// Quick Newick API
// ============================================================================
/// Parse a Newick string using default settings, returning a laid out [TangleTree].
///
/// See [`newick::parse_str`] for full documentation of this convenience function.
pub fn parse_newick_str<S: AsRef<str>>(newick: S) -> Result<TangleTree, ParsingError> {
    newick::parse_str(newick)
}

/// Parse a file containing a semicolon-separated list of Newick strings
/// using default settings, returning all trees.
///
/// See [`newick::parse_file`] for full documentation of this convenience function.
pub fn parse_newick_file<P: AsRef<Path>>(path: P) -> Result<Vec<TangleTree>, ParsingError> {
    newick::parse_file(path)
}
