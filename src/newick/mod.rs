//! Newick format parser and writer for phylogenetic trees.
//!
//! This module provides [NewickParser] to parse Newick format strings
//! into [TangleTree]s, and [to_newick] to write them back in their
//! current (possibly untangled) child order.
//!
//! # Quick API
//! For simple use cases with default settings:
//! * [`parse_file`] - parses a file, returns all [TangleTree]s
//! * [`parse_str`] - parses a single string, returns a [TangleTree]
//!
//! # Format
//! The Newick format has the following simple grammar:
//! * `tree ::= vertex ';'`
//! * `vertex ::= leaf | internal_vertex`
//! * `internal_vertex ::= '(' vertex (',' vertex)* ')' [label] [branch_length]`
//! * `leaf ::= [label] [branch_length]`
//! * `branch_length ::= ':' number`
//!
//! Furthermore:
//! * Whitespace can occur between elements,
//!   just not within an unquoted label or a branch_length
//! * Labels in single quotes may contain any character, `''` stands for `'`
//! * Comments are square brackets and can occur anywhere where whitespace is allowed
//! * Labels are taken verbatim, underscores are *not* turned into spaces,
//!   since strain identifiers commonly contain them

mod defs;
pub mod parser;
pub mod writer;

pub use parser::{NewickIterator, NewickParser};
pub use writer::{to_newick, write_newick_file};

use crate::model::TangleTree;
use crate::parser::ParsingError;
use crate::parser::byte_parser::ByteParser;
use std::path::Path;

// ============================================================================
// QUICK PARSING API (pub)
// ============================================================================
/// Parses a Newick file eagerly and returns all trees.
///
/// # Arguments
/// * `path` - Path to the file with semicolon-separated list of Newick strings
///
/// # Returns
/// * `Vec<TangleTree>` - All parsed trees, laid out
/// * [ParsingError] - If file reading fails or Newick format is invalid
///
/// # Example
/// ```no_run
/// use tanglegram::newick::parse_file;
///
/// let trees = parse_file("h3n2_ha.nwk")?;
/// println!("Parsed {} trees", trees.len());
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Vec<TangleTree>, ParsingError> {
    let byte_parser = ByteParser::from_file(path)?;
    NewickParser::new_defaults().parse_all(byte_parser)
}

/// Parses a single Newick string to obtain a [TangleTree].
///
/// # Example
/// ```
/// use tanglegram::newick::parse_str;
///
/// let tree = parse_str("(Fratercula_cirrhata,(Fratercula_arctica,Fratercula_corniculata));")?;
/// assert_eq!(tree.num_leaves(), 3);
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn parse_str<S: AsRef<str>>(newick: S) -> Result<TangleTree, ParsingError> {
    let mut newick_parser = NewickParser::new_defaults();
    let mut byte_parser = ByteParser::for_str(newick.as_ref());
    newick_parser.parse_str(&mut byte_parser)
}
