//! Newick format writing, following the current child order.

use crate::model::{TangleTree, Vertex};
use crate::newick::defs::BUFFER_CHARS;
use crate::parser::utils::escape_label;
use std::fs::File;
use std::io::{self, BufWriter, Write};

/// Writes given list of trees to a file in Newick format, one tree per line.
///
/// # Errors
/// Returns an I/O error if writing fails.
pub fn write_newick_file(file: File, trees: &[TangleTree]) -> io::Result<()> {
    let mut writer = BufWriter::new(file);
    for tree in trees {
        writer.write_all(to_newick(tree).as_bytes())?;
        writer.write_all(b"\n")?;
    }

    writer.flush()
}

/// Returns the Newick representation of this tree with closing semicolon.
///
/// Children are written in their current order, so after untangling the
/// string reflects the drawing order. Labels are escaped if necessary;
/// branch lengths are written where present (except on the root).
///
/// # Example
/// ```
/// use tanglegram::newick::{parse_str, to_newick};
///
/// let tree = parse_str("((A:1,B:2)ab:0.5,'C c':4,D);").unwrap();
/// assert_eq!(to_newick(&tree), "((A:1,B:2)ab:0.5,'C c':4,D);");
/// ```
pub fn to_newick(tree: &TangleTree) -> String {
    // Label and branch length, written after a leaf or a closing parenthesis
    fn build_newick_suffix(newick: &mut String, vertex: &Vertex) {
        if let Some(label) = vertex.label() {
            newick.push_str(&escape_label(label));
        }
        if let Some(branch_length) = vertex.branch_length().filter(|_| !vertex.is_root()) {
            newick.push(':');
            newick.push_str(&branch_length.to_string());
        }
    }

    let mut newick = String::with_capacity(estimate_newick_len(tree));
    let mut stack = vec![(tree.root_index(), false)]; // (index, children_visited)

    while let Some((index, children_visited)) = stack.pop() {
        let vertex = &tree[index];

        if children_visited {
            newick.push(')');
            build_newick_suffix(&mut newick, vertex);
            continue;
        }

        // Separator before every child but the first
        if vertex
            .parent()
            .is_some_and(|parent| tree[parent].children().first() != Some(&index))
        {
            newick.push(',');
        }

        if vertex.has_children() {
            newick.push('(');
            stack.push((index, true));
            for &child in vertex.children().iter().rev() {
                stack.push((child, false));
            }
        } else {
            build_newick_suffix(&mut newick, vertex);
        }
    }
    newick.push(';');

    newick
}

/// Estimates the length of a Newick string for a given tree, to pre-allocate.
pub(crate) fn estimate_newick_len(tree: &TangleTree) -> usize {
    // Branch lengths: ~20 chars each (e.g., ":0.009529961339106089")
    const BRANCH_LENGTH_CHARS: usize = 20;

    let structure: usize = tree
        .vertices()
        .map(|v| v.num_children().max(1) + 1) // parentheses and commas
        .sum();
    let labels: usize = tree.vertices().filter_map(|v| v.label()).map(str::len).sum();
    let branches = tree.vertices().filter(|v| v.has_branch_length()).count() * BRANCH_LENGTH_CHARS;

    structure + labels + branches + BUFFER_CHARS
}
