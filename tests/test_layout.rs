use tanglegram::TangleTree;
use tanglegram::layout::{layout_subtree, layout_tree, leftmost_leaf};
use tanglegram::newick::parse_str;

fn y_values(tree: &TangleTree) -> Vec<f64> {
    tree.vertices().map(|v| v.y_value()).collect()
}

fn assert_layout_consistent(tree: &TangleTree) {
    let mut previous = 0.0;
    for leaf in tree.pre_order_iter().filter(|v| v.is_leaf()) {
        assert_eq!(leaf.y_value(), previous + 1.0);
        previous = leaf.y_value();
    }

    for vertex in tree.vertices().filter(|v| v.has_children()) {
        let sum: f64 = vertex.children().iter().map(|&c| tree[c].y_value()).sum();
        let mean = sum / vertex.num_children() as f64;
        assert!(
            (vertex.y_value() - mean).abs() < 1e-12,
            "vertex {} at {} instead of {}",
            vertex.index(),
            vertex.y_value(),
            mean
        );
    }
}

#[test]
fn test_parsed_tree_is_laid_out() {
    let tree = parse_str("((A,B),(C,(D,E)),F);").unwrap();
    assert_layout_consistent(&tree);
    assert_eq!(tree.leaf_for_strain("F").unwrap().y_value(), 6.0);
}

#[test]
fn test_internal_vertex_is_mean_of_children_not_leaves() {
    let tree = parse_str("(A,(B,(C,D)));").unwrap();
    // (C,D) at 3.5, (B,(C,D)) at (2 + 3.5) / 2, root at (1 + 2.75) / 2
    let bcd = tree.root().children()[1];
    assert_eq!(tree[bcd].y_value(), 2.75);
    assert_eq!(tree.root().y_value(), 1.875);
}

#[test]
fn test_full_layout_is_idempotent() {
    let mut tree = parse_str("((A,B,C),(D,(E,F)),G);").unwrap();
    layout_tree(&mut tree);
    let first = y_values(&tree);
    layout_tree(&mut tree);
    assert_eq!(y_values(&tree), first);
    assert_layout_consistent(&tree);
}

#[test]
fn test_subtree_pass_matches_full_pass() {
    let mut tree = parse_str("((A,B),(C,(D,E)),F);").unwrap();
    let expected = y_values(&tree);
    let subtree = tree.root().children()[1];
    let baseline = tree[leftmost_leaf(&tree, subtree)].y_value() - 1.0;

    let last = layout_subtree(&mut tree, subtree, baseline);

    assert_eq!(last, 5.0);
    assert_eq!(y_values(&tree), expected);
}

#[test]
fn test_subtree_pass_leaves_rest_untouched() {
    let mut tree = parse_str("((A,B),(C,D));").unwrap();
    let ab = tree.root().children()[0];
    let before_root = tree.root().y_value();

    layout_subtree(&mut tree, ab, 100.0);

    assert_eq!(tree.leaf_for_strain("A").unwrap().y_value(), 101.0);
    assert_eq!(tree[ab].y_value(), 101.5);
    assert_eq!(tree.leaf_for_strain("C").unwrap().y_value(), 3.0);
    assert_eq!(tree.root().y_value(), before_root);
}

#[test]
fn test_leftmost_leaf_of_leaf_is_itself() {
    let tree = parse_str("((A,B),C);").unwrap();
    let c = tree.index_of_strain("C").unwrap();
    assert_eq!(leftmost_leaf(&tree, c), c);
    assert_eq!(
        leftmost_leaf(&tree, tree.root_index()),
        tree.index_of_strain("A").unwrap()
    );
}

#[test]
fn test_unlabelled_leaves_take_a_slot() {
    let tree = parse_str("(A,,B);").unwrap();
    assert_eq!(tree.num_leaves(), 3);
    assert_eq!(tree.leaf_for_strain("B").unwrap().y_value(), 3.0);
    assert_layout_consistent(&tree);
}
