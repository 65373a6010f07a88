use tanglegram::model::{BranchLength, TangleTreeBuilder, TreeBuilder, TreeError, Vertex};
use tanglegram::newick::parse_str;

#[test]
fn test_building_tree() {
    let mut builder = TangleTreeBuilder::new();
    builder.init_next(3);
    let index_l1 = builder.add_leaf(Some(1.0), Some("Kea".to_string()));
    let index_l2 = builder.add_leaf(Some(1.0), Some("Kaka".to_string()));
    let index_l3 = builder.add_leaf(Some(0.5), Some("Kakapo".to_string()));
    let index_i1 = builder.add_internal(vec![index_l1, index_l2], Some(1.5), None);
    let index_root = builder.add_internal(vec![index_l3, index_i1], None, None);
    builder.set_name("parrots".to_string());
    let tree = builder.finish_tree().unwrap();

    // Counts
    assert_eq!(tree.num_leaves(), 3);
    assert_eq!(tree.num_internal(), 2);
    assert_eq!(tree.num_vertices(), 5);
    assert_eq!(tree.name(), Some("parrots"));

    // Root
    let root = tree.root();
    assert_eq!(root.index(), index_root);
    assert_eq!(tree.root_index(), index_root);
    assert!(root.is_root());
    assert_eq!(root.leaf_count(), 3);

    // Leaf
    let l2 = &tree[index_l2];
    assert!(l2.is_leaf());
    assert_eq!(l2.index(), index_l2);
    assert_eq!(l2.strain(), Some("Kaka"));
    assert_eq!(l2.parent(), Some(index_i1));

    // Internal
    let i1 = tree.vertex(index_i1);
    assert!(i1.has_children());
    assert_eq!(i1.children(), &[index_l1, index_l2]);
    assert_eq!(i1.branch_length(), Some(BranchLength::new(1.5)));
    assert_eq!(i1.strain(), None);
    assert!(tree.is_valid());
}

#[test]
fn test_nodes_are_post_order_of_construction() {
    let tree = parse_str("((A,B),(C,D,E));").unwrap();
    let nodes = tree.nodes();
    assert_eq!(nodes.len(), tree.num_vertices());
    assert_eq!(*nodes.last().unwrap(), tree.root_index());

    let from_iter: Vec<usize> = tree.post_order_iter().map(Vertex::index).collect();
    assert_eq!(nodes, from_iter.as_slice());
}

#[test]
fn test_strain_lookup() {
    let tree = parse_str("((Kea,Kaka)Nestor,Kakapo);").unwrap();

    let kaka = tree.index_of_strain("Kaka").unwrap();
    assert_eq!(tree.leaf_for_strain("Kaka").unwrap().index(), kaka);
    assert!(tree.contains_strain("Kakapo"));
    // Internal labels are not strains
    assert!(!tree.contains_strain("Nestor"));
    assert!(tree.leaf_for_strain("Kiwi").is_none());

    let mut strains: Vec<&str> = tree.strains().collect();
    strains.sort_unstable();
    assert_eq!(strains, vec!["Kaka", "Kakapo", "Kea"]);
}

#[test]
fn test_leaf_counts() {
    let tree = parse_str("((A,B,C),(D,(E,F)),G);").unwrap();
    for vertex in tree.post_order_iter() {
        let leaves_below = tree
            .post_order_iter_from(vertex.index())
            .filter(|v| v.is_leaf())
            .count();
        assert_eq!(vertex.leaf_count(), leaves_below);
    }
}

#[test]
fn test_pre_order_iter() {
    let tree = parse_str("((A,B)ab,C)root;").unwrap();
    let labels: Vec<_> = tree.pre_order_iter().filter_map(Vertex::label).collect();
    assert_eq!(labels, vec!["root", "ab", "A", "B", "C"]);
}

#[test]
fn test_set_name() {
    let mut tree = parse_str("(A,B);").unwrap();
    assert_eq!(tree.name(), None);
    tree.set_name("H3N2 HA".to_string());
    assert_eq!(tree.name(), Some("H3N2 HA"));
}

#[test]
fn test_builder_rejects_child_added_after_parent() {
    let mut builder = TangleTreeBuilder::new();
    builder.init_next(2);
    let a = builder.add_leaf(None, Some("A".to_string()));
    builder.add_internal(vec![a, 2], None, None);
    builder.add_leaf(None, Some("B".to_string()));
    let err = builder.finish_tree().unwrap_err();
    assert_eq!(err, TreeError::UnknownChild { index: 1, child: 2 });
    assert_eq!(
        err.to_string(),
        "vertex 1 refers to child 2, which was not added before it"
    );
}

#[test]
#[should_panic]
fn test_get_vertex_out_of_bounds() {
    let tree = parse_str("(A,B);").unwrap();
    let _ = &tree[55];
}

#[test]
#[should_panic]
fn test_negative_branch_length_panics() {
    BranchLength::new(-1.0);
}

#[test]
fn test_branch_length_try_new() {
    assert_eq!(BranchLength::try_new(-0.1), None);
    assert_eq!(BranchLength::try_new(f64::INFINITY), None);
    assert_eq!(*BranchLength::try_new(0.0).unwrap(), 0.0);
}
