use std::fs;
use tanglegram::model::TreeError;
use tanglegram::newick::{NewickParser, parse_file, parse_str, to_newick, write_newick_file};
use tanglegram::parser::{ByteParser, ParsingErrorType};
use tanglegram::untangle;

// --- TESTS NEWICK STRING PARSING ---
#[test]
fn test_basic_tree() {
    let tree = parse_str("((A:1.0,B:2.0):3.0,C:4.0):0.5;").unwrap();

    // Test counts
    assert_eq!(tree.num_leaves(), 3);
    assert_eq!(tree.num_internal(), 2);
    assert_eq!(tree.num_vertices(), 5);

    // Test relationships
    let root = tree.root();
    assert!(root.is_root());
    let [ab, c] = root.children() else {
        panic!("root should have two children");
    };
    assert_eq!(tree[*ab].parent(), Some(root.index()));
    assert_eq!(tree[*c].strain(), Some("C"));
    assert_eq!(tree[*ab].leaf_count(), 2);
    assert_eq!(*tree[*ab].branch_length().unwrap(), 3.0);
    assert!(tree.is_valid());
}

#[test]
fn test_multifurcations() {
    let tree = parse_str("((A,B,C,D),(E,F,G),H);").unwrap();
    assert_eq!(tree.root().num_children(), 3);
    assert_eq!(tree[tree.root().children()[0]].num_children(), 4);
    assert_eq!(tree.leaf_order(), vec!["A", "B", "C", "D", "E", "F", "G", "H"]);
    assert!(tree.is_valid());
}

#[test]
fn test_labels_with_quotes_comments_and_whitespace() {
    let newick = "[&R] ( 'Baillon''s Crake' :1 , [note] Porphyrio_hochstetteri:2e-1,\n\t'Pukeko (NZ)')Rallidae ;";
    let tree = parse_str(newick).unwrap();

    assert!(tree.contains_strain("Baillon's Crake"));
    assert!(tree.contains_strain("Porphyrio_hochstetteri"));
    assert!(tree.contains_strain("Pukeko (NZ)"));
    assert_eq!(tree.root().label(), Some("Rallidae"));
    assert_eq!(tree.root().strain(), None);
    let takahe = tree.leaf_for_strain("Porphyrio_hochstetteri").unwrap();
    assert_eq!(*takahe.branch_length().unwrap(), 0.2);
}

#[test]
fn test_underscores_are_kept() {
    let tree = parse_str("(A/Hong_Kong/1/68,A/Perth_16/2009);").unwrap();
    assert_eq!(tree.leaf_order(), vec!["A/Hong_Kong/1/68", "A/Perth_16/2009"]);
}

#[test]
fn test_unicode_labels() {
    let tree = parse_str("(Kākāpō,Tūī);").unwrap();
    assert!(tree.contains_strain("Kākāpō"));
    assert!(tree.contains_strain("Tūī"));
}

// --- TESTS ERRORS ---
#[test]
fn test_negative_branch_length_fails() {
    let err = parse_str("(A:-1.0,B:1.0);").unwrap_err();
    assert!(matches!(err.kind(), ParsingErrorType::InvalidNewickString(_)));
}

#[test]
fn test_malformed_branch_length_fails() {
    let err = parse_str("(A:1.0.0,B);").unwrap_err();
    assert!(matches!(err.kind(), ParsingErrorType::InvalidNewickString(_)));
}

#[test]
fn test_missing_semicolon_fails() {
    let err = parse_str("(A,B)").unwrap_err();
    assert!(matches!(err.kind(), ParsingErrorType::InvalidNewickString(_)));
}

#[test]
fn test_unclosed_parenthesis_fails() {
    let err = parse_str("((A,B),C").unwrap_err();
    assert_eq!(err.kind(), &ParsingErrorType::UnexpectedEOF);
}

#[test]
fn test_unclosed_comment_fails() {
    let err = parse_str("(A,B)[unfinished;").unwrap_err();
    assert_eq!(err.kind(), &ParsingErrorType::UnclosedComment);
}

#[test]
fn test_unclosed_quote_fails() {
    let err = parse_str("('A,B);").unwrap_err();
    assert_eq!(err.kind(), &ParsingErrorType::UnexpectedEOF);
}

#[test]
fn test_duplicate_strain_fails() {
    let err = parse_str("((A,B),A);").unwrap_err();
    assert_eq!(
        err.kind(),
        &ParsingErrorType::InvalidTreeStructure(TreeError::DuplicateStrain("A".to_string()))
    );
}

#[test]
fn test_error_reports_position() {
    let err = parse_str("(A,B)x:y;").unwrap_err();
    assert_eq!(err.position(), 7);
    assert!(err.to_string().contains("at position 7"));
}

// --- TESTS MULTIPLE TREES ---
#[test]
fn test_iterator_over_trees() {
    let input = "(A,B);\n[second] ((A,C),B);\n(C,(B,A));\n";
    let parser = NewickParser::new_defaults();
    let trees: Vec<_> = parser
        .into_iter(ByteParser::for_str(input))
        .collect::<Result<_, _>>()
        .unwrap();

    assert_eq!(trees.len(), 3);
    assert_eq!(trees[2].leaf_order(), vec!["C", "B", "A"]);
}

#[test]
fn test_iterator_stops_after_error() {
    let input = "(A,B);(A,;(C,D);";
    let mut iter = NewickParser::new_defaults().into_iter(ByteParser::for_str(input));

    assert!(iter.next().unwrap().is_ok());
    assert!(iter.next().unwrap().is_err());
    assert!(iter.next().is_none());
}

#[test]
fn test_parse_all_with_known_num_leaves() {
    let mut parser = NewickParser::new_defaults().with_num_leaves(4);
    let trees = parser
        .parse_all(ByteParser::for_str("((A,B),(C,D));(A,(B,(C,D)));"))
        .unwrap();
    assert_eq!(trees.len(), 2);
    assert!(trees.iter().all(|tree| tree.num_leaves() == 4));
}

// --- TESTS WRITING ---
#[test]
fn test_writing_follows_untangled_order() {
    let mut left = parse_str("((A:1,B:1):2,C:3);").unwrap();
    let mut right = parse_str("(C:3,(B:1,A:1):2);").unwrap();

    untangle(&mut left, &mut right);

    assert_eq!(to_newick(&left), "((A:1,B:1):2,C:3);");
    assert_eq!(to_newick(&right), "((A:1,B:1):2,C:3);");
}

#[test]
fn test_write_and_read_file() {
    let trees = vec![
        parse_str("('Baillon''s Crake':0.25,(Weka,Takahe));").unwrap(),
        parse_str("((Weka,Takahe)clade,'Baillon''s Crake');").unwrap(),
    ];
    let path = std::env::temp_dir().join(format!("tanglegram-test-{}.nwk", std::process::id()));

    write_newick_file(fs::File::create(&path).unwrap(), &trees).unwrap();
    let read_back = parse_file(&path).unwrap();
    fs::remove_file(&path).unwrap();

    assert_eq!(read_back.len(), 2);
    for (original, read) in trees.iter().zip(&read_back) {
        assert_eq!(to_newick(original), to_newick(read));
        assert_eq!(original.leaf_order(), read.leaf_order());
    }
}

#[test]
fn test_deep_caterpillar_round_trip() {
    // ((((L0,L1),L2),L3)...,L4999);
    let num_leaves = 5000;
    let mut newick = "(".repeat(num_leaves - 1);
    newick.push_str("L0");
    for i in 1..num_leaves {
        newick.push_str(&format!(",L{i})"));
    }
    newick.push(';');

    let mut left = parse_str(&newick).unwrap();
    let mut right = parse_str(&newick).unwrap();
    assert_eq!(left.num_leaves(), num_leaves);
    assert_eq!(left.num_internal(), num_leaves - 1);
    assert!(left.is_valid());

    untangle(&mut left, &mut right);

    assert_eq!(to_newick(&left), newick);
    assert_eq!(to_newick(&right), newick);
}

#[test]
fn test_missing_file_is_io_error() {
    let err = parse_file("does/not/exist.nwk").unwrap_err();
    assert!(matches!(err.kind(), ParsingErrorType::IoError(_)));
}
