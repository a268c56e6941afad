use newick_io::model::{Confidence, Tree};
use newick_io::newick::{NewickParser, parse_file, parse_reader, parse_str};
use newick_io::parser::parsing_error::ParsingErrorType;
use newick_io::parser::{BufferedTextSource, InMemoryTextSource};
use rstest::rstest;
use std::io::Cursor;
use std::path::Path;

fn parse_all_str(text: &str) -> Result<Vec<Tree>, newick_io::ParsingError> {
    NewickParser::new().parse_all(InMemoryTextSource::from_string(text))
}

fn leaf_names(tree: &Tree) -> Vec<&str> {
    tree.leaves().filter_map(|c| c.name()).collect()
}

// --- TESTS NEWICK STRING PARSING ---
#[test]
fn test_basic_tree() {
    let tree = parse_str("((A:1.0,B:2.0):3.0,C:4.0):0.5;").unwrap();

    // Test counts
    assert_eq!(tree.num_leaves(), 3);
    assert_eq!(tree.num_internal(), 2);
    assert_eq!(tree.num_clades(), 5);
    assert!(!tree.is_rooted());

    // Test relationships and values
    let root = tree.root();
    assert_eq!(root.branch_length(), Some(0.5));
    assert_eq!(root.children().len(), 2);

    let cherry = &root.children()[0];
    assert_eq!(cherry.branch_length(), Some(3.0));
    assert_eq!(cherry.children()[0].name(), Some("A"));
    assert_eq!(cherry.children()[0].branch_length(), Some(1.0));
    assert_eq!(cherry.children()[1].name(), Some("B"));

    let leaf_c = &root.children()[1];
    assert!(leaf_c.is_leaf());
    assert_eq!(leaf_c.name(), Some("C"));
    assert_eq!(leaf_c.branch_length(), Some(4.0));
}

#[test]
fn test_multifurcation_and_single_child() {
    let tree = parse_str("((A),B,C,D);").unwrap();

    assert_eq!(tree.root().children().len(), 4);
    assert_eq!(tree.root().children()[0].children().len(), 1);
    assert_eq!(leaf_names(&tree), vec!["A", "B", "C", "D"]);
}

#[test]
fn test_rooted_flag() {
    let tree = NewickParser::new()
        .with_rooted(true)
        .parse_str("(A,B);")
        .unwrap();
    assert!(tree.is_rooted());
}

#[test]
fn test_whitespace_and_newlines_ignored() {
    let tree = parse_str("( A : 0.5 ,\n\tB:1e-3 ) ;\n").unwrap();

    let children = tree.root().children();
    assert_eq!(children[0].name(), Some("A"));
    assert_eq!(children[0].branch_length(), Some(0.5));
    assert_eq!(children[1].branch_length(), Some(0.001));
}

#[rstest]
#[case(":1", 1.0)]
#[case(":-0.25", -0.25)]
#[case(":+2", 2.0)]
#[case(":.5", 0.5)]
#[case(":1.5E2", 150.0)]
fn test_edge_length_forms(#[case] edge: &str, #[case] expected: f64) {
    let tree = parse_str(format!("(A{edge},B);")).unwrap();
    assert_eq!(tree.root().children()[0].branch_length(), Some(expected));
}

#[test]
fn test_implicit_outer_parentheses() {
    let tree = parse_str("A,B;").unwrap();

    let root = tree.root();
    assert_eq!(root.name(), None);
    assert_eq!(root.children().len(), 2);
    assert_eq!(root.children()[0].name(), Some("A"));
    assert_eq!(root.children()[1].name(), Some("B"));
}

#[test]
fn test_implicit_outer_parentheses_after_group() {
    let tree = parse_str("(A,B):1,C;").unwrap();

    let root = tree.root();
    assert_eq!(root.children().len(), 2);
    assert_eq!(root.children()[0].branch_length(), Some(1.0));
    assert_eq!(leaf_names(&tree), vec!["A", "B", "C"]);
}

#[test]
fn test_single_leaf_and_empty_statement() {
    let tree = parse_str("A;").unwrap();
    assert!(tree.root().is_leaf());
    assert_eq!(tree.root().name(), Some("A"));

    let tree = parse_str(";").unwrap();
    assert_eq!(tree.num_clades(), 1);
    assert_eq!(tree.root().name(), None);
}

#[test]
fn test_missing_semicolon_same_as_terminated() {
    assert_eq!(parse_str("(A,B)").unwrap(), parse_str("(A,B);").unwrap());
}

// --- TESTS CONFIDENCE ---
#[rstest]
#[case("(A,B)95;", Some(Confidence::Int(95)), None)]
#[case("(A,B)0.95;", Some(Confidence::Float(0.95)), None)]
#[case("(A,B)clade1;", None, Some("clade1"))]
#[case("(A,B)1e2;", Some(Confidence::Float(100.0)), None)]
#[case("(A,B)'95';", Some(Confidence::Int(95)), None)]
fn test_confidence_disambiguation(
    #[case] newick: &str,
    #[case] confidence: Option<Confidence>,
    #[case] name: Option<&str>,
) {
    let tree = parse_str(newick).unwrap();
    assert_eq!(tree.root().confidence(), confidence);
    assert_eq!(tree.root().name(), name);
}

#[test]
fn test_integer_confidence_kept_as_int() {
    let tree = parse_str("((A,B)95,C);").unwrap();
    let confidence = tree.root().children()[0].confidence().unwrap();
    assert!(confidence.is_int());
}

#[test]
fn test_leaf_names_never_confidence() {
    let tree = parse_str("(1,2,0.5);").unwrap();
    assert_eq!(leaf_names(&tree), vec!["1", "2", "0.5"]);
    assert!(tree.leaves().all(|leaf| leaf.confidence().is_none()));
}

#[test]
fn test_values_are_confidence() {
    let tree = NewickParser::new()
        .with_values_as_confidence()
        .parse_str("((A:0.9,B:0.8)75:0.7,C);")
        .unwrap();

    let cherry = &tree.root().children()[0];
    assert_eq!(cherry.confidence(), Some(Confidence::Float(0.7)));
    assert_eq!(cherry.branch_length(), None);
    // Heuristic is off: the label stays a name
    assert_eq!(cherry.name(), Some("75"));
    assert_eq!(cherry.children()[0].confidence(), Some(Confidence::Float(0.9)));
}

#[test]
fn test_comments_are_confidence() {
    let tree = NewickParser::new()
        .with_comments_as_confidence()
        .parse_str("((A,B)x[0.93]:1,C[note])42;")
        .unwrap();

    let cherry = &tree.root().children()[0];
    assert_eq!(cherry.confidence(), Some(Confidence::Float(0.93)));
    assert_eq!(cherry.comment(), Some("0.93"));
    assert_eq!(cherry.name(), Some("x"));
    assert_eq!(cherry.branch_length(), Some(1.0));

    // Non-numeric comment yields no confidence
    let leaf_c = &tree.root().children()[1];
    assert_eq!(leaf_c.confidence(), None);
    assert_eq!(leaf_c.comment(), Some("note"));

    // Heuristic is off
    assert_eq!(tree.root().name(), Some("42"));
    assert_eq!(tree.root().confidence(), None);
}

// --- TESTS LABELS & COMMENTS ---
#[test]
fn test_quoted_labels_unescaped() {
    let tree = parse_str(r"('Baillon\'s crake','back\\slash','a(b):c;d','keep\n');").unwrap();
    assert_eq!(
        leaf_names(&tree),
        vec!["Baillon's crake", r"back\slash", "a(b):c;d", r"keep\n"]
    );
}

#[test]
fn test_comments_unescaped() {
    let tree = parse_str(r"(A[&rate=1],B[a\[1\]]):0.1[root];").unwrap();

    let children = tree.root().children();
    assert_eq!(children[0].comment(), Some("&rate=1"));
    assert_eq!(children[1].comment(), Some("a[1]"));
    assert_eq!(tree.root().comment(), Some("root"));
}

// --- TESTS ERRORS ---
#[rstest]
#[case("((A,B);")]
#[case("(A,B));")]
#[case(")A(;")]
#[case("(A,(B,C);")]
fn test_parenthesis_mismatch(#[case] newick: &str) {
    let err = parse_str(newick).unwrap_err();
    assert!(matches!(err.kind(), ParsingErrorType::ParenthesisMismatch(_)));
}

#[test]
fn test_trailing_text() {
    let err = parse_str("(A,B);C").unwrap_err();
    assert_eq!(err.kind(), &ParsingErrorType::TrailingText("C".to_string()));
    assert_eq!(err.position(), 6);

    // Newlines after the semicolon are fine
    assert!(parse_str("(A,B);\n\n").is_ok());
}

#[test]
fn test_lexical_error() {
    let err = parse_str("(A,'B);").unwrap_err();
    assert_eq!(err.kind(), &ParsingErrorType::LexicalError);
    assert_eq!(err.position(), 3);
}

#[test]
fn test_colon_without_number() {
    let err = parse_str("(A:,B);").unwrap_err();
    assert_eq!(err.kind(), &ParsingErrorType::LexicalError);
    assert_eq!(err.position(), 2);
}

#[test]
fn test_error_display_contains_context() {
    let err = parse_str("(A,B));").unwrap_err();
    let message = err.to_string();
    assert!(message.contains("Parenthesis mismatch"));
    assert!(message.contains("at position"));
}

// --- TESTS MULTIPLE TREES & STREAMS ---
#[test]
fn test_multi_tree_stream() {
    let trees = parse_all_str("(A,B);(C,D);").unwrap();

    assert_eq!(trees.len(), 2);
    assert_eq!(leaf_names(&trees[0]), vec!["A", "B"]);
    assert_eq!(leaf_names(&trees[1]), vec!["C", "D"]);
}

#[test]
fn test_tree_spanning_lines() {
    let trees = parse_all_str("((A,\n  B),\nC);\n(D,E);\n").unwrap();

    assert_eq!(trees.len(), 2);
    assert_eq!(leaf_names(&trees[0]), vec!["A", "B", "C"]);
}

#[test]
fn test_semicolon_in_quotes_and_comments_does_not_split() {
    let trees = parse_all_str("('A;1',B[x;y]);\n(C,D);").unwrap();

    assert_eq!(trees.len(), 2);
    assert_eq!(leaf_names(&trees[0]), vec!["A;1", "B"]);
    assert_eq!(trees[0].root().children()[1].comment(), Some("x;y"));
}

#[test]
fn test_quoted_label_ending_in_backslash() {
    let trees = parse_all_str("('C:\\',B);\n(D,E);\n").unwrap();

    assert_eq!(trees.len(), 2);
    assert_eq!(leaf_names(&trees[0]), vec![r"C:\", "B"]);
    assert_eq!(leaf_names(&trees[1]), vec!["D", "E"]);
}

#[test]
fn test_escaped_quote_at_line_break() {
    let trees = parse_all_str("('it\\'\ns',B);\n(C,D);").unwrap();

    assert_eq!(trees.len(), 2);
    assert_eq!(leaf_names(&trees[0]), vec!["it's", "B"]);
}

#[test]
fn test_truncated_final_tree() {
    let trees = parse_all_str("(A,B);\n(C,D)").unwrap();

    assert_eq!(trees.len(), 2);
    assert_eq!(trees[1], parse_str("(C,D);").unwrap());
}

#[test]
fn test_blank_input() {
    assert!(parse_all_str("").unwrap().is_empty());
    assert!(parse_all_str("\n  \n").unwrap().is_empty());
}

#[test]
fn test_lazy_iterator_stops_after_error() {
    let source = InMemoryTextSource::from_string("(A,B);((C,D);(E,F);");
    let mut iter = NewickParser::new().into_iter(source);

    assert!(iter.next().unwrap().is_ok());
    assert!(iter.next().unwrap().is_err());
    assert!(iter.next().is_none());
}

#[test]
fn test_lazy_iterator_into_parser() {
    let source = InMemoryTextSource::from_string("(A,B)90;");
    let mut iter = NewickParser::new().with_rooted(true).into_iter(source);
    let tree = iter.next().unwrap().unwrap();
    assert!(tree.is_rooted());

    let parser = iter.into_parser();
    assert!(parser.parse_str("(C,D);").unwrap().is_rooted());
}

#[test]
fn test_parse_reader() {
    let trees = parse_reader(Cursor::new("(A,B);\n(C,(D,E));\n")).unwrap();
    assert_eq!(trees.len(), 2);
    assert_eq!(trees[1].num_leaves(), 3);
}

#[test]
fn test_binary_input_rejected() {
    let bytes: Vec<u8> = vec![0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a, 0x00];
    let err = parse_reader(Cursor::new(bytes)).unwrap_err();
    assert_eq!(err.kind(), &ParsingErrorType::InvalidStreamMode);

    assert!(BufferedTextSource::new(Cursor::new(vec![b'(', 0u8, b')'])).is_err());
}

#[test]
fn test_parsing_newick_file() {
    let path = Path::new("tests").join("fixtures").join("newick_t3_n5.nwk");
    let trees = parse_file(path).unwrap();

    assert_eq!(trees.len(), 3);
    for tree in &trees {
        assert_eq!(tree.num_leaves(), 5);
    }

    // First tree spans two lines and carries integer supports
    let first = trees[0].root();
    assert_eq!(first.children()[0].confidence(), Some(Confidence::Int(95)));
    assert_eq!(first.children()[1].confidence(), Some(Confidence::Int(87)));
    assert_eq!(first.children()[1].children()[1].name(), Some("Cygnus_atratus"));

    // Last tree has no semicolon
    assert_eq!(trees[2].root().comment(), Some("last tree without semicolon"));
    assert_eq!(trees[2].root().children()[0].name(), Some("Anser anser"));
}

#[test]
fn test_missing_file() {
    let err = parse_file("tests/fixtures/does_not_exist.nwk").unwrap_err();
    assert!(matches!(err.kind(), ParsingErrorType::Io(_)));
}

// --- TESTS DEEP TREES ---
#[test]
fn test_deeply_nested_tree() {
    const DEPTH: usize = 100_000;
    let mut newick = String::with_capacity(DEPTH * 5);
    for _ in 0..DEPTH {
        newick.push('(');
    }
    newick.push('A');
    for _ in 0..DEPTH {
        newick.push_str(",B)");
    }
    newick.push(';');

    let tree = parse_str(&newick).unwrap();
    assert_eq!(tree.num_leaves(), DEPTH + 1);
    assert_eq!(tree.num_internal(), DEPTH);
}
