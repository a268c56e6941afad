//! Property-based tests for escaping and for writing and re-parsing trees.

use newick_io::model::{Clade, Confidence, Tree};
use newick_io::newick::{parse_str, to_newick};
use newick_io::parser::utils::{
    escape_comment, escape_label, is_unquoted_label, unescape_comment, unescape_label,
};
use proptest::prelude::*;

/// Label of an internal clade as the parser would produce it
#[derive(Debug, Clone)]
enum InternalLabel {
    Unlabeled,
    Name(String),
    Support(i64),
}

/// Labels with plenty of characters that need quoting
fn label_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-zA-Z0-9_.]{1,10}",
        "[a-z ()\\[\\]',:;\\\\\t]{1,10}",
        "\\PC{1,10}",
    ]
}

/// Branch lengths written exactly with five decimals
fn branch_length_strategy() -> impl Strategy<Value = f64> {
    (0u32..2000).prop_map(|k| f64::from(k) / 32.0)
}

fn comment_strategy() -> impl Strategy<Value = Option<String>> {
    prop::option::of("[a-z0-9&=,;: \\[\\]\\\\]{1,8}")
}

fn internal_label_strategy() -> impl Strategy<Value = InternalLabel> {
    prop_oneof![
        Just(InternalLabel::Unlabeled),
        "x[a-z_]{0,5}".prop_map(InternalLabel::Name),
        (0i64..=100).prop_map(InternalLabel::Support),
    ]
}

fn clade_strategy() -> impl Strategy<Value = Clade> {
    let leaf = (label_strategy(), branch_length_strategy(), comment_strategy()).prop_map(
        |(name, branch_length, comment)| {
            let mut clade = Clade::leaf(name).with_branch_length(branch_length);
            clade.set_comment(comment);
            clade
        },
    );

    leaf.prop_recursive(5, 64, 4, |inner| {
        (
            prop::collection::vec(inner, 1..4),
            internal_label_strategy(),
            branch_length_strategy(),
            comment_strategy(),
        )
            .prop_map(|(children, label, branch_length, comment)| {
                let mut clade = Clade::new()
                    .with_children(children)
                    .with_branch_length(branch_length);
                match label {
                    InternalLabel::Unlabeled => {}
                    InternalLabel::Name(name) => clade.set_name(Some(name)),
                    InternalLabel::Support(value) => {
                        clade.set_confidence(Some(Confidence::Int(value)))
                    }
                }
                clade.set_comment(comment);
                clade
            })
    })
}

proptest! {
    #[test]
    fn test_escape_label_is_invertible(label in "\\PC*") {
        let escaped = escape_label(&label);
        if is_unquoted_label(&label) {
            prop_assert_eq!(&escaped, &label);
        } else {
            prop_assert!(escaped.starts_with('\'') && escaped.ends_with('\''));
            prop_assert_eq!(unescape_label(&escaped[1..escaped.len() - 1]), label);
        }
    }

    #[test]
    fn test_escaped_label_survives_parsing(label in label_strategy()) {
        let tree = parse_str(format!("({},B);", escape_label(&label))).unwrap();
        prop_assert_eq!(tree.root().children()[0].name(), Some(label.as_str()));
    }

    #[test]
    fn test_escape_comment_is_invertible(comment in "\\PC*") {
        let escaped = escape_comment(&comment);
        prop_assert_eq!(unescape_comment(&escaped[1..escaped.len() - 1]), comment);
    }

    #[test]
    fn test_written_tree_parses_back(root in clade_strategy()) {
        let tree = Tree::new(root);
        let newick = to_newick(&tree);
        let reparsed = parse_str(&newick).unwrap();
        prop_assert_eq!(reparsed, tree, "written as {}", newick);
    }
}
