//! Data model for phylogenetic trees.
//!
//! # Tree representation
//! Trees are represented by [Tree], which holds a root [Clade] together with
//! tree-level attributes (rootedness, name, weight). Each [Clade] owns its
//! ordered children, so there are no parent references and no sharing.
//!
//! | Type | Content |
//! |------|---------|
//! | [Clade] | name, branch length, [Confidence], comment, children |
//! | [Tree] | root clade, rooted flag, name, weight |
//!
//! # Traversal
//! All traversals ([`Tree::pre_order_iter`], [`Tree::post_order_iter`],
//! [`Tree::ladderize`]) as well as cloning, dropping and comparing clades work with
//! explicit stacks, so deep trees do not exhaust the call stack.

pub mod clade;
pub mod confidence;
pub mod tree;

pub use clade::Clade;
pub use confidence::Confidence;
pub use tree::{Ladderize, PostOrderIter, PreOrderIter, Tree};
