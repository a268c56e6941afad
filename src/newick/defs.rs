//! Constants and defaults for reading and writing Newick strings.

/// Name written in a tree directive if the tree has none
pub(crate) const DEFAULT_TREE_NAME: &str = "a_tree";

/// Default number of decimals for confidences
pub(crate) const DEFAULT_CONFIDENCE_PRECISION: usize = 2;

/// Default number of decimals for branch lengths
pub(crate) const DEFAULT_BRANCH_LENGTH_PRECISION: usize = 5;

/// Confidence written for leaves when confidences are written as branch lengths
pub(crate) const DEFAULT_MAX_CONFIDENCE: f64 = 1.0;

/// Tag for the weight of a tree in a tree directive
pub(crate) const WEIGHT_TAG: &str = "[&W";

/// Tag for a rooted tree in a tree directive
pub(crate) const ROOTED_TAG: &str = "[&R]";
