//! Provides the rooted tree representation.
//!
//! Provides core data structures for representing phylogenetic trees:
//! * [Tree] - A root [Clade] plus tree-level attributes
//!   (rootedness, name, weight)
//! * [Ladderize] - Direction for reordering children by subtree size
//! * [PreOrderIter] and [PostOrderIter] - stack-based traversals

use crate::model::clade::Clade;

/// Default weight of a tree
pub const DEFAULT_WEIGHT: f64 = 1.0;

// =$========================================================================$=
// TREE
// =$========================================================================$=
/// A phylogenetic tree given by its root [Clade].
///
/// # Structure
/// - The root owns all other clades (nested, no parent references).
/// - `rooted` tells whether the root placement is meaningful.
/// - `name` is optional, `weight` defaults to [DEFAULT_WEIGHT].
///
/// # Example
/// ```
/// use newick_io::model::{Clade, Tree};
///
/// let root = Clade::new().with_children(vec![Clade::leaf("A"), Clade::leaf("B")]);
/// let tree = Tree::new(root).with_rooted(true).with_name("tiny");
///
/// assert_eq!(tree.num_leaves(), 2);
/// assert!(tree.is_rooted());
/// assert_eq!(tree.weight(), 1.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Tree {
    /// Root clade, owning all other clades
    root: Clade,

    /// Whether the root placement is meaningful
    rooted: bool,

    /// Name of tree; optional
    name: Option<String>,

    /// Weight of tree, e.g. from a `[&W...]` tag
    weight: f64,
}

// ============================================================================
// New, Getters / Accessors, etc. (pub)
// ============================================================================
impl Tree {
    /// Creates a new unrooted, unnamed tree with weight 1.
    pub fn new(root: Clade) -> Self {
        Tree {
            root,
            rooted: false,
            name: None,
            weight: DEFAULT_WEIGHT,
        }
    }

    /// Sets whether this tree is rooted.
    pub fn with_rooted(mut self, rooted: bool) -> Self {
        self.rooted = rooted;
        self
    }

    /// Attaches a name to this tree.
    pub fn with_name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the weight of this tree.
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    /// Returns a reference to the root clade.
    pub fn root(&self) -> &Clade {
        &self.root
    }

    /// Returns a mutable reference to the root clade.
    pub fn root_mut(&mut self) -> &mut Clade {
        &mut self.root
    }

    /// Consumes the tree and returns its root clade.
    pub fn into_root(self) -> Clade {
        self.root
    }

    /// Returns whether this tree is rooted.
    pub fn is_rooted(&self) -> bool {
        self.rooted
    }

    /// Sets whether this tree is rooted.
    pub fn set_rooted(&mut self, rooted: bool) {
        self.rooted = rooted;
    }

    /// Returns the name of this tree, or `None` if not set.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Set a name for this tree.
    pub fn set_name(&mut self, name: String) {
        self.name = Some(name);
    }

    /// Returns the weight of this tree.
    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// Sets the weight of this tree.
    pub fn set_weight(&mut self, weight: f64) {
        self.weight = weight;
    }

    /// Returns the number of leaves in this tree.
    pub fn num_leaves(&self) -> usize {
        self.leaves().count()
    }

    /// Returns the number of internal clades (including the root,
    /// unless the root is a leaf).
    pub fn num_internal(&self) -> usize {
        self.pre_order_iter().filter(|c| !c.is_leaf()).count()
    }

    /// Returns the number of clades in this tree.
    pub fn num_clades(&self) -> usize {
        self.pre_order_iter().count()
    }

    /// Returns an iterator over the leaves, from left to right.
    pub fn leaves(&self) -> impl Iterator<Item = &Clade> {
        self.pre_order_iter().filter(|c| c.is_leaf())
    }

    /// Returns the sum of all set branch lengths in the tree.
    pub fn total_branch_length(&self) -> f64 {
        self.pre_order_iter()
            .filter_map(|c| c.branch_length())
            .sum::<f64>()
    }

    /// Checks if all non-root clades have branch lengths set.
    pub fn clades_have_branch_lengths(&self) -> bool {
        self.pre_order_iter()
            .skip(1)
            .all(|c| c.branch_length().is_some())
    }
}

// =$========================================================================$=
// LADDERIZE
// =$========================================================================$=
/// Direction in which [Tree::ladderize] sorts children.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ladderize {
    /// Smaller subtrees first
    Left,
    /// Larger subtrees first
    Right,
}

impl Tree {
    /// Reorders the children of every clade by number of leaves in their
    /// subtrees, in place.
    ///
    /// Sorting is stable, so children with equally many leaves keep their
    /// relative order. Works without recursion.
    ///
    /// # Example
    /// ```
    /// use newick_io::model::{Clade, Ladderize, Tree};
    ///
    /// let cherry = Clade::new().with_children(vec![Clade::leaf("B"), Clade::leaf("C")]);
    /// let mut tree = Tree::new(Clade::new().with_children(vec![cherry, Clade::leaf("A")]));
    ///
    /// tree.ladderize(Ladderize::Left);
    /// assert_eq!(tree.root().children()[0].name(), Some("A"));
    /// ```
    pub fn ladderize(&mut self, direction: Ladderize) {
        // Pass 1: leaf count and size of each subtree, by pre-order index
        let (num_leaves, sizes) = self.subtree_counts();

        // Pass 2: sort children, carrying their original pre-order index
        let mut stack: Vec<(&mut Clade, usize)> = vec![(&mut self.root, 0)];
        while let Some((clade, index)) = stack.pop() {
            let mut next = index + 1;
            let mut keyed = Vec::with_capacity(clade.children().len());
            for child in clade.children_mut().drain(..) {
                keyed.push((num_leaves[next], next, child));
                next += sizes[next];
            }

            match direction {
                Ladderize::Left => keyed.sort_by(|a, b| a.0.cmp(&b.0)),
                Ladderize::Right => keyed.sort_by(|a, b| b.0.cmp(&a.0)),
            }

            let mut indices = Vec::with_capacity(keyed.len());
            for (_, child_index, child) in keyed {
                indices.push(child_index);
                clade.push_child(child);
            }

            for (child, child_index) in clade.children_mut().iter_mut().zip(indices) {
                stack.push((child, child_index));
            }
        }
    }

    /// Returns, indexed by pre-order position, the number of leaves and the
    /// number of clades in the subtree of each clade.
    fn subtree_counts(&self) -> (Vec<usize>, Vec<usize>) {
        // Parent (pre-order index) of each clade in pre-order
        let mut parents: Vec<Option<usize>> = Vec::new();
        let mut num_leaves: Vec<usize> = Vec::new();
        let mut stack: Vec<(&Clade, Option<usize>)> = vec![(&self.root, None)];
        while let Some((clade, parent)) = stack.pop() {
            let index = parents.len();
            parents.push(parent);
            num_leaves.push(usize::from(clade.is_leaf()));
            for child in clade.children().iter().rev() {
                stack.push((child, Some(index)));
            }
        }

        // Accumulate bottom-up; children always come after their parent
        let mut sizes = vec![1; parents.len()];
        for index in (1..parents.len()).rev() {
            if let Some(parent) = parents[index] {
                num_leaves[parent] += num_leaves[index];
                sizes[parent] += sizes[index];
            }
        }

        (num_leaves, sizes)
    }
}

// =$========================================================================$=
// ITERATORS
// =$========================================================================$=
impl Tree {
    /// Returns an iterator over the tree in pre-order (parents before children,
    /// children from left to right).
    ///
    /// # Example
    /// ```
    /// use newick_io::model::{Clade, Tree};
    ///
    /// let root = Clade::new().with_name("R").with_children(vec![Clade::leaf("A"), Clade::leaf("B")]);
    /// let tree = Tree::new(root);
    ///
    /// let names: Vec<_> = tree.pre_order_iter().filter_map(|c| c.name()).collect();
    /// assert_eq!(names, vec!["R", "A", "B"]);
    /// ```
    pub fn pre_order_iter(&self) -> PreOrderIter<'_> {
        PreOrderIter::new(&self.root)
    }

    /// Returns an iterator over the tree in post-order (children before parents).
    ///
    /// # Example
    /// ```
    /// use newick_io::model::{Clade, Tree};
    ///
    /// let root = Clade::new().with_name("R").with_children(vec![Clade::leaf("A"), Clade::leaf("B")]);
    /// let tree = Tree::new(root);
    ///
    /// let names: Vec<_> = tree.post_order_iter().filter_map(|c| c.name()).collect();
    /// assert_eq!(names, vec!["A", "B", "R"]);
    /// ```
    pub fn post_order_iter(&self) -> PostOrderIter<'_> {
        PostOrderIter::new(&self.root)
    }
}

/// Iterator for pre-order traversal (parents before children).
///
/// This iterator uses a stack-based approach to traverse the tree without recursion.
/// Each clade is visited before any of its descendants.
pub struct PreOrderIter<'a> {
    stack: Vec<&'a Clade>,
}

impl<'a> PreOrderIter<'a> {
    fn new(root: &'a Clade) -> Self {
        PreOrderIter { stack: vec![root] }
    }
}

impl<'a> Iterator for PreOrderIter<'a> {
    type Item = &'a Clade;

    fn next(&mut self) -> Option<Self::Item> {
        let clade = self.stack.pop()?;

        // Push children onto stack (last first, so first is processed first)
        self.stack.extend(clade.children().iter().rev());

        Some(clade)
    }
}

/// Iterator for post-order traversal (children before parents).
///
/// This iterator uses a stack-based approach to traverse the tree without recursion.
/// Each clade is visited after all its descendants have been visited.
pub struct PostOrderIter<'a> {
    stack: Vec<(&'a Clade, bool)>, // (clade, children_visited)
}

impl<'a> PostOrderIter<'a> {
    fn new(root: &'a Clade) -> Self {
        PostOrderIter {
            stack: vec![(root, false)],
        }
    }
}

impl<'a> Iterator for PostOrderIter<'a> {
    type Item = &'a Clade;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((clade, children_visited)) = self.stack.pop() {
            if children_visited || clade.is_leaf() {
                // Either we've already processed children, or this is a leaf
                return Some(clade);
            }

            // Mark this clade as "children will be visited"
            self.stack.push((clade, true));
            for child in clade.children().iter().rev() {
                self.stack.push((child, false));
            }
        }
        None
    }
}
