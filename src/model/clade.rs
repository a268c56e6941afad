//! Clade (vertex) of a phylogenetic tree.
//!
//! A [Clade] owns its children directly, so a tree is a plain nested value
//! without parent references. Cloning, dropping and comparing clades is done
//! with an explicit worklist, thus trees of any depth can be handled.

use crate::model::confidence::Confidence;

// =#========================================================================#=
// CLADE
// =#========================================================================$=
/// A vertex (clade) in a phylogenetic tree.
///
/// Every attribute is optional:
/// - `name` - label of the clade
/// - `branch_length` - length of the incoming branch (any sign accepted)
/// - `confidence` - support value, see [Confidence]
/// - `comment` - content of a `[...]` comment, stored unescaped
///
/// Children are ordered and exclusively owned by their parent.
/// A clade without children is a leaf.
///
/// # Example
/// ```
/// use newick_io::model::Clade;
///
/// let clade = Clade::new()
///     .with_children(vec![
///         Clade::leaf("A").with_branch_length(0.1),
///         Clade::leaf("B").with_branch_length(0.2),
///     ])
///     .with_confidence(0.95);
///
/// assert!(!clade.is_leaf());
/// assert_eq!(clade.children()[1].name(), Some("B"));
/// ```
#[derive(Debug, Default)]
pub struct Clade {
    name: Option<String>,
    branch_length: Option<f64>,
    confidence: Option<Confidence>,
    comment: Option<String>,
    children: Vec<Clade>,
}

// ============================================================================
// New, Builder (pub)
// ============================================================================
impl Clade {
    /// Creates a new clade without attributes and children.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new leaf with the given name.
    pub fn leaf<S: Into<String>>(name: S) -> Self {
        Self::new().with_name(name)
    }

    /// Sets the name of this clade.
    pub fn with_name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the branch length of this clade.
    pub fn with_branch_length(mut self, branch_length: f64) -> Self {
        self.branch_length = Some(branch_length);
        self
    }

    /// Sets the confidence of this clade.
    pub fn with_confidence<C: Into<Confidence>>(mut self, confidence: C) -> Self {
        self.confidence = Some(confidence.into());
        self
    }

    /// Sets the comment of this clade.
    pub fn with_comment<S: Into<String>>(mut self, comment: S) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Replaces the children of this clade.
    pub fn with_children(mut self, children: Vec<Clade>) -> Self {
        self.children = children;
        self
    }
}

// ============================================================================
// Getters / Setters (pub)
// ============================================================================
impl Clade {
    /// Returns the name, or `None` if not set.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns the branch length, or `None` if not set.
    pub fn branch_length(&self) -> Option<f64> {
        self.branch_length
    }

    /// Returns the confidence, or `None` if not set.
    pub fn confidence(&self) -> Option<Confidence> {
        self.confidence
    }

    /// Returns the (unescaped) comment, or `None` if not set.
    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    /// Returns the children in order.
    pub fn children(&self) -> &[Clade] {
        &self.children
    }

    /// Returns mutable access to the children.
    pub fn children_mut(&mut self) -> &mut Vec<Clade> {
        &mut self.children
    }

    /// Returns `true` if this clade has no children.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Sets or clears the name.
    pub fn set_name(&mut self, name: Option<String>) {
        self.name = name;
    }

    /// Sets or clears the branch length.
    pub fn set_branch_length(&mut self, branch_length: Option<f64>) {
        self.branch_length = branch_length;
    }

    /// Sets or clears the confidence.
    pub fn set_confidence(&mut self, confidence: Option<Confidence>) {
        self.confidence = confidence;
    }

    /// Sets or clears the comment.
    pub fn set_comment(&mut self, comment: Option<String>) {
        self.comment = comment;
    }

    /// Appends a child as last child.
    pub fn push_child(&mut self, child: Clade) {
        self.children.push(child);
    }
}

// ============================================================================
// Clone, Drop & Equality (without recursion)
// ============================================================================
impl Clone for Clade {
    fn clone(&self) -> Self {
        // Post-order; cloned children wait on `done` until their parent is cloned
        let mut stack: Vec<(&Clade, bool)> = vec![(self, false)];
        let mut done: Vec<Clade> = Vec::new();
        while let Some((clade, children_done)) = stack.pop() {
            if children_done || clade.children.is_empty() {
                let children = done.split_off(done.len() - clade.children.len());
                done.push(Clade {
                    name: clade.name.clone(),
                    branch_length: clade.branch_length,
                    confidence: clade.confidence,
                    comment: clade.comment.clone(),
                    children,
                });
            } else {
                stack.push((clade, true));
                for child in clade.children.iter().rev() {
                    stack.push((child, false));
                }
            }
        }

        done.pop().unwrap_or_default()
    }
}

impl Drop for Clade {
    fn drop(&mut self) {
        // Flatten descendants, so each clade is dropped with no children left
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut clade) = pending.pop() {
            pending.append(&mut clade.children);
        }
    }
}

impl PartialEq for Clade {
    fn eq(&self, other: &Self) -> bool {
        let mut pairs = vec![(self, other)];
        while let Some((a, b)) = pairs.pop() {
            if a.name != b.name
                || a.branch_length != b.branch_length
                || a.confidence != b.confidence
                || a.comment != b.comment
                || a.children.len() != b.children.len()
            {
                return false;
            }
            pairs.extend(a.children.iter().zip(b.children.iter()));
        }

        true
    }
}
