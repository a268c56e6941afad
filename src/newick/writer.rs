//! Newick format writing.
//!
//! This module provides [NewickWriter], which renders [Tree]s as Newick
//! strings in one of several [InfoMode]s, either one at a time
//! ([NewickWriter::to_newick]), lazily ([NewickWriter::to_strings]) or
//! straight into an output stream ([NewickWriter::write]).

use crate::model::{Clade, Ladderize, Tree};
use crate::newick::defs::{
    DEFAULT_BRANCH_LENGTH_PRECISION, DEFAULT_CONFIDENCE_PRECISION, DEFAULT_MAX_CONFIDENCE,
    DEFAULT_TREE_NAME, ROOTED_TAG, WEIGHT_TAG,
};
use crate::parser::utils::{escape_comment, escape_label};
use std::borrow::BorrowMut;
use std::collections::VecDeque;
use std::fs::File;
use std::io::{self, BufWriter, Write};

/// Extra buffer in Newick string length/capacity estimate
const BUFFER_CHARS: usize = 10;

// =#========================================================================#=
// INFO MODE
// =#========================================================================$=
/// What is written after the label of each clade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InfoMode {
    /// Topology and labels only (plus comments)
    Plain,
    /// Confidences in place of branch lengths, e.g. for PAUP;
    /// leaves get the maximum confidence
    ConfidenceAsBranchLength,
    /// Branch lengths only, never confidences
    BranchLengthOnly,
    /// Confidence of internal clades followed by `:` and branch length.
    ///
    /// The confidence directly follows the label, so a clade with both a
    /// name and a confidence (e.g. `X` and `0.90`) is written as `X0.90`,
    /// which reads back as the single name `X0.90`.
    #[default]
    Full,
}

impl InfoMode {
    /// Selects the mode from the three classic flags.
    ///
    /// The branch-length-centric flags take priority over `plain`,
    /// and `confidence_as_branch_length` over `branch_length_only`.
    ///
    /// # Example
    /// ```
    /// use newick_io::newick::InfoMode;
    ///
    /// assert_eq!(InfoMode::from_flags(false, true, true), InfoMode::BranchLengthOnly);
    /// assert_eq!(InfoMode::from_flags(false, false, false), InfoMode::Full);
    /// ```
    pub fn from_flags(
        confidence_as_branch_length: bool,
        branch_length_only: bool,
        plain: bool,
    ) -> Self {
        match (confidence_as_branch_length, branch_length_only, plain) {
            (true, _, _) => InfoMode::ConfidenceAsBranchLength,
            (false, true, _) => InfoMode::BranchLengthOnly,
            (false, false, true) => InfoMode::Plain,
            (false, false, false) => InfoMode::Full,
        }
    }
}

// =#========================================================================#=
// NUMBER FORMAT
// =#========================================================================$=
/// Formatting of confidences and branch lengths.
#[derive(Debug, Clone, Copy)]
pub enum NumberFormat {
    /// Fixed number of decimals, e.g. `Fixed(2)` writes `0.95`
    Fixed(usize),
    /// Shortest text that reads back as the same value, e.g. `1` or `0.125`
    Shortest,
    /// Custom formatting function
    Custom(fn(f64) -> String),
}

impl NumberFormat {
    /// Formats the value.
    ///
    /// # Example
    /// ```
    /// use newick_io::newick::NumberFormat;
    ///
    /// assert_eq!(NumberFormat::Fixed(3).format(0.5), "0.500");
    /// assert_eq!(NumberFormat::Shortest.format(2.0), "2");
    /// assert_eq!(NumberFormat::Custom(|v| format!("{v:e}")).format(1500.0), "1.5e3");
    /// ```
    pub fn format(&self, value: f64) -> String {
        match *self {
            NumberFormat::Fixed(precision) => format!("{value:.precision$}"),
            NumberFormat::Shortest => format!("{value}"),
            NumberFormat::Custom(format) => format(value),
        }
    }
}

// =#========================================================================#=
// NEWICK WRITER
// =#========================================================================$=
/// Writer (configuration) for Newick strings.
///
/// Clades are rendered from an explicit worklist, so trees of any depth can
/// be written without growing the call stack.
///
/// # Configuration
/// * [`with_mode(mode)`](Self::with_mode) or [`from_flags`](Self::from_flags)
///     - [InfoMode], default [InfoMode::Full]
/// * [`with_tree_directive()`](Self::with_tree_directive)
///     - Prefix each tree with `tree <name> = [&W<weight>] [&R]`
/// * [`with_ladderize(direction)`](Self::with_ladderize)
///     - Ladderize each tree in place before writing it
/// * [`with_max_confidence(value)`](Self::with_max_confidence)
///     - Confidence of leaves in [InfoMode::ConfidenceAsBranchLength], default `1.0`
/// * [`with_confidence_format`](Self::with_confidence_format) and
///   [`with_branch_length_format`](Self::with_branch_length_format)
///     - [NumberFormat]s, default `Fixed(2)` and `Fixed(5)`
///
/// # Example
/// ```
/// use newick_io::newick::{NewickParser, NewickWriter};
///
/// let tree = NewickParser::new().parse_str("(A:1,B:2)0.95:0.5;").unwrap();
///
/// let newick = NewickWriter::new().to_newick(&tree);
/// assert_eq!(newick, "(A:1.00000,B:2.00000)0.95:0.50000;");
///
/// let newick = NewickWriter::from_flags(false, false, true).to_newick(&tree);
/// assert_eq!(newick, "(A,B);");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct NewickWriter {
    mode: InfoMode,
    plain_newick: bool,
    ladderize: Option<Ladderize>,
    max_confidence: f64,
    confidence_format: NumberFormat,
    branch_length_format: NumberFormat,
}

impl Default for NewickWriter {
    fn default() -> Self {
        Self {
            mode: InfoMode::Full,
            plain_newick: true,
            ladderize: None,
            max_confidence: DEFAULT_MAX_CONFIDENCE,
            confidence_format: NumberFormat::Fixed(DEFAULT_CONFIDENCE_PRECISION),
            branch_length_format: NumberFormat::Fixed(DEFAULT_BRANCH_LENGTH_PRECISION),
        }
    }
}

// ============================================================================
// Construction & Configuration (pub)
// ============================================================================
impl NewickWriter {
    /// Creates a new [NewickWriter] with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a writer whose [InfoMode] is chosen by [InfoMode::from_flags].
    pub fn from_flags(
        confidence_as_branch_length: bool,
        branch_length_only: bool,
        plain: bool,
    ) -> Self {
        Self::new().with_mode(InfoMode::from_flags(
            confidence_as_branch_length,
            branch_length_only,
            plain,
        ))
    }

    /// Sets the [InfoMode].
    pub fn with_mode(mut self, mode: InfoMode) -> Self {
        self.mode = mode;
        self
    }

    /// Prefixes each tree with a `tree <name> = ...` directive.
    pub fn with_tree_directive(mut self) -> Self {
        self.plain_newick = false;
        self
    }

    /// Ladderizes each tree in the given direction before writing it.
    pub fn with_ladderize(mut self, direction: Ladderize) -> Self {
        self.ladderize = Some(direction);
        self
    }

    /// Sets the confidence written for leaves in
    /// [InfoMode::ConfidenceAsBranchLength].
    pub fn with_max_confidence(mut self, max_confidence: f64) -> Self {
        self.max_confidence = max_confidence;
        self
    }

    /// Sets the format of confidences.
    pub fn with_confidence_format(mut self, format: NumberFormat) -> Self {
        self.confidence_format = format;
        self
    }

    /// Sets the format of branch lengths.
    pub fn with_branch_length_format(mut self, format: NumberFormat) -> Self {
        self.branch_length_format = format;
        self
    }

    /// Returns the configured [InfoMode].
    pub fn mode(&self) -> InfoMode {
        self.mode
    }
}

// ============================================================================
// API Writing (pub)
// ============================================================================
impl NewickWriter {
    /// Returns the Newick representation of the tree with closing semicolon,
    /// preceded by the tree directive if configured.
    ///
    /// Does not ladderize, as the tree is borrowed immutably;
    /// see [to_strings](Self::to_strings).
    pub fn to_newick(&self, tree: &Tree) -> String {
        let mut newick = String::with_capacity(self.estimate_newick_len(tree));
        if !self.plain_newick {
            self.push_directive(tree, &mut newick);
        }
        self.push_clades(tree.root(), &mut newick);
        newick.push(';');

        newick
    }

    /// Returns a lazy iterator of Newick strings, one per tree.
    ///
    /// Trees are ladderized in place first if configured. Hence items must
    /// be owned trees or `&mut Tree`, even without ladderizing; pass
    /// `&mut trees` to keep a collection, or use [to_newick](Self::to_newick)
    /// on shared references.
    ///
    /// # Example
    /// ```
    /// use newick_io::model::Ladderize;
    /// use newick_io::newick::{NewickParser, NewickWriter};
    ///
    /// let mut trees = vec![NewickParser::new().parse_str("((B,C),A);").unwrap()];
    /// let writer = NewickWriter::from_flags(false, false, true).with_ladderize(Ladderize::Left);
    ///
    /// let strings: Vec<String> = writer.to_strings(&mut trees).collect();
    /// assert_eq!(strings, vec!["(A,(B,C));"]);
    /// ```
    pub fn to_strings<I>(&self, trees: I) -> TreeStrings<'_, I::IntoIter>
    where
        I: IntoIterator,
        I::Item: BorrowMut<Tree>,
    {
        TreeStrings {
            writer: self,
            trees: trees.into_iter(),
        }
    }

    /// Writes each tree followed by a newline and returns the number of
    /// trees written.
    ///
    /// Takes trees like [to_strings](Self::to_strings), i.e. owned or as
    /// `&mut Tree`.
    ///
    /// # Errors
    /// Returns an I/O error if writing fails.
    ///
    /// # Example
    /// ```
    /// use newick_io::newick::{NewickWriter, parse_str};
    ///
    /// let mut trees = vec![parse_str("(A,B);").unwrap(), parse_str("(C,D);").unwrap()];
    /// let mut out = Vec::new();
    ///
    /// let count = NewickWriter::from_flags(false, false, true).write(&mut out, &mut trees)?;
    /// assert_eq!(count, 2);
    /// assert_eq!(trees.len(), 2);
    /// # Ok::<(), std::io::Error>(())
    /// ```
    pub fn write<W, I>(&self, out: W, trees: I) -> io::Result<usize>
    where
        W: Write,
        I: IntoIterator,
        I::Item: BorrowMut<Tree>,
    {
        write_lines(out, self.to_strings(trees))
    }
}

// ============================================================================
// Rendering (private)
// ============================================================================
/// Pending step of the worklist in [NewickWriter::push_clades]
enum WorkItem<'a> {
    /// Clade to render, either as leaf or by opening its children
    Open(&'a Clade),
    /// Closing parenthesis, label and info of a clade after its children
    Close(&'a Clade),
    Comma,
}

impl NewickWriter {
    /// Appends `tree <name> = [&W<weight>] [&R] ` to `newick`.
    fn push_directive(&self, tree: &Tree, newick: &mut String) {
        let name = tree
            .name()
            .filter(|name| !name.is_empty())
            .unwrap_or(DEFAULT_TREE_NAME);
        newick.push_str("tree ");
        newick.push_str(&escape_label(name));
        newick.push_str(" = ");

        if tree.weight() != 1.0 {
            let weight = (tree.weight() * 1000.0).round() / 1000.0;
            newick.push_str(&format!("{WEIGHT_TAG}{weight:?}] "));
        }
        if tree.is_rooted() {
            newick.push_str(ROOTED_TAG);
            newick.push(' ');
        }
    }

    /// Appends the nested clades below (and including) `root` to `newick`.
    fn push_clades(&self, root: &Clade, newick: &mut String) {
        let mut worklist = VecDeque::from([WorkItem::Open(root)]);
        while let Some(item) = worklist.pop_front() {
            match item {
                WorkItem::Comma => newick.push(','),
                WorkItem::Close(clade) => {
                    newick.push(')');
                    self.push_label(clade, newick);
                    self.push_info(clade, false, newick);
                }
                WorkItem::Open(clade) if clade.is_leaf() => {
                    self.push_label(clade, newick);
                    self.push_info(clade, true, newick);
                }
                WorkItem::Open(clade) => {
                    worklist.push_front(WorkItem::Close(clade));
                    for child in clade.children().iter().rev() {
                        worklist.push_front(WorkItem::Open(child));
                        worklist.push_front(WorkItem::Comma);
                    }
                    // No comma before the first child
                    if matches!(worklist.front(), Some(WorkItem::Comma)) {
                        worklist.pop_front();
                    }
                    newick.push('(');
                }
            }
        }
    }

    fn push_label(&self, clade: &Clade, newick: &mut String) {
        if let Some(name) = clade.name().filter(|name| !name.is_empty()) {
            newick.push_str(&escape_label(name));
        }
    }

    /// Appends confidence and/or branch length according to the mode,
    /// followed by the comment if there is one.
    fn push_info(&self, clade: &Clade, terminal: bool, newick: &mut String) {
        match self.mode {
            InfoMode::Plain => {}
            InfoMode::ConfidenceAsBranchLength => {
                // Leaves have full support
                let confidence = if terminal {
                    Some(self.max_confidence)
                } else {
                    clade.confidence().map(|c| c.value())
                };
                if let Some(confidence) = confidence {
                    newick.push(':');
                    newick.push_str(&self.confidence_format.format(confidence));
                }
            }
            InfoMode::BranchLengthOnly => {
                if let Some(branch_length) = clade.branch_length() {
                    newick.push(':');
                    newick.push_str(&self.branch_length_format.format(branch_length));
                }
            }
            InfoMode::Full => {
                if let Some(confidence) = clade.confidence().filter(|_| !terminal) {
                    newick.push_str(&self.confidence_format.format(confidence.value()));
                }
                newick.push(':');
                let branch_length = clade.branch_length().unwrap_or(0.0);
                newick.push_str(&self.branch_length_format.format(branch_length));
            }
        }

        if let Some(comment) = clade.comment().filter(|comment| !comment.is_empty()) {
            newick.push_str(&escape_comment(comment));
        }
    }

    /// Estimates the length of the Newick string of a tree, to pre-allocate
    /// string capacity.
    fn estimate_newick_len(&self, tree: &Tree) -> usize {
        // Per clade: "(" or "," or ")"
        const STRUCTURE_CHARS: usize = 1;
        // Per clade in non-plain modes, e.g. ":0.01234"
        const INFO_CHARS: usize = 9;

        let info_chars = match self.mode {
            InfoMode::Plain => 0,
            _ => INFO_CHARS,
        };
        let (num_clades, label_len) = tree
            .pre_order_iter()
            .fold((0, 0), |(count, len), clade| {
                (count + 1, len + clade.name().map_or(0, str::len))
            });

        num_clades * (STRUCTURE_CHARS + info_chars) + label_len + BUFFER_CHARS
    }
}

// =#========================================================================#=
// TREE STRINGS
// =#========================================================================$=
/// Lazy iterator of Newick strings, see [NewickWriter::to_strings].
pub struct TreeStrings<'w, I> {
    writer: &'w NewickWriter,
    trees: I,
}

impl<I> Iterator for TreeStrings<'_, I>
where
    I: Iterator,
    I::Item: BorrowMut<Tree>,
{
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        let mut item = self.trees.next()?;
        let tree: &mut Tree = item.borrow_mut();
        if let Some(direction) = self.writer.ladderize {
            tree.ladderize(direction);
        }
        Some(self.writer.to_newick(tree))
    }
}

// =#========================================================================#=
// FILE WRITING
// =#========================================================================$=
/// Writes given list of trees to a file in Newick format, one tree per line,
/// with default settings of [NewickWriter].
///
/// # Arguments
/// * `file` - The file to write to
/// * `trees` - Trees to write
///
/// # Returns
/// The number of trees written, or an I/O error if writing fails.
///
/// # Example
/// ```no_run
/// use newick_io::newick::{parse_str, write_newick_file};
/// use std::fs::File;
///
/// let tree = parse_str("(Kea,Kaka);").unwrap();
/// let file = File::create("parrots.nwk")?;
/// assert_eq!(write_newick_file(file, &[tree])?, 1);
/// # Ok::<(), std::io::Error>(())
/// ```
pub fn write_newick_file(file: File, trees: &[Tree]) -> io::Result<usize> {
    let writer = NewickWriter::new();
    write_lines(
        BufWriter::new(file),
        trees.iter().map(|tree| writer.to_newick(tree)),
    )
}

/// Returns the Newick representation of the tree with default settings
/// of [NewickWriter].
pub fn to_newick(tree: &Tree) -> String {
    NewickWriter::new().to_newick(tree)
}

/// Writes each string followed by a newline, flushes, and returns the count.
fn write_lines<W, S>(mut out: W, lines: S) -> io::Result<usize>
where
    W: Write,
    S: Iterator<Item = String>,
{
    let mut count = 0;
    for line in lines {
        out.write_all(line.as_bytes())?;
        out.write_all(b"\n")?;
        tracing::debug!(index = count, len = line.len(), "Wrote Newick tree");
        count += 1;
    }
    out.flush()?;

    Ok(count)
}
