//! Structs and logic to parse Newick strings.
//!
//! This module provides the [NewickParser] struct, which offers methods
//! to parse single statements or whole text sources, as well as lazy parsing
//! via a [NewickIterator].

use crate::model::{Clade, Confidence, Tree};
use crate::parser::parsing_error::ParsingError;
use crate::parser::text_source::TextSource;
use crate::parser::tokenizer::{StatementScanner, TokenKind, Tokenizer};
use crate::parser::utils::{unescape_comment, unescape_label};
use std::mem;

// =#========================================================================#=
// NEWICK PARSER
// =#========================================================================$=
/// Parser (configuration) for Newick format phylogenetic trees.
///
/// Trees are built token by token with a cursor on the currently open
/// [Clade] and an explicit stack of its ancestors, so nesting depth is not
/// limited by the call stack.
///
/// # Configuration
/// * [`with_values_as_confidence()`](Self::with_values_as_confidence)
///     - Values after `:` are confidences, not branch lengths.
/// * [`with_comments_as_confidence()`](Self::with_comments_as_confidence)
///     - Comments `[...]` hold confidences.
/// * [`with_rooted(rooted)`](Self::with_rooted)
///     - Rootedness given to every parsed tree.
///
/// Unless one of the first two is set, a numeric label of an internal clade
/// (e.g. the `95` in `(A,B)95;`) is taken as its confidence and the name is
/// cleared. Labels of leaves always stay names.
///
/// # Parsing
/// * [`parse_str`](Self::parse_str) - Parse a single tree
/// * [`parse_all`](Self::parse_all) - Parse all trees eagerly
/// * [`into_iter`](Self::into_iter) - Parse trees lazily
///
/// # Example
/// ```
/// use newick_io::model::Confidence;
/// use newick_io::newick::NewickParser;
///
/// let parser = NewickParser::new().with_rooted(true);
/// let tree = parser.parse_str("((A:0.1,B:0.2)95:0.3,C:0.4);").unwrap();
///
/// let cherry = &tree.root().children()[0];
/// assert_eq!(cherry.name(), None);
/// assert_eq!(cherry.confidence(), Some(Confidence::Int(95)));
/// assert!(tree.is_rooted());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct NewickParser {
    values_are_confidence: bool,
    comments_are_confidence: bool,
    rooted: bool,
}

// ============================================================================
// Construction & Configuration (pub)
// ============================================================================
impl NewickParser {
    /// Creates a new [NewickParser] with default settings:
    /// - values after `:` are branch lengths
    /// - comments are kept as comments
    /// - trees are unrooted
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the parser to read values after `:` as confidences.
    pub fn with_values_as_confidence(mut self) -> Self {
        self.values_are_confidence = true;
        self
    }

    /// Configures the parser to read comments as confidences.
    ///
    /// The comment is kept as well; if it is not a number the confidence is
    /// cleared.
    pub fn with_comments_as_confidence(mut self) -> Self {
        self.comments_are_confidence = true;
        self
    }

    /// Sets whether parsed trees are rooted.
    pub fn with_rooted(mut self, rooted: bool) -> Self {
        self.rooted = rooted;
        self
    }
}

// ============================================================================
// API Parsing (pub)
// ============================================================================
impl NewickParser {
    /// Consumes the parser and returns an iterator over trees from the text source.
    ///
    /// The parser can be retrieved again via [NewickIterator::into_parser].
    ///
    /// # Arguments
    /// * `source` - Source of one or more `;`-terminated Newick strings;
    ///   the last one may lack its `;`.
    ///
    /// # Returns
    /// A [NewickIterator] allowing lazy parsing of trees.
    pub fn into_iter<S: TextSource>(self, source: S) -> NewickIterator<S> {
        tracing::trace!(parser = ?self, "Starting lazy Newick parsing");
        NewickIterator {
            parser: self,
            source,
            buffer: String::new(),
            line: String::new(),
            scanner: StatementScanner::new(),
            done: false,
            index: 0,
        }
    }

    /// Parses all Newick trees from the text source until EOF.
    ///
    /// # Returns
    /// * `Ok(Vec<Tree>)` - All parsed trees
    /// * `Err(ParsingError)` - If reading fails or any tree fails to parse
    pub fn parse_all<S: TextSource>(&self, source: S) -> Result<Vec<Tree>, ParsingError> {
        self.into_iter(source).collect()
    }

    /// Parses a single Newick statement.
    ///
    /// The terminating `;` is optional. After it, only newlines (and other
    /// whitespace) may follow.
    ///
    /// # Returns
    /// * `Ok(Tree)` - The parsed phylogenetic tree
    /// * `Err(ParsingError)` - If the Newick string is invalid
    ///
    /// # Example
    /// ```
    /// use newick_io::newick::NewickParser;
    ///
    /// let tree = NewickParser::new().parse_str("A,B;").unwrap();
    /// assert_eq!(tree.root().children().len(), 2);
    /// assert!(NewickParser::new().parse_str("(A,B);C").is_err());
    /// ```
    pub fn parse_str(&self, text: &str) -> Result<Tree, ParsingError> {
        let mut tokens = Tokenizer::new(text);
        let mut stack: Vec<Clade> = Vec::new();
        let mut current = Clade::new();
        let mut num_open = 0usize;
        let mut num_close = 0usize;

        for token in tokens.by_ref() {
            let token = token?;
            match token.kind() {
                TokenKind::QuotedLabel => current.set_name(Some(unescape_label(token.inner()))),
                TokenKind::Comment => {
                    let comment = unescape_comment(token.inner());
                    if self.comments_are_confidence {
                        current.set_confidence(Confidence::parse(&comment));
                    }
                    current.set_comment(Some(comment));
                }
                TokenKind::OpenParen => {
                    num_open += 1;
                    stack.push(mem::take(&mut current));
                }
                TokenKind::Comma => {
                    let finished = self.finish_clade(mem::take(&mut current));
                    match stack.last_mut() {
                        Some(parent) => parent.push_child(finished),
                        // Top level without enclosing parentheses
                        None => stack.push(Clade::new().with_children(vec![finished])),
                    }
                }
                TokenKind::CloseParen => {
                    num_close += 1;
                    let finished = self.finish_clade(mem::take(&mut current));
                    let Some(mut parent) = stack.pop() else {
                        return Err(ParsingError::parenthesis_mismatch(
                            text,
                            token.position(),
                            "')' without matching '('".to_string(),
                        ));
                    };
                    parent.push_child(finished);
                    current = parent;
                }
                TokenKind::Semicolon => break,
                TokenKind::EdgeLength => {
                    let number = token.lexeme()[1..].trim_start_matches(' ');
                    let value: f64 = number.parse().map_err(|_| {
                        ParsingError::invalid_number(text, token.position(), number.to_string())
                    })?;
                    if self.values_are_confidence {
                        current.set_confidence(Some(Confidence::Float(value)));
                    } else {
                        current.set_branch_length(Some(value));
                    }
                }
                TokenKind::UnquotedLabel => current.set_name(Some(token.lexeme().to_string())),
                TokenKind::Newline => {}
            }
        }

        if num_open != num_close {
            return Err(ParsingError::parenthesis_mismatch(
                text,
                tokens.position(),
                format!("{num_open} '(' but {num_close} ')'"),
            ));
        }

        // Only newlines may follow the semicolon
        for token in tokens.by_ref() {
            let token = token?;
            if token.kind() != TokenKind::Newline {
                return Err(ParsingError::trailing_text(
                    text,
                    token.position(),
                    token.lexeme().to_string(),
                ));
            }
        }

        let current = self.finish_clade(current);
        let root = match stack.pop() {
            Some(mut parent) => {
                parent.push_child(current);
                self.finish_clade(parent)
            }
            None => current,
        };
        if !stack.is_empty() {
            return Err(ParsingError::parenthesis_mismatch(
                text,
                tokens.position(),
                "unclosed '('".to_string(),
            ));
        }

        Ok(Tree::new(root).with_rooted(self.rooted))
    }
}

// ============================================================================
// Helpers (private)
// ============================================================================
impl NewickParser {
    /// Final processing of a clade once its subtree is complete.
    ///
    /// A numeric name of an internal clade without confidence becomes its
    /// confidence, unless values or comments are configured to hold them.
    fn finish_clade(&self, mut clade: Clade) -> Clade {
        if self.values_are_confidence
            || self.comments_are_confidence
            || clade.confidence().is_some()
            || clade.is_leaf()
        {
            return clade;
        }

        if let Some(confidence) = clade
            .name()
            .filter(|name| !name.is_empty())
            .and_then(Confidence::parse)
        {
            clade.set_confidence(Some(confidence));
            clade.set_name(None);
        }

        clade
    }
}

// =#========================================================================#=
// NEWICK ITERATOR
// =#========================================================================$=
/// Iterator over trees of a [TextSource], parsing lazily.
///
/// Lines are collected until a `;` outside of quoted labels and comments
/// ends a statement, which is then parsed. Only the current statement is
/// held in memory. A non-empty remainder without `;` at the end of the input
/// is parsed as a last tree.
///
/// After an error the iterator yields that error and then ends.
///
/// # Example
/// ```
/// use newick_io::newick::NewickParser;
/// use newick_io::parser::InMemoryTextSource;
///
/// let source = InMemoryTextSource::from_string("(A,B);(C,D);\n((E,F),\n G)");
/// let trees: Vec<_> = NewickParser::new()
///     .into_iter(source)
///     .collect::<Result<_, _>>()
///     .unwrap();
///
/// assert_eq!(trees.len(), 3);
/// assert_eq!(trees[2].num_leaves(), 3);
/// ```
pub struct NewickIterator<S: TextSource> {
    parser: NewickParser,
    source: S,
    /// Text of the statement(s) read so far
    buffer: String,
    /// Reused line buffer
    line: String,
    scanner: StatementScanner,
    done: bool,
    /// Number of trees yielded so far
    index: usize,
}

impl<S: TextSource> NewickIterator<S> {
    /// Consumes the iterator and returns the underlying [NewickParser].
    pub fn into_parser(self) -> NewickParser {
        self.parser
    }

    /// Parses one statement, ending iteration on failure.
    fn parse_statement(&mut self, statement: &str) -> Result<Tree, ParsingError> {
        tracing::trace!(index = self.index, len = statement.len(), "Parsing Newick statement");
        match self.parser.parse_str(statement) {
            Ok(tree) => {
                tracing::debug!(
                    index = self.index,
                    clades = tree.num_clades(),
                    "Parsed Newick tree"
                );
                self.index += 1;
                Ok(tree)
            }
            Err(err) => {
                self.done = true;
                Err(err)
            }
        }
    }
}

impl<S: TextSource> Iterator for NewickIterator<S> {
    type Item = Result<Tree, ParsingError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        loop {
            if let Some(end) = self.scanner.find_end(&self.buffer) {
                let statement: String = self.buffer.drain(..end).collect();
                self.scanner.reset();
                return Some(self.parse_statement(&statement));
            }

            self.line.clear();
            match self.source.read_line(&mut self.line) {
                Ok(true) => self.buffer.push_str(self.line.trim_end()),
                Ok(false) => {
                    self.done = true;
                    if self.buffer.trim().is_empty() {
                        return None;
                    }
                    // Last tree is missing its terminating ';'
                    let statement = mem::take(&mut self.buffer);
                    return Some(self.parse_statement(&statement));
                }
                Err(err) => {
                    self.done = true;
                    return Some(Err(err));
                }
            }
        }
    }
}
