//! Error type of Newick parsing.

use std::error::Error;
use std::fmt;
use std::io;

/// Default length of context provided by error from parser
const DEFAULT_CONTEXT_LENGTH: usize = 50;

// =#========================================================================#=
// PARSING ERROR TYPE
// =#========================================================================$=
/// Error types that can occur during Newick parsing
#[derive(PartialEq, Debug, Clone)]
pub enum ParsingErrorType {
    /// Text at the position matches no token
    LexicalError,
    /// `)` without open `(`, or unequal number of `(` and `)`
    ParenthesisMismatch(String),
    /// Tokens found after the terminating `;`
    TrailingText(String),
    /// Branch length (or weight) that is not a number
    InvalidNumber(String),
    /// Input is not text (e.g. binary data)
    InvalidStreamMode,
    /// Reading from the underlying source failed
    Io(String),
}

// =#========================================================================#=
// PARSING ERROR
// =#========================================================================$=
/// Parsing error with contextual information (position and following text)
#[derive(Debug)]
pub struct ParsingError {
    kind: ParsingErrorType,
    position: usize,
    context: String,
}

impl ParsingError {
    /// Create a ParsingError without position and context
    pub fn new(kind: ParsingErrorType) -> Self {
        Self {
            kind,
            position: 0,
            context: String::new(),
        }
    }

    /// Create a ParsingError from an error type and the text being parsed,
    /// taking the text following `position` as context
    pub fn from_text(kind: ParsingErrorType, text: &str, position: usize) -> Self {
        let context = text
            .get(position..)
            .map(|rest| rest.chars().take(DEFAULT_CONTEXT_LENGTH).collect())
            .unwrap_or_default();

        Self {
            kind,
            position,
            context,
        }
    }

    /// Convenience constructor for LexicalError
    pub fn lexical_error(text: &str, position: usize) -> Self {
        Self::from_text(ParsingErrorType::LexicalError, text, position)
    }

    /// Convenience constructor for ParenthesisMismatch
    pub fn parenthesis_mismatch(text: &str, position: usize, msg: String) -> Self {
        Self::from_text(ParsingErrorType::ParenthesisMismatch(msg), text, position)
    }

    /// Convenience constructor for TrailingText
    pub fn trailing_text(text: &str, position: usize, token: String) -> Self {
        Self::from_text(ParsingErrorType::TrailingText(token), text, position)
    }

    /// Convenience constructor for InvalidNumber
    pub fn invalid_number(text: &str, position: usize, number: String) -> Self {
        Self::from_text(ParsingErrorType::InvalidNumber(number), text, position)
    }

    /// Convenience constructor for InvalidStreamMode
    pub fn invalid_stream_mode() -> Self {
        Self::new(ParsingErrorType::InvalidStreamMode)
    }

    /// Get the error kind
    pub fn kind(&self) -> &ParsingErrorType {
        &self.kind
    }

    /// Get the position where the error occurred,
    /// as byte offset into the parsed statement
    pub fn position(&self) -> usize {
        self.position
    }
}

impl fmt::Display for ParsingError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        // Main error message
        match &self.kind {
            ParsingErrorType::LexicalError => write!(f, "Unrecognized token")?,
            ParsingErrorType::ParenthesisMismatch(msg) => {
                write!(f, "Parenthesis mismatch - {msg}")?
            }
            ParsingErrorType::TrailingText(token) => {
                write!(f, "Text after semicolon in Newick tree: {token}")?
            }
            ParsingErrorType::InvalidNumber(number) => write!(f, "Invalid number: {number}")?,
            ParsingErrorType::InvalidStreamMode => {
                write!(f, "Newick input must be text, not binary data")?
            }
            ParsingErrorType::Io(msg) => write!(f, "Could not read input - {msg}")?,
        }

        // Additional position information
        write!(f, " at position {}", self.position)?;

        // Additional context if available
        if !self.context.is_empty() {
            write!(
                f,
                "\n  Context (next {} chars): {}",
                self.context.chars().count(),
                self.context
            )?;
        }

        Ok(())
    }
}

impl Error for ParsingError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        None
    }
}

impl From<io::Error> for ParsingError {
    fn from(err: io::Error) -> Self {
        match err.kind() {
            // Raised by line reading on non-UTF-8 input
            io::ErrorKind::InvalidData => Self::invalid_stream_mode(),
            _ => Self::new(ParsingErrorType::Io(err.to_string())),
        }
    }
}
