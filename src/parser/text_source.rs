//! Text source abstractions for the Newick parser.
//!
//! This module provides the [TextSource] trait, which lets the parser read
//! Newick text line by line from different kinds of input.

use crate::parser::parsing_error::ParsingError;

// =#========================================================================#=
// TEXT SOURCE (Trait)
// =#========================================================================T=
/// Trait defining the interface for different text sources used by the
/// Newick stream parser.
///
/// This trait abstracts over different ways of accessing text:
/// - In-memory strings ([InMemoryTextSource](crate::parser::InMemoryTextSource))
/// - Buffered reading from files or other readers
///   ([BufferedTextSource](crate::parser::BufferedTextSource))
///
/// Sources reject binary input with
/// [InvalidStreamMode](crate::parser::parsing_error::ParsingErrorType::InvalidStreamMode).
pub trait TextSource {
    /// Appends the next line, including its `\n` if present, to `buf`.
    ///
    /// # Returns
    /// * `Ok(true)` - if a line was read
    /// * `Ok(false)` - at end of input
    /// * `Err(ParsingError)` - if reading failed or the input is not text
    fn read_line(&mut self, buf: &mut String) -> Result<bool, ParsingError>;
}

/// Checks that a chunk of input looks like text: no NUL bytes and valid
/// UTF-8, except for a multi-byte character cut off at the end of the chunk.
pub(crate) fn check_text(bytes: &[u8]) -> Result<(), ParsingError> {
    if bytes.contains(&0) {
        return Err(ParsingError::invalid_stream_mode());
    }
    match std::str::from_utf8(bytes) {
        Err(err) if err.error_len().is_some() => Err(ParsingError::invalid_stream_mode()),
        _ => Ok(()),
    }
}
