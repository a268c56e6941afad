//! Buffered reader implementation of text source for the parser.
//!
//! This module provides [BufferedTextSource], which reads lines from any
//! [BufRead], e.g. a file wrapped in a [BufReader]. Use this for large inputs
//! where loading everything into memory would be impractical.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::parser::parsing_error::ParsingError;
use crate::parser::text_source::{TextSource, check_text};

// =#========================================================================#=
// BUFFERED TEXT SOURCE
// =#========================================================================$=
/// A buffered text source for streaming large inputs.
///
/// On creation the first buffered chunk is checked, and binary input is
/// rejected right away. Later invalid UTF-8 surfaces when the affected line
/// is read.
pub struct BufferedTextSource<R: BufRead> {
    /// Underlying reader, handles getting chunks from the input
    reader: R,
}

impl<R: BufRead> BufferedTextSource<R> {
    /// Creates a new buffered text source from a reader.
    ///
    /// # Errors
    /// Returns `InvalidStreamMode` if the start of the input is not text,
    /// or `Io` if it cannot be read.
    pub fn new(mut reader: R) -> Result<Self, ParsingError> {
        let chunk = reader.fill_buf()?;
        check_text(chunk)?;
        tracing::trace!(bytes = chunk.len(), "Checked start of Newick input");
        Ok(Self { reader })
    }

    /// Consumes this source and returns the underlying reader.
    pub fn into_inner(self) -> R {
        self.reader
    }
}

impl BufferedTextSource<BufReader<File>> {
    /// Creates a new buffered text source from a file path.
    ///
    /// # Arguments
    /// * `path` - Path to the file (accepting `&str`, `String`, `Path`, or `PathBuf`)
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened or is not text.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ParsingError> {
        let file = File::open(path)?;
        Self::new(BufReader::new(file))
    }
}

impl<R: BufRead> TextSource for BufferedTextSource<R> {
    fn read_line(&mut self, buf: &mut String) -> Result<bool, ParsingError> {
        let start = buf.len();
        let read = self.reader.read_line(buf)?;
        if buf[start..].contains('\0') {
            return Err(ParsingError::invalid_stream_mode());
        }
        Ok(read > 0)
    }
}
