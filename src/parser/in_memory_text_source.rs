//! In-memory implementation of text source for the parser.

use crate::parser::parsing_error::ParsingError;
use crate::parser::text_source::{TextSource, check_text};
use std::fs::File;
use std::io::Read;
use std::path::Path;

// =#========================================================================#=
// IN MEMORY TEXT SOURCE
// =#========================================================================$=
/// An in-memory text source that owns its data.
///
/// This is the most efficient text source for input
/// that fits entirely in memory.
///
/// # Example
/// ```
/// use newick_io::parser::{InMemoryTextSource, TextSource};
///
/// let mut source = InMemoryTextSource::from_string("(A,B);\n(C,D);");
/// let mut line = String::new();
///
/// assert!(source.read_line(&mut line).unwrap());
/// assert_eq!(line, "(A,B);\n");
/// ```
pub struct InMemoryTextSource {
    /// The owned text being parsed
    input: String,
    /// Current byte position in the text
    pos: usize,
}

impl InMemoryTextSource {
    /// Creates a new in-memory text source from a string.
    pub fn from_string<S: Into<String>>(text: S) -> Self {
        Self {
            input: text.into(),
            pos: 0,
        }
    }

    /// Creates a new in-memory text source from raw bytes.
    ///
    /// # Errors
    /// Returns `InvalidStreamMode` if the bytes are not text.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, ParsingError> {
        check_text(&bytes)?;
        let text = String::from_utf8(bytes).map_err(|_| ParsingError::invalid_stream_mode())?;
        Ok(Self::from_string(text))
    }

    /// Reads a whole file into memory.
    ///
    /// # Arguments
    /// * `path` - Path to the file (accepting `&str`, `String`, `Path`, or `PathBuf`)
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or is not text.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ParsingError> {
        let mut contents = Vec::new();
        let mut file = File::open(path)?;
        file.read_to_end(&mut contents)?;
        Self::from_bytes(contents)
    }
}

impl TextSource for InMemoryTextSource {
    fn read_line(&mut self, buf: &mut String) -> Result<bool, ParsingError> {
        let rest = &self.input[self.pos..];
        if rest.is_empty() {
            return Ok(false);
        }

        let end = rest.find('\n').map_or(rest.len(), |i| i + 1);
        buf.push_str(&rest[..end]);
        self.pos += end;
        Ok(true)
    }
}
