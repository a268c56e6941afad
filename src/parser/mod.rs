//! Low-level parsing infrastructure for Newick text.
//!
//! This module provides the building blocks used by [crate::newick]:
//! tokenizing, label and comment escaping, text sources that read input
//! line by line, and error handling.

pub mod buffered_text_source;
pub mod in_memory_text_source;
pub mod parsing_error;
pub mod text_source;
pub mod tokenizer;
pub mod utils;

pub use buffered_text_source::BufferedTextSource;
pub use in_memory_text_source::InMemoryTextSource;
pub use parsing_error::ParsingError;
pub use text_source::TextSource;
