//! Newick-io is a library to read and write phylogenetic trees in the
//! Newick format.
//!
//! This crate offers a configurable parser and writer for Newick strings.
//! Core functionality provided:
//! - Parser: Reads one or many `;`-terminated Newick strings from a string,
//!   reader, or file, eagerly or lazily (one tree in memory at a time).
//! - Support values: Numeric labels of internal clades (`(A,B)95;`) are read
//!   as confidences; alternatively values after `:` or comments can be
//!   declared to hold confidences.
//! - Writer: Renders trees with branch lengths and confidences, branch
//!   lengths only, confidences as branch lengths, or plain topology;
//!   optionally with a `tree <name> = [&W..] [&R]` directive and ladderized.
//! - Tree model: [Tree] and [Clade](model::Clade) with owned children,
//!   see [crate::model].
//! - No recursion: Parsing, writing, traversal, comparison, and dropping of
//!   trees all use explicit stacks, so trees may be arbitrarily deep.
//!
//! Limitations:
//! - Tree directives are written but not read
//! - No validation of confidence ranges
//!
//! # Usage patterns
//! 1. Several functions provide quick access with default settings.
//!    See [crate::newick] documentation.
//! 2. Configure a [NewickParser](crate::newick::NewickParser) or
//!    [NewickWriter](crate::newick::NewickWriter) for full control.
//!
//! ## Example Default Configuration
//!
//! Parse a single Newick string:
//! ```
//! use newick_io::parse_newick_str;
//!
//! let tree = parse_newick_str("((A:0.1,B:0.2):0.3,C:0.4);").unwrap();
//! assert_eq!(tree.num_leaves(), 3);
//! ```
//!
//! Parse a Newick file:
//! ```no_run
//! use newick_io::parse_newick_file;
//!
//! let trees = parse_newick_file("phylo.nwk").unwrap();
//! println!("Loaded {} trees", trees.len());
//! ```
//!
//! ## Example Configuration
//!
//! ```
//! use newick_io::newick::{NewickParser, NewickWriter};
//! use newick_io::parser::InMemoryTextSource;
//!
//! let source = InMemoryTextSource::from_string("(A:0.5,B:0.5):0.9;\n(C:1,D:1):0.8;");
//! let mut trees = NewickParser::new()
//!     .with_values_as_confidence()
//!     .parse_all(source)?;
//!
//! let writer = NewickWriter::from_flags(true, false, false);
//! let lines: Vec<String> = writer.to_strings(&mut trees).collect();
//! assert_eq!(lines[0], "(A:1.00,B:1.00):0.90;");
//! # Ok::<(), newick_io::parser::ParsingError>(())
//! ```

pub mod model;
pub mod newick;
pub mod parser;

pub use model::Tree;
pub use newick::write_newick_file;
pub use parser::ParsingError;

use std::path::Path;

/// Parses a single Newick string with default settings.
///
/// See [newick::parse_str].
pub fn parse_newick_str<S: AsRef<str>>(newick: S) -> Result<Tree, ParsingError> {
    newick::parse_str(newick)
}

/// Parses all trees of a Newick file with default settings.
///
/// See [newick::parse_file].
pub fn parse_newick_file<P: AsRef<Path>>(path: P) -> Result<Vec<Tree>, ParsingError> {
    newick::parse_file(path)
}
