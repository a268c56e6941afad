//! Newick format parser and writer for phylogenetic trees.
//!
//! This module provides [`NewickParser`] to parse Newick strings into
//! [`Tree`]s and [`NewickWriter`] to turn them back into text.
//!
//! # Quick API
//! For simple use cases with default settings:
//! * [`parse_file`] - parses all trees of a file
//! * [`parse_reader`] - parses all trees of a reader
//! * [`parse_str`] - parses a single string
//! * [`to_newick`] - writes a single tree to a string
//! * [`write`] / [`write_newick_file`] - writes trees, one per line
//!
//! # Full API
//! For more control, configure a [`NewickParser`] and provide a
//! [`TextSource`](crate::parser::TextSource):
//! * [`NewickParser::parse_str`] - parse a single tree
//! * [`NewickParser::parse_all`] - parse all trees until EOF
//! * [`NewickParser::into_iter`] - obtain an iterator over trees
//!
//! and configure a [`NewickWriter`] for the [`InfoMode`], [`NumberFormat`]s,
//! tree directive and ladderizing.
//!
//! # Format
//! The Newick format has the following grammar:
//! * `tree ::= [clade] ';'`
//! * `clade ::= ['(' clade {',' clade} ')'] [label] [':' number]`
//! * `label ::= unquoted_label | quoted_label`
//!
//! Furthermore:
//! * Whitespace can occur between elements,
//!   just not within an unquoted label or a number
//! * An unquoted label is any run of characters except whitespace and `()[]':;,`
//! * A quoted label is enclosed in `'`, with `\'` and `\\` as escapes
//! * Comments are in square brackets (with `\[`, `\]` and `\\` as escapes)
//!   and belong to the clade they follow
//! * The outermost parentheses may be missing, as in `A,B;`
//! * A label of an internal clade that is a number, as the `95` in `(A,B)95;`,
//!   is read as confidence

mod defs;
mod parser;
pub mod writer;

pub use self::parser::{NewickIterator, NewickParser};
pub use self::writer::{
    InfoMode, NewickWriter, NumberFormat, TreeStrings, to_newick, write_newick_file,
};

use crate::model::Tree;
use crate::parser::{BufferedTextSource, ParsingError};
use std::borrow::BorrowMut;
use std::io::{self, BufRead};
use std::path::Path;

// ============================================================================
// QUICK PARSING API (pub)
// ============================================================================
/// Parses a Newick file and returns all trees.
///
/// This is a convenience function to parse a file containing
/// `;`-terminated Newick strings, using default settings and thus not
/// requiring configuration of a parser. The file is read line by line.
///
/// # Arguments
/// * `path` - Path to the file (accepting `&str`, `String`, `Path`, or `PathBuf`)
///
/// # Returns
/// * `Vec<Tree>` - All parsed trees
/// * [`ParsingError`] - If file reading fails, the file is not text,
///   or Newick format is invalid
///
/// # Format
/// Multiple trees can appear on the same line or across multiple lines.
/// The last tree may lack its `;`.
///
/// # Example
/// ```no_run
/// use newick_io::newick::parse_file;
///
/// let trees = parse_file("anseriformes.nwk")?;
/// println!("Parsed {} trees", trees.len());
/// # Ok::<(), newick_io::parser::ParsingError>(())
/// ```
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Vec<Tree>, ParsingError> {
    let source = BufferedTextSource::from_file(path)?;
    NewickParser::new().parse_all(source)
}

/// Parses all trees from a reader with default settings.
///
/// # Example
/// ```
/// use newick_io::newick::parse_reader;
///
/// let trees = parse_reader("(Kea,Kaka);\n(Kakapo,(Kea,Kaka));".as_bytes()).unwrap();
/// assert_eq!(trees.len(), 2);
/// ```
pub fn parse_reader<R: BufRead>(reader: R) -> Result<Vec<Tree>, ParsingError> {
    let source = BufferedTextSource::new(reader)?;
    NewickParser::new().parse_all(source)
}

/// Parses a single Newick string to obtain a [`Tree`].
///
/// This is a convenience function for quick parsing of a single Newick string
/// using default settings and thus not requiring configuration of a parser.
///
/// # Arguments
/// * `newick` - The Newick format string to parse
///
/// # Returns
/// * [`Tree`] - Tree parsed from the string
/// * [`ParsingError`] - If the string is not valid Newick format
///
/// # Example
/// ```
/// use newick_io::newick::parse_str;
///
/// let tree = parse_str("(Fratercula_cirrhata,(Fratercula_arctica,Fratercula_corniculata));")?;
/// assert_eq!(tree.num_leaves(), 3);
/// # Ok::<(), newick_io::parser::ParsingError>(())
/// ```
pub fn parse_str<S: AsRef<str>>(newick: S) -> Result<Tree, ParsingError> {
    NewickParser::new().parse_str(newick.as_ref())
}

// ============================================================================
// QUICK WRITING API (pub)
// ============================================================================
/// Writes trees with default settings, one per line, and returns the
/// number of trees written.
///
/// # Example
/// ```
/// use newick_io::newick::{parse_str, write};
///
/// let trees = vec![parse_str("(A,B);").unwrap(), parse_str("(C,D);").unwrap()];
/// let mut out = Vec::new();
///
/// assert_eq!(write(&mut out, trees).unwrap(), 2);
/// ```
pub fn write<W, I>(out: W, trees: I) -> io::Result<usize>
where
    W: io::Write,
    I: IntoIterator,
    I::Item: BorrowMut<Tree>,
{
    NewickWriter::new().write(out, trees)
}
