//! Utility functions for label and comment escaping in Newick strings.
//!
//! Writing and reading must agree on these rules:
//! - A label is written verbatim if it is a valid unquoted label
//!   (see [is_unquoted_label]), otherwise it is wrapped in single quotes
//!   with `\` and `'` escaped by a backslash.
//! - A comment is wrapped in square brackets with `\`, `[` and `]` escaped
//!   by a backslash.

use crate::parser::tokenizer::{TokenKind, token_regex};

/// Checks if a label can be written without quotes, i.e. the whole label
/// is a single unquoted-label token.
///
/// # Examples
/// ```
/// # use newick_io::parser::utils::is_unquoted_label;
/// assert_eq!(is_unquoted_label("Pukeko"), true);
/// assert_eq!(is_unquoted_label("Porphyrio_melanotus"), true);
/// assert_eq!(is_unquoted_label("Pu[ke]ko"), false);
/// assert_eq!(is_unquoted_label("Australasian Swamphen"), false);
/// assert_eq!(is_unquoted_label(""), false);
/// ```
pub fn is_unquoted_label(label: &str) -> bool {
    token_regex(TokenKind::UnquotedLabel)
        .find(label)
        .is_some_and(|found| found.end() == label.len())
}

/// Escapes a label for writing.
///
/// Valid unquoted labels are returned as they are. Others are wrapped in
/// single quotes, after escaping every `\` and every `'` with a backslash.
///
/// # Examples
/// ```
/// # use newick_io::parser::utils::escape_label;
/// assert_eq!(escape_label("Pukeko"), "Pukeko");
/// assert_eq!(escape_label("Pu[ke]ko"), "'Pu[ke]ko'");
/// assert_eq!(escape_label("Australasian Swamphen"), "'Australasian Swamphen'");
/// assert_eq!(escape_label("Baillon's Crake"), r"'Baillon\'s Crake'");
/// assert_eq!(escape_label(r"back\slash:"), r"'back\\slash:'");
/// ```
pub fn escape_label(label: &str) -> String {
    if is_unquoted_label(label) {
        return label.to_string();
    }

    let mut escaped = String::with_capacity(label.len() + 4);
    escaped.push('\'');
    for c in label.chars() {
        if c == '\\' || c == '\'' {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('\'');

    escaped
}

/// Unescapes the content of a quoted label (without the surrounding quotes).
///
/// `\\` becomes `\` and `\'` becomes `'`; any other backslash pair is kept.
///
/// # Examples
/// ```
/// # use newick_io::parser::utils::unescape_label;
/// assert_eq!(unescape_label("Pukeko"), "Pukeko");
/// assert_eq!(unescape_label(r"Baillon\'s Crake"), "Baillon's Crake");
/// assert_eq!(unescape_label(r"back\\slash"), r"back\slash");
/// assert_eq!(unescape_label(r"keep\n"), r"keep\n");
/// ```
pub fn unescape_label(inner: &str) -> String {
    unescape_backslashes(inner, &['\\', '\''])
}

/// Escapes a comment for writing, including the surrounding brackets.
///
/// # Examples
/// ```
/// # use newick_io::parser::utils::escape_comment;
/// assert_eq!(escape_comment("note"), "[note]");
/// assert_eq!(escape_comment("a[1]"), r"[a\[1\]]");
/// ```
pub fn escape_comment(comment: &str) -> String {
    let mut escaped = String::with_capacity(comment.len() + 4);
    escaped.push('[');
    for c in comment.chars() {
        if matches!(c, '\\' | '[' | ']') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push(']');

    escaped
}

/// Unescapes the content of a comment (without the surrounding brackets).
///
/// `\[`, `\]` and `\\` lose their backslash; any other backslash pair is kept.
///
/// # Examples
/// ```
/// # use newick_io::parser::utils::unescape_comment;
/// assert_eq!(unescape_comment(r"a\[1\]"), "a[1]");
/// assert_eq!(unescape_comment(r"&height=1\n"), r"&height=1\n");
/// ```
pub fn unescape_comment(inner: &str) -> String {
    unescape_backslashes(inner, &['\\', '[', ']'])
}

/// Removes the backslash in front of each of the given characters.
fn unescape_backslashes(text: &str, escapable: &[char]) -> String {
    let mut unescaped = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(&next) = chars.peek() {
                if escapable.contains(&next) {
                    unescaped.push(next);
                    chars.next();
                    continue;
                }
            }
        }
        unescaped.push(c);
    }

    unescaped
}
