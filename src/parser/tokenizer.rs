//! Tokenizer for Newick strings.
//!
//! Splits text into a flat sequence of [Token]s according to an ordered table
//! of patterns (first match wins at each position). Whitespace other than
//! newlines is skipped between tokens; any other character that starts no
//! token is a lexical error.
//!
//! Also provides [StatementScanner] to find the `;` ending a statement in a
//! growing buffer, without being fooled by `;` inside quotes or comments.

use crate::parser::parsing_error::ParsingError;
use once_cell::sync::Lazy;
use regex::Regex;

// =#========================================================================#=
// TOKEN KIND
// =#========================================================================$=
/// Lexical categories of the Newick grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// `(`
    OpenParen,
    /// `)`
    CloseParen,
    /// Run of characters other than whitespace and `()[]':;,`
    UnquotedLabel,
    /// `:` with optional space and a signed decimal or exponential number
    EdgeLength,
    /// `,`
    Comma,
    /// `[...]` with `\`-escapes
    Comment,
    /// `'...'` with `\`-escapes
    QuotedLabel,
    /// `;`
    Semicolon,
    /// `\n`
    Newline,
}

/// Token patterns in matching priority order.
const TOKEN_PATTERNS: &[(TokenKind, &str)] = &[
    (TokenKind::OpenParen, r"\("),
    (TokenKind::CloseParen, r"\)"),
    (TokenKind::UnquotedLabel, r"[^\s()\[\]':;,]+"),
    (
        TokenKind::EdgeLength,
        r":\x20?[+-]?[0-9]*\.?[0-9]+(?:[eE][+-]?[0-9]+)?",
    ),
    (TokenKind::Comma, r","),
    (TokenKind::Comment, r"\[(?:\\.|[^\]])*\]"),
    (TokenKind::QuotedLabel, r"'(?:\\.|[^'])*'"),
    (TokenKind::Semicolon, r";"),
    (TokenKind::Newline, r"\n"),
];

/// Compiled token patterns, anchored at the start of the haystack
static TOKEN_REGEXES: Lazy<Vec<(TokenKind, Regex)>> = Lazy::new(|| {
    TOKEN_PATTERNS
        .iter()
        .map(|(kind, pattern)| {
            let regex = Regex::new(&format!(r"\A(?:{pattern})")).expect("valid token pattern");
            (*kind, regex)
        })
        .collect()
});

/// Returns the anchored pattern of the given token kind.
pub(crate) fn token_regex(kind: TokenKind) -> &'static Regex {
    let index = TOKEN_PATTERNS
        .iter()
        .position(|(k, _)| *k == kind)
        .unwrap_or_default();
    &TOKEN_REGEXES[index].1
}

// =#========================================================================#=
// TOKEN
// =#========================================================================$=
/// A token: its kind, the matched text, and its byte position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    kind: TokenKind,
    lexeme: &'a str,
    position: usize,
}

impl<'a> Token<'a> {
    /// Returns the kind of this token.
    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    /// Returns the matched text.
    pub fn lexeme(&self) -> &'a str {
        self.lexeme
    }

    /// Returns the byte offset of this token in the tokenized text.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Returns the text between the delimiters of a quoted label or comment,
    /// still escaped; for other kinds the full lexeme.
    pub fn inner(&self) -> &'a str {
        match self.kind {
            TokenKind::QuotedLabel | TokenKind::Comment => {
                &self.lexeme[1..self.lexeme.len() - 1]
            }
            _ => self.lexeme,
        }
    }
}

// =#========================================================================#=
// TOKENIZER
// =#========================================================================$=
/// Lazy tokenizer over a Newick string.
///
/// Yields `Result<Token, ParsingError>`; after the first error it yields nothing.
///
/// # Example
/// ```
/// use newick_io::parser::tokenizer::{TokenKind, Tokenizer};
///
/// let kinds: Vec<TokenKind> = Tokenizer::new("(A:0.1,B);")
///     .map(|t| t.unwrap().kind())
///     .collect();
///
/// assert_eq!(kinds, vec![
///     TokenKind::OpenParen,
///     TokenKind::UnquotedLabel,
///     TokenKind::EdgeLength,
///     TokenKind::Comma,
///     TokenKind::UnquotedLabel,
///     TokenKind::CloseParen,
///     TokenKind::Semicolon,
/// ]);
/// ```
pub struct Tokenizer<'a> {
    text: &'a str,
    pos: usize,
    failed: bool,
}

impl<'a> Tokenizer<'a> {
    /// Creates a tokenizer at the start of the given text.
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            pos: 0,
            failed: false,
        }
    }

    /// Returns the current byte offset.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Skips whitespace, except newlines which are tokens.
    fn skip_whitespace(&mut self) {
        let rest = &self.text[self.pos..];
        let trimmed = rest.trim_start_matches(|c: char| c.is_whitespace() && c != '\n');
        self.pos += rest.len() - trimmed.len();
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Result<Token<'a>, ParsingError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        self.skip_whitespace();
        if self.pos >= self.text.len() {
            return None;
        }

        let rest = &self.text[self.pos..];
        for (kind, regex) in TOKEN_REGEXES.iter() {
            if let Some(found) = regex.find(rest) {
                let token = Token {
                    kind: *kind,
                    lexeme: found.as_str(),
                    position: self.pos,
                };
                self.pos += found.end();
                return Some(Ok(token));
            }
        }

        self.failed = true;
        Some(Err(ParsingError::lexical_error(self.text, self.pos)))
    }
}

// =#========================================================================#=
// STATEMENT SCANNER
// =#========================================================================$=
/// Finds the end of a `;`-terminated statement in a buffer that grows
/// line by line.
///
/// Quoted labels and comments are skipped with the same patterns the
/// [Tokenizer] uses, so both agree on where they end and a `;` inside them
/// never ends a statement. The scanner remembers how far it got, so appended
/// text is scanned only once (except for a quote or comment still open).
///
/// # Example
/// ```
/// use newick_io::parser::tokenizer::StatementScanner;
///
/// let mut scanner = StatementScanner::new();
/// let mut buffer = String::from("('A;B',");
/// assert_eq!(scanner.find_end(&buffer), None);
///
/// buffer.push_str("C)[;];(D,E);");
/// assert_eq!(scanner.find_end(&buffer), Some(13));
/// ```
#[derive(Debug, Clone, Default)]
pub struct StatementScanner {
    scanned: usize,
}

impl StatementScanner {
    /// Creates a scanner at the start of a statement.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resets the scanner, e.g. after the found statement was removed
    /// from the buffer.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Scans `buffer` from where the previous call stopped.
    ///
    /// # Returns
    /// * `Some(end)` - byte offset just past the terminating `;`
    /// * `None` - if the statement is not terminated yet
    pub fn find_end(&mut self, buffer: &str) -> Option<usize> {
        let mut index = self.scanned.min(buffer.len());
        while let Some(offset) = buffer[index..].find([';', '\'', '[']) {
            let start = index + offset;
            let kind = match buffer.as_bytes()[start] {
                b';' => {
                    self.scanned = start + 1;
                    return Some(start + 1);
                }
                b'\'' => TokenKind::QuotedLabel,
                _ => TokenKind::Comment,
            };

            match token_regex(kind).find(&buffer[start..]) {
                Some(found) if !Self::may_extend(buffer, start + found.end()) => {
                    index = start + found.end();
                }
                // Not closed yet; retry from its start once more text arrives
                _ => {
                    self.scanned = start;
                    return None;
                }
            }
        }

        self.scanned = buffer.len();
        None
    }

    /// Whether a quote or comment closing at `end` could still grow with
    /// appended text, i.e. its closing delimiter is the last character of
    /// the buffer and follows a `\`.
    fn may_extend(buffer: &str, end: usize) -> bool {
        end == buffer.len() && buffer[..end - 1].ends_with('\\')
    }
}

// =#========================================================================#=
// TESTS
// =#========================================================================$=
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patterns_in_priority_order() {
        let kinds: Vec<TokenKind> = TOKEN_PATTERNS.iter().map(|(k, _)| *k).collect();
        assert_eq!(kinds[0], TokenKind::OpenParen);
        assert_eq!(kinds[2], TokenKind::UnquotedLabel);
        assert_eq!(kinds[3], TokenKind::EdgeLength);
        assert_eq!(kinds.len(), 9);
    }

    #[test]
    fn test_token_regex_lookup() {
        assert!(token_regex(TokenKind::Semicolon).is_match(";"));
        assert!(token_regex(TokenKind::EdgeLength).is_match(": -1.5e3"));
        assert!(!token_regex(TokenKind::EdgeLength).is_match(":x"));
    }

    #[test]
    fn test_scanner_escaped_quote_inside_label() {
        let mut scanner = StatementScanner::new();
        assert_eq!(scanner.find_end(r"('it\'s;',B);"), Some(13));
    }

    #[test]
    fn test_scanner_waits_on_trailing_escape() {
        let mut scanner = StatementScanner::new();
        let mut buffer = String::from(r"(A,'b\'");
        assert_eq!(scanner.find_end(&buffer), None);
        assert_eq!(scanner.scanned, 3);

        buffer.push_str("c;');");
        assert_eq!(scanner.find_end(&buffer), Some(buffer.len()));
    }

    #[test]
    fn test_scanner_resumes_after_reset() {
        let mut scanner = StatementScanner::new();
        let mut buffer = String::from("(A,B);(C");
        let end = scanner.find_end(&buffer).unwrap();
        buffer.drain(..end);
        scanner.reset();

        assert_eq!(scanner.find_end(&buffer), None);
        buffer.push_str(",D);");
        assert_eq!(scanner.find_end(&buffer), Some(6));
    }
}
