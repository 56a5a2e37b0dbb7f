//! Derived document metrics shown in the toolbar.
//!
//! The toolbar never owns the document; it recomputes these counts from the
//! raw text on every change.

/// Word, character and line counts for a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Metrics {
    /// Whitespace-delimited non-empty tokens.
    pub words: usize,
    /// Raw text length in UTF-16 code units.
    pub chars: usize,
    /// Newline-delimited segments; empty text still counts as one line.
    pub lines: usize,
}

impl Metrics {
    /// Compute all metrics for the given text.
    pub fn of(text: &str) -> Self {
        Self {
            words: count_words(text),
            chars: count_chars(text),
            lines: count_lines(text),
        }
    }
}

/// Number of whitespace-delimited non-empty tokens.
///
/// Blank or whitespace-only text yields 0.
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Raw text length in UTF-16 code units.
///
/// Matches what a web editor reports for the same document: characters
/// outside the Basic Multilingual Plane count as two.
pub fn count_chars(text: &str) -> usize {
    text.encode_utf16().count()
}

/// Number of `\n`-delimited segments.
///
/// Matches split-by-newline semantics: the empty string is one line, and a
/// trailing newline opens a final empty line.
pub fn count_lines(text: &str) -> usize {
    text.split('\n').count()
}
