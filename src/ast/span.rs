//! Source locations: byte spans, spanned values and line/column positions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;

/// A byte range in the DOT source text.
pub type Span = Range<usize>;

/// A value paired with the source span it was read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spanned<T> {
    /// The wrapped value.
    pub node: T,
    /// Where the value appears in the source.
    pub span: Span,
}

impl<T> Spanned<T> {
    /// Creates a new spanned value.
    pub fn new(node: T, span: Span) -> Self {
        Self { node, span }
    }

    /// Maps the inner value while preserving the span.
    pub fn map<U, F>(self, f: F) -> Spanned<U>
    where
        F: FnOnce(T) -> U,
    {
        Spanned {
            node: f(self.node),
            span: self.span,
        }
    }

    /// Extracts the inner value, discarding the span.
    pub fn into_inner(self) -> T {
        self.node
    }
}

impl<T> AsRef<T> for Spanned<T> {
    fn as_ref(&self) -> &T {
        &self.node
    }
}

/// A 1-based line/column location, counted in characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// Computes the position of a byte offset within `source`.
    ///
    /// Offsets past the end clamp to the end of input; offsets inside a
    /// multi-byte character resolve to that character.
    pub fn of_offset(source: &str, offset: usize) -> Self {
        let mut line = 1;
        let mut column = 1;
        for (index, ch) in source.char_indices() {
            if index >= offset {
                break;
            }
            if ch == '\n' {
                line += 1;
                column = 1;
            } else {
                column += 1;
            }
        }
        Self { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spanned_map_keeps_span() {
        let spanned = Spanned::new(5, 10..15);
        let mapped = spanned.map(|x| x * 2);
        assert_eq!(mapped.node, 10);
        assert_eq!(mapped.span, 10..15);
    }

    #[test]
    fn spanned_into_inner() {
        let spanned = Spanned::new("node", 0..4);
        assert_eq!(*spanned.as_ref(), "node");
        assert_eq!(spanned.into_inner(), "node");
    }

    #[test]
    fn position_first_line() {
        assert_eq!(Position::of_offset("digraph G {}", 0), Position::new(1, 1));
        assert_eq!(Position::of_offset("digraph G {}", 8), Position::new(1, 9));
    }

    #[test]
    fn position_after_newlines() {
        let source = "graph {\n  a -- b\n}";
        assert_eq!(Position::of_offset(source, 10), Position::new(2, 3));
        assert_eq!(Position::of_offset(source, source.len()), Position::new(3, 2));
    }

    #[test]
    fn position_counts_characters_not_bytes() {
        let source = "\"é\" x";
        // 'x' sits at byte 5 but is the fifth character.
        assert_eq!(Position::of_offset(source, 5), Position::new(1, 5));
    }

    #[test]
    fn position_display() {
        assert_eq!(Position::new(3, 14).to_string(), "3:14");
    }
}
