//! Source location tracking for tokens and parse errors.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A byte range in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Span {
    /// Start byte offset (inclusive).
    pub start: usize,
    /// End byte offset (exclusive).
    pub end: usize,
}

impl Span {
    /// Creates a new span.
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Returns the length of the span in bytes.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    /// Returns true if the span is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// A human-oriented position: 1-based line and column (in characters).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    /// Line number, starting at 1.
    pub line: usize,
    /// Column number, starting at 1.
    pub column: usize,
}

impl Location {
    /// Computes the location of `offset` within `input`.
    ///
    /// Offsets past the end of the input resolve to the position just after
    /// the last character.
    #[must_use]
    pub fn of(input: &str, offset: usize) -> Self {
        let mut line = 1;
        let mut column = 1;
        for (idx, c) in input.char_indices() {
            if idx >= offset {
                break;
            }
            if c == '\n' {
                line += 1;
                column = 1;
            } else {
                column += 1;
            }
        }
        Self { line, column }
    }
}

impl core::fmt::Display for Location {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_len() {
        let span = Span::new(5, 10);
        assert_eq!(span.len(), 5);
        assert!(!span.is_empty());
        assert!(Span::new(3, 3).is_empty());
    }

    #[test]
    fn test_location_first_line() {
        assert_eq!(Location::of("CREATE TABLE", 7), Location { line: 1, column: 8 });
    }

    #[test]
    fn test_location_after_newlines() {
        let input = "CREATE TABLE t (\n  id INT\n);";
        let offset = input.find("id").unwrap();
        assert_eq!(Location::of(input, offset), Location { line: 2, column: 3 });
    }

    #[test]
    fn test_location_past_end() {
        assert_eq!(Location::of("ab", 99), Location { line: 1, column: 3 });
    }
}
