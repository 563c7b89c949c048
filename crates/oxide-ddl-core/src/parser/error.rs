//! Parser error types.

use crate::lexer::{Location, Span, Token, TokenKind};

/// A parse error.
///
/// Carries both the byte span and the line/column of the offending token,
/// what the parser was looking for, and the two tokens it was looking at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// The error message.
    pub message: String,
    /// The location of the error.
    pub span: Span,
    /// Line and column of `span.start`.
    pub location: Location,
    /// Expected tokens (if applicable).
    pub expected: Option<String>,
    /// The token the parser stopped at.
    pub found: Option<Token>,
    /// The token after `found`.
    pub peek: Option<Token>,
}

impl ParseError {
    /// Creates a new parse error.
    #[must_use]
    pub fn new(message: impl Into<String>, span: Span, location: Location) -> Self {
        Self {
            message: message.into(),
            span,
            location,
            expected: None,
            found: None,
            peek: None,
        }
    }

    /// Creates an "unexpected token" error.
    #[must_use]
    pub fn unexpected(
        expected: impl Into<String>,
        found: Token,
        peek: Token,
        location: Location,
    ) -> Self {
        if found.kind == TokenKind::Eof {
            return Self::unexpected_eof(expected, found.span, location);
        }
        let expected: String = expected.into();
        Self {
            message: format!("unexpected {found}: expected {expected}"),
            span: found.span,
            location,
            expected: Some(expected),
            found: Some(found),
            peek: Some(peek),
        }
    }

    /// Creates an "unexpected end of input" error.
    #[must_use]
    pub fn unexpected_eof(expected: impl Into<String>, span: Span, location: Location) -> Self {
        let expected: String = expected.into();
        Self {
            message: format!("unexpected end of input: expected {expected}"),
            span,
            location,
            expected: Some(expected),
            found: Some(Token::new(TokenKind::Eof, span, "")),
            peek: None,
        }
    }
}

impl core::fmt::Display for ParseError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} at {}", self.message, self.location)
    }
}

impl std::error::Error for ParseError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Keyword;

    #[test]
    fn test_unexpected_message() {
        let found = Token::new(TokenKind::Keyword(Keyword::Table), Span::new(7, 12), "TABLE");
        let peek = Token::new(TokenKind::Eof, Span::new(12, 12), "");
        let err = ParseError::unexpected("identifier", found, peek, Location { line: 1, column: 8 });
        assert_eq!(
            err.to_string(),
            "unexpected keyword TABLE 'TABLE': expected identifier at line 1, column 8"
        );
        assert_eq!(err.expected.as_deref(), Some("identifier"));
    }

    #[test]
    fn test_unexpected_eof_message() {
        let eof = Token::new(TokenKind::Eof, Span::new(3, 3), "");
        let err = ParseError::unexpected("(", eof.clone(), eof, Location { line: 2, column: 1 });
        assert_eq!(
            err.to_string(),
            "unexpected end of input: expected ( at line 2, column 1"
        );
        assert!(err.peek.is_none());
    }
}
