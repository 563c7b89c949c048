//! DDL tokenizer implementation.

use super::{Location, Span, Token, TokenKind};
use crate::dialect::Dialect;

/// A lexer that tokenizes DDL input according to a dialect's lexical rules.
pub struct Lexer<'a> {
    /// The input source code.
    input: &'a str,
    /// Quote, comment and keyword rules.
    dialect: &'a dyn Dialect,
    /// The current byte position.
    pos: usize,
    /// The byte position of the start of the current token.
    start: usize,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer for the given input.
    #[must_use]
    pub const fn new(input: &'a str, dialect: &'a dyn Dialect) -> Self {
        Self {
            input,
            dialect,
            pos: 0,
            start: 0,
        }
    }

    /// Returns the source text being tokenized.
    #[must_use]
    pub const fn input(&self) -> &'a str {
        self.input
    }

    /// Returns the line and column of a byte offset in the input.
    #[must_use]
    pub fn location(&self, offset: usize) -> Location {
        Location::of(self.input, offset)
    }

    /// Returns the current character without advancing.
    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    /// Returns the next character without advancing.
    fn peek_next(&self) -> Option<char> {
        let mut chars = self.input[self.pos..].chars();
        chars.next();
        chars.next()
    }

    /// Advances to the next character and returns it.
    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    /// Consumes the current character if it equals `expected`.
    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn skip_line(&mut self) {
        while self.peek().is_some_and(|c| c != '\n') {
            self.advance();
        }
    }

    /// Skips whitespace and comments.
    fn skip_whitespace_and_comments(&mut self) {
        loop {
            while self.peek().is_some_and(char::is_whitespace) {
                self.advance();
            }

            if self.peek() == Some('-') && self.peek_next() == Some('-') {
                self.skip_line();
                continue;
            }

            if self.peek() == Some('#') && self.dialect.hash_comments() {
                self.skip_line();
                continue;
            }

            if self.peek() == Some('/') && self.peek_next() == Some('*') {
                self.advance(); // /
                self.advance(); // *
                loop {
                    match self.advance() {
                        Some('*') if self.peek() == Some('/') => {
                            self.advance();
                            break;
                        }
                        None => break,
                        _ => {}
                    }
                }
                continue;
            }

            break;
        }
    }

    /// Creates a span from start to current position.
    const fn make_span(&self) -> Span {
        Span::new(self.start, self.pos)
    }

    /// Creates a token covering the text from start to current position.
    fn make_token(&self, kind: TokenKind) -> Token {
        Token::new(kind, self.make_span(), &self.input[self.start..self.pos])
    }

    /// Scans an identifier or keyword.
    fn scan_word(&mut self) -> Token {
        while self
            .peek()
            .is_some_and(|c| c.is_alphanumeric() || c == '_' || c == '$')
        {
            self.advance();
        }

        let text = &self.input[self.start..self.pos];
        match self.dialect.keyword(text) {
            Some(keyword) => self.make_token(TokenKind::Keyword(keyword)),
            None => self.make_token(TokenKind::Identifier),
        }
    }

    /// Scans a quoted string or identifier. The opening quote has already
    /// been consumed. A doubled quote stands for itself.
    fn scan_quoted(&mut self, quote: char, kind: TokenKind) -> Token {
        let escapes = matches!(kind, TokenKind::String(_)) && self.dialect.backslash_escapes();
        loop {
            match self.advance() {
                Some(c) if c == quote => {
                    if self.peek() == Some(quote) {
                        self.advance();
                    } else {
                        return self.make_token(kind);
                    }
                }
                Some('\\') if escapes => {
                    self.advance();
                }
                Some(_) => {}
                None => return self.make_token(TokenKind::Illegal),
            }
        }
    }

    /// Scans a number (integer, decimal or exponent form).
    fn scan_number(&mut self) -> Token {
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }

        if self.peek() == Some('.') && self.peek_next().is_none_or(|c| !c.is_alphabetic()) {
            self.advance(); // consume .
            while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                self.advance();
            }
        }

        if self.peek().is_some_and(|c| c == 'e' || c == 'E')
            && self
                .peek_next()
                .is_some_and(|c| c.is_ascii_digit() || c == '+' || c == '-')
        {
            self.advance(); // consume e/E
            if self.peek().is_some_and(|c| c == '+' || c == '-') {
                self.advance();
            }
            while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                self.advance();
            }
        }

        self.make_token(TokenKind::Number)
    }

    /// Scans the next token.
    #[must_use]
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace_and_comments();
        self.start = self.pos;

        let Some(c) = self.advance() else {
            return self.make_token(TokenKind::Eof);
        };

        match c {
            // Single-character tokens
            '(' => self.make_token(TokenKind::LeftParen),
            ')' => self.make_token(TokenKind::RightParen),
            '[' => self.make_token(TokenKind::LeftBracket),
            ']' => self.make_token(TokenKind::RightBracket),
            ',' => self.make_token(TokenKind::Comma),
            ';' => self.make_token(TokenKind::Semicolon),
            '+' => self.make_token(TokenKind::Plus),
            '*' => self.make_token(TokenKind::Star),
            '/' => self.make_token(TokenKind::Slash),
            '%' => self.make_token(TokenKind::Percent),
            '^' => self.make_token(TokenKind::Caret),
            '~' => self.make_token(TokenKind::BitNot),
            '&' => self.make_token(TokenKind::BitAnd),
            '?' => self.make_token(TokenKind::Question),
            '@' => self.make_token(TokenKind::At),
            '=' => self.make_token(TokenKind::Eq),

            // Potentially multi-character tokens
            '-' => {
                if self.eat('>') {
                    if self.eat('>') {
                        self.make_token(TokenKind::LongArrow)
                    } else {
                        self.make_token(TokenKind::Arrow)
                    }
                } else {
                    self.make_token(TokenKind::Minus)
                }
            }
            '.' => {
                if self.peek().is_some_and(|c| c.is_ascii_digit()) {
                    self.scan_number()
                } else {
                    self.make_token(TokenKind::Dot)
                }
            }
            ':' => {
                if self.eat(':') {
                    if self.eat(':') {
                        self.make_token(TokenKind::TripleColon)
                    } else {
                        self.make_token(TokenKind::DoubleColon)
                    }
                } else {
                    self.make_token(TokenKind::Colon)
                }
            }
            '<' => {
                if self.eat('=') {
                    self.make_token(TokenKind::LtEq)
                } else if self.eat('>') {
                    self.make_token(TokenKind::NotEq)
                } else if self.eat('<') {
                    self.make_token(TokenKind::LeftShift)
                } else {
                    self.make_token(TokenKind::Lt)
                }
            }
            '>' => {
                if self.eat('=') {
                    self.make_token(TokenKind::GtEq)
                } else if self.eat('>') {
                    self.make_token(TokenKind::RightShift)
                } else {
                    self.make_token(TokenKind::Gt)
                }
            }
            '!' => {
                if self.eat('=') {
                    self.make_token(TokenKind::NotEq)
                } else {
                    self.make_token(TokenKind::Illegal)
                }
            }
            '|' => {
                if self.eat('|') {
                    self.make_token(TokenKind::Concat)
                } else {
                    self.make_token(TokenKind::BitOr)
                }
            }

            // Strings take precedence: MySQL's `"` opens a string, not a name.
            q if self.dialect.string_quotes().contains(&q) => {
                self.scan_quoted(q, TokenKind::String(q))
            }
            q if self.dialect.identifier_quotes().contains(&q) => {
                self.scan_quoted(q, TokenKind::QuotedIdentifier(q))
            }

            c if c.is_ascii_digit() => self.scan_number(),

            c if c.is_alphabetic() || c == '_' => self.scan_word(),

            _ => self.make_token(TokenKind::Illegal),
        }
    }

    /// Tokenizes the entire input and returns all tokens, ending with EOF.
    #[must_use]
    pub fn tokenize(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token();
            let is_eof = token.is_eof();
            tokens.push(token);
            if is_eof {
                break;
            }
        }
        tokens
    }
}

/// Strips the surrounding quotes from a quoted token's text and collapses
/// doubled quotes.
#[must_use]
pub fn unquote(literal: &str, quote: char) -> String {
    let inner = literal
        .strip_prefix(quote)
        .and_then(|rest| rest.strip_suffix(quote))
        .unwrap_or(literal);
    let mut doubled = String::with_capacity(2);
    doubled.push(quote);
    doubled.push(quote);
    inner.replace(&doubled, &quote.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::{GenericDialect, MySqlDialect, SpannerDialect};
    use crate::lexer::Keyword;

    fn tokenize_with(dialect: &dyn Dialect, input: &str) -> Vec<Token> {
        Lexer::new(input, dialect).tokenize()
    }

    fn token_kinds(input: &str) -> Vec<TokenKind> {
        tokenize_with(&GenericDialect::new(), input)
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    fn literals(dialect: &dyn Dialect, input: &str) -> Vec<String> {
        tokenize_with(dialect, input)
            .into_iter()
            .map(|t| t.literal)
            .collect()
    }

    #[test]
    fn test_empty_input() {
        let tokens = tokenize_with(&GenericDialect::new(), "");
        assert_eq!(tokens.len(), 1);
        assert!(tokens[0].is_eof());
    }

    #[test]
    fn test_comments_are_skipped() {
        let kinds = token_kinds("-- leading\nCREATE /* inline */ TABLE");
        assert_eq!(
            kinds,
            vec![
                TokenKind::Keyword(Keyword::Create),
                TokenKind::Keyword(Keyword::Table),
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn test_hash_comments_are_dialect_specific() {
        let mysql = tokenize_with(&MySqlDialect::new(), "# note\nid");
        assert_eq!(mysql[0].kind, TokenKind::Identifier);
        assert_eq!(mysql[0].literal, "id");

        let generic = tokenize_with(&GenericDialect::new(), "# note");
        assert_eq!(generic[0].kind, TokenKind::Illegal);
    }

    #[test]
    fn test_keywords_case_insensitive() {
        let kinds = token_kinds("create Table INDEX");
        assert_eq!(
            kinds,
            vec![
                TokenKind::Keyword(Keyword::Create),
                TokenKind::Keyword(Keyword::Table),
                TokenKind::Keyword(Keyword::Index),
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn test_dialect_keywords() {
        let generic = tokenize_with(&GenericDialect::new(), "auto_increment interleave");
        assert_eq!(generic[0].kind, TokenKind::Identifier);
        assert_eq!(generic[1].kind, TokenKind::Identifier);

        let mysql = tokenize_with(&MySqlDialect::new(), "auto_increment");
        assert_eq!(mysql[0].kind, TokenKind::Keyword(Keyword::AutoIncrement));

        let spanner = tokenize_with(&SpannerDialect::new(), "interleave");
        assert_eq!(spanner[0].kind, TokenKind::Keyword(Keyword::Interleave));
    }

    #[test]
    fn test_identifiers_keep_literal() {
        let tokens = tokenize_with(&GenericDialect::new(), "user_id Users $x");
        assert_eq!(tokens[0].kind, TokenKind::Identifier);
        assert_eq!(tokens[0].literal, "user_id");
        assert_eq!(tokens[1].literal, "Users");
        assert_eq!(tokens[2].kind, TokenKind::Illegal);
    }

    #[test]
    fn test_quoted_identifiers() {
        let tokens = tokenize_with(&GenericDialect::new(), r#""my ""col""""#);
        assert_eq!(tokens[0].kind, TokenKind::QuotedIdentifier('"'));
        assert_eq!(tokens[0].literal, r#""my ""col""""#);
        assert_eq!(unquote(&tokens[0].literal, '"'), r#"my "col""#);
    }

    #[test]
    fn test_mysql_quotes() {
        let tokens = tokenize_with(&MySqlDialect::new(), r#"`name` "text" 'it\'s'"#);
        assert_eq!(tokens[0].kind, TokenKind::QuotedIdentifier('`'));
        assert_eq!(tokens[1].kind, TokenKind::String('"'));
        assert_eq!(tokens[2].kind, TokenKind::String('\''));
        assert_eq!(tokens[2].literal, r"'it\'s'");
    }

    #[test]
    fn test_backslash_is_literal_in_generic_strings() {
        let tokens = tokenize_with(&GenericDialect::new(), r"'a\' b");
        assert_eq!(tokens[0].kind, TokenKind::String('\''));
        assert_eq!(tokens[0].literal, r"'a\'");
        assert_eq!(tokens[1].literal, "b");
    }

    #[test]
    fn test_unterminated_string_is_illegal() {
        let tokens = tokenize_with(&GenericDialect::new(), "'abc");
        assert_eq!(tokens[0].kind, TokenKind::Illegal);
        assert_eq!(tokens[0].literal, "'abc");
        assert!(tokens[1].is_eof());
    }

    #[test]
    fn test_numbers() {
        assert_eq!(
            literals(&GenericDialect::new(), "42 3.14 .5 1e10 2.5E-3"),
            vec!["42", "3.14", ".5", "1e10", "2.5E-3", ""]
        );
    }

    #[test]
    fn test_operators() {
        let kinds = token_kinds("+ - * / % = <> != < <= > >= || :: ::: -> ->>");
        assert_eq!(
            kinds,
            vec![
                TokenKind::Plus,
                TokenKind::Minus,
                TokenKind::Star,
                TokenKind::Slash,
                TokenKind::Percent,
                TokenKind::Eq,
                TokenKind::NotEq,
                TokenKind::NotEq,
                TokenKind::Lt,
                TokenKind::LtEq,
                TokenKind::Gt,
                TokenKind::GtEq,
                TokenKind::Concat,
                TokenKind::DoubleColon,
                TokenKind::TripleColon,
                TokenKind::Arrow,
                TokenKind::LongArrow,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_span_tracking() {
        let tokens = tokenize_with(&GenericDialect::new(), "CREATE TABLE");
        assert_eq!(tokens[0].span, Span::new(0, 6));
        assert_eq!(tokens[1].span, Span::new(7, 12));
        assert_eq!(tokens[2].span, Span::new(12, 12));
    }

    #[test]
    fn test_column_definition() {
        assert_eq!(
            literals(&GenericDialect::new(), "price NUMERIC(10, 2) DEFAULT 0.00"),
            vec!["price", "NUMERIC", "(", "10", ",", "2", ")", "DEFAULT", "0.00", ""]
        );
    }
}
