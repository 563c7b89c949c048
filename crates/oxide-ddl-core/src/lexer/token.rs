//! Token types for the DDL lexer.

use super::Span;

/// DDL keywords.
///
/// Which of these a lexer actually recognizes depends on the dialect: every
/// dialect knows the common set, and some add their own. A word that is not
/// a keyword for the active dialect lexes as a plain identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    // Statements
    Create,
    Table,
    Index,
    If,
    Not,
    Exists,

    // Columns
    Null,
    Default,
    Collate,

    // Constraints
    Constraint,
    Primary,
    Key,
    Foreign,
    References,
    Unique,
    Check,
    Asc,
    Desc,

    // Referential actions
    On,
    Delete,
    Update,
    Cascade,
    Restrict,
    Set,
    No,
    Action,

    // Index clauses
    Using,
    Where,
    In,

    // Literals
    True,
    False,

    // MySQL
    AutoIncrement,
    Character,
    Charset,
    Comment,

    // Spanner
    Interleave,
    Parent,
    NullFiltered,
    Storing,
    Options,
}

impl Keyword {
    /// Attempts to parse a keyword from a string (case-insensitive).
    #[must_use]
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "CREATE" => Some(Self::Create),
            "TABLE" => Some(Self::Table),
            "INDEX" => Some(Self::Index),
            "IF" => Some(Self::If),
            "NOT" => Some(Self::Not),
            "EXISTS" => Some(Self::Exists),
            "NULL" => Some(Self::Null),
            "DEFAULT" => Some(Self::Default),
            "COLLATE" => Some(Self::Collate),
            "CONSTRAINT" => Some(Self::Constraint),
            "PRIMARY" => Some(Self::Primary),
            "KEY" => Some(Self::Key),
            "FOREIGN" => Some(Self::Foreign),
            "REFERENCES" => Some(Self::References),
            "UNIQUE" => Some(Self::Unique),
            "CHECK" => Some(Self::Check),
            "ASC" => Some(Self::Asc),
            "DESC" => Some(Self::Desc),
            "ON" => Some(Self::On),
            "DELETE" => Some(Self::Delete),
            "UPDATE" => Some(Self::Update),
            "CASCADE" => Some(Self::Cascade),
            "RESTRICT" => Some(Self::Restrict),
            "SET" => Some(Self::Set),
            "NO" => Some(Self::No),
            "ACTION" => Some(Self::Action),
            "USING" => Some(Self::Using),
            "WHERE" => Some(Self::Where),
            "IN" => Some(Self::In),
            "TRUE" => Some(Self::True),
            "FALSE" => Some(Self::False),
            "AUTO_INCREMENT" => Some(Self::AutoIncrement),
            "CHARACTER" => Some(Self::Character),
            "CHARSET" => Some(Self::Charset),
            "COMMENT" => Some(Self::Comment),
            "INTERLEAVE" => Some(Self::Interleave),
            "PARENT" => Some(Self::Parent),
            "NULL_FILTERED" => Some(Self::NullFiltered),
            "STORING" => Some(Self::Storing),
            "OPTIONS" => Some(Self::Options),
            _ => None,
        }
    }

    /// Returns the keyword as a string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "CREATE",
            Self::Table => "TABLE",
            Self::Index => "INDEX",
            Self::If => "IF",
            Self::Not => "NOT",
            Self::Exists => "EXISTS",
            Self::Null => "NULL",
            Self::Default => "DEFAULT",
            Self::Collate => "COLLATE",
            Self::Constraint => "CONSTRAINT",
            Self::Primary => "PRIMARY",
            Self::Key => "KEY",
            Self::Foreign => "FOREIGN",
            Self::References => "REFERENCES",
            Self::Unique => "UNIQUE",
            Self::Check => "CHECK",
            Self::Asc => "ASC",
            Self::Desc => "DESC",
            Self::On => "ON",
            Self::Delete => "DELETE",
            Self::Update => "UPDATE",
            Self::Cascade => "CASCADE",
            Self::Restrict => "RESTRICT",
            Self::Set => "SET",
            Self::No => "NO",
            Self::Action => "ACTION",
            Self::Using => "USING",
            Self::Where => "WHERE",
            Self::In => "IN",
            Self::True => "TRUE",
            Self::False => "FALSE",
            Self::AutoIncrement => "AUTO_INCREMENT",
            Self::Character => "CHARACTER",
            Self::Charset => "CHARSET",
            Self::Comment => "COMMENT",
            Self::Interleave => "INTERLEAVE",
            Self::Parent => "PARENT",
            Self::NullFiltered => "NULL_FILTERED",
            Self::Storing => "STORING",
            Self::Options => "OPTIONS",
        }
    }

    /// Returns true if every dialect recognizes this keyword.
    #[must_use]
    pub const fn is_common(&self) -> bool {
        !matches!(
            self,
            Self::AutoIncrement
                | Self::Character
                | Self::Charset
                | Self::Comment
                | Self::Interleave
                | Self::Parent
                | Self::NullFiltered
                | Self::Storing
                | Self::Options
        )
    }

    /// Returns true if the keyword can never be used as a bare name.
    ///
    /// Non-reserved keywords such as `KEY` or `ACTION` are accepted wherever
    /// an identifier is expected.
    #[must_use]
    pub const fn is_reserved(&self) -> bool {
        matches!(
            self,
            Self::Create
                | Self::Table
                | Self::Constraint
                | Self::Primary
                | Self::Foreign
                | Self::References
                | Self::Unique
                | Self::Check
                | Self::Default
                | Self::Not
                | Self::Null
                | Self::True
                | Self::False
                | Self::On
        )
    }
}

impl core::fmt::Display for Keyword {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The kind of token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    // Identifiers and keywords
    /// SQL keyword
    Keyword(Keyword),
    /// Bare identifier (e.g., user_id)
    Identifier,
    /// Quoted identifier, carrying its quote character
    QuotedIdentifier(char),

    // Literals
    /// String literal, carrying its quote character
    String(char),
    /// Numeric literal (e.g., 42, 3.14, 1e10)
    Number,

    // Operators
    /// +
    Plus,
    /// -
    Minus,
    /// *
    Star,
    /// /
    Slash,
    /// %
    Percent,
    /// ^
    Caret,
    /// =
    Eq,
    /// != or <>
    NotEq,
    /// <
    Lt,
    /// <=
    LtEq,
    /// >
    Gt,
    /// >=
    GtEq,
    /// ||
    Concat,
    /// &
    BitAnd,
    /// |
    BitOr,
    /// ~
    BitNot,
    /// <<
    LeftShift,
    /// >>
    RightShift,
    /// ->
    Arrow,
    /// ->>
    LongArrow,

    // Delimiters
    /// (
    LeftParen,
    /// )
    RightParen,
    /// [
    LeftBracket,
    /// ]
    RightBracket,
    /// ,
    Comma,
    /// ;
    Semicolon,
    /// .
    Dot,
    /// :
    Colon,
    /// ::
    DoubleColon,
    /// :::
    TripleColon,
    /// ?
    Question,
    /// @
    At,

    // Special
    /// End of input
    Eof,
    /// Character sequence the lexer could not make sense of
    Illegal,
}

impl core::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Keyword(kw) => write!(f, "keyword {kw}"),
            Self::Identifier | Self::QuotedIdentifier(_) => f.write_str("identifier"),
            Self::String(_) => f.write_str("string"),
            Self::Number => f.write_str("number"),
            Self::Eof => f.write_str("end of input"),
            Self::Illegal => f.write_str("illegal token"),
            _ => f.write_str("symbol"),
        }
    }
}

/// A token with its span and the exact source text it covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The kind of token.
    pub kind: TokenKind,
    /// The location in the source code.
    pub span: Span,
    /// Source text, quotes included.
    pub literal: String,
}

impl Token {
    /// Creates a new token.
    #[must_use]
    pub fn new(kind: TokenKind, span: Span, literal: impl Into<String>) -> Self {
        Self {
            kind,
            span,
            literal: literal.into(),
        }
    }

    /// Returns true if this is an EOF token.
    #[must_use]
    pub const fn is_eof(&self) -> bool {
        matches!(self.kind, TokenKind::Eof)
    }

    /// Returns the keyword if this is a keyword token.
    #[must_use]
    pub const fn as_keyword(&self) -> Option<Keyword> {
        match &self.kind {
            TokenKind::Keyword(kw) => Some(*kw),
            _ => None,
        }
    }

    /// Returns true if the token's text equals `word`, ignoring case.
    ///
    /// Quoted tokens never match.
    #[must_use]
    pub fn is_word(&self, word: &str) -> bool {
        matches!(self.kind, TokenKind::Keyword(_) | TokenKind::Identifier)
            && self.literal.eq_ignore_ascii_case(word)
    }
}

impl core::fmt::Display for Token {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        if self.literal.is_empty() {
            write!(f, "{}", self.kind)
        } else {
            write!(f, "{} '{}'", self.kind, self.literal)
        }
    }
}
