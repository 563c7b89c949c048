//! DDL Lexer/Tokenizer
//!
//! This module provides a hand-written, dialect-aware lexer that produces a
//! stream of tokens. Every token keeps the exact source text it covers so
//! that names and literals can be printed back as written.

mod span;
mod token;
mod tokenizer;

pub use span::{Location, Span};
pub use token::{Keyword, Token, TokenKind};
pub use tokenizer::{unquote, Lexer};
