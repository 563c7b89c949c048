//! DDL Parser
//!
//! A hand-written recursive descent parser. Expressions (defaults, check
//! conditions, predicates) are not parsed into trees; they are collected
//! as flat atom sequences with balanced parentheses.

mod error;
mod parser;

pub use error::ParseError;
pub use parser::Parser;
