//! Error types for the command-line tool.

use std::path::PathBuf;

use oxide_ddl_core::{DiffError, ParseError};

/// Errors that can occur while running a command.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    /// The dialect name matches none of the built-in dialects.
    #[error("Unknown dialect '{0}' (expected generic, cockroachdb, mysql or spanner)")]
    UnknownDialect(String),

    /// Both inputs of a diff were `-`.
    #[error("Only one input can be read from stdin")]
    StdinTwice,

    /// An input could not be read.
    #[error("Failed to read '{}': {source}", path.display())]
    Io {
        /// Path of the input, `-` for stdin.
        path: PathBuf,
        source: std::io::Error,
    },

    /// An input is not valid DDL for the dialect.
    #[error("Failed to parse '{}': {source}", path.display())]
    Parse {
        /// Path of the input, `-` for stdin.
        path: PathBuf,
        source: ParseError,
    },

    /// The differ has no rule for a statement.
    #[error(transparent)]
    Diff(#[from] DiffError),

    /// The AST could not be serialized.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for commands.
pub type Result<T> = std::result::Result<T, CommandError>;
