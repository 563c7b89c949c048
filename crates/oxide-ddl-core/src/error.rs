//! Error type of the string-in, string-out entry points.

use thiserror::Error;

use crate::diff::DiffError;
use crate::parser::ParseError;

/// Anything that can go wrong between DDL text and a migration script.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Diff(#[from] DiffError),
}

/// Result alias for [`Error`].
pub type Result<T> = core::result::Result<T, Error>;
