//! Column definitions.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::{DataType, Expr, Identifier};

/// A column inside `CREATE TABLE`.
///
/// Constraints written on the column (`PRIMARY KEY`, `REFERENCES`, `UNIQUE`,
/// `CHECK`) are lifted into the table's constraint list while parsing, so
/// they are not part of this struct.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Column {
    pub name: Identifier,
    pub data_type: DataType,
    pub not_null: bool,
    pub default: Option<Expr>,
    pub collate: Option<Identifier>,
    /// MySQL `CHARACTER SET`.
    pub charset: Option<Identifier>,
    /// MySQL `AUTO_INCREMENT`.
    pub auto_increment: bool,
    /// MySQL `ON UPDATE` expression.
    pub on_update: Option<Expr>,
    /// MySQL `COMMENT` string literal.
    pub comment: Option<Identifier>,
    /// Spanner `OPTIONS (...)` contents.
    pub options: Option<Expr>,
}

impl Column {
    /// Creates a nullable column with no attributes.
    #[must_use]
    pub const fn new(name: Identifier, data_type: DataType) -> Self {
        Self {
            name,
            data_type,
            not_null: false,
            default: None,
            collate: None,
            charset: None,
            auto_increment: false,
            on_update: None,
            comment: None,
            options: None,
        }
    }

    /// Sets NOT NULL.
    #[must_use]
    pub fn not_null(mut self) -> Self {
        self.not_null = true;
        self
    }

    /// Sets the default expression.
    #[must_use]
    pub fn with_default(mut self, expr: Expr) -> Self {
        self.default = Some(expr);
        self
    }
}
