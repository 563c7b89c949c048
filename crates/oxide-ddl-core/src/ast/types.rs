//! SQL data type definitions.

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::Expr;

/// Dialect-independent classification of a data type.
///
/// Two spellings of the same type (`INT` and `INTEGER`, `VARCHAR` and
/// `CHARACTER VARYING`) share a kind, so the differ treats them as equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TypeKind {
    Boolean,
    TinyInt,
    SmallInt,
    MediumInt,
    Integer,
    BigInt,
    SmallSerial,
    Serial,
    BigSerial,
    Real,
    Double,
    Decimal,
    Bit,
    Char,
    Varchar,
    Text,
    TinyText,
    MediumText,
    LongText,
    String,
    Binary,
    Varbinary,
    Bytes,
    TinyBlob,
    Blob,
    MediumBlob,
    LongBlob,
    Enum,
    Set,
    Date,
    Time,
    TimeTz,
    Timestamp,
    TimestampTz,
    Datetime,
    Year,
    Interval,
    Uuid,
    Json,
    Jsonb,
    Inet,
    Array,
    /// A type name the dialect's table does not list.
    Unrecognized,
}

impl TypeKind {
    /// Returns the canonical upper-case name of the kind.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Boolean => "BOOLEAN",
            Self::TinyInt => "TINYINT",
            Self::SmallInt => "SMALLINT",
            Self::MediumInt => "MEDIUMINT",
            Self::Integer => "INTEGER",
            Self::BigInt => "BIGINT",
            Self::SmallSerial => "SMALLSERIAL",
            Self::Serial => "SERIAL",
            Self::BigSerial => "BIGSERIAL",
            Self::Real => "REAL",
            Self::Double => "DOUBLE",
            Self::Decimal => "DECIMAL",
            Self::Bit => "BIT",
            Self::Char => "CHAR",
            Self::Varchar => "VARCHAR",
            Self::Text => "TEXT",
            Self::TinyText => "TINYTEXT",
            Self::MediumText => "MEDIUMTEXT",
            Self::LongText => "LONGTEXT",
            Self::String => "STRING",
            Self::Binary => "BINARY",
            Self::Varbinary => "VARBINARY",
            Self::Bytes => "BYTES",
            Self::TinyBlob => "TINYBLOB",
            Self::Blob => "BLOB",
            Self::MediumBlob => "MEDIUMBLOB",
            Self::LongBlob => "LONGBLOB",
            Self::Enum => "ENUM",
            Self::Set => "SET",
            Self::Date => "DATE",
            Self::Time => "TIME",
            Self::TimeTz => "TIMETZ",
            Self::Timestamp => "TIMESTAMP",
            Self::TimestampTz => "TIMESTAMPTZ",
            Self::Datetime => "DATETIME",
            Self::Year => "YEAR",
            Self::Interval => "INTERVAL",
            Self::Uuid => "UUID",
            Self::Json => "JSON",
            Self::Jsonb => "JSONB",
            Self::Inet => "INET",
            Self::Array => "ARRAY",
            Self::Unrecognized => "UNRECOGNIZED",
        }
    }
}

/// A column data type as written.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DataType {
    /// Spelling used for printing: the canonical words from the dialect's
    /// table, or the source text for unrecognized types.
    pub name: String,
    pub kind: TypeKind,
    /// Length, precision or value list inside parentheses.
    pub args: Option<Expr>,
    /// Element type of `ARRAY<...>`.
    pub element: Option<Box<DataType>>,
    pub unsigned: bool,
    /// Number of words printed before the arguments when they sit inside
    /// the spelling, as in `TIMESTAMP(3) WITH TIME ZONE`.
    pub args_after: Option<usize>,
    /// Count of `[]` suffixes.
    pub array_dims: usize,
}

impl DataType {
    /// Creates a data type without arguments.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: TypeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            args: None,
            element: None,
            unsigned: false,
            args_after: None,
            array_dims: 0,
        }
    }

    /// Sets the parenthesized arguments.
    #[must_use]
    pub fn with_args(mut self, args: Expr) -> Self {
        self.args = Some(args);
        self
    }

    /// Comparison form: the kind, arguments, element type and sign.
    #[must_use]
    pub fn diff_form(&self) -> String {
        let mut out = match self.kind {
            TypeKind::Unrecognized => self.name.to_ascii_uppercase(),
            kind => kind.as_str().to_string(),
        };
        if let Some(args) = &self.args {
            out.push('(');
            out.push_str(&args.diff_form());
            out.push(')');
        }
        if let Some(element) = &self.element {
            out.push('<');
            out.push_str(&element.diff_form());
            out.push('>');
        }
        if self.unsigned {
            out.push_str(" UNSIGNED");
        }
        out.push_str(&"[]".repeat(self.array_dims));
        out
    }

    /// Prints the type; arguments are spaced with `tight` operators
    /// (see [`Expr::render`]).
    #[must_use]
    pub fn render(&self, tight: &[&str]) -> String {
        let words: Vec<&str> = self.name.split(' ').collect();
        let split = self.args_after.unwrap_or(words.len()).min(words.len());
        let mut out = words[..split].join(" ");
        if let Some(args) = &self.args {
            out.push('(');
            out.push_str(&args.render(tight));
            out.push(')');
        }
        if split < words.len() {
            out.push(' ');
            out.push_str(&words[split..].join(" "));
        }
        if let Some(element) = &self.element {
            out.push('<');
            out.push_str(&element.render(tight));
            out.push('>');
        }
        if self.unsigned {
            out.push_str(" UNSIGNED");
        }
        out.push_str(&"[]".repeat(self.array_dims));
        out
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(&[]))
    }
}
