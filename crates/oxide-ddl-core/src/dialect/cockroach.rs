//! CockroachDB dialect.

use super::{
    AlterColumnStyle, ConstraintStyle, Dialect, DropIndexStyle, FormatRules, Grammar, TypeSpec,
};
use crate::ast::TypeKind;
use crate::lexer::Keyword;

// INT and INTEGER are 64-bit in CockroachDB.
const TYPES: &[TypeSpec] = &[
    TypeSpec::new(&["BOOLEAN"], TypeKind::Boolean),
    TypeSpec::new(&["BOOL"], TypeKind::Boolean),
    TypeSpec::new(&["SMALLINT"], TypeKind::SmallInt),
    TypeSpec::new(&["INT2"], TypeKind::SmallInt),
    TypeSpec::new(&["INT4"], TypeKind::Integer),
    TypeSpec::new(&["INTEGER"], TypeKind::BigInt),
    TypeSpec::new(&["INT"], TypeKind::BigInt),
    TypeSpec::new(&["INT8"], TypeKind::BigInt),
    TypeSpec::new(&["INT64"], TypeKind::BigInt),
    TypeSpec::new(&["BIGINT"], TypeKind::BigInt),
    TypeSpec::new(&["SMALLSERIAL"], TypeKind::SmallSerial),
    TypeSpec::new(&["SERIAL"], TypeKind::Serial),
    TypeSpec::new(&["BIGSERIAL"], TypeKind::BigSerial),
    TypeSpec::new(&["REAL"], TypeKind::Real),
    TypeSpec::new(&["FLOAT4"], TypeKind::Real),
    TypeSpec::new(&["DOUBLE", "PRECISION"], TypeKind::Double),
    TypeSpec::new(&["FLOAT8"], TypeKind::Double),
    TypeSpec::new(&["FLOAT"], TypeKind::Double),
    TypeSpec::new(&["NUMERIC"], TypeKind::Decimal),
    TypeSpec::new(&["DECIMAL"], TypeKind::Decimal),
    TypeSpec::new(&["DEC"], TypeKind::Decimal),
    TypeSpec::new(&["CHARACTER", "VARYING"], TypeKind::Varchar),
    TypeSpec::new(&["VARCHAR"], TypeKind::Varchar),
    TypeSpec::new(&["CHARACTER"], TypeKind::Char),
    TypeSpec::new(&["CHAR"], TypeKind::Char),
    TypeSpec::new(&["STRING"], TypeKind::Text),
    TypeSpec::new(&["TEXT"], TypeKind::Text),
    TypeSpec::new(&["BYTES"], TypeKind::Bytes),
    TypeSpec::new(&["BYTEA"], TypeKind::Bytes),
    TypeSpec::new(&["BLOB"], TypeKind::Bytes),
    TypeSpec::new(&["DATE"], TypeKind::Date),
    TypeSpec::new(&["TIME"], TypeKind::Time),
    TypeSpec::new(&["TIME", "WITHOUT", "TIME", "ZONE"], TypeKind::Time),
    TypeSpec::new(&["TIME", "WITH", "TIME", "ZONE"], TypeKind::TimeTz),
    TypeSpec::new(&["TIMETZ"], TypeKind::TimeTz),
    TypeSpec::new(&["TIMESTAMP"], TypeKind::Timestamp),
    TypeSpec::new(&["TIMESTAMP", "WITHOUT", "TIME", "ZONE"], TypeKind::Timestamp),
    TypeSpec::new(&["TIMESTAMP", "WITH", "TIME", "ZONE"], TypeKind::TimestampTz),
    TypeSpec::new(&["TIMESTAMPTZ"], TypeKind::TimestampTz),
    TypeSpec::new(&["INTERVAL"], TypeKind::Interval),
    TypeSpec::new(&["UUID"], TypeKind::Uuid),
    TypeSpec::new(&["JSON"], TypeKind::Jsonb),
    TypeSpec::new(&["JSONB"], TypeKind::Jsonb),
    TypeSpec::new(&["INET"], TypeKind::Inet),
    TypeSpec::new(&["BIT"], TypeKind::Bit),
];

/// The CockroachDB dialect.
///
/// PostgreSQL-compatible, with secondary indexes allowed inside the table
/// body and `table@index` addressing for `DROP INDEX`.
#[derive(Debug, Default, Clone, Copy)]
pub struct CockroachDialect;

impl CockroachDialect {
    /// Creates a new CockroachDB dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Dialect for CockroachDialect {
    fn name(&self) -> &'static str {
        "cockroachdb"
    }

    fn data_types(&self) -> &'static [TypeSpec] {
        TYPES
    }

    fn table_constraint_keywords(&self) -> &'static [Keyword] {
        &[
            Keyword::Constraint,
            Keyword::Primary,
            Keyword::Foreign,
            Keyword::Unique,
            Keyword::Check,
            Keyword::Index,
        ]
    }

    fn grammar(&self) -> Grammar {
        Grammar {
            inline_primary_key: true,
            trailing_primary_key: false,
            interleave: false,
            table_options: false,
            index_constraints: true,
            unsigned_integers: false,
            array_suffix: true,
            parenthesized_default: false,
            immutable_primary_key: false,
            rename_constraint: true,
            alter_column: AlterColumnStyle::Granular,
        }
    }

    fn format_rules(&self) -> FormatRules {
        FormatRules {
            constraint_style: ConstraintStyle::Standard,
            drop_index: DropIndexStyle::TableAt,
            drop_constraint_by_kind: false,
            index_using_after_columns: false,
            tight_operators: &["::", ":::"],
        }
    }
}
