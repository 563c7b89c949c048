//! Generic dialect: ANSI SQL with PostgreSQL spellings.

use super::{
    AlterColumnStyle, ConstraintStyle, Dialect, DropIndexStyle, FormatRules, Grammar, TypeSpec,
};
use crate::ast::TypeKind;

const TYPES: &[TypeSpec] = &[
    TypeSpec::new(&["BOOLEAN"], TypeKind::Boolean),
    TypeSpec::new(&["BOOL"], TypeKind::Boolean),
    TypeSpec::new(&["SMALLINT"], TypeKind::SmallInt),
    TypeSpec::new(&["INT2"], TypeKind::SmallInt),
    TypeSpec::new(&["INTEGER"], TypeKind::Integer),
    TypeSpec::new(&["INT"], TypeKind::Integer),
    TypeSpec::new(&["INT4"], TypeKind::Integer),
    TypeSpec::new(&["BIGINT"], TypeKind::BigInt),
    TypeSpec::new(&["INT8"], TypeKind::BigInt),
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
    TypeSpec::new(&["CHARACTER", "VARYING"], TypeKind::Varchar),
    TypeSpec::new(&["VARCHAR"], TypeKind::Varchar),
    TypeSpec::new(&["CHARACTER"], TypeKind::Char),
    TypeSpec::new(&["CHAR"], TypeKind::Char),
    TypeSpec::new(&["TEXT"], TypeKind::Text),
    TypeSpec::new(&["BYTEA"], TypeKind::Bytes),
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
    TypeSpec::new(&["JSON"], TypeKind::Json),
    TypeSpec::new(&["JSONB"], TypeKind::Jsonb),
    TypeSpec::new(&["INET"], TypeKind::Inet),
    TypeSpec::new(&["BIT"], TypeKind::Bit),
];

/// A generic SQL dialect using ANSI SQL standards and PostgreSQL type names.
#[derive(Debug, Default, Clone, Copy)]
pub struct GenericDialect;

impl GenericDialect {
    /// Creates a new generic dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Dialect for GenericDialect {
    fn name(&self) -> &'static str {
        "generic"
    }

    fn data_types(&self) -> &'static [TypeSpec] {
        TYPES
    }

    fn grammar(&self) -> Grammar {
        Grammar {
            inline_primary_key: true,
            trailing_primary_key: false,
            interleave: false,
            table_options: false,
            index_constraints: false,
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
            drop_index: DropIndexStyle::Plain,
            drop_constraint_by_kind: false,
            index_using_after_columns: false,
            tight_operators: &["::"],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generic_dialect() {
        let dialect = GenericDialect::new();
        assert_eq!(dialect.name(), "generic");
        assert_eq!(dialect.identifier_quotes(), &['"']);
        assert_eq!(dialect.string_quotes(), &['\'']);
        assert!(!dialect.backslash_escapes());
        assert!(dialect.grammar().inline_primary_key);
        assert_eq!(dialect.grammar().alter_column, AlterColumnStyle::Granular);
    }
}
