//! MySQL dialect.

use super::{
    AlterColumnStyle, ConstraintStyle, Dialect, DropIndexStyle, FormatRules, Grammar, TypeSpec,
};
use crate::ast::TypeKind;
use crate::lexer::Keyword;

const TYPES: &[TypeSpec] = &[
    TypeSpec::new(&["BOOL"], TypeKind::Boolean),
    TypeSpec::new(&["BOOLEAN"], TypeKind::Boolean),
    TypeSpec::new(&["TINYINT"], TypeKind::TinyInt),
    TypeSpec::new(&["SMALLINT"], TypeKind::SmallInt),
    TypeSpec::new(&["MEDIUMINT"], TypeKind::MediumInt),
    TypeSpec::new(&["INT"], TypeKind::Integer),
    TypeSpec::new(&["INTEGER"], TypeKind::Integer),
    TypeSpec::new(&["BIGINT"], TypeKind::BigInt),
    TypeSpec::new(&["SERIAL"], TypeKind::BigSerial),
    TypeSpec::new(&["DECIMAL"], TypeKind::Decimal),
    TypeSpec::new(&["DEC"], TypeKind::Decimal),
    TypeSpec::new(&["NUMERIC"], TypeKind::Decimal),
    TypeSpec::new(&["FIXED"], TypeKind::Decimal),
    TypeSpec::new(&["FLOAT"], TypeKind::Real),
    TypeSpec::new(&["DOUBLE"], TypeKind::Double),
    TypeSpec::new(&["DOUBLE", "PRECISION"], TypeKind::Double),
    TypeSpec::new(&["REAL"], TypeKind::Double),
    TypeSpec::new(&["BIT"], TypeKind::Bit),
    TypeSpec::new(&["CHAR"], TypeKind::Char),
    TypeSpec::new(&["VARCHAR"], TypeKind::Varchar),
    TypeSpec::new(&["BINARY"], TypeKind::Binary),
    TypeSpec::new(&["VARBINARY"], TypeKind::Varbinary),
    TypeSpec::new(&["TINYTEXT"], TypeKind::TinyText),
    TypeSpec::new(&["TEXT"], TypeKind::Text),
    TypeSpec::new(&["MEDIUMTEXT"], TypeKind::MediumText),
    TypeSpec::new(&["LONGTEXT"], TypeKind::LongText),
    TypeSpec::new(&["TINYBLOB"], TypeKind::TinyBlob),
    TypeSpec::new(&["BLOB"], TypeKind::Blob),
    TypeSpec::new(&["MEDIUMBLOB"], TypeKind::MediumBlob),
    TypeSpec::new(&["LONGBLOB"], TypeKind::LongBlob),
    TypeSpec::new(&["ENUM"], TypeKind::Enum),
    TypeSpec::new(&["SET"], TypeKind::Set),
    TypeSpec::new(&["DATE"], TypeKind::Date),
    TypeSpec::new(&["TIME"], TypeKind::Time),
    TypeSpec::new(&["DATETIME"], TypeKind::Datetime),
    TypeSpec::new(&["TIMESTAMP"], TypeKind::Timestamp),
    TypeSpec::new(&["YEAR"], TypeKind::Year),
    TypeSpec::new(&["JSON"], TypeKind::Json),
];

/// The MySQL dialect.
///
/// Backtick identifiers, double-quoted strings with backslash escapes,
/// `#` comments, keyed index constraints and table options.
#[derive(Debug, Default, Clone, Copy)]
pub struct MySqlDialect;

impl MySqlDialect {
    /// Creates a new MySQL dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Dialect for MySqlDialect {
    fn name(&self) -> &'static str {
        "mysql"
    }

    fn identifier_quotes(&self) -> &'static [char] {
        &['`']
    }

    fn string_quotes(&self) -> &'static [char] {
        &['\'', '"']
    }

    fn backslash_escapes(&self) -> bool {
        true
    }

    fn hash_comments(&self) -> bool {
        true
    }

    fn extra_keywords(&self) -> &'static [Keyword] {
        &[
            Keyword::AutoIncrement,
            Keyword::Character,
            Keyword::Charset,
            Keyword::Comment,
        ]
    }

    fn case_insensitive_identifiers(&self) -> bool {
        true
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
            Keyword::Key,
            Keyword::Index,
        ]
    }

    fn grammar(&self) -> Grammar {
        Grammar {
            inline_primary_key: true,
            trailing_primary_key: false,
            interleave: false,
            table_options: true,
            index_constraints: true,
            unsigned_integers: true,
            array_suffix: false,
            parenthesized_default: false,
            immutable_primary_key: false,
            rename_constraint: false,
            alter_column: AlterColumnStyle::Modify,
        }
    }

    fn format_rules(&self) -> FormatRules {
        FormatRules {
            constraint_style: ConstraintStyle::Keyed,
            drop_index: DropIndexStyle::OnTable,
            drop_constraint_by_kind: true,
            index_using_after_columns: true,
            tight_operators: &[],
        }
    }
}
