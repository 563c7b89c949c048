//! SQL dialect descriptors.
//!
//! Every supported database is described by a value implementing
//! [`Dialect`]: lexical rules (quotes, comments, keywords), the data types
//! it knows, and the grammar and formatting switches that the parser,
//! printer and differ consult. Nothing dialect-specific lives outside
//! these descriptors.

mod cockroach;
mod generic;
mod mysql;
mod spanner;

pub use cockroach::CockroachDialect;
pub use generic::GenericDialect;
pub use mysql::MySqlDialect;
pub use spanner::SpannerDialect;

use crate::ast::{Identifier, TypeKind};
use crate::lexer::Keyword;

/// Names accepted by [`from_name`], in display order.
pub const DIALECT_NAMES: &[&str] = &["generic", "cockroachdb", "mysql", "spanner"];

/// One entry of a dialect's data type table.
///
/// `words` holds the upper-case spelling, one element per word
/// (`["DOUBLE", "PRECISION"]`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeSpec {
    pub words: &'static [&'static str],
    pub kind: TypeKind,
}

impl TypeSpec {
    #[must_use]
    pub const fn new(words: &'static [&'static str], kind: TypeKind) -> Self {
        debug_assert!(!words.is_empty(), "type spelling without words");
        Self { words, kind }
    }
}

/// How a column change is expressed in `ALTER TABLE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlterColumnStyle {
    /// One statement per attribute: `SET DATA TYPE`, `SET DEFAULT`,
    /// `SET NOT NULL`, ...
    Granular,
    /// The full column definition is restated with `MODIFY COLUMN`.
    Modify,
    /// Type and nullability are restated with `ALTER COLUMN c TYPE`,
    /// defaults and options change separately.
    Redefine,
}

/// How table-level constraints are spelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintStyle {
    /// `CONSTRAINT name PRIMARY KEY (...)`, `CONSTRAINT name UNIQUE (...)`.
    Standard,
    /// `PRIMARY KEY (...)`, `UNIQUE KEY name (...)`, `KEY name (...)`.
    Keyed,
}

/// How `DROP INDEX` names its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropIndexStyle {
    /// `DROP INDEX name`
    Plain,
    /// `DROP INDEX name ON table`
    OnTable,
    /// `DROP INDEX table@name`
    TableAt,
}

/// What the parser accepts and what the differ may emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct Grammar {
    /// `PRIMARY KEY` may appear on a column or inside the table body.
    pub inline_primary_key: bool,
    /// `PRIMARY KEY (...)` follows the closing parenthesis of the body.
    pub trailing_primary_key: bool,
    /// `INTERLEAVE IN PARENT` and `ROW DELETION POLICY` table clauses.
    pub interleave: bool,
    /// `ENGINE=...`-style options after the table body.
    pub table_options: bool,
    /// `[UNIQUE] KEY|INDEX name (...)` inside the table body.
    pub index_constraints: bool,
    /// `UNSIGNED` after integer types.
    pub unsigned_integers: bool,
    /// PostgreSQL `[]` array suffixes on column types.
    pub array_suffix: bool,
    /// Column defaults are written `DEFAULT (expr)`.
    pub parenthesized_default: bool,
    /// Changing the primary key or parent of a table requires recreating it.
    pub immutable_primary_key: bool,
    /// `ALTER TABLE ... RENAME CONSTRAINT` exists.
    pub rename_constraint: bool,
    /// How column changes are expressed.
    pub alter_column: AlterColumnStyle,
}

/// Switches that only affect printing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatRules {
    pub constraint_style: ConstraintStyle,
    pub drop_index: DropIndexStyle,
    /// `ALTER TABLE ... DROP PRIMARY KEY`, `DROP FOREIGN KEY n`, ...
    /// instead of a uniform `DROP CONSTRAINT n`.
    pub drop_constraint_by_kind: bool,
    /// `USING method` goes after the column list of `CREATE INDEX`.
    pub index_using_after_columns: bool,
    /// Operators printed without surrounding spaces.
    pub tight_operators: &'static [&'static str],
}

/// A SQL dialect descriptor.
pub trait Dialect: core::fmt::Debug + Send + Sync {
    /// Returns the name of the dialect.
    fn name(&self) -> &'static str;

    /// Characters that open a quoted identifier.
    fn identifier_quotes(&self) -> &'static [char] {
        &['"']
    }

    /// Characters that open a string literal.
    fn string_quotes(&self) -> &'static [char] {
        &['\'']
    }

    /// Whether a backslash escapes the next character in string literals.
    fn backslash_escapes(&self) -> bool {
        false
    }

    /// Whether `#` starts a line comment.
    fn hash_comments(&self) -> bool {
        false
    }

    /// Marker used when printing comment lines.
    fn comment_marker(&self) -> &'static str {
        "--"
    }

    /// Keywords recognized on top of the common set.
    fn extra_keywords(&self) -> &'static [Keyword] {
        &[]
    }

    /// Returns the keyword spelled by `word`, if this dialect recognizes one.
    fn keyword(&self, word: &str) -> Option<Keyword> {
        Keyword::from_str(word).filter(|kw| kw.is_common() || self.extra_keywords().contains(kw))
    }

    /// Whether identifiers compare case-insensitively even when quoted.
    fn case_insensitive_identifiers(&self) -> bool {
        false
    }

    /// Returns the comparison name of an identifier as written.
    ///
    /// `text` is the identifier without its quotes.
    fn fold_identifier(&self, text: &str, quoted: bool) -> String {
        if quoted && !self.case_insensitive_identifiers() {
            text.to_string()
        } else {
            text.to_lowercase()
        }
    }

    /// Builds a printable identifier for a canonical name, quoting it when
    /// an unquoted spelling would not read back as the same name.
    fn identifier(&self, name: &str) -> Identifier {
        let plain = name
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
            && name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
            && self.keyword(name).is_none_or(|kw| !kw.is_reserved())
            && self.fold_identifier(name, false) == name;
        if plain {
            return Identifier::new(name);
        }
        let quote = self.identifier_quotes().first().copied().unwrap_or('"');
        Identifier::quoted(name, quote)
    }

    /// The data types this dialect knows.
    fn data_types(&self) -> &'static [TypeSpec];

    /// Keywords that start a table-level constraint inside `CREATE TABLE`.
    fn table_constraint_keywords(&self) -> &'static [Keyword] {
        &[
            Keyword::Constraint,
            Keyword::Primary,
            Keyword::Foreign,
            Keyword::Unique,
            Keyword::Check,
        ]
    }

    /// Grammar switches.
    fn grammar(&self) -> Grammar;

    /// Formatting switches.
    fn format_rules(&self) -> FormatRules;
}

/// Looks up a dialect by name.
///
/// Accepts the names in [`DIALECT_NAMES`] plus a few common aliases,
/// case-insensitively.
#[must_use]
pub fn from_name(name: &str) -> Option<&'static dyn Dialect> {
    static GENERIC: GenericDialect = GenericDialect::new();
    static COCKROACH: CockroachDialect = CockroachDialect::new();
    static MYSQL: MySqlDialect = MySqlDialect::new();
    static SPANNER: SpannerDialect = SpannerDialect::new();

    match name.to_ascii_lowercase().as_str() {
        "generic" | "ansi" | "postgres" | "postgresql" => Some(&GENERIC),
        "cockroachdb" | "cockroach" | "crdb" => Some(&COCKROACH),
        "mysql" => Some(&MYSQL),
        "spanner" => Some(&SPANNER),
        _ => None,
    }
}
