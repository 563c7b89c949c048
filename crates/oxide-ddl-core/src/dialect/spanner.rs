//! Cloud Spanner dialect.

use super::{
    AlterColumnStyle, ConstraintStyle, Dialect, DropIndexStyle, FormatRules, Grammar, TypeSpec,
};
use crate::ast::TypeKind;
use crate::lexer::Keyword;

const TYPES: &[TypeSpec] = &[
    TypeSpec::new(&["BOOL"], TypeKind::Boolean),
    TypeSpec::new(&["INT64"], TypeKind::BigInt),
    TypeSpec::new(&["FLOAT32"], TypeKind::Real),
    TypeSpec::new(&["FLOAT64"], TypeKind::Double),
    TypeSpec::new(&["NUMERIC"], TypeKind::Decimal),
    TypeSpec::new(&["STRING"], TypeKind::String),
    TypeSpec::new(&["BYTES"], TypeKind::Bytes),
    TypeSpec::new(&["DATE"], TypeKind::Date),
    TypeSpec::new(&["TIMESTAMP"], TypeKind::Timestamp),
    TypeSpec::new(&["JSON"], TypeKind::Json),
    TypeSpec::new(&["ARRAY"], TypeKind::Array),
];

/// The Cloud Spanner (GoogleSQL) dialect.
///
/// Primary keys follow the table body, tables may be interleaved in a
/// parent, and identifiers compare case-insensitively.
#[derive(Debug, Default, Clone, Copy)]
pub struct SpannerDialect;

impl SpannerDialect {
    /// Creates a new Spanner dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Dialect for SpannerDialect {
    fn name(&self) -> &'static str {
        "spanner"
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
            Keyword::Interleave,
            Keyword::Parent,
            Keyword::NullFiltered,
            Keyword::Storing,
            Keyword::Options,
        ]
    }

    fn case_insensitive_identifiers(&self) -> bool {
        true
    }

    fn data_types(&self) -> &'static [TypeSpec] {
        TYPES
    }

    fn table_constraint_keywords(&self) -> &'static [Keyword] {
        &[Keyword::Constraint, Keyword::Foreign, Keyword::Check]
    }

    fn grammar(&self) -> Grammar {
        Grammar {
            inline_primary_key: false,
            trailing_primary_key: true,
            interleave: true,
            table_options: false,
            index_constraints: false,
            unsigned_integers: false,
            array_suffix: false,
            parenthesized_default: true,
            immutable_primary_key: true,
            rename_constraint: false,
            alter_column: AlterColumnStyle::Redefine,
        }
    }

    fn format_rules(&self) -> FormatRules {
        FormatRules {
            constraint_style: ConstraintStyle::Standard,
            drop_index: DropIndexStyle::Plain,
            drop_constraint_by_kind: false,
            index_using_after_columns: false,
            tight_operators: &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spanner_grammar() {
        let grammar = SpannerDialect::new().grammar();
        assert!(!grammar.inline_primary_key);
        assert!(grammar.trailing_primary_key);
        assert!(grammar.immutable_primary_key);
        assert!(grammar.parenthesized_default);
    }

    #[test]
    fn test_spanner_keywords() {
        let dialect = SpannerDialect::new();
        assert_eq!(dialect.keyword("interleave"), Some(Keyword::Interleave));
        assert_eq!(dialect.keyword("auto_increment"), None);
    }
}
