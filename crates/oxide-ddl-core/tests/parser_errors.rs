//! Parse error reporting: positions, expectations and the offending tokens.

mod common;
use common::*;

use oxide_ddl_core::lexer::{Location, TokenKind};

#[test]
fn error_not_a_create_statement() {
    let err = parse_err("generic", "SELECT 1");
    assert_eq!(err.expected.as_deref(), Some("CREATE"));
    assert_eq!(err.location, Location { line: 1, column: 1 });
    assert_eq!(
        err.to_string(),
        "unexpected identifier 'SELECT': expected CREATE at line 1, column 1"
    );
}

#[test]
fn error_unsupported_create() {
    let err = parse_err("generic", "CREATE VIEW v AS SELECT 1");
    assert_eq!(err.expected.as_deref(), Some("TABLE or INDEX"));
    assert_eq!(err.found.unwrap().literal, "VIEW");
}

#[test]
fn error_end_of_input() {
    let err = parse_err("generic", "CREATE TABLE");
    assert_eq!(err.message, "unexpected end of input: expected identifier");
    assert_eq!(err.location, Location { line: 1, column: 13 });
    assert_eq!(err.found.unwrap().kind, TokenKind::Eof);
    assert!(err.peek.is_none());
}

#[test]
fn error_unclosed_table_body() {
    let err = parse_err("generic", "CREATE TABLE t (a INT");
    assert_eq!(err.expected.as_deref(), Some(")"));
    assert!(err.message.starts_with("unexpected end of input"));
}

#[test]
fn error_location_on_later_line() {
    let err = parse_err("generic", "CREATE TABLE t (\n  a INT,\n  b TEXT bogus\n);");
    assert_eq!(err.location, Location { line: 3, column: 10 });
    assert_eq!(err.expected.as_deref(), Some("column option"));
    assert_eq!(err.found.unwrap().literal, "bogus");
}

#[test]
fn error_unterminated_string() {
    let err = parse_err("generic", "CREATE TABLE t (a TEXT DEFAULT 'abc)");
    assert_eq!(err.expected.as_deref(), Some("expression"));
    let found = err.found.unwrap();
    assert_eq!(found.kind, TokenKind::Illegal);
    assert_eq!(found.literal, "'abc)");
}

#[test]
fn error_reserved_word_as_column_name() {
    let err = parse_err("generic", "CREATE TABLE t (table INT)");
    assert_eq!(err.expected.as_deref(), Some("identifier"));

    // Non-reserved keywords are fine as names.
    let table = parse_table("generic", "CREATE TABLE t (key INT, action TEXT, comment TEXT)");
    assert_eq!(table.columns.len(), 3);
}

#[test]
fn error_unbalanced_default() {
    let err = parse_err("generic", "CREATE TABLE t (a INT DEFAULT (1 + 2");
    assert_eq!(err.expected.as_deref(), Some(")"));
}

#[test]
fn error_missing_data_type() {
    let err = parse_err("generic", "CREATE TABLE t (a)");
    assert_eq!(err.expected.as_deref(), Some("data type"));
}

#[test]
fn error_not_without_null() {
    let err = parse_err("generic", "CREATE TABLE t (a INT NOT 5)");
    assert_eq!(err.expected.as_deref(), Some("NULL"));
    assert_eq!(err.found.unwrap().literal, "5");
    assert_eq!(err.peek.unwrap().literal, ")");
}

#[test]
fn error_bad_referential_action() {
    let err = parse_err(
        "generic",
        "CREATE TABLE t (a INT REFERENCES p (id) ON DELETE EXPLODE)",
    );
    assert_eq!(
        err.expected.as_deref(),
        Some("CASCADE, RESTRICT, SET NULL, SET DEFAULT or NO ACTION")
    );
}

#[test]
fn error_trailing_garbage() {
    let err = parse_err("generic", "CREATE TABLE t (a INT) garbage");
    assert_eq!(err.expected.as_deref(), Some("; or end of input"));
}

#[test]
fn error_first_statement_wins() {
    let err = parse_err("mysql", "CREATE TABLE a (x INT);\nCREATE TABLE b (y INT UNSIGNED ZEROFILL);");
    assert_eq!(err.location.line, 2);
    assert_eq!(err.found.unwrap().literal, "ZEROFILL");
}
