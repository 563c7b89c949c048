//! # oxide-ddl-core
//!
//! Dialect-aware DDL tooling: a lexer, a recursive descent parser for
//! `CREATE TABLE` / `CREATE INDEX`, a typed AST, a deterministic printer,
//! and a structural differ that turns two schemas into a migration script.
//!
//! Four dialects are built in: `generic` (PostgreSQL-like), `cockroachdb`,
//! `mysql` and `spanner`. Each is a [`Dialect`] descriptor; the parser,
//! printer and differ are the same engine for all of them.
//!
//! ## Diffing two schemas
//!
//! ```rust
//! use oxide_ddl_core::dialect::GenericDialect;
//!
//! let script = oxide_ddl_core::diff_sql(
//!     &GenericDialect::new(),
//!     "CREATE TABLE t (id INT NOT NULL);",
//!     "CREATE TABLE t (id INT NOT NULL, name TEXT);",
//! )
//! .unwrap();
//!
//! assert_eq!(
//!     script.as_deref(),
//!     Some("-- +name TEXT\nALTER TABLE t ADD COLUMN name TEXT;\n")
//! );
//! ```
//!
//! ## Working with the AST
//!
//! ```rust
//! use oxide_ddl_core::ast::Stmt;
//! use oxide_ddl_core::dialect::MySqlDialect;
//! use oxide_ddl_core::Parser;
//!
//! let dialect = MySqlDialect::new();
//! let ddl = Parser::new("CREATE TABLE `users` (id INT AUTO_INCREMENT, PRIMARY KEY (id))", &dialect)
//!     .parse()
//!     .unwrap();
//!
//! let Stmt::CreateTable(table) = &ddl.stmts[0] else { panic!() };
//! assert!(table.columns[0].auto_increment);
//! assert_eq!(table.constraints[0].name().name, "users_pkey");
//! ```

pub mod ast;
pub mod dialect;
pub mod diff;
mod error;
pub mod lexer;
pub mod naming;
pub mod parser;
pub mod printer;
pub mod trace;

pub use dialect::Dialect;
pub use diff::{DiffError, DiffResult, Differ};
pub use error::{Error, Result};
pub use parser::{ParseError, Parser};
pub use printer::Printer;

use ast::Ddl;

/// Parses `sql` as a DDL document of `dialect`.
///
/// # Errors
///
/// Returns the parser's error for input that is not valid DDL.
pub fn parse(dialect: &dyn Dialect, sql: &str) -> core::result::Result<Ddl, ParseError> {
    Parser::new(sql, dialect).parse()
}

/// Parses two documents and returns the script migrating `before` to
/// `after`, or `None` when they describe the same schema.
///
/// # Errors
///
/// Returns an error if either input fails to parse or holds statements
/// the differ cannot handle.
pub fn diff_sql(dialect: &dyn Dialect, before: &str, after: &str) -> Result<Option<String>> {
    let before = parse(dialect, before)?;
    let after = parse(dialect, after)?;
    let result = Differ::new(dialect).diff(Some(&before), Some(&after))?;
    Ok(result.into_ddl().map(|ddl| ddl.to_sql(dialect)))
}
