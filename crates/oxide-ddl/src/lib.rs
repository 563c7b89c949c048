//! Schema diffs for SQL DDL files.
//!
//! `oxide-ddl` is the command-line front end of [`oxide_ddl_core`]. Given
//! two DDL files it prints the script that migrates a database from the
//! first schema to the second:
//!
//! ```bash
//! # Print the migration script
//! oxide-ddl --dialect mysql diff old.sql new.sql
//!
//! # Print a file in canonical form
//! oxide-ddl fmt schema.sql
//!
//! # Print the parsed AST as JSON
//! oxide-ddl --dialect spanner dump schema.sql
//! ```
//!
//! A path of `-` reads standard input. The library half of the crate holds
//! the commands themselves so they can be tested without spawning the
//! binary.

pub mod error;

use std::io::Read;
use std::path::Path;

use oxide_ddl_core::ast::Ddl;
use oxide_ddl_core::dialect;
use oxide_ddl_core::trace::{NoopTrace, TraceSink, TracingSink};
use oxide_ddl_core::{Dialect, DiffResult, Differ, Parser, Printer};
use tracing::{debug, info};

pub use error::{CommandError, Result};

/// Path that stands for standard input.
pub const STDIN: &str = "-";

/// Runs commands for one dialect.
#[derive(Debug, Clone, Copy)]
pub struct Session {
    dialect: &'static dyn Dialect,
    trace: bool,
}

impl Session {
    /// Creates a session for the dialect called `name`.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError::UnknownDialect`] for an unknown name.
    pub fn new(name: &str) -> Result<Self> {
        let dialect =
            dialect::from_name(name).ok_or_else(|| CommandError::UnknownDialect(name.to_string()))?;
        Ok(Self {
            dialect,
            trace: false,
        })
    }

    /// Forwards parser and differ decisions to `tracing` at TRACE level.
    #[must_use]
    pub const fn with_trace(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }

    #[must_use]
    pub const fn dialect(&self) -> &'static dyn Dialect {
        self.dialect
    }

    const fn sink(&self) -> &'static dyn TraceSink {
        if self.trace {
            &TracingSink
        } else {
            &NoopTrace
        }
    }

    /// Parses `sql`, attributing errors to `path`.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError::Parse`] if `sql` is not valid DDL.
    pub fn parse(&self, path: &Path, sql: &str) -> Result<Ddl> {
        let ddl = Parser::new(sql, self.dialect)
            .with_trace(self.sink())
            .parse()
            .map_err(|source| CommandError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        debug!(
            path = %path.display(),
            dialect = self.dialect.name(),
            statements = ddl.stmts.len(),
            "Parsed"
        );
        Ok(ddl)
    }

    /// Reads and parses a file, or stdin for `-`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(&self, path: &Path) -> Result<Ddl> {
        let sql = read_input(path)?;
        self.parse(path, &sql)
    }

    /// Returns the script migrating `before` to `after` with `header`
    /// printed as comment lines on top, or `None` when the schemas are the
    /// same.
    ///
    /// # Errors
    ///
    /// Returns an error if an input cannot be read or parsed, or holds a
    /// statement the differ cannot handle.
    pub fn diff(&self, before: &Path, after: &Path, header: &[String]) -> Result<Option<String>> {
        if is_stdin(before) && is_stdin(after) {
            return Err(CommandError::StdinTwice);
        }
        let before = self.load(before)?;
        let after = self.load(after)?;
        self.diff_ddl(&before, &after, header)
    }

    /// Like [`Session::diff`], on documents that are already parsed.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError::Diff`] for statements the differ cannot
    /// handle.
    pub fn diff_ddl(&self, before: &Ddl, after: &Ddl, header: &[String]) -> Result<Option<String>> {
        let result = Differ::new(self.dialect)
            .with_trace(self.sink())
            .diff(Some(before), Some(after))?;
        match result {
            DiffResult::NoDifference => {
                info!("No difference");
                Ok(None)
            }
            DiffResult::Changed(mut script) => {
                debug!(statements = script.stmts.len(), "Migration script");
                script.header = header.to_vec();
                Ok(Some(Printer::new(self.dialect).ddl(&script)))
            }
        }
    }

    /// Prints a file in canonical form.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn fmt(&self, path: &Path) -> Result<String> {
        let ddl = self.load(path)?;
        Ok(Printer::new(self.dialect).ddl(&ddl))
    }

    /// Prints the AST of a file as pretty JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn dump(&self, path: &Path) -> Result<String> {
        let ddl = self.load(path)?;
        Ok(serde_json::to_string_pretty(&ddl)?)
    }
}

fn is_stdin(path: &Path) -> bool {
    path.as_os_str() == STDIN
}

/// Reads a whole file, or standard input for `-`.
///
/// # Errors
///
/// Returns [`CommandError::Io`] if the input cannot be read.
pub fn read_input(path: &Path) -> Result<String> {
    let io_error = |source| CommandError::Io {
        path: path.to_path_buf(),
        source,
    };
    if is_stdin(path) {
        let mut sql = String::new();
        std::io::stdin()
            .read_to_string(&mut sql)
            .map_err(io_error)?;
        Ok(sql)
    } else {
        std::fs::read_to_string(path).map_err(io_error)
    }
}
