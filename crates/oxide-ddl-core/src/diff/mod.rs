//! Structural diff of two DDL documents.
//!
//! Compares a "before" and an "after" [`Ddl`] and produces a migration
//! script: a new `Ddl` whose statements, run top to bottom against a
//! database in the "before" state, leave it in the "after" state.
//!
//! Output order is fixed:
//!
//! 1. statements only in `before` are dropped,
//! 2. then, in `after` order, new statements are created and matched
//!    pairs are diffed (tables by [`Differ::diff_create_table`], indexes
//!    by dropping and recreating them).

mod lines;
mod table;

use thiserror::Error;

use crate::ast::{
    CreateIndex, CreateTable, Ddl, DropIndex, DropTable, StatementKind, Stmt, DEFAULT_INDENT,
};
use crate::dialect::{Dialect, DropIndexStyle};
use crate::printer::Printer;
use crate::trace::{TraceEvent, TraceSink, NOOP};

pub use lines::changed_lines;

/// Outcome of a diff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiffResult {
    /// The two documents describe the same schema.
    NoDifference,
    /// The migration script.
    Changed(Ddl),
}

impl DiffResult {
    #[must_use]
    pub const fn is_no_difference(&self) -> bool {
        matches!(self, Self::NoDifference)
    }

    /// Returns the migration script, if there is one.
    #[must_use]
    pub const fn ddl(&self) -> Option<&Ddl> {
        match self {
            Self::NoDifference => None,
            Self::Changed(ddl) => Some(ddl),
        }
    }

    #[must_use]
    pub fn into_ddl(self) -> Option<Ddl> {
        match self {
            Self::NoDifference => None,
            Self::Changed(ddl) => Some(ddl),
        }
    }
}

/// Errors that can occur while diffing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiffError {
    /// A statement the differ has no rule for.
    #[error("cannot diff {kind} statement for {name}")]
    Unsupported { name: String, kind: StatementKind },
}

/// Computes migrations between DDL documents of one dialect.
#[derive(Debug, Clone, Copy)]
pub struct Differ<'a> {
    dialect: &'a dyn Dialect,
    trace: &'a dyn TraceSink,
}

impl<'a> Differ<'a> {
    #[must_use]
    pub fn new(dialect: &'a dyn Dialect) -> Self {
        Self {
            dialect,
            trace: &NOOP,
        }
    }

    /// Reports every decision to `trace`.
    #[must_use]
    pub fn with_trace(mut self, trace: &'a dyn TraceSink) -> Self {
        self.trace = trace;
        self
    }

    /// Diffs two optional documents; an absent document means an empty
    /// schema.
    ///
    /// # Errors
    ///
    /// Returns [`DiffError::Unsupported`] if either document holds a
    /// statement other than `CREATE TABLE` or `CREATE INDEX`.
    pub fn diff(
        &self,
        before: Option<&Ddl>,
        after: Option<&Ddl>,
    ) -> Result<DiffResult, DiffError> {
        let printer = Printer::new(self.dialect);
        match (before, after) {
            (None, None) => Ok(DiffResult::NoDifference),
            (Some(before), Some(after)) if printer.ddl(before) == printer.ddl(after) => {
                Ok(DiffResult::NoDifference)
            }
            (None, Some(after)) => {
                self.note("*", "create everything");
                Ok(finish(after.stmts.clone(), &after.indent))
            }
            (Some(before), None) => {
                self.note("*", "drop everything");
                let stmts = before
                    .stmts
                    .iter()
                    .map(|stmt| self.drop_stmt(stmt))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(finish(stmts, &before.indent))
            }
            (Some(before), Some(after)) => self.diff_documents(before, after),
        }
    }

    fn diff_documents(&self, before: &Ddl, after: &Ddl) -> Result<DiffResult, DiffError> {
        for stmt in before.stmts.iter().chain(&after.stmts) {
            supported(stmt)?;
        }

        let mut stmts = Vec::new();
        for old in &before.stmts {
            if !after.stmts.iter().any(|new| self.same_object(old, new)) {
                stmts.push(self.drop_stmt(old)?);
            }
        }

        for new in &after.stmts {
            match before.stmts.iter().find(|old| self.same_object(old, new)) {
                None => {
                    self.note(&new.name().diff_form(), "create");
                    stmts.push(without_comment(new));
                }
                Some(Stmt::CreateTable(old)) => {
                    if let Stmt::CreateTable(new) = new {
                        stmts.extend(self.table_stmts(old, new));
                    }
                }
                Some(Stmt::CreateIndex(old)) => {
                    if let Stmt::CreateIndex(new) = new {
                        stmts.extend(self.index_stmts(old, new));
                    }
                }
                Some(other) => return Err(unsupported(other)),
            }
        }

        Ok(finish(stmts, &after.indent))
    }

    /// Diffs two versions of one table.
    ///
    /// The table may have been renamed; every statement after the rename
    /// addresses the new name.
    #[must_use]
    pub fn diff_create_table(&self, before: &CreateTable, after: &CreateTable) -> DiffResult {
        finish(self.table_stmts(before, after), DEFAULT_INDENT)
    }

    fn index_stmts(&self, before: &CreateIndex, after: &CreateIndex) -> Vec<Stmt> {
        if before.diff_form() == after.diff_form() {
            return Vec::new();
        }
        self.note(&after.name.diff_form(), "recreate index");
        let printer = Printer::new(self.dialect);
        vec![
            Stmt::DropIndex(DropIndex {
                comment: changed_lines(
                    &printer.create_index(before),
                    &printer.create_index(after),
                ),
                if_exists: false,
                name: before.name.clone(),
                table: Some(before.table.clone()),
            }),
            Stmt::CreateIndex(CreateIndex {
                comment: Vec::new(),
                ..after.clone()
            }),
        ]
    }

    fn drop_stmt(&self, stmt: &Stmt) -> Result<Stmt, DiffError> {
        self.note(&stmt.name().diff_form(), "drop");
        match stmt {
            Stmt::CreateTable(table) => Ok(Stmt::DropTable(DropTable {
                comment: Vec::new(),
                if_exists: false,
                name: table.name.clone(),
            })),
            Stmt::CreateIndex(index) => Ok(Stmt::DropIndex(DropIndex {
                comment: Vec::new(),
                if_exists: false,
                name: index.name.clone(),
                table: Some(index.table.clone()),
            })),
            other => Err(unsupported(other)),
        }
    }

    /// Statements describe the same object when kind and name match. Index
    /// names are scoped per table where `DROP INDEX` addresses the table.
    fn same_object(&self, a: &Stmt, b: &Stmt) -> bool {
        if a.kind() != b.kind() || a.name().diff_form() != b.name().diff_form() {
            return false;
        }
        match (a, b) {
            (Stmt::CreateIndex(a), Stmt::CreateIndex(b))
                if self.dialect.format_rules().drop_index != DropIndexStyle::Plain =>
            {
                a.table.diff_form() == b.table.diff_form()
            }
            _ => true,
        }
    }

    fn note(&self, subject: &str, change: &str) {
        self.trace.event(&TraceEvent::Diff { subject, change });
    }
}

fn finish(stmts: Vec<Stmt>, indent: &str) -> DiffResult {
    if stmts.is_empty() {
        return DiffResult::NoDifference;
    }
    DiffResult::Changed(Ddl {
        stmts,
        header: Vec::new(),
        indent: indent.to_string(),
    })
}

fn supported(stmt: &Stmt) -> Result<(), DiffError> {
    match stmt {
        Stmt::CreateTable(_) | Stmt::CreateIndex(_) => Ok(()),
        other => Err(unsupported(other)),
    }
}

fn unsupported(stmt: &Stmt) -> DiffError {
    DiffError::Unsupported {
        name: stmt.name().to_string(),
        kind: stmt.kind(),
    }
}

fn without_comment(stmt: &Stmt) -> Stmt {
    let mut stmt = stmt.clone();
    match &mut stmt {
        Stmt::CreateTable(s) => s.comment.clear(),
        Stmt::DropTable(s) => s.comment.clear(),
        Stmt::AlterTable(s) => s.comment.clear(),
        Stmt::CreateIndex(s) => s.comment.clear(),
        Stmt::DropIndex(s) => s.comment.clear(),
    }
    stmt
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Identifier, ObjectName};
    use crate::dialect::GenericDialect;
    use crate::trace::TraceLog;

    fn drop_table(name: &str) -> Stmt {
        Stmt::DropTable(DropTable {
            comment: Vec::new(),
            if_exists: false,
            name: ObjectName::new(Identifier::new(name)),
        })
    }

    #[test]
    fn test_absent_documents() {
        let dialect = GenericDialect::new();
        let differ = Differ::new(&dialect);
        assert!(differ.diff(None, None).unwrap().is_no_difference());
        let empty = Ddl::default();
        assert!(differ
            .diff(Some(&empty), Some(&empty))
            .unwrap()
            .is_no_difference());
        assert!(differ.diff(None, Some(&empty)).unwrap().is_no_difference());
    }

    #[test]
    fn test_unsupported_statement() {
        let dialect = GenericDialect::new();
        let before = Ddl::new(vec![drop_table("t")]);
        let err = Differ::new(&dialect).diff(Some(&before), None).unwrap_err();
        assert_eq!(
            err,
            DiffError::Unsupported {
                name: "t".to_string(),
                kind: StatementKind::DropTable,
            }
        );
        assert_eq!(err.to_string(), "cannot diff DROP TABLE statement for t");
    }

    #[test]
    fn test_trace_reports_decisions() {
        let dialect = GenericDialect::new();
        let log = TraceLog::new();
        let before = Ddl::new(vec![Stmt::CreateTable(CreateTable::new(ObjectName::new(
            Identifier::new("t"),
        )))]);
        Differ::new(&dialect)
            .with_trace(&log)
            .diff(Some(&before), None)
            .unwrap();
        assert_eq!(log.events(), vec!["*: drop everything", "t: drop"]);
    }
}
