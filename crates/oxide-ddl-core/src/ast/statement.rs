//! DDL statements.

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::{Column, ColumnIdent, Constraint, ConstraintKind, DataType, Expr, Identifier};
use super::{ObjectName, ReferentialAction};

/// Indentation used for table bodies unless a document says otherwise.
pub const DEFAULT_INDENT: &str = "    ";

/// A `NAME=value` option after a MySQL table body.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TableOption {
    /// Upper-case option name, possibly several words (`DEFAULT CHARSET`).
    pub name: String,
    pub value: Identifier,
}

/// Spanner `INTERLEAVE IN PARENT` clause.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Interleave {
    pub parent: ObjectName,
    pub on_delete: Option<ReferentialAction>,
}

impl Interleave {
    #[must_use]
    pub fn diff_form(&self) -> String {
        // NO ACTION is Spanner's default.
        match self.on_delete.filter(|a| *a != ReferentialAction::NoAction) {
            Some(action) => format!("{} ON DELETE {action}", self.parent.diff_form()),
            None => self.parent.diff_form(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CreateTable {
    /// Comment lines printed above the statement.
    pub comment: Vec<String>,
    pub if_not_exists: bool,
    pub name: ObjectName,
    pub columns: Vec<Column>,
    pub constraints: Vec<Constraint>,
    pub options: Vec<TableOption>,
    pub interleave: Option<Interleave>,
    /// Spanner `ROW DELETION POLICY (...)` contents.
    pub row_deletion_policy: Option<Expr>,
}

impl CreateTable {
    #[must_use]
    pub const fn new(name: ObjectName) -> Self {
        Self {
            comment: Vec::new(),
            if_not_exists: false,
            name,
            columns: Vec::new(),
            constraints: Vec::new(),
            options: Vec::new(),
            interleave: None,
            row_deletion_policy: None,
        }
    }

    /// Adds a constraint, replacing an existing one with the same name.
    pub fn add_constraint(&mut self, constraint: Constraint) {
        let name = constraint.name().name.clone();
        match self
            .constraints
            .iter_mut()
            .find(|existing| existing.name().name == name)
        {
            Some(existing) => *existing = constraint,
            None => self.constraints.push(constraint),
        }
    }

    #[must_use]
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name.name == name)
    }

    #[must_use]
    pub fn constraint(&self, name: &str) -> Option<&Constraint> {
        self.constraints.iter().find(|c| c.name().name == name)
    }

    #[must_use]
    pub fn primary_key(&self) -> Option<&Constraint> {
        self.constraints
            .iter()
            .find(|c| c.kind() == ConstraintKind::PrimaryKey)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DropTable {
    pub comment: Vec<String>,
    pub if_exists: bool,
    pub name: ObjectName,
}

/// A change to one column's definition.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AlterColumnAction {
    SetDataType {
        data_type: DataType,
        collate: Option<Identifier>,
    },
    SetDefault(Expr),
    DropDefault,
    SetNotNull,
    DropNotNull,
    /// Restates the whole column definition.
    Modify(Column),
    SetOptions(Expr),
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AlterTableAction {
    RenameTable(ObjectName),
    RenameColumn {
        from: Identifier,
        to: Identifier,
    },
    RenameConstraint {
        from: Identifier,
        to: Identifier,
    },
    AddColumn(Column),
    DropColumn(Identifier),
    AlterColumn {
        name: Identifier,
        action: AlterColumnAction,
    },
    AddConstraint(Constraint),
    DropConstraint {
        name: Identifier,
        kind: ConstraintKind,
    },
    AlterConstraint {
        name: Identifier,
        deferrable: bool,
        initially_deferred: bool,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AlterTable {
    pub comment: Vec<String>,
    pub name: ObjectName,
    pub action: AlterTableAction,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CreateIndex {
    pub comment: Vec<String>,
    pub unique: bool,
    /// Spanner `NULL_FILTERED`.
    pub null_filtered: bool,
    pub if_not_exists: bool,
    pub name: ObjectName,
    pub table: ObjectName,
    pub using: Option<Identifier>,
    pub columns: Vec<ColumnIdent>,
    /// Spanner `STORING (...)`.
    pub storing: Vec<Identifier>,
    /// Spanner `INTERLEAVE IN parent`.
    pub interleave_in: Option<ObjectName>,
    /// Partial index predicate.
    pub where_clause: Option<Expr>,
}

impl CreateIndex {
    #[must_use]
    pub const fn new(name: ObjectName, table: ObjectName, columns: Vec<ColumnIdent>) -> Self {
        Self {
            comment: Vec::new(),
            unique: false,
            null_filtered: false,
            if_not_exists: false,
            name,
            table,
            using: None,
            columns,
            storing: Vec::new(),
            interleave_in: None,
            where_clause: None,
        }
    }

    /// Comparison form of the whole index definition.
    #[must_use]
    pub fn diff_form(&self) -> String {
        let mut out = String::new();
        if self.unique {
            out.push_str("UNIQUE ");
        }
        if self.null_filtered {
            out.push_str("NULL_FILTERED ");
        }
        out.push_str(&format!(
            "INDEX {} ON {}",
            self.name.diff_form(),
            self.table.diff_form()
        ));
        if let Some(using) = &self.using {
            out.push_str(&format!(" USING {}", using.name.to_ascii_uppercase()));
        }
        out.push_str(&format!(
            " ({})",
            super::ident::column_list_diff_form(&self.columns)
        ));
        if !self.storing.is_empty() {
            let storing: Vec<&str> = self.storing.iter().map(|s| s.name.as_str()).collect();
            out.push_str(&format!(" STORING ({})", storing.join(", ")));
        }
        if let Some(parent) = &self.interleave_in {
            out.push_str(&format!(" INTERLEAVE IN {}", parent.diff_form()));
        }
        if let Some(predicate) = &self.where_clause {
            out.push_str(&format!(" WHERE {}", predicate.diff_form()));
        }
        out
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DropIndex {
    pub comment: Vec<String>,
    pub if_exists: bool,
    pub name: ObjectName,
    /// Owning table, for dialects that address indexes through it.
    pub table: Option<ObjectName>,
}

/// The kind of a statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum StatementKind {
    CreateTable,
    DropTable,
    AlterTable,
    CreateIndex,
    DropIndex,
}

impl StatementKind {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::CreateTable => "CREATE TABLE",
            Self::DropTable => "DROP TABLE",
            Self::AlterTable => "ALTER TABLE",
            Self::CreateIndex => "CREATE INDEX",
            Self::DropIndex => "DROP INDEX",
        }
    }
}

impl fmt::Display for StatementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A DDL statement.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Stmt {
    CreateTable(CreateTable),
    DropTable(DropTable),
    AlterTable(AlterTable),
    CreateIndex(CreateIndex),
    DropIndex(DropIndex),
}

impl Stmt {
    #[must_use]
    pub const fn kind(&self) -> StatementKind {
        match self {
            Self::CreateTable(_) => StatementKind::CreateTable,
            Self::DropTable(_) => StatementKind::DropTable,
            Self::AlterTable(_) => StatementKind::AlterTable,
            Self::CreateIndex(_) => StatementKind::CreateIndex,
            Self::DropIndex(_) => StatementKind::DropIndex,
        }
    }

    /// The name of the table or index the statement is about.
    #[must_use]
    pub const fn name(&self) -> &ObjectName {
        match self {
            Self::CreateTable(s) => &s.name,
            Self::DropTable(s) => &s.name,
            Self::AlterTable(s) => &s.name,
            Self::CreateIndex(s) => &s.name,
            Self::DropIndex(s) => &s.name,
        }
    }

    /// Comment lines printed above the statement.
    #[must_use]
    pub fn comment(&self) -> &[String] {
        match self {
            Self::CreateTable(s) => &s.comment,
            Self::DropTable(s) => &s.comment,
            Self::AlterTable(s) => &s.comment,
            Self::CreateIndex(s) => &s.comment,
            Self::DropIndex(s) => &s.comment,
        }
    }
}

/// An ordered list of statements plus printing metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Ddl {
    pub stmts: Vec<Stmt>,
    /// Comment lines printed at the top of the document.
    pub header: Vec<String>,
    /// Indentation of table body lines.
    pub indent: String,
}

impl Default for Ddl {
    fn default() -> Self {
        Self {
            stmts: Vec::new(),
            header: Vec::new(),
            indent: DEFAULT_INDENT.to_string(),
        }
    }
}

impl Ddl {
    /// Creates a document from statements with default printing metadata.
    #[must_use]
    pub fn new(stmts: Vec<Stmt>) -> Self {
        Self {
            stmts,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stmts.is_empty()
    }
}
