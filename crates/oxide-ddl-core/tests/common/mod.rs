#![allow(dead_code)]

use oxide_ddl_core::ast::{
    AlterColumnAction, AlterTableAction, Column, Constraint, ConstraintKind, CreateIndex,
    CreateTable, Ddl, DropIndex, Identifier, IndexConstraint, ObjectName, Stmt,
};
use oxide_ddl_core::dialect::{self, Dialect};
use oxide_ddl_core::{DiffResult, Differ, ParseError, Parser, Printer};

pub fn dialect(name: &str) -> &'static dyn Dialect {
    dialect::from_name(name).unwrap_or_else(|| panic!("Unknown dialect: {name}"))
}

pub fn parse(name: &str, sql: &str) -> Ddl {
    Parser::new(sql, dialect(name))
        .parse()
        .unwrap_or_else(|e| panic!("Failed to parse: {sql}\nError: {e}"))
}

pub fn parse_err(name: &str, sql: &str) -> ParseError {
    Parser::new(sql, dialect(name))
        .parse()
        .expect_err(&format!("Expected parse error for: {sql}"))
}

pub fn parse_table(name: &str, sql: &str) -> CreateTable {
    match parse(name, sql).stmts.as_slice() {
        [Stmt::CreateTable(table)] => table.clone(),
        other => panic!("Expected one CREATE TABLE, got {other:?}"),
    }
}

pub fn parse_index(name: &str, sql: &str) -> CreateIndex {
    match parse(name, sql).stmts.as_slice() {
        [Stmt::CreateIndex(index)] => index.clone(),
        other => panic!("Expected one CREATE INDEX, got {other:?}"),
    }
}

pub fn print(name: &str, ddl: &Ddl) -> String {
    Printer::new(dialect(name)).ddl(ddl)
}

/// Verifies that printing is a fixed point and that the reparsed
/// document does not differ from the original.
pub fn round_trip(name: &str, sql: &str) -> String {
    let first = parse(name, sql);
    let printed = print(name, &first);
    let second = parse(name, &printed);
    let reprinted = print(name, &second);
    assert_eq!(
        printed, reprinted,
        "Round-trip failed.\n  Input:    {sql}\n  First:    {printed}\n  Second:   {reprinted}"
    );
    let diff = Differ::new(dialect(name))
        .diff(Some(&first), Some(&second))
        .unwrap();
    assert!(diff.is_no_difference(), "Reparsed schema differs: {diff:?}");
    printed
}

/// Diffs two documents and returns the printed script, or `None` when
/// there is no difference.
pub fn diff(name: &str, before: &str, after: &str) -> Option<String> {
    let before = parse(name, before);
    let after = parse(name, after);
    Differ::new(dialect(name))
        .diff(Some(&before), Some(&after))
        .unwrap()
        .into_ddl()
        .map(|ddl| print(name, &ddl))
}

/// Diffs two documents and returns each emitted statement printed
/// without its comment lines.
pub fn diff_stmts(name: &str, before: &str, after: &str) -> Vec<String> {
    let before = parse(name, before);
    let after = parse(name, after);
    let result = Differ::new(dialect(name))
        .diff(Some(&before), Some(&after))
        .unwrap();
    stmts_of(name, &result)
}

pub fn stmts_of(name: &str, result: &DiffResult) -> Vec<String> {
    let printer = Printer::new(dialect(name));
    result
        .ddl()
        .map(|ddl| {
            ddl.stmts
                .iter()
                .map(|stmt| {
                    printer
                        .stmt(stmt)
                        .lines()
                        .filter(|line| !line.starts_with(dialect(name).comment_marker()))
                        .collect::<Vec<_>>()
                        .join("\n")
                })
                .collect()
        })
        .unwrap_or_default()
}

// =============================================================================
// SCRIPT APPLICATION
// =============================================================================

/// Runs a migration script against a schema the way a database would and
/// returns the resulting schema.
pub fn apply(before: &Ddl, script: &Ddl) -> Ddl {
    let mut ddl = before.clone();
    for stmt in &script.stmts {
        match stmt {
            Stmt::CreateTable(_) | Stmt::CreateIndex(_) => ddl.stmts.push(stmt.clone()),
            Stmt::DropTable(drop) => {
                let name = drop.name.diff_form();
                ddl.stmts.retain(
                    |s| !matches!(s, Stmt::CreateTable(t) if t.name.diff_form() == name),
                );
            }
            Stmt::DropIndex(drop) => drop_index(&mut ddl, drop),
            Stmt::AlterTable(alter) => alter_table(table_mut(&mut ddl, &alter.name), &alter.action),
        }
    }
    ddl
}

/// Moves plain standalone indexes into their table's constraint list, so
/// `CREATE INDEX i ON t (a)` and an `INDEX i (a)` inside `t` compare equal.
pub fn fold_indexes(ddl: &Ddl) -> Ddl {
    let mut folded = Ddl {
        stmts: Vec::new(),
        ..ddl.clone()
    };
    let mut indexes = Vec::new();
    for stmt in &ddl.stmts {
        match stmt {
            Stmt::CreateIndex(index) if is_plain(index) => indexes.push(index.clone()),
            other => folded.stmts.push(other.clone()),
        }
    }
    for index in indexes {
        table_mut(&mut folded, &index.table).add_constraint(Constraint::Index(IndexConstraint {
            name: index.name.name.clone(),
            unique: index.unique,
            columns: index.columns.clone(),
            using: index.using.clone(),
        }));
    }
    folded
}

fn is_plain(index: &CreateIndex) -> bool {
    !index.null_filtered
        && index.storing.is_empty()
        && index.interleave_in.is_none()
        && index.where_clause.is_none()
}

fn table_mut<'d>(ddl: &'d mut Ddl, name: &ObjectName) -> &'d mut CreateTable {
    let name = name.diff_form();
    ddl.stmts
        .iter_mut()
        .find_map(|stmt| match stmt {
            Stmt::CreateTable(table) if table.name.diff_form() == name => Some(table),
            _ => None,
        })
        .unwrap_or_else(|| panic!("No table {name}"))
}

fn column_mut<'t>(table: &'t mut CreateTable, name: &Identifier) -> &'t mut Column {
    table
        .columns
        .iter_mut()
        .find(|column| column.name.name == name.name)
        .unwrap_or_else(|| panic!("No column {}", name.name))
}

fn drop_index(ddl: &mut Ddl, drop: &DropIndex) {
    let name = drop.name.diff_form();
    let table = drop.table.as_ref().map(ObjectName::diff_form);
    let count = ddl.stmts.len();
    ddl.stmts.retain(|stmt| match stmt {
        Stmt::CreateIndex(index) => {
            index.name.diff_form() != name
                || table.as_ref().is_some_and(|t| *t != index.table.diff_form())
        }
        _ => true,
    });
    if ddl.stmts.len() == count {
        let table = drop
            .table
            .as_ref()
            .unwrap_or_else(|| panic!("No index {name}"));
        table_mut(ddl, table)
            .constraints
            .retain(|constraint| constraint.name().name != name);
    }
}

fn alter_table(table: &mut CreateTable, action: &AlterTableAction) {
    match action {
        AlterTableAction::RenameTable(to) => table.name = to.clone(),
        AlterTableAction::RenameColumn { from, to } => column_mut(table, from).name = to.clone(),
        AlterTableAction::RenameConstraint { from, to } => {
            if let Some(constraint) = table
                .constraints
                .iter_mut()
                .find(|c| c.name().name == from.name)
            {
                constraint.set_name(to.clone());
            }
        }
        AlterTableAction::AddColumn(column) => table.columns.push(column.clone()),
        AlterTableAction::DropColumn(name) => table.columns.retain(|c| c.name.name != name.name),
        AlterTableAction::AlterColumn { name, action } => {
            let column = column_mut(table, name);
            match action {
                AlterColumnAction::SetDataType { data_type, collate } => {
                    column.data_type = data_type.clone();
                    column.collate = collate.clone();
                }
                AlterColumnAction::SetDefault(expr) => column.default = Some(expr.clone()),
                AlterColumnAction::DropDefault => column.default = None,
                AlterColumnAction::SetNotNull => column.not_null = true,
                AlterColumnAction::DropNotNull => column.not_null = false,
                AlterColumnAction::Modify(new) => *column = new.clone(),
                AlterColumnAction::SetOptions(options) => column.options = Some(options.clone()),
            }
        }
        AlterTableAction::AddConstraint(constraint) => table.add_constraint(constraint.clone()),
        AlterTableAction::DropConstraint { name, kind } => table.constraints.retain(|c| {
            if *kind == ConstraintKind::PrimaryKey {
                c.kind() != ConstraintKind::PrimaryKey
            } else {
                c.name().name != name.name
            }
        }),
        AlterTableAction::AlterConstraint { .. } => {}
    }
}
