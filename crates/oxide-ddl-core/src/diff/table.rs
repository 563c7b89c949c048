//! Diff of two versions of one table.

use super::{changed_lines, Differ};
use crate::ast::{
    AlterColumnAction, AlterTable, AlterTableAction, Column, Constraint, CreateIndex, CreateTable,
    DropIndex, DropTable, Expr, Identifier, ObjectName, Stmt,
};
use crate::dialect::AlterColumnStyle;
use crate::naming;
use crate::printer::Printer;

/// Spanner's way of removing a column option.
const CLEARED_OPTIONS: [&str; 3] = ["allow_commit_timestamp", "=", "null"];

/// Constraints renamed along with their table: (old name, new name).
type Renames = Vec<(String, String)>;

impl Differ<'_> {
    /// Statements turning `before` into `after`, in emission order.
    pub(super) fn table_stmts(&self, before: &CreateTable, after: &CreateTable) -> Vec<Stmt> {
        let grammar = self.dialect.grammar();
        let printer = Printer::new(self.dialect);
        let subject = after.name.diff_form();

        if grammar.immutable_primary_key && !same_key_and_parent(before, after) {
            self.note(&subject, "recreate table");
            return vec![
                Stmt::DropTable(DropTable {
                    comment: changed_lines(
                        &printer.create_table(before),
                        &printer.create_table(after),
                    ),
                    if_exists: false,
                    name: before.name.clone(),
                }),
                Stmt::CreateTable(CreateTable {
                    comment: Vec::new(),
                    ..after.clone()
                }),
            ];
        }

        let table = after.name.clone();
        let alter = |action: AlterTableAction, comment: Vec<String>| {
            Stmt::AlterTable(AlterTable {
                comment,
                name: table.clone(),
                action,
            })
        };
        let mut stmts = Vec::new();

        // 1. rename
        let mut renames = Renames::new();
        if before.name.diff_form() != after.name.diff_form() {
            self.note(&subject, "rename table");
            stmts.push(Stmt::AlterTable(AlterTable {
                comment: vec![format!("-{}", before.name), format!("+{}", after.name)],
                name: before.name.clone(),
                action: AlterTableAction::RenameTable(after.name.clone()),
            }));
            if grammar.rename_constraint {
                for (from, to) in renamed_constraints(before, after) {
                    self.note(&subject, "rename constraint");
                    renames.push((from.name().name.clone(), to.name().name.clone()));
                    stmts.push(alter(
                        AlterTableAction::RenameConstraint {
                            from: from.name().clone(),
                            to: to.name().clone(),
                        },
                        vec![format!("-{}", from.name()), format!("+{}", to.name())],
                    ));
                }
            }
        }

        // 2. constraints that are gone
        for old in &before.constraints {
            let name = renamed_to(&renames, &old.name().name);
            if after.constraint(name).is_none() {
                self.note(&subject, "drop constraint");
                stmts.push(self.drop_constraint(&table, old));
            }
        }

        // 3. dropped and changed columns
        for old in &before.columns {
            match after.column(&old.name.name) {
                None => {
                    self.note(&subject, "drop column");
                    stmts.push(alter(
                        AlterTableAction::DropColumn(old.name.clone()),
                        vec![format!("-{}", printer.column(old))],
                    ));
                }
                Some(new) => {
                    let actions = self.alter_column(old, new);
                    if !actions.is_empty() {
                        self.note(&subject, "alter column");
                    }
                    let mut comment =
                        vec![format!("-{}", printer.column(old)), format!("+{}", printer.column(new))];
                    for action in actions {
                        stmts.push(alter(
                            AlterTableAction::AlterColumn {
                                name: new.name.clone(),
                                action,
                            },
                            std::mem::take(&mut comment),
                        ));
                    }
                }
            }
        }

        // 4. new columns
        for new in &after.columns {
            if before.column(&new.name.name).is_none() {
                self.note(&subject, "add column");
                stmts.push(alter(
                    AlterTableAction::AddColumn(new.clone()),
                    vec![format!("+{}", printer.column(new))],
                ));
            }
        }

        // 5. new and changed constraints
        for new in &after.constraints {
            if renames.iter().any(|(_, to)| *to == new.name().name) {
                continue;
            }
            match before.constraint(&new.name().name) {
                None => {
                    self.note(&subject, "add constraint");
                    stmts.push(self.add_constraint(&table, new));
                }
                Some(old) if old.diff_form() != new.diff_form() => {
                    self.note(&subject, "replace constraint");
                    stmts.push(self.drop_constraint(&table, old));
                    stmts.push(self.add_constraint(&table, new));
                }
                Some(_) => {}
            }
        }

        stmts
    }

    /// Actions that turn column `old` into `new`, per the dialect's style.
    fn alter_column(&self, old: &Column, new: &Column) -> Vec<AlterColumnAction> {
        let mut actions = Vec::new();
        let type_changed = old.data_type.diff_form() != new.data_type.diff_form();
        let default_changed = expr_form(old.default.as_ref()) != expr_form(new.default.as_ref());
        let default_action = || match &new.default {
            Some(expr) => AlterColumnAction::SetDefault(expr.clone()),
            None => AlterColumnAction::DropDefault,
        };

        match self.dialect.grammar().alter_column {
            AlterColumnStyle::Granular => {
                if type_changed || name_form(old.collate.as_ref()) != name_form(new.collate.as_ref())
                {
                    actions.push(AlterColumnAction::SetDataType {
                        data_type: new.data_type.clone(),
                        collate: new.collate.clone(),
                    });
                }
                if default_changed {
                    actions.push(default_action());
                }
                if old.not_null != new.not_null {
                    actions.push(if new.not_null {
                        AlterColumnAction::SetNotNull
                    } else {
                        AlterColumnAction::DropNotNull
                    });
                }
            }
            AlterColumnStyle::Modify => {
                let redefined = type_changed
                    || old.not_null != new.not_null
                    || name_form(old.collate.as_ref()) != name_form(new.collate.as_ref())
                    || name_form(old.charset.as_ref()) != name_form(new.charset.as_ref())
                    || old.auto_increment != new.auto_increment
                    || expr_form(old.on_update.as_ref()) != expr_form(new.on_update.as_ref())
                    || name_form(old.comment.as_ref()) != name_form(new.comment.as_ref());
                if redefined {
                    actions.push(AlterColumnAction::Modify(new.clone()));
                } else if default_changed {
                    actions.push(default_action());
                }
            }
            AlterColumnStyle::Redefine => {
                if type_changed || old.not_null != new.not_null {
                    actions.push(AlterColumnAction::Modify(new.clone()));
                }
                if default_changed {
                    actions.push(default_action());
                }
                if expr_form(old.options.as_ref()) != expr_form(new.options.as_ref()) {
                    let options = new.options.clone().unwrap_or_else(|| {
                        Expr::new(CLEARED_OPTIONS.iter().map(|a| Identifier::new(*a)).collect())
                    });
                    actions.push(AlterColumnAction::SetOptions(options));
                }
            }
        }
        actions
    }

    fn drop_constraint(&self, table: &ObjectName, constraint: &Constraint) -> Stmt {
        let comment = vec![format!(
            "-{}",
            Printer::new(self.dialect).constraint(constraint)
        )];
        match constraint {
            Constraint::Index(idx) => Stmt::DropIndex(DropIndex {
                comment,
                if_exists: false,
                name: ObjectName::new(idx.name.clone()),
                table: Some(table.clone()),
            }),
            other => Stmt::AlterTable(AlterTable {
                comment,
                name: table.clone(),
                action: AlterTableAction::DropConstraint {
                    name: other.name().clone(),
                    kind: other.kind(),
                },
            }),
        }
    }

    fn add_constraint(&self, table: &ObjectName, constraint: &Constraint) -> Stmt {
        let comment = vec![format!(
            "+{}",
            Printer::new(self.dialect).constraint(constraint)
        )];
        match constraint {
            Constraint::Index(idx) => {
                let mut index = CreateIndex::new(
                    ObjectName::new(idx.name.clone()),
                    table.clone(),
                    idx.columns.clone(),
                );
                index.comment = comment;
                index.unique = idx.unique;
                index.using.clone_from(&idx.using);
                Stmt::CreateIndex(index)
            }
            other => Stmt::AlterTable(AlterTable {
                comment,
                name: table.clone(),
                action: AlterTableAction::AddConstraint(other.clone()),
            }),
        }
    }
}

fn same_key_and_parent(before: &CreateTable, after: &CreateTable) -> bool {
    let key = |t: &CreateTable| t.primary_key().map(Constraint::body_diff_form);
    let parent = |t: &CreateTable| t.interleave.as_ref().map(crate::ast::Interleave::diff_form);
    key(before) == key(after) && parent(before) == parent(after)
}

/// Pairs of constraints whose names follow the table name through a
/// rename and whose bodies are unchanged. Plain indexes are left to the
/// drop and create path.
fn renamed_constraints<'t>(
    before: &'t CreateTable,
    after: &'t CreateTable,
) -> Vec<(&'t Constraint, &'t Constraint)> {
    let old_table = &before.name.name.name;
    let new_table = &after.name.name.name;
    before
        .constraints
        .iter()
        .filter(|old| !matches!(old, Constraint::Index(idx) if !idx.unique))
        .filter_map(|old| {
            let name = naming::renamed(&old.name().name, old_table, new_table)?;
            let new = after.constraint(&name)?;
            let untouched = after.constraint(&old.name().name).is_none()
                && before.constraint(&name).is_none()
                && old.kind() == new.kind()
                && old.body_diff_form() == new.body_diff_form();
            untouched.then_some((old, new))
        })
        .collect()
}

fn renamed_to<'n>(renames: &'n Renames, name: &'n str) -> &'n str {
    renames
        .iter()
        .find(|(from, _)| from == name)
        .map_or(name, |(_, to)| to.as_str())
}

fn expr_form(expr: Option<&Expr>) -> Option<String> {
    expr.map(Expr::diff_form)
}

fn name_form(ident: Option<&Identifier>) -> Option<&str> {
    ident.map(|i| i.name.as_str())
}
