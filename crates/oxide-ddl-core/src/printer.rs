//! Rendering of DDL documents to dialect-correct SQL text.
//!
//! The output is a pure function of the AST and the dialect: the differ
//! compares printed documents to decide whether anything changed at all.

use crate::ast::{
    column_list, AlterColumnAction, AlterTable, AlterTableAction, Column, Constraint,
    ConstraintKind, CreateIndex, CreateTable, DataType, Ddl, DropIndex, DropTable, Expr,
    ForeignKey, Identifier, IndexConstraint, Stmt, DEFAULT_INDENT,
};
use crate::dialect::{AlterColumnStyle, ConstraintStyle, Dialect, DropIndexStyle};

/// Prints statements for one dialect.
#[derive(Debug, Clone)]
pub struct Printer<'d> {
    dialect: &'d dyn Dialect,
    indent: String,
}

impl<'d> Printer<'d> {
    /// Creates a printer using the default indentation.
    #[must_use]
    pub fn new(dialect: &'d dyn Dialect) -> Self {
        Self {
            dialect,
            indent: DEFAULT_INDENT.to_string(),
        }
    }

    /// Sets the indentation of table body lines.
    #[must_use]
    pub fn with_indent(mut self, indent: impl Into<String>) -> Self {
        self.indent = indent.into();
        self
    }

    /// Prints a whole document: header comment lines, a blank line, then
    /// the statements separated by blank lines. Uses the document's own
    /// indentation.
    #[must_use]
    pub fn ddl(&self, ddl: &Ddl) -> String {
        let printer = Self {
            dialect: self.dialect,
            indent: ddl.indent.clone(),
        };

        let mut sql = String::new();
        for line in &ddl.header {
            sql.push_str(&self.comment_line(line));
        }
        if !ddl.header.is_empty() && !ddl.stmts.is_empty() {
            sql.push('\n');
        }
        let blocks: Vec<String> = ddl.stmts.iter().map(|s| printer.stmt(s)).collect();
        sql.push_str(&blocks.join("\n"));
        sql
    }

    /// Prints one statement with its comment lines and a terminating `;`.
    #[must_use]
    pub fn stmt(&self, stmt: &Stmt) -> String {
        let mut sql: String = stmt
            .comment()
            .iter()
            .map(|line| self.comment_line(line))
            .collect();
        let body = match stmt {
            Stmt::CreateTable(s) => self.create_table(s),
            Stmt::DropTable(s) => self.drop_table(s),
            Stmt::AlterTable(s) => self.alter_table(s),
            Stmt::CreateIndex(s) => self.create_index(s),
            Stmt::DropIndex(s) => self.drop_index(s),
        };
        sql.push_str(&body);
        sql.push_str(";\n");
        sql
    }

    fn comment_line(&self, line: &str) -> String {
        let marker = self.dialect.comment_marker();
        if line.is_empty() {
            format!("{marker}\n")
        } else {
            format!("{marker} {line}\n")
        }
    }

    /// `CREATE TABLE` without the trailing `;`.
    #[must_use]
    pub fn create_table(&self, table: &CreateTable) -> String {
        let grammar = self.dialect.grammar();
        let mut sql = String::from("CREATE TABLE ");
        if table.if_not_exists {
            sql.push_str("IF NOT EXISTS ");
        }
        sql.push_str(&table.name.to_string());

        let mut lines: Vec<String> = table
            .columns
            .iter()
            .map(|c| format!("{}{}", self.indent, self.column(c)))
            .collect();
        for constraint in &table.constraints {
            if grammar.trailing_primary_key && constraint.kind() == ConstraintKind::PrimaryKey {
                continue;
            }
            lines.push(format!("{}{}", self.indent, self.constraint(constraint)));
        }
        if lines.is_empty() {
            sql.push_str(" ()");
        } else {
            sql.push_str(" (\n");
            sql.push_str(&lines.join(",\n"));
            sql.push_str("\n)");
        }

        if grammar.trailing_primary_key {
            if let Some(Constraint::PrimaryKey(pk)) = table.primary_key() {
                sql.push_str(&format!(" PRIMARY KEY ({})", column_list(&pk.columns)));
            }
        }
        if let Some(interleave) = &table.interleave {
            sql.push_str(&format!(",\nINTERLEAVE IN PARENT {}", interleave.parent));
            if let Some(action) = interleave.on_delete {
                sql.push_str(&format!(" ON DELETE {action}"));
            }
        }
        if let Some(policy) = &table.row_deletion_policy {
            sql.push_str(&format!(",\nROW DELETION POLICY ({})", self.expr(policy)));
        }
        for option in &table.options {
            sql.push_str(&format!(" {}={}", option.name, option.value));
        }
        sql
    }

    /// A column definition as it appears in `CREATE TABLE` and `ADD COLUMN`.
    #[must_use]
    pub fn column(&self, column: &Column) -> String {
        let mut sql = format!("{} {}", column.name, self.data_type(&column.data_type));
        if let Some(charset) = &column.charset {
            sql.push_str(&format!(" CHARACTER SET {charset}"));
        }
        if let Some(collate) = &column.collate {
            sql.push_str(&format!(" COLLATE {collate}"));
        }
        if column.not_null {
            sql.push_str(" NOT NULL");
        }
        if let Some(default) = &column.default {
            sql.push_str(" DEFAULT ");
            sql.push_str(&self.default_value(default));
        }
        if column.auto_increment {
            sql.push_str(" AUTO_INCREMENT");
        }
        if let Some(on_update) = &column.on_update {
            sql.push_str(&format!(" ON UPDATE {}", self.expr(on_update)));
        }
        if let Some(comment) = &column.comment {
            sql.push_str(&format!(" COMMENT {comment}"));
        }
        if let Some(options) = &column.options {
            sql.push_str(&format!(" OPTIONS ({})", self.expr(options)));
        }
        sql
    }

    #[must_use]
    pub fn data_type(&self, data_type: &DataType) -> String {
        data_type.render(self.dialect.format_rules().tight_operators)
    }

    #[must_use]
    pub fn expr(&self, expr: &Expr) -> String {
        expr.render(self.dialect.format_rules().tight_operators)
    }

    fn default_value(&self, expr: &Expr) -> String {
        if self.dialect.grammar().parenthesized_default {
            format!("({})", self.expr(expr))
        } else {
            self.expr(expr)
        }
    }

    /// A constraint as it appears inside `CREATE TABLE` and after
    /// `ALTER TABLE ... ADD`.
    #[must_use]
    pub fn constraint(&self, constraint: &Constraint) -> String {
        let keyed = self.dialect.format_rules().constraint_style == ConstraintStyle::Keyed;
        match constraint {
            Constraint::PrimaryKey(pk) if keyed => {
                format!("PRIMARY KEY ({})", column_list(&pk.columns))
            }
            Constraint::PrimaryKey(pk) => format!(
                "CONSTRAINT {} PRIMARY KEY ({})",
                pk.name,
                column_list(&pk.columns)
            ),
            Constraint::ForeignKey(fk) => {
                format!("CONSTRAINT {} {}", fk.name, self.foreign_key(fk))
            }
            Constraint::Index(idx) => self.index_constraint(idx, keyed),
            Constraint::Check(check) => {
                format!("CONSTRAINT {} CHECK ({})", check.name, self.expr(&check.expr))
            }
        }
    }

    fn foreign_key(&self, fk: &ForeignKey) -> String {
        let mut sql = format!(
            "FOREIGN KEY ({}) REFERENCES {}",
            column_list(&fk.columns),
            fk.ref_table
        );
        if !fk.ref_columns.is_empty() {
            sql.push_str(&format!(" ({})", column_list(&fk.ref_columns)));
        }
        if let Some(action) = fk.on_delete {
            sql.push_str(&format!(" ON DELETE {action}"));
        }
        if let Some(action) = fk.on_update {
            sql.push_str(&format!(" ON UPDATE {action}"));
        }
        sql
    }

    fn index_constraint(&self, idx: &IndexConstraint, keyed: bool) -> String {
        let mut sql = match (keyed, idx.unique) {
            (true, true) => format!("UNIQUE KEY {} ({})", idx.name, column_list(&idx.columns)),
            (true, false) => format!("KEY {} ({})", idx.name, column_list(&idx.columns)),
            (false, true) => format!(
                "CONSTRAINT {} UNIQUE ({})",
                idx.name,
                column_list(&idx.columns)
            ),
            (false, false) => format!("INDEX {} ({})", idx.name, column_list(&idx.columns)),
        };
        if let Some(using) = &idx.using {
            sql.push_str(&format!(" USING {using}"));
        }
        sql
    }

    #[must_use]
    pub fn drop_table(&self, drop: &DropTable) -> String {
        let mut sql = String::from("DROP TABLE ");
        if drop.if_exists {
            sql.push_str("IF EXISTS ");
        }
        sql.push_str(&drop.name.to_string());
        sql
    }

    #[must_use]
    pub fn alter_table(&self, alter: &AlterTable) -> String {
        let rules = self.dialect.format_rules();
        let action = match &alter.action {
            AlterTableAction::RenameTable(to) => format!("RENAME TO {to}"),
            AlterTableAction::RenameColumn { from, to } => {
                format!("RENAME COLUMN {from} TO {to}")
            }
            AlterTableAction::RenameConstraint { from, to } => {
                if rules.constraint_style == ConstraintStyle::Keyed {
                    format!("RENAME INDEX {from} TO {to}")
                } else {
                    format!("RENAME CONSTRAINT {from} TO {to}")
                }
            }
            AlterTableAction::AddColumn(column) => format!("ADD COLUMN {}", self.column(column)),
            AlterTableAction::DropColumn(name) => format!("DROP COLUMN {name}"),
            AlterTableAction::AlterColumn { name, action } => self.alter_column(name, action),
            AlterTableAction::AddConstraint(constraint) => {
                format!("ADD {}", self.constraint(constraint))
            }
            AlterTableAction::DropConstraint { name, kind } if rules.drop_constraint_by_kind => {
                match kind {
                    ConstraintKind::PrimaryKey => "DROP PRIMARY KEY".to_string(),
                    ConstraintKind::ForeignKey => format!("DROP FOREIGN KEY {name}"),
                    ConstraintKind::Index => format!("DROP INDEX {name}"),
                    ConstraintKind::Check => format!("DROP CHECK {name}"),
                }
            }
            AlterTableAction::DropConstraint { name, .. } => format!("DROP CONSTRAINT {name}"),
            AlterTableAction::AlterConstraint {
                name,
                deferrable,
                initially_deferred,
            } => format!(
                "ALTER CONSTRAINT {name} {} INITIALLY {}",
                if *deferrable { "DEFERRABLE" } else { "NOT DEFERRABLE" },
                if *initially_deferred { "DEFERRED" } else { "IMMEDIATE" }
            ),
        };
        format!("ALTER TABLE {} {action}", alter.name)
    }

    fn alter_column(&self, name: &Identifier, action: &AlterColumnAction) -> String {
        match action {
            AlterColumnAction::SetDataType { data_type, collate } => {
                let mut sql = format!(
                    "ALTER COLUMN {name} SET DATA TYPE {}",
                    self.data_type(data_type)
                );
                if let Some(collate) = collate {
                    sql.push_str(&format!(" COLLATE {collate}"));
                }
                sql
            }
            AlterColumnAction::SetDefault(expr) => {
                format!("ALTER COLUMN {name} SET DEFAULT {}", self.default_value(expr))
            }
            AlterColumnAction::DropDefault => format!("ALTER COLUMN {name} DROP DEFAULT"),
            AlterColumnAction::SetNotNull => format!("ALTER COLUMN {name} SET NOT NULL"),
            AlterColumnAction::DropNotNull => format!("ALTER COLUMN {name} DROP NOT NULL"),
            AlterColumnAction::Modify(column) => match self.dialect.grammar().alter_column {
                AlterColumnStyle::Modify => format!("MODIFY COLUMN {}", self.column(column)),
                AlterColumnStyle::Redefine => {
                    let mut sql = format!(
                        "ALTER COLUMN {name} {}",
                        self.data_type(&column.data_type)
                    );
                    if column.not_null {
                        sql.push_str(" NOT NULL");
                    }
                    sql
                }
                AlterColumnStyle::Granular => format!(
                    "ALTER COLUMN {name} SET DATA TYPE {}",
                    self.data_type(&column.data_type)
                ),
            },
            AlterColumnAction::SetOptions(options) => {
                format!("ALTER COLUMN {name} SET OPTIONS ({})", self.expr(options))
            }
        }
    }

    #[must_use]
    pub fn create_index(&self, index: &CreateIndex) -> String {
        let using_after_columns = self.dialect.format_rules().index_using_after_columns;
        let mut sql = String::from("CREATE ");
        if index.unique {
            sql.push_str("UNIQUE ");
        }
        if index.null_filtered {
            sql.push_str("NULL_FILTERED ");
        }
        sql.push_str("INDEX ");
        if index.if_not_exists {
            sql.push_str("IF NOT EXISTS ");
        }
        sql.push_str(&format!("{} ON {}", index.name, index.table));

        let using = index.using.as_ref().map(|m| format!(" USING {m}"));
        if !using_after_columns {
            sql.push_str(using.as_deref().unwrap_or_default());
        }
        sql.push_str(&format!(" ({})", column_list(&index.columns)));
        if using_after_columns {
            sql.push_str(using.as_deref().unwrap_or_default());
        }

        if !index.storing.is_empty() {
            let storing: Vec<String> = index.storing.iter().map(ToString::to_string).collect();
            sql.push_str(&format!(" STORING ({})", storing.join(", ")));
        }
        if let Some(parent) = &index.interleave_in {
            sql.push_str(&format!(", INTERLEAVE IN {parent}"));
        }
        if let Some(predicate) = &index.where_clause {
            sql.push_str(&format!(" WHERE {}", self.expr(predicate)));
        }
        sql
    }

    #[must_use]
    pub fn drop_index(&self, drop: &DropIndex) -> String {
        let mut sql = String::from("DROP INDEX ");
        if drop.if_exists {
            sql.push_str("IF EXISTS ");
        }
        let target = match (self.dialect.format_rules().drop_index, &drop.table) {
            (DropIndexStyle::OnTable, Some(table)) => format!("{} ON {table}", drop.name),
            (DropIndexStyle::TableAt, Some(table)) => format!("{table}@{}", drop.name.name),
            _ => drop.name.to_string(),
        };
        sql.push_str(&target);
        sql
    }
}

impl Ddl {
    /// Prints the document for `dialect`.
    #[must_use]
    pub fn to_sql(&self, dialect: &dyn Dialect) -> String {
        Printer::new(dialect).ddl(self)
    }
}
