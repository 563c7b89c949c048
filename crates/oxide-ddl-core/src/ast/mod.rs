//! Abstract Syntax Tree (AST) types for DDL statements.

mod column;
mod constraint;
mod expression;
mod ident;
mod statement;
mod types;

pub use column::Column;
pub use constraint::{
    CheckConstraint, Constraint, ConstraintKind, ForeignKey, IndexConstraint, PrimaryKey,
    ReferentialAction,
};
pub use expression::Expr;
pub use ident::{column_list, column_list_diff_form, ColumnIdent, Identifier, ObjectName};
pub use statement::{
    AlterColumnAction, AlterTable, AlterTableAction, CreateIndex, CreateTable, Ddl, DropIndex,
    DropTable, Interleave, StatementKind, Stmt, TableOption, DEFAULT_INDENT,
};
pub use types::{DataType, TypeKind};
