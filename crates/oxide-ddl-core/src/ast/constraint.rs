//! Table constraints.

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::ident::column_list_diff_form;
use super::{ColumnIdent, Expr, Identifier, ObjectName};

/// Action taken on referencing rows when a referenced row changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ReferentialAction {
    Cascade,
    Restrict,
    SetNull,
    SetDefault,
    NoAction,
}

impl ReferentialAction {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Cascade => "CASCADE",
            Self::Restrict => "RESTRICT",
            Self::SetNull => "SET NULL",
            Self::SetDefault => "SET DEFAULT",
            Self::NoAction => "NO ACTION",
        }
    }
}

impl fmt::Display for ReferentialAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The kind of a constraint, used where only the kind matters
/// (`ALTER TABLE ... DROP FOREIGN KEY` in MySQL).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ConstraintKind {
    PrimaryKey,
    ForeignKey,
    Index,
    Check,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PrimaryKey {
    pub name: Identifier,
    pub columns: Vec<ColumnIdent>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ForeignKey {
    pub name: Identifier,
    pub columns: Vec<ColumnIdent>,
    pub ref_table: ObjectName,
    /// Empty when the referenced table's primary key is implied.
    pub ref_columns: Vec<ColumnIdent>,
    pub on_delete: Option<ReferentialAction>,
    pub on_update: Option<ReferentialAction>,
}

/// A unique constraint or a secondary index declared in the table body.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct IndexConstraint {
    pub name: Identifier,
    pub unique: bool,
    pub columns: Vec<ColumnIdent>,
    /// Index method (`USING BTREE`).
    pub using: Option<Identifier>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CheckConstraint {
    pub name: Identifier,
    /// Condition without its surrounding parentheses.
    pub expr: Expr,
}

/// A named table constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Constraint {
    PrimaryKey(PrimaryKey),
    ForeignKey(ForeignKey),
    Index(IndexConstraint),
    Check(CheckConstraint),
}

impl Constraint {
    #[must_use]
    pub const fn name(&self) -> &Identifier {
        match self {
            Self::PrimaryKey(pk) => &pk.name,
            Self::ForeignKey(fk) => &fk.name,
            Self::Index(idx) => &idx.name,
            Self::Check(check) => &check.name,
        }
    }

    /// Replaces the constraint's name.
    pub fn set_name(&mut self, name: Identifier) {
        match self {
            Self::PrimaryKey(pk) => pk.name = name,
            Self::ForeignKey(fk) => fk.name = name,
            Self::Index(idx) => idx.name = name,
            Self::Check(check) => check.name = name,
        }
    }

    #[must_use]
    pub const fn kind(&self) -> ConstraintKind {
        match self {
            Self::PrimaryKey(_) => ConstraintKind::PrimaryKey,
            Self::ForeignKey(_) => ConstraintKind::ForeignKey,
            Self::Index(_) => ConstraintKind::Index,
            Self::Check(_) => ConstraintKind::Check,
        }
    }

    /// Comparison form of everything but the name.
    #[must_use]
    pub fn body_diff_form(&self) -> String {
        match self {
            Self::PrimaryKey(pk) => {
                format!("PRIMARY KEY ({})", column_list_diff_form(&pk.columns))
            }
            Self::ForeignKey(fk) => {
                let mut out = format!(
                    "FOREIGN KEY ({}) REFERENCES {}",
                    column_list_diff_form(&fk.columns),
                    fk.ref_table.diff_form()
                );
                if !fk.ref_columns.is_empty() {
                    out.push_str(&format!(" ({})", column_list_diff_form(&fk.ref_columns)));
                }
                // NO ACTION is what an absent clause means.
                if let Some(action) = fk.on_delete.filter(|a| *a != ReferentialAction::NoAction) {
                    out.push_str(&format!(" ON DELETE {action}"));
                }
                if let Some(action) = fk.on_update.filter(|a| *a != ReferentialAction::NoAction) {
                    out.push_str(&format!(" ON UPDATE {action}"));
                }
                out
            }
            Self::Index(idx) => {
                let mut out = String::new();
                if idx.unique {
                    out.push_str("UNIQUE ");
                }
                out.push_str(&format!("INDEX ({})", column_list_diff_form(&idx.columns)));
                if let Some(using) = &idx.using {
                    out.push_str(&format!(" USING {}", using.name.to_ascii_uppercase()));
                }
                out
            }
            Self::Check(check) => format!("CHECK ({})", check.expr.diff_form()),
        }
    }

    /// Comparison form including the name.
    #[must_use]
    pub fn diff_form(&self) -> String {
        format!("{} {}", self.name().name, self.body_diff_form())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cols(names: &[&str]) -> Vec<ColumnIdent> {
        names
            .iter()
            .map(|n| ColumnIdent::new(Identifier::new(*n)))
            .collect()
    }

    fn fk(on_delete: Option<ReferentialAction>) -> Constraint {
        Constraint::ForeignKey(ForeignKey {
            name: Identifier::new("orders_user_id_fkey"),
            columns: cols(&["user_id"]),
            ref_table: ObjectName::new(Identifier::new("users")),
            ref_columns: cols(&["id"]),
            on_delete,
            on_update: None,
        })
    }

    #[test]
    fn test_no_action_equals_absent_action() {
        assert_eq!(
            fk(None).diff_form(),
            fk(Some(ReferentialAction::NoAction)).diff_form()
        );
        assert_ne!(
            fk(None).diff_form(),
            fk(Some(ReferentialAction::Cascade)).diff_form()
        );
    }

    #[test]
    fn test_body_ignores_name() {
        let mut renamed = fk(None);
        renamed.set_name(Identifier::new("other"));
        assert_eq!(renamed.body_diff_form(), fk(None).body_diff_form());
        assert_ne!(renamed.diff_form(), fk(None).diff_form());
    }

    #[test]
    fn test_kind() {
        let pk = Constraint::PrimaryKey(PrimaryKey {
            name: Identifier::new("t_pkey"),
            columns: cols(&["id"]),
        });
        assert_eq!(pk.kind(), ConstraintKind::PrimaryKey);
        assert_eq!(pk.name().name, "t_pkey");
        assert_eq!(fk(None).kind(), ConstraintKind::ForeignKey);
    }
}
