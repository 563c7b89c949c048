//! Names given to constraints written without one.
//!
//! These follow PostgreSQL's conventions so that a schema dumped from a
//! live database and the same schema written by hand agree on names.

/// `{table}_pkey`
#[must_use]
pub fn primary_key(table: &str) -> String {
    format!("{table}_pkey")
}

/// `{table}_{columns}_fkey`
#[must_use]
pub fn foreign_key(table: &str, columns: &[&str]) -> String {
    format!("{table}_{}_fkey", columns.join("_"))
}

/// `{table}_unique_{columns}`
#[must_use]
pub fn unique(table: &str, columns: &[&str]) -> String {
    format!("{table}_unique_{}", columns.join("_"))
}

/// `{table}_{column}_check`, or `{table}_check` when the condition names no
/// column.
#[must_use]
pub fn check(table: &str, column: Option<&str>) -> String {
    match column {
        Some(column) => format!("{table}_{column}_check"),
        None => format!("{table}_check"),
    }
}

/// `{table}_{columns}_idx`
#[must_use]
pub fn index(table: &str, columns: &[&str]) -> String {
    format!("{table}_{}_idx", columns.join("_"))
}

/// Returns the name a generated constraint name takes when its table is
/// renamed from `old_table` to `new_table`, or `None` if `name` was not
/// derived from the old table name.
#[must_use]
pub fn renamed(name: &str, old_table: &str, new_table: &str) -> Option<String> {
    let rest = name.strip_prefix(old_table)?.strip_prefix('_')?;
    Some(format!("{new_table}_{rest}"))
}
