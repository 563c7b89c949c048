//! Blog Schema Example
//!
//! Evolves a small blog schema through two revisions and prints the
//! migration script for each, once per dialect:
//! - adding a column with a check
//! - replacing an index
//! - changing a column type
//!
//! Run with: cargo run --example blog_schema

use oxide_ddl_core::dialect::{GenericDialect, MySqlDialect};
use oxide_ddl_core::trace::TraceLog;
use oxide_ddl_core::{Dialect, DiffResult, Differ, Parser, Printer};

// =============================================================================
// SCHEMA REVISIONS
// =============================================================================

const V1: &str = "
CREATE TABLE users (
    id INT NOT NULL,
    email VARCHAR(255) NOT NULL,
    PRIMARY KEY (id)
);

CREATE TABLE posts (
    id INT NOT NULL,
    user_id INT NOT NULL REFERENCES users (id),
    title VARCHAR(100) NOT NULL,
    PRIMARY KEY (id)
);

CREATE INDEX posts_user_id_idx ON posts (user_id);
";

const V2: &str = "
CREATE TABLE users (
    id INT NOT NULL,
    email VARCHAR(255) NOT NULL,
    karma INT DEFAULT 0 NOT NULL CHECK (karma >= 0),
    PRIMARY KEY (id)
);

CREATE TABLE posts (
    id INT NOT NULL,
    user_id INT NOT NULL REFERENCES users (id),
    title VARCHAR(200) NOT NULL,
    PRIMARY KEY (id)
);

CREATE INDEX posts_user_id_idx ON posts (user_id, id);
";

// =============================================================================
// MIGRATION
// =============================================================================

fn migrate(dialect: &dyn Dialect) -> Result<(), oxide_ddl_core::Error> {
    let before = Parser::new(V1, dialect).parse()?;
    let after = Parser::new(V2, dialect).parse()?;

    let trace = TraceLog::new();
    let result = Differ::new(dialect)
        .with_trace(&trace)
        .diff(Some(&before), Some(&after))?;

    println!("== {} ==", dialect.name());
    match result {
        DiffResult::NoDifference => println!("-- no changes"),
        DiffResult::Changed(mut script) => {
            script.header = vec![format!("{} -> v2", dialect.name())];
            print!("{}", Printer::new(dialect).ddl(&script));
        }
    }
    for event in trace.events() {
        println!("-- decision: {event}");
    }
    println!();
    Ok(())
}

fn main() -> Result<(), oxide_ddl_core::Error> {
    migrate(&GenericDialect::new())?;
    migrate(&MySqlDialect::new())?;
    Ok(())
}
