//! Parser tests for the MySQL dialect.

mod common;
use common::*;

use oxide_ddl_core::ast::{Constraint, TypeKind};

const USERS: &str = "
# users table
CREATE TABLE `Users` (
  `id` INT UNSIGNED NOT NULL AUTO_INCREMENT,
  `email` VARCHAR(255) CHARACTER SET utf8mb4 COLLATE utf8mb4_bin NOT NULL COMMENT 'login',
  `state` ENUM('active', \"gone\") DEFAULT 'active',
  `updated_at` TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP ON UPDATE CURRENT_TIMESTAMP,
  PRIMARY KEY (`id`),
  UNIQUE KEY `users_email` (`email`),
  KEY `idx_updated` (`updated_at`) USING BTREE
) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4;
";

#[test]
fn column_attributes() {
    let table = parse_table("mysql", USERS);
    assert_eq!(table.name.name.name, "users");
    assert_eq!(table.name.name.raw, "`Users`");

    let id = table.column("id").unwrap();
    assert!(id.data_type.unsigned);
    assert!(id.auto_increment);
    assert!(id.not_null);

    let email = table.column("email").unwrap();
    assert_eq!(email.charset.as_ref().unwrap().name, "utf8mb4");
    assert_eq!(email.collate.as_ref().unwrap().name, "utf8mb4_bin");
    assert_eq!(email.comment.as_ref().unwrap().raw, "'login'");

    let state = table.column("state").unwrap();
    assert_eq!(state.data_type.kind, TypeKind::Enum);
    assert_eq!(state.data_type.to_string(), "ENUM('active', \"gone\")");

    let updated_at = table.column("updated_at").unwrap();
    assert_eq!(
        updated_at.default.as_ref().unwrap().diff_form(),
        "current_timestamp"
    );
    assert_eq!(
        updated_at.on_update.as_ref().unwrap().to_string(),
        "CURRENT_TIMESTAMP"
    );
}

#[test]
fn keyed_constraints() {
    let table = parse_table("mysql", USERS);
    let names: Vec<&str> = table
        .constraints
        .iter()
        .map(|c| c.name().name.as_str())
        .collect();
    assert_eq!(names, ["users_pkey", "users_email", "idx_updated"]);
    match table.constraint("idx_updated") {
        Some(Constraint::Index(idx)) => {
            assert!(!idx.unique);
            assert_eq!(idx.using.as_ref().unwrap().raw, "BTREE");
        }
        other => panic!("Expected index, got {other:?}"),
    }
}

#[test]
fn table_options() {
    let table = parse_table("mysql", USERS);
    let options: Vec<(&str, &str)> = table
        .options
        .iter()
        .map(|o| (o.name.as_str(), o.value.raw.as_str()))
        .collect();
    assert_eq!(
        options,
        [("ENGINE", "InnoDB"), ("DEFAULT CHARSET", "utf8mb4")]
    );
}

#[test]
fn foreign_key_with_index_name() {
    let table = parse_table(
        "mysql",
        "CREATE TABLE t (a INT, FOREIGN KEY fk_a (a) REFERENCES p (id) ON DELETE SET NULL)",
    );
    assert_eq!(table.constraints[0].name().name, "fk_a");
}

#[test]
fn identifiers_fold_even_when_quoted() {
    let table = parse_table("mysql", "CREATE TABLE `T` (`ColA` INT)");
    assert_eq!(table.name.name.name, "t");
    assert_eq!(table.columns[0].name.name, "cola");
}

#[test]
fn backslash_escapes_in_strings() {
    let table = parse_table("mysql", r"CREATE TABLE t (a TEXT COMMENT 'it\'s')");
    assert_eq!(table.columns[0].comment.as_ref().unwrap().raw, r"'it\'s'");
}

#[test]
fn round_trip_mysql() {
    let printed = round_trip("mysql", USERS);
    assert!(printed.contains(
        "    `email` VARCHAR(255) CHARACTER SET utf8mb4 COLLATE utf8mb4_bin NOT NULL COMMENT 'login',\n"
    ));
    assert!(printed.contains("    PRIMARY KEY (`id`),\n"));
    assert!(printed.contains("    UNIQUE KEY `users_email` (`email`),\n"));
    assert!(printed.contains("    KEY `idx_updated` (`updated_at`) USING BTREE\n"));
    assert!(printed.ends_with(") ENGINE=InnoDB DEFAULT CHARSET=utf8mb4;\n"));

    round_trip("mysql", "CREATE INDEX i ON t (a, b DESC) USING BTREE");
}

#[test]
fn primary_key_is_always_named_after_the_table() {
    let sql = "CREATE TABLE t (id INT NOT NULL, CONSTRAINT pk_t PRIMARY KEY (id))";
    let table = parse_table("mysql", sql);
    assert_eq!(table.constraints[0].name().name, "t_pkey");
    assert_eq!(
        print("mysql", &parse("mysql", sql)),
        "CREATE TABLE t (\n    id INT NOT NULL,\n    PRIMARY KEY (id)\n);\n"
    );

    let generic = parse_table("generic", sql);
    assert_eq!(generic.constraints[0].name().name, "pk_t");
}
