//! Properties every dialect's differ and printer must satisfy.

mod common;
use common::*;

use oxide_ddl_core::ast::Ddl;
use oxide_ddl_core::Differ;

/// A representative schema per dialect.
const SCHEMAS: &[(&str, &str)] = &[
    (
        "generic",
        "CREATE TABLE users (
           id BIGSERIAL PRIMARY KEY,
           email VARCHAR(255) NOT NULL UNIQUE,
           active BOOLEAN DEFAULT TRUE
         );
         CREATE TABLE posts (
           id INT NOT NULL,
           user_id INT REFERENCES users (id) ON DELETE CASCADE,
           body TEXT CHECK (length(body) < 1000),
           PRIMARY KEY (id)
         );
         CREATE INDEX posts_user_id_idx ON posts (user_id);",
    ),
    (
        "cockroachdb",
        "CREATE TABLE users (
           id UUID DEFAULT gen_random_uuid() PRIMARY KEY,
           email STRING NOT NULL,
           INDEX (email)
         );
         CREATE UNIQUE INDEX users_email_key ON users (email);",
    ),
    (
        "mysql",
        "CREATE TABLE `users` (
           `id` BIGINT UNSIGNED NOT NULL AUTO_INCREMENT,
           `email` VARCHAR(255) NOT NULL,
           PRIMARY KEY (`id`),
           UNIQUE KEY `users_email` (`email`)
         ) ENGINE=InnoDB;
         CREATE INDEX idx_email ON users (email) USING BTREE;",
    ),
    (
        "spanner",
        "CREATE TABLE Singers (
           SingerId INT64 NOT NULL,
           Name STRING(MAX)
         ) PRIMARY KEY (SingerId);
         CREATE TABLE Albums (
           SingerId INT64 NOT NULL,
           AlbumId INT64 NOT NULL
         ) PRIMARY KEY (SingerId, AlbumId),
           INTERLEAVE IN PARENT Singers ON DELETE CASCADE;
         CREATE INDEX AlbumsBySinger ON Albums (SingerId);",
    ),
];

#[test]
fn diff_of_identical_schemas_is_empty() {
    for (name, sql) in SCHEMAS {
        let ddl = parse(name, sql);
        let result = Differ::new(dialect(name))
            .diff(Some(&ddl), Some(&ddl))
            .unwrap();
        assert!(result.is_no_difference(), "{name}: {result:?}");

        let empty = Ddl::default();
        assert!(Differ::new(dialect(name))
            .diff(Some(&empty), Some(&empty))
            .unwrap()
            .is_no_difference());
        assert!(Differ::new(dialect(name))
            .diff(None, None)
            .unwrap()
            .is_no_difference());
    }
}

#[test]
fn printed_schemas_round_trip() {
    for (name, sql) in SCHEMAS {
        round_trip(name, sql);
    }
}

#[test]
fn creation_emits_every_statement() {
    for (name, sql) in SCHEMAS {
        let ddl = parse(name, sql);
        let result = Differ::new(dialect(name)).diff(None, Some(&ddl)).unwrap();
        let created = result.ddl().unwrap();
        assert_eq!(print(name, created), print(name, &ddl), "{name}");
    }
}

#[test]
fn deletion_drops_every_statement_in_order() {
    let expected: &[(&str, &[&str])] = &[
        (
            "generic",
            &[
                "DROP TABLE users;",
                "DROP TABLE posts;",
                "DROP INDEX posts_user_id_idx;",
            ],
        ),
        (
            "cockroachdb",
            &["DROP TABLE users;", "DROP INDEX users@users_email_key;"],
        ),
        (
            "mysql",
            &["DROP TABLE `users`;", "DROP INDEX idx_email ON users;"],
        ),
        (
            "spanner",
            &[
                "DROP TABLE Singers;",
                "DROP TABLE Albums;",
                "DROP INDEX AlbumsBySinger;",
            ],
        ),
    ];
    for ((name, sql), (expected_name, drops)) in SCHEMAS.iter().zip(expected) {
        assert_eq!(name, expected_name);
        let ddl = parse(name, sql);
        let result = Differ::new(dialect(name)).diff(Some(&ddl), None).unwrap();
        assert_eq!(stmts_of(name, &result), *drops, "{name}");
    }
}

#[test]
fn diff_is_deterministic() {
    for (name, sql) in SCHEMAS {
        let before = parse(name, sql);
        let after = parse(name, "");
        let differ = Differ::new(dialect(name));
        let first = differ.diff(Some(&before), Some(&after)).unwrap();
        let second = differ.diff(Some(&before), Some(&after)).unwrap();
        assert_eq!(first, second, "{name}");
    }
}

#[test]
fn additions_emit_only_additions() {
    let before = "CREATE TABLE t (id INT NOT NULL, PRIMARY KEY (id));";
    let after = "CREATE TABLE t (id INT NOT NULL, name TEXT, PRIMARY KEY (id));\nCREATE INDEX t_name_idx ON t (name);";
    assert_eq!(
        diff_stmts("generic", before, after),
        [
            "ALTER TABLE t ADD COLUMN name TEXT;",
            "CREATE INDEX t_name_idx ON t (name);",
        ]
    );
    assert_eq!(diff_stmts("generic", after, after), Vec::<String>::new());
}

/// Before and after versions per dialect, touching columns, constraints,
/// indexes and whole tables.
const MIGRATIONS: &[(&str, &str, &str)] = &[
    (
        "generic",
        "CREATE TABLE users (
           id BIGSERIAL PRIMARY KEY,
           email VARCHAR(100) NOT NULL,
           name TEXT DEFAULT 'anon',
           legacy INT
         );
         CREATE TABLE posts (
           id INT NOT NULL,
           user_id INT REFERENCES users (id),
           PRIMARY KEY (id)
         );
         CREATE INDEX posts_user_id_idx ON posts (user_id);
         CREATE TABLE old_stuff (a INT);",
        "CREATE TABLE users (
           id BIGSERIAL PRIMARY KEY,
           email VARCHAR(255) NOT NULL UNIQUE,
           name TEXT,
           age INT CHECK (age > 0)
         );
         CREATE TABLE posts (
           id INT NOT NULL,
           user_id INT NOT NULL REFERENCES users (id) ON DELETE CASCADE,
           PRIMARY KEY (id)
         );
         CREATE INDEX posts_user_id_idx ON posts (user_id, id);
         CREATE TABLE new_stuff (b TEXT);",
    ),
    (
        "cockroachdb",
        "CREATE TABLE users (
           id UUID DEFAULT gen_random_uuid() PRIMARY KEY,
           email STRING NOT NULL,
           nick STRING,
           INDEX (email)
         );
         CREATE INDEX users_nick_idx ON users (nick);",
        "CREATE TABLE users (
           id UUID DEFAULT gen_random_uuid() PRIMARY KEY,
           email STRING NOT NULL,
           nick STRING DEFAULT 'x'::STRING,
           score INT8 DEFAULT 0
         );
         CREATE INDEX users_nick_idx ON users (nick DESC);
         CREATE UNIQUE INDEX users_email_key ON users (email);",
    ),
    (
        "mysql",
        "CREATE TABLE `users` (
           `id` INT UNSIGNED NOT NULL AUTO_INCREMENT,
           `email` VARCHAR(100) NOT NULL,
           `status` VARCHAR(10) DEFAULT 'new',
           `bio` TEXT,
           PRIMARY KEY (`id`),
           KEY `users_status` (`status`)
         ) ENGINE=InnoDB;
         CREATE TABLE `posts` (
           `id` INT NOT NULL,
           `user_id` INT UNSIGNED,
           PRIMARY KEY (`id`),
           CONSTRAINT `posts_user` FOREIGN KEY (`user_id`) REFERENCES `users` (`id`)
         );",
        "CREATE TABLE `users` (
           `id` INT UNSIGNED NOT NULL AUTO_INCREMENT,
           `email` VARCHAR(255) NOT NULL COMMENT 'login',
           `status` VARCHAR(10) DEFAULT 'active',
           PRIMARY KEY (`id`),
           UNIQUE KEY `users_email` (`email`)
         ) ENGINE=InnoDB;
         CREATE TABLE `posts` (
           `id` INT NOT NULL,
           `user_id` INT UNSIGNED,
           PRIMARY KEY (`id`),
           CONSTRAINT `posts_user` FOREIGN KEY (`user_id`) REFERENCES `users` (`id`) ON DELETE CASCADE
         );
         CREATE INDEX posts_id_user ON posts (id, user_id);",
    ),
    (
        "spanner",
        "CREATE TABLE Singers (
           SingerId INT64 NOT NULL,
           Name STRING(100),
           UpdatedAt TIMESTAMP OPTIONS (allow_commit_timestamp = true)
         ) PRIMARY KEY (SingerId);
         CREATE TABLE Albums (
           SingerId INT64 NOT NULL,
           AlbumId INT64 NOT NULL
         ) PRIMARY KEY (SingerId, AlbumId);
         CREATE INDEX SingersByName ON Singers (Name);",
        "CREATE TABLE Singers (
           SingerId INT64 NOT NULL,
           Name STRING(200) NOT NULL,
           Score INT64 DEFAULT (0),
           UpdatedAt TIMESTAMP OPTIONS (allow_commit_timestamp = true)
         ) PRIMARY KEY (SingerId);
         CREATE TABLE Albums (
           SingerId INT64 NOT NULL,
           AlbumId INT64 NOT NULL
         ) PRIMARY KEY (SingerId, AlbumId),
           INTERLEAVE IN PARENT Singers ON DELETE CASCADE;
         CREATE INDEX SingersByName ON Singers (Name) STORING (Score);",
    ),
];

#[test]
fn applied_script_reaches_the_target_schema() {
    for (name, before, after) in MIGRATIONS {
        let before = parse(name, before);
        let after = parse(name, after);
        let differ = Differ::new(dialect(name));
        let script = differ
            .diff(Some(&before), Some(&after))
            .unwrap()
            .into_ddl()
            .unwrap_or_else(|| panic!("{name}: expected a migration script"));

        let applied = apply(&before, &script);
        let rest = differ
            .diff(Some(&fold_indexes(&applied)), Some(&fold_indexes(&after)))
            .unwrap();
        assert!(
            rest.is_no_difference(),
            "{name}: script\n{}\nleaves\n{}",
            print(name, &script),
            rest.ddl().map(|ddl| print(name, ddl)).unwrap_or_default()
        );
    }
}
