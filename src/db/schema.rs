//! Database schema and migrations for depot.
//!
//! Migrations are applied sequentially; the schema_version table tracks
//! which ones have run.

/// Database migrations, one SQL script per version.
pub const MIGRATIONS: &[&str] = &[
    // v1: users
    r#"
-- Users table for authentication
CREATE TABLE users (
    id            INTEGER PRIMARY KEY AUTOINCREMENT,
    email         TEXT NOT NULL UNIQUE,
    password_hash TEXT NOT NULL,           -- Argon2 hash
    created_at    TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX idx_users_email ON users(email);
"#,
    // v2: files and folders
    r#"
-- File and folder metadata. parent_id = 0 is the root sentinel, so it is
-- not declared as a foreign key; tree consistency is enforced in code.
CREATE TABLE files (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id     INTEGER NOT NULL REFERENCES users(id),
    name        TEXT NOT NULL,
    kind        TEXT NOT NULL,             -- 'folder', 'file', 'image'
    parent_id   INTEGER NOT NULL DEFAULT 0,
    is_public   INTEGER NOT NULL DEFAULT 0,
    content_ref TEXT,                      -- opaque blob path, NULL for folders
    created_at  TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX idx_files_owner_parent ON files(user_id, parent_id);
"#,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_migrations_are_present() {
        assert_eq!(MIGRATIONS.len(), 2);
    }

    #[test]
    fn test_migrations_create_expected_tables() {
        let all: String = MIGRATIONS.concat();
        assert!(all.contains("CREATE TABLE users"));
        assert!(all.contains("CREATE TABLE files"));
    }
}
