//! `users` table definition.
//!
//! `AUTOINCREMENT` keeps ids monotonic and prevents reuse after delete.
//! The `UNIQUE` constraint on `email` is the only duplicate check.

use rusqlite::Connection;

pub const USERS_TABLE: &str = "users";

const CREATE_USERS_TABLE_SQL: &str = "CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    email TEXT NOT NULL UNIQUE,
    age INTEGER NOT NULL
);";

/// Creates the `users` table if absent. Idempotent.
pub fn ensure_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(CREATE_USERS_TABLE_SQL)
}

/// Returns true when the `users` table exists.
pub fn table_exists(conn: &Connection) -> rusqlite::Result<bool> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
        [USERS_TABLE],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}
