//! SQLite-backed user record store.
//!
//! # Invariants
//! - Every operation opens its own connection and drops it before returning,
//!   on success and on every error path.
//! - Write paths only accept [`NewUser`], which exists only after validation.
//! - Duplicate emails are detected by the table's unique constraint at write
//!   time, never by a pre-check query.
//! - Existence checks for update/delete run inside the same immediate
//!   transaction as the write.

use std::fs;

use rusqlite::{params, Connection, OpenFlags, OptionalExtension, Row, TransactionBehavior};

use super::config::StoreConfig;
use super::errors::{StoreError, StoreResult};
use super::schema::ensure_schema;
use crate::model::{NewUser, User, UserId};
use crate::observability::{Logger, ObservationScope};

const USER_SELECT_SQL: &str = "SELECT id, name, email, age FROM users";

/// Record store owning the `users` table.
///
/// Holds configuration only; cloning is cheap and clones share no state.
#[derive(Debug, Clone)]
pub struct UserStore {
    config: StoreConfig,
}

impl UserStore {
    pub fn new(config: StoreConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Creates the database file, its parent directory, and the `users`
    /// table when absent. Idempotent.
    pub fn initialize(&self) -> StoreResult<()> {
        let path = self.config.database_path();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                StoreError::Connection(format!(
                    "failed to create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let conn = self.open(OpenFlags::default())?;
        ensure_schema(&conn)?;

        let path_field = path.display().to_string();
        Logger::trace("STORE_SCHEMA_ENSURED", &[("database_path", path_field.as_str())]);
        Ok(())
    }

    /// Inserts a validated candidate and returns the persisted record.
    ///
    /// # Errors
    ///
    /// - `DuplicateKey` when the email already exists
    /// - `Connection` when the database cannot be opened
    pub fn create(&self, user: &NewUser) -> StoreResult<User> {
        let scope = ObservationScope::new("STORE_CREATE");
        let result = self.with_connection(|conn| {
            conn.execute(
                "INSERT INTO users (name, email, age) VALUES (?1, ?2, ?3)",
                params![user.name(), user.email(), user.age()],
            )?;
            Ok(user.clone().into_user(conn.last_insert_rowid()))
        });
        observe(scope, result)
    }

    /// Returns every persisted record in table order.
    pub fn list_all(&self) -> StoreResult<Vec<User>> {
        let scope = ObservationScope::new("STORE_LIST");
        let result = self.with_connection(|conn| {
            let mut stmt = conn.prepare(&format!("{USER_SELECT_SQL} ORDER BY id"))?;
            let users = stmt
                .query_map([], parse_user_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(users)
        });
        observe(scope, result)
    }

    /// Returns the record with the given id.
    ///
    /// # Errors
    ///
    /// `NotFound` when no row has that id.
    pub fn get(&self, id: UserId) -> StoreResult<User> {
        let id_field = id.to_string();
        let scope = ObservationScope::with_fields("STORE_GET", &[("user_id", id_field.as_str())]);
        let result = self.with_connection(|conn| {
            select_user(conn, id)?.ok_or(StoreError::NotFound(id))
        });
        observe(scope, result)
    }

    /// Replaces name, email, and age of an existing row.
    ///
    /// # Errors
    ///
    /// - `NotFound` when no row has that id
    /// - `DuplicateKey` when the new email belongs to a different row
    pub fn update(&self, id: UserId, user: &NewUser) -> StoreResult<User> {
        let id_field = id.to_string();
        let scope =
            ObservationScope::with_fields("STORE_UPDATE", &[("user_id", id_field.as_str())]);
        let result = self.with_connection(|conn| {
            let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

            if !user_exists(&tx, id)? {
                return Err(StoreError::NotFound(id));
            }

            tx.execute(
                "UPDATE users SET name = ?1, email = ?2, age = ?3 WHERE id = ?4",
                params![user.name(), user.email(), user.age(), id],
            )?;

            let updated = select_user(&tx, id)?.ok_or(StoreError::NotFound(id))?;
            tx.commit()?;
            Ok(updated)
        });
        observe(scope, result)
    }

    /// Removes the row with the given id.
    ///
    /// # Errors
    ///
    /// `NotFound` when no row has that id.
    pub fn delete(&self, id: UserId) -> StoreResult<()> {
        let id_field = id.to_string();
        let scope =
            ObservationScope::with_fields("STORE_DELETE", &[("user_id", id_field.as_str())]);
        let result = self.with_connection(|conn| {
            let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

            if !user_exists(&tx, id)? {
                return Err(StoreError::NotFound(id));
            }

            tx.execute("DELETE FROM users WHERE id = ?1", params![id])?;
            tx.commit()?;
            Ok(())
        });
        observe(scope, result)
    }

    /// Runs `op` on a fresh connection; the connection is dropped on return.
    fn with_connection<T>(
        &self,
        op: impl FnOnce(&mut Connection) -> StoreResult<T>,
    ) -> StoreResult<T> {
        let flags = OpenFlags::default().difference(OpenFlags::SQLITE_OPEN_CREATE);
        let mut conn = self.open(flags)?;
        op(&mut conn)
    }

    fn open(&self, flags: OpenFlags) -> StoreResult<Connection> {
        let conn = Connection::open_with_flags(self.config.database_path(), flags)
            .map_err(StoreError::connection)?;
        conn.busy_timeout(self.config.busy_timeout())
            .map_err(StoreError::connection)?;
        Ok(conn)
    }
}

fn observe<T>(scope: ObservationScope<'_>, result: StoreResult<T>) -> StoreResult<T> {
    match &result {
        Ok(_) => scope.complete(),
        Err(err) if err.is_expected() => scope.complete_with_fields(&[("outcome", err.code())]),
        Err(err) => scope.fail(&err.to_string()),
    }
    result
}

fn select_user(conn: &Connection, id: UserId) -> rusqlite::Result<Option<User>> {
    conn.query_row(
        &format!("{USER_SELECT_SQL} WHERE id = ?1"),
        params![id],
        parse_user_row,
    )
    .optional()
}

fn user_exists(conn: &Connection, id: UserId) -> rusqlite::Result<bool> {
    conn.query_row("SELECT 1 FROM users WHERE id = ?1", params![id], |_| Ok(()))
        .optional()
        .map(|row| row.is_some())
}

fn parse_user_row(row: &Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        age: row.get(3)?,
    })
}
