//! # Record Store Errors
//!
//! Constraint violations are reclassified into typed outcomes; only
//! unexpected storage failures keep the underlying diagnostic text.

use rusqlite::ffi;
use thiserror::Error;

use crate::model::UserId;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Record store errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Unique constraint on `email` rejected the write
    #[error("Email already exists")]
    DuplicateKey,

    /// No row with the given id
    #[error("User not found: {0}")]
    NotFound(UserId),

    /// Connection could not be established
    #[error("Database connection error: {0}")]
    Connection(String),

    /// Any other storage failure
    #[error("{0}")]
    Storage(String),
}

impl StoreError {
    /// Stable error code for logs
    pub fn code(&self) -> &'static str {
        match self {
            StoreError::DuplicateKey => "USERDB_DUPLICATE_KEY",
            StoreError::NotFound(_) => "USERDB_NOT_FOUND",
            StoreError::Connection(_) => "USERDB_STORE_UNAVAILABLE",
            StoreError::Storage(_) => "USERDB_STORE_FAILED",
        }
    }

    /// True for outcomes caused by the request rather than the store
    pub fn is_expected(&self) -> bool {
        matches!(self, StoreError::DuplicateKey | StoreError::NotFound(_))
    }

    /// Wraps a failure to open or configure a connection
    pub fn connection(err: rusqlite::Error) -> Self {
        StoreError::Connection(err.to_string())
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(failure, _)
                if failure.extended_code == ffi::SQLITE_CONSTRAINT_UNIQUE =>
            {
                StoreError::DuplicateKey
            }
            _ => StoreError::Storage(err.to_string()),
        }
    }
}
