//! CLI-specific error types
//!
//! All CLI errors are fatal: `main` prints them and exits non-zero.

use std::io;

use thiserror::Error;

/// CLI error
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration file missing, unreadable, or invalid
    #[error("USERDB_CLI_CONFIG_ERROR: {0}")]
    Config(String),

    /// Writing command output failed
    #[error("USERDB_CLI_IO_ERROR: {0}")]
    Io(String),

    /// Logging, store, or server could not start
    #[error("USERDB_CLI_BOOT_FAILED: {0}")]
    BootFailed(String),
}

impl CliError {
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::Io(msg.into())
    }

    pub fn boot_failed(msg: impl Into<String>) -> Self {
        Self::BootFailed(msg.into())
    }

    /// Stable error code string
    pub fn code_str(&self) -> &'static str {
        match self {
            Self::Config(_) => "USERDB_CLI_CONFIG_ERROR",
            Self::Io(_) => "USERDB_CLI_IO_ERROR",
            Self::BootFailed(_) => "USERDB_CLI_BOOT_FAILED",
        }
    }

    /// Message without the code prefix
    pub fn message(&self) -> &str {
        match self {
            Self::Config(msg) | Self::Io(msg) | Self::BootFailed(msg) => msg,
        }
    }
}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::io_error(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::io_error(format!("JSON error: {}", e))
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;
