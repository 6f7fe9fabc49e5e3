//! Record store configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default database file, relative to the working directory
pub const DEFAULT_DATABASE_PATH: &str = "users.db";

/// Default time a connection waits on a locked database file
pub const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Where the store keeps its table and how its connections behave.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    database_path: PathBuf,
    busy_timeout: Duration,
}

impl StoreConfig {
    /// Config for the given database file with the default busy timeout
    pub fn new(database_path: impl Into<PathBuf>) -> Self {
        Self {
            database_path: database_path.into(),
            busy_timeout: DEFAULT_BUSY_TIMEOUT,
        }
    }

    /// Override the busy timeout
    pub fn with_busy_timeout(mut self, busy_timeout: Duration) -> Self {
        self.busy_timeout = busy_timeout;
        self
    }

    pub fn database_path(&self) -> &Path {
        &self.database_path
    }

    pub fn busy_timeout(&self) -> Duration {
        self.busy_timeout
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new(DEFAULT_DATABASE_PATH)
    }
}
