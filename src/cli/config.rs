//! Configuration file structure
//!
//! Every field is optional; a missing file argument means all defaults.
//! Command-line flags override file values.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::args::StoreArgs;
use super::errors::{CliError, CliResult};
use crate::http_server::HttpServerConfig;
use crate::store::{StoreConfig, DEFAULT_BUSY_TIMEOUT, DEFAULT_DATABASE_PATH};

const LOG_LEVELS: &[&str] = &["error", "warn", "info", "debug", "trace"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// SQLite database file (default: "users.db")
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// Host to bind to (default: "127.0.0.1")
    #[serde(default = "crate::http_server::config::default_host")]
    pub host: String,

    /// Port to bind to (default: 5000)
    #[serde(default = "crate::http_server::config::default_port")]
    pub port: u16,

    /// CORS allowed origins; empty allows any (default: [])
    #[serde(default)]
    pub cors_origins: Vec<String>,

    /// Log level, overridden by RUST_LOG (default: "info")
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// How long a connection waits on a locked database (default: 5000)
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,
}

fn default_database_path() -> String {
    DEFAULT_DATABASE_PATH.to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_busy_timeout_ms() -> u64 {
    DEFAULT_BUSY_TIMEOUT.as_millis() as u64
}

impl Default for Config {
    fn default() -> Self {
        let http = HttpServerConfig::default();
        Self {
            database_path: default_database_path(),
            host: http.host,
            port: http.port,
            cors_origins: http.cors_origins,
            log_level: default_log_level(),
            busy_timeout_ms: default_busy_timeout_ms(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

        let config: Config = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    /// Resolve the effective configuration: file (or defaults), then flags
    pub fn resolve(args: &StoreArgs) -> CliResult<Self> {
        let mut config = match &args.config {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };

        if let Some(database) = &args.database {
            config.database_path = database.display().to_string();
        }

        config.validate()?;
        Ok(config)
    }

    /// Apply host/port flags from `serve`
    pub fn with_listen_overrides(
        mut self,
        host: Option<String>,
        port: Option<u16>,
    ) -> CliResult<Self> {
        if let Some(host) = host {
            self.host = host;
        }
        if let Some(port) = port {
            self.port = port;
        }

        self.validate()?;
        Ok(self)
    }

    fn validate(&self) -> CliResult<()> {
        if self.database_path.trim().is_empty() {
            return Err(CliError::config_error("database_path must not be empty"));
        }

        if self.host.trim().is_empty() {
            return Err(CliError::config_error("host must not be empty"));
        }

        if self.port == 0 {
            return Err(CliError::config_error("port must be > 0"));
        }

        if !LOG_LEVELS.contains(&self.log_level.to_ascii_lowercase().as_str()) {
            return Err(CliError::config_error(format!(
                "Invalid log_level: '{}'. Must be one of: {}.",
                self.log_level,
                LOG_LEVELS.join(", ")
            )));
        }

        Ok(())
    }

    pub fn database_path(&self) -> PathBuf {
        PathBuf::from(&self.database_path)
    }

    pub fn store_config(&self) -> StoreConfig {
        StoreConfig::new(self.database_path())
            .with_busy_timeout(Duration::from_millis(self.busy_timeout_ms))
    }

    pub fn http_config(&self) -> HttpServerConfig {
        HttpServerConfig {
            host: self.host.clone(),
            port: self.port,
            cors_origins: self.cors_origins.clone(),
        }
    }
}
