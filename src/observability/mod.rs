//! Observability subsystem for userdb
//!
//! - Structured logging (JSON lines through the `log` facade)
//! - Lifecycle events
//! - Scoped begin/complete logging with durations
//!
//! # Usage
//!
//! ```ignore
//! use userdb::observability::{init_logging, Logger, ObservationScope};
//!
//! init_logging("info")?;
//! Logger::info("SERVER_LISTENING", &[("addr", "127.0.0.1:5000")]);
//!
//! let scope = ObservationScope::new("STORE_LIST");
//! // ... do work ...
//! scope.complete();
//! ```

mod events;
mod logger;
mod scope;

pub use events::Event;
pub use logger::{Logger, Severity};
pub use scope::{ObservationScope, Timer};

use std::io::Write;

use flexi_logger::{DeferredNow, FlexiLoggerError, LoggerHandle};
use log::Record;
use once_cell::sync::OnceCell;
use thiserror::Error;

static LOGGER_HANDLE: OnceCell<LoggerHandle> = OnceCell::new();

/// Observability error
///
/// Observability failure must never crash the server; callers decide whether
/// a failed logger bootstrap is fatal.
#[derive(Debug, Error)]
pub enum ObservabilityError {
    /// Level string (or `RUST_LOG`) could not be parsed
    #[error("USERDB_OBSERVABILITY_FAILED: invalid log specification '{spec}': {source}")]
    InvalidSpec {
        spec: String,
        #[source]
        source: FlexiLoggerError,
    },

    /// Backend could not be installed
    #[error("USERDB_OBSERVABILITY_FAILED: failed to start logger: {0}")]
    Start(#[source] FlexiLoggerError),
}

/// Result type for observability operations
pub type ObservabilityResult<T> = Result<T, ObservabilityError>;

/// Starts the process-wide log backend writing JSON lines to stderr.
///
/// `RUST_LOG` takes precedence over `level`. Calling this more than once is a
/// no-op.
pub fn init_logging(level: &str) -> ObservabilityResult<()> {
    LOGGER_HANDLE
        .get_or_try_init(|| {
            flexi_logger::Logger::try_with_env_or_str(level)
                .map_err(|source| ObservabilityError::InvalidSpec {
                    spec: level.to_string(),
                    source,
                })?
                .log_to_stderr()
                .format(message_only_format)
                .start()
                .map_err(ObservabilityError::Start)
        })
        .map(|_| ())
}

/// Lines are pre-rendered JSON; the backend adds nothing.
fn message_only_format(
    w: &mut dyn Write,
    _now: &mut DeferredNow,
    record: &Record,
) -> std::io::Result<()> {
    write!(w, "{}", record.args())
}

/// Log a lifecycle event
pub fn log_event(event: Event) {
    log_event_with_fields(event, &[]);
}

/// Log a lifecycle event with fields
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    let severity = if event.is_fatal() {
        Severity::Fatal
    } else {
        Severity::Info
    };
    Logger::log(severity, event.as_str(), fields);
}
