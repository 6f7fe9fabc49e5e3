//! Observable lifecycle events
//!
//! Events are explicit and typed. Per-operation store events are emitted
//! through `ObservationScope` instead.

use std::fmt;

/// Observable events in userdb
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Boot & Lifecycle
    /// Startup begins
    BootStart,
    /// Startup complete, ready to serve
    BootComplete,
    /// Shutdown complete
    ShutdownComplete,

    // Configuration
    /// Configuration loaded
    ConfigLoaded,
    /// `users` table verified or created
    SchemaReady,
    /// `users` table could not be created (FATAL)
    SchemaFailed,

    // Server
    /// Listener bound, accepting requests
    ServerListening,

    // Requests
    /// Request rejected before reaching the store
    RequestRejected,
    /// Request failed inside the store
    RequestFailed,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::BootStart => "USERDB_STARTUP_BEGIN",
            Event::BootComplete => "USERDB_STARTUP_COMPLETE",
            Event::ShutdownComplete => "SHUTDOWN_COMPLETE",

            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::SchemaReady => "SCHEMA_READY",
            Event::SchemaFailed => "SCHEMA_FAILED",

            Event::ServerListening => "SERVER_LISTENING",

            Event::RequestRejected => "REQUEST_REJECTED",
            Event::RequestFailed => "REQUEST_FAILED",
        }
    }

    /// Returns true if this event indicates a fatal condition
    pub fn is_fatal(&self) -> bool {
        matches!(self, Event::SchemaFailed)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
