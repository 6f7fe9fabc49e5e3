//! CLI command implementations
//!
//! Boot order for `serve`:
//! 1. Resolve configuration
//! 2. Start logging
//! 3. Ensure the `users` table exists
//! 4. Serve HTTP until Ctrl-C

use serde_json::json;

use super::args::{Command, StoreArgs};
use super::config::Config;
use super::errors::{CliError, CliResult};
use super::io::write_response;
use crate::http_server::HttpServer;
use crate::observability::{init_logging, log_event, log_event_with_fields, Event};
use crate::store::UserStore;

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Init { store } => init(&store),
        Command::Serve { store, host, port } => serve(&store, host, port),
    }
}

/// Create the `users` table and exit
///
/// Safe to run against an existing database: the table is only created when
/// absent.
pub fn init(args: &StoreArgs) -> CliResult<()> {
    let config = Config::resolve(args)?;
    start_logging(&config)?;

    let store = boot_store(&config)?;

    write_response(json!({
        "initialized": true,
        "database_path": store.config().database_path().display().to_string(),
    }))
}

/// Start the HTTP server
///
/// Boots the store (creating the table if needed) and serves on the
/// configured address until Ctrl-C.
pub fn serve(args: &StoreArgs, host: Option<String>, port: Option<u16>) -> CliResult<()> {
    let config = Config::resolve(args)?.with_listen_overrides(host, port)?;
    start_logging(&config)?;

    log_event(Event::BootStart);
    let store = boot_store(&config)?;

    let server = HttpServer::new(config.http_config(), store);
    log_event_with_fields(Event::BootComplete, &[("addr", server.socket_addr().as_str())]);

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        server
            .start()
            .await
            .map_err(|e| CliError::boot_failed(format!("HTTP server failed: {}", e)))
    })
}

fn start_logging(config: &Config) -> CliResult<()> {
    init_logging(&config.log_level)
        .map_err(|e| CliError::boot_failed(format!("Failed to start logging: {}", e)))?;

    log_event_with_fields(
        Event::ConfigLoaded,
        &[
            ("database_path", config.database_path.as_str()),
            ("log_level", config.log_level.as_str()),
        ],
    );
    Ok(())
}

fn boot_store(config: &Config) -> CliResult<UserStore> {
    let store = UserStore::new(config.store_config());

    if let Err(e) = store.initialize() {
        let error = e.to_string();
        log_event_with_fields(Event::SchemaFailed, &[("error", error.as_str())]);
        return Err(CliError::boot_failed(format!(
            "Failed to initialize database {}: {}",
            config.database_path, e
        )));
    }

    log_event_with_fields(
        Event::SchemaReady,
        &[("database_path", config.database_path.as_str())],
    );
    Ok(store)
}
