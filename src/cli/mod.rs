//! CLI module for userdb
//!
//! Provides command-line interface for:
//! - init: Create the users table and exit
//! - serve: Boot the store and serve the HTTP API

mod args;
mod commands;
mod config;
mod errors;
mod io;

pub use args::{Cli, Command, StoreArgs};
pub use commands::{init, run, run_command, serve};
pub use config::Config;
pub use errors::{CliError, CliResult};
pub use io::write_response;
