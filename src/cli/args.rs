//! CLI argument definitions using clap
//!
//! Commands:
//! - userdb init  [--config <path>] [--database <path>]
//! - userdb serve [--config <path>] [--database <path>] [--host <host>] [--port <port>]

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// userdb - A small HTTP user registry backed by SQLite
#[derive(Parser, Debug)]
#[command(name = "userdb")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create the users table and exit
    Init {
        #[command(flatten)]
        store: StoreArgs,
    },

    /// Create the users table if needed and serve the HTTP API
    Serve {
        #[command(flatten)]
        store: StoreArgs,

        /// Host to bind to (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to (overrides config)
        #[arg(long)]
        port: Option<u16>,
    },
}

/// Options shared by every command
#[derive(Args, Debug, Clone, Default)]
pub struct StoreArgs {
    /// Path to a JSON configuration file; defaults apply when omitted
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// SQLite database file (overrides config)
    #[arg(long)]
    pub database: Option<PathBuf>,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_serve_overrides() {
        let cli = Cli::try_parse_from([
            "userdb",
            "serve",
            "--database",
            "/tmp/u.db",
            "--port",
            "8080",
        ])
        .unwrap();

        match cli.command {
            Command::Serve { store, host, port } => {
                assert_eq!(store.database, Some(PathBuf::from("/tmp/u.db")));
                assert!(store.config.is_none());
                assert!(host.is_none());
                assert_eq!(port, Some(8080));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_init() {
        let cli = Cli::try_parse_from(["userdb", "init", "--config", "userdb.json"]).unwrap();
        assert!(matches!(cli.command, Command::Init { .. }));
    }
}
