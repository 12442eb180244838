//! Command-line interface of the `telegraph` binary.

pub mod commands;
pub mod output;
pub mod runtime;

use clap::{Parser, Subcommand};
use uuid::Uuid;

use commands::init::InitArgs;

#[derive(Parser)]
#[command(name = "telegraph")]
#[command(about = "Telegraph - keeps chat messages in sync with alert groups", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create the project directory, default config and database
    Init(InitArgs),

    /// Print the expired and restored heartbeat payloads of an integration
    Heartbeat {
        /// Integration name, e.g. `alertmanager`
        integration: String,
    },

    /// Dispatch an alert group action by its log record id
    Action {
        log_record_id: Uuid,
    },

    /// Dispatch an activity log update for an alert group
    LogUpdated {
        alert_group_id: Uuid,
    },

    /// Dispatch a newly created alert
    AlertCreated {
        alert_id: Uuid,
    },

    /// Run the worker pool, reading JSON events from stdin until EOF or Ctrl-C
    Serve,
}

/// Report a command failure and exit with status 1.
pub fn handle_error(err: anyhow::Error, json_mode: bool) -> ! {
    if json_mode {
        let body = serde_json::json!({ "error": format!("{err:#}") });
        eprintln!("{body}");
    } else {
        eprintln!("Error: {err:#}");
    }
    std::process::exit(1)
}
