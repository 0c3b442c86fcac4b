//! Command dispatch and handlers.

pub mod exec;
pub mod serve;

use tokio::runtime::Runtime;
use tracing::debug;

use crate::cli::{Cli, Command};
use crate::config::GatewayConfig;
use crate::logging;

/// Dispatch a parsed command line to its handler.
///
/// Loads configuration and installs logging before anything runs.
///
/// # Errors
///
/// Returns an error string if configuration is invalid or the handler fails.
pub fn dispatch(cli: &Cli) -> Result<(), String> {
    let config = GatewayConfig::load(cli.config.as_deref())?;
    logging::init(&config.log_level);
    debug!(?config, "configuration loaded");

    match &cli.command {
        None | Some(Command::Serve) => serve::run(&config),
        Some(Command::Exec { command, cwd }) => exec::run(&config, command, cwd.as_deref()),
    }
}

/// Builds the single-threaded runtime every handler runs on.
fn runtime() -> Result<Runtime, String> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("Failed to start async runtime: {e}"))
}
