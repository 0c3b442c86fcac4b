//! `shellgate serve` command.

use std::sync::Arc;

use tracing::{info, warn};

use super::runtime;
use crate::config::GatewayConfig;
use crate::context::ServiceContext;
use crate::mcp;

/// Execute the `serve` command.
///
/// Serves stdio until stdin closes or Ctrl-C arrives, then waits for requests
/// already in flight and returns.
///
/// # Errors
///
/// Returns an error string if the runtime cannot start or stdio fails.
pub fn run(config: &GatewayConfig) -> Result<(), String> {
    let runtime = runtime()?;
    let ctx = Arc::new(ServiceContext::live(config));
    info!(
        shell = %ctx.profile.shell_path,
        timeout_secs = config.timeout.as_secs(),
        "serving execute_command over stdio"
    );

    let result = runtime.block_on(async move {
        let mut stdout = tokio::io::stdout();
        mcp::serve(ctx, tokio::io::stdin(), &mut stdout, interrupted()).await
    });

    // The stdin reader sits on a blocking thread that may never return.
    runtime.shutdown_background();

    result.map_err(|e| format!("Server error: {e}"))?;
    info!("server stopped");
    Ok(())
}

/// Resolves on Ctrl-C; never resolves if the signal cannot be watched.
async fn interrupted() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "cannot listen for interrupts");
        std::future::pending::<()>().await;
    }
}
