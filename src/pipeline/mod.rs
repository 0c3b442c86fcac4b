//! The command execution pipeline.
//!
//! ```text
//! raw command ─► sanitize ─► normalize ─► select strategy ─► run ─► format
//! ```
//!
//! Every stage is infallible from the caller's point of view: whatever goes
//! wrong ends up as an [`ExecutionOutcome::Failure`] and is formatted into a
//! [`ToolResponse`] with `is_error` set.

pub mod format;
pub mod normalize;
pub mod outcome;
pub mod platform;
pub mod sanitize;
pub mod strategy;

use std::path::PathBuf;

use tracing::{debug, info};

use crate::context::ServiceContext;
pub use format::{format_outcome, ToolResponse};
pub use outcome::ExecutionOutcome;
pub use platform::PlatformProfile;
pub use strategy::{ExecutionPlan, ExecutionStrategy};

/// Reason given when nothing is left to run after sanitization.
pub const EMPTY_COMMAND_REASON: &str = "Command is empty after sanitization";

/// A validated request from the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandRequest {
    /// Command exactly as the caller sent it.
    pub command: String,
    /// Optional working directory for the child process.
    pub cwd: Option<String>,
}

impl CommandRequest {
    /// Creates a request without a working directory.
    #[must_use]
    pub fn new(command: impl Into<String>) -> Self {
        Self { command: command.into(), cwd: None }
    }

    /// Sets the working directory.
    #[must_use]
    pub fn with_cwd(mut self, cwd: impl Into<String>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }
}

/// Runs `request` through the whole pipeline and formats the result.
///
/// Commands that are blank once sanitized are rejected without spawning a
/// shell.
pub async fn execute(ctx: &ServiceContext, request: &CommandRequest) -> ToolResponse {
    let sanitized = sanitize::sanitize(&request.command, &ctx.profile);
    let normalized = normalize::normalize(&sanitized, &ctx.profile);
    if normalized != request.command {
        debug!(original = %request.command, rewritten = %normalized, "command rewritten");
    }

    let outcome = if normalized.trim().is_empty() {
        ExecutionOutcome::failure(EMPTY_COMMAND_REASON)
    } else {
        let plan = ExecutionPlan::new(normalized, request.cwd.as_ref().map(PathBuf::from));
        ctx.shell.run(plan).await
    };

    info!(success = outcome.is_success(), "command finished");
    format_outcome(&outcome, &request.command)
}

#[cfg(test)]
mod tests {
    use std::path::Path;
    use std::sync::Arc;

    use super::*;
    use crate::adapters::scripted::ScriptedShellExecutor;

    fn context(profile: PlatformProfile, shell: &Arc<ScriptedShellExecutor>) -> ServiceContext {
        ServiceContext::new(profile, Box::new(Arc::clone(shell)))
    }

    #[tokio::test]
    async fn sanitizes_and_normalizes_before_running() {
        let shell = Arc::new(ScriptedShellExecutor::new([ExecutionOutcome::success("ok", "")]));
        let ctx = context(PlatformProfile::unix(), &shell);

        let response = execute(&ctx, &CommandRequest::new("dir /tmp; rm -rf x")).await;

        assert_eq!(response, ToolResponse { text: "ok".into(), is_error: false });
        let plans = shell.received();
        assert_eq!(plans.len(), 1);
        assert_eq!(plans[0].command, "ls /tmp rm -rf x");
        assert_eq!(plans[0].strategy, ExecutionStrategy::Streaming);
    }

    #[tokio::test]
    async fn pipes_select_buffered_path() {
        let shell = Arc::new(ScriptedShellExecutor::new([ExecutionOutcome::success("", "")]));
        let ctx = context(PlatformProfile::unix(), &shell);

        execute(&ctx, &CommandRequest::new("ps aux | grep sshd")).await;

        assert_eq!(shell.received()[0].strategy, ExecutionStrategy::Buffered);
    }

    #[tokio::test]
    async fn or_chain_no_longer_selects_buffered_path() {
        let shell = Arc::new(ScriptedShellExecutor::new([ExecutionOutcome::success("", "")]));
        let ctx = context(PlatformProfile::windows(), &shell);

        execute(&ctx, &CommandRequest::new("ls C:\\ || echo fallback")).await;

        let plan = &shell.received()[0];
        assert_eq!(plan.command, "dir C:\\  echo fallback");
        assert_eq!(plan.strategy, ExecutionStrategy::Streaming);
    }

    #[tokio::test]
    async fn forwards_working_directory() {
        let shell = Arc::new(ScriptedShellExecutor::new([ExecutionOutcome::success("", "")]));
        let ctx = context(PlatformProfile::unix(), &shell);

        execute(&ctx, &CommandRequest::new("pwd").with_cwd("/var/tmp")).await;

        assert_eq!(shell.received()[0].cwd.as_deref(), Some(Path::new("/var/tmp")));
    }

    #[tokio::test]
    async fn blank_command_is_rejected_without_spawning() {
        let shell = Arc::new(ScriptedShellExecutor::default());
        let ctx = context(PlatformProfile::unix(), &shell);

        let response = execute(&ctx, &CommandRequest::new(" ;; \0 ")).await;

        assert!(response.is_error);
        assert!(response.text.contains(EMPTY_COMMAND_REASON));
        assert!(response.text.contains(" ;; \0 "));
        assert!(shell.received().is_empty());
    }

    #[tokio::test]
    async fn failure_echoes_original_command() {
        let shell = Arc::new(ScriptedShellExecutor::new([ExecutionOutcome::Failure {
            reason: "Command failed with exit code 2".into(),
            exit_code: Some(2),
        }]));
        let ctx = context(PlatformProfile::unix(), &shell);

        let response = execute(&ctx, &CommandRequest::new("false; false")).await;

        assert!(response.is_error);
        assert!(response.text.contains("Command: false; false"));
        assert!(response.text.contains("exit code 2"));
    }
}
