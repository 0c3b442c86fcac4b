//! Service context bundling the platform profile and the shell port.

use std::time::Duration;

use crate::adapters::live::LiveShellExecutor;
use crate::config::GatewayConfig;
use crate::pipeline::platform::PlatformProfile;
use crate::ports::shell::ShellExecutor;

/// Everything a request needs, built once at startup and shared read-only.
pub struct ServiceContext {
    /// Host conventions used by the sanitizer and normalizer.
    pub profile: PlatformProfile,
    /// Shell executor for running commands.
    pub shell: Box<dyn ShellExecutor>,
}

impl ServiceContext {
    /// Creates a context from explicit parts.
    #[must_use]
    pub fn new(profile: PlatformProfile, shell: Box<dyn ShellExecutor>) -> Self {
        Self { profile, shell }
    }

    /// Creates a live context that runs commands on the host shell.
    #[must_use]
    pub fn live(config: &GatewayConfig) -> Self {
        Self::live_with(config.profile(), config.timeout)
    }

    /// Creates a live context for an explicit profile and timeout budget.
    #[must_use]
    pub fn live_with(profile: PlatformProfile, timeout: Duration) -> Self {
        let shell = LiveShellExecutor::new(profile.clone(), timeout);
        Self { profile, shell: Box::new(shell) }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::pipeline::{execute, CommandRequest};

    #[tokio::test]
    async fn live_context_runs_commands() {
        let ctx = ServiceContext::live_with(PlatformProfile::unix(), Duration::from_secs(10));
        let response = execute(&ctx, &CommandRequest::new("echo from; echo live")).await;
        assert!(!response.is_error);
        assert_eq!(response.text, "from echo live");
    }

    #[tokio::test]
    async fn live_context_reports_failures() {
        let ctx = ServiceContext::live_with(PlatformProfile::unix(), Duration::from_secs(10));
        let response = execute(&ctx, &CommandRequest::new("exit 4")).await;
        assert!(response.is_error);
        assert!(response.text.contains("Command: exit 4"));
        assert!(response.text.contains("exit code 4"));
    }
}
