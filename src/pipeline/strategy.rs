//! Choice between the buffered and streaming execution paths.

use std::path::PathBuf;

/// How a command is handed to the process runner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionStrategy {
    /// Run the whole string through the shell and collect output after exit.
    ///
    /// Used for pipelines, which need the shell to compose the stages.
    Buffered,
    /// Spawn the shell with an explicit argument vector and accumulate output
    /// chunk by chunk while the process runs.
    Streaming,
}

impl ExecutionStrategy {
    /// Picks [`Buffered`](Self::Buffered) for commands containing a pipe and
    /// [`Streaming`](Self::Streaming) for everything else.
    #[must_use]
    pub fn select(command: &str) -> Self {
        if command.contains('|') {
            Self::Buffered
        } else {
            Self::Streaming
        }
    }
}

/// A normalized command ready to be run, with its strategy fixed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionPlan {
    /// Path the runner must take.
    pub strategy: ExecutionStrategy,
    /// Sanitized and normalized command string.
    pub command: String,
    /// Working directory for the child; inherits the server's when `None`.
    pub cwd: Option<PathBuf>,
}

impl ExecutionPlan {
    /// Builds a plan, selecting the strategy from the command text.
    #[must_use]
    pub fn new(command: impl Into<String>, cwd: Option<PathBuf>) -> Self {
        let command = command.into();
        Self { strategy: ExecutionStrategy::select(&command), command, cwd }
    }
}
