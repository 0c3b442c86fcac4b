//! Result of a single command execution.

use std::time::Duration;

/// What the process runner produced for one request.
///
/// Settled exactly once per request and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionOutcome {
    /// The command ran; stderr is informational only.
    Success {
        /// Captured standard output.
        stdout: String,
        /// Captured standard error.
        stderr: String,
    },
    /// The command could not be run or failed without producing output.
    Failure {
        /// Human-readable cause.
        reason: String,
        /// Exit code, when the process got far enough to report one.
        exit_code: Option<i32>,
    },
}

impl ExecutionOutcome {
    /// Successful outcome with the given streams.
    #[must_use]
    pub fn success(stdout: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self::Success { stdout: stdout.into(), stderr: stderr.into() }
    }

    /// Failure without an exit code (spawn errors, timeouts, rejected input).
    #[must_use]
    pub fn failure(reason: impl Into<String>) -> Self {
        Self::Failure { reason: reason.into(), exit_code: None }
    }

    /// Failure reported when the timeout budget runs out.
    #[must_use]
    pub fn timed_out(budget: Duration) -> Self {
        Self::failure(format!("Command timed out after {} seconds", budget.as_secs()))
    }

    /// Maps a finished process to an outcome.
    ///
    /// Exit code zero is a success. So is any non-zero exit that still wrote
    /// to stdout: plenty of tools report informational codes next to valid
    /// output. Only a non-zero exit with empty stdout is a failure, carrying
    /// the exit code and any stderr text.
    #[must_use]
    pub fn from_exit(code: Option<i32>, stdout: String, stderr: String) -> Self {
        if code == Some(0) || !stdout.is_empty() {
            return Self::Success { stdout, stderr };
        }

        let mut reason = match code {
            Some(code) => format!("Command failed with exit code {code}"),
            None => "Command was terminated before reporting an exit code".to_string(),
        };
        if !stderr.is_empty() {
            reason.push('\n');
            reason.push_str(&stderr);
        }
        Self::Failure { reason, exit_code: code }
    }

    /// Returns `true` for [`ExecutionOutcome::Success`].
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_exit_without_output_is_success() {
        let outcome = ExecutionOutcome::from_exit(Some(0), String::new(), String::new());
        assert_eq!(outcome, ExecutionOutcome::success("", ""));
    }

    #[test]
    fn non_zero_exit_with_stdout_is_success() {
        let outcome =
            ExecutionOutcome::from_exit(Some(1), "partial\n".into(), "warning\n".into());
        assert_eq!(outcome, ExecutionOutcome::success("partial\n", "warning\n"));
    }

    #[test]
    fn non_zero_exit_without_stdout_is_failure() {
        let outcome = ExecutionOutcome::from_exit(Some(2), String::new(), String::new());
        assert_eq!(
            outcome,
            ExecutionOutcome::Failure {
                reason: "Command failed with exit code 2".into(),
                exit_code: Some(2),
            }
        );
    }

    #[test]
    fn failure_reason_appends_stderr() {
        let outcome =
            ExecutionOutcome::from_exit(Some(127), String::new(), "sh: nope: not found".into());
        match outcome {
            ExecutionOutcome::Failure { reason, exit_code } => {
                assert_eq!(reason, "Command failed with exit code 127\nsh: nope: not found");
                assert_eq!(exit_code, Some(127));
            }
            other => panic!("expected failure, got {other:?}"),
        }
    }

    #[test]
    fn signal_termination_without_output_is_failure() {
        let outcome = ExecutionOutcome::from_exit(None, String::new(), String::new());
        assert!(!outcome.is_success());
    }

    #[test]
    fn timeout_reason_names_budget() {
        let outcome = ExecutionOutcome::timed_out(Duration::from_secs(30));
        assert_eq!(outcome, ExecutionOutcome::failure("Command timed out after 30 seconds"));
    }
}
