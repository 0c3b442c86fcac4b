//! Turns an execution outcome into caller-facing text.

use super::outcome::ExecutionOutcome;

/// Text returned when a command succeeds without printing anything.
pub const NO_OUTPUT_PLACEHOLDER: &str = "Command executed successfully (no output)";
/// First line of every failure message.
pub const FAILURE_HEADER: &str = "Command execution failed";
/// Marker line placed before stderr text.
pub const STDERR_MARKER: &str = "STDERR:";

/// Formatted response handed back to the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolResponse {
    /// Human-readable payload.
    pub text: String,
    /// Whether the caller should treat the payload as an error.
    pub is_error: bool,
}

/// Formats `outcome` for the caller.
///
/// Failures echo `original_command` exactly as the caller sent it, before
/// sanitization, so the message can be matched against the request.
#[must_use]
pub fn format_outcome(outcome: &ExecutionOutcome, original_command: &str) -> ToolResponse {
    match outcome {
        ExecutionOutcome::Success { stdout, stderr } => {
            ToolResponse { text: merge_streams(stdout, stderr), is_error: false }
        }
        ExecutionOutcome::Failure { reason, .. } => ToolResponse {
            text: format!("{FAILURE_HEADER}\nCommand: {original_command}\nError: {reason}"),
            is_error: true,
        },
    }
}

fn merge_streams(stdout: &str, stderr: &str) -> String {
    let stdout = stdout.trim();
    let stderr = stderr.trim();

    match (stdout.is_empty(), stderr.is_empty()) {
        (true, true) => NO_OUTPUT_PLACEHOLDER.to_string(),
        (false, true) => stdout.to_string(),
        (true, false) => format!("{STDERR_MARKER}\n{stderr}"),
        (false, false) => format!("{stdout}\n\n{STDERR_MARKER}\n{stderr}"),
    }
}
