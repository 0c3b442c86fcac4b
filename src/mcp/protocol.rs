//! Tool-protocol payloads: server info, the tool definition and call results.

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::pipeline::{CommandRequest, ToolResponse};

/// Protocol revision reported from `initialize`.
pub const PROTOCOL_VERSION: &str = "2025-06-18";
/// Name of the single exposed tool.
pub const EXECUTE_COMMAND: &str = "execute_command";

/// Identity reported from `initialize`.
#[derive(Debug, Serialize, Clone)]
pub struct ServerInfo {
    /// Server name.
    pub name: String,
    /// Server version.
    pub version: String,
}

impl Default for ServerInfo {
    fn default() -> Self {
        Self {
            name: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Entry in the `tools/list` response.
#[derive(Debug, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ToolDefinition {
    /// Tool name used in `tools/call`.
    pub name: String,
    /// Description shown to the caller.
    pub description: String,
    /// JSON Schema of the arguments.
    pub input_schema: serde_json::Value,
}

impl ToolDefinition {
    /// Definition of the `execute_command` tool.
    #[must_use]
    pub fn execute_command() -> Self {
        Self {
            name: EXECUTE_COMMAND.to_string(),
            description: "Execute a command in the host shell and return its output. \
                Semicolons and `||` chains are stripped; single pipes are allowed. \
                Commands are killed after the server's timeout."
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "command": {
                        "type": "string",
                        "description": "Command to execute"
                    },
                    "cwd": {
                        "type": "string",
                        "description": "Working directory for the command"
                    }
                },
                "required": ["command"]
            }),
        }
    }
}

/// `tools/call` parameters.
#[derive(Debug, Deserialize)]
pub struct CallToolParams {
    /// Tool to invoke.
    pub name: String,
    /// Tool arguments.
    #[serde(default)]
    pub arguments: serde_json::Value,
}

/// Arguments of `execute_command`.
#[derive(Debug, Deserialize, PartialEq, Eq)]
pub struct ExecuteCommandArgs {
    /// Command to run.
    pub command: String,
    /// Optional working directory.
    #[serde(default)]
    pub cwd: Option<String>,
}

impl From<ExecuteCommandArgs> for CommandRequest {
    fn from(args: ExecuteCommandArgs) -> Self {
        Self { command: args.command, cwd: args.cwd }
    }
}

/// Content item of a tool result.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct ToolContent {
    /// Content kind; always `"text"` here.
    #[serde(rename = "type")]
    pub content_type: String,
    /// Text payload.
    pub text: String,
}

impl ToolContent {
    /// Text content item.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self { content_type: "text".to_string(), text: text.into() }
    }
}

/// Result of a `tools/call`.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ToolResult {
    /// Content items.
    pub content: Vec<ToolContent>,
    /// Set only when the call failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_error: Option<bool>,
}

impl From<ToolResponse> for ToolResult {
    fn from(response: ToolResponse) -> Self {
        Self {
            content: vec![ToolContent::text(response.text)],
            is_error: response.is_error.then_some(true),
        }
    }
}
