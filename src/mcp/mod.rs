//! Tool-protocol transport: JSON-RPC 2.0 over stdio.
//!
//! Exposes a single tool, `execute_command`, and validates its arguments
//! before anything reaches the execution pipeline.

pub mod error;
pub mod handler;
pub mod jsonrpc;
pub mod protocol;
pub mod stdio;

pub use error::RpcError;
pub use handler::handle_request;
pub use jsonrpc::{JsonRpcRequest, JsonRpcResponse};
pub use protocol::{ToolDefinition, ToolResult, EXECUTE_COMMAND};
pub use stdio::serve;
