//! Transport-level errors and their JSON-RPC codes.

/// Errors rejected before a request reaches the execution pipeline.
#[derive(Debug, thiserror::Error)]
pub enum RpcError {
    /// The line was not valid JSON-RPC.
    #[error("Parse error: {0}")]
    Parse(String),

    /// The message was JSON but not a valid request.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Unknown method or tool name.
    #[error("Method not found: {0}")]
    MethodNotFound(String),

    /// Missing or wrongly typed parameters.
    #[error("Invalid params: {0}")]
    InvalidParams(String),

    /// The server failed while producing a response.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl RpcError {
    /// JSON-RPC 2.0 error code for this error.
    #[must_use]
    pub fn code(&self) -> i32 {
        match self {
            Self::Parse(_) => -32700,
            Self::InvalidRequest(_) => -32600,
            Self::MethodNotFound(_) => -32601,
            Self::InvalidParams(_) => -32602,
            Self::Internal(_) => -32603,
        }
    }
}
