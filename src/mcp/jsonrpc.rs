//! JSON-RPC 2.0 envelope types.

use serde::{Deserialize, Deserializer, Serialize};

use super::error::RpcError;

/// Protocol version string carried by every message.
pub const JSONRPC_VERSION: &str = "2.0";

/// JSON-RPC 2.0 request or notification.
#[derive(Debug, Deserialize)]
pub struct JsonRpcRequest {
    /// Must be `"2.0"`.
    pub jsonrpc: String,
    /// Request id; `None` only when the member is absent. An explicit
    /// `null` id is kept as `Some(Value::Null)` and still gets a response.
    #[serde(default, deserialize_with = "present_id")]
    pub id: Option<serde_json::Value>,
    /// Method name.
    pub method: String,
    /// Method parameters.
    #[serde(default)]
    pub params: serde_json::Value,
}

fn present_id<'de, D>(deserializer: D) -> Result<Option<serde_json::Value>, D::Error>
where
    D: Deserializer<'de>,
{
    serde_json::Value::deserialize(deserializer).map(Some)
}

impl JsonRpcRequest {
    /// Notifications carry no `id` member and never get a response.
    #[must_use]
    pub fn is_notification(&self) -> bool {
        self.id.is_none()
    }
}

/// JSON-RPC 2.0 response.
#[derive(Debug, Serialize)]
pub struct JsonRpcResponse {
    /// Always `"2.0"`.
    pub jsonrpc: &'static str,
    /// Id of the request being answered; `null` when it could not be read.
    pub id: Option<serde_json::Value>,
    /// Result payload on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<serde_json::Value>,
    /// Error payload on failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

/// Error object inside a [`JsonRpcResponse`].
#[derive(Debug, Serialize)]
pub struct JsonRpcError {
    /// Numeric JSON-RPC error code.
    pub code: i32,
    /// Human-readable message.
    pub message: String,
}

impl JsonRpcResponse {
    /// Successful response carrying `result`.
    #[must_use]
    pub fn success(id: Option<serde_json::Value>, result: serde_json::Value) -> Self {
        Self { jsonrpc: JSONRPC_VERSION, id, result: Some(result), error: None }
    }

    /// Error response built from an [`RpcError`].
    #[must_use]
    pub fn error(id: Option<serde_json::Value>, error: &RpcError) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            id,
            result: None,
            error: Some(JsonRpcError { code: error.code(), message: error.to_string() }),
        }
    }
}
