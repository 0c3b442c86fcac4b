//! Request dispatch for the tool protocol.

use serde_json::json;
use tracing::{debug, info_span, warn, Instrument};
use uuid::Uuid;

use super::error::RpcError;
use super::jsonrpc::{JsonRpcRequest, JsonRpcResponse, JSONRPC_VERSION};
use super::protocol::{
    CallToolParams, ExecuteCommandArgs, ServerInfo, ToolDefinition, ToolResult, EXECUTE_COMMAND,
    PROTOCOL_VERSION,
};
use crate::context::ServiceContext;
use crate::pipeline::{self, CommandRequest};

/// Handles one request, returning `None` for notifications.
pub async fn handle_request(
    ctx: &ServiceContext,
    request: JsonRpcRequest,
) -> Option<JsonRpcResponse> {
    if request.is_notification() {
        debug!(method = %request.method, "notification received");
        return None;
    }

    let id = request.id.clone();
    match dispatch(ctx, request).await {
        Ok(result) => Some(JsonRpcResponse::success(id, result)),
        Err(err) => {
            warn!(code = err.code(), error = %err, "request rejected");
            Some(JsonRpcResponse::error(id, &err))
        }
    }
}

async fn dispatch(
    ctx: &ServiceContext,
    request: JsonRpcRequest,
) -> Result<serde_json::Value, RpcError> {
    if request.jsonrpc != JSONRPC_VERSION {
        return Err(RpcError::InvalidRequest(format!(
            "unsupported jsonrpc version {:?}",
            request.jsonrpc
        )));
    }

    match request.method.as_str() {
        "initialize" => {
            let info = ServerInfo::default();
            Ok(json!({
                "protocolVersion": PROTOCOL_VERSION,
                "capabilities": { "tools": {} },
                "serverInfo": { "name": info.name, "version": info.version }
            }))
        }
        "ping" => Ok(json!({})),
        "tools/list" => Ok(json!({ "tools": [ToolDefinition::execute_command()] })),
        "tools/call" => call_tool(ctx, request.params).await,
        other => Err(RpcError::MethodNotFound(other.to_string())),
    }
}

async fn call_tool(
    ctx: &ServiceContext,
    params: serde_json::Value,
) -> Result<serde_json::Value, RpcError> {
    let params: CallToolParams =
        serde_json::from_value(params).map_err(|e| RpcError::InvalidParams(e.to_string()))?;
    if params.name != EXECUTE_COMMAND {
        return Err(RpcError::MethodNotFound(format!("Unknown tool: {}", params.name)));
    }

    let args: ExecuteCommandArgs = serde_json::from_value(params.arguments)
        .map_err(|e| RpcError::InvalidParams(format!("{EXECUTE_COMMAND}: {e}")))?;
    let request = CommandRequest::from(args);

    let span = info_span!("tool_call", request_id = %Uuid::new_v4());
    let response = pipeline::execute(ctx, &request).instrument(span).await;

    serde_json::to_value(ToolResult::from(response)).map_err(|e| RpcError::Internal(e.to_string()))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::adapters::scripted::ScriptedShellExecutor;
    use crate::pipeline::{ExecutionOutcome, PlatformProfile};

    fn context(outcomes: Vec<ExecutionOutcome>) -> (ServiceContext, Arc<ScriptedShellExecutor>) {
        let shell = Arc::new(ScriptedShellExecutor::new(outcomes));
        let ctx = ServiceContext::new(PlatformProfile::unix(), Box::new(Arc::clone(&shell)));
        (ctx, shell)
    }

    fn request(value: serde_json::Value) -> JsonRpcRequest {
        serde_json::from_value(value).unwrap()
    }

    async fn call(ctx: &ServiceContext, value: serde_json::Value) -> serde_json::Value {
        let response = handle_request(ctx, request(value)).await.expect("response");
        serde_json::to_value(response).unwrap()
    }

    #[tokio::test]
    async fn initialize_reports_tools_capability() {
        let (ctx, _) = context(vec![]);
        let value =
            call(&ctx, json!({"jsonrpc": "2.0", "id": 1, "method": "initialize", "params": {}}))
                .await;
        assert_eq!(value["result"]["protocolVersion"], PROTOCOL_VERSION);
        assert_eq!(value["result"]["serverInfo"]["name"], "shellgate");
        assert!(value["result"]["capabilities"]["tools"].is_object());
    }

    #[tokio::test]
    async fn lists_single_tool() {
        let (ctx, _) = context(vec![]);
        let value = call(&ctx, json!({"jsonrpc": "2.0", "id": 2, "method": "tools/list"})).await;
        let tools = value["result"]["tools"].as_array().unwrap();
        assert_eq!(tools.len(), 1);
        assert_eq!(tools[0]["name"], EXECUTE_COMMAND);
    }

    #[tokio::test]
    async fn ping_returns_empty_object() {
        let (ctx, _) = context(vec![]);
        let value = call(&ctx, json!({"jsonrpc": "2.0", "id": "p", "method": "ping"})).await;
        assert_eq!(value["id"], "p");
        assert_eq!(value["result"], json!({}));
    }

    #[tokio::test]
    async fn notifications_get_no_response() {
        let (ctx, _) = context(vec![]);
        let req = request(json!({"jsonrpc": "2.0", "method": "notifications/initialized"}));
        assert!(handle_request(&ctx, req).await.is_none());
    }

    #[tokio::test]
    async fn null_id_request_is_answered() {
        let (ctx, _) = context(vec![]);
        let value = call(&ctx, json!({"jsonrpc": "2.0", "id": null, "method": "ping"})).await;
        assert_eq!(value["id"], serde_json::Value::Null);
        assert_eq!(value["result"], json!({}));
    }

    #[tokio::test]
    async fn unknown_method_is_not_found() {
        let (ctx, _) = context(vec![]);
        let value = call(&ctx, json!({"jsonrpc": "2.0", "id": 3, "method": "resources/list"})).await;
        assert_eq!(value["error"]["code"], -32601);
        assert!(value["error"]["message"].as_str().unwrap().contains("resources/list"));
    }

    #[tokio::test]
    async fn unknown_tool_is_not_found() {
        let (ctx, shell) = context(vec![]);
        let value = call(
            &ctx,
            json!({"jsonrpc": "2.0", "id": 4, "method": "tools/call",
                   "params": {"name": "delete_everything", "arguments": {"command": "ls"}}}),
        )
        .await;
        assert_eq!(value["error"]["code"], -32601);
        assert!(shell.received().is_empty());
    }

    #[tokio::test]
    async fn malformed_arguments_are_invalid_params() {
        let (ctx, shell) = context(vec![]);
        for arguments in [json!({}), json!({"command": 42}), json!({"command": "ls", "cwd": true})]
        {
            let value = call(
                &ctx,
                json!({"jsonrpc": "2.0", "id": 5, "method": "tools/call",
                       "params": {"name": EXECUTE_COMMAND, "arguments": arguments.clone()}}),
            )
            .await;
            assert_eq!(value["error"]["code"], -32602, "arguments {arguments}");
        }
        assert!(shell.received().is_empty());
    }

    #[tokio::test]
    async fn missing_tool_name_is_invalid_params() {
        let (ctx, _) = context(vec![]);
        let value = call(
            &ctx,
            json!({"jsonrpc": "2.0", "id": 6, "method": "tools/call", "params": {}}),
        )
        .await;
        assert_eq!(value["error"]["code"], -32602);
    }

    #[tokio::test]
    async fn wrong_version_is_invalid_request() {
        let (ctx, _) = context(vec![]);
        let value = call(&ctx, json!({"jsonrpc": "1.0", "id": 7, "method": "ping"})).await;
        assert_eq!(value["error"]["code"], -32600);
    }

    #[tokio::test]
    async fn tool_call_runs_pipeline() {
        let (ctx, shell) = context(vec![ExecutionOutcome::success("file.txt\n", "")]);
        let value = call(
            &ctx,
            json!({"jsonrpc": "2.0", "id": 8, "method": "tools/call",
                   "params": {"name": EXECUTE_COMMAND,
                              "arguments": {"command": "dir .", "cwd": "/srv"}}}),
        )
        .await;

        assert_eq!(value["result"], json!({"content": [{"type": "text", "text": "file.txt"}]}));
        let plan = &shell.received()[0];
        assert_eq!(plan.command, "ls .");
        assert_eq!(plan.cwd.as_deref(), Some(std::path::Path::new("/srv")));
    }

    #[tokio::test]
    async fn tool_failure_is_result_not_rpc_error() {
        let (ctx, _) = context(vec![ExecutionOutcome::failure("No such file or directory")]);
        let value = call(
            &ctx,
            json!({"jsonrpc": "2.0", "id": 9, "method": "tools/call",
                   "params": {"name": EXECUTE_COMMAND, "arguments": {"command": "nope"}}}),
        )
        .await;

        assert!(value.get("error").is_none());
        assert_eq!(value["result"]["isError"], true);
        let text = value["result"]["content"][0]["text"].as_str().unwrap();
        assert!(text.contains("Command: nope"));
    }
}
