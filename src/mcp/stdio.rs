//! Line-delimited JSON-RPC server loop.

use std::future::Future;
use std::io;
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::task::JoinSet;
use tracing::{debug, error, info, warn};

use super::error::RpcError;
use super::handler::handle_request;
use super::jsonrpc::{JsonRpcRequest, JsonRpcResponse};
use crate::context::ServiceContext;

/// Serves requests read from `input` until it closes or `shutdown` resolves.
///
/// Each request runs on its own task, so a slow command does not hold up the
/// others. Responses are written from this loop only, one JSON object per
/// line. After shutdown no new lines are read, but requests already in flight
/// finish and their responses are flushed before returning.
///
/// # Errors
///
/// Returns an error if reading `input` or writing `output` fails.
pub async fn serve<R, W, S>(
    ctx: Arc<ServiceContext>,
    input: R,
    output: &mut W,
    shutdown: S,
) -> io::Result<()>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
    S: Future<Output = ()>,
{
    let mut lines = BufReader::new(input).split(b'\n');
    let mut in_flight: JoinSet<Option<JsonRpcResponse>> = JoinSet::new();
    let mut reading = true;
    tokio::pin!(shutdown);

    while reading || !in_flight.is_empty() {
        tokio::select! {
            () = &mut shutdown, if reading => {
                info!(in_flight = in_flight.len(), "shutdown requested, no longer accepting requests");
                reading = false;
            }
            line = lines.next_segment(), if reading => match line? {
                Some(line) => {
                    if let Some(response) = accept(&ctx, &line, &mut in_flight) {
                        write_response(output, &response).await?;
                    }
                }
                None => {
                    debug!("input closed");
                    reading = false;
                }
            },
            Some(joined) = in_flight.join_next(), if !in_flight.is_empty() => match joined {
                Ok(Some(response)) => write_response(output, &response).await?,
                Ok(None) => {}
                Err(err) => error!(error = %err, "request task failed"),
            },
        }
    }

    output.flush().await
}

/// Parses one line and starts handling it.
///
/// Lines are raw bytes; anything that is not UTF-8 JSON gets a parse error
/// and the loop keeps reading. Returns a response right away only for lines
/// that cannot be dispatched.
fn accept(
    ctx: &Arc<ServiceContext>,
    line: &[u8],
    in_flight: &mut JoinSet<Option<JsonRpcResponse>>,
) -> Option<JsonRpcResponse> {
    let line = line.trim_ascii();
    if line.is_empty() {
        return None;
    }

    let value: serde_json::Value = match serde_json::from_slice(line) {
        Ok(value) => value,
        Err(err) => {
            warn!(error = %err, "unparseable message");
            return Some(JsonRpcResponse::error(None, &RpcError::Parse(err.to_string())));
        }
    };
    let id = value.get("id").cloned();

    match serde_json::from_value::<JsonRpcRequest>(value) {
        Ok(request) => {
            let ctx = Arc::clone(ctx);
            in_flight.spawn(async move { handle_request(&ctx, request).await });
            None
        }
        Err(err) => {
            warn!(error = %err, "malformed request");
            Some(JsonRpcResponse::error(id, &RpcError::InvalidRequest(err.to_string())))
        }
    }
}

async fn write_response<W>(output: &mut W, response: &JsonRpcResponse) -> io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    let mut line = serde_json::to_vec(response)?;
    line.push(b'\n');
    output.write_all(&line).await?;
    output.flush().await
}
