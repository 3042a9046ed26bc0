//! MCP over newline-delimited JSON-RPC.
//!
//! Each incoming line is handled on its own task; responses are funnelled
//! through a channel to a single writer so lines never interleave. Replies
//! can therefore arrive out of request order.

use crate::dispatcher::ToolDispatcher;
use crate::jsonrpc::{JsonRpcError, JsonRpcRequest, JsonRpcResponse, JSONRPC_VERSION};
use anyhow::{Context, Result};
use qc_mcp_tools::{ToolContext, ToolRegistry};
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;
use tracing::{debug, error, info};

pub const PROTOCOL_VERSION: &str = "2025-06-18";
pub const SERVER_NAME: &str = "quantconnect";

const INSTRUCTIONS: &str = "Tools for the QuantConnect platform: manage projects and files, \
compile, backtest, optimize and deploy live algorithms, and search the documentation. \
Compile a project before creating a backtest, and poll read_backtest_brief until the \
backtest completes.";

pub struct McpServer {
    dispatcher: ToolDispatcher,
}

impl McpServer {
    pub fn new(registry: Arc<ToolRegistry>, context: Arc<ToolContext>) -> Self {
        Self {
            dispatcher: ToolDispatcher::new(registry, context),
        }
    }

    /// Serves until `reader` reaches EOF and every in-flight call has replied.
    pub async fn serve<R, W>(self: Arc<Self>, mut reader: R, mut writer: W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin + Send + 'static,
    {
        let (tx, mut rx) = mpsc::unbounded_channel::<String>();

        let writer_task = tokio::spawn(async move {
            while let Some(line) = rx.recv().await {
                writer.write_all(line.as_bytes()).await?;
                writer.write_all(b"\n").await?;
                writer.flush().await?;
            }
            Ok::<_, std::io::Error>(())
        });

        let mut buf = Vec::new();
        loop {
            buf.clear();
            let read = reader
                .read_until(b'\n', &mut buf)
                .await
                .context("Failed to read stdin")?;
            if read == 0 {
                break;
            }
            if buf.iter().all(u8::is_ascii_whitespace) {
                continue;
            }

            let line = std::mem::take(&mut buf);
            let server = self.clone();
            let tx = tx.clone();
            tokio::spawn(async move {
                let Some(response) = server.handle_line(&line).await else {
                    return;
                };
                match serde_json::to_string(&response) {
                    Ok(encoded) => {
                        let _ = tx.send(encoded);
                    }
                    Err(e) => error!("Failed to encode response: {}", e),
                }
            });
        }

        info!("Input closed, waiting for in-flight calls");
        drop(tx);
        writer_task
            .await
            .context("Writer task failed")?
            .context("Failed to write stdout")
    }

    /// Parses one line and produces its reply, if it needs one. Bytes that
    /// are not UTF-8 JSON get a parse error.
    pub async fn handle_line(&self, line: impl AsRef<[u8]>) -> Option<JsonRpcResponse> {
        let message: Value = match serde_json::from_slice(line.as_ref()) {
            Ok(message) => message,
            Err(e) => {
                return Some(JsonRpcResponse::failure(
                    Value::Null,
                    JsonRpcError::parse_error(format!("Parse error: {}", e)),
                ))
            }
        };

        let Some(object) = message.as_object() else {
            return Some(JsonRpcResponse::failure(
                Value::Null,
                JsonRpcError::invalid_request("Request must be a JSON object"),
            ));
        };
        let id = object.get("id").cloned().unwrap_or(Value::Null);

        if object.get("jsonrpc").and_then(Value::as_str) != Some(JSONRPC_VERSION) {
            return Some(JsonRpcResponse::failure(
                id,
                JsonRpcError::invalid_request("jsonrpc must be \"2.0\""),
            ));
        }
        if !object.contains_key("method") {
            // Reply from the client; this server sends no requests.
            return None;
        }

        match serde_json::from_value::<JsonRpcRequest>(message) {
            Ok(request) => self.handle(request).await,
            Err(e) => Some(JsonRpcResponse::failure(
                id,
                JsonRpcError::invalid_request(e.to_string()),
            )),
        }
    }

    pub async fn handle(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        if request.is_notification() {
            debug!(method = %request.method, "Notification");
            return None;
        }
        let id = request.id.clone().unwrap_or(Value::Null);

        let result = match request.method.as_str() {
            "initialize" => Ok(self.initialize(&request.params)),
            "ping" => Ok(json!({})),
            "tools/list" => Ok(json!({ "tools": self.dispatcher.registry().listings() })),
            "tools/call" => self.dispatcher.call(request.params).await,
            other => Err(JsonRpcError::method_not_found(other)),
        };

        Some(match result {
            Ok(result) => JsonRpcResponse::success(id, result),
            Err(error) => JsonRpcResponse::failure(id, error),
        })
    }

    fn initialize(&self, params: &Value) -> Value {
        if let Some(client) = params.get("clientInfo") {
            info!(client = %client, "Client connected");
        }

        json!({
            "protocolVersion": PROTOCOL_VERSION,
            "capabilities": {
                "tools": {"listChanged": false}
            },
            "serverInfo": {
                "name": SERVER_NAME,
                "version": env!("CARGO_PKG_VERSION")
            },
            "instructions": INSTRUCTIONS
        })
    }
}
