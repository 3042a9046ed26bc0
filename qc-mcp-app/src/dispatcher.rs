use crate::jsonrpc::JsonRpcError;
use qc_mcp_tools::{ToolContext, ToolError, ToolRegistry};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{error, info, warn};

#[derive(Debug, Deserialize)]
struct CallToolParams {
    name: String,
    #[serde(default)]
    arguments: Value,
}

/// Routes `tools/call` to registered tools.
pub struct ToolDispatcher {
    registry: Arc<ToolRegistry>,
    context: Arc<ToolContext>,
}

impl ToolDispatcher {
    pub fn new(registry: Arc<ToolRegistry>, context: Arc<ToolContext>) -> Self {
        Self { registry, context }
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Runs one tool on its own task so a panic only fails that call.
    pub async fn dispatch(&self, tool_name: &str, input: Value) -> Result<Value, ToolError> {
        info!("Dispatching tool: {}", tool_name);

        let descriptor = self
            .registry
            .get(tool_name)
            .ok_or_else(|| ToolError::Validation(format!("Tool not found: {}", tool_name)))?;

        let tool = descriptor.tool();
        let context = self.context.clone();
        let handle = tokio::spawn(async move { tool.execute(&context, input).await });

        let result = match handle.await {
            Ok(result) => result,
            Err(join_err) => {
                if join_err.is_panic() {
                    error!("Tool {} panicked", tool_name);
                } else {
                    error!("Tool {} was cancelled", tool_name);
                }
                Err(ToolError::Internal)
            }
        };

        match &result {
            Ok(_) => info!(tool = tool_name, "Tool call completed"),
            Err(e) if e.is_validation() => warn!(tool = tool_name, "Rejected input: {}", e),
            Err(e) => warn!(tool = tool_name, "Tool call failed: {}", e),
        }

        result
    }

    /// Handles `tools/call` params and builds the MCP call result.
    ///
    /// Unknown tools and invalid input are protocol errors; every other
    /// failure is reported in-band with `isError: true`.
    pub async fn call(&self, params: Value) -> Result<Value, JsonRpcError> {
        let params: CallToolParams = serde_json::from_value(params)
            .map_err(|e| JsonRpcError::invalid_params(format!("Invalid tools/call params: {}", e)))?;

        match self.dispatch(&params.name, params.arguments).await {
            Ok(output) => Ok(call_result(output)),
            Err(e) if e.is_validation() => Err(JsonRpcError::invalid_params(e.to_string())),
            Err(e) => Ok(error_result(&e)),
        }
    }
}

fn call_result(output: Value) -> Value {
    let text = output.to_string();
    json!({
        "content": [{"type": "text", "text": text}],
        "structuredContent": output,
        "isError": false
    })
}

fn error_result(err: &ToolError) -> Value {
    json!({
        "content": [{"type": "text", "text": err.to_string()}],
        "isError": true
    })
}
