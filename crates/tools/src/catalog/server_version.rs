use crate::context::ToolContext;
use crate::error::ToolError;
use crate::forward::{parse_input, NoInput};
use crate::registry::ToolRegistryBuilder;
use crate::schema::input_schema;
use crate::traits::{Tool, ToolAnnotations};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Arc;

pub const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

fn version_schema() -> Value {
    json!({
        "type": "object",
        "properties": {"result": {"type": "string"}},
        "required": ["result"]
    })
}

/// The tag list is newest first and its first entry is `latest`, so the
/// newest numbered release is the second entry.
pub fn latest_release(tags: &Value) -> Result<String, ToolError> {
    tags.get("results")
        .and_then(|results| results.get(1))
        .and_then(|tag| tag.get("name"))
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| ToolError::UnexpectedResponse("no release tag in tag list".to_string()))
}

pub struct ReadServerVersionTool;

#[async_trait]
impl Tool for ReadServerVersionTool {
    fn name(&self) -> &'static str {
        "read_mcp_server_version"
    }

    fn description(&self) -> &'static str {
        "Returns the version of the QC MCP Server that's running."
    }

    fn annotations(&self) -> ToolAnnotations {
        ToolAnnotations::titled("Read QC MCP Server version").read_only(true)
    }

    fn input_schema(&self) -> Value {
        input_schema::<NoInput>()
    }

    fn output_schema(&self) -> Value {
        version_schema()
    }

    async fn execute(&self, _ctx: &ToolContext, input: Value) -> Result<Value, ToolError> {
        parse_input::<NoInput>(self.name(), input)?;
        Ok(json!({ "result": SERVER_VERSION }))
    }
}

pub struct ReadLatestServerVersionTool;

#[async_trait]
impl Tool for ReadLatestServerVersionTool {
    fn name(&self) -> &'static str {
        "read_latest_mcp_server_version"
    }

    fn description(&self) -> &'static str {
        "Returns the latest version of the QC MCP Server released."
    }

    fn annotations(&self) -> ToolAnnotations {
        ToolAnnotations::titled("Read latest QC MCP Server version").read_only(true)
    }

    fn input_schema(&self) -> Value {
        input_schema::<NoInput>()
    }

    fn output_schema(&self) -> Value {
        version_schema()
    }

    async fn execute(&self, ctx: &ToolContext, input: Value) -> Result<Value, ToolError> {
        parse_input::<NoInput>(self.name(), input)?;
        let tags = ctx
            .api
            .get_json(&ctx.latest_version_url, &[("page_size", "2")])
            .await?;
        Ok(json!({ "result": latest_release(&tags)? }))
    }
}

pub fn register(builder: &mut ToolRegistryBuilder) {
    builder.register(Arc::new(ReadServerVersionTool));
    builder.register(Arc::new(ReadLatestServerVersionTool));
}
