use crate::forward::ForwardTool;
use crate::registry::ToolRegistryBuilder;
use crate::traits::ToolAnnotations;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::Arc;

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateLiveCommandRequest {
    pub project_id: i64,
    /// Command object; `$type` selects the command class.
    pub command: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct BroadcastLiveCommandRequest {
    pub organization_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude_project_id: Option<i64>,
    pub command: Map<String, Value>,
}

pub fn create_live_command() -> ForwardTool<CreateLiveCommandRequest> {
    ForwardTool::new(
        "create_live_command",
        "/live/commands/create",
        "Send a command to a live trading algorithm.",
        ToolAnnotations::titled("Create live command"),
    )
}

pub fn broadcast_live_command() -> ForwardTool<BroadcastLiveCommandRequest> {
    ForwardTool::new(
        "broadcast_live_command",
        "/live/commands/broadcast",
        "Broadcast a live command to all live algorithms in an organization.",
        ToolAnnotations::titled("Broadcast live command"),
    )
}

pub fn register(builder: &mut ToolRegistryBuilder) {
    builder.register(Arc::new(create_live_command()));
    builder.register(Arc::new(broadcast_live_command()));
}
