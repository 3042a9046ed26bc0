use crate::forward::ForwardTool;
use crate::registry::ToolRegistryBuilder;
use crate::traits::ToolAnnotations;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ReadProjectNodesRequest {
    pub project_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateProjectNodesRequest {
    pub project_id: i64,
    /// Node ids to activate. Omit to deactivate all nodes and auto-select.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nodes: Option<Vec<String>>,
}

const NODES: &[(&str, &str)] = &[("nodes", "object"), ("autoSelectNode", "boolean")];

pub fn read_project_nodes() -> ForwardTool<ReadProjectNodesRequest> {
    ForwardTool::new(
        "read_project_nodes",
        "/projects/nodes/read",
        "Read the available and selected nodes of a project.",
        ToolAnnotations::titled("Read project nodes").read_only(true),
    )
    .returns(NODES)
}

pub fn update_project_nodes() -> ForwardTool<UpdateProjectNodesRequest> {
    ForwardTool::new(
        "update_project_nodes",
        "/projects/nodes/update",
        "Update the active state of the given nodes to true. If you don't provide any \
         nodes, all the nodes become inactive and autoSelectNode is true.",
        ToolAnnotations::titled("Update project nodes")
            .destructive(false)
            .idempotent(true),
    )
    .returns(NODES)
}

pub fn register(builder: &mut ToolRegistryBuilder) {
    builder.register(Arc::new(read_project_nodes()));
    builder.register(Arc::new(update_project_nodes()));
}
