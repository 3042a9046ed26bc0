use crate::forward::ForwardTool;
use crate::registry::ToolRegistryBuilder;
use crate::traits::ToolAnnotations;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateCompileRequest {
    pub project_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ReadCompileRequest {
    pub project_id: i64,
    pub compile_id: String,
}

const COMPILE: &[(&str, &str)] = &[
    ("compileId", "string"),
    ("state", "string"),
    ("projectId", "integer"),
    ("signature", "string"),
    ("signatureOrder", "array"),
    ("logs", "array"),
];

pub fn create_compile() -> ForwardTool<CreateCompileRequest> {
    ForwardTool::new(
        "create_compile",
        "/compile/create",
        "Asynchronously create a compile job request for a project.",
        ToolAnnotations::titled("Create compile").destructive(false),
    )
    .returns(COMPILE)
}

pub fn read_compile() -> ForwardTool<ReadCompileRequest> {
    ForwardTool::new(
        "read_compile",
        "/compile/read",
        "Read a compile packet job result.",
        ToolAnnotations::titled("Read compile").read_only(true),
    )
    .returns(COMPILE)
}

pub fn register(builder: &mut ToolRegistryBuilder) {
    builder.register(Arc::new(create_compile()));
    builder.register(Arc::new(read_compile()));
}
