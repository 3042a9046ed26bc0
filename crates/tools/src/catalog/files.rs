//! File tools. Every request carries the agent's `codeSourceId`.

use crate::forward::ForwardTool;
use crate::registry::ToolRegistryBuilder;
use crate::traits::ToolAnnotations;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateProjectFileRequest {
    pub project_id: i64,
    /// File name, including any directories (`utils/helpers.py`).
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ReadFilesRequest {
    pub project_id: i64,
    /// Omit to read every file in the project.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateFileNameRequest {
    pub project_id: i64,
    pub name: String,
    pub new_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateFileContentsRequest {
    pub project_id: i64,
    pub name: String,
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PatchFileRequest {
    pub project_id: i64,
    /// Unified diff to apply.
    pub patch: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct DeleteFileRequest {
    pub project_id: i64,
    pub name: String,
}

const FILES: &[(&str, &str)] = &[("files", "array")];

pub fn create_file() -> ForwardTool<CreateProjectFileRequest> {
    ForwardTool::new(
        "create_file",
        "/files/create",
        "Add a file to a given project.",
        ToolAnnotations::titled("Create file")
            .destructive(false)
            .idempotent(true),
    )
    .tagged()
}

pub fn read_file() -> ForwardTool<ReadFilesRequest> {
    ForwardTool::new(
        "read_file",
        "/files/read",
        "Read a file from a project, or all files in the project if no file name is provided.",
        ToolAnnotations::titled("Read file").read_only(true),
    )
    .returns(FILES)
    .tagged()
}

pub fn update_file_name() -> ForwardTool<UpdateFileNameRequest> {
    ForwardTool::new(
        "update_file_name",
        "/files/update",
        "Update the name of a file.",
        ToolAnnotations::titled("Update file name").idempotent(true),
    )
    .tagged()
}

pub fn update_file_contents() -> ForwardTool<UpdateFileContentsRequest> {
    ForwardTool::new(
        "update_file_contents",
        "/files/update",
        "Update the contents of a file.",
        ToolAnnotations::titled("Update file contents").idempotent(true),
    )
    .returns(FILES)
    .tagged()
}

pub fn patch_file() -> ForwardTool<PatchFileRequest> {
    ForwardTool::new(
        "patch_file",
        "/files/patch",
        "Apply a patch (unified diff) to a file in a project.",
        ToolAnnotations::titled("Patch file").idempotent(true),
    )
    .tagged()
}

pub fn delete_file() -> ForwardTool<DeleteFileRequest> {
    ForwardTool::new(
        "delete_file",
        "/files/delete",
        "Delete a file in a project.",
        ToolAnnotations::titled("Delete file").idempotent(true),
    )
    .tagged()
}

pub fn register(builder: &mut ToolRegistryBuilder) {
    builder.register(Arc::new(create_file()));
    builder.register(Arc::new(read_file()));
    builder.register(Arc::new(update_file_name()));
    builder.register(Arc::new(update_file_contents()));
    builder.register(Arc::new(patch_file()));
    builder.register(Arc::new(delete_file()));
}
