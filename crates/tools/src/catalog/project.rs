use crate::forward::{ForwardTool, NoInput};
use crate::registry::ToolRegistryBuilder;
use crate::traits::ToolAnnotations;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum Language {
    #[serde(rename = "C#")]
    CSharp,
    #[serde(rename = "Py")]
    Python,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateProjectRequest {
    /// Project name.
    pub name: String,
    pub language: Language,
    /// Defaults to your preferred organization.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ReadProjectRequest {
    pub project_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateProjectRequest {
    pub project_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct DeleteProjectRequest {
    pub project_id: i64,
}

const PROJECTS: &[(&str, &str)] = &[("projects", "array"), ("versions", "array")];

pub fn create_project() -> ForwardTool<CreateProjectRequest> {
    ForwardTool::new(
        "create_project",
        "/projects/create",
        "Create a new project in your default organization.",
        ToolAnnotations::titled("Create project")
            .destructive(false)
            .idempotent(false),
    )
    .returns(PROJECTS)
}

pub fn read_project() -> ForwardTool<ReadProjectRequest> {
    ForwardTool::new(
        "read_project",
        "/projects/read",
        "List the details of a project or a set of recent projects.",
        ToolAnnotations::titled("Read project").read_only(true),
    )
    .returns(PROJECTS)
}

pub fn list_projects() -> ForwardTool<NoInput> {
    ForwardTool::new(
        "list_projects",
        "/projects/read",
        "List the details of all projects.",
        ToolAnnotations::titled("List projects").read_only(true),
    )
    .returns(PROJECTS)
}

pub fn update_project() -> ForwardTool<UpdateProjectRequest> {
    ForwardTool::new(
        "update_project",
        "/projects/update",
        "Update a project's name or description.",
        ToolAnnotations::titled("Update project").idempotent(true),
    )
}

pub fn delete_project() -> ForwardTool<DeleteProjectRequest> {
    ForwardTool::new(
        "delete_project",
        "/projects/delete",
        "Delete a project.",
        ToolAnnotations::titled("Delete project").idempotent(true),
    )
}

pub fn register(builder: &mut ToolRegistryBuilder) {
    builder.register(Arc::new(create_project()));
    builder.register(Arc::new(read_project()));
    builder.register(Arc::new(list_projects()));
    builder.register(Arc::new(update_project()));
    builder.register(Arc::new(delete_project()));
}
