use crate::forward::ForwardTool;
use crate::registry::ToolRegistryBuilder;
use crate::traits::ToolAnnotations;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateCollaboratorRequest {
    pub project_id: i64,
    pub collaborator_user_id: String,
    /// Give the collaborator control over live deployments.
    pub collaboration_live_control: bool,
    pub collaboration_write: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ReadCollaboratorsRequest {
    pub project_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateCollaboratorRequest {
    pub project_id: i64,
    pub collaborator_user_id: String,
    pub live_control: bool,
    pub write: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct DeleteCollaboratorRequest {
    pub project_id: i64,
    pub collaborator_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LockCollaboratorRequest {
    pub project_id: i64,
}

const COLLABORATORS: &[(&str, &str)] = &[("collaborators", "array")];

pub fn create_project_collaborator() -> ForwardTool<CreateCollaboratorRequest> {
    ForwardTool::new(
        "create_project_collaborator",
        "/projects/collaboration/create",
        "Add a collaborator to a project.",
        ToolAnnotations::titled("Create project collaborator")
            .destructive(false)
            .idempotent(true),
    )
    .returns(COLLABORATORS)
}

pub fn read_project_collaborators() -> ForwardTool<ReadCollaboratorsRequest> {
    ForwardTool::new(
        "read_project_collaborators",
        "/projects/collaboration/read",
        "List all collaborators on a project.",
        ToolAnnotations::titled("Read project collaborators").read_only(true),
    )
    .returns(&[("collaborators", "array"), ("userLiveControl", "boolean"), ("userPermissions", "string")])
}

pub fn update_project_collaborator() -> ForwardTool<UpdateCollaboratorRequest> {
    ForwardTool::new(
        "update_project_collaborator",
        "/projects/collaboration/update",
        "Update collaborator information in a project.",
        ToolAnnotations::titled("Update project collaborator").idempotent(true),
    )
    .returns(COLLABORATORS)
}

pub fn delete_project_collaborator() -> ForwardTool<DeleteCollaboratorRequest> {
    ForwardTool::new(
        "delete_project_collaborator",
        "/projects/collaboration/delete",
        "Remove a collaborator from a project.",
        ToolAnnotations::titled("Delete project collaborator").idempotent(true),
    )
    .returns(COLLABORATORS)
}

pub fn lock_project_with_collaborators() -> ForwardTool<LockCollaboratorRequest> {
    ForwardTool::new(
        "lock_project_with_collaborators",
        "/projects/collaboration/lock/acquire",
        "Lock a project so you can edit it. This is necessary when the project has \
         collaborators or when an LLM is editing files on your behalf.",
        ToolAnnotations::titled("Lock project with collaborators").idempotent(true),
    )
    .tagged()
}

pub fn register(builder: &mut ToolRegistryBuilder) {
    builder.register(Arc::new(create_project_collaborator()));
    builder.register(Arc::new(read_project_collaborators()));
    builder.register(Arc::new(update_project_collaborator()));
    builder.register(Arc::new(delete_project_collaborator()));
    builder.register(Arc::new(lock_project_with_collaborators()));
}
