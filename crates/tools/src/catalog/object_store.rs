use crate::context::ToolContext;
use crate::error::ToolError;
use crate::forward::{parse_input, ForwardTool};
use crate::registry::ToolRegistryBuilder;
use crate::schema::{input_schema, response_schema};
use crate::traits::{Tool, ToolAnnotations};
use async_trait::async_trait;
use qc_mcp_api::MultipartUpload;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

pub const UPLOAD_ENDPOINT: &str = "/object/set";

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UploadObjectRequest {
    pub organization_id: String,
    /// Object Store key (path) to write.
    pub key: String,
    /// File contents.
    pub object_data: String,
}

impl UploadObjectRequest {
    /// Sent as form fields plus an `objectData` file part named after the key.
    pub fn into_upload(self) -> MultipartUpload {
        MultipartUpload {
            fields: vec![
                ("organizationId".to_string(), self.organization_id),
                ("key".to_string(), self.key.clone()),
            ],
            file_field: "objectData".to_string(),
            file_name: self.key,
            data: self.object_data.into_bytes(),
        }
    }
}

pub struct UploadObjectTool;

#[async_trait]
impl Tool for UploadObjectTool {
    fn name(&self) -> &'static str {
        "upload_object"
    }

    fn description(&self) -> &'static str {
        "Upload files to the Object Store."
    }

    fn annotations(&self) -> ToolAnnotations {
        ToolAnnotations::titled("Upload Object Store file").idempotent(true)
    }

    fn input_schema(&self) -> Value {
        input_schema::<UploadObjectRequest>()
    }

    fn output_schema(&self) -> Value {
        response_schema(&[])
    }

    async fn execute(&self, ctx: &ToolContext, input: Value) -> Result<Value, ToolError> {
        let request: UploadObjectRequest = parse_input(self.name(), input)?;
        Ok(ctx
            .api
            .post_multipart(UPLOAD_ENDPOINT, request.into_upload())
            .await?)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ObjectKeyRequest {
    pub organization_id: String,
    pub key: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ObjectJobIdRequest {
    pub organization_id: String,
    pub keys: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ObjectDownloadUrlRequest {
    pub organization_id: String,
    /// Job id returned by `read_object_store_file_job_id`.
    pub job_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ListObjectStoreRequest {
    pub organization_id: String,
    /// Directory to list, e.g. `/` or `models/`.
    pub path: String,
}

pub fn read_object_properties() -> ForwardTool<ObjectKeyRequest> {
    ForwardTool::new(
        "read_object_properties",
        "/object/properties",
        "Get Object Store properties of a specific organization and key. It doesn't work \
         if the key is a directory in the Object Store.",
        ToolAnnotations::titled("Read Object Store file properties").read_only(true),
    )
    .returns(&[("metadata", "object")])
}

pub fn read_object_store_file_job_id() -> ForwardTool<ObjectJobIdRequest> {
    ForwardTool::new(
        "read_object_store_file_job_id",
        "/object/get",
        "Create a job to download files from the Object Store and then read the job Id.",
        ToolAnnotations::titled("Read Object Store file job Id").destructive(false),
    )
    .returns(&[("jobId", "string"), ("url", "string")])
}

pub fn read_object_store_file_download_url() -> ForwardTool<ObjectDownloadUrlRequest> {
    ForwardTool::new(
        "read_object_store_file_download_url",
        "/object/get",
        "Get the URL for downloading files from the Object Store.",
        ToolAnnotations::titled("Read Object Store file download URL").read_only(true),
    )
    .returns(&[("jobId", "string"), ("url", "string")])
}

pub fn list_object_store_files() -> ForwardTool<ListObjectStoreRequest> {
    ForwardTool::new(
        "list_object_store_files",
        "/object/list",
        "List the Object Store files under a specific directory in an organization.",
        ToolAnnotations::titled("List Object Store files").read_only(true),
    )
    .returns(&[("path", "string"), ("objects", "array"), ("objectStorageUsed", "integer")])
}

pub fn delete_object() -> ForwardTool<ObjectKeyRequest> {
    ForwardTool::new(
        "delete_object",
        "/object/delete",
        "Delete the Object Store file of a specific organization and key.",
        ToolAnnotations::titled("Delete Object Store file").idempotent(true),
    )
}

pub fn register(builder: &mut ToolRegistryBuilder) {
    builder.register(Arc::new(UploadObjectTool));
    builder.register(Arc::new(read_object_properties()));
    builder.register(Arc::new(read_object_store_file_job_id()));
    builder.register(Arc::new(read_object_store_file_download_url()));
    builder.register(Arc::new(list_object_store_files()));
    builder.register(Arc::new(delete_object()));
}
