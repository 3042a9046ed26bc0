//! Generic handlers: parse the typed request, post it, relay or project.

use crate::context::ToolContext;
use crate::error::ToolError;
use crate::normalize::{normalize, Projection};
use crate::schema::{input_schema, projected_schema, response_schema};
use crate::traits::{Tool, ToolAnnotations};
use async_trait::async_trait;
use qc_mcp_api::sparse::to_sparse_value;
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::marker::PhantomData;
use tracing::debug;

pub const CODE_SOURCE_ID: &str = "codeSourceId";

/// Request type for operations that take no arguments.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct NoInput {}

/// Parses tool arguments into `T`. Missing arguments are read as `{}`.
pub fn parse_input<T: DeserializeOwned>(tool: &str, input: Value) -> Result<T, ToolError> {
    let input = if input.is_null() { json!({}) } else { input };
    serde_json::from_value(input).map_err(|e| ToolError::Validation(format!("{}: {}", tool, e)))
}

/// Marks the request body with the agent that produced it.
pub fn tag_code_source(payload: &mut Value, agent_name: &str) {
    if let Some(object) = payload.as_object_mut() {
        object.insert(
            CODE_SOURCE_ID.to_string(),
            Value::String(agent_name.to_string()),
        );
    }
}

/// Posts the request to `endpoint` and returns the body as-is.
pub struct ForwardTool<Req> {
    name: &'static str,
    endpoint: &'static str,
    description: &'static str,
    annotations: ToolAnnotations,
    output_schema: Value,
    tag_code_source: bool,
    _request: PhantomData<fn() -> Req>,
}

impl<Req> ForwardTool<Req>
where
    Req: DeserializeOwned + Serialize + JsonSchema,
{
    pub fn new(
        name: &'static str,
        endpoint: &'static str,
        description: &'static str,
        annotations: ToolAnnotations,
    ) -> Self {
        Self {
            name,
            endpoint,
            description,
            annotations,
            output_schema: response_schema(&[]),
            tag_code_source: false,
            _request: PhantomData,
        }
    }

    /// Payload members the operation returns next to `success`/`errors`.
    pub fn returns(mut self, payload: &[(&str, &str)]) -> Self {
        self.output_schema = response_schema(payload);
        self
    }

    /// Injects `codeSourceId` into every request.
    pub fn tagged(mut self) -> Self {
        self.tag_code_source = true;
        self
    }

    pub fn endpoint(&self) -> &'static str {
        self.endpoint
    }

    /// Validates `input` and builds the exact body that would be sent.
    pub fn prepare(&self, agent_name: &str, input: Value) -> Result<Value, ToolError> {
        let request: Req = parse_input(self.name, input)?;
        let mut payload =
            to_sparse_value(&request).map_err(|e| ToolError::Validation(e.to_string()))?;
        if self.tag_code_source {
            tag_code_source(&mut payload, agent_name);
        }
        Ok(payload)
    }
}

#[async_trait]
impl<Req> Tool for ForwardTool<Req>
where
    Req: DeserializeOwned + Serialize + JsonSchema + 'static,
{
    fn name(&self) -> &'static str {
        self.name
    }

    fn description(&self) -> &'static str {
        self.description
    }

    fn annotations(&self) -> ToolAnnotations {
        self.annotations.clone()
    }

    fn input_schema(&self) -> Value {
        input_schema::<Req>()
    }

    fn output_schema(&self) -> Value {
        self.output_schema.clone()
    }

    async fn execute(&self, ctx: &ToolContext, input: Value) -> Result<Value, ToolError> {
        let payload = self.prepare(&ctx.agent_name, input)?;
        debug!(tool = self.name, endpoint = self.endpoint, "Forwarding request");
        Ok(ctx.api.post(self.endpoint, Some(&payload)).await?)
    }
}

/// Posts the request and reduces the body with projection `P`.
pub struct ProjectedTool<Req, P> {
    name: &'static str,
    endpoint: &'static str,
    description: &'static str,
    annotations: ToolAnnotations,
    _marker: PhantomData<fn() -> (Req, P)>,
}

impl<Req, P> ProjectedTool<Req, P>
where
    Req: DeserializeOwned + Serialize + JsonSchema,
    P: Projection,
{
    pub fn new(
        name: &'static str,
        endpoint: &'static str,
        description: &'static str,
        annotations: ToolAnnotations,
    ) -> Self {
        Self {
            name,
            endpoint,
            description,
            annotations,
            _marker: PhantomData,
        }
    }

    /// Applies the projection to a body already fetched.
    pub fn shape(raw: &Value) -> Result<Value, ToolError> {
        Ok(normalize::<P>(raw)?.to_envelope(P::PAYLOAD_KEY)?)
    }
}

#[async_trait]
impl<Req, P> Tool for ProjectedTool<Req, P>
where
    Req: DeserializeOwned + Serialize + JsonSchema + Send + Sync + 'static,
    P: Projection + 'static,
{
    fn name(&self) -> &'static str {
        self.name
    }

    fn description(&self) -> &'static str {
        self.description
    }

    fn annotations(&self) -> ToolAnnotations {
        self.annotations.clone()
    }

    fn input_schema(&self) -> Value {
        input_schema::<Req>()
    }

    fn output_schema(&self) -> Value {
        projected_schema::<P::Payload>(P::PAYLOAD_KEY)
    }

    async fn execute(&self, ctx: &ToolContext, input: Value) -> Result<Value, ToolError> {
        let request: Req = parse_input(self.name, input)?;
        let raw = ctx.api.post(self.endpoint, Some(&request)).await?;
        Self::shape(&raw)
    }
}
