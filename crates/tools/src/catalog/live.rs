//! Live trading tools.
//!
//! `authorize_connection` is the only tool here that is not a plain
//! forward: it follows the brokerage login redirect in the user's browser
//! before reading the authorization result.

use crate::context::ToolContext;
use crate::error::ToolError;
use crate::forward::{parse_input, ForwardTool};
use crate::registry::ToolRegistryBuilder;
use crate::schema::{input_schema, response_schema};
use crate::traits::{Tool, ToolAnnotations};
use async_trait::async_trait;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AuthorizeConnectionRequest {
    /// Brokerage or data provider id, e.g. `TradierBrokerage`.
    pub brokerage: String,
}

pub struct AuthorizeConnectionTool;

#[async_trait]
impl Tool for AuthorizeConnectionTool {
    fn name(&self) -> &'static str {
        "authorize_connection"
    }

    fn description(&self) -> &'static str {
        "Authorize an external connection with a live brokerage or data provider. \
         This tool opens your browser to complete the authentication flow; you must \
         be logged into your QuantConnect account in that browser."
    }

    fn annotations(&self) -> ToolAnnotations {
        ToolAnnotations::titled("Authorize external connection")
            .read_only(false)
            .destructive(false)
            .idempotent(true)
    }

    fn input_schema(&self) -> Value {
        input_schema::<AuthorizeConnectionRequest>()
    }

    fn output_schema(&self) -> Value {
        response_schema(&[("authorization", "object")])
    }

    async fn execute(&self, ctx: &ToolContext, input: Value) -> Result<Value, ToolError> {
        let request: AuthorizeConnectionRequest = parse_input(self.name(), input)?;
        info!(brokerage = %request.brokerage, "Authorizing external connection");
        Ok(ctx
            .api
            .authorize_external_connection(&request, ctx.browser.as_ref())
            .await?)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateLiveAlgorithmRequest {
    /// `-1` selects the latest LEAN version.
    pub version_id: String,
    pub project_id: i64,
    pub compile_id: String,
    /// Id of a live node in your organization.
    pub node_id: String,
    /// Brokerage settings; `id` selects the brokerage.
    pub brokerage: Map<String, Value>,
    /// Data provider settings, keyed by provider id.
    pub data_providers: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notification: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub automatic_redeploy: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ReadLiveAlgorithmRequest {
    pub project_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deploy_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ListLiveAlgorithmsRequest {
    /// Deployment status filter, e.g. `Running` or `Stopped`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Unix timestamp lower bound.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ReadLiveChartRequest {
    pub project_id: i64,
    pub name: String,
    pub count: u32,
    pub start: i64,
    pub end: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ReadLiveLogsRequest {
    /// Only `json` is supported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    pub project_id: i64,
    pub algorithm_id: String,
    pub start_line: u32,
    pub end_line: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LiveProjectRequest {
    pub project_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ReadLiveRangeRequest {
    pub project_id: i64,
    pub start: u32,
    pub end: u32,
}

pub fn create_live_algorithm() -> ForwardTool<CreateLiveAlgorithmRequest> {
    ForwardTool::new(
        "create_live_algorithm",
        "/live/create",
        "Create a live algorithm.",
        ToolAnnotations::titled("Create live algorithm").destructive(false),
    )
    .returns(&[("projectId", "integer"), ("deployId", "string"), ("status", "string")])
}

pub fn read_live_algorithm() -> ForwardTool<ReadLiveAlgorithmRequest> {
    ForwardTool::new(
        "read_live_algorithm",
        "/live/read",
        "Read details of a live algorithm.",
        ToolAnnotations::titled("Read live algorithm").read_only(true),
    )
}

pub fn list_live_algorithms() -> ForwardTool<ListLiveAlgorithmsRequest> {
    ForwardTool::new(
        "list_live_algorithms",
        "/live/list",
        "List all your past and current live trading deployments.",
        ToolAnnotations::titled("List live algorithms").read_only(true),
    )
    .returns(&[("live", "array")])
}

pub fn read_live_chart() -> ForwardTool<ReadLiveChartRequest> {
    ForwardTool::new(
        "read_live_chart",
        "/live/chart/read",
        "Read a chart from a live algorithm.",
        ToolAnnotations::titled("Read live chart").read_only(true),
    )
    .returns(&[("chart", "object"), ("progress", "number")])
}

pub fn read_live_logs() -> ForwardTool<ReadLiveLogsRequest> {
    ForwardTool::new(
        "read_live_logs",
        "/live/logs/read",
        "Get the logs of a live algorithm. The snapshot updates about every 5 minutes.",
        ToolAnnotations::titled("Read live logs").read_only(true),
    )
    .returns(&[("logs", "array"), ("length", "integer"), ("deploymentOffset", "integer")])
}

pub fn read_live_portfolio() -> ForwardTool<LiveProjectRequest> {
    ForwardTool::new(
        "read_live_portfolio",
        "/live/portfolio/read",
        "Read out the portfolio state of a live algorithm. The snapshot updates about \
         every 10 minutes.",
        ToolAnnotations::titled("Read live portfolio").read_only(true),
    )
    .returns(&[("portfolio", "object")])
}

pub fn read_live_orders() -> ForwardTool<ReadLiveRangeRequest> {
    ForwardTool::new(
        "read_live_orders",
        "/live/orders/read",
        "Read out the orders of a live algorithm. The snapshot updates about every \
         10 minutes.",
        ToolAnnotations::titled("Read live orders").read_only(true),
    )
    .returns(&[("orders", "array"), ("length", "integer")])
}

pub fn read_live_insights() -> ForwardTool<ReadLiveRangeRequest> {
    ForwardTool::new(
        "read_live_insights",
        "/live/insights/read",
        "Read out the insights of a live algorithm. The snapshot updates about every \
         10 minutes.",
        ToolAnnotations::titled("Read live insights").read_only(true),
    )
    .returns(&[("insights", "array"), ("length", "integer")])
}

pub fn stop_live_algorithm() -> ForwardTool<LiveProjectRequest> {
    ForwardTool::new(
        "stop_live_algorithm",
        "/live/update/stop",
        "Stop a live algorithm.",
        ToolAnnotations::titled("Stop live algorithm").idempotent(true),
    )
}

pub fn liquidate_live_algorithm() -> ForwardTool<LiveProjectRequest> {
    ForwardTool::new(
        "liquidate_live_algorithm",
        "/live/update/liquidate",
        "Liquidate and stop a live algorithm.",
        ToolAnnotations::titled("Liquidate live algorithm").idempotent(true),
    )
}

pub fn register(builder: &mut ToolRegistryBuilder) {
    builder.register(Arc::new(AuthorizeConnectionTool));
    builder.register(Arc::new(create_live_algorithm()));
    builder.register(Arc::new(read_live_algorithm()));
    builder.register(Arc::new(list_live_algorithms()));
    builder.register(Arc::new(read_live_chart()));
    builder.register(Arc::new(read_live_logs()));
    builder.register(Arc::new(read_live_portfolio()));
    builder.register(Arc::new(read_live_orders()));
    builder.register(Arc::new(read_live_insights()));
    builder.register(Arc::new(stop_live_algorithm()));
    builder.register(Arc::new(liquidate_live_algorithm()));
}
