//! Backtest tools, including the brief projections over `/backtests/read`
//! and `/backtests/create`.

use crate::forward::{ForwardTool, ProjectedTool};
use crate::normalize::{BacktestStatisticsBrief, CreateBacktestBrief, ReadBacktestBrief};
use crate::registry::ToolRegistryBuilder;
use crate::traits::ToolAnnotations;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::Arc;

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateBacktestRequest {
    pub project_id: i64,
    /// Id of a successful compile job.
    pub compile_id: String,
    pub backtest_name: String,
    /// Algorithm parameter overrides, by name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Map<String, Value>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ReadBacktestRequest {
    pub project_id: i64,
    pub backtest_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ReadBacktestChartRequest {
    pub project_id: i64,
    pub backtest_id: String,
    /// Chart name, e.g. `Strategy Equity`.
    pub name: String,
    /// Number of data points to request.
    pub count: u32,
    /// Unix timestamp of the first data point.
    pub start: i64,
    pub end: i64,
}

/// Range request for orders and insights. At most 100 items per call.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ReadBacktestRangeRequest {
    pub project_id: i64,
    pub backtest_id: String,
    pub start: u32,
    pub end: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ListBacktestsRequest {
    pub project_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_statistics: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateBacktestRequest {
    pub project_id: i64,
    pub backtest_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct DeleteBacktestRequest {
    pub project_id: i64,
    pub backtest_id: String,
}

const BACKTEST: &[(&str, &str)] = &[("backtest", "object"), ("debugging", "boolean")];

pub fn create_backtest() -> ForwardTool<CreateBacktestRequest> {
    ForwardTool::new(
        "create_backtest",
        "/backtests/create",
        "Create a new backtest request and get the backtest Id.",
        ToolAnnotations::titled("Create backtest").destructive(false),
    )
    .returns(BACKTEST)
}

pub fn create_backtest_brief() -> ProjectedTool<CreateBacktestRequest, CreateBacktestBrief> {
    ProjectedTool::new(
        "create_backtest_brief",
        "/backtests/create",
        "Create a new backtest and return only its Id and status.",
        ToolAnnotations::titled("Create backtest brief").destructive(false),
    )
}

pub fn read_backtest() -> ForwardTool<ReadBacktestRequest> {
    ForwardTool::new(
        "read_backtest",
        "/backtests/read",
        "Read the results of a backtest.",
        ToolAnnotations::titled("Read backtest").read_only(true),
    )
    .returns(BACKTEST)
}

pub fn read_backtest_brief() -> ProjectedTool<ReadBacktestRequest, ReadBacktestBrief> {
    ProjectedTool::new(
        "read_backtest_brief",
        "/backtests/read",
        "Read a brief summary of backtest results containing only status, error, and \
         hasInitializeError.",
        ToolAnnotations::titled("Read backtest brief").read_only(true),
    )
}

pub fn read_backtest_statistics() -> ProjectedTool<ReadBacktestRequest, BacktestStatisticsBrief> {
    ProjectedTool::new(
        "read_backtest_statistics",
        "/backtests/read",
        "Read the key performance statistics of a backtest.",
        ToolAnnotations::titled("Read backtest statistics").read_only(true),
    )
}

pub fn list_backtests() -> ForwardTool<ListBacktestsRequest> {
    ForwardTool::new(
        "list_backtests",
        "/backtests/list",
        "List all the backtests for the project.",
        ToolAnnotations::titled("List backtests").read_only(true),
    )
    .returns(&[("backtests", "array"), ("count", "integer")])
}

pub fn read_backtest_chart() -> ForwardTool<ReadBacktestChartRequest> {
    ForwardTool::new(
        "read_backtest_chart",
        "/backtests/chart/read",
        "Read a chart from a backtest.",
        ToolAnnotations::titled("Read backtest chart").read_only(true),
    )
    .returns(&[("chart", "object"), ("progress", "number")])
}

pub fn read_backtest_orders() -> ForwardTool<ReadBacktestRangeRequest> {
    ForwardTool::new(
        "read_backtest_orders",
        "/backtests/orders/read",
        "Read out the orders of a backtest.",
        ToolAnnotations::titled("Read backtest orders").read_only(true),
    )
    .returns(&[("orders", "array"), ("length", "integer")])
}

pub fn read_backtest_insights() -> ForwardTool<ReadBacktestRangeRequest> {
    ForwardTool::new(
        "read_backtest_insights",
        "/backtests/read/insights",
        "Read out the insights of a backtest.",
        ToolAnnotations::titled("Read backtest insights").read_only(true),
    )
    .returns(&[("insights", "array"), ("length", "integer")])
}

pub fn update_backtest() -> ForwardTool<UpdateBacktestRequest> {
    ForwardTool::new(
        "update_backtest",
        "/backtests/update",
        "Update the name or note of a backtest.",
        ToolAnnotations::titled("Update backtest").idempotent(true),
    )
}

pub fn delete_backtest() -> ForwardTool<DeleteBacktestRequest> {
    ForwardTool::new(
        "delete_backtest",
        "/backtests/delete",
        "Delete a backtest from a project.",
        ToolAnnotations::titled("Delete backtest").idempotent(true),
    )
}

pub fn register(builder: &mut ToolRegistryBuilder) {
    builder.register(Arc::new(create_backtest()));
    builder.register(Arc::new(create_backtest_brief()));
    builder.register(Arc::new(read_backtest()));
    builder.register(Arc::new(read_backtest_brief()));
    builder.register(Arc::new(read_backtest_statistics()));
    builder.register(Arc::new(list_backtests()));
    builder.register(Arc::new(read_backtest_chart()));
    builder.register(Arc::new(read_backtest_orders()));
    builder.register(Arc::new(read_backtest_insights()));
    builder.register(Arc::new(update_backtest()));
    builder.register(Arc::new(delete_backtest()));
}
