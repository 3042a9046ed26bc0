use crate::forward::ForwardTool;
use crate::registry::ToolRegistryBuilder;
use crate::traits::ToolAnnotations;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct OptimizationParameter {
    pub name: String,
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct OptimizationConstraint {
    /// Statistic name, e.g. `TotalPerformance.PortfolioStatistics.Drawdown`.
    pub target: String,
    /// `less`, `lessOrEqual`, `greater`, `greaterOrEqual`, `equals` or `notEquals`.
    pub operator: String,
    pub target_value: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct EstimateOptimizationRequest {
    pub project_id: i64,
    pub name: String,
    /// Statistic to optimize.
    pub target: String,
    /// `max` or `min`.
    pub target_to: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_value: Option<f64>,
    /// Search strategy, e.g. `QuantConnect.Optimizer.Strategies.GridSearchOptimizationStrategy`.
    pub strategy: String,
    pub compile_id: String,
    pub parameters: Vec<OptimizationParameter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constraints: Option<Vec<OptimizationConstraint>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateOptimizationRequest {
    pub project_id: i64,
    pub name: String,
    pub target: String,
    pub target_to: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_value: Option<f64>,
    pub strategy: String,
    pub compile_id: String,
    pub parameters: Vec<OptimizationParameter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constraints: Option<Vec<OptimizationConstraint>>,
    /// Cost returned by `estimate_optimization_cost`.
    pub estimated_cost: f64,
    /// `O2-8`, `O4-12` or `O8-16`.
    pub node_type: String,
    pub parallel_nodes: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct OptimizationIdRequest {
    pub optimization_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateOptimizationRequest {
    pub optimization_id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ListOptimizationsRequest {
    pub project_id: i64,
}

const OPTIMIZATIONS: &[(&str, &str)] = &[("optimizations", "array")];

pub fn estimate_optimization_cost() -> ForwardTool<EstimateOptimizationRequest> {
    ForwardTool::new(
        "estimate_optimization_cost",
        "/optimizations/estimate",
        "Estimate the execution time of an optimization with the specified parameters.",
        ToolAnnotations::titled("Estimate optimization cost").read_only(true),
    )
    .returns(&[("estimate", "object")])
}

pub fn create_optimization() -> ForwardTool<CreateOptimizationRequest> {
    ForwardTool::new(
        "create_optimization",
        "/optimizations/create",
        "Create an optimization with the specified parameters.",
        ToolAnnotations::titled("Create optimization").destructive(false),
    )
    .returns(OPTIMIZATIONS)
}

pub fn read_optimization() -> ForwardTool<OptimizationIdRequest> {
    ForwardTool::new(
        "read_optimization",
        "/optimizations/read",
        "Read an optimization.",
        ToolAnnotations::titled("Read optimization").read_only(true),
    )
    .returns(&[("optimization", "object")])
}

pub fn list_optimizations() -> ForwardTool<ListOptimizationsRequest> {
    ForwardTool::new(
        "list_optimizations",
        "/optimizations/list",
        "List all the optimizations for a project.",
        ToolAnnotations::titled("List optimizations").read_only(true),
    )
    .returns(OPTIMIZATIONS)
}

pub fn update_optimization() -> ForwardTool<UpdateOptimizationRequest> {
    ForwardTool::new(
        "update_optimization",
        "/optimizations/update",
        "Update the name of an optimization.",
        ToolAnnotations::titled("Update optimization").idempotent(true),
    )
}

pub fn abort_optimization() -> ForwardTool<OptimizationIdRequest> {
    ForwardTool::new(
        "abort_optimization",
        "/optimizations/abort",
        "Abort an optimization.",
        ToolAnnotations::titled("Abort optimization").idempotent(true),
    )
}

pub fn delete_optimization() -> ForwardTool<OptimizationIdRequest> {
    ForwardTool::new(
        "delete_optimization",
        "/optimizations/delete",
        "Delete an optimization.",
        ToolAnnotations::titled("Delete optimization").idempotent(true),
    )
}

pub fn register(builder: &mut ToolRegistryBuilder) {
    builder.register(Arc::new(estimate_optimization_cost()));
    builder.register(Arc::new(create_optimization()));
    builder.register(Arc::new(read_optimization()));
    builder.register(Arc::new(list_optimizations()));
    builder.register(Arc::new(update_optimization()));
    builder.register(Arc::new(abort_optimization()));
    builder.register(Arc::new(delete_optimization()));
}
