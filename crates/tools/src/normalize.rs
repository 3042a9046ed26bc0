//! Reduces raw API bodies to brief projections.
//!
//! A body is a success only when it is an object, its `success` member is
//! truthy and the projected sub-object is present and non-empty. Anything
//! else becomes [`Normalized::Failure`] with a non-empty error list. A body
//! with `success: false` never yields a payload.

use qc_mcp_api::sparse::to_sparse_value;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use thiserror::Error;

pub const GENERIC_FAILURE: &str = "API call failed but no specific error provided";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NormalizeError {
    /// A field every successful response carries is absent.
    #[error("Field `{field}` missing from successful `{payload}` response")]
    MissingField {
        payload: &'static str,
        field: &'static str,
    },
    #[error("Field `{field}` in `{payload}` response has an unexpected type")]
    InvalidField {
        payload: &'static str,
        field: &'static str,
    },
    #[error("Failed to encode response: {0}")]
    Encode(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Normalized<P> {
    Success { payload: P, errors: Vec<String> },
    Failure { errors: Vec<String> },
}

impl<P: Serialize> Normalized<P> {
    pub fn is_success(&self) -> bool {
        matches!(self, Normalized::Success { .. })
    }

    pub fn payload(&self) -> Option<&P> {
        match self {
            Normalized::Success { payload, .. } => Some(payload),
            Normalized::Failure { .. } => None,
        }
    }

    pub fn errors(&self) -> &[String] {
        match self {
            Normalized::Success { errors, .. } | Normalized::Failure { errors } => errors,
        }
    }

    /// `{"<payload_key>": payload | null, "success": bool, "errors": [...]}`.
    pub fn to_envelope(&self, payload_key: &str) -> Result<Value, NormalizeError> {
        let payload = match self.payload() {
            Some(payload) => {
                to_sparse_value(payload).map_err(|e| NormalizeError::Encode(e.to_string()))?
            }
            None => Value::Null,
        };

        let mut envelope = Map::new();
        envelope.insert(payload_key.to_string(), payload);
        envelope.insert("success".to_string(), Value::Bool(self.is_success()));
        envelope.insert(
            "errors".to_string(),
            Value::Array(self.errors().iter().cloned().map(Value::String).collect()),
        );
        Ok(Value::Object(envelope))
    }
}

/// A fixed narrowing of one payload sub-object.
pub trait Projection {
    type Payload: Serialize + JsonSchema + Send;

    /// Member of the response body holding the source object, also used as
    /// the payload member of the envelope.
    const PAYLOAD_KEY: &'static str;

    fn project(source: &Map<String, Value>) -> Result<Self::Payload, NormalizeError>;
}

pub fn normalize<P: Projection>(raw: &Value) -> Result<Normalized<P::Payload>, NormalizeError> {
    let Some(body) = raw.as_object() else {
        return Ok(Normalized::Failure {
            errors: vec![no_data(P::PAYLOAD_KEY)],
        });
    };

    let success = body.get("success").is_some_and(is_truthy);
    let source = body
        .get(P::PAYLOAD_KEY)
        .and_then(Value::as_object)
        .filter(|source| !source.is_empty());

    match (success, source) {
        (true, Some(source)) => Ok(Normalized::Success {
            payload: P::project(source)?,
            errors: remote_errors(body),
        }),
        _ => Ok(Normalized::Failure {
            errors: failure_errors::<P>(body),
        }),
    }
}

fn failure_errors<P: Projection>(body: &Map<String, Value>) -> Vec<String> {
    let errors = remote_errors(body);
    if !errors.is_empty() {
        return errors;
    }

    match body.get("success") {
        Some(flag) if !is_truthy(flag) => vec![GENERIC_FAILURE.to_string()],
        _ => vec![no_data(P::PAYLOAD_KEY)],
    }
}

fn no_data(noun: &str) -> String {
    format!("No {} data available", noun)
}

fn remote_errors(body: &Map<String, Value>) -> Vec<String> {
    match body.get("errors") {
        Some(Value::Array(items)) => items
            .iter()
            .filter(|item| !item.is_null())
            .map(|item| match item {
                Value::String(message) => message.clone(),
                other => other.to_string(),
            })
            .collect(),
        Some(Value::String(message)) if !message.is_empty() => vec![message.clone()],
        _ => Vec::new(),
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

fn required_str(
    source: &Map<String, Value>,
    payload: &'static str,
    field: &'static str,
) -> Result<String, NormalizeError> {
    match source.get(field) {
        None | Some(Value::Null) => Err(NormalizeError::MissingField { payload, field }),
        Some(Value::String(value)) => Ok(value.clone()),
        Some(_) => Err(NormalizeError::InvalidField { payload, field }),
    }
}

fn required_bool(
    source: &Map<String, Value>,
    payload: &'static str,
    field: &'static str,
) -> Result<bool, NormalizeError> {
    match source.get(field) {
        None | Some(Value::Null) => Err(NormalizeError::MissingField { payload, field }),
        Some(Value::Bool(value)) => Ok(*value),
        Some(_) => Err(NormalizeError::InvalidField { payload, field }),
    }
}

fn optional_str(source: &Map<String, Value>, field: &str) -> Option<String> {
    source.get(field).and_then(Value::as_str).map(str::to_string)
}

fn optional_bool(source: &Map<String, Value>, field: &str) -> Option<bool> {
    source.get(field).and_then(Value::as_bool)
}

fn optional_i64(source: &Map<String, Value>, field: &str) -> Option<i64> {
    source.get(field).and_then(Value::as_i64)
}

/// `backtestId` and `status` of a newly created backtest.
pub struct CreateBacktestBrief;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatedBacktest {
    pub backtest_id: String,
    pub status: String,
}

impl Projection for CreateBacktestBrief {
    type Payload = CreatedBacktest;
    const PAYLOAD_KEY: &'static str = "backtest";

    fn project(source: &Map<String, Value>) -> Result<CreatedBacktest, NormalizeError> {
        Ok(CreatedBacktest {
            backtest_id: required_str(source, Self::PAYLOAD_KEY, "backtestId")?,
            status: required_str(source, Self::PAYLOAD_KEY, "status")?,
        })
    }
}

/// `status`, `error` and `hasInitializeError` of an existing backtest.
pub struct ReadBacktestBrief;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct BacktestStatus {
    pub status: String,
    /// Absent while the backtest has no runtime error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub has_initialize_error: bool,
}

impl Projection for ReadBacktestBrief {
    type Payload = BacktestStatus;
    const PAYLOAD_KEY: &'static str = "backtest";

    fn project(source: &Map<String, Value>) -> Result<BacktestStatus, NormalizeError> {
        Ok(BacktestStatus {
            status: required_str(source, Self::PAYLOAD_KEY, "status")?,
            error: optional_str(source, "error"),
            has_initialize_error: required_bool(source, Self::PAYLOAD_KEY, "hasInitializeError")?,
        })
    }
}

/// Statistics kept by [`BacktestStatisticsBrief`]; everything else is dropped.
pub const STATISTICS_KEYS: &[&str] = &[
    "Total Orders",
    "Average Win",
    "Average Loss",
    "Compounding Annual Return",
    "Drawdown",
    "Expectancy",
    "Start Equity",
    "End Equity",
    "Net Profit",
    "Sharpe Ratio",
    "Sortino Ratio",
    "Probabilistic Sharpe Ratio",
    "Loss Rate",
    "Win Rate",
    "Profit-Loss Ratio",
    "Alpha",
    "Beta",
    "Annual Standard Deviation",
    "Annual Variance",
    "Information Ratio",
    "Tracking Error",
    "Treynor Ratio",
    "Total Fees",
    "Estimated Strategy Capacity",
    "Lowest Capacity Asset",
    "Portfolio Turnover",
];

/// Identification, timing and key statistics of a backtest. Every field is
/// optional: statistics are not computed until the backtest completes.
pub struct BacktestStatisticsBrief;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct BacktestStatistics {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backtest_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backtest_start: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backtest_end: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tradeable_dates: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub statistics: Option<BTreeMap<String, Value>>,
}

impl Projection for BacktestStatisticsBrief {
    type Payload = BacktestStatistics;
    const PAYLOAD_KEY: &'static str = "backtest";

    fn project(source: &Map<String, Value>) -> Result<BacktestStatistics, NormalizeError> {
        let statistics = source
            .get("statistics")
            .and_then(Value::as_object)
            .map(|stats| {
                STATISTICS_KEYS
                    .iter()
                    .filter_map(|key| {
                        stats
                            .get(*key)
                            .filter(|value| !value.is_null())
                            .map(|value| (key.to_string(), value.clone()))
                    })
                    .collect::<BTreeMap<_, _>>()
            })
            .filter(|stats| !stats.is_empty());

        Ok(BacktestStatistics {
            backtest_id: optional_str(source, "backtestId"),
            status: optional_str(source, "status"),
            completed: optional_bool(source, "completed"),
            error: optional_str(source, "error"),
            backtest_start: optional_str(source, "backtestStart"),
            backtest_end: optional_str(source, "backtestEnd"),
            tradeable_dates: optional_i64(source, "tradeableDates"),
            statistics,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_truthiness() {
        assert!(!is_truthy(&json!(null)));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!("")));
        assert!(!is_truthy(&json!({})));
        assert!(is_truthy(&json!(1)));
        assert!(is_truthy(&json!([1])));
    }

    #[test]
    fn test_remote_errors_accepts_single_string() {
        let body = json!({"errors": "Project not found"});
        assert_eq!(
            remote_errors(body.as_object().unwrap()),
            vec!["Project not found".to_string()]
        );
    }
}
