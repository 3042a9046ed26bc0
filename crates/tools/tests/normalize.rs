use proptest::prelude::*;
use qc_mcp_tools::normalize::{
    normalize, BacktestStatisticsBrief, CreateBacktestBrief, NormalizeError, Normalized,
    ReadBacktestBrief, GENERIC_FAILURE, STATISTICS_KEYS,
};
use qc_mcp_tools::ProjectedTool;
use serde_json::{json, Map, Value};

type CreateBrief = ProjectedTool<Value, CreateBacktestBrief>;

#[test]
fn test_successful_create_is_projected() {
    let raw = json!({
        "success": true,
        "backtest": {"backtestId": "42", "status": "Running", "name": "Smoke", "progress": 0.1}
    });

    let envelope = CreateBrief::shape(&raw).unwrap();
    assert_eq!(
        envelope,
        json!({
            "backtest": {"backtestId": "42", "status": "Running"},
            "success": true,
            "errors": []
        })
    );
}

#[test]
fn test_remote_failure_without_errors_gets_generic_message() {
    let envelope = CreateBrief::shape(&json!({"success": false})).unwrap();
    assert_eq!(envelope["backtest"], Value::Null);
    assert_eq!(envelope["success"], false);
    assert_eq!(envelope["errors"], json!([GENERIC_FAILURE]));
}

#[test]
fn test_success_with_null_payload_is_failure() {
    let envelope = CreateBrief::shape(&json!({"success": true, "backtest": null})).unwrap();
    assert_eq!(envelope["backtest"], Value::Null);
    assert_eq!(envelope["success"], false);
    assert_eq!(envelope["errors"], json!(["No backtest data available"]));
}

#[test]
fn test_remote_failure_never_yields_payload() {
    let raw = json!({
        "success": false,
        "errors": ["Backtest not found"],
        "backtest": {"backtestId": "42", "status": "Running"}
    });

    let normalized = normalize::<CreateBacktestBrief>(&raw).unwrap();
    assert_eq!(
        normalized,
        Normalized::Failure {
            errors: vec!["Backtest not found".to_string()]
        }
    );
}

#[test]
fn test_empty_payload_object_is_failure() {
    let normalized = normalize::<ReadBacktestBrief>(&json!({"success": true, "backtest": {}})).unwrap();
    assert!(!normalized.is_success());
    assert_eq!(normalized.errors(), ["No backtest data available".to_string()]);
}

#[test]
fn test_non_object_body_is_failure() {
    let normalized = normalize::<ReadBacktestBrief>(&json!("gateway timeout")).unwrap();
    assert!(normalized.payload().is_none());
    assert!(!normalized.errors().is_empty());
}

#[test]
fn test_read_brief_keeps_optional_error_absent() {
    let raw = json!({
        "success": true,
        "backtest": {"status": "Completed.", "hasInitializeError": false, "charts": {}}
    });

    let envelope = ProjectedTool::<Value, ReadBacktestBrief>::shape(&raw).unwrap();
    assert_eq!(
        envelope["backtest"],
        json!({"status": "Completed.", "hasInitializeError": false})
    );
}

#[test]
fn test_read_brief_carries_remote_warnings() {
    let raw = json!({
        "success": true,
        "errors": ["Chart truncated"],
        "backtest": {"status": "Runtime Error", "error": "Division by zero", "hasInitializeError": false}
    });

    let normalized = normalize::<ReadBacktestBrief>(&raw).unwrap();
    let payload = normalized.payload().unwrap();
    assert_eq!(payload.error.as_deref(), Some("Division by zero"));
    assert_eq!(normalized.errors(), ["Chart truncated".to_string()]);
}

#[test]
fn test_missing_required_field_is_loud() {
    let raw = json!({"success": true, "backtest": {"status": "Completed."}});

    let err = normalize::<ReadBacktestBrief>(&raw).unwrap_err();
    assert_eq!(
        err,
        NormalizeError::MissingField {
            payload: "backtest",
            field: "hasInitializeError"
        }
    );
}

#[test]
fn test_wrongly_typed_required_field_is_loud() {
    let raw = json!({"success": true, "backtest": {"backtestId": 42, "status": "Running"}});

    assert!(matches!(
        normalize::<CreateBacktestBrief>(&raw),
        Err(NormalizeError::InvalidField { field: "backtestId", .. })
    ));
}

#[test]
fn test_statistics_brief_filters_statistics() {
    let raw = json!({
        "success": true,
        "backtest": {
            "backtestId": "b1",
            "status": "Completed.",
            "completed": true,
            "tradeableDates": 251,
            "rollingWindow": {"M1_2020": {}},
            "statistics": {
                "Sharpe Ratio": "1.2",
                "Net Profit": "10.5%",
                "Some Internal Metric": "7",
                "Drawdown": null
            }
        }
    });

    let envelope = ProjectedTool::<Value, BacktestStatisticsBrief>::shape(&raw).unwrap();
    let backtest = &envelope["backtest"];
    assert_eq!(backtest["backtestId"], "b1");
    assert_eq!(backtest["tradeableDates"], 251);
    assert_eq!(
        backtest["statistics"],
        json!({"Net Profit": "10.5%", "Sharpe Ratio": "1.2"})
    );
    assert!(backtest.get("rollingWindow").is_none());
    assert!(backtest.get("error").is_none());
}

fn read_brief_source() -> impl Strategy<Value = Map<String, Value>> {
    (
        "[A-Za-z .]{1,16}",
        prop::option::of("[A-Za-z ]{0,24}"),
        any::<bool>(),
        prop::collection::btree_map("[a-z]{1,8}", any::<i32>(), 0..6),
    )
        .prop_map(|(status, error, has_init, extra)| {
            let mut source = Map::new();
            source.insert("status".to_string(), json!(status));
            if let Some(error) = error {
                source.insert("error".to_string(), json!(error));
            }
            source.insert("hasInitializeError".to_string(), json!(has_init));
            for (key, value) in extra {
                source.entry(key).or_insert(json!(value));
            }
            source
        })
}

fn statistics_source() -> impl Strategy<Value = Map<String, Value>> {
    prop::collection::vec(
        (prop::sample::select(STATISTICS_KEYS.to_vec()), "[0-9.%-]{1,8}"),
        0..10,
    )
    .prop_flat_map(|known| {
        prop::collection::btree_map("[a-z ]{3,12}", "[0-9]{1,4}", 0..5).prop_map(move |unknown| {
            let mut statistics = Map::new();
            for (key, value) in &known {
                statistics.insert(key.to_string(), json!(value));
            }
            for (key, value) in unknown {
                statistics.insert(key, json!(value));
            }
            let mut source = Map::new();
            source.insert("backtestId".to_string(), json!("b"));
            source.insert("statistics".to_string(), Value::Object(statistics));
            source
        })
    })
}

fn is_subset(projected: &Value, source: &Value) -> bool {
    match (projected, source) {
        (Value::Object(projected), Value::Object(source)) => projected
            .iter()
            .all(|(key, value)| source.get(key).is_some_and(|s| is_subset(value, s))),
        (projected, source) => projected == source,
    }
}

proptest! {
    #[test]
    fn test_read_brief_never_invents_data(source in read_brief_source()) {
        let raw = json!({"success": true, "backtest": source.clone()});
        let envelope = ProjectedTool::<Value, ReadBacktestBrief>::shape(&raw).unwrap();
        prop_assert!(is_subset(&envelope["backtest"], &Value::Object(source)));
    }

    #[test]
    fn test_statistics_brief_never_invents_data(source in statistics_source()) {
        let raw = json!({"success": true, "backtest": source.clone()});
        let envelope = ProjectedTool::<Value, BacktestStatisticsBrief>::shape(&raw).unwrap();
        prop_assert!(is_subset(&envelope["backtest"], &Value::Object(source)));
    }

    #[test]
    fn test_remote_failure_is_never_success(source in read_brief_source()) {
        let raw = json!({"success": false, "backtest": source});
        let normalized = normalize::<ReadBacktestBrief>(&raw).unwrap();
        prop_assert!(!normalized.is_success());
        prop_assert!(!normalized.errors().is_empty());
    }
}
