use qc_mcp_tools::catalog::{build_registry, project};
use qc_mcp_tools::{ToolProfile, ToolRegistryBuilder};
use std::sync::Arc;

#[test]
fn test_full_profile_registers_every_tool() {
    let registry = build_registry(ToolProfile::Full);
    assert_eq!(registry.count(), 67);
    assert!(registry.get("authorize_connection").is_some());
    assert!(registry.get("read_latest_mcp_server_version").is_some());
    assert!(registry.get("does_not_exist").is_none());
}

#[test]
fn test_minimal_profile() {
    let registry = build_registry(ToolProfile::Minimal);
    assert_eq!(
        registry.list(),
        vec![
            "create_backtest_brief",
            "create_compile",
            "create_project",
            "read_backtest_brief",
            "read_backtest_statistics",
            "read_compile",
            "read_file",
            "search_quantconnect",
            "update_file_contents",
        ]
    );
}

#[test]
fn test_listing_is_sorted_and_complete() {
    let registry = build_registry(ToolProfile::Full);
    let listings = registry.listings();

    let names: Vec<&str> = listings
        .iter()
        .map(|entry| entry["name"].as_str().unwrap())
        .collect();
    let mut sorted = names.clone();
    sorted.sort_unstable();
    assert_eq!(names, sorted);

    for entry in &listings {
        assert_eq!(entry["inputSchema"]["type"], "object", "{}", entry["name"]);
        assert_eq!(entry["outputSchema"]["type"], "object", "{}", entry["name"]);
        assert!(entry["title"].is_string());
        assert!(entry["description"].as_str().is_some_and(|d| !d.is_empty()));
    }
}

#[test]
fn test_annotations_are_reported() {
    let registry = build_registry(ToolProfile::Full);

    let read = registry.get("read_backtest").unwrap().listing();
    assert_eq!(read["annotations"]["readOnlyHint"], true);
    assert!(read["annotations"].get("destructiveHint").is_none());

    let authorize = registry.get("authorize_connection").unwrap().listing();
    assert_eq!(authorize["annotations"]["readOnlyHint"], false);
    assert_eq!(authorize["annotations"]["destructiveHint"], false);
    assert_eq!(authorize["annotations"]["idempotentHint"], true);

    let account = registry.get("read_account").unwrap();
    assert_eq!(account.annotations.open_world_hint, Some(true));
}

#[test]
fn test_input_schema_marks_required_fields() {
    let registry = build_registry(ToolProfile::Full);
    let schema = &registry.get("create_project").unwrap().input_schema;

    let required: Vec<&str> = schema["required"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap())
        .collect();
    assert!(required.contains(&"name"));
    assert!(required.contains(&"language"));
    assert!(!required.contains(&"organizationId"));
    assert_eq!(schema["additionalProperties"], false);
    assert!(schema.get("$schema").is_none());
}

#[test]
fn test_projected_output_schema_allows_null_payload() {
    let registry = build_registry(ToolProfile::Full);
    let schema = &registry.get("read_backtest_brief").unwrap().output_schema;
    assert_eq!(
        schema["properties"]["backtest"]["type"],
        serde_json::json!(["object", "null"])
    );
}

#[test]
fn test_duplicate_registration_keeps_latest() {
    let mut builder = ToolRegistryBuilder::new();
    builder.register(Arc::new(project::read_project()));
    let descriptor = builder.register(Arc::new(project::read_project()));
    assert_eq!(descriptor.name, "read_project");
    assert_eq!(builder.build().count(), 1);
}

#[test]
fn test_profile_parsing() {
    assert_eq!("minimal".parse::<ToolProfile>().unwrap(), ToolProfile::Minimal);
    assert_eq!(" FULL ".parse::<ToolProfile>().unwrap(), ToolProfile::Full);
    assert!("tiny".parse::<ToolProfile>().is_err());
}
