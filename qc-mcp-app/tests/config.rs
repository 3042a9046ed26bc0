use qc_mcp_app::AppConfig;
use qc_mcp_tools::ToolProfile;
use std::collections::HashMap;
use std::path::PathBuf;
use tempfile::TempDir;

fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn test_defaults() {
    let config = AppConfig::default();
    assert_eq!(config.api_url, "https://www.quantconnect.com/api/v2");
    assert_eq!(config.agent_name, "MCP Server");
    assert_eq!(config.profile, ToolProfile::Full);
    assert!(config.validate().is_ok());
}

#[test]
fn test_environment_overrides() {
    let mut config = AppConfig::default();
    config
        .apply_overrides(env(&[
            ("QUANTCONNECT_USER_ID", "12345"),
            ("QUANTCONNECT_API_TOKEN", "secret"),
            ("QUANTCONNECT_API_URL", "http://localhost:9000/api/v2"),
            ("AGENT_NAME", "Claude Desktop"),
            ("QC_MCP_PROFILE", "minimal"),
            ("MOUNT_SOURCE_PATH", "/home/me/qc"),
            ("MOUNT_DST_PATH", "/Workspace"),
        ]))
        .unwrap();

    assert_eq!(config.user_id, "12345");
    assert_eq!(config.api_token, "secret");
    assert_eq!(config.agent_name, "Claude Desktop");
    assert_eq!(config.profile, ToolProfile::Minimal);
    assert_eq!(config.mount_dst_path, Some(PathBuf::from("/Workspace")));

    let api = config.api_config();
    assert_eq!(api.base_url, "http://localhost:9000/api/v2");
    assert_eq!(api.credentials.user_id(), "12345");
}

#[test]
fn test_empty_override_keeps_default() {
    let mut config = AppConfig::default();
    config.apply_overrides(env(&[("AGENT_NAME", "  ")])).unwrap();
    assert_eq!(config.agent_name, "MCP Server");
}

#[test]
fn test_unknown_profile_is_rejected() {
    let mut config = AppConfig::default();
    let err = config
        .apply_overrides(env(&[("QC_MCP_PROFILE", "everything")]))
        .unwrap_err();
    assert!(format!("{:#}", err).contains("QC_MCP_PROFILE"));
}

#[test]
fn test_non_http_url_fails_validation() {
    let config = AppConfig {
        api_url: "ftp://quantconnect.com".to_string(),
        ..AppConfig::default()
    };
    assert!(config.validate().is_err());
}

#[test]
fn test_missing_credentials_only_warn() {
    let config = AppConfig {
        user_id: String::new(),
        api_token: String::new(),
        ..AppConfig::default()
    };
    assert!(config.validate().is_ok());
}

#[test]
fn test_yaml_file_fills_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("qc-mcp.yaml");
    std::fs::write(
        &path,
        "user_id: \"777\"\nagent_name: Cursor\nprofile: minimal\n",
    )
    .unwrap();

    let config = AppConfig::from_file(&path).unwrap();
    assert_eq!(config.user_id, "777");
    assert_eq!(config.agent_name, "Cursor");
    assert_eq!(config.profile, ToolProfile::Minimal);
    assert_eq!(config.api_url, "https://www.quantconnect.com/api/v2");
}

#[test]
fn test_malformed_yaml_reports_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.yaml");
    std::fs::write(&path, "profile: [not, a, profile]\n").unwrap();

    let err = AppConfig::from_file(&path).unwrap_err();
    assert!(err.to_string().contains("broken.yaml"));
}
