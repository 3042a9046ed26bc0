use anyhow::{bail, Context, Result};
use qc_mcp_api::{ApiClient, ApiConfig, Credentials, DEFAULT_BASE_URL};
use qc_mcp_tools::context::DEFAULT_AGENT_NAME;
use qc_mcp_tools::{ToolContext, ToolProfile};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::warn;

pub const CONFIG_PATH_VAR: &str = "QC_MCP_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "qc-mcp.yaml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub user_id: String,
    pub api_token: String,
    pub api_url: String,
    /// Recorded as `codeSourceId` on file and lock requests.
    pub agent_name: String,
    pub profile: ToolProfile,
    pub mount_source_path: Option<PathBuf>,
    pub mount_dst_path: Option<PathBuf>,
    /// Log filter used when `RUST_LOG` is unset.
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            user_id: String::new(),
            api_token: String::new(),
            api_url: DEFAULT_BASE_URL.to_string(),
            agent_name: DEFAULT_AGENT_NAME.to_string(),
            profile: ToolProfile::Full,
            mount_source_path: None,
            mount_dst_path: None,
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// File (if any) then process environment.
    pub fn load() -> Result<Self> {
        let mut config = match config_path() {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Applies environment-style overrides. Empty values are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(user_id) = get("QUANTCONNECT_USER_ID") {
            self.user_id = user_id;
        }
        if let Some(api_token) = get("QUANTCONNECT_API_TOKEN") {
            self.api_token = api_token;
        }
        if let Some(api_url) = get("QUANTCONNECT_API_URL") {
            self.api_url = api_url;
        }
        if let Some(agent_name) = get("AGENT_NAME") {
            self.agent_name = agent_name;
        }
        if let Some(profile) = get("QC_MCP_PROFILE") {
            self.profile = profile
                .parse()
                .map_err(anyhow::Error::msg)
                .context("Invalid QC_MCP_PROFILE")?;
        }
        if let Some(source) = get("MOUNT_SOURCE_PATH") {
            self.mount_source_path = Some(PathBuf::from(source));
        }
        if let Some(destination) = get("MOUNT_DST_PATH") {
            self.mount_dst_path = Some(PathBuf::from(destination));
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        let url = self.api_url.trim();
        if !(url.starts_with("https://") || url.starts_with("http://")) {
            bail!("API URL must start with http:// or https://, got {:?}", self.api_url);
        }
        if self.agent_name.trim().is_empty() {
            bail!("Agent name cannot be empty");
        }

        if self.user_id.is_empty() || self.api_token.is_empty() {
            warn!("QUANTCONNECT_USER_ID or QUANTCONNECT_API_TOKEN is not set; API calls will be rejected");
        }
        Ok(())
    }

    pub fn api_config(&self) -> ApiConfig {
        ApiConfig::new(Credentials::new(&self.user_id, &self.api_token))
            .with_base_url(self.api_url.trim())
    }

    pub fn tool_context(&self) -> ToolContext {
        ToolContext::new(
            ApiClient::new(Arc::new(self.api_config())),
            self.agent_name.clone(),
        )
    }
}

fn config_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var(CONFIG_PATH_VAR) {
        return Some(PathBuf::from(path));
    }
    let default = PathBuf::from(DEFAULT_CONFIG_FILE);
    default.exists().then_some(default)
}
