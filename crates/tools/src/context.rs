use qc_mcp_api::{ApiClient, BrowserLauncher, SystemBrowser};
use std::sync::Arc;

pub const DEFAULT_AGENT_NAME: &str = "MCP Server";
pub const LATEST_VERSION_URL: &str =
    "https://hub.docker.com/v2/namespaces/quantconnect/repositories/mcp-server/tags";

/// Everything a tool needs at call time. Built once and shared read-only.
#[derive(Clone)]
pub struct ToolContext {
    pub api: ApiClient,
    /// Written into `codeSourceId` on requests that record provenance.
    pub agent_name: String,
    pub browser: Arc<dyn BrowserLauncher>,
    pub latest_version_url: String,
}

impl ToolContext {
    pub fn new(api: ApiClient, agent_name: impl Into<String>) -> Self {
        Self {
            api,
            agent_name: agent_name.into(),
            browser: Arc::new(SystemBrowser),
            latest_version_url: LATEST_VERSION_URL.to_string(),
        }
    }

    pub fn with_browser(mut self, browser: Arc<dyn BrowserLauncher>) -> Self {
        self.browser = browser;
        self
    }

    pub fn with_latest_version_url(mut self, url: impl Into<String>) -> Self {
        self.latest_version_url = url.into();
        self
    }
}
