use crate::signer::Signer;
use std::fmt;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://www.quantconnect.com/api/v2";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
/// First leg of the brokerage authorization flow.
pub const AUTHORIZE_TIMEOUT: Duration = Duration::from_secs(300);
/// Second leg: waits while the user finishes the flow in the browser.
pub const AUTHORIZE_READ_TIMEOUT: Duration = Duration::from_secs(800);

pub fn default_user_agent() -> String {
    format!("QuantConnect MCP Server v{}", env!("CARGO_PKG_VERSION"))
}

/// QuantConnect user id and API token.
///
/// Empty values are allowed; the API rejects them with an HTTP error.
#[derive(Clone, Default)]
pub struct Credentials {
    user_id: String,
    api_token: String,
}

impl Credentials {
    pub fn new(user_id: impl Into<String>, api_token: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            api_token: api_token.into(),
        }
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub(crate) fn api_token(&self) -> &str {
        &self.api_token
    }

    pub fn has_token(&self) -> bool {
        !self.api_token.is_empty()
    }

    pub fn is_complete(&self) -> bool {
        !self.user_id.is_empty() && self.has_token()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("user_id", &self.user_id)
            .field("api_token", &"<redacted>")
            .finish()
    }
}

/// Connection settings shared by every request. Built once at startup.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub credentials: Credentials,
    pub user_agent: String,
    pub timeout: Duration,
}

impl ApiConfig {
    pub fn new(credentials: Credentials) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            credentials,
            user_agent: default_user_agent(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn signer(&self) -> Signer<'_> {
        Signer::new(&self.credentials, &self.user_agent)
    }

    pub fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }
}
