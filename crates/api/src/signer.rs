//! Per-request authentication headers.
//!
//! `Authorization` is `Basic base64("{user_id}:{sha256_hex("{token}:{timestamp}")}")`,
//! so the header is only valid around the second it was produced. Headers are
//! rebuilt for every request.

use crate::config::Credentials;
use base64::{engine::general_purpose::STANDARD, Engine};
use sha2::{Digest, Sha256};

pub const HEADER_AUTHORIZATION: &str = "Authorization";
pub const HEADER_TIMESTAMP: &str = "Timestamp";
pub const HEADER_USER_AGENT: &str = "User-Agent";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthHeaders {
    pub authorization: String,
    pub timestamp: String,
    pub user_agent: String,
}

impl AuthHeaders {
    pub fn pairs(&self) -> [(&'static str, &str); 3] {
        [
            (HEADER_AUTHORIZATION, self.authorization.as_str()),
            (HEADER_TIMESTAMP, self.timestamp.as_str()),
            (HEADER_USER_AGENT, self.user_agent.as_str()),
        ]
    }
}

pub struct Signer<'a> {
    credentials: &'a Credentials,
    user_agent: &'a str,
}

impl<'a> Signer<'a> {
    pub fn new(credentials: &'a Credentials, user_agent: &'a str) -> Self {
        Self {
            credentials,
            user_agent,
        }
    }

    pub fn sign(&self) -> AuthHeaders {
        self.sign_at(chrono::Utc::now().timestamp())
    }

    pub fn sign_at(&self, unix_seconds: i64) -> AuthHeaders {
        let timestamp = unix_seconds.to_string();
        let hashed = hash_token(self.credentials.api_token(), &timestamp);
        let authentication =
            STANDARD.encode(format!("{}:{}", self.credentials.user_id(), hashed).as_bytes());

        AuthHeaders {
            authorization: format!("Basic {}", authentication),
            timestamp,
            user_agent: self.user_agent.to_string(),
        }
    }
}

/// Lowercase hex SHA-256 of `"{api_token}:{timestamp}"`.
pub fn hash_token(api_token: &str, timestamp: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(format!("{}:{}", api_token, timestamp).as_bytes());
    hex::encode(hasher.finalize())
}
