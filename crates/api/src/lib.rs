//! Authenticated access to the QuantConnect REST API.
//!
//! Every request is signed with a fresh timestamped token, sent over its own
//! short-lived HTTP client, and decoded into raw JSON. Interpreting the body
//! is left to the caller.

pub mod browser;
pub mod client;
pub mod config;
pub mod error;
pub mod signer;
pub mod sparse;

pub use browser::{BrowserLauncher, SystemBrowser};
pub use client::{ApiClient, MultipartUpload};
pub use config::{ApiConfig, Credentials, DEFAULT_BASE_URL};
pub use error::ApiError;
pub use signer::{AuthHeaders, Signer};
