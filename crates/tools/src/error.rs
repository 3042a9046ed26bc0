use crate::normalize::NormalizeError;
use qc_mcp_api::ApiError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ToolError {
    /// Input did not match the tool's request type. Raised before any
    /// request is sent.
    #[error("Validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Normalize(#[from] NormalizeError),

    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),

    #[error("Internal error")]
    Internal,
}

impl ToolError {
    pub fn is_validation(&self) -> bool {
        matches!(self, ToolError::Validation(_))
    }
}
