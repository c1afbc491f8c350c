/*
[INPUT]:  Error sources (HTTP transport, API responses, serialization)
[OUTPUT]: Structured error types with context and retry hints
[POS]:    Error handling layer - unified error types for entire crate
[UPDATE]: When adding new error sources or improving error messages
*/

use reqwest::StatusCode;
use thiserror::Error;

/// Main error type for the My Attire adapter
#[derive(Error, Debug)]
pub enum MyAttireError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error response
    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// Credentials rejected or token no longer accepted
    #[error("authentication failed: {message}")]
    Authentication { message: String },

    /// Session expired client-side
    #[error("session expired, please sign in again")]
    SessionExpired,

    /// Requested resource does not exist
    #[error("not found: {0}")]
    NotFound(String),

    /// Serialization/deserialization failed
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// URL parsing failed
    #[error("invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Invalid response from server
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

impl MyAttireError {
    /// Check if the error is retryable
    pub fn is_retryable(&self) -> bool {
        match self {
            MyAttireError::Http(err) => err.is_timeout() || err.is_connect(),
            MyAttireError::Api { status, .. } => *status >= 500,
            MyAttireError::InvalidResponse(_) => true,
            _ => false,
        }
    }

    /// Check if error indicates authentication failure
    pub fn is_auth_error(&self) -> bool {
        matches!(
            self,
            MyAttireError::Authentication { .. } | MyAttireError::SessionExpired
        )
    }

    /// Check if error maps to a missing resource
    pub fn is_not_found(&self) -> bool {
        matches!(self, MyAttireError::NotFound(_))
    }

    /// Create an error from an HTTP status and the service's error message.
    /// 401/403 become authentication errors and 404 a NotFound, so callers
    /// can route on the failure class instead of raw status codes.
    pub fn api_error(status: StatusCode, message: impl Into<String>) -> Self {
        let message = message.into();
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                MyAttireError::Authentication { message }
            }
            StatusCode::NOT_FOUND => MyAttireError::NotFound(message),
            _ => MyAttireError::Api {
                status: status.as_u16(),
                message,
            },
        }
    }
}

/// Result type alias for adapter operations
pub type Result<T> = std::result::Result<T, MyAttireError>;
