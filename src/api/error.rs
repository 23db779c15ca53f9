//! API Error Types
//!
//! Errors surfaced by the API client. Every non-2xx status is kept
//! distinguishable so callers can map 401/409 to their own messages.

use serde::Deserialize;
use thiserror::Error;

/// API error types
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    /// HTTP 401; the session has already been cleared and the user sent to `/login`
    #[error("Unauthorized")]
    Unauthorized,

    /// Any other non-2xx response
    #[error("API error: {status}")]
    Status {
        status: u16,
        /// `error` field of the backend's JSON body, if any
        message: Option<String>,
        /// `field` the backend attributed the error to, if any
        field: Option<String>,
    },

    /// Request never produced a response (DNS, refused, timeout...)
    #[error("Network error: {0}")]
    Network(String),

    /// Response body did not match the expected shape
    #[error("Invalid response: {0}")]
    Decode(String),

    /// Request body could not be encoded
    #[error("Request build error: {0}")]
    Encode(String),
}

impl ApiError {
    /// HTTP status carried by the error, if it came from a response
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Unauthorized => Some(401),
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True for HTTP 409
    pub fn is_conflict(&self) -> bool {
        self.status() == Some(409)
    }

    /// Backend-provided message, if the response carried one
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Status { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    /// Backend-provided field name, if the response carried one
    pub fn field(&self) -> Option<&str> {
        match self {
            ApiError::Status { field, .. } => field.as_deref(),
            _ => None,
        }
    }

    /// Build a status error from a raw response body
    pub(crate) fn from_response(status: u16, body: &str) -> Self {
        let parsed: Option<ErrorBody> = serde_json::from_str(body).ok();
        let (message, field) = match parsed {
            Some(b) => (b.error, b.field),
            None => (None, None),
        };
        ApiError::Status {
            status,
            message,
            field,
        }
    }
}

/// Error body returned by the backend: `{"error": "...", "field": "..."}`
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    field: Option<String>,
}

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;
