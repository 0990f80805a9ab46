//! Error kinds shared by every handler.
//!
//! Library code returns [`ApiError`] and propagates with `?`. The handler
//! boundary in [`crate::endpoint::EndpointPolicy::respond`] is the only place an
//! error becomes an HTTP response.

use serde_json::{json, Value};
use thiserror::Error;
use vercel_runtime::StatusCode;

#[derive(Error, Debug)]
pub enum ApiError {
    /// A required secret or address is not configured.
    #[error("{0}")]
    Configuration(String),

    /// The caller sent an incomplete or malformed request.
    #[error("{0}")]
    Validation(String),

    #[error("Method not allowed")]
    MethodNotAllowed,

    /// A third-party API reported a structured error. The body is passed
    /// through to the caller verbatim.
    #[error("Upstream error: {0}")]
    Upstream(Value),

    /// Transport failures, malformed upstream responses, parse failures.
    #[error("{0}")]
    Unexpected(String),
}

impl ApiError {
    pub fn configuration(message: impl Into<String>) -> Self {
        ApiError::Configuration(message.into())
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::Validation(message.into())
    }

    pub fn unexpected(message: impl Into<String>) -> Self {
        ApiError::Unexpected(message.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Upstream(_) => StatusCode::BAD_GATEWAY,
            ApiError::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// JSON payload written to the response body.
    pub fn body(&self) -> Value {
        match self {
            ApiError::Upstream(body) => body.clone(),
            other => json!({ "error": other.to_string() }),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Unexpected(err.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Unexpected(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
