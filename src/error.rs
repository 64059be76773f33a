//! Service error types and HTTP mapping
//!
//! Maps internal failures to the stable error codes and status codes of the
//! HTTP API. Upstream failures are kept distinct from deliverability verdicts
//! so a 502 can never be mistaken for a "not deliverable" answer.

use crate::config::ConfigError;
use crate::validation::provider::ProviderError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use thiserror::Error;
use warp::http::StatusCode;

/// Main error type for request handling
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("invalid request: {message}")]
    InvalidRequest { message: String },

    #[error("unauthorized: {message}")]
    Unauthorized { message: String },

    #[error("rate limit exceeded, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    #[error("upstream validation failed: {0}")]
    Upstream(#[from] ProviderError),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// JSON body returned for every error response
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
    pub message: String,
}

impl ServiceError {
    /// Create an invalid-request error
    pub fn invalid_request<S: Into<String>>(message: S) -> Self {
        Self::InvalidRequest {
            message: message.into(),
        }
    }

    /// Create an unauthorized error
    pub fn unauthorized<S: Into<String>>(message: S) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }

    /// Stable error code string for the response body
    pub fn code(&self) -> &'static str {
        match self {
            ServiceError::InvalidRequest { .. } => "INVALID_REQUEST",
            ServiceError::Unauthorized { .. } => "UNAUTHORIZED",
            ServiceError::RateLimited { .. } => "RATE_LIMITED",
            ServiceError::Upstream(_) => "UPSTREAM_ERROR",
            ServiceError::Config(_) => "CONFIGURATION_ERROR",
        }
    }

    /// HTTP status for this error
    pub fn status(&self) -> StatusCode {
        match self {
            ServiceError::InvalidRequest { .. } => StatusCode::BAD_REQUEST,
            ServiceError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            ServiceError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            ServiceError::Upstream(_) => StatusCode::BAD_GATEWAY,
            ServiceError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Build the sanitized JSON body for this error
    pub fn to_body(&self) -> ErrorBody {
        let message = match self {
            ServiceError::InvalidRequest { message } => message.clone(),
            ServiceError::Unauthorized { message } => message.clone(),
            ServiceError::RateLimited { retry_after_secs } => {
                format!("rate limit exceeded, retry after {retry_after_secs}s")
            }
            ServiceError::Upstream(e) => e.to_string(),
            ServiceError::Config(e) => e.to_string(),
        };

        ErrorBody {
            error: self.code(),
            message: sanitize_error_message(&message),
        }
    }
}

static SECRET_PAIR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(password|token|key|secret)[=:]\s*[^\s&]+").unwrap());
static SECRET_PATH: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"/[a-zA-Z0-9._/-]+/(secrets?|\.ssh|\.aws|\.config)/[a-zA-Z0-9._/-]+").unwrap()
});

/// Sanitize error messages before they leave the service.
///
/// Upstream error text can embed the request URL, and the provider API key
/// travels in a `key=` query parameter.
pub fn sanitize_error_message(message: &str) -> String {
    let mut sanitized = SECRET_PAIR.replace_all(message, "${1}=***").to_string();
    sanitized = SECRET_PATH
        .replace_all(&sanitized, "/***REDACTED***/")
        .to_string();

    const MAX_LEN: usize = 500;
    if sanitized.len() > MAX_LEN {
        let suffix = "...[truncated]";
        let mut cut = MAX_LEN - suffix.len();
        while !sanitized.is_char_boundary(cut) {
            cut -= 1;
        }
        sanitized.truncate(cut);
        sanitized.push_str(suffix);
    }

    sanitized
}

/// Result type for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;
