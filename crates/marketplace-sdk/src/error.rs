//! Error type for the marketplace client
//!
//! Every failure path of the client funnels into [`ApiClientError`]. The
//! `status` field is the discriminant: `0` means the backend was never
//! reached (or the request could not even be built), anything else is the
//! HTTP status the backend answered with.

use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

/// Status used for transport-level failures
pub const NETWORK_ERROR_STATUS: u16 = 0;

/// Uniform error returned by every client operation
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message} (status {status})")]
pub struct ApiClientError {
    /// HTTP status, or `0` for transport failures
    pub status: u16,
    /// Human readable message, taken from the backend when it provides one
    pub message: String,
    /// Raw response body (`Null` when there was none)
    pub payload: Value,
}

/// Result type alias
pub type Result<T> = std::result::Result<T, ApiClientError>;

impl ApiClientError {
    /// Create an error from its parts
    pub fn new(status: u16, message: impl Into<String>, payload: Value) -> Self {
        Self {
            status,
            message: message.into(),
            payload,
        }
    }

    /// Wrap a transport failure for the given URL
    pub fn network(url: &str, source: &reqwest::Error) -> Self {
        let reason = if source.is_timeout() {
            "request timed out".to_string()
        } else if source.is_connect() {
            format!("connection failed: {source}")
        } else {
            source.to_string()
        };

        Self::new(
            NETWORK_ERROR_STATUS,
            format!("Network error while requesting {url}: {reason}"),
            Value::Null,
        )
    }

    /// Failure that happened before anything was sent
    pub fn local(message: impl Into<String>) -> Self {
        Self::new(NETWORK_ERROR_STATUS, message, Value::Null)
    }

    /// Build the error for a non-2xx response
    ///
    /// The payload's `message` field wins; otherwise the canonical status
    /// text is used.
    pub fn from_response(status: StatusCode, payload: Value) -> Self {
        let message = payload
            .get("message")
            .and_then(Value::as_str)
            .filter(|m| !m.trim().is_empty())
            .map(str::to_string)
            .or_else(|| status.canonical_reason().map(str::to_string))
            .unwrap_or_else(|| format!("Request failed with status {}", status.as_u16()));

        Self::new(status.as_u16(), message, payload)
    }

    /// The backend was unreachable
    pub fn is_network_error(&self) -> bool {
        self.status == NETWORK_ERROR_STATUS
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status == StatusCode::UNAUTHORIZED.as_u16()
    }

    /// 4xx response
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status)
    }

    /// 5xx response
    pub fn is_server_error(&self) -> bool {
        (500..600).contains(&self.status)
    }

    /// Stable code for logs and user-facing messaging
    pub fn error_code(&self) -> &'static str {
        match self.status {
            NETWORK_ERROR_STATUS => "MARKETPLACE_NETWORK_ERROR",
            400 => "MARKETPLACE_BAD_REQUEST",
            401 => "MARKETPLACE_UNAUTHORIZED",
            403 => "MARKETPLACE_FORBIDDEN",
            404 => "MARKETPLACE_NOT_FOUND",
            409 => "MARKETPLACE_CONFLICT",
            422 => "MARKETPLACE_VALIDATION_ERROR",
            429 => "MARKETPLACE_RATE_LIMIT",
            s if (400..500).contains(&s) => "MARKETPLACE_CLIENT_ERROR",
            s if (500..600).contains(&s) => "MARKETPLACE_SERVER_ERROR",
            _ => "MARKETPLACE_UNEXPECTED_STATUS",
        }
    }
}
