//! Error types for the marketplace CLI

use color_eyre::eyre::Report;
use marketplace_sdk::ApiClientError;
use thiserror::Error;

/// CLI error type with minimal variants
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration file issues
    #[error(transparent)]
    Config(#[from] marketplace_common::ConfigurationError),

    /// Backend or transport failures
    #[error("API error: {0}")]
    Api(#[from] ApiClientError),

    /// Bad command-line input the parser could not catch
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Interactive prompt failed (usually no TTY)
    #[error("Prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("Failed to render JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Everything else (using color-eyre's Report for rich errors)
    #[error(transparent)]
    Internal(#[from] Report),
}

impl CliError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// Suggested next step for the user, if there is an obvious one
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::Api(e) if e.is_unauthorized() => Some("Run 'market login' to sign in again"),
            Self::Api(e) if e.is_network_error() => {
                Some("Check that the backend is running and MARKETPLACE_API_URL points at it")
            }
            _ => None,
        }
    }
}

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn test_suggestions() {
        let unauthorized = CliError::from(ApiClientError::new(401, "Unauthorized", Value::Null));
        assert!(unauthorized.suggestion().unwrap().contains("market login"));

        let offline = CliError::from(ApiClientError::local("connection refused"));
        assert!(offline.suggestion().unwrap().contains("MARKETPLACE_API_URL"));

        let not_found = CliError::from(ApiClientError::new(404, "Not Found", Value::Null));
        assert!(not_found.suggestion().is_none());
    }

    #[test]
    fn test_api_error_display() {
        let err = CliError::from(ApiClientError::new(403, "Vendor only", Value::Null));
        assert_eq!(err.to_string(), "API error: Vendor only (status 403)");
    }
}
