//! Client configuration
//!
//! Resolution order for the backend URL: explicit builder value, then the
//! `api_url` config key (file or `MARKETPLACE_API_URL`), then
//! `http://localhost:5000`.

use marketplace_common::ConfigLoader;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Backend used when nothing is configured
pub const DEFAULT_API_URL: &str = "http://localhost:5000";

/// Environment variable holding the backend URL
pub const API_URL_ENV: &str = "MARKETPLACE_API_URL";

/// Settings for building a [`MarketplaceClient`](crate::MarketplaceClient)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Backend base URL; a missing scheme means `http://`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,

    /// Whole-request timeout in seconds. No timeout when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,

    /// Connect timeout in seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connect_timeout_secs: Option<u64>,

    /// Where the session is mirrored; the platform data dir when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_file: Option<PathBuf>,
}

impl ClientConfig {
    /// Normalized backend URL
    pub fn base_url(&self) -> String {
        resolve_base_url(self.api_url.as_deref())
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    pub fn connect_timeout(&self) -> Option<Duration> {
        self.connect_timeout_secs.map(Duration::from_secs)
    }
}

impl ConfigLoader for ClientConfig {
    const ENV_PREFIX: &'static str = "MARKETPLACE_";
    const DEFAULT_FILE: &'static str = "marketplace.toml";
}

/// Normalize a configured backend URL
///
/// Blank or missing values fall back to [`DEFAULT_API_URL`], a value
/// without an `http(s)://` scheme gets `http://`, trailing slashes go.
pub fn resolve_base_url(raw: Option<&str>) -> String {
    let raw = raw
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .unwrap_or(DEFAULT_API_URL);

    let lower = raw.to_ascii_lowercase();
    let with_scheme = if lower.starts_with("http://") || lower.starts_with("https://") {
        raw.to_string()
    } else {
        format!("http://{raw}")
    };

    with_scheme.trim_end_matches('/').to_string()
}

/// Base URL from the environment, normalized
pub fn base_url_from_env() -> String {
    resolve_base_url(std::env::var(API_URL_ENV).ok().as_deref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_resolve_base_url() {
        assert_eq!(resolve_base_url(None), "http://localhost:5000");
        assert_eq!(resolve_base_url(Some("   ")), "http://localhost:5000");
        assert_eq!(
            resolve_base_url(Some("api.market.test")),
            "http://api.market.test"
        );
        assert_eq!(
            resolve_base_url(Some("https://api.market.test///")),
            "https://api.market.test"
        );
        assert_eq!(
            resolve_base_url(Some("HTTP://10.0.0.5:8080/")),
            "HTTP://10.0.0.5:8080"
        );
        assert_eq!(
            resolve_base_url(Some("localhost:5000/")),
            "http://localhost:5000"
        );
    }

    #[test]
    #[serial]
    fn test_env_var_feeds_config() {
        std::env::set_var(API_URL_ENV, "staging.market.test/");
        let config = ClientConfig::load(None).unwrap();
        let from_env = base_url_from_env();
        std::env::remove_var(API_URL_ENV);

        assert_eq!(config.base_url(), "http://staging.market.test");
        assert_eq!(from_env, "http://staging.market.test");
    }

    #[test]
    #[serial]
    fn test_defaults() {
        std::env::remove_var(API_URL_ENV);
        let config = ClientConfig::load(None).unwrap();
        assert_eq!(config.base_url(), DEFAULT_API_URL);
        assert!(config.timeout().is_none());
    }
}
