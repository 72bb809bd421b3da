//! Builder pattern for constructing MarketplaceClient

use crate::auth::{FileSessionStore, Session};
use crate::client::MarketplaceClient;
use crate::config::{base_url_from_env, resolve_base_url, ClientConfig};
use crate::error::{ApiClientError, Result};
use reqwest::header::{HeaderMap, HeaderValue, CACHE_CONTROL};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Builder for constructing a MarketplaceClient with custom configuration
#[derive(Default)]
pub struct ClientBuilder {
    base_url: Option<String>,
    session: Option<Arc<Session>>,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    pool_max_idle_per_host: Option<usize>,
}

impl ClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the builder from loaded configuration
    ///
    /// The session is mirrored to `session_file` when one is configured,
    /// otherwise to the platform data directory.
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let store = match &config.session_file {
            Some(path) => FileSessionStore::new(path),
            None => FileSessionStore::in_default_location().map_err(|e| {
                ApiClientError::local(format!("Failed to locate session storage: {e}"))
            })?,
        };

        let mut builder = Self::default().session(Arc::new(Session::new(Arc::new(store))));
        builder.base_url = config.api_url.clone();
        builder.timeout = config.timeout();
        builder.connect_timeout = config.connect_timeout();
        Ok(builder)
    }

    /// Backend URL; normalized the same way as the environment value
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Credential store to use; an in-memory one is created otherwise
    pub fn session(mut self, session: Arc<Session>) -> Self {
        self.session = Some(session);
        self
    }

    /// Whole-request timeout. Requests never time out unless this is set.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    pub fn pool_max_idle_per_host(mut self, max: usize) -> Self {
        self.pool_max_idle_per_host = Some(max);
        self
    }

    /// Build the client
    pub fn build(self) -> Result<MarketplaceClient> {
        let base_url = match self.base_url.as_deref() {
            Some(url) => resolve_base_url(Some(url)),
            None => base_url_from_env(),
        };
        url::Url::parse(&base_url)
            .map_err(|e| ApiClientError::local(format!("Invalid base URL {base_url}: {e}")))?;

        let mut default_headers = HeaderMap::new();
        default_headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-store"));

        let mut client_builder = reqwest::Client::builder()
            .cookie_store(true)
            .default_headers(default_headers);

        if let Some(timeout) = self.timeout {
            client_builder = client_builder.timeout(timeout);
        }

        if let Some(timeout) = self.connect_timeout {
            client_builder = client_builder.connect_timeout(timeout);
        }

        if let Some(max) = self.pool_max_idle_per_host {
            client_builder = client_builder.pool_max_idle_per_host(max);
        }

        let http = client_builder
            .build()
            .map_err(|e| ApiClientError::local(format!("Failed to build HTTP client: {e}")))?;

        let session = self
            .session
            .unwrap_or_else(|| Arc::new(Session::in_memory()));

        debug!(%base_url, "Marketplace client ready");
        Ok(MarketplaceClient::from_parts(http, base_url, session))
    }

    /// Build the client and load any persisted session into memory
    pub async fn build_restored(self) -> Result<MarketplaceClient> {
        let client = self.build()?;
        client.session().rehydrate().await;
        Ok(client)
    }
}
