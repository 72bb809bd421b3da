//! HTTP client for the marketplace backend
//!
//! Every backend call goes through [`MarketplaceClient::request`], which:
//!
//! - attaches `Authorization: Bearer <token>` from the explicit override or
//!   the [`Session`], unless the call opts out
//! - on `401` from a non-auth endpoint, joins (or starts) the single shared
//!   token refresh and retries the call once with the new token
//! - normalizes every failure into [`ApiClientError`]
//!
//! # Usage
//!
//! ```rust,no_run
//! use marketplace_sdk::{MarketplaceClient, RequestOptions};
//!
//! # async fn example() -> marketplace_sdk::Result<()> {
//! let client = MarketplaceClient::builder()
//!     .base_url("https://api.market.example")
//!     .build()?;
//!
//! let orders: serde_json::Value = client.request("/api/orders", RequestOptions::get()).await?;
//! # Ok(())
//! # }
//! ```

mod builder;
pub(crate) mod request;
pub(crate) mod response;

pub use builder::ClientBuilder;
pub use request::{FormPayload, RequestBody, RequestOptions};

use crate::auth::refresh::{is_auth_exempt, RefreshCoordinator};
use crate::auth::{Credential, Session};
use crate::error::{ApiClientError, Result};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Response, StatusCode};
use response::{decode, read_response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

/// Authenticated client for the marketplace API
///
/// Cheap to clone; clones share the connection pool, cookie jar, session,
/// and in-flight refresh.
#[derive(Clone, Debug)]
pub struct MarketplaceClient {
    inner: Arc<ClientInner>,
}

#[derive(Debug)]
struct ClientInner {
    http: reqwest::Client,
    base_url: String,
    session: Arc<Session>,
    refresh: RefreshCoordinator,
}

impl MarketplaceClient {
    fn from_parts(http: reqwest::Client, base_url: String, session: Arc<Session>) -> Self {
        Self {
            inner: Arc::new(ClientInner {
                http,
                base_url,
                session,
                refresh: RefreshCoordinator::new(),
            }),
        }
    }

    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    /// Normalized backend URL without a trailing slash
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// Credential store this client reads from and writes to
    pub fn session(&self) -> &Arc<Session> {
        &self.inner.session
    }

    /// Absolute URL for a backend-relative path
    pub fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.inner.base_url, normalize_path(path))
    }

    /// Issue one logical call and decode its body into `T`
    ///
    /// A `401` from a non-auth endpoint triggers at most one shared refresh
    /// and one retry. If the refresh fails its error is returned and the
    /// session is cleared; the retry's outcome is final either way.
    pub async fn request<T: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<T> {
        let path = normalize_path(path);
        let url = format!("{}{}", self.inner.base_url, path);

        let token = if options.skip_auth_header {
            None
        } else {
            options
                .access_token
                .clone()
                .or_else(|| self.inner.session.access_token())
        };

        let headers = initial_headers(&options, token.as_deref())?;
        let response = self.send(&url, &options, headers).await?;

        if response.status() == StatusCode::UNAUTHORIZED && refreshes_on_401(&path, &options) {
            debug!(method = %options.method, %url, "Access token rejected, refreshing");
            drop(response);

            let credential = self.refresh_credential().await?;
            let headers = retry_headers(&options, &credential.access_token)?;
            let response = self.send(&url, &options, headers).await?;
            return decode(&url, read_response(&url, response).await?);
        }

        decode(&url, read_response(&url, response).await?)
    }

    /// Refresh the access token through the shared refresh
    ///
    /// Joins a refresh that is already running instead of starting another.
    pub async fn refresh_credential(&self) -> Result<Arc<Credential>> {
        self.inner
            .refresh
            .refresh(&self.inner.http, &self.inner.base_url, &self.inner.session)
            .await
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.request(path, RequestOptions::get()).await
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.request(path, RequestOptions::post().json(body)?).await
    }

    pub async fn put<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.request(path, RequestOptions::put().json(body)?).await
    }

    pub async fn patch<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.request(path, RequestOptions::patch().json(body)?).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.request(path, RequestOptions::delete()).await
    }

    async fn send(&self, url: &str, options: &RequestOptions, headers: HeaderMap) -> Result<Response> {
        debug!(method = %options.method, %url, "Sending request");

        let mut request = self
            .inner
            .http
            .request(options.method.clone(), url)
            .headers(headers);

        request = match &options.body {
            Some(RequestBody::Json(value)) => {
                let bytes = serde_json::to_vec(value).map_err(|e| {
                    ApiClientError::local(format!("Failed to serialize request body: {e}"))
                })?;
                request.body(bytes)
            }
            Some(RequestBody::Form(payload)) => request.multipart(payload.to_form()?),
            None => request,
        };

        request
            .send()
            .await
            .map_err(|e| ApiClientError::network(url, &e))
    }
}

/// Prefix a leading slash when the caller left it out
pub(crate) fn normalize_path(path: &str) -> String {
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    }
}

fn refreshes_on_401(path: &str, options: &RequestOptions) -> bool {
    !options.skip_auth_header && !is_auth_exempt(path)
}

fn bearer(token: &str) -> Result<HeaderValue> {
    let mut value = HeaderValue::from_str(&format!("Bearer {token}"))
        .map_err(|_| ApiClientError::local("Access token is not a valid header value"))?;
    value.set_sensitive(true);
    Ok(value)
}

/// Headers for the first attempt
///
/// Form bodies never carry an explicit content type so the transport can
/// add the multipart boundary.
fn initial_headers(options: &RequestOptions, token: Option<&str>) -> Result<HeaderMap> {
    let mut headers = options.headers.clone();

    if options.is_form() {
        headers.remove(CONTENT_TYPE);
    } else if matches!(options.body, Some(RequestBody::Json(_)))
        && !headers.contains_key(CONTENT_TYPE)
    {
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    }

    if let Some(token) = token {
        headers.insert(AUTHORIZATION, bearer(token)?);
    }

    Ok(headers)
}

/// Headers for the single retry after a refresh
///
/// Form requests start from a fresh map holding only `Authorization`;
/// everything else keeps its headers with `Authorization` overwritten.
fn retry_headers(options: &RequestOptions, token: &str) -> Result<HeaderMap> {
    if options.is_form() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, bearer(token)?);
        return Ok(headers);
    }

    initial_headers(options, Some(token))
}
