//! Token refresh
//!
//! A refresh exchanges the ambient session cookie for a new access token.
//! Concurrent callers that hit an expired token share one refresh through
//! [`RefreshCoordinator`]; the outcome (new credential or error) is applied
//! to the [`Session`] exactly once, inside the shared operation.

use super::session::Session;
use super::types::Credential;
use crate::client::response::{decode, read_response};
use crate::error::{ApiClientError, Result};
use crate::flight::SingleFlight;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub const LOGIN_PATH: &str = "/api/auth/login";
pub const REGISTER_PATH: &str = "/api/auth/register";
pub const REFRESH_PATH: &str = "/api/auth/refresh";
pub const LOGOUT_PATH: &str = "/api/auth/logout";

/// Endpoints whose `401` never triggers a refresh
const AUTH_EXEMPT_PATHS: [&str; 4] = [LOGIN_PATH, REGISTER_PATH, REFRESH_PATH, LOGOUT_PATH];

/// Whether a normalized request path belongs to the auth endpoints
pub fn is_auth_exempt(path: &str) -> bool {
    AUTH_EXEMPT_PATHS
        .iter()
        .any(|prefix| path.starts_with(prefix))
}

pub(crate) type RefreshOutcome = std::result::Result<Arc<Credential>, ApiClientError>;

/// Shares one in-flight refresh between all callers of a client
#[derive(Debug, Default)]
pub(crate) struct RefreshCoordinator {
    flight: SingleFlight<RefreshOutcome>,
}

impl RefreshCoordinator {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Join the running refresh or start one
    pub(crate) async fn refresh(
        &self,
        http: &reqwest::Client,
        base_url: &str,
        session: &Arc<Session>,
    ) -> RefreshOutcome {
        let http = http.clone();
        let url = format!("{base_url}{REFRESH_PATH}");
        let session = session.clone();

        self.flight
            .run(move || refresh_session(http, url, session))
            .await
    }

    #[cfg(test)]
    pub(crate) fn in_flight(&self) -> bool {
        self.flight.in_flight()
    }
}

/// Run one refresh and apply its outcome to the session
async fn refresh_session(http: reqwest::Client, url: String, session: Arc<Session>) -> RefreshOutcome {
    debug!("Refreshing access token");

    match request_refresh(&http, &url).await {
        Ok(credential) => {
            let credential = session.replace(credential).await;
            info!(user_id = %credential.user.id, "Access token refreshed");
            Ok(credential)
        }
        Err(e) => {
            warn!(status = e.status, "Token refresh failed, clearing session: {}", e.message);
            session.clear().await;
            Err(e)
        }
    }
}

/// `POST /api/auth/refresh` with no body and no bearer header
///
/// The backend identifies the session through the cookie jar of the
/// shared HTTP client.
async fn request_refresh(http: &reqwest::Client, url: &str) -> Result<Credential> {
    let response = http
        .post(url)
        .send()
        .await
        .map_err(|e| ApiClientError::network(url, &e))?;

    let body = read_response(url, response).await?;
    decode(url, body)
}
