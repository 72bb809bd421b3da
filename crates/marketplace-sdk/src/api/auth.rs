//! Login, registration and session endpoints

use crate::auth::{
    AuthUser, Credential, LoginRequest, RegisterRequest, LOGIN_PATH, LOGOUT_PATH, REGISTER_PATH,
};
use crate::client::{MarketplaceClient, RequestOptions};
use crate::error::Result;
use serde_json::Value;
use std::sync::Arc;
use tracing::info;

impl MarketplaceClient {
    /// Log in and make the returned credential current
    pub async fn login(&self, request: &LoginRequest) -> Result<Arc<Credential>> {
        let options = RequestOptions::post().json(request)?.skip_auth();
        let credential: Credential = self.request(LOGIN_PATH, options).await?;
        info!(user_id = %credential.user.id, "Logged in");
        Ok(self.session().replace(credential).await)
    }

    /// Create an account; the backend logs the new user in directly
    pub async fn register(&self, request: &RegisterRequest) -> Result<Arc<Credential>> {
        let options = RequestOptions::post().json(request)?.skip_auth();
        let credential: Credential = self.request(REGISTER_PATH, options).await?;
        info!(user_id = %credential.user.id, role = %credential.user.role, "Registered");
        Ok(self.session().replace(credential).await)
    }

    /// End the backend session
    ///
    /// The local session is cleared even when the backend call fails, and
    /// that failure is still reported.
    pub async fn logout(&self) -> Result<()> {
        let result = self
            .request::<Value>(LOGOUT_PATH, RequestOptions::post())
            .await;
        self.session().clear().await;
        info!("Logged out");
        result.map(|_| ())
    }

    /// Profile of the user behind the current token
    pub async fn current_user(&self) -> Result<AuthUser> {
        self.get("/api/auth/me").await
    }
}
