//! Authentication-related types
//!
//! Wire shapes follow the backend, which speaks camelCase JSON.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Role a user holds on the marketplace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Customer,
    Vendor,
    Admin,
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let role = match self {
            UserRole::Customer => "customer",
            UserRole::Vendor => "vendor",
            UserRole::Admin => "admin",
        };
        f.write_str(role)
    }
}

/// Authenticated user as returned by the auth endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthUser {
    pub id: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub role: UserRole,
    /// Fields this client does not model (company, avatar, ...)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Access token plus the user it belongs to
///
/// Always replaced as a whole; a token is never paired with another
/// user's profile.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credential {
    pub access_token: String,
    pub user: AuthUser,
}

impl Credential {
    pub fn new(access_token: impl Into<String>, user: AuthUser) -> Self {
        Self {
            access_token: access_token.into(),
            user,
        }
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("access_token", &"[REDACTED]")
            .field("user", &self.user)
            .finish()
    }
}

/// Body for `POST /api/auth/login`
#[derive(Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Body for `POST /api/auth/register`
#[derive(Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub name: String,
    pub role: UserRole,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
}

impl fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("email", &self.email)
            .field("name", &self.name)
            .field("role", &self.role)
            .field("company_name", &self.company_name)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_credential_wire_format() {
        let credential: Credential = serde_json::from_value(json!({
            "accessToken": "abc",
            "user": {
                "id": "u-1",
                "email": "buyer@example.com",
                "role": "customer",
                "companyName": "Acme"
            }
        }))
        .unwrap();

        assert_eq!(credential.access_token, "abc");
        assert_eq!(credential.user.role, UserRole::Customer);
        assert_eq!(credential.user.name, None);
        assert_eq!(credential.user.extra["companyName"], json!("Acme"));

        let back = serde_json::to_value(&credential).unwrap();
        assert_eq!(back["accessToken"], json!("abc"));
        assert_eq!(back["user"]["companyName"], json!("Acme"));
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let request = LoginRequest {
            email: "a@b.c".into(),
            password: "hunter2".into(),
        };
        assert!(!format!("{request:?}").contains("hunter2"));

        let credential = Credential::new(
            "secret-token",
            AuthUser {
                id: "1".into(),
                email: "a@b.c".into(),
                name: None,
                role: UserRole::Admin,
                extra: Map::new(),
            },
        );
        assert!(!format!("{credential:?}").contains("secret-token"));
    }
}
