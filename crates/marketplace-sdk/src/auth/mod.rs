//! Authentication state for the marketplace client
//!
//! - [`Session`]: the in-memory credential store a client reads tokens from
//! - [`SessionPersistence`]: the side channel a session is mirrored into
//! - [`refresh`]: the shared, single-flight token refresh

pub mod persistence;
pub mod refresh;
pub mod session;
pub mod types;

pub use persistence::{FileSessionStore, MemorySessionStore, PersistenceError, SessionPersistence};
pub use refresh::{is_auth_exempt, LOGIN_PATH, LOGOUT_PATH, REFRESH_PATH, REGISTER_PATH};
pub use session::Session;
pub use types::{AuthUser, Credential, LoginRequest, RegisterRequest, UserRole};
