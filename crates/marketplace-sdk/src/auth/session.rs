//! Credential store shared by a client and its callers
//!
//! A [`Session`] is constructed explicitly and handed to the client, so
//! several clients (or tests) never share hidden global state. The current
//! credential lives behind a lock as one `Arc<Credential>`; readers clone the
//! `Arc` and writers swap it, so a token and its user always travel together.

use super::persistence::{MemorySessionStore, SessionPersistence};
use super::types::{AuthUser, Credential};
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::{debug, warn};

pub struct Session {
    current: RwLock<Option<Arc<Credential>>>,
    persistence: Arc<dyn SessionPersistence>,
}

impl Session {
    /// Empty session mirrored through `persistence`
    pub fn new(persistence: Arc<dyn SessionPersistence>) -> Self {
        Self {
            current: RwLock::new(None),
            persistence,
        }
    }

    /// Empty session that is only mirrored in memory
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemorySessionStore::new()))
    }

    /// Snapshot of the current credential
    pub fn credential(&self) -> Option<Arc<Credential>> {
        self.current.read().clone()
    }

    pub fn access_token(&self) -> Option<String> {
        self.current
            .read()
            .as_ref()
            .map(|credential| credential.access_token.clone())
    }

    pub fn user(&self) -> Option<AuthUser> {
        self.current
            .read()
            .as_ref()
            .map(|credential| credential.user.clone())
    }

    pub fn is_authenticated(&self) -> bool {
        self.current.read().is_some()
    }

    /// Swap in a new credential and mirror it
    ///
    /// The in-memory swap happens before the first suspension point.
    /// Mirror failures are logged; the in-memory state stays authoritative.
    pub async fn replace(&self, credential: Credential) -> Arc<Credential> {
        let credential = Arc::new(credential);
        *self.current.write() = Some(credential.clone());
        debug!(user_id = %credential.user.id, "Session credential replaced");

        if let Err(e) = self.persistence.save(&credential).await {
            warn!("Failed to persist session: {}", e);
        }
        credential
    }

    /// Drop the credential from memory and from the mirror
    pub async fn clear(&self) {
        self.current.write().take();
        debug!("Session cleared");

        if let Err(e) = self.persistence.clear().await {
            warn!("Failed to clear persisted session: {}", e);
        }
    }

    /// Load the mirrored credential into memory
    ///
    /// Used once at start-up. An unreadable mirror is treated as "no
    /// session" and cleared so it does not fail every later start.
    pub async fn rehydrate(&self) -> Option<Arc<Credential>> {
        match self.persistence.load().await {
            Ok(Some(credential)) => {
                let credential = Arc::new(credential);
                *self.current.write() = Some(credential.clone());
                debug!(user_id = %credential.user.id, "Session rehydrated");
                Some(credential)
            }
            Ok(None) => None,
            Err(e) => {
                warn!("Discarding unreadable persisted session: {}", e);
                if let Err(e) = self.persistence.clear().await {
                    warn!("Failed to clear persisted session: {}", e);
                }
                None
            }
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::in_memory()
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("current", &*self.current.read())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::persistence::FileSessionStore;
    use crate::auth::types::UserRole;
    use serde_json::Map;

    fn credential(token: &str, user_id: &str) -> Credential {
        Credential::new(
            token,
            AuthUser {
                id: user_id.into(),
                email: format!("{user_id}@example.com"),
                name: None,
                role: UserRole::Customer,
                extra: Map::new(),
            },
        )
    }

    #[tokio::test]
    async fn test_replace_swaps_token_and_user_together() {
        let mirror = Arc::new(MemorySessionStore::new());
        let session = Session::new(mirror.clone());

        session.replace(credential("old", "alice")).await;
        let before = session.credential().unwrap();

        session.replace(credential("new", "bob")).await;
        assert_eq!(session.access_token().as_deref(), Some("new"));
        assert_eq!(session.user().unwrap().id, "bob");
        assert_eq!(mirror.stored(), Some(credential("new", "bob")));

        // Earlier snapshots are unaffected by the swap
        assert_eq!(before.access_token, "old");
        assert_eq!(before.user.id, "alice");
    }

    #[tokio::test]
    async fn test_clear_empties_memory_and_mirror() {
        let mirror = Arc::new(MemorySessionStore::with_credential(credential("t", "u")));
        let session = Session::new(mirror.clone());
        session.rehydrate().await;
        assert!(session.is_authenticated());

        session.clear().await;
        assert!(!session.is_authenticated());
        assert!(session.user().is_none());
        assert!(mirror.stored().is_none());
    }

    #[tokio::test]
    async fn test_rehydrate_discards_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, b"{ truncated").unwrap();

        let session = Session::new(Arc::new(FileSessionStore::new(&path)));
        assert!(session.rehydrate().await.is_none());
        assert!(!session.is_authenticated());
        assert!(!path.exists());
    }
}
