//! Persisted session side channel
//!
//! The in-memory [`Session`](super::Session) is mirrored through a
//! [`SessionPersistence`] so a restarted process can pick the credential up
//! again without talking to the backend.

use super::types::Credential;
use async_trait::async_trait;
use etcetera::{choose_base_strategy, BaseStrategy};
use parking_lot::Mutex;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Name of the session file inside the data directory
pub const SESSION_FILE_NAME: &str = "session.json";

/// Errors raised by a persistence backend
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("Session storage IO error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Session file is not valid JSON: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Failed to determine data directory: {0}")]
    DataDir(String),
}

pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// Storage that mirrors the current credential outside of memory
#[async_trait]
pub trait SessionPersistence: Send + Sync {
    /// Read the stored credential, `None` if nothing is stored
    async fn load(&self) -> PersistenceResult<Option<Credential>>;

    /// Overwrite the stored credential
    async fn save(&self, credential: &Credential) -> PersistenceResult<()>;

    /// Remove the stored credential; clearing nothing is not an error
    async fn clear(&self) -> PersistenceResult<()>;
}

/// Default data directory, e.g. `~/.local/share/marketplace` on Linux
pub fn default_data_dir() -> PersistenceResult<PathBuf> {
    let strategy =
        choose_base_strategy().map_err(|e| PersistenceError::DataDir(e.to_string()))?;
    Ok(strategy.data_dir().join("marketplace"))
}

/// JSON file backed session mirror
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    /// Store at an explicit file path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at `<data dir>/marketplace/session.json`
    pub fn in_default_location() -> PersistenceResult<Self> {
        Ok(Self::new(default_data_dir()?.join(SESSION_FILE_NAME)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> PersistenceError {
        PersistenceError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

#[async_trait]
impl SessionPersistence for FileSessionStore {
    async fn load(&self) -> PersistenceResult<Option<Credential>> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(self.io_error(e)),
        }
    }

    async fn save(&self, credential: &Credential) -> PersistenceResult<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| self.io_error(e))?;
        }

        let contents = serde_json::to_vec_pretty(credential)?;
        tokio::fs::write(&self.path, contents)
            .await
            .map_err(|e| self.io_error(e))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            tokio::fs::set_permissions(&self.path, std::fs::Permissions::from_mode(0o600))
                .await
                .map_err(|e| self.io_error(e))?;
        }

        debug!("Session written to {}", self.path.display());
        Ok(())
    }

    async fn clear(&self) -> PersistenceResult<()> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => {
                debug!("Session file {} removed", self.path.display());
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(self.io_error(e)),
        }
    }
}

/// In-process mirror for tests and short-lived clients
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    stored: Mutex<Option<Credential>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with a credential already stored
    pub fn with_credential(credential: Credential) -> Self {
        Self {
            stored: Mutex::new(Some(credential)),
        }
    }

    /// Current stored value, bypassing the async trait
    pub fn stored(&self) -> Option<Credential> {
        self.stored.lock().clone()
    }
}

#[async_trait]
impl SessionPersistence for MemorySessionStore {
    async fn load(&self) -> PersistenceResult<Option<Credential>> {
        Ok(self.stored.lock().clone())
    }

    async fn save(&self, credential: &Credential) -> PersistenceResult<()> {
        *self.stored.lock() = Some(credential.clone());
        Ok(())
    }

    async fn clear(&self) -> PersistenceResult<()> {
        self.stored.lock().take();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::types::{AuthUser, UserRole};
    use serde_json::Map;

    fn credential(token: &str) -> Credential {
        Credential::new(
            token,
            AuthUser {
                id: "vendor-7".into(),
                email: "vendor@example.com".into(),
                name: Some("Vendor".into()),
                role: UserRole::Vendor,
                extra: Map::new(),
            },
        )
    }

    #[tokio::test]
    async fn test_file_store_lifecycle() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path().join("nested").join(SESSION_FILE_NAME));

        assert!(store.load().await.unwrap().is_none());
        store.clear().await.unwrap();

        store.save(&credential("first")).await.unwrap();
        store.save(&credential("second")).await.unwrap();
        let loaded = store.load().await.unwrap().unwrap();
        assert_eq!(loaded, credential("second"));

        store.clear().await.unwrap();
        assert!(store.load().await.unwrap().is_none());
        assert!(!store.path().exists());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_file_store_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path().join(SESSION_FILE_NAME));
        store.save(&credential("t")).await.unwrap();

        let mode = std::fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[tokio::test]
    async fn test_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SESSION_FILE_NAME);
        std::fs::write(&path, b"not json").unwrap();

        let store = FileSessionStore::new(path);
        assert!(matches!(
            store.load().await,
            Err(PersistenceError::Serde(_))
        ));
    }

    #[tokio::test]
    async fn test_memory_store() {
        let store = MemorySessionStore::with_credential(credential("a"));
        assert_eq!(store.load().await.unwrap(), Some(credential("a")));
        store.clear().await.unwrap();
        assert!(store.stored().is_none());
    }
}
