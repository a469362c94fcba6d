//! Durable bearer token storage
//!
//! The token is the only piece of session state that survives a restart. It
//! is stored as an opaque string under a fixed key; no format is imposed.

use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard, PoisonError};

use directories::ProjectDirs;
use thiserror::Error;
use tracing::debug;

use crate::config::TOKEN_KEY;

/// Durable storage failure
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("token storage unavailable: {0}")]
    Unavailable(String),

    #[error("token storage I/O failed: {0}")]
    Io(#[from] io::Error),
}

/// Key/value persistence for the bearer token.
///
/// `save` overwrites any prior value; `load` returns `None` when nothing is
/// stored; `clear` succeeds even when nothing was stored.
pub trait TokenStore: Send + Sync {
    fn save(&self, token: &str) -> Result<(), StoreError>;
    fn load(&self) -> Result<Option<String>, StoreError>;
    fn clear(&self) -> Result<(), StoreError>;
}

/// File-backed store under the platform state directory.
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    /// Store under the platform-specific data directory
    pub fn new() -> Result<Self, StoreError> {
        let dirs = ProjectDirs::from("com.pawsconnect", "PawsConnect", "PawsConnect")
            .ok_or_else(|| {
                StoreError::Unavailable("no platform data directory available".into())
            })?;
        Ok(Self {
            path: dirs.data_dir().join(TOKEN_KEY),
        })
    }

    /// Store under an explicit directory (tests, custom installations)
    pub fn with_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            path: dir.into().join(TOKEN_KEY),
        }
    }

    /// Path of the backing file
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl TokenStore for FileTokenStore {
    fn save(&self, token: &str) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, token)?;
        debug!(path = %self.path.display(), "persisted session token");
        Ok(())
    }

    fn load(&self) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(token) => Ok(Some(token)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn clear(&self) -> Result<(), StoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-memory store for tests and ephemeral sessions.
#[derive(Default)]
pub struct MemoryTokenStore {
    slot: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    // The slot holds a plain Option; a panic mid-update cannot leave it
    // half-written, so a poisoned lock is still usable.
    fn slot(&self) -> MutexGuard<'_, Option<String>> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl TokenStore for MemoryTokenStore {
    fn save(&self, token: &str) -> Result<(), StoreError> {
        *self.slot() = Some(token.to_owned());
        Ok(())
    }

    fn load(&self) -> Result<Option<String>, StoreError> {
        Ok(self.slot().clone())
    }

    fn clear(&self) -> Result<(), StoreError> {
        *self.slot() = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn save_load_clear_roundtrip() {
        let dir = TempDir::new().unwrap();
        let store = FileTokenStore::with_dir(dir.path());

        assert_eq!(store.load().unwrap(), None);

        store.save("abc123").unwrap();
        assert_eq!(store.load().unwrap(), Some("abc123".to_string()));

        // Overwrites, no appending
        store.save("second").unwrap();
        assert_eq!(store.load().unwrap(), Some("second".to_string()));

        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn clear_succeeds_when_nothing_stored() {
        let dir = TempDir::new().unwrap();
        let store = FileTokenStore::with_dir(dir.path());

        assert!(store.clear().is_ok());
        assert!(store.clear().is_ok());
    }

    #[test]
    fn token_survives_a_fresh_store_over_the_same_dir() {
        let dir = TempDir::new().unwrap();
        FileTokenStore::with_dir(dir.path()).save("abc123").unwrap();

        let fresh = FileTokenStore::with_dir(dir.path());
        assert_eq!(fresh.load().unwrap(), Some("abc123".to_string()));
    }

    #[test]
    fn token_is_stored_verbatim() {
        let dir = TempDir::new().unwrap();
        let store = FileTokenStore::with_dir(dir.path());

        // Opaque string, no format imposed
        store.save("  weird token\n").unwrap();
        assert_eq!(store.load().unwrap(), Some("  weird token\n".to_string()));
    }

    #[test]
    fn memory_store_survives_a_poisoned_lock() {
        let store = MemoryTokenStore::new();
        store.save("t").unwrap();

        let _ = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = store.slot.lock().unwrap();
            panic!("poison the slot");
        }));

        assert_eq!(store.load().unwrap(), Some("t".to_string()));
        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn memory_store_roundtrip() {
        let store = MemoryTokenStore::new();
        assert_eq!(store.load().unwrap(), None);
        store.save("t").unwrap();
        assert_eq!(store.load().unwrap(), Some("t".to_string()));
        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);
    }
}
