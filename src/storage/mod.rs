//! Durable key-value storage for the signed-in session
//!
//! The session store mirrors its state into two string keys (`token` and
//! `user`). [`KeyValueStore`] is the seam; [`SledStore`] persists to an
//! embedded `sled` database and [`MemoryStore`] keeps values in process.

use crate::error::{ChatterboxError, Result};
use anyhow::Context;
use directories::ProjectDirs;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

/// Key holding the opaque session token
pub const TOKEN_KEY: &str = "token";

/// Key holding the JSON-serialized signed-in user
pub const USER_KEY: &str = "user";

/// String key-value storage
///
/// Implementations must be usable from any thread; the session store
/// holds them behind an `Arc`.
pub trait KeyValueStore: Send + Sync {
    /// Read a value, `None` when the key is absent
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write a value, replacing any previous one
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Delete a value; deleting an absent key is not an error
    fn remove(&self, key: &str) -> Result<()>;
}

/// Storage backed by an embedded `sled` database
pub struct SledStore {
    db: sled::Db,
    path: PathBuf,
}

impl SledStore {
    /// Open the store at `<user data dir>/chatterbox/session.db`
    ///
    /// Path overrides are resolved by the configuration layer, which calls
    /// [`SledStore::open`] instead.
    ///
    /// # Errors
    ///
    /// Returns `ChatterboxError::Storage` if the data directory cannot be
    /// determined or the database cannot be opened
    pub fn new() -> Result<Self> {
        let proj_dirs = ProjectDirs::from("dev", "chatterbox", "chatterbox")
            .ok_or_else(|| ChatterboxError::Storage("Could not determine data directory".into()))?;

        Self::open(proj_dirs.data_dir().join("session.db"))
    }

    /// Open the store at an explicit path
    ///
    /// Parent directories are created as needed.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use chatterbox::storage::{KeyValueStore, SledStore};
    ///
    /// let store = SledStore::open("/tmp/chatterbox-session.db").unwrap();
    /// store.set("token", "abc").unwrap();
    /// ```
    pub fn open<P: Into<PathBuf>>(path: P) -> Result<Self> {
        let path = path.into();

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(ChatterboxError::Io)
                .with_context(|| {
                    format!(
                        "Failed to create parent directory for session database {}",
                        parent.display()
                    )
                })?;
        }

        let db = sled::open(&path)
            .map_err(|e| ChatterboxError::Storage(format!("Failed to open database: {}", e)))?;

        tracing::debug!(path = %path.display(), "Opened session database");
        Ok(Self { db, path })
    }

    /// Location of the database on disk
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl KeyValueStore for SledStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        match self
            .db
            .get(key.as_bytes())
            .map_err(|e| ChatterboxError::Storage(format!("Get failed: {}", e)))?
        {
            Some(bytes) => {
                let value = String::from_utf8(bytes.to_vec()).map_err(|e| {
                    ChatterboxError::Storage(format!("Value for '{}' is not UTF-8: {}", key, e))
                })?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.db
            .insert(key.as_bytes(), value.as_bytes())
            .map_err(|e| ChatterboxError::Storage(format!("Insert failed: {}", e)))?;

        self.db
            .flush()
            .map_err(|e| ChatterboxError::Storage(format!("Flush failed: {}", e)))?;

        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.db
            .remove(key.as_bytes())
            .map_err(|e| ChatterboxError::Storage(format!("Remove failed: {}", e)))?;

        self.db
            .flush()
            .map_err(|e| ChatterboxError::Storage(format!("Flush failed: {}", e)))?;

        Ok(())
    }
}

/// In-process storage, lost when the process exits
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let values = self
            .values
            .read()
            .map_err(|_| ChatterboxError::Storage("Memory store lock poisoned".into()))?;
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut values = self
            .values
            .write()
            .map_err(|_| ChatterboxError::Storage("Memory store lock poisoned".into()))?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut values = self
            .values
            .write()
            .map_err(|_| ChatterboxError::Storage("Memory store lock poisoned".into()))?;
        values.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn create_test_store() -> (SledStore, tempfile::TempDir) {
        let dir = tempdir().expect("failed to create tempdir");
        let store = SledStore::open(dir.path().join("session.db")).expect("failed to open store");
        (store, dir)
    }

    #[test]
    fn test_sled_set_then_get() {
        let (store, _dir) = create_test_store();
        store.set(TOKEN_KEY, "mock-jwt-token-1").expect("set failed");
        assert_eq!(
            store.get(TOKEN_KEY).expect("get failed").as_deref(),
            Some("mock-jwt-token-1")
        );
    }

    #[test]
    fn test_sled_get_missing_returns_none() {
        let (store, _dir) = create_test_store();
        assert!(store.get(USER_KEY).expect("get failed").is_none());
    }

    #[test]
    fn test_sled_set_overwrites() {
        let (store, _dir) = create_test_store();
        store.set(TOKEN_KEY, "first").unwrap();
        store.set(TOKEN_KEY, "second").unwrap();
        assert_eq!(store.get(TOKEN_KEY).unwrap().as_deref(), Some("second"));
    }

    #[test]
    fn test_sled_remove_is_idempotent() {
        let (store, _dir) = create_test_store();
        store.set(USER_KEY, "{}").unwrap();
        store.remove(USER_KEY).expect("first remove failed");
        store.remove(USER_KEY).expect("second remove failed");
        assert!(store.get(USER_KEY).unwrap().is_none());
    }

    #[test]
    fn test_sled_values_survive_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("session.db");
        {
            let store = SledStore::open(&path).unwrap();
            store.set(TOKEN_KEY, "persisted").unwrap();
        }
        let reopened = SledStore::open(&path).unwrap();
        assert_eq!(reopened.get(TOKEN_KEY).unwrap().as_deref(), Some("persisted"));
        assert_eq!(reopened.path(), path.as_path());
    }

    #[test]
    fn test_open_keeps_io_cause_when_parent_cannot_be_created() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "a file, not a directory").unwrap();

        let err = match SledStore::open(blocker.join("nested").join("session.db")) {
            Ok(_) => panic!("open should fail below a regular file"),
            Err(e) => e,
        };

        assert!(err.to_string().contains("Failed to create parent directory"));
        assert!(matches!(
            err.downcast_ref::<ChatterboxError>(),
            Some(ChatterboxError::Io(_))
        ));
        assert!(err.chain().any(|cause| cause.is::<std::io::Error>()));
    }

    #[test]
    fn test_memory_store_roundtrip_and_remove() {
        let store = MemoryStore::new();
        assert!(store.get(TOKEN_KEY).unwrap().is_none());
        store.set(TOKEN_KEY, "t").unwrap();
        assert_eq!(store.get(TOKEN_KEY).unwrap().as_deref(), Some("t"));
        store.remove(TOKEN_KEY).unwrap();
        assert!(store.get(TOKEN_KEY).unwrap().is_none());
    }
}
