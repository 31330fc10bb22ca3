//! Durable key-value storage for on-device state.
//!
//! Storage is an explicitly injected dependency rather than ambient global
//! state, so the cart store can be driven by a test double. Exactly one key
//! is in use today (`"cart"`), holding a JSON-encoded line-item array.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use thiserror::Error;

/// Errors from the durable store.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading a key failed (other than the key being absent).
    #[error("failed to read key '{key}': {source}")]
    Read {
        key: String,
        #[source]
        source: io::Error,
    },

    /// Writing a key failed. The in-memory state the caller holds has
    /// already been updated and now diverges from the durable copy.
    #[error("failed to write key '{key}': {source}")]
    Write {
        key: String,
        #[source]
        source: io::Error,
    },
}

/// A durable string-keyed store surviving restarts.
///
/// An absent key reads as `Ok(None)`; writes replace the whole value.
pub trait KeyValueStore: Send + Sync {
    /// Read the value at `key`, or `None` if it was never written.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Read` if the underlying store fails.
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the value at `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Write` if the value could not be made durable.
    fn write(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

// =============================================================================
// FileStore
// =============================================================================

/// File-backed store: one `<key>.json` file per key under a data directory.
#[derive(Debug)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open a store rooted at `dir`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Write` if the directory cannot be created.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|source| StorageError::Write {
            key: dir.display().to_string(),
            source,
        })?;
        Ok(Self { dir })
    }

    /// Directory holding the key files.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Read {
                key: key.to_string(),
                source,
            }),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        fs::write(self.path_for(key), value).map_err(|source| StorageError::Write {
            key: key.to_string(),
            source,
        })
    }
}

// =============================================================================
// MemoryStore
// =============================================================================

/// In-process store used as a test double.
#[derive(Debug, Default)]
pub struct MemoryStore {
    map: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        let map = self.map.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(map.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut map = self.map.lock().unwrap_or_else(PoisonError::into_inner);
        map.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
