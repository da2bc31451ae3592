//! Durable client-side session storage.
//!
//! The session persists exactly three independent key/value entries: the
//! access token, the refresh token, and the serialized admin identity. The
//! [`Storage`] trait abstracts the backing store so the session logic works
//! against a directory on disk ([`FileStorage`]) in the CLI and against an
//! inspectable in-memory map ([`MemoryStorage`]) in tests.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

use thiserror::Error;

/// Names of the persisted session entries.
pub mod keys {
    /// Bearer access token.
    pub const ACCESS_TOKEN: &str = "admin_access_token";
    /// Long-lived refresh token.
    pub const REFRESH_TOKEN: &str = "admin_refresh_token";
    /// Serialized admin identity (JSON).
    pub const ADMIN_DATA: &str = "admin_data";
}

/// Errors raised by a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing a storage entry failed.
    #[error("storage I/O error at {path}: {source}")]
    Io {
        /// Location of the failing entry or directory.
        path: PathBuf,
        /// Underlying I/O failure.
        source: std::io::Error,
    },
}

impl StorageError {
    fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Key/value store for the persisted session entries.
pub trait Storage: Send + Sync {
    /// Read an entry. Missing entries are `Ok(None)`, not an error.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` when the backing store cannot be read.
    fn load(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write an entry, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` when the backing store cannot be written.
    fn store(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete an entry. Removing a missing entry is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` when the backing store cannot be written.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

// =============================================================================
// File-backed storage
// =============================================================================

/// One file per entry under a data directory.
#[derive(Debug)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Open (and create if needed) a storage directory.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the directory cannot be created.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir).map_err(|e| StorageError::io(&dir, e))?;
        Ok(Self { dir })
    }

    /// Directory this storage writes into.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }
}

impl Storage for FileStorage {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.entry_path(key);
        match std::fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::io(path, e)),
        }
    }

    fn store(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.entry_path(key);
        std::fs::write(&path, value).map_err(|e| StorageError::io(path, e))
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let path = self.entry_path(key);
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::io(path, e)),
        }
    }
}

// =============================================================================
// In-memory storage
// =============================================================================

/// Shared in-memory storage for tests.
///
/// Clones share the same underlying map, so a test can hold one handle while
/// the session owns another and still observe writes.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryStorage {
    /// Create an empty in-memory storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries currently stored.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether no entries are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Storage for MemoryStorage {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(key).cloned())
    }

    fn store(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn memory_storage_round_trips_entries() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.load(keys::ACCESS_TOKEN).unwrap(), None);

        storage.store(keys::ACCESS_TOKEN, "tok1").unwrap();
        assert_eq!(
            storage.load(keys::ACCESS_TOKEN).unwrap().as_deref(),
            Some("tok1")
        );

        storage.remove(keys::ACCESS_TOKEN).unwrap();
        assert_eq!(storage.load(keys::ACCESS_TOKEN).unwrap(), None);
    }

    #[test]
    fn memory_storage_clones_share_entries() {
        let storage = MemoryStorage::new();
        let observer = storage.clone();

        storage.store(keys::ADMIN_DATA, "{}").unwrap();
        assert_eq!(observer.load(keys::ADMIN_DATA).unwrap().as_deref(), Some("{}"));
        assert_eq!(observer.len(), 1);
    }

    #[test]
    fn memory_storage_remove_is_idempotent() {
        let storage = MemoryStorage::new();
        storage.remove("missing").unwrap();
        storage.remove("missing").unwrap();
        assert!(storage.is_empty());
    }

    #[test]
    fn file_storage_round_trips_entries() {
        let dir = std::env::temp_dir().join(format!(
            "lumera-storage-roundtrip-{}",
            std::process::id()
        ));
        let _ = std::fs::remove_dir_all(&dir);
        let storage = FileStorage::new(&dir).unwrap();

        assert_eq!(storage.load(keys::REFRESH_TOKEN).unwrap(), None);

        storage.store(keys::REFRESH_TOKEN, "ref1").unwrap();
        assert_eq!(
            storage.load(keys::REFRESH_TOKEN).unwrap().as_deref(),
            Some("ref1")
        );

        storage.remove(keys::REFRESH_TOKEN).unwrap();
        storage.remove(keys::REFRESH_TOKEN).unwrap();
        assert_eq!(storage.load(keys::REFRESH_TOKEN).unwrap(), None);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn file_storage_persists_across_instances() {
        let dir = std::env::temp_dir().join(format!(
            "lumera-storage-reopen-{}",
            std::process::id()
        ));
        let _ = std::fs::remove_dir_all(&dir);

        {
            let storage = FileStorage::new(&dir).unwrap();
            storage.store(keys::ACCESS_TOKEN, "tok-persisted").unwrap();
        }

        let reopened = FileStorage::new(&dir).unwrap();
        assert_eq!(
            reopened.load(keys::ACCESS_TOKEN).unwrap().as_deref(),
            Some("tok-persisted")
        );

        let _ = std::fs::remove_dir_all(&dir);
    }
}
