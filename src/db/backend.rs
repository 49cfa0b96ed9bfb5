// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Key-value storage backends.
//!
//! The workout store only needs string values under string keys:
//! - `MemoryBackend` keeps them in process (tests, offline mode)
//! - `FileBackend` keeps them in a single JSON file on disk

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

/// Minimal key-value storage.
pub trait KeyValueBackend: Send + Sync {
    /// Read a value; `Ok(None)` when the key is absent.
    fn get(&self, key: &str) -> Result<Option<String>, BackendError>;

    /// Write a value, replacing any previous one.
    fn set(&self, key: &str, value: &str) -> Result<(), BackendError>;

    /// Erase a key. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<(), BackendError>;
}

/// In-memory backend.
///
/// Clones share the same map, so a test can keep a handle and inspect what
/// the store persisted.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    entries: Arc<RwLock<BTreeMap<String, String>>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a backend pre-seeded with one entry.
    pub fn with_entry(key: &str, value: &str) -> Self {
        let backend = Self::new();
        if let Ok(mut entries) = backend.entries.write() {
            entries.insert(key.to_string(), value.to_string());
        }
        backend
    }
}

impl KeyValueBackend for MemoryBackend {
    fn get(&self, key: &str) -> Result<Option<String>, BackendError> {
        let entries = self.entries.read().map_err(|_| BackendError::Poisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), BackendError> {
        let mut entries = self.entries.write().map_err(|_| BackendError::Poisoned)?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), BackendError> {
        let mut entries = self.entries.write().map_err(|_| BackendError::Poisoned)?;
        entries.remove(key);
        Ok(())
    }
}

/// Backend storing every key in one JSON object on disk.
///
/// Writes go to a sibling temp file that is then renamed over the original.
#[derive(Debug, Clone)]
pub struct FileBackend {
    path: PathBuf,
}

impl FileBackend {
    /// Open (or lazily create) the backing file, creating parent directories.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, BackendError> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| BackendError::Io(e.to_string()))?;
        }
        tracing::info!(path = %path.display(), "Opened workout storage file");
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, BackendError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(BackendError::Io(e.to_string())),
        };

        if raw.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        serde_json::from_str(&raw).map_err(|e| BackendError::Corrupt(e.to_string()))
    }

    fn write_all(&self, entries: &BTreeMap<String, String>) -> Result<(), BackendError> {
        let serialized =
            serde_json::to_string_pretty(entries).map_err(|e| BackendError::Io(e.to_string()))?;

        let tmp_path = self.path.with_extension("tmp");
        fs::write(&tmp_path, serialized).map_err(|e| BackendError::Io(e.to_string()))?;
        fs::rename(&tmp_path, &self.path).map_err(|e| BackendError::Io(e.to_string()))?;
        Ok(())
    }
}

impl KeyValueBackend for FileBackend {
    fn get(&self, key: &str) -> Result<Option<String>, BackendError> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), BackendError> {
        // An unreadable file is replaced.
        let mut entries = self.read_all().unwrap_or_else(|e| {
            tracing::warn!(error = %e, path = %self.path.display(), "Overwriting unreadable storage file");
            BTreeMap::new()
        });
        entries.insert(key.to_string(), value.to_string());
        self.write_all(&entries)
    }

    fn remove(&self, key: &str) -> Result<(), BackendError> {
        let mut entries = self.read_all().unwrap_or_default();
        if entries.remove(key).is_some() || self.path.exists() {
            self.write_all(&entries)?;
        }
        Ok(())
    }
}

/// Errors from storage backends.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("Storage I/O error: {0}")]
    Io(String),

    #[error("Storage file is not valid JSON: {0}")]
    Corrupt(String),

    #[error("Storage lock poisoned")]
    Poisoned,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_backend_clones_share_entries() {
        let backend = MemoryBackend::new();
        let handle = backend.clone();

        backend.set("workouts", "[]").unwrap();
        assert_eq!(handle.get("workouts").unwrap().as_deref(), Some("[]"));

        handle.remove("workouts").unwrap();
        assert_eq!(backend.get("workouts").unwrap(), None);
    }

    #[test]
    fn test_file_backend_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FileBackend::open(dir.path().join("nested/store.json")).unwrap();

        assert_eq!(backend.get("workouts").unwrap(), None);
        backend.set("workouts", "[1,2]").unwrap();

        let reopened = FileBackend::open(backend.path()).unwrap();
        assert_eq!(reopened.get("workouts").unwrap().as_deref(), Some("[1,2]"));

        reopened.remove("workouts").unwrap();
        assert_eq!(backend.get("workouts").unwrap(), None);
    }

    #[test]
    fn test_file_backend_reports_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        fs::write(&path, "not json").unwrap();

        let backend = FileBackend::open(&path).unwrap();
        assert!(matches!(backend.get("workouts"), Err(BackendError::Corrupt(_))));

        // Saving recovers the file.
        backend.set("workouts", "[]").unwrap();
        assert_eq!(backend.get("workouts").unwrap().as_deref(), Some("[]"));
    }
}
