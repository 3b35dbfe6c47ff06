//! Durable key/value storage for client state.
//!
//! `FileStorage` keeps every key in one JSON object on disk and rewrites the
//! whole file on each change through a temp-file rename, so a reader never
//! observes a half-written store.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage io failed for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("storage encode failed: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("storage lock poisoned")]
    Poisoned,
}

/// String key/value store that survives process restarts.
pub trait Storage: Send + Sync {
    /// Read a key. Missing keys and unreadable stores both yield `None`.
    fn get(&self, key: &str) -> Option<String>;

    /// Read several keys from one view of the store.
    fn get_many(&self, keys: &[&str]) -> Vec<Option<String>> {
        keys.iter().map(|key| self.get(key)).collect()
    }

    /// Apply every write in `set` and every removal in `remove` as one
    /// change: afterwards either all of them are visible or none is.
    ///
    /// # Errors
    ///
    /// Returns an error if the change cannot be written durably. The store
    /// is then left as it was.
    fn replace(&self, set: &[(&str, &str)], remove: &[&str]) -> Result<(), StorageError>;

    /// # Errors
    ///
    /// Returns an error if the value cannot be written durably.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.replace(&[(key, value)], &[])
    }

    /// # Errors
    ///
    /// Returns an error if the removal cannot be written durably.
    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.replace(&[], &[key])
    }
}

fn apply_change(entries: &mut BTreeMap<String, String>, set: &[(&str, &str)], remove: &[&str]) {
    for key in remove {
        entries.remove(*key);
    }
    for (key, value) in set {
        entries.insert((*key).to_owned(), (*value).to_owned());
    }
}

// =============================================================================
// MEMORY
// =============================================================================

/// Process-local storage, used by tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed storage with existing entries.
    #[must_use]
    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let map = entries.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
        Self { entries: Mutex::new(map) }
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().ok()?.get(key).cloned()
    }

    fn get_many(&self, keys: &[&str]) -> Vec<Option<String>> {
        match self.entries.lock() {
            Ok(entries) => keys.iter().map(|key| entries.get(*key).cloned()).collect(),
            Err(_) => vec![None; keys.len()],
        }
    }

    fn replace(&self, set: &[(&str, &str)], remove: &[&str]) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().map_err(|_| StorageError::Poisoned)?;
        apply_change(&mut entries, set, remove);
        Ok(())
    }
}

// =============================================================================
// FILE
// =============================================================================

/// JSON-file-backed storage.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileStorage {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), write_lock: Mutex::new(()) }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> BTreeMap<String, String> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return BTreeMap::new(),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "storage file unreadable; treating as empty");
                return BTreeMap::new();
            }
        };
        match serde_json::from_str(&raw) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "storage file corrupt; treating as empty");
                BTreeMap::new()
            }
        }
    }

    fn write_entries(&self, entries: &BTreeMap<String, String>) -> Result<(), StorageError> {
        let io_err = |source: std::io::Error| StorageError::Io { path: self.path.clone(), source };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        let encoded = serde_json::to_vec_pretty(entries)?;
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, encoded).map_err(io_err)?;
        std::fs::rename(&tmp, &self.path).map_err(io_err)
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.read_entries().remove(key)
    }

    fn get_many(&self, keys: &[&str]) -> Vec<Option<String>> {
        let mut entries = self.read_entries();
        keys.iter().map(|key| entries.remove(*key)).collect()
    }

    fn replace(&self, set: &[(&str, &str)], remove: &[&str]) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock().map_err(|_| StorageError::Poisoned)?;
        let mut entries = self.read_entries();
        apply_change(&mut entries, set, remove);
        self.write_entries(&entries)
    }
}
