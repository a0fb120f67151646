//! Key-value configuration store
//!
//! The registry owns no ambient singleton; it receives a [`ConfigStore`]
//! at construction. Two implementations ship with the crate: an in-memory
//! store for tests and ephemeral runs, and a single-file JSON store for the
//! CLI. Malformed or missing content always degrades to "absent" rather
//! than failing the caller.

use crate::error::{Error, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Namespace key for the persisted agent configuration set.
pub const AGENT_CONFIGS_KEY: &str = "sharesentry.agent-configs";

/// Namespace key for the persisted transport mode.
pub const TRANSPORT_MODE_KEY: &str = "sharesentry.transport-mode";

/// Minimal key-value store contract for configuration persistence.
pub trait ConfigStore: Send + Sync {
    /// Fetch a value; `Ok(None)` when absent.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write a value, replacing any previous one.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Delete a value; deleting an absent key is not an error.
    fn remove(&self, key: &str) -> Result<()>;
}

/// In-memory store.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ConfigStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| Error::Persistence("store lock poisoned".to_string()))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| Error::Persistence("store lock poisoned".to_string()))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| Error::Persistence("store lock poisoned".to_string()))?;
        entries.remove(key);
        Ok(())
    }
}

/// Single-file JSON store: one object mapping keys to string values.
///
/// The whole file is rewritten on every `set`/`remove`, which makes
/// concurrent updates last-write-wins at record granularity. Unreadable or
/// malformed content is logged and treated as empty.
pub struct FileStore {
    path: PathBuf,
    // Serializes read-modify-write cycles within this process.
    lock: Mutex<()>,
}

impl FileStore {
    /// Create a store backed by `path`, creating parent directories.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        Ok(Self {
            path,
            lock: Mutex::new(()),
        })
    }

    /// Default settings file (`~/.sharesentry/settings.json`).
    pub fn default_path() -> PathBuf {
        dirs_next::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".sharesentry")
            .join("settings.json")
    }

    fn read_all(path: &Path) -> HashMap<String, String> {
        let data = match std::fs::read_to_string(path) {
            Ok(data) => data,
            Err(_) => return HashMap::new(),
        };
        match serde_json::from_str(&data) {
            Ok(map) => map,
            Err(e) => {
                tracing::warn!("Malformed settings file {}: {}", path.display(), e);
                HashMap::new()
            }
        }
    }

    fn write_all(&self, entries: &HashMap<String, String>) -> Result<()> {
        let json = serde_json::to_string_pretty(entries)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }
}

impl ConfigStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let _guard = self
            .lock
            .lock()
            .map_err(|_| Error::Persistence("store lock poisoned".to_string()))?;
        Ok(Self::read_all(&self.path).get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let _guard = self
            .lock
            .lock()
            .map_err(|_| Error::Persistence("store lock poisoned".to_string()))?;
        let mut entries = Self::read_all(&self.path);
        entries.insert(key.to_string(), value.to_string());
        self.write_all(&entries)
    }

    fn remove(&self, key: &str) -> Result<()> {
        let _guard = self
            .lock
            .lock()
            .map_err(|_| Error::Persistence("store lock poisoned".to_string()))?;
        let mut entries = Self::read_all(&self.path);
        entries.remove(key);
        self.write_all(&entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_memory_store_round_trip() {
        let store = MemoryStore::new();
        assert!(store.get("k").unwrap().is_none());
        store.set("k", "v").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
        store.remove("k").unwrap();
        assert!(store.get("k").unwrap().is_none());
    }

    #[test]
    fn test_memory_store_overwrite() {
        let store = MemoryStore::new();
        store.set("k", "first").unwrap();
        store.set("k", "second").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("second"));
    }

    #[test]
    fn test_file_store_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        let store = FileStore::new(&path).unwrap();

        store.set("a", "1").unwrap();
        store.set("b", "2").unwrap();
        assert_eq!(store.get("a").unwrap().as_deref(), Some("1"));

        // A fresh store over the same file sees both entries.
        let reopened = FileStore::new(&path).unwrap();
        assert_eq!(reopened.get("a").unwrap().as_deref(), Some("1"));
        assert_eq!(reopened.get("b").unwrap().as_deref(), Some("2"));
    }

    #[test]
    fn test_file_store_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path().join("nope.json")).unwrap();
        assert!(store.get("anything").unwrap().is_none());
    }

    #[test]
    fn test_file_store_malformed_file_degrades_to_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "not json {{{").unwrap();

        let store = FileStore::new(&path).unwrap();
        assert!(store.get("k").unwrap().is_none());

        // Writing recovers the file.
        store.set("k", "v").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
    }

    #[test]
    fn test_file_store_remove_absent_key_ok() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path().join("settings.json")).unwrap();
        store.remove("ghost").unwrap();
    }
}
