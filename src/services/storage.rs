// Storage Service
// String key-value persistence backing favorites, theme and form fields

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::RwLock;

pub const STORAGE_FILE: &str = "storage.json";

/// Minimal key-value store. Implementations synchronize internally.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, String>;
    fn set(&self, key: &str, value: &str) -> Result<(), String>;
    fn remove(&self, key: &str) -> Result<(), String>;
}

/// JSON-file store, read once and rewritten in full on every change
pub struct FileStore {
    path: PathBuf,
    cache: RwLock<Option<BTreeMap<String, String>>>,
}

impl FileStore {
    pub fn new(data_dir: PathBuf) -> Self {
        Self {
            path: data_dir.join(STORAGE_FILE),
            cache: RwLock::new(None),
        }
    }

    fn read_disk(&self) -> Result<BTreeMap<String, String>, String> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }

        let content = std::fs::read_to_string(&self.path)
            .map_err(|e| format!("Failed to read storage: {e}"))?;

        match serde_json::from_str(&content) {
            Ok(entries) => Ok(entries),
            Err(e) => {
                log::warn!("Ignoring unreadable storage file {:?}: {e}", self.path);
                Ok(BTreeMap::new())
            }
        }
    }

    fn write_disk(&self, entries: &BTreeMap<String, String>) -> Result<(), String> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create storage directory: {e}"))?;
        }

        let content = serde_json::to_string_pretty(entries)
            .map_err(|e| format!("Failed to serialize storage: {e}"))?;

        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, content).map_err(|e| format!("Failed to write storage: {e}"))?;
        std::fs::rename(&tmp, &self.path).map_err(|e| format!("Failed to replace storage: {e}"))
    }

    fn update<F>(&self, change: F) -> Result<(), String>
    where
        F: FnOnce(&mut BTreeMap<String, String>) -> bool,
    {
        let mut cache = self
            .cache
            .write()
            .map_err(|_| "Storage lock poisoned".to_string())?;

        let mut entries = match cache.as_ref() {
            Some(entries) => entries.clone(),
            None => self.read_disk()?,
        };

        // The cache only takes the change once it is on disk
        if change(&mut entries) {
            self.write_disk(&entries)?;
        }
        *cache = Some(entries);
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, String> {
        if let Ok(cache) = self.cache.read() {
            if let Some(ref entries) = *cache {
                return Ok(entries.get(key).cloned());
            }
        }

        let entries = self.read_disk()?;
        let value = entries.get(key).cloned();
        if let Ok(mut cache) = self.cache.write() {
            if cache.is_none() {
                *cache = Some(entries);
            }
        }
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), String> {
        self.update(|entries| {
            let previous = entries.insert(key.to_string(), value.to_string());
            previous.as_deref() != Some(value)
        })
    }

    fn remove(&self, key: &str) -> Result<(), String> {
        self.update(|entries| entries.remove(key).is_some())
    }
}

/// Volatile store for tests and ephemeral sessions
#[derive(Default)]
pub struct MemoryStore {
    entries: RwLock<BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, String> {
        let entries = self
            .entries
            .read()
            .map_err(|_| "Storage lock poisoned".to_string())?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), String> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| "Storage lock poisoned".to_string())?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), String> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| "Storage lock poisoned".to_string())?;
        entries.remove(key);
        Ok(())
    }
}
