//! Settings Store
//!
//! String-keyed blob storage backing the settings profiles.

use anyhow::Context;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use log::{info, warn};
use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use crate::error::{Result, SettingsError};

/// Durable key-value store for settings blobs
pub trait SettingsStore: Send + Sync {
    /// Read the value stored under `key`
    fn get(&self, key: &str) -> Option<Vec<u8>>;

    /// Replace the value stored under `key`
    fn set(&self, key: &str, value: &[u8]) -> Result<()>;

    /// Delete `key`; missing keys are not an error
    fn remove(&self, key: &str) -> Result<()>;

    /// All keys currently stored
    fn keys(&self) -> Vec<String>;
}

/// Read a JSON-encoded scalar, treating undecodable data as absent
pub fn read_value<T: DeserializeOwned>(store: &dyn SettingsStore, key: &str) -> Option<T> {
    let data = store.get(key)?;
    serde_json::from_slice(&data).ok()
}

/// Write a JSON-encoded scalar
pub fn write_value<T: Serialize>(store: &dyn SettingsStore, key: &str, value: &T) -> Result<()> {
    let data = serde_json::to_vec(value).map_err(SettingsError::EncodeError)?;
    store.set(key, &data)
}

/// In-process store, used for tests and ephemeral sessions
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SettingsStore for MemoryStore {
    fn get(&self, key: &str) -> Option<Vec<u8>> {
        self.entries.lock().get(key).cloned()
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        self.entries.lock().insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.entries.lock().remove(key);
        Ok(())
    }

    fn keys(&self) -> Vec<String> {
        self.entries.lock().keys().cloned().collect()
    }
}

/// Store persisted as a single JSON file of base64 blobs.
///
/// Every write rewrites the whole file.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: Mutex<HashMap<String, Vec<u8>>>,
}

impl FileStore {
    /// Default store location inside the application data directory
    pub fn default_path() -> PathBuf {
        crate::utils::get_app_data_dir().join("preferences.json")
    }

    /// Open the store at the default location
    pub fn open_default() -> anyhow::Result<Self> {
        Self::open(Self::default_path())
    }

    /// Open a store file, starting empty if it does not exist yet
    pub fn open(path: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let path = path.into();
        let entries = if path.exists() {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read {:?}", path))?;
            Self::decode(&path, &content)
        } else {
            HashMap::new()
        };

        info!("Opened settings store {:?} ({} keys)", path, entries.len());
        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn decode(path: &Path, content: &str) -> HashMap<String, Vec<u8>> {
        let raw: BTreeMap<String, String> = match serde_json::from_str(content) {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Discarding unreadable settings store {:?}: {}", path, e);
                return HashMap::new();
            }
        };

        raw.into_iter()
            .filter_map(|(key, encoded)| match STANDARD.decode(encoded.as_bytes()) {
                Ok(value) => Some((key, value)),
                Err(e) => {
                    warn!("Skipping undecodable entry {}: {}", key, e);
                    None
                }
            })
            .collect()
    }

    fn flush(&self, entries: &HashMap<String, Vec<u8>>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(SettingsError::CreateDirError)?;
            }
        }

        // Sorted keys keep the file diff-friendly
        let raw: BTreeMap<&str, String> = entries
            .iter()
            .map(|(key, value)| (key.as_str(), STANDARD.encode(value)))
            .collect();
        let content = serde_json::to_string_pretty(&raw).map_err(SettingsError::EncodeError)?;
        std::fs::write(&self.path, content).map_err(SettingsError::WriteError)
    }
}

impl SettingsStore for FileStore {
    fn get(&self, key: &str) -> Option<Vec<u8>> {
        self.entries.lock().get(key).cloned()
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        let mut entries = self.entries.lock();
        // The cache only changes once the file holds the new state
        let mut updated = entries.clone();
        updated.insert(key.to_string(), value.to_vec());
        self.flush(&updated)?;
        *entries = updated;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut entries = self.entries.lock();
        if !entries.contains_key(key) {
            return Ok(());
        }
        let mut updated = entries.clone();
        updated.remove(key);
        self.flush(&updated)?;
        *entries = updated;
        Ok(())
    }

    fn keys(&self) -> Vec<String> {
        self.entries.lock().keys().cloned().collect()
    }
}
