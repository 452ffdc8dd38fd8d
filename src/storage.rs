//! Local key-value persistence.
//!
//! Widgets keep small pieces of state between runs: a remembered API key,
//! per-day API responses and rate-limit markers. Everything is stored as
//! strings under flat keys; structured values are JSON.

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Failed to determine data directory")]
    DataDirNotFound,
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Storage encoding error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Flat string key-value store.
pub trait KeyValueStore: Send {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&mut self, key: &str, value: String) -> Result<(), StorageError>;

    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

/// Volatile store, used in tests and when the data directory is unavailable.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Store backed by a single JSON object on disk, rewritten on every mutation.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl JsonFileStore {
    /// Default location: `<data_dir>/folio/storage.json`.
    pub fn default_path() -> Result<PathBuf, StorageError> {
        let dir = dirs::data_dir().ok_or(StorageError::DataDirNotFound)?;
        Ok(dir.join("folio").join("storage.json"))
    }

    /// Opens the store at `path`. A missing file is an empty store.
    ///
    /// A corrupt file is logged and treated as empty; it is overwritten on the next write.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path = path.as_ref().to_path_buf();
        let entries = match fs::read_to_string(&path) {
            Ok(text) => serde_json::from_str(&text).unwrap_or_else(|e| {
                log::warn!("ignoring unreadable store {}: {}", path.display(), e);
                BTreeMap::new()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };
        Ok(Self { path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(&self.entries)?)?;
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value);
        self.flush()
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        if self.entries.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }
}

/// Value stored under the rate-limit key once a daily quota is exhausted.
const RATE_LIMIT_HIT: &str = "hit";

/// Per-day cache slot for one widget.
///
/// Entries live under `"{prefix}-{YYYY-MM-DD}"` and the rate-limit marker under
/// `"{prefix}-rate-{YYYY-MM-DD}"`, so yesterday's data is simply never looked up again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyCache {
    prefix: String,
    date: NaiveDate,
}

impl DailyCache {
    pub fn new(prefix: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            prefix: prefix.into(),
            date,
        }
    }

    /// Cache slot for the current UTC calendar date.
    pub fn today(prefix: impl Into<String>) -> Self {
        Self::new(prefix, chrono::Utc::now().date_naive())
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn entry_key(&self) -> String {
        format!("{}-{}", self.prefix, self.date.format("%Y-%m-%d"))
    }

    pub fn rate_key(&self) -> String {
        format!("{}-rate-{}", self.prefix, self.date.format("%Y-%m-%d"))
    }

    /// Reads today's cached value. Undecodable entries count as a miss.
    pub fn get_json<T: DeserializeOwned>(&self, store: &dyn KeyValueStore) -> Option<T> {
        let raw = store.get(&self.entry_key())?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                log::warn!("discarding cached {}: {}", self.entry_key(), e);
                None
            }
        }
    }

    pub fn put_json<T: Serialize>(&self, store: &mut dyn KeyValueStore, value: &T) -> Result<(), StorageError> {
        store.set(&self.entry_key(), serde_json::to_string(value)?)
    }

    pub fn is_rate_limited(&self, store: &dyn KeyValueStore) -> bool {
        store.get(&self.rate_key()).as_deref() == Some(RATE_LIMIT_HIT)
    }

    pub fn mark_rate_limited(&self, store: &mut dyn KeyValueStore) -> Result<(), StorageError> {
        store.set(&self.rate_key(), RATE_LIMIT_HIT.to_string())
    }
}
