//! Key-value persistence.
//!
//! History and settings live behind a minimal get/set interface keyed by name.
//! [`FileStore`] keeps one JSON file per key in a data directory;
//! [`MemoryStore`] keeps values in memory for tests and dry runs.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;

/// Errors that can occur when reading or writing the store.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to access '{path}': {source}")]
    IoError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid JSON in '{key}': {source}")]
    JsonError {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// A named-value store. A successful return is the completion signal.
pub trait KeyValueStore {
    /// Reads the value stored under `key`, or `None` if nothing was stored.
    fn get(&self, key: &str) -> Result<Option<Value>, StoreError>;

    /// Replaces the value stored under `key`.
    fn set(&mut self, key: &str, value: Value) -> Result<(), StoreError>;
}

/// In-memory store.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    values: HashMap<String, Value>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: Value) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value);
        Ok(())
    }
}

/// Store backed by a directory holding one `<key>.json` file per key.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Creates a store rooted at `dir`. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileStore { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }

    /// Fails when the store path exists but is not a directory.
    fn check_dir(&self) -> Result<(), StoreError> {
        if self.dir.exists() && !self.dir.is_dir() {
            return Err(StoreError::Unavailable(format!(
                "'{}' is not a directory",
                self.dir.display()
            )));
        }
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        self.check_dir()?;
        let path = self.path_for(key);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(StoreError::IoError { path, source }),
        };

        // An empty file is treated like a missing one
        if content.trim().is_empty() {
            return Ok(None);
        }

        let value = serde_json::from_str(&content).map_err(|source| StoreError::JsonError {
            key: key.to_string(),
            source,
        })?;
        Ok(Some(value))
    }

    fn set(&mut self, key: &str, value: Value) -> Result<(), StoreError> {
        self.check_dir()?;
        fs::create_dir_all(&self.dir).map_err(|source| StoreError::IoError {
            path: self.dir.clone(),
            source,
        })?;

        let path = self.path_for(key);
        let content = serde_json::to_string_pretty(&value).map_err(|source| {
            StoreError::JsonError {
                key: key.to_string(),
                source,
            }
        })?;
        fs::write(&path, content).map_err(|source| StoreError::IoError { path, source })?;
        tracing::debug!(key, dir = %self.dir.display(), "stored value");
        Ok(())
    }
}
