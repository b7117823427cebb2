//! JSON file backed key-value store.
//!
//! The whole store is one JSON object. It is read once at open and rewritten
//! on every `set`.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use serde_json::{Map, Value};

use super::{KeyValueStore, StoreError};

/// Default store path, relative to the home directory
pub const DEFAULT_STORE_PATH: &str = ".focusboard/store.json";

/// Resolves the default store path under the user's home directory.
///
/// Returns `None` if the home directory cannot be determined.
pub fn default_store_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(DEFAULT_STORE_PATH))
}

/// Key-value store persisted as a single JSON object file.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    data: RwLock<Map<String, Value>>,
}

impl JsonFileStore {
    /// Opens the store at `path`.
    ///
    /// A missing file is treated as an empty store; nothing is written until
    /// the first `set`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();

        let data = if path.exists() {
            let contents = fs::read_to_string(&path).map_err(|source| StoreError::Io {
                path: path.clone(),
                source,
            })?;
            if contents.trim().is_empty() {
                Map::new()
            } else {
                match serde_json::from_str::<Value>(&contents)? {
                    Value::Object(map) => map,
                    _ => return Err(StoreError::NotAnObject(path)),
                }
            }
        } else {
            Map::new()
        };

        tracing::debug!(path = ?path, keys = data.len(), "Opened store");

        Ok(Self {
            path,
            data: RwLock::new(data),
        })
    }

    /// Returns the backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, data: &Map<String, Value>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|source| StoreError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let json = serde_json::to_string_pretty(data)?;
        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, json).map_err(|source| StoreError::Io {
            path: tmp_path.clone(),
            source,
        })?;
        fs::rename(&tmp_path, &self.path).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })?;

        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        let data = self.data.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(data.get(key).cloned())
    }

    fn set(&self, key: &str, value: Value) -> Result<(), StoreError> {
        let mut data = self.data.write().map_err(|_| StoreError::LockPoisoned)?;
        let previous = data.insert(key.to_string(), value);

        if let Err(e) = self.persist(&data) {
            // Keep memory in sync with disk
            match previous {
                Some(old) => data.insert(key.to_string(), old),
                None => data.remove(key),
            };
            return Err(e);
        }

        Ok(())
    }
}
