//! In-memory key-value store.

use std::collections::HashMap;
use std::sync::RwLock;

use serde_json::Value;

use super::{KeyValueStore, StoreError};

/// Key-value store that lives only as long as the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    data: RwLock<HashMap<String, Value>>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.read().map(|data| data.len()).unwrap_or(0)
    }

    /// Returns true if nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        let data = self.data.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(data.get(key).cloned())
    }

    fn set(&self, key: &str, value: Value) -> Result<(), StoreError> {
        let mut data = self.data.write().map_err(|_| StoreError::LockPoisoned)?;
        data.insert(key.to_string(), value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_get_missing_key() {
        let store = MemoryStore::new();
        assert_eq!(store.get("tasks").unwrap(), None);
        assert!(store.is_empty());
    }

    #[test]
    fn test_set_then_get() {
        let store = MemoryStore::new();
        store.set("userName", json!("Aiko")).unwrap();

        assert_eq!(store.get("userName").unwrap(), Some(json!("Aiko")));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_set_overwrites() {
        let store = MemoryStore::new();
        store.set("focus", json!("draft")).unwrap();
        store.set("focus", json!("ship it")).unwrap();

        assert_eq!(store.get("focus").unwrap(), Some(json!("ship it")));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_usable_through_reference() {
        fn write<S: KeyValueStore>(store: S) {
            store.set("k", json!(1)).unwrap();
        }

        let store = MemoryStore::new();
        write(&store);
        assert_eq!(store.get("k").unwrap(), Some(json!(1)));
    }
}
