use std::collections::BTreeMap;
use std::sync::RwLock;

use crate::error::{StoreError, StoreResult};
use crate::traits::{check_key, select_prefix, KeyValueStore};

/// In-memory, BTreeMap-based key-value store.
///
/// Intended for tests and embedding. Values live behind a `RwLock` for safe
/// concurrent access and are cloned on read.
pub struct InMemoryKeyValueStore {
    values: RwLock<BTreeMap<String, String>>,
}

impl InMemoryKeyValueStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            values: RwLock::new(BTreeMap::new()),
        }
    }

    /// Create a store pre-populated with `values`.
    pub fn with_values(values: BTreeMap<String, String>) -> Self {
        Self {
            values: RwLock::new(values),
        }
    }

    /// Number of keys currently stored.
    pub fn len(&self) -> usize {
        self.values.read().expect("lock poisoned").len()
    }

    /// Returns `true` if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.values.read().expect("lock poisoned").is_empty()
    }
}

impl Default for InMemoryKeyValueStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyValueStore for InMemoryKeyValueStore {
    fn get_value(&self, key: &str) -> StoreResult<String> {
        let map = self.values.read().expect("lock poisoned");
        map.get(key)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(key.to_string()))
    }

    fn get_value_tree(&self, prefix: &str) -> StoreResult<BTreeMap<String, String>> {
        let map = self.values.read().expect("lock poisoned");
        Ok(select_prefix(&map, prefix))
    }

    fn set_value(&self, key: &str, value: &str) -> StoreResult<()> {
        check_key(key)?;
        let mut map = self.values.write().expect("lock poisoned");
        map.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
