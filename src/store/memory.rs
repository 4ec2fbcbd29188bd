//! In-memory config store backed by a `parking_lot::RwLock`.

use super::ConfigStore;
use crate::model::PropertyValue;
use parking_lot::RwLock;
use std::collections::BTreeMap;

/// Thread-safe in-memory store.
///
/// Reads take the shared lock; every conditional write and every batch takes the
/// exclusive lock, so a merge pass is applied as one unit.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<BTreeMap<String, PropertyValue>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store pre-populated with higher-priority values (local files,
    /// environment, flags). These keys will never be replaced by a merge.
    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<PropertyValue>,
    {
        let entries = entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            entries: RwLock::new(entries),
        }
    }

    /// Unconditional write for the owning application.
    pub fn set(&self, key: impl Into<String>, value: impl Into<PropertyValue>) {
        self.entries.write().insert(key.into(), value.into());
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Copy of the current contents, sorted by key.
    pub fn snapshot(&self) -> BTreeMap<String, PropertyValue> {
        self.entries.read().clone()
    }
}

impl ConfigStore for MemoryStore {
    fn get(&self, key: &str) -> Option<PropertyValue> {
        self.entries.read().get(key).cloned()
    }

    fn contains_key(&self, key: &str) -> bool {
        self.entries.read().contains_key(key)
    }

    fn set_if_absent(&self, key: &str, value: PropertyValue) -> bool {
        let mut entries = self.entries.write();
        if entries.contains_key(key) {
            return false;
        }
        entries.insert(key.to_string(), value);
        true
    }

    fn set_all_if_absent(&self, batch: Vec<(String, PropertyValue)>) -> Vec<(String, bool)> {
        let mut entries = self.entries.write();
        batch
            .into_iter()
            .map(|(key, value)| {
                if entries.contains_key(&key) {
                    (key, false)
                } else {
                    entries.insert(key.clone(), value);
                    (key, true)
                }
            })
            .collect()
    }
}
