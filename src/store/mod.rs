//! Config Store
//!
//! The destination of a merge. The store is owned by the host application; this
//! crate only ever reads from it and performs conditional writes. Nothing here
//! deletes or overwrites an existing key.

pub mod memory;

pub use memory::MemoryStore;

use crate::model::PropertyValue;
use std::sync::Arc;

/// Key-value destination for merged properties.
///
/// `set_if_absent` must be a single atomic check-and-set: two callers racing on
/// the same absent key must see exactly one `true`.
pub trait ConfigStore: Send + Sync {
    fn get(&self, key: &str) -> Option<PropertyValue>;

    fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Write `value` under `key` unless the key is already present.
    /// Returns whether the write happened.
    fn set_if_absent(&self, key: &str, value: PropertyValue) -> bool;

    /// Conditionally write a batch, reporting per key whether it was written.
    ///
    /// Stores that can hold one lock across the batch should override this so a
    /// merge pass is not interleaved with another.
    fn set_all_if_absent(&self, entries: Vec<(String, PropertyValue)>) -> Vec<(String, bool)> {
        entries
            .into_iter()
            .map(|(key, value)| {
                let written = self.set_if_absent(&key, value);
                (key, written)
            })
            .collect()
    }
}

impl<S: ConfigStore + ?Sized> ConfigStore for Arc<S> {
    fn get(&self, key: &str) -> Option<PropertyValue> {
        (**self).get(key)
    }

    fn contains_key(&self, key: &str) -> bool {
        (**self).contains_key(key)
    }

    fn set_if_absent(&self, key: &str, value: PropertyValue) -> bool {
        (**self).set_if_absent(key, value)
    }

    fn set_all_if_absent(&self, entries: Vec<(String, PropertyValue)>) -> Vec<(String, bool)> {
        (**self).set_all_if_absent(entries)
    }
}
