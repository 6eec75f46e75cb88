//! The key-value store abstraction.

use crate::{StorageEvents, StoreError};

/// A string key-value store.
///
/// Values are opaque strings; serialization is the caller's concern. Backends
/// that can observe writes made elsewhere (another connection, another tab)
/// expose them through [`KeyValueStore::watch`].
pub trait KeyValueStore {
    /// Read a value. Returns `None` if the key doesn't exist.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Write a value, replacing any previous one.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Delete a value. Deleting a missing key is not an error.
    fn remove(&self, key: &str) -> Result<(), StoreError>;

    /// Subscribe to changes made by other writers.
    ///
    /// Backends without a change feed return `None`.
    fn watch(&self) -> Option<StorageEvents> {
        None
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        (**self).remove(key)
    }

    fn watch(&self) -> Option<StorageEvents> {
        (**self).watch()
    }
}
