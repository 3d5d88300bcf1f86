//! Generic load/save lifecycle for one slice of persisted state.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, error};

use super::storage::{KeyValueStore, StorageError};
use super::StorageKey;

/// An in-memory value mirrored to a single storage key.
///
/// On open the stored value is loaded; a missing or unreadable value falls
/// back to a default. Every change is written back immediately. A value that
/// serializes to JSON `null` (an empty `Option`) removes the key instead of
/// being written.
///
/// Storage failures are logged and swallowed: the in-memory value stays
/// authoritative for the rest of the session.
pub struct PersistentStore<T> {
    key: StorageKey,
    backend: Arc<dyn KeyValueStore>,
    value: T,
}

impl<T> PersistentStore<T>
where
    T: Serialize + DeserializeOwned,
{
    /// Loads `key`, falling back to `default()` when it is absent or invalid.
    pub fn open(
        backend: Arc<dyn KeyValueStore>,
        key: StorageKey,
        default: impl FnOnce() -> T,
    ) -> Self {
        let value = match Self::read(backend.as_ref(), key) {
            Ok(Some(value)) => value,
            Ok(None) => {
                debug!(key = %key, "no stored value, using default");
                default()
            }
            Err(e) => {
                error!(key = %key, error = %e, "error reading stored value, using default");
                default()
            }
        };

        Self {
            key,
            backend,
            value,
        }
    }

    fn read(backend: &dyn KeyValueStore, key: StorageKey) -> Result<Option<T>, StorageError> {
        match backend.get(key)? {
            Some(raw) => serde_json::from_str(&raw)
                .map(Some)
                .map_err(|e| StorageError::Serialization(key, e)),
            None => Ok(None),
        }
    }

    pub fn key(&self) -> StorageKey {
        self.key
    }

    pub fn get(&self) -> &T {
        &self.value
    }

    /// Replaces the value and persists it.
    pub fn set(&mut self, value: T) {
        self.value = value;
        self.persist();
    }

    /// Mutates the value in place and persists the result.
    pub fn update<R>(&mut self, f: impl FnOnce(&mut T) -> R) -> R {
        let result = f(&mut self.value);
        self.persist();
        result
    }

    fn persist(&self) {
        if let Err(e) = self.try_persist() {
            error!(key = %self.key, error = %e, "error saving value");
        }
    }

    fn try_persist(&self) -> Result<(), StorageError> {
        let json = serde_json::to_value(&self.value)
            .map_err(|e| StorageError::Serialization(self.key, e))?;

        if json.is_null() {
            self.backend.remove(self.key)
        } else {
            self.backend.set(self.key, &json.to_string())
        }
    }
}

impl<T> PersistentStore<Option<T>>
where
    T: Serialize + DeserializeOwned,
{
    /// Opens a store whose default is "nothing stored".
    pub fn open_optional(backend: Arc<dyn KeyValueStore>, key: StorageKey) -> Self {
        Self::open(backend, key, || None)
    }

    /// Drops the value and removes its key.
    pub fn clear(&mut self) {
        self.set(None);
    }
}
