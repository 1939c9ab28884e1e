// ABOUTME: Storage backend capability for persisting cards and layout as string blobs.
// ABOUTME: Provides the KeyValueStore trait plus in-memory and no-op backends.

use std::collections::HashMap;

use thiserror::Error;

/// Key under which the JSON array of cards is stored.
pub const CARDS_KEY: &str = "drag-drop-cards";

/// Key under which the JSON array of layout items is stored.
pub const LAYOUT_KEY: &str = "drag-drop-layout";

/// Errors a storage backend can report.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("backend error: {0}")]
    Backend(String),

    #[error("invalid storage key: {0}")]
    InvalidKey(String),

    #[error("storage quota of {limit} bytes exceeded writing {key}")]
    QuotaExceeded { key: String, limit: usize },
}

/// A string key-value store the card store persists into.
///
/// Implementations decide where data lives. A backend that reports
/// `is_persistent() == false` is never read during hydration.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    fn is_persistent(&self) -> bool {
        true
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn is_persistent(&self) -> bool {
        (**self).is_persistent()
    }
}

/// A HashMap-backed store. Optionally enforces a byte quota across all
/// entries, which makes full-storage write failures reproducible.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
    quota: Option<usize>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-load a raw entry, bypassing any quota.
    pub fn with_entry(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.entries.insert(key.into(), value.into());
        self
    }

    /// Limit the total size of keys plus values, in bytes.
    pub fn with_quota(mut self, limit: usize) -> Self {
        self.quota = Some(limit);
        self
    }

    pub fn entry(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn used_bytes_without(&self, key: &str) -> usize {
        self.entries
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(k, v)| k.len() + v.len())
            .sum()
    }
}

impl KeyValueStore for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        if let Some(limit) = self.quota
            && self.used_bytes_without(key) + key.len() + value.len() > limit
        {
            return Err(StorageError::QuotaExceeded {
                key: key.to_string(),
                limit,
            });
        }
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Backend for contexts with no persistent store: reads find nothing and
/// writes are accepted and dropped.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopStorage;

impl KeyValueStore for NoopStorage {
    fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Ok(None)
    }

    fn set(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Ok(())
    }

    fn is_persistent(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_storage_set_get() {
        let mut storage = MemoryStorage::new();
        assert!(storage.get("k").unwrap().is_none());

        storage.set("k", "v1").unwrap();
        storage.set("k", "v2").unwrap();
        assert_eq!(storage.get("k").unwrap().as_deref(), Some("v2"));
        assert_eq!(storage.len(), 1);
        assert!(!storage.is_empty());
    }

    #[test]
    fn memory_storage_quota_rejects_oversized_write() {
        let mut storage = MemoryStorage::new().with_quota(10);
        storage.set("a", "12345").unwrap();

        let err = storage.set("b", "123456").unwrap_err();
        assert!(matches!(err, StorageError::QuotaExceeded { limit: 10, .. }));
        assert!(storage.entry("b").is_none());

        // Overwriting an existing key only counts the new value
        storage.set("a", "123456789").unwrap();
        assert_eq!(storage.entry("a"), Some("123456789"));
    }

    #[test]
    fn noop_storage_discards_writes() {
        let mut storage = NoopStorage;
        storage.set(CARDS_KEY, "[]").unwrap();

        assert!(storage.get(CARDS_KEY).unwrap().is_none());
        assert!(!storage.is_persistent());
    }

    #[test]
    fn boxed_backend_delegates() {
        let mut storage: Box<dyn KeyValueStore> = Box::new(MemoryStorage::new());
        storage.set(LAYOUT_KEY, "[]").unwrap();

        assert_eq!(storage.get(LAYOUT_KEY).unwrap().as_deref(), Some("[]"));
        assert!(storage.is_persistent());
    }
}
