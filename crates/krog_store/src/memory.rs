//! In-memory document store for testing.

use crate::error::StoreResult;
use crate::store::{validate_key, DocumentStore};
use parking_lot::RwLock;
use std::collections::BTreeMap;

/// An in-memory document store.
///
/// This store keeps all documents in memory and is suitable for:
/// - Unit tests
/// - Integration tests
/// - Ephemeral deployments that don't need persistence
///
/// # Thread Safety
///
/// This store is thread-safe and can be shared across threads via `Arc`.
///
/// # Example
///
/// ```rust
/// use krog_store::{DocumentStore, MemoryStore};
///
/// let store = MemoryStore::new();
/// store.put("events", "abc123", b"{\"title\":\"DJ night\"}").unwrap();
/// assert_eq!(store.scan("events").unwrap().len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<BTreeMap<String, BTreeMap<String, Vec<u8>>>>,
}

impl MemoryStore {
    /// Creates a new empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl DocumentStore for MemoryStore {
    fn get(&self, collection: &str, key: &str) -> StoreResult<Option<Vec<u8>>> {
        validate_key(key)?;
        Ok(self
            .collections
            .read()
            .get(collection)
            .and_then(|docs| docs.get(key))
            .cloned())
    }

    fn put(&self, collection: &str, key: &str, data: &[u8]) -> StoreResult<()> {
        validate_key(key)?;
        self.collections
            .write()
            .entry(collection.to_string())
            .or_default()
            .insert(key.to_string(), data.to_vec());
        Ok(())
    }

    fn delete(&self, collection: &str, key: &str) -> StoreResult<Option<Vec<u8>>> {
        validate_key(key)?;
        Ok(self
            .collections
            .write()
            .get_mut(collection)
            .and_then(|docs| docs.remove(key)))
    }

    fn scan(&self, collection: &str) -> StoreResult<Vec<(String, Vec<u8>)>> {
        Ok(self
            .collections
            .read()
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .map(|(key, data)| (key.clone(), data.clone()))
                    .collect()
            })
            .unwrap_or_default())
    }

    fn clear(&self, collection: &str) -> StoreResult<usize> {
        Ok(self
            .collections
            .write()
            .get_mut(collection)
            .map(|docs| {
                let removed = docs.len();
                docs.clear();
                removed
            })
            .unwrap_or(0))
    }
}
