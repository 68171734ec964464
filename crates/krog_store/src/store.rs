//! Document store trait definition.

use crate::error::{StoreError, StoreResult};

/// A whole-document store for the krog backend.
///
/// Documents are **opaque byte blobs** addressed by a `(collection, key)`
/// pair. Stores do not interpret document contents - encoding and decoding
/// live in the typed [`crate::Collection`] layer.
///
/// # Invariants
///
/// - `put` replaces the whole document; there is no partial update
/// - `get` returns exactly the bytes of the last successful `put`
/// - `scan` returns documents in lexicographic key order
/// - Keys must be non-empty and free of path separators
/// - Stores must be `Send + Sync` so one instance can back every service
///
/// # Implementors
///
/// - [`crate::MemoryStore`] - for testing
/// - [`crate::FileStore`] - for persistent storage
pub trait DocumentStore: Send + Sync {
    /// Fetches a document by key.
    ///
    /// Returns `None` if the document does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is invalid or the read fails.
    fn get(&self, collection: &str, key: &str) -> StoreResult<Option<Vec<u8>>>;

    /// Saves a document, replacing any previous version.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is invalid or the write fails.
    fn put(&self, collection: &str, key: &str, data: &[u8]) -> StoreResult<()>;

    /// Deletes a document by key.
    ///
    /// Returns the removed bytes, or `None` if the document did not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is invalid or the removal fails.
    fn delete(&self, collection: &str, key: &str) -> StoreResult<Option<Vec<u8>>>;

    /// Returns every document in a collection as `(key, bytes)` pairs.
    ///
    /// Keys are returned in lexicographic order. An unknown collection is
    /// an empty result, not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the scan fails.
    fn scan(&self, collection: &str) -> StoreResult<Vec<(String, Vec<u8>)>>;

    /// Removes every document in a collection.
    ///
    /// Returns the number of documents removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the removal fails.
    fn clear(&self, collection: &str) -> StoreResult<usize>;
}

/// Checks that a key is usable as a document address.
///
/// Keys double as file names in [`crate::FileStore`], so they must be
/// non-empty and free of path separators.
pub(crate) fn validate_key(key: &str) -> StoreResult<()> {
    if key.is_empty() || key.contains('/') || key.contains('\\') || key.contains("..") {
        return Err(StoreError::InvalidKey {
            key: key.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_keys_pass() {
        assert!(validate_key("red-wines").is_ok());
        assert!(validate_key("wine-1724680000000").is_ok());
        assert!(validate_key("menu-wine").is_ok());
    }

    #[test]
    fn invalid_keys_fail() {
        assert!(matches!(
            validate_key(""),
            Err(StoreError::InvalidKey { .. })
        ));
        assert!(validate_key("a/b").is_err());
        assert!(validate_key("a\\b").is_err());
        assert!(validate_key("..").is_err());
    }
}
