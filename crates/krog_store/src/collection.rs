//! Typed collection layer.
//!
//! Provides [`Collection<T>`] for type-safe document access with automatic
//! JSON encoding/decoding via the [`Document`] trait.

use crate::error::StoreResult;
use crate::store::DocumentStore;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::marker::PhantomData;
use std::sync::Arc;

/// A type that can be stored as a document.
///
/// A document names its collection and supplies its own key. Encoding is
/// JSON via serde, preserving the wire shape the documents were seeded
/// with.
pub trait Document: Serialize + DeserializeOwned {
    /// Name of the collection this document type lives in.
    const COLLECTION: &'static str;

    /// Returns the document key.
    fn key(&self) -> &str;
}

/// A typed collection of documents.
///
/// `Collection<T>` provides find/save/remove access to documents of type
/// `T` over a shared [`DocumentStore`]. Writes are whole-document saves;
/// there is no partial update.
///
/// # Example
///
/// ```rust,ignore
/// let menus: Collection<Menu> = Collection::new(store);
///
/// let menu = menus.find("menu-food")?;
/// menus.save(&menu)?;
/// ```
pub struct Collection<T: Document> {
    store: Arc<dyn DocumentStore>,
    _marker: PhantomData<T>,
}

// Manual impl: a derived Clone would require `T: Clone`.
impl<T: Document> Clone for Collection<T> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            _marker: PhantomData,
        }
    }
}

impl<T: Document> Collection<T> {
    /// Creates a typed collection over the given store.
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            store,
            _marker: PhantomData,
        }
    }

    /// Finds a document by key.
    ///
    /// Returns `None` if the document doesn't exist.
    pub fn find(&self, key: &str) -> StoreResult<Option<T>> {
        match self.store.get(T::COLLECTION, key)? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    /// Saves a document, replacing any previous version.
    pub fn save(&self, document: &T) -> StoreResult<()> {
        let bytes = serde_json::to_vec(document)?;
        self.store.put(T::COLLECTION, document.key(), &bytes)
    }

    /// Removes a document by key, returning it if it existed.
    pub fn remove(&self, key: &str) -> StoreResult<Option<T>> {
        match self.store.delete(T::COLLECTION, key)? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    /// Returns every document in the collection, in key order.
    pub fn find_all(&self) -> StoreResult<Vec<T>> {
        let raw = self.store.scan(T::COLLECTION)?;
        let mut documents = Vec::with_capacity(raw.len());
        for (_, bytes) in raw {
            documents.push(serde_json::from_slice(&bytes)?);
        }
        Ok(documents)
    }

    /// Checks whether a document exists.
    pub fn exists(&self, key: &str) -> StoreResult<bool> {
        Ok(self.store.get(T::COLLECTION, key)?.is_some())
    }

    /// Returns the number of documents in the collection.
    pub fn count(&self) -> StoreResult<usize> {
        Ok(self.store.scan(T::COLLECTION)?.len())
    }

    /// Removes every document in the collection.
    ///
    /// Returns the number of documents removed.
    pub fn clear(&self) -> StoreResult<usize> {
        self.store.clear(T::COLLECTION)
    }
}
