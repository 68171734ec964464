//! File-based document store for persistent storage.

use crate::error::StoreResult;
use crate::store::{validate_key, DocumentStore};
use parking_lot::RwLock;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// A file-based document store.
///
/// Each collection is a directory under the store root and each document is
/// a single `<key>.json` file inside it. Data survives process restarts.
///
/// # Durability
///
/// Saves write to a temporary file in the collection directory and then
/// rename it over the target, so a document file is always either the old
/// or the new version - never a torn write. This is the single-document
/// atomic save the services rely on.
///
/// # Thread Safety
///
/// This store is thread-safe; an internal lock serialises writes.
///
/// # Example
///
/// ```no_run
/// use krog_store::{DocumentStore, FileStore};
/// use std::path::Path;
///
/// let store = FileStore::open(Path::new("data")).unwrap();
/// store.put("menus", "menu-food", b"{}").unwrap();
/// ```
#[derive(Debug)]
pub struct FileStore {
    root: PathBuf,
    // Guards compound filesystem operations (write-temp-then-rename, clear).
    lock: RwLock<()>,
}

impl FileStore {
    /// Opens a store rooted at the given directory, creating it if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn open(root: &Path) -> StoreResult<Self> {
        fs::create_dir_all(root)?;
        Ok(Self {
            root: root.to_path_buf(),
            lock: RwLock::new(()),
        })
    }

    /// Returns the root directory of the store.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn collection_dir(&self, collection: &str) -> PathBuf {
        self.root.join(collection)
    }

    fn document_path(&self, collection: &str, key: &str) -> PathBuf {
        self.collection_dir(collection).join(format!("{key}.json"))
    }
}

impl DocumentStore for FileStore {
    fn get(&self, collection: &str, key: &str) -> StoreResult<Option<Vec<u8>>> {
        validate_key(key)?;
        let _guard = self.lock.read();

        match fs::read(self.document_path(collection, key)) {
            Ok(data) => Ok(Some(data)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn put(&self, collection: &str, key: &str, data: &[u8]) -> StoreResult<()> {
        validate_key(key)?;
        let _guard = self.lock.write();

        let dir = self.collection_dir(collection);
        fs::create_dir_all(&dir)?;

        let tmp = dir.join(format!(".{key}.json.tmp"));
        fs::write(&tmp, data)?;
        fs::rename(&tmp, self.document_path(collection, key))?;
        Ok(())
    }

    fn delete(&self, collection: &str, key: &str) -> StoreResult<Option<Vec<u8>>> {
        validate_key(key)?;
        let _guard = self.lock.write();

        let path = self.document_path(collection, key);
        match fs::read(&path) {
            Ok(data) => {
                fs::remove_file(&path)?;
                Ok(Some(data))
            }
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn scan(&self, collection: &str) -> StoreResult<Vec<(String, Vec<u8>)>> {
        let _guard = self.lock.read();

        let dir = self.collection_dir(collection);
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err.into()),
        };

        let mut documents = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            let Some(key) = path.file_stem().and_then(|stem| stem.to_str()) else {
                continue;
            };
            // Leftover temp files from an interrupted save are not documents.
            if key.starts_with('.') {
                continue;
            }
            documents.push((key.to_string(), fs::read(&path)?));
        }

        documents.sort_by(|(a, _), (b, _)| a.cmp(b));
        Ok(documents)
    }

    fn clear(&self, collection: &str) -> StoreResult<usize> {
        let _guard = self.lock.write();

        let dir = self.collection_dir(collection);
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(0),
            Err(err) => return Err(err.into()),
        };

        let mut removed = 0;
        for entry in entries {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) == Some("json") {
                fs::remove_file(&path)?;
                removed += 1;
            }
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn file_open_creates_root() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("store");

        let store = FileStore::open(&root).unwrap();
        assert!(root.exists());
        assert_eq!(store.root(), root);
    }

    #[test]
    fn file_put_and_get() {
        let dir = tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();

        store.put("menus", "menu-food", b"{\"id\":\"menu-food\"}").unwrap();

        let data = store.get("menus", "menu-food").unwrap();
        assert_eq!(data.as_deref(), Some(b"{\"id\":\"menu-food\"}".as_slice()));
    }

    #[test]
    fn file_get_missing_is_none() {
        let dir = tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();

        assert!(store.get("menus", "nope").unwrap().is_none());
    }

    #[test]
    fn file_persistence_across_reopen() {
        let dir = tempdir().unwrap();

        {
            let store = FileStore::open(dir.path()).unwrap();
            store.put("events", "e1", b"data").unwrap();
        }

        {
            let store = FileStore::open(dir.path()).unwrap();
            let data = store.get("events", "e1").unwrap();
            assert_eq!(data.as_deref(), Some(b"data".as_slice()));
        }
    }

    #[test]
    fn file_delete_returns_removed_bytes() {
        let dir = tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();

        store.put("events", "e1", b"data").unwrap();
        let removed = store.delete("events", "e1").unwrap();
        assert_eq!(removed.as_deref(), Some(b"data".as_slice()));
        assert!(store.get("events", "e1").unwrap().is_none());
    }

    #[test]
    fn file_scan_is_key_ordered() {
        let dir = tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();

        store.put("menus", "b", b"2").unwrap();
        store.put("menus", "a", b"1").unwrap();

        let keys: Vec<String> = store
            .scan("menus")
            .unwrap()
            .into_iter()
            .map(|(key, _)| key)
            .collect();
        assert_eq!(keys, vec!["a", "b"]);
    }

    #[test]
    fn file_scan_unknown_collection_is_empty() {
        let dir = tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();

        assert!(store.scan("missing").unwrap().is_empty());
    }

    #[test]
    fn file_clear_counts_removed() {
        let dir = tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();

        store.put("menus", "a", b"1").unwrap();
        store.put("menus", "b", b"2").unwrap();

        assert_eq!(store.clear("menus").unwrap(), 2);
        assert!(store.scan("menus").unwrap().is_empty());
    }

    #[test]
    fn file_rejects_traversal_keys() {
        let dir = tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();

        assert!(store.put("menus", "../escape", b"1").is_err());
        assert!(store.get("menus", "a/b").is_err());
    }
}
