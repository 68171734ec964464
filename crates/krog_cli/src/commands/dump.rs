//! Dump command implementation.

use krog_store::{DocumentStore, FileStore};
use serde_json::Value;
use std::path::Path;

/// Runs the dump command.
pub fn run(path: &Path, collection: &str) -> Result<(), Box<dyn std::error::Error>> {
    if !super::COLLECTIONS.contains(&collection) {
        return Err(format!(
            "Unknown collection {:?} (expected one of: {})",
            collection,
            super::COLLECTIONS.join(", ")
        )
        .into());
    }

    let store = FileStore::open(path)?;
    let mut documents = Vec::new();
    for (_, bytes) in store.scan(collection)? {
        let value: Value = serde_json::from_slice(&bytes)?;
        documents.push(value);
    }

    println!("{}", serde_json::to_string_pretty(&Value::Array(documents))?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn dump_rejects_unknown_collections() {
        let dir = tempdir().unwrap();
        assert!(run(dir.path(), "wines").is_err());
    }

    #[test]
    fn dump_prints_an_empty_collection() {
        let dir = tempdir().unwrap();
        run(dir.path(), "events").unwrap();
    }

    #[test]
    fn dump_reads_every_stored_document() {
        let dir = tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();
        store
            .put("menus", "menu-food", br#"{"id":"menu-food","title":"Mat"}"#)
            .unwrap();
        store
            .put("menus", "menu-snacks", br#"{"id":"menu-snacks","title":"Snacks"}"#)
            .unwrap();

        run(dir.path(), "menus").unwrap();
    }

    #[test]
    fn dump_fails_on_undecodable_bytes() {
        let dir = tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();
        store.put("menus", "bad", b"not json").unwrap();

        assert!(run(dir.path(), "menus").is_err());
    }
}
