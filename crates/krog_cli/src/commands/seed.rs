//! Seed command implementation.

use krog_core::event::Event;
use krog_core::hours::OpeningHour;
use krog_core::menu::Menu;
use krog_core::wine::WineList;
use krog_store::{Collection, Document, DocumentStore, FileStore};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::sync::Arc;

/// A seed fixture. Every section is optional.
#[derive(Debug, Default, Deserialize)]
struct Fixture {
    #[serde(default)]
    wine_lists: Vec<WineList>,
    #[serde(default)]
    menus: Vec<Menu>,
    #[serde(default)]
    opening_hours: Vec<OpeningHour>,
    #[serde(default)]
    events: Vec<Event>,
}

/// Runs the seed command.
pub fn run(path: &Path, file: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let raw = fs::read_to_string(file)?;
    let fixture: Fixture = serde_json::from_str(&raw)?;
    let store: Arc<dyn DocumentStore> = Arc::new(FileStore::open(path)?);

    let mut total = 0;
    total += seed_section(&store, &fixture.wine_lists)?;
    total += seed_section(&store, &fixture.menus)?;
    total += seed_section(&store, &fixture.opening_hours)?;
    total += seed_section(&store, &fixture.events)?;

    println!("Seeded {} documents into {}", total, path.display());
    Ok(())
}

fn seed_section<T: Document>(
    store: &Arc<dyn DocumentStore>,
    docs: &[T],
) -> Result<usize, Box<dyn std::error::Error>> {
    let collection: Collection<T> = Collection::new(store.clone());
    for doc in docs {
        collection.save(doc)?;
    }
    if !docs.is_empty() {
        tracing::info!(
            collection = T::COLLECTION,
            count = docs.len(),
            "seeded collection"
        );
    }
    Ok(docs.len())
}
