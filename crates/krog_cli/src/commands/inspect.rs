//! Inspect command implementation.

use krog_core::event::Event;
use krog_core::hours::OpeningHour;
use krog_core::menu::Menu;
use krog_core::wine::WineList;
use krog_store::{Collection, Document, DocumentStore, FileStore};
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;

/// Store inspection result.
#[derive(Debug, Serialize)]
pub struct InspectResult {
    /// Store path.
    pub path: String,
    /// Per-collection document counts.
    pub collections: Vec<CollectionStats>,
    /// Total number of documents.
    pub total: usize,
}

/// Document count for a single collection.
#[derive(Debug, Serialize)]
pub struct CollectionStats {
    /// Collection name.
    pub name: &'static str,
    /// Number of documents.
    pub documents: usize,
}

/// Runs the inspect command.
pub fn run(path: &Path, format: &str) -> Result<(), Box<dyn std::error::Error>> {
    if !path.is_dir() {
        return Err(format!("No store found at {:?}", path).into());
    }
    let store: Arc<dyn DocumentStore> = Arc::new(FileStore::open(path)?);

    let collections = vec![
        stats::<WineList>(&store)?,
        stats::<Menu>(&store)?,
        stats::<OpeningHour>(&store)?,
        stats::<Event>(&store)?,
    ];
    let total = collections.iter().map(|col| col.documents).sum();

    let result = InspectResult {
        path: path.display().to_string(),
        collections,
        total,
    };

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&result)?),
        _ => print_text_output(&result),
    }

    Ok(())
}

fn stats<T: Document>(
    store: &Arc<dyn DocumentStore>,
) -> Result<CollectionStats, Box<dyn std::error::Error>> {
    let collection: Collection<T> = Collection::new(store.clone());
    Ok(CollectionStats {
        name: T::COLLECTION,
        documents: collection.count()?,
    })
}

fn print_text_output(result: &InspectResult) {
    println!("Krog Store Inspection");
    println!("=====================");
    println!();
    println!("Path: {}", result.path);
    println!();
    println!("Collections:");
    for col in &result.collections {
        println!("  {:<15} {} documents", col.name, col.documents);
    }
    println!();
    println!("Total: {} documents", result.total);
}
