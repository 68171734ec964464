//! # Krog Store
//!
//! Document store trait and implementations for the krog backend.
//!
//! This crate provides the persistence abstraction for the krog content
//! management core. Stores are **whole-document stores**: a document is an
//! opaque byte blob addressed by a `(collection, key)` pair, and the only
//! write granularity is a full-document replace. Services read a document,
//! mutate it in memory, and save it back; the single-document save is the
//! consistency boundary.
//!
//! ## Design principles
//!
//! - Stores do not interpret document bytes; encoding lives in the typed
//!   [`Collection`] layer
//! - Must be `Send + Sync` so one store can be shared across services
//! - No multi-document transactions, no secondary indexes
//!
//! ## Available stores
//!
//! - [`MemoryStore`] - for tests and ephemeral use
//! - [`FileStore`] - one JSON file per document, atomic replace on save
//!
//! ## Example
//!
//! ```rust
//! use krog_store::{DocumentStore, MemoryStore};
//!
//! let store = MemoryStore::new();
//! store.put("menus", "menu-food", b"{}").unwrap();
//! assert!(store.get("menus", "menu-food").unwrap().is_some());
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod collection;
mod error;
mod file;
mod memory;
mod store;

pub use collection::{Collection, Document};
pub use error::{StoreError, StoreResult};
pub use file::FileStore;
pub use memory::MemoryStore;
pub use store::DocumentStore;
