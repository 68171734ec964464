//! # Krog Core
//!
//! Content management core for the krog restaurant backend.
//!
//! This crate provides:
//! - Wine lists: a three-level nested document (list → countries → areas →
//!   items) with a mutation engine that relocates items across levels,
//!   keeps item ids unique list-wide, and prunes emptied grouping nodes
//! - Menus: flat sections of dishes, wines, and snacks with item-level
//!   edit/toggle/search
//! - Opening hours: one document per weekday
//! - Events: DJ nights, tastings, private bookings
//! - Request-scoped authentication context
//!
//! Persistence goes through the [`krog_store`] document store; every
//! mutation is a read-modify-write of a single document, and the
//! whole-document save is the only consistency boundary.

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod auth;
pub mod error;
pub mod event;
pub mod hours;
mod id;
pub mod menu;
pub mod wine;

pub use error::{CoreError, CoreResult};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
