//! Wine list subsystem.
//!
//! A wine list is a three-level nested document: the list groups wines by
//! country, each country by area, and each area holds the purchasable
//! items. Mutations relocate items across levels while keeping item ids
//! unique across the whole list and pruning grouping nodes that end up
//! empty.

mod locate;
mod model;
mod service;

pub use locate::{locate, WineRef};
pub use model::{Area, Country, WineItem, WineList, OTHER_AREA};
pub use service::{NewWine, WineListPatch, WineListService, WineUpdate};
