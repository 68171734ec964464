//! CLI command implementations.

pub mod dump;
pub mod inspect;
pub mod seed;

use krog_core::event::Event;
use krog_core::hours::OpeningHour;
use krog_core::menu::Menu;
use krog_core::wine::WineList;
use krog_store::Document;

/// Names of every collection the store holds, in display order.
pub const COLLECTIONS: [&str; 4] = [
    WineList::COLLECTION,
    Menu::COLLECTION,
    OpeningHour::COLLECTION,
    Event::COLLECTION,
];
