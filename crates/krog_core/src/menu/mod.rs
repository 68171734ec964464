//! Menu subsystem.
//!
//! Menus are flat single-level documents: a section (e.g. "SNACKS" or the
//! weekly wine card) with an ordered sequence of items. The reserved wine
//! menu additionally carries a producer per item and an editable section
//! price.

mod model;
mod service;

pub use model::{Menu, MenuItem, WINE_MENU_ID};
pub use service::{
    MenuItemPatch, MenuPatch, MenuSearchResult, MenuService, NewMenu, NewMenuItem,
};
