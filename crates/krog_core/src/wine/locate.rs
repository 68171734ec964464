//! Wine item locator.

use crate::wine::model::{WineItem, WineList};

/// Where a wine item sits inside its list.
// PartialEq only: the item carries a price, and floats have no total order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WineRef<'a> {
    /// Name of the country holding the item.
    pub country: &'a str,
    /// Name of the area holding the item.
    pub area: &'a str,
    /// The item itself.
    pub item: &'a WineItem,
}

/// Finds a wine item by id.
///
/// Linear scan over every country, then every area, then every item; the
/// first id match wins. Item ids are opaque, so there is no shortcut from
/// the id to its position. A miss is a `None`, not an error - callers
/// decide how to surface it.
#[must_use]
pub fn locate<'a>(list: &'a WineList, wine_id: &str) -> Option<WineRef<'a>> {
    for country in list.countries.values() {
        for area in &country.areas {
            for item in &area.items {
                if item.id == wine_id {
                    return Some(WineRef {
                        country: &country.name,
                        area: &area.name,
                        item,
                    });
                }
            }
        }
    }
    None
}

/// Position of a wine item, by map key and sequence indexes.
///
/// The mutation engine works on positions so it can remove and re-insert
/// without holding borrows across edits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct WinePath {
    pub country: String,
    pub area: usize,
    pub item: usize,
}

/// Finds the position of a wine item by id. Same traversal as [`locate`].
pub(crate) fn locate_path(list: &WineList, wine_id: &str) -> Option<WinePath> {
    for (country_name, country) in &list.countries {
        for (area_index, area) in country.areas.iter().enumerate() {
            for (item_index, item) in area.items.iter().enumerate() {
                if item.id == wine_id {
                    return Some(WinePath {
                        country: country_name.clone(),
                        area: area_index,
                        item: item_index,
                    });
                }
            }
        }
    }
    None
}
