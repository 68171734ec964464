//! Menu document model.

use krog_store::Document;
use serde::{Deserialize, Serialize};

/// Id of the reserved wine menu.
///
/// The wine menu is the one section whose items carry a producer and
/// whose section price is editable.
pub const WINE_MENU_ID: &str = "menu-wine";

/// A menu section, e.g. `"SNACKS"` or `"VECKANS VINER"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Menu {
    /// Stable menu id, e.g. `"menu-food"`.
    pub id: String,
    /// Display title.
    pub title: String,
    /// Optional section description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Section kind, e.g. `"food"` or `"wine"`.
    #[serde(rename = "type")]
    pub menu_type: String,
    /// Section-level price; only meaningful on the wine menu.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    /// Items in display order.
    #[serde(default)]
    pub items: Vec<MenuItem>,
}

impl Document for Menu {
    const COLLECTION: &'static str = "menus";

    fn key(&self) -> &str {
        &self.id
    }
}

impl Menu {
    /// Finds an item by id.
    #[must_use]
    pub fn item(&self, item_id: &str) -> Option<&MenuItem> {
        self.items.iter().find(|item| item.id == item_id)
    }
}

/// One dish, wine, or snack on a menu.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    /// Item id, unique within the menu.
    pub id: String,
    /// Whether the item is currently offered.
    pub active: bool,
    /// Item title.
    pub title: String,
    /// Producer; wine menu only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub producer: Option<String>,
    /// Item description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Item price.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
}
