//! Wine list document model.

use krog_store::Document;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Reserved area name used when no area is supplied on insert.
pub const OTHER_AREA: &str = "other";

/// A wine list document, e.g. the red or sparkling card.
///
/// Countries are held as a name-keyed map; its iteration order is the
/// traversal order everywhere in this module. Areas and items are ordered
/// sequences searched linearly - at card scale (tens of items) nothing
/// more is needed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WineList {
    /// Stable list id, e.g. `"red-wines"`. Immutable once seeded.
    pub id: String,
    /// Display title, e.g. `"Rött"`.
    pub title: String,
    /// Countries keyed by country name.
    #[serde(default)]
    pub countries: BTreeMap<String, Country>,
}

impl Document for WineList {
    const COLLECTION: &'static str = "wine_lists";

    fn key(&self) -> &str {
        &self.id
    }
}

impl WineList {
    /// Returns the total number of wine items across every country and area.
    #[must_use]
    pub fn total_items(&self) -> usize {
        self.countries
            .values()
            .flat_map(|country| &country.areas)
            .map(|area| area.items.len())
            .sum()
    }
}

/// One country within a wine list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Country {
    /// Country name, duplicated from the map key for the wire shape.
    #[serde(rename = "country")]
    pub name: String,
    /// Areas in insertion order, unique by name within the country.
    #[serde(default)]
    pub areas: Vec<Area>,
}

impl Country {
    /// Creates a country with no areas.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            areas: Vec::new(),
        }
    }

    /// Finds an area by name.
    #[must_use]
    pub fn area(&self, name: &str) -> Option<&Area> {
        self.areas.iter().find(|area| area.name == name)
    }
}

/// One wine-growing area within a country.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Area {
    /// Area name, e.g. `"Tuscany"`.
    #[serde(rename = "area")]
    pub name: String,
    /// Items in insertion order.
    #[serde(default)]
    pub items: Vec<WineItem>,
}

impl Area {
    /// Creates an area with no items.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            items: Vec::new(),
        }
    }

    /// Returns whether an item with this name already exists in the area.
    #[must_use]
    pub fn has_wine_named(&self, name: &str) -> bool {
        self.items.iter().any(|item| item.name == name)
    }
}

/// One purchasable wine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WineItem {
    /// Item id, unique across the entire wine list.
    pub id: String,
    /// Wine name, unique within its area on insert.
    pub name: String,
    /// Price per glass or bottle.
    pub price: f64,
    /// Whether the wine is currently offered.
    pub active: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_list() -> WineList {
        let mut countries = BTreeMap::new();
        countries.insert(
            "Italy".to_string(),
            Country {
                name: "Italy".to_string(),
                areas: vec![Area {
                    name: "Tuscany".to_string(),
                    items: vec![WineItem {
                        id: "wine-1".to_string(),
                        name: "Chianti".to_string(),
                        price: 18.0,
                        active: true,
                    }],
                }],
            },
        );
        WineList {
            id: "red-wines".to_string(),
            title: "Rött".to_string(),
            countries,
        }
    }

    #[test]
    fn total_items_counts_every_level() {
        let mut list = sample_list();
        assert_eq!(list.total_items(), 1);

        list.countries
            .get_mut("Italy")
            .unwrap()
            .areas
            .push(Area::new("Piedmont"));
        assert_eq!(list.total_items(), 1);
    }

    #[test]
    fn area_lookup_by_name() {
        let list = sample_list();
        let italy = &list.countries["Italy"];
        assert!(italy.area("Tuscany").is_some());
        assert!(italy.area("Piedmont").is_none());
    }

    #[test]
    fn duplicate_name_detection_is_per_area() {
        let list = sample_list();
        let tuscany = list.countries["Italy"].area("Tuscany").unwrap();
        assert!(tuscany.has_wine_named("Chianti"));
        assert!(!tuscany.has_wine_named("Barolo"));
    }

    #[test]
    fn wire_shape_matches_seed_data() {
        let json = serde_json::to_value(sample_list()).unwrap();
        assert_eq!(json["countries"]["Italy"]["country"], "Italy");
        assert_eq!(json["countries"]["Italy"]["areas"][0]["area"], "Tuscany");
        assert_eq!(
            json["countries"]["Italy"]["areas"][0]["items"][0]["name"],
            "Chianti"
        );
    }

    #[test]
    fn missing_collections_default_empty() {
        let list: WineList =
            serde_json::from_str(r#"{"id":"white-wines","title":"Vitt"}"#).unwrap();
        assert!(list.countries.is_empty());
    }
}
