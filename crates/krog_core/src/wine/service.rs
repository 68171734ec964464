//! Wine list queries and mutation engine.

use crate::auth::RequestContext;
use crate::error::{CoreError, CoreResult};
use crate::id::wine_id;
use crate::wine::locate::{locate_path, WinePath};
use crate::wine::model::{Area, Country, WineItem, WineList, OTHER_AREA};
use krog_store::{Collection, DocumentStore};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

/// Input for adding a wine to a list.
#[derive(Debug, Clone)]
pub struct NewWine {
    /// Target country name. Required.
    pub country: String,
    /// Target area name; the reserved `"other"` area is used when absent
    /// or empty.
    pub area: Option<String>,
    /// Wine name. Required, unique within the target area.
    pub name: String,
    /// Price. Required.
    pub price: Option<f64>,
}

/// Field edits and/or relocation for an existing wine.
///
/// Supplying `country` or `area` with a value different from the item's
/// current position relocates it; absent fields keep their current value.
#[derive(Debug, Clone, Default)]
pub struct WineUpdate {
    /// New wine name.
    pub name: Option<String>,
    /// New price.
    pub price: Option<f64>,
    /// Target country.
    pub country: Option<String>,
    /// Target area.
    pub area: Option<String>,
}

/// Field-wise replacement of a whole wine list document.
#[derive(Debug, Clone, Default)]
pub struct WineListPatch {
    /// New display title.
    pub title: Option<String>,
    /// Full replacement of the country map.
    pub countries: Option<BTreeMap<String, Country>>,
}

/// Queries and mutations over wine list documents.
///
/// Every mutation is a read-modify-write of one document: fetch, mutate
/// the in-memory copy, save the whole document back. Validation and
/// lookups happen before any edit, so a failed operation never persists a
/// partial change.
pub struct WineListService {
    lists: Collection<WineList>,
}

impl WineListService {
    /// Creates the service over the given store.
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            lists: Collection::new(store),
        }
    }

    /// Returns every wine list.
    ///
    /// An empty result is not an error here; "no content" is the
    /// handler's call.
    pub fn list_all(&self) -> CoreResult<Vec<WineList>> {
        Ok(self.lists.find_all()?)
    }

    /// Returns a wine list by id.
    pub fn get(&self, list_id: &str) -> CoreResult<WineList> {
        self.load(list_id)
    }

    /// Replaces a wine list field-wise.
    ///
    /// Never creates: a missing list is [`CoreError::ListNotFound`].
    pub fn replace(
        &self,
        ctx: &RequestContext,
        list_id: &str,
        patch: WineListPatch,
    ) -> CoreResult<WineList> {
        ctx.require_authorized()?;
        let mut list = self.load(list_id)?;

        if let Some(title) = patch.title {
            list.title = title;
        }
        if let Some(countries) = patch.countries {
            list.countries = countries;
        }

        self.lists.save(&list)?;
        Ok(list)
    }

    /// Adds a wine to a list.
    ///
    /// Creates the target country and area when missing; wines without an
    /// area land in the reserved `"other"` area. A wine name already
    /// present in the target area is a conflict and nothing is persisted.
    /// The new item gets a fresh list-wide unique id and starts active.
    pub fn add_wine(
        &self,
        ctx: &RequestContext,
        list_id: &str,
        wine: NewWine,
    ) -> CoreResult<WineItem> {
        ctx.require_authorized()?;

        let price = match wine.price {
            Some(price) if !wine.country.is_empty() && !wine.name.is_empty() => price,
            _ => {
                return Err(CoreError::validation(
                    "country, name and price are required",
                ))
            }
        };

        let mut list = self.load(list_id)?;

        let area_name = wine
            .area
            .as_deref()
            .filter(|area| !area.is_empty())
            .unwrap_or(OTHER_AREA)
            .to_string();

        let area = area_entry(&mut list, &wine.country, &area_name);
        if area.has_wine_named(&wine.name) {
            return Err(CoreError::DuplicateWine {
                name: wine.name,
                area: area_name,
            });
        }

        let item = WineItem {
            id: wine_id(),
            name: wine.name,
            price,
            active: true,
        };
        area.items.push(item.clone());

        self.lists.save(&list)?;
        debug!(list = %list.id, wine = %item.id, country = %wine.country, area = %area_name, "wine added");
        Ok(item)
    }

    /// Updates a wine's fields and/or relocates it.
    ///
    /// A target country or area differing from the item's current position
    /// moves it: removed from the source area, appended to the target
    /// (created if missing), with the source pruned if emptied. Field
    /// edits apply either way. Unlike [`Self::add_wine`], no duplicate-name
    /// check runs here - renames and relocations may land a name that
    /// already exists in the target area.
    pub fn update_wine(
        &self,
        ctx: &RequestContext,
        list_id: &str,
        wine_id: &str,
        update: WineUpdate,
    ) -> CoreResult<WineItem> {
        ctx.require_authorized()?;
        let mut list = self.load(list_id)?;
        let path = locate_path(&list, wine_id).ok_or_else(|| CoreError::WineNotFound {
            id: wine_id.to_string(),
        })?;

        let current_area = list.countries[&path.country].areas[path.area].name.clone();
        let target_country = update.country.clone().unwrap_or_else(|| path.country.clone());
        let target_area = update.area.clone().unwrap_or_else(|| current_area.clone());
        let relocating = target_country != path.country || target_area != current_area;

        let item = if relocating {
            let Some(mut item) = remove_at(&mut list, &path) else {
                return Err(CoreError::WineNotFound {
                    id: wine_id.to_string(),
                });
            };
            apply_edits(&mut item, &update);
            prune_if_empty(&mut list, &path.country, path.area);

            let area = area_entry(&mut list, &target_country, &target_area);
            area.items.push(item.clone());
            debug!(
                list = %list.id,
                wine = %item.id,
                from = %path.country,
                to = %target_country,
                "wine relocated"
            );
            item
        } else {
            let Some(item) = item_at_mut(&mut list, &path) else {
                return Err(CoreError::WineNotFound {
                    id: wine_id.to_string(),
                });
            };
            apply_edits(item, &update);
            item.clone()
        };

        self.lists.save(&list)?;
        Ok(item)
    }

    /// Flips a wine's `active` flag.
    pub fn toggle_wine_active(
        &self,
        ctx: &RequestContext,
        list_id: &str,
        wine_id: &str,
    ) -> CoreResult<WineItem> {
        ctx.require_authorized()?;
        let mut list = self.load(list_id)?;
        let path = locate_path(&list, wine_id).ok_or_else(|| CoreError::WineNotFound {
            id: wine_id.to_string(),
        })?;

        let Some(item) = item_at_mut(&mut list, &path) else {
            return Err(CoreError::WineNotFound {
                id: wine_id.to_string(),
            });
        };
        item.active = !item.active;
        let result = item.clone();

        self.lists.save(&list)?;
        Ok(result)
    }

    /// Deletes a wine from a list, returning the removed item.
    ///
    /// The emptied area - and a country left without areas - is pruned,
    /// the same policy relocation applies.
    pub fn delete_wine(
        &self,
        ctx: &RequestContext,
        list_id: &str,
        wine_id: &str,
    ) -> CoreResult<WineItem> {
        ctx.require_authorized()?;
        let mut list = self.load(list_id)?;
        let path = locate_path(&list, wine_id).ok_or_else(|| CoreError::WineNotFound {
            id: wine_id.to_string(),
        })?;

        let Some(item) = remove_at(&mut list, &path) else {
            return Err(CoreError::WineNotFound {
                id: wine_id.to_string(),
            });
        };
        prune_if_empty(&mut list, &path.country, path.area);

        self.lists.save(&list)?;
        debug!(list = %list.id, wine = %item.id, "wine deleted");
        Ok(item)
    }

    fn load(&self, list_id: &str) -> CoreResult<WineList> {
        self.lists
            .find(list_id)?
            .ok_or_else(|| CoreError::ListNotFound {
                id: list_id.to_string(),
            })
    }
}

fn apply_edits(item: &mut WineItem, update: &WineUpdate) {
    if let Some(name) = &update.name {
        item.name = name.clone();
    }
    if let Some(price) = update.price {
        item.price = price;
    }
}

/// Resolves the named area under the named country, creating either as
/// needed. A created country starts with no areas; a created area is
/// appended to the country's sequence.
fn area_entry<'a>(list: &'a mut WineList, country: &str, area: &str) -> &'a mut Area {
    let node = list
        .countries
        .entry(country.to_string())
        .or_insert_with(|| Country::new(country));

    let index = match node.areas.iter().position(|candidate| candidate.name == area) {
        Some(index) => index,
        None => {
            node.areas.push(Area::new(area));
            node.areas.len() - 1
        }
    };
    &mut node.areas[index]
}

fn remove_at(list: &mut WineList, path: &WinePath) -> Option<WineItem> {
    let country = list.countries.get_mut(&path.country)?;
    let area = country.areas.get_mut(path.area)?;
    if path.item >= area.items.len() {
        return None;
    }
    Some(area.items.remove(path.item))
}

fn item_at_mut<'a>(list: &'a mut WineList, path: &WinePath) -> Option<&'a mut WineItem> {
    list.countries
        .get_mut(&path.country)?
        .areas
        .get_mut(path.area)?
        .items
        .get_mut(path.item)
}

/// Removes the area at `area_index` if it holds no items, and the country
/// if that leaves it without areas. Applied after every item removal so
/// no mutation leaves an empty grouping shell behind.
fn prune_if_empty(list: &mut WineList, country: &str, area_index: usize) {
    if let Some(node) = list.countries.get_mut(country) {
        if node
            .areas
            .get(area_index)
            .is_some_and(|area| area.items.is_empty())
        {
            node.areas.remove(area_index);
            debug!(country, "pruned empty area");
        }
        if node.areas.is_empty() {
            list.countries.remove(country);
            debug!(country, "pruned empty country");
        }
    }
}
