//! Menu queries and mutations.

use crate::auth::RequestContext;
use crate::error::{CoreError, CoreResult};
use crate::id::short_id;
use crate::menu::model::{Menu, MenuItem, WINE_MENU_ID};
use krog_store::{Collection, DocumentStore};
use std::sync::Arc;
use tracing::debug;

/// Input for creating a menu section.
#[derive(Debug, Clone)]
pub struct NewMenu {
    /// Stable menu id.
    pub id: String,
    /// Display title.
    pub title: String,
    /// Optional section description.
    pub description: Option<String>,
    /// Section kind.
    pub menu_type: String,
    /// Section-level price.
    pub price: Option<f64>,
    /// Initial items; each gets a fresh id.
    pub items: Vec<NewMenuItem>,
}

/// Input for creating a menu item.
#[derive(Debug, Clone, Default)]
pub struct NewMenuItem {
    /// Item title; defaults to empty.
    pub title: Option<String>,
    /// Producer; honoured only on the wine menu.
    pub producer: Option<String>,
    /// Item description.
    pub description: Option<String>,
    /// Item price.
    pub price: Option<f64>,
    /// Starting active state; defaults to `true`.
    pub active: Option<bool>,
}

/// Field edits for a menu section.
///
/// Title, description, and type are always editable; the section price
/// only on the wine menu.
#[derive(Debug, Clone, Default)]
pub struct MenuPatch {
    /// New title.
    pub title: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New section kind.
    pub menu_type: Option<String>,
    /// New section price (wine menu only).
    pub price: Option<f64>,
}

/// Field edits for a menu item.
#[derive(Debug, Clone, Default)]
pub struct MenuItemPatch {
    /// New title.
    pub title: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New price.
    pub price: Option<f64>,
    /// New active state.
    pub active: Option<bool>,
}

/// One menu's worth of search matches.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuSearchResult {
    /// Id of the menu holding the matches.
    pub menu_id: String,
    /// Title of that menu.
    pub menu_title: String,
    /// The matching items.
    pub items: Vec<MenuItem>,
}

/// Queries and mutations over menu documents.
pub struct MenuService {
    menus: Collection<Menu>,
}

impl MenuService {
    /// Creates the service over the given store.
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            menus: Collection::new(store),
        }
    }

    /// Returns every menu.
    pub fn list_all(&self) -> CoreResult<Vec<Menu>> {
        Ok(self.menus.find_all()?)
    }

    /// Returns a menu by id.
    pub fn get(&self, menu_id: &str) -> CoreResult<Menu> {
        self.load(menu_id)
    }

    /// Returns a menu's items.
    pub fn items(&self, menu_id: &str) -> CoreResult<Vec<MenuItem>> {
        Ok(self.load(menu_id)?.items)
    }

    /// Searches item titles and descriptions across every menu.
    ///
    /// Case-insensitive substring containment, grouped per menu; menus
    /// without a match are omitted. No ranking.
    pub fn search(&self, query: &str) -> CoreResult<Vec<MenuSearchResult>> {
        if query.is_empty() {
            return Err(CoreError::validation("search query is required"));
        }
        let needle = query.to_lowercase();

        let mut results = Vec::new();
        for menu in self.menus.find_all()? {
            let matches: Vec<MenuItem> = menu
                .items
                .iter()
                .filter(|item| {
                    item.title.to_lowercase().contains(&needle)
                        || item
                            .description
                            .as_ref()
                            .is_some_and(|description| description.to_lowercase().contains(&needle))
                })
                .cloned()
                .collect();

            if !matches.is_empty() {
                results.push(MenuSearchResult {
                    menu_id: menu.id,
                    menu_title: menu.title,
                    items: matches,
                });
            }
        }
        Ok(results)
    }

    /// Creates a menu.
    ///
    /// Initial items get fresh ids and default to active. An existing
    /// menu with the same id is a conflict.
    pub fn create(&self, ctx: &RequestContext, menu: NewMenu) -> CoreResult<Menu> {
        ctx.require_authorized()?;

        if menu.id.is_empty() || menu.title.is_empty() || menu.menu_type.is_empty() {
            return Err(CoreError::validation("id, title and type are required"));
        }
        if self.menus.exists(&menu.id)? {
            return Err(CoreError::DuplicateMenu { id: menu.id });
        }

        let is_wine_menu = menu.id == WINE_MENU_ID;
        let document = Menu {
            items: menu
                .items
                .into_iter()
                .map(|item| build_item(item, is_wine_menu))
                .collect(),
            id: menu.id,
            title: menu.title,
            description: menu.description,
            menu_type: menu.menu_type,
            price: menu.price,
        };

        self.menus.save(&document)?;
        debug!(menu = %document.id, "menu created");
        Ok(document)
    }

    /// Creates several menus at once.
    ///
    /// Fails on the first conflict; earlier menus in the batch stay
    /// created (no multi-document transaction).
    pub fn create_bulk(&self, ctx: &RequestContext, menus: Vec<NewMenu>) -> CoreResult<Vec<Menu>> {
        ctx.require_authorized()?;

        let mut created = Vec::with_capacity(menus.len());
        for menu in menus {
            created.push(self.create(ctx, menu)?);
        }
        Ok(created)
    }

    /// Adds an item to a menu, returning the created item.
    pub fn add_item(
        &self,
        ctx: &RequestContext,
        menu_id: &str,
        item: NewMenuItem,
    ) -> CoreResult<MenuItem> {
        ctx.require_authorized()?;
        let mut menu = self.load(menu_id)?;

        let item = build_item(item, menu.id == WINE_MENU_ID);
        menu.items.push(item.clone());

        self.menus.save(&menu)?;
        debug!(menu = %menu.id, item = %item.id, "menu item added");
        Ok(item)
    }

    /// Updates a menu's section fields.
    ///
    /// The section price is editable only on the wine menu.
    pub fn update(&self, ctx: &RequestContext, menu_id: &str, patch: MenuPatch) -> CoreResult<Menu> {
        ctx.require_authorized()?;
        let mut menu = self.load(menu_id)?;

        if patch.price.is_some() && menu.id != WINE_MENU_ID {
            return Err(CoreError::validation(
                "cannot update field: price. Allowed fields are: title, description, type",
            ));
        }

        if let Some(title) = patch.title {
            menu.title = title;
        }
        if let Some(description) = patch.description {
            menu.description = Some(description);
        }
        if let Some(menu_type) = patch.menu_type {
            menu.menu_type = menu_type;
        }
        if let Some(price) = patch.price {
            menu.price = Some(price);
        }

        self.menus.save(&menu)?;
        Ok(menu)
    }

    /// Updates one item's fields.
    pub fn update_item(
        &self,
        ctx: &RequestContext,
        menu_id: &str,
        item_id: &str,
        patch: MenuItemPatch,
    ) -> CoreResult<MenuItem> {
        ctx.require_authorized()?;
        let mut menu = self.load(menu_id)?;
        let item = find_item_mut(&mut menu, menu_id, item_id)?;

        if let Some(title) = patch.title {
            item.title = title;
        }
        if let Some(description) = patch.description {
            item.description = Some(description);
        }
        if let Some(price) = patch.price {
            item.price = Some(price);
        }
        if let Some(active) = patch.active {
            item.active = active;
        }
        let result = item.clone();

        self.menus.save(&menu)?;
        Ok(result)
    }

    /// Flips one item's `active` flag.
    pub fn toggle_item(
        &self,
        ctx: &RequestContext,
        menu_id: &str,
        item_id: &str,
    ) -> CoreResult<MenuItem> {
        ctx.require_authorized()?;
        let mut menu = self.load(menu_id)?;
        let item = find_item_mut(&mut menu, menu_id, item_id)?;

        item.active = !item.active;
        let result = item.clone();

        self.menus.save(&menu)?;
        Ok(result)
    }

    /// Deletes a menu, returning it.
    pub fn delete(&self, ctx: &RequestContext, menu_id: &str) -> CoreResult<Menu> {
        ctx.require_authorized()?;
        self.menus
            .remove(menu_id)?
            .ok_or_else(|| CoreError::MenuNotFound {
                id: menu_id.to_string(),
            })
    }

    /// Deletes one item from a menu, returning the removed item.
    pub fn delete_item(
        &self,
        ctx: &RequestContext,
        menu_id: &str,
        item_id: &str,
    ) -> CoreResult<MenuItem> {
        ctx.require_authorized()?;
        let mut menu = self.load(menu_id)?;

        let index = menu
            .items
            .iter()
            .position(|item| item.id == item_id)
            .ok_or_else(|| CoreError::MenuItemNotFound {
                menu_id: menu_id.to_string(),
                item_id: item_id.to_string(),
            })?;
        let removed = menu.items.remove(index);

        self.menus.save(&menu)?;
        Ok(removed)
    }

    /// Deletes every menu, returning the number removed.
    pub fn delete_all(&self, ctx: &RequestContext) -> CoreResult<usize> {
        ctx.require_authorized()?;
        Ok(self.menus.clear()?)
    }

    fn load(&self, menu_id: &str) -> CoreResult<Menu> {
        self.menus
            .find(menu_id)?
            .ok_or_else(|| CoreError::MenuNotFound {
                id: menu_id.to_string(),
            })
    }
}

fn build_item(item: NewMenuItem, is_wine_menu: bool) -> MenuItem {
    MenuItem {
        id: short_id(),
        active: item.active.unwrap_or(true),
        title: item.title.unwrap_or_default(),
        producer: if is_wine_menu { item.producer } else { None },
        description: item.description,
        price: item.price,
    }
}

fn find_item_mut<'a>(
    menu: &'a mut Menu,
    menu_id: &str,
    item_id: &str,
) -> CoreResult<&'a mut MenuItem> {
    menu.items
        .iter_mut()
        .find(|item| item.id == item_id)
        .ok_or_else(|| CoreError::MenuItemNotFound {
            menu_id: menu_id.to_string(),
            item_id: item_id.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Principal;
    use krog_store::MemoryStore;

    fn admin() -> RequestContext {
        RequestContext::authenticated(Principal::new("admin"))
    }

    fn service() -> MenuService {
        MenuService::new(Arc::new(MemoryStore::new()))
    }

    fn new_menu(id: &str, title: &str, menu_type: &str) -> NewMenu {
        NewMenu {
            id: id.to_string(),
            title: title.to_string(),
            description: None,
            menu_type: menu_type.to_string(),
            price: None,
            items: Vec::new(),
        }
    }

    fn titled_item(title: &str) -> NewMenuItem {
        NewMenuItem {
            title: Some(title.to_string()),
            ..NewMenuItem::default()
        }
    }

    #[test]
    fn create_assigns_item_ids_and_defaults() {
        let service = service();
        let mut menu = new_menu("menu-food", "Mat", "food");
        menu.items.push(titled_item("Toast Skagen"));

        let created = service.create(&admin(), menu).unwrap();
        assert_eq!(created.items.len(), 1);
        assert_eq!(created.items[0].id.len(), 8);
        assert!(created.items[0].active);
    }

    #[test]
    fn create_duplicate_id_conflicts() {
        let service = service();
        service
            .create(&admin(), new_menu("menu-food", "Mat", "food"))
            .unwrap();

        let result = service.create(&admin(), new_menu("menu-food", "Mat", "food"));
        assert!(matches!(result, Err(CoreError::DuplicateMenu { .. })));
    }

    #[test]
    fn create_validates_required_fields() {
        let service = service();
        let result = service.create(&admin(), new_menu("menu-food", "", "food"));
        assert!(matches!(result, Err(CoreError::Validation { .. })));
    }

    #[test]
    fn create_bulk_creates_all() {
        let service = service();
        let created = service
            .create_bulk(
                &admin(),
                vec![
                    new_menu("menu-food", "Mat", "food"),
                    new_menu("menu-snacks", "Snacks", "food"),
                ],
            )
            .unwrap();
        assert_eq!(created.len(), 2);
        assert_eq!(service.list_all().unwrap().len(), 2);
    }

    #[test]
    fn producer_is_dropped_off_the_wine_menu() {
        let service = service();
        service
            .create(&admin(), new_menu("menu-food", "Mat", "food"))
            .unwrap();
        service
            .create(&admin(), new_menu(WINE_MENU_ID, "Vin", "wine"))
            .unwrap();

        let mut item = titled_item("Barolo");
        item.producer = Some("Pio Cesare".to_string());
        let on_food = service.add_item(&admin(), "menu-food", item.clone()).unwrap();
        assert!(on_food.producer.is_none());

        let on_wine = service.add_item(&admin(), WINE_MENU_ID, item).unwrap();
        assert_eq!(on_wine.producer.as_deref(), Some("Pio Cesare"));
    }

    #[test]
    fn search_matches_title_and_description_case_insensitively() {
        let service = service();
        let mut menu = new_menu("menu-food", "Mat", "food");
        menu.items.push(titled_item("Toast Skagen"));
        menu.items.push(NewMenuItem {
            title: Some("Husets burgare".to_string()),
            description: Some("Med tryffelmajonnäs".to_string()),
            ..NewMenuItem::default()
        });
        service.create(&admin(), menu).unwrap();
        service
            .create(&admin(), new_menu("menu-snacks", "Snacks", "food"))
            .unwrap();

        let results = service.search("TOAST").unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].menu_id, "menu-food");
        assert_eq!(results[0].items.len(), 1);

        let results = service.search("tryffel").unwrap();
        assert_eq!(results[0].items[0].title, "Husets burgare");

        assert!(service.search("pizza").unwrap().is_empty());
    }

    #[test]
    fn search_requires_a_query() {
        let service = service();
        assert!(matches!(
            service.search(""),
            Err(CoreError::Validation { .. })
        ));
    }

    #[test]
    fn section_price_is_wine_menu_only() {
        let service = service();
        service
            .create(&admin(), new_menu("menu-food", "Mat", "food"))
            .unwrap();
        service
            .create(&admin(), new_menu(WINE_MENU_ID, "Vin", "wine"))
            .unwrap();

        let patch = MenuPatch {
            price: Some(95.0),
            ..MenuPatch::default()
        };
        assert!(matches!(
            service.update(&admin(), "menu-food", patch.clone()),
            Err(CoreError::Validation { .. })
        ));

        let updated = service.update(&admin(), WINE_MENU_ID, patch).unwrap();
        assert_eq!(updated.price, Some(95.0));
    }

    #[test]
    fn update_item_and_toggle() {
        let service = service();
        let mut menu = new_menu("menu-food", "Mat", "food");
        menu.items.push(titled_item("Toast Skagen"));
        let created = service.create(&admin(), menu).unwrap();
        let item_id = created.items[0].id.clone();

        let updated = service
            .update_item(
                &admin(),
                "menu-food",
                &item_id,
                MenuItemPatch {
                    price: Some(155.0),
                    ..MenuItemPatch::default()
                },
            )
            .unwrap();
        assert_eq!(updated.price, Some(155.0));

        let toggled = service.toggle_item(&admin(), "menu-food", &item_id).unwrap();
        assert!(!toggled.active);
        let toggled = service.toggle_item(&admin(), "menu-food", &item_id).unwrap();
        assert!(toggled.active);
    }

    #[test]
    fn missing_menu_or_item_is_not_found() {
        let service = service();
        service
            .create(&admin(), new_menu("menu-food", "Mat", "food"))
            .unwrap();

        assert!(matches!(
            service.get("menu-nope"),
            Err(CoreError::MenuNotFound { .. })
        ));
        assert!(matches!(
            service.toggle_item(&admin(), "menu-food", "nope"),
            Err(CoreError::MenuItemNotFound { .. })
        ));
    }

    #[test]
    fn delete_item_removes_only_that_item() {
        let service = service();
        let mut menu = new_menu("menu-food", "Mat", "food");
        menu.items.push(titled_item("Toast Skagen"));
        menu.items.push(titled_item("Räkmacka"));
        let created = service.create(&admin(), menu).unwrap();
        let first = created.items[0].id.clone();

        let removed = service.delete_item(&admin(), "menu-food", &first).unwrap();
        assert_eq!(removed.title, "Toast Skagen");
        assert_eq!(service.items("menu-food").unwrap().len(), 1);
    }

    #[test]
    fn delete_and_delete_all() {
        let service = service();
        service
            .create(&admin(), new_menu("menu-food", "Mat", "food"))
            .unwrap();
        service
            .create(&admin(), new_menu("menu-snacks", "Snacks", "food"))
            .unwrap();

        let deleted = service.delete(&admin(), "menu-food").unwrap();
        assert_eq!(deleted.id, "menu-food");

        assert_eq!(service.delete_all(&admin()).unwrap(), 1);
        assert!(service.list_all().unwrap().is_empty());
    }

    #[test]
    fn mutations_require_authentication() {
        let service = service();
        let anon = RequestContext::anonymous();
        assert!(matches!(
            service.create(&anon, new_menu("menu-food", "Mat", "food")),
            Err(CoreError::Unauthorized)
        ));
        assert!(matches!(
            service.delete_all(&anon),
            Err(CoreError::Unauthorized)
        ));
    }
}
