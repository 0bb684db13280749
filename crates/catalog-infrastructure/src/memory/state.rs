//! In-process catalog state; also the on-disk snapshot format

use std::collections::{BTreeMap, HashSet};

use catalog_core::domain::{Category, MenuItem, NewCategory, NewMenuItem};
use catalog_core::error::DomainError;
use catalog_shared::{name_key, names_match, EntityId};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogState {
    #[serde(default)]
    pub categories: BTreeMap<EntityId, Category>,
    #[serde(default)]
    pub menu_items: BTreeMap<EntityId, MenuItem>,
    /// Highest category id handed out so far
    #[serde(default)]
    pub last_category_id: EntityId,
    /// Highest menu item id handed out so far
    #[serde(default)]
    pub last_item_id: EntityId,
}

fn next_id(counter: &mut EntityId, highest_key: Option<&EntityId>) -> EntityId {
    *counter = (*counter).max(highest_key.copied().unwrap_or(0)) + 1;
    *counter
}

fn corrupt(detail: String) -> DomainError {
    DomainError::PersistenceError(format!("Invalid catalog snapshot: {detail}"))
}

impl CatalogState {
    /// Check the invariants the store maintains on every mutation: map keys
    /// equal record ids, names are unique per collection, items point at an
    /// existing category and every record passes payload validation.
    pub fn validate(&self) -> Result<(), DomainError> {
        let mut category_names = HashSet::new();
        for (key, category) in &self.categories {
            if *key != category.id {
                return Err(corrupt(format!("category key {} holds id {}", key, category.id)));
            }
            category
                .to_payload()
                .normalized()
                .validate()
                .map_err(|e| corrupt(format!("category {}: {}", key, e)))?;
            if !category_names.insert(name_key(&category.name)) {
                return Err(corrupt(format!("duplicate category name {}", category.name)));
            }
        }

        let mut item_names = HashSet::new();
        for (key, item) in &self.menu_items {
            if *key != item.id {
                return Err(corrupt(format!("menu item key {} holds id {}", key, item.id)));
            }
            item.to_payload()
                .normalized()
                .validate()
                .map_err(|e| corrupt(format!("menu item {}: {}", key, e)))?;
            if !self.categories.contains_key(&item.category_id) {
                return Err(corrupt(format!(
                    "menu item {} references missing category {}",
                    key, item.category_id
                )));
            }
            if !item_names.insert(name_key(&item.name)) {
                return Err(corrupt(format!("duplicate menu item name {}", item.name)));
            }
        }

        Ok(())
    }

    pub fn find_category_by_name(&self, name: &str) -> Option<&Category> {
        self.categories.values().find(|c| names_match(&c.name, name))
    }

    pub fn find_item_by_name(&self, name: &str) -> Option<&MenuItem> {
        self.menu_items.values().find(|i| names_match(&i.name, name))
    }

    pub fn items_in_category(&self, category_id: EntityId) -> impl Iterator<Item = &MenuItem> {
        self.menu_items
            .values()
            .filter(move |i| i.category_id == category_id)
    }

    pub fn insert_category(&mut self, payload: &NewCategory) -> Result<Category, DomainError> {
        if self.find_category_by_name(&payload.name).is_some() {
            return Err(DomainError::CategoryNameAlreadyExists(payload.name.clone()));
        }

        let id = next_id(&mut self.last_category_id, self.categories.keys().next_back());
        let category = Category::from_new(id, payload.clone());
        self.categories.insert(id, category.clone());
        Ok(category)
    }

    pub fn replace_category(&mut self, category: &Category) -> Result<Category, DomainError> {
        if !self.categories.contains_key(&category.id) {
            return Err(DomainError::CategoryNotFound(category.id));
        }
        if let Some(existing) = self.find_category_by_name(&category.name) {
            if existing.id != category.id {
                return Err(DomainError::CategoryNameAlreadyExists(category.name.clone()));
            }
        }

        self.categories.insert(category.id, category.clone());
        Ok(category.clone())
    }

    pub fn remove_category(&mut self, id: EntityId) -> Result<(), DomainError> {
        if !self.categories.contains_key(&id) {
            return Err(DomainError::CategoryNotFound(id));
        }
        let item_count = self.items_in_category(id).count() as u64;
        if item_count > 0 {
            return Err(DomainError::CategoryInUse { id, item_count });
        }

        self.categories.remove(&id);
        Ok(())
    }

    pub fn insert_item(&mut self, payload: &NewMenuItem) -> Result<MenuItem, DomainError> {
        if !self.categories.contains_key(&payload.category_id) {
            return Err(DomainError::CategoryNotFound(payload.category_id));
        }
        if self.find_item_by_name(&payload.name).is_some() {
            return Err(DomainError::MenuItemNameAlreadyExists(payload.name.clone()));
        }

        let id = next_id(&mut self.last_item_id, self.menu_items.keys().next_back());
        let item = MenuItem::from_new(id, payload.clone());
        self.menu_items.insert(id, item.clone());
        Ok(item)
    }

    pub fn replace_item(&mut self, item: &MenuItem) -> Result<MenuItem, DomainError> {
        if !self.menu_items.contains_key(&item.id) {
            return Err(DomainError::MenuItemNotFound(item.id));
        }
        if !self.categories.contains_key(&item.category_id) {
            return Err(DomainError::CategoryNotFound(item.category_id));
        }
        if let Some(existing) = self.find_item_by_name(&item.name) {
            if existing.id != item.id {
                return Err(DomainError::MenuItemNameAlreadyExists(item.name.clone()));
            }
        }

        self.menu_items.insert(item.id, item.clone());
        Ok(item.clone())
    }

    pub fn remove_item(&mut self, id: EntityId) -> Result<(), DomainError> {
        self.menu_items
            .remove(&id)
            .map(|_| ())
            .ok_or(DomainError::MenuItemNotFound(id))
    }
}
