// ============================================================================
// Catalog Core - Menu Item Service
// File: crates/catalog-core/src/services/menu_item_service.rs
// ============================================================================
//! Menu item CRUD with name uniqueness and category validation

use std::sync::Arc;

use catalog_shared::EntityId;
use tracing::{debug, info, warn};
use validator::Validate;

use crate::domain::{MenuItem, NewMenuItem};
use crate::error::DomainError;
use crate::repositories::{CategoryRepository, MenuItemRepository};

/// Menu item operations of the catalog store
pub struct MenuItemService<M: MenuItemRepository, C: CategoryRepository> {
    item_repo: Arc<M>,
    category_repo: Arc<C>,
}

impl<M: MenuItemRepository, C: CategoryRepository> MenuItemService<M, C> {
    pub fn new(item_repo: Arc<M>, category_repo: Arc<C>) -> Self {
        Self {
            item_repo,
            category_repo,
        }
    }

    pub async fn get_item(&self, id: EntityId) -> Result<MenuItem, DomainError> {
        self.item_repo
            .find_by_id(id)
            .await?
            .ok_or(DomainError::MenuItemNotFound(id))
    }

    pub async fn list_items(&self) -> Result<Vec<MenuItem>, DomainError> {
        self.item_repo.find_all().await
    }

    /// Items of the category named `category_name`. With `case_insensitive`
    /// unset the stored name must match exactly. An unknown category yields
    /// an empty list.
    pub async fn list_items_by_category(
        &self,
        category_name: &str,
        case_insensitive: bool,
    ) -> Result<Vec<MenuItem>, DomainError> {
        let name = category_name.trim();
        let category = self
            .category_repo
            .find_by_name(name)
            .await?
            .filter(|c| case_insensitive || c.name == name);

        match category {
            Some(category) => self.item_repo.find_by_category_id(category.id).await,
            None => {
                debug!("No category named {}", category_name);
                Ok(Vec::new())
            }
        }
    }

    /// Add a new menu item
    pub async fn add_item(&self, payload: NewMenuItem) -> Result<MenuItem, DomainError> {
        let payload = payload.normalized();
        info!("Adding menu item: {}", payload.name);

        // 1. Validate payload
        payload.validate()?;

        // 2. Referenced category must exist
        self.ensure_category_exists(payload.category_id).await?;

        // 3. Check name uniqueness
        if self.item_repo.find_by_name(&payload.name).await?.is_some() {
            warn!("Add failed: menu item name already exists: {}", payload.name);
            return Err(DomainError::MenuItemNameAlreadyExists(payload.name));
        }

        // 4. Persist
        let created = self.item_repo.create(&payload).await?;

        info!("Menu item created: {} ({})", created.name, created.id);
        Ok(created)
    }

    /// Replace all fields of the item with the given id
    pub async fn update_item(
        &self,
        id: EntityId,
        payload: NewMenuItem,
    ) -> Result<MenuItem, DomainError> {
        let payload = payload.normalized();
        info!("Updating menu item: {}", id);

        payload.validate()?;

        let mut item = self.item_repo.find_by_id(id).await?.ok_or_else(|| {
            warn!("Update failed: menu item not found: {}", id);
            DomainError::MenuItemNotFound(id)
        })?;

        self.ensure_category_exists(payload.category_id).await?;

        // Renaming onto a different item's name is a collision; keeping the
        // own name (in any case) is not.
        if let Some(existing) = self.item_repo.find_by_name(&payload.name).await? {
            if existing.id != id {
                warn!("Update failed: menu item name already exists: {}", payload.name);
                return Err(DomainError::MenuItemNameAlreadyExists(payload.name));
            }
        }

        item.apply(payload);
        let updated = self.item_repo.update(&item).await?;

        info!("Menu item updated: {}", id);
        Ok(updated)
    }

    pub async fn delete_item(&self, id: EntityId) -> Result<(), DomainError> {
        if !self.item_repo.exists_by_id(id).await? {
            warn!("Delete failed: menu item not found: {}", id);
            return Err(DomainError::MenuItemNotFound(id));
        }

        self.item_repo.delete(id).await?;

        info!("Menu item deleted: {}", id);
        Ok(())
    }

    async fn ensure_category_exists(&self, category_id: EntityId) -> Result<(), DomainError> {
        if self.category_repo.exists_by_id(category_id).await? {
            Ok(())
        } else {
            warn!("Category not found: {}", category_id);
            Err(DomainError::CategoryNotFound(category_id))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Category, NewCategory};
    use crate::repositories::{MockCategoryRepository, MockMenuItemRepository};
    use mockall::predicate::eq;
    use rust_decimal_macros::dec;

    fn beverages() -> Category {
        Category::from_new(1, NewCategory::new("Beverages", None))
    }

    fn cola(id: EntityId) -> MenuItem {
        MenuItem::from_new(id, NewMenuItem::new("Cola", 1, dec!(2.50)))
    }

    fn service(
        items: MockMenuItemRepository,
        categories: MockCategoryRepository,
    ) -> MenuItemService<MockMenuItemRepository, MockCategoryRepository> {
        MenuItemService::new(Arc::new(items), Arc::new(categories))
    }

    #[tokio::test]
    async fn test_get_item_not_found() {
        let mut items = MockMenuItemRepository::new();
        items.expect_find_by_id().with(eq(42)).returning(|_| Ok(None));

        let err = service(items, MockCategoryRepository::new())
            .get_item(42)
            .await
            .unwrap_err();

        assert_eq!(err, DomainError::MenuItemNotFound(42));
    }

    #[tokio::test]
    async fn test_add_item_persists_normalized_payload() {
        let mut items = MockMenuItemRepository::new();
        let mut categories = MockCategoryRepository::new();

        categories.expect_exists_by_id().with(eq(1)).returning(|_| Ok(true));
        items.expect_find_by_name().returning(|_: &str| Ok(None));
        items
            .expect_create()
            .withf(|payload: &NewMenuItem| payload.name == "Cola")
            .times(1)
            .returning(|payload: &NewMenuItem| Ok(MenuItem::from_new(5, payload.clone())));

        let created = service(items, categories)
            .add_item(NewMenuItem::new("  Cola  ", 1, dec!(2.50)))
            .await
            .unwrap();

        assert_eq!(created.id, 5);
        assert_eq!(created.name, "Cola");
    }

    #[tokio::test]
    async fn test_add_item_rejects_duplicate_name() {
        let mut items = MockMenuItemRepository::new();
        let mut categories = MockCategoryRepository::new();

        categories.expect_exists_by_id().returning(|_| Ok(true));
        items.expect_find_by_name().returning(|_: &str| Ok(Some(cola(1))));
        items.expect_create().never();

        let err = service(items, categories)
            .add_item(NewMenuItem::new("COLA", 1, dec!(3.00)))
            .await
            .unwrap_err();

        assert_eq!(err, DomainError::MenuItemNameAlreadyExists("COLA".to_string()));
    }

    #[tokio::test]
    async fn test_add_item_rejects_missing_category() {
        let mut items = MockMenuItemRepository::new();
        let mut categories = MockCategoryRepository::new();

        categories.expect_exists_by_id().with(eq(99)).returning(|_| Ok(false));
        items.expect_create().never();

        let err = service(items, categories)
            .add_item(NewMenuItem::new("Cola", 99, dec!(2.50)))
            .await
            .unwrap_err();

        assert_eq!(err, DomainError::CategoryNotFound(99));
    }

    #[tokio::test]
    async fn test_add_item_rejects_invalid_payload_before_lookups() {
        let mut items = MockMenuItemRepository::new();
        let mut categories = MockCategoryRepository::new();
        categories.expect_exists_by_id().never();
        items.expect_create().never();

        let err = service(items, categories)
            .add_item(NewMenuItem::new("Cola", 1, dec!(-1)))
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::ValidationError(_)));
    }

    #[tokio::test]
    async fn test_update_item_not_found() {
        let mut items = MockMenuItemRepository::new();
        items.expect_find_by_id().returning(|_| Ok(None));
        items.expect_update().never();

        let err = service(items, MockCategoryRepository::new())
            .update_item(8, NewMenuItem::new("Cola", 1, dec!(2.50)))
            .await
            .unwrap_err();

        assert_eq!(err, DomainError::MenuItemNotFound(8));
    }

    #[tokio::test]
    async fn test_update_item_rejects_rename_onto_other_item() {
        let mut items = MockMenuItemRepository::new();
        let mut categories = MockCategoryRepository::new();

        items.expect_find_by_id().returning(|id| {
            Ok(Some(MenuItem::from_new(id, NewMenuItem::new("Lemonade", 1, dec!(3.00)))))
        });
        categories.expect_exists_by_id().returning(|_| Ok(true));
        items.expect_find_by_name().returning(|_: &str| Ok(Some(cola(1))));
        items.expect_update().never();

        let err = service(items, categories)
            .update_item(2, NewMenuItem::new("cola", 1, dec!(3.00)))
            .await
            .unwrap_err();

        assert_eq!(err, DomainError::MenuItemNameAlreadyExists("cola".to_string()));
    }

    #[tokio::test]
    async fn test_update_item_allows_keeping_own_name() {
        let mut items = MockMenuItemRepository::new();
        let mut categories = MockCategoryRepository::new();

        items.expect_find_by_id().returning(|id| Ok(Some(cola(id))));
        categories.expect_exists_by_id().returning(|_| Ok(true));
        items.expect_find_by_name().returning(|_: &str| Ok(Some(cola(1))));
        items
            .expect_update()
            .times(1)
            .returning(|item: &MenuItem| Ok(item.clone()));

        let updated = service(items, categories)
            .update_item(1, NewMenuItem::new("COLA", 1, dec!(2.75)))
            .await
            .unwrap();

        assert_eq!(updated.id, 1);
        assert_eq!(updated.name, "COLA");
        assert_eq!(updated.price, dec!(2.75));
    }

    #[tokio::test]
    async fn test_update_item_rejects_missing_category() {
        let mut items = MockMenuItemRepository::new();
        let mut categories = MockCategoryRepository::new();

        items.expect_find_by_id().returning(|id| Ok(Some(cola(id))));
        categories.expect_exists_by_id().with(eq(3)).returning(|_| Ok(false));
        items.expect_update().never();

        let err = service(items, categories)
            .update_item(1, NewMenuItem::new("Cola", 3, dec!(2.50)))
            .await
            .unwrap_err();

        assert_eq!(err, DomainError::CategoryNotFound(3));
    }

    #[tokio::test]
    async fn test_delete_item_not_found() {
        let mut items = MockMenuItemRepository::new();
        items.expect_exists_by_id().returning(|_| Ok(false));
        items.expect_delete().never();

        let err = service(items, MockCategoryRepository::new())
            .delete_item(4)
            .await
            .unwrap_err();

        assert_eq!(err, DomainError::MenuItemNotFound(4));
    }

    #[tokio::test]
    async fn test_list_items_by_unknown_category_is_empty() {
        let mut items = MockMenuItemRepository::new();
        let mut categories = MockCategoryRepository::new();

        categories.expect_find_by_name().returning(|_: &str| Ok(None));
        items.expect_find_by_category_id().never();

        let listed = service(items, categories)
            .list_items_by_category("Desserts", true)
            .await
            .unwrap();

        assert!(listed.is_empty());
    }

    #[tokio::test]
    async fn test_list_items_by_category_resolves_name() {
        let mut items = MockMenuItemRepository::new();
        let mut categories = MockCategoryRepository::new();

        categories
            .expect_find_by_name()
            .withf(|name: &str| name == "BEVERAGES")
            .returning(|_: &str| Ok(Some(beverages())));
        let expected = cola(1);
        let stored = expected.clone();
        items
            .expect_find_by_category_id()
            .with(eq(1))
            .returning(move |_| Ok(vec![stored.clone()]));

        let listed = service(items, categories)
            .list_items_by_category(" BEVERAGES ", true)
            .await
            .unwrap();

        assert_eq!(listed, vec![expected]);
    }

    #[tokio::test]
    async fn test_list_items_by_category_case_sensitive() {
        let mut items = MockMenuItemRepository::new();
        let mut categories = MockCategoryRepository::new();

        categories
            .expect_find_by_name()
            .returning(|_: &str| Ok(Some(beverages())));
        items
            .expect_find_by_category_id()
            .with(eq(1))
            .times(1)
            .returning(|_| Ok(vec![cola(1)]));
        let service = service(items, categories);

        assert!(service
            .list_items_by_category("BEVERAGES", false)
            .await
            .unwrap()
            .is_empty());
        assert_eq!(
            service.list_items_by_category("Beverages", false).await.unwrap().len(),
            1
        );
    }
}
