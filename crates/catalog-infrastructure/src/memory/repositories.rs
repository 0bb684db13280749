// ============================================================================
// Catalog Infrastructure - In-Memory Repositories
// File: crates/catalog-infrastructure/src/memory/repositories.rs
// ============================================================================

use async_trait::async_trait;
use tracing::{debug, info};

use catalog_core::domain::{Category, MenuItem, NewCategory, NewMenuItem};
use catalog_core::error::DomainError;
use catalog_core::repositories::{CategoryRepository, MenuItemRepository};
use catalog_shared::EntityId;

use super::catalog::MemoryCatalog;

pub struct MemoryMenuItemRepository {
    catalog: MemoryCatalog,
}

impl MemoryMenuItemRepository {
    pub fn new(catalog: MemoryCatalog) -> Self {
        Self { catalog }
    }
}

#[async_trait]
impl MenuItemRepository for MemoryMenuItemRepository {
    async fn find_by_id(&self, id: EntityId) -> Result<Option<MenuItem>, DomainError> {
        Ok(self.catalog.read(|s| s.menu_items.get(&id).cloned()).await)
    }

    async fn find_all(&self) -> Result<Vec<MenuItem>, DomainError> {
        Ok(self
            .catalog
            .read(|s| s.menu_items.values().cloned().collect())
            .await)
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<MenuItem>, DomainError> {
        Ok(self.catalog.read(|s| s.find_item_by_name(name).cloned()).await)
    }

    async fn find_by_category_id(&self, category_id: EntityId) -> Result<Vec<MenuItem>, DomainError> {
        Ok(self
            .catalog
            .read(|s| s.items_in_category(category_id).cloned().collect())
            .await)
    }

    async fn count_by_category_id(&self, category_id: EntityId) -> Result<u64, DomainError> {
        Ok(self
            .catalog
            .read(|s| s.items_in_category(category_id).count() as u64)
            .await)
    }

    async fn exists_by_id(&self, id: EntityId) -> Result<bool, DomainError> {
        Ok(self.catalog.read(|s| s.menu_items.contains_key(&id)).await)
    }

    async fn create(&self, item: &NewMenuItem) -> Result<MenuItem, DomainError> {
        let created = self.catalog.mutate(|s| s.insert_item(item)).await?;
        info!("Menu item stored in memory: {}", created.id);
        Ok(created)
    }

    async fn update(&self, item: &MenuItem) -> Result<MenuItem, DomainError> {
        self.catalog.mutate(|s| s.replace_item(item)).await
    }

    async fn delete(&self, id: EntityId) -> Result<(), DomainError> {
        self.catalog.mutate(|s| s.remove_item(id)).await?;
        debug!("Menu item removed from memory: {}", id);
        Ok(())
    }
}

pub struct MemoryCategoryRepository {
    catalog: MemoryCatalog,
}

impl MemoryCategoryRepository {
    pub fn new(catalog: MemoryCatalog) -> Self {
        Self { catalog }
    }
}

#[async_trait]
impl CategoryRepository for MemoryCategoryRepository {
    async fn find_by_id(&self, id: EntityId) -> Result<Option<Category>, DomainError> {
        Ok(self.catalog.read(|s| s.categories.get(&id).cloned()).await)
    }

    async fn find_all(&self) -> Result<Vec<Category>, DomainError> {
        Ok(self
            .catalog
            .read(|s| s.categories.values().cloned().collect())
            .await)
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Category>, DomainError> {
        Ok(self
            .catalog
            .read(|s| s.find_category_by_name(name).cloned())
            .await)
    }

    async fn exists_by_id(&self, id: EntityId) -> Result<bool, DomainError> {
        Ok(self.catalog.read(|s| s.categories.contains_key(&id)).await)
    }

    async fn create(&self, category: &NewCategory) -> Result<Category, DomainError> {
        let created = self.catalog.mutate(|s| s.insert_category(category)).await?;
        info!("Category stored in memory: {}", created.id);
        Ok(created)
    }

    async fn update(&self, category: &Category) -> Result<Category, DomainError> {
        self.catalog.mutate(|s| s.replace_category(category)).await
    }

    async fn delete(&self, id: EntityId) -> Result<(), DomainError> {
        self.catalog.mutate(|s| s.remove_category(id)).await?;
        debug!("Category removed from memory: {}", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn test_repositories_share_one_catalog() {
        let catalog = MemoryCatalog::new();
        let categories = catalog.categories();
        let items = catalog.menu_items();

        let beverages = categories
            .create(&NewCategory::new("Beverages", None))
            .await
            .unwrap();
        items
            .create(&NewMenuItem::new("Cola", beverages.id, dec!(2.50)))
            .await
            .unwrap();

        assert_eq!(items.count_by_category_id(beverages.id).await.unwrap(), 1);
        assert_eq!(
            categories.delete(beverages.id).await.unwrap_err(),
            DomainError::CategoryInUse { id: beverages.id, item_count: 1 }
        );
    }

    #[tokio::test]
    async fn test_update_unknown_item() {
        let catalog = MemoryCatalog::new();
        let ghost = MenuItem::from_new(12, NewMenuItem::new("Ghost", 1, dec!(1.00)));

        let err = catalog.menu_items().update(&ghost).await.unwrap_err();
        assert_eq!(err, DomainError::MenuItemNotFound(12));
    }

    #[tokio::test]
    async fn test_failed_snapshot_write_rolls_back() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = MemoryCatalog::with_snapshot(dir.path().join("missing").join("catalog.json"))
            .await
            .unwrap();

        let err = catalog
            .categories()
            .create(&NewCategory::new("Beverages", None))
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::PersistenceError(_)));
        assert!(catalog.categories().find_all().await.unwrap().is_empty());
        assert_eq!(catalog.state().await.last_category_id, 0);
    }
}
