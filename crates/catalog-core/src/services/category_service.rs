// ============================================================================
// Catalog Core - Category Service
// File: crates/catalog-core/src/services/category_service.rs
// ============================================================================
//! Category CRUD; deletion is refused while menu items reference the category

use std::sync::Arc;

use catalog_shared::EntityId;
use tracing::{info, warn};
use validator::Validate;

use crate::domain::{Category, NewCategory};
use crate::error::DomainError;
use crate::repositories::{CategoryRepository, MenuItemRepository};

pub struct CategoryService<C: CategoryRepository, M: MenuItemRepository> {
    category_repo: Arc<C>,
    item_repo: Arc<M>,
}

impl<C: CategoryRepository, M: MenuItemRepository> CategoryService<C, M> {
    pub fn new(category_repo: Arc<C>, item_repo: Arc<M>) -> Self {
        Self {
            category_repo,
            item_repo,
        }
    }

    pub async fn get_category(&self, id: EntityId) -> Result<Category, DomainError> {
        self.category_repo
            .find_by_id(id)
            .await?
            .ok_or(DomainError::CategoryNotFound(id))
    }

    pub async fn list_categories(&self) -> Result<Vec<Category>, DomainError> {
        self.category_repo.find_all().await
    }

    pub async fn find_category_by_name(&self, name: &str) -> Result<Category, DomainError> {
        let name = name.trim();
        self.category_repo
            .find_by_name(name)
            .await?
            .ok_or_else(|| DomainError::CategoryNotFoundByName(name.to_string()))
    }

    pub async fn add_category(&self, payload: NewCategory) -> Result<Category, DomainError> {
        let payload = payload.normalized();
        info!("Adding category: {}", payload.name);

        payload.validate()?;

        if self.category_repo.find_by_name(&payload.name).await?.is_some() {
            warn!("Add failed: category name already exists: {}", payload.name);
            return Err(DomainError::CategoryNameAlreadyExists(payload.name));
        }

        let created = self.category_repo.create(&payload).await?;

        info!("Category created: {} ({})", created.name, created.id);
        Ok(created)
    }

    pub async fn update_category(
        &self,
        id: EntityId,
        payload: NewCategory,
    ) -> Result<Category, DomainError> {
        let payload = payload.normalized();
        info!("Updating category: {}", id);

        payload.validate()?;

        let mut category = self.category_repo.find_by_id(id).await?.ok_or_else(|| {
            warn!("Update failed: category not found: {}", id);
            DomainError::CategoryNotFound(id)
        })?;

        if let Some(existing) = self.category_repo.find_by_name(&payload.name).await? {
            if existing.id != id {
                warn!("Update failed: category name already exists: {}", payload.name);
                return Err(DomainError::CategoryNameAlreadyExists(payload.name));
            }
        }

        category.apply(payload);
        let updated = self.category_repo.update(&category).await?;

        info!("Category updated: {}", id);
        Ok(updated)
    }

    pub async fn delete_category(&self, id: EntityId) -> Result<(), DomainError> {
        if !self.category_repo.exists_by_id(id).await? {
            warn!("Delete failed: category not found: {}", id);
            return Err(DomainError::CategoryNotFound(id));
        }

        let item_count = self.item_repo.count_by_category_id(id).await?;
        if item_count > 0 {
            warn!("Delete failed: category {} still has {} item(s)", id, item_count);
            return Err(DomainError::CategoryInUse { id, item_count });
        }

        self.category_repo.delete(id).await?;

        info!("Category deleted: {}", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::{MockCategoryRepository, MockMenuItemRepository};
    use mockall::predicate::eq;

    fn category(id: EntityId, name: &str) -> Category {
        Category::from_new(id, NewCategory::new(name, None))
    }

    fn service(
        categories: MockCategoryRepository,
        items: MockMenuItemRepository,
    ) -> CategoryService<MockCategoryRepository, MockMenuItemRepository> {
        CategoryService::new(Arc::new(categories), Arc::new(items))
    }

    #[tokio::test]
    async fn test_add_category() {
        let mut categories = MockCategoryRepository::new();
        categories.expect_find_by_name().returning(|_: &str| Ok(None));
        categories
            .expect_create()
            .times(1)
            .returning(|payload: &NewCategory| Ok(Category::from_new(1, payload.clone())));

        let created = service(categories, MockMenuItemRepository::new())
            .add_category(NewCategory::new(" Desserts ", Some("  ".to_string())))
            .await
            .unwrap();

        assert_eq!(created.name, "Desserts");
        assert_eq!(created.description, None);
    }

    #[tokio::test]
    async fn test_add_category_rejects_duplicate_name() {
        let mut categories = MockCategoryRepository::new();
        categories
            .expect_find_by_name()
            .returning(|_: &str| Ok(Some(category(1, "Desserts"))));
        categories.expect_create().never();

        let err = service(categories, MockMenuItemRepository::new())
            .add_category(NewCategory::new("desserts", None))
            .await
            .unwrap_err();

        assert_eq!(err, DomainError::CategoryNameAlreadyExists("desserts".to_string()));
    }

    #[tokio::test]
    async fn test_add_category_rejects_blank_name() {
        let mut categories = MockCategoryRepository::new();
        categories.expect_create().never();

        let err = service(categories, MockMenuItemRepository::new())
            .add_category(NewCategory::new("  ", None))
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::ValidationError(_)));
    }

    #[tokio::test]
    async fn test_update_category_not_found() {
        let mut categories = MockCategoryRepository::new();
        categories.expect_find_by_id().returning(|_| Ok(None));

        let err = service(categories, MockMenuItemRepository::new())
            .update_category(6, NewCategory::new("Sides", None))
            .await
            .unwrap_err();

        assert_eq!(err, DomainError::CategoryNotFound(6));
    }

    #[tokio::test]
    async fn test_update_category_rejects_rename_collision() {
        let mut categories = MockCategoryRepository::new();
        categories
            .expect_find_by_id()
            .returning(|id| Ok(Some(category(id, "Sides"))));
        categories
            .expect_find_by_name()
            .returning(|_: &str| Ok(Some(category(1, "Desserts"))));
        categories.expect_update().never();

        let err = service(categories, MockMenuItemRepository::new())
            .update_category(2, NewCategory::new("Desserts", None))
            .await
            .unwrap_err();

        assert_eq!(err, DomainError::CategoryNameAlreadyExists("Desserts".to_string()));
    }

    #[tokio::test]
    async fn test_delete_category_in_use() {
        let mut categories = MockCategoryRepository::new();
        let mut items = MockMenuItemRepository::new();

        categories.expect_exists_by_id().returning(|_| Ok(true));
        items.expect_count_by_category_id().with(eq(1)).returning(|_| Ok(3));
        categories.expect_delete().never();

        let err = service(categories, items).delete_category(1).await.unwrap_err();

        assert_eq!(err, DomainError::CategoryInUse { id: 1, item_count: 3 });
    }

    #[tokio::test]
    async fn test_delete_empty_category() {
        let mut categories = MockCategoryRepository::new();
        let mut items = MockMenuItemRepository::new();

        categories.expect_exists_by_id().returning(|_| Ok(true));
        items.expect_count_by_category_id().returning(|_| Ok(0));
        categories.expect_delete().with(eq(1)).times(1).returning(|_| Ok(()));

        assert!(service(categories, items).delete_category(1).await.is_ok());
    }

    #[tokio::test]
    async fn test_find_category_by_name_not_found() {
        let mut categories = MockCategoryRepository::new();
        categories.expect_find_by_name().returning(|_: &str| Ok(None));

        let err = service(categories, MockMenuItemRepository::new())
            .find_category_by_name(" Soups ")
            .await
            .unwrap_err();

        assert_eq!(err, DomainError::CategoryNotFoundByName("Soups".to_string()));
    }
}
