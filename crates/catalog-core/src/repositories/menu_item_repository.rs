//! Menu item repository trait (port)

use async_trait::async_trait;
use catalog_shared::EntityId;

use crate::domain::{MenuItem, NewMenuItem};
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MenuItemRepository: Send + Sync {
    async fn find_by_id(&self, id: EntityId) -> Result<Option<MenuItem>, DomainError>;
    async fn find_all(&self) -> Result<Vec<MenuItem>, DomainError>;
    /// Case-insensitive exact match.
    async fn find_by_name(&self, name: &str) -> Result<Option<MenuItem>, DomainError>;
    async fn find_by_category_id(&self, category_id: EntityId) -> Result<Vec<MenuItem>, DomainError>;
    async fn count_by_category_id(&self, category_id: EntityId) -> Result<u64, DomainError>;
    async fn exists_by_id(&self, id: EntityId) -> Result<bool, DomainError>;
    /// Insert; the store assigns the id.
    async fn create(&self, item: &NewMenuItem) -> Result<MenuItem, DomainError>;
    async fn update(&self, item: &MenuItem) -> Result<MenuItem, DomainError>;
    async fn delete(&self, id: EntityId) -> Result<(), DomainError>;
}
