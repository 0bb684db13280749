//! Category repository trait (port)

use async_trait::async_trait;
use catalog_shared::EntityId;

use crate::domain::{Category, NewCategory};
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn find_by_id(&self, id: EntityId) -> Result<Option<Category>, DomainError>;
    async fn find_all(&self) -> Result<Vec<Category>, DomainError>;
    /// Case-insensitive exact match.
    async fn find_by_name(&self, name: &str) -> Result<Option<Category>, DomainError>;
    async fn exists_by_id(&self, id: EntityId) -> Result<bool, DomainError>;
    /// Insert; the store assigns the id.
    async fn create(&self, category: &NewCategory) -> Result<Category, DomainError>;
    async fn update(&self, category: &Category) -> Result<Category, DomainError>;
    async fn delete(&self, id: EntityId) -> Result<(), DomainError>;
}
