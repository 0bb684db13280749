//! PostgreSQL repository implementations

pub mod category_repo_impl;
pub mod menu_item_repo_impl;

pub use category_repo_impl::PgCategoryRepository;
pub use menu_item_repo_impl::PgMenuItemRepository;

use catalog_core::error::DomainError;

pub(crate) fn is_unique_violation(e: &sqlx::Error) -> bool {
    e.as_database_error()
        .map_or(false, |db| db.is_unique_violation())
}

pub(crate) fn is_foreign_key_violation(e: &sqlx::Error) -> bool {
    e.as_database_error()
        .map_or(false, |db| db.is_foreign_key_violation())
}

pub(crate) fn persistence_error(e: sqlx::Error) -> DomainError {
    DomainError::PersistenceError(e.to_string())
}
