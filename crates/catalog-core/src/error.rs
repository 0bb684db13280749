//! Domain errors

use catalog_shared::EntityId;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Menu item not found: {0}")]
    MenuItemNotFound(EntityId),

    #[error("Menu item name already exists: {0}")]
    MenuItemNameAlreadyExists(String),

    #[error("Category not found: {0}")]
    CategoryNotFound(EntityId),

    #[error("Category not found: {0}")]
    CategoryNotFoundByName(String),

    #[error("Category name already exists: {0}")]
    CategoryNameAlreadyExists(String),

    #[error("Category {id} still has {item_count} menu item(s)")]
    CategoryInUse { id: EntityId, item_count: u64 },

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Persistence error: {0}")]
    PersistenceError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Response class a transport should answer with for a given error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    NotFound,
    BadRequest,
    Conflict,
    ServerError,
}

impl StatusClass {
    pub fn as_u16(&self) -> u16 {
        match self {
            StatusClass::NotFound => 404,
            StatusClass::BadRequest => 400,
            StatusClass::Conflict => 409,
            StatusClass::ServerError => 500,
        }
    }
}

impl DomainError {
    pub fn status_class(&self) -> StatusClass {
        match self {
            DomainError::MenuItemNotFound(_)
            | DomainError::CategoryNotFound(_)
            | DomainError::CategoryNotFoundByName(_) => StatusClass::NotFound,
            DomainError::MenuItemNameAlreadyExists(_)
            | DomainError::CategoryNameAlreadyExists(_)
            | DomainError::CategoryInUse { .. } => StatusClass::Conflict,
            DomainError::ValidationError(_) => StatusClass::BadRequest,
            DomainError::PersistenceError(_) | DomainError::InternalError(_) => {
                StatusClass::ServerError
            }
        }
    }
}

impl From<validator::ValidationErrors> for DomainError {
    fn from(errors: validator::ValidationErrors) -> Self {
        DomainError::ValidationError(errors.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_classes() {
        assert_eq!(DomainError::MenuItemNotFound(7).status_class(), StatusClass::NotFound);
        assert_eq!(
            DomainError::CategoryInUse { id: 1, item_count: 2 }.status_class(),
            StatusClass::Conflict
        );
        assert_eq!(
            DomainError::ValidationError("price".into()).status_class().as_u16(),
            400
        );
        assert_eq!(
            DomainError::PersistenceError("disk full".into()).status_class().as_u16(),
            500
        );
    }
}
