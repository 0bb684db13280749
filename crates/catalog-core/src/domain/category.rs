// ============================================================================
// Catalog Core - Category Entity
// File: crates/catalog-core/src/domain/category.rs
// Description: Named grouping of menu items
// ============================================================================

use catalog_shared::constants::{MAX_DESCRIPTION_LENGTH, MAX_NAME_LENGTH};
use catalog_shared::{AuditFields, EntityId};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Category entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: EntityId,
    pub name: String,
    pub description: Option<String>,

    #[serde(flatten)]
    pub audit: AuditFields,
}

/// Payload for creating or replacing a category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct NewCategory {
    #[validate(length(min = 1, max = MAX_NAME_LENGTH, message = "Category name must be between 1 and 100 characters"))]
    pub name: String,

    #[validate(length(max = MAX_DESCRIPTION_LENGTH, message = "Description too long"))]
    #[serde(default)]
    pub description: Option<String>,
}

impl NewCategory {
    pub fn new(name: impl Into<String>, description: Option<String>) -> Self {
        Self {
            name: name.into(),
            description,
        }
    }

    /// Trim text fields; blank descriptions become `None`.
    pub fn normalized(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            description: self
                .description
                .map(|d| d.trim().to_string())
                .filter(|d| !d.is_empty()),
        }
    }
}

impl Category {
    pub fn from_new(id: EntityId, payload: NewCategory) -> Self {
        Self {
            id,
            name: payload.name,
            description: payload.description,
            audit: AuditFields::default(),
        }
    }

    pub fn to_payload(&self) -> NewCategory {
        NewCategory::new(self.name.clone(), self.description.clone())
    }

    /// Replace every editable field, keeping identity and creation time.
    pub fn apply(&mut self, payload: NewCategory) {
        self.name = payload.name;
        self.description = payload.description;
        self.audit = self.audit.touched();
    }
}
