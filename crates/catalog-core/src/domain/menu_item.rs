// ============================================================================
// Catalog Core - Menu Item Entity
// File: crates/catalog-core/src/domain/menu_item.rs
// Description: Single catalog entry with price and nutrition attributes
// ============================================================================

use catalog_shared::constants::{MAX_CUISINE_TYPE_LENGTH, MAX_DESCRIPTION_LENGTH, MAX_NAME_LENGTH};
use catalog_shared::{AuditFields, EntityId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Menu item entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: EntityId,
    pub name: String,
    pub category_id: EntityId,
    pub price: Decimal,
    pub calories: i32,
    pub preparation_time_minutes: i32,
    pub cuisine_type: String,
    pub vegetarian: bool,
    pub spicy_level: i32,
    pub available: bool,
    pub description: String,

    #[serde(flatten)]
    pub audit: AuditFields,
}

/// Payload for creating or replacing a menu item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct NewMenuItem {
    #[validate(length(min = 1, max = MAX_NAME_LENGTH, message = "Item name must be between 1 and 100 characters"))]
    pub name: String,

    pub category_id: EntityId,

    #[validate(custom(function = "validate_price"))]
    pub price: Decimal,

    #[validate(range(min = 0, message = "Calories cannot be negative"))]
    #[serde(default)]
    pub calories: i32,

    #[validate(range(min = 0, message = "Preparation time cannot be negative"))]
    #[serde(default)]
    pub preparation_time_minutes: i32,

    #[validate(length(max = MAX_CUISINE_TYPE_LENGTH, message = "Cuisine type too long"))]
    #[serde(default)]
    pub cuisine_type: String,

    #[serde(default)]
    pub vegetarian: bool,

    #[validate(range(min = 0, message = "Spicy level cannot be negative"))]
    #[serde(default)]
    pub spicy_level: i32,

    #[serde(default = "default_available")]
    pub available: bool,

    #[validate(length(max = MAX_DESCRIPTION_LENGTH, message = "Description too long"))]
    #[serde(default)]
    pub description: String,
}

fn default_available() -> bool {
    true
}

fn validate_price(price: &Decimal) -> Result<(), ValidationError> {
    if *price < Decimal::ZERO {
        let mut err = ValidationError::new("negative_price");
        err.message = Some("Price cannot be negative".into());
        return Err(err);
    }
    Ok(())
}

impl NewMenuItem {
    /// Minimal payload; the remaining attributes start at their neutral values.
    pub fn new(name: impl Into<String>, category_id: EntityId, price: Decimal) -> Self {
        Self {
            name: name.into(),
            category_id,
            price,
            calories: 0,
            preparation_time_minutes: 0,
            cuisine_type: String::new(),
            vegetarian: false,
            spicy_level: 0,
            available: default_available(),
            description: String::new(),
        }
    }

    pub fn normalized(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            cuisine_type: self.cuisine_type.trim().to_string(),
            description: self.description.trim().to_string(),
            ..self
        }
    }
}

impl MenuItem {
    pub fn from_new(id: EntityId, payload: NewMenuItem) -> Self {
        Self {
            id,
            name: payload.name,
            category_id: payload.category_id,
            price: payload.price,
            calories: payload.calories,
            preparation_time_minutes: payload.preparation_time_minutes,
            cuisine_type: payload.cuisine_type,
            vegetarian: payload.vegetarian,
            spicy_level: payload.spicy_level,
            available: payload.available,
            description: payload.description,
            audit: AuditFields::default(),
        }
    }

    /// Editable fields as a payload, for re-running payload validation.
    pub fn to_payload(&self) -> NewMenuItem {
        NewMenuItem {
            name: self.name.clone(),
            category_id: self.category_id,
            price: self.price,
            calories: self.calories,
            preparation_time_minutes: self.preparation_time_minutes,
            cuisine_type: self.cuisine_type.clone(),
            vegetarian: self.vegetarian,
            spicy_level: self.spicy_level,
            available: self.available,
            description: self.description.clone(),
        }
    }

    /// Replace every editable field, keeping identity and creation time.
    pub fn apply(&mut self, payload: NewMenuItem) {
        let audit = self.audit.touched();
        *self = Self {
            audit,
            ..Self::from_new(self.id, payload)
        };
    }
}
