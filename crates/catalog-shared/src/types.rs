//! Common types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Store-assigned identity of menu items and categories.
pub type EntityId = i64;

/// Creation / modification stamps carried by every persisted record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditFields {
    pub created_at: DateTime<Utc>,
    pub modified_at: Option<DateTime<Utc>>,
}

impl AuditFields {
    pub fn touched(self) -> Self {
        Self {
            created_at: self.created_at,
            modified_at: Some(Utc::now()),
        }
    }
}

impl Default for AuditFields {
    fn default() -> Self {
        Self {
            created_at: Utc::now(),
            modified_at: None,
        }
    }
}

/// Canonical form of a name for uniqueness checks. Every store compares
/// names through this key, including the `name_key` columns in PostgreSQL.
pub fn name_key(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Case-insensitive comparison used for every name uniqueness check.
pub fn names_match(a: &str, b: &str) -> bool {
    name_key(a) == name_key(b)
}
