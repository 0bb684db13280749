// ============================================================================
// Catalog Infrastructure - JSON Snapshot File
// File: crates/catalog-infrastructure/src/memory/snapshot.rs
// ============================================================================

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use catalog_core::error::DomainError;
use tracing::{error, info};

use super::state::CatalogState;

/// Durable copy of the in-memory catalog. Writes go to a sibling temp file
/// which is then renamed over the snapshot.
#[derive(Debug, Clone)]
pub struct SnapshotFile {
    path: PathBuf,
}

impl SnapshotFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "catalog".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    /// `Ok(None)` when no snapshot has been written yet.
    pub async fn load(&self) -> Result<Option<CatalogState>, DomainError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                error!("Failed to read snapshot {}: {}", self.path.display(), e);
                return Err(DomainError::PersistenceError(e.to_string()));
            }
        };

        let state: CatalogState = serde_json::from_slice(&bytes).map_err(|e| {
            error!("Malformed snapshot {}: {}", self.path.display(), e);
            DomainError::PersistenceError(e.to_string())
        })?;
        state.validate().inspect_err(|e| {
            error!("Rejected snapshot {}: {}", self.path.display(), e);
        })?;

        info!(
            "Loaded snapshot {}: {} categories, {} menu items",
            self.path.display(),
            state.categories.len(),
            state.menu_items.len()
        );
        Ok(Some(state))
    }

    pub async fn write(&self, state: &CatalogState) -> Result<(), DomainError> {
        let bytes = serde_json::to_vec_pretty(state)
            .map_err(|e| DomainError::PersistenceError(e.to_string()))?;

        let temp = self.temp_path();
        if let Err(e) = tokio::fs::write(&temp, &bytes).await {
            error!("Failed to write snapshot {}: {}", temp.display(), e);
            return Err(DomainError::PersistenceError(e.to_string()));
        }
        if let Err(e) = tokio::fs::rename(&temp, &self.path).await {
            error!("Failed to replace snapshot {}: {}", self.path.display(), e);
            let _ = tokio::fs::remove_file(&temp).await;
            return Err(DomainError::PersistenceError(e.to_string()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_core::domain::NewCategory;

    #[tokio::test]
    async fn test_missing_snapshot_loads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let snapshot = SnapshotFile::new(dir.path().join("catalog.json"));
        assert_eq!(snapshot.load().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_write_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let snapshot = SnapshotFile::new(dir.path().join("catalog.json"));

        let mut state = CatalogState::default();
        state
            .insert_category(&NewCategory::new("Desserts", None))
            .unwrap();
        snapshot.write(&state).await.unwrap();

        assert_eq!(snapshot.load().await.unwrap(), Some(state));
        assert!(!snapshot.temp_path().exists());
    }

    #[tokio::test]
    async fn test_inconsistent_snapshot_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        let json = r#"{
            "menu_items": {
                "5": {
                    "id": 9, "name": "Cola", "category_id": 77, "price": "-3",
                    "calories": 0, "preparation_time_minutes": 0, "cuisine_type": "",
                    "vegetarian": false, "spicy_level": 0, "available": true,
                    "description": "", "created_at": "2024-01-01T00:00:00Z", "modified_at": null
                }
            }
        }"#;
        std::fs::write(&path, json).unwrap();

        let err = SnapshotFile::new(path).load().await.unwrap_err();
        assert!(matches!(err, DomainError::PersistenceError(_)));
    }

    #[tokio::test]
    async fn test_malformed_snapshot_is_a_persistence_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        std::fs::write(&path, b"{ not json").unwrap();

        let err = SnapshotFile::new(path).load().await.unwrap_err();
        assert!(matches!(err, DomainError::PersistenceError(_)));
    }
}
