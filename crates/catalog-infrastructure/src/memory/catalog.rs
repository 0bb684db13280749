// ============================================================================
// Catalog Infrastructure - In-Memory Catalog
// File: crates/catalog-infrastructure/src/memory/catalog.rs
// ============================================================================

use std::path::PathBuf;
use std::sync::Arc;

use catalog_core::error::DomainError;
use tokio::sync::RwLock;
use tracing::warn;

use super::repositories::{MemoryCategoryRepository, MemoryMenuItemRepository};
use super::snapshot::SnapshotFile;
use super::state::CatalogState;

/// Shared in-process store backing both memory repositories.
#[derive(Clone, Default)]
pub struct MemoryCatalog {
    state: Arc<RwLock<CatalogState>>,
    snapshot: Option<Arc<SnapshotFile>>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_state(state: CatalogState) -> Self {
        Self {
            state: Arc::new(RwLock::new(state)),
            snapshot: None,
        }
    }

    /// Open a snapshot-backed catalog, seeding it from the file when present.
    pub async fn with_snapshot(path: impl Into<PathBuf>) -> Result<Self, DomainError> {
        let snapshot = SnapshotFile::new(path);
        let state = snapshot.load().await?.unwrap_or_default();

        Ok(Self {
            state: Arc::new(RwLock::new(state)),
            snapshot: Some(Arc::new(snapshot)),
        })
    }

    pub fn menu_items(&self) -> MemoryMenuItemRepository {
        MemoryMenuItemRepository::new(self.clone())
    }

    pub fn categories(&self) -> MemoryCategoryRepository {
        MemoryCategoryRepository::new(self.clone())
    }

    /// Copy of the current state
    pub async fn state(&self) -> CatalogState {
        self.state.read().await.clone()
    }

    pub(crate) async fn read<T, F>(&self, f: F) -> T
    where
        F: FnOnce(&CatalogState) -> T,
    {
        let state = self.state.read().await;
        f(&state)
    }

    /// Apply `f` under the write lock and persist the result. The state is
    /// restored if `f` fails or the snapshot cannot be written.
    pub(crate) async fn mutate<T, F>(&self, f: F) -> Result<T, DomainError>
    where
        F: FnOnce(&mut CatalogState) -> Result<T, DomainError>,
    {
        let mut state = self.state.write().await;
        let backup = state.clone();

        let output = match f(&mut state) {
            Ok(output) => output,
            Err(e) => {
                *state = backup;
                return Err(e);
            }
        };

        if let Some(snapshot) = &self.snapshot {
            if let Err(e) = snapshot.write(&state).await {
                warn!(
                    "Rolling back catalog mutation, snapshot {} not written",
                    snapshot.path().display()
                );
                *state = backup;
                return Err(e);
            }
        }

        Ok(output)
    }
}
