//! In-memory catalog store with an optional JSON snapshot

mod catalog;
mod repositories;
mod snapshot;
mod state;

pub use catalog::MemoryCatalog;
pub use repositories::{MemoryCategoryRepository, MemoryMenuItemRepository};
pub use snapshot::SnapshotFile;
pub use state::CatalogState;
