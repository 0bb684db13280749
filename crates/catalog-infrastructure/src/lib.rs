//! # Catalog Infrastructure
//! 
//! Repository adapters: in-memory (optionally snapshot-backed) and PostgreSQL.

pub mod database;
pub mod memory;

pub use database::{create_pool, run_migrations, PgCategoryRepository, PgMenuItemRepository};
pub use memory::{CatalogState, MemoryCatalog, MemoryCategoryRepository, MemoryMenuItemRepository, SnapshotFile};
