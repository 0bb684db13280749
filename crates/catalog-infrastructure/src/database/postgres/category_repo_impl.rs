// ============================================================================
// Catalog Infrastructure - PostgreSQL Category Repository
// File: crates/catalog-infrastructure/src/database/postgres/category_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::{error, info, warn};

use catalog_core::domain::{Category, NewCategory};
use catalog_core::error::DomainError;
use catalog_core::repositories::CategoryRepository;
use catalog_shared::{name_key, AuditFields, EntityId};

use super::{is_foreign_key_violation, is_unique_violation, persistence_error};

const CATEGORY_COLUMNS: &str = "id, name, description, created_at, modified_at";

pub struct PgCategoryRepository {
    pool: PgPool,
}

impl PgCategoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Internal row type for SQLx mapping
#[derive(Debug, FromRow)]
struct CategoryRow {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub modified_at: Option<DateTime<Utc>>,
}

impl From<CategoryRow> for Category {
    fn from(row: CategoryRow) -> Self {
        Category {
            id: row.id,
            name: row.name,
            description: row.description,
            audit: AuditFields {
                created_at: row.created_at,
                modified_at: row.modified_at,
            },
        }
    }
}

#[async_trait]
impl CategoryRepository for PgCategoryRepository {
    async fn find_by_id(&self, id: EntityId) -> Result<Option<Category>, DomainError> {
        let sql = format!("SELECT {CATEGORY_COLUMNS} FROM categories WHERE id = $1");
        let row: Option<CategoryRow> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e: sqlx::Error| {
                error!("Database error finding category by id: {}", e);
                persistence_error(e)
            })?;

        Ok(row.map(|r| r.into()))
    }

    async fn find_all(&self) -> Result<Vec<Category>, DomainError> {
        let sql = format!("SELECT {CATEGORY_COLUMNS} FROM categories ORDER BY id");
        let rows: Vec<CategoryRow> = sqlx::query_as(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e: sqlx::Error| {
                error!("Database error listing categories: {}", e);
                persistence_error(e)
            })?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Category>, DomainError> {
        let sql = format!("SELECT {CATEGORY_COLUMNS} FROM categories WHERE name_key = $1");
        let row: Option<CategoryRow> = sqlx::query_as(&sql)
            .bind(name_key(name))
            .fetch_optional(&self.pool)
            .await
            .map_err(|e: sqlx::Error| {
                error!("Database error finding category by name: {}", e);
                persistence_error(e)
            })?;

        Ok(row.map(|r| r.into()))
    }

    async fn exists_by_id(&self, id: EntityId) -> Result<bool, DomainError> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM categories WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e: sqlx::Error| {
                error!("Database error checking category existence: {}", e);
                persistence_error(e)
            })
    }

    async fn create(&self, category: &NewCategory) -> Result<Category, DomainError> {
        info!("Creating category: {}", category.name);

        let sql = format!(
            "INSERT INTO categories (name, name_key, description) VALUES ($1, $2, $3) RETURNING {CATEGORY_COLUMNS}"
        );
        let row: CategoryRow = sqlx::query_as(&sql)
            .bind(&category.name)
            .bind(name_key(&category.name))
            .bind(&category.description)
            .fetch_one(&self.pool)
            .await
            .map_err(|e: sqlx::Error| {
                error!("Database error creating category: {}", e);
                if is_unique_violation(&e) {
                    DomainError::CategoryNameAlreadyExists(category.name.clone())
                } else {
                    persistence_error(e)
                }
            })?;

        info!("Category created successfully: {}", row.id);
        Ok(row.into())
    }

    async fn update(&self, category: &Category) -> Result<Category, DomainError> {
        let sql = format!(
            r#"
            UPDATE categories
            SET name = $2, name_key = $3, description = $4, modified_at = $5
            WHERE id = $1
            RETURNING {CATEGORY_COLUMNS}
            "#
        );
        let row: Option<CategoryRow> = sqlx::query_as(&sql)
            .bind(category.id)
            .bind(&category.name)
            .bind(name_key(&category.name))
            .bind(&category.description)
            .bind(category.audit.modified_at)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e: sqlx::Error| {
                error!("Database error updating category: {}", e);
                if is_unique_violation(&e) {
                    DomainError::CategoryNameAlreadyExists(category.name.clone())
                } else {
                    persistence_error(e)
                }
            })?;

        row.map(|r| r.into())
            .ok_or(DomainError::CategoryNotFound(category.id))
    }

    async fn delete(&self, id: EntityId) -> Result<(), DomainError> {
        let result = match sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
        {
            Ok(result) => result,
            Err(e) if is_foreign_key_violation(&e) => {
                warn!("Category {} is still referenced by menu items", id);
                let item_count: i64 =
                    sqlx::query_scalar("SELECT COUNT(*) FROM menu_items WHERE category_id = $1")
                        .bind(id)
                        .fetch_one(&self.pool)
                        .await
                        .map_err(persistence_error)?;
                return Err(DomainError::CategoryInUse {
                    id,
                    item_count: item_count as u64,
                });
            }
            Err(e) => {
                error!("Database error deleting category: {}", e);
                return Err(persistence_error(e));
            }
        };

        if result.rows_affected() == 0 {
            return Err(DomainError::CategoryNotFound(id));
        }
        Ok(())
    }
}
