// ============================================================================
// Catalog Infrastructure - PostgreSQL Menu Item Repository
// File: crates/catalog-infrastructure/src/database/postgres/menu_item_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};
use tracing::{error, info};

use catalog_core::domain::{MenuItem, NewMenuItem};
use catalog_core::error::DomainError;
use catalog_core::repositories::MenuItemRepository;
use catalog_shared::{name_key, AuditFields, EntityId};

use super::{is_foreign_key_violation, is_unique_violation, persistence_error};

const MENU_ITEM_COLUMNS: &str = r#"
    id, name, category_id, price, calories, preparation_time_minutes,
    cuisine_type, vegetarian, spicy_level, available, description,
    created_at, modified_at
"#;

pub struct PgMenuItemRepository {
    pool: PgPool,
}

impl PgMenuItemRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_many(&self, sql: &str, bind: Option<i64>) -> Result<Vec<MenuItem>, DomainError> {
        let mut query = sqlx::query_as::<_, MenuItemRow>(sql);
        if let Some(value) = bind {
            query = query.bind(value);
        }
        let rows = query.fetch_all(&self.pool).await.map_err(|e: sqlx::Error| {
            error!("Database error listing menu items: {}", e);
            persistence_error(e)
        })?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    fn map_write_error(e: sqlx::Error, name: &str, category_id: EntityId) -> DomainError {
        if is_unique_violation(&e) {
            DomainError::MenuItemNameAlreadyExists(name.to_string())
        } else if is_foreign_key_violation(&e) {
            DomainError::CategoryNotFound(category_id)
        } else {
            persistence_error(e)
        }
    }
}

// Internal row type for SQLx mapping
#[derive(Debug, FromRow)]
struct MenuItemRow {
    pub id: i64,
    pub name: String,
    pub category_id: i64,
    pub price: Decimal,
    pub calories: i32,
    pub preparation_time_minutes: i32,
    pub cuisine_type: String,
    pub vegetarian: bool,
    pub spicy_level: i32,
    pub available: bool,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub modified_at: Option<DateTime<Utc>>,
}

impl From<MenuItemRow> for MenuItem {
    fn from(row: MenuItemRow) -> Self {
        MenuItem {
            id: row.id,
            name: row.name,
            category_id: row.category_id,
            price: row.price,
            calories: row.calories,
            preparation_time_minutes: row.preparation_time_minutes,
            cuisine_type: row.cuisine_type,
            vegetarian: row.vegetarian,
            spicy_level: row.spicy_level,
            available: row.available,
            description: row.description,
            audit: AuditFields {
                created_at: row.created_at,
                modified_at: row.modified_at,
            },
        }
    }
}

#[async_trait]
impl MenuItemRepository for PgMenuItemRepository {
    async fn find_by_id(&self, id: EntityId) -> Result<Option<MenuItem>, DomainError> {
        let sql = format!("SELECT {MENU_ITEM_COLUMNS} FROM menu_items WHERE id = $1");
        let row: Option<MenuItemRow> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e: sqlx::Error| {
                error!("Database error finding menu item by id: {}", e);
                persistence_error(e)
            })?;

        Ok(row.map(|r| r.into()))
    }

    async fn find_all(&self) -> Result<Vec<MenuItem>, DomainError> {
        let sql = format!("SELECT {MENU_ITEM_COLUMNS} FROM menu_items ORDER BY id");
        self.fetch_many(&sql, None).await
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<MenuItem>, DomainError> {
        let sql = format!("SELECT {MENU_ITEM_COLUMNS} FROM menu_items WHERE name_key = $1");
        let row: Option<MenuItemRow> = sqlx::query_as(&sql)
            .bind(name_key(name))
            .fetch_optional(&self.pool)
            .await
            .map_err(|e: sqlx::Error| {
                error!("Database error finding menu item by name: {}", e);
                persistence_error(e)
            })?;

        Ok(row.map(|r| r.into()))
    }

    async fn find_by_category_id(&self, category_id: EntityId) -> Result<Vec<MenuItem>, DomainError> {
        let sql = format!(
            "SELECT {MENU_ITEM_COLUMNS} FROM menu_items WHERE category_id = $1 ORDER BY id"
        );
        self.fetch_many(&sql, Some(category_id)).await
    }

    async fn count_by_category_id(&self, category_id: EntityId) -> Result<u64, DomainError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM menu_items WHERE category_id = $1")
            .bind(category_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e: sqlx::Error| {
                error!("Database error counting menu items: {}", e);
                persistence_error(e)
            })?;

        Ok(count as u64)
    }

    async fn exists_by_id(&self, id: EntityId) -> Result<bool, DomainError> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM menu_items WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e: sqlx::Error| {
                error!("Database error checking menu item existence: {}", e);
                persistence_error(e)
            })
    }

    async fn create(&self, item: &NewMenuItem) -> Result<MenuItem, DomainError> {
        info!("Creating menu item: {}", item.name);

        let sql = format!(
            r#"
            INSERT INTO menu_items (
                name, category_id, price, calories, preparation_time_minutes,
                cuisine_type, vegetarian, spicy_level, available, description, name_key
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING {MENU_ITEM_COLUMNS}
            "#
        );
        let row: MenuItemRow = sqlx::query_as(&sql)
            .bind(&item.name)
            .bind(item.category_id)
            .bind(item.price)
            .bind(item.calories)
            .bind(item.preparation_time_minutes)
            .bind(&item.cuisine_type)
            .bind(item.vegetarian)
            .bind(item.spicy_level)
            .bind(item.available)
            .bind(&item.description)
            .bind(name_key(&item.name))
            .fetch_one(&self.pool)
            .await
            .map_err(|e: sqlx::Error| {
                error!("Database error creating menu item: {}", e);
                Self::map_write_error(e, &item.name, item.category_id)
            })?;

        info!("Menu item created successfully: {}", row.id);
        Ok(row.into())
    }

    async fn update(&self, item: &MenuItem) -> Result<MenuItem, DomainError> {
        let sql = format!(
            r#"
            UPDATE menu_items
            SET
                name = $2,
                category_id = $3,
                price = $4,
                calories = $5,
                preparation_time_minutes = $6,
                cuisine_type = $7,
                vegetarian = $8,
                spicy_level = $9,
                available = $10,
                description = $11,
                modified_at = $12,
                name_key = $13
            WHERE id = $1
            RETURNING {MENU_ITEM_COLUMNS}
            "#
        );
        let row: Option<MenuItemRow> = sqlx::query_as(&sql)
            .bind(item.id)
            .bind(&item.name)
            .bind(item.category_id)
            .bind(item.price)
            .bind(item.calories)
            .bind(item.preparation_time_minutes)
            .bind(&item.cuisine_type)
            .bind(item.vegetarian)
            .bind(item.spicy_level)
            .bind(item.available)
            .bind(&item.description)
            .bind(item.audit.modified_at)
            .bind(name_key(&item.name))
            .fetch_optional(&self.pool)
            .await
            .map_err(|e: sqlx::Error| {
                error!("Database error updating menu item: {}", e);
                Self::map_write_error(e, &item.name, item.category_id)
            })?;

        row.map(|r| r.into())
            .ok_or(DomainError::MenuItemNotFound(item.id))
    }

    async fn delete(&self, id: EntityId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM menu_items WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e: sqlx::Error| {
                error!("Database error deleting menu item: {}", e);
                persistence_error(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::MenuItemNotFound(id));
        }
        Ok(())
    }
}
