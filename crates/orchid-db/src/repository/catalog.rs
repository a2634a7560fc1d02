//! # Catalog Repository
//!
//! Database operations for sellable products and services.
//!
//! ## Key Operations
//! - List active items (the POS grid reads this at session start and after
//!   every checkout)
//! - CRUD with soft delete (`is_active = 0`)
//! - Stock adjustment for tracked items

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use orchid_core::validation::{validate_name, validate_price_pence, validate_stock_quantity};
use orchid_core::{CatalogItem, CoreError};

const SELECT_COLUMNS: &str = r#"
    id, name, price_pence, icon, sku, barcode, category,
    track_inventory, stock_quantity, is_active, created_at, updated_at
"#;

/// Fields accepted when creating or updating a catalog item.
///
/// The repository owns id and timestamps; callers only supply the business
/// fields.
#[derive(Debug, Clone)]
pub struct NewCatalogItem {
    pub name: String,
    pub price_pence: i64,
    pub icon: Option<String>,
    pub sku: Option<String>,
    pub barcode: Option<String>,
    pub category: Option<String>,
    pub track_inventory: bool,
    pub stock_quantity: i64,
}

impl NewCatalogItem {
    fn validate(&self) -> Result<(), CoreError> {
        validate_name(&self.name)?;
        validate_price_pence(self.price_pence)?;
        validate_stock_quantity(self.stock_quantity)?;
        Ok(())
    }
}

/// Repository for catalog database operations.
#[derive(Debug, Clone)]
pub struct CatalogRepository {
    pool: SqlitePool,
}

impl CatalogRepository {
    /// Creates a new CatalogRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CatalogRepository { pool }
    }

    /// Lists all active items ordered by name.
    ///
    /// This is the catalog read interface: consumed at session start and
    /// reloaded after each successful checkout.
    pub async fn list_active(&self) -> DbResult<Vec<CatalogItem>> {
        let sql = format!(
            "SELECT {SELECT_COLUMNS} FROM catalog_items WHERE is_active = 1 ORDER BY name"
        );
        let items = sqlx::query_as::<_, CatalogItem>(&sql)
            .fetch_all(&self.pool)
            .await?;

        debug!(count = items.len(), "Listed active catalog items");
        Ok(items)
    }

    /// Gets an item by ID (active or not).
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<CatalogItem>> {
        let sql = format!("SELECT {SELECT_COLUMNS} FROM catalog_items WHERE id = ?1");
        let item = sqlx::query_as::<_, CatalogItem>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(item)
    }

    /// Creates a catalog item and returns it.
    pub async fn create(&self, new: NewCatalogItem) -> DbResult<CatalogItem> {
        new.validate()
            .map_err(|e| DbError::InvalidInput(e.to_string()))?;

        let now = Utc::now();
        let item = CatalogItem {
            id: Uuid::new_v4().to_string(),
            name: new.name.trim().to_string(),
            price_pence: new.price_pence,
            icon: new.icon,
            sku: new.sku,
            barcode: new.barcode,
            category: new.category,
            track_inventory: new.track_inventory,
            stock_quantity: new.stock_quantity,
            is_active: true,
            created_at: now,
            updated_at: now,
        };

        debug!(id = %item.id, name = %item.name, "Creating catalog item");

        sqlx::query(
            r#"
            INSERT INTO catalog_items (
                id, name, price_pence, icon, sku, barcode, category,
                track_inventory, stock_quantity, is_active, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
            "#,
        )
        .bind(&item.id)
        .bind(&item.name)
        .bind(item.price_pence)
        .bind(&item.icon)
        .bind(&item.sku)
        .bind(&item.barcode)
        .bind(&item.category)
        .bind(item.track_inventory)
        .bind(item.stock_quantity)
        .bind(item.is_active)
        .bind(item.created_at)
        .bind(item.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(item)
    }

    /// Updates the business fields of an item.
    pub async fn update(&self, id: &str, fields: NewCatalogItem) -> DbResult<()> {
        fields
            .validate()
            .map_err(|e| DbError::InvalidInput(e.to_string()))?;

        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE catalog_items SET
                name = ?2,
                price_pence = ?3,
                icon = ?4,
                sku = ?5,
                barcode = ?6,
                category = ?7,
                track_inventory = ?8,
                stock_quantity = ?9,
                updated_at = ?10
            WHERE id = ?1 AND is_active = 1
            "#,
        )
        .bind(id)
        .bind(fields.name.trim())
        .bind(fields.price_pence)
        .bind(&fields.icon)
        .bind(&fields.sku)
        .bind(&fields.barcode)
        .bind(&fields.category)
        .bind(fields.track_inventory)
        .bind(fields.stock_quantity)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Catalog item", id));
        }

        Ok(())
    }

    /// Soft-deletes an item (`is_active = 0`).
    ///
    /// Transaction lines keep their frozen snapshots, so history survives.
    pub async fn deactivate(&self, id: &str) -> DbResult<()> {
        let now = Utc::now();

        let result = sqlx::query(
            "UPDATE catalog_items SET is_active = 0, updated_at = ?2 WHERE id = ?1",
        )
        .bind(id)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Catalog item", id));
        }

        debug!(id = %id, "Deactivated catalog item");
        Ok(())
    }

    /// Adjusts stock by a signed delta (restock = positive).
    ///
    /// Only meaningful for tracked items; untracked rows are left alone.
    pub async fn adjust_stock(&self, id: &str, delta: i64) -> DbResult<()> {
        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE catalog_items SET
                stock_quantity = stock_quantity + ?2,
                updated_at = ?3
            WHERE id = ?1 AND track_inventory = 1
            "#,
        )
        .bind(id)
        .bind(delta)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Tracked catalog item", id));
        }

        Ok(())
    }

    /// Counts all items (active and inactive).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM catalog_items")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    fn new_item(name: &str, price_pence: i64) -> NewCatalogItem {
        NewCatalogItem {
            name: name.to_string(),
            price_pence,
            icon: Some("✂️".to_string()),
            sku: None,
            barcode: None,
            category: Some("Services".to_string()),
            track_inventory: false,
            stock_quantity: 0,
        }
    }

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn test_create_and_list() {
        let db = test_db().await;
        let repo = db.catalog();

        repo.create(new_item("Blow Dry", 2200)).await.unwrap();
        repo.create(new_item("Cut", 3500)).await.unwrap();

        let items = repo.list_active().await.unwrap();
        assert_eq!(items.len(), 2);
        // Ordered by name
        assert_eq!(items[0].name, "Blow Dry");
        assert_eq!(items[1].name, "Cut");
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_input() {
        let db = test_db().await;
        let repo = db.catalog();

        assert!(repo.create(new_item("", 100)).await.is_err());
        assert!(repo.create(new_item("Negative", -1)).await.is_err());
    }

    #[tokio::test]
    async fn test_update_and_get() {
        let db = test_db().await;
        let repo = db.catalog();

        let created = repo.create(new_item("Cut", 3500)).await.unwrap();

        let mut fields = new_item("Cut & Finish", 4200);
        fields.track_inventory = false;
        repo.update(&created.id, fields).await.unwrap();

        let fetched = repo.get_by_id(&created.id).await.unwrap().unwrap();
        assert_eq!(fetched.name, "Cut & Finish");
        assert_eq!(fetched.price_pence, 4200);
    }

    #[tokio::test]
    async fn test_deactivate_hides_from_list() {
        let db = test_db().await;
        let repo = db.catalog();

        let created = repo.create(new_item("Cut", 3500)).await.unwrap();
        repo.deactivate(&created.id).await.unwrap();

        assert!(repo.list_active().await.unwrap().is_empty());
        // Still reachable by id for history
        assert!(repo.get_by_id(&created.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_adjust_stock_tracked_only() {
        let db = test_db().await;
        let repo = db.catalog();

        let mut tracked = new_item("Shampoo 250ml", 899);
        tracked.track_inventory = true;
        tracked.stock_quantity = 10;
        let tracked = repo.create(tracked).await.unwrap();

        repo.adjust_stock(&tracked.id, -3).await.unwrap();
        let fetched = repo.get_by_id(&tracked.id).await.unwrap().unwrap();
        assert_eq!(fetched.stock_quantity, 7);

        // Untracked items are not adjustable
        let service = repo.create(new_item("Cut", 3500)).await.unwrap();
        assert!(repo.adjust_stock(&service.id, -1).await.is_err());
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let db = test_db().await;
        let repo = db.catalog();

        let err = repo.update("no-such-id", new_item("X", 1)).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }
}
