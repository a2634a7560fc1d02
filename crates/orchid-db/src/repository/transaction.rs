//! # Transaction Repository
//!
//! Database operations for finalized sales.
//!
//! ## Checkout Write
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   record() - all or nothing                 │
//! │                                                             │
//! │  BEGIN                                                      │
//! │    INSERT INTO transactions (...)                           │
//! │    INSERT INTO transaction_items (...)   ← one per line     │
//! │    UPDATE catalog_items                                     │
//! │      SET stock_quantity = stock_quantity - qty              │
//! │      WHERE id = ? AND track_inventory = 1                   │
//! │  COMMIT                                                     │
//! │                                                             │
//! │  Any failure rolls back everything; the caller's cart is    │
//! │  never mutated on failure, so checkout can be retried.      │
//! └─────────────────────────────────────────────────────────────┘
//! ```

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use orchid_core::{Transaction, TransactionItem};

const SELECT_COLUMNS: &str = r#"
    id, staff_id, customer_id, payment_method,
    subtotal_pence, vat_pence, total_pence, created_at
"#;

/// Repository for transaction database operations.
#[derive(Debug, Clone)]
pub struct TransactionRepository {
    pool: SqlitePool,
}

impl TransactionRepository {
    /// Creates a new TransactionRepository.
    pub fn new(pool: SqlitePool) -> Self {
        TransactionRepository { pool }
    }

    /// Persists a finalized sale as one record and decrements stock for
    /// tracked items, inside a single SQL transaction.
    ///
    /// ## Contract
    /// - Attempted exactly once per checkout click (the caller enforces the
    ///   single attempt; this method has no retry of its own)
    /// - Failure rolls back every row touched
    pub async fn record(
        &self,
        transaction: &Transaction,
        items: &[TransactionItem],
    ) -> DbResult<()> {
        debug!(
            id = %transaction.id,
            total = transaction.total_pence,
            lines = items.len(),
            "Recording transaction"
        );

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        sqlx::query(
            r#"
            INSERT INTO transactions (
                id, staff_id, customer_id, payment_method,
                subtotal_pence, vat_pence, total_pence, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
        )
        .bind(&transaction.id)
        .bind(&transaction.staff_id)
        .bind(&transaction.customer_id)
        .bind(transaction.payment_method)
        .bind(transaction.subtotal_pence)
        .bind(transaction.vat_pence)
        .bind(transaction.total_pence)
        .bind(transaction.created_at)
        .execute(&mut *tx)
        .await?;

        for item in items {
            sqlx::query(
                r#"
                INSERT INTO transaction_items (
                    id, transaction_id, item_id, name_snapshot,
                    unit_price_pence, quantity, line_total_pence
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                "#,
            )
            .bind(&item.id)
            .bind(&item.transaction_id)
            .bind(&item.item_id)
            .bind(&item.name_snapshot)
            .bind(item.unit_price_pence)
            .bind(item.quantity)
            .bind(item.line_total_pence)
            .execute(&mut *tx)
            .await?;

            // Untracked items (services) match no row here, which is fine
            sqlx::query(
                r#"
                UPDATE catalog_items SET
                    stock_quantity = stock_quantity - ?2
                WHERE id = ?1 AND track_inventory = 1
                "#,
            )
            .bind(&item.item_id)
            .bind(item.quantity)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        debug!(id = %transaction.id, "Transaction committed");
        Ok(())
    }

    /// Gets a transaction by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Transaction>> {
        let sql = format!("SELECT {SELECT_COLUMNS} FROM transactions WHERE id = ?1");
        let transaction = sqlx::query_as::<_, Transaction>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(transaction)
    }

    /// Gets all items for a transaction.
    pub async fn get_items(&self, transaction_id: &str) -> DbResult<Vec<TransactionItem>> {
        let items = sqlx::query_as::<_, TransactionItem>(
            r#"
            SELECT id, transaction_id, item_id, name_snapshot,
                   unit_price_pence, quantity, line_total_pence
            FROM transaction_items
            WHERE transaction_id = ?1
            ORDER BY rowid
            "#,
        )
        .bind(transaction_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Lists the most recent transactions, newest first.
    pub async fn list_recent(&self, limit: u32) -> DbResult<Vec<Transaction>> {
        let sql = format!(
            "SELECT {SELECT_COLUMNS} FROM transactions ORDER BY created_at DESC LIMIT ?1"
        );
        let transactions = sqlx::query_as::<_, Transaction>(&sql)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;

        Ok(transactions)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use crate::repository::catalog::NewCatalogItem;
    use chrono::Utc;
    use orchid_core::PaymentMethod;
    use uuid::Uuid;

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    fn sample_transaction(total_pence: i64) -> Transaction {
        Transaction {
            id: Uuid::new_v4().to_string(),
            staff_id: None,
            customer_id: None,
            payment_method: PaymentMethod::Card,
            subtotal_pence: total_pence,
            vat_pence: 0,
            total_pence,
            created_at: Utc::now(),
        }
    }

    fn sample_item(transaction_id: &str, item_id: &str, quantity: i64) -> TransactionItem {
        TransactionItem {
            id: Uuid::new_v4().to_string(),
            transaction_id: transaction_id.to_string(),
            item_id: item_id.to_string(),
            name_snapshot: "Shampoo 250ml".to_string(),
            unit_price_pence: 899,
            quantity,
            line_total_pence: 899 * quantity,
        }
    }

    #[tokio::test]
    async fn test_record_and_read_back() {
        let db = test_db().await;
        let repo = db.transactions();

        let tracked = db
            .catalog()
            .create(NewCatalogItem {
                name: "Shampoo 250ml".to_string(),
                price_pence: 899,
                icon: None,
                sku: None,
                barcode: None,
                category: None,
                track_inventory: true,
                stock_quantity: 10,
            })
            .await
            .unwrap();

        let transaction = sample_transaction(1798);
        let items = vec![sample_item(&transaction.id, &tracked.id, 2)];

        repo.record(&transaction, &items).await.unwrap();

        let fetched = repo.get_by_id(&transaction.id).await.unwrap().unwrap();
        assert_eq!(fetched.total_pence, 1798);
        assert_eq!(fetched.payment_method, PaymentMethod::Card);

        let fetched_items = repo.get_items(&transaction.id).await.unwrap();
        assert_eq!(fetched_items.len(), 1);
        assert_eq!(fetched_items[0].quantity, 2);

        // Stock decremented once
        let after = db.catalog().get_by_id(&tracked.id).await.unwrap().unwrap();
        assert_eq!(after.stock_quantity, 8);
    }

    #[tokio::test]
    async fn test_record_leaves_untracked_stock_alone() {
        let db = test_db().await;

        let service = db
            .catalog()
            .create(NewCatalogItem {
                name: "Cut".to_string(),
                price_pence: 3500,
                icon: None,
                sku: None,
                barcode: None,
                category: None,
                track_inventory: false,
                stock_quantity: 0,
            })
            .await
            .unwrap();

        let transaction = sample_transaction(3500);
        let items = vec![sample_item(&transaction.id, &service.id, 1)];
        db.transactions().record(&transaction, &items).await.unwrap();

        let after = db.catalog().get_by_id(&service.id).await.unwrap().unwrap();
        assert_eq!(after.stock_quantity, 0);
    }

    #[tokio::test]
    async fn test_record_rolls_back_on_failure() {
        let db = test_db().await;
        let repo = db.transactions();

        let tracked = db
            .catalog()
            .create(NewCatalogItem {
                name: "Conditioner".to_string(),
                price_pence: 999,
                icon: None,
                sku: None,
                barcode: None,
                category: None,
                track_inventory: true,
                stock_quantity: 5,
            })
            .await
            .unwrap();

        let mut transaction = sample_transaction(999);
        // Nonexistent staff id violates the foreign key
        transaction.staff_id = Some("ghost-staff".to_string());
        let items = vec![sample_item(&transaction.id, &tracked.id, 1)];

        assert!(repo.record(&transaction, &items).await.is_err());

        // Nothing committed: no transaction row, stock untouched
        assert!(repo.get_by_id(&transaction.id).await.unwrap().is_none());
        let after = db.catalog().get_by_id(&tracked.id).await.unwrap().unwrap();
        assert_eq!(after.stock_quantity, 5);
    }

    #[tokio::test]
    async fn test_list_recent() {
        let db = test_db().await;
        let repo = db.transactions();

        for total in [100, 200, 300] {
            let t = sample_transaction(total);
            repo.record(&t, &[]).await.unwrap();
        }

        let recent = repo.list_recent(2).await.unwrap();
        assert_eq!(recent.len(), 2);
    }
}
