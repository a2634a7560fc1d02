//! # Checkout
//!
//! The one async boundary of the session layer.
//!
//! ## Checkout Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                        Checkout Orchestration                       │
//! │                                                                     │
//! │  1. Snapshot active sale + totals      (sync, under the lock)       │
//! │  2. Empty sale? ──────────────────────► EMPTY_SALE, nothing moves   │
//! │  3. Build transaction + line records   (uuid ids, frozen prices)    │
//! │  4. record()  ── one SQL transaction ─► failure: session untouched, │
//! │                                         PERSISTENCE_FAILURE, retry  │
//! │  5. reset()   ── active sale cleared   (parked sales untouched)     │
//! │  6. list_active() ────────────────────► refreshed catalog for UI    │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The database write is attempted exactly once per checkout call. The
//! session is only mutated after the commit, so a failed write leaves the
//! cart intact for retry.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::config::RuntimeConfig;
use crate::error::ApiError;
use crate::state::SessionState;
use orchid_core::{
    CatalogItem, CoreError, Customer, SaleTotals, StaffMember, Transaction, TransactionItem,
};
use orchid_db::Database;

/// Everything the frontend needs to start a POS session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionBootstrap {
    pub config: RuntimeConfig,
    pub catalog: Vec<CatalogItem>,
    pub staff: Vec<StaffMember>,
    pub customers: Vec<Customer>,
}

/// Result of a successful checkout.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutOutcome {
    pub transaction_id: String,
    pub totals: SaleTotals,

    /// Catalog reloaded after the stock decrement, so the grid shows
    /// fresh stock figures without a second round trip.
    pub catalog: Vec<CatalogItem>,
}

/// Orchestrates session start and checkout against the database.
#[derive(Debug, Clone)]
pub struct CheckoutService {
    db: Database,
}

impl CheckoutService {
    /// Creates a new service over the given database handle.
    pub fn new(db: Database) -> Self {
        CheckoutService { db }
    }

    /// Loads everything needed at session start: settings (as runtime
    /// config), the active catalog, and the staff/customer directory.
    pub async fn bootstrap(&self) -> Result<SessionBootstrap, ApiError> {
        debug!("Loading session bootstrap data");

        let settings = self.db.settings().load().await?;
        let catalog = self.db.catalog().list_active().await?;
        let staff = self.db.directory().list_staff().await?;
        let customers = self.db.directory().list_customers().await?;

        Ok(SessionBootstrap {
            config: RuntimeConfig::from_settings(&settings),
            catalog,
            staff,
            customers,
        })
    }

    /// Finalizes the active sale.
    ///
    /// Persists one transaction record (with line snapshots and stock
    /// decrements) in a single database transaction, then resets the active
    /// sale and reloads the catalog.
    ///
    /// ## Errors
    /// - `EMPTY_SALE` if the active sale has no line items
    /// - `PERSISTENCE_FAILURE` (or a validation code for bad references) if
    ///   the write does not commit; the session is left exactly as it was
    pub async fn checkout(
        &self,
        state: &SessionState,
        config: &RuntimeConfig,
    ) -> Result<CheckoutOutcome, ApiError> {
        let sale = state.with_session(|s| s.active().clone());

        if sale.is_empty() {
            return Err(CoreError::EmptySale.into());
        }

        let totals = sale.totals(&config.vat);
        let transaction_id = Uuid::new_v4().to_string();
        let now = Utc::now();

        debug!(
            transaction_id = %transaction_id,
            total = totals.total_pence,
            lines = totals.line_count,
            "Checkout started"
        );

        let transaction = Transaction {
            id: transaction_id.clone(),
            staff_id: sale.staff_id.clone(),
            customer_id: sale.customer_id.clone(),
            payment_method: sale.payment_method,
            subtotal_pence: totals.subtotal_pence,
            vat_pence: totals.vat_pence,
            total_pence: totals.total_pence,
            created_at: now,
        };

        let items: Vec<TransactionItem> = sale
            .items
            .iter()
            .map(|line| TransactionItem {
                id: Uuid::new_v4().to_string(),
                transaction_id: transaction_id.clone(),
                item_id: line.item_id.clone(),
                name_snapshot: line.name.clone(),
                unit_price_pence: line.unit_price_pence,
                quantity: line.quantity,
                line_total_pence: line.line_total_pence(),
            })
            .collect();

        // The single write attempt. On Err the session was never touched.
        self.db.transactions().record(&transaction, &items).await?;

        state.with_session_mut(|s| s.reset());

        let catalog = self.db.catalog().list_active().await?;

        info!(
            transaction_id = %transaction_id,
            total = totals.total_pence,
            lines = totals.line_count,
            "Checkout complete"
        );

        Ok(CheckoutOutcome {
            transaction_id,
            totals,
            catalog,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
