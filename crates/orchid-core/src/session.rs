//! # Sale Session
//!
//! The sale session: one active, mutable cart of line items plus zero or
//! more suspended ("parked") sales, with derived totals.
//!
//! ## Session Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                     Sale Session Operations                         │
//! │                                                                     │
//! │  UI Action                Operation              State Change       │
//! │  ─────────                ─────────              ────────────       │
//! │                                                                     │
//! │  Tap product tile ──────► add(item) ───────────► merge or push      │
//! │                                                                     │
//! │  +/- stepper ───────────► set_quantity(id, q) ─► set, 0 removes     │
//! │                                                                     │
//! │  Bin icon ──────────────► remove(id) ──────────► line removed       │
//! │                                                                     │
//! │  "Park sale" ───────────► park() ──────────────► snapshot + reset   │
//! │                                                                     │
//! │  Parked list tap ───────► resume(id) ──────────► snapshot restored  │
//! │                                                                     │
//! │  Parked list bin ───────► discard(id) ─────────► snapshot dropped   │
//! │                                                                     │
//! │  "New sale" / checkout ─► reset() ─────────────► empty defaults     │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - Line quantity is always ≥ 1; setting it to 0 removes the line
//! - Lines are unique by catalog item id (adding merges quantity)
//! - Parked sales are immutable until resumed or discarded
//! - Parked sales live in memory only; a restart loses them (accepted)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{CatalogItem, PaymentMethod, VatRate};
use crate::{MAX_LINE_QUANTITY, MAX_SALE_LINES};

// =============================================================================
// Line Item
// =============================================================================

/// A line in the active sale.
///
/// ## Design Notes
/// - `cart_id`: cart-local UUID, stable for the life of the line. The UI keys
///   its rows on this, not on the catalog id, so a remove-then-re-add gets a
///   fresh row identity.
/// - Everything else is a frozen snapshot of the catalog item at add time,
///   so the cart displays consistent data even if the catalog row is edited
///   mid-sale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct LineItem {
    /// Cart-local unique identifier (UUID v4).
    pub cart_id: String,

    /// Catalog item id this line references.
    pub item_id: String,

    /// Name at time of adding (frozen).
    pub name: String,

    /// Price in pence at time of adding (frozen).
    pub unit_price_pence: i64,

    /// Tile icon at time of adding (frozen).
    pub icon: Option<String>,

    /// Whether the catalog item tracks inventory.
    pub track_inventory: bool,

    /// Known stock at time of adding (frozen snapshot, display only).
    pub stock_quantity: i64,

    /// Quantity on this line. Always ≥ 1.
    pub quantity: i64,
}

impl LineItem {
    /// Creates a new line from a catalog item with quantity 1.
    pub fn from_catalog(item: &CatalogItem) -> Self {
        LineItem {
            cart_id: Uuid::new_v4().to_string(),
            item_id: item.id.clone(),
            name: item.name.clone(),
            unit_price_pence: item.price_pence,
            icon: item.icon.clone(),
            track_inventory: item.track_inventory,
            stock_quantity: item.stock_quantity,
            quantity: 1,
        }
    }

    /// Calculates the line total (unit price × quantity).
    pub fn line_total_pence(&self) -> i64 {
        self.unit_price_pence * self.quantity
    }
}

// =============================================================================
// VAT Configuration
// =============================================================================

/// VAT configuration supplied by store settings at session load.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct VatConfig {
    /// Whether VAT is charged at all.
    pub enabled: bool,

    /// Rate applied when enabled.
    pub rate: VatRate,
}

impl VatConfig {
    /// VAT charged at the given rate.
    pub fn enabled(rate: VatRate) -> Self {
        VatConfig { enabled: true, rate }
    }

    /// No VAT charged (exempt business).
    pub fn disabled() -> Self {
        VatConfig {
            enabled: false,
            rate: VatRate::zero(),
        }
    }
}

impl Default for VatConfig {
    fn default() -> Self {
        VatConfig::enabled(VatRate::default())
    }
}

// =============================================================================
// Sale Totals
// =============================================================================

/// Derived totals for a sale. Pure function of the line items and VatConfig.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SaleTotals {
    pub line_count: usize,
    pub total_quantity: i64,
    pub subtotal_pence: i64,
    pub vat_pence: i64,
    pub total_pence: i64,
}

// =============================================================================
// Active Sale
// =============================================================================

/// The one in-progress sale of the session.
///
/// Lines keep insertion order. Staff, customer, and payment method are
/// carried along so they survive a park/resume round trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ActiveSale {
    pub items: Vec<LineItem>,
    pub staff_id: Option<String>,
    pub customer_id: Option<String>,
    pub payment_method: PaymentMethod,
}

impl ActiveSale {
    /// Creates an empty sale with default selections.
    pub fn new() -> Self {
        ActiveSale {
            items: Vec::new(),
            staff_id: None,
            customer_id: None,
            payment_method: PaymentMethod::default(),
        }
    }

    /// Checks if the sale has no line items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the number of lines.
    pub fn line_count(&self) -> usize {
        self.items.len()
    }

    /// Returns the total quantity across all lines.
    pub fn total_quantity(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Calculates the subtotal (before VAT).
    pub fn subtotal_pence(&self) -> i64 {
        self.items.iter().map(|i| i.line_total_pence()).sum()
    }

    /// Calculates subtotal, VAT, and grand total under the given config.
    ///
    /// VAT disabled always yields vat = 0 and total = subtotal.
    pub fn totals(&self, vat: &VatConfig) -> SaleTotals {
        let subtotal = Money::from_pence(self.subtotal_pence());
        let vat_amount = if vat.enabled {
            subtotal.calculate_vat(vat.rate)
        } else {
            Money::zero()
        };

        SaleTotals {
            line_count: self.line_count(),
            total_quantity: self.total_quantity(),
            subtotal_pence: subtotal.pence(),
            vat_pence: vat_amount.pence(),
            total_pence: (subtotal + vat_amount).pence(),
        }
    }
}

impl Default for ActiveSale {
    fn default() -> Self {
        ActiveSale::new()
    }
}

// =============================================================================
// Parked Sale
// =============================================================================

/// An immutable snapshot of a former active sale.
///
/// Created by [`SaleSession::park`], destroyed by resume or discard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ParkedSale {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// When the sale was parked.
    #[ts(as = "String")]
    pub parked_at: DateTime<Utc>,

    /// The frozen sale contents.
    pub sale: ActiveSale,
}

// =============================================================================
// Sale Session
// =============================================================================

/// The sale session: exactly one active sale plus the parked list.
///
/// Owned exclusively by the session layer for the lifetime of the user
/// session; every operation runs synchronously to completion, so no internal
/// locking is needed here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleSession {
    active: ActiveSale,
    parked: Vec<ParkedSale>,
}

impl SaleSession {
    /// Creates a fresh session: empty active sale, no parked sales.
    pub fn new() -> Self {
        SaleSession::default()
    }

    /// Returns the active sale.
    pub fn active(&self) -> &ActiveSale {
        &self.active
    }

    /// Returns the parked sales in creation order.
    pub fn parked(&self) -> &[ParkedSale] {
        &self.parked
    }

    /// Adds a catalog item to the active sale.
    ///
    /// ## Behavior
    /// - Item already on a line: quantity += 1
    /// - Otherwise: new line with quantity 1 and a fresh cart id
    /// - Tracked item with stock ≤ 0: rejected, state unchanged
    pub fn add(&mut self, item: &CatalogItem) -> CoreResult<()> {
        if item.track_inventory && item.stock_quantity <= 0 {
            return Err(CoreError::OutOfStock {
                name: item.name.clone(),
                stock: item.stock_quantity,
            });
        }

        if let Some(line) = self.active.items.iter_mut().find(|l| l.item_id == item.id) {
            let new_qty = line.quantity + 1;
            if new_qty > MAX_LINE_QUANTITY {
                return Err(CoreError::QuantityTooLarge {
                    requested: new_qty,
                    max: MAX_LINE_QUANTITY,
                });
            }
            line.quantity = new_qty;
            return Ok(());
        }

        if self.active.items.len() >= MAX_SALE_LINES {
            return Err(CoreError::SaleTooLarge {
                max: MAX_SALE_LINES,
            });
        }

        self.active.items.push(LineItem::from_catalog(item));
        Ok(())
    }

    /// Sets the quantity of a line.
    ///
    /// ## Behavior
    /// - quantity ≤ 0: removes the line
    /// - unknown cart id: silent no-op (stale UI event, not a fault)
    pub fn set_quantity(&mut self, cart_id: &str, quantity: i64) -> CoreResult<()> {
        if quantity <= 0 {
            self.remove(cart_id);
            return Ok(());
        }

        if quantity > MAX_LINE_QUANTITY {
            return Err(CoreError::QuantityTooLarge {
                requested: quantity,
                max: MAX_LINE_QUANTITY,
            });
        }

        if let Some(line) = self.active.items.iter_mut().find(|l| l.cart_id == cart_id) {
            line.quantity = quantity;
        }
        Ok(())
    }

    /// Removes a line by cart id. No-op if absent.
    pub fn remove(&mut self, cart_id: &str) {
        self.active.items.retain(|l| l.cart_id != cart_id);
    }

    /// Selects the staff member for the active sale.
    pub fn set_staff(&mut self, staff_id: Option<String>) {
        self.active.staff_id = staff_id;
    }

    /// Selects the customer for the active sale.
    pub fn set_customer(&mut self, customer_id: Option<String>) {
        self.active.customer_id = customer_id;
    }

    /// Selects the payment method for the active sale.
    pub fn set_payment_method(&mut self, method: PaymentMethod) {
        self.active.payment_method = method;
    }

    /// Calculates totals for the active sale under the given VAT config.
    pub fn totals(&self, vat: &VatConfig) -> SaleTotals {
        self.active.totals(vat)
    }

    /// Parks the active sale.
    ///
    /// Snapshots the whole sale (items, staff, customer, payment method)
    /// into the parked list and resets the active sale to empty defaults.
    ///
    /// ## Errors
    /// [`CoreError::EmptySale`] if there are no line items; the parked list
    /// is left unchanged.
    ///
    /// ## Returns
    /// The id of the new parked sale.
    pub fn park(&mut self) -> CoreResult<String> {
        if self.active.is_empty() {
            return Err(CoreError::EmptySale);
        }

        let id = Uuid::new_v4().to_string();
        let snapshot = std::mem::take(&mut self.active);
        self.parked.push(ParkedSale {
            id: id.clone(),
            parked_at: Utc::now(),
            sale: snapshot,
        });

        Ok(id)
    }

    /// Resumes a parked sale, replacing the active sale with its contents.
    ///
    /// The entry leaves the parked list. Callers that care about an in-flight
    /// active sale park it first.
    ///
    /// ## Errors
    /// [`CoreError::ParkedSaleNotFound`] if the id is absent; nothing changes.
    pub fn resume(&mut self, parked_id: &str) -> CoreResult<()> {
        let idx = self
            .parked
            .iter()
            .position(|p| p.id == parked_id)
            .ok_or_else(|| CoreError::ParkedSaleNotFound(parked_id.to_string()))?;

        self.active = self.parked.remove(idx).sale;
        Ok(())
    }

    /// Discards a parked sale. No-op if absent. Irreversible.
    pub fn discard(&mut self, parked_id: &str) {
        self.parked.retain(|p| p.id != parked_id);
    }

    /// Clears the active sale to empty defaults without parking.
    ///
    /// Used after a successful checkout and for the explicit "new sale"
    /// action. Parked sales are untouched.
    pub fn reset(&mut self) {
        self.active = ActiveSale::new();
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn catalog_item(id: &str, price_pence: i64) -> CatalogItem {
        CatalogItem {
            id: id.to_string(),
            name: format!("Item {}", id),
            price_pence,
            icon: Some("💈".to_string()),
            sku: None,
            barcode: None,
            category: None,
            track_inventory: false,
            stock_quantity: 0,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn tracked_item(id: &str, price_pence: i64, stock: i64) -> CatalogItem {
        CatalogItem {
            track_inventory: true,
            stock_quantity: stock,
            ..catalog_item(id, price_pence)
        }
    }

    #[test]
    fn test_add_new_item() {
        let mut session = SaleSession::new();
        session.add(&catalog_item("a", 999)).unwrap();

        assert_eq!(session.active().line_count(), 1);
        assert_eq!(session.active().total_quantity(), 1);
        assert_eq!(session.active().subtotal_pence(), 999);
    }

    #[test]
    fn test_add_same_item_merges_quantity() {
        let mut session = SaleSession::new();
        let item = catalog_item("a", 1000); // £10.00

        session.add(&item).unwrap();
        session.add(&item).unwrap();

        // One line, quantity 2, subtotal £20.00
        assert_eq!(session.active().line_count(), 1);
        assert_eq!(session.active().items[0].quantity, 2);
        assert_eq!(session.active().subtotal_pence(), 2000);
    }

    #[test]
    fn test_add_out_of_stock_is_rejected() {
        let mut session = SaleSession::new();
        let result = session.add(&tracked_item("a", 500, 0));

        assert!(matches!(result, Err(CoreError::OutOfStock { .. })));
        assert!(session.active().is_empty());
    }

    #[test]
    fn test_add_tracked_with_stock_succeeds() {
        let mut session = SaleSession::new();
        session.add(&tracked_item("a", 500, 3)).unwrap();
        assert_eq!(session.active().line_count(), 1);
    }

    #[test]
    fn test_set_quantity() {
        let mut session = SaleSession::new();
        session.add(&catalog_item("a", 250)).unwrap();
        let cart_id = session.active().items[0].cart_id.clone();

        session.set_quantity(&cart_id, 4).unwrap();
        assert_eq!(session.active().items[0].quantity, 4);
        assert_eq!(session.active().subtotal_pence(), 1000);
    }

    #[test]
    fn test_set_quantity_zero_removes_line() {
        let mut session = SaleSession::new();
        session.add(&catalog_item("a", 250)).unwrap();
        let cart_id = session.active().items[0].cart_id.clone();

        session.set_quantity(&cart_id, 0).unwrap();
        assert!(session.active().is_empty());
    }

    #[test]
    fn test_set_quantity_unknown_id_is_noop() {
        let mut session = SaleSession::new();
        session.add(&catalog_item("a", 250)).unwrap();

        session.set_quantity("no-such-line", 7).unwrap();
        assert_eq!(session.active().items[0].quantity, 1);
    }

    #[test]
    fn test_remove_unknown_id_is_noop() {
        let mut session = SaleSession::new();
        session.add(&catalog_item("a", 250)).unwrap();

        session.remove("no-such-line");
        assert_eq!(session.active().line_count(), 1);
    }

    #[test]
    fn test_quantities_never_negative_under_mixed_ops() {
        let mut session = SaleSession::new();
        let item = catalog_item("a", 100);

        session.add(&item).unwrap();
        session.add(&item).unwrap();
        let cart_id = session.active().items[0].cart_id.clone();
        session.set_quantity(&cart_id, -5).unwrap();

        // Negative quantity removes the line rather than persisting ≤ 0
        assert!(session.active().is_empty());
        assert!(session.active().items.iter().all(|l| l.quantity >= 1));
    }

    #[test]
    fn test_totals_with_vat_enabled() {
        let mut session = SaleSession::new();
        let item = catalog_item("a", 1000);
        session.add(&item).unwrap();
        session.add(&item).unwrap();

        // £20.00 subtotal, 20% VAT, £24.00 grand total
        let totals = session.totals(&VatConfig::enabled(VatRate::from_bps(2000)));
        assert_eq!(totals.subtotal_pence, 2000);
        assert_eq!(totals.vat_pence, 400);
        assert_eq!(totals.total_pence, 2400);
    }

    #[test]
    fn test_totals_with_vat_disabled() {
        let mut session = SaleSession::new();
        session.add(&catalog_item("a", 1234)).unwrap();

        let totals = session.totals(&VatConfig::disabled());
        assert_eq!(totals.vat_pence, 0);
        assert_eq!(totals.total_pence, totals.subtotal_pence);
    }

    #[test]
    fn test_park_empty_sale_fails() {
        let mut session = SaleSession::new();
        let result = session.park();

        assert!(matches!(result, Err(CoreError::EmptySale)));
        assert!(session.parked().is_empty());
    }

    #[test]
    fn test_park_resets_active_and_keeps_selections() {
        let mut session = SaleSession::new();
        session.add(&catalog_item("a", 500)).unwrap();
        session.set_staff(Some("staff-1".to_string()));
        session.set_payment_method(PaymentMethod::CardTerminal);

        let id = session.park().unwrap();

        assert!(session.active().is_empty());
        assert_eq!(session.active().payment_method, PaymentMethod::Cash);
        assert_eq!(session.parked().len(), 1);

        let parked = &session.parked()[0];
        assert_eq!(parked.id, id);
        assert_eq!(parked.sale.staff_id.as_deref(), Some("staff-1"));
        assert_eq!(parked.sale.payment_method, PaymentMethod::CardTerminal);
    }

    #[test]
    fn test_resume_round_trip() {
        let mut session = SaleSession::new();
        session.add(&catalog_item("a", 500)).unwrap();
        session.add(&catalog_item("b", 750)).unwrap();
        session.set_customer(Some("cust-9".to_string()));

        let id = session.park().unwrap();
        let original = session.parked()[0].sale.clone();

        session.resume(&id).unwrap();
        assert!(session.parked().is_empty());
        assert_eq!(*session.active(), original);

        // Park again: the new snapshot has identical contents
        session.park().unwrap();
        assert_eq!(session.parked()[0].sale, original);
    }

    #[test]
    fn test_resume_unknown_id_fails_without_mutation() {
        let mut session = SaleSession::new();
        session.add(&catalog_item("a", 500)).unwrap();
        session.park().unwrap();

        let result = session.resume("no-such-id");
        assert!(matches!(result, Err(CoreError::ParkedSaleNotFound(_))));
        assert_eq!(session.parked().len(), 1);
        assert!(session.active().is_empty());
    }

    #[test]
    fn test_discard_then_resume_is_not_found() {
        let mut session = SaleSession::new();
        session.add(&catalog_item("a", 500)).unwrap();
        let id = session.park().unwrap();

        session.discard(&id);
        assert!(session.parked().is_empty());

        // Resume of a vanished id fails and changes nothing
        let result = session.resume(&id);
        assert!(matches!(result, Err(CoreError::ParkedSaleNotFound(_))));
        assert!(session.active().is_empty());
    }

    #[test]
    fn test_discard_unknown_id_is_noop() {
        let mut session = SaleSession::new();
        session.add(&catalog_item("a", 500)).unwrap();
        session.park().unwrap();

        session.discard("no-such-id");
        assert_eq!(session.parked().len(), 1);
    }

    #[test]
    fn test_parked_sales_keep_creation_order() {
        let mut session = SaleSession::new();
        session.add(&catalog_item("a", 100)).unwrap();
        let first = session.park().unwrap();
        session.add(&catalog_item("b", 200)).unwrap();
        let second = session.park().unwrap();

        let ids: Vec<_> = session.parked().iter().map(|p| p.id.clone()).collect();
        assert_eq!(ids, vec![first, second]);
    }

    #[test]
    fn test_reset_clears_active_only() {
        let mut session = SaleSession::new();
        session.add(&catalog_item("a", 100)).unwrap();
        session.park().unwrap();
        session.add(&catalog_item("b", 200)).unwrap();
        session.set_staff(Some("staff-2".to_string()));

        session.reset();

        assert!(session.active().is_empty());
        assert!(session.active().staff_id.is_none());
        assert_eq!(session.parked().len(), 1);
    }

    #[test]
    fn test_quantity_cap() {
        let mut session = SaleSession::new();
        session.add(&catalog_item("a", 100)).unwrap();
        let cart_id = session.active().items[0].cart_id.clone();

        let result = session.set_quantity(&cart_id, MAX_LINE_QUANTITY + 1);
        assert!(matches!(result, Err(CoreError::QuantityTooLarge { .. })));
        assert_eq!(session.active().items[0].quantity, 1);
    }
}
