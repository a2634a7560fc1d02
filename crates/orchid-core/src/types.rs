//! # Domain Types
//!
//! Core domain types used throughout Orchid POS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────┐   ┌──────────────────┐   ┌──────────────────┐
//! │   CatalogItem   │   │   Transaction    │   │  PaymentMethod   │
//! │  ─────────────  │   │  ──────────────  │   │  ──────────────  │
//! │  id (UUID)      │   │  id (UUID)       │   │  Cash            │
//! │  name           │   │  staff/customer  │   │  Card            │
//! │  price_pence    │   │  payment_method  │   │  CardTerminal    │
//! │  stock_quantity │   │  totals (pence)  │   │  Contactless ... │
//! └─────────────────┘   └──────────────────┘   └──────────────────┘
//!
//! ┌─────────────────┐   ┌──────────────────┐   ┌──────────────────┐
//! │     VatRate     │   │   StaffMember    │   │     Customer     │
//! │  bps (u32)      │   │  id, name        │   │  id, name, phone │
//! │  2000 = 20%     │   └──────────────────┘   └──────────────────┘
//! └─────────────────┘
//! ```
//!
//! The catalog is owned by the database layer; the sale session only ever
//! reads snapshots of it (see [`crate::session::LineItem`]).

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// VAT Rate
// =============================================================================

/// VAT rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 2000 bps = 20% (the UK standard rate)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct VatRate(u32);

impl VatRate {
    /// Creates a VAT rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        VatRate(bps)
    }

    /// Creates a VAT rate from a percentage (for convenience).
    pub fn from_percentage(pct: f64) -> Self {
        VatRate((pct * 100.0).round() as u32)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero VAT rate.
    #[inline]
    pub const fn zero() -> Self {
        VatRate(0)
    }

    /// Checks if the rate is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Default for VatRate {
    fn default() -> Self {
        VatRate::from_bps(crate::DEFAULT_VAT_RATE_BPS)
    }
}

// =============================================================================
// Catalog Item
// =============================================================================

/// A sellable product or service in the catalog.
///
/// Salons mix the two freely: a haircut is a non-tracked service, a bottle of
/// shampoo is a tracked retail product.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct CatalogItem {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name shown on the sale grid and on receipts.
    pub name: String,

    /// Price in pence (smallest currency unit).
    pub price_pence: i64,

    /// Emoji or icon token shown on the product tile.
    pub icon: Option<String>,

    /// Stock Keeping Unit - business identifier.
    pub sku: Option<String>,

    /// Barcode (EAN-13, UPC-A, etc.) for scanner lookup.
    pub barcode: Option<String>,

    /// Optional grouping category ("Retail", "Services", ...).
    pub category: Option<String>,

    /// Whether to track inventory for this item.
    /// Services are typically untracked.
    pub track_inventory: bool,

    /// Current stock level. Meaningless when `track_inventory` is false.
    pub stock_quantity: i64,

    /// Whether the item is active (soft delete).
    pub is_active: bool,

    /// When the item was created.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    /// When the item was last updated.
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl CatalogItem {
    /// Returns the price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_pence(self.price_pence)
    }

    /// Checks if the item can be sold (in stock or doesn't track inventory).
    pub fn can_sell(&self) -> bool {
        !self.track_inventory || self.stock_quantity > 0
    }
}

// =============================================================================
// Staff & Customers
// =============================================================================

/// A staff member selectable on a sale (for commission attribution).
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct StaffMember {
    pub id: String,
    pub name: String,
}

/// A customer record attachable to a sale.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Customer {
    pub id: String,
    pub name: String,
    pub phone: Option<String>,
}

// =============================================================================
// Payment Method
// =============================================================================

/// How the customer settled the sale.
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "snake_case"))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Physical cash payment.
    #[default]
    Cash,
    /// Card keyed or swiped in-app.
    Card,
    /// Card payment on the external terminal.
    CardTerminal,
    /// Contactless tap.
    Contactless,
    /// Mobile wallet (Apple Pay, Google Pay).
    Mobile,
    /// Anything else (voucher, bank transfer, ...).
    Other,
}

// =============================================================================
// Appointments
// =============================================================================

/// Lifecycle of a booked appointment.
///
/// ## State Transitions
/// ```text
/// Scheduled ──► Completed   (customer showed up, service done)
///     │
///     ├───────► Cancelled   (called off in advance)
///     │
///     └───────► NoShow      (slot passed without the customer)
/// ```
/// Transitions are not enforced; the till staff correct mistakes by
/// setting whichever status is right.
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "snake_case"))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    /// Booked and upcoming.
    #[default]
    Scheduled,
    /// Service delivered.
    Completed,
    /// Called off before the slot.
    Cancelled,
    /// Customer never arrived.
    NoShow,
}

/// A booked service slot: customer + staff member + service at a
/// date/time.
///
/// References the directory and catalog by id; the calendar view joins
/// the names at read time rather than freezing snapshots, because an
/// appointment describes a future intent, not a completed sale.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Appointment {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Customer being served.
    pub customer_id: String,

    /// Staff member delivering the service.
    pub staff_id: String,

    /// Catalog item booked (a service, not retail stock).
    pub service_id: String,

    /// Calendar day of the slot.
    #[ts(as = "String")]
    pub appointment_date: NaiveDate,

    /// Start time of the slot.
    #[ts(as = "String")]
    pub appointment_time: NaiveTime,

    /// Slot length in minutes.
    pub duration_minutes: i64,

    /// Current lifecycle status.
    pub status: AppointmentStatus,

    /// Free-form booking notes.
    pub notes: Option<String>,

    /// When the appointment was created.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    /// When the appointment was last updated.
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// Transaction
// =============================================================================

/// A finalized, persisted sale.
///
/// Written exactly once at checkout. The session never mutates a transaction
/// after the fact; refunds would be new negative transactions.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Transaction {
    pub id: String,
    pub staff_id: Option<String>,
    pub customer_id: Option<String>,
    pub payment_method: PaymentMethod,
    pub subtotal_pence: i64,
    pub vat_pence: i64,
    pub total_pence: i64,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

/// A line item in a finalized transaction.
/// Uses the snapshot pattern to freeze catalog data at time of sale.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct TransactionItem {
    pub id: String,
    pub transaction_id: String,
    pub item_id: String,
    /// Name at time of sale (frozen).
    pub name_snapshot: String,
    /// Unit price in pence at time of sale (frozen).
    pub unit_price_pence: i64,
    /// Quantity sold.
    pub quantity: i64,
    /// Line total before VAT (unit_price × quantity).
    pub line_total_pence: i64,
}

impl TransactionItem {
    /// Returns the unit price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_pence(self.unit_price_pence)
    }

    /// Returns the line total as Money.
    #[inline]
    pub fn line_total(&self) -> Money {
        Money::from_pence(self.line_total_pence)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vat_rate_from_bps() {
        let rate = VatRate::from_bps(2000);
        assert_eq!(rate.bps(), 2000);
        assert!((rate.percentage() - 20.0).abs() < 0.001);
    }

    #[test]
    fn test_vat_rate_from_percentage() {
        let rate = VatRate::from_percentage(20.0);
        assert_eq!(rate.bps(), 2000);
    }

    #[test]
    fn test_payment_method_default() {
        assert_eq!(PaymentMethod::default(), PaymentMethod::Cash);
    }

    #[test]
    fn test_appointment_status_default() {
        assert_eq!(AppointmentStatus::default(), AppointmentStatus::Scheduled);
    }

    #[test]
    fn test_can_sell() {
        let mut item = CatalogItem {
            id: "1".to_string(),
            name: "Shampoo".to_string(),
            price_pence: 899,
            icon: None,
            sku: None,
            barcode: None,
            category: None,
            track_inventory: true,
            stock_quantity: 0,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        assert!(!item.can_sell());

        item.stock_quantity = 3;
        assert!(item.can_sell());

        // Untracked services sell regardless of the stock column
        item.track_inventory = false;
        item.stock_quantity = 0;
        assert!(item.can_sell());
    }
}
