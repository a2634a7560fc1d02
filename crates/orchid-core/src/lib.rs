//! # orchid-core: Pure Business Logic for Orchid POS
//!
//! This crate is the heart of Orchid POS. It contains all business logic as
//! pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    orchid-session (service)                     │
//! │      session state wrapper ─ checkout ─ runtime config          │
//! └───────────────────────────────┬─────────────────────────────────┘
//!                                 │
//! ┌───────────────────────────────▼─────────────────────────────────┐
//! │               ★ orchid-core (THIS CRATE) ★                      │
//! │                                                                 │
//! │  ┌──────────┐ ┌──────────┐ ┌───────────┐ ┌────────────┐        │
//! │  │  types   │ │  money   │ │  session  │ │ validation │        │
//! │  │ Catalog  │ │  Money   │ │ SaleSess. │ │   rules    │        │
//! │  │  Staff   │ │ VatRate  │ │ LineItem  │ │   checks   │        │
//! │  └──────────┘ └──────────┘ └───────────┘ └────────────┘        │
//! │                                                                 │
//! │  NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS             │
//! └───────────────────────────────┬─────────────────────────────────┘
//!                                 │
//! ┌───────────────────────────────▼─────────────────────────────────┐
//! │                 orchid-db (SQLite persistence)                  │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (CatalogItem, Transaction, PaymentMethod, ...)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`session`] - The sale session: active cart, parked sales, totals
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: every function is deterministic where possible
//! 2. **No I/O**: database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: all monetary values are in pence (i64)
//! 4. **Explicit Errors**: all errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use orchid_core::money::Money;
//! use orchid_core::types::VatRate;
//!
//! // Create money from pence (never from floats!)
//! let price = Money::from_pence(1000); // £10.00
//!
//! // VAT at 20%
//! let rate = VatRate::from_bps(2000);
//! let vat = price.calculate_vat(rate);
//! assert_eq!(vat.pence(), 200);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod session;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use orchid_core::Money` instead of
// `use orchid_core::money::Money`

pub use error::{CoreError, ValidationError};
pub use money::Money;
pub use session::{ActiveSale, LineItem, ParkedSale, SaleSession, SaleTotals, VatConfig};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Default VAT rate in basis points (2000 = 20%, the UK standard rate).
///
/// Used when the settings row carries no explicit rate. Businesses with a
/// different rate configure it in store settings.
pub const DEFAULT_VAT_RATE_BPS: u32 = 2000;

/// Maximum line items allowed in a single active sale.
///
/// ## Business Reason
/// Prevents runaway carts and ensures reasonable transaction sizes.
pub const MAX_SALE_LINES: usize = 100;

/// Maximum quantity of a single line item.
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g., typing 1000 instead of 10).
pub const MAX_LINE_QUANTITY: i64 = 999;
