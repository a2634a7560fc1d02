//! # Error Types
//!
//! Domain-specific error types for orchid-core.
//!
//! ## Error Hierarchy
//! ```text
//! orchid-core errors (this file)
//! ├── CoreError        - Sale session + business rule failures
//! └── ValidationError  - Input validation failures
//!
//! orchid-db errors (separate crate)
//! └── DbError          - Database operation failures
//!
//! orchid-session errors
//! └── ApiError         - What the frontend sees (serialized)
//!
//! Flow: ValidationError → CoreError → DbError → ApiError → Frontend
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (item name, id, etc.)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing message

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These errors represent business rule violations or domain logic failures.
/// They should be caught and translated to user-friendly messages.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Park or checkout attempted with no line items.
    ///
    /// ## When This Occurs
    /// - `park()` called on an empty active sale
    /// - Checkout clicked before anything was added
    ///
    /// The operation aborts and session state is left unchanged.
    #[error("Cannot continue: the sale has no items")]
    EmptySale,

    /// A parked sale id no longer exists in the parked collection.
    ///
    /// ## When This Occurs
    /// - `resume()` called after the entry was already resumed or discarded
    ///
    /// Callers treat this as stale UI state, not a fault: the parked list is
    /// simply re-rendered.
    #[error("Parked sale not found: {0}")]
    ParkedSaleNotFound(String),

    /// An inventory-tracked item has no stock left to sell.
    ///
    /// ## When This Occurs
    /// - `add()` on a tracked catalog item whose known stock is ≤ 0
    ///
    /// The add is rejected and the active sale is untouched.
    #[error("'{name}' is out of stock ({stock} remaining)")]
    OutOfStock { name: String, stock: i64 },

    /// Sale has exceeded the maximum allowed line items.
    #[error("Sale cannot have more than {max} items")]
    SaleTooLarge { max: usize },

    /// Line quantity exceeds maximum allowed.
    #[error("Quantity {requested} exceeds maximum allowed ({max})")]
    QuantityTooLarge { requested: i64, max: i64 },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// Used for early validation before business logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    MustNotBeNegative { field: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
