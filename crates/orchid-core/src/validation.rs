//! # Validation Module
//!
//! Input validation for catalog CRUD and session quantities.
//!
//! ## Validation Strategy
//! ```text
//! Layer 1: Frontend          - basic format checks, immediate feedback
//! Layer 2: THIS MODULE       - business rule validation before writes
//! Layer 3: Database (SQLite) - NOT NULL / CHECK / UNIQUE constraints
//!
//! Defense in depth: each layer catches different errors.
//! ```

use crate::error::ValidationError;
use crate::MAX_LINE_QUANTITY;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a catalog item name.
///
/// ## Rules
/// - Must not be empty (after trimming)
/// - Must be at most 120 characters
pub fn validate_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.len() > 120 {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: 120,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a price in pence.
///
/// ## Rules
/// - Must not be negative (free items are allowed, refunds are not a price)
pub fn validate_price_pence(price_pence: i64) -> ValidationResult<()> {
    if price_pence < 0 {
        return Err(ValidationError::MustNotBeNegative {
            field: "price".to_string(),
        });
    }
    Ok(())
}

/// Validates a stock quantity for a catalog item.
///
/// ## Rules
/// - Must not be negative: the session layer stops overselling, so the
///   catalog never holds a negative count
pub fn validate_stock_quantity(stock: i64) -> ValidationResult<()> {
    if stock < 0 {
        return Err(ValidationError::MustNotBeNegative {
            field: "stock_quantity".to_string(),
        });
    }
    Ok(())
}

/// Validates a line quantity for the active sale.
///
/// ## Rules
/// - Must be between 1 and `MAX_LINE_QUANTITY`
pub fn validate_line_quantity(quantity: i64) -> ValidationResult<()> {
    if quantity < 1 || quantity > MAX_LINE_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_LINE_QUANTITY,
        });
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_name() {
        assert!(validate_name("Cut & Blow Dry").is_ok());
        assert!(validate_name("").is_err());
        assert!(validate_name("   ").is_err());
        assert!(validate_name(&"x".repeat(121)).is_err());
    }

    #[test]
    fn test_validate_price_pence() {
        assert!(validate_price_pence(0).is_ok());
        assert!(validate_price_pence(2500).is_ok());
        assert!(validate_price_pence(-1).is_err());
    }

    #[test]
    fn test_validate_stock_quantity() {
        assert!(validate_stock_quantity(0).is_ok());
        assert!(validate_stock_quantity(-3).is_err());
    }

    #[test]
    fn test_validate_line_quantity() {
        assert!(validate_line_quantity(1).is_ok());
        assert!(validate_line_quantity(MAX_LINE_QUANTITY).is_ok());
        assert!(validate_line_quantity(0).is_err());
        assert!(validate_line_quantity(MAX_LINE_QUANTITY + 1).is_err());
    }
}
