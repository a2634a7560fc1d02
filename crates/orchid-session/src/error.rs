//! # API Error Type
//!
//! Unified error type for session-layer operations.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                  Error Flow in Orchid POS                           │
//! │                                                                     │
//! │  Frontend                    Rust Backend                           │
//! │  ────────                    ────────────                           │
//! │                                                                     │
//! │  checkout()                                                         │
//! │      │                                                              │
//! │      ▼                                                              │
//! │  ┌──────────────────────────────────────────────────────────────┐  │
//! │  │  Session Operation                                           │  │
//! │  │  Result<T, ApiError>                                         │  │
//! │  │       │                                                      │  │
//! │  │       ▼                                                      │  │
//! │  │  Database Error? ── DbError::TransactionFailed("...") ──┐   │  │
//! │  │       │                                                 │   │  │
//! │  │       ▼                                                 ▼   │  │
//! │  │  Session Error? ─── CoreError::EmptySale ───────── ApiError │  │
//! │  │       │                                                 │   │  │
//! │  │       ▼                                                 │   │  │
//! │  │  Success ───────────────────────────────────────────────┤   │  │
//! │  └──────────────────────────────────────────────────────────────┘  │
//! │                                                                     │
//! │  try { await checkout() }                                           │
//! │  catch (e) {                                                        │
//! │    // e.message = "Cannot continue: the sale has no items"          │
//! │    // e.code = "EMPTY_SALE"                                         │
//! │  }                                                                  │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Serialization
//! The frontend needs structured errors, so `ApiError` implements
//! `Serialize` and carries both a machine-readable `code` and a
//! human-readable `message`.

use serde::Serialize;
use orchid_core::CoreError;
use orchid_db::DbError;

/// API error returned from session-layer operations.
///
/// ## Serialization
/// This is what the frontend receives when an operation fails:
/// ```json
/// {
///   "code": "OUT_OF_STOCK",
///   "message": "'Hair Serum' is out of stock (0 remaining)"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
///
/// ## Usage in Frontend
/// ```typescript
/// try {
///   await checkout();
/// } catch (e) {
///   switch (e.code) {
///     case 'EMPTY_SALE':
///       showNotification('Add something to the sale first');
///       break;
///     case 'PERSISTENCE_FAILURE':
///       showNotification('Could not save the sale, try again');
///       break;
///     default:
///       showError('An error occurred');
///   }
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Park or checkout attempted with no line items (422)
    EmptySale,

    /// Resource not found: parked sale, catalog item, ... (404)
    NotFound,

    /// Tracked item with no stock left (409)
    OutOfStock,

    /// Input validation failed (400)
    ValidationError,

    /// Checkout write did not commit; the session is intact and the
    /// user may retry (503)
    PersistenceFailure,

    /// Database operation failed outside checkout (500)
    DatabaseError,

    /// Internal server error (500)
    Internal,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(
            ErrorCode::NotFound,
            format!("{} not found: {}", resource, id),
        )
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::EmptySale => ApiError::new(ErrorCode::EmptySale, err.to_string()),
            CoreError::ParkedSaleNotFound(id) => ApiError::not_found("Parked sale", &id),
            CoreError::OutOfStock { .. } => {
                ApiError::new(ErrorCode::OutOfStock, err.to_string())
            }
            CoreError::SaleTooLarge { .. } | CoreError::QuantityTooLarge { .. } => {
                ApiError::validation(err.to_string())
            }
            CoreError::Validation(e) => ApiError::validation(e.to_string()),
        }
    }
}

/// Converts database errors to API errors.
///
/// Anything that could indicate a failed write surfaces as
/// `PERSISTENCE_FAILURE`, which the frontend treats as retryable.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => ApiError::not_found(&entity, &id),
            DbError::InvalidInput(message) => ApiError::validation(message),
            DbError::UniqueViolation { field, value } => ApiError::new(
                ErrorCode::ValidationError,
                format!("{} '{}' already exists", field, value),
            ),
            DbError::ForeignKeyViolation { message } => {
                tracing::error!("Foreign key violation: {}", message);
                ApiError::new(ErrorCode::ValidationError, "Invalid reference")
            }
            DbError::QueryFailed(e) => {
                // Log the actual error but return a generic message
                tracing::error!("Database query failed: {}", e);
                ApiError::new(ErrorCode::PersistenceFailure, "Database operation failed")
            }
            DbError::TransactionFailed(e) => {
                tracing::error!("Transaction failed: {}", e);
                ApiError::new(
                    ErrorCode::PersistenceFailure,
                    "The sale could not be saved; nothing was recorded",
                )
            }
            DbError::ConnectionFailed(_) => {
                ApiError::new(ErrorCode::DatabaseError, "Database connection failed")
            }
            DbError::MigrationFailed(_) => {
                ApiError::new(ErrorCode::DatabaseError, "Database migration failed")
            }
            DbError::PoolExhausted => {
                ApiError::new(ErrorCode::DatabaseError, "Database pool exhausted")
            }
            DbError::Internal(e) => {
                tracing::error!("Internal database error: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_sale_maps_to_empty_sale_code() {
        let api: ApiError = CoreError::EmptySale.into();
        assert_eq!(api.code, ErrorCode::EmptySale);
    }

    #[test]
    fn test_parked_not_found_maps_to_not_found() {
        let api: ApiError = CoreError::ParkedSaleNotFound("abc".to_string()).into();
        assert_eq!(api.code, ErrorCode::NotFound);
        assert!(api.message.contains("abc"));
    }

    #[test]
    fn test_failed_transaction_is_retryable() {
        let api: ApiError = DbError::TransactionFailed("disk I/O error".to_string()).into();
        assert_eq!(api.code, ErrorCode::PersistenceFailure);
        // The raw sqlite message is logged, not shown to the user
        assert!(!api.message.contains("disk I/O"));
    }

    #[test]
    fn test_serialized_shape() {
        let api = ApiError::new(ErrorCode::OutOfStock, "'Hair Serum' is out of stock");
        let json = serde_json::to_value(&api).unwrap();
        assert_eq!(json["code"], "OUT_OF_STOCK");
    }
}
