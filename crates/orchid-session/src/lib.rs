//! # orchid-session: Session State + Checkout Orchestration
//!
//! The service layer of Orchid POS. It owns the live sale session, bridges
//! the pure logic in orchid-core to the persistence in orchid-db, and
//! translates every failure into a serializable [`ApiError`].
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                         Frontend (UI)                           │
//! └───────────────────────────────┬─────────────────────────────────┘
//!                                 │
//! ┌───────────────────────────────▼─────────────────────────────────┐
//! │              ★ orchid-session (THIS CRATE) ★                    │
//! │                                                                 │
//! │  ┌─────────────┐ ┌──────────────┐ ┌──────────┐ ┌────────────┐  │
//! │  │    state    │ │   checkout   │ │  config  │ │   error    │  │
//! │  │ Arc<Mutex<  │ │  bootstrap + │ │ Runtime  │ │  ApiError  │  │
//! │  │  Session>>  │ │  finalize    │ │  Config  │ │ ErrorCode  │  │
//! │  └─────────────┘ └──────────────┘ └──────────┘ └────────────┘  │
//! └───────────┬───────────────────────────────┬─────────────────────┘
//!             │                               │
//! ┌───────────▼───────────┐       ┌───────────▼───────────┐
//! │      orchid-core      │       │       orchid-db       │
//! │  SaleSession, Money   │       │  SQLite repositories  │
//! └───────────────────────┘       └───────────────────────┘
//! ```
//!
//! ## Design
//!
//! All session operations (add, set quantity, park, resume, ...) run
//! synchronously inside the [`SessionState`] lock and cannot partially
//! apply. Checkout is the only async boundary: it snapshots the sale,
//! performs exactly one database write attempt, and mutates the session
//! only after the commit.

// =============================================================================
// Module Declarations
// =============================================================================

pub mod checkout;
pub mod config;
pub mod error;
pub mod state;

// =============================================================================
// Re-exports
// =============================================================================

pub use checkout::{CheckoutOutcome, CheckoutService, SessionBootstrap};
pub use config::RuntimeConfig;
pub use error::{ApiError, ErrorCode};
pub use state::SessionState;
