//! # orchid-db: Database Layer for Orchid POS
//!
//! This crate provides database access for the Orchid POS system.
//! It uses SQLite for local storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! orchid-session (checkout, session state)
//!        │
//!        ▼
//! ┌─────────────────────────────────────────────────────────┐
//! │                 orchid-db (THIS CRATE)                  │
//! │                                                         │
//! │  ┌────────────┐  ┌────────────────┐  ┌──────────────┐  │
//! │  │  Database  │  │  Repositories  │  │  Migrations  │  │
//! │  │ (pool.rs)  │◄─│  catalog.rs    │  │  (embedded)  │  │
//! │  │ SqlitePool │  │  transaction.rs│  │ 001_init.sql │  │
//! │  └────────────┘  │  settings.rs   │  └──────────────┘  │
//! │                  │  directory.rs  │                    │
//! │                  │  appointment.rs│                    │
//! │                  └────────────────┘                    │
//! └────────────────────────────┬────────────────────────────┘
//!                              ▼
//!                      SQLite database file
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations
//!
//! ## Usage
//!
//! ```rust,ignore
//! use orchid_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("path/to/orchid.db")).await?;
//! let items = db.catalog().list_active().await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::DbError;
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::appointment::AppointmentRepository;
pub use repository::catalog::CatalogRepository;
pub use repository::directory::DirectoryRepository;
pub use repository::settings::{SettingsRepository, StoreSettings};
pub use repository::transaction::TransactionRepository;
