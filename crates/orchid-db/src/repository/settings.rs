//! # Settings Repository
//!
//! The single store settings row: VAT flag and rate, store name.
//!
//! The migration seeds row id 1 with defaults (VAT enabled at 20%), so
//! `load()` always finds a row.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use orchid_core::{VatConfig, VatRate};

/// The store settings row.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct StoreSettings {
    pub store_name: String,
    pub vat_enabled: bool,
    pub vat_rate_bps: u32,
}

impl StoreSettings {
    /// Converts the persisted row into the session's VAT configuration.
    pub fn vat_config(&self) -> VatConfig {
        if self.vat_enabled {
            VatConfig::enabled(VatRate::from_bps(self.vat_rate_bps))
        } else {
            VatConfig::disabled()
        }
    }
}

/// Repository for the settings row.
#[derive(Debug, Clone)]
pub struct SettingsRepository {
    pool: SqlitePool,
}

impl SettingsRepository {
    /// Creates a new SettingsRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SettingsRepository { pool }
    }

    /// Loads the settings row. Read at session load.
    pub async fn load(&self) -> DbResult<StoreSettings> {
        let settings = sqlx::query_as::<_, StoreSettings>(
            "SELECT store_name, vat_enabled, vat_rate_bps FROM settings WHERE id = 1",
        )
        .fetch_one(&self.pool)
        .await?;

        debug!(vat_enabled = settings.vat_enabled, "Loaded store settings");
        Ok(settings)
    }

    /// Saves the settings row.
    pub async fn save(&self, settings: &StoreSettings) -> DbResult<()> {
        let now = Utc::now();

        sqlx::query(
            r#"
            UPDATE settings SET
                store_name = ?1,
                vat_enabled = ?2,
                vat_rate_bps = ?3,
                updated_at = ?4
            WHERE id = 1
            "#,
        )
        .bind(&settings.store_name)
        .bind(settings.vat_enabled)
        .bind(settings.vat_rate_bps)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    #[tokio::test]
    async fn test_defaults_seeded_by_migration() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let settings = db.settings().load().await.unwrap();
        assert!(settings.vat_enabled);
        assert_eq!(settings.vat_rate_bps, 2000);
    }

    #[tokio::test]
    async fn test_save_and_reload() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.settings();

        let mut settings = repo.load().await.unwrap();
        settings.store_name = "Shear Bliss".to_string();
        settings.vat_enabled = false;
        repo.save(&settings).await.unwrap();

        let reloaded = repo.load().await.unwrap();
        assert_eq!(reloaded.store_name, "Shear Bliss");
        assert!(!reloaded.vat_enabled);
        assert!(!reloaded.vat_config().enabled);
    }
}
