//! # Runtime Configuration
//!
//! Configuration assembled at session start.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`ORCHID_*`)
//! 2. Database (`settings` table, via [`StoreSettings`])
//! 3. Defaults (this file)
//!
//! ## Thread Safety
//! Configuration is read-only after initialization, so no mutex needed.
//! If settings editing in the UI is added later, reload and replace.

use serde::{Deserialize, Serialize};

use orchid_core::{VatConfig, VatRate, DEFAULT_VAT_RATE_BPS};
use orchid_db::StoreSettings;

/// Runtime configuration for a POS session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuntimeConfig {
    /// Store name (displayed in the header and on receipts)
    pub store_name: String,

    /// Currency symbol (for display)
    pub currency_symbol: String,

    /// Number of decimal places for currency
    pub currency_decimals: u8,

    /// VAT configuration applied to every totals calculation
    pub vat: VatConfig,
}

impl Default for RuntimeConfig {
    /// Returns default configuration suitable for development.
    ///
    /// ## Default Values
    /// - Store: "Orchid Salon"
    /// - Currency: GBP (£)
    /// - VAT: enabled at 20%
    fn default() -> Self {
        RuntimeConfig {
            store_name: "Orchid Salon".to_string(),
            currency_symbol: "£".to_string(),
            currency_decimals: 2,
            vat: VatConfig::enabled(VatRate::from_bps(DEFAULT_VAT_RATE_BPS)),
        }
    }
}

impl RuntimeConfig {
    /// Builds a config from the persisted settings row, then applies
    /// environment overrides.
    ///
    /// ## Environment Variables
    /// - `ORCHID_STORE_NAME`: Override store name
    /// - `ORCHID_VAT_ENABLED`: "0" / "false" disables VAT entirely
    /// - `ORCHID_VAT_RATE`: Override VAT rate as a percentage (e.g., "20")
    pub fn from_settings(settings: &StoreSettings) -> Self {
        let mut config = RuntimeConfig {
            store_name: settings.store_name.clone(),
            vat: settings.vat_config(),
            ..RuntimeConfig::default()
        };

        if let Ok(store_name) = std::env::var("ORCHID_STORE_NAME") {
            config.store_name = store_name;
        }

        if let Ok(enabled) = std::env::var("ORCHID_VAT_ENABLED") {
            if enabled == "0" || enabled.eq_ignore_ascii_case("false") {
                config.vat = VatConfig::disabled();
            }
        }

        if let Ok(rate_str) = std::env::var("ORCHID_VAT_RATE") {
            if let Ok(rate) = rate_str.parse::<f64>() {
                config.vat = VatConfig::enabled(VatRate::from_bps((rate * 100.0) as u32));
            }
        }

        config
    }

    /// Formats a pence amount as a currency string.
    ///
    /// ## Example
    /// ```rust,ignore
    /// let config = RuntimeConfig::default();
    /// assert_eq!(config.format_currency(1234), "£12.34");
    /// ```
    pub fn format_currency(&self, pence: i64) -> String {
        let divisor = 10_i64.pow(self.currency_decimals as u32);
        let whole = pence / divisor;
        let frac = (pence % divisor).abs();

        format!(
            "{}{}{}",
            if pence < 0 { "-" } else { "" },
            self.currency_symbol,
            if self.currency_decimals > 0 {
                format!(
                    "{}.{:0width$}",
                    whole.abs(),
                    frac,
                    width = self.currency_decimals as usize
                )
            } else {
                whole.abs().to_string()
            }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Tests mutate process-wide environment variables, so every test
    // that calls from_settings() must hold this lock.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn default_settings() -> StoreSettings {
        StoreSettings {
            store_name: "Orchid POS".to_string(),
            vat_enabled: true,
            vat_rate_bps: 2000,
        }
    }

    #[test]
    fn test_format_currency_positive() {
        let config = RuntimeConfig::default();
        assert_eq!(config.format_currency(1234), "£12.34");
        assert_eq!(config.format_currency(100), "£1.00");
        assert_eq!(config.format_currency(1), "£0.01");
        assert_eq!(config.format_currency(0), "£0.00");
    }

    #[test]
    fn test_format_currency_negative() {
        let config = RuntimeConfig::default();
        assert_eq!(config.format_currency(-1234), "-£12.34");
    }

    #[test]
    fn test_from_settings_carries_vat() {
        let _guard = ENV_LOCK.lock().unwrap();

        let settings = StoreSettings {
            vat_enabled: false,
            store_name: "Shear Bliss".to_string(),
            ..default_settings()
        };

        let config = RuntimeConfig::from_settings(&settings);
        assert_eq!(config.store_name, "Shear Bliss");
        assert!(!config.vat.enabled);
    }

    #[test]
    fn test_env_overrides_settings_row() {
        let _guard = ENV_LOCK.lock().unwrap();

        std::env::set_var("ORCHID_STORE_NAME", "Pop-up Stand");
        std::env::set_var("ORCHID_VAT_RATE", "5");
        let config = RuntimeConfig::from_settings(&default_settings());
        std::env::remove_var("ORCHID_STORE_NAME");
        std::env::remove_var("ORCHID_VAT_RATE");

        assert_eq!(config.store_name, "Pop-up Stand");
        assert!(config.vat.enabled);
        assert_eq!(config.vat.rate.bps(), 500);
    }

    #[test]
    fn test_env_can_disable_vat() {
        let _guard = ENV_LOCK.lock().unwrap();

        std::env::set_var("ORCHID_VAT_ENABLED", "false");
        let config = RuntimeConfig::from_settings(&default_settings());
        std::env::remove_var("ORCHID_VAT_ENABLED");

        assert!(!config.vat.enabled);
    }
}
