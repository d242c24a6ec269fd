//! CLI configuration.

use std::path::PathBuf;

use anyhow::{Context, Result};
use drape_commerce::config::StorefrontConfig;
use drape_commerce::Currency;
use serde::{Deserialize, Serialize};

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Pricing, promo and checkout settings.
    #[serde(default)]
    pub storefront: StorefrontConfig,

    /// Where the wishlist and placed orders are kept.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Log filter and format.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        if path.ends_with(".json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path))
        }
    }

    /// Problems that make the storefront unusable, then ones worth a warning.
    pub fn validate(&self) -> (Vec<String>, Vec<String>) {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();
        let store = &self.storefront;

        if store.delivery_fee_units < 0 {
            errors.push("storefront.delivery_fee_units must not be negative".to_string());
        }
        if store.rental.min_days == 0 {
            errors.push("storefront.rental.min_days must be at least 1".to_string());
        }
        if store.rental.min_days > store.rental.max_days {
            errors.push(format!(
                "storefront.rental.min_days ({}) is above max_days ({})",
                store.rental.min_days, store.rental.max_days
            ));
        }
        for promo in &store.promos {
            if promo.code.trim().is_empty() {
                errors.push("storefront.promos has an empty code".to_string());
            }
            if promo.percent_bps > 10_000 {
                errors.push(format!(
                    "promo {} discounts more than 100% ({} bps)",
                    promo.code, promo.percent_bps
                ));
            }
        }
        if store.currency != Currency::INR {
            warnings.push(format!(
                "storefront.currency is {}; the launch catalog is priced in INR",
                store.currency.code()
            ));
        }
        if store.insurance.basic_bps > store.insurance.premium_bps {
            warnings.push("basic insurance costs more than premium".to_string());
        }
        if store.checkout.processing_delay_ms > 30_000 {
            warnings.push(format!(
                "checkout.processing_delay_ms is {} ms",
                store.checkout.processing_delay_ms
            ));
        }
        if self.logging.level.trim().is_empty() {
            warnings.push("logging.level is empty".to_string());
        }

        (errors, warnings)
    }
}

/// Local storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Data directory, relative to the working directory unless absolute.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from(".drape")
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    #[serde(default = "default_level")]
    pub level: String,

    #[serde(default)]
    pub format: LogFormat,
}

fn default_level() -> String {
    "warn".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: LogFormat::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Human,
    Json,
}

/// Generate a default drape.toml config file.
pub fn generate_default_config() -> String {
    r#"# Drape storefront configuration

[storefront]
currency = "INR"
delivery_fee_units = 15

[storefront.insurance]
basic_bps = 500
premium_bps = 1200

[[storefront.promos]]
code = "FIRST20"
percent_bps = 2000

[storefront.rental]
min_days = 3
max_days = 14

[storefront.checkout]
processing_delay_ms = 1500

[storage]
data_dir = ".drape"

[logging]
level = "warn"
format = "human"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_parses_to_defaults() {
        let config: CliConfig = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(config.storefront, StorefrontConfig::default());
        assert_eq!(config.storage.data_dir, PathBuf::from(".drape"));
        assert_eq!(config.logging.format, LogFormat::Human);
    }

    #[test]
    fn test_empty_document_uses_defaults() {
        let config: CliConfig = toml::from_str("").unwrap();
        assert_eq!(config.storefront.delivery_fee_units, 15);
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_validate_rejects_inverted_rental_policy() {
        let mut config = CliConfig::default();
        config.storefront.rental.min_days = 10;
        config.storefront.rental.max_days = 5;
        let (errors, _) = config.validate();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("min_days"));
    }

    #[test]
    fn test_load_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("drape.json");
        let path = path.to_str().unwrap();

        let mut config = CliConfig::default();
        config.storefront.delivery_fee_units = 40;
        std::fs::write(path, serde_json::to_string_pretty(&config).unwrap()).unwrap();

        let loaded = CliConfig::load(path).unwrap();
        assert_eq!(loaded.storefront.delivery_fee_units, 40);
    }
}
