//! Storefront configuration.
//!
//! Every field has a default, so an empty TOML or JSON document yields the
//! launch storefront: INR, a flat delivery fee of 15, basic/premium
//! insurance at 5%/12% and the `FIRST20` promo.

use crate::availability::RentalPolicy;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Pricing and checkout settings shared by the stores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorefrontConfig {
    #[serde(default)]
    pub currency: Currency,

    /// Flat delivery fee in whole currency units.
    #[serde(default = "default_delivery_fee_units")]
    pub delivery_fee_units: i64,

    #[serde(default)]
    pub insurance: InsuranceConfig,

    #[serde(default = "default_promos")]
    pub promos: Vec<PromoConfig>,

    #[serde(default)]
    pub rental: RentalPolicy,

    #[serde(default)]
    pub checkout: CheckoutConfig,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            currency: Currency::default(),
            delivery_fee_units: default_delivery_fee_units(),
            insurance: InsuranceConfig::default(),
            promos: default_promos(),
            rental: RentalPolicy::default(),
            checkout: CheckoutConfig::default(),
        }
    }
}

impl StorefrontConfig {
    pub fn delivery_fee(&self) -> Money {
        Money::from_major(self.delivery_fee_units, self.currency)
    }
}

/// Insurance rates in basis points of the rental cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsuranceConfig {
    #[serde(default = "default_basic_bps")]
    pub basic_bps: u32,
    #[serde(default = "default_premium_bps")]
    pub premium_bps: u32,
}

impl Default for InsuranceConfig {
    fn default() -> Self {
        Self {
            basic_bps: default_basic_bps(),
            premium_bps: default_premium_bps(),
        }
    }
}

/// A percentage-off promo code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromoConfig {
    pub code: String,
    pub percent_bps: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutConfig {
    /// Simulated order processing time.
    #[serde(default = "default_processing_delay_ms")]
    pub processing_delay_ms: u64,
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            processing_delay_ms: default_processing_delay_ms(),
        }
    }
}

impl CheckoutConfig {
    pub fn processing_delay(&self) -> Duration {
        Duration::from_millis(self.processing_delay_ms)
    }
}

fn default_delivery_fee_units() -> i64 {
    15
}

fn default_basic_bps() -> u32 {
    500
}

fn default_premium_bps() -> u32 {
    1200
}

fn default_promos() -> Vec<PromoConfig> {
    vec![PromoConfig {
        code: "FIRST20".to_string(),
        percent_bps: 2000,
    }]
}

fn default_processing_delay_ms() -> u64 {
    1500
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config: StorefrontConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, StorefrontConfig::default());
        assert_eq!(config.delivery_fee(), Money::from_major(15, Currency::INR));
        assert_eq!(config.rental.min_days, 3);
        assert_eq!(config.rental.max_days, 14);
        assert_eq!(config.promos[0].code, "FIRST20");
    }

    #[test]
    fn test_partial_override() {
        let config: StorefrontConfig =
            serde_json::from_str(r#"{"insurance": {"premium_bps": 1500}, "rental": {"max_days": 7}}"#)
                .unwrap();
        assert_eq!(config.insurance.basic_bps, 500);
        assert_eq!(config.insurance.premium_bps, 1500);
        assert_eq!(config.rental.min_days, 3);
        assert_eq!(config.rental.max_days, 7);
    }
}
