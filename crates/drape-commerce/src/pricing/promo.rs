use crate::config::PromoConfig;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// A percentage-off promo code known to the storefront.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromoCode {
    code: String,
    percent_bps: u32,
}

impl PromoCode {
    pub fn new(code: impl Into<String>, percent_bps: u32) -> Self {
        let code: String = code.into();
        Self {
            code: code.trim().to_uppercase(),
            percent_bps,
        }
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn percent_bps(&self) -> u32 {
        self.percent_bps
    }

    /// Codes compare case-insensitively, ignoring surrounding whitespace.
    pub fn matches(&self, input: &str) -> bool {
        self.code.eq_ignore_ascii_case(input.trim())
    }
}

impl From<&PromoConfig> for PromoCode {
    fn from(config: &PromoConfig) -> Self {
        PromoCode::new(config.code.clone(), config.percent_bps)
    }
}

/// A promo accepted for the current cart session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedPromo {
    pub code: String,
    pub percent_bps: u32,
}

impl AppliedPromo {
    pub fn from_promo(promo: &PromoCode) -> Self {
        Self {
            code: promo.code.clone(),
            percent_bps: promo.percent_bps,
        }
    }

    /// Discount on `subtotal`, rounded half-up to whole currency units.
    pub fn discount_on(&self, subtotal: &Money) -> Option<Money> {
        subtotal.portion_rounded(self.percent_bps)
    }

    /// "20% off" style label.
    pub fn label(&self) -> String {
        let whole = self.percent_bps / 100;
        let frac = self.percent_bps % 100;
        if frac == 0 {
            format!("{}% off", whole)
        } else {
            format!("{}.{:02}% off", whole, frac)
        }
    }
}
