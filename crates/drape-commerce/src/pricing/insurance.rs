use crate::config::InsuranceConfig;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Damage cover chosen for a rental.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsuranceOption {
    #[default]
    None,
    Basic,
    Premium,
}

impl InsuranceOption {
    pub fn as_str(&self) -> &'static str {
        match self {
            InsuranceOption::None => "none",
            InsuranceOption::Basic => "basic",
            InsuranceOption::Premium => "premium",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            InsuranceOption::None => "No insurance",
            InsuranceOption::Basic => "Basic protection",
            InsuranceOption::Premium => "Premium protection",
        }
    }
}

impl fmt::Display for InsuranceOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InsuranceOption {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "none" => Ok(InsuranceOption::None),
            "basic" => Ok(InsuranceOption::Basic),
            "premium" => Ok(InsuranceOption::Premium),
            other => Err(format!("unknown insurance option: {}", other)),
        }
    }
}

/// Insurance rates in basis points of the rental cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InsuranceRates {
    pub basic_bps: u32,
    pub premium_bps: u32,
}

impl InsuranceRates {
    pub fn rate_bps(&self, option: InsuranceOption) -> u32 {
        match option {
            InsuranceOption::None => 0,
            InsuranceOption::Basic => self.basic_bps,
            InsuranceOption::Premium => self.premium_bps,
        }
    }
}

impl From<InsuranceConfig> for InsuranceRates {
    fn from(config: InsuranceConfig) -> Self {
        Self {
            basic_bps: config.basic_bps,
            premium_bps: config.premium_bps,
        }
    }
}

impl Default for InsuranceRates {
    fn default() -> Self {
        InsuranceConfig::default().into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_option() {
        assert_eq!("Basic".parse::<InsuranceOption>(), Ok(InsuranceOption::Basic));
        assert_eq!("premium".parse::<InsuranceOption>(), Ok(InsuranceOption::Premium));
        assert!("gold".parse::<InsuranceOption>().is_err());
    }

    #[test]
    fn test_default_rates() {
        let rates = InsuranceRates::default();
        assert_eq!(rates.rate_bps(InsuranceOption::None), 0);
        assert_eq!(rates.rate_bps(InsuranceOption::Basic), 500);
        assert_eq!(rates.rate_bps(InsuranceOption::Premium), 1200);
    }
}
