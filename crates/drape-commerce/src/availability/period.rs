use crate::error::CommerceError;
use crate::pricing::rental_days;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A blocked date range. Both bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UnavailableRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl UnavailableRange {
    /// Create a range, swapping the bounds if they are reversed.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        if end < start {
            Self {
                start: end,
                end: start,
            }
        } else {
            Self { start, end }
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Minimum and maximum rental length in days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RentalPolicy {
    #[serde(default = "default_min_days")]
    pub min_days: u32,
    #[serde(default = "default_max_days")]
    pub max_days: u32,
}

impl Default for RentalPolicy {
    fn default() -> Self {
        Self {
            min_days: default_min_days(),
            max_days: default_max_days(),
        }
    }
}

impl RentalPolicy {
    pub fn new(min_days: u32, max_days: u32) -> Self {
        Self { min_days, max_days }
    }
}

fn default_min_days() -> u32 {
    3
}

fn default_max_days() -> u32 {
    14
}

/// A rental range that passed every selector rule.
///
/// Always satisfies `start < end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "RawPeriod")]
pub struct RentalPeriod {
    start: NaiveDate,
    end: NaiveDate,
}

impl RentalPeriod {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, CommerceError> {
        if start >= end {
            return Err(CommerceError::Validation(format!(
                "rental end {} must be after start {}",
                end, start
            )));
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Billable days for this period.
    pub fn days(&self) -> i64 {
        rental_days(self.start, self.end)
    }
}

impl fmt::Display for RentalPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

#[derive(Deserialize)]
struct RawPeriod {
    start: NaiveDate,
    end: NaiveDate,
}

impl TryFrom<RawPeriod> for RentalPeriod {
    type Error = CommerceError;

    fn try_from(raw: RawPeriod) -> Result<Self, Self::Error> {
        RentalPeriod::new(raw.start, raw.end)
    }
}
