use super::period::{RentalPolicy, UnavailableRange};
use chrono::{Local, NaiveDate};

/// Answers which dates a product can be rented on.
#[derive(Debug, Clone)]
pub struct AvailabilityCalendar {
    today: NaiveDate,
    unavailable: Vec<UnavailableRange>,
    policy: RentalPolicy,
}

impl AvailabilityCalendar {
    pub fn new(today: NaiveDate, policy: RentalPolicy) -> Self {
        Self {
            today,
            unavailable: Vec::new(),
            policy,
        }
    }

    /// Calendar anchored on the local date.
    pub fn starting_today(policy: RentalPolicy) -> Self {
        Self::new(Local::now().date_naive(), policy)
    }

    pub fn with_unavailable(mut self, ranges: impl IntoIterator<Item = UnavailableRange>) -> Self {
        self.unavailable.extend(ranges);
        self
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn policy(&self) -> RentalPolicy {
        self.policy
    }

    pub fn unavailable_ranges(&self) -> &[UnavailableRange] {
        &self.unavailable
    }

    /// Past dates and dates inside a blocked range are unavailable.
    /// Today is available.
    pub fn is_date_unavailable(&self, date: NaiveDate) -> bool {
        date < self.today || self.unavailable.iter().any(|r| r.contains(date))
    }

    /// First unavailable date strictly between `start` and `end`.
    pub fn first_unavailable_between(&self, start: NaiveDate, end: NaiveDate) -> Option<NaiveDate> {
        start
            .iter_days()
            .skip(1)
            .take_while(|d| *d < end)
            .find(|d| self.is_date_unavailable(*d))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, m, d).unwrap()
    }

    fn calendar() -> AvailabilityCalendar {
        AvailabilityCalendar::new(date(3, 1), RentalPolicy::default())
            .with_unavailable([UnavailableRange::new(date(3, 5), date(3, 8))])
    }

    #[test]
    fn test_past_dates_are_unavailable() {
        let cal = calendar();
        assert!(cal.is_date_unavailable(date(2, 28)));
        assert!(!cal.is_date_unavailable(date(3, 1)));
    }

    #[test]
    fn test_blocked_range_bounds_inclusive() {
        let cal = calendar();
        assert!(!cal.is_date_unavailable(date(3, 4)));
        assert!(cal.is_date_unavailable(date(3, 5)));
        assert!(cal.is_date_unavailable(date(3, 8)));
        assert!(!cal.is_date_unavailable(date(3, 9)));
    }

    #[test]
    fn test_first_unavailable_between_is_exclusive() {
        let cal = calendar();
        assert_eq!(cal.first_unavailable_between(date(3, 2), date(3, 10)), Some(date(3, 5)));
        assert_eq!(cal.first_unavailable_between(date(3, 1), date(3, 5)), None);
        assert_eq!(cal.first_unavailable_between(date(3, 8), date(3, 12)), None);
    }
}
