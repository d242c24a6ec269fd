use super::calendar::AvailabilityCalendar;
use super::period::RentalPeriod;
use chrono::NaiveDate;
use std::fmt;
use thiserror::Error;

/// Where the user is in picking a rental range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionState {
    #[default]
    Empty,
    StartSelected {
        start: NaiveDate,
    },
    RangeSelected {
        start: NaiveDate,
        end: NaiveDate,
    },
}

impl SelectionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            SelectionState::Empty => "empty",
            SelectionState::StartSelected { .. } => "start_selected",
            SelectionState::RangeSelected { .. } => "range_selected",
        }
    }
}

impl fmt::Display for SelectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectionState::Empty => write!(f, "no dates selected"),
            SelectionState::StartSelected { start } => write!(f, "start {}", start),
            SelectionState::RangeSelected { start, end } => write!(f, "{} to {}", start, end),
        }
    }
}

/// Why the last selection was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("date is unavailable")]
    DateUnavailable(NaiveDate),

    #[error("range includes unavailable dates")]
    RangeIncludesUnavailable(NaiveDate),

    #[error("minimum rental period is {0} days")]
    BelowMinimum(u32),

    #[error("maximum rental period is {0} days")]
    AboveMaximum(u32),
}

/// Two-click rental range picker.
///
/// Rejections never move the state; they are reported through
/// [`DateSelector::error`] until the next accepted click.
#[derive(Debug, Clone)]
pub struct DateSelector {
    calendar: AvailabilityCalendar,
    state: SelectionState,
    error: Option<SelectionError>,
}

impl DateSelector {
    pub fn new(calendar: AvailabilityCalendar) -> Self {
        Self {
            calendar,
            state: SelectionState::Empty,
            error: None,
        }
    }

    pub fn calendar(&self) -> &AvailabilityCalendar {
        &self.calendar
    }

    pub fn state(&self) -> SelectionState {
        self.state
    }

    pub fn error(&self) -> Option<SelectionError> {
        self.error
    }

    /// The validated range, once both dates are picked.
    pub fn period(&self) -> Option<RentalPeriod> {
        match self.state {
            SelectionState::RangeSelected { start, end } => RentalPeriod::new(start, end).ok(),
            _ => None,
        }
    }

    pub fn reset(&mut self) {
        self.state = SelectionState::Empty;
        self.error = None;
    }

    /// Handle a click on `date`.
    pub fn select(&mut self, date: NaiveDate) -> SelectionState {
        if self.calendar.is_date_unavailable(date) {
            tracing::debug!(%date, "rejected unavailable date");
            self.error = Some(SelectionError::DateUnavailable(date));
            return self.state;
        }

        let start = match self.state {
            SelectionState::StartSelected { start } if date > start => start,
            _ => {
                self.state = SelectionState::StartSelected { start: date };
                self.error = None;
                return self.state;
            }
        };

        match self.check_range(start, date) {
            Ok(()) => {
                self.state = SelectionState::RangeSelected { start, end: date };
                self.error = None;
            }
            Err(e) => {
                tracing::debug!(%start, end = %date, error = %e, "rejected rental range");
                self.error = Some(e);
            }
        }
        self.state
    }

    fn check_range(&self, start: NaiveDate, end: NaiveDate) -> Result<(), SelectionError> {
        if let Some(blocked) = self.calendar.first_unavailable_between(start, end) {
            return Err(SelectionError::RangeIncludesUnavailable(blocked));
        }

        let policy = self.calendar.policy();
        let days = (end - start).num_days();
        if days < i64::from(policy.min_days) {
            return Err(SelectionError::BelowMinimum(policy.min_days));
        }
        if days > i64::from(policy.max_days) {
            return Err(SelectionError::AboveMaximum(policy.max_days));
        }
        Ok(())
    }
}
