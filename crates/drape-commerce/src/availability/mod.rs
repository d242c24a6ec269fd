//! Rental availability.
//!
//! - [`AvailabilityCalendar`] - which dates can be rented
//! - [`DateSelector`] - the start/end picking state machine
//! - [`RentalPeriod`] - a validated rental range

mod calendar;
mod period;
mod selector;

pub use calendar::AvailabilityCalendar;
pub use period::{RentalPeriod, RentalPolicy, UnavailableRange};
pub use selector::{DateSelector, SelectionError, SelectionState};
