//! Rental pricing.
//!
//! Turns a per-day price, a rental period, quantity and insurance choice
//! into a quote, and a whole cart into a checkout summary.

mod engine;
mod insurance;
mod promo;
mod summary;

pub use engine::{rental_days, PricingEngine};
pub use insurance::{InsuranceOption, InsuranceRates};
pub use promo::{AppliedPromo, PromoCode};
pub use summary::{CartSummary, LineItemPricing, RentalQuote};
