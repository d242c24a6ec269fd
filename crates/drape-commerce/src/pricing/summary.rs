use crate::ids::LineItemId;
use crate::money::Money;
use crate::pricing::InsuranceOption;
use serde::{Deserialize, Serialize};

/// Price of renting one product over one period, as shown before it is
/// added to the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RentalQuote {
    pub price_per_day: Money,
    pub quantity: i64,
    pub rental_days: i64,
    /// price_per_day * quantity * rental_days
    pub rental_cost: Money,
    pub insurance: InsuranceOption,
    pub insurance_cost: Money,
    pub delivery_fee: Money,
    /// rental_cost + insurance_cost + delivery_fee
    pub subtotal: Money,
    pub promo_code: Option<String>,
    pub discount: Money,
    /// subtotal - discount, never negative
    pub total: Money,
}

/// Checkout totals for the whole cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartSummary {
    pub lines: Vec<LineItemPricing>,
    pub rental_total: Money,
    pub insurance_total: Money,
    pub delivery_fee: Money,
    pub subtotal: Money,
    pub promo_code: Option<String>,
    pub discount: Money,
    pub total: Money,
}

impl CartSummary {
    pub fn has_discount(&self) -> bool {
        self.discount.is_positive()
    }

    /// Total units across all lines.
    pub fn item_count(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }
}

/// Pricing breakdown for a single cart line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItemPricing {
    pub line_item_id: LineItemId,
    pub price_per_day: Money,
    pub quantity: i64,
    pub rental_days: i64,
    pub rental_cost: Money,
    pub insurance: InsuranceOption,
    pub insurance_cost: Money,
}

impl LineItemPricing {
    /// Rental plus insurance for this line.
    pub fn total(&self) -> Option<Money> {
        self.rental_cost.try_add(&self.insurance_cost)
    }
}
