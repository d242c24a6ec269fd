//! Line items and add-to-cart drafts.

use crate::availability::RentalPeriod;
use crate::catalog::Product;
use crate::error::CommerceError;
use crate::ids::{LineItemId, ProductId};
use crate::money::Money;
use crate::pricing::InsuranceOption;
use serde::{Deserialize, Serialize};

/// Maximum quantity allowed per line item.
pub const MAX_QUANTITY_PER_ITEM: i64 = 99;

/// What makes two cart lines the same line.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LineKey {
    pub product_id: ProductId,
    pub size: Option<String>,
    pub rental: Option<RentalPeriod>,
}

/// A line item in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLineItem {
    pub id: LineItemId,
    pub product_id: ProductId,
    /// Product name at add time.
    pub name: String,
    pub price_per_day: Money,
    pub image: Option<String>,
    /// Always at least 1.
    pub quantity: i64,
    pub size: Option<String>,
    pub rental: Option<RentalPeriod>,
    pub insurance: InsuranceOption,
    /// Unix timestamp of when the line was created.
    pub added_at: i64,
}

impl CartLineItem {
    pub fn key(&self) -> LineKey {
        LineKey {
            product_id: self.product_id.clone(),
            size: self.size.clone(),
            rental: self.rental,
        }
    }

    /// Rental days, or 1 for lines without dates.
    pub fn rental_days_or_one(&self) -> i64 {
        self.rental.map_or(1, |r| r.days())
    }

    /// `price_per_day * quantity * rental_days_or_one`.
    pub fn line_total(&self) -> Option<Money> {
        self.price_per_day
            .try_multiply(self.quantity)?
            .try_multiply(self.rental_days_or_one())
    }
}

/// A request to add a product to the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineDraft {
    pub product_id: ProductId,
    pub name: String,
    pub price_per_day: Money,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default = "default_quantity")]
    pub quantity: i64,
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub rental: Option<RentalPeriod>,
    #[serde(default)]
    pub insurance: InsuranceOption,
    /// Rental products need dates and a size before they can be added.
    #[serde(default)]
    pub requires_rental: bool,
}

fn default_quantity() -> i64 {
    1
}

impl LineDraft {
    /// Start a draft from a catalog product with a quantity of 1.
    pub fn from_product(product: &Product) -> Self {
        Self {
            product_id: product.id.clone(),
            name: product.name.clone(),
            price_per_day: product.price_per_day,
            image: product.image.clone(),
            quantity: 1,
            size: None,
            rental: None,
            insurance: InsuranceOption::None,
            requires_rental: product.is_rental(),
        }
    }

    pub fn with_quantity(mut self, quantity: i64) -> Self {
        self.quantity = quantity;
        self
    }

    pub fn with_size(mut self, size: impl Into<String>) -> Self {
        self.size = Some(size.into());
        self
    }

    pub fn with_rental(mut self, period: RentalPeriod) -> Self {
        self.rental = Some(period);
        self
    }

    pub fn with_insurance(mut self, insurance: InsuranceOption) -> Self {
        self.insurance = insurance;
        self
    }

    pub fn key(&self) -> LineKey {
        LineKey {
            product_id: self.product_id.clone(),
            size: self.size.clone(),
            rental: self.rental,
        }
    }

    /// Check the draft can become a line item.
    pub fn validate(&self) -> Result<(), CommerceError> {
        if self.quantity <= 0 {
            return Err(CommerceError::InvalidQuantity(self.quantity));
        }
        if self.quantity > MAX_QUANTITY_PER_ITEM {
            return Err(CommerceError::QuantityExceedsLimit(
                self.quantity,
                MAX_QUANTITY_PER_ITEM,
            ));
        }
        if self.requires_rental {
            if self.rental.is_none() {
                return Err(CommerceError::Validation(
                    "Please select rental dates".to_string(),
                ));
            }
            if self.size.as_deref().map_or(true, |s| s.trim().is_empty()) {
                return Err(CommerceError::Validation("Please select a size".to_string()));
            }
        }
        Ok(())
    }

    pub(crate) fn into_line(self, added_at: i64) -> CartLineItem {
        CartLineItem {
            id: LineItemId::generate(),
            product_id: self.product_id,
            name: self.name,
            price_per_day: self.price_per_day,
            image: self.image,
            quantity: self.quantity,
            size: self.size,
            rental: self.rental,
            insurance: self.insurance,
            added_at,
        }
    }
}
