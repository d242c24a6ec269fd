//! Product types.

use crate::availability::RentalPolicy;
use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Sizes offered when a product does not list its own.
pub const DEFAULT_SIZES: [&str; 4] = ["XS", "S", "M", "L"];

/// How a product is charged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ProductType {
    /// Priced per day; needs rental dates and a size to be added to a cart.
    #[default]
    Rental,
    /// Single flat price.
    FlatRate,
}

impl ProductType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductType::Rental => "rental",
            ProductType::FlatRate => "flat_rate",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "rental" => Some(ProductType::Rental),
            "flat_rate" | "flat" => Some(ProductType::FlatRate),
            _ => None,
        }
    }
}

/// A product in the catalog.
///
/// Immutable from the cart's point of view: line items copy the name and
/// price they need at add time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub brand: String,
    pub category: String,
    /// Rental price per day, or the flat price for flat-rate products.
    pub price_per_day: Money,
    /// Price to buy the item outright, shown for comparison.
    pub retail_price: Option<Money>,
    pub image: Option<String>,
    pub description: Option<String>,
    pub is_new: bool,
    pub product_type: ProductType,
    pub available_sizes: Vec<String>,
    pub rental_policy: RentalPolicy,
    /// Manual sort position for the featured ordering.
    pub position: i32,
}

impl Product {
    /// Create a rental product with the default sizes and rental policy.
    pub fn new(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        brand: impl Into<String>,
        category: impl Into<String>,
        price_per_day: Money,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            brand: brand.into(),
            category: category.into(),
            price_per_day,
            retail_price: None,
            image: None,
            description: None,
            is_new: false,
            product_type: ProductType::Rental,
            available_sizes: DEFAULT_SIZES.iter().map(|s| s.to_string()).collect(),
            rental_policy: RentalPolicy::default(),
            position: 0,
        }
    }

    pub fn with_retail_price(mut self, retail: Money) -> Self {
        self.retail_price = Some(retail);
        self
    }

    pub fn with_image(mut self, url: impl Into<String>) -> Self {
        self.image = Some(url.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_sizes<I, S>(mut self, sizes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.available_sizes = sizes.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_rental_policy(mut self, policy: RentalPolicy) -> Self {
        self.rental_policy = policy;
        self
    }

    pub fn with_position(mut self, position: i32) -> Self {
        self.position = position;
        self
    }

    pub fn flat_rate(mut self) -> Self {
        self.product_type = ProductType::FlatRate;
        self
    }

    pub fn mark_new(mut self) -> Self {
        self.is_new = true;
        self
    }

    pub fn is_rental(&self) -> bool {
        self.product_type == ProductType::Rental
    }

    /// Case-insensitive size lookup. Returns the canonical spelling.
    pub fn find_size(&self, size: &str) -> Option<&str> {
        self.available_sizes
            .iter()
            .find(|s| s.eq_ignore_ascii_case(size.trim()))
            .map(String::as_str)
    }

    /// Case-insensitive substring match on name, brand or category.
    pub fn matches_text(&self, query: &str) -> bool {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        self.name.to_lowercase().contains(&needle)
            || self.brand.to_lowercase().contains(&needle)
            || self.category.to_lowercase().contains(&needle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;

    fn suit() -> Product {
        Product::new("6", "Navy Blue Suit", "Hugo Boss", "Suits", Money::from_major(85, Currency::INR))
    }

    #[test]
    fn test_new_product_defaults() {
        let p = suit();
        assert!(p.is_rental());
        assert!(!p.is_new);
        assert_eq!(p.available_sizes, vec!["XS", "S", "M", "L"]);
        assert_eq!(p.rental_policy, RentalPolicy::new(3, 14));
    }

    #[test]
    fn test_find_size_is_case_insensitive() {
        let p = suit();
        assert_eq!(p.find_size("m"), Some("M"));
        assert_eq!(p.find_size("XL"), None);
    }

    #[test]
    fn test_matches_text() {
        let p = suit();
        assert!(p.matches_text("navy"));
        assert!(p.matches_text("BOSS"));
        assert!(p.matches_text("suit"));
        assert!(!p.matches_text("gown"));
        assert!(p.matches_text("  "));
    }

    #[test]
    fn test_product_type_parse() {
        assert_eq!(ProductType::from_str("Rental"), Some(ProductType::Rental));
        assert_eq!(ProductType::from_str("flat_rate"), Some(ProductType::FlatRate));
        assert_eq!(ProductType::from_str("bundle"), None);
    }
}
