use crate::availability::{AvailabilityCalendar, RentalPolicy, UnavailableRange};
use crate::catalog::{Product, ProductFilter};
use crate::error::CommerceError;
use crate::ids::ProductId;
use chrono::NaiveDate;
use std::collections::HashMap;

/// How many related products a detail page shows.
pub const DEFAULT_RELATED_LIMIT: usize = 4;

/// Source of product records and their blocked dates.
pub trait CatalogProvider: Send + Sync {
    fn get_product_by_id(&self, id: &ProductId) -> Option<Product>;

    fn list_products(&self, filter: &ProductFilter) -> Vec<Product>;

    /// Products in `category` other than `id`, in catalog order.
    fn get_related_products(&self, id: &ProductId, category: &str, limit: usize) -> Vec<Product>;

    fn unavailable_ranges(&self, id: &ProductId) -> Vec<UnavailableRange>;

    /// Availability calendar for a product, using its own rental policy.
    fn calendar_for(
        &self,
        id: &ProductId,
        today: NaiveDate,
    ) -> Result<AvailabilityCalendar, CommerceError> {
        let product = self
            .get_product_by_id(id)
            .ok_or_else(|| CommerceError::ProductNotFound(id.to_string()))?;
        Ok(AvailabilityCalendar::new(today, product.rental_policy)
            .with_unavailable(self.unavailable_ranges(id)))
    }
}

/// Catalog held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    products: Vec<Product>,
    unavailable: HashMap<ProductId, Vec<UnavailableRange>>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// The launch catalog, with blocked dates relative to `today`.
    pub fn seeded(today: NaiveDate) -> Self {
        super::seed::launch_catalog(today)
    }

    /// Insert or replace a product.
    pub fn insert(&mut self, product: Product) {
        match self.products.iter_mut().find(|p| p.id == product.id) {
            Some(existing) => *existing = product,
            None => self.products.push(product),
        }
    }

    pub fn block(&mut self, id: &ProductId, range: UnavailableRange) {
        self.unavailable.entry(id.clone()).or_default().push(range);
    }

    /// Apply a storefront-wide rental policy to every rental product.
    pub fn with_rental_policy(mut self, policy: RentalPolicy) -> Self {
        for product in self.products.iter_mut().filter(|p| p.is_rental()) {
            product.rental_policy = policy;
        }
        self
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl CatalogProvider for InMemoryCatalog {
    fn get_product_by_id(&self, id: &ProductId) -> Option<Product> {
        let found = self.products.iter().find(|p| &p.id == id).cloned();
        tracing::debug!(product_id = %id, found = found.is_some(), "catalog lookup");
        found
    }

    fn list_products(&self, filter: &ProductFilter) -> Vec<Product> {
        filter.apply(&self.products)
    }

    fn get_related_products(&self, id: &ProductId, category: &str, limit: usize) -> Vec<Product> {
        self.products
            .iter()
            .filter(|p| &p.id != id && p.category.eq_ignore_ascii_case(category))
            .take(limit)
            .cloned()
            .collect()
    }

    fn unavailable_ranges(&self, id: &ProductId) -> Vec<UnavailableRange> {
        self.unavailable.get(id).cloned().unwrap_or_default()
    }
}
