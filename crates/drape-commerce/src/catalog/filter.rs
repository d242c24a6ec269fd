//! Catalog filtering and sorting.

use crate::catalog::{Product, ProductType};
use crate::money::Money;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A single product filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Filter {
    /// Substring of name, brand or category.
    Text(String),
    /// Exact category, case-insensitive.
    Category(String),
    /// Any of these categories.
    Categories(Vec<String>),
    Brand(String),
    Brands(Vec<String>),
    /// Per-day price range, bounds inclusive.
    PriceRange {
        min: Option<Money>,
        max: Option<Money>,
    },
    NewOnly,
    ProductType(ProductType),
}

impl Filter {
    pub fn text(query: impl Into<String>) -> Self {
        Filter::Text(query.into())
    }

    pub fn category(name: impl Into<String>) -> Self {
        Filter::Category(name.into())
    }

    pub fn brand(name: impl Into<String>) -> Self {
        Filter::Brand(name.into())
    }

    pub fn price_range(min: Option<Money>, max: Option<Money>) -> Self {
        Filter::PriceRange { min, max }
    }

    /// Check whether a product passes this filter.
    pub fn matches(&self, product: &Product) -> bool {
        match self {
            Filter::Text(query) => product.matches_text(query),
            Filter::Category(name) => product.category.eq_ignore_ascii_case(name),
            Filter::Categories(names) => {
                names.is_empty() || names.iter().any(|n| product.category.eq_ignore_ascii_case(n))
            }
            Filter::Brand(name) => product.brand.eq_ignore_ascii_case(name),
            Filter::Brands(names) => {
                names.is_empty() || names.iter().any(|n| product.brand.eq_ignore_ascii_case(n))
            }
            Filter::PriceRange { min, max } => {
                let price = product.price_per_day.amount_minor;
                min.map_or(true, |m| price >= m.amount_minor)
                    && max.map_or(true, |m| price <= m.amount_minor)
            }
            Filter::NewOnly => product.is_new,
            Filter::ProductType(pt) => product.product_type == *pt,
        }
    }
}

/// Sort options for product listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SortOption {
    /// Manual catalog order.
    #[default]
    Featured,
    PriceAsc,
    PriceDesc,
    NameAsc,
    /// New arrivals first, then featured order.
    Newest,
}

impl SortOption {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOption::Featured => "featured",
            SortOption::PriceAsc => "price_asc",
            SortOption::PriceDesc => "price_desc",
            SortOption::NameAsc => "name_asc",
            SortOption::Newest => "newest",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SortOption::Featured => "Featured",
            SortOption::PriceAsc => "Price: Low to High",
            SortOption::PriceDesc => "Price: High to Low",
            SortOption::NameAsc => "Name: A-Z",
            SortOption::Newest => "Newest",
        }
    }

    fn sort(&self, products: &mut [Product]) {
        match self {
            SortOption::Featured => products.sort_by_key(|p| p.position),
            SortOption::PriceAsc => {
                products.sort_by_key(|p| (p.price_per_day.amount_minor, p.position))
            }
            SortOption::PriceDesc => products
                .sort_by_key(|p| (std::cmp::Reverse(p.price_per_day.amount_minor), p.position)),
            SortOption::NameAsc => products.sort_by_key(|p| p.name.to_lowercase()),
            SortOption::Newest => products.sort_by_key(|p| (!p.is_new, p.position)),
        }
    }
}

impl FromStr for SortOption {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "featured" => Ok(SortOption::Featured),
            "price_asc" => Ok(SortOption::PriceAsc),
            "price_desc" => Ok(SortOption::PriceDesc),
            "name_asc" | "name" => Ok(SortOption::NameAsc),
            "newest" => Ok(SortOption::Newest),
            other => Err(format!("unknown sort option: {}", other)),
        }
    }
}

/// A catalog listing request: filters, sort order and an optional limit.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductFilter {
    pub query: Option<String>,
    pub filters: Vec<Filter>,
    pub sort: SortOption,
    pub limit: Option<usize>,
}

impl ProductFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the free-text query. Blank queries are ignored.
    pub fn with_query(mut self, q: impl Into<String>) -> Self {
        let q = q.into();
        if !q.trim().is_empty() {
            self.query = Some(q.clone());
            self.filters.push(Filter::Text(q));
        }
        self
    }

    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn with_sort(mut self, sort: SortOption) -> Self {
        self.sort = sort;
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// All filters must match.
    pub fn matches(&self, product: &Product) -> bool {
        self.filters.iter().all(|f| f.matches(product))
    }

    /// Filter, sort and truncate a product list.
    pub fn apply<'a, I>(&self, products: I) -> Vec<Product>
    where
        I: IntoIterator<Item = &'a Product>,
    {
        let mut matched: Vec<Product> = products
            .into_iter()
            .filter(|p| self.matches(p))
            .cloned()
            .collect();
        self.sort.sort(&mut matched);
        if let Some(limit) = self.limit {
            matched.truncate(limit);
        }
        matched
    }
}
