//! Product catalog module.
//!
//! Contains product types, listing filters and the catalog provider.

mod filter;
mod product;
mod provider;
mod seed;

pub use filter::{Filter, ProductFilter, SortOption};
pub use product::{Product, ProductType, DEFAULT_SIZES};
pub use provider::{CatalogProvider, InMemoryCatalog, DEFAULT_RELATED_LIMIT};
