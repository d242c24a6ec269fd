//! Rental storefront core for Drape.
//!
//! This crate holds the storefront's domain logic, independent of any UI:
//!
//! - **Catalog**: Products, listing filters, related products
//! - **Availability**: Blocked dates and the rental date selector
//! - **Pricing**: Rental days, insurance, delivery fee, promo codes
//! - **Cart**: Line items keyed by product, size and rental dates
//! - **Wishlist**: Saved products, persisted through `drape-cache`
//! - **Checkout**: Step flow and single-flight order placement
//!
//! # Example
//!
//! ```rust
//! use drape_commerce::prelude::*;
//! use chrono::NaiveDate;
//! use std::sync::Arc;
//!
//! let today = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
//! let catalog = InMemoryCatalog::seeded(today);
//! let dress = catalog.get_product_by_id(&ProductId::new("1")).unwrap();
//!
//! // Pick dates
//! let mut selector = DateSelector::new(catalog.calendar_for(&dress.id, today).unwrap());
//! selector.select(NaiveDate::from_ymd_opt(2025, 3, 10).unwrap());
//! selector.select(NaiveDate::from_ymd_opt(2025, 3, 13).unwrap());
//! let period = selector.period().unwrap();
//!
//! // Add to a cart
//! let mut cart = CartStore::new(Arc::new(TracingNotifier));
//! cart.add_item(LineDraft::from_product(&dress).with_size("M").with_rental(period))
//!     .unwrap();
//!
//! let summary = cart.summary(&PricingEngine::default()).unwrap();
//! assert_eq!(summary.rental_total.display(), "\u{20b9}168");
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod availability;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod notify;
pub mod pricing;
pub mod wishlist;

pub use error::CommerceError;
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    // Catalog
    pub use crate::catalog::{
        CatalogProvider, Filter, InMemoryCatalog, Product, ProductFilter, ProductType, SortOption,
    };

    // Availability
    pub use crate::availability::{
        AvailabilityCalendar, DateSelector, RentalPeriod, RentalPolicy, SelectionError,
        SelectionState, UnavailableRange,
    };

    // Pricing
    pub use crate::pricing::{
        rental_days, AppliedPromo, CartSummary, InsuranceOption, PricingEngine, RentalQuote,
    };

    // Cart
    pub use crate::cart::{CartLineItem, CartStore, LineDraft, LineKey, SharedCart};

    // Wishlist
    pub use crate::wishlist::{KvWishlistRepository, WishlistRepository, WishlistStore};

    // Checkout
    pub use crate::checkout::{
        Address, CheckoutFlow, CheckoutService, CheckoutStep, Order, OrderService, OrderStatus,
        PaymentDetails, PaymentMethod, SessionProvider, SimulatedOrderService,
    };

    pub use crate::config::StorefrontConfig;
    pub use crate::notify::{NotificationKind, Notifier, RecordingNotifier, TracingNotifier};
}
