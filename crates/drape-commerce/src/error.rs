//! Commerce error types.

use thiserror::Error;

/// Errors that can occur in storefront operations.
///
/// None of these are fatal: callers surface them as notices and keep the
/// previous state.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// Product not found.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Line item not in cart.
    #[error("Item not in cart: {0}")]
    ItemNotInCart(String),

    /// Invalid quantity.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),

    /// Quantity exceeds maximum allowed.
    #[error("Quantity {0} exceeds maximum allowed ({1})")]
    QuantityExceedsLimit(i64, i64),

    /// Input failed validation (missing size, dates, address fields...).
    #[error("{0}")]
    Validation(String),

    /// Unknown promo code.
    #[error("Invalid promo code: {0}")]
    InvalidPromoCode(String),

    /// A different promo is already applied; promos do not stack.
    #[error("Promo code {0} is already applied")]
    PromoAlreadyApplied(String),

    /// Invalid checkout state transition.
    #[error("Invalid checkout transition from {from} to {to}")]
    InvalidCheckoutTransition { from: String, to: String },

    /// Checkout incomplete.
    #[error("Checkout incomplete: missing {0}")]
    CheckoutIncomplete(String),

    /// An order submission is already running for this checkout.
    #[error("An order is already being placed")]
    CheckoutInFlight,

    /// Checkout attempted with nothing in the cart.
    #[error("Cart is empty")]
    EmptyCart,

    /// The order service rejected or failed the submission.
    #[error("Order submission failed: {0}")]
    OrderSubmission(String),

    /// Currency mismatch.
    #[error("Currency mismatch: expected {expected}, got {got}")]
    CurrencyMismatch { expected: String, got: String },

    /// Arithmetic overflow.
    #[error("Arithmetic overflow in money calculation")]
    Overflow,

    /// Durable storage error.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<drape_cache::CacheError> for CommerceError {
    fn from(e: drape_cache::CacheError) -> Self {
        CommerceError::Storage(e.to_string())
    }
}

impl From<serde_json::Error> for CommerceError {
    fn from(e: serde_json::Error) -> Self {
        CommerceError::Serialization(e.to_string())
    }
}
