//! Order types.

use crate::availability::RentalPeriod;
use crate::cart::CartLineItem;
use crate::checkout::{Address, ContactDetails, PaymentMethod};
use crate::ids::{OrderId, ProductId};
use crate::money::Money;
use crate::pricing::{CartSummary, InsuranceOption};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Order status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Order placed, awaiting processing.
    #[default]
    Pending,
    /// Order confirmed by the store.
    Confirmed,
    /// Items delivered to the customer.
    Delivered,
    /// Order cancelled.
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Confirmed => "Confirmed",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Cancelled => "Cancelled",
        }
    }

    /// Check if order is in a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }

    /// Check if order can be cancelled.
    pub fn can_cancel(&self) -> bool {
        matches!(self, OrderStatus::Pending | OrderStatus::Confirmed)
    }
}

/// A line item captured at checkout.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OrderLine {
    pub product_id: ProductId,
    pub name: String,
    pub size: Option<String>,
    pub rental: Option<RentalPeriod>,
    pub quantity: i64,
    pub price_per_day: Money,
    pub insurance: InsuranceOption,
}

impl From<&CartLineItem> for OrderLine {
    fn from(item: &CartLineItem) -> Self {
        Self {
            product_id: item.product_id.clone(),
            name: item.name.clone(),
            size: item.size.clone(),
            rental: item.rental,
            quantity: item.quantity,
            price_per_day: item.price_per_day,
            insurance: item.insurance,
        }
    }
}

/// Everything the order service needs to place an order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderRequest {
    pub contact: ContactDetails,
    pub lines: Vec<OrderLine>,
    pub shipping_address: Address,
    pub payment_method: PaymentMethod,
    pub summary: CartSummary,
}

/// A placed order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    pub id: OrderId,
    /// Human-readable order number.
    pub order_number: String,
    pub contact: ContactDetails,
    pub status: OrderStatus,
    pub lines: Vec<OrderLine>,
    pub shipping_address: Address,
    pub payment_method: PaymentMethod,
    pub summary: CartSummary,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// Create a pending order from a request.
    pub fn from_request(request: OrderRequest) -> Self {
        let now = Utc::now();
        Self {
            id: OrderId::generate(),
            order_number: Self::generate_order_number(),
            contact: request.contact,
            status: OrderStatus::Pending,
            lines: request.lines,
            shipping_address: request.shipping_address,
            payment_method: request.payment_method,
            summary: request.summary,
            created_at: now,
            updated_at: now,
        }
    }

    /// Generate a human-readable order number.
    pub fn generate_order_number() -> String {
        use std::sync::atomic::{AtomicU32, Ordering};
        static SEQUENCE: AtomicU32 = AtomicU32::new(0);

        let millis = Utc::now().timestamp_millis();
        let seq = SEQUENCE.fetch_add(1, Ordering::Relaxed) % 1000;
        format!("ORD-{}{:03}", millis, seq)
    }

    pub fn total(&self) -> Money {
        self.summary.total
    }

    /// Total units ordered.
    pub fn item_count(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    pub fn confirm(&mut self) -> bool {
        self.transition(OrderStatus::Pending, OrderStatus::Confirmed)
    }

    pub fn cancel(&mut self) -> bool {
        if !self.status.can_cancel() {
            return false;
        }
        self.status = OrderStatus::Cancelled;
        self.updated_at = Utc::now();
        true
    }

    fn transition(&mut self, from: OrderStatus, to: OrderStatus) -> bool {
        if self.status != from {
            return false;
        }
        self.status = to;
        self.updated_at = Utc::now();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::PricingEngine;

    fn order() -> Order {
        let summary = PricingEngine::default().summarize(&[], None).unwrap();
        Order::from_request(OrderRequest {
            contact: ContactDetails::default(),
            lines: Vec::new(),
            shipping_address: Address::default(),
            payment_method: PaymentMethod::CashOnDelivery,
            summary,
        })
    }

    #[test]
    fn test_order_numbers_are_unique() {
        let a = Order::generate_order_number();
        let b = Order::generate_order_number();
        assert!(a.starts_with("ORD-"));
        assert_ne!(a, b);
    }

    #[test]
    fn test_order_status_lifecycle() {
        let mut order = order();
        assert_eq!(order.status, OrderStatus::Pending);
        assert!(order.confirm());
        assert!(!order.confirm());
        assert!(order.cancel());
        assert!(order.status.is_terminal());
        assert!(!order.cancel());
    }

    #[test]
    fn test_status_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&OrderStatus::Delivered).unwrap(), "\"delivered\"");
    }
}
