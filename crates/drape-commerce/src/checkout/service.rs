//! Order placement.

use crate::cart::{CartStore, SharedCart};
use crate::checkout::{CheckoutFlow, Order, OrderLine, OrderRequest};
use crate::config::CheckoutConfig;
use crate::error::CommerceError;
use crate::notify::Notifier;
use crate::pricing::PricingEngine;
use async_trait::async_trait;
use drape_cache::{cache_key, Cache};
use parking_lot::Mutex;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// External service that accepts orders.
#[async_trait]
pub trait OrderService: Send + Sync {
    async fn submit(&self, request: OrderRequest) -> Result<Order, CommerceError>;
}

/// Accepts every order after a fixed processing delay.
///
/// Placed orders are kept in memory and, when a cache is attached, written
/// under `order:<order number>`.
pub struct SimulatedOrderService {
    delay: Duration,
    orders: Mutex<Vec<Order>>,
    cache: Option<Cache>,
}

impl SimulatedOrderService {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            orders: Mutex::new(Vec::new()),
            cache: None,
        }
    }

    pub fn from_config(config: &CheckoutConfig) -> Self {
        Self::new(config.processing_delay())
    }

    pub fn with_cache(mut self, cache: Cache) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Orders placed so far.
    pub fn orders(&self) -> Vec<Order> {
        self.orders.lock().clone()
    }
}

impl fmt::Debug for SimulatedOrderService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SimulatedOrderService")
            .field("delay", &self.delay)
            .field("orders", &self.orders.lock().len())
            .finish()
    }
}

#[async_trait]
impl OrderService for SimulatedOrderService {
    async fn submit(&self, request: OrderRequest) -> Result<Order, CommerceError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let order = Order::from_request(request);
        if let Some(cache) = &self.cache {
            cache.set(&cache_key!("order", order.order_number), &order)?;
        }
        tracing::info!(
            order_number = %order.order_number,
            total = %order.total(),
            "order recorded"
        );
        self.orders.lock().push(order.clone());
        Ok(order)
    }
}

/// Places orders for a cart, one at a time.
pub struct CheckoutService {
    orders: Arc<dyn OrderService>,
    pricing: PricingEngine,
    notifier: Arc<dyn Notifier>,
    in_flight: AtomicBool,
}

impl fmt::Debug for CheckoutService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CheckoutService")
            .field("pricing", &self.pricing)
            .field("in_flight", &self.is_processing())
            .finish_non_exhaustive()
    }
}

impl CheckoutService {
    pub fn new(
        orders: Arc<dyn OrderService>,
        pricing: PricingEngine,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            orders,
            pricing,
            notifier,
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn pricing(&self) -> &PricingEngine {
        &self.pricing
    }

    /// Whether an order is being submitted right now.
    pub fn is_processing(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Submit the cart as an order.
    ///
    /// The cart is cleared and the flow completed only after the order
    /// service accepts the order. On failure, or if this future is dropped
    /// before it finishes, the cart is left as it was.
    pub async fn place_order(
        &self,
        cart: &SharedCart,
        flow: &mut CheckoutFlow,
    ) -> Result<Order, CommerceError> {
        let Some(_guard) = InFlightGuard::acquire(&self.in_flight) else {
            self.notifier.info("Your order is already being processed");
            return Err(CommerceError::CheckoutInFlight);
        };

        if let Err(e) = flow.ensure_ready() {
            if flow.shipping_address.is_none() {
                self.notifier.error("Please select a shipping address first");
            } else {
                self.notifier.error(&e.to_string());
            }
            return Err(e);
        }

        let request = {
            let cart = cart.lock();
            if cart.is_empty() {
                self.notifier.error("Your cart is empty");
                return Err(CommerceError::EmptyCart);
            }
            self.snapshot(&cart, flow)?
        };

        tracing::info!(
            checkout_id = %flow.id,
            lines = request.lines.len(),
            total = %request.summary.total,
            "submitting order"
        );

        match self.orders.submit(request).await {
            Ok(order) => {
                self.notifier.success("Order placed successfully!");
                cart.lock().clear_cart();
                flow.complete();
                tracing::info!(order_number = %order.order_number, "order placed");
                Ok(order)
            }
            Err(e) => {
                tracing::warn!(checkout_id = %flow.id, error = %e, "order submission failed");
                self.notifier
                    .error(&format!("Could not place your order: {}", e));
                Err(e)
            }
        }
    }

    fn snapshot(&self, cart: &CartStore, flow: &CheckoutFlow) -> Result<OrderRequest, CommerceError> {
        let (shipping_address, payment) = match (&flow.shipping_address, &flow.payment) {
            (Some(address), Some(payment)) => (address.clone(), payment),
            _ => return Err(CommerceError::CheckoutIncomplete("review".to_string())),
        };

        Ok(OrderRequest {
            contact: flow.contact.clone(),
            lines: cart.items().iter().map(OrderLine::from).collect(),
            shipping_address,
            payment_method: payment.method,
            summary: cart.summary(&self.pricing)?,
        })
    }
}

/// Holds the single-flight flag until dropped.
struct InFlightGuard<'a>(&'a AtomicBool);

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}
