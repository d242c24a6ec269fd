use async_trait::async_trait;
use chrono::NaiveDate;
use drape_cache::Cache;
use drape_commerce::notify::Notification;
use drape_commerce::prelude::*;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;

fn date(m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, m, d).unwrap()
}

fn catalog() -> InMemoryCatalog {
    InMemoryCatalog::seeded(date(3, 1))
}

fn filled_cart(notifier: Arc<RecordingNotifier>) -> SharedCart {
    let catalog = catalog();
    let suit = catalog.get_product_by_id(&ProductId::new("6")).unwrap();
    let period = RentalPeriod::new(date(3, 10), date(3, 14)).unwrap();

    let mut cart = CartStore::new(notifier);
    cart.add_item(
        LineDraft::from_product(&suit)
            .with_size("L")
            .with_rental(period)
            .with_insurance(InsuranceOption::Basic),
    )
    .unwrap();
    cart.into_shared()
}

fn ready_flow(cart: &SharedCart) -> CheckoutFlow {
    let mut flow = CheckoutFlow::new(cart.lock().id().clone());
    flow.set_email("asha@example.com");
    flow.set_shipping_address(Address::new(
        "Asha Rao",
        "12 MG Road",
        "Bengaluru",
        "Karnataka",
        "560001",
        "9800000000",
    ));
    flow.advance().unwrap();
    flow.set_payment(PaymentDetails::cash_on_delivery()).unwrap();
    flow.advance().unwrap();
    flow
}

fn messages(notifications: &[Notification]) -> Vec<&str> {
    notifications.iter().map(|n| n.message.as_str()).collect()
}

struct FailingOrderService;

#[async_trait]
impl OrderService for FailingOrderService {
    async fn submit(&self, _request: drape_commerce::checkout::OrderRequest) -> Result<Order, CommerceError> {
        Err(CommerceError::OrderSubmission("gateway unavailable".to_string()))
    }
}

/// Holds every submission until released.
#[derive(Default)]
struct GatedOrderService {
    entered: Notify,
    release: Notify,
}

#[async_trait]
impl OrderService for GatedOrderService {
    async fn submit(&self, request: drape_commerce::checkout::OrderRequest) -> Result<Order, CommerceError> {
        self.entered.notify_one();
        self.release.notified().await;
        Ok(Order::from_request(request))
    }
}

#[tokio::test]
async fn successful_order_clears_cart_and_completes_flow() {
    let notifier = Arc::new(RecordingNotifier::new());
    let cart = filled_cart(notifier.clone());
    let orders = Arc::new(SimulatedOrderService::new(Duration::ZERO));
    let service = CheckoutService::new(orders.clone(), PricingEngine::default(), notifier.clone());
    let mut flow = ready_flow(&cart);
    notifier.take();

    let order = service.place_order(&cart, &mut flow).await.unwrap();

    // 85 * 4 = 340, basic 5% = 17, delivery 15
    assert_eq!(order.total(), Money::from_major(372, Currency::INR));
    assert_eq!(order.item_count(), 1);
    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(order.contact.email.as_deref(), Some("asha@example.com"));
    assert!(order.order_number.starts_with("ORD-"));

    assert!(cart.lock().is_empty());
    assert!(flow.is_complete());
    assert!(!service.is_processing());
    assert_eq!(orders.orders().len(), 1);

    let seen = notifier.notifications();
    assert_eq!(messages(&seen), vec!["Order placed successfully!", "Cart cleared"]);
}

#[tokio::test]
async fn failed_submission_leaves_cart_intact() {
    let notifier = Arc::new(RecordingNotifier::new());
    let cart = filled_cart(notifier.clone());
    let service = CheckoutService::new(
        Arc::new(FailingOrderService),
        PricingEngine::default(),
        notifier.clone(),
    );
    let mut flow = ready_flow(&cart);
    notifier.take();

    let result = service.place_order(&cart, &mut flow).await;

    assert!(matches!(result, Err(CommerceError::OrderSubmission(_))));
    assert_eq!(cart.lock().item_count(), 1);
    assert_eq!(flow.step, CheckoutStep::Review);
    assert!(!service.is_processing());

    let seen = notifier.notifications();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].kind, NotificationKind::Error);
}

#[tokio::test]
async fn second_submission_rejected_while_first_in_flight() {
    let notifier = Arc::new(RecordingNotifier::new());
    let cart = filled_cart(notifier.clone());
    let gated = Arc::new(GatedOrderService::default());
    let service = Arc::new(CheckoutService::new(
        gated.clone(),
        PricingEngine::default(),
        notifier.clone(),
    ));

    let first = {
        let service = service.clone();
        let cart = cart.clone();
        let mut flow = ready_flow(&cart);
        tokio::spawn(async move { service.place_order(&cart, &mut flow).await })
    };

    gated.entered.notified().await;
    assert!(service.is_processing());

    let mut second_flow = ready_flow(&cart);
    let second = service.place_order(&cart, &mut second_flow).await;
    assert!(matches!(second, Err(CommerceError::CheckoutInFlight)));
    assert_eq!(cart.lock().item_count(), 1);

    gated.release.notify_one();
    let placed = first.await.unwrap();
    assert!(placed.is_ok());
    assert!(cart.lock().is_empty());
    assert!(!service.is_processing());
}

#[tokio::test]
async fn dropped_submission_releases_guard_and_keeps_cart() {
    let notifier = Arc::new(RecordingNotifier::new());
    let cart = filled_cart(notifier.clone());
    let service = CheckoutService::new(
        Arc::new(SimulatedOrderService::new(Duration::from_secs(30))),
        PricingEngine::default(),
        notifier.clone(),
    );
    let mut flow = ready_flow(&cart);

    let timed_out = tokio::time::timeout(
        Duration::from_millis(20),
        service.place_order(&cart, &mut flow),
    )
    .await;

    assert!(timed_out.is_err());
    assert!(!service.is_processing());
    assert_eq!(cart.lock().item_count(), 1);
    assert_eq!(flow.step, CheckoutStep::Review);
}

#[tokio::test]
async fn empty_cart_and_incomplete_flow_are_refused() {
    let notifier = Arc::new(RecordingNotifier::new());
    let service = CheckoutService::new(
        Arc::new(SimulatedOrderService::new(Duration::ZERO)),
        PricingEngine::default(),
        notifier.clone(),
    );

    let empty = CartStore::new(notifier.clone()).into_shared();
    let mut flow = ready_flow(&empty);
    assert!(matches!(
        service.place_order(&empty, &mut flow).await,
        Err(CommerceError::EmptyCart)
    ));

    let cart = filled_cart(notifier.clone());
    let mut fresh = CheckoutFlow::new(cart.lock().id().clone());
    notifier.take();
    assert!(matches!(
        service.place_order(&cart, &mut fresh).await,
        Err(CommerceError::CheckoutIncomplete(_))
    ));
    assert_eq!(
        notifier.last_message().as_deref(),
        Some("Please select a shipping address first")
    );
    assert_eq!(cart.lock().item_count(), 1);
}

#[tokio::test]
async fn promo_carries_into_order_and_orders_are_recorded() {
    let notifier = Arc::new(RecordingNotifier::new());
    let cart = filled_cart(notifier.clone());
    let engine = PricingEngine::default();
    cart.lock().apply_promo(&engine, "FIRST20").unwrap();

    let cache = Cache::in_memory();
    let orders = Arc::new(SimulatedOrderService::new(Duration::ZERO).with_cache(cache.clone()));
    let service = CheckoutService::new(orders, engine, notifier.clone());
    let mut flow = ready_flow(&cart);

    let order = service.place_order(&cart, &mut flow).await.unwrap();
    // subtotal 372, 20% = 74.4 -> 74
    assert_eq!(order.summary.discount, Money::from_major(74, Currency::INR));
    assert_eq!(order.total(), Money::from_major(298, Currency::INR));
    assert!(cart.lock().promo().is_none());

    let key = format!("order:{}", order.order_number);
    let stored: Option<Order> = cache.get(&key).unwrap();
    assert_eq!(stored.map(|o| o.id), Some(order.id));
}
