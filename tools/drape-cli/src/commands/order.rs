//! Place an order from a request file.

use std::path::Path;
use std::sync::Arc;

use anyhow::{anyhow, Context as _, Result};
use chrono::NaiveDate;
use drape_commerce::availability::DateSelector;
use drape_commerce::cart::{CartStore, LineDraft, SharedCart};
use drape_commerce::catalog::{CatalogProvider, InMemoryCatalog};
use drape_commerce::checkout::{
    Address, CheckoutFlow, CheckoutService, Order, PaymentDetails, SimulatedOrderService,
    StaticSession, UserProfile,
};
use drape_commerce::notify::Notifier;
use drape_commerce::pricing::{CartSummary, InsuranceOption};
use drape_commerce::ProductId;
use serde::Deserialize;

use super::quote::select_period;
use super::OrderArgs;
use crate::context::Context;
use crate::output::status_badge;

/// Contents of an order request file.
#[derive(Debug, Deserialize)]
pub struct OrderRequestFile {
    /// Signed-in user; fills any contact fields left blank.
    #[serde(default)]
    pub user: Option<UserProfile>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    pub items: Vec<RequestedItem>,
    #[serde(default)]
    pub promo: Option<String>,
    pub shipping_address: Address,
    pub payment: PaymentDetails,
}

#[derive(Debug, Deserialize)]
pub struct RequestedItem {
    pub product_id: ProductId,
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub start: Option<NaiveDate>,
    #[serde(default)]
    pub end: Option<NaiveDate>,
    #[serde(default = "default_quantity")]
    pub quantity: i64,
    #[serde(default)]
    pub insurance: InsuranceOption,
}

fn default_quantity() -> i64 {
    1
}

impl OrderRequestFile {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read order request: {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse order request: {}", path.display()))
    }
}

/// Run the order command.
pub async fn run(args: OrderArgs, ctx: &Context) -> Result<()> {
    let request = OrderRequestFile::load(&ctx.resolve_path(&args.request))?;
    let notifier: Arc<dyn Notifier> = ctx.output.clone();
    let engine = ctx.pricing();
    let catalog = ctx.catalog();

    ctx.output.header("Building cart");
    let cart = build_cart(&request, &catalog, ctx, notifier.clone())?;
    if let Some(ref code) = request.promo {
        cart.lock().apply_promo(&engine, code)?;
    }
    let summary = cart.lock().summary(&engine)?;

    let mut flow = start_flow(&request, &cart)?;
    ctx.output.debug(&format!(
        "checkout {} at {} ({}%)",
        flow.id,
        flow.step.display_name(),
        flow.progress_percent()
    ));

    if args.dry_run {
        if ctx.output.is_json() {
            ctx.output.json(&summary);
        } else {
            print_summary(&summary, ctx);
            ctx.output.info("Dry run: no order placed");
        }
        return Ok(());
    }

    let orders = SimulatedOrderService::from_config(&ctx.config.storefront.checkout)
        .with_cache(ctx.cache()?);
    let service = CheckoutService::new(Arc::new(orders), engine, notifier);

    let spinner = ctx.output.spinner("Processing your order...");
    let placed = service.place_order(&cart, &mut flow).await;
    spinner.finish_and_clear();
    let order = placed?;

    if ctx.output.is_json() {
        ctx.output.json(&order);
    } else {
        print_order(&order, ctx);
    }
    Ok(())
}

fn build_cart(
    request: &OrderRequestFile,
    catalog: &InMemoryCatalog,
    ctx: &Context,
    notifier: Arc<dyn Notifier>,
) -> Result<SharedCart> {
    let mut cart = CartStore::with_currency(ctx.config.storefront.currency, notifier);

    for item in &request.items {
        let product = catalog
            .get_product_by_id(&item.product_id)
            .ok_or_else(|| anyhow!("Product not found: {}", item.product_id))?;

        let mut draft = LineDraft::from_product(&product)
            .with_quantity(item.quantity)
            .with_insurance(item.insurance);
        if let Some(ref size) = item.size {
            draft = draft.with_size(size.as_str());
        }
        if let (Some(start), Some(end)) = (item.start, item.end) {
            let mut selector = DateSelector::new(catalog.calendar_for(&product.id, ctx.today())?);
            let period = select_period(&mut selector, start, end)
                .with_context(|| format!("Item {}", product.id))?;
            draft = draft.with_rental(period);
        }

        cart.add_item(draft)
            .with_context(|| format!("Could not add {} to the cart", product.name))?;
    }

    Ok(cart.into_shared())
}

/// Walk the flow to the review step with the request's contact, address
/// and payment.
fn start_flow(request: &OrderRequestFile, cart: &SharedCart) -> Result<CheckoutFlow> {
    let mut flow = CheckoutFlow::new(cart.lock().id().clone());

    flow.contact.name = request.name.clone();
    if let Some(ref email) = request.email {
        flow.set_email(email.as_str());
    }
    if let Some(ref user) = request.user {
        flow.prefill_contact(&StaticSession::signed_in(user.clone()));
    }

    flow.set_shipping_address(request.shipping_address.clone());
    flow.advance().context("Shipping details are incomplete")?;
    flow.set_payment(request.payment.clone())?;
    flow.advance().context("Payment details are incomplete")?;
    Ok(flow)
}

fn print_summary(summary: &CartSummary, ctx: &Context) {
    let out = &ctx.output;
    out.header("Order summary");
    for line in &summary.lines {
        out.list_item(&format!(
            "{} × {}/day for {} days: {} + {} insurance",
            line.quantity,
            line.price_per_day.display(),
            line.rental_days,
            line.rental_cost.display(),
            line.insurance_cost.display()
        ));
    }
    out.kv("Rental", &summary.rental_total.display());
    out.kv("Insurance", &summary.insurance_total.display());
    out.kv("Delivery", &summary.delivery_fee.display());
    if let Some(ref code) = summary.promo_code {
        out.kv("Discount", &format!("-{} ({})", summary.discount.display(), code));
    }
    out.kv("Total", &summary.total.display());
}

fn print_order(order: &Order, ctx: &Context) {
    print_summary(&order.summary, ctx);
    let out = &ctx.output;
    out.header(&format!("Order {}", order.order_number));
    out.kv("Status", &status_badge(order.status));
    out.kv("Items", &order.item_count().to_string());
    if let Some(ref name) = order.contact.name {
        out.kv("Name", name);
    }
    if let Some(ref email) = order.contact.email {
        out.kv("Email", email);
    }
    out.kv("Ship to", &order.shipping_address.one_line());
    out.kv("Payment", order.payment_method.display_name());
    out.kv("Placed", &order.created_at.format("%Y-%m-%d %H:%M UTC").to_string());
}
