//! Rental quote command.

use anyhow::{anyhow, bail, Result};
use chrono::NaiveDate;
use drape_commerce::availability::{DateSelector, RentalPeriod, SelectionState};
use drape_commerce::cart::MAX_QUANTITY_PER_ITEM;
use drape_commerce::catalog::{CatalogProvider, Product};
use drape_commerce::pricing::{AppliedPromo, RentalQuote};
use drape_commerce::{CommerceError, ProductId};
use serde_json::json;

use super::QuoteArgs;
use crate::context::Context;

/// Run the quote command.
pub async fn run(args: QuoteArgs, ctx: &Context) -> Result<()> {
    let catalog = ctx.catalog();
    let id = ProductId::new(args.id.as_str());
    let product = catalog
        .get_product_by_id(&id)
        .ok_or_else(|| anyhow!("Product not found: {}", id))?;

    if let Some(ref size) = args.size {
        if product.find_size(size).is_none() {
            bail!(
                "{} is not available in size {} (sizes: {})",
                product.name,
                size,
                product.available_sizes.join(", ")
            );
        }
    }

    check_quantity(args.quantity)?;
    let mut selector = DateSelector::new(catalog.calendar_for(&id, ctx.today())?);
    let period = select_period(&mut selector, args.start, args.end)?;

    let engine = ctx.pricing();
    let promo = match args.promo.as_deref() {
        Some(code) => Some(
            engine
                .find_promo(code)
                .map(AppliedPromo::from_promo)
                .ok_or_else(|| anyhow!("Invalid promo code: {}", code))?,
        ),
        None => None,
    };

    let quote = engine.quote(
        &product.price_per_day,
        &period,
        args.quantity,
        args.insurance,
        promo.as_ref(),
    )?;
    tracing::debug!(product_id = %id, days = quote.rental_days, total = quote.total.amount_minor, "quoted rental");

    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "product_id": id,
            "period": { "start": period.start(), "end": period.end() },
            "quote": quote,
        }));
        return Ok(());
    }

    print_quote(&product, &period, &quote, promo.as_ref(), ctx);
    Ok(())
}

/// Quotes stop at the same per-line limit the cart enforces.
fn check_quantity(quantity: i64) -> Result<(), CommerceError> {
    if quantity > MAX_QUANTITY_PER_ITEM {
        return Err(CommerceError::QuantityExceedsLimit(quantity, MAX_QUANTITY_PER_ITEM));
    }
    Ok(())
}

/// Feed the start and end dates through the selector, as two clicks would.
pub(crate) fn select_period(
    selector: &mut DateSelector,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<RentalPeriod> {
    if end <= start {
        bail!("Return date {} must be after {}", end, start);
    }
    if let SelectionState::Empty = selector.select(start) {
        return Err(selection_error(selector, start, end));
    }
    match selector.select(end) {
        SelectionState::RangeSelected { .. } => selector
            .period()
            .ok_or_else(|| anyhow!("No rental period selected")),
        _ => Err(selection_error(selector, start, end)),
    }
}

fn selection_error(selector: &DateSelector, start: NaiveDate, end: NaiveDate) -> anyhow::Error {
    match selector.error() {
        Some(e) => anyhow!("Cannot rent {} to {}: {}", start, end, e),
        None => anyhow!("Cannot rent {} to {}", start, end),
    }
}

fn print_quote(
    product: &Product,
    period: &RentalPeriod,
    quote: &RentalQuote,
    promo: Option<&AppliedPromo>,
    ctx: &Context,
) {
    let out = &ctx.output;
    out.header(&format!("{} by {}", product.name, product.brand));
    out.kv("Dates", &period.to_string());
    out.kv(
        "Rental",
        &format!(
            "{} × {} × {} days = {}",
            quote.price_per_day.display(),
            quote.quantity,
            quote.rental_days,
            quote.rental_cost.display()
        ),
    );
    out.kv(
        "Insurance",
        &format!("{} ({})", quote.insurance.display_name(), quote.insurance_cost.display()),
    );
    out.kv("Delivery", &quote.delivery_fee.display());
    out.kv("Subtotal", &quote.subtotal.display());
    if let Some(promo) = promo {
        out.kv(
            "Discount",
            &format!("-{} ({} {})", quote.discount.display(), promo.code, promo.label()),
        );
    }
    out.success(&format!("Total: {}", quote.total.display()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use drape_commerce::availability::{AvailabilityCalendar, RentalPolicy, UnavailableRange};

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, m, d).unwrap()
    }

    fn selector() -> DateSelector {
        let calendar = AvailabilityCalendar::new(date(3, 1), RentalPolicy::new(3, 14))
            .with_unavailable([UnavailableRange::new(date(3, 20), date(3, 22))]);
        DateSelector::new(calendar)
    }

    fn rejection(start: NaiveDate, end: NaiveDate) -> String {
        select_period(&mut selector(), start, end).unwrap_err().to_string()
    }

    #[test]
    fn test_check_quantity_matches_cart_limit() {
        assert!(check_quantity(1).is_ok());
        assert!(check_quantity(MAX_QUANTITY_PER_ITEM).is_ok());
        assert!(matches!(
            check_quantity(150),
            Err(CommerceError::QuantityExceedsLimit(150, 99))
        ));
    }

    #[test]
    fn test_select_period_accepts_valid_range() {
        let period = select_period(&mut selector(), date(3, 10), date(3, 14)).unwrap();
        assert_eq!(period.start(), date(3, 10));
        assert_eq!(period.end(), date(3, 14));
        assert_eq!(period.days(), 4);
    }

    #[test]
    fn test_select_period_requires_end_after_start() {
        assert_eq!(
            rejection(date(3, 10), date(3, 10)),
            "Return date 2025-03-10 must be after 2025-03-10"
        );
        assert!(rejection(date(3, 12), date(3, 10)).starts_with("Return date"));
    }

    #[test]
    fn test_select_period_reports_selector_rejection() {
        assert_eq!(
            rejection(date(3, 20), date(3, 25)),
            "Cannot rent 2025-03-20 to 2025-03-25: date is unavailable"
        );
        assert_eq!(
            rejection(date(3, 18), date(3, 24)),
            "Cannot rent 2025-03-18 to 2025-03-24: range includes unavailable dates"
        );
        assert_eq!(
            rejection(date(3, 10), date(3, 12)),
            "Cannot rent 2025-03-10 to 2025-03-12: minimum rental period is 3 days"
        );
        assert_eq!(
            rejection(date(2, 20), date(3, 5)),
            "Cannot rent 2025-02-20 to 2025-03-05: date is unavailable"
        );
    }
}
