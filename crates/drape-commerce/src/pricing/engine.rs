use super::insurance::{InsuranceOption, InsuranceRates};
use super::promo::{AppliedPromo, PromoCode};
use super::summary::{CartSummary, LineItemPricing, RentalQuote};
use crate::availability::RentalPeriod;
use crate::cart::CartLineItem;
use crate::config::StorefrontConfig;
use crate::error::CommerceError;
use crate::money::{Currency, Money};
use chrono::NaiveDate;

/// Billable days between two dates.
///
/// The end date is exclusive: a March 10 to March 13 rental is three days.
/// Never less than one.
pub fn rental_days(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days().max(1)
}

/// Pricing rules for one storefront.
#[derive(Debug, Clone)]
pub struct PricingEngine {
    currency: Currency,
    delivery_fee: Money,
    rates: InsuranceRates,
    promos: Vec<PromoCode>,
}

impl Default for PricingEngine {
    fn default() -> Self {
        Self::from_config(&StorefrontConfig::default())
    }
}

impl PricingEngine {
    pub fn from_config(config: &StorefrontConfig) -> Self {
        Self {
            currency: config.currency,
            delivery_fee: config.delivery_fee(),
            rates: config.insurance.into(),
            promos: config.promos.iter().map(PromoCode::from).collect(),
        }
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn delivery_fee(&self) -> Money {
        self.delivery_fee
    }

    pub fn promos(&self) -> &[PromoCode] {
        &self.promos
    }

    /// `price_per_day * quantity * days`.
    pub fn rental_cost(
        &self,
        price_per_day: &Money,
        quantity: i64,
        days: i64,
    ) -> Result<Money, CommerceError> {
        self.check_currency(price_per_day)?;
        if quantity <= 0 {
            return Err(CommerceError::InvalidQuantity(quantity));
        }
        price_per_day
            .try_multiply(quantity)
            .and_then(|m| m.try_multiply(days.max(1)))
            .ok_or(CommerceError::Overflow)
    }

    /// Insurance on a rental cost, rounded half-up to whole units.
    pub fn insurance_cost(
        &self,
        option: InsuranceOption,
        rental_cost: &Money,
    ) -> Result<Money, CommerceError> {
        rental_cost
            .portion_rounded(self.rates.rate_bps(option))
            .ok_or(CommerceError::Overflow)
    }

    /// Look up a configured promo by code.
    pub fn find_promo(&self, code: &str) -> Option<&PromoCode> {
        self.promos.iter().find(|p| p.matches(code))
    }

    /// Discount a promo code grants on `subtotal`.
    pub fn promo_discount(&self, code: &str, subtotal: &Money) -> Result<Money, CommerceError> {
        let promo = self
            .find_promo(code)
            .ok_or_else(|| CommerceError::InvalidPromoCode(code.to_string()))?;
        AppliedPromo::from_promo(promo)
            .discount_on(subtotal)
            .ok_or(CommerceError::Overflow)
    }

    /// Quote a single product over a validated period.
    pub fn quote(
        &self,
        price_per_day: &Money,
        period: &RentalPeriod,
        quantity: i64,
        insurance: InsuranceOption,
        promo: Option<&AppliedPromo>,
    ) -> Result<RentalQuote, CommerceError> {
        let days = period.days();
        let rental_cost = self.rental_cost(price_per_day, quantity, days)?;
        let insurance_cost = self.insurance_cost(insurance, &rental_cost)?;
        let (subtotal, discount, total) =
            self.totals(&[rental_cost, insurance_cost, self.delivery_fee], promo)?;

        Ok(RentalQuote {
            price_per_day: *price_per_day,
            quantity,
            rental_days: days,
            rental_cost,
            insurance,
            insurance_cost,
            delivery_fee: self.delivery_fee,
            subtotal,
            promo_code: promo.map(|p| p.code.clone()),
            discount,
            total,
        })
    }

    /// Price every line of a cart.
    ///
    /// Insurance is charged per line on that line's rental cost. The
    /// delivery fee is charged once, and only when the cart has lines.
    pub fn summarize(
        &self,
        items: &[CartLineItem],
        promo: Option<&AppliedPromo>,
    ) -> Result<CartSummary, CommerceError> {
        let mut lines = Vec::with_capacity(items.len());
        for item in items {
            let days = item.rental_days_or_one();
            let rental_cost = self.rental_cost(&item.price_per_day, item.quantity, days)?;
            let insurance_cost = self.insurance_cost(item.insurance, &rental_cost)?;
            lines.push(LineItemPricing {
                line_item_id: item.id.clone(),
                price_per_day: item.price_per_day,
                quantity: item.quantity,
                rental_days: days,
                rental_cost,
                insurance: item.insurance,
                insurance_cost,
            });
        }

        let rental_total = Money::try_sum(lines.iter().map(|l| &l.rental_cost), self.currency)
            .ok_or(CommerceError::Overflow)?;
        let insurance_total =
            Money::try_sum(lines.iter().map(|l| &l.insurance_cost), self.currency)
                .ok_or(CommerceError::Overflow)?;
        let delivery_fee = if lines.is_empty() {
            Money::zero(self.currency)
        } else {
            self.delivery_fee
        };
        let (subtotal, discount, total) =
            self.totals(&[rental_total, insurance_total, delivery_fee], promo)?;

        Ok(CartSummary {
            lines,
            rental_total,
            insurance_total,
            delivery_fee,
            subtotal,
            promo_code: promo.map(|p| p.code.clone()),
            discount,
            total,
        })
    }

    fn totals(
        &self,
        parts: &[Money],
        promo: Option<&AppliedPromo>,
    ) -> Result<(Money, Money, Money), CommerceError> {
        let subtotal = Money::try_sum(parts, self.currency).ok_or(CommerceError::Overflow)?;
        let discount = match promo {
            Some(p) => p.discount_on(&subtotal).ok_or(CommerceError::Overflow)?,
            None => Money::zero(self.currency),
        };
        let total = subtotal
            .try_subtract(&discount)
            .ok_or(CommerceError::Overflow)?
            .clamp_non_negative();
        Ok((subtotal, discount, total))
    }

    fn check_currency(&self, amount: &Money) -> Result<(), CommerceError> {
        if amount.currency != self.currency {
            return Err(CommerceError::CurrencyMismatch {
                expected: self.currency.code().to_string(),
                got: amount.currency.code().to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::{LineItemId, ProductId};

    fn inr(units: i64) -> Money {
        Money::from_major(units, Currency::INR)
    }

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, m, d).unwrap()
    }

    fn first20() -> AppliedPromo {
        AppliedPromo {
            code: "FIRST20".to_string(),
            percent_bps: 2000,
        }
    }

    fn line(price: i64, quantity: i64, rental: Option<RentalPeriod>) -> CartLineItem {
        CartLineItem {
            id: LineItemId::generate(),
            product_id: ProductId::new("1"),
            name: "Floral Print Maxi Dress".to_string(),
            price_per_day: inr(price),
            image: None,
            quantity,
            size: Some("M".to_string()),
            rental,
            insurance: InsuranceOption::None,
            added_at: 0,
        }
    }

    #[test]
    fn test_rental_days_exclusive_and_floored() {
        assert_eq!(rental_days(date(3, 10), date(3, 13)), 3);
        assert_eq!(rental_days(date(3, 10), date(3, 11)), 1);
        assert_eq!(rental_days(date(3, 10), date(3, 10)), 1);
        assert_eq!(rental_days(date(2, 25), date(3, 3)), 6);
    }

    #[test]
    fn test_insurance_cost() {
        let engine = PricingEngine::default();
        let rent = inr(1000);
        assert_eq!(engine.insurance_cost(InsuranceOption::None, &rent).unwrap(), inr(0));
        assert_eq!(engine.insurance_cost(InsuranceOption::Basic, &rent).unwrap(), inr(50));
        assert_eq!(engine.insurance_cost(InsuranceOption::Premium, &rent).unwrap(), inr(120));
    }

    #[test]
    fn test_promo_discount() {
        let engine = PricingEngine::default();
        assert_eq!(engine.promo_discount("first20", &inr(100)).unwrap(), inr(20));
        assert!(matches!(
            engine.promo_discount("SAVE50", &inr(100)),
            Err(CommerceError::InvalidPromoCode(_))
        ));
    }

    #[test]
    fn test_quote_three_day_rental() {
        let engine = PricingEngine::default();
        let period = RentalPeriod::new(date(3, 10), date(3, 13)).unwrap();
        let quote = engine
            .quote(&inr(56), &period, 1, InsuranceOption::Basic, None)
            .unwrap();

        assert_eq!(quote.rental_days, 3);
        assert_eq!(quote.rental_cost, inr(168));
        // 5% of 168 = 8.4
        assert_eq!(quote.insurance_cost, inr(8));
        assert_eq!(quote.delivery_fee, inr(15));
        assert_eq!(quote.subtotal, inr(191));
        assert_eq!(quote.total, inr(191));
    }

    #[test]
    fn test_quote_with_promo() {
        let engine = PricingEngine::default();
        let period = RentalPeriod::new(date(3, 10), date(3, 15)).unwrap();
        let promo = first20();
        let quote = engine
            .quote(&inr(17), &period, 1, InsuranceOption::None, Some(&promo))
            .unwrap();

        assert_eq!(quote.subtotal, inr(100));
        assert_eq!(quote.discount, inr(20));
        assert_eq!(quote.total, inr(80));
        assert_eq!(quote.promo_code.as_deref(), Some("FIRST20"));
    }

    #[test]
    fn test_quote_rejects_bad_quantity_and_currency() {
        let engine = PricingEngine::default();
        let period = RentalPeriod::new(date(3, 10), date(3, 13)).unwrap();
        assert!(matches!(
            engine.quote(&inr(56), &period, 0, InsuranceOption::None, None),
            Err(CommerceError::InvalidQuantity(0))
        ));
        let usd = Money::from_major(56, Currency::USD);
        assert!(matches!(
            engine.quote(&usd, &period, 1, InsuranceOption::None, None),
            Err(CommerceError::CurrencyMismatch { .. })
        ));
    }

    #[test]
    fn test_summarize_cart() {
        let engine = PricingEngine::default();
        let period = RentalPeriod::new(date(3, 10), date(3, 14)).unwrap();
        let mut insured = line(85, 1, Some(period));
        insured.insurance = InsuranceOption::Premium;
        let items = vec![insured, line(15, 2, None)];

        let summary = engine.summarize(&items, None).unwrap();
        // 85 * 4 = 340, 12% = 40.8 -> 41; 15 * 2 * 1 = 30
        assert_eq!(summary.rental_total, inr(370));
        assert_eq!(summary.insurance_total, inr(41));
        assert_eq!(summary.delivery_fee, inr(15));
        assert_eq!(summary.subtotal, inr(426));
        assert_eq!(summary.total, inr(426));
        assert_eq!(summary.item_count(), 3);
    }

    #[test]
    fn test_summarize_empty_cart_has_no_delivery_fee() {
        let engine = PricingEngine::default();
        let summary = engine.summarize(&[], Some(&first20())).unwrap();
        assert_eq!(summary.subtotal, inr(0));
        assert_eq!(summary.total, inr(0));
    }

    #[test]
    fn test_total_clamped_at_zero() {
        let engine = PricingEngine::default();
        let everything = AppliedPromo {
            code: "ALL".to_string(),
            percent_bps: 15_000,
        };
        let summary = engine.summarize(&[line(10, 1, None)], Some(&everything)).unwrap();
        assert!(summary.discount.amount_minor > summary.subtotal.amount_minor);
        assert_eq!(summary.total, inr(0));
    }
}
