//! The cart store.

use crate::cart::{CartLineItem, LineDraft, LineKey, MAX_QUANTITY_PER_ITEM};
use crate::error::CommerceError;
use crate::ids::{CartId, LineItemId};
use crate::money::{Currency, Money};
use crate::notify::Notifier;
use crate::pricing::{AppliedPromo, CartSummary, PricingEngine};
use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;

/// A cart shared between the UI layer and the checkout task.
///
/// Never hold the lock across an `.await`.
pub type SharedCart = Arc<Mutex<CartStore>>;

/// The shopping cart for one session.
///
/// Lines live in process memory only. Every mutation reports a notice
/// through the injected [`Notifier`].
pub struct CartStore {
    id: CartId,
    items: Vec<CartLineItem>,
    promo: Option<AppliedPromo>,
    currency: Currency,
    notifier: Arc<dyn Notifier>,
    created_at: i64,
    updated_at: i64,
}

impl fmt::Debug for CartStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartStore")
            .field("id", &self.id)
            .field("items", &self.items)
            .field("promo", &self.promo)
            .field("currency", &self.currency)
            .finish_non_exhaustive()
    }
}

impl CartStore {
    /// Create an empty INR cart.
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        Self::with_currency(Currency::default(), notifier)
    }

    pub fn with_currency(currency: Currency, notifier: Arc<dyn Notifier>) -> Self {
        let now = current_timestamp();
        Self {
            id: CartId::generate(),
            items: Vec::new(),
            promo: None,
            currency,
            notifier,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn into_shared(self) -> SharedCart {
        Arc::new(Mutex::new(self))
    }

    pub fn id(&self) -> &CartId {
        &self.id
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    pub fn promo(&self) -> Option<&AppliedPromo> {
        self.promo.as_ref()
    }

    pub fn created_at(&self) -> i64 {
        self.created_at
    }

    pub fn updated_at(&self) -> i64 {
        self.updated_at
    }

    /// Add a product to the cart.
    ///
    /// A line with the same product, size and dates has its quantity
    /// increased; anything else becomes a new line. Returns the id of the
    /// line that now holds the product.
    pub fn add_item(&mut self, draft: LineDraft) -> Result<LineItemId, CommerceError> {
        if let Err(e) = self.check_draft(&draft) {
            self.notifier.error(&e.to_string());
            return Err(e);
        }

        let key = draft.key();
        if let Some(existing) = self.items.iter_mut().find(|i| i.key() == key) {
            let new_quantity = existing
                .quantity
                .checked_add(draft.quantity)
                .ok_or(CommerceError::Overflow)?;

            if new_quantity > MAX_QUANTITY_PER_ITEM {
                let e = CommerceError::QuantityExceedsLimit(new_quantity, MAX_QUANTITY_PER_ITEM);
                self.notifier.error(&e.to_string());
                return Err(e);
            }

            existing.quantity = new_quantity;
            let id = existing.id.clone();
            tracing::debug!(line_id = %id, quantity = new_quantity, "merged cart line");
            self.notifier
                .success(&format!("Updated quantity for {}", existing.name));
            self.touch();
            return Ok(id);
        }

        let line = draft.into_line(current_timestamp());
        let id = line.id.clone();
        tracing::info!(
            line_id = %id,
            product_id = %line.product_id,
            quantity = line.quantity,
            "added cart line"
        );
        self.notifier.success(&format!("Added {} to cart", line.name));
        self.items.push(line);
        self.touch();
        Ok(id)
    }

    /// Remove a line. Returns whether anything was removed.
    pub fn remove_item(&mut self, line_id: &LineItemId) -> bool {
        let Some(pos) = self.items.iter().position(|i| &i.id == line_id) else {
            return false;
        };
        let removed = self.items.remove(pos);
        tracing::info!(line_id = %line_id, product_id = %removed.product_id, "removed cart line");
        self.notifier
            .success(&format!("Removed {} from cart", removed.name));
        self.touch();
        true
    }

    /// Replace a line's quantity. A quantity of zero or less removes the
    /// line. An unknown line is `ItemNotInCart`.
    pub fn update_item_quantity(
        &mut self,
        line_id: &LineItemId,
        quantity: i64,
    ) -> Result<(), CommerceError> {
        if quantity <= 0 {
            return if self.remove_item(line_id) {
                Ok(())
            } else {
                Err(self.missing_line(line_id))
            };
        }

        if quantity > MAX_QUANTITY_PER_ITEM {
            let e = CommerceError::QuantityExceedsLimit(quantity, MAX_QUANTITY_PER_ITEM);
            self.notifier.error(&e.to_string());
            return Err(e);
        }

        let Some(pos) = self.items.iter().position(|i| &i.id == line_id) else {
            return Err(self.missing_line(line_id));
        };
        let item = &mut self.items[pos];
        item.quantity = quantity;
        tracing::debug!(line_id = %line_id, quantity, "updated cart line quantity");
        self.notifier
            .success(&format!("Updated quantity for {}", item.name));
        self.touch();
        Ok(())
    }

    /// Empty the cart and drop any applied promo.
    pub fn clear_cart(&mut self) {
        self.items.clear();
        self.promo = None;
        tracing::info!(cart_id = %self.id, "cleared cart");
        self.notifier.success("Cart cleared");
        self.touch();
    }

    pub fn get_item(&self, line_id: &LineItemId) -> Option<&CartLineItem> {
        self.items.iter().find(|i| &i.id == line_id)
    }

    pub fn find_line(&self, key: &LineKey) -> Option<&CartLineItem> {
        self.items.iter().find(|i| &i.key() == key)
    }

    /// Total units across all lines.
    pub fn item_count(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    pub fn unique_item_count(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of `price_per_day * quantity * rental_days_or_one` over all lines.
    pub fn subtotal(&self) -> Result<Money, CommerceError> {
        self.items.iter().try_fold(Money::zero(self.currency), |acc, item| {
            let line = item.line_total().ok_or(CommerceError::Overflow)?;
            acc.try_add(&line).ok_or(CommerceError::Overflow)
        })
    }

    pub fn format_currency(&self, amount: &Money) -> String {
        amount.display()
    }

    /// Apply a promo code to this cart session.
    ///
    /// Returns `Ok(true)` when the promo was newly applied and `Ok(false)`
    /// when the same code was already active. A promo cannot be swapped for
    /// another once applied.
    pub fn apply_promo(&mut self, engine: &PricingEngine, code: &str) -> Result<bool, CommerceError> {
        let Some(promo) = engine.find_promo(code) else {
            tracing::warn!(code, "rejected promo code");
            self.notifier.error("Invalid promo code");
            return Err(CommerceError::InvalidPromoCode(code.to_string()));
        };

        if let Some(active) = &self.promo {
            if promo.matches(&active.code) {
                self.notifier.info("Promo code already applied");
                return Ok(false);
            }
            let e = CommerceError::PromoAlreadyApplied(active.code.clone());
            self.notifier.error(&e.to_string());
            return Err(e);
        }

        let applied = AppliedPromo::from_promo(promo);
        tracing::info!(code = %applied.code, "applied promo code");
        self.notifier
            .success(&format!("Promo code applied: {}!", applied.label()));
        self.promo = Some(applied);
        self.touch();
        Ok(true)
    }

    /// Drop the applied promo, if any.
    pub fn remove_promo(&mut self) -> bool {
        let Some(removed) = self.promo.take() else {
            return false;
        };
        tracing::info!(code = %removed.code, "removed promo code");
        self.notifier.info("Promo code removed");
        self.touch();
        true
    }

    /// Checkout totals for the current lines and promo.
    pub fn summary(&self, engine: &PricingEngine) -> Result<CartSummary, CommerceError> {
        engine.summarize(&self.items, self.promo.as_ref())
    }

    fn missing_line(&self, line_id: &LineItemId) -> CommerceError {
        let e = CommerceError::ItemNotInCart(line_id.to_string());
        self.notifier.error(&e.to_string());
        e
    }

    fn check_draft(&self, draft: &LineDraft) -> Result<(), CommerceError> {
        draft.validate()?;
        if draft.price_per_day.currency != self.currency {
            return Err(CommerceError::CurrencyMismatch {
                expected: self.currency.code().to_string(),
                got: draft.price_per_day.currency.code().to_string(),
            });
        }
        Ok(())
    }

    fn touch(&mut self) {
        self.updated_at = current_timestamp();
    }
}

/// Get current Unix timestamp.
fn current_timestamp() -> i64 {
    chrono::Utc::now().timestamp()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::availability::RentalPeriod;
    use crate::catalog::Product;
    use crate::notify::{NotificationKind, RecordingNotifier};
    use crate::pricing::InsuranceOption;
    use chrono::NaiveDate;

    fn inr(units: i64) -> Money {
        Money::from_major(units, Currency::INR)
    }

    fn period(start: u32, end: u32) -> RentalPeriod {
        RentalPeriod::new(
            NaiveDate::from_ymd_opt(2025, 3, start).unwrap(),
            NaiveDate::from_ymd_opt(2025, 3, end).unwrap(),
        )
        .unwrap()
    }

    fn dress() -> Product {
        Product::new("1", "Floral Print Maxi Dress", "Gucci", "Dresses", inr(56))
    }

    fn draft(size: &str, rental: RentalPeriod) -> LineDraft {
        LineDraft::from_product(&dress()).with_size(size).with_rental(rental)
    }

    fn store() -> (CartStore, Arc<RecordingNotifier>) {
        let notifier = Arc::new(RecordingNotifier::new());
        (CartStore::new(notifier.clone()), notifier)
    }

    #[test]
    fn test_add_same_item_increases_quantity() {
        let (mut cart, notifier) = store();
        let first = cart.add_item(draft("M", period(10, 13))).unwrap();
        let second = cart
            .add_item(draft("M", period(10, 13)).with_quantity(2))
            .unwrap();

        assert_eq!(first, second);
        assert_eq!(cart.unique_item_count(), 1);
        assert_eq!(cart.item_count(), 3);
        assert_eq!(
            notifier.last_message().as_deref(),
            Some("Updated quantity for Floral Print Maxi Dress")
        );
    }

    #[test]
    fn test_different_size_or_dates_creates_new_line() {
        let (mut cart, notifier) = store();
        cart.add_item(draft("M", period(10, 13))).unwrap();
        cart.add_item(draft("S", period(10, 13))).unwrap();
        cart.add_item(draft("M", period(14, 18))).unwrap();

        assert_eq!(cart.unique_item_count(), 3);
        assert_eq!(cart.item_count(), 3);
        assert_eq!(
            notifier.last_message().as_deref(),
            Some("Added Floral Print Maxi Dress to cart")
        );
    }

    #[test]
    fn test_subtotal_multiplies_days_and_quantity() {
        let (mut cart, _) = store();
        cart.add_item(draft("M", period(10, 13)).with_quantity(2)).unwrap();
        let tie = Product::new("12", "Designer Bow Tie", "Fendi", "Accessories", inr(15)).flat_rate();
        cart.add_item(LineDraft::from_product(&tie)).unwrap();

        // 56 * 2 * 3 + 15 * 1 * 1
        assert_eq!(cart.subtotal().unwrap(), inr(351));
        assert_eq!(cart.format_currency(&cart.subtotal().unwrap()), "\u{20b9}351");
    }

    #[test]
    fn test_update_to_zero_or_negative_removes() {
        let (mut cart, notifier) = store();
        let a = cart.add_item(draft("M", period(10, 13))).unwrap();
        let b = cart.add_item(draft("L", period(10, 13))).unwrap();

        cart.update_item_quantity(&a, 0).unwrap();
        assert!(cart.get_item(&a).is_none());
        assert_eq!(
            notifier.last_message().as_deref(),
            Some("Removed Floral Print Maxi Dress from cart")
        );

        cart.update_item_quantity(&b, -1).unwrap();
        assert!(cart.is_empty());
        assert_eq!(cart.subtotal().unwrap(), inr(0));
    }

    #[test]
    fn test_update_quantity_replaces() {
        let (mut cart, _) = store();
        let id = cart.add_item(draft("M", period(10, 13))).unwrap();
        cart.update_item_quantity(&id, 4).unwrap();
        assert_eq!(cart.get_item(&id).unwrap().quantity, 4);
        assert!(matches!(
            cart.update_item_quantity(&LineItemId::new("missing"), 2),
            Err(CommerceError::ItemNotInCart(_))
        ));
        assert!(matches!(
            cart.update_item_quantity(&LineItemId::new("missing"), 0),
            Err(CommerceError::ItemNotInCart(_))
        ));
        assert!(cart.update_item_quantity(&id, MAX_QUANTITY_PER_ITEM + 1).is_err());
        assert_eq!(cart.get_item(&id).unwrap().quantity, 4);
    }

    #[test]
    fn test_update_quantity_notifies() {
        let (mut cart, notifier) = store();
        let id = cart.add_item(draft("M", period(10, 13))).unwrap();
        notifier.take();

        cart.update_item_quantity(&id, 4).unwrap();
        let seen = notifier.take();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].kind, NotificationKind::Success);
        assert_eq!(seen[0].message, "Updated quantity for Floral Print Maxi Dress");

        assert!(cart.update_item_quantity(&id, 500).is_err());
        let seen = notifier.take();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].kind, NotificationKind::Error);
        assert_eq!(seen[0].message, "Quantity 500 exceeds maximum allowed (99)");

        assert!(cart.update_item_quantity(&LineItemId::new("missing"), 2).is_err());
        assert_eq!(notifier.take()[0].kind, NotificationKind::Error);
    }

    #[test]
    fn test_remove_targets_single_line() {
        let (mut cart, _) = store();
        let m = cart.add_item(draft("M", period(10, 13))).unwrap();
        cart.add_item(draft("S", period(10, 13))).unwrap();

        assert!(cart.remove_item(&m));
        assert!(!cart.remove_item(&m));
        assert_eq!(cart.unique_item_count(), 1);
        assert_eq!(cart.items()[0].size.as_deref(), Some("S"));
    }

    #[test]
    fn test_invalid_draft_is_notified_and_rejected() {
        let (mut cart, notifier) = store();
        let result = cart.add_item(LineDraft::from_product(&dress()).with_size("M"));
        assert!(matches!(result, Err(CommerceError::Validation(_))));
        assert!(cart.is_empty());

        let seen = notifier.notifications();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].kind, NotificationKind::Error);
        assert_eq!(seen[0].message, "Please select rental dates");
    }

    #[test]
    fn test_merge_respects_quantity_limit() {
        let (mut cart, _) = store();
        let id = cart
            .add_item(draft("M", period(10, 13)).with_quantity(MAX_QUANTITY_PER_ITEM))
            .unwrap();
        let result = cart.add_item(draft("M", period(10, 13)));
        assert!(matches!(result, Err(CommerceError::QuantityExceedsLimit(_, _))));
        assert_eq!(cart.get_item(&id).unwrap().quantity, MAX_QUANTITY_PER_ITEM);
    }

    #[test]
    fn test_find_line_by_key() {
        let (mut cart, _) = store();
        let id = cart.add_item(draft("M", period(10, 13))).unwrap();
        let key = draft("M", period(10, 13)).key();
        assert_eq!(cart.find_line(&key).map(|l| l.id.clone()), Some(id));
        assert!(cart.find_line(&draft("M", period(11, 14)).key()).is_none());
    }

    #[test]
    fn test_clear_cart() {
        let (mut cart, notifier) = store();
        let engine = PricingEngine::default();
        cart.add_item(draft("M", period(10, 13))).unwrap();
        cart.apply_promo(&engine, "FIRST20").unwrap();
        cart.clear_cart();

        assert!(cart.is_empty());
        assert!(cart.promo().is_none());
        assert_eq!(notifier.last_message().as_deref(), Some("Cart cleared"));
    }

    #[test]
    fn test_apply_promo_once() {
        let (mut cart, notifier) = store();
        let engine = PricingEngine::default();
        let tie = Product::new("12", "Designer Bow Tie", "Fendi", "Accessories", inr(85)).flat_rate();
        cart.add_item(LineDraft::from_product(&tie)).unwrap();

        assert!(cart.apply_promo(&engine, "first20").unwrap());
        assert_eq!(
            notifier.last_message().as_deref(),
            Some("Promo code applied: 20% off!")
        );
        // 85 + 15 delivery = 100
        let summary = cart.summary(&engine).unwrap();
        assert_eq!(summary.discount, inr(20));
        assert_eq!(summary.total, inr(80));

        assert!(!cart.apply_promo(&engine, "FIRST20").unwrap());
        let again = cart.summary(&engine).unwrap();
        assert_eq!(again.discount, inr(20));
        assert_eq!(again.total, inr(80));
    }

    #[test]
    fn test_remove_promo() {
        let (mut cart, notifier) = store();
        let engine = PricingEngine::default();
        cart.add_item(draft("M", period(10, 13))).unwrap();
        assert!(!cart.remove_promo());

        cart.apply_promo(&engine, "FIRST20").unwrap();
        notifier.take();
        assert!(cart.remove_promo());
        assert!(cart.promo().is_none());
        assert_eq!(cart.summary(&engine).unwrap().discount, inr(0));
        assert_eq!(notifier.last_message().as_deref(), Some("Promo code removed"));

        cart.apply_promo(&engine, "FIRST20").unwrap();
        assert!(cart.promo().is_some());
    }

    #[test]
    fn test_invalid_promo_leaves_cart_unchanged() {
        let (mut cart, notifier) = store();
        let engine = PricingEngine::default();
        cart.add_item(draft("M", period(10, 13)).with_insurance(InsuranceOption::Basic))
            .unwrap();
        let before = cart.summary(&engine).unwrap();

        assert!(matches!(
            cart.apply_promo(&engine, "SUMMER50"),
            Err(CommerceError::InvalidPromoCode(_))
        ));
        assert!(cart.promo().is_none());
        assert_eq!(cart.summary(&engine).unwrap(), before);
        assert_eq!(notifier.last_message().as_deref(), Some("Invalid promo code"));
    }

    #[test]
    fn test_currency_mismatch_rejected() {
        let (mut cart, _) = store();
        let usd = Product::new("x", "Import", "Brand", "Suits", Money::from_major(10, Currency::USD))
            .flat_rate();
        assert!(matches!(
            cart.add_item(LineDraft::from_product(&usd)),
            Err(CommerceError::CurrencyMismatch { .. })
        ));
    }
}
