//! Checkout flow state machine.

use crate::checkout::{Address, PaymentDetails, SessionProvider};
use crate::ids::{CartId, CheckoutId, UserId};
use crate::CommerceError;
use serde::{Deserialize, Serialize};

/// Steps in the checkout flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckoutStep {
    /// Delivery address.
    Shipping,
    /// Payment method.
    Payment,
    /// Final review before the order is placed.
    Review,
    /// Order placed.
    Complete,
}

impl CheckoutStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckoutStep::Shipping => "shipping",
            CheckoutStep::Payment => "payment",
            CheckoutStep::Review => "review",
            CheckoutStep::Complete => "complete",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            CheckoutStep::Shipping => "Shipping",
            CheckoutStep::Payment => "Payment",
            CheckoutStep::Review => "Review",
            CheckoutStep::Complete => "Complete",
        }
    }

    /// Get the step number (1-indexed).
    pub fn number(&self) -> u8 {
        match self {
            CheckoutStep::Shipping => 1,
            CheckoutStep::Payment => 2,
            CheckoutStep::Review => 3,
            CheckoutStep::Complete => 4,
        }
    }
}

/// Who the order is for.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContactDetails {
    pub user_id: Option<UserId>,
    pub name: Option<String>,
    pub email: Option<String>,
}

/// Checkout flow state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CheckoutFlow {
    pub id: CheckoutId,
    pub cart_id: CartId,
    pub step: CheckoutStep,
    pub completed_steps: Vec<CheckoutStep>,
    pub contact: ContactDetails,
    pub shipping_address: Option<Address>,
    pub payment: Option<PaymentDetails>,
    /// Unix timestamp of creation.
    pub created_at: i64,
    /// Unix timestamp of last update.
    pub updated_at: i64,
}

impl CheckoutFlow {
    pub fn new(cart_id: CartId) -> Self {
        let now = current_timestamp();
        Self {
            id: CheckoutId::generate(),
            cart_id,
            step: CheckoutStep::Shipping,
            completed_steps: Vec::new(),
            contact: ContactDetails::default(),
            shipping_address: None,
            payment: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check if checkout can advance to a step.
    ///
    /// `Complete` is only reached by placing the order.
    pub fn can_advance_to(&self, step: CheckoutStep) -> bool {
        match step {
            CheckoutStep::Shipping => true,
            CheckoutStep::Payment => self
                .shipping_address
                .as_ref()
                .is_some_and(Address::is_complete),
            CheckoutStep::Review => {
                self.can_advance_to(CheckoutStep::Payment)
                    && self.payment.as_ref().is_some_and(|p| p.validate().is_ok())
            }
            CheckoutStep::Complete => false,
        }
    }

    /// Advance to the next step.
    pub fn advance(&mut self) -> Result<CheckoutStep, CommerceError> {
        let next = match self.step {
            CheckoutStep::Shipping => CheckoutStep::Payment,
            CheckoutStep::Payment => CheckoutStep::Review,
            CheckoutStep::Review | CheckoutStep::Complete => {
                return Err(self.transition_error(CheckoutStep::Complete))
            }
        };

        if !self.can_advance_to(next) {
            return Err(CommerceError::CheckoutIncomplete(
                self.missing_for_step(next).join(", "),
            ));
        }

        self.mark_completed(self.step);
        self.step = next;
        self.updated_at = current_timestamp();
        Ok(next)
    }

    /// Go back to the previous step.
    pub fn go_back(&mut self) -> Result<CheckoutStep, CommerceError> {
        let prev = match self.step {
            CheckoutStep::Payment => CheckoutStep::Shipping,
            CheckoutStep::Review => CheckoutStep::Payment,
            CheckoutStep::Shipping => return Err(self.transition_error(CheckoutStep::Shipping)),
            CheckoutStep::Complete => return Err(self.transition_error(CheckoutStep::Review)),
        };

        self.step = prev;
        self.updated_at = current_timestamp();
        Ok(prev)
    }

    /// Jump to a completed step, or advance one step.
    pub fn go_to(&mut self, step: CheckoutStep) -> Result<(), CommerceError> {
        if self.step == CheckoutStep::Complete {
            return Err(self.transition_error(step));
        }
        if step == self.step || self.completed_steps.contains(&step) {
            if !self.can_advance_to(step) {
                return Err(CommerceError::CheckoutIncomplete(
                    self.missing_for_step(step).join(", "),
                ));
            }
            self.step = step;
            self.updated_at = current_timestamp();
            Ok(())
        } else if step.number() == self.step.number() + 1 {
            self.advance().map(|_| ())
        } else {
            Err(self.transition_error(step))
        }
    }

    /// What is missing to reach `step`.
    pub fn missing_for_step(&self, step: CheckoutStep) -> Vec<&'static str> {
        let mut missing = Vec::new();
        match step {
            CheckoutStep::Payment => match &self.shipping_address {
                None => missing.push("shipping address"),
                Some(address) => missing.extend(address.missing_fields()),
            },
            CheckoutStep::Review => {
                missing.extend(self.missing_for_step(CheckoutStep::Payment));
                match &self.payment {
                    None => missing.push("payment method"),
                    Some(p) if p.validate().is_err() => missing.push("payment details"),
                    Some(_) => {}
                }
            }
            _ => {}
        }
        missing
    }

    /// Ready for the order to be placed.
    pub fn ensure_ready(&self) -> Result<(), CommerceError> {
        if self.step != CheckoutStep::Review {
            return Err(CommerceError::CheckoutIncomplete(format!(
                "review step (currently at {})",
                self.step.as_str()
            )));
        }
        let missing = self.missing_for_step(CheckoutStep::Review);
        if !missing.is_empty() {
            return Err(CommerceError::CheckoutIncomplete(missing.join(", ")));
        }
        Ok(())
    }

    /// Fill blank contact fields from the signed-in user.
    pub fn prefill_contact(&mut self, session: &dyn SessionProvider) -> bool {
        let Some(user) = session.current_user() else {
            return false;
        };
        if self.contact.user_id.is_none() {
            self.contact.user_id = Some(user.id.clone());
        }
        if self.contact.name.is_none() {
            self.contact.name = Some(user.display_name());
        }
        if self.contact.email.is_none() {
            self.contact.email = Some(user.email.clone());
        }
        self.updated_at = current_timestamp();
        true
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.contact.email = Some(email.into());
        self.updated_at = current_timestamp();
    }

    /// Set the shipping address.
    pub fn set_shipping_address(&mut self, address: Address) {
        self.shipping_address = Some(address);
        self.updated_at = current_timestamp();
    }

    /// Choose a payment method. The details are checked here so the form
    /// can show the problem straight away.
    pub fn set_payment(&mut self, payment: PaymentDetails) -> Result<(), CommerceError> {
        payment.validate()?;
        self.payment = Some(payment);
        self.updated_at = current_timestamp();
        Ok(())
    }

    pub fn is_complete(&self) -> bool {
        self.step == CheckoutStep::Complete
    }

    pub fn progress_percent(&self) -> u8 {
        self.step.number() * 25
    }

    pub(crate) fn complete(&mut self) {
        self.mark_completed(self.step);
        self.step = CheckoutStep::Complete;
        self.updated_at = current_timestamp();
    }

    fn mark_completed(&mut self, step: CheckoutStep) {
        if !self.completed_steps.contains(&step) {
            self.completed_steps.push(step);
        }
    }

    fn transition_error(&self, to: CheckoutStep) -> CommerceError {
        CommerceError::InvalidCheckoutTransition {
            from: self.step.as_str().to_string(),
            to: to.as_str().to_string(),
        }
    }
}

/// Get current Unix timestamp.
fn current_timestamp() -> i64 {
    chrono::Utc::now().timestamp()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checkout::{PaymentMethod, StaticSession, UserProfile};

    fn address() -> Address {
        Address::new("Asha Rao", "12 MG Road", "Bengaluru", "Karnataka", "560001", "9800000000")
    }

    #[test]
    fn test_checkout_creation() {
        let flow = CheckoutFlow::new(CartId::new("cart-123"));
        assert_eq!(flow.step, CheckoutStep::Shipping);
        assert!(flow.completed_steps.is_empty());
        assert_eq!(flow.progress_percent(), 25);
    }

    #[test]
    fn test_shipping_requires_complete_address() {
        let mut flow = CheckoutFlow::new(CartId::new("cart-123"));
        match flow.advance() {
            Err(CommerceError::CheckoutIncomplete(missing)) => assert_eq!(missing, "shipping address"),
            other => panic!("unexpected: {:?}", other),
        }

        let mut partial = address();
        partial.city.clear();
        flow.set_shipping_address(partial);
        assert!(flow.advance().is_err());

        flow.set_shipping_address(address());
        assert_eq!(flow.advance().unwrap(), CheckoutStep::Payment);
    }

    #[test]
    fn test_payment_then_review() {
        let mut flow = CheckoutFlow::new(CartId::new("cart-123"));
        flow.set_shipping_address(address());
        flow.advance().unwrap();

        assert!(flow.advance().is_err());
        assert!(flow.set_payment(PaymentDetails::new(PaymentMethod::Upi)).is_err());
        assert!(flow.payment.is_none());

        flow.set_payment(PaymentDetails::upi("asha@okbank")).unwrap();
        assert_eq!(flow.advance().unwrap(), CheckoutStep::Review);
        assert!(flow.ensure_ready().is_ok());
        assert_eq!(flow.completed_steps, vec![CheckoutStep::Shipping, CheckoutStep::Payment]);
    }

    #[test]
    fn test_review_cannot_advance_without_placing_order() {
        let mut flow = CheckoutFlow::new(CartId::new("cart-123"));
        flow.set_shipping_address(address());
        flow.advance().unwrap();
        flow.set_payment(PaymentDetails::cash_on_delivery()).unwrap();
        flow.advance().unwrap();

        assert!(matches!(
            flow.advance(),
            Err(CommerceError::InvalidCheckoutTransition { .. })
        ));
        flow.complete();
        assert!(flow.is_complete());
        assert!(flow.go_back().is_err());
        assert_eq!(flow.progress_percent(), 100);
    }

    #[test]
    fn test_go_back_and_go_to() {
        let mut flow = CheckoutFlow::new(CartId::new("cart-123"));
        assert!(flow.go_back().is_err());

        flow.set_shipping_address(address());
        flow.advance().unwrap();
        assert_eq!(flow.go_back().unwrap(), CheckoutStep::Shipping);

        flow.go_to(CheckoutStep::Payment).unwrap();
        assert_eq!(flow.step, CheckoutStep::Payment);
        assert!(flow.go_to(CheckoutStep::Complete).is_err());
        flow.go_to(CheckoutStep::Shipping).unwrap();
        assert_eq!(flow.step, CheckoutStep::Shipping);
    }

    #[test]
    fn test_go_to_rechecks_edited_steps() {
        let mut flow = CheckoutFlow::new(CartId::new("cart-123"));
        flow.set_shipping_address(address());
        flow.advance().unwrap();
        flow.set_payment(PaymentDetails::cash_on_delivery()).unwrap();
        flow.advance().unwrap();
        flow.go_back().unwrap();
        flow.go_back().unwrap();
        assert!(flow.completed_steps.contains(&CheckoutStep::Payment));

        let mut partial = address();
        partial.city.clear();
        flow.set_shipping_address(partial);

        match flow.go_to(CheckoutStep::Payment) {
            Err(CommerceError::CheckoutIncomplete(missing)) => assert_eq!(missing, "city"),
            other => panic!("unexpected: {:?}", other),
        }
        assert_eq!(flow.step, CheckoutStep::Shipping);

        flow.set_shipping_address(address());
        flow.go_to(CheckoutStep::Payment).unwrap();
        assert_eq!(flow.step, CheckoutStep::Payment);
    }

    #[test]
    fn test_ensure_ready_outside_review() {
        let flow = CheckoutFlow::new(CartId::new("cart-123"));
        assert!(matches!(flow.ensure_ready(), Err(CommerceError::CheckoutIncomplete(_))));
    }

    #[test]
    fn test_prefill_contact_from_session() {
        let mut flow = CheckoutFlow::new(CartId::new("cart-123"));
        assert!(!flow.prefill_contact(&StaticSession::anonymous()));

        let session = StaticSession::signed_in(UserProfile {
            id: UserId::new("u-1"),
            email: "asha@example.com".into(),
            first_name: Some("Asha".into()),
            last_name: None,
            avatar_url: None,
        });
        flow.set_email("work@example.com");
        assert!(flow.prefill_contact(&session));
        assert_eq!(flow.contact.name.as_deref(), Some("Asha"));
        assert_eq!(flow.contact.email.as_deref(), Some("work@example.com"));
        assert_eq!(flow.contact.user_id, Some(UserId::new("u-1")));
    }
}
