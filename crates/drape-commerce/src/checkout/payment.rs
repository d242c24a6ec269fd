//! Payment method selection.
//!
//! Only the choice and the details the form collects are modelled here.
//! Charging the customer is the order service's concern.

use crate::error::CommerceError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    #[default]
    CashOnDelivery,
    Online,
    Upi,
    NetBanking,
    CreditCard,
    DebitCard,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::CashOnDelivery => "cash_on_delivery",
            PaymentMethod::Online => "online",
            PaymentMethod::Upi => "upi",
            PaymentMethod::NetBanking => "net_banking",
            PaymentMethod::CreditCard => "credit_card",
            PaymentMethod::DebitCard => "debit_card",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            PaymentMethod::CashOnDelivery => "Cash on Delivery",
            PaymentMethod::Online => "Online",
            PaymentMethod::Upi => "UPI",
            PaymentMethod::NetBanking => "Net Banking",
            PaymentMethod::CreditCard => "Credit Card",
            PaymentMethod::DebitCard => "Debit Card",
        }
    }

    pub fn is_card(&self) -> bool {
        matches!(self, PaymentMethod::CreditCard | PaymentMethod::DebitCard)
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "cash_on_delivery" | "cod" => Ok(PaymentMethod::CashOnDelivery),
            "online" => Ok(PaymentMethod::Online),
            "upi" => Ok(PaymentMethod::Upi),
            "net_banking" => Ok(PaymentMethod::NetBanking),
            "credit_card" => Ok(PaymentMethod::CreditCard),
            "debit_card" => Ok(PaymentMethod::DebitCard),
            other => Err(format!("unknown payment method: {}", other)),
        }
    }
}

/// Card fields as entered on the payment form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDetails {
    pub holder_name: String,
    pub number: String,
    pub expiry: String,
    pub cvc: String,
}

impl CardDetails {
    fn is_filled(&self) -> bool {
        [&self.holder_name, &self.number, &self.expiry, &self.cvc]
            .iter()
            .all(|f| !f.trim().is_empty())
    }

    pub fn last_four(&self) -> String {
        let digits: Vec<char> = self.number.chars().filter(char::is_ascii_digit).collect();
        digits[digits.len().saturating_sub(4)..].iter().collect()
    }
}

/// The chosen payment method plus whatever details it needs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentDetails {
    pub method: PaymentMethod,
    #[serde(default)]
    pub card: Option<CardDetails>,
    #[serde(default)]
    pub upi_id: Option<String>,
}

impl PaymentDetails {
    pub fn new(method: PaymentMethod) -> Self {
        Self {
            method,
            card: None,
            upi_id: None,
        }
    }

    pub fn cash_on_delivery() -> Self {
        Self::new(PaymentMethod::CashOnDelivery)
    }

    pub fn card(method: PaymentMethod, card: CardDetails) -> Self {
        Self {
            method,
            card: Some(card),
            upi_id: None,
        }
    }

    pub fn upi(upi_id: impl Into<String>) -> Self {
        Self {
            method: PaymentMethod::Upi,
            card: None,
            upi_id: Some(upi_id.into()),
        }
    }

    /// Check the details required by the chosen method are present.
    pub fn validate(&self) -> Result<(), CommerceError> {
        if self.method.is_card() && !self.card.as_ref().is_some_and(CardDetails::is_filled) {
            return Err(CommerceError::Validation(
                "Please fill in all card details".to_string(),
            ));
        }
        if self.method == PaymentMethod::Upi {
            let valid = self
                .upi_id
                .as_deref()
                .map(str::trim)
                .is_some_and(|id| id.len() > 2 && id.contains('@'));
            if !valid {
                return Err(CommerceError::Validation(
                    "Please enter a valid UPI ID".to_string(),
                ));
            }
        }
        Ok(())
    }

    /// Short description for receipts, never including full card numbers.
    pub fn describe(&self) -> String {
        match (&self.card, &self.upi_id) {
            (Some(card), _) if self.method.is_card() => {
                format!("{} ending {}", self.method.display_name(), card.last_four())
            }
            (_, Some(upi)) if self.method == PaymentMethod::Upi => format!("UPI ({})", upi.trim()),
            _ => self.method.display_name().to_string(),
        }
    }
}
