//! Money type for representing monetary values.
//!
//! Amounts are integer minor units (paise for INR) so rental totals never
//! pick up floating-point drift. Percentages are expressed in basis points.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Basis points in one whole (100%).
pub const BPS_PER_WHOLE: u32 = 10_000;

/// Supported currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    #[default]
    INR,
    USD,
    EUR,
    GBP,
}

impl Currency {
    /// Get the currency code (e.g., "INR").
    pub fn code(&self) -> &'static str {
        match self {
            Currency::INR => "INR",
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::GBP => "GBP",
        }
    }

    /// Get the currency symbol (e.g., "₹").
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::INR => "\u{20b9}",
            Currency::USD => "$",
            Currency::EUR => "\u{20ac}",
            Currency::GBP => "\u{00a3}",
        }
    }

    /// Number of decimal places for this currency.
    pub fn decimal_places(&self) -> u32 {
        2
    }

    /// Minor units in one major unit.
    pub fn minor_per_major(&self) -> i64 {
        10_i64.pow(self.decimal_places())
    }

    /// Parse a currency code string.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_uppercase().as_str() {
            "INR" => Some(Currency::INR),
            "USD" => Some(Currency::USD),
            "EUR" => Some(Currency::EUR),
            "GBP" => Some(Currency::GBP),
            _ => None,
        }
    }

    /// Whether amounts use the Indian lakh/crore digit grouping.
    fn uses_indian_grouping(&self) -> bool {
        matches!(self, Currency::INR)
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A monetary value with currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Money {
    /// Amount in the smallest currency unit.
    pub amount_minor: i64,
    /// The currency.
    pub currency: Currency,
}

impl Money {
    /// Create a new Money value from minor units.
    pub fn new(amount_minor: i64, currency: Currency) -> Self {
        Self {
            amount_minor,
            currency,
        }
    }

    /// Create a Money value from whole currency units.
    ///
    /// ```
    /// use drape_commerce::money::{Currency, Money};
    /// let price = Money::from_major(56, Currency::INR);
    /// assert_eq!(price.amount_minor, 5600);
    /// ```
    pub fn from_major(units: i64, currency: Currency) -> Self {
        Self::new(units.saturating_mul(currency.minor_per_major()), currency)
    }

    /// Create a zero amount in the given currency.
    pub fn zero(currency: Currency) -> Self {
        Self::new(0, currency)
    }

    pub fn is_zero(&self) -> bool {
        self.amount_minor == 0
    }

    pub fn is_positive(&self) -> bool {
        self.amount_minor > 0
    }

    pub fn is_negative(&self) -> bool {
        self.amount_minor < 0
    }

    /// Whole major units, truncated toward zero.
    pub fn major_units(&self) -> i64 {
        self.amount_minor / self.currency.minor_per_major()
    }

    /// Add two amounts. Returns `None` on currency mismatch or overflow.
    pub fn try_add(&self, other: &Money) -> Option<Money> {
        if self.currency != other.currency {
            return None;
        }
        self.amount_minor
            .checked_add(other.amount_minor)
            .map(|amount| Money::new(amount, self.currency))
    }

    /// Subtract an amount. Returns `None` on currency mismatch or overflow.
    pub fn try_subtract(&self, other: &Money) -> Option<Money> {
        if self.currency != other.currency {
            return None;
        }
        self.amount_minor
            .checked_sub(other.amount_minor)
            .map(|amount| Money::new(amount, self.currency))
    }

    /// Multiply by an integer factor. Returns `None` on overflow.
    pub fn try_multiply(&self, factor: i64) -> Option<Money> {
        self.amount_minor
            .checked_mul(factor)
            .map(|amount| Money::new(amount, self.currency))
    }

    /// Sum amounts of a single currency, starting from zero.
    pub fn try_sum<'a, I>(amounts: I, currency: Currency) -> Option<Money>
    where
        I: IntoIterator<Item = &'a Money>,
    {
        amounts
            .into_iter()
            .try_fold(Money::zero(currency), |acc, m| acc.try_add(m))
    }

    /// A basis-point share of this amount, rounded half-up to whole
    /// currency units.
    ///
    /// ```
    /// use drape_commerce::money::{Currency, Money};
    /// let rent = Money::from_major(1000, Currency::INR);
    /// assert_eq!(rent.portion_rounded(500), Some(Money::from_major(50, Currency::INR)));
    /// ```
    pub fn portion_rounded(&self, bps: u32) -> Option<Money> {
        let unit = i128::from(self.currency.minor_per_major());
        let denominator = i128::from(BPS_PER_WHOLE) * unit;
        let scaled = i128::from(self.amount_minor) * i128::from(bps);

        let half = denominator / 2;
        let whole_units = if scaled >= 0 {
            (scaled + half) / denominator
        } else {
            -((-scaled + half) / denominator)
        };

        i64::try_from(whole_units * unit)
            .ok()
            .map(|amount| Money::new(amount, self.currency))
    }

    /// Clamp negative amounts to zero.
    pub fn clamp_non_negative(self) -> Money {
        if self.is_negative() {
            Money::zero(self.currency)
        } else {
            self
        }
    }

    /// Format with the currency symbol and locale digit grouping.
    ///
    /// INR uses lakh grouping ("₹1,23,456"); the fractional part is only
    /// shown when it is non-zero.
    pub fn display(&self) -> String {
        let unit = self.currency.minor_per_major();
        let magnitude = self.amount_minor.unsigned_abs();
        let major = magnitude / unit as u64;
        let minor = magnitude % unit as u64;

        let grouped = if self.currency.uses_indian_grouping() {
            group_indian(major)
        } else {
            group_thousands(major)
        };

        let sign = if self.is_negative() { "-" } else { "" };
        if minor == 0 {
            format!("{}{}{}", sign, self.currency.symbol(), grouped)
        } else {
            format!(
                "{}{}{}.{:0width$}",
                sign,
                self.currency.symbol(),
                grouped,
                minor,
                width = self.currency.decimal_places() as usize
            )
        }
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Last three digits, then groups of two.
fn group_indian(value: u64) -> String {
    let digits = value.to_string();
    if digits.len() <= 3 {
        return digits;
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut out = String::with_capacity(digits.len() + digits.len() / 2);
    for (i, ch) in head.chars().enumerate() {
        if i > 0 && (head.len() - i) % 2 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out.push(',');
    out.push_str(tail);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inr(units: i64) -> Money {
        Money::from_major(units, Currency::INR)
    }

    #[test]
    fn test_money_display_indian_grouping() {
        assert_eq!(inr(56).display(), "\u{20b9}56");
        assert_eq!(inr(1_000).display(), "\u{20b9}1,000");
        assert_eq!(inr(123_456).display(), "\u{20b9}1,23,456");
        assert_eq!(inr(12_345_678).display(), "\u{20b9}1,23,45,678");
    }

    #[test]
    fn test_money_display_fraction_and_sign() {
        assert_eq!(Money::new(4999, Currency::INR).display(), "\u{20b9}49.99");
        assert_eq!(Money::new(-1050, Currency::INR).display(), "-\u{20b9}10.50");
        assert_eq!(Money::from_major(1_234_567, Currency::USD).display(), "$1,234,567");
    }

    #[test]
    fn test_money_try_add_currency_mismatch() {
        let a = inr(10);
        let b = Money::from_major(10, Currency::USD);
        assert!(a.try_add(&b).is_none());
        assert_eq!(a.try_add(&inr(5)), Some(inr(15)));
    }

    #[test]
    fn test_money_try_multiply_overflow() {
        let m = Money::new(i64::MAX, Currency::INR);
        assert!(m.try_multiply(2).is_none());
        assert_eq!(inr(56).try_multiply(3), Some(inr(168)));
    }

    #[test]
    fn test_money_try_sum() {
        let amounts = [inr(10), inr(20), inr(30)];
        assert_eq!(Money::try_sum(&amounts, Currency::INR), Some(inr(60)));
        assert_eq!(Money::try_sum(&[], Currency::INR), Some(inr(0)));
    }

    #[test]
    fn test_money_portion_rounds_half_up() {
        assert_eq!(inr(1000).portion_rounded(500), Some(inr(50)));
        assert_eq!(inr(1000).portion_rounded(1200), Some(inr(120)));
        assert_eq!(inr(100).portion_rounded(2000), Some(inr(20)));
        // 5% of 110 = 5.5 -> 6
        assert_eq!(inr(110).portion_rounded(500), Some(inr(6)));
        // 5% of 108 = 5.4 -> 5
        assert_eq!(inr(108).portion_rounded(500), Some(inr(5)));
        assert_eq!(inr(0).portion_rounded(1200), Some(inr(0)));
    }

    #[test]
    fn test_money_clamp_non_negative() {
        assert_eq!(inr(-5).clamp_non_negative(), inr(0));
        assert_eq!(inr(5).clamp_non_negative(), inr(5));
    }

    #[test]
    fn test_currency_from_code() {
        assert_eq!(Currency::from_code("inr"), Some(Currency::INR));
        assert_eq!(Currency::from_code("XYZ"), None);
    }
}
