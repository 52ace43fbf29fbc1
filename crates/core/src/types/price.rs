//! Type-safe price representation using decimal arithmetic.
//!
//! Menu prices are written the way a chalkboard shows them (`"$4.50"`,
//! `"$8"`) and always displayed with two decimals (`"$4.50"`, `"$8.00"`).

use std::fmt;
use std::ops::Add;
use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Price`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceParseError {
    /// The input string is empty (or only a currency symbol).
    #[error("price cannot be empty")]
    Empty,
    /// The amount is not a decimal number.
    #[error("invalid price amount: {0}")]
    Invalid(String),
    /// The amount is below zero.
    #[error("price cannot be negative: {0}")]
    Negative(String),
}

/// A price with currency information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (e.g., dollars, not cents).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// Create a USD price from a whole number of cents.
    #[must_use]
    pub fn from_cents(cents: i64) -> Self {
        Self::new(Decimal::new(cents, 2), CurrencyCode::USD)
    }

    /// A zero amount in the given currency.
    #[must_use]
    pub const fn zero(currency_code: CurrencyCode) -> Self {
        Self::new(Decimal::ZERO, currency_code)
    }

    /// Multiply the unit price by a quantity.
    #[must_use]
    pub fn times(self, quantity: u32) -> Self {
        Self::new(self.amount * Decimal::from(quantity), self.currency_code)
    }

    /// The amount rounded to two decimal places, midpoint away from zero.
    #[must_use]
    pub fn rounded(&self) -> Decimal {
        self.amount
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    }

    /// Format for display (e.g., "$19.99").
    #[must_use]
    pub fn display(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:.2}", self.currency_code.symbol(), self.rounded())
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        debug_assert_eq!(self.currency_code, rhs.currency_code);
        Self::new(self.amount + rhs.amount, self.currency_code)
    }
}

impl FromStr for Price {
    type Err = PriceParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let (currency_code, digits) = CurrencyCode::strip_symbol(trimmed);
        let digits = digits.trim();
        if digits.is_empty() {
            return Err(PriceParseError::Empty);
        }

        let amount =
            Decimal::from_str(digits).map_err(|_| PriceParseError::Invalid(s.to_string()))?;
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceParseError::Negative(s.to_string()));
        }

        Ok(Self::new(amount, currency_code))
    }
}

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    USD,
    EUR,
    GBP,
    CAD,
    AUD,
}

impl CurrencyCode {
    /// Display symbol for the currency.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::USD | Self::CAD | Self::AUD => "$",
            Self::EUR => "€",
            Self::GBP => "£",
        }
    }

    /// Split a leading currency symbol off a price string.
    ///
    /// Strings without a symbol are treated as USD.
    fn strip_symbol(s: &str) -> (Self, &str) {
        if let Some(rest) = s.strip_prefix('€') {
            (Self::EUR, rest)
        } else if let Some(rest) = s.strip_prefix('£') {
            (Self::GBP, rest)
        } else {
            (Self::USD, s.strip_prefix('$').unwrap_or(s))
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_chalkboard_prices() {
        assert_eq!("$4.50".parse::<Price>().unwrap(), Price::from_cents(450));
        assert_eq!("4.5".parse::<Price>().unwrap().to_string(), "$4.50");
        assert_eq!("$28.00".parse::<Price>().unwrap(), Price::from_cents(2800));
        assert_eq!(
            "€3".parse::<Price>().unwrap().currency_code,
            CurrencyCode::EUR
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!("".parse::<Price>(), Err(PriceParseError::Empty));
        assert_eq!("$".parse::<Price>(), Err(PriceParseError::Empty));
        assert!(matches!(
            "abc".parse::<Price>(),
            Err(PriceParseError::Invalid(_))
        ));
        assert!(matches!(
            "$-1".parse::<Price>(),
            Err(PriceParseError::Negative(_))
        ));
    }

    #[test]
    fn test_display_pads_whole_amounts() {
        assert_eq!("$8".parse::<Price>().unwrap().to_string(), "$8.00");
        assert_eq!(Price::zero(CurrencyCode::USD).display(), "$0.00");
    }

    #[test]
    fn test_display_rounds_midpoint_away_from_zero() {
        let price = Price::new(Decimal::new(10_005, 3), CurrencyCode::USD);
        assert_eq!(price.to_string(), "$10.01");
    }

    #[test]
    fn test_times_and_add() {
        let total = Price::from_cents(800).times(2) + Price::from_cents(450);
        assert_eq!(total.to_string(), "$20.50");
    }
}
