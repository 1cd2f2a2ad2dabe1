//! Decimal money helpers: tax, minor units, and display formatting.
//!
//! All amounts are `rust_decimal::Decimal` in the currency's standard unit
//! (dollars, not cents). Conversion to integer minor units only happens at the
//! payment boundary.

use core::fmt;
use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Flat sales tax applied at checkout (10%).
pub const TAX_RATE: Decimal = Decimal::from_parts(1, 0, 0, false, 1);

/// Subtotal plus [`TAX_RATE`], rounded to cents (half away from zero).
///
/// ```
/// use emporium_core::with_tax;
/// use rust_decimal::Decimal;
///
/// assert_eq!(with_tax(Decimal::new(10995, 2)), Decimal::new(12095, 2)); // 109.95 -> 120.945 -> 120.95
/// ```
#[must_use]
pub fn with_tax(subtotal: Decimal) -> Decimal {
    (subtotal + subtotal * TAX_RATE).round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Convert an amount to integer minor units (cents).
///
/// Returns `None` if the amount does not fit in an `i64`.
#[must_use]
pub fn to_minor_units(amount: Decimal) -> Option<i64> {
    (amount * Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
}

/// Format an amount for display, e.g. `$12.50`.
#[must_use]
pub fn format_price(amount: Decimal) -> String {
    format!(
        "${:.2}",
        amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    )
}

/// ISO 4217 currency codes accepted by the payment relay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CurrencyCode {
    #[default]
    Usd,
    Eur,
    Gbp,
    Cad,
    Aud,
}

impl CurrencyCode {
    /// Lower-case code as sent to the payment processor.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Usd => "usd",
            Self::Eur => "eur",
            Self::Gbp => "gbp",
            Self::Cad => "cad",
            Self::Aud => "aud",
        }
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for CurrencyCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "usd" => Ok(Self::Usd),
            "eur" => Ok(Self::Eur),
            "gbp" => Ok(Self::Gbp),
            "cad" => Ok(Self::Cad),
            "aud" => Ok(Self::Aud),
            other => Err(format!("unsupported currency: {other}")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_tax_rate_is_ten_percent() {
        assert_eq!(TAX_RATE, Decimal::new(1, 1));
    }

    #[test]
    fn test_with_tax_rounds_half_away_from_zero() {
        // 0.05 * 1.1 = 0.055
        assert_eq!(with_tax(Decimal::new(5, 2)), Decimal::new(6, 2));
        assert_eq!(with_tax(Decimal::from(40)), Decimal::from(44));
        assert_eq!(with_tax(Decimal::ZERO), Decimal::ZERO);
    }

    #[test]
    fn test_minor_units() {
        assert_eq!(to_minor_units(Decimal::new(12095, 2)), Some(12095));
        assert_eq!(to_minor_units(Decimal::new(1005, 3)), Some(101));
        assert_eq!(to_minor_units(Decimal::from(44)), Some(4400));
    }

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(Decimal::new(125, 1)), "$12.50");
        assert_eq!(format_price(Decimal::ZERO), "$0.00");
    }

    #[test]
    fn test_currency_code_round_trip() {
        assert_eq!("USD".parse::<CurrencyCode>().unwrap(), CurrencyCode::Usd);
        assert_eq!(CurrencyCode::Eur.to_string(), "eur");
        assert!("btc".parse::<CurrencyCode>().is_err());
        assert_eq!(serde_json::to_string(&CurrencyCode::Gbp).unwrap(), "\"gbp\"");
    }
}
