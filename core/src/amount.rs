//! Fixed-point money amounts with two fraction digits.
//!
//! Input is parsed as an exact decimal and held as a whole number of
//! hundredths, so no step goes through binary floating point.

use std::fmt;
use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::validate::ValidationError;

/// Largest magnitude accepted from user input, in whole units.
const MAX_UNITS: i64 = 10_000_000_000_000;

/// A money amount stored as hundredths (cents).
///
/// # Examples
///
/// ```
/// use pocketbook_core::Amount;
///
/// let amount: Amount = "14.556".parse().unwrap();
/// assert_eq!(amount.cents(), 1456);
/// assert_eq!(amount.to_string(), "14.56");
/// assert_eq!(format!("{amount:>8}"), "   14.56");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Amount(i64);

impl Amount {
    /// Creates an amount from a count of hundredths.
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Returns the amount as a count of hundredths.
    pub const fn cents(self) -> i64 {
        self.0
    }

    /// Returns `true` if the amount is strictly greater than zero.
    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    /// Parses a decimal number and rounds it to two fraction digits.
    ///
    /// Accepts plain decimals with an optional sign, and scientific
    /// notation. Rounding is half away from zero on the exact decimal
    /// value, so `1.005` becomes `1.01`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidAmount`] for non-numeric input, and
    /// [`ValidationError::AmountOutOfRange`] when the value is too large to
    /// store.
    pub fn parse_decimal(raw: &str) -> Result<Self, ValidationError> {
        let trimmed = raw.trim();
        let value = Decimal::from_str(trimmed)
            .or_else(|_| Decimal::from_scientific(trimmed))
            .map_err(|_| ValidationError::InvalidAmount(raw.to_string()))?;

        if value.abs() >= Decimal::from(MAX_UNITS) {
            return Err(ValidationError::AmountOutOfRange(raw.to_string()));
        }

        let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        (rounded * Decimal::ONE_HUNDRED)
            .to_i64()
            .map(Self)
            .ok_or_else(|| ValidationError::AmountOutOfRange(raw.to_string()))
    }
}

impl FromStr for Amount {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_decimal(s)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        // `pad` keeps width/alignment specifiers working for table output.
        f.pad(&format!("{sign}{}.{:02}", abs / 100, abs % 100))
    }
}
