//! Exact fixed-precision monetary amounts.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::currency::Currency;
use super::fixed::{POW10, f64_to_fixed_i64, fixed_i64_to_f64};
use crate::error::TradingError;

/// A monetary amount in a specific currency, stored as an exact integer
/// scaled by `10^currency.precision`. Amounts may be negative (PnL,
/// rebates, adjustments).
///
/// All arithmetic is fallible: operands must share a currency
/// ([`TradingError::CurrencyMismatch`] otherwise) and overflow is reported
/// rather than wrapped.
#[derive(Debug, Clone, Copy)]
pub struct Money {
    /// The scaled integer amount.
    pub raw: i64,
    /// The denominating currency; fixes the precision.
    pub currency: Currency,
}

impl Money {
    /// Creates an amount from a human-decimal value, rounding half away
    /// from zero to the currency's precision.
    ///
    /// # Errors
    /// Returns [`TradingError::InvalidValue`] if `amount` is non-finite or
    /// overflows the raw range.
    pub fn new(amount: f64, currency: Currency) -> Result<Self, TradingError> {
        Ok(Self {
            raw: f64_to_fixed_i64(amount, currency.precision)?,
            currency,
        })
    }

    /// Creates an amount from an already-scaled raw integer. Exact.
    #[must_use]
    pub const fn from_raw(raw: i64, currency: Currency) -> Self {
        Self { raw, currency }
    }

    /// The zero amount in `currency`.
    #[must_use]
    pub const fn zero(currency: Currency) -> Self {
        Self { raw: 0, currency }
    }

    /// Lossy conversion for display and interop only — never used in
    /// accounting logic.
    #[must_use]
    pub fn as_f64(&self) -> f64 {
        fixed_i64_to_f64(self.raw, self.currency.precision)
    }

    /// `true` if the amount is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.raw == 0
    }

    fn check_currency(&self, other: &Self) -> Result<(), TradingError> {
        if self.currency != other.currency {
            return Err(TradingError::CurrencyMismatch {
                lhs: self.currency.code,
                rhs: other.currency.code,
            });
        }
        Ok(())
    }

    /// Returns `self + rhs`.
    ///
    /// # Errors
    /// [`TradingError::CurrencyMismatch`] if the currencies differ;
    /// [`TradingError::InvalidValue`] on overflow.
    pub fn add(&self, rhs: Money) -> Result<Money, TradingError> {
        self.check_currency(&rhs)?;
        let raw = self
            .raw
            .checked_add(rhs.raw)
            .ok_or_else(|| TradingError::invalid_value("money addition overflow"))?;
        Ok(Money {
            raw,
            currency: self.currency,
        })
    }

    /// Returns `self - rhs`.
    ///
    /// # Errors
    /// [`TradingError::CurrencyMismatch`] if the currencies differ;
    /// [`TradingError::InvalidValue`] on overflow.
    pub fn sub(&self, rhs: Money) -> Result<Money, TradingError> {
        self.check_currency(&rhs)?;
        let raw = self
            .raw
            .checked_sub(rhs.raw)
            .ok_or_else(|| TradingError::invalid_value("money subtraction overflow"))?;
        Ok(Money {
            raw,
            currency: self.currency,
        })
    }

    /// Adds `rhs` into this caller-owned slot.
    ///
    /// # Errors
    /// Same as [`Money::add`]; on error the slot is left unchanged.
    pub fn add_assign(&mut self, rhs: Money) -> Result<(), TradingError> {
        *self = self.add(rhs)?;
        Ok(())
    }

    /// Subtracts `rhs` from this caller-owned slot.
    ///
    /// # Errors
    /// Same as [`Money::sub`]; on error the slot is left unchanged.
    pub fn sub_assign(&mut self, rhs: Money) -> Result<(), TradingError> {
        *self = self.sub(rhs)?;
        Ok(())
    }
}

impl PartialEq for Money {
    fn eq(&self, other: &Self) -> bool {
        self.currency == other.currency && self.raw == other.raw
    }
}

impl Eq for Money {}

impl PartialOrd for Money {
    /// Amounts in different currencies have no order.
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self.currency != other.currency {
            return None;
        }
        Some(self.raw.cmp(&other.raw))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let precision = self.currency.precision;
        let pow = POW10[precision as usize];
        let sign = if self.raw < 0 { "-" } else { "" };
        let int_part = (self.raw / pow).unsigned_abs();
        if precision == 0 {
            write!(f, "{sign}{int_part} {}", self.currency)
        } else {
            let frac = (self.raw % pow).unsigned_abs();
            write!(
                f,
                "{sign}{int_part}.{frac:0width$} {}",
                self.currency,
                width = precision as usize
            )
        }
    }
}

impl FromStr for Money {
    type Err = TradingError;

    /// Parses `"<amount> <CODE>"`, e.g. `"1250.50 USD"`. The amount is
    /// rescaled exactly to the currency's precision.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (amount_s, code) = s.rsplit_once(' ').ok_or_else(|| {
            TradingError::invalid_value(format!("invalid money literal {s:?}: missing currency"))
        })?;
        let currency: Currency = code.parse()?;
        let parsed: crate::types::Price = amount_s.parse()?;
        if parsed.precision > currency.precision {
            return Err(TradingError::invalid_value(format!(
                "money literal {s:?} exceeds {code} precision {}",
                currency.precision
            )));
        }
        let raw = i64::try_from(parsed.raw_at(currency.precision)).map_err(|_| {
            TradingError::invalid_value(format!("money literal {s:?} overflows the raw range"))
        })?;
        Ok(Self { raw, currency })
    }
}

impl Serialize for Money {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
