//! Exact fixed-precision quantity type.

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, AddAssign, Sub, SubAssign};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::fixed::{FIXED_PRECISION, POW10, check_precision, f64_to_fixed_u64, fixed_u64_to_f64};
use crate::error::TradingError;

/// A quantity as an exact scaled integer: semantic value =
/// `raw / 10^precision`. Quantities are non-negative by construction.
///
/// Values of differing precision are rescaled to the larger precision before
/// any arithmetic or comparison; arithmetic results retain the larger
/// precision.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct Quantity {
    /// The scaled integer value.
    pub raw: u64,
    /// Number of fractional digits, at most [`FIXED_PRECISION`].
    pub precision: u8,
}

impl Quantity {
    /// Creates a quantity from a human-decimal value, rounding half away
    /// from zero to `precision` fractional digits.
    ///
    /// # Errors
    /// Returns [`TradingError::InvalidValue`] if `value` is negative or
    /// non-finite, or if `precision` exceeds [`FIXED_PRECISION`].
    pub fn new(value: f64, precision: u8) -> Result<Self, TradingError> {
        check_precision(precision)?;
        Ok(Self {
            raw: f64_to_fixed_u64(value, precision)?,
            precision,
        })
    }

    /// Creates a quantity from an already-scaled raw integer. Exact.
    ///
    /// # Errors
    /// Returns [`TradingError::InvalidValue`] if `precision` exceeds
    /// [`FIXED_PRECISION`].
    pub fn from_raw(raw: u64, precision: u8) -> Result<Self, TradingError> {
        check_precision(precision)?;
        Ok(Self { raw, precision })
    }

    /// The zero quantity at the given precision.
    ///
    /// # Panics
    /// Panics if `precision` exceeds [`FIXED_PRECISION`].
    #[must_use]
    pub fn zero(precision: u8) -> Self {
        check_precision(precision).expect("precision within FIXED_PRECISION");
        Self { raw: 0, precision }
    }

    /// Lossy conversion for display and interop only — never used in
    /// accounting logic.
    #[must_use]
    pub fn as_f64(&self) -> f64 {
        fixed_u64_to_f64(self.raw, self.precision)
    }

    /// `true` if the semantic value is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.raw == 0
    }

    /// `true` if the semantic value is strictly positive.
    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.raw > 0
    }

    /// This quantity's raw value rescaled to `precision`, widened to `u128`
    /// so rescaling itself can never overflow.
    pub(crate) fn raw_at(&self, precision: u8) -> u128 {
        debug_assert!(precision >= self.precision);
        u128::from(self.raw) * POW10[(precision - self.precision) as usize] as u128
    }

    /// Checked addition at the larger of the two precisions.
    #[must_use]
    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        let precision = self.precision.max(rhs.precision);
        let raw = self.raw_at(precision).checked_add(rhs.raw_at(precision))?;
        Some(Self {
            raw: u64::try_from(raw).ok()?,
            precision,
        })
    }

    /// Checked subtraction at the larger of the two precisions; `None` if
    /// `rhs` exceeds `self` (quantities cannot go negative).
    #[must_use]
    pub fn checked_sub(self, rhs: Self) -> Option<Self> {
        let precision = self.precision.max(rhs.precision);
        let raw = self.raw_at(precision).checked_sub(rhs.raw_at(precision))?;
        Some(Self {
            raw: u64::try_from(raw).ok()?,
            precision,
        })
    }

    /// Adds `units` whole units in place, saturating at the raw range.
    pub fn add_assign_units(&mut self, units: u64) {
        let delta = units.saturating_mul(POW10[self.precision as usize] as u64);
        self.raw = self.raw.saturating_add(delta);
    }
}

impl PartialEq for Quantity {
    fn eq(&self, other: &Self) -> bool {
        let precision = self.precision.max(other.precision);
        self.raw_at(precision) == other.raw_at(precision)
    }
}

impl Eq for Quantity {}

impl PartialOrd for Quantity {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Quantity {
    fn cmp(&self, other: &Self) -> Ordering {
        let precision = self.precision.max(other.precision);
        self.raw_at(precision).cmp(&other.raw_at(precision))
    }
}

impl Add for Quantity {
    type Output = Self;

    /// # Panics
    /// Panics if the rescaled sum overflows `u64`. Use
    /// [`Quantity::checked_add`] to handle overflow.
    fn add(self, rhs: Self) -> Self {
        self.checked_add(rhs).expect("quantity addition overflow")
    }
}

impl Sub for Quantity {
    type Output = Self;

    /// # Panics
    /// Panics if `rhs` exceeds `self` (quantities cannot go negative). Use
    /// [`Quantity::checked_sub`] to handle underflow.
    fn sub(self, rhs: Self) -> Self {
        self.checked_sub(rhs).expect("quantity subtraction underflow")
    }
}

impl AddAssign for Quantity {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl SubAssign for Quantity {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pow = POW10[self.precision as usize] as u64;
        if self.precision == 0 {
            write!(f, "{}", self.raw)
        } else {
            write!(
                f,
                "{}.{:0width$}",
                self.raw / pow,
                self.raw % pow,
                width = self.precision as usize
            )
        }
    }
}

impl FromStr for Quantity {
    type Err = TradingError;

    /// Parses a decimal literal exactly; the precision is inferred from the
    /// number of fractional digits.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.starts_with('-') {
            return Err(TradingError::invalid_value(format!(
                "quantity must be non-negative, was {s:?}"
            )));
        }
        let (int_s, frac_s) = s.split_once('.').unwrap_or((s, ""));
        if (int_s.is_empty() && frac_s.is_empty())
            || !frac_s.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(TradingError::invalid_value(format!(
                "invalid decimal literal: {s:?}"
            )));
        }
        let precision = u8::try_from(frac_s.len())
            .ok()
            .filter(|p| *p <= FIXED_PRECISION)
            .ok_or_else(|| {
                TradingError::invalid_value(format!(
                    "decimal literal {s:?} has more than {FIXED_PRECISION} fractional digits"
                ))
            })?;
        let int_part: u64 = if int_s.is_empty() {
            0
        } else {
            int_s
                .parse()
                .map_err(|_| TradingError::invalid_value(format!("invalid decimal literal: {s:?}")))?
        };
        let frac_part: u64 = if frac_s.is_empty() {
            0
        } else {
            frac_s
                .parse()
                .map_err(|_| TradingError::invalid_value(format!("invalid decimal literal: {s:?}")))?
        };
        let raw = int_part
            .checked_mul(POW10[precision as usize] as u64)
            .and_then(|scaled| scaled.checked_add(frac_part))
            .ok_or_else(|| {
                TradingError::invalid_value(format!("decimal literal {s:?} overflows the raw range"))
            })?;
        Ok(Self { raw, precision })
    }
}

impl Serialize for Quantity {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Quantity {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_negative() {
        let err = Quantity::new(-1.0, 0).unwrap_err();
        assert!(matches!(err, TradingError::InvalidValue { .. }));
    }

    #[test]
    fn test_new_rejects_precision_out_of_range() {
        assert!(Quantity::new(1.0, 10).is_err());
        assert!(Quantity::from_raw(1, 10).is_err());
    }

    #[test]
    fn test_rounding_half_away_from_zero() {
        assert_eq!(Quantity::new(0.125, 2).unwrap().raw, 13);
        assert_eq!(Quantity::new(2.5, 0).unwrap().raw, 3);
    }

    #[test]
    fn test_add_rescales_to_larger_precision() {
        let a = Quantity::from_raw(4, 0).unwrap();
        let b = Quantity::from_raw(6_000, 3).unwrap();
        let sum = a + b;
        assert_eq!(sum.precision, 3);
        assert_eq!(sum.raw, 10_000);
        assert_eq!(sum, Quantity::from_raw(10, 0).unwrap());
    }

    #[test]
    fn test_sub_underflow_is_none() {
        let a = Quantity::from_raw(5, 0).unwrap();
        let b = Quantity::from_raw(6, 0).unwrap();
        assert!(a.checked_sub(b).is_none());
        assert_eq!((b - a).raw, 1);
    }

    #[test]
    fn test_add_assign_units() {
        let mut qty = Quantity::from_raw(1_500, 3).unwrap();
        qty.add_assign_units(2);
        assert_eq!(qty.raw, 3_500);
    }

    #[test]
    fn test_display_and_from_str() {
        let qty = Quantity::from_raw(123_456, 4).unwrap();
        assert_eq!(qty.to_string(), "12.3456");
        assert_eq!("12.3456".parse::<Quantity>().unwrap(), qty);
        assert!("-1".parse::<Quantity>().is_err());
        assert!("1.0000000000".parse::<Quantity>().is_err());
    }

    #[test]
    fn test_serde_round_trip_preserves_raw_and_precision() {
        let qty = Quantity::from_raw(50, 1).unwrap();
        let json = serde_json::to_string(&qty).unwrap();
        assert_eq!(json, "\"5.0\"");
        let back: Quantity = serde_json::from_str(&json).unwrap();
        assert_eq!(back.raw, qty.raw);
        assert_eq!(back.precision, qty.precision);
    }
}
