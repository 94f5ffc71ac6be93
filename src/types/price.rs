//! Exact fixed-precision price type.

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, AddAssign, Sub, SubAssign};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::fixed::{FIXED_PRECISION, POW10, check_precision, f64_to_fixed_i64, fixed_i64_to_f64};
use crate::error::TradingError;

/// A price as an exact scaled integer: semantic value = `raw / 10^precision`.
///
/// `raw` may be negative to support spreads and negative-rate instruments.
/// Values of differing precision are rescaled to the larger precision before
/// any arithmetic or comparison; arithmetic results retain the larger
/// precision. Instances are immutable once constructed — the assign
/// operators mutate the caller-owned slot, never a shared instance.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct Price {
    /// The scaled integer value.
    pub raw: i64,
    /// Number of fractional digits, at most [`FIXED_PRECISION`].
    pub precision: u8,
}

impl Price {
    /// Creates a price from a human-decimal value, rounding half away from
    /// zero to `precision` fractional digits.
    ///
    /// # Errors
    /// Returns [`TradingError::InvalidValue`] if `precision` exceeds
    /// [`FIXED_PRECISION`], or if `value` is non-finite or overflows the
    /// raw range.
    pub fn new(value: f64, precision: u8) -> Result<Self, TradingError> {
        check_precision(precision)?;
        Ok(Self {
            raw: f64_to_fixed_i64(value, precision)?,
            precision,
        })
    }

    /// Creates a price from an already-scaled raw integer. Exact.
    ///
    /// # Errors
    /// Returns [`TradingError::InvalidValue`] if `precision` exceeds
    /// [`FIXED_PRECISION`].
    pub fn from_raw(raw: i64, precision: u8) -> Result<Self, TradingError> {
        check_precision(precision)?;
        Ok(Self { raw, precision })
    }

    /// The zero price at the given precision.
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
        fixed_i64_to_f64(self.raw, self.precision)
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

    /// This price's raw value rescaled to `precision`, widened to `i128`
    /// so rescaling itself can never overflow.
    pub(crate) fn raw_at(&self, precision: u8) -> i128 {
        debug_assert!(precision >= self.precision);
        i128::from(self.raw) * i128::from(POW10[(precision - self.precision) as usize])
    }

    /// Checked addition at the larger of the two precisions.
    #[must_use]
    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        let precision = self.precision.max(rhs.precision);
        let raw = self.raw_at(precision).checked_add(rhs.raw_at(precision))?;
        Some(Self {
            raw: i64::try_from(raw).ok()?,
            precision,
        })
    }

    /// Checked subtraction at the larger of the two precisions.
    #[must_use]
    pub fn checked_sub(self, rhs: Self) -> Option<Self> {
        let precision = self.precision.max(rhs.precision);
        let raw = self.raw_at(precision).checked_sub(rhs.raw_at(precision))?;
        Some(Self {
            raw: i64::try_from(raw).ok()?,
            precision,
        })
    }
}

impl PartialEq for Price {
    fn eq(&self, other: &Self) -> bool {
        let precision = self.precision.max(other.precision);
        self.raw_at(precision) == other.raw_at(precision)
    }
}

impl Eq for Price {}

impl PartialOrd for Price {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Price {
    fn cmp(&self, other: &Self) -> Ordering {
        let precision = self.precision.max(other.precision);
        self.raw_at(precision).cmp(&other.raw_at(precision))
    }
}

impl Add for Price {
    type Output = Self;

    /// # Panics
    /// Panics if the rescaled sum overflows `i64`, like the std integer
    /// operators. Use [`Price::checked_add`] to handle overflow.
    fn add(self, rhs: Self) -> Self {
        self.checked_add(rhs).expect("price addition overflow")
    }
}

impl Sub for Price {
    type Output = Self;

    /// # Panics
    /// Panics if the rescaled difference overflows `i64`. Use
    /// [`Price::checked_sub`] to handle overflow.
    fn sub(self, rhs: Self) -> Self {
        self.checked_sub(rhs).expect("price subtraction overflow")
    }
}

impl AddAssign for Price {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl SubAssign for Price {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pow = POW10[self.precision as usize];
        let sign = if self.raw < 0 { "-" } else { "" };
        let int_part = (self.raw / pow).unsigned_abs();
        if self.precision == 0 {
            write!(f, "{sign}{int_part}")
        } else {
            let frac = (self.raw % pow).unsigned_abs();
            write!(
                f,
                "{sign}{int_part}.{frac:0width$}",
                width = self.precision as usize
            )
        }
    }
}

impl FromStr for Price {
    type Err = TradingError;

    /// Parses a decimal literal exactly; the precision is inferred from the
    /// number of fractional digits.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (negative, magnitude) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };
        let (int_s, frac_s) = magnitude.split_once('.').unwrap_or((magnitude, ""));
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
        let int_part: i64 = if int_s.is_empty() {
            0
        } else {
            int_s
                .parse()
                .map_err(|_| TradingError::invalid_value(format!("invalid decimal literal: {s:?}")))?
        };
        let frac_part: i64 = if frac_s.is_empty() {
            0
        } else {
            frac_s
                .parse()
                .map_err(|_| TradingError::invalid_value(format!("invalid decimal literal: {s:?}")))?
        };
        let magnitude_raw = int_part
            .checked_mul(POW10[precision as usize])
            .and_then(|scaled| scaled.checked_add(frac_part))
            .ok_or_else(|| {
                TradingError::invalid_value(format!("decimal literal {s:?} overflows the raw range"))
            })?;
        let raw = if negative { -magnitude_raw } else { magnitude_raw };
        Ok(Self { raw, precision })
    }
}

impl Serialize for Price {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
