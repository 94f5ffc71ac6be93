//! Scaled-integer conversion helpers shared by the fixed-point value types.
//!
//! A fixed-point value is `{ raw, precision }` with semantic value
//! `raw / 10^precision`. The maximum representable fractional resolution is
//! [`FIXED_PRECISION`] digits, i.e. a scalar of [`FIXED_SCALAR`].

use crate::error::TradingError;

/// Maximum number of fractional digits for any fixed-point value.
pub const FIXED_PRECISION: u8 = 9;

/// The scalar corresponding to [`FIXED_PRECISION`] fractional digits.
pub const FIXED_SCALAR: f64 = 1_000_000_000.0;

/// Powers of ten up to `10^FIXED_PRECISION`, indexed by precision.
pub(crate) const POW10: [i64; (FIXED_PRECISION + 1) as usize] = [
    1,
    10,
    100,
    1_000,
    10_000,
    100_000,
    1_000_000,
    10_000_000,
    100_000_000,
    1_000_000_000,
];

/// Validates that `precision` does not exceed [`FIXED_PRECISION`].
pub fn check_precision(precision: u8) -> Result<(), TradingError> {
    if precision > FIXED_PRECISION {
        return Err(TradingError::invalid_value(format!(
            "precision {precision} exceeds maximum {FIXED_PRECISION}"
        )));
    }
    Ok(())
}

/// Converts a finite `f64` to a signed raw scaled by `10^precision`.
///
/// Rounding policy: half away from zero (`f64::round`). The caller must have
/// validated `precision` via [`check_precision`].
pub(crate) fn f64_to_fixed_i64(value: f64, precision: u8) -> Result<i64, TradingError> {
    if !value.is_finite() {
        return Err(TradingError::invalid_value(format!(
            "value must be finite, was {value}"
        )));
    }
    let scaled = (value * POW10[precision as usize] as f64).round();
    if scaled < i64::MIN as f64 || scaled > i64::MAX as f64 {
        return Err(TradingError::invalid_value(format!(
            "value {value} at precision {precision} overflows the raw range"
        )));
    }
    Ok(scaled as i64)
}

/// Converts a finite, non-negative `f64` to an unsigned raw scaled by
/// `10^precision`, with the same rounding policy as [`f64_to_fixed_i64`].
pub(crate) fn f64_to_fixed_u64(value: f64, precision: u8) -> Result<u64, TradingError> {
    if !value.is_finite() {
        return Err(TradingError::invalid_value(format!(
            "value must be finite, was {value}"
        )));
    }
    if value < 0.0 {
        return Err(TradingError::invalid_value(format!(
            "value must be non-negative, was {value}"
        )));
    }
    let scaled = (value * POW10[precision as usize] as f64).round();
    if scaled > u64::MAX as f64 {
        return Err(TradingError::invalid_value(format!(
            "value {value} at precision {precision} overflows the raw range"
        )));
    }
    Ok(scaled as u64)
}

/// Lossy conversion from a raw scaled integer back to `f64`.
///
/// For display and interop only; never used in accounting logic.
#[must_use]
pub(crate) fn fixed_i64_to_f64(raw: i64, precision: u8) -> f64 {
    raw as f64 / POW10[precision as usize] as f64
}

/// Lossy conversion from an unsigned raw scaled integer back to `f64`.
#[must_use]
pub(crate) fn fixed_u64_to_f64(raw: u64, precision: u8) -> f64 {
    raw as f64 / POW10[precision as usize] as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_precision_bounds() {
        assert!(check_precision(0).is_ok());
        assert!(check_precision(FIXED_PRECISION).is_ok());
        assert!(check_precision(FIXED_PRECISION + 1).is_err());
    }

    #[test]
    fn test_rounding_half_away_from_zero() {
        // 0.125 is exact in binary, so the half-way case is not perturbed
        // by representation error.
        assert_eq!(f64_to_fixed_i64(0.125, 2).unwrap(), 13);
        assert_eq!(f64_to_fixed_i64(-0.125, 2).unwrap(), -13);
        assert_eq!(f64_to_fixed_i64(2.5, 0).unwrap(), 3);
        assert_eq!(f64_to_fixed_i64(-2.5, 0).unwrap(), -3);
        assert_eq!(f64_to_fixed_u64(0.5, 0).unwrap(), 1);
    }

    #[test]
    fn test_rejects_non_finite() {
        assert!(f64_to_fixed_i64(f64::NAN, 2).is_err());
        assert!(f64_to_fixed_i64(f64::INFINITY, 2).is_err());
        assert!(f64_to_fixed_u64(f64::NEG_INFINITY, 2).is_err());
    }

    #[test]
    fn test_rejects_negative_unsigned() {
        assert!(f64_to_fixed_u64(-0.01, 2).is_err());
    }

    #[test]
    fn test_round_trip_within_tolerance() {
        for precision in 0..=FIXED_PRECISION {
            let raw = f64_to_fixed_i64(42.0, precision).unwrap();
            assert_eq!(raw, 42 * POW10[precision as usize]);
            let back = fixed_i64_to_f64(raw, precision);
            assert!((back - 42.0).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn test_fixed_scalar_matches_max_precision() {
        assert_eq!(POW10[FIXED_PRECISION as usize] as f64, FIXED_SCALAR);
    }
}
