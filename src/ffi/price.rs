//! C ABI for [`Price`].

use std::ffi::c_char;

use super::{STATUS_INVALID_VALUE, STATUS_OK, error_status, str_to_cstr, write_status};
use crate::types::Price;

/// Creates a price from a decimal value, rounding half away from zero to
/// `precision` digits. On failure writes an error code through `status` and
/// returns a zeroed sentinel.
///
/// # Safety
/// `status` must be null or valid for a single `u8` write.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn price_new(value: f64, precision: u8, status: *mut u8) -> Price {
    match Price::new(value, precision) {
        Ok(price) => {
            unsafe { write_status(status, STATUS_OK) };
            price
        }
        Err(error) => {
            unsafe { write_status(status, error_status(&error)) };
            Price { raw: 0, precision: 0 }
        }
    }
}

/// Creates a price from an already-scaled raw integer. Exact: `raw` and
/// `precision` are preserved bit-for-bit.
///
/// # Safety
/// `status` must be null or valid for a single `u8` write.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn price_from_raw(raw: i64, precision: u8, status: *mut u8) -> Price {
    match Price::from_raw(raw, precision) {
        Ok(price) => {
            unsafe { write_status(status, STATUS_OK) };
            price
        }
        Err(error) => {
            unsafe { write_status(status, error_status(&error)) };
            Price { raw: 0, precision: 0 }
        }
    }
}

/// Returns ownership of `price` to the core for deallocation. Prices are
/// plain values; provided for ABI symmetry.
#[unsafe(no_mangle)]
pub extern "C" fn price_free(price: Price) {
    drop(price);
}

/// Lossy conversion for display and interop only.
#[unsafe(no_mangle)]
pub extern "C" fn price_as_f64(price: Price) -> f64 {
    price.as_f64()
}

/// Formats the exact decimal representation; release with
/// [`string_free`](super::string_free).
#[unsafe(no_mangle)]
pub extern "C" fn price_to_cstr(price: Price) -> *mut c_char {
    str_to_cstr(&price.to_string())
}

/// Adds `other` into the caller-owned `price` slot, rescaling to the larger
/// precision. The slot is unchanged on overflow.
///
/// # Safety
/// `price` must be a valid pointer to a `Price`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn price_add_assign(price: *mut Price, other: Price) -> u8 {
    if price.is_null() {
        return STATUS_INVALID_VALUE;
    }
    let slot = unsafe { &mut *price };
    match slot.checked_add(other) {
        Some(sum) => {
            *slot = sum;
            STATUS_OK
        }
        None => STATUS_INVALID_VALUE,
    }
}

/// Subtracts `other` from the caller-owned `price` slot, rescaling to the
/// larger precision. The slot is unchanged on overflow.
///
/// # Safety
/// `price` must be a valid pointer to a `Price`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn price_sub_assign(price: *mut Price, other: Price) -> u8 {
    if price.is_null() {
        return STATUS_INVALID_VALUE;
    }
    let slot = unsafe { &mut *price };
    match slot.checked_sub(other) {
        Some(diff) => {
            *slot = diff;
            STATUS_OK
        }
        None => STATUS_INVALID_VALUE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_raw_preserves_raw_and_precision() {
        let mut status = u8::MAX;
        let price = unsafe { price_from_raw(100_600_000_000, 9, &mut status) };
        assert_eq!(status, STATUS_OK);
        assert_eq!(price.raw, 100_600_000_000);
        assert_eq!(price.precision, 9);
    }

    #[test]
    fn test_invalid_precision_reports_status() {
        let mut status = STATUS_OK;
        let price = unsafe { price_new(1.0, 10, &mut status) };
        assert_eq!(status, STATUS_INVALID_VALUE);
        assert_eq!(price.raw, 0);
    }

    #[test]
    fn test_add_assign_in_place() {
        let mut slot = Price::from_raw(1005, 2).unwrap();
        let other = Price::from_raw(5, 2).unwrap();
        let status = unsafe { price_add_assign(&mut slot, other) };
        assert_eq!(status, STATUS_OK);
        assert_eq!(slot.raw, 1010);
    }

    #[test]
    fn test_add_assign_overflow_leaves_slot() {
        let mut slot = Price::from_raw(i64::MAX, 0).unwrap();
        let status = unsafe { price_add_assign(&mut slot, Price::from_raw(1, 0).unwrap()) };
        assert_eq!(status, STATUS_INVALID_VALUE);
        assert_eq!(slot.raw, i64::MAX);
    }
}
