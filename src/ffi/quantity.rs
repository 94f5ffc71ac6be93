//! C ABI for [`Quantity`].

use std::ffi::c_char;

use super::{STATUS_INVALID_VALUE, STATUS_OK, error_status, str_to_cstr, write_status};
use crate::types::Quantity;

/// Creates a quantity from a decimal value, rounding half away from zero to
/// `precision` digits. Negative values fail. On failure writes an error
/// code through `status` and returns a zeroed sentinel.
///
/// # Safety
/// `status` must be null or valid for a single `u8` write.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn quantity_new(value: f64, precision: u8, status: *mut u8) -> Quantity {
    match Quantity::new(value, precision) {
        Ok(quantity) => {
            unsafe { write_status(status, STATUS_OK) };
            quantity
        }
        Err(error) => {
            unsafe { write_status(status, error_status(&error)) };
            Quantity { raw: 0, precision: 0 }
        }
    }
}

/// Creates a quantity from an already-scaled raw integer. Exact: `raw` and
/// `precision` are preserved bit-for-bit.
///
/// # Safety
/// `status` must be null or valid for a single `u8` write.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn quantity_from_raw(raw: u64, precision: u8, status: *mut u8) -> Quantity {
    match Quantity::from_raw(raw, precision) {
        Ok(quantity) => {
            unsafe { write_status(status, STATUS_OK) };
            quantity
        }
        Err(error) => {
            unsafe { write_status(status, error_status(&error)) };
            Quantity { raw: 0, precision: 0 }
        }
    }
}

/// Returns ownership of `quantity` to the core for deallocation.
/// Quantities are plain values; provided for ABI symmetry.
#[unsafe(no_mangle)]
pub extern "C" fn quantity_free(quantity: Quantity) {
    drop(quantity);
}

/// Lossy conversion for display and interop only.
#[unsafe(no_mangle)]
pub extern "C" fn quantity_as_f64(quantity: Quantity) -> f64 {
    quantity.as_f64()
}

/// Formats the exact decimal representation; release with
/// [`string_free`](super::string_free).
#[unsafe(no_mangle)]
pub extern "C" fn quantity_to_cstr(quantity: Quantity) -> *mut c_char {
    str_to_cstr(&quantity.to_string())
}

/// Adds `other` into the caller-owned `quantity` slot, rescaling to the
/// larger precision. The slot is unchanged on overflow.
///
/// # Safety
/// `quantity` must be a valid pointer to a `Quantity`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn quantity_add_assign(quantity: *mut Quantity, other: Quantity) -> u8 {
    if quantity.is_null() {
        return STATUS_INVALID_VALUE;
    }
    let slot = unsafe { &mut *quantity };
    match slot.checked_add(other) {
        Some(sum) => {
            *slot = sum;
            STATUS_OK
        }
        None => STATUS_INVALID_VALUE,
    }
}

/// Adds `units` whole units into the caller-owned slot, saturating at the
/// raw range.
///
/// # Safety
/// `quantity` must be a valid pointer to a `Quantity`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn quantity_add_assign_u64(quantity: *mut Quantity, units: u64) -> u8 {
    if quantity.is_null() {
        return STATUS_INVALID_VALUE;
    }
    unsafe { &mut *quantity }.add_assign_units(units);
    STATUS_OK
}

/// Subtracts `other` from the caller-owned `quantity` slot, rescaling to
/// the larger precision. The slot is unchanged on underflow (quantities
/// cannot go negative).
///
/// # Safety
/// `quantity` must be a valid pointer to a `Quantity`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn quantity_sub_assign(quantity: *mut Quantity, other: Quantity) -> u8 {
    if quantity.is_null() {
        return STATUS_INVALID_VALUE;
    }
    let slot = unsafe { &mut *quantity };
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
    fn test_negative_value_reports_status() {
        let mut status = STATUS_OK;
        let quantity = unsafe { quantity_new(-1.0, 0, &mut status) };
        assert_eq!(status, STATUS_INVALID_VALUE);
        assert_eq!(quantity.raw, 0);
    }

    #[test]
    fn test_sub_assign_underflow_leaves_slot() {
        let mut slot = Quantity::from_raw(5, 0).unwrap();
        let status = unsafe { quantity_sub_assign(&mut slot, Quantity::from_raw(6, 0).unwrap()) };
        assert_eq!(status, STATUS_INVALID_VALUE);
        assert_eq!(slot.raw, 5);
    }

    #[test]
    fn test_add_assign_u64_scales_units() {
        let mut slot = Quantity::from_raw(1_500, 3).unwrap();
        let status = unsafe { quantity_add_assign_u64(&mut slot, 2) };
        assert_eq!(status, STATUS_OK);
        assert_eq!(slot.raw, 3_500);
    }
}
