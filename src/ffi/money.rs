//! C ABI for [`Money`].
//!
//! Money carries its currency handle, so instances cross the boundary as
//! owned pointers; `money_free` transfers ownership back for deallocation.

use std::ffi::c_char;

use super::{
    STATUS_INVALID_VALUE, STATUS_OK, cstr_to_str, error_status, str_to_cstr, write_status,
};
use crate::error::TradingError;
use crate::types::{Currency, Money};

unsafe fn currency_from_ptr(code_ptr: *const c_char) -> Result<Currency, TradingError> {
    unsafe { cstr_to_str(code_ptr) }?.parse()
}

/// Allocates a money amount in the currency named by `code_ptr`, rounding
/// half away from zero to the currency's precision. Null on failure.
///
/// # Safety
/// `code_ptr` must point to a valid NUL-terminated string; `status` must be
/// null or valid for a single `u8` write.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn money_new(
    amount: f64,
    code_ptr: *const c_char,
    status: *mut u8,
) -> *mut Money {
    let result = unsafe { currency_from_ptr(code_ptr) }
        .and_then(|currency| Money::new(amount, currency));
    match result {
        Ok(money) => {
            unsafe { write_status(status, STATUS_OK) };
            Box::into_raw(Box::new(money))
        }
        Err(error) => {
            unsafe { write_status(status, error_status(&error)) };
            std::ptr::null_mut()
        }
    }
}

/// Allocates a money amount from an already-scaled raw integer. Exact.
/// Null on failure.
///
/// # Safety
/// As [`money_new`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn money_from_raw(
    raw: i64,
    code_ptr: *const c_char,
    status: *mut u8,
) -> *mut Money {
    match unsafe { currency_from_ptr(code_ptr) } {
        Ok(currency) => {
            unsafe { write_status(status, STATUS_OK) };
            Box::into_raw(Box::new(Money::from_raw(raw, currency)))
        }
        Err(error) => {
            unsafe { write_status(status, error_status(&error)) };
            std::ptr::null_mut()
        }
    }
}

/// Transfers ownership of `money` back to the core for deallocation.
///
/// # Safety
/// `money` must be null or a pointer obtained from this ABI, passed at most
/// once.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn money_free(money: *mut Money) {
    if !money.is_null() {
        drop(unsafe { Box::from_raw(money) });
    }
}

/// Lossy conversion for display and interop only. Returns NaN for null.
///
/// # Safety
/// `money` must be null or a valid pointer.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn money_as_f64(money: *const Money) -> f64 {
    match unsafe { money.as_ref() } {
        Some(money) => money.as_f64(),
        None => f64::NAN,
    }
}

/// The raw scaled integer amount; preserved exactly across the boundary.
///
/// # Safety
/// `money` must be a valid pointer.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn money_raw(money: *const Money) -> i64 {
    match unsafe { money.as_ref() } {
        Some(money) => money.raw,
        None => 0,
    }
}

/// The currency code; release with [`string_free`](super::string_free).
///
/// # Safety
/// `money` must be a valid pointer.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn money_currency_code(money: *const Money) -> *mut c_char {
    match unsafe { money.as_ref() } {
        Some(money) => str_to_cstr(money.currency.code),
        None => std::ptr::null_mut(),
    }
}

/// Formats `"<amount> <CODE>"`; release with
/// [`string_free`](super::string_free).
///
/// # Safety
/// `money` must be a valid pointer.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn money_to_cstr(money: *const Money) -> *mut c_char {
    match unsafe { money.as_ref() } {
        Some(money) => str_to_cstr(&money.to_string()),
        None => std::ptr::null_mut(),
    }
}

/// Adds `other` into the caller-owned slot. The slot is unchanged on
/// currency mismatch or overflow.
///
/// # Safety
/// `money` and `other` must be valid pointers.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn money_add_assign(money: *mut Money, other: *const Money) -> u8 {
    let (Some(slot), Some(other)) = (unsafe { money.as_mut() }, unsafe { other.as_ref() }) else {
        return STATUS_INVALID_VALUE;
    };
    match slot.add_assign(*other) {
        Ok(()) => STATUS_OK,
        Err(error) => error_status(&error),
    }
}

/// Subtracts `other` from the caller-owned slot. The slot is unchanged on
/// currency mismatch or overflow.
///
/// # Safety
/// `money` and `other` must be valid pointers.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn money_sub_assign(money: *mut Money, other: *const Money) -> u8 {
    let (Some(slot), Some(other)) = (unsafe { money.as_mut() }, unsafe { other.as_ref() }) else {
        return STATUS_INVALID_VALUE;
    };
    match slot.sub_assign(*other) {
        Ok(()) => STATUS_OK,
        Err(error) => error_status(&error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ffi::STATUS_CURRENCY_MISMATCH;
    use std::ffi::CString;

    #[test]
    fn test_money_round_trip_over_ffi() {
        let code = CString::new("USD").unwrap();
        let mut status = u8::MAX;
        let money = unsafe { money_from_raw(125_050, code.as_ptr(), &mut status) };
        assert_eq!(status, STATUS_OK);
        assert_eq!(unsafe { money_raw(money) }, 125_050);
        assert!((unsafe { money_as_f64(money) } - 1250.50).abs() < 1e-9);
        unsafe { money_free(money) };
    }

    #[test]
    fn test_unknown_currency_reports_status() {
        let code = CString::new("ZZZ").unwrap();
        let mut status = STATUS_OK;
        let money = unsafe { money_new(1.0, code.as_ptr(), &mut status) };
        assert!(money.is_null());
        assert_ne!(status, STATUS_OK);
    }

    #[test]
    fn test_cross_currency_add_assign_rejected() {
        let usd = CString::new("USD").unwrap();
        let eur = CString::new("EUR").unwrap();
        let a = unsafe { money_from_raw(100, usd.as_ptr(), std::ptr::null_mut()) };
        let b = unsafe { money_from_raw(100, eur.as_ptr(), std::ptr::null_mut()) };
        assert_eq!(unsafe { money_add_assign(a, b) }, STATUS_CURRENCY_MISMATCH);
        assert_eq!(unsafe { money_raw(a) }, 100);
        unsafe { money_free(a) };
        unsafe { money_free(b) };
    }
}
