//! Stable C ABI for the core value types.
//!
//! This is the marshaling edge of the system: the core never holds or
//! dereferences host-runtime objects — only plain values (C strings,
//! integers, enums as `u8`, `#[repr(C)]` structs) cross here, and `raw` /
//! `precision` pairs cross exactly, never through a float round-trip.
//!
//! Conventions:
//! - Fallible constructors take a nullable `status: *mut u8` out-parameter,
//!   set to [`STATUS_OK`] or an error-kind code. Constructors returning a
//!   pointer return null on failure; value-struct constructors return a
//!   zeroed sentinel.
//! - Heap-backed types cross as owned pointers; passing one to its `*_free`
//!   function transfers ownership back to the core for deallocation.
//! - Strings returned as `*mut c_char` are owned by the caller and must be
//!   released with [`string_free`].

pub mod book;
pub mod identifiers;
pub mod money;
pub mod price;
pub mod quantity;

use std::ffi::{CStr, CString, c_char};

use crate::error::TradingError;

/// The operation succeeded.
pub const STATUS_OK: u8 = 0;
/// A construction-time constraint was violated.
pub const STATUS_INVALID_VALUE: u8 = 1;
/// An identifier string was malformed.
pub const STATUS_INVALID_IDENTIFIER: u8 = 2;
/// Arithmetic across differing currencies.
pub const STATUS_CURRENCY_MISMATCH: u8 = 3;
/// An order event was inapplicable to the current state.
pub const STATUS_INVALID_STATE_TRANSITION: u8 = 4;
/// The operation is disallowed for the variant.
pub const STATUS_UNSUPPORTED_OPERATION: u8 = 5;
/// A duplicate execution id was replayed.
pub const STATUS_DUPLICATE_EVENT: u8 = 6;

/// Maps an error to its stable status code.
pub(crate) fn error_status(error: &TradingError) -> u8 {
    match error {
        TradingError::InvalidValue { .. } => STATUS_INVALID_VALUE,
        TradingError::InvalidIdentifier { .. } => STATUS_INVALID_IDENTIFIER,
        TradingError::CurrencyMismatch { .. } => STATUS_CURRENCY_MISMATCH,
        TradingError::InvalidStateTransition { .. } => STATUS_INVALID_STATE_TRANSITION,
        TradingError::UnsupportedOperation { .. } => STATUS_UNSUPPORTED_OPERATION,
        TradingError::DuplicateEvent { .. } => STATUS_DUPLICATE_EVENT,
    }
}

/// Writes `code` through `status` when non-null.
pub(crate) unsafe fn write_status(status: *mut u8, code: u8) {
    if !status.is_null() {
        unsafe { *status = code };
    }
}

/// Borrows a UTF-8 string from a C string pointer.
///
/// # Safety
/// `ptr` must be null or point to a valid NUL-terminated string that
/// outlives the borrow.
pub(crate) unsafe fn cstr_to_str<'a>(ptr: *const c_char) -> Result<&'a str, TradingError> {
    if ptr.is_null() {
        return Err(TradingError::invalid_value("null string pointer"));
    }
    unsafe { CStr::from_ptr(ptr) }
        .to_str()
        .map_err(|_| TradingError::invalid_value("string is not valid UTF-8"))
}

/// Allocates an owned C string for the caller; null if `value` contains an
/// interior NUL.
pub(crate) fn str_to_cstr(value: &str) -> *mut c_char {
    match CString::new(value) {
        Ok(cstring) => cstring.into_raw(),
        Err(_) => std::ptr::null_mut(),
    }
}

/// Releases a string previously returned by this ABI.
///
/// # Safety
/// `ptr` must be null or a pointer obtained from this ABI's string-returning
/// functions, passed at most once.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn string_free(ptr: *mut c_char) {
    if !ptr.is_null() {
        drop(unsafe { CString::from_raw(ptr) });
    }
}
