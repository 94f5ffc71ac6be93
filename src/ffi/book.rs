//! C ABI for the order book, as an opaque-pointer API.

use std::ffi::c_char;

use super::{STATUS_INVALID_VALUE, STATUS_OK, cstr_to_str, error_status, write_status};
use crate::book::{BookDelta, BookOrder, OrderBook};
use crate::enums::{BookAction, BookLevel, OrderSide};
use crate::error::TradingError;
use crate::identifiers::InstrumentId;
use crate::types::{Price, Quantity, UnixNanos};

/// Allocates an empty order book for the instrument named by
/// `instrument_ptr` (`SYMBOL.VENUE`) at the granularity selected by the
/// `book_level` discriminant. Null on failure.
///
/// # Safety
/// `instrument_ptr` must point to a valid NUL-terminated string; `status`
/// must be null or valid for a single `u8` write.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn order_book_new(
    instrument_ptr: *const c_char,
    book_level: u8,
    status: *mut u8,
) -> *mut OrderBook {
    let result = unsafe { cstr_to_str(instrument_ptr) }
        .and_then(|s| s.parse::<InstrumentId>())
        .and_then(|instrument_id| Ok((instrument_id, BookLevel::try_from(book_level)?)));
    match result {
        Ok((instrument_id, book_level)) => {
            unsafe { write_status(status, STATUS_OK) };
            Box::into_raw(Box::new(OrderBook::new(instrument_id, book_level)))
        }
        Err(error) => {
            unsafe { write_status(status, error_status(&error)) };
            std::ptr::null_mut()
        }
    }
}

/// Transfers ownership of `book` back to the core for deallocation.
///
/// # Safety
/// `book` must be null or a pointer obtained from [`order_book_new`],
/// passed at most once.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn order_book_free(book: *mut OrderBook) {
    if !book.is_null() {
        drop(unsafe { Box::from_raw(book) });
    }
}

/// Applies one delta to the book. The price and size cross as exact
/// `raw`/`precision` pairs; `action` and `side` cross as their fixed
/// discriminants.
///
/// # Safety
/// `book` must be a valid pointer obtained from [`order_book_new`].
#[unsafe(no_mangle)]
#[allow(clippy::too_many_arguments)]
pub unsafe extern "C" fn order_book_apply(
    book: *mut OrderBook,
    action: u8,
    side: u8,
    price_raw: i64,
    price_precision: u8,
    size_raw: u64,
    size_precision: u8,
    order_id: u64,
    ts_event: UnixNanos,
) -> u8 {
    let Some(book) = (unsafe { book.as_mut() }) else {
        return STATUS_INVALID_VALUE;
    };
    let result: Result<(), TradingError> = (|| {
        let delta = BookDelta {
            instrument_id: book.instrument_id,
            action: BookAction::try_from(action)?,
            order: BookOrder::new(
                Price::from_raw(price_raw, price_precision)?,
                Quantity::from_raw(size_raw, size_precision)?,
                OrderSide::try_from(side)?,
                order_id,
            ),
            ts_event,
        };
        book.apply(&delta)
    })();
    match result {
        Ok(()) => STATUS_OK,
        Err(error) => error_status(&error),
    }
}

/// Writes the best bid price through `out`; `true` when a bid level exists.
///
/// # Safety
/// `book` and `out` must be valid pointers.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn order_book_best_bid_price(
    book: *const OrderBook,
    out: *mut Price,
) -> bool {
    let (Some(book), Some(out)) = (unsafe { book.as_ref() }, unsafe { out.as_mut() }) else {
        return false;
    };
    match book.best_bid_price() {
        Some(price) => {
            *out = price;
            true
        }
        None => false,
    }
}

/// Writes the best ask price through `out`; `true` when an ask level
/// exists.
///
/// # Safety
/// `book` and `out` must be valid pointers.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn order_book_best_ask_price(
    book: *const OrderBook,
    out: *mut Price,
) -> bool {
    let (Some(book), Some(out)) = (unsafe { book.as_ref() }, unsafe { out.as_mut() }) else {
        return false;
    };
    match book.best_ask_price() {
        Some(price) => {
            *out = price;
            true
        }
        None => false,
    }
}

/// Writes the aggregate size at the best bid through `out`; `true` when a
/// bid level exists.
///
/// # Safety
/// `book` and `out` must be valid pointers.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn order_book_best_bid_size(
    book: *const OrderBook,
    out: *mut Quantity,
) -> bool {
    let (Some(book), Some(out)) = (unsafe { book.as_ref() }, unsafe { out.as_mut() }) else {
        return false;
    };
    match book.best_bid_size() {
        Some(size) => {
            *out = size;
            true
        }
        None => false,
    }
}

/// Writes the aggregate size at the best ask through `out`; `true` when an
/// ask level exists.
///
/// # Safety
/// `book` and `out` must be valid pointers.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn order_book_best_ask_size(
    book: *const OrderBook,
    out: *mut Quantity,
) -> bool {
    let (Some(book), Some(out)) = (unsafe { book.as_ref() }, unsafe { out.as_mut() }) else {
        return false;
    };
    match book.best_ask_size() {
        Some(size) => {
            *out = size;
            true
        }
        None => false,
    }
}

/// The venue timestamp of the most recently applied update, or 0.
///
/// # Safety
/// `book` must be a valid pointer.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn order_book_ts_last(book: *const OrderBook) -> UnixNanos {
    match unsafe { book.as_ref() } {
        Some(book) => book.ts_last,
        None => 0,
    }
}

/// Discards all resting state on both sides.
///
/// # Safety
/// `book` must be a valid pointer.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn order_book_clear(book: *mut OrderBook) {
    if let Some(book) = unsafe { book.as_mut() } {
        book.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::CString;

    #[test]
    fn test_book_lifecycle_over_ffi() {
        let instrument = CString::new("BTCUSDT.BINANCE").unwrap();
        let mut status = u8::MAX;
        let book = unsafe { order_book_new(instrument.as_ptr(), 2, &mut status) };
        assert_eq!(status, STATUS_OK);

        // Add(bid, 10.05, 100) then query the top of book.
        let status = unsafe { order_book_apply(book, 1, 1, 1005, 2, 100, 0, 0, 1_000) };
        assert_eq!(status, STATUS_OK);
        let mut price = Price { raw: 0, precision: 0 };
        assert!(unsafe { order_book_best_bid_price(book, &mut price) });
        assert_eq!(price.raw, 1005);
        assert_eq!(price.precision, 2);
        assert_eq!(unsafe { order_book_ts_last(book) }, 1_000);

        // Unrecognized side discriminant fails with InvalidValue.
        let status = unsafe { order_book_apply(book, 1, 0, 1005, 2, 100, 0, 0, 1_001) };
        assert_eq!(status, STATUS_INVALID_VALUE);

        unsafe { order_book_free(book) };
    }

    #[test]
    fn test_book_new_rejects_bad_level() {
        let instrument = CString::new("BTCUSDT.BINANCE").unwrap();
        let mut status = STATUS_OK;
        let book = unsafe { order_book_new(instrument.as_ptr(), 9, &mut status) };
        assert!(book.is_null());
        assert_eq!(status, STATUS_INVALID_VALUE);
    }
}
