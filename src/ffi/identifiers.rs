//! C ABI for the identifier types.
//!
//! Identifiers cross the boundary as owned pointers constructed from C
//! strings; `*_free` transfers ownership back for deallocation and
//! `*_to_cstr` is the only projection.

use std::ffi::c_char;

use super::{STATUS_OK, cstr_to_str, error_status, str_to_cstr, write_status};
use crate::identifiers::{
    AccountId, ClientOrderId, ComponentId, ExecutionId, InstrumentId, OrderListId, PositionId,
    StrategyId, Symbol, TradeId, TraderId, Venue, VenueOrderId,
};

macro_rules! identifier_ffi {
    ($type:ident, $new_fn:ident, $to_cstr_fn:ident, $free_fn:ident) => {
        /// Allocates the identifier from a NUL-terminated UTF-8 string.
        /// Null on failure, with the error code written through `status`.
        ///
        /// # Safety
        /// `ptr` must point to a valid NUL-terminated string; `status` must
        /// be null or valid for a single `u8` write.
        #[unsafe(no_mangle)]
        pub unsafe extern "C" fn $new_fn(ptr: *const c_char, status: *mut u8) -> *mut $type {
            let result = unsafe { cstr_to_str(ptr) }.and_then($type::new);
            match result {
                Ok(identifier) => {
                    unsafe { write_status(status, STATUS_OK) };
                    Box::into_raw(Box::new(identifier))
                }
                Err(error) => {
                    unsafe { write_status(status, error_status(&error)) };
                    std::ptr::null_mut()
                }
            }
        }

        /// The identifier's string value; release with
        /// [`string_free`](super::string_free).
        ///
        /// # Safety
        /// `identifier` must be a valid pointer.
        #[unsafe(no_mangle)]
        pub unsafe extern "C" fn $to_cstr_fn(identifier: *const $type) -> *mut c_char {
            match unsafe { identifier.as_ref() } {
                Some(identifier) => str_to_cstr(identifier.as_str()),
                None => std::ptr::null_mut(),
            }
        }

        /// Transfers ownership of `identifier` back to the core for
        /// deallocation.
        ///
        /// # Safety
        /// `identifier` must be null or a pointer obtained from this ABI,
        /// passed at most once.
        #[unsafe(no_mangle)]
        pub unsafe extern "C" fn $free_fn(identifier: *mut $type) {
            if !identifier.is_null() {
                drop(unsafe { Box::from_raw(identifier) });
            }
        }
    };
}

identifier_ffi!(Symbol, symbol_new, symbol_to_cstr, symbol_free);
identifier_ffi!(Venue, venue_new, venue_to_cstr, venue_free);
identifier_ffi!(TraderId, trader_id_new, trader_id_to_cstr, trader_id_free);
identifier_ffi!(
    StrategyId,
    strategy_id_new,
    strategy_id_to_cstr,
    strategy_id_free
);
identifier_ffi!(
    ClientOrderId,
    client_order_id_new,
    client_order_id_to_cstr,
    client_order_id_free
);
identifier_ffi!(
    VenueOrderId,
    venue_order_id_new,
    venue_order_id_to_cstr,
    venue_order_id_free
);
identifier_ffi!(
    AccountId,
    account_id_new,
    account_id_to_cstr,
    account_id_free
);
identifier_ffi!(
    PositionId,
    position_id_new,
    position_id_to_cstr,
    position_id_free
);
identifier_ffi!(TradeId, trade_id_new, trade_id_to_cstr, trade_id_free);
identifier_ffi!(
    ExecutionId,
    execution_id_new,
    execution_id_to_cstr,
    execution_id_free
);
identifier_ffi!(
    ComponentId,
    component_id_new,
    component_id_to_cstr,
    component_id_free
);
identifier_ffi!(
    OrderListId,
    order_list_id_new,
    order_list_id_to_cstr,
    order_list_id_free
);

/// Allocates an instrument id from its symbol and venue strings. Null on
/// failure, with the error code written through `status`.
///
/// # Safety
/// `symbol_ptr` and `venue_ptr` must point to valid NUL-terminated strings;
/// `status` must be null or valid for a single `u8` write.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn instrument_id_new(
    symbol_ptr: *const c_char,
    venue_ptr: *const c_char,
    status: *mut u8,
) -> *mut InstrumentId {
    let result = unsafe { cstr_to_str(symbol_ptr) }
        .and_then(Symbol::new)
        .and_then(|symbol| {
            let venue = unsafe { cstr_to_str(venue_ptr) }.and_then(Venue::new)?;
            Ok(InstrumentId::new(symbol, venue))
        });
    match result {
        Ok(instrument_id) => {
            unsafe { write_status(status, STATUS_OK) };
            Box::into_raw(Box::new(instrument_id))
        }
        Err(error) => {
            unsafe { write_status(status, error_status(&error)) };
            std::ptr::null_mut()
        }
    }
}

/// The `SYMBOL.VENUE` form; release with
/// [`string_free`](super::string_free).
///
/// # Safety
/// `instrument_id` must be a valid pointer.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn instrument_id_to_cstr(
    instrument_id: *const InstrumentId,
) -> *mut c_char {
    match unsafe { instrument_id.as_ref() } {
        Some(instrument_id) => str_to_cstr(&instrument_id.to_string()),
        None => std::ptr::null_mut(),
    }
}

/// Transfers ownership of `instrument_id` back to the core for
/// deallocation.
///
/// # Safety
/// `instrument_id` must be null or a pointer obtained from this ABI,
/// passed at most once.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn instrument_id_free(instrument_id: *mut InstrumentId) {
    if !instrument_id.is_null() {
        drop(unsafe { Box::from_raw(instrument_id) });
    }
}
