//! Fixed-precision financial value types.
//!
//! [`Price`], [`Quantity`] and [`Money`] are exact scaled-integer decimals
//! (`raw / 10^precision`, at most [`FIXED_PRECISION`](fixed::FIXED_PRECISION)
//! fractional digits) — the shared arithmetic substrate for the order
//! lifecycle and the book ladders. Floating point appears only at the
//! display/interop edge (`as_f64`), never in accounting logic.

pub mod currency;
pub mod fixed;
pub mod money;
pub mod price;
pub mod quantity;

pub use currency::Currency;
pub use fixed::{FIXED_PRECISION, FIXED_SCALAR, check_precision};
pub use money::Money;
pub use price::Price;
pub use quantity::Quantity;

/// A point in time as nanoseconds since the UNIX epoch.
pub type UnixNanos = u64;
