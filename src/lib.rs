//! # Trading Core: Fixed-Point Arithmetic, Order Lifecycle and Book Ladders
//!
//! The numeric and state-machine core of an algorithmic-trading platform,
//! written in Rust with exact decimal semantics throughout. This crate
//! provides the three foundations everything else in a trading system is
//! built on:
//!
//! - **Fixed-precision value types** — [`Price`](types::Price),
//!   [`Quantity`](types::Quantity) and [`Money`](types::Money) are exact
//!   scaled-integer decimals (`raw / 10^precision`, up to 9 fractional
//!   digits). Values of differing precision rescale to the larger precision
//!   for arithmetic and comparison; floating point exists only at the
//!   display/interop edge, never in accounting logic.
//!
//! - **Order lifecycle state machine** — an [`Order`](orders::Order) is
//!   created from an `OrderInitialized` event and mutated only by applying
//!   further lifecycle events in sequence. Illegal transitions, replayed
//!   fills and malformed amendments are rejected without partial mutation,
//!   and fill accounting (filled quantity, quantity-weighted average price,
//!   slippage) runs in a high-precision integer intermediate.
//!
//! - **Order book maintenance** — a per-instrument, two-sided
//!   [`OrderBook`](book::OrderBook) of price [ladders](book::Ladder):
//!   an ordered map of levels keyed by side-aware price (best price is
//!   always the first key) plus an order-key index giving O(log n)
//!   insertion and O(1) amortized amendment and cancellation, at L1/L2/L3
//!   granularity.
//!
//! ## Design Goals
//!
//! 1. **Exactness**: no floating-point error can enter accounting; `raw`
//!    and `precision` round-trip bit-for-bit through serialization and FFI.
//! 2. **Consistency under mutation**: ladder and index are updated together
//!    on every mutation; a failed operation leaves its entity untouched.
//! 3. **Single-writer concurrency**: each entity has one logical owner
//!    mutating through `&mut self`; readers never observe a
//!    partially-applied transition.
//! 4. **A narrow interop edge**: a stable C ABI ([`ffi`]) marshals plain
//!    values only — the core never touches a host runtime's object model.
//!
//! ## Example
//!
//! ```
//! use tradecore_rs::prelude::*;
//!
//! // Maintain a book from a feed of deltas.
//! let instrument_id: InstrumentId = "BTCUSDT.BINANCE".parse().unwrap();
//! let mut book = OrderBook::new(instrument_id, BookLevel::L2Mbp);
//! book.apply(&BookDelta {
//!     instrument_id,
//!     action: BookAction::Add,
//!     order: BookOrder::new(
//!         "65000.50".parse().unwrap(),
//!         "2.5".parse().unwrap(),
//!         OrderSide::Buy,
//!         0,
//!     ),
//!     ts_event: 1,
//! })
//! .unwrap();
//! let (best_bid, size) = book.best_bid().unwrap();
//! assert_eq!(best_bid, "65000.50".parse().unwrap());
//! assert_eq!(size, "2.5".parse().unwrap());
//! ```

pub mod book;
pub mod data;
pub mod enums;
pub mod error;
pub mod ffi;
pub mod identifiers;
pub mod orders;
pub mod prelude;
pub mod types;

pub use book::{BookDelta, BookOrder, BookPrice, Ladder, Level, OrderBook};
pub use data::{QuoteTick, TradeTick};
pub use enums::{
    BookAction, BookLevel, CurrencyType, LiquiditySide, OrderSide, OrderStatus, OrderType,
    TimeInForce,
};
pub use error::TradingError;
pub use identifiers::InstrumentId;
pub use orders::{LimitOrder, MarketOrder, Order, OrderEvent, StopMarketOrder};
pub use types::{Currency, FIXED_PRECISION, FIXED_SCALAR, Money, Price, Quantity, UnixNanos};
