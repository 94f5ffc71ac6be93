//! Prelude module that re-exports commonly used types and traits.
//!
//! Instead of importing each type individually, you can use:
//!
//! ```rust
//! use tradecore_rs::prelude::*;
//! ```
//!
//! This imports the value types, identifiers, enums, the order entity and
//! its events, and the order book types.

// Fixed-point value types
pub use crate::types::{
    Currency, FIXED_PRECISION, FIXED_SCALAR, Money, Price, Quantity, UnixNanos,
};

// Identifiers
pub use crate::identifiers::{
    AccountId, ClientId, ClientOrderId, ComponentId, ExecutionId, InstrumentId, OrderListId,
    PositionId, StrategyId, Symbol, TradeId, TraderId, Venue, VenueOrderId,
};

// Domain enums
pub use crate::enums::{
    BookAction, BookLevel, CurrencyType, LiquiditySide, OrderSide, OrderStatus, OrderType,
    TimeInForce,
};

// Order entity, variants and lifecycle events
pub use crate::orders::{
    LimitOrder, MarketOrder, Order, OrderAccepted, OrderCanceled, OrderCore, OrderDenied,
    OrderEvent, OrderExpired, OrderFilled, OrderInitialized, OrderOptions, OrderPendingCancel,
    OrderPendingUpdate, OrderRejected, OrderSubmitted, OrderUpdated, StopMarketOrder,
};

// Order book types
pub use crate::book::{BookDelta, BookOrder, BookPrice, Ladder, Level, OrderBook};

// Market data records
pub use crate::data::{QuoteTick, TradeTick};

// Errors
pub use crate::error::TradingError;
