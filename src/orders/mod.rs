//! Order entity and lifecycle state machine.
//!
//! An [`Order`] is constructed from an [`OrderInitialized`] event and from
//! then on mutated only by applying lifecycle events in the order they were
//! observed upstream. The variants share one state machine and one fill
//! accounting path ([`OrderCore`]); each layers its own construction-time
//! validation and event-applicability rules on top.

pub mod core;
pub mod events;
pub mod limit;
pub mod market;
pub mod stop_market;

mod tests;

pub use self::core::OrderCore;
pub use self::events::{
    OrderAccepted, OrderCanceled, OrderDenied, OrderEvent, OrderExpired, OrderFilled,
    OrderInitialized, OrderOptions, OrderPendingCancel, OrderPendingUpdate, OrderRejected,
    OrderSubmitted, OrderUpdated,
};
pub use self::limit::LimitOrder;
pub use self::market::{MARKET_ORDER_VALID_TIF, MarketOrder};
pub use self::stop_market::StopMarketOrder;

use crate::enums::{OrderSide, OrderStatus, OrderType, TimeInForce};
use crate::error::TradingError;
use crate::identifiers::{ClientOrderId, ExecutionId, InstrumentId, StrategyId, TraderId};
use crate::types::{Price, Quantity};

/// An order of any variant: shared behavior, differing rules, no
/// inheritance. Dispatch is a plain `match` over the tag.
#[derive(Debug, Clone)]
pub enum Order {
    /// See [`MarketOrder`].
    Market(MarketOrder),
    /// See [`LimitOrder`].
    Limit(LimitOrder),
    /// See [`StopMarketOrder`].
    StopMarket(StopMarketOrder),
}

impl Order {
    /// Constructs the variant selected by the event's `order_type`.
    ///
    /// # Errors
    /// Returns [`TradingError::InvalidValue`] if the event violates the
    /// selected variant's validation rules.
    pub fn from_initialized(init: &OrderInitialized) -> Result<Self, TradingError> {
        match init.order_type {
            OrderType::Market => MarketOrder::from_initialized(init).map(Order::Market),
            OrderType::Limit => LimitOrder::from_initialized(init).map(Order::Limit),
            OrderType::StopMarket => {
                StopMarketOrder::from_initialized(init).map(Order::StopMarket)
            }
        }
    }

    /// Applies one lifecycle event to the underlying variant.
    ///
    /// # Errors
    /// As the variant's `apply`; the order is unchanged on error.
    pub fn apply(&mut self, event: &OrderEvent) -> Result<(), TradingError> {
        match self {
            Order::Market(order) => order.apply(event),
            Order::Limit(order) => order.apply(event),
            Order::StopMarket(order) => order.apply(event),
        }
    }

    /// The shared lifecycle state.
    #[must_use]
    pub fn core(&self) -> &OrderCore {
        match self {
            Order::Market(order) => &order.core,
            Order::Limit(order) => &order.core,
            Order::StopMarket(order) => &order.core,
        }
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn status(&self) -> OrderStatus {
        self.core().status
    }

    /// Buy or sell.
    #[must_use]
    pub fn side(&self) -> OrderSide {
        self.core().side
    }

    /// The order variant tag.
    #[must_use]
    pub fn order_type(&self) -> OrderType {
        self.core().order_type
    }

    /// The instrument being traded.
    #[must_use]
    pub fn instrument_id(&self) -> InstrumentId {
        self.core().instrument_id
    }

    /// The trader the order belongs to.
    #[must_use]
    pub fn trader_id(&self) -> TraderId {
        self.core().trader_id
    }

    /// The strategy that originated the order.
    #[must_use]
    pub fn strategy_id(&self) -> StrategyId {
        self.core().strategy_id
    }

    /// The client-assigned order identifier.
    #[must_use]
    pub fn client_order_id(&self) -> ClientOrderId {
        self.core().client_order_id
    }

    /// How long the order remains in force.
    #[must_use]
    pub fn time_in_force(&self) -> TimeInForce {
        self.core().time_in_force
    }

    /// The total quantity to execute.
    #[must_use]
    pub fn quantity(&self) -> Quantity {
        self.core().quantity
    }

    /// Quantity executed so far.
    #[must_use]
    pub fn filled_qty(&self) -> Quantity {
        self.core().filled_qty
    }

    /// Quantity still to be executed.
    #[must_use]
    pub fn leaves_qty(&self) -> Quantity {
        self.core().leaves_qty()
    }

    /// Quantity-weighted average fill price, once any fill has occurred.
    #[must_use]
    pub fn avg_px(&self) -> Option<Price> {
        self.core().avg_px
    }

    /// Signed execution slippage versus the variant's reference price.
    #[must_use]
    pub fn slippage(&self) -> f64 {
        self.core().slippage
    }

    /// The limit price, for priced variants.
    #[must_use]
    pub fn price(&self) -> Option<Price> {
        match self {
            Order::Market(_) => None,
            Order::Limit(order) => Some(order.price),
            Order::StopMarket(_) => None,
        }
    }

    /// The trigger price, for stop variants.
    #[must_use]
    pub fn trigger_price(&self) -> Option<Price> {
        match self {
            Order::StopMarket(order) => Some(order.trigger_price),
            _ => None,
        }
    }

    /// The ordered list of execution ids applied so far.
    #[must_use]
    pub fn execution_ids(&self) -> &[ExecutionId] {
        self.core().execution_ids()
    }

    /// `true` while the order is working at the venue.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.core().is_open()
    }

    /// `true` once the order has reached a terminal state.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.core().is_closed()
    }
}
