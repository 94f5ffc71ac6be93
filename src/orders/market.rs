//! Market order variant.

use uuid::Uuid;

use super::core::OrderCore;
use super::events::{OrderEvent, OrderInitialized, OrderOptions};
use crate::enums::{OrderSide, OrderType, TimeInForce};
use crate::error::TradingError;
use crate::identifiers::{ClientOrderId, InstrumentId, StrategyId, TraderId};
use crate::types::{Quantity, UnixNanos};

/// Time-in-force values a market order accepts. Good-till-date (and
/// day-resting) semantics are meaningless without a resting price.
pub const MARKET_ORDER_VALID_TIF: [TimeInForce; 5] = [
    TimeInForce::Gtc,
    TimeInForce::Ioc,
    TimeInForce::Fok,
    TimeInForce::Fak,
    TimeInForce::Oc,
];

/// An order that executes immediately at the best available price.
///
/// Market orders cannot be amended: an `Updated` event fails with
/// [`TradingError::UnsupportedOperation`] and leaves the order untouched.
#[derive(Debug, Clone)]
pub struct MarketOrder {
    /// The shared lifecycle state.
    pub core: OrderCore,
}

impl MarketOrder {
    /// Creates a market order, generating the initialization event
    /// internally.
    ///
    /// # Errors
    /// Returns [`TradingError::InvalidValue`] if `quantity` is not strictly
    /// positive or `time_in_force` is not in [`MARKET_ORDER_VALID_TIF`].
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        trader_id: TraderId,
        strategy_id: StrategyId,
        instrument_id: InstrumentId,
        client_order_id: ClientOrderId,
        side: OrderSide,
        quantity: Quantity,
        time_in_force: TimeInForce,
        event_id: Uuid,
        ts_init: UnixNanos,
    ) -> Result<Self, TradingError> {
        Self::from_initialized(&OrderInitialized {
            trader_id,
            strategy_id,
            instrument_id,
            client_order_id,
            order_side: side,
            order_type: OrderType::Market,
            quantity,
            price: None,
            trigger_price: None,
            time_in_force,
            expire_time: None,
            options: OrderOptions::empty(),
            event_id,
            ts_init,
        })
    }

    /// Creates a market order from its initialization event.
    ///
    /// # Errors
    /// Returns [`TradingError::InvalidValue`] under the same conditions as
    /// [`MarketOrder::new`], or if the event's order type is not `Market`.
    pub fn from_initialized(init: &OrderInitialized) -> Result<Self, TradingError> {
        if init.order_type != OrderType::Market {
            return Err(TradingError::invalid_value(format!(
                "expected MARKET initialization, got {}",
                init.order_type
            )));
        }
        if !MARKET_ORDER_VALID_TIF.contains(&init.time_in_force) {
            return Err(TradingError::invalid_value(format!(
                "time in force {} is invalid for a market order",
                init.time_in_force
            )));
        }
        Ok(Self {
            core: OrderCore::new(init)?,
        })
    }

    /// Applies one lifecycle event.
    ///
    /// # Errors
    /// [`TradingError::UnsupportedOperation`] for `Updated` events (market
    /// orders cannot be amended); otherwise as
    /// [`OrderCore::apply`](super::core::OrderCore).
    pub fn apply(&mut self, event: &OrderEvent) -> Result<(), TradingError> {
        if matches!(event, OrderEvent::Updated(_)) {
            return Err(TradingError::UnsupportedOperation {
                order_type: OrderType::Market,
                operation: "amend",
            });
        }
        self.core.apply(event)
    }
}
