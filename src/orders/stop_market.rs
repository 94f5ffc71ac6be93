//! Stop-market order variant.

use uuid::Uuid;

use super::core::OrderCore;
use super::events::{OrderEvent, OrderInitialized, OrderOptions};
use super::limit::check_resting_expiry;
use crate::enums::{OrderSide, OrderType, TimeInForce};
use crate::error::TradingError;
use crate::identifiers::{ClientOrderId, InstrumentId, StrategyId, TraderId};
use crate::types::{Price, Quantity, UnixNanos};

/// An order that becomes a market order once its trigger price trades.
#[derive(Debug, Clone)]
pub struct StopMarketOrder {
    /// The shared lifecycle state.
    pub core: OrderCore,
    /// The stop trigger price.
    pub trigger_price: Price,
    /// Expiry time; present iff the time-in-force is GTD.
    pub expire_time: Option<UnixNanos>,
}

impl StopMarketOrder {
    /// Creates a stop-market order, generating the initialization event
    /// internally.
    ///
    /// # Errors
    /// Returns [`TradingError::InvalidValue`] if `quantity` is not strictly
    /// positive, or if `time_in_force` is GTD without an `expire_time`.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        trader_id: TraderId,
        strategy_id: StrategyId,
        instrument_id: InstrumentId,
        client_order_id: ClientOrderId,
        side: OrderSide,
        quantity: Quantity,
        trigger_price: Price,
        time_in_force: TimeInForce,
        expire_time: Option<UnixNanos>,
        event_id: Uuid,
        ts_init: UnixNanos,
    ) -> Result<Self, TradingError> {
        Self::from_initialized(&OrderInitialized {
            trader_id,
            strategy_id,
            instrument_id,
            client_order_id,
            order_side: side,
            order_type: OrderType::StopMarket,
            quantity,
            price: None,
            trigger_price: Some(trigger_price),
            time_in_force,
            expire_time,
            options: OrderOptions::empty(),
            event_id,
            ts_init,
        })
    }

    /// Creates a stop-market order from its initialization event.
    ///
    /// # Errors
    /// Returns [`TradingError::InvalidValue`] under the same conditions as
    /// [`StopMarketOrder::new`], or if the event's order type is not
    /// `StopMarket` or carries no trigger price.
    pub fn from_initialized(init: &OrderInitialized) -> Result<Self, TradingError> {
        if init.order_type != OrderType::StopMarket {
            return Err(TradingError::invalid_value(format!(
                "expected STOP_MARKET initialization, got {}",
                init.order_type
            )));
        }
        let trigger_price = init.trigger_price.ok_or_else(|| {
            TradingError::invalid_value("stop-market order initialization carries no trigger price")
        })?;
        check_resting_expiry(init.time_in_force, init.expire_time)?;
        Ok(Self {
            core: OrderCore::new(init)?,
            trigger_price,
            expire_time: init.expire_time,
        })
    }

    /// Applies one lifecycle event. Amendments may change the quantity and
    /// the trigger price; fills refresh the slippage versus the trigger.
    ///
    /// # Errors
    /// As [`OrderCore::apply`](super::core::OrderCore).
    pub fn apply(&mut self, event: &OrderEvent) -> Result<(), TradingError> {
        self.core.apply(event)?;
        match event {
            OrderEvent::Updated(update) => {
                if let Some(trigger_price) = update.trigger_price {
                    self.trigger_price = trigger_price;
                }
            }
            OrderEvent::Filled(_) => {
                let trigger_price = self.trigger_price;
                self.core.update_slippage(trigger_price);
            }
            _ => {}
        }
        Ok(())
    }
}
