//! Limit order variant.

use uuid::Uuid;

use super::core::OrderCore;
use super::events::{OrderEvent, OrderInitialized, OrderOptions};
use crate::enums::{OrderSide, OrderType, TimeInForce};
use crate::error::TradingError;
use crate::identifiers::{ClientOrderId, InstrumentId, StrategyId, TraderId};
use crate::types::{Price, Quantity, UnixNanos};

/// An order resting at a limit price until matched, canceled or expired.
#[derive(Debug, Clone)]
pub struct LimitOrder {
    /// The shared lifecycle state.
    pub core: OrderCore,
    /// The limit price.
    pub price: Price,
    /// Expiry time; present iff the time-in-force is GTD.
    pub expire_time: Option<UnixNanos>,
}

impl LimitOrder {
    /// Creates a limit order, generating the initialization event
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
        price: Price,
        time_in_force: TimeInForce,
        expire_time: Option<UnixNanos>,
        options: OrderOptions,
        event_id: Uuid,
        ts_init: UnixNanos,
    ) -> Result<Self, TradingError> {
        Self::from_initialized(&OrderInitialized {
            trader_id,
            strategy_id,
            instrument_id,
            client_order_id,
            order_side: side,
            order_type: OrderType::Limit,
            quantity,
            price: Some(price),
            trigger_price: None,
            time_in_force,
            expire_time,
            options,
            event_id,
            ts_init,
        })
    }

    /// Creates a limit order from its initialization event.
    ///
    /// # Errors
    /// Returns [`TradingError::InvalidValue`] under the same conditions as
    /// [`LimitOrder::new`], or if the event's order type is not `Limit` or
    /// carries no price.
    pub fn from_initialized(init: &OrderInitialized) -> Result<Self, TradingError> {
        if init.order_type != OrderType::Limit {
            return Err(TradingError::invalid_value(format!(
                "expected LIMIT initialization, got {}",
                init.order_type
            )));
        }
        let price = init.price.ok_or_else(|| {
            TradingError::invalid_value("limit order initialization carries no price")
        })?;
        check_resting_expiry(init.time_in_force, init.expire_time)?;
        Ok(Self {
            core: OrderCore::new(init)?,
            price,
            expire_time: init.expire_time,
        })
    }

    /// Applies one lifecycle event. Amendments may change the quantity and
    /// the limit price; fills refresh the slippage versus the limit price.
    ///
    /// # Errors
    /// As [`OrderCore::apply`](super::core::OrderCore).
    pub fn apply(&mut self, event: &OrderEvent) -> Result<(), TradingError> {
        self.core.apply(event)?;
        match event {
            OrderEvent::Updated(update) => {
                if let Some(price) = update.price {
                    self.price = price;
                }
            }
            OrderEvent::Filled(_) => {
                let price = self.price;
                self.core.update_slippage(price);
            }
            _ => {}
        }
        Ok(())
    }
}

/// A resting order with GTD time-in-force must carry an expiry time.
pub(crate) fn check_resting_expiry(
    time_in_force: TimeInForce,
    expire_time: Option<UnixNanos>,
) -> Result<(), TradingError> {
    if time_in_force == TimeInForce::Gtd && expire_time.is_none() {
        return Err(TradingError::invalid_value(
            "GTD time in force requires an expire time",
        ));
    }
    Ok(())
}
