//! Shared order state and the lifecycle state machine.
//!
//! Every order variant embeds an [`OrderCore`]: the identifiers, quantities
//! and derived fields common to all order types, plus the transition table
//! that decides which events are applicable in which state. Variants layer
//! construction-time validation and event-applicability rules on top; the
//! fill accounting below is identical for all of them.

use tracing::trace;
use uuid::Uuid;

use super::events::{OrderEvent, OrderFilled, OrderInitialized, OrderOptions};
use crate::enums::{OrderSide, OrderStatus, OrderType, TimeInForce};
use crate::error::TradingError;
use crate::identifiers::{
    AccountId, ClientOrderId, ExecutionId, InstrumentId, PositionId, StrategyId, TraderId,
    VenueOrderId,
};
use crate::types::fixed::FIXED_PRECISION;
use crate::types::{Price, Quantity, UnixNanos};

/// Computes the state an order in `current` moves to when `event` is
/// applied, or fails with [`TradingError::InvalidStateTransition`] if the
/// event is not applicable.
///
/// Two results are provisional and refined during application:
/// a `Filled` event yields `PartiallyFilled` here and is promoted to
/// `Filled` once the fill accounting shows the order is complete, and an
/// `Updated` event from `PendingUpdate` yields `Accepted` and is demoted to
/// `PartiallyFilled` when fills have already occurred.
pub(crate) fn next_status(
    current: OrderStatus,
    event: &OrderEvent,
) -> Result<OrderStatus, TradingError> {
    use OrderStatus::*;

    let next = match (current, event) {
        (Initialized, OrderEvent::Denied(_)) => Denied,
        (Initialized, OrderEvent::Submitted(_)) => Submitted,
        (Submitted, OrderEvent::Accepted(_)) => Accepted,
        (Submitted, OrderEvent::Rejected(_)) => Rejected,
        (Accepted | PartiallyFilled, OrderEvent::PendingUpdate(_)) => PendingUpdate,
        (Accepted | PartiallyFilled, OrderEvent::PendingCancel(_)) => PendingCancel,
        (
            Accepted | PartiallyFilled | PendingUpdate | PendingCancel,
            OrderEvent::Canceled(_),
        ) => Canceled,
        (Accepted | PartiallyFilled | PendingUpdate, OrderEvent::Expired(_)) => Expired,
        (status @ (Accepted | PartiallyFilled), OrderEvent::Updated(_)) => status,
        (PendingUpdate, OrderEvent::Updated(_)) => Accepted,
        (
            Accepted | PartiallyFilled | PendingUpdate | PendingCancel,
            OrderEvent::Filled(_),
        ) => PartiallyFilled,
        (current, event) => {
            return Err(TradingError::InvalidStateTransition {
                current,
                event: event.type_name(),
            });
        }
    };
    Ok(next)
}

/// The state and derived fields shared by every order variant.
///
/// An `OrderCore` is created from an [`OrderInitialized`] event and from
/// then on mutated only by applying further events in the order they were
/// observed. Identifiers are held by value, copied from events; derived
/// fields are owned exclusively by the order. Terminal states are immutable.
#[derive(Debug, Clone)]
pub struct OrderCore {
    /// The trader the order belongs to.
    pub trader_id: TraderId,
    /// The strategy that originated the order.
    pub strategy_id: StrategyId,
    /// The instrument being traded.
    pub instrument_id: InstrumentId,
    /// The client-assigned order identifier.
    pub client_order_id: ClientOrderId,
    /// The venue-assigned order identifier, once known.
    pub venue_order_id: Option<VenueOrderId>,
    /// The position the order contributes to, once known.
    pub position_id: Option<PositionId>,
    /// The account the order routes through, once known.
    pub account_id: Option<AccountId>,
    /// Buy or sell.
    pub side: OrderSide,
    /// The order variant.
    pub order_type: OrderType,
    /// The total quantity to execute.
    pub quantity: Quantity,
    /// How long the order remains in force.
    pub time_in_force: TimeInForce,
    /// Execution option flags.
    pub options: OrderOptions,
    /// Current lifecycle state.
    pub status: OrderStatus,
    /// Quantity executed so far.
    pub filled_qty: Quantity,
    /// Quantity-weighted average fill price, once any fill has occurred.
    pub avg_px: Option<Price>,
    /// Signed execution slippage versus the order's reference price, in
    /// price units. Display metric only; zero for unpriced variants.
    pub slippage: f64,
    /// The event id of the originating `OrderInitialized`.
    pub init_id: Uuid,
    /// When the order was initialized.
    pub ts_init: UnixNanos,
    /// When the order last changed.
    pub ts_last: UnixNanos,
    /// Ordered, append-only list of applied execution ids.
    execution_ids: Vec<ExecutionId>,
    /// Running fill notional at `10^(2 * FIXED_PRECISION)` scale; the
    /// higher-precision intermediate for the average-price calculation.
    fill_notional: i128,
}

impl OrderCore {
    /// Builds the shared core from an initialization event.
    ///
    /// # Errors
    /// Returns [`TradingError::InvalidValue`] if the quantity is not
    /// strictly positive.
    pub(crate) fn new(init: &OrderInitialized) -> Result<Self, TradingError> {
        if !init.quantity.is_positive() {
            return Err(TradingError::invalid_value(format!(
                "order quantity must be positive, was {}",
                init.quantity
            )));
        }
        Ok(Self {
            trader_id: init.trader_id,
            strategy_id: init.strategy_id,
            instrument_id: init.instrument_id,
            client_order_id: init.client_order_id,
            venue_order_id: None,
            position_id: None,
            account_id: None,
            side: init.order_side,
            order_type: init.order_type,
            quantity: init.quantity,
            time_in_force: init.time_in_force,
            options: init.options,
            status: OrderStatus::Initialized,
            filled_qty: Quantity::zero(init.quantity.precision),
            avg_px: None,
            slippage: 0.0,
            init_id: init.event_id,
            ts_init: init.ts_init,
            ts_last: init.ts_init,
            execution_ids: Vec::new(),
            fill_notional: 0,
        })
    }

    /// The ordered list of execution ids applied so far.
    #[must_use]
    pub fn execution_ids(&self) -> &[ExecutionId] {
        &self.execution_ids
    }

    /// The quantity still to be executed.
    #[must_use]
    pub fn leaves_qty(&self) -> Quantity {
        self.quantity
            .checked_sub(self.filled_qty)
            .unwrap_or_else(|| Quantity::zero(self.quantity.precision))
    }

    /// `true` once the order has reached a terminal state.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.status.is_terminal()
    }

    /// `true` while the order is working at the venue.
    #[must_use]
    pub fn is_open(&self) -> bool {
        matches!(
            self.status,
            OrderStatus::Accepted
                | OrderStatus::PartiallyFilled
                | OrderStatus::PendingUpdate
                | OrderStatus::PendingCancel
        )
    }

    /// Applies one lifecycle event, mutating state and derived fields.
    ///
    /// The transition is atomic: every validation (state applicability,
    /// duplicate execution id, amendment constraints, accounting overflow)
    /// happens before the first field write, so a failed apply leaves the
    /// order exactly as it was.
    ///
    /// # Errors
    /// - [`TradingError::InvalidStateTransition`] if the event is not
    ///   applicable in the current state.
    /// - [`TradingError::DuplicateEvent`] if a fill replays an
    ///   already-applied execution id.
    /// - [`TradingError::InvalidValue`] for malformed amendments or fill
    ///   accounting overflow.
    pub(crate) fn apply(&mut self, event: &OrderEvent) -> Result<(), TradingError> {
        if let OrderEvent::Filled(fill) = event {
            if self.execution_ids.contains(&fill.execution_id) {
                return Err(TradingError::DuplicateEvent {
                    execution_id: fill.execution_id.to_string(),
                });
            }
        }
        let previous = self.status;
        let next = next_status(previous, event)?;

        match event {
            OrderEvent::Filled(fill) => {
                self.apply_filled(fill)?;
            }
            OrderEvent::Updated(update) => {
                if !update.quantity.is_positive() {
                    return Err(TradingError::invalid_value(format!(
                        "amended quantity must be positive, was {}",
                        update.quantity
                    )));
                }
                if update.quantity < self.filled_qty {
                    return Err(TradingError::invalid_value(format!(
                        "amended quantity {} is below filled quantity {}",
                        update.quantity, self.filled_qty
                    )));
                }
                self.quantity = update.quantity;
                if let Some(venue_order_id) = update.venue_order_id {
                    self.venue_order_id = Some(venue_order_id);
                }
                // An amendment resolved from PendingUpdate returns to the
                // working state implied by the fill progress.
                self.status = if previous == OrderStatus::PendingUpdate
                    && self.filled_qty.is_positive()
                {
                    OrderStatus::PartiallyFilled
                } else {
                    next
                };
                self.ts_last = update.ts_event;
            }
            OrderEvent::Submitted(submitted) => {
                self.account_id = Some(submitted.account_id);
                self.status = next;
                self.ts_last = submitted.ts_event;
            }
            OrderEvent::Accepted(accepted) => {
                self.venue_order_id = Some(accepted.venue_order_id);
                self.account_id = Some(accepted.account_id);
                self.status = next;
                self.ts_last = accepted.ts_event;
            }
            OrderEvent::Canceled(canceled) => {
                if let Some(venue_order_id) = canceled.venue_order_id {
                    self.venue_order_id = Some(venue_order_id);
                }
                self.status = next;
                self.ts_last = canceled.ts_event;
            }
            _ => {
                self.status = next;
                self.ts_last = event.ts_event();
            }
        }

        trace!(
            client_order_id = %self.client_order_id,
            event = event.type_name(),
            from = %previous,
            to = %self.status,
            "applied order event"
        );
        Ok(())
    }

    /// Fill accounting: extends `filled_qty`, recomputes the
    /// quantity-weighted `avg_px` from the running high-precision notional,
    /// records the execution id and resolves the resulting state.
    fn apply_filled(&mut self, fill: &OrderFilled) -> Result<(), TradingError> {
        if !fill.last_qty.is_positive() {
            return Err(TradingError::invalid_value(format!(
                "fill quantity must be positive, was {}",
                fill.last_qty
            )));
        }
        let new_filled = self
            .filled_qty
            .checked_add(fill.last_qty)
            .ok_or_else(|| TradingError::invalid_value("fill accounting overflow"))?;
        if new_filled > self.quantity {
            return Err(TradingError::invalid_value(format!(
                "fill of {} would exceed order quantity {} (filled {})",
                fill.last_qty, self.quantity, self.filled_qty
            )));
        }

        // Quantity-weighted mean of all fills to date, accumulated at
        // 10^(2 * FIXED_PRECISION) so no intermediate truncates.
        let px = fill.last_px.raw_at(FIXED_PRECISION);
        let qty = fill.last_qty.raw_at(FIXED_PRECISION) as i128;
        let notional = self
            .fill_notional
            .checked_add(
                px.checked_mul(qty)
                    .ok_or_else(|| TradingError::invalid_value("fill notional overflow"))?,
            )
            .ok_or_else(|| TradingError::invalid_value("fill notional overflow"))?;
        let filled = new_filled.raw_at(FIXED_PRECISION) as i128;
        let avg_raw = i64::try_from(notional / filled)
            .map_err(|_| TradingError::invalid_value("average price overflow"))?;
        let avg_px = Price::from_raw(avg_raw, FIXED_PRECISION)?;

        // All fallible work is done; commit.
        self.fill_notional = notional;
        self.filled_qty = new_filled;
        self.avg_px = Some(avg_px);
        self.venue_order_id = Some(fill.venue_order_id);
        if self.position_id.is_none() {
            self.position_id = fill.position_id;
        }
        self.execution_ids.push(fill.execution_id);
        self.status = if self.filled_qty < self.quantity {
            OrderStatus::PartiallyFilled
        } else {
            OrderStatus::Filled
        };
        self.ts_last = fill.ts_event;
        Ok(())
    }

    /// Recomputes slippage against the variant's reference price.
    pub(crate) fn update_slippage(&mut self, reference: Price) {
        if let Some(avg_px) = self.avg_px {
            let diff = avg_px.as_f64() - reference.as_f64();
            self.slippage = match self.side {
                OrderSide::Buy => diff,
                OrderSide::Sell => -diff,
            };
        }
    }
}
