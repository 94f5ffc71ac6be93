//! Order lifecycle event payloads.
//!
//! Events are generated upstream (risk engine, venue gateways) and applied
//! to an order one at a time, in the sequence they were generated. Each
//! payload carries a unique `event_id` and the venue/event timestamp
//! `ts_event` in UNIX nanoseconds. Reordering is a caller error and is not
//! handled here.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::enums::{LiquiditySide, OrderSide, OrderType, TimeInForce};
use crate::identifiers::{
    AccountId, ClientOrderId, ExecutionId, InstrumentId, PositionId, StrategyId, TraderId,
    VenueOrderId,
};
use crate::types::{Money, Price, Quantity, UnixNanos};

bitflags! {
    /// Boolean execution options carried on an [`OrderInitialized`] event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
    pub struct OrderOptions: u8 {
        /// The order must not take liquidity on entry.
        const POST_ONLY = 1 << 0;
        /// The order may only reduce an existing position.
        const REDUCE_ONLY = 1 << 1;
        /// The order is not displayed on the venue's public book.
        const HIDDEN = 1 << 2;
    }
}

/// An order was created locally. This is the only event an order can be
/// constructed from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderInitialized {
    /// The trader the order belongs to.
    pub trader_id: TraderId,
    /// The strategy that originated the order.
    pub strategy_id: StrategyId,
    /// The instrument to trade.
    pub instrument_id: InstrumentId,
    /// The client-assigned order identifier.
    pub client_order_id: ClientOrderId,
    /// Buy or sell.
    pub order_side: OrderSide,
    /// The order variant to construct.
    pub order_type: OrderType,
    /// The total quantity to execute.
    pub quantity: Quantity,
    /// Limit price; required for priced variants, ignored by market orders.
    pub price: Option<Price>,
    /// Trigger price; required for stop variants.
    pub trigger_price: Option<Price>,
    /// How long the order remains in force.
    pub time_in_force: TimeInForce,
    /// Expiry time; required when `time_in_force` is GTD.
    pub expire_time: Option<UnixNanos>,
    /// Execution option flags.
    pub options: OrderOptions,
    /// Unique event identifier.
    pub event_id: Uuid,
    /// When the order was initialized.
    pub ts_init: UnixNanos,
}

/// The order was refused by a pre-trade check before submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderDenied {
    /// The client-assigned order identifier.
    pub client_order_id: ClientOrderId,
    /// Why the order was denied.
    pub reason: String,
    /// Unique event identifier.
    pub event_id: Uuid,
    /// When the denial occurred.
    pub ts_event: UnixNanos,
}

/// The order was sent to the venue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderSubmitted {
    /// The client-assigned order identifier.
    pub client_order_id: ClientOrderId,
    /// The account the order was submitted through.
    pub account_id: AccountId,
    /// Unique event identifier.
    pub event_id: Uuid,
    /// When the submission occurred.
    pub ts_event: UnixNanos,
}

/// The venue acknowledged the order as working.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderAccepted {
    /// The client-assigned order identifier.
    pub client_order_id: ClientOrderId,
    /// The venue-assigned order identifier.
    pub venue_order_id: VenueOrderId,
    /// The account the order is working on.
    pub account_id: AccountId,
    /// Unique event identifier.
    pub event_id: Uuid,
    /// When the acknowledgement occurred.
    pub ts_event: UnixNanos,
}

/// The venue refused the order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRejected {
    /// The client-assigned order identifier.
    pub client_order_id: ClientOrderId,
    /// Why the order was rejected.
    pub reason: String,
    /// Unique event identifier.
    pub event_id: Uuid,
    /// When the rejection occurred.
    pub ts_event: UnixNanos,
}

/// The order was removed from the venue before completion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderCanceled {
    /// The client-assigned order identifier.
    pub client_order_id: ClientOrderId,
    /// The venue-assigned order identifier, when known.
    pub venue_order_id: Option<VenueOrderId>,
    /// Unique event identifier.
    pub event_id: Uuid,
    /// When the cancellation occurred.
    pub ts_event: UnixNanos,
}

/// The order lapsed per its time-in-force.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderExpired {
    /// The client-assigned order identifier.
    pub client_order_id: ClientOrderId,
    /// Unique event identifier.
    pub event_id: Uuid,
    /// When the expiry occurred.
    pub ts_event: UnixNanos,
}

/// An amendment request is in flight at the venue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderPendingUpdate {
    /// The client-assigned order identifier.
    pub client_order_id: ClientOrderId,
    /// Unique event identifier.
    pub event_id: Uuid,
    /// When the request was acknowledged as pending.
    pub ts_event: UnixNanos,
}

/// A cancellation request is in flight at the venue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderPendingCancel {
    /// The client-assigned order identifier.
    pub client_order_id: ClientOrderId,
    /// Unique event identifier.
    pub event_id: Uuid,
    /// When the request was acknowledged as pending.
    pub ts_event: UnixNanos,
}

/// The venue applied an amendment to the working order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderUpdated {
    /// The client-assigned order identifier.
    pub client_order_id: ClientOrderId,
    /// The venue-assigned order identifier, when known.
    pub venue_order_id: Option<VenueOrderId>,
    /// The amended total quantity.
    pub quantity: Quantity,
    /// The amended limit price, for priced variants.
    pub price: Option<Price>,
    /// The amended trigger price, for stop variants.
    pub trigger_price: Option<Price>,
    /// Unique event identifier.
    pub event_id: Uuid,
    /// When the amendment was applied.
    pub ts_event: UnixNanos,
}

/// Some quantity of the order executed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderFilled {
    /// The client-assigned order identifier.
    pub client_order_id: ClientOrderId,
    /// The venue-assigned order identifier.
    pub venue_order_id: VenueOrderId,
    /// The position the fill applies to, when tracked.
    pub position_id: Option<PositionId>,
    /// The unique identifier of this execution; replays are rejected.
    pub execution_id: ExecutionId,
    /// The quantity executed in this fill.
    pub last_qty: Quantity,
    /// The price this fill executed at.
    pub last_px: Price,
    /// The commission charged for this fill, when known.
    pub commission: Option<Money>,
    /// Whether the fill added or removed liquidity.
    pub liquidity_side: LiquiditySide,
    /// Unique event identifier.
    pub event_id: Uuid,
    /// When the fill occurred.
    pub ts_event: UnixNanos,
}

/// The sum of all recognized order lifecycle events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum OrderEvent {
    /// See [`OrderInitialized`].
    Initialized(OrderInitialized),
    /// See [`OrderDenied`].
    Denied(OrderDenied),
    /// See [`OrderSubmitted`].
    Submitted(OrderSubmitted),
    /// See [`OrderAccepted`].
    Accepted(OrderAccepted),
    /// See [`OrderRejected`].
    Rejected(OrderRejected),
    /// See [`OrderCanceled`].
    Canceled(OrderCanceled),
    /// See [`OrderExpired`].
    Expired(OrderExpired),
    /// See [`OrderPendingUpdate`].
    PendingUpdate(OrderPendingUpdate),
    /// See [`OrderPendingCancel`].
    PendingCancel(OrderPendingCancel),
    /// See [`OrderUpdated`].
    Updated(OrderUpdated),
    /// See [`OrderFilled`].
    Filled(OrderFilled),
}

impl OrderEvent {
    /// The variant name, used in error reporting and logs.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            OrderEvent::Initialized(_) => "OrderInitialized",
            OrderEvent::Denied(_) => "OrderDenied",
            OrderEvent::Submitted(_) => "OrderSubmitted",
            OrderEvent::Accepted(_) => "OrderAccepted",
            OrderEvent::Rejected(_) => "OrderRejected",
            OrderEvent::Canceled(_) => "OrderCanceled",
            OrderEvent::Expired(_) => "OrderExpired",
            OrderEvent::PendingUpdate(_) => "OrderPendingUpdate",
            OrderEvent::PendingCancel(_) => "OrderPendingCancel",
            OrderEvent::Updated(_) => "OrderUpdated",
            OrderEvent::Filled(_) => "OrderFilled",
        }
    }

    /// The unique identifier of this event.
    #[must_use]
    pub const fn event_id(&self) -> Uuid {
        match self {
            OrderEvent::Initialized(e) => e.event_id,
            OrderEvent::Denied(e) => e.event_id,
            OrderEvent::Submitted(e) => e.event_id,
            OrderEvent::Accepted(e) => e.event_id,
            OrderEvent::Rejected(e) => e.event_id,
            OrderEvent::Canceled(e) => e.event_id,
            OrderEvent::Expired(e) => e.event_id,
            OrderEvent::PendingUpdate(e) => e.event_id,
            OrderEvent::PendingCancel(e) => e.event_id,
            OrderEvent::Updated(e) => e.event_id,
            OrderEvent::Filled(e) => e.event_id,
        }
    }

    /// The timestamp this event occurred at, in UNIX nanoseconds.
    #[must_use]
    pub const fn ts_event(&self) -> UnixNanos {
        match self {
            OrderEvent::Initialized(e) => e.ts_init,
            OrderEvent::Denied(e) => e.ts_event,
            OrderEvent::Submitted(e) => e.ts_event,
            OrderEvent::Accepted(e) => e.ts_event,
            OrderEvent::Rejected(e) => e.ts_event,
            OrderEvent::Canceled(e) => e.ts_event,
            OrderEvent::Expired(e) => e.ts_event,
            OrderEvent::PendingUpdate(e) => e.ts_event,
            OrderEvent::PendingCancel(e) => e.ts_event,
            OrderEvent::Updated(e) => e.ts_event,
            OrderEvent::Filled(e) => e.ts_event,
        }
    }
}
