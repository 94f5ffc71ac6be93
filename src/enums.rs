//! Domain enumerations with fixed integer discriminants.
//!
//! The discriminants are part of the stable interop contract: values cross
//! the FFI boundary as `u8` and are recovered fallibly via `TryFrom<u8>`,
//! which is where an unrecognized side or action surfaces as
//! [`TradingError::InvalidValue`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TradingError;

macro_rules! impl_enum_conversions {
    ($name:ident { $($variant:ident = $value:literal => $label:literal),+ $(,)? }) => {
        impl $name {
            /// Returns the canonical upper-case label for this variant.
            #[must_use]
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $label),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl TryFrom<u8> for $name {
            type Error = TradingError;

            fn try_from(value: u8) -> Result<Self, Self::Error> {
                match value {
                    $($value => Ok(Self::$variant),)+
                    other => Err(TradingError::invalid_value(format!(
                        "unrecognized {} discriminant: {other}",
                        stringify!($name),
                    ))),
                }
            }
        }

        impl FromStr for $name {
            type Err = TradingError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($label => Ok(Self::$variant),)+
                    other => Err(TradingError::invalid_value(format!(
                        "unrecognized {} label: {other:?}",
                        stringify!($name),
                    ))),
                }
            }
        }
    };
}

/// The granularity at which an order book tracks liquidity.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BookLevel {
    /// Top-of-book best bid and offer only.
    L1Tbbo = 1,
    /// Market-by-price: aggregated size per price level.
    L2Mbp = 2,
    /// Market-by-order: every discrete resting order.
    L3Mbo = 3,
}

impl_enum_conversions!(BookLevel {
    L1Tbbo = 1 => "L1_TBBO",
    L2Mbp = 2 => "L2_MBP",
    L3Mbo = 3 => "L3_MBO",
});

/// The side of an order or book update.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum OrderSide {
    /// Buyer side (bids).
    Buy = 1,
    /// Seller side (asks).
    Sell = 2,
}

impl_enum_conversions!(OrderSide {
    Buy = 1 => "BUY",
    Sell = 2 => "SELL",
});

/// Classification of a currency.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CurrencyType {
    /// Cryptocurrency or crypto token.
    Crypto = 1,
    /// Fiat currency with an ISO 4217 code.
    Fiat = 2,
}

impl_enum_conversions!(CurrencyType {
    Crypto = 1 => "CRYPTO",
    Fiat = 2 => "FIAT",
});

/// The kind of mutation a book delta applies to a ladder.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BookAction {
    /// Insert a new resting order (or increment an aggregate level).
    Add = 1,
    /// Replace the size of an existing order (or aggregate level).
    Update = 2,
    /// Remove an order's contribution from its level.
    Delete = 3,
}

impl_enum_conversions!(BookAction {
    Add = 1 => "ADD",
    Update = 2 => "UPDATE",
    Delete = 3 => "DELETE",
});

/// The order variant, selecting the validation and applicability rules
/// layered over the shared lifecycle state machine.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderType {
    /// Execute immediately at the best available price.
    Market = 1,
    /// Rest at a limit price until matched or removed.
    Limit = 2,
    /// Trigger a market order once the trigger price trades.
    StopMarket = 3,
}

impl_enum_conversions!(OrderType {
    Market = 1 => "MARKET",
    Limit = 2 => "LIMIT",
    StopMarket = 3 => "STOP_MARKET",
});

/// The lifecycle state of an order.
///
/// `Filled`, `Canceled`, `Rejected`, `Denied` and `Expired` are terminal:
/// once reached, no further event is applicable.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    /// Created locally, not yet submitted to a venue.
    Initialized = 1,
    /// Refused by a pre-trade check before submission (terminal).
    Denied = 2,
    /// Sent to the venue, acknowledgement pending.
    Submitted = 3,
    /// Working at the venue.
    Accepted = 4,
    /// Refused by the venue (terminal).
    Rejected = 5,
    /// Some quantity executed, remainder still working.
    PartiallyFilled = 6,
    /// The full quantity executed (terminal).
    Filled = 7,
    /// Removed before completion (terminal).
    Canceled = 8,
    /// Lapsed per its time-in-force (terminal).
    Expired = 9,
    /// An amendment request is in flight.
    PendingUpdate = 10,
    /// A cancellation request is in flight.
    PendingCancel = 11,
}

impl_enum_conversions!(OrderStatus {
    Initialized = 1 => "INITIALIZED",
    Denied = 2 => "DENIED",
    Submitted = 3 => "SUBMITTED",
    Accepted = 4 => "ACCEPTED",
    Rejected = 5 => "REJECTED",
    PartiallyFilled = 6 => "PARTIALLY_FILLED",
    Filled = 7 => "FILLED",
    Canceled = 8 => "CANCELED",
    Expired = 9 => "EXPIRED",
    PendingUpdate = 10 => "PENDING_UPDATE",
    PendingCancel = 11 => "PENDING_CANCEL",
});

impl OrderStatus {
    /// `true` if no further event can be applied from this state.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(
            self,
            OrderStatus::Filled
                | OrderStatus::Canceled
                | OrderStatus::Rejected
                | OrderStatus::Denied
                | OrderStatus::Expired
        )
    }
}

/// How long an order remains in force.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeInForce {
    /// Good till canceled.
    Gtc = 1,
    /// Good till a specified expiry time; requires a resting price.
    Gtd = 2,
    /// Immediate or cancel: fill what is possible, cancel the rest.
    Ioc = 3,
    /// Fill or kill: fill completely or cancel entirely.
    Fok = 4,
    /// Fill and kill: synonym family of IOC used by some venues.
    Fak = 5,
    /// Good for the trading day.
    Day = 6,
    /// Execute in the opening or closing auction.
    Oc = 7,
}

impl_enum_conversions!(TimeInForce {
    Gtc = 1 => "GTC",
    Gtd = 2 => "GTD",
    Ioc = 3 => "IOC",
    Fok = 4 => "FOK",
    Fak = 5 => "FAK",
    Day = 6 => "DAY",
    Oc = 7 => "OC",
});

/// Whether a fill added or removed liquidity.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LiquiditySide {
    /// The fill rested on the book (added liquidity).
    Maker = 1,
    /// The fill crossed the spread (removed liquidity).
    Taker = 2,
}

impl_enum_conversions!(LiquiditySide {
    Maker = 1 => "MAKER",
    Taker = 2 => "TAKER",
});
