//! Market-data records.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::enums::OrderSide;
use crate::error::TradingError;
use crate::identifiers::{InstrumentId, TradeId};
use crate::types::{Price, Quantity, UnixNanos};

/// A single quote tick: top-of-book bid and ask with their sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteTick {
    /// The quoted instrument.
    pub instrument_id: InstrumentId,
    /// The best bid price.
    pub bid: Price,
    /// The best ask price.
    pub ask: Price,
    /// The size at the best bid.
    pub bid_size: Quantity,
    /// The size at the best ask.
    pub ask_size: Quantity,
    /// When the quote occurred at the venue.
    pub ts_event: UnixNanos,
    /// When the quote was received locally.
    pub ts_init: UnixNanos,
}

impl QuoteTick {
    /// Creates a quote tick.
    ///
    /// # Errors
    /// Returns [`TradingError::InvalidValue`] if the bid and ask (or their
    /// sizes) carry differing precisions — one instrument quotes at one
    /// resolution.
    pub fn new(
        instrument_id: InstrumentId,
        bid: Price,
        ask: Price,
        bid_size: Quantity,
        ask_size: Quantity,
        ts_event: UnixNanos,
        ts_init: UnixNanos,
    ) -> Result<Self, TradingError> {
        if bid.precision != ask.precision {
            return Err(TradingError::invalid_value(format!(
                "bid precision {} differs from ask precision {}",
                bid.precision, ask.precision
            )));
        }
        if bid_size.precision != ask_size.precision {
            return Err(TradingError::invalid_value(format!(
                "bid size precision {} differs from ask size precision {}",
                bid_size.precision, ask_size.precision
            )));
        }
        Ok(Self {
            instrument_id,
            bid,
            ask,
            bid_size,
            ask_size,
            ts_event,
            ts_init,
        })
    }
}

impl fmt::Display for QuoteTick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{},{},{},{},{}",
            self.instrument_id, self.bid, self.ask, self.bid_size, self.ask_size, self.ts_event
        )
    }
}

/// A single trade tick: one match printed by the venue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeTick {
    /// The traded instrument.
    pub instrument_id: InstrumentId,
    /// The price the trade executed at.
    pub price: Price,
    /// The traded size.
    pub size: Quantity,
    /// The side of the aggressing order.
    pub aggressor_side: OrderSide,
    /// The venue-assigned trade identifier.
    pub trade_id: TradeId,
    /// When the trade occurred at the venue.
    pub ts_event: UnixNanos,
    /// When the trade was received locally.
    pub ts_init: UnixNanos,
}

impl TradeTick {
    /// Creates a trade tick.
    #[must_use]
    pub const fn new(
        instrument_id: InstrumentId,
        price: Price,
        size: Quantity,
        aggressor_side: OrderSide,
        trade_id: TradeId,
        ts_event: UnixNanos,
        ts_init: UnixNanos,
    ) -> Self {
        Self {
            instrument_id,
            price,
            size,
            aggressor_side,
            trade_id,
            ts_event,
            ts_init,
        }
    }
}

impl fmt::Display for TradeTick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{},{},{},{},{}",
            self.instrument_id,
            self.price,
            self.size,
            self.aggressor_side,
            self.trade_id,
            self.ts_event
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn instrument() -> InstrumentId {
        "ETHUSDT.BINANCE".parse().unwrap()
    }

    #[test]
    fn test_quote_tick_rejects_mixed_precision() {
        let err = QuoteTick::new(
            instrument(),
            Price::from_raw(10_000, 2).unwrap(),
            Price::from_raw(10_010_0, 3).unwrap(),
            Quantity::from_raw(1, 0).unwrap(),
            Quantity::from_raw(1, 0).unwrap(),
            0,
            0,
        )
        .unwrap_err();
        assert!(matches!(err, TradingError::InvalidValue { .. }));
    }

    #[test]
    fn test_quote_tick_display() {
        let tick = QuoteTick::new(
            instrument(),
            Price::from_raw(10_005, 2).unwrap(),
            Price::from_raw(10_007, 2).unwrap(),
            Quantity::from_raw(100, 0).unwrap(),
            Quantity::from_raw(80, 0).unwrap(),
            1_000,
            1_001,
        )
        .unwrap();
        assert_eq!(
            tick.to_string(),
            "ETHUSDT.BINANCE,100.05,100.07,100,80,1000"
        );
    }

    #[test]
    fn test_trade_tick_serde_round_trip() {
        let tick = TradeTick::new(
            instrument(),
            Price::from_raw(10_006, 2).unwrap(),
            Quantity::from_raw(5, 0).unwrap(),
            OrderSide::Sell,
            TradeId::new("T-123").unwrap(),
            2_000,
            2_001,
        );
        let json = serde_json::to_string(&tick).unwrap();
        let back: TradeTick = serde_json::from_str(&json).unwrap();
        assert_eq!(back, tick);
    }
}
