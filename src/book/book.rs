//! Two-sided order book maintained from a stream of deltas.

use serde::{Deserialize, Serialize};
use tracing::trace;

use super::iterators::{CumulativeDepth, Depth};
use super::ladder::{BookOrder, Ladder, Level};
use crate::data::{QuoteTick, TradeTick};
use crate::enums::{BookAction, BookLevel, OrderSide};
use crate::error::TradingError;
use crate::identifiers::InstrumentId;
use crate::types::{Price, Quantity, UnixNanos};

/// One atomic mutation of an order book: an add, update or delete of a
/// single order (L3) or price level (L1/L2).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookDelta {
    /// The instrument the delta applies to.
    pub instrument_id: InstrumentId,
    /// The kind of mutation.
    pub action: BookAction,
    /// The order (or aggregate level) payload.
    pub order: BookOrder,
    /// When the delta occurred at the venue.
    pub ts_event: UnixNanos,
}

/// A per-instrument, two-sided price ladder maintained for the life of a
/// market-data subscription.
///
/// The book is a single-writer structure: exactly one owner applies
/// mutations through `&mut self`, so every update is atomic with respect to
/// any reader the owner hands a reference to. No operation blocks; all are
/// amortized logarithmic or better. The book is never implicitly reset —
/// only [`OrderBook::clear`] discards state.
#[derive(Debug)]
pub struct OrderBook {
    /// The instrument this book tracks.
    pub instrument_id: InstrumentId,
    /// The granularity the feed delivers.
    pub book_level: BookLevel,
    /// The side of the most recently applied delta.
    pub last_side: Option<OrderSide>,
    /// The venue timestamp of the most recently applied update.
    pub ts_last: UnixNanos,
    /// The number of updates applied since creation (or the last clear).
    pub count: u64,
    bids: Ladder,
    asks: Ladder,
}

impl OrderBook {
    /// Creates an empty book for `instrument_id` at the given granularity.
    #[must_use]
    pub fn new(instrument_id: InstrumentId, book_level: BookLevel) -> Self {
        Self {
            instrument_id,
            book_level,
            last_side: None,
            ts_last: 0,
            count: 0,
            bids: Ladder::new(OrderSide::Buy),
            asks: Ladder::new(OrderSide::Sell),
        }
    }

    /// Applies one delta to the appropriate ladder.
    ///
    /// At L3 the delta's `order_id` is the venue's; for aggregate books the
    /// key is derived from the price, so one synthetic entry per level is
    /// maintained and an `Add` at an existing price increments the
    /// aggregate while an `Update` sets it. An `Add`/`Update` with zero
    /// size, and any `Delete`, removes the contribution; removing the last
    /// contribution at a price removes the level and its cache entries.
    /// `Delete` of an unknown key is a no-op, and `Update` of an unknown
    /// key inserts (feeds may start mid-stream).
    ///
    /// # Errors
    /// Returns [`TradingError::InvalidValue`] if the delta is for another
    /// instrument or the increment overflows; the book is unchanged on
    /// error.
    pub fn apply(&mut self, delta: &BookDelta) -> Result<(), TradingError> {
        if delta.instrument_id != self.instrument_id {
            return Err(TradingError::invalid_value(format!(
                "delta for {} applied to book {}",
                delta.instrument_id, self.instrument_id
            )));
        }
        let aggregate = self.book_level != BookLevel::L3Mbo;
        let mut order = delta.order;
        if aggregate {
            // One synthetic order per price level, keyed by the price.
            order.order_id = order.price.raw as u64;
        }
        let top_of_book = self.book_level == BookLevel::L1Tbbo;
        let ladder = match order.side {
            OrderSide::Buy => &mut self.bids,
            OrderSide::Sell => &mut self.asks,
        };

        match delta.action {
            BookAction::Add => {
                if top_of_book {
                    // L1 keeps at most one level per side.
                    ladder.clear();
                    if !order.size.is_zero() {
                        ladder.add(order);
                    }
                } else if aggregate {
                    let size = match ladder.order_size(order.order_id) {
                        Some(existing) => existing.checked_add(order.size).ok_or_else(|| {
                            TradingError::invalid_value(format!(
                                "aggregate size overflow at price {}",
                                order.price
                            ))
                        })?,
                        None => order.size,
                    };
                    ladder.update(BookOrder { size, ..order });
                } else if ladder.contains(order.order_id) {
                    ladder.update(order);
                } else {
                    ladder.add(order);
                }
            }
            BookAction::Update => {
                if top_of_book {
                    ladder.clear();
                    if !order.size.is_zero() {
                        ladder.add(order);
                    }
                } else {
                    ladder.update(order);
                }
            }
            BookAction::Delete => {
                ladder.delete(order.order_id);
            }
        }

        self.last_side = Some(order.side);
        self.ts_last = delta.ts_event;
        self.count += 1;
        trace!(
            instrument_id = %self.instrument_id,
            action = %delta.action,
            side = %order.side,
            price = %order.price,
            size = %order.size,
            "applied book delta"
        );
        Ok(())
    }

    /// Replaces both top-of-book levels from a quote tick.
    ///
    /// # Errors
    /// Returns [`TradingError::InvalidValue`] unless the book is L1 (quote
    /// ticks carry top-of-book data only).
    pub fn update_quote_tick(&mut self, tick: &QuoteTick) -> Result<(), TradingError> {
        if self.book_level != BookLevel::L1Tbbo {
            return Err(TradingError::invalid_value(format!(
                "quote tick update on {} book",
                self.book_level
            )));
        }
        if tick.instrument_id != self.instrument_id {
            return Err(TradingError::invalid_value(format!(
                "quote tick for {} applied to book {}",
                tick.instrument_id, self.instrument_id
            )));
        }
        self.bids.clear();
        self.bids.add(BookOrder::new(
            tick.bid,
            tick.bid_size,
            OrderSide::Buy,
            tick.bid.raw as u64,
        ));
        self.asks.clear();
        self.asks.add(BookOrder::new(
            tick.ask,
            tick.ask_size,
            OrderSide::Sell,
            tick.ask.raw as u64,
        ));
        self.ts_last = tick.ts_event;
        self.count += 1;
        Ok(())
    }

    /// Records a trade tick against this book (aggressor side and
    /// timestamp; trades do not mutate resting liquidity).
    ///
    /// # Errors
    /// Returns [`TradingError::InvalidValue`] if the tick is for another
    /// instrument.
    pub fn update_trade_tick(&mut self, tick: &TradeTick) -> Result<(), TradingError> {
        if tick.instrument_id != self.instrument_id {
            return Err(TradingError::invalid_value(format!(
                "trade tick for {} applied to book {}",
                tick.instrument_id, self.instrument_id
            )));
        }
        self.last_side = Some(tick.aggressor_side);
        self.ts_last = tick.ts_event;
        self.count += 1;
        Ok(())
    }

    /// The best bid as `(price, aggregate size)`, if any. O(1) amortized.
    #[must_use]
    pub fn best_bid(&self) -> Option<(Price, Quantity)> {
        self.bids.top().map(|level| (level.price.value, level.size()))
    }

    /// The best ask as `(price, aggregate size)`, if any. O(1) amortized.
    #[must_use]
    pub fn best_ask(&self) -> Option<(Price, Quantity)> {
        self.asks.top().map(|level| (level.price.value, level.size()))
    }

    /// The best (highest) bid price, if any.
    #[must_use]
    pub fn best_bid_price(&self) -> Option<Price> {
        self.bids.top().map(|level| level.price.value)
    }

    /// The best (lowest) ask price, if any.
    #[must_use]
    pub fn best_ask_price(&self) -> Option<Price> {
        self.asks.top().map(|level| level.price.value)
    }

    /// The aggregate size at the best bid, if any.
    #[must_use]
    pub fn best_bid_size(&self) -> Option<Quantity> {
        self.bids.top().map(Level::size)
    }

    /// The aggregate size at the best ask, if any.
    #[must_use]
    pub fn best_ask_size(&self) -> Option<Quantity> {
        self.asks.top().map(Level::size)
    }

    /// The spread (best ask minus best bid); negative when crossed.
    #[must_use]
    pub fn spread(&self) -> Option<Price> {
        match (self.best_ask_price(), self.best_bid_price()) {
            (Some(ask), Some(bid)) => ask.checked_sub(bid),
            _ => None,
        }
    }

    /// The midpoint of the best bid and ask. Display metric only.
    #[must_use]
    pub fn midpoint(&self) -> Option<f64> {
        match (self.best_bid_price(), self.best_ask_price()) {
            (Some(bid), Some(ask)) => Some((bid.as_f64() + ask.as_f64()) / 2.0),
            _ => None,
        }
    }

    /// A lazy, finite sequence of up to `n` `(price, aggregate size)` pairs
    /// in ladder order (best first).
    #[must_use]
    pub fn depth(&self, side: OrderSide, n: usize) -> Depth<'_> {
        Depth::new(self.ladder(side), n)
    }

    /// A lazy iteration of this side's levels with a running cumulative
    /// size, best first.
    #[must_use]
    pub fn cumulative_depth(&self, side: OrderSide) -> CumulativeDepth<'_> {
        CumulativeDepth::new(self.ladder(side))
    }

    /// The bid ladder's levels, best (highest) first.
    pub fn bid_levels(&self) -> impl Iterator<Item = &Level> {
        self.bids.levels()
    }

    /// The ask ladder's levels, best (lowest) first.
    pub fn ask_levels(&self) -> impl Iterator<Item = &Level> {
        self.asks.levels()
    }

    /// The ladder for `side`.
    #[must_use]
    pub fn ladder(&self, side: OrderSide) -> &Ladder {
        match side {
            OrderSide::Buy => &self.bids,
            OrderSide::Sell => &self.asks,
        }
    }

    /// Discards all resting state on both sides. The explicit reset — the
    /// book is never reset implicitly.
    pub fn clear(&mut self) {
        self.bids.clear();
        self.asks.clear();
        self.last_side = None;
        self.count = 0;
    }

    /// Discards the bid ladder.
    pub fn clear_bids(&mut self) {
        self.bids.clear();
    }

    /// Discards the ask ladder.
    pub fn clear_asks(&mut self) {
        self.asks.clear();
    }

    /// Verifies the ladder/cache consistency property on both sides.
    #[must_use]
    pub fn check_integrity(&self) -> bool {
        self.bids.check_integrity() && self.asks.check_integrity()
    }
}

impl Serialize for OrderBook {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;

        let mut state = serializer.serialize_struct("OrderBook", 6)?;
        state.serialize_field("instrument_id", &self.instrument_id)?;
        state.serialize_field("book_level", &self.book_level)?;
        let bids: Vec<_> = self.bids.levels().collect();
        state.serialize_field("bids", &bids)?;
        let asks: Vec<_> = self.asks.levels().collect();
        state.serialize_field("asks", &asks)?;
        state.serialize_field("last_side", &self.last_side)?;
        state.serialize_field("ts_last", &self.ts_last)?;
        state.end()
    }
}
