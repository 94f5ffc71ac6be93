//! One side of an order book: a ladder of price levels.
//!
//! The ladder pairs an ordered map of levels (keyed by the side-aware
//! [`BookPrice`], so the best price is always the first key) with a hash
//! index from order key to ladder key. The pair is kept consistent by
//! construction: every mutation updates both, which is what makes amendment
//! and cancellation O(1) amortized after the O(log n) level lookup.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::enums::OrderSide;
use crate::types::{Price, Quantity};

/// A price wrapped with a side-aware total order, used as a ladder key.
///
/// Bid ladders order descending (best bid = highest price), ask ladders
/// ascending (best ask = lowest price). The ordering is only meaningful
/// between prices of the same side; a ladder never mixes sides.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BookPrice {
    /// The underlying price.
    pub value: Price,
    /// The side whose ordering convention applies.
    pub side: OrderSide,
}

impl BookPrice {
    /// Wraps `value` with the ordering convention of `side`.
    #[must_use]
    pub const fn new(value: Price, side: OrderSide) -> Self {
        Self { value, side }
    }
}

impl PartialEq for BookPrice {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for BookPrice {}

impl PartialOrd for BookPrice {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for BookPrice {
    fn cmp(&self, other: &Self) -> Ordering {
        match self.side {
            OrderSide::Buy => other.value.cmp(&self.value),
            OrderSide::Sell => self.value.cmp(&other.value),
        }
    }
}

impl fmt::Display for BookPrice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.value, self.side)
    }
}

/// One resting order (L3) or one synthetic per-price aggregate (L1/L2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookOrder {
    /// The order's price.
    pub price: Price,
    /// The order's resting size.
    pub size: Quantity,
    /// Buy or sell.
    pub side: OrderSide,
    /// The order key: a venue order id at L3, a price-derived key for
    /// aggregate books.
    pub order_id: u64,
}

impl BookOrder {
    /// Creates a book order.
    #[must_use]
    pub const fn new(price: Price, size: Quantity, side: OrderSide, order_id: u64) -> Self {
        Self {
            price,
            size,
            side,
            order_id,
        }
    }

    /// This order's price as a ladder key.
    #[must_use]
    pub const fn book_price(&self) -> BookPrice {
        BookPrice::new(self.price, self.side)
    }
}

/// The orders resting at one price, in arrival order (price-time priority).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Level {
    /// The level's price key.
    pub price: BookPrice,
    orders: Vec<BookOrder>,
}

impl Level {
    fn new(price: BookPrice) -> Self {
        Self {
            price,
            orders: Vec::new(),
        }
    }

    /// The orders at this level in priority order.
    #[must_use]
    pub fn orders(&self) -> &[BookOrder] {
        &self.orders
    }

    /// The number of discrete orders at this level.
    #[must_use]
    pub fn len(&self) -> usize {
        self.orders.len()
    }

    /// `true` if no orders rest at this level.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// The aggregate resting size, rescaled to the finest precision present
    /// at the level. Saturates at the raw range rather than panicking on a
    /// pathological feed.
    #[must_use]
    pub fn size(&self) -> Quantity {
        let precision = self
            .orders
            .iter()
            .map(|order| order.size.precision)
            .max()
            .unwrap_or(0);
        let total: u128 = self
            .orders
            .iter()
            .map(|order| order.size.raw_at(precision))
            .sum();
        Quantity::from_raw(u64::try_from(total).unwrap_or(u64::MAX), precision)
            .expect("precision within FIXED_PRECISION")
    }

    fn order(&self, order_id: u64) -> Option<&BookOrder> {
        self.orders.iter().find(|order| order.order_id == order_id)
    }

    fn add(&mut self, order: BookOrder) {
        debug_assert_eq!(order.book_price(), self.price);
        self.orders.push(order);
    }

    /// Replaces the size of the identified order in place, keeping its
    /// queue position; appends if the order is unknown.
    fn update(&mut self, order: BookOrder) {
        match self
            .orders
            .iter_mut()
            .find(|resting| resting.order_id == order.order_id)
        {
            Some(resting) => resting.size = order.size,
            None => self.add(order),
        }
    }

    fn delete(&mut self, order_id: u64) {
        self.orders.retain(|order| order.order_id != order_id);
    }
}

/// One side of an order book: price levels in side-aware order plus an
/// order-key index for O(1) amortized amendment and cancellation.
#[derive(Debug, Clone)]
pub struct Ladder {
    /// The side this ladder aggregates.
    pub side: OrderSide,
    levels: BTreeMap<BookPrice, Level>,
    cache: HashMap<u64, BookPrice>,
}

impl Ladder {
    /// Creates an empty ladder for `side`.
    #[must_use]
    pub fn new(side: OrderSide) -> Self {
        Self {
            side,
            levels: BTreeMap::new(),
            cache: HashMap::new(),
        }
    }

    /// The number of price levels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    /// `true` if no levels exist.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// `true` if `order_id` is registered in this ladder.
    #[must_use]
    pub fn contains(&self, order_id: u64) -> bool {
        self.cache.contains_key(&order_id)
    }

    /// The current size of the identified order, if registered.
    #[must_use]
    pub fn order_size(&self, order_id: u64) -> Option<Quantity> {
        let price = self.cache.get(&order_id)?;
        self.levels
            .get(price)?
            .order(order_id)
            .map(|order| order.size)
    }

    /// Inserts `order`, creating its level if the price is new. The caller
    /// ensures `order_id` is not already registered; use
    /// [`Ladder::update`] to move or resize a resting order.
    pub fn add(&mut self, order: BookOrder) {
        debug_assert!(!self.cache.contains_key(&order.order_id));
        let price = order.book_price();
        self.cache.insert(order.order_id, price);
        self.levels
            .entry(price)
            .or_insert_with(|| Level::new(price))
            .add(order);
    }

    /// Replaces the identified order's size, relocating it when the price
    /// moved (losing queue priority) and inserting it when unknown. A zero
    /// size removes the order.
    pub fn update(&mut self, order: BookOrder) {
        if order.size.is_zero() {
            self.delete(order.order_id);
            return;
        }
        match self.cache.get(&order.order_id) {
            Some(cached) if cached.value == order.price => {
                if let Some(level) = self.levels.get_mut(cached) {
                    level.update(order);
                }
            }
            Some(_) => {
                self.delete(order.order_id);
                self.add(order);
            }
            None => self.add(order),
        }
    }

    /// Removes the identified order's contribution. Removing the last
    /// order at a price removes the level and its cache entries. Unknown
    /// ids are a no-op.
    pub fn delete(&mut self, order_id: u64) {
        if let Some(price) = self.cache.remove(&order_id) {
            if let Some(level) = self.levels.get_mut(&price) {
                level.delete(order_id);
                if level.is_empty() {
                    self.levels.remove(&price);
                }
            }
        }
    }

    /// The best level by this side's ordering, if any. O(1) amortized.
    #[must_use]
    pub fn top(&self) -> Option<&Level> {
        self.levels.values().next()
    }

    /// The levels in ladder order (best first).
    pub fn levels(&self) -> impl Iterator<Item = &Level> {
        self.levels.values()
    }

    /// Drops every level and cache entry.
    pub fn clear(&mut self) {
        self.levels.clear();
        self.cache.clear();
    }

    /// Verifies the ladder/cache consistency property: every cache key maps
    /// to a live level that contains exactly that order, every level is
    /// non-empty, and every resting order is registered in the cache at its
    /// level's price.
    #[must_use]
    pub fn check_integrity(&self) -> bool {
        for (order_id, price) in &self.cache {
            match self.levels.get(price) {
                Some(level) if level.order(*order_id).is_some() => {}
                _ => return false,
            }
        }
        for (price, level) in &self.levels {
            if level.is_empty() {
                return false;
            }
            for order in level.orders() {
                if self.cache.get(&order.order_id) != Some(price) {
                    return false;
                }
            }
        }
        true
    }
}
