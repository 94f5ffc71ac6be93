//! Lazy iterators over ladder depth.
//!
//! Finite, non-restartable sequences over a ladder's levels in best-first
//! order, composable with the standard iterator combinators and free of
//! intermediate allocation.

use super::ladder::Ladder;
use crate::types::{Price, Quantity};

/// Iterator over up to `n` `(price, aggregate size)` pairs in ladder order.
pub struct Depth<'a> {
    levels: Box<dyn Iterator<Item = &'a super::ladder::Level> + 'a>,
    remaining: usize,
}

impl<'a> Depth<'a> {
    /// Creates a depth iterator over the first `n` levels of `ladder`.
    pub(crate) fn new(ladder: &'a Ladder, n: usize) -> Self {
        Self {
            levels: Box::new(ladder.levels()),
            remaining: n,
        }
    }
}

impl Iterator for Depth<'_> {
    type Item = (Price, Quantity);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        self.levels
            .next()
            .map(|level| (level.price.value, level.size()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.remaining))
    }
}

/// One step of a [`CumulativeDepth`] iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepthLevel {
    /// The level's price.
    pub price: Price,
    /// The aggregate size at this level.
    pub size: Quantity,
    /// The cumulative size up to and including this level.
    pub cumulative: Quantity,
}

/// Iterator over a ladder's levels with a running cumulative size,
/// best first. Useful for liquidity thresholds and depth charts.
pub struct CumulativeDepth<'a> {
    levels: Box<dyn Iterator<Item = &'a super::ladder::Level> + 'a>,
    cumulative: Option<Quantity>,
}

impl<'a> CumulativeDepth<'a> {
    pub(crate) fn new(ladder: &'a Ladder) -> Self {
        Self {
            levels: Box::new(ladder.levels()),
            cumulative: None,
        }
    }
}

impl Iterator for CumulativeDepth<'_> {
    type Item = DepthLevel;

    fn next(&mut self) -> Option<Self::Item> {
        self.levels.next().map(|level| {
            let size = level.size();
            let cumulative = match self.cumulative {
                Some(total) => total.checked_add(size).unwrap_or(total),
                None => size,
            };
            self.cumulative = Some(cumulative);
            DepthLevel {
                price: level.price.value,
                size,
                cumulative,
            }
        })
    }
}
