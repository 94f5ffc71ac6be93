//! Order book maintenance: side-aware price ladders and the two-sided book.

pub mod book;
pub mod iterators;
pub mod ladder;

mod tests;

pub use book::{BookDelta, OrderBook};
pub use iterators::{CumulativeDepth, Depth, DepthLevel};
pub use ladder::{BookOrder, BookPrice, Ladder, Level};
