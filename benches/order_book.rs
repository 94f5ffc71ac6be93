//! Order book churn benchmarks: add-heavy, amend-heavy and mixed flows.

use criterion::{BatchSize, Criterion};

use tradecore_rs::prelude::*;

fn instrument_id() -> InstrumentId {
    "BENCH.SIM".parse().unwrap()
}

fn delta(action: BookAction, side: OrderSide, price_raw: i64, size_raw: u64, order_id: u64) -> BookDelta {
    BookDelta {
        instrument_id: instrument_id(),
        action,
        order: BookOrder::new(
            Price::from_raw(price_raw, 2).unwrap(),
            Quantity::from_raw(size_raw, 0).unwrap(),
            side,
            order_id,
        ),
        ts_event: 0,
    }
}

fn populated_book(levels: i64) -> OrderBook {
    let mut book = OrderBook::new(instrument_id(), BookLevel::L3Mbo);
    for i in 0..levels {
        book.apply(&delta(
            BookAction::Add,
            OrderSide::Buy,
            10_000 - i,
            100,
            i as u64 + 1,
        ))
        .unwrap();
        book.apply(&delta(
            BookAction::Add,
            OrderSide::Sell,
            10_001 + i,
            100,
            1_000 + i as u64,
        ))
        .unwrap();
    }
    book
}

pub fn register_benchmarks(c: &mut Criterion) {
    c.bench_function("book_add_100_levels_per_side", |b| {
        b.iter_batched(
            || OrderBook::new(instrument_id(), BookLevel::L3Mbo),
            |mut book| {
                for i in 0..100 {
                    book.apply(&delta(BookAction::Add, OrderSide::Buy, 10_000 - i, 100, i as u64 + 1))
                        .unwrap();
                    book.apply(&delta(BookAction::Add, OrderSide::Sell, 10_001 + i, 100, 1_000 + i as u64))
                        .unwrap();
                }
                book
            },
            BatchSize::SmallInput,
        );
    });

    c.bench_function("book_amend_resting_order", |b| {
        b.iter_batched(
            || populated_book(100),
            |mut book| {
                for size in 1..100_u64 {
                    book.apply(&delta(BookAction::Update, OrderSide::Buy, 9_950, size, 51))
                        .unwrap();
                }
                book
            },
            BatchSize::SmallInput,
        );
    });

    c.bench_function("book_top_of_book_query", |b| {
        let book = populated_book(100);
        b.iter(|| {
            let bid = book.best_bid().unwrap();
            let ask = book.best_ask().unwrap();
            (bid, ask)
        });
    });

    c.bench_function("book_depth_10", |b| {
        let book = populated_book(100);
        b.iter(|| book.depth(OrderSide::Buy, 10).count());
    });
}
