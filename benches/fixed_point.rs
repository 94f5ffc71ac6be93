//! Fixed-point arithmetic benchmarks.

use criterion::Criterion;
use std::hint::black_box;

use tradecore_rs::prelude::*;

pub fn register_benchmarks(c: &mut Criterion) {
    let a = Price::from_raw(1_234_567, 2).unwrap();
    let b = Price::from_raw(7_654_321, 5).unwrap();

    c.bench_function("price_add_cross_precision", |bench| {
        bench.iter(|| black_box(a) + black_box(b));
    });

    c.bench_function("price_cmp_cross_precision", |bench| {
        bench.iter(|| black_box(a) < black_box(b));
    });

    c.bench_function("price_parse_decimal_literal", |bench| {
        bench.iter(|| "65000.505".parse::<Price>().unwrap());
    });

    let qty = Quantity::from_raw(1_000_000, 3).unwrap();
    c.bench_function("quantity_display", |bench| {
        bench.iter(|| black_box(qty).to_string());
    });
}
