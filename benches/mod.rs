use criterion::{criterion_group, criterion_main};

mod fixed_point;
mod order_book;

use fixed_point::register_benchmarks as register_fixed_point_benchmarks;
use order_book::register_benchmarks as register_order_book_benchmarks;

// Define the benchmark groups
criterion_group!(
    benches,
    register_fixed_point_benchmarks,
    register_order_book_benchmarks,
);

criterion_main!(benches);
