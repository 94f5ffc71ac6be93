//! Property-based invariant checks.

use proptest::prelude::*;

use tradecore_rs::prelude::*;
use tradecore_rs::types::fixed::FIXED_PRECISION;

fn pow10(precision: u8) -> i64 {
    10_i64.pow(u32::from(precision))
}

proptest! {
    /// For all valid `(value, precision)`, scaling a whole value into raw
    /// and back through `as_f64` recovers the value within floating-point
    /// tolerance.
    #[test]
    fn prop_fixed_point_round_trip(
        value in -1_000_000_i64..1_000_000,
        precision in 0_u8..=FIXED_PRECISION,
    ) {
        let price = Price::from_raw(value * pow10(precision), precision).unwrap();
        let tolerance = 1e-9 * value.unsigned_abs().max(1) as f64;
        prop_assert!((price.as_f64() - value as f64).abs() <= tolerance);
    }

    /// Display/parse round-trips preserve raw and precision exactly.
    #[test]
    fn prop_price_display_parse_round_trip(
        raw in -1_000_000_000_000_i64..1_000_000_000_000,
        precision in 0_u8..=FIXED_PRECISION,
    ) {
        let price = Price::from_raw(raw, precision).unwrap();
        let parsed: Price = price.to_string().parse().unwrap();
        prop_assert_eq!(parsed.raw, price.raw);
        prop_assert_eq!(parsed.precision, price.precision);
    }

    /// Regardless of insertion order of non-overlapping adds at distinct
    /// prices, `best_bid` is the maximum bid price and `best_ask` the
    /// minimum ask price.
    #[test]
    fn prop_best_prices_invariant_under_insertion_order(
        bid_raws in proptest::collection::hash_set(1_i64..500, 1..20),
        ask_raws in proptest::collection::hash_set(500_i64..1_000, 1..20),
        seed in any::<u64>(),
    ) {
        let instrument_id: InstrumentId = "PROP.SIM".parse().unwrap();
        let mut book = OrderBook::new(instrument_id, BookLevel::L2Mbp);

        let mut deltas: Vec<(OrderSide, i64)> = bid_raws
            .iter()
            .map(|raw| (OrderSide::Buy, *raw))
            .chain(ask_raws.iter().map(|raw| (OrderSide::Sell, *raw)))
            .collect();
        // Deterministic pseudo-shuffle driven by the seed.
        let len = deltas.len();
        for i in 0..len {
            let j = (seed as usize).wrapping_mul(31).wrapping_add(i * 17) % len;
            deltas.swap(i, j);
        }

        for (i, (side, raw)) in deltas.iter().enumerate() {
            book.apply(&BookDelta {
                instrument_id,
                action: BookAction::Add,
                order: BookOrder::new(
                    Price::from_raw(*raw, 2).unwrap(),
                    Quantity::from_raw(10, 0).unwrap(),
                    *side,
                    0,
                ),
                ts_event: i as u64,
            })
            .unwrap();
        }

        let max_bid = *bid_raws.iter().max().unwrap();
        let min_ask = *ask_raws.iter().min().unwrap();
        prop_assert_eq!(
            book.best_bid_price().unwrap(),
            Price::from_raw(max_bid, 2).unwrap()
        );
        prop_assert_eq!(
            book.best_ask_price().unwrap(),
            Price::from_raw(min_ask, 2).unwrap()
        );
        prop_assert!(book.check_integrity());
    }

    /// After random add/update/delete churn the ladder/cache invariant
    /// holds, and deleting everything leaves no stale keys.
    #[test]
    fn prop_cache_invariant_under_churn(
        operations in proptest::collection::vec(
            (0_u8..3, 1_u64..50, 1_i64..100, 0_u64..1_000),
            1..200,
        ),
    ) {
        let instrument_id: InstrumentId = "CHURN.SIM".parse().unwrap();
        let mut book = OrderBook::new(instrument_id, BookLevel::L3Mbo);

        for (i, (op, order_id, price_raw, size_raw)) in operations.iter().enumerate() {
            let action = match op {
                0 => BookAction::Add,
                1 => BookAction::Update,
                _ => BookAction::Delete,
            };
            book.apply(&BookDelta {
                instrument_id,
                action,
                order: BookOrder::new(
                    Price::from_raw(*price_raw, 2).unwrap(),
                    Quantity::from_raw(*size_raw, 0).unwrap(),
                    OrderSide::Buy,
                    *order_id,
                ),
                ts_event: i as u64,
            })
            .unwrap();
            prop_assert!(book.check_integrity());
        }

        // Delete every order id that could have been registered; no level
        // or cache entry may survive.
        for order_id in 1_u64..50 {
            book.apply(&BookDelta {
                instrument_id,
                action: BookAction::Delete,
                order: BookOrder::new(
                    Price::from_raw(1, 2).unwrap(),
                    Quantity::zero(0),
                    OrderSide::Buy,
                    order_id,
                ),
                ts_event: 10_000,
            })
            .unwrap();
        }
        prop_assert!(book.best_bid().is_none());
        prop_assert!(book.check_integrity());
    }

    /// Quantity arithmetic rescales to the larger precision and never
    /// changes the semantic sum.
    #[test]
    fn prop_quantity_addition_rescales(
        a in 0_u64..1_000_000,
        b in 0_u64..1_000_000,
        precision_a in 0_u8..=4,
        precision_b in 0_u8..=4,
    ) {
        let lhs = Quantity::from_raw(a, precision_a).unwrap();
        let rhs = Quantity::from_raw(b, precision_b).unwrap();
        let sum = lhs.checked_add(rhs).unwrap();
        prop_assert_eq!(sum.precision, precision_a.max(precision_b));
        let expected = a as u128 * 10_u128.pow(u32::from(sum.precision - precision_a))
            + b as u128 * 10_u128.pow(u32::from(sum.precision - precision_b));
        prop_assert_eq!(u128::from(sum.raw), expected);
    }
}
