//! Tests for the side-aware ladder and its order-key cache.

#[cfg(test)]
mod tests {
    use crate::book::{BookOrder, BookPrice, Ladder};
    use crate::enums::OrderSide;
    use crate::types::{Price, Quantity};

    fn order(price: &str, size: &str, side: OrderSide, order_id: u64) -> BookOrder {
        BookOrder::new(price.parse().unwrap(), size.parse().unwrap(), side, order_id)
    }

    #[test]
    fn test_bid_ladder_orders_descending() {
        let mut ladder = Ladder::new(OrderSide::Buy);
        ladder.add(order("10.05", "100", OrderSide::Buy, 1));
        ladder.add(order("10.07", "25", OrderSide::Buy, 2));
        ladder.add(order("10.06", "50", OrderSide::Buy, 3));

        let prices: Vec<Price> = ladder.levels().map(|level| level.price.value).collect();
        assert_eq!(
            prices,
            vec![
                "10.07".parse().unwrap(),
                "10.06".parse().unwrap(),
                "10.05".parse().unwrap(),
            ]
        );
        assert_eq!(ladder.top().unwrap().price.value, "10.07".parse().unwrap());
    }

    #[test]
    fn test_ask_ladder_orders_ascending() {
        let mut ladder = Ladder::new(OrderSide::Sell);
        ladder.add(order("10.09", "10", OrderSide::Sell, 1));
        ladder.add(order("10.07", "20", OrderSide::Sell, 2));
        ladder.add(order("10.08", "30", OrderSide::Sell, 3));

        assert_eq!(ladder.top().unwrap().price.value, "10.07".parse().unwrap());
        assert_eq!(ladder.len(), 3);
    }

    #[test]
    fn test_same_price_orders_keep_arrival_order() {
        let mut ladder = Ladder::new(OrderSide::Buy);
        ladder.add(order("10.05", "10", OrderSide::Buy, 1));
        ladder.add(order("10.05", "20", OrderSide::Buy, 2));
        ladder.add(order("10.05", "30", OrderSide::Buy, 3));

        let level = ladder.top().unwrap();
        let ids: Vec<u64> = level.orders().iter().map(|o| o.order_id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(level.size(), Quantity::from_raw(60, 0).unwrap());
        assert_eq!(ladder.len(), 1);
    }

    #[test]
    fn test_level_size_rescales_mixed_precision() {
        let mut ladder = Ladder::new(OrderSide::Sell);
        ladder.add(order("10.05", "1.5", OrderSide::Sell, 1));
        ladder.add(order("10.05", "2", OrderSide::Sell, 2));
        assert_eq!(
            ladder.top().unwrap().size(),
            Quantity::from_raw(35, 1).unwrap()
        );
    }

    #[test]
    fn test_update_in_place_keeps_queue_position() {
        let mut ladder = Ladder::new(OrderSide::Buy);
        ladder.add(order("10.05", "10", OrderSide::Buy, 1));
        ladder.add(order("10.05", "20", OrderSide::Buy, 2));

        ladder.update(order("10.05", "15", OrderSide::Buy, 1));
        let level = ladder.top().unwrap();
        assert_eq!(level.orders()[0].order_id, 1);
        assert_eq!(level.orders()[0].size, Quantity::from_raw(15, 0).unwrap());
        assert!(ladder.check_integrity());
    }

    #[test]
    fn test_update_with_price_move_relocates() {
        let mut ladder = Ladder::new(OrderSide::Buy);
        ladder.add(order("10.05", "10", OrderSide::Buy, 1));
        ladder.add(order("10.06", "20", OrderSide::Buy, 2));

        ladder.update(order("10.06", "10", OrderSide::Buy, 1));
        assert_eq!(ladder.len(), 1);
        let level = ladder.top().unwrap();
        // The relocated order joins the back of the queue at its new price.
        let ids: Vec<u64> = level.orders().iter().map(|o| o.order_id).collect();
        assert_eq!(ids, vec![2, 1]);
        assert!(ladder.check_integrity());
    }

    #[test]
    fn test_update_unknown_order_inserts() {
        let mut ladder = Ladder::new(OrderSide::Sell);
        ladder.update(order("10.07", "80", OrderSide::Sell, 7));
        assert_eq!(ladder.len(), 1);
        assert!(ladder.contains(7));
        assert!(ladder.check_integrity());
    }

    #[test]
    fn test_zero_size_update_deletes() {
        let mut ladder = Ladder::new(OrderSide::Sell);
        ladder.add(order("10.07", "80", OrderSide::Sell, 7));
        ladder.update(order("10.07", "0", OrderSide::Sell, 7));
        assert!(ladder.is_empty());
        assert!(!ladder.contains(7));
        assert!(ladder.check_integrity());
    }

    #[test]
    fn test_delete_last_order_removes_level_and_cache() {
        let mut ladder = Ladder::new(OrderSide::Buy);
        ladder.add(order("10.05", "10", OrderSide::Buy, 1));
        ladder.add(order("10.05", "20", OrderSide::Buy, 2));

        ladder.delete(1);
        assert_eq!(ladder.len(), 1);
        assert!(!ladder.contains(1));
        assert!(ladder.contains(2));

        ladder.delete(2);
        assert!(ladder.is_empty());
        assert!(!ladder.contains(2));
        assert!(ladder.check_integrity());
    }

    #[test]
    fn test_delete_unknown_order_is_noop() {
        let mut ladder = Ladder::new(OrderSide::Buy);
        ladder.add(order("10.05", "10", OrderSide::Buy, 1));
        ladder.delete(99);
        assert_eq!(ladder.len(), 1);
        assert!(ladder.check_integrity());
    }

    #[test]
    fn test_clear_drops_levels_and_cache() {
        let mut ladder = Ladder::new(OrderSide::Sell);
        ladder.add(order("10.07", "80", OrderSide::Sell, 1));
        ladder.add(order("10.08", "90", OrderSide::Sell, 2));
        ladder.clear();
        assert!(ladder.is_empty());
        assert!(!ladder.contains(1));
        assert!(ladder.order_size(2).is_none());
        assert!(ladder.check_integrity());
    }

    #[test]
    fn test_book_price_side_aware_ordering() {
        let lower = BookPrice::new("10.05".parse().unwrap(), OrderSide::Buy);
        let higher = BookPrice::new("10.06".parse().unwrap(), OrderSide::Buy);
        // Bid ordering is descending: the higher price sorts first.
        assert!(higher < lower);

        let lower = BookPrice::new("10.05".parse().unwrap(), OrderSide::Sell);
        let higher = BookPrice::new("10.06".parse().unwrap(), OrderSide::Sell);
        assert!(lower < higher);
    }
}
