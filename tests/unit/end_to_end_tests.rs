//! End-to-end scenarios over the public API.

use tradecore_rs::prelude::*;
use uuid::Uuid;

fn client_order_id() -> ClientOrderId {
    ClientOrderId::new("O-19700101-100").unwrap()
}

#[test]
fn test_market_buy_order_full_lifecycle() {
    // Initialize a market-buy order for quantity 10 at precision 0.
    let mut order = Order::Market(
        MarketOrder::new(
            TraderId::new("TRADER-001").unwrap(),
            StrategyId::new("EMA-CROSS-001").unwrap(),
            "BTCUSDT.BINANCE".parse::<InstrumentId>().unwrap(),
            client_order_id(),
            OrderSide::Buy,
            Quantity::from_raw(10, 0).unwrap(),
            TimeInForce::Gtc,
            Uuid::new_v4(),
            0,
        )
        .unwrap(),
    );
    assert_eq!(order.status(), OrderStatus::Initialized);

    order
        .apply(&OrderEvent::Submitted(OrderSubmitted {
            client_order_id: client_order_id(),
            account_id: AccountId::new("SIM-001").unwrap(),
            event_id: Uuid::new_v4(),
            ts_event: 1,
        }))
        .unwrap();
    assert_eq!(order.status(), OrderStatus::Submitted);

    order
        .apply(&OrderEvent::Accepted(OrderAccepted {
            client_order_id: client_order_id(),
            venue_order_id: VenueOrderId::new("V-001").unwrap(),
            account_id: AccountId::new("SIM-001").unwrap(),
            event_id: Uuid::new_v4(),
            ts_event: 2,
        }))
        .unwrap();
    assert_eq!(order.status(), OrderStatus::Accepted);

    // Two fills at precision 2: 4 @ 100.00 then 6 @ 101.00.
    let fill = |execution_id: &str, last_qty: u64, last_px_raw: i64, ts_event: u64| {
        OrderEvent::Filled(OrderFilled {
            client_order_id: client_order_id(),
            venue_order_id: VenueOrderId::new("V-001").unwrap(),
            position_id: None,
            execution_id: ExecutionId::new(execution_id).unwrap(),
            last_qty: Quantity::from_raw(last_qty, 0).unwrap(),
            last_px: Price::from_raw(last_px_raw, 2).unwrap(),
            commission: None,
            liquidity_side: LiquiditySide::Taker,
            event_id: Uuid::new_v4(),
            ts_event,
        })
    };

    order.apply(&fill("E-1", 4, 10_000, 3)).unwrap();
    assert_eq!(order.status(), OrderStatus::PartiallyFilled);

    order.apply(&fill("E-2", 6, 10_100, 4)).unwrap();
    assert_eq!(order.status(), OrderStatus::Filled);
    assert!(order.is_closed());
    assert_eq!(order.filled_qty(), Quantity::from_raw(10, 0).unwrap());

    // avg_px = (4 * 100 + 6 * 101) / 10 = 100.60
    let avg_px = order.avg_px().unwrap();
    assert_eq!(avg_px, "100.60".parse::<Price>().unwrap());
    assert!((avg_px.as_f64() - 100.60).abs() < 1e-9);
    assert_eq!(order.execution_ids().len(), 2);
}

#[test]
fn test_l2_book_from_empty_to_top_of_book() {
    // Create an empty L2 order book for instrument X.
    let instrument_id: InstrumentId = "X.SIM".parse().unwrap();
    let mut book = OrderBook::new(instrument_id, BookLevel::L2Mbp);

    let delta = |action: BookAction, side: OrderSide, price: &str, size: &str, ts_event: u64| {
        BookDelta {
            instrument_id,
            action,
            order: BookOrder::new(price.parse().unwrap(), size.parse().unwrap(), side, 0),
            ts_event,
        }
    };

    book.apply(&delta(BookAction::Add, OrderSide::Buy, "10.05", "100", 1))
        .unwrap();
    book.apply(&delta(BookAction::Add, OrderSide::Buy, "10.06", "50", 2))
        .unwrap();
    book.apply(&delta(BookAction::Add, OrderSide::Sell, "10.07", "80", 3))
        .unwrap();

    let (bid_px, bid_size) = book.best_bid().unwrap();
    assert_eq!(bid_px, "10.06".parse::<Price>().unwrap());
    assert_eq!(bid_size, "50".parse::<Quantity>().unwrap());

    let (ask_px, ask_size) = book.best_ask().unwrap();
    assert_eq!(ask_px, "10.07".parse::<Price>().unwrap());
    assert_eq!(ask_size, "80".parse::<Quantity>().unwrap());

    assert_eq!(book.spread().unwrap(), "0.01".parse::<Price>().unwrap());
    assert!(book.check_integrity());
}

#[test]
fn test_limit_order_feeds_exact_money_accounting() {
    // A filled limit order's notional computed in exact money with no
    // float round-tripping.
    let usd = Currency::from_code("USD").unwrap();
    let mut order = Order::Limit(
        LimitOrder::new(
            TraderId::new("TRADER-001").unwrap(),
            StrategyId::new("S-001").unwrap(),
            "AAPL.XNAS".parse::<InstrumentId>().unwrap(),
            client_order_id(),
            OrderSide::Buy,
            Quantity::from_raw(100, 0).unwrap(),
            "150.25".parse::<Price>().unwrap(),
            TimeInForce::Day,
            None,
            OrderOptions::empty(),
            Uuid::new_v4(),
            0,
        )
        .unwrap(),
    );
    order
        .apply(&OrderEvent::Submitted(OrderSubmitted {
            client_order_id: client_order_id(),
            account_id: AccountId::new("IB-001").unwrap(),
            event_id: Uuid::new_v4(),
            ts_event: 1,
        }))
        .unwrap();
    order
        .apply(&OrderEvent::Accepted(OrderAccepted {
            client_order_id: client_order_id(),
            venue_order_id: VenueOrderId::new("V-9").unwrap(),
            account_id: AccountId::new("IB-001").unwrap(),
            event_id: Uuid::new_v4(),
            ts_event: 2,
        }))
        .unwrap();
    order
        .apply(&OrderEvent::Filled(OrderFilled {
            client_order_id: client_order_id(),
            venue_order_id: VenueOrderId::new("V-9").unwrap(),
            position_id: None,
            execution_id: ExecutionId::new("E-77").unwrap(),
            last_qty: Quantity::from_raw(100, 0).unwrap(),
            last_px: "150.20".parse::<Price>().unwrap(),
            commission: Some(Money::from_raw(135, usd)), // 1.35 USD
            liquidity_side: LiquiditySide::Maker,
            event_id: Uuid::new_v4(),
            ts_event: 3,
        }))
        .unwrap();

    assert_eq!(order.status(), OrderStatus::Filled);
    // Buy below the limit: negative slippage (price improvement).
    assert!((order.slippage() + 0.05).abs() < 1e-9);

    // 100 * 150.20 = 15_020.00 USD, exact in raw money.
    let avg_px = order.avg_px().unwrap();
    let notional_raw = (avg_px.raw as i128 * 100) / 10_000_000; // to USD precision 2
    let notional = Money::from_raw(notional_raw as i64, usd);
    assert_eq!(notional, "15020.00 USD".parse::<Money>().unwrap());

    let mut total_cost = notional;
    total_cost
        .add_assign(Money::from_raw(135, usd))
        .unwrap();
    assert_eq!(total_cost.to_string(), "15021.35 USD");
}
