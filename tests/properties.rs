//! Property-based tests for the matching laws, using `proptest`.

use proptest::prelude::*;
use std::collections::HashSet;
use ticker_matching_core::{EngineConfig, EngineError, MatchOutcome, MatchingEngine, OrderType};

const TICKERS: usize = 4;
const CAPACITY: usize = 32;
const FIRST_INVALID: i64 = TICKERS as i64;

#[derive(Debug, Clone)]
enum Op {
    Add { side: OrderType, ticker: i64, quantity: u64, price: f64 },
    Match { ticker: i64 },
}

fn side_strategy() -> impl Strategy<Value = OrderType> {
    prop_oneof![Just(OrderType::Buy), Just(OrderType::Sell)]
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (side_strategy(), 0..TICKERS as i64, 1u64..=100, 1u32..=200)
            .prop_map(|(side, ticker, quantity, cents)| Op::Add {
                side,
                ticker,
                quantity,
                price: cents as f64 / 2.0,
            }),
        1 => (0..TICKERS as i64).prop_map(|ticker| Op::Match { ticker }),
    ]
}

fn engine() -> MatchingEngine {
    MatchingEngine::new(EngineConfig { max_tickers: TICKERS, max_orders_per_side: CAPACITY }).unwrap()
}

/// 当前活跃卖单中的最低价及其最小下标
fn expected_best_sell(engine: &MatchingEngine, ticker: i64) -> Option<(usize, f64)> {
    let count = engine.order_count(OrderType::Sell, ticker).unwrap();
    let mut best: Option<(usize, f64)> = None;
    for index in 0..count {
        let order = engine.order_snapshot(OrderType::Sell, ticker, index).unwrap().unwrap();
        if order.active && best.map_or(true, |(_, price)| order.price < price) {
            best = Some((index, order.price));
        }
    }
    best
}

proptest! {
    #[test]
    fn matches_obey_safety_minimality_and_single_use(ops in prop::collection::vec(op_strategy(), 1..200)) {
        let engine = engine();
        let mut matched = HashSet::new();

        for op in ops {
            match op {
                Op::Add { side, ticker, quantity, price } => {
                    let before = engine.order_count(side, ticker).unwrap();
                    match engine.add_order(side, ticker, quantity, price) {
                        Ok(index) => {
                            prop_assert_eq!(index, before);
                            prop_assert_eq!(engine.order_count(side, ticker).unwrap(), before + 1);
                        }
                        Err(EngineError::OrderBookFull { .. }) => {
                            prop_assert_eq!(before, CAPACITY);
                            prop_assert_eq!(engine.order_count(side, ticker).unwrap(), CAPACITY);
                        }
                        Err(e) => prop_assert!(false, "unexpected error {}", e),
                    }
                }
                Op::Match { ticker } => {
                    let expected_sell = expected_best_sell(&engine, ticker);
                    match engine.match_order(ticker).unwrap() {
                        MatchOutcome::Matched(report) => {
                            prop_assert!(report.buy_price >= report.sell_price);
                            prop_assert_eq!(Some((report.sell_index, report.sell_price)), expected_sell);
                            prop_assert!(matched.insert((ticker, OrderType::Buy, report.buy_index)));
                            prop_assert!(matched.insert((ticker, OrderType::Sell, report.sell_index)));
                        }
                        MatchOutcome::NoMatch(_) => {
                            // 没有可成交的买单：每个活跃买单都低于最优卖价
                            if let Some((_, sell_price)) = expected_sell {
                                let buys = engine.order_count(OrderType::Buy, ticker).unwrap();
                                for index in 0..buys {
                                    let buy = engine.order_snapshot(OrderType::Buy, ticker, index).unwrap().unwrap();
                                    prop_assert!(!buy.active || buy.price < sell_price);
                                }
                            }
                        }
                    }
                }
            }
        }

        // 已成交标记与成交回报一一对应
        for ticker in 0..TICKERS as i64 {
            for side in [OrderType::Buy, OrderType::Sell] {
                for index in 0..engine.order_count(side, ticker).unwrap() {
                    let order = engine.order_snapshot(side, ticker, index).unwrap().unwrap();
                    prop_assert_eq!(!order.active, matched.contains(&(ticker, side, index)));
                }
            }
        }
    }

    #[test]
    fn out_of_range_tickers_are_rejected(
        ticker in prop_oneof![i64::MIN..0i64, FIRST_INVALID..i64::MAX],
        side in side_strategy(),
    ) {
        let engine = engine();
        let invalid = EngineError::InvalidTicker { ticker, max_tickers: TICKERS };
        prop_assert_eq!(engine.add_order(side, ticker, 1, 1.0), Err(invalid.clone()));
        prop_assert_eq!(engine.match_order(ticker), Err(invalid));
        for valid in 0..TICKERS as i64 {
            prop_assert_eq!(engine.order_count(side, valid).unwrap(), 0);
        }
    }
}
