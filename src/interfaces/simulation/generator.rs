//! Random order parameters for the load simulation.

use crate::shared::protocol::{NewOrderRequest, OrderType, TickerId};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::ops::{Range, RangeInclusive};

/// 随机订单参数生成器
///
/// 每个工作线程持有一个；给定种子时结果可复现。
pub struct OrderGenerator {
    rng: StdRng,
    max_tickers: usize,
    quantity_range: RangeInclusive<u64>,
    price_range: Range<f64>,
}

impl OrderGenerator {
    pub fn new(
        seed: Option<u64>,
        max_tickers: usize,
        quantity_range: RangeInclusive<u64>,
        price_range: Range<f64>,
    ) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            rng,
            max_tickers,
            quantity_range,
            price_range,
        }
    }

    /// 随机股票编号，范围 `[0, max_tickers)`
    pub fn ticker(&mut self) -> TickerId {
        self.rng.gen_range(0..self.max_tickers) as TickerId
    }

    pub fn order(&mut self) -> NewOrderRequest {
        let order_type = if self.rng.gen_bool(0.5) {
            OrderType::Buy
        } else {
            OrderType::Sell
        };

        NewOrderRequest {
            order_type,
            ticker: self.ticker(),
            quantity: self.rng.gen_range(self.quantity_range.clone()),
            price: self.rng.gen_range(self.price_range.clone()),
        }
    }
}
