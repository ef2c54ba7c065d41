/// 撮合引擎：持有全部订单簿的上下文对象
///
/// 启动时构造一次，通过引用（跨线程时用 `Arc`）传给每个调用方；
/// 没有全局可变状态。两个操作都不阻塞等待其他操作，也不产生随机数。

use crate::domain::matching;
use crate::domain::order::{Order, OrderSnapshot};
use crate::domain::registry::TickerRegistry;
use crate::domain::validation::OrderValidator;
use crate::shared::error::{ConfigError, EngineError};
use crate::shared::protocol::{MatchOutcome, NewOrderRequest, OrderType, TickerId};
use serde::{Deserialize, Serialize};

/// 默认股票数量
pub const MAX_TICKERS: usize = 1024;

/// 默认每侧订单容量
pub const MAX_ORDERS_PER_SIDE: usize = 1024;

/// 引擎配置
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// 股票数量，合法编号为 `[0, max_tickers)`
    pub max_tickers: usize,

    /// 每个订单簿每一侧的槽位数
    pub max_orders_per_side: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_tickers: MAX_TICKERS,
            max_orders_per_side: MAX_ORDERS_PER_SIDE,
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_tickers == 0 {
            return Err(ConfigError::ZeroTickers);
        }
        if self.max_orders_per_side == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        Ok(())
    }
}

// 撮合引擎
pub struct MatchingEngine {
    config: EngineConfig,
    registry: TickerRegistry,
    validator: OrderValidator,
}

impl MatchingEngine {
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        tracing::debug!(
            max_tickers = config.max_tickers,
            max_orders_per_side = config.max_orders_per_side,
            "allocating order books"
        );
        Ok(Self {
            registry: TickerRegistry::new(config.max_tickers, config.max_orders_per_side),
            validator: OrderValidator::new(),
            config,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn registry(&self) -> &TickerRegistry {
        &self.registry
    }

    /// 下单：追加到对应股票、对应一侧的订单簿，返回槽位下标
    ///
    /// 任何错误都不修改状态；订单簿已满时订单直接丢弃，不排队不重试。
    pub fn add_order(
        &self,
        order_type: OrderType,
        ticker: TickerId,
        quantity: u64,
        price: f64,
    ) -> Result<usize, EngineError> {
        let book = self.registry.lookup(ticker)?;
        self.validator.validate(quantity, price)?;

        book.insert(Order::new(order_type, ticker, quantity, price))
            .map_err(|_rejected| {
                tracing::trace!(ticker, side = order_type.as_str(), "order book side full, order dropped");
                EngineError::OrderBookFull {
                    ticker,
                    side: order_type,
                    capacity: book.capacity(),
                }
            })
    }

    pub fn submit(&self, request: &NewOrderRequest) -> Result<usize, EngineError> {
        self.add_order(request.order_type, request.ticker, request.quantity, request.price)
    }

    /// 撮合：对一个股票至多成交一对买卖单
    pub fn match_order(&self, ticker: TickerId) -> Result<MatchOutcome, EngineError> {
        let book = self.registry.lookup(ticker)?;
        Ok(matching::match_once(book, ticker))
    }

    /// 静默模式下单：吞掉所有拒绝，只返回是否插入成功
    pub fn add_order_silent(&self, order_type: OrderType, ticker: TickerId, quantity: u64, price: f64) -> bool {
        self.add_order(order_type, ticker, quantity, price).is_ok()
    }

    /// 静默模式撮合：吞掉所有拒绝，只返回是否成交
    pub fn match_order_silent(&self, ticker: TickerId) -> bool {
        matches!(self.match_order(ticker), Ok(MatchOutcome::Matched(_)))
    }

    pub fn order_count(&self, order_type: OrderType, ticker: TickerId) -> Result<usize, EngineError> {
        Ok(self.registry.lookup(ticker)?.count(order_type))
    }

    pub fn order_snapshot(
        &self,
        order_type: OrderType,
        ticker: TickerId,
        index: usize,
    ) -> Result<Option<OrderSnapshot>, EngineError> {
        Ok(self.registry.lookup(ticker)?.snapshot(order_type, index))
    }

    /// 此刻最低价活跃卖单 `(下标, 价格)`
    pub fn best_sell(&self, ticker: TickerId) -> Result<Option<(usize, f64)>, EngineError> {
        Ok(matching::best_sell(self.registry.lookup(ticker)?))
    }
}
