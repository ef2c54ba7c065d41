use crate::shared::error::EngineError;
use serde::{Deserialize, Serialize};

/// 股票代码（整数编号），合法范围为 `[0, max_tickers)`
///
/// 使用有符号整数，负数编号可以被表示并在查找时被拒绝。
pub type TickerId = i64;

/// 订单方向，区分买单和卖单
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderType {
    Buy,
    Sell,
}

impl OrderType {
    /// 用于日志和指标标签的小写名称
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderType::Buy => "buy",
            OrderType::Sell => "sell",
        }
    }
}

/// 新订单请求，由调用方（压测工具或测试）构造
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NewOrderRequest {
    pub order_type: OrderType,
    pub ticker: TickerId,
    pub quantity: u64,
    pub price: f64,
}

impl NewOrderRequest {
    pub fn buy(ticker: TickerId, quantity: u64, price: f64) -> Self {
        Self { order_type: OrderType::Buy, ticker, quantity, price }
    }

    pub fn sell(ticker: TickerId, quantity: u64, price: f64) -> Self {
        Self { order_type: OrderType::Sell, ticker, quantity, price }
    }
}

/// 成交回报：一次撮合恰好产生一条
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchReport {
    pub ticker: TickerId,
    pub buy_price: f64,
    pub sell_price: f64,
    /// 买单的申报数量（不做部分成交）
    pub quantity: u64,
    /// 买单所在的槽位
    pub buy_index: usize,
    /// 卖单所在的槽位
    pub sell_index: usize,
}

/// 撮合未发生的原因
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoMatchReason {
    /// 卖方没有活跃订单
    NoActiveSell,
    /// 没有价格不低于最优卖价的活跃买单
    NoEligibleBuy,
}

/// `match_order` 的结果
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MatchOutcome {
    Matched(MatchReport),
    NoMatch(NoMatchReason),
}

impl MatchOutcome {
    pub fn is_matched(&self) -> bool {
        matches!(self, MatchOutcome::Matched(_))
    }

    pub fn report(&self) -> Option<&MatchReport> {
        match self {
            MatchOutcome::Matched(report) => Some(report),
            MatchOutcome::NoMatch(_) => None,
        }
    }

    /// Folds `NoMatch` into the error channel as `NoActiveCounterparty`.
    pub fn into_report(self, ticker: TickerId) -> Result<MatchReport, EngineError> {
        match self {
            MatchOutcome::Matched(report) => Ok(report),
            MatchOutcome::NoMatch(reason) => Err(EngineError::NoActiveCounterparty { ticker, reason }),
        }
    }
}
