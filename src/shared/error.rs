//! Error types shared by the core and the harness.

use crate::shared::protocol::{NoMatchReason, OrderType, TickerId};

/// Rejections produced by the two core operations.
///
/// All variants are local and non-fatal: the shared state is untouched
/// whenever one of them is returned.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EngineError {
    #[error("Invalid ticker {ticker}: valid range is [0, {max_tickers})")]
    InvalidTicker { ticker: TickerId, max_tickers: usize },

    #[error("Order book full: ticker {ticker} {side:?} side holds {capacity} orders")]
    OrderBookFull {
        ticker: TickerId,
        side: OrderType,
        capacity: usize,
    },

    #[error("No active counterparty for ticker {ticker}: {reason:?}")]
    NoActiveCounterparty { ticker: TickerId, reason: NoMatchReason },

    #[error("Invalid quantity: {0} (must be greater than zero)")]
    InvalidQuantity(u64),

    #[error("Invalid price: {0} (must be finite and greater than zero)")]
    InvalidPrice(f64),
}

impl EngineError {
    /// 指标标签
    pub fn label(&self) -> &'static str {
        match self {
            EngineError::InvalidTicker { .. } => "invalid_ticker",
            EngineError::OrderBookFull { .. } => "order_book_full",
            EngineError::NoActiveCounterparty { .. } => "no_active_counterparty",
            EngineError::InvalidQuantity(_) => "invalid_quantity",
            EngineError::InvalidPrice(_) => "invalid_price",
        }
    }
}

/// Configuration rejected before anything is constructed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("max_tickers must be greater than zero")]
    ZeroTickers,

    #[error("max_orders_per_side must be greater than zero")]
    ZeroCapacity,

    #[error("{0} must be greater than zero")]
    ZeroThreads(&'static str),

    #[error("Invalid {name} range: {detail}")]
    InvalidRange { name: &'static str, detail: String },
}
