/// 股票注册表：按编号直接索引的定长订单簿数组
///
/// 启动时一次性创建全部订单簿，之后只读；越界编号在访问数组之前被拒绝。

use crate::domain::orderbook::OrderBook;
use crate::shared::error::EngineError;
use crate::shared::protocol::TickerId;

pub struct TickerRegistry {
    books: Box<[OrderBook]>,
}

impl TickerRegistry {
    pub fn new(max_tickers: usize, max_orders_per_side: usize) -> Self {
        Self {
            books: (0..max_tickers)
                .map(|_| OrderBook::new(max_orders_per_side))
                .collect(),
        }
    }

    #[inline]
    pub fn max_tickers(&self) -> usize {
        self.books.len()
    }

    /// 按编号查找订单簿
    #[inline]
    pub fn lookup(&self, ticker: TickerId) -> Result<&OrderBook, EngineError> {
        usize::try_from(ticker)
            .ok()
            .and_then(|index| self.books.get(index))
            .ok_or(EngineError::InvalidTicker {
                ticker,
                max_tickers: self.books.len(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_bounds() {
        let registry = TickerRegistry::new(8, 2);
        assert_eq!(registry.max_tickers(), 8);
        assert!(registry.lookup(0).is_ok());
        assert!(registry.lookup(7).is_ok());

        for ticker in [-1, 8, i64::MAX, i64::MIN] {
            assert_eq!(
                registry.lookup(ticker).err(),
                Some(EngineError::InvalidTicker { ticker, max_tickers: 8 })
            );
        }
    }

    #[test]
    fn test_books_are_distinct() {
        let registry = TickerRegistry::new(2, 2);
        let a = registry.lookup(0).unwrap() as *const OrderBook;
        let b = registry.lookup(1).unwrap() as *const OrderBook;
        assert_ne!(a, b);
    }
}
