/// 撮合算法：最优卖价 + 首个合格买单，每次调用至多成交一对
///
/// ## Matching Logic
/// - 卖方：在活跃卖单中选价格严格最低者，同价取最早插入（下标最小）
/// - 买方：按插入顺序找第一个活跃且 `price >= 最优卖价` 的买单
/// - 结算：先 CAS 认领买单，再 CAS 认领卖单；卖单已被其他线程成交时
///   回滚买单，并对下一个最低卖单重新撮合
///
/// 数量只做回报，不做部分成交。

use crate::domain::order::Order;
use crate::domain::orderbook::{OrderBook, OrderSlots};
use crate::shared::protocol::{MatchOutcome, MatchReport, NoMatchReason, TickerId};

/// 单次结算尝试的结果
enum Settlement {
    Committed { buy_index: usize, buy_price: f64, quantity: u64 },
    NoEligibleBuy,
    /// 卖单在认领前被其他撮合线程成交
    SellTaken,
}

/// 此刻最低价的活跃卖单 `(下标, 价格)`
pub fn best_sell(book: &OrderBook) -> Option<(usize, f64)> {
    lowest_active_sell(book.sells()).map(|(index, order)| (index, order.price()))
}

fn lowest_active_sell(sells: &OrderSlots) -> Option<(usize, &Order)> {
    let mut best: Option<(usize, &Order)> = None;
    for (index, order) in sells.iter() {
        if !order.is_active() {
            continue;
        }
        // 严格小于：同价保留先插入的
        match best {
            Some((_, current)) if order.price() >= current.price() => {}
            _ => best = Some((index, order)),
        }
    }
    best
}

fn settle(buys: &OrderSlots, sell: &Order) -> Settlement {
    let sell_price = sell.price();

    for (buy_index, buy) in buys.iter() {
        if !buy.is_active() || buy.price() < sell_price {
            continue;
        }

        // 买单被并发撮合抢走，继续找下一个
        if !buy.try_claim() {
            continue;
        }

        if sell.try_claim() {
            return Settlement::Committed {
                buy_index,
                buy_price: buy.price(),
                quantity: buy.quantity(),
            };
        }

        buy.release();
        return Settlement::SellTaken;
    }

    Settlement::NoEligibleBuy
}

/// 对一个订单簿执行一次撮合
///
/// 卖单只会从活跃变为已成交，每次重试都意味着有一个卖单永久退出，
/// 因此循环次数不超过卖方槽位数。
pub fn match_once(book: &OrderBook, ticker: TickerId) -> MatchOutcome {
    loop {
        let Some((sell_index, sell)) = lowest_active_sell(book.sells()) else {
            return MatchOutcome::NoMatch(NoMatchReason::NoActiveSell);
        };

        match settle(book.buys(), sell) {
            Settlement::Committed { buy_index, buy_price, quantity } => {
                return MatchOutcome::Matched(MatchReport {
                    ticker,
                    buy_price,
                    sell_price: sell.price(),
                    quantity,
                    buy_index,
                    sell_index,
                });
            }
            Settlement::NoEligibleBuy => {
                return MatchOutcome::NoMatch(NoMatchReason::NoEligibleBuy);
            }
            Settlement::SellTaken => {
                tracing::debug!(ticker, sell_index, "sell order taken by a concurrent match, buy claim rolled back");
            }
        }
    }
}
