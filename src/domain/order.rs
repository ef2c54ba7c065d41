/// 订单实体
///
/// 除 `active` 标志外全部不可变。`active` 只能通过 CAS 从 true 变为 false，
/// 保证并发撮合时同一订单最多被一个撮合线程认领。

use crate::shared::protocol::{OrderType, TickerId};
use std::sync::atomic::{AtomicBool, Ordering};

/// 订单生命周期状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderState {
    Active,
    Matched,
}

#[derive(Debug)]
pub struct Order {
    order_type: OrderType,
    ticker: TickerId,
    quantity: u64,
    price: f64,
    active: AtomicBool,
}

impl Order {
    pub fn new(order_type: OrderType, ticker: TickerId, quantity: u64, price: f64) -> Self {
        Self {
            order_type,
            ticker,
            quantity,
            price,
            active: AtomicBool::new(true),
        }
    }

    #[inline]
    pub fn order_type(&self) -> OrderType {
        self.order_type
    }

    #[inline]
    pub fn ticker(&self) -> TickerId {
        self.ticker
    }

    #[inline]
    pub fn quantity(&self) -> u64 {
        self.quantity
    }

    #[inline]
    pub fn price(&self) -> f64 {
        self.price
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    pub fn state(&self) -> OrderState {
        if self.is_active() {
            OrderState::Active
        } else {
            OrderState::Matched
        }
    }

    /// 尝试认领订单：仅当此刻仍为活跃时成功
    #[inline]
    pub(crate) fn try_claim(&self) -> bool {
        self.active
            .compare_exchange(true, false, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    /// 撤销本线程刚刚完成的认领
    ///
    /// 只能由 `try_claim` 成功的同一调用方调用，且在结算失败时调用。
    #[inline]
    pub(crate) fn release(&self) {
        let restored = self
            .active
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire);
        debug_assert!(restored.is_ok(), "released an order that was not claimed");
    }

    /// 只读快照，用于测试和报告
    pub fn snapshot(&self) -> OrderSnapshot {
        OrderSnapshot {
            order_type: self.order_type,
            ticker: self.ticker,
            quantity: self.quantity,
            price: self.price,
            active: self.is_active(),
        }
    }
}

/// 订单在某一时刻的拷贝
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrderSnapshot {
    pub order_type: OrderType,
    pub ticker: TickerId,
    pub quantity: u64,
    pub price: f64,
    pub active: bool,
}
