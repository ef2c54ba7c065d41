/// 单个股票的订单簿：买卖两侧各一组定长槽位
///
/// 订单只追加、不删除；成交后的订单通过 `active=false` 逻辑退役。

use super::slots::OrderSlots;
use crate::domain::order::{Order, OrderSnapshot};
use crate::shared::protocol::OrderType;

pub struct OrderBook {
    buy_slots: OrderSlots,
    sell_slots: OrderSlots,
}

impl OrderBook {
    pub fn new(capacity_per_side: usize) -> Self {
        Self {
            buy_slots: OrderSlots::with_capacity(capacity_per_side),
            sell_slots: OrderSlots::with_capacity(capacity_per_side),
        }
    }

    #[inline]
    pub fn side(&self, order_type: OrderType) -> &OrderSlots {
        match order_type {
            OrderType::Buy => &self.buy_slots,
            OrderType::Sell => &self.sell_slots,
        }
    }

    #[inline]
    pub fn buys(&self) -> &OrderSlots {
        &self.buy_slots
    }

    #[inline]
    pub fn sells(&self) -> &OrderSlots {
        &self.sell_slots
    }

    /// 将订单追加到对应一侧，返回槽位下标；该侧已满时退回订单
    pub fn insert(&self, order: Order) -> Result<usize, Order> {
        self.side(order.order_type()).push(order)
    }

    pub fn count(&self, order_type: OrderType) -> usize {
        self.side(order_type).len()
    }

    pub fn capacity(&self) -> usize {
        self.buy_slots.capacity()
    }

    pub fn snapshot(&self, order_type: OrderType, index: usize) -> Option<OrderSnapshot> {
        self.side(order_type).get(index).map(Order::snapshot)
    }

    /// 某一侧此刻仍活跃的订单数
    pub fn active_count(&self, order_type: OrderType) -> usize {
        self.side(order_type)
            .iter()
            .filter(|(_, order)| order.is_active())
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_routes_by_side() {
        let book = OrderBook::new(4);
        assert_eq!(book.insert(Order::new(OrderType::Buy, 1, 5, 10.0)).ok(), Some(0));
        assert_eq!(book.insert(Order::new(OrderType::Sell, 1, 6, 11.0)).ok(), Some(0));
        assert_eq!(book.insert(Order::new(OrderType::Sell, 1, 7, 12.0)).ok(), Some(1));

        assert_eq!(book.count(OrderType::Buy), 1);
        assert_eq!(book.count(OrderType::Sell), 2);
        assert_eq!(book.capacity(), 4);

        let snap = book.snapshot(OrderType::Sell, 1).unwrap();
        assert_eq!(snap.quantity, 7);
        assert_eq!(snap.price, 12.0);
        assert!(snap.active);
    }

    #[test]
    fn test_sides_fill_independently() {
        let book = OrderBook::new(1);
        assert!(book.insert(Order::new(OrderType::Buy, 0, 1, 1.0)).is_ok());
        assert!(book.insert(Order::new(OrderType::Buy, 0, 1, 1.0)).is_err());
        assert!(book.insert(Order::new(OrderType::Sell, 0, 1, 1.0)).is_ok());
        assert_eq!(book.active_count(OrderType::Buy), 1);
    }
}
