/// 定长订单槽位 - 单边订单簿的存储
///
/// 核心设计：
/// 1. 预分配 `capacity` 个槽位，运行期不扩容、不回收
/// 2. 每个槽位是 `OnceLock<Order>`，未填充/已填充状态显式可见
/// 3. 写入由每边一把 `parking_lot::Mutex` 串行化（读count、写订单、推进count 为同一临界区）
/// 4. `count` 用 Release 发布、Acquire 读取：读到新 count 的线程一定能看到完整订单
/// 5. 撮合扫描无需加锁

use crate::domain::order::Order;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::OnceLock;

pub struct OrderSlots {
    slots: Box<[OnceLock<Order>]>,
    /// 已发布的槽位数（高水位线），只增不减
    count: AtomicUsize,
    /// 写入临界区
    write_lock: Mutex<()>,
}

impl OrderSlots {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: (0..capacity).map(|_| OnceLock::new()).collect(),
            count: AtomicUsize::new(0),
            write_lock: Mutex::new(()),
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.count.load(Ordering::Acquire)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.len() == self.capacity()
    }

    /// 追加订单，返回槽位下标；已满时原样退回订单
    pub fn push(&self, order: Order) -> Result<usize, Order> {
        let _guard = self.write_lock.lock();

        // 只有持锁线程会修改 count
        let index = self.count.load(Ordering::Relaxed);
        if index == self.capacity() {
            return Err(order);
        }

        let stored = self.slots[index].set(order);
        debug_assert!(stored.is_ok(), "slot {} populated twice", index);

        // 先写订单，再发布 count
        self.count.store(index + 1, Ordering::Release);
        Ok(index)
    }

    /// 已发布槽位中的订单
    #[inline]
    pub fn get(&self, index: usize) -> Option<&Order> {
        if index >= self.len() {
            return None;
        }
        self.slots[index].get()
    }

    /// 按插入顺序遍历此刻已发布的订单，附带下标
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Order)> {
        let published = self.len();
        self.slots[..published]
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| slot.get().map(|order| (index, order)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::protocol::OrderType;
    use std::sync::Arc;
    use std::thread;

    fn order(price: f64) -> Order {
        Order::new(OrderType::Buy, 0, 1, price)
    }

    #[test]
    fn test_push_until_full() {
        let slots = OrderSlots::with_capacity(2);
        assert!(slots.is_empty());
        assert_eq!(slots.push(order(1.0)).ok(), Some(0));
        assert_eq!(slots.push(order(2.0)).ok(), Some(1));
        assert!(slots.is_full());

        let rejected = slots.push(order(3.0)).unwrap_err();
        assert_eq!(rejected.price(), 3.0);
        assert_eq!(slots.len(), 2);
        assert!(slots.get(2).is_none());
    }

    #[test]
    fn test_iter_in_insertion_order() {
        let slots = OrderSlots::with_capacity(4);
        for price in [3.0, 1.0, 2.0] {
            slots.push(order(price)).unwrap();
        }
        let prices: Vec<f64> = slots.iter().map(|(_, o)| o.price()).collect();
        assert_eq!(prices, vec![3.0, 1.0, 2.0]);
    }

    #[test]
    fn test_concurrent_push_no_lost_updates() {
        let slots = Arc::new(OrderSlots::with_capacity(800));
        let handles: Vec<_> = (0..8)
            .map(|t| {
                let slots = slots.clone();
                thread::spawn(move || {
                    for i in 0..100 {
                        slots.push(order((t * 100 + i + 1) as f64)).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(slots.len(), 800);
        let mut prices: Vec<u64> = slots.iter().map(|(_, o)| o.price() as u64).collect();
        prices.sort_unstable();
        prices.dedup();
        assert_eq!(prices.len(), 800);
    }
}
