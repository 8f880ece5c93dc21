//! Work orders handed off after a successful build or plant placement.
//!
//! The registry only constructs orders and passes them to an [`OrderQueue`].
//! It never tracks their completion.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::cells::CellId;

/// Labour category a cell's orders are filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum OrderCategory {
    /// Builders.
    #[default]
    Construction,
    /// Farmers.
    Agriculture,
    /// Home builders.
    Housing,
    /// Anyone idle.
    General,
}

/// Kind of deferred work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderKind {
    /// Turn a layout cell into its target building.
    Build,
    /// Plant a crop on a farmland cell.
    Plant,
}

/// A unit of deferred work targeting a placed cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// What to do.
    pub kind: OrderKind,
    /// Cell the work applies to.
    pub target: CellId,
    /// Labour category.
    pub category: OrderCategory,
}

impl Order {
    /// Create a new order.
    #[must_use]
    pub const fn new(kind: OrderKind, target: CellId, category: OrderCategory) -> Self {
        Self {
            kind,
            target,
            category,
        }
    }
}

/// Sink for orders. Fire-and-forget.
pub trait OrderQueue {
    /// Accept an order for later execution.
    fn enqueue(&mut self, order: Order);
}

/// FIFO order queue.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OrderBook {
    queue: VecDeque<Order>,
}

impl OrderBook {
    /// Create an empty order book.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of pending orders.
    #[must_use]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Check if no orders are pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Iterate over pending orders, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Order> {
        self.queue.iter()
    }

    /// Take the oldest pending order.
    pub fn pop_front(&mut self) -> Option<Order> {
        self.queue.pop_front()
    }

    /// Count pending orders of one kind.
    #[must_use]
    pub fn count_of(&self, kind: OrderKind) -> usize {
        self.queue.iter().filter(|order| order.kind == kind).count()
    }
}

impl OrderQueue for OrderBook {
    fn enqueue(&mut self, order: Order) {
        self.queue.push_back(order);
    }
}

impl OrderQueue for Vec<Order> {
    fn enqueue(&mut self, order: Order) {
        self.push(order);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_book_fifo() {
        let mut book = OrderBook::new();
        book.enqueue(Order::new(OrderKind::Build, 1, OrderCategory::Construction));
        book.enqueue(Order::new(OrderKind::Plant, 2, OrderCategory::Agriculture));
        book.enqueue(Order::new(OrderKind::Build, 3, OrderCategory::Housing));

        assert_eq!(book.len(), 3);
        assert_eq!(book.count_of(OrderKind::Build), 2);
        assert_eq!(book.count_of(OrderKind::Plant), 1);

        let first = book.pop_front().expect("order");
        assert_eq!(first.target, 1);
        assert_eq!(book.iter().map(|o| o.target).collect::<Vec<_>>(), vec![2, 3]);
    }

    #[test]
    fn test_empty_order_book() {
        let mut book = OrderBook::new();
        assert!(book.is_empty());
        assert_eq!(book.pop_front(), None);
    }
}
