//! Level: A FIFO queue of orders at a single price point.
//!
//! Orders live in the book's `Slab<Node>` arena. A level only stores the
//! head and tail keys of an intrusive doubly linked list threaded through
//! the nodes, so any order located via the id index can be unlinked in O(1).

use slab::Slab;

use crate::{Order, Price, Quantity};

/// Key of an order's node in the arena.
pub(crate) type OrderKey = usize;

/// Arena node: the owned order plus its neighbours at the same price.
#[derive(Clone, Debug)]
pub(crate) struct Node {
    pub(crate) order: Order,
    prev: Option<OrderKey>,
    next: Option<OrderKey>,
}

impl Node {
    pub(crate) fn new(order: Order) -> Self {
        Self {
            order,
            prev: None,
            next: None,
        }
    }
}

/// A queue of orders at a single price level.
#[derive(Clone, Debug)]
pub(crate) struct Level {
    price: Price,
    head: Option<OrderKey>,
    tail: Option<OrderKey>,
    len: usize,
}

impl Level {
    pub(crate) fn new(price: Price) -> Self {
        Self {
            price,
            head: None,
            tail: None,
            len: 0,
        }
    }

    #[inline]
    pub(crate) fn price(&self) -> Price {
        self.price
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub(crate) fn order_count(&self) -> usize {
        self.len
    }

    /// Key of the oldest order (next to fill).
    #[inline]
    pub(crate) fn front(&self) -> Option<OrderKey> {
        self.head
    }

    /// Link an already-inserted node at the back of the queue.
    pub(crate) fn push_back(&mut self, key: OrderKey, nodes: &mut Slab<Node>) {
        let prev_tail = self.tail;
        if let Some(tail) = prev_tail {
            nodes[tail].next = Some(key);
        }
        let node = &mut nodes[key];
        node.prev = prev_tail;
        node.next = None;

        if prev_tail.is_none() {
            self.head = Some(key);
        }
        self.tail = Some(key);
        self.len += 1;
    }

    /// Detach a node from anywhere in the queue. The node stays in the arena;
    /// removing it there is the caller's job.
    pub(crate) fn unlink(&mut self, key: OrderKey, nodes: &mut Slab<Node>) {
        let (prev, next) = {
            let node = &nodes[key];
            (node.prev, node.next)
        };
        match prev {
            Some(p) => nodes[p].next = next,
            None => self.head = next,
        }
        match next {
            Some(n) => nodes[n].prev = prev,
            None => self.tail = prev,
        }
        let node = &mut nodes[key];
        node.prev = None;
        node.next = None;
        self.len -= 1;
    }

    /// Orders in FIFO order.
    pub(crate) fn iter<'a>(&self, nodes: &'a Slab<Node>) -> LevelIter<'a> {
        LevelIter {
            nodes,
            cursor: self.head,
        }
    }

    /// Sum of remaining quantity across the level, recomputed on every call.
    /// Saturates at `Quantity::MAX`.
    pub(crate) fn total_quantity(&self, nodes: &Slab<Node>) -> Quantity {
        self.iter(nodes)
            .map(Order::remaining_quantity)
            .fold(0, Quantity::saturating_add)
    }
}

/// Walks a level from head to tail.
pub(crate) struct LevelIter<'a> {
    nodes: &'a Slab<Node>,
    cursor: Option<OrderKey>,
}

impl<'a> Iterator for LevelIter<'a> {
    type Item = &'a Order;

    fn next(&mut self) -> Option<Self::Item> {
        let key = self.cursor?;
        let nodes = self.nodes;
        let node = &nodes[key];
        self.cursor = node.next;
        Some(&node.order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{OrderId, OrderType, Side};

    fn push(level: &mut Level, nodes: &mut Slab<Node>, id: u64, qty: Quantity) -> OrderKey {
        let order = Order::new(
            OrderType::GoodTillCancel,
            OrderId(id),
            Side::Buy,
            level.price(),
            qty,
        );
        let key = nodes.insert(Node::new(order));
        level.push_back(key, nodes);
        key
    }

    fn ids(level: &Level, nodes: &Slab<Node>) -> Vec<u64> {
        level.iter(nodes).map(|o| o.id().0).collect()
    }

    #[test]
    fn new_level_is_empty() {
        let nodes = Slab::new();
        let level = Level::new(Price(100_00));

        assert!(level.is_empty());
        assert_eq!(level.order_count(), 0);
        assert_eq!(level.front(), None);
        assert_eq!(level.total_quantity(&nodes), 0);
        assert_eq!(level.price(), Price(100_00));
    }

    #[test]
    fn push_back_keeps_fifo_order() {
        let mut nodes = Slab::new();
        let mut level = Level::new(Price(100_00));

        let first = push(&mut level, &mut nodes, 1, 100);
        push(&mut level, &mut nodes, 2, 200);
        push(&mut level, &mut nodes, 3, 150);

        assert_eq!(level.order_count(), 3);
        assert_eq!(level.front(), Some(first));
        assert_eq!(ids(&level, &nodes), vec![1, 2, 3]);
        assert_eq!(level.total_quantity(&nodes), 450);
    }

    #[test]
    fn unlink_from_middle() {
        let mut nodes = Slab::new();
        let mut level = Level::new(Price(100_00));
        push(&mut level, &mut nodes, 1, 100);
        let middle = push(&mut level, &mut nodes, 2, 200);
        push(&mut level, &mut nodes, 3, 150);

        level.unlink(middle, &mut nodes);
        nodes.remove(middle);

        assert_eq!(level.order_count(), 2);
        assert_eq!(ids(&level, &nodes), vec![1, 3]);
        assert_eq!(level.total_quantity(&nodes), 250);
    }

    #[test]
    fn unlink_front_and_back() {
        let mut nodes = Slab::new();
        let mut level = Level::new(Price(100_00));
        let front = push(&mut level, &mut nodes, 1, 100);
        push(&mut level, &mut nodes, 2, 200);
        let back = push(&mut level, &mut nodes, 3, 300);

        level.unlink(front, &mut nodes);
        assert_eq!(ids(&level, &nodes), vec![2, 3]);

        level.unlink(back, &mut nodes);
        assert_eq!(ids(&level, &nodes), vec![2]);

        // Tail was repaired: new orders land after 2
        push(&mut level, &mut nodes, 4, 10);
        assert_eq!(ids(&level, &nodes), vec![2, 4]);
    }

    #[test]
    fn unlink_last_order_empties_level() {
        let mut nodes = Slab::new();
        let mut level = Level::new(Price(100_00));
        let only = push(&mut level, &mut nodes, 1, 100);

        level.unlink(only, &mut nodes);

        assert!(level.is_empty());
        assert_eq!(level.front(), None);
        assert_eq!(level.iter(&nodes).count(), 0);
    }

    #[test]
    fn total_quantity_tracks_fills() {
        let mut nodes = Slab::new();
        let mut level = Level::new(Price(100_00));
        let key = push(&mut level, &mut nodes, 1, 100);
        push(&mut level, &mut nodes, 2, 200);

        nodes[key].order.fill(30).unwrap();

        assert_eq!(level.total_quantity(&nodes), 270);
        assert_eq!(level.order_count(), 2);
    }
}
