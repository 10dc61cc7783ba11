//! PriceLevels: One side of the order book (bids or asks).
//!
//! Maintains a sorted collection of price levels with cached best price
//! for O(1) best bid/offer queries.

use std::collections::BTreeMap;

use slab::Slab;

use crate::level::{Level, Node, OrderKey};
use crate::{Price, Side};

/// One side of the order book (all bids or all asks).
///
/// - **Bids**: best = highest price
/// - **Asks**: best = lowest price
///
/// Invariant: every level in the map holds at least one order.
#[derive(Clone, Debug)]
pub(crate) struct PriceLevels {
    levels: BTreeMap<Price, Level>,
    /// Cached best price for O(1) access
    best_price: Option<Price>,
    side: Side,
}

impl PriceLevels {
    pub(crate) fn new(side: Side) -> Self {
        Self {
            levels: BTreeMap::new(),
            best_price: None,
            side,
        }
    }

    /// Number of distinct price levels.
    #[inline]
    pub(crate) fn level_count(&self) -> usize {
        self.levels.len()
    }

    /// Highest bid or lowest ask.
    #[inline]
    pub(crate) fn best_price(&self) -> Option<Price> {
        self.best_price
    }

    pub(crate) fn best_level(&self) -> Option<&Level> {
        self.best_price.and_then(|p| self.levels.get(&p))
    }

    /// Link an arena node at the back of the level for `price`, creating the
    /// level if needed.
    pub(crate) fn insert(&mut self, price: Price, key: OrderKey, nodes: &mut Slab<Node>) {
        if !self.levels.contains_key(&price) {
            self.update_best_price_after_insert(price);
        }
        self.levels
            .entry(price)
            .or_insert_with(|| Level::new(price))
            .push_back(key, nodes);
    }

    /// Unlink a node from the level for `price`.
    ///
    /// Drops the level if it becomes empty. Returns `false` if no level
    /// exists at that price.
    pub(crate) fn remove(&mut self, price: Price, key: OrderKey, nodes: &mut Slab<Node>) -> bool {
        let Some(level) = self.levels.get_mut(&price) else {
            return false;
        };
        level.unlink(key, nodes);
        if level.is_empty() {
            self.remove_level(price);
        }
        true
    }

    /// Remove a price level entirely, updating the best price cache.
    pub(crate) fn remove_level(&mut self, price: Price) {
        if self.levels.remove(&price).is_some() && self.best_price == Some(price) {
            self.recompute_best_price();
        }
    }

    /// Levels from best to worst price.
    pub(crate) fn iter_best_to_worst(&self) -> BestToWorst<'_> {
        match self.side {
            Side::Buy => BestToWorst::Descending(self.levels.values().rev()),
            Side::Sell => BestToWorst::Ascending(self.levels.values()),
        }
    }

    fn recompute_best_price(&mut self) {
        self.best_price = match self.side {
            Side::Buy => self.levels.keys().next_back().copied(),
            Side::Sell => self.levels.keys().next().copied(),
        };
    }

    fn update_best_price_after_insert(&mut self, new_price: Price) {
        let is_better = match self.best_price {
            None => true,
            Some(current) => match self.side {
                Side::Buy => new_price > current,
                Side::Sell => new_price < current,
            },
        };
        if is_better {
            self.best_price = Some(new_price);
        }
    }
}

type Values<'a> = std::collections::btree_map::Values<'a, Price, Level>;

/// Iterator that yields levels from best to worst price.
pub(crate) enum BestToWorst<'a> {
    Ascending(Values<'a>),
    Descending(std::iter::Rev<Values<'a>>),
}

impl<'a> Iterator for BestToWorst<'a> {
    type Item = &'a Level;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            BestToWorst::Ascending(iter) => iter.next(),
            BestToWorst::Descending(iter) => iter.next(),
        }
    }
}
