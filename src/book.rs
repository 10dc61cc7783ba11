//! OrderBook: both sides of the book plus the arena that owns every order.
//!
//! This is the core data structure that combines:
//! - Bids (buy orders) sorted high → low
//! - Asks (sell orders) sorted low → high
//! - A `Slab` arena owning each resting order exactly once
//! - An id index mapping `OrderId` to the order's arena key
//!
//! Price levels and the index only hold arena keys. Every removal goes
//! through [`OrderBook::remove_resting`], which updates level, arena and
//! index together.

use log::{debug, warn};
use rustc_hash::FxHashMap;
use slab::Slab;

use crate::level::{Node, OrderKey};
use crate::price_levels::PriceLevels;
use crate::{
    BookConfig, BookError, Order, OrderId, OrderModify, OrderType, Price, Side, Trade,
    UnsupportedKindPolicy,
};

/// A single-instrument limit order book with price/time priority matching.
///
/// Not thread-safe: callers sharing a book must serialize every call.
#[derive(Clone, Debug)]
pub struct OrderBook {
    /// Buy orders, best = highest
    pub(crate) bids: PriceLevels,
    /// Sell orders, best = lowest
    pub(crate) asks: PriceLevels,
    /// Owns every resting order
    pub(crate) nodes: Slab<Node>,
    /// Resting orders by id; the source of truth for "does this order exist"
    pub(crate) index: FxHashMap<OrderId, OrderKey>,
    /// Fill-and-kill orders currently linked into a level
    pub(crate) resting_fill_and_kill: usize,
    config: BookConfig,
}

impl OrderBook {
    /// Create a new empty order book with the default configuration.
    pub fn new() -> Self {
        Self::with_config(BookConfig::default())
    }

    /// Create a new empty order book, pre-sized for `config.expected_orders`.
    pub fn with_config(config: BookConfig) -> Self {
        Self {
            bids: PriceLevels::new(Side::Buy),
            asks: PriceLevels::new(Side::Sell),
            nodes: Slab::with_capacity(config.expected_orders),
            index: FxHashMap::with_capacity_and_hasher(config.expected_orders, Default::default()),
            resting_fill_and_kill: 0,
            config,
        }
    }

    pub fn config(&self) -> &BookConfig {
        &self.config
    }

    // === Order management ===

    /// Submit an order and run matching. Returns the trades produced.
    ///
    /// Resolves to `Ok` with no trades, leaving the book untouched, when an
    /// order with the same id is already resting, or when a fill-and-kill
    /// order cannot cross the opposite best price at all.
    ///
    /// Otherwise the order joins the back of its price level and the book is
    /// matched until it no longer crosses. Any fill-and-kill remainder is
    /// cancelled before returning.
    ///
    /// # Errors
    ///
    /// - [`BookError::ZeroQuantity`], [`BookError::MissingPrice`] and
    ///   [`BookError::UnsupportedOrderType`] reject the submission before it
    ///   touches the book.
    /// - [`BookError::Overfill`] means the matching loop broke its invariant.
    pub fn add_order(&mut self, order: Order) -> Result<Vec<Trade>, BookError> {
        if self.index.contains_key(&order.id()) {
            debug!("ignoring duplicate order {}", order.id());
            return Ok(Vec::new());
        }

        self.validate(&order)
            .inspect_err(|e| warn!("rejected order {}: {e}", order.id()))?;

        if order.order_type() == OrderType::FillAndKill
            && !self.can_match(order.side(), order.price())
        {
            debug!(
                "fill-and-kill {} {} @ {} cannot cross, dropped",
                order.id(),
                order.side(),
                order.price()
            );
            return Ok(Vec::new());
        }

        self.insert(order);
        self.match_orders()
    }

    /// Cancel a resting order. Unknown ids are ignored.
    pub fn cancel_order(&mut self, order_id: OrderId) {
        if let Some(order) = self.take_order(order_id) {
            debug!(
                "cancelled {} with {} remaining",
                order_id,
                order.remaining_quantity()
            );
        }
    }

    /// Replace a resting order: cancel it, then resubmit under the same id
    /// with the request's side, price and quantity and the original kind.
    ///
    /// The replacement always loses time priority. Unknown ids return no
    /// trades. An invalid replacement is rejected before the original is
    /// cancelled.
    ///
    /// # Errors
    ///
    /// Same as [`OrderBook::add_order`].
    pub fn modify_order(&mut self, request: OrderModify) -> Result<Vec<Trade>, BookError> {
        let Some(&key) = self.index.get(&request.order_id) else {
            return Ok(Vec::new());
        };
        let replacement = request.to_order(self.nodes[key].order.order_type());
        self.validate(&replacement)?;

        self.remove_resting(key);
        debug!(
            "modify {} -> {} {} @ {}",
            request.order_id, request.side, request.quantity, request.price
        );
        self.add_order(replacement)
    }

    // === Queries ===

    /// Number of resting orders.
    #[inline]
    pub fn size(&self) -> usize {
        self.index.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Returns true if the order is resting.
    pub fn contains(&self, order_id: OrderId) -> bool {
        self.index.contains_key(&order_id)
    }

    /// Read-only view of a resting order.
    pub fn order(&self, order_id: OrderId) -> Option<&Order> {
        self.index.get(&order_id).map(|&key| &self.nodes[key].order)
    }

    /// Get the best bid price (highest buy price).
    pub fn best_bid(&self) -> Option<Price> {
        self.bids.best_price()
    }

    /// Get the best ask price (lowest sell price).
    pub fn best_ask(&self) -> Option<Price> {
        self.asks.best_price()
    }

    /// Get the spread (best ask - best bid), if both exist and the
    /// difference fits in an `i64`.
    pub fn spread(&self) -> Option<i64> {
        match (self.best_bid(), self.best_ask()) {
            (Some(bid), Some(ask)) => ask.0.checked_sub(bid.0),
            _ => None,
        }
    }

    /// Check if the book is crossed (best bid >= best ask).
    /// Never true between public calls.
    pub fn is_crossed(&self) -> bool {
        match (self.best_bid(), self.best_ask()) {
            (Some(bid), Some(ask)) => bid >= ask,
            _ => false,
        }
    }

    /// Number of distinct price levels on one side.
    pub fn level_count(&self, side: Side) -> usize {
        self.levels(side).level_count()
    }

    // === Internals ===

    pub(crate) fn levels(&self, side: Side) -> &PriceLevels {
        match side {
            Side::Buy => &self.bids,
            Side::Sell => &self.asks,
        }
    }

    fn validate(&self, order: &Order) -> Result<(), BookError> {
        let id = order.id();
        if order.initial_quantity() == 0 {
            return Err(BookError::ZeroQuantity(id));
        }
        if order.order_type() == OrderType::Market || !order.price().is_valid() {
            return Err(BookError::MissingPrice(id));
        }
        if !order.order_type().is_supported()
            && self.config.unsupported_kinds == UnsupportedKindPolicy::Reject
        {
            return Err(BookError::UnsupportedOrderType {
                order_id: id,
                order_type: order.order_type(),
            });
        }
        Ok(())
    }

    /// Store the order in the arena, link it at the back of its level and
    /// register it in the index.
    pub(crate) fn insert(&mut self, order: Order) {
        let (id, side, price) = (order.id(), order.side(), order.price());
        if !order.order_type().can_rest() {
            self.resting_fill_and_kill += 1;
        }
        debug!(
            "insert {} {} {} @ {} ({})",
            id,
            side,
            order.remaining_quantity(),
            price,
            order.order_type()
        );

        let key = self.nodes.insert(Node::new(order));
        let levels = match side {
            Side::Buy => &mut self.bids,
            Side::Sell => &mut self.asks,
        };
        levels.insert(price, key, &mut self.nodes);
        self.index.insert(id, key);
    }

    /// Remove an order from its level, the arena and the index in one step.
    pub(crate) fn remove_resting(&mut self, key: OrderKey) -> Order {
        let (side, price) = {
            let order = &self.nodes[key].order;
            (order.side(), order.price())
        };
        let levels = match side {
            Side::Buy => &mut self.bids,
            Side::Sell => &mut self.asks,
        };
        levels.remove(price, key, &mut self.nodes);

        let order = self.nodes.remove(key).order;
        self.index.remove(&order.id());
        if !order.order_type().can_rest() {
            self.resting_fill_and_kill -= 1;
        }
        order
    }

    /// Remove a resting order by id, returning it.
    pub(crate) fn take_order(&mut self, order_id: OrderId) -> Option<Order> {
        let key = *self.index.get(&order_id)?;
        Some(self.remove_resting(key))
    }
}

impl Default for OrderBook {
    fn default() -> Self {
        Self::new()
    }
}
