//! Matching engine: the core algorithm for executing trades.
//!
//! The matching engine implements price-time priority:
//! 1. Better prices match first (higher bids, lower asks)
//! 2. At the same price, earlier orders match first (FIFO)
//! 3. Each side of a trade is recorded at its own limit price
//!
//! Matching runs after every insertion until the book no longer crosses,
//! then sweeps out any fill-and-kill order left resting.

use log::{debug, trace};

use crate::level::{Level, OrderKey};
use crate::{BookError, Order, OrderBook, OrderId, Price, Quantity, Side, Trade, TradeInfo};

impl OrderBook {
    /// Returns true if an order on `side` at `price` would cross the
    /// opposite side's best price.
    pub(crate) fn can_match(&self, side: Side, price: Price) -> bool {
        match self.levels(side.opposite()).best_price() {
            Some(best) => side.crosses(price, best),
            None => false,
        }
    }

    /// Match the front bid against the front ask until the book no longer
    /// crosses, then cancel every fill-and-kill order still resting.
    pub(crate) fn match_orders(&mut self) -> Result<Vec<Trade>, BookError> {
        let mut trades = Vec::new();

        loop {
            let (Some(bid_price), Some(ask_price)) = (self.bids.best_price(), self.asks.best_price())
            else {
                break;
            };
            if bid_price < ask_price {
                break;
            }

            // Levels are never empty, so both fronts exist while both sides do.
            let (Some(bid_key), Some(ask_key)) = (
                self.bids.best_level().and_then(Level::front),
                self.asks.best_level().and_then(Level::front),
            ) else {
                break;
            };

            trades.push(self.match_front(bid_key, ask_key)?);
        }

        self.sweep_fill_and_kill();
        Ok(trades)
    }

    /// Fill the two front orders against each other by the smaller remaining
    /// quantity. Orders that become filled leave the book.
    fn match_front(&mut self, bid_key: OrderKey, ask_key: OrderKey) -> Result<Trade, BookError> {
        let quantity = self.nodes[bid_key]
            .order
            .remaining_quantity()
            .min(self.nodes[ask_key].order.remaining_quantity());

        let (bid, bid_filled) = Self::fill_side(&mut self.nodes[bid_key].order, quantity)?;
        let (ask, ask_filled) = Self::fill_side(&mut self.nodes[ask_key].order, quantity)?;
        trace!(
            "fill {quantity}: bid {} @ {} / ask {} @ {}",
            bid.order_id, bid.price, ask.order_id, ask.price
        );

        if bid_filled {
            self.remove_resting(bid_key);
        }
        if ask_filled {
            self.remove_resting(ask_key);
        }

        Ok(Trade::new(bid, ask))
    }

    fn fill_side(order: &mut Order, quantity: Quantity) -> Result<(TradeInfo, bool), BookError> {
        order.fill(quantity)?;
        let info = TradeInfo {
            order_id: order.id(),
            price: order.price(),
            quantity,
        };
        Ok((info, order.is_filled()))
    }

    /// Cancel every fill-and-kill order resting on either side.
    fn sweep_fill_and_kill(&mut self) {
        if self.resting_fill_and_kill == 0 {
            return;
        }

        let nodes = &self.nodes;
        let doomed: Vec<OrderId> = self
            .bids
            .iter_best_to_worst()
            .chain(self.asks.iter_best_to_worst())
            .flat_map(|level| level.iter(nodes))
            .filter(|order| !order.order_type().can_rest())
            .map(Order::id)
            .collect();

        for order_id in doomed {
            if let Some(order) = self.take_order(order_id) {
                debug!(
                    "fill-and-kill {} cancelled with {} of {} unfilled",
                    order_id,
                    order.remaining_quantity(),
                    order.initial_quantity()
                );
            }
        }
    }
}
