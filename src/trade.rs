//! Trade representation

use crate::{OrderId, Price, Quantity};
use std::fmt;

/// One side's view of a fill.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TradeInfo {
    pub order_id: OrderId,
    /// The order's own limit price
    pub price: Price,
    pub quantity: Quantity,
}

/// A match between the front bid and the front ask.
///
/// Each side is recorded at its own resting price; there is no single
/// clearing price. Both quantities are always equal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Trade {
    bid: TradeInfo,
    ask: TradeInfo,
}

impl Trade {
    /// Create a trade from its bid and ask facts.
    pub fn new(bid: TradeInfo, ask: TradeInfo) -> Self {
        debug_assert_eq!(bid.quantity, ask.quantity, "asymmetric trade");
        Self { bid, ask }
    }

    #[inline]
    pub fn bid(&self) -> &TradeInfo {
        &self.bid
    }

    #[inline]
    pub fn ask(&self) -> &TradeInfo {
        &self.ask
    }

    /// Quantity executed (same on both sides).
    #[inline]
    pub fn quantity(&self) -> Quantity {
        self.bid.quantity
    }
}

impl fmt::Display for Trade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} x {} @ {} / {} @ {}",
            self.quantity(),
            self.bid.order_id,
            self.bid.price,
            self.ask.order_id,
            self.ask.price
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_trade() -> Trade {
        Trade::new(
            TradeInfo {
                order_id: OrderId(10),
                price: Price(100_50),
                quantity: 25,
            },
            TradeInfo {
                order_id: OrderId(5),
                price: Price(100_00),
                quantity: 25,
            },
        )
    }

    #[test]
    fn trade_creation() {
        let trade = make_trade();

        assert_eq!(trade.bid().order_id, OrderId(10));
        assert_eq!(trade.ask().order_id, OrderId(5));
        assert_eq!(trade.bid().price, Price(100_50));
        assert_eq!(trade.ask().price, Price(100_00));
        assert_eq!(trade.quantity(), 25);
    }

    #[test]
    fn display() {
        let s = make_trade().to_string();
        assert_eq!(s, "25 x O10 @ $100.50 / O5 @ $100.00");
    }
}
