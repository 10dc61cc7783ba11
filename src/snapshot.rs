//! Aggregated depth snapshots.

use crate::price_levels::PriceLevels;
use crate::{OrderBook, Price, Quantity};

/// Aggregated view of one price level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LevelInfo {
    pub price: Price,
    /// Sum of remaining quantity over every order at this price, saturating
    /// at `Quantity::MAX`
    pub quantity: Quantity,
    /// Number of orders at this level
    pub order_count: usize,
}

/// Depth of both sides at the time it was taken.
///
/// Computed on demand from the resting orders; never cached by the book.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DepthSnapshot {
    /// Bid levels (highest price first)
    pub bids: Vec<LevelInfo>,
    /// Ask levels (lowest price first)
    pub asks: Vec<LevelInfo>,
}

impl DepthSnapshot {
    pub fn best_bid(&self) -> Option<Price> {
        self.bids.first().map(|l| l.price)
    }

    pub fn best_ask(&self) -> Option<Price> {
        self.asks.first().map(|l| l.price)
    }

    /// Best ask - best bid, if both exist and the difference fits in an `i64`.
    pub fn spread(&self) -> Option<i64> {
        match (self.best_bid(), self.best_ask()) {
            (Some(bid), Some(ask)) => ask.0.checked_sub(bid.0),
            _ => None,
        }
    }

    /// Saturates at `Quantity::MAX`.
    pub fn total_bid_quantity(&self) -> Quantity {
        total(&self.bids)
    }

    /// Saturates at `Quantity::MAX`.
    pub fn total_ask_quantity(&self) -> Quantity {
        total(&self.asks)
    }
}

fn total(levels: &[LevelInfo]) -> Quantity {
    levels
        .iter()
        .map(|l| l.quantity)
        .fold(0, Quantity::saturating_add)
}

impl OrderBook {
    /// Snapshot of the top `depth` levels on each side.
    pub fn depth(&self, depth: usize) -> DepthSnapshot {
        DepthSnapshot {
            bids: self.aggregate(&self.bids, depth),
            asks: self.aggregate(&self.asks, depth),
        }
    }

    /// Snapshot of every level on both sides.
    pub fn depth_snapshot(&self) -> DepthSnapshot {
        self.depth(usize::MAX)
    }

    fn aggregate(&self, levels: &PriceLevels, depth: usize) -> Vec<LevelInfo> {
        levels
            .iter_best_to_worst()
            .take(depth)
            .map(|level| LevelInfo {
                price: level.price(),
                quantity: level.total_quantity(&self.nodes),
                order_count: level.order_count(),
            })
            .collect()
    }
}
