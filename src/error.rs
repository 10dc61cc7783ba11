//! Error types for order bookkeeping and submission.

use crate::{OrderId, OrderType, Quantity};

/// Contract violations raised by [`Order`](crate::Order) bookkeeping.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum OrderError {
    /// A fill asked for more than the order has left.
    #[error("order {order_id} cannot be filled for {requested}: only {remaining} remaining")]
    Overfill {
        order_id: OrderId,
        requested: Quantity,
        remaining: Quantity,
    },

    /// Remaining quantity must be positive and no larger than the initial
    /// quantity.
    #[error("order {order_id} has remaining quantity {remaining} out of range 1..={initial}")]
    InvalidQuantity {
        order_id: OrderId,
        initial: Quantity,
        remaining: Quantity,
    },
}

/// Errors returned by [`OrderBook`](crate::OrderBook) submissions.
///
/// Duplicate ids, unknown ids and fill-and-kill orders that cannot cross are
/// not errors; those calls succeed with no trades.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum BookError {
    /// The matching loop broke its own invariant. Never expected.
    #[error("matching invariant violated: {0}")]
    Overfill(#[from] OrderError),

    /// Quantity must be greater than zero.
    #[error("order {0} has zero quantity")]
    ZeroQuantity(OrderId),

    /// The order carries no limit price.
    #[error("order {0} has no limit price")]
    MissingPrice(OrderId),

    /// The kind has no matching semantics and the book is configured to reject it.
    #[error("order {order_id}: order type {order_type} is not supported")]
    UnsupportedOrderType {
        order_id: OrderId,
        order_type: OrderType,
    },
}

impl BookError {
    /// Returns true for errors that indicate a defect in the book itself
    /// rather than a bad submission.
    pub fn is_invariant_violation(&self) -> bool {
        matches!(self, BookError::Overfill(_))
    }
}
