//! Replacement requests for resting orders.

use crate::{Order, OrderId, OrderType, Price, Quantity, Side};

/// A request to replace a resting order's side, price and quantity.
///
/// The book applies it as cancel-and-resubmit under the same id: the
/// replacement keeps the original order's [`OrderType`] but joins the back of
/// its price level, so it always loses time priority.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OrderModify {
    pub order_id: OrderId,
    pub side: Side,
    pub price: Price,
    pub quantity: Quantity,
}

impl OrderModify {
    pub fn new(order_id: OrderId, side: Side, price: Price, quantity: Quantity) -> Self {
        Self {
            order_id,
            side,
            price,
            quantity,
        }
    }

    /// Build the replacement order with the given kind.
    pub fn to_order(&self, order_type: OrderType) -> Order {
        Order::new(order_type, self.order_id, self.side, self.price, self.quantity)
    }
}
