//! Order representation and quantity bookkeeping

use crate::{OrderError, OrderId, OrderType, Price, Quantity, Side};

/// An order submitted to the book.
///
/// Fields are private: once constructed, the only mutation is [`Order::fill`],
/// so `remaining_quantity` can only ever decrease.
///
/// Deserialization rejects any order outside
/// `0 < remaining_quantity <= initial_quantity`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "OrderFields"))]
pub struct Order {
    id: OrderId,
    order_type: OrderType,
    side: Side,
    /// Limit price (max for buy, min for sell)
    price: Price,
    initial_quantity: Quantity,
    remaining_quantity: Quantity,
}

impl Order {
    /// Create a new order. Remaining quantity starts equal to `quantity`.
    pub fn new(
        order_type: OrderType,
        id: OrderId,
        side: Side,
        price: Price,
        quantity: Quantity,
    ) -> Self {
        Self {
            id,
            order_type,
            side,
            price,
            initial_quantity: quantity,
            remaining_quantity: quantity,
        }
    }

    /// Create a market order, priced at [`Price::INVALID`].
    pub fn market(id: OrderId, side: Side, quantity: Quantity) -> Self {
        Self::new(OrderType::Market, id, side, Price::INVALID, quantity)
    }

    #[inline]
    pub fn id(&self) -> OrderId {
        self.id
    }

    #[inline]
    pub fn order_type(&self) -> OrderType {
        self.order_type
    }

    #[inline]
    pub fn side(&self) -> Side {
        self.side
    }

    #[inline]
    pub fn price(&self) -> Price {
        self.price
    }

    #[inline]
    pub fn initial_quantity(&self) -> Quantity {
        self.initial_quantity
    }

    #[inline]
    pub fn remaining_quantity(&self) -> Quantity {
        self.remaining_quantity
    }

    /// Quantity executed so far (`initial - remaining`).
    #[inline]
    pub fn filled_quantity(&self) -> Quantity {
        self.initial_quantity - self.remaining_quantity
    }

    /// Returns true once nothing remains to fill.
    #[inline]
    pub fn is_filled(&self) -> bool {
        self.remaining_quantity == 0
    }

    /// Fill the order by the given quantity.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::Overfill`] if `quantity > remaining_quantity`;
    /// the order is left untouched.
    pub fn fill(&mut self, quantity: Quantity) -> Result<(), OrderError> {
        if quantity > self.remaining_quantity {
            return Err(OrderError::Overfill {
                order_id: self.id,
                requested: quantity,
                remaining: self.remaining_quantity,
            });
        }
        self.remaining_quantity -= quantity;
        Ok(())
    }
}

/// Wire shape of an [`Order`], checked before it becomes one.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct OrderFields {
    id: OrderId,
    order_type: OrderType,
    side: Side,
    price: Price,
    initial_quantity: Quantity,
    remaining_quantity: Quantity,
}

#[cfg(feature = "serde")]
impl TryFrom<OrderFields> for Order {
    type Error = OrderError;

    fn try_from(fields: OrderFields) -> Result<Self, Self::Error> {
        let OrderFields {
            id,
            order_type,
            side,
            price,
            initial_quantity,
            remaining_quantity,
        } = fields;
        if remaining_quantity == 0 || remaining_quantity > initial_quantity {
            return Err(OrderError::InvalidQuantity {
                order_id: id,
                initial: initial_quantity,
                remaining: remaining_quantity,
            });
        }
        Ok(Self {
            id,
            order_type,
            side,
            price,
            initial_quantity,
            remaining_quantity,
        })
    }
}
