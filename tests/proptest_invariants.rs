// Allow our dollar.cents digit grouping convention (e.g., 100_00 = $100.00)
#![allow(clippy::inconsistent_digit_grouping)]

//! Property-based tests for order book invariants.
//!
//! These tests use proptest to drive random sequences of adds, cancels and
//! modifies and check that the book stays consistent after every step.

use pricetime::{
    DepthSnapshot, Order, OrderBook, OrderId, OrderModify, OrderType, Price, Side, Trade,
};
use proptest::prelude::*;

#[derive(Clone, Debug)]
enum Op {
    Add {
        id: u64,
        side: Side,
        price: Price,
        qty: u64,
        kind: OrderType,
    },
    Cancel(u64),
    Modify {
        id: u64,
        side: Side,
        price: Price,
        qty: u64,
    },
}

/// Narrow price band so orders cross often
fn price_strategy() -> impl Strategy<Value = Price> {
    (95_00i64..=105_00i64).prop_map(|p| Price(p - p % 25))
}

fn quantity_strategy() -> impl Strategy<Value = u64> {
    1u64..=500u64
}

fn side_strategy() -> impl Strategy<Value = Side> {
    prop_oneof![Just(Side::Buy), Just(Side::Sell)]
}

fn kind_strategy() -> impl Strategy<Value = OrderType> {
    prop_oneof![
        3 => Just(OrderType::GoodTillCancel),
        1 => Just(OrderType::FillAndKill),
    ]
}

/// Small id space so duplicates, cancels and modifies hit live orders
fn id_strategy() -> impl Strategy<Value = u64> {
    1u64..=40u64
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        6 => (id_strategy(), side_strategy(), price_strategy(), quantity_strategy(), kind_strategy())
            .prop_map(|(id, side, price, qty, kind)| Op::Add { id, side, price, qty, kind }),
        2 => id_strategy().prop_map(Op::Cancel),
        2 => (id_strategy(), side_strategy(), price_strategy(), quantity_strategy())
            .prop_map(|(id, side, price, qty)| Op::Modify { id, side, price, qty }),
    ]
}

fn apply(book: &mut OrderBook, op: &Op) -> Vec<Trade> {
    match *op {
        Op::Add {
            id,
            side,
            price,
            qty,
            kind,
        } => book
            .add_order(Order::new(kind, OrderId(id), side, price, qty))
            .expect("valid order rejected"),
        Op::Cancel(id) => {
            book.cancel_order(OrderId(id));
            Vec::new()
        }
        Op::Modify {
            id,
            side,
            price,
            qty,
        } => book
            .modify_order(OrderModify::new(OrderId(id), side, price, qty))
            .expect("valid modify rejected"),
    }
}

fn check_book(book: &OrderBook) -> Result<(), TestCaseError> {
    prop_assert!(!book.is_crossed(), "book crossed: {:?} / {:?}", book.best_bid(), book.best_ask());

    let snap = book.depth_snapshot();
    for level in snap.bids.iter().chain(&snap.asks) {
        prop_assert!(level.order_count > 0, "empty level at {}", level.price);
        prop_assert!(level.quantity > 0, "zero quantity level at {}", level.price);
    }
    prop_assert!(snap.bids.windows(2).all(|w| w[0].price > w[1].price));
    prop_assert!(snap.asks.windows(2).all(|w| w[0].price < w[1].price));

    let counted: usize = snap
        .bids
        .iter()
        .chain(&snap.asks)
        .map(|l| l.order_count)
        .sum();
    prop_assert_eq!(counted, book.size());
    prop_assert_eq!(snap.best_bid(), book.best_bid());
    prop_assert_eq!(snap.best_ask(), book.best_ask());
    prop_assert_eq!(book.level_count(Side::Buy), snap.bids.len());
    prop_assert_eq!(book.level_count(Side::Sell), snap.asks.len());
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    // ========================================================================
    // STRUCTURAL INVARIANTS
    // ========================================================================

    /// The book never rests crossed and every level is consistent
    #[test]
    fn book_consistent_after_every_op(ops in prop::collection::vec(op_strategy(), 1..200)) {
        let mut book = OrderBook::new();
        for op in &ops {
            apply(&mut book, op);
            check_book(&book)?;
        }
    }

    /// Fill-and-kill orders never remain on the book
    #[test]
    fn no_resting_fill_and_kill(ops in prop::collection::vec(op_strategy(), 1..200)) {
        let mut book = OrderBook::new();
        for op in &ops {
            apply(&mut book, op);
            if let Op::Add { id, kind: OrderType::FillAndKill, .. } = *op {
                let resting = book.order(OrderId(id)).map(Order::order_type);
                prop_assert_ne!(resting, Some(OrderType::FillAndKill));
            }
        }
    }

    // ========================================================================
    // TRADE INVARIANTS
    // ========================================================================

    /// Both sides of a trade carry the same positive quantity, and the bid
    /// price is never below the ask price
    #[test]
    fn trades_are_well_formed(ops in prop::collection::vec(op_strategy(), 1..200)) {
        let mut book = OrderBook::new();
        for op in &ops {
            for trade in apply(&mut book, op) {
                prop_assert_eq!(trade.bid().quantity, trade.ask().quantity);
                prop_assert!(trade.quantity() > 0);
                prop_assert!(trade.bid().price >= trade.ask().price);
                prop_assert_ne!(trade.bid().order_id, trade.ask().order_id);
            }
        }
    }

    /// Resting orders are never overfilled
    #[test]
    fn remaining_never_exceeds_initial(ops in prop::collection::vec(op_strategy(), 1..200)) {
        let mut book = OrderBook::new();
        for op in &ops {
            apply(&mut book, op);
        }
        for id in 1..=40 {
            if let Some(order) = book.order(OrderId(id)) {
                prop_assert!(order.remaining_quantity() > 0);
                prop_assert!(order.remaining_quantity() <= order.initial_quantity());
                prop_assert_eq!(
                    order.filled_quantity() + order.remaining_quantity(),
                    order.initial_quantity()
                );
            }
        }
    }

    // ========================================================================
    // CONSERVATION INVARIANTS
    // ========================================================================

    /// Resting quantity on a side drops by exactly what traded against it
    #[test]
    fn quantity_conserved_against_resting_side(
        asks in prop::collection::vec((price_strategy(), quantity_strategy()), 1..30),
        limit in price_strategy(),
        qty in quantity_strategy(),
    ) {
        let mut book = OrderBook::new();
        for (i, (price, q)) in asks.iter().enumerate() {
            book.add_order(Order::new(OrderType::GoodTillCancel, OrderId(i as u64 + 1), Side::Sell, *price, *q))
                .unwrap();
        }
        let before = book.depth_snapshot().total_ask_quantity();

        let trades = book
            .add_order(Order::new(OrderType::FillAndKill, OrderId(1000), Side::Buy, limit, qty))
            .unwrap();

        let traded: u64 = trades.iter().map(Trade::quantity).sum();
        prop_assert!(traded <= qty);
        prop_assert_eq!(book.depth_snapshot().total_ask_quantity(), before - traded);
        prop_assert!(!book.contains(OrderId(1000)));
        for trade in &trades {
            prop_assert!(trade.ask().price <= limit);
        }
    }

    /// Cancelling every live id empties the book
    #[test]
    fn cancel_all_empties_book(ops in prop::collection::vec(op_strategy(), 1..200)) {
        let mut book = OrderBook::new();
        for op in &ops {
            apply(&mut book, op);
        }
        for id in 1..=40 {
            book.cancel_order(OrderId(id));
        }
        prop_assert!(book.is_empty());
        prop_assert_eq!(book.best_bid(), None);
        prop_assert_eq!(book.best_ask(), None);
        prop_assert_eq!(book.depth_snapshot(), DepthSnapshot::default());
    }
}
