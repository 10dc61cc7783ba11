// Allow our dollar.cents digit grouping convention (e.g., 100_00 = $100.00)
#![allow(clippy::inconsistent_digit_grouping)]

//! # pricetime
//!
//! An in-memory limit order book with price/time priority matching.
//!
//! ## Features
//!
//! - **Order kinds**: Good-till-cancel and fill-and-kill
//! - **Price-time priority**: FIFO matching at each price level
//! - **Cancel and modify** by caller-assigned id, with O(1) removal
//! - **Depth snapshots**: aggregated quantity per price level
//! - **Fixed-point prices**: integer cents, no floating-point errors
//!
//! ## Quick Start
//!
//! ```
//! use pricetime::{Order, OrderBook, OrderId, OrderType, Price, Side};
//!
//! let mut book = OrderBook::new();
//!
//! book.add_order(Order::new(OrderType::GoodTillCancel, OrderId(1), Side::Buy, Price(100_00), 10))?;
//! assert_eq!(book.size(), 1);
//!
//! // A crossing sell matches the resting bid
//! let trades = book.add_order(Order::new(
//!     OrderType::GoodTillCancel,
//!     OrderId(2),
//!     Side::Sell,
//!     Price(100_00),
//!     5,
//! ))?;
//!
//! assert_eq!(trades.len(), 1);
//! assert_eq!(trades[0].quantity(), 5);
//! assert_eq!(book.order(OrderId(1)).unwrap().remaining_quantity(), 5);
//! assert_eq!(book.size(), 1);
//! # Ok::<(), pricetime::BookError>(())
//! ```
//!
//! ## Trades
//!
//! Every trade pairs the front bid with the front ask and records each side
//! at its own limit price:
//!
//! ```
//! use pricetime::{Order, OrderBook, OrderId, OrderType, Price, Side};
//!
//! let mut book = OrderBook::new();
//! book.add_order(Order::new(OrderType::GoodTillCancel, OrderId(1), Side::Sell, Price(99_00), 10))?;
//! let trades = book.add_order(Order::new(
//!     OrderType::GoodTillCancel,
//!     OrderId(2),
//!     Side::Buy,
//!     Price(101_00),
//!     10,
//! ))?;
//!
//! assert_eq!(trades[0].bid().price, Price(101_00));
//! assert_eq!(trades[0].ask().price, Price(99_00));
//! # Ok::<(), pricetime::BookError>(())
//! ```
//!
//! ## Fill-and-Kill
//!
//! A fill-and-kill order matches what it can on arrival. Its remainder is
//! cancelled before `add_order` returns; if it cannot cross at all it is
//! never inserted.
//!
//! ```
//! use pricetime::{Order, OrderBook, OrderId, OrderType, Price, Side};
//!
//! let mut book = OrderBook::new();
//! book.add_order(Order::new(OrderType::GoodTillCancel, OrderId(1), Side::Buy, Price(100_00), 10))?;
//!
//! let trades = book.add_order(Order::new(
//!     OrderType::FillAndKill,
//!     OrderId(2),
//!     Side::Sell,
//!     Price(100_00),
//!     20,
//! ))?;
//!
//! assert_eq!(trades[0].quantity(), 10);
//! assert!(book.is_empty());
//! # Ok::<(), pricetime::BookError>(())
//! ```
//!
//! ## Cancel and Modify
//!
//! Modify is cancel-and-resubmit under the same id: the order keeps its kind
//! but **loses time priority**.
//!
//! ```
//! use pricetime::{Order, OrderBook, OrderId, OrderModify, OrderType, Price, Side};
//!
//! let mut book = OrderBook::new();
//! book.add_order(Order::new(OrderType::GoodTillCancel, OrderId(1), Side::Buy, Price(99_00), 100))?;
//!
//! book.modify_order(OrderModify::new(OrderId(1), Side::Buy, Price(98_00), 150))?;
//! assert_eq!(book.best_bid(), Some(Price(98_00)));
//!
//! book.cancel_order(OrderId(1));
//! assert!(book.is_empty());
//!
//! // Unknown ids are silently ignored
//! book.cancel_order(OrderId(1));
//! # Ok::<(), pricetime::BookError>(())
//! ```
//!
//! ## Depth Snapshots
//!
//! ```
//! use pricetime::{Order, OrderBook, OrderId, OrderType, Price, Side};
//!
//! let mut book = OrderBook::new();
//! book.add_order(Order::new(OrderType::GoodTillCancel, OrderId(1), Side::Buy, Price(99_00), 100))?;
//! book.add_order(Order::new(OrderType::GoodTillCancel, OrderId(2), Side::Buy, Price(99_00), 50))?;
//! book.add_order(Order::new(OrderType::GoodTillCancel, OrderId(3), Side::Sell, Price(101_00), 75))?;
//!
//! let snap = book.depth_snapshot();
//!
//! assert_eq!(snap.bids[0].price, Price(99_00));
//! assert_eq!(snap.bids[0].quantity, 150);
//! assert_eq!(snap.spread(), Some(200));
//! # Ok::<(), pricetime::BookError>(())
//! ```
//!
//! ## Unsupported Kinds
//!
//! Fill-or-kill and good-for-day are rejected by default. With
//! [`UnsupportedKindPolicy::Inert`] they are accepted and behave like
//! good-till-cancel. Market orders carry no price and are always rejected.

mod book;
mod config;
mod error;
mod level;
mod matching;
mod modify;
mod order;
mod order_type;
mod price_levels;
mod side;
mod snapshot;
mod trade;
mod types;

// Re-export public API
pub use book::OrderBook;
pub use config::{BookConfig, ConfigError, MAX_EXPECTED_ORDERS, UnsupportedKindPolicy};
pub use error::{BookError, OrderError};
pub use modify::OrderModify;
pub use order::Order;
pub use order_type::OrderType;
pub use side::Side;
pub use snapshot::{DepthSnapshot, LevelInfo};
pub use trade::{Trade, TradeInfo};
pub use types::{OrderId, Price, Quantity};
