//! Matching engine.
//!
//! ## Design Principles
//!
//! 1. **Aggregated levels**: the book stores quantity per price, not orders
//! 2. **Synchronous execution**: one call, one mutation, no background work
//! 3. **Cached top of book**: best bid/ask are refreshed in the mutating call
//! 4. **Atomic rejection**: a capacity error leaves the book untouched
//!
//! ## Matching Rules
//!
//! - **Buy orders** match against asks (lowest price first)
//! - **Sell orders** match against bids (highest price first)
//! - **Partial fills** are supported; a limit residual rests on the book
//! - **Market residual** is discarded
//!
//! ## Example
//!
//! ```
//! use flatbook::engine::Broker;
//! use flatbook::types::{Order, Orderbook, Side};
//!
//! let mut broker = Broker::new();
//! broker.insert_order(&Order::limit(Side::Sell, 101.0, 4)).unwrap();
//! broker.insert_order(&Order::limit(Side::Sell, 102.0, 4)).unwrap();
//!
//! let execution = broker.insert_order(&Order::market(Side::Buy, 6)).unwrap();
//! assert_eq!(execution.filled, 6);
//!
//! let mut book = Orderbook::<10>::new();
//! broker.get_order_book(&mut book, 10);
//! assert_eq!(book.ask_count, 1);
//! assert_eq!(book.ask_levels[0].quantity, 2);
//! ```

pub mod broker;

pub use broker::{Broker, Execution};
