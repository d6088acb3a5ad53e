//! # flatbook
//!
//! Price-level limit order book and matching core for one instrument.
//!
//! ## Architecture
//!
//! - **Types**: prices, orders and the depth snapshot (`Orderbook<N>`)
//! - **Arena**: chunked slab allocator with stable keys
//! - **OrderBook**: bid and ask price ledgers stored in the arena
//! - **Engine**: the `Broker`, which matches, rests and cancels
//!
//! ## Design Principles
//!
//! 1. **Aggregated levels**: quantity is tracked per price, not per order
//! 2. **Epsilon prices**: prices within 1e-6 are the same level
//! 3. **Pre-allocated memory**: ledger nodes live in chunked slabs
//! 4. **Synchronous execution**: single-threaded, no async in the hot path
//!
//! ## Example
//!
//! ```
//! use flatbook::{Broker, Order, Orderbook, Side};
//!
//! let mut broker = Broker::new();
//! broker.insert_order(&Order::limit(Side::Buy, 99.0, 10)).unwrap();
//! broker.insert_order(&Order::limit(Side::Sell, 101.0, 10)).unwrap();
//!
//! let mut book = Orderbook::<10>::new();
//! broker.get_order_book(&mut book, 10);
//!
//! assert_eq!(book.bid_count, 1);
//! assert_eq!(book.ask_count, 1);
//! assert_eq!(broker.spread(), Some(2.0));
//! ```

// ============================================================================
// Module declarations
// ============================================================================

/// Core data types: Order, PriceLevel, Orderbook, price comparison
pub mod types;

/// Chunked slab allocator
pub mod arena;

/// Price ledgers: one ordered map of price to quantity per side
pub mod orderbook;

/// Matching engine: the Broker
pub mod engine;

/// Order-id registry in front of the broker
pub mod registry;

/// Clocks and stopwatches for instrumentation
pub mod clock;

/// TOML configuration
pub mod config;

/// Error types
pub mod error;

// ============================================================================
// Re-exports for convenience
// ============================================================================

pub use config::{ArenaConfig, BrokerConfig};
pub use engine::{Broker, Execution};
pub use error::{BookError, ConfigError, SlabError};
pub use orderbook::{Asks, BestPrice, Bids, Ledger};
pub use registry::{OrderRegistry, RestingOrder};
pub use types::{Order, OrderType, Orderbook, Price, PriceLevel, Qty, Side, TimeInForce};
