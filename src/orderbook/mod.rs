//! Price ledgers for the two sides of the book.
//!
//! ## Architecture
//!
//! Each side is a [`Ledger`]: an ordered map of price to aggregated
//! quantity, stored as an AVL tree in a chunked slab arena.
//!
//! - **Slab-backed nodes**: no general-purpose allocation per level
//! - **Epsilon price identity**: prices within 1e-6 share a level
//! - **Priority-ordered iteration**: bids high-to-low, asks low-to-high
//!
//! ## Components
//!
//! - [`LevelNode`]: one level plus its tree links
//! - [`Ledger`]: the ordered map, generic over [`PriceOrdering`]
//! - [`BestPrice`]: cached best price of a side, `{price, is_empty}`
//!
//! ## Performance
//!
//! | Operation | Complexity |
//! |-----------|------------|
//! | upsert | O(log n) |
//! | reduce_at | O(log n) |
//! | consume_from | O(k log n), k levels erased |
//! | top_price | O(log n) |
//! | snapshot(d) | O(d + log n) |
//!
//! ## Example
//!
//! ```
//! use flatbook::orderbook::Bids;
//!
//! let mut bids = Bids::new();
//! bids.upsert(10.0, 5).unwrap();
//! bids.upsert(11.0, 1).unwrap();
//!
//! assert_eq!(bids.top_price(), 11.0);
//! ```

pub mod best;
pub mod ledger;
pub mod node;

pub use best::BestPrice;
pub use ledger::{Ascending, Asks, Bids, Descending, Iter, Ledger, PriceOrdering};
pub use node::LevelNode;
