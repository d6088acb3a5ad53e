//! Core value types for the book.
//!
//! ## Types
//!
//! - [`Order`]: the input value handed to the engine
//! - [`Side`], [`OrderType`], [`TimeInForce`]: order attributes
//! - [`PriceLevel`]: aggregated quantity at one price
//! - [`Orderbook`]: bounded-depth snapshot filled on demand
//!
//! Price comparison lives in [`price`]; never compare prices with raw
//! floating-point operators elsewhere.

mod order;
mod snapshot;
pub mod price;

// Re-export all types at module level
pub use order::{Order, OrderType, Side, TimeInForce};
pub use price::{Price, Qty};
pub use snapshot::{Orderbook, PriceLevel};
