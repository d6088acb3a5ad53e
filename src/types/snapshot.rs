//! Bounded-depth book snapshot.
//!
//! [`Orderbook`] is owned by the reader and filled on demand by
//! [`Broker::get_order_book`](crate::engine::Broker::get_order_book). It is a
//! copy: nothing in it aliases the live ledgers, and filling it never
//! allocates.

use std::fmt;

use crate::types::price::{Price, Qty};

/// Aggregated quantity resting at one price.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PriceLevel {
    pub price: Price,
    pub quantity: Qty,
}

impl PriceLevel {
    /// Zeroed level used to initialise snapshot storage
    pub const ZERO: PriceLevel = PriceLevel {
        price: 0.0,
        quantity: 0,
    };

    pub fn new(price: Price, quantity: Qty) -> Self {
        Self { price, quantity }
    }
}

/// Fixed-capacity snapshot of up to `DEPTH` levels per side.
///
/// ## Example
///
/// ```
/// use flatbook::types::Orderbook;
///
/// let book = Orderbook::<10>::new();
/// assert_eq!(book.max_depth(), 10);
/// assert!(book.bids().is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct Orderbook<const DEPTH: usize> {
    /// Number of populated entries in `bid_levels`
    pub bid_count: usize,

    /// Number of populated entries in `ask_levels`
    pub ask_count: usize,

    /// Bid levels, best (highest) first
    pub bid_levels: [PriceLevel; DEPTH],

    /// Ask levels, best (lowest) first
    pub ask_levels: [PriceLevel; DEPTH],
}

impl<const DEPTH: usize> Default for Orderbook<DEPTH> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const DEPTH: usize> Orderbook<DEPTH> {
    pub const MAX_DEPTH: usize = DEPTH;

    pub fn new() -> Self {
        Self {
            bid_count: 0,
            ask_count: 0,
            bid_levels: [PriceLevel::ZERO; DEPTH],
            ask_levels: [PriceLevel::ZERO; DEPTH],
        }
    }

    #[inline]
    pub fn max_depth(&self) -> usize {
        DEPTH
    }

    /// Populated bid levels
    #[inline]
    pub fn bids(&self) -> &[PriceLevel] {
        &self.bid_levels[..self.bid_count]
    }

    /// Populated ask levels
    #[inline]
    pub fn asks(&self) -> &[PriceLevel] {
        &self.ask_levels[..self.ask_count]
    }

    /// Reset both counts (storage is left as is)
    pub fn clear(&mut self) {
        self.bid_count = 0;
        self.ask_count = 0;
    }
}

impl<const DEPTH: usize> fmt::Display for Orderbook<DEPTH> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "===============orderbook::asks===============")?;
        for level in self.asks() {
            writeln!(f, "price:{} qty:{}", level.price, level.quantity)?;
        }
        writeln!(f, "===============orderbook::bids===============")?;
        for level in self.bids() {
            writeln!(f, "price:{} qty:{}", level.price, level.quantity)?;
        }
        write!(f, "=============================================")
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
