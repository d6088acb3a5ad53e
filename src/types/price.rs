//! Price and quantity primitives.
//!
//! ## Overview
//!
//! Prices are floating-point. Two prices denote the same level when they
//! differ by no more than [`EPSILON`]. Every ordering or equality test on a
//! price inside the book goes through [`greater`], [`less`] or [`equal`];
//! raw `<`/`==` on prices is never used for level identity.
//!
//! ## Sentinels
//!
//! An empty bid side reports [`EMPTY_BID`] (negative infinity) and an empty
//! ask side reports [`EMPTY_ASK`] (positive infinity). Any finite order price
//! compares as strictly inside both sentinels.
//!
//! ## Examples
//!
//! ```
//! use flatbook::types::price::{equal, greater, less};
//!
//! assert!(equal(100.0000001, 100.0000002));
//! assert!(greater(100.01, 100.0));
//! assert!(less(99.99, 100.0));
//! assert!(!less(100.0, 100.0000005));
//! ```

/// Price of a level (floating-point).
pub type Price = f64;

/// Aggregated or order quantity (non-negative integer).
pub type Qty = u64;

/// Tolerance under which two prices are the same level.
pub const EPSILON: Price = 1e-6;

/// Best-bid value reported while the bid side is empty.
pub const EMPTY_BID: Price = Price::NEG_INFINITY;

/// Best-ask value reported while the ask side is empty.
pub const EMPTY_ASK: Price = Price::INFINITY;

// ============================================================================
// Comparator
// ============================================================================

/// `lhs` is above `rhs` by more than the tolerance.
#[inline(always)]
pub fn greater(lhs: Price, rhs: Price) -> bool {
    lhs > rhs + EPSILON
}

/// `lhs` is below `rhs` by more than the tolerance.
#[inline(always)]
pub fn less(lhs: Price, rhs: Price) -> bool {
    lhs + EPSILON < rhs
}

/// `lhs` and `rhs` name the same level.
///
/// Exactly the complement of [`less`] and [`greater`] for finite prices:
/// `!less(a, b) && !greater(a, b)` implies `equal(a, b)`.
#[inline(always)]
pub fn equal(lhs: Price, rhs: Price) -> bool {
    !less(lhs, rhs) && !greater(lhs, rhs)
}

// ============================================================================
// Unit Tests
// ============================================================================
