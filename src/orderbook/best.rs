//! Cached best price of one side.
//!
//! A `{price, is_empty}` pair rather than a bare sentinel scalar, so an
//! empty side can be tested without comparing against infinity. The broker
//! refreshes it in the same call that mutates the matching ledger.

use crate::types::price::{equal, Price};

/// Best price of one side, or that side's empty sentinel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BestPrice {
    price: Price,
    is_empty: bool,
}

impl BestPrice {
    /// Empty side reporting `sentinel` as its price
    #[inline]
    pub const fn empty(sentinel: Price) -> Self {
        Self {
            price: sentinel,
            is_empty: true,
        }
    }

    #[inline]
    pub const fn at(price: Price) -> Self {
        Self {
            price,
            is_empty: false,
        }
    }

    /// The best price, or the sentinel when the side is empty
    #[inline]
    pub fn price(&self) -> Price {
        self.price
    }

    #[inline]
    pub fn get(&self) -> Option<Price> {
        if self.is_empty {
            None
        } else {
            Some(self.price)
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.is_empty
    }

    /// Same emptiness and, when populated, the same level
    pub fn same_level(&self, other: &BestPrice) -> bool {
        match (self.get(), other.get()) {
            (None, None) => self.price == other.price,
            (Some(a), Some(b)) => equal(a, b),
            _ => false,
        }
    }
}
