//! Ledger node stored in the slab arena.
//!
//! ## Design
//!
//! `LevelNode` holds one aggregated price level plus the links of the
//! balanced tree that orders the ledger. Links are arena keys, never
//! references, so a node can be moved between parents by rewriting keys.
//!
//! ## Tree Links
//!
//! - `left`: subtree of levels with higher matching priority
//! - `right`: subtree of levels with lower matching priority
//! - `height`: AVL height of the subtree rooted here (leaf = 1)

use crate::arena::SlotKey;
use crate::types::{Price, PriceLevel, Qty};

/// One price level inside a ledger.
#[derive(Debug, Clone)]
pub struct LevelNode {
    /// Price of this level
    pub price: Price,

    /// Aggregated resting quantity; never zero while the node is linked
    pub quantity: Qty,

    pub(crate) left: Option<SlotKey>,
    pub(crate) right: Option<SlotKey>,
    pub(crate) height: u8,
}

impl LevelNode {
    /// Create a detached leaf
    #[inline]
    pub fn new(price: Price, quantity: Qty) -> Self {
        Self {
            price,
            quantity,
            left: None,
            right: None,
            height: 1,
        }
    }

    /// Check if this node has no children
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    /// Copy out the (price, quantity) pair
    #[inline]
    pub fn level(&self) -> PriceLevel {
        PriceLevel::new(self.price, self.quantity)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
