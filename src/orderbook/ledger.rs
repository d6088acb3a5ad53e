//! Price ledger: one side of the book.
//!
//! ## Design
//!
//! A `Ledger` maps price to aggregated quantity with no duplicate prices.
//! It is an AVL tree whose nodes live in the ledger's own
//! [`ChunkedSlab`]; in-order traversal is matching priority order.
//!
//! The ordering is a type parameter:
//!
//! - [`Descending`]: bids, highest price first
//! - [`Ascending`]: asks, lowest price first
//!
//! Every price comparison goes through the epsilon comparator, so two
//! prices within 1e-6 of each other are one level.
//!
//! ## Quantity Per Level
//!
//! Levels aggregate quantity; individual orders and their time priority
//! inside a level are not tracked. Per-order priority, if needed, belongs in
//! a queue hung off `LevelNode`, not in this tree.
//!
//! ## Invariants
//!
//! After every mutating call:
//! - no level has zero quantity
//! - in-order traversal is strictly ordered by priority

use std::fmt;
use std::marker::PhantomData;

use crate::arena::{ChunkedSlab, SlotKey};
use crate::config::ArenaConfig;
use crate::error::SlabError;
use crate::orderbook::{BestPrice, LevelNode};
use crate::types::price::{greater, less, EMPTY_ASK, EMPTY_BID};
use crate::types::{Price, PriceLevel, Qty, Side};

/// Deepest AVL tree a `u32`-indexed arena can hold, with headroom.
const MAX_HEIGHT: usize = 64;

// ============================================================================
// Orderings
// ============================================================================

/// Matching priority of one side.
pub trait PriceOrdering {
    /// Side whose resting liquidity this ordering holds
    const SIDE: Side;

    /// Best-price value reported while the ledger is empty
    const EMPTY: Price;

    /// `a` matches strictly before `b`
    fn precedes(a: Price, b: Price) -> bool;
}

/// Bid ordering: higher prices first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Descending;

impl PriceOrdering for Descending {
    const SIDE: Side = Side::Buy;
    const EMPTY: Price = EMPTY_BID;

    #[inline(always)]
    fn precedes(a: Price, b: Price) -> bool {
        greater(a, b)
    }
}

/// Ask ordering: lower prices first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ascending;

impl PriceOrdering for Ascending {
    const SIDE: Side = Side::Sell;
    const EMPTY: Price = EMPTY_ASK;

    #[inline(always)]
    fn precedes(a: Price, b: Price) -> bool {
        less(a, b)
    }
}

/// Bid ledger.
pub type Bids = Ledger<Descending>;

/// Ask ledger.
pub type Asks = Ledger<Ascending>;

// ============================================================================
// Ledger
// ============================================================================

/// Ordered price -> quantity map for one side.
///
/// ## Example
///
/// ```
/// use flatbook::orderbook::Asks;
///
/// let mut asks = Asks::new();
/// asks.upsert(10.0, 5).unwrap();
/// asks.upsert(9.0, 3).unwrap();
///
/// assert_eq!(asks.top_price(), 9.0);
///
/// // Take 4: empties 9.0, then 1 from 10.0
/// let leftover = asks.consume_from(Some(10.0), 4);
/// assert_eq!(leftover, 0);
/// assert_eq!(asks.quantity_at(10.0), Some(4));
/// ```
pub struct Ledger<O: PriceOrdering> {
    nodes: ChunkedSlab<LevelNode>,
    root: Option<SlotKey>,
    _ordering: PhantomData<O>,
}

impl<O: PriceOrdering> Default for Ledger<O> {
    fn default() -> Self {
        Self::new()
    }
}

impl<O: PriceOrdering> Ledger<O> {
    /// Create an empty ledger with the default arena sizing
    pub fn new() -> Self {
        Self::with_config(&ArenaConfig::default())
    }

    pub fn with_config(config: &ArenaConfig) -> Self {
        Self {
            nodes: ChunkedSlab::new(config.chunk_capacity, config.max_chunks),
            root: None,
            _ordering: PhantomData,
        }
    }

    // ========================================================================
    // Size
    // ========================================================================

    /// Number of levels
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Maximum number of levels
    #[inline]
    pub fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    /// Whether a new level can still be created
    #[inline]
    pub fn has_vacancy(&self) -> bool {
        self.nodes.has_vacancy()
    }

    /// Whether `upsert(price, _)` would succeed
    #[inline]
    pub fn can_insert(&self, price: Price) -> bool {
        self.has_vacancy() || self.contains(price)
    }

    /// Read-only view of the backing arena
    #[inline]
    pub fn arena(&self) -> &ChunkedSlab<LevelNode> {
        &self.nodes
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Price of the first level, or the side's empty sentinel
    #[inline]
    pub fn top_price(&self) -> Price {
        self.first().map_or(O::EMPTY, |key| self.nodes[key].price)
    }

    /// First level as a cached-best value
    #[inline]
    pub fn top(&self) -> BestPrice {
        match self.first() {
            Some(key) => BestPrice::at(self.nodes[key].price),
            None => BestPrice::empty(O::EMPTY),
        }
    }

    #[inline]
    pub fn contains(&self, price: Price) -> bool {
        self.find(price).is_some()
    }

    /// Quantity resting at `price`
    pub fn quantity_at(&self, price: Price) -> Option<Qty> {
        self.find(price).map(|key| self.nodes[key].quantity)
    }

    /// Sum of all resting quantity
    pub fn total_quantity(&self) -> Qty {
        self.iter().map(|level| level.quantity).sum()
    }

    /// How much of `want` could be taken by `consume_from(limit, want)`,
    /// without taking it
    pub fn matchable_quantity(&self, limit: Option<Price>, want: Qty) -> Qty {
        let mut available: Qty = 0;
        for level in self.iter() {
            if available >= want || !Self::eligible(limit, level.price) {
                break;
            }
            available = available.saturating_add(level.quantity);
        }
        available.min(want)
    }

    /// Levels in priority order
    pub fn iter(&self) -> Iter<'_, O> {
        let mut iter = Iter {
            nodes: &self.nodes,
            stack: [None; MAX_HEIGHT],
            depth: 0,
            _ordering: PhantomData,
        };
        iter.push_left_spine(self.root);
        iter
    }

    /// Copy up to `out.len()` levels in priority order into `out`,
    /// returning how many were written
    pub fn snapshot_into(&self, out: &mut [PriceLevel]) -> usize {
        let mut written = 0;
        for (slot, level) in out.iter_mut().zip(self.iter()) {
            *slot = level;
            written += 1;
        }
        written
    }

    /// Copy up to `max_depth` levels in priority order
    pub fn snapshot(&self, max_depth: usize) -> Vec<PriceLevel> {
        self.iter().take(max_depth).collect()
    }

    // ========================================================================
    // Mutation
    // ========================================================================

    /// Add `quantity` to the level at `price`, creating it if needed.
    ///
    /// # Returns
    ///
    /// `true` if a new level was created. A zero `quantity` or a NaN or
    /// infinite `price` is a no-op.
    ///
    /// # Errors
    ///
    /// [`SlabError::CapacityExceeded`] if a new level is needed and the arena
    /// is full. The ledger is unchanged in that case.
    pub fn upsert(&mut self, price: Price, quantity: Qty) -> Result<bool, SlabError> {
        if quantity == 0 || !price.is_finite() {
            return Ok(false);
        }

        if let Some(key) = self.find(price) {
            let node = &mut self.nodes[key];
            node.quantity = node.quantity.saturating_add(quantity);
            return Ok(false);
        }

        let key = self.nodes.allocate(LevelNode::new(price, quantity))?;
        self.root = Some(self.insert_node(self.root, key));
        Ok(true)
    }

    /// Take up to `quantity` from the front of the ledger.
    ///
    /// Walks levels in priority order, stopping after the last level not
    /// worse than `limit` (inclusive; `None` means no limit). Levels emptied
    /// along the way are erased; the level that stops the walk is
    /// decremented in place.
    ///
    /// # Returns
    ///
    /// The part of `quantity` that found no eligible level.
    pub fn consume_from(&mut self, limit: Option<Price>, quantity: Qty) -> Qty {
        let mut remaining = quantity;

        while remaining > 0 {
            let Some(key) = self.first() else {
                break;
            };
            let level = &mut self.nodes[key];
            if !Self::eligible(limit, level.price) {
                break;
            }

            if level.quantity > remaining {
                level.quantity -= remaining;
                remaining = 0;
            } else {
                remaining -= level.quantity;
                self.pop_first();
            }
        }

        remaining
    }

    /// Remove `quantity` from the level at `price`.
    ///
    /// The level is erased if it holds no more than `quantity`.
    ///
    /// # Returns
    ///
    /// `None` if no level exists at `price` (nothing changes), otherwise the
    /// quantity left at the level, `Some(0)` meaning it was erased.
    pub fn reduce_at(&mut self, price: Price, quantity: Qty) -> Option<Qty> {
        let key = self.find(price)?;
        let node = &mut self.nodes[key];

        if node.quantity > quantity {
            node.quantity -= quantity;
            return Some(node.quantity);
        }

        let stored = node.price;
        self.root = self.remove_node(self.root, stored);
        Some(0)
    }

    /// Remove every level. Arena chunks stay allocated.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
    }

    // ========================================================================
    // Tree internals
    // ========================================================================

    #[inline(always)]
    fn eligible(limit: Option<Price>, price: Price) -> bool {
        match limit {
            Some(limit) => !limit.is_nan() && !O::precedes(limit, price),
            None => true,
        }
    }

    fn find(&self, price: Price) -> Option<SlotKey> {
        let mut cursor = self.root;
        while let Some(key) = cursor {
            let node = &self.nodes[key];
            if O::precedes(price, node.price) {
                cursor = node.left;
            } else if O::precedes(node.price, price) {
                cursor = node.right;
            } else {
                return Some(key);
            }
        }
        None
    }

    #[inline]
    fn first(&self) -> Option<SlotKey> {
        let mut key = self.root?;
        while let Some(left) = self.nodes[key].left {
            key = left;
        }
        Some(key)
    }

    fn pop_first(&mut self) -> Option<LevelNode> {
        let root = self.root?;
        let (new_root, min) = self.detach_min(root);
        self.root = new_root;
        self.nodes.free(min)
    }

    #[inline]
    fn height(&self, key: Option<SlotKey>) -> u8 {
        key.map_or(0, |key| self.nodes[key].height)
    }

    #[inline]
    fn balance_factor(&self, key: SlotKey) -> i16 {
        let node = &self.nodes[key];
        i16::from(self.height(node.left)) - i16::from(self.height(node.right))
    }

    #[inline]
    fn update_height(&mut self, key: SlotKey) {
        let node = &self.nodes[key];
        let height = 1 + self.height(node.left).max(self.height(node.right));
        self.nodes[key].height = height;
    }

    fn rotate_right(&mut self, key: SlotKey) -> SlotKey {
        let Some(pivot) = self.nodes[key].left else {
            return key;
        };
        self.nodes[key].left = self.nodes[pivot].right;
        self.nodes[pivot].right = Some(key);
        self.update_height(key);
        self.update_height(pivot);
        pivot
    }

    fn rotate_left(&mut self, key: SlotKey) -> SlotKey {
        let Some(pivot) = self.nodes[key].right else {
            return key;
        };
        self.nodes[key].right = self.nodes[pivot].left;
        self.nodes[pivot].left = Some(key);
        self.update_height(key);
        self.update_height(pivot);
        pivot
    }

    fn rebalance(&mut self, key: SlotKey) -> SlotKey {
        self.update_height(key);
        let balance = self.balance_factor(key);

        if balance > 1 {
            if let Some(left) = self.nodes[key].left {
                if self.balance_factor(left) < 0 {
                    let rotated = self.rotate_left(left);
                    self.nodes[key].left = Some(rotated);
                }
            }
            return self.rotate_right(key);
        }

        if balance < -1 {
            if let Some(right) = self.nodes[key].right {
                if self.balance_factor(right) > 0 {
                    let rotated = self.rotate_right(right);
                    self.nodes[key].right = Some(rotated);
                }
            }
            return self.rotate_left(key);
        }

        key
    }

    fn insert_node(&mut self, subtree: Option<SlotKey>, key: SlotKey) -> SlotKey {
        let Some(root) = subtree else {
            return key;
        };

        let price = self.nodes[key].price;
        if O::precedes(price, self.nodes[root].price) {
            let left = self.nodes[root].left;
            let child = self.insert_node(left, key);
            self.nodes[root].left = Some(child);
        } else {
            let right = self.nodes[root].right;
            let child = self.insert_node(right, key);
            self.nodes[root].right = Some(child);
        }

        self.rebalance(root)
    }

    /// Unlink the highest-priority node of `subtree`, returning the new
    /// subtree root and the detached key (still allocated).
    fn detach_min(&mut self, subtree: SlotKey) -> (Option<SlotKey>, SlotKey) {
        match self.nodes[subtree].left {
            None => (self.nodes[subtree].right, subtree),
            Some(left) => {
                let (new_left, min) = self.detach_min(left);
                self.nodes[subtree].left = new_left;
                (Some(self.rebalance(subtree)), min)
            }
        }
    }

    fn remove_node(&mut self, subtree: Option<SlotKey>, price: Price) -> Option<SlotKey> {
        let root = subtree?;
        let node_price = self.nodes[root].price;

        if O::precedes(price, node_price) {
            let left = self.nodes[root].left;
            self.nodes[root].left = self.remove_node(left, price);
        } else if O::precedes(node_price, price) {
            let right = self.nodes[root].right;
            self.nodes[root].right = self.remove_node(right, price);
        } else {
            let (left, right) = (self.nodes[root].left, self.nodes[root].right);
            let replacement = match (left, right) {
                (None, child) | (child, None) => child,
                (Some(left), Some(right)) => {
                    let (new_right, successor) = self.detach_min(right);
                    self.nodes[successor].left = Some(left);
                    self.nodes[successor].right = new_right;
                    Some(self.rebalance(successor))
                }
            };
            self.nodes.free(root);
            return replacement;
        }

        Some(self.rebalance(root))
    }
}

impl<O: PriceOrdering> fmt::Debug for Ledger<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ledger")
            .field("side", &O::SIDE)
            .field("levels", &self.iter().collect::<Vec<_>>())
            .field("arena", &self.nodes)
            .finish()
    }
}

// ============================================================================
// Iterator
// ============================================================================

/// In-order (priority order) traversal without heap allocation.
pub struct Iter<'a, O: PriceOrdering> {
    nodes: &'a ChunkedSlab<LevelNode>,
    stack: [Option<SlotKey>; MAX_HEIGHT],
    depth: usize,
    _ordering: PhantomData<O>,
}

impl<O: PriceOrdering> Iter<'_, O> {
    fn push_left_spine(&mut self, mut cursor: Option<SlotKey>) {
        while let Some(key) = cursor {
            if self.depth == MAX_HEIGHT {
                break;
            }
            self.stack[self.depth] = Some(key);
            self.depth += 1;
            cursor = self.nodes[key].left;
        }
    }
}

impl<O: PriceOrdering> Iterator for Iter<'_, O> {
    type Item = PriceLevel;

    fn next(&mut self) -> Option<PriceLevel> {
        if self.depth == 0 {
            return None;
        }
        self.depth -= 1;
        let key = self.stack[self.depth].take()?;
        let node = &self.nodes[key];
        self.push_left_spine(node.right);
        Some(node.level())
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config() -> ArenaConfig {
        ArenaConfig::new(4, 2)
    }

    fn prices<O: PriceOrdering>(ledger: &Ledger<O>) -> Vec<Price> {
        ledger.iter().map(|level| level.price).collect()
    }

    /// Recompute heights and check the AVL balance of every node.
    fn assert_balanced<O: PriceOrdering>(ledger: &Ledger<O>) {
        fn walk<O: PriceOrdering>(ledger: &Ledger<O>, key: Option<SlotKey>) -> u8 {
            let Some(key) = key else { return 0 };
            let node = &ledger.nodes[key];
            let left = walk(ledger, node.left);
            let right = walk(ledger, node.right);
            assert!((i16::from(left) - i16::from(right)).abs() <= 1, "unbalanced at {}", node.price);
            assert_eq!(node.height, 1 + left.max(right), "stale height at {}", node.price);
            node.height
        }
        walk(ledger, ledger.root);
    }

    #[test]
    fn test_ledger_new() {
        let bids = Bids::new();
        let asks = Asks::new();

        assert!(bids.is_empty());
        assert_eq!(bids.len(), 0);
        assert_eq!(bids.top_price(), f64::NEG_INFINITY);
        assert_eq!(asks.top_price(), f64::INFINITY);
        assert!(bids.top().is_empty());
        assert_eq!(asks.arena().chunk_count(), 0);
    }

    #[test]
    fn test_bids_iterate_descending() {
        let mut bids = Bids::new();
        for price in [10.0, 12.0, 9.0, 11.0, 8.5] {
            assert!(bids.upsert(price, 1).unwrap());
        }

        assert_eq!(prices(&bids), vec![12.0, 11.0, 10.0, 9.0, 8.5]);
        assert_eq!(bids.top_price(), 12.0);
    }

    #[test]
    fn test_asks_iterate_ascending() {
        let mut asks = Asks::new();
        for price in [10.0, 12.0, 9.0, 11.0, 8.5] {
            asks.upsert(price, 1).unwrap();
        }

        assert_eq!(prices(&asks), vec![8.5, 9.0, 10.0, 11.0, 12.0]);
        assert_eq!(asks.top_price(), 8.5);
    }

    #[test]
    fn test_upsert_merges_within_epsilon() {
        let mut asks = Asks::new();

        assert!(asks.upsert(100.0000001, 5).unwrap());
        assert!(!asks.upsert(100.0000002, 3).unwrap());

        assert_eq!(asks.len(), 1);
        assert_eq!(asks.quantity_at(100.0), Some(8));
    }

    #[test]
    fn test_upsert_zero_is_noop() {
        let mut bids = Bids::new();

        assert!(!bids.upsert(10.0, 0).unwrap());
        assert!(bids.is_empty());
    }

    #[test]
    fn test_upsert_non_finite_is_noop() {
        let mut bids = Bids::new();
        bids.upsert(10.0, 5).unwrap();

        assert!(!bids.upsert(f64::NAN, 1).unwrap());
        assert!(!bids.upsert(f64::INFINITY, 1).unwrap());
        bids.upsert(9.0, 5).unwrap();

        assert_eq!(prices(&bids), vec![10.0, 9.0]);
        assert_eq!(bids.total_quantity(), 10);
        assert_balanced(&bids);
    }

    #[test]
    fn test_nan_limit_matches_nothing() {
        let mut asks = Asks::new();
        asks.upsert(10.0, 5).unwrap();
        asks.upsert(20.0, 5).unwrap();

        assert_eq!(asks.matchable_quantity(Some(f64::NAN), 12), 0);
        assert_eq!(asks.consume_from(Some(f64::NAN), 12), 12);
        assert_eq!(asks.total_quantity(), 10);
    }

    #[test]
    fn test_upsert_capacity_exceeded() {
        let mut bids = Bids::with_config(&ArenaConfig::new(2, 1));

        bids.upsert(1.0, 1).unwrap();
        bids.upsert(2.0, 1).unwrap();
        assert!(!bids.can_insert(3.0));
        assert!(bids.can_insert(2.0));

        assert_eq!(
            bids.upsert(3.0, 1),
            Err(SlabError::CapacityExceeded { capacity: 2 })
        );
        // Existing level still accepts quantity
        assert_eq!(bids.upsert(2.0, 4), Ok(false));
        assert_eq!(prices(&bids), vec![2.0, 1.0]);
        assert_eq!(bids.quantity_at(2.0), Some(5));
    }

    #[test]
    fn test_consume_from_stops_at_limit() {
        let mut asks = Asks::new();
        asks.upsert(10.0, 2).unwrap();
        asks.upsert(11.0, 3).unwrap();
        asks.upsert(12.0, 4).unwrap();

        let leftover = asks.consume_from(Some(11.0), 10);

        assert_eq!(leftover, 5);
        assert_eq!(prices(&asks), vec![12.0]);
        assert_eq!(asks.quantity_at(12.0), Some(4));
    }

    #[test]
    fn test_consume_from_limit_is_inclusive_within_epsilon() {
        let mut bids = Bids::new();
        bids.upsert(10.0000005, 2).unwrap();

        assert_eq!(bids.consume_from(Some(10.0), 2), 0);
        assert!(bids.is_empty());
    }

    #[test]
    fn test_consume_from_partial_level() {
        let mut bids = Bids::new();
        bids.upsert(10.0, 5).unwrap();
        bids.upsert(9.0, 5).unwrap();

        let leftover = bids.consume_from(Some(9.0), 7);

        assert_eq!(leftover, 0);
        assert_eq!(bids.iter().collect::<Vec<_>>(), vec![PriceLevel::new(9.0, 3)]);
    }

    #[test]
    fn test_consume_from_exact_level_erases_it() {
        let mut asks = Asks::new();
        asks.upsert(10.0, 5).unwrap();
        asks.upsert(11.0, 5).unwrap();

        assert_eq!(asks.consume_from(None, 5), 0);
        assert_eq!(prices(&asks), vec![11.0]);
    }

    #[test]
    fn test_consume_from_unbounded_exhausts_side() {
        let mut asks = Asks::new();
        asks.upsert(10.0, 1).unwrap();
        asks.upsert(1000.0, 1).unwrap();

        assert_eq!(asks.consume_from(None, 5), 3);
        assert!(asks.is_empty());
        assert_eq!(asks.top_price(), f64::INFINITY);
    }

    #[test]
    fn test_consume_from_nothing_eligible() {
        let mut asks = Asks::new();
        asks.upsert(10.0, 1).unwrap();

        assert_eq!(asks.consume_from(Some(9.0), 5), 5);
        assert_eq!(asks.quantity_at(10.0), Some(1));
    }

    #[test]
    fn test_matchable_quantity() {
        let mut asks = Asks::new();
        asks.upsert(10.0, 2).unwrap();
        asks.upsert(11.0, 3).unwrap();
        asks.upsert(12.0, 4).unwrap();

        assert_eq!(asks.matchable_quantity(Some(11.0), 100), 5);
        assert_eq!(asks.matchable_quantity(Some(11.0), 4), 4);
        assert_eq!(asks.matchable_quantity(None, 100), 9);
        assert_eq!(asks.matchable_quantity(Some(9.0), 100), 0);
        // Nothing consumed
        assert_eq!(asks.total_quantity(), 9);
    }

    #[test]
    fn test_reduce_at() {
        let mut bids = Bids::new();
        bids.upsert(10.0, 5).unwrap();
        bids.upsert(9.0, 2).unwrap();

        assert_eq!(bids.reduce_at(10.0, 3), Some(2));
        assert_eq!(bids.quantity_at(10.0), Some(2));

        assert_eq!(bids.reduce_at(10.0, 2), Some(0));
        assert!(!bids.contains(10.0));

        // Over-cancel erases the level
        assert_eq!(bids.reduce_at(9.0, 50), Some(0));
        assert!(bids.is_empty());
    }

    #[test]
    fn test_reduce_at_missing_level_is_noop() {
        let mut asks = Asks::new();
        asks.upsert(10.0, 5).unwrap();

        assert_eq!(asks.reduce_at(10.5, 5), None);
        assert_eq!(asks.quantity_at(10.0), Some(5));
        assert_eq!(asks.len(), 1);
    }

    #[test]
    fn test_snapshot() {
        let mut bids = Bids::new();
        for (i, price) in [5.0, 7.0, 6.0].into_iter().enumerate() {
            bids.upsert(price, i as Qty + 1).unwrap();
        }

        assert_eq!(
            bids.snapshot(2),
            vec![PriceLevel::new(7.0, 2), PriceLevel::new(6.0, 3)]
        );
        assert_eq!(bids.snapshot(10).len(), 3);
        assert!(bids.snapshot(0).is_empty());

        let mut out = [PriceLevel::ZERO; 5];
        assert_eq!(bids.snapshot_into(&mut out), 3);
        assert_eq!(out[2], PriceLevel::new(5.0, 1));
        assert_eq!(out[3], PriceLevel::ZERO);
    }

    #[test]
    fn test_snapshot_is_a_copy() {
        let mut asks = Asks::new();
        asks.upsert(10.0, 5).unwrap();

        let snapshot = asks.snapshot(1);
        asks.consume_from(None, 5);

        assert_eq!(snapshot, vec![PriceLevel::new(10.0, 5)]);
        assert!(asks.is_empty());
    }

    #[test]
    fn test_balanced_after_many_inserts_and_removals() {
        let mut asks = Asks::with_config(&ArenaConfig::new(64, 64));

        for i in 0..1000 {
            asks.upsert(i as Price, 1).unwrap();
        }
        assert_balanced(&asks);
        assert_eq!(asks.len(), 1000);

        for i in (0..1000).step_by(3) {
            assert_eq!(asks.reduce_at(i as Price, 1), Some(0));
        }
        assert_balanced(&asks);

        asks.consume_from(Some(500.0), u64::MAX);
        assert_balanced(&asks);
        assert!(asks.top_price() > 500.0);

        let listed = prices(&asks);
        assert!(listed.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_erased_levels_recycle_arena_cells() {
        let mut bids = Bids::with_config(&small_config());

        for round in 0..100 {
            for i in 0..8 {
                bids.upsert((round * 10 + i) as Price, 1).unwrap();
            }
            assert_eq!(bids.consume_from(None, 8), 0);
        }

        assert!(bids.is_empty());
        assert_eq!(bids.arena().chunk_count(), 2);
    }

    #[test]
    fn test_clear() {
        let mut asks = Asks::with_config(&small_config());
        asks.upsert(1.0, 1).unwrap();
        asks.upsert(2.0, 1).unwrap();

        asks.clear();

        assert!(asks.is_empty());
        assert_eq!(asks.len(), 0);
        assert_eq!(asks.top_price(), f64::INFINITY);
        asks.upsert(3.0, 1).unwrap();
        assert_eq!(prices(&asks), vec![3.0]);
    }
}
