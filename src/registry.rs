//! Order-id bookkeeping in front of the broker.
//!
//! The broker aggregates quantity per price and has no notion of order
//! identity. `OrderRegistry` remembers, per client order id, where a limit
//! order rested so it can later be cancelled by id.
//!
//! ## Memory Model
//!
//! - **Slab**: resting entries, keys reused after removal
//! - **HashMap**: order id to slab key for O(1) cancel
//!
//! Fills are not reported per order, so a recorded quantity is an upper
//! bound on what is still resting for that order. A cancel asks the ledger
//! to remove the recorded quantity; the ledger clips to what the level holds.

use std::collections::HashMap;

use slab::Slab;
use tracing::debug;

use crate::engine::{Broker, Execution};
use crate::types::{Order, OrderType, Price, Qty, Side};

/// Where and how much a limit order rested.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RestingOrder {
    pub id: u64,
    pub side: Side,
    pub price: Price,

    /// Quantity posted by `insert_order`
    pub quantity: Qty,
}

impl RestingOrder {
    /// The cancel message the broker understands
    pub fn cancel_order(&self) -> Order {
        Order::limit(self.side, self.price, self.quantity).with_id(self.id)
    }
}

/// Client order id to resting-level index.
#[derive(Debug, Default)]
pub struct OrderRegistry {
    entries: Slab<RestingOrder>,
    by_id: HashMap<u64, usize>,
}

impl OrderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-allocate room for `capacity` resting orders
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Slab::with_capacity(capacity),
            by_id: HashMap::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remember the posted part of `order`.
    ///
    /// # Arguments
    ///
    /// * `order` - The order that was passed to `insert_order`
    /// * `execution` - What `insert_order` returned for it
    ///
    /// # Returns
    ///
    /// `true` if something was recorded. Market orders and fully filled
    /// limits never rest and are skipped. Re-recording an id replaces it.
    pub fn record(&mut self, order: &Order, execution: &Execution) -> bool {
        if order.order_type != OrderType::Limit || execution.posted == 0 {
            return false;
        }

        let entry = RestingOrder {
            id: order.id,
            side: order.side,
            price: order.price,
            quantity: execution.posted,
        };

        match self.by_id.get(&order.id) {
            Some(&key) => self.entries[key] = entry,
            None => {
                let key = self.entries.insert(entry);
                self.by_id.insert(order.id, key);
            }
        }
        true
    }

    pub fn get(&self, id: u64) -> Option<&RestingOrder> {
        self.by_id.get(&id).and_then(|&key| self.entries.get(key))
    }

    /// Cancel order `id` on `broker` and forget it.
    ///
    /// # Returns
    ///
    /// The forgotten entry, or `None` if `id` is unknown. An entry whose level
    /// was already consumed by matching is still returned and forgotten.
    pub fn cancel(&mut self, id: u64, broker: &mut Broker) -> Option<RestingOrder> {
        let key = self.by_id.remove(&id)?;
        let entry = self.entries.remove(key);

        if !broker.cancel_order(&entry.cancel_order()) {
            debug!(id, price = entry.price, side = %entry.side, "level already gone at cancel");
        }
        Some(entry)
    }

    /// Forget every entry without touching any broker
    pub fn clear(&mut self) {
        self.entries.clear();
        self.by_id.clear();
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
