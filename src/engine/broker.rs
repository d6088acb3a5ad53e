//! The matching engine for one instrument.
//!
//! ## Dispatch
//!
//! | type | side | handler |
//! |------|------|---------|
//! | Limit | Buy | match asks up to the limit, rest residual on bids |
//! | Limit | Sell | match bids down to the limit, rest residual on asks |
//! | Market | Buy | match the whole ask side, drop residual |
//! | Market | Sell | match the whole bid side, drop residual |
//! | anything else | | no-op |
//!
//! ## Best Prices
//!
//! `best_bid` and `best_ask` are cached and refreshed in the same call that
//! mutates the corresponding ledger, so after every call they equal the
//! first level of their side (or the side's sentinel when empty).
//!
//! ## Market Orders
//!
//! Market orders walk the whole opposite side. Bounding slippage (e.g. to
//! 1% from the best opposing price) is the job of a risk layer in front of
//! this engine: it must clip the order before calling `insert_order`. The
//! unmatched residual of a market order is neither rested nor reported.

use sha2::{Digest, Sha256};
use tracing::{trace, warn};

use crate::config::ArenaConfig;
use crate::error::BookError;
use crate::orderbook::{Asks, BestPrice, Bids, Ledger, PriceOrdering};
use crate::types::price::equal;
use crate::types::{Order, OrderType, Orderbook, Price, Qty, Side};

/// Outcome of `insert_order`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Execution {
    /// Quantity taken from the opposite side
    pub filled: Qty,

    /// Quantity rested on the order's own side (always 0 for market orders)
    pub posted: Qty,
}

impl Execution {
    /// Check if the order neither matched nor rested
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.filled == 0 && self.posted == 0
    }
}

/// Aggregated-level matching engine.
///
/// Not thread safe and not `Clone`: feed it from a single thread.
///
/// ## Example
///
/// ```
/// use flatbook::engine::Broker;
/// use flatbook::types::{Order, Side};
///
/// let mut broker = Broker::new();
/// broker.insert_order(&Order::limit(Side::Buy, 10.0, 5)).unwrap();
///
/// let execution = broker.insert_order(&Order::limit(Side::Sell, 9.0, 3)).unwrap();
/// assert_eq!(execution.filled, 3);
/// assert_eq!(broker.best_bid(), 10.0);
/// assert_eq!(broker.bids().quantity_at(10.0), Some(2));
/// ```
#[derive(Debug)]
pub struct Broker {
    bids: Bids,
    best_bid: BestPrice,
    asks: Asks,
    best_ask: BestPrice,
}

impl Default for Broker {
    fn default() -> Self {
        Self::new()
    }
}

impl Broker {
    /// Create an empty book with the default arena sizing
    pub fn new() -> Self {
        Self::with_config(&ArenaConfig::default())
    }

    /// Create an empty book; each side gets its own arena sized by `config`
    pub fn with_config(config: &ArenaConfig) -> Self {
        let bids = Bids::with_config(config);
        let asks = Asks::with_config(config);
        Self {
            best_bid: bids.top(),
            bids,
            best_ask: asks.top(),
            asks,
        }
    }

    // ========================================================================
    // Order Entry
    // ========================================================================

    /// Apply an incoming order.
    ///
    /// # Errors
    ///
    /// [`BookError::CapacityExceeded`] when a limit order would have to rest
    /// at a new level but its side's arena is full. The check happens before
    /// anything is matched, so the book is unchanged on error.
    ///
    /// A limit order with a NaN or infinite price is ignored like an order
    /// of unknown shape.
    pub fn insert_order(&mut self, order: &Order) -> Result<Execution, BookError> {
        if order.order_type == OrderType::Limit && !order.price.is_finite() {
            trace!(side = %order.side, price = order.price, "ignoring limit order with non-finite price");
            return Ok(Execution::default());
        }

        match (order.order_type, order.side) {
            (OrderType::Limit, Side::Buy) => Self::match_limit(
                &mut self.bids,
                &mut self.best_bid,
                &mut self.asks,
                &mut self.best_ask,
                order.price,
                order.remaining,
            ),
            (OrderType::Limit, Side::Sell) => Self::match_limit(
                &mut self.asks,
                &mut self.best_ask,
                &mut self.bids,
                &mut self.best_bid,
                order.price,
                order.remaining,
            ),
            (OrderType::Market, Side::Buy) => Ok(Self::match_market(
                &mut self.asks,
                &mut self.best_ask,
                order.remaining,
            )),
            (OrderType::Market, Side::Sell) => Ok(Self::match_market(
                &mut self.bids,
                &mut self.best_bid,
                order.remaining,
            )),
            (order_type, side) => {
                trace!(%order_type, %side, "ignoring order of unknown shape");
                Ok(Execution::default())
            }
        }
    }

    /// Remove resting quantity for a limit order.
    ///
    /// Looks up the level at `order.price` on `order.side` and takes
    /// `order.remaining` from it, erasing the level if that is all it holds.
    /// There is no per-order identity here: a cancel naming a price with no
    /// level, a non-finite price, a market order or an unknown side is a
    /// no-op, not an error.
    ///
    /// # Returns
    ///
    /// `true` if a level was reduced or erased.
    pub fn cancel_order(&mut self, order: &Order) -> bool {
        if order.order_type != OrderType::Limit {
            trace!(order_type = %order.order_type, "only limit orders can be cancelled");
            return false;
        }
        if !order.price.is_finite() {
            trace!(side = %order.side, price = order.price, "cancel ignored: non-finite price");
            return false;
        }

        let touched = match order.side {
            Side::Buy => Self::reduce_level(&mut self.bids, &mut self.best_bid, order.price, order.remaining),
            Side::Sell => Self::reduce_level(&mut self.asks, &mut self.best_ask, order.price, order.remaining),
            Side::Unknown => false,
        };
        if !touched {
            trace!(side = %order.side, price = order.price, "cancel ignored: no resting level");
        }
        touched
    }

    /// Copy up to `min(depth, DEPTH)` levels per side into `book`.
    ///
    /// Pure read; `book` is the only storage written.
    pub fn get_order_book<const DEPTH: usize>(&self, book: &mut Orderbook<DEPTH>, depth: usize) {
        let depth = depth.min(DEPTH);
        book.bid_count = self.bids.snapshot_into(&mut book.bid_levels[..depth]);
        book.ask_count = self.asks.snapshot_into(&mut book.ask_levels[..depth]);
    }

    /// Drop every resting level on both sides
    pub fn clear(&mut self) {
        self.bids.clear();
        self.asks.clear();
        self.best_bid = self.bids.top();
        self.best_ask = self.asks.top();
    }

    // ========================================================================
    // Best Bid/Ask
    // ========================================================================

    /// Best bid, or negative infinity if there are no bids
    #[inline]
    pub fn best_bid(&self) -> Price {
        self.best_bid.price()
    }

    /// Best ask, or positive infinity if there are no asks
    #[inline]
    pub fn best_ask(&self) -> Price {
        self.best_ask.price()
    }

    #[inline]
    pub fn best_bid_price(&self) -> Option<Price> {
        self.best_bid.get()
    }

    #[inline]
    pub fn best_ask_price(&self) -> Option<Price> {
        self.best_ask.get()
    }

    /// Best ask minus best bid, when both sides have liquidity
    pub fn spread(&self) -> Option<Price> {
        match (self.best_bid.get(), self.best_ask.get()) {
            (Some(bid), Some(ask)) => Some(ask - bid),
            _ => None,
        }
    }

    // ========================================================================
    // Inspection
    // ========================================================================

    #[inline]
    pub fn bids(&self) -> &Bids {
        &self.bids
    }

    #[inline]
    pub fn asks(&self) -> &Asks {
        &self.asks
    }

    /// Whether the cached best prices agree with the ledgers
    pub fn is_consistent(&self) -> bool {
        self.best_bid.same_level(&self.bids.top()) && self.best_ask.same_level(&self.asks.top())
    }

    /// SHA-256 over both sides' levels in priority order.
    ///
    /// Two books with the same levels (bit-for-bit prices, same quantities)
    /// have the same root.
    pub fn state_root(&self) -> [u8; 32] {
        let mut hasher = Sha256::new();

        hasher.update([Side::Buy.to_u8()]);
        hasher.update((self.bids.len() as u64).to_le_bytes());
        for level in self.bids.iter() {
            hasher.update(level.price.to_bits().to_le_bytes());
            hasher.update(level.quantity.to_le_bytes());
        }

        hasher.update([Side::Sell.to_u8()]);
        hasher.update((self.asks.len() as u64).to_le_bytes());
        for level in self.asks.iter() {
            hasher.update(level.price.to_bits().to_le_bytes());
            hasher.update(level.quantity.to_le_bytes());
        }

        hasher.finalize().into()
    }

    // ========================================================================
    // Handlers
    // ========================================================================

    fn match_limit<Own: PriceOrdering, Opp: PriceOrdering>(
        own: &mut Ledger<Own>,
        own_best: &mut BestPrice,
        opposite: &mut Ledger<Opp>,
        opposite_best: &mut BestPrice,
        price: Price,
        quantity: Qty,
    ) -> Result<Execution, BookError> {
        if quantity == 0 {
            return Ok(Execution::default());
        }

        // Crosses unless the limit is strictly behind the opposite best.
        let marketable = !Opp::precedes(price, opposite_best.price());

        if !own.can_insert(price) {
            let fillable = if marketable {
                opposite.matchable_quantity(Some(price), quantity)
            } else {
                0
            };
            if fillable < quantity {
                let capacity = own.capacity();
                warn!(side = %Own::SIDE, price, quantity, capacity, "rejecting order: ledger full");
                return Err(BookError::CapacityExceeded {
                    side: Own::SIDE,
                    capacity,
                });
            }
        }

        let mut leftover = quantity;
        if marketable {
            leftover = opposite.consume_from(Some(price), quantity);
            *opposite_best = opposite.top();
        }

        if leftover > 0 {
            let created = own
                .upsert(price, leftover)
                .map_err(|err| BookError::from_slab(Own::SIDE, err))?;
            if created && (own_best.is_empty() || Own::precedes(price, own_best.price())) {
                *own_best = BestPrice::at(price);
            }
        }

        Ok(Execution {
            filled: quantity - leftover,
            posted: leftover,
        })
    }

    fn match_market<Opp: PriceOrdering>(
        opposite: &mut Ledger<Opp>,
        opposite_best: &mut BestPrice,
        quantity: Qty,
    ) -> Execution {
        if quantity == 0 || opposite.is_empty() {
            return Execution::default();
        }

        let leftover = opposite.consume_from(None, quantity);
        *opposite_best = opposite.top();
        if leftover > 0 {
            trace!(side = %Opp::SIDE, leftover, "opposite side exhausted by market order");
        }

        Execution {
            filled: quantity - leftover,
            posted: 0,
        }
    }

    fn reduce_level<O: PriceOrdering>(
        ledger: &mut Ledger<O>,
        best: &mut BestPrice,
        price: Price,
        quantity: Qty,
    ) -> bool {
        match ledger.reduce_at(price, quantity) {
            None => false,
            Some(0) => {
                if ledger.is_empty() || equal(price, best.price()) {
                    *best = ledger.top();
                }
                true
            }
            Some(_) => true,
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{PriceLevel, TimeInForce};

    fn buy(price: Price, qty: Qty) -> Order {
        Order::limit(Side::Buy, price, qty)
    }

    fn sell(price: Price, qty: Qty) -> Order {
        Order::limit(Side::Sell, price, qty)
    }

    fn levels<O: PriceOrdering>(ledger: &Ledger<O>) -> Vec<(Price, Qty)> {
        ledger.iter().map(|l| (l.price, l.quantity)).collect()
    }

    #[test]
    fn test_broker_new() {
        let broker = Broker::new();

        assert_eq!(broker.best_bid(), f64::NEG_INFINITY);
        assert_eq!(broker.best_ask(), f64::INFINITY);
        assert!(broker.best_bid_price().is_none());
        assert!(broker.spread().is_none());
        assert!(broker.is_consistent());
    }

    #[test]
    fn test_limit_buy_rests_on_empty_book() {
        let mut broker = Broker::new();

        let execution = broker.insert_order(&buy(10.0, 5)).unwrap();

        assert_eq!(execution, Execution { filled: 0, posted: 5 });
        assert_eq!(levels(broker.bids()), vec![(10.0, 5)]);
        assert_eq!(broker.best_bid(), 10.0);
        assert_eq!(broker.best_ask(), f64::INFINITY);
    }

    #[test]
    fn test_better_bid_moves_best() {
        let mut broker = Broker::new();
        broker.insert_order(&buy(10.0, 5)).unwrap();
        broker.insert_order(&buy(9.0, 5)).unwrap();
        assert_eq!(broker.best_bid(), 10.0);

        broker.insert_order(&buy(10.5, 1)).unwrap();
        assert_eq!(broker.best_bid(), 10.5);
        assert!(broker.is_consistent());
    }

    #[test]
    fn test_limit_sell_sweeps_bids_and_rests() {
        let mut broker = Broker::new();
        broker.insert_order(&buy(10.0, 2)).unwrap();
        broker.insert_order(&buy(9.5, 3)).unwrap();
        broker.insert_order(&buy(9.0, 4)).unwrap();

        let execution = broker.insert_order(&sell(9.5, 10)).unwrap();

        assert_eq!(execution, Execution { filled: 5, posted: 5 });
        assert_eq!(levels(broker.bids()), vec![(9.0, 4)]);
        assert_eq!(levels(broker.asks()), vec![(9.5, 5)]);
        assert_eq!(broker.best_bid(), 9.0);
        assert_eq!(broker.best_ask(), 9.5);
        assert_eq!(broker.spread(), Some(0.5));
        assert!(broker.is_consistent());
    }

    #[test]
    fn test_non_marketable_limit_does_not_match() {
        let mut broker = Broker::new();
        broker.insert_order(&sell(11.0, 5)).unwrap();

        let execution = broker.insert_order(&buy(10.0, 5)).unwrap();

        assert_eq!(execution, Execution { filled: 0, posted: 5 });
        assert_eq!(levels(broker.asks()), vec![(11.0, 5)]);
        assert_eq!(broker.best_bid(), 10.0);
        assert_eq!(broker.best_ask(), 11.0);
    }

    #[test]
    fn test_limit_at_opposite_best_within_epsilon_matches() {
        let mut broker = Broker::new();
        broker.insert_order(&sell(10.0, 5)).unwrap();

        let execution = broker.insert_order(&buy(9.9999995, 5)).unwrap();

        assert_eq!(execution.filled, 5);
        assert!(broker.asks().is_empty());
        assert!(broker.bids().is_empty());
    }

    #[test]
    fn test_market_buy_walks_entire_side() {
        let mut broker = Broker::new();
        broker.insert_order(&sell(10.0, 1)).unwrap();
        broker.insert_order(&sell(50.0, 1)).unwrap();
        broker.insert_order(&sell(1000.0, 1)).unwrap();

        let execution = broker.insert_order(&Order::market(Side::Buy, 2)).unwrap();

        assert_eq!(execution, Execution { filled: 2, posted: 0 });
        assert_eq!(levels(broker.asks()), vec![(1000.0, 1)]);
        assert_eq!(broker.best_ask(), 1000.0);
    }

    #[test]
    fn test_market_sell_residual_is_dropped() {
        let mut broker = Broker::new();
        broker.insert_order(&buy(10.0, 3)).unwrap();

        let execution = broker.insert_order(&Order::market(Side::Sell, 10)).unwrap();

        assert_eq!(execution, Execution { filled: 3, posted: 0 });
        assert!(broker.bids().is_empty());
        assert!(broker.asks().is_empty());
        assert_eq!(broker.best_bid(), f64::NEG_INFINITY);
    }

    #[test]
    fn test_unknown_shapes_are_noops() {
        let mut broker = Broker::new();
        broker.insert_order(&buy(10.0, 5)).unwrap();
        let root = broker.state_root();

        let mut unknown_side = sell(10.0, 5);
        unknown_side.side = Side::Unknown;
        let mut unknown_type = sell(10.0, 5);
        unknown_type.order_type = OrderType::Unknown;

        assert!(broker.insert_order(&unknown_side).unwrap().is_empty());
        assert!(broker.insert_order(&unknown_type).unwrap().is_empty());
        assert_eq!(broker.state_root(), root);
    }

    #[test]
    fn test_non_finite_limit_prices_are_ignored() {
        let mut broker = Broker::new();
        broker.insert_order(&buy(5.0, 5)).unwrap();
        broker.insert_order(&sell(10.0, 5)).unwrap();
        broker.insert_order(&sell(20.0, 5)).unwrap();
        let root = broker.state_root();

        for price in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            for side in [Side::Buy, Side::Sell] {
                let order = Order::limit(side, price, 12);
                assert!(broker.insert_order(&order).unwrap().is_empty());
                assert!(!broker.cancel_order(&order));
            }
        }
        assert_eq!(broker.state_root(), root);

        // Later orders still land on their own levels
        broker.insert_order(&buy(9.0, 5)).unwrap();
        assert_eq!(levels(broker.bids()), vec![(9.0, 5), (5.0, 5)]);
        assert_eq!(broker.best_bid(), 9.0);
        assert_eq!(broker.best_ask(), 10.0);
        assert!(broker.is_consistent());
    }

    #[test]
    fn test_nan_price_on_empty_side_does_not_create_level() {
        let mut broker = Broker::new();

        broker.insert_order(&buy(f64::NAN, 1)).unwrap();
        broker.insert_order(&buy(10.0, 5)).unwrap();
        broker.insert_order(&buy(9.0, 5)).unwrap();

        assert_eq!(levels(broker.bids()), vec![(10.0, 5), (9.0, 5)]);
        assert_eq!(broker.best_bid(), 10.0);
    }

    #[test]
    fn test_time_in_force_does_not_change_matching() {
        let mut gtc = Broker::new();
        let mut fok = Broker::new();
        for broker in [&mut gtc, &mut fok] {
            broker.insert_order(&sell(10.0, 2)).unwrap();
        }

        gtc.insert_order(&buy(10.0, 5)).unwrap();
        fok.insert_order(&buy(10.0, 5).with_time_in_force(TimeInForce::Fok)).unwrap();

        assert_eq!(gtc.state_root(), fok.state_root());
    }

    #[test]
    fn test_cancel_partial_and_full() {
        let mut broker = Broker::new();
        broker.insert_order(&buy(10.0, 5)).unwrap();
        broker.insert_order(&buy(9.0, 5)).unwrap();

        assert!(broker.cancel_order(&buy(10.0, 2)));
        assert_eq!(broker.bids().quantity_at(10.0), Some(3));
        assert_eq!(broker.best_bid(), 10.0);

        assert!(broker.cancel_order(&buy(10.0, 3)));
        assert_eq!(broker.best_bid(), 9.0);

        assert!(broker.cancel_order(&buy(9.0, 5)));
        assert_eq!(broker.best_bid(), f64::NEG_INFINITY);
        assert!(broker.is_consistent());
    }

    #[test]
    fn test_cancel_non_best_level_keeps_best() {
        let mut broker = Broker::new();
        broker.insert_order(&sell(10.0, 5)).unwrap();
        broker.insert_order(&sell(11.0, 5)).unwrap();

        assert!(broker.cancel_order(&sell(11.0, 5)));

        assert_eq!(broker.best_ask(), 10.0);
        assert_eq!(levels(broker.asks()), vec![(10.0, 5)]);
    }

    #[test]
    fn test_cancel_missing_level_is_noop() {
        let mut broker = Broker::new();
        broker.insert_order(&buy(10.0, 5)).unwrap();
        let root = broker.state_root();

        assert!(!broker.cancel_order(&buy(11.0, 5)));
        assert!(!broker.cancel_order(&sell(10.0, 5)));
        assert_eq!(broker.state_root(), root);
    }

    #[test]
    fn test_cancel_ignores_market_orders() {
        let mut broker = Broker::new();
        broker.insert_order(&buy(10.0, 5)).unwrap();

        let mut market = Order::market(Side::Buy, 5);
        market.price = 10.0;

        assert!(!broker.cancel_order(&market));
        assert_eq!(broker.bids().quantity_at(10.0), Some(5));
    }

    #[test]
    fn test_get_order_book_bounds_depth() {
        let mut broker = Broker::new();
        for price in [10.0, 9.0, 8.0] {
            broker.insert_order(&buy(price, 1)).unwrap();
        }
        for price in [11.0, 12.0] {
            broker.insert_order(&sell(price, 2)).unwrap();
        }

        let mut book = Orderbook::<2>::new();
        broker.get_order_book(&mut book, 5);
        assert_eq!(book.bids(), &[PriceLevel::new(10.0, 1), PriceLevel::new(9.0, 1)]);
        assert_eq!(book.asks(), &[PriceLevel::new(11.0, 2), PriceLevel::new(12.0, 2)]);

        broker.get_order_book(&mut book, 1);
        assert_eq!(book.bid_count, 1);
        assert_eq!(book.ask_count, 1);
    }

    #[test]
    fn test_capacity_rejection_leaves_book_untouched() {
        let mut broker = Broker::with_config(&ArenaConfig::new(2, 1));
        broker.insert_order(&buy(10.0, 1)).unwrap();
        broker.insert_order(&buy(9.0, 1)).unwrap();
        broker.insert_order(&sell(12.0, 3)).unwrap();
        let root = broker.state_root();

        // Would rest a third bid level
        let err = broker.insert_order(&buy(8.0, 1)).unwrap_err();
        assert_eq!(err, BookError::CapacityExceeded { side: Side::Buy, capacity: 2 });

        // Marketable, but partially: the residual would need a new level
        let err = broker.insert_order(&buy(12.5, 5)).unwrap_err();
        assert!(matches!(err, BookError::CapacityExceeded { .. }));
        assert_eq!(broker.state_root(), root);

        // Fully fillable orders still go through
        let execution = broker.insert_order(&buy(12.5, 3)).unwrap();
        assert_eq!(execution, Execution { filled: 3, posted: 0 });

        // Existing levels still accept quantity
        broker.insert_order(&buy(9.0, 4)).unwrap();
        assert_eq!(broker.bids().quantity_at(9.0), Some(5));
        assert!(broker.is_consistent());
    }

    #[test]
    fn test_capacity_rejection_on_ask_side() {
        let mut broker = Broker::with_config(&ArenaConfig::new(2, 1));
        broker.insert_order(&sell(11.0, 1)).unwrap();
        broker.insert_order(&sell(12.0, 1)).unwrap();
        broker.insert_order(&buy(9.0, 3)).unwrap();
        let root = broker.state_root();

        // Would rest a third ask level
        let err = broker.insert_order(&sell(13.0, 1)).unwrap_err();
        assert_eq!(err, BookError::CapacityExceeded { side: Side::Sell, capacity: 2 });

        // Marketable, but the residual would need a new level
        let err = broker.insert_order(&sell(8.5, 5)).unwrap_err();
        assert_eq!(err, BookError::CapacityExceeded { side: Side::Sell, capacity: 2 });
        assert_eq!(broker.state_root(), root);

        // Fully fillable orders still go through
        let execution = broker.insert_order(&sell(8.5, 3)).unwrap();
        assert_eq!(execution, Execution { filled: 3, posted: 0 });
        assert!(broker.bids().is_empty());

        // Existing levels still accept quantity
        broker.insert_order(&sell(11.0, 4)).unwrap();
        assert_eq!(broker.asks().quantity_at(11.0), Some(5));
        assert_eq!(broker.best_ask(), 11.0);
        assert!(broker.is_consistent());
    }

    #[test]
    fn test_zero_quantity_orders() {
        let mut broker = Broker::new();
        broker.insert_order(&sell(10.0, 5)).unwrap();

        assert!(broker.insert_order(&buy(10.0, 0)).unwrap().is_empty());
        assert!(broker.insert_order(&Order::market(Side::Buy, 0)).unwrap().is_empty());
        assert_eq!(broker.asks().quantity_at(10.0), Some(5));
    }

    #[test]
    fn test_state_root_tracks_levels() {
        let mut a = Broker::new();
        let mut b = Broker::new();

        a.insert_order(&buy(10.0, 5)).unwrap();
        b.insert_order(&buy(10.0, 3)).unwrap();
        assert_ne!(a.state_root(), b.state_root());

        b.insert_order(&buy(10.0, 2)).unwrap();
        assert_eq!(a.state_root(), b.state_root());

        // Same quantity on the other side hashes differently
        let mut c = Broker::new();
        c.insert_order(&sell(10.0, 5)).unwrap();
        assert_ne!(a.state_root(), c.state_root());
    }

    #[test]
    fn test_clear() {
        let mut broker = Broker::new();
        broker.insert_order(&buy(10.0, 5)).unwrap();
        broker.insert_order(&sell(11.0, 5)).unwrap();

        broker.clear();

        assert!(broker.bids().is_empty());
        assert!(broker.asks().is_empty());
        assert_eq!(broker.state_root(), Broker::new().state_root());
        assert!(broker.is_consistent());
    }
}
