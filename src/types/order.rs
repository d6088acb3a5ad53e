//! Order value read by the matching engine.
//!
//! ## Raw Codes
//!
//! `Side`, `OrderType` and `TimeInForce` carry a `u8` code for feeds that
//! deliver them as bytes. Code 0 is always `Unknown`; an order carrying an
//! unknown side or type is ignored by the engine.
//!
//! ## Fields Read By The Engine
//!
//! The engine only ever reads `side`, `order_type`, `price` and `remaining`.
//! The rest travels with the order for the caller's bookkeeping.

use std::fmt;

use crate::types::price::{Price, Qty};

// ============================================================================
// Side enum
// ============================================================================

/// Order side.
///
/// Raw codes:
/// - Unknown = 0
/// - Buy = 1
/// - Sell = 2
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Side {
    /// Side not recognised; the engine treats the order as a no-op
    #[default]
    Unknown,
    /// Buy order (bid) - wants to purchase the asset
    Buy,
    /// Sell order (ask) - wants to sell the asset
    Sell,
}

impl Side {
    /// Convert to the raw code
    pub fn to_u8(self) -> u8 {
        match self {
            Side::Unknown => 0,
            Side::Buy => 1,
            Side::Sell => 2,
        }
    }

    /// Convert from the raw code; anything unrecognised maps to `Unknown`
    pub fn from_u8(value: u8) -> Self {
        match value {
            1 => Side::Buy,
            2 => Side::Sell,
            _ => Side::Unknown,
        }
    }

    /// Returns the opposite side (`Unknown` stays `Unknown`)
    pub fn opposite(self) -> Self {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
            Side::Unknown => Side::Unknown,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Side::Buy => "Buy",
            Side::Sell => "Sell",
            Side::Unknown => "Unknown",
        })
    }
}

// ============================================================================
// OrderType enum
// ============================================================================

/// Order type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OrderType {
    /// Type not recognised; the engine treats the order as a no-op
    #[default]
    Unknown,
    /// Executes at the given price or better, residual rests
    Limit,
    /// Executes against any available liquidity, residual is dropped
    Market,
}

impl OrderType {
    /// Convert to the raw code
    pub fn to_u8(self) -> u8 {
        match self {
            OrderType::Unknown => 0,
            OrderType::Limit => 1,
            OrderType::Market => 2,
        }
    }

    /// Convert from the raw code; anything unrecognised maps to `Unknown`
    pub fn from_u8(value: u8) -> Self {
        match value {
            1 => OrderType::Limit,
            2 => OrderType::Market,
            _ => OrderType::Unknown,
        }
    }
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OrderType::Limit => "Limit",
            OrderType::Market => "Market",
            OrderType::Unknown => "Unknown",
        })
    }
}

// ============================================================================
// TimeInForce enum
// ============================================================================

/// Time-in-force.
///
/// Carried for the caller; the engine applies the same resting behaviour
/// whatever the value. Callers needing strict FOK must not route such
/// orders through this engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TimeInForce {
    #[default]
    Unknown,
    /// Immediate or cancel
    Ioc,
    /// Good till cancelled
    Gtc,
    /// Fill or kill
    Fok,
}

impl TimeInForce {
    /// Convert to the raw code
    pub fn to_u8(self) -> u8 {
        match self {
            TimeInForce::Unknown => 0,
            TimeInForce::Ioc => 1,
            TimeInForce::Gtc => 2,
            TimeInForce::Fok => 3,
        }
    }

    /// Convert from the raw code; anything unrecognised maps to `Unknown`
    pub fn from_u8(value: u8) -> Self {
        match value {
            1 => TimeInForce::Ioc,
            2 => TimeInForce::Gtc,
            3 => TimeInForce::Fok,
            _ => TimeInForce::Unknown,
        }
    }
}

impl fmt::Display for TimeInForce {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TimeInForce::Ioc => "IOC",
            TimeInForce::Gtc => "GTC",
            TimeInForce::Fok => "FOK",
            TimeInForce::Unknown => "Unknown",
        })
    }
}

// ============================================================================
// Order struct
// ============================================================================

/// An order handed to the engine.
///
/// The engine does not retain the value beyond the call.
///
/// ## Example
///
/// ```
/// use flatbook::types::{Order, OrderType, Side, TimeInForce};
///
/// let order = Order::limit(Side::Buy, 10.0, 5)
///     .with_id(7)
///     .with_time_in_force(TimeInForce::Gtc);
///
/// assert_eq!(order.order_type, OrderType::Limit);
/// assert_eq!(order.remaining, 5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Order {
    /// Client order identifier (not used by the engine)
    pub id: u64,

    pub side: Side,

    pub order_type: OrderType,

    /// Limit price; ignored for matching when the order is a market order
    pub price: Price,

    /// Original quantity
    pub quantity: Qty,

    /// Quantity still open; this is what the engine matches or cancels
    pub remaining: Qty,

    pub time_in_force: TimeInForce,

    /// Creation time in nanoseconds (not used by the engine)
    pub timestamp_ns: u64,
}

impl Order {
    /// Create an order with `remaining == quantity`
    pub fn new(
        side: Side,
        order_type: OrderType,
        price: Price,
        quantity: Qty,
        time_in_force: TimeInForce,
    ) -> Self {
        Self {
            id: 0,
            side,
            order_type,
            price,
            quantity,
            remaining: quantity,
            time_in_force,
            timestamp_ns: 0,
        }
    }

    /// Create a GTC limit order
    pub fn limit(side: Side, price: Price, quantity: Qty) -> Self {
        Self::new(side, OrderType::Limit, price, quantity, TimeInForce::Gtc)
    }

    /// Create an IOC market order
    pub fn market(side: Side, quantity: Qty) -> Self {
        Self::new(side, OrderType::Market, 0.0, quantity, TimeInForce::Ioc)
    }

    pub fn with_id(mut self, id: u64) -> Self {
        self.id = id;
        self
    }

    pub fn with_time_in_force(mut self, time_in_force: TimeInForce) -> Self {
        self.time_in_force = time_in_force;
        self
    }

    pub fn with_timestamp(mut self, timestamp_ns: u64) -> Self {
        self.timestamp_ns = timestamp_ns;
        self
    }

    /// Override the open quantity (e.g. a cancel for a partially filled order)
    pub fn with_remaining(mut self, remaining: Qty) -> Self {
        self.remaining = remaining;
        self
    }

    /// Check if nothing is left open
    pub fn is_filled(&self) -> bool {
        self.remaining == 0
    }

    /// Get the filled quantity
    pub fn filled_quantity(&self) -> Qty {
        self.quantity.saturating_sub(self.remaining)
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "id:{} ts:{} price:{} qty:{} remaining:{} side:{} type:{} tif:{}",
            self.id,
            self.timestamp_ns,
            self.price,
            self.quantity,
            self.remaining,
            self.side,
            self.order_type,
            self.time_in_force
        )
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
