//! Error types.
//!
//! Only resource exhaustion is an error. Cancelling a level that does not
//! exist and submitting an order of unknown shape are defined as no-ops and
//! never surface here.

use thiserror::Error;

use crate::types::Side;

/// Errors raised by the slab arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SlabError {
    /// Every cell up to the configured maximum is in use
    #[error("slab capacity exceeded ({capacity} cells)")]
    CapacityExceeded { capacity: usize },
}

/// Errors raised by the matching engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BookError {
    /// A new level was needed on `side` but its arena is exhausted.
    /// The book is left exactly as it was before the call.
    #[error("{side} ledger capacity exceeded ({capacity} levels)")]
    CapacityExceeded { side: Side, capacity: usize },
}

impl BookError {
    pub(crate) fn from_slab(side: Side, err: SlabError) -> Self {
        match err {
            SlabError::CapacityExceeded { capacity } => BookError::CapacityExceeded { side, capacity },
        }
    }
}

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}
