//! Configuration for arena sizing and snapshot depth.
//!
//! Loaded from TOML; every field has a default, so an empty file is a valid
//! configuration.
//!
//! ```toml
//! snapshot_depth = 10
//!
//! [arena]
//! chunk_capacity = 8192
//! max_chunks = 4096
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Cells per arena chunk.
pub const DEFAULT_CHUNK_CAPACITY: usize = 8192;

/// Maximum chunks per arena.
pub const DEFAULT_MAX_CHUNKS: usize = 4096;

/// Levels per side printed by the driver binary.
pub const DEFAULT_SNAPSHOT_DEPTH: usize = 10;

fn default_chunk_capacity() -> usize {
    DEFAULT_CHUNK_CAPACITY
}

fn default_max_chunks() -> usize {
    DEFAULT_MAX_CHUNKS
}

fn default_snapshot_depth() -> usize {
    DEFAULT_SNAPSHOT_DEPTH
}

/// Sizing of one ledger arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArenaConfig {
    /// Cells per chunk; must be a power of two
    #[serde(default = "default_chunk_capacity")]
    pub chunk_capacity: usize,

    /// Upper bound on chunks; `chunk_capacity * max_chunks` is the level cap
    #[serde(default = "default_max_chunks")]
    pub max_chunks: usize,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            chunk_capacity: DEFAULT_CHUNK_CAPACITY,
            max_chunks: DEFAULT_MAX_CHUNKS,
        }
    }
}

impl ArenaConfig {
    pub fn new(chunk_capacity: usize, max_chunks: usize) -> Self {
        Self {
            chunk_capacity,
            max_chunks,
        }
    }

    /// Maximum number of levels a ledger using this config can hold
    pub fn capacity(&self) -> usize {
        self.chunk_capacity.saturating_mul(self.max_chunks)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.chunk_capacity == 0 || !self.chunk_capacity.is_power_of_two() {
            return Err(ConfigError::Invalid(format!(
                "arena.chunk_capacity must be a non-zero power of two, got {}",
                self.chunk_capacity
            )));
        }
        if self.max_chunks == 0 {
            return Err(ConfigError::Invalid("arena.max_chunks must be non-zero".into()));
        }
        if self.capacity() > u32::MAX as usize {
            return Err(ConfigError::Invalid(format!(
                "arena capacity {} exceeds {} cells",
                self.capacity(),
                u32::MAX
            )));
        }
        Ok(())
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrokerConfig {
    #[serde(default)]
    pub arena: ArenaConfig,

    #[serde(default = "default_snapshot_depth")]
    pub snapshot_depth: usize,
}

impl Default for BrokerConfig {
    fn default() -> Self {
        Self {
            arena: ArenaConfig::default(),
            snapshot_depth: DEFAULT_SNAPSHOT_DEPTH,
        }
    }
}

impl BrokerConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: BrokerConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.arena.validate()?;
        if self.snapshot_depth == 0 {
            return Err(ConfigError::Invalid("snapshot_depth must be non-zero".into()));
        }
        Ok(())
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
