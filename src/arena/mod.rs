//! Fixed-capacity slab arena backing the ledgers.
//!
//! ## Design
//!
//! The arena replaces per-node heap allocation on the matching hot path:
//!
//! - **Chunked storage**: cells are created a chunk at a time (8192 by
//!   default), lazily, up to a configured chunk count
//! - **Free-index stack**: freed cells are recycled before any new cell is
//!   touched
//! - **Stable keys**: callers hold a [`SlotKey`] (index + generation), never
//!   a reference, so a freed or foreign key can be detected and ignored
//!
//! ## Performance
//!
//! | Operation | Complexity |
//! |-----------|------------|
//! | allocate | O(1) amortized |
//! | free | O(1) |
//! | get | O(1) |
//!
//! Not thread safe; one writer owns the arena.

pub mod slab;

pub use slab::{ChunkedSlab, SlotKey};
