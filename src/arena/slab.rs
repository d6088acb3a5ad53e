//! Chunked slab arena.
//!
//! ## Layout
//!
//! ```text
//! chunks: [ chunk 0 | chunk 1 | ... | chunk k ]      (allocated lazily)
//!            cells 0..C  C..2C        kC..(k+1)C
//! index  -> (index >> shift, index & mask)
//! ```
//!
//! - `cursor` is the next never-used cell; it only moves forward.
//! - `free` is a stack of recycled indices, reserved on chunk growth so it
//!   never reallocates while cells are being freed.
//! - Every cell carries a generation. A [`SlotKey`] is valid only while its
//!   generation matches; freeing bumps the generation, so double frees and
//!   keys from another arena fall through as no-ops.
//!
//! Pages are touched once, when a chunk is created. After that, allocation
//! and deallocation only move an index on or off the free stack.

use std::fmt;
use std::ops::{Index, IndexMut};

use tracing::debug;

use crate::error::SlabError;

/// Cells addressable by a `u32` index.
const MAX_CELLS: usize = u32::MAX as usize;

/// Stable handle to an allocated cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotKey {
    index: u32,
    generation: u32,
}

impl SlotKey {
    /// Logical cell index inside the arena
    #[inline]
    pub fn index(self) -> usize {
        self.index as usize
    }

    #[inline]
    pub fn generation(self) -> u32 {
        self.generation
    }
}

struct Cell<T> {
    generation: u32,
    value: Option<T>,
}

impl<T> Cell<T> {
    fn vacant() -> Self {
        Self {
            generation: 0,
            value: None,
        }
    }
}

/// Fixed-capacity arena of `T` cells grown in whole chunks.
///
/// Not `Clone`: an arena owns its cells exclusively and keys are only
/// meaningful against the arena that issued them.
///
/// ## Example
///
/// ```
/// use flatbook::arena::ChunkedSlab;
///
/// let mut slab = ChunkedSlab::new(4, 2);
/// let a = slab.allocate("a").unwrap();
/// let b = slab.allocate("b").unwrap();
///
/// assert_eq!(slab[a], "a");
/// assert_eq!(slab.free(b), Some("b"));
/// assert_eq!(slab.free(b), None); // stale key is ignored
/// assert_eq!(slab.capacity(), 8);
/// ```
pub struct ChunkedSlab<T> {
    chunks: Vec<Box<[Cell<T>]>>,
    chunk_shift: u32,
    chunk_mask: usize,
    max_chunks: usize,
    cursor: usize,
    free: Vec<u32>,
    len: usize,
}

impl<T> ChunkedSlab<T> {
    /// Create an empty arena.
    ///
    /// `chunk_capacity` is rounded up to a power of two; both arguments are
    /// clamped to at least one and to what a `u32` index can address. No
    /// cell storage is allocated until the first `allocate`.
    pub fn new(chunk_capacity: usize, max_chunks: usize) -> Self {
        let chunk_capacity = chunk_capacity
            .clamp(1, 1 << (usize::BITS.min(32) - 1))
            .next_power_of_two();
        let max_chunks = max_chunks.clamp(1, (MAX_CELLS / chunk_capacity).max(1));

        Self {
            chunks: Vec::with_capacity(max_chunks),
            chunk_shift: chunk_capacity.trailing_zeros(),
            chunk_mask: chunk_capacity - 1,
            max_chunks,
            cursor: 0,
            free: Vec::new(),
            len: 0,
        }
    }

    // ========================================================================
    // Capacity and Size
    // ========================================================================

    /// Maximum number of cells this arena will ever hold
    #[inline]
    pub fn capacity(&self) -> usize {
        self.chunk_capacity() * self.max_chunks
    }

    #[inline]
    pub fn chunk_capacity(&self) -> usize {
        self.chunk_mask + 1
    }

    #[inline]
    pub fn max_chunks(&self) -> usize {
        self.max_chunks
    }

    /// Number of chunks created so far
    #[inline]
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Cells backed by created chunks
    #[inline]
    pub fn allocated_cells(&self) -> usize {
        self.chunks.len() << self.chunk_shift
    }

    /// Number of outstanding allocations
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Whether the next `allocate` will succeed
    #[inline]
    pub fn has_vacancy(&self) -> bool {
        self.len < self.capacity()
    }

    // ========================================================================
    // Allocation
    // ========================================================================

    /// Store `value` in a cell and return its key.
    ///
    /// Reuses the most recently freed cell if there is one, otherwise takes
    /// the next never-used cell, creating a new chunk when the current one
    /// is exhausted.
    ///
    /// # Errors
    ///
    /// [`SlabError::CapacityExceeded`] when every cell of every permitted
    /// chunk is in use. The arena is unchanged in that case.
    #[inline]
    pub fn allocate(&mut self, value: T) -> Result<SlotKey, SlabError> {
        if let Some(index) = self.free.pop() {
            let cell = self.cell_at_mut(index as usize);
            cell.value = Some(value);
            let generation = cell.generation;
            self.len += 1;
            return Ok(SlotKey { index, generation });
        }

        if self.cursor == self.allocated_cells() {
            self.grow()?;
        }

        let index = self.cursor;
        self.cursor += 1;
        let cell = self.cell_at_mut(index);
        cell.value = Some(value);
        let generation = cell.generation;
        self.len += 1;

        Ok(SlotKey {
            index: index as u32,
            generation,
        })
    }

    /// Release the cell behind `key` and return its value.
    ///
    /// Returns `None` without touching the arena if the key is stale
    /// (already freed) or was never issued by this arena.
    #[inline]
    pub fn free(&mut self, key: SlotKey) -> Option<T> {
        let index = key.index as usize;
        if index >= self.cursor {
            return None;
        }

        let cell = self.cell_at_mut(index);
        if cell.generation != key.generation {
            return None;
        }
        let value = cell.value.take()?;
        cell.generation = cell.generation.wrapping_add(1);

        self.free.push(key.index);
        self.len -= 1;
        Some(value)
    }

    /// Free every outstanding cell. Chunks stay allocated and all previously
    /// issued keys become stale.
    pub fn clear(&mut self) {
        self.free.clear();
        for index in (0..self.cursor).rev() {
            let cell = self.cell_at_mut(index);
            if cell.value.take().is_some() {
                cell.generation = cell.generation.wrapping_add(1);
            }
            self.free.push(index as u32);
        }
        self.len = 0;
    }

    // ========================================================================
    // Access
    // ========================================================================

    #[inline]
    pub fn get(&self, key: SlotKey) -> Option<&T> {
        let index = key.index as usize;
        if index >= self.cursor {
            return None;
        }
        let cell = self.cell_at(index);
        if cell.generation != key.generation {
            return None;
        }
        cell.value.as_ref()
    }

    #[inline]
    pub fn get_mut(&mut self, key: SlotKey) -> Option<&mut T> {
        let index = key.index as usize;
        if index >= self.cursor {
            return None;
        }
        let cell = self.cell_at_mut(index);
        if cell.generation != key.generation {
            return None;
        }
        cell.value.as_mut()
    }

    #[inline]
    pub fn contains(&self, key: SlotKey) -> bool {
        self.get(key).is_some()
    }

    // ========================================================================
    // Internals
    // ========================================================================

    #[inline(always)]
    fn cell_at(&self, index: usize) -> &Cell<T> {
        &self.chunks[index >> self.chunk_shift][index & self.chunk_mask]
    }

    #[inline(always)]
    fn cell_at_mut(&mut self, index: usize) -> &mut Cell<T> {
        &mut self.chunks[index >> self.chunk_shift][index & self.chunk_mask]
    }

    #[cold]
    fn grow(&mut self) -> Result<(), SlabError> {
        if self.chunks.len() == self.max_chunks {
            return Err(SlabError::CapacityExceeded {
                capacity: self.capacity(),
            });
        }

        let chunk: Box<[Cell<T>]> = (0..self.chunk_capacity()).map(|_| Cell::vacant()).collect();
        self.chunks.push(chunk);

        // The free stack can never hold more indices than there are cells.
        let cells = self.allocated_cells();
        self.free.reserve_exact(cells - self.free.len());

        debug!(
            chunk = self.chunks.len(),
            max_chunks = self.max_chunks,
            cells,
            "slab arena grew"
        );
        Ok(())
    }
}

impl<T> Index<SlotKey> for ChunkedSlab<T> {
    type Output = T;

    #[inline]
    fn index(&self, key: SlotKey) -> &T {
        match self.get(key) {
            Some(value) => value,
            None => panic!("invalid slab key {:?}", key),
        }
    }
}

impl<T> IndexMut<SlotKey> for ChunkedSlab<T> {
    #[inline]
    fn index_mut(&mut self, key: SlotKey) -> &mut T {
        match self.get_mut(key) {
            Some(value) => value,
            None => panic!("invalid slab key {:?}", key),
        }
    }
}

impl<T> fmt::Debug for ChunkedSlab<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChunkedSlab")
            .field("len", &self.len)
            .field("cursor", &self.cursor)
            .field("free", &self.free.len())
            .field("chunks", &self.chunks.len())
            .field("max_chunks", &self.max_chunks)
            .field("chunk_capacity", &self.chunk_capacity())
            .finish()
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
