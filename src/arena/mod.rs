//! Growable byte arena backing slot state and staging data
//!
//! One arena backs every live hash instance: the bottom of the buffer is
//! carved into fixed-size chaining-state slots, and the region above the
//! slot high-water mark serves as a shared staging window where input
//! bytes are assembled for the compression engine. Every address handed
//! out is a plain byte offset; growth extends capacity without
//! invalidating any previously issued offset.

use crate::error::{Error, Result};
use crate::params::WORD_ALIGN;

/// Smallest capacity the arena reserves once it holds any data.
const MIN_CAPACITY: usize = 4 * 1024;

/// Growable zero-filled byte buffer with offset-stable growth.
pub struct Arena {
    bytes: Vec<u8>,
    slot_mark: usize,
}

impl Arena {
    /// Create an empty arena; the first allocation sizes the buffer.
    pub fn new() -> Self {
        Arena {
            bytes: Vec::new(),
            slot_mark: 0,
        }
    }

    /// Number of addressable bytes.
    pub fn capacity(&self) -> usize {
        self.bytes.len()
    }

    /// Grow the buffer so that at least `min_bytes` are addressable.
    ///
    /// Growth is geometric (at least doubling), newly added bytes are
    /// zero-filled, and existing offsets keep their contents. A failed
    /// reservation surfaces as [`Error::OutOfMemory`] with the buffer
    /// unchanged; no partial growth is observable.
    pub fn ensure_capacity(&mut self, min_bytes: usize) -> Result<()> {
        if min_bytes <= self.bytes.len() {
            return Ok(());
        }

        let target = min_bytes.max(self.bytes.len() * 2).max(MIN_CAPACITY);
        let additional = target - self.bytes.len();
        self.bytes
            .try_reserve_exact(additional)
            .map_err(|_| Error::OutOfMemory { requested: target })?;
        self.bytes.resize(target, 0);
        Ok(())
    }

    /// Copy `data` into the buffer at `offset`.
    ///
    /// The destination region must be within current capacity; callers
    /// run [`Arena::ensure_capacity`] first.
    pub fn write(&mut self, offset: usize, data: &[u8]) {
        debug_assert!(offset + data.len() <= self.bytes.len());
        self.bytes[offset..offset + data.len()].copy_from_slice(data);
    }

    /// Zero-fill `len` bytes starting at `offset`.
    pub fn clear(&mut self, offset: usize, len: usize) {
        debug_assert!(offset + len <= self.bytes.len());
        self.bytes[offset..offset + len].fill(0);
    }

    /// Shared view of the whole buffer.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Mutable view of the whole buffer, handed to the compression engine.
    pub fn bytes_mut(&mut self) -> &mut [u8] {
        &mut self.bytes
    }

    /// First byte above the slot region, rounded up to the word quantum.
    ///
    /// Staging writes always start here; the offset is recomputed per
    /// call rather than advanced, so the window is reused as shared
    /// scratch space across instances.
    pub fn staging_base(&self) -> usize {
        align_up(self.slot_mark, WORD_ALIGN)
    }

    /// Current top of the slot region.
    pub fn slot_mark(&self) -> usize {
        self.slot_mark
    }

    /// Reserve `size` bytes at the top of the slot region, growing the
    /// buffer if needed, and return the region's offset.
    pub(crate) fn extend_slot_region(&mut self, size: usize) -> Result<usize> {
        let offset = self.slot_mark;
        self.ensure_capacity(offset + size)?;
        self.slot_mark += size;
        Ok(offset)
    }
}

impl Default for Arena {
    fn default() -> Self {
        Self::new()
    }
}

/// Round `offset` up to the next multiple of `align`.
pub(crate) fn align_up(offset: usize, align: usize) -> usize {
    offset.next_multiple_of(align)
}
