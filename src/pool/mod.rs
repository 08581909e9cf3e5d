//! Free-list allocation of fixed-size chaining-state slots

use crate::arena::Arena;
use crate::error::Result;
use crate::params::SLOT_SIZE;

/// Opaque handle to one slot region of the arena.
///
/// Deliberately not `Copy` or `Clone`: [`SlotPool::release`] consumes the
/// handle, so a released slot cannot be addressed again.
#[derive(Debug, PartialEq, Eq)]
pub struct Slot {
    offset: usize,
}

impl Slot {
    /// Byte offset of this slot's region within the arena.
    pub fn offset(&self) -> usize {
        self.offset
    }
}

/// Free-list allocator handing out [`SLOT_SIZE`] regions of the arena.
///
/// Slots are carved off the bottom of the arena and recycled through the
/// free list when an instance finalizes.
#[derive(Default)]
pub struct SlotPool {
    free: Vec<usize>,
}

impl SlotPool {
    /// Create an empty pool.
    pub fn new() -> Self {
        SlotPool { free: Vec::new() }
    }

    /// Pop a recycled slot, or carve a new one at the arena's slot
    /// high-water mark. The returned region is zero-filled.
    pub fn acquire(&mut self, arena: &mut Arena) -> Result<Slot> {
        let offset = match self.free.pop() {
            Some(offset) => offset,
            None => arena.extend_slot_region(SLOT_SIZE)?,
        };
        arena.clear(offset, SLOT_SIZE);
        Ok(Slot { offset })
    }

    /// Return a slot to the free list.
    ///
    /// Consuming the handle is what makes use-after-release
    /// unrepresentable; the offset becomes reachable again only through
    /// [`SlotPool::acquire`].
    pub fn release(&mut self, slot: Slot) {
        debug_assert_eq!(slot.offset % SLOT_SIZE, 0);
        debug_assert!(!self.free.contains(&slot.offset));
        self.free.push(slot.offset);
    }

    /// Number of recycled slots currently waiting for reuse.
    pub fn available(&self) -> usize {
        self.free.len()
    }
}
