//! Bump cursor shared by both arena strategies.
//!
//! [`Cursor`] owns the admission test and the usage counters. It knows
//! nothing about storage: callers translate the returned offset into an
//! address within their own buffer.

use std::cell::Cell;

use crate::stats::ArenaStats;

/// Offset of the boundary between used and free space, plus counters.
///
/// All mutation on the allocation path goes through `Cell`, so arenas can
/// hand out disjoint ranges from `&self`. This makes every arena `!Sync`.
#[derive(Debug, Default)]
pub(crate) struct Cursor {
    offset: Cell<usize>,
    high_water: Cell<usize>,
    allocations: Cell<u64>,
    failed: Cell<u64>,
    resets: u64,
}

impl Cursor {
    pub(crate) const fn new() -> Self {
        Self {
            offset: Cell::new(0),
            high_water: Cell::new(0),
            allocations: Cell::new(0),
            failed: Cell::new(0),
            resets: 0,
        }
    }

    /// Current offset in bytes.
    pub(crate) fn offset(&self) -> usize {
        self.offset.get()
    }

    /// Whether `size` more bytes fit within `capacity`.
    pub(crate) fn fits(&self, size: usize, capacity: usize) -> bool {
        self.offset
            .get()
            .checked_add(size)
            .is_some_and(|end| end <= capacity)
    }

    /// Reserve `size` bytes within `capacity` and return the start offset.
    ///
    /// On rejection the offset is left untouched.
    pub(crate) fn reserve(&self, size: usize, capacity: usize) -> Option<usize> {
        let start = self.offset.get();
        let end = match start.checked_add(size) {
            Some(end) if end <= capacity => end,
            _ => {
                self.reject(size, capacity);
                return None;
            }
        };
        self.offset.set(end);
        if end > self.high_water.get() {
            self.high_water.set(end);
        }
        self.allocations.set(self.allocations.get() + 1);
        Some(start)
    }

    /// Count and trace a rejected request.
    pub(crate) fn reject(&self, size: usize, capacity: usize) {
        self.failed.set(self.failed.get() + 1);
        tracing::trace!(
            requested = size,
            used = self.offset.get(),
            capacity,
            "arena allocation rejected"
        );
    }

    pub(crate) fn reset(&mut self) {
        *self.offset.get_mut() = 0;
        self.resets += 1;
    }

    pub(crate) fn stats(&self, capacity: usize) -> ArenaStats {
        ArenaStats {
            capacity,
            used: self.offset.get(),
            high_water: self.high_water.get(),
            allocations: self.allocations.get(),
            failed_allocations: self.failed.get(),
            resets: self.resets,
        }
    }
}
