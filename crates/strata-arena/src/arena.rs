//! The allocation contract shared by every arena strategy.

use std::mem::MaybeUninit;
use std::ptr::NonNull;

use crate::error::ArenaError;
use crate::raw;
use crate::stats::ArenaStats;

/// A bump arena: byte ranges carved left to right from one region, with
/// bulk reset as the only way to reclaim space.
///
/// Implemented by [`FixedArena`](crate::FixedArena) and
/// [`DynamicArena`](crate::DynamicArena). The strategy is picked at
/// construction and never changes, so generic code takes `A: Arena`
/// rather than `&dyn Arena`.
///
/// # Threading
///
/// Arenas are single-threaded: allocation mutates the cursor through
/// `&self`, which makes every implementation `!Sync`. Sharing an arena
/// across threads needs external synchronisation, e.g. a `Mutex`.
///
/// # Reset and raw pointers
///
/// Addresses returned by [`allocate`](Arena::allocate) are raw pointers.
/// After [`reset_all`](Arena::reset_all) they alias memory that will be
/// handed out again; the arena cannot detect use after reset. The
/// borrowed views from [`alloc_uninit`](Arena::alloc_uninit) and
/// [`alloc_zeroed`](Arena::alloc_zeroed) are tied to `&self` and so
/// cannot outlive a reset.
///
/// # Safety
///
/// Implementors guarantee that a successful `allocate(size)` returns an
/// address valid for reads and writes of `size` bytes that does not
/// overlap any other range returned since construction or the last
/// `reset_all`, and that the range stays valid for as long as the arena
/// is neither reset, moved, nor dropped.
#[allow(unsafe_code)]
pub unsafe trait Arena {
    /// Reserve `size` contiguous bytes at the cursor.
    ///
    /// Succeeds iff `used() + size <= capacity()`; a request that exactly
    /// fills the remaining space is admitted. A zero-size request returns
    /// the current cursor without advancing it. Returns `None`, leaving
    /// the cursor untouched, when the request does not fit or the arena
    /// has no storage.
    fn allocate(&self, size: usize) -> Option<NonNull<u8>>;

    /// Move the cursor back to the start of storage.
    ///
    /// Storage contents are not touched.
    fn reset_all(&mut self);

    /// Address the next `allocate` would return, without reserving it.
    ///
    /// `None` when the arena has no storage.
    fn next(&self) -> Option<NonNull<u8>>;

    /// Total usable bytes; 0 for an arena with no storage.
    fn capacity(&self) -> usize;

    /// Bytes consumed since construction or the last reset.
    fn used(&self) -> usize;

    /// Usage snapshot.
    fn stats(&self) -> ArenaStats;

    /// Bytes still available.
    fn remaining(&self) -> usize {
        self.capacity() - self.used()
    }

    /// Whether `allocate(size)` would succeed right now.
    fn fits(&self, size: usize) -> bool {
        self.next().is_some()
            && self
                .used()
                .checked_add(size)
                .is_some_and(|end| end <= self.capacity())
    }

    /// [`allocate`](Arena::allocate) with a descriptive error on failure.
    ///
    /// # Errors
    ///
    /// Returns [`ArenaError::InsufficientCapacity`] if the request does
    /// not fit.
    fn try_allocate(&self, size: usize) -> Result<NonNull<u8>, ArenaError> {
        self.allocate(size)
            .ok_or_else(|| ArenaError::InsufficientCapacity {
                requested: size,
                used: self.used(),
                capacity: self.capacity(),
            })
    }

    /// Allocate `size` bytes and borrow them as an uninitialised slice.
    ///
    /// The slice lives as long as the shared borrow of the arena, so the
    /// borrow checker rules out a reset while it is held.
    #[allow(clippy::mut_from_ref, unsafe_code)]
    fn alloc_uninit(&self, size: usize) -> Option<&mut [MaybeUninit<u8>]> {
        let ptr = self.allocate(size)?;
        // SAFETY: the trait contract makes `ptr` valid for `size` bytes and
        // disjoint from every other live range; the range stays valid until
        // `reset_all(&mut self)`, a move, or drop, none of which can happen
        // while the returned borrow of `self` is alive.
        Some(unsafe { raw::uninit_slice(ptr, size) })
    }

    /// Allocate `size` bytes, zero them, and borrow them as a slice.
    #[allow(clippy::mut_from_ref, unsafe_code)]
    fn alloc_zeroed(&self, size: usize) -> Option<&mut [u8]> {
        let bytes = self.alloc_uninit(size)?;
        bytes.fill(MaybeUninit::new(0));
        // SAFETY: every byte was initialised by the fill above, and
        // `MaybeUninit<u8>` has the layout of `u8`.
        Some(unsafe { &mut *(bytes as *mut [MaybeUninit<u8>] as *mut [u8]) })
    }
}
