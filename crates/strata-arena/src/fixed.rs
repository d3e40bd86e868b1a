//! Compile-time sized arena with inline storage.
//!
//! [`FixedArena`] embeds its buffer in the struct itself: constructing one
//! performs no heap allocation. The capacity is the const parameter `N`.

use std::cell::UnsafeCell;
use std::fmt;
use std::mem::MaybeUninit;
use std::ptr::NonNull;

use crate::arena::Arena;
use crate::cursor::Cursor;
use crate::raw;
use crate::stats::ArenaStats;

/// Bump arena over `N` bytes of inline storage.
///
/// The buffer lives wherever the arena lives (stack, static, or inside
/// another allocation), so large `N` on the stack is the caller's call.
/// Addresses returned by [`Arena::allocate`] point into the struct: moving
/// the arena invalidates them.
///
/// `N == 0` is legal. Such an arena has no storage to address, so
/// [`Arena::next`] is `None` and every request fails, size 0 included.
///
/// ```
/// use strata_arena::{Arena, FixedArena};
///
/// let mut arena = FixedArena::<32>::new();
/// let header = arena.alloc_zeroed(8).unwrap();
/// header[0] = 0xAB;
/// assert_eq!(arena.used(), 8);
///
/// arena.reset_all();
/// assert_eq!(arena.used(), 0);
/// ```
pub struct FixedArena<const N: usize> {
    storage: UnsafeCell<[MaybeUninit<u8>; N]>,
    cursor: Cursor,
}

impl<const N: usize> FixedArena<N> {
    /// Capacity in bytes.
    pub const CAPACITY: usize = N;

    /// Create an arena with the cursor at the start of storage.
    pub const fn new() -> Self {
        Self {
            storage: UnsafeCell::new([MaybeUninit::uninit(); N]),
            cursor: Cursor::new(),
        }
    }

    fn base(&self) -> Option<NonNull<u8>> {
        if N == 0 {
            return None;
        }
        NonNull::new(self.storage.get().cast::<u8>())
    }
}

impl<const N: usize> Default for FixedArena<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> fmt::Debug for FixedArena<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FixedArena")
            .field("capacity", &N)
            .field("used", &self.cursor.offset())
            .finish()
    }
}

// SAFETY: `Cursor` hands out each offset range in `[0, N)` at most once
// between resets, and the storage is owned inline for the arena's lifetime.
#[allow(unsafe_code)]
unsafe impl<const N: usize> Arena for FixedArena<N> {
    fn allocate(&self, size: usize) -> Option<NonNull<u8>> {
        let Some(base) = self.base() else {
            self.cursor.reject(size, 0);
            return None;
        };
        let offset = self.cursor.reserve(size, N)?;
        raw::offset_ptr(base, offset)
    }

    fn reset_all(&mut self) {
        self.cursor.reset();
    }

    fn next(&self) -> Option<NonNull<u8>> {
        raw::offset_ptr(self.base()?, self.cursor.offset())
    }

    fn capacity(&self) -> usize {
        N
    }

    fn fits(&self, size: usize) -> bool {
        N > 0 && self.cursor.fits(size, N)
    }

    fn used(&self) -> usize {
        self.cursor.offset()
    }

    fn stats(&self) -> ArenaStats {
        self.cursor.stats(N)
    }
}
