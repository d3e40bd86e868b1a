//! Runtime-sized arena over a single heap buffer.
//!
//! [`DynamicArena`] acquires its buffer once, at construction, and releases
//! it once, on drop. An arena whose buffer could not be acquired (or whose
//! capacity is 0) is *empty*: it reports zero capacity and rejects every
//! request for the rest of its life. Construction failure is therefore
//! handled by the same `None` check as an ordinary full arena.

use std::fmt;
use std::ptr::NonNull;

use crate::arena::Arena;
use crate::config::ArenaConfig;
use crate::cursor::Cursor;
use crate::error::ArenaError;
use crate::raw::{self, RawBuffer};
use crate::stats::ArenaStats;

/// Bump arena over a heap buffer sized at construction.
///
/// Not `Clone`: the buffer has a single owner. Moving the arena moves
/// ownership without moving the buffer, so addresses stay valid across
/// moves. [`DynamicArena::take`] moves the arena out of a place and leaves
/// an empty arena behind.
///
/// ```
/// use strata_arena::{Arena, DynamicArena};
///
/// let mut arena = DynamicArena::new(16);
/// assert!(arena.allocate(10).is_some());
/// assert!(arena.allocate(6).is_some());
/// assert!(arena.allocate(1).is_none());
///
/// arena.reset_all();
/// assert!(arena.allocate(16).is_some());
/// ```
pub struct DynamicArena {
    storage: Option<RawBuffer>,
    cursor: Cursor,
}

impl DynamicArena {
    /// Create an arena with `capacity` bytes of storage.
    ///
    /// A zero capacity, or a buffer the allocator refuses, yields an empty
    /// arena rather than an error.
    pub fn new(capacity: usize) -> Self {
        Self::with_config(ArenaConfig::new(capacity))
    }

    /// Create an arena from a config, degrading to empty on failure.
    pub fn with_config(config: ArenaConfig) -> Self {
        match Self::try_with_config(config) {
            Ok(arena) => arena,
            Err(err) => {
                tracing::warn!(%err, "dynamic arena degraded to empty");
                Self::empty()
            }
        }
    }

    /// Create an arena from a config, reporting failure.
    ///
    /// A zero capacity is not a failure: it returns an empty arena.
    ///
    /// # Errors
    ///
    /// Returns [`ArenaError::InvalidConfig`] if the config fails
    /// validation, or [`ArenaError::AcquisitionFailed`] if the allocator
    /// cannot supply the buffer.
    pub fn try_with_config(config: ArenaConfig) -> Result<Self, ArenaError> {
        config.validate()?;
        if config.capacity == 0 {
            return Ok(Self::empty());
        }
        let storage = RawBuffer::acquire(config.capacity, config.zero_init).ok_or(
            ArenaError::AcquisitionFailed {
                capacity: config.capacity,
            },
        )?;
        tracing::debug!(
            capacity = config.capacity,
            zero_init = config.zero_init,
            "dynamic arena acquired storage"
        );
        Ok(Self {
            storage: Some(storage),
            cursor: Cursor::new(),
        })
    }

    /// An arena with no storage.
    pub const fn empty() -> Self {
        Self {
            storage: None,
            cursor: Cursor::new(),
        }
    }

    /// Whether the arena owns a buffer.
    pub fn is_live(&self) -> bool {
        self.storage.is_some()
    }

    /// Move the arena out, leaving an empty arena in its place.
    pub fn take(&mut self) -> Self {
        std::mem::take(self)
    }
}

impl Default for DynamicArena {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Debug for DynamicArena {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DynamicArena")
            .field("capacity", &self.capacity())
            .field("used", &self.used())
            .field("live", &self.is_live())
            .finish()
    }
}

// SAFETY: `Cursor` hands out each offset range within the buffer at most
// once between resets, and the buffer is heap-owned until drop.
#[allow(unsafe_code)]
unsafe impl Arena for DynamicArena {
    fn allocate(&self, size: usize) -> Option<NonNull<u8>> {
        let Some(storage) = &self.storage else {
            self.cursor.reject(size, 0);
            return None;
        };
        let offset = self.cursor.reserve(size, storage.len())?;
        raw::offset_ptr(storage.base(), offset)
    }

    fn reset_all(&mut self) {
        self.cursor.reset();
    }

    fn next(&self) -> Option<NonNull<u8>> {
        let storage = self.storage.as_ref()?;
        raw::offset_ptr(storage.base(), self.cursor.offset())
    }

    fn capacity(&self) -> usize {
        self.storage.as_ref().map_or(0, RawBuffer::len)
    }

    fn used(&self) -> usize {
        self.cursor.offset()
    }

    fn fits(&self, size: usize) -> bool {
        self.storage
            .as_ref()
            .is_some_and(|storage| self.cursor.fits(size, storage.len()))
    }

    fn stats(&self) -> ArenaStats {
        self.cursor.stats(self.capacity())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offset_of(base: NonNull<u8>, p: NonNull<u8>) -> usize {
        p.as_ptr() as usize - base.as_ptr() as usize
    }

    #[test]
    fn sixteen_byte_scenario() {
        let mut arena = DynamicArena::new(16);
        let base = arena.next().unwrap();

        let a = arena.allocate(10).unwrap();
        assert_eq!(offset_of(base, a), 0);
        let b = arena.allocate(6).unwrap();
        assert_eq!(offset_of(base, b), 10);
        assert_eq!(arena.used(), 16);
        assert!(arena.allocate(1).is_none());

        arena.reset_all();
        let c = arena.allocate(16).unwrap();
        assert_eq!(offset_of(base, c), 0);
    }

    #[test]
    fn new_arena_reports_requested_capacity() {
        let arena = DynamicArena::new(4096);
        assert!(arena.is_live());
        assert_eq!(arena.capacity(), 4096);
        assert_eq!(arena.used(), 0);
        assert_eq!(arena.remaining(), 4096);
    }

    #[test]
    fn zero_capacity_is_empty() {
        let arena = DynamicArena::new(0);
        assert!(!arena.is_live());
        assert_eq!(arena.capacity(), 0);
        assert_eq!(arena.used(), 0);
        assert!(arena.next().is_none());
        assert!(arena.allocate(0).is_none());
        assert!(arena.allocate(1).is_none());
    }

    #[test]
    fn unacquirable_capacity_degrades_to_empty() {
        let arena = DynamicArena::new(isize::MAX as usize);
        assert!(!arena.is_live());
        assert_eq!(arena.capacity(), 0);
        assert!(arena.allocate(1).is_none());
    }

    #[test]
    fn try_with_config_reports_acquisition_failure() {
        let result = DynamicArena::try_with_config(ArenaConfig::new(isize::MAX as usize));
        assert!(matches!(
            result,
            Err(ArenaError::AcquisitionFailed { capacity }) if capacity == isize::MAX as usize
        ));
    }

    #[test]
    fn invalid_config_degrades_to_empty() {
        let config = ArenaConfig::new(2048).max_capacity(1024);
        assert!(matches!(
            DynamicArena::try_with_config(config.clone()),
            Err(ArenaError::InvalidConfig { .. })
        ));
        assert!(!DynamicArena::with_config(config).is_live());
    }

    #[test]
    fn try_with_zero_capacity_is_ok_and_empty() {
        let arena = DynamicArena::try_with_config(ArenaConfig::new(0)).unwrap();
        assert!(!arena.is_live());
    }

    #[test]
    #[allow(unsafe_code)]
    fn zero_init_config_zeroes_storage() {
        let arena = DynamicArena::with_config(ArenaConfig::new(128).zero_init(true));
        let bytes = arena.alloc_uninit(128).unwrap();
        // SAFETY: the buffer was acquired with `alloc_zeroed`.
        assert!(bytes.iter().all(|b| unsafe { b.assume_init() } == 0));
    }

    #[test]
    fn exact_fit_boundary() {
        let arena = DynamicArena::new(32);
        arena.allocate(20).unwrap();
        assert!(!arena.fits(13));
        assert!(arena.allocate(13).is_none());
        assert_eq!(arena.used(), 20);
        assert!(arena.fits(12));
        assert!(arena.allocate(12).is_some());
        assert_eq!(arena.remaining(), 0);
    }

    #[test]
    fn move_keeps_addresses_valid() {
        let arena = DynamicArena::new(64);
        let first = arena.allocate(8).unwrap();
        let moved = arena;
        let base = moved.next().unwrap();
        assert_eq!(offset_of(first, base), 8);
    }

    #[test]
    fn take_leaves_empty_arena_behind() {
        let mut arena = DynamicArena::new(64);
        arena.allocate(8).unwrap();
        let taken = arena.take();

        assert!(taken.is_live());
        assert_eq!(taken.capacity(), 64);
        assert_eq!(taken.used(), 8);

        assert!(!arena.is_live());
        assert_eq!(arena.capacity(), 0);
        assert_eq!(arena.used(), 0);
        assert!(arena.allocate(1).is_none());
    }

    #[test]
    fn written_data_survives_later_allocations() {
        let arena = DynamicArena::new(64);
        let a = arena.alloc_zeroed(16).unwrap();
        a.copy_from_slice(&[7; 16]);
        let b = arena.alloc_zeroed(16).unwrap();
        b.fill(9);
        assert!(a.iter().all(|&v| v == 7));
        assert!(b.iter().all(|&v| v == 9));
    }

    #[test]
    fn stats_track_usage() {
        let mut arena = DynamicArena::new(16);
        arena.allocate(10).unwrap();
        arena.allocate(6).unwrap();
        assert!(arena.allocate(1).is_none());
        arena.reset_all();
        arena.allocate(4).unwrap();

        let stats = arena.stats();
        assert_eq!(stats.capacity, 16);
        assert_eq!(stats.used, 4);
        assert_eq!(stats.high_water, 16);
        assert_eq!(stats.allocations, 3);
        assert_eq!(stats.failed_allocations, 1);
        assert_eq!(stats.resets, 1);
    }

    #[test]
    fn debug_reports_usage_only() {
        let arena = DynamicArena::new(8);
        arena.allocate(2).unwrap();
        assert_eq!(
            format!("{arena:?}"),
            "DynamicArena { capacity: 8, used: 2, live: true }"
        );
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn admission_matches_remaining_capacity(
                capacity in 1usize..512,
                sizes in proptest::collection::vec(0usize..128, 1..24),
            ) {
                let arena = DynamicArena::new(capacity);
                for size in sizes {
                    let before = arena.used();
                    let admitted = before + size <= capacity;
                    prop_assert_eq!(arena.allocate(size).is_some(), admitted);
                    let expected = if admitted { before + size } else { before };
                    prop_assert_eq!(arena.used(), expected);
                }
            }

            #[test]
            fn reset_restores_first_address(
                capacity in 1usize..256,
                sizes in proptest::collection::vec(1usize..64, 0..12),
            ) {
                let mut arena = DynamicArena::new(capacity);
                let first = arena.next();
                for size in sizes {
                    let _ = arena.allocate(size);
                }
                arena.reset_all();
                prop_assert_eq!(arena.used(), 0);
                prop_assert_eq!(arena.allocate(0), first);
            }
        }
    }
}
