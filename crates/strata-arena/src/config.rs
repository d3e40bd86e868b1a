//! Dynamic arena configuration parameters.

use crate::error::ArenaError;

/// Configuration for a [`DynamicArena`](crate::DynamicArena).
///
/// Validated at construction; all values are immutable after creation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArenaConfig {
    /// Size of the backing buffer in bytes.
    ///
    /// Zero is legal and produces a permanently empty arena.
    pub capacity: usize,

    /// Zero the backing buffer when it is acquired.
    ///
    /// Only the initial contents are affected: `reset_all` never rewrites
    /// storage, so bytes handed out after a reset may hold stale data.
    /// Default: `false`.
    pub zero_init: bool,

    /// Upper bound accepted for `capacity`.
    ///
    /// Default: `isize::MAX`, the largest buffer the global allocator can
    /// describe with a byte layout.
    pub max_capacity: usize,
}

impl ArenaConfig {
    /// Default capacity used by [`ArenaConfig::default`]: 64KB.
    pub const DEFAULT_CAPACITY: usize = 64 * 1024;

    /// Default upper bound on `capacity`.
    pub const DEFAULT_MAX_CAPACITY: usize = isize::MAX as usize;

    /// Create a config for the given capacity with defaults elsewhere.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            zero_init: false,
            max_capacity: Self::DEFAULT_MAX_CAPACITY,
        }
    }

    /// Set whether the buffer is zeroed on acquisition.
    pub fn zero_init(mut self, zero_init: bool) -> Self {
        self.zero_init = zero_init;
        self
    }

    /// Set the upper bound accepted for `capacity`.
    pub fn max_capacity(mut self, max_capacity: usize) -> Self {
        self.max_capacity = max_capacity;
        self
    }

    /// Check the config for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ArenaError::InvalidConfig`] if `capacity` exceeds
    /// `max_capacity`, or `max_capacity` exceeds `isize::MAX`.
    pub fn validate(&self) -> Result<(), ArenaError> {
        if self.max_capacity > Self::DEFAULT_MAX_CAPACITY {
            return Err(ArenaError::InvalidConfig {
                reason: format!(
                    "max_capacity {} exceeds isize::MAX",
                    self.max_capacity
                ),
            });
        }
        if self.capacity > self.max_capacity {
            return Err(ArenaError::InvalidConfig {
                reason: format!(
                    "capacity {} exceeds max_capacity {}",
                    self.capacity, self.max_capacity
                ),
            });
        }
        Ok(())
    }
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}
