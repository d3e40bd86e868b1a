//! Arena-specific error types.

use std::error::Error;
use std::fmt;

/// Errors that can occur during arena operations.
///
/// [`Arena::allocate`](crate::Arena::allocate) itself reports failure as
/// `None`; these variants back the `Result`-returning entry points
/// ([`Arena::try_allocate`](crate::Arena::try_allocate),
/// [`DynamicArena::try_with_config`](crate::DynamicArena::try_with_config)
/// and the [`align`](crate::align) helpers).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArenaError {
    /// The request does not fit in the remaining space.
    InsufficientCapacity {
        /// Number of bytes requested.
        requested: usize,
        /// Bytes already consumed when the request was made.
        used: usize,
        /// Total capacity of the arena in bytes.
        capacity: usize,
    },
    /// The backing buffer of a dynamic arena could not be acquired.
    AcquisitionFailed {
        /// Capacity that was requested at construction.
        capacity: usize,
    },
    /// An alignment that is zero or not a power of two.
    InvalidAlignment {
        /// The rejected alignment.
        align: usize,
    },
    /// An [`ArenaConfig`](crate::ArenaConfig) that failed validation.
    InvalidConfig {
        /// Human-readable description of the problem.
        reason: String,
    },
}

impl fmt::Display for ArenaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InsufficientCapacity {
                requested,
                used,
                capacity,
            } => {
                write!(
                    f,
                    "insufficient arena capacity: requested {requested} bytes, {used} of {capacity} bytes used"
                )
            }
            Self::AcquisitionFailed { capacity } => {
                write!(f, "failed to acquire {capacity} bytes of arena storage")
            }
            Self::InvalidAlignment { align } => {
                write!(f, "alignment {align} is not a power of two")
            }
            Self::InvalidConfig { reason } => {
                write!(f, "invalid arena config: {reason}")
            }
        }
    }
}

impl Error for ArenaError {}
