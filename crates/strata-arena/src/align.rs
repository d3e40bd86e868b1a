//! Caller-side alignment on top of byte-granular arenas.
//!
//! Arenas only promise byte alignment. These helpers read the cursor via
//! [`Arena::next`] and pad the request so the returned address meets a
//! stronger alignment.
//!
//! ```
//! use strata_arena::{align, Arena, FixedArena};
//!
//! let arena = FixedArena::<64>::new();
//! arena.allocate(3).unwrap();
//! let p = align::allocate_aligned(&arena, 8, 8).unwrap();
//! assert_eq!(p.as_ptr() as usize % 8, 0);
//! ```

use std::ptr::NonNull;

use crate::arena::Arena;
use crate::error::ArenaError;
use crate::raw;

fn check(align: usize) -> Result<(), ArenaError> {
    if align.is_power_of_two() {
        Ok(())
    } else {
        Err(ArenaError::InvalidAlignment { align })
    }
}

/// Bytes needed to round `addr` up to a multiple of `align`.
///
/// # Errors
///
/// Returns [`ArenaError::InvalidAlignment`] if `align` is zero or not a
/// power of two.
pub fn padding(addr: usize, align: usize) -> Result<usize, ArenaError> {
    check(align)?;
    Ok(addr.wrapping_neg() & (align - 1))
}

/// Padding the arena's next allocation needs to start on `align`.
///
/// An arena with no storage needs no padding and reports 0.
///
/// # Errors
///
/// Returns [`ArenaError::InvalidAlignment`] for a bad `align`.
pub fn padding_for<A: Arena + ?Sized>(arena: &A, align: usize) -> Result<usize, ArenaError> {
    check(align)?;
    match arena.next() {
        Some(next) => padding(next.as_ptr() as usize, align),
        None => Ok(0),
    }
}

/// Reserve `size` bytes starting on a multiple of `align`.
///
/// Padding and payload are reserved in one request: either both fit and
/// the cursor moves past them, or neither does and the cursor stays put.
///
/// # Errors
///
/// Returns [`ArenaError::InvalidAlignment`] for a bad `align`, or
/// [`ArenaError::InsufficientCapacity`] if padding plus `size` does not fit.
/// The error's `requested` is padding plus `size`, saturating at
/// `usize::MAX`.
pub fn allocate_aligned<A: Arena + ?Sized>(
    arena: &A,
    size: usize,
    align: usize,
) -> Result<NonNull<u8>, ArenaError> {
    let pad = padding_for(arena, align)?;
    let insufficient = || ArenaError::InsufficientCapacity {
        requested: pad.saturating_add(size),
        used: arena.used(),
        capacity: arena.capacity(),
    };
    let total = pad.checked_add(size).ok_or_else(insufficient)?;
    let start = arena.allocate(total).ok_or_else(insufficient)?;
    raw::offset_ptr(start, pad).ok_or_else(insufficient)
}
