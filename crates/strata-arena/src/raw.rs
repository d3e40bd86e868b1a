//! Low-level primitives for arena memory operations.
//!
//! Every `unsafe` block in the crate that touches the global allocator or
//! materialises a slice from a raw address lives here, each with a
//! mandatory `// SAFETY:` comment.

#![allow(unsafe_code)]

use std::alloc::{self, Layout};
use std::mem::MaybeUninit;
use std::ptr::NonNull;
use std::slice;

/// A heap byte buffer with a single owner.
///
/// Acquired once from the global allocator and returned to it exactly
/// once, on drop. There is no way to release it early.
pub(crate) struct RawBuffer {
    ptr: NonNull<u8>,
    len: usize,
}

// SAFETY: the buffer is uniquely owned; moving it to another thread moves
// the only handle to the allocation.
unsafe impl Send for RawBuffer {}

impl RawBuffer {
    /// Acquire `len` bytes, optionally zeroed.
    ///
    /// Returns `None` for `len == 0`, for lengths the allocator cannot
    /// describe, and when the allocator reports failure.
    pub(crate) fn acquire(len: usize, zeroed: bool) -> Option<Self> {
        if len == 0 {
            return None;
        }
        let layout = Layout::array::<u8>(len).ok()?;
        // SAFETY: `layout` has a non-zero size.
        let ptr = unsafe {
            if zeroed {
                alloc::alloc_zeroed(layout)
            } else {
                alloc::alloc(layout)
            }
        };
        NonNull::new(ptr).map(|ptr| Self { ptr, len })
    }

    /// Base address of the buffer.
    pub(crate) fn base(&self) -> NonNull<u8> {
        self.ptr
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }
}

impl Drop for RawBuffer {
    fn drop(&mut self) {
        // SAFETY: `ptr` came from the global allocator with exactly this
        // layout (size `len`, align 1), which `acquire` already validated,
        // and `RawBuffer` is neither `Clone` nor `Copy`, so this runs once.
        unsafe {
            alloc::dealloc(
                self.ptr.as_ptr(),
                Layout::from_size_align_unchecked(self.len, 1),
            );
        }
    }
}

/// Address `offset` bytes past `base`.
///
/// Callers only pass offsets within, or one past the end of, the buffer
/// `base` points into. The arithmetic is wrapping so that a violated
/// precondition yields a wrong address rather than undefined behaviour.
pub(crate) fn offset_ptr(base: NonNull<u8>, offset: usize) -> Option<NonNull<u8>> {
    NonNull::new(base.as_ptr().wrapping_add(offset))
}

/// Borrow `len` bytes at `ptr` as an uninitialised slice.
///
/// # Safety
///
/// `ptr` must be valid for reads and writes of `len` bytes for `'a`, and
/// no other live reference may overlap the range during `'a`.
pub(crate) unsafe fn uninit_slice<'a>(ptr: NonNull<u8>, len: usize) -> &'a mut [MaybeUninit<u8>] {
    // SAFETY: upheld by the caller; `MaybeUninit<u8>` has the layout of `u8`.
    unsafe { slice::from_raw_parts_mut(ptr.as_ptr().cast::<MaybeUninit<u8>>(), len) }
}
