//! Integration test: a dynamic arena releases its buffer exactly once.
//!
//! Installs a counting global allocator for this test binary. Buffer
//! traffic is identified by its size, which nothing else in the process
//! requests; the empty-arena check counts every allocation made on the
//! test's own thread.

use std::alloc::{GlobalAlloc, Layout, System};
use std::cell::Cell;
use std::sync::atomic::{AtomicUsize, Ordering};

use strata_arena::{Arena, DynamicArena};

const BUFFER_BYTES: usize = (1 << 20) + 13;

static BUFFER_ACQUIRES: AtomicUsize = AtomicUsize::new(0);
static BUFFER_RELEASES: AtomicUsize = AtomicUsize::new(0);

thread_local! {
    static THREAD_ACQUIRES: Cell<usize> = const { Cell::new(0) };
    static THREAD_RELEASES: Cell<usize> = const { Cell::new(0) };
}

struct CountingAlloc;

impl CountingAlloc {
    fn record_acquire(layout: Layout) {
        if layout.size() == BUFFER_BYTES {
            BUFFER_ACQUIRES.fetch_add(1, Ordering::SeqCst);
        }
        let _ = THREAD_ACQUIRES.try_with(|c| c.set(c.get() + 1));
    }

    fn record_release(layout: Layout) {
        if layout.size() == BUFFER_BYTES {
            BUFFER_RELEASES.fetch_add(1, Ordering::SeqCst);
        }
        let _ = THREAD_RELEASES.try_with(|c| c.set(c.get() + 1));
    }
}

unsafe impl GlobalAlloc for CountingAlloc {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        Self::record_acquire(layout);
        unsafe { System.alloc(layout) }
    }

    unsafe fn alloc_zeroed(&self, layout: Layout) -> *mut u8 {
        Self::record_acquire(layout);
        unsafe { System.alloc_zeroed(layout) }
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        Self::record_release(layout);
        unsafe { System.dealloc(ptr, layout) }
    }
}

#[global_allocator]
static GLOBAL: CountingAlloc = CountingAlloc;

fn thread_counts() -> (usize, usize) {
    (
        THREAD_ACQUIRES.with(Cell::get),
        THREAD_RELEASES.with(Cell::get),
    )
}

// Single test function: the counters are process-wide.
#[test]
fn buffer_is_acquired_once_and_released_once() {
    // ── Live arena: new, allocate, take, drop both halves ────────────
    {
        let mut arena = DynamicArena::new(BUFFER_BYTES);
        assert!(arena.is_live());
        assert_eq!(BUFFER_ACQUIRES.load(Ordering::SeqCst), 1);

        arena.allocate(10).unwrap();
        let taken = arena.take();
        assert_eq!(taken.used(), 10);
        assert!(!arena.is_live());

        drop(arena);
        assert_eq!(BUFFER_RELEASES.load(Ordering::SeqCst), 0);
        drop(taken);
        assert_eq!(BUFFER_RELEASES.load(Ordering::SeqCst), 1);
    }
    assert_eq!(BUFFER_ACQUIRES.load(Ordering::SeqCst), 1);
    assert_eq!(BUFFER_RELEASES.load(Ordering::SeqCst), 1);

    // ── Empty arena: nothing acquired, nothing released ──────────────
    let before = thread_counts();
    let empty = DynamicArena::new(0);
    assert!(empty.allocate(1).is_none());
    drop(empty);
    assert_eq!(thread_counts(), before);
}
