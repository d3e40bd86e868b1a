//! Benchmark workloads for the strata arenas.
//!
//! Provides deterministic request-size profiles shared by the Criterion
//! benches:
//!
//! - [`uniform_sizes`]: sizes drawn evenly from a range, seeded
//! - [`frame_profile`]: a per-frame mix of small headers and larger payloads
//! - [`fill_until_full`]: replay a profile until the arena rejects a request

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use strata_arena::Arena;

/// Generate `n` request sizes in `min..=max` from `seed`.
///
/// Uses a 64-bit LCG so the sequence is identical on every platform.
/// A range covering all of `u64` draws the raw LCG state.
///
/// # Panics
///
/// Panics if `min > max`.
pub fn uniform_sizes(n: usize, min: usize, max: usize, seed: u64) -> Vec<usize> {
    assert!(min <= max, "min {min} exceeds max {max}");
    let span = ((max - min) as u64).checked_add(1);
    let mut state = seed;
    (0..n)
        .map(|_| {
            state = state
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            let draw = match span {
                Some(span) => (state >> 33) % span,
                None => state,
            };
            min + draw as usize
        })
        .collect()
}

/// Per-frame request mix: one 64-byte header followed by `payloads`
/// payloads of 16..=256 bytes.
pub fn frame_profile(payloads: usize, seed: u64) -> Vec<usize> {
    let mut sizes = Vec::with_capacity(payloads + 1);
    sizes.push(64);
    sizes.extend(uniform_sizes(payloads, 16, 256, seed));
    sizes
}

/// Allocate `sizes` in order, wrapping around, until the arena rejects a
/// request. Returns the number of successful allocations.
///
/// An empty `sizes` or an all-zero profile returns 0 without allocating.
pub fn fill_until_full<A: Arena>(arena: &A, sizes: &[usize]) -> usize {
    if sizes.iter().all(|&s| s == 0) {
        return 0;
    }
    let mut count = 0;
    for &size in sizes.iter().cycle() {
        if arena.allocate(size).is_none() {
            break;
        }
        count += 1;
    }
    count
}
