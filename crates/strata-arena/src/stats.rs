//! Usage counters for arena telemetry.
//!
//! [`ArenaStats`] is a plain-data snapshot taken by
//! [`Arena::stats`](crate::Arena::stats). Counters are cumulative since
//! the arena was constructed; `used` reflects the current cursor.

/// Usage snapshot of a single arena.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ArenaStats {
    /// Total capacity in bytes.
    pub capacity: usize,
    /// Bytes consumed since construction or the last reset.
    pub used: usize,
    /// Highest value `used` has reached since construction.
    pub high_water: usize,
    /// Cumulative number of successful `allocate` calls.
    pub allocations: u64,
    /// Cumulative number of rejected `allocate` calls.
    pub failed_allocations: u64,
    /// Cumulative number of `reset_all` calls.
    pub resets: u64,
}

impl ArenaStats {
    /// Bytes still available for allocation.
    ///
    /// Saturates at 0 for a hand-built snapshot with `used > capacity`.
    pub fn remaining(&self) -> usize {
        self.capacity.saturating_sub(self.used)
    }

    /// Peak usage as a fraction of capacity, in `[0.0, 1.0]`.
    ///
    /// Zero-capacity arenas report `0.0`.
    pub fn peak_utilisation(&self) -> f64 {
        if self.capacity == 0 {
            return 0.0;
        }
        self.high_water as f64 / self.capacity as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_stats_are_zero() {
        let s = ArenaStats::default();
        assert_eq!(s.capacity, 0);
        assert_eq!(s.used, 0);
        assert_eq!(s.high_water, 0);
        assert_eq!(s.allocations, 0);
        assert_eq!(s.failed_allocations, 0);
        assert_eq!(s.resets, 0);
        assert_eq!(s.peak_utilisation(), 0.0);
    }

    #[test]
    fn remaining_and_utilisation() {
        let s = ArenaStats {
            capacity: 64,
            used: 16,
            high_water: 48,
            allocations: 3,
            failed_allocations: 1,
            resets: 1,
        };
        assert_eq!(s.remaining(), 48);
        assert_eq!(s.peak_utilisation(), 0.75);
    }

    #[test]
    fn remaining_saturates_when_used_exceeds_capacity() {
        let s = ArenaStats {
            capacity: 8,
            used: 12,
            ..ArenaStats::default()
        };
        assert_eq!(s.remaining(), 0);
    }
}
