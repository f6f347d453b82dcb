//! Counter-based Pseudo-LRU (PLRU) Replacement Policy.
//!
//! Each way of a set carries an 8-bit saturating age counter. Touching a way
//! resets its counter to zero and ages every other way by one, capped at 255.
//! The next eviction candidate is the way whose counter is zero.
//!
//! Starting from all-zero counters, exactly one way has counter zero after
//! every update, so victim selection always finds a candidate. The ordering
//! only approximates true LRU: once counters saturate, older ways become
//! indistinguishable from one another.
//!
//! # Performance
//!
//! - **Time Complexity:**
//!   - `on_access()`: O(W)
//!   - `select_victim()`: O(W)
//! - **Space Complexity:** O(S × W) bytes where S is sets, W is ways

use super::ReplacementPolicy;

/// Counter PLRU policy state.
#[derive(Debug, Clone)]
pub struct CounterPlruPolicy {
    /// Flat `sets * ways` array of age counters, set-major.
    ages: Vec<u8>,
    /// Number of ways in the cache.
    ways: usize,
}

impl CounterPlruPolicy {
    /// Creates a new counter PLRU policy instance with all counters at zero.
    ///
    /// # Arguments
    ///
    /// * `sets` - The number of sets in the cache.
    /// * `ways` - The associativity (number of ways) of the cache.
    pub fn new(sets: usize, ways: usize) -> Self {
        Self {
            ages: vec![0; sets * ways],
            ways,
        }
    }

    fn set_ages(&self, set: usize) -> &[u8] {
        let base = set * self.ways;
        &self.ages[base..base + self.ways]
    }
}

impl ReplacementPolicy for CounterPlruPolicy {
    /// Resets the accessed way and ages every other way of the set.
    fn on_access(&mut self, set: usize, way: usize) {
        let base = set * self.ways;
        for (i, age) in self.ages[base..base + self.ways].iter_mut().enumerate() {
            *age = if i == way {
                0
            } else {
                age.saturating_add(1)
            };
        }
    }

    /// Returns the first way whose counter is zero, or way 0 if none is.
    fn select_victim(&self, set: usize) -> usize {
        self.set_ages(set)
            .iter()
            .position(|&age| age == 0)
            .unwrap_or(0)
    }

    fn counters(&self, set: usize) -> &[u8] {
        self.set_ages(set)
    }

    fn reset(&mut self) {
        self.ages.fill(0);
    }
}
