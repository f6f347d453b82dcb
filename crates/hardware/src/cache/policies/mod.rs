//! Cache Replacement Policies.
//!
//! Implements victim selection for set-associative cache levels.
//!
//! # Policies
//!
//! - `CounterPlru`: Pseudo-LRU built from saturating per-way age counters.

/// Saturating-counter pseudo-LRU replacement policy.
pub mod plru;

pub use plru::CounterPlruPolicy;

/// Trait for cache replacement policies.
///
/// Defines the interface for updating usage state and selecting victim lines.
pub trait ReplacementPolicy: Send + Sync {
    /// Updates the policy state when a line is accessed or filled.
    ///
    /// # Arguments
    ///
    /// * `set` - The cache set index.
    /// * `way` - The way index within the set that was accessed.
    fn on_access(&mut self, set: usize, way: usize);

    /// Selects a victim line to evict from a specific set.
    ///
    /// # Arguments
    ///
    /// * `set` - The cache set index.
    ///
    /// # Returns
    ///
    /// The index of the way to evict.
    fn select_victim(&self, set: usize) -> usize;

    /// Returns the raw per-way replacement state of a set.
    fn counters(&self, set: usize) -> &[u8];

    /// Returns every set to its initial state.
    fn reset(&mut self);
}
