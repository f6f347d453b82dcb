//! Hardware Prefetcher implementations.
//!
//! This module contains the interface for prefetchers and the next-line
//! prefetcher used by the cache levels. A prefetcher only proposes
//! addresses; the level decides whether they are already resident and issues
//! the prefetch accesses itself.

/// Next-line prefetcher (prefetches the sequentially following line).
pub mod next_line;

pub use self::next_line::NextLinePrefetcher;

/// Trait for cache prefetcher implementations.
///
/// Prefetchers observe memory access patterns and generate prefetch
/// requests to reduce cache miss penalties.
pub trait Prefetcher: Send + Sync {
    /// Observes a memory access and generates prefetch addresses.
    ///
    /// # Arguments
    ///
    /// * `addr` - The address that was accessed
    /// * `hit` - Whether the access was a cache hit
    ///
    /// # Returns
    ///
    /// A vector of addresses to prefetch. Empty if no prefetches are needed.
    fn observe(&mut self, addr: u32, hit: bool) -> Vec<u32>;
}
