//! Next-Line Prefetcher.
//!
//! A simple spatial prefetcher that proposes the address one line past every
//! access, whether it hit or missed. Sequential data arrays and instruction
//! streams benefit the most.

use super::Prefetcher;

/// Next-Line Prefetcher state.
#[derive(Debug, Clone, Copy)]
pub struct NextLinePrefetcher {
    /// Size of a cache line in bytes.
    line_bytes: u32,
}

impl NextLinePrefetcher {
    /// Creates a new Next-Line prefetcher.
    ///
    /// # Arguments
    ///
    /// * `line_bytes` - The size of a cache line in bytes.
    pub const fn new(line_bytes: u32) -> Self {
        Self { line_bytes }
    }
}

impl Prefetcher for NextLinePrefetcher {
    /// Proposes `addr + line_bytes`, wrapping at the top of the address space.
    ///
    /// The offset within the line is preserved; it does not affect which set
    /// or tag the target decodes to.
    fn observe(&mut self, addr: u32, _hit: bool) -> Vec<u32> {
        vec![addr.wrapping_add(self.line_bytes)]
    }
}
