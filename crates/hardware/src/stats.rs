//! Cache statistics collection and reporting.
//!
//! This module tracks the outcome of every decision a cache level takes. It provides:
//! 1. **Demand outcomes:** Hits, victim-buffer hits, and misses of client-visible accesses.
//! 2. **Line movement:** Write-backs, evictions into the victim buffer, and victim buffer drops.
//! 3. **Side traffic:** Prefetches issued and L2-to-L1 promotion accesses.
//!
//! Prefetch and promotion accesses are excluded from the demand counters so
//! hit rates reflect only what the client asked for.

use std::fmt;

use crate::common::AccessKind;

/// Per-level counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Demand accesses that hit in the store or the victim buffer.
    pub hits: u64,
    /// Demand accesses served from the victim buffer (subset of `hits`).
    pub victim_hits: u64,
    /// Demand accesses that missed.
    pub misses: u64,
    /// Dirty lines written back before reuse or on flush.
    pub write_backs: u64,
    /// Valid lines moved from the store into the victim buffer.
    pub evictions: u64,
    /// Lines discarded from a full victim buffer.
    pub victim_drops: u64,
    /// Next-line prefetch accesses issued.
    pub prefetches: u64,
    /// Accesses issued by the hierarchy to promote an L2 hit.
    pub promotions: u64,
}

impl CacheStats {
    /// Records the outcome of one access.
    pub(crate) const fn record(&mut self, kind: AccessKind, hit: bool, from_victim: bool) {
        match kind {
            AccessKind::Demand => {
                if hit {
                    self.hits += 1;
                    if from_victim {
                        self.victim_hits += 1;
                    }
                } else {
                    self.misses += 1;
                }
            }
            AccessKind::Fill => self.promotions += 1,
            AccessKind::Prefetch => {}
        }
    }

    /// Total demand accesses.
    pub const fn accesses(&self) -> u64 {
        self.hits + self.misses
    }

    /// Demand hit rate in percent (0.0 with no accesses).
    pub fn hit_rate(&self) -> f64 {
        let total = self.accesses();
        if total > 0 {
            (self.hits as f64 / total as f64) * 100.0
        } else {
            0.0
        }
    }
}

impl fmt::Display for CacheStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  accesses               {}", self.accesses())?;
        writeln!(f, "  hits                   {}", self.hits)?;
        writeln!(f, "  hits.victim            {}", self.victim_hits)?;
        writeln!(f, "  misses                 {}", self.misses)?;
        writeln!(f, "  hit_rate               {:.2}%", self.hit_rate())?;
        writeln!(f, "  write_backs            {}", self.write_backs)?;
        writeln!(f, "  evictions              {}", self.evictions)?;
        writeln!(f, "  victim_drops           {}", self.victim_drops)?;
        writeln!(f, "  prefetches             {}", self.prefetches)?;
        write!(f, "  promotions             {}", self.promotions)
    }
}
