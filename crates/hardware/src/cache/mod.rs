//! Set-Associative Cache Level.
//!
//! This module implements one level of a set-associative cache. A level owns
//! its line store, a replacement policy, a victim buffer, and an optional
//! next-line prefetcher. Each access runs the following sequence:
//! 1. **Store lookup:** A valid line with a matching tag in the target set is a hit.
//! 2. **Victim lookup:** Otherwise a matching victim buffer entry is moved back into the set.
//! 3. **Miss fill:** Otherwise a way is chosen, its line written back if dirty and evicted, and the new line filled.
//!
//! Store hits and miss fills then trigger a next-line prefetch, bounded by the
//! configured prefetch depth. No data is stored: the level only decides hits,
//! misses, and the write-back and fill obligations, and reports them as events.

/// Cache replacement policy implementations.
pub mod policies;

/// Victim buffer for recently evicted lines.
pub mod victim;

use std::fmt;

use self::policies::{CounterPlruPolicy, ReplacementPolicy};
use self::victim::{VictimBuffer, VictimEntry};
use crate::common::{AccessKind, AddressDecoder, ConfigError};
use crate::config::CacheConfig;
use crate::events::{CacheEvent, EventSink, TracingSink};
use crate::prefetch::{NextLinePrefetcher, Prefetcher};
use crate::stats::CacheStats;

/// Cache line entry containing tag, validity, and dirty bits.
///
/// An invalid line is never dirty.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheLine {
    /// Address bits above the set-index field.
    pub tag: u32,
    /// The slot holds a line.
    pub valid: bool,
    /// The line was written since it was filled or last written back.
    pub dirty: bool,
}

/// One set-associative cache level.
///
/// Lines are stored in a flat `num_sets * ways` arena indexed by
/// `set * ways + way`. Events go to the sink `S`, which defaults to
/// [`TracingSink`].
pub struct CacheLevel<S: EventSink = TracingSink> {
    name: &'static str,
    decoder: AddressDecoder,
    ways: usize,
    lines: Vec<CacheLine>,
    policy: Box<dyn ReplacementPolicy>,
    victims: VictimBuffer,
    prefetcher: Option<Box<dyn Prefetcher>>,
    prefetch_depth: usize,
    stats: CacheStats,
    sink: S,
}

impl CacheLevel<TracingSink> {
    /// Creates a level that reports its events through `tracing`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the geometry in `config` is invalid.
    pub fn new(name: &'static str, config: &CacheConfig) -> Result<Self, ConfigError> {
        Self::with_sink(name, config, TracingSink)
    }
}

impl<S: EventSink> CacheLevel<S> {
    /// Creates a level reporting its events to `sink`.
    ///
    /// # Arguments
    ///
    /// * `name` - Label carried by every event (e.g. `"L1"`).
    /// * `config` - Geometry, victim buffer capacity, and prefetch depth.
    /// * `sink` - Event consumer.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the line size or derived set count is not
    /// a power of two, the associativity is zero, or the capacity is not a
    /// whole number of sets.
    pub fn with_sink(
        name: &'static str,
        config: &CacheConfig,
        sink: S,
    ) -> Result<Self, ConfigError> {
        let decoder = config.decoder()?;
        let num_sets = decoder.num_sets();

        let prefetcher: Option<Box<dyn Prefetcher>> = if config.prefetch_depth > 0 {
            Some(Box::new(NextLinePrefetcher::new(decoder.block_size())))
        } else {
            None
        };

        Ok(Self {
            name,
            decoder,
            ways: config.ways,
            lines: vec![CacheLine::default(); num_sets * config.ways],
            policy: Box::new(CounterPlruPolicy::new(num_sets, config.ways)),
            victims: VictimBuffer::new(config.victim_entries),
            prefetcher,
            prefetch_depth: config.prefetch_depth,
            stats: CacheStats::default(),
            sink,
        })
    }

    /// Performs a demand access.
    ///
    /// # Arguments
    ///
    /// * `addr` - The address to access
    /// * `is_write` - Whether this is a write operation
    ///
    /// # Returns
    ///
    /// `true` on a hit in the store or the victim buffer, `false` on a miss.
    /// The line is resident afterwards in either case.
    pub fn access(&mut self, addr: u32, is_write: bool) -> bool {
        self.access_as(addr, is_write, AccessKind::Demand)
    }

    /// Performs an access on behalf of `kind`.
    ///
    /// Behaves like [`CacheLevel::access`]; only statistics and event tags
    /// differ between kinds.
    pub fn access_as(&mut self, addr: u32, is_write: bool, kind: AccessKind) -> bool {
        self.access_at_depth(addr, is_write, kind, 0)
    }

    fn access_at_depth(
        &mut self,
        addr: u32,
        is_write: bool,
        kind: AccessKind,
        depth: usize,
    ) -> bool {
        let (set, tag) = self.decoder.decode(addr);

        if let Some(way) = self.find_way(set, tag) {
            if is_write {
                self.lines[set * self.ways + way].dirty = true;
            }
            self.policy.on_access(set, way);
            self.stats.record(kind, true, false);
            self.sink.emit(CacheEvent::Hit {
                level: self.name,
                addr,
                set,
                way,
                kind,
            });
            self.prefetch(addr, true, depth);
            return true;
        }

        if let Some(entry) = self.victims.lookup(set, tag) {
            let way = self.fill_way(set);
            self.stats.record(kind, true, true);
            self.sink.emit(CacheEvent::VictimHit {
                level: self.name,
                addr,
                set,
                way,
                kind,
            });
            self.evict(set, way);
            self.lines[set * self.ways + way] = CacheLine {
                dirty: is_write,
                ..entry.line
            };
            self.policy.on_access(set, way);
            return true;
        }

        let way = self.fill_way(set);
        self.stats.record(kind, false, false);
        self.sink.emit(CacheEvent::Miss {
            level: self.name,
            addr,
            set,
            way,
            kind,
        });
        self.evict(set, way);
        self.lines[set * self.ways + way] = CacheLine {
            tag,
            valid: true,
            dirty: is_write,
        };
        self.policy.on_access(set, way);
        self.prefetch(addr, false, depth);
        false
    }

    /// Returns the way in `set` holding a valid line tagged `tag`.
    fn find_way(&self, set: usize, tag: u32) -> Option<usize> {
        let base = set * self.ways;
        self.lines[base..base + self.ways]
            .iter()
            .position(|line| line.valid && line.tag == tag)
    }

    /// Chooses the way to fill: the first invalid way, else the policy's victim.
    fn fill_way(&self, set: usize) -> usize {
        let base = set * self.ways;
        self.lines[base..base + self.ways]
            .iter()
            .position(|line| !line.valid)
            .unwrap_or_else(|| self.policy.select_victim(set))
    }

    /// Vacates `(set, way)`: writes back a dirty line, then moves any valid
    /// line into the victim buffer.
    fn evict(&mut self, set: usize, way: usize) {
        let idx = set * self.ways + way;
        let line = self.lines[idx];
        if !line.valid {
            return;
        }
        let addr = self.decoder.compose(set, line.tag);

        if line.dirty {
            self.stats.write_backs += 1;
            self.sink.emit(CacheEvent::WriteBack {
                level: self.name,
                addr,
                set,
                way,
            });
        }

        self.stats.evictions += 1;
        self.sink.emit(CacheEvent::Evict {
            level: self.name,
            addr,
            set,
            way,
        });
        self.lines[idx] = CacheLine::default();

        let entry = VictimEntry {
            set,
            line: CacheLine {
                dirty: false,
                ..line
            },
        };
        if let Some(dropped) = self.victims.insert(entry) {
            self.stats.victim_drops += 1;
            self.sink.emit(CacheEvent::VictimDrop {
                level: self.name,
                addr: self.decoder.compose(dropped.set, dropped.line.tag),
            });
        }
    }

    /// Issues next-line prefetches for `addr` while the chain is shorter than
    /// the configured depth.
    fn prefetch(&mut self, addr: u32, hit: bool, depth: usize) {
        if depth >= self.prefetch_depth {
            return;
        }
        let Some(prefetcher) = self.prefetcher.as_mut() else {
            return;
        };
        let targets = prefetcher.observe(addr, hit);

        for target in targets {
            if self.contains(target) {
                continue;
            }
            self.stats.prefetches += 1;
            self.sink.emit(CacheEvent::Prefetch {
                level: self.name,
                addr: target,
                depth: depth + 1,
            });
            let _ = self.access_at_depth(target, false, AccessKind::Prefetch, depth + 1);
        }
    }

    /// Checks if the store holds the line for `addr`, without side effects.
    ///
    /// Lines parked in the victim buffer are not considered resident.
    pub fn contains(&self, addr: u32) -> bool {
        let (set, tag) = self.decoder.decode(addr);
        self.find_way(set, tag).is_some()
    }

    /// Writes back every dirty line, leaving it valid and clean.
    pub fn flush(&mut self) {
        for set in 0..self.decoder.num_sets() {
            for way in 0..self.ways {
                let idx = set * self.ways + way;
                let line = self.lines[idx];
                if line.valid && line.dirty {
                    self.lines[idx].dirty = false;
                    self.stats.write_backs += 1;
                    self.sink.emit(CacheEvent::WriteBack {
                        level: self.name,
                        addr: self.decoder.compose(set, line.tag),
                        set,
                        way,
                    });
                }
            }
        }
    }

    /// Discards every line, the replacement state, and the victim buffer.
    ///
    /// Dirty lines are dropped without a write-back; call
    /// [`CacheLevel::flush`] first to keep them.
    pub fn invalidate_all(&mut self) {
        self.lines.fill(CacheLine::default());
        self.policy.reset();
        self.victims.clear();
    }

    /// Returns the line stored at `(set, way)`.
    ///
    /// # Panics
    ///
    /// Panics if `set` or `way` is out of range.
    pub fn line(&self, set: usize, way: usize) -> CacheLine {
        assert!(way < self.ways, "way {way} out of range");
        self.lines[set * self.ways + way]
    }

    /// Returns the lines of `set`, indexed by way.
    pub fn set_lines(&self, set: usize) -> &[CacheLine] {
        let base = set * self.ways;
        &self.lines[base..base + self.ways]
    }

    /// Returns the replacement counters of `set`, indexed by way.
    pub fn replacement_counters(&self, set: usize) -> &[u8] {
        self.policy.counters(set)
    }

    /// Returns the victim buffer.
    pub fn victim_buffer(&self) -> &VictimBuffer {
        &self.victims
    }

    /// Returns the counters accumulated since construction.
    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }

    /// Returns the address decoder for this geometry.
    pub fn decoder(&self) -> &AddressDecoder {
        &self.decoder
    }

    /// Associativity.
    pub fn ways(&self) -> usize {
        self.ways
    }

    /// Label carried by this level's events.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the event sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Returns the event sink mutably.
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }
}

impl<S: EventSink> fmt::Debug for CacheLevel<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheLevel")
            .field("name", &self.name)
            .field("decoder", &self.decoder)
            .field("ways", &self.ways)
            .field("victims", &self.victims)
            .field("prefetch_depth", &self.prefetch_depth)
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}
