//! Structured cache event stream.
//!
//! Cache levels never print. Every decision they take is reported as a
//! [`CacheEvent`] to an [`EventSink`] owned by the level. This module provides:
//! 1. **Events:** One variant per observable decision (hit, miss, victim hit, write-back, eviction, prefetch).
//! 2. **Sinks:** A recording sink for tests and tooling, a `tracing` sink for logs, and a null sink.

use crate::common::AccessKind;

/// A decision taken by a cache level.
///
/// `level` is the name the level was constructed with (e.g. `"L1"`).
/// Addresses of lines leaving the store are line-aligned reconstructions
/// from set index and tag.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CacheEvent {
    /// A valid line with a matching tag was found in the store.
    Hit {
        /// Level name.
        level: &'static str,
        /// Accessed address.
        addr: u32,
        /// Set index.
        set: usize,
        /// Way holding the line.
        way: usize,
        /// Why the access happened.
        kind: AccessKind,
    },

    /// The line was found in the victim buffer and moved back into the store.
    VictimHit {
        /// Level name.
        level: &'static str,
        /// Accessed address.
        addr: u32,
        /// Set index.
        set: usize,
        /// Way the line was reinstalled into.
        way: usize,
        /// Why the access happened.
        kind: AccessKind,
    },

    /// Neither the store nor the victim buffer held the line; it is filled.
    Miss {
        /// Level name.
        level: &'static str,
        /// Accessed address.
        addr: u32,
        /// Set index.
        set: usize,
        /// Way being filled.
        way: usize,
        /// Why the access happened.
        kind: AccessKind,
    },

    /// A dirty line must be written to the backing store before reuse.
    WriteBack {
        /// Level name.
        level: &'static str,
        /// Line address being written back.
        addr: u32,
        /// Set index.
        set: usize,
        /// Way the line occupied.
        way: usize,
    },

    /// A valid line left the store and entered the victim buffer.
    Evict {
        /// Level name.
        level: &'static str,
        /// Line address of the evicted line.
        addr: u32,
        /// Set index.
        set: usize,
        /// Way the line occupied.
        way: usize,
    },

    /// The oldest victim buffer entry was discarded to make room.
    VictimDrop {
        /// Level name.
        level: &'static str,
        /// Line address of the discarded line.
        addr: u32,
    },

    /// A next-line prefetch access is being issued.
    Prefetch {
        /// Level name.
        level: &'static str,
        /// Address being prefetched.
        addr: u32,
        /// Position in the prefetch chain, starting at 1.
        depth: usize,
    },
}

impl CacheEvent {
    /// Name of the level that emitted the event.
    pub fn level(&self) -> &'static str {
        match self {
            Self::Hit { level, .. }
            | Self::VictimHit { level, .. }
            | Self::Miss { level, .. }
            | Self::WriteBack { level, .. }
            | Self::Evict { level, .. }
            | Self::VictimDrop { level, .. }
            | Self::Prefetch { level, .. } => *level,
        }
    }

    /// Address the event refers to.
    pub fn addr(&self) -> u32 {
        match self {
            Self::Hit { addr, .. }
            | Self::VictimHit { addr, .. }
            | Self::Miss { addr, .. }
            | Self::WriteBack { addr, .. }
            | Self::Evict { addr, .. }
            | Self::VictimDrop { addr, .. }
            | Self::Prefetch { addr, .. } => *addr,
        }
    }
}

/// Consumer of cache events.
pub trait EventSink {
    /// Receives one event, in the order decisions are taken.
    fn emit(&mut self, event: CacheEvent);
}

/// Sink that discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    #[inline]
    fn emit(&mut self, _event: CacheEvent) {}
}

/// Sink that forwards events to `tracing`.
///
/// Hits, misses and prefetches go out at `trace` level; write-backs and
/// evictions at `debug`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn emit(&mut self, event: CacheEvent) {
        match event {
            CacheEvent::Hit {
                level,
                addr,
                set,
                way,
                kind,
            } => tracing::trace!(cache = level, addr, set, way, ?kind, "cache hit"),
            CacheEvent::VictimHit {
                level,
                addr,
                set,
                way,
                kind,
            } => tracing::trace!(cache = level, addr, set, way, ?kind, "victim buffer hit"),
            CacheEvent::Miss {
                level,
                addr,
                set,
                way,
                kind,
            } => tracing::trace!(cache = level, addr, set, way, ?kind, "cache miss"),
            CacheEvent::WriteBack {
                level,
                addr,
                set,
                way,
            } => tracing::debug!(cache = level, addr, set, way, "write-back"),
            CacheEvent::Evict {
                level,
                addr,
                set,
                way,
            } => tracing::debug!(cache = level, addr, set, way, "evict to victim buffer"),
            CacheEvent::VictimDrop { level, addr } => {
                tracing::debug!(cache = level, addr, "victim buffer drop");
            }
            CacheEvent::Prefetch { level, addr, depth } => {
                tracing::trace!(cache = level, addr, depth, "prefetch");
            }
        }
    }
}

/// Sink that records every event in order.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Vec<CacheEvent>,
}

impl EventLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded events, oldest first.
    pub fn events(&self) -> &[CacheEvent] {
        &self.events
    }

    /// Number of recorded events matching `pred`.
    pub fn count(&self, pred: impl Fn(&CacheEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }

    /// Removes and returns every recorded event.
    pub fn take(&mut self) -> Vec<CacheEvent> {
        std::mem::take(&mut self.events)
    }

    /// Forgets every recorded event.
    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl EventSink for EventLog {
    fn emit(&mut self, event: CacheEvent) {
        self.events.push(event);
    }
}
