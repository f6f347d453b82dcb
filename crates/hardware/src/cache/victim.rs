//! Victim Buffer.
//!
//! A small fully-associative FIFO holding lines recently evicted from a cache
//! level. A miss in the main store checks the buffer before going further; a
//! match moves the line back into the store and removes it from the buffer.
//!
//! The buffer is pure FIFO: a lookup never promotes an entry, and inserting
//! into a full buffer drops the oldest entry.

use std::collections::VecDeque;

use super::CacheLine;

/// A line evicted from the main store.
///
/// The set index is kept alongside the line because tags exclude the
/// set-index bits; matching on the tag alone would alias lines from
/// different sets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VictimEntry {
    /// Set the line was evicted from.
    pub set: usize,
    /// The evicted line, always valid and clean.
    pub line: CacheLine,
}

impl VictimEntry {
    /// Tag of the evicted line.
    pub const fn tag(&self) -> u32 {
        self.line.tag
    }
}

/// Bounded FIFO of recently evicted lines.
#[derive(Debug, Clone)]
pub struct VictimBuffer {
    entries: VecDeque<VictimEntry>,
    capacity: usize,
}

impl VictimBuffer {
    /// Creates an empty buffer holding at most `capacity` lines.
    ///
    /// A capacity of zero disables the buffer: every insert is dropped.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Removes and returns the entry for `(set, tag)` if present.
    ///
    /// The relative order of the remaining entries is unchanged; on a miss
    /// the buffer is left untouched.
    pub fn lookup(&mut self, set: usize, tag: u32) -> Option<VictimEntry> {
        let pos = self
            .entries
            .iter()
            .position(|e| e.set == set && e.line.tag == tag)?;
        self.entries.remove(pos)
    }

    /// Returns `true` if `(set, tag)` is buffered, without removing it.
    pub fn contains(&self, set: usize, tag: u32) -> bool {
        self.entries
            .iter()
            .any(|e| e.set == set && e.line.tag == tag)
    }

    /// Appends an entry, dropping the oldest one first if the buffer is full.
    ///
    /// # Returns
    ///
    /// The entry that left the buffer to make room, if any. With a capacity
    /// of zero this is the inserted entry itself.
    pub fn insert(&mut self, entry: VictimEntry) -> Option<VictimEntry> {
        if self.capacity == 0 {
            return Some(entry);
        }
        let dropped = if self.entries.len() >= self.capacity {
            self.entries.pop_front()
        } else {
            None
        };
        self.entries.push_back(entry);
        dropped
    }

    /// Number of buffered lines.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no lines are buffered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of buffered lines.
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Iterates over the buffered entries, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &VictimEntry> {
        self.entries.iter()
    }

    /// Drops every buffered line.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
