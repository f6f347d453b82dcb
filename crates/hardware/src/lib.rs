//! Set-associative cache hierarchy simulator library.
//!
//! This crate reproduces the decision logic of a cache controller for a stream of
//! 32-bit memory accesses, without storing any data:
//! 1. **Levels:** Set-associative store, counter pseudo-LRU replacement, victim buffer, write-back.
//! 2. **Prefetch:** Next-line prefetch after hits and fills, with a bounded chain depth.
//! 3. **Hierarchy:** An L1/L2 pair with promotion of L2 hits into L1.
//! 4. **Observability:** Structured events and per-level statistics.
//! 5. **Configuration:** Validated geometry, deserializable from JSON.

/// Common types (address decoding, access kinds, configuration errors).
pub mod common;
/// Cache configuration (defaults, per-level and hierarchy structures).
pub mod config;
/// Cache level (store, replacement policies, victim buffer).
pub mod cache;
/// Structured event stream and sinks.
pub mod events;
/// Two-level cache hierarchy.
pub mod hierarchy;
/// Hardware prefetchers.
pub mod prefetch;
/// Per-level statistics.
pub mod stats;

/// Root configuration type; use `HierarchyConfig::default()` or `HierarchyConfig::from_json`.
pub use crate::config::{CacheConfig, HierarchyConfig};
/// Single cache level; construct with `CacheLevel::new` or `CacheLevel::with_sink`.
pub use crate::cache::CacheLevel;
/// L1/L2 hierarchy; construct with `CacheHierarchy::new`.
pub use crate::hierarchy::CacheHierarchy;
