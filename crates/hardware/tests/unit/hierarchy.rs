//! Cache Hierarchy Tests.
//!
//! Verifies the L1/L2 access sequence: L1 hits short-circuit, L1 misses fall
//! through to L2, L2 hits are promoted into L1, and dirty state is not
//! propagated between levels.

use cachesim_core::{CacheHierarchy, CacheLevel};
use cachesim_core::common::AccessKind;
use cachesim_core::config::{CacheConfig, HierarchyConfig};
use cachesim_core::events::{CacheEvent, EventLog};
use pretty_assertions::assert_eq;

/// L1: 4 sets x 2 ways of 16 bytes. L2: 16 sets x 2 ways of 16 bytes.
/// Prefetch disabled in both levels.
fn small_hierarchy() -> CacheHierarchy<EventLog> {
    let config = HierarchyConfig {
        l1: CacheConfig {
            size_bytes: 128,
            line_bytes: 16,
            ways: 2,
            victim_entries: 0,
            prefetch_depth: 0,
        },
        l2: CacheConfig {
            size_bytes: 512,
            line_bytes: 16,
            ways: 2,
            victim_entries: 0,
            prefetch_depth: 0,
        },
    };
    CacheHierarchy::with_sinks(&config, EventLog::new(), EventLog::new()).unwrap()
}

/// Evicts a resident `addr` from the small L1 by making it the most recently
/// touched line of a full set, then filling one more line into that set.
fn evict_from_l1(h: &mut CacheHierarchy<EventLog>, addr: u32) {
    // 64 bytes apart: same L1 set, different L2 sets.
    let _ = h.access_memory(addr + 64, false);
    assert!(h.access_memory(addr, false));
    let _ = h.access_memory(addr + 128, false);
}

#[test]
fn cold_access_misses_both_then_hits_l1() {
    let mut h = small_hierarchy();
    assert!(!h.access_memory(0x40, false));
    assert!(h.l1().contains(0x40));
    assert!(h.l2().contains(0x40));

    assert!(h.access_memory(0x40, false));
    assert_eq!(h.l1().stats().hits, 1);
    assert_eq!(h.l2().stats().accesses(), 1, "L1 hit does not reach L2");
}

#[test]
fn l2_hit_is_promoted_into_l1() {
    let mut h = small_hierarchy();
    let _ = h.access_memory(0, false);
    evict_from_l1(&mut h, 0);
    assert!(!h.l1().contains(0));
    assert!(h.l2().contains(0));
    h.l1_mut().sink_mut().clear();
    h.l2_mut().sink_mut().clear();

    assert!(h.access_memory(0, false), "L2 hit");
    assert!(h.l1().contains(0));
    assert_eq!(
        h.l2().sink().events(),
        &[CacheEvent::Hit {
            level: "L2",
            addr: 0,
            set: 0,
            way: 0,
            kind: AccessKind::Demand,
        }]
    );

    let l1_events = h.l1().sink().events();
    assert!(matches!(
        l1_events.first(),
        Some(CacheEvent::Miss {
            addr: 0,
            kind: AccessKind::Demand,
            ..
        })
    ));
    assert!(matches!(
        l1_events.last(),
        Some(CacheEvent::Hit {
            addr: 0,
            kind: AccessKind::Fill,
            ..
        })
    ));
    assert_eq!(h.l1().stats().promotions, 1);
}

#[test]
fn miss_in_both_levels_returns_miss() {
    let mut h = small_hierarchy();
    assert!(!h.access_memory(0x100, true));
    assert_eq!(h.l1().stats().misses, 1);
    assert_eq!(h.l2().stats().misses, 1);
}

/// A write that misses L1 dirties the line in both levels.
#[test]
fn write_miss_dirties_both_levels() {
    let mut h = small_hierarchy();
    let _ = h.access_memory(0x10, true);
    let (l1_set, _) = h.l1().decoder().decode(0x10);
    let (l2_set, _) = h.l2().decoder().decode(0x10);
    assert!(h.l1().line(l1_set, 0).dirty);
    assert!(h.l2().line(l2_set, 0).dirty);
}

/// A write that hits L1 is not reflected in L2.
#[test]
fn l1_write_hit_leaves_l2_clean() {
    let mut h = small_hierarchy();
    let _ = h.access_memory(0x10, false);
    assert!(h.access_memory(0x10, true));
    let (l1_set, _) = h.l1().decoder().decode(0x10);
    let (l2_set, _) = h.l2().decoder().decode(0x10);
    assert!(h.l1().line(l1_set, 0).dirty);
    assert!(!h.l2().line(l2_set, 0).dirty);
}

#[test]
fn flush_writes_back_both_levels() {
    let mut h = small_hierarchy();
    let _ = h.access_memory(0x20, true);
    h.flush();
    let wb = |log: &EventLog| log.count(|e| matches!(e, CacheEvent::WriteBack { .. }));
    assert_eq!(wb(h.l1().sink()), 1);
    assert_eq!(wb(h.l2().sink()), 1);
}

#[test]
fn events_are_tagged_with_level_name() {
    let mut h = small_hierarchy();
    let _ = h.access_memory(0, false);
    assert!(h.l1().sink().events().iter().all(|e| e.level() == "L1"));
    assert!(h.l2().sink().events().iter().all(|e| e.level() == "L2"));
}

/// Reference configuration with prefetch: the reference pattern behaves as
/// two misses bracketing hits.
#[test]
fn reference_hierarchy_pattern() {
    let mut h = CacheHierarchy::new(&HierarchyConfig::default()).unwrap();
    let results: Vec<bool> = [(100, false), (120, false), (100, false), (200, true), (100, false)]
        .into_iter()
        .map(|(addr, w)| h.access_memory(addr, w))
        .collect();
    assert_eq!(results, vec![false, true, true, false, true]);
    assert_eq!(h.l1().stats().prefetches, 2);
}

/// Levels built separately can be composed, e.g. with different line sizes.
#[test]
fn hierarchy_from_prebuilt_levels() {
    let l1 = CacheConfig {
        size_bytes: 128,
        line_bytes: 16,
        ways: 2,
        victim_entries: 0,
        prefetch_depth: 0,
    };
    let l2 = CacheConfig {
        size_bytes: 1024,
        line_bytes: 64,
        ways: 2,
        victim_entries: 0,
        prefetch_depth: 0,
    };
    let mut h = CacheHierarchy::from_levels(
        CacheLevel::with_sink("L1", &l1, EventLog::new()).unwrap(),
        CacheLevel::with_sink("L2", &l2, EventLog::new()).unwrap(),
    );

    assert!(!h.access_memory(0, false));
    // 0x20 shares L2's 64-byte line with 0 but not L1's 16-byte line.
    assert!(h.access_memory(0x20, false));
    assert_eq!(h.l1().stats().misses, 2);
    assert_eq!(h.l2().stats().hits, 1);
    assert_eq!(h.l1().stats().promotions, 1);
}

#[test]
fn invalid_level_config_is_rejected() {
    let config = HierarchyConfig {
        l2: CacheConfig {
            line_bytes: 48,
            ..CacheConfig::l2()
        },
        ..HierarchyConfig::default()
    };
    assert!(CacheHierarchy::new(&config).is_err());
}
