//! Configuration system for the cache simulator.
//!
//! This module defines the configuration structures used to parameterize
//! cache levels and the two-level hierarchy. It provides:
//! 1. **Defaults:** Baseline geometry for the L1 and L2 levels.
//! 2. **Structures:** Per-level config and the hierarchy config composing two levels.
//! 3. **Validation:** Derivation of the set count and checking of the power-of-two geometry.
//!
//! Configuration is deserialized from JSON or built with `HierarchyConfig::default()`.

use serde::Deserialize;

use crate::common::{AddressDecoder, ConfigError};

/// Default configuration constants for the simulator.
///
/// These values reproduce the reference two-level hierarchy when not
/// explicitly overridden in a JSON configuration file.
mod defaults {
    /// Default L1 capacity in bytes (32 KiB).
    pub const L1_SIZE: usize = 32 * 1024;

    /// Default L2 capacity in bytes (256 KiB).
    pub const L2_SIZE: usize = 256 * 1024;

    /// Default cache line size in bytes (64 bytes).
    pub const CACHE_LINE: usize = 64;

    /// Default associativity (8 ways).
    pub const CACHE_WAYS: usize = 8;

    /// Default L1 victim buffer capacity (8 entries).
    pub const L1_VICTIM_ENTRIES: usize = 8;

    /// Default L2 victim buffer capacity (16 entries).
    pub const L2_VICTIM_ENTRIES: usize = 16;

    /// Default prefetch chain length (one next line per access).
    pub const PREFETCH_DEPTH: usize = 1;
}

/// Bytes addressable with a 32-bit address.
const ADDRESS_SPACE_BYTES: u64 = 1 << 32;

/// Root configuration for a two-level hierarchy.
///
/// # Examples
///
/// ```
/// use cachesim_core::config::HierarchyConfig;
///
/// let json = r#"{
///     "l1": { "size_bytes": 1024, "line_bytes": 32, "ways": 2, "victim_entries": 4 },
///     "l2": { "size_bytes": 8192, "prefetch_depth": 0 }
/// }"#;
///
/// let config = HierarchyConfig::from_json(json).unwrap();
/// assert_eq!(config.l1.size_bytes, 1024);
/// assert_eq!(config.l1.num_sets().unwrap(), 16);
/// assert_eq!(config.l2.line_bytes, 64);
/// assert_eq!(config.l2.prefetch_depth, 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HierarchyConfig {
    /// First-level cache, consulted first on every access.
    #[serde(default = "CacheConfig::l1")]
    pub l1: CacheConfig,
    /// Second-level cache, consulted on an L1 miss.
    #[serde(default = "CacheConfig::l2")]
    pub l2: CacheConfig,
}

impl HierarchyConfig {
    /// Parses a hierarchy configuration from a JSON document.
    ///
    /// Missing levels fall back to [`CacheConfig::l1`] and [`CacheConfig::l2`];
    /// missing fields within a level fall back to the per-field defaults.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error if the document is malformed.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl Default for HierarchyConfig {
    fn default() -> Self {
        Self {
            l1: CacheConfig::l1(),
            l2: CacheConfig::l2(),
        }
    }
}

/// Individual cache level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CacheConfig {
    /// Total cache size in bytes
    #[serde(default = "CacheConfig::default_size")]
    pub size_bytes: usize,

    /// Cache line size in bytes
    #[serde(default = "CacheConfig::default_line")]
    pub line_bytes: usize,

    /// Associativity (number of ways)
    #[serde(default = "CacheConfig::default_ways")]
    pub ways: usize,

    /// Victim buffer capacity in lines (0 disables the buffer)
    #[serde(default = "CacheConfig::default_victim_entries")]
    pub victim_entries: usize,

    /// Maximum number of chained next-line prefetches per access (0 disables prefetch)
    #[serde(default = "CacheConfig::default_prefetch_depth")]
    pub prefetch_depth: usize,
}

impl CacheConfig {
    /// Returns the default cache size in bytes.
    fn default_size() -> usize {
        defaults::L1_SIZE
    }

    /// Returns the default cache line size in bytes.
    fn default_line() -> usize {
        defaults::CACHE_LINE
    }

    /// Returns the default cache associativity (number of ways).
    fn default_ways() -> usize {
        defaults::CACHE_WAYS
    }

    /// Returns the default victim buffer capacity.
    fn default_victim_entries() -> usize {
        defaults::L1_VICTIM_ENTRIES
    }

    /// Returns the default prefetch chain length.
    fn default_prefetch_depth() -> usize {
        defaults::PREFETCH_DEPTH
    }

    /// Reference L1 geometry: 32 KiB, 64-byte lines, 8-way, 8 victim entries.
    pub fn l1() -> Self {
        Self::default()
    }

    /// Reference L2 geometry: 256 KiB, 64-byte lines, 8-way, 16 victim entries.
    pub fn l2() -> Self {
        Self {
            size_bytes: defaults::L2_SIZE,
            victim_entries: defaults::L2_VICTIM_ENTRIES,
            ..Self::default()
        }
    }

    /// Derives the number of sets as `size_bytes / (line_bytes * ways)`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroWays`] for zero associativity,
    /// [`ConfigError::NotPowerOfTwo`] for a zero line size, and
    /// [`ConfigError::ExceedsAddressSpace`] if the capacity or one set is
    /// larger than 4 GiB, and [`ConfigError::Indivisible`] if the capacity is
    /// not a whole number of sets.
    pub fn num_sets(&self) -> Result<usize, ConfigError> {
        if self.ways == 0 {
            return Err(ConfigError::ZeroWays);
        }
        if self.line_bytes == 0 {
            return Err(ConfigError::NotPowerOfTwo {
                field: "line_bytes",
                value: 0,
            });
        }
        let too_large = ConfigError::ExceedsAddressSpace {
            size_bytes: self.size_bytes,
            line_bytes: self.line_bytes,
            ways: self.ways,
        };
        if self.size_bytes as u64 > ADDRESS_SPACE_BYTES {
            return Err(too_large);
        }
        let set_bytes = self.line_bytes.checked_mul(self.ways).ok_or(too_large)?;
        if self.size_bytes % set_bytes != 0 {
            return Err(ConfigError::Indivisible {
                size_bytes: self.size_bytes,
                line_bytes: self.line_bytes,
                ways: self.ways,
            });
        }
        Ok(self.size_bytes / set_bytes)
    }

    /// Validates the geometry and builds the matching address decoder.
    ///
    /// # Errors
    ///
    /// Any error from [`CacheConfig::num_sets`], or
    /// [`ConfigError::NotPowerOfTwo`] if the line size or set count is not a
    /// power of two.
    pub fn decoder(&self) -> Result<AddressDecoder, ConfigError> {
        let num_sets = self.num_sets()?;
        AddressDecoder::new(self.line_bytes, num_sets)
    }
}

impl Default for CacheConfig {
    /// Creates the reference L1 configuration with prefetch depth 1.
    fn default() -> Self {
        Self {
            size_bytes: defaults::L1_SIZE,
            line_bytes: defaults::CACHE_LINE,
            ways: defaults::CACHE_WAYS,
            victim_entries: defaults::L1_VICTIM_ENTRIES,
            prefetch_depth: defaults::PREFETCH_DEPTH,
        }
    }
}
