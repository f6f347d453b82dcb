//! Configuration error definitions.
//!
//! Construction is the only fallible step in the simulator: once a level has
//! been built, every 32-bit address yields a deterministic hit or miss. This
//! module defines the errors raised when a cache geometry cannot be decoded.

use thiserror::Error;

/// Errors raised while validating a cache configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A size that feeds the address bit arithmetic is not a power of two.
    ///
    /// Set index and tag extraction rely on masking, so both the line size
    /// and the derived set count must be powers of two.
    #[error("{field} must be a non-zero power of two, got {value}")]
    NotPowerOfTwo {
        /// Name of the offending field.
        field: &'static str,
        /// The rejected value.
        value: usize,
    },

    /// Associativity of zero.
    #[error("associativity must be at least one way")]
    ZeroWays,

    /// Capacity is not a whole number of sets.
    #[error("size_bytes {size_bytes} is not a multiple of line_bytes {line_bytes} x ways {ways}")]
    Indivisible {
        /// Total capacity in bytes.
        size_bytes: usize,
        /// Line size in bytes.
        line_bytes: usize,
        /// Associativity.
        ways: usize,
    },

    /// Capacity, or the size of one set, exceeds the 32-bit address space.
    #[error("size_bytes {size_bytes} with {line_bytes}-byte lines x {ways} ways exceeds 4 GiB")]
    ExceedsAddressSpace {
        /// Total capacity in bytes.
        size_bytes: usize,
        /// Line size in bytes.
        line_bytes: usize,
        /// Associativity.
        ways: usize,
    },

    /// Offset and index fields do not fit in a 32-bit address.
    #[error("{line_bytes}-byte lines across {num_sets} sets exceed a 32-bit address")]
    AddressTooNarrow {
        /// Line size in bytes.
        line_bytes: usize,
        /// Number of sets.
        num_sets: usize,
    },
}
