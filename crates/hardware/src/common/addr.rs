//! Address decomposition.
//!
//! This module splits a 32-bit address into the fields a set-associative cache
//! indexes by. It provides the following:
//! 1. **Validated Geometry:** Block size and set count are checked to be powers of two once, at construction.
//! 2. **Field Extraction:** Set index, tag, and line-aligned address for any address.
//! 3. **Reconstruction:** Line address rebuilt from a set index and tag, for write-backs and evictions.

use super::error::ConfigError;

/// Returns `log2(value)` if `value` is a non-zero power of two.
///
/// # Arguments
///
/// * `field` - Name of the configuration field, used in the error.
/// * `value` - The value to check.
///
/// # Returns
///
/// The exponent `n` such that `1 << n == value`.
///
/// # Errors
///
/// [`ConfigError::NotPowerOfTwo`] if `value` is zero or not a power of two.
pub const fn log2_exact(field: &'static str, value: usize) -> Result<u32, ConfigError> {
    if !value.is_power_of_two() {
        return Err(ConfigError::NotPowerOfTwo { field, value });
    }
    Ok(value.trailing_zeros())
}

/// Derives set index and tag from raw addresses for one cache geometry.
///
/// The tag keeps the address bits above the set-index field in place (it is
/// not shifted down), so two lines in the same set compare equal exactly when
/// their upper address bits match.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AddressDecoder {
    offset_bits: u32,
    set_mask: u32,
    tag_mask: u32,
    block_size: u32,
    num_sets: usize,
}

impl AddressDecoder {
    /// Creates a decoder for the given block size and set count.
    ///
    /// # Arguments
    ///
    /// * `block_size` - Line size in bytes; must be a power of two.
    /// * `num_sets` - Number of sets; must be a power of two.
    ///
    /// # Errors
    ///
    /// [`ConfigError::NotPowerOfTwo`] if either size is not a power of two,
    /// [`ConfigError::AddressTooNarrow`] if the offset and index fields do not
    /// fit in 32 bits.
    pub fn new(block_size: usize, num_sets: usize) -> Result<Self, ConfigError> {
        let offset_bits = log2_exact("line_bytes", block_size)?;
        let index_bits = log2_exact("num_sets", num_sets)?;
        let low_bits = offset_bits + index_bits;
        if offset_bits >= 32 || low_bits > 32 {
            return Err(ConfigError::AddressTooNarrow {
                line_bytes: block_size,
                num_sets,
            });
        }

        let set_mask = ((1u64 << index_bits) - 1) as u32;
        let tag_mask = !(((1u64 << low_bits) - 1) as u32);

        Ok(Self {
            offset_bits,
            set_mask,
            tag_mask,
            block_size: block_size as u32,
            num_sets,
        })
    }

    /// Returns the set an address maps to.
    #[inline(always)]
    pub const fn set_index(&self, addr: u32) -> usize {
        ((addr >> self.offset_bits) & self.set_mask) as usize
    }

    /// Returns the tag of an address (all bits above the set-index field).
    #[inline(always)]
    pub const fn tag(&self, addr: u32) -> u32 {
        addr & self.tag_mask
    }

    /// Decodes an address into `(set_index, tag)`.
    #[inline(always)]
    pub const fn decode(&self, addr: u32) -> (usize, u32) {
        (self.set_index(addr), self.tag(addr))
    }

    /// Returns the address with its block-offset bits cleared.
    pub const fn line_address(&self, addr: u32) -> u32 {
        addr & !(self.block_size - 1)
    }

    /// Rebuilds the line address from a set index and a tag.
    pub const fn compose(&self, set: usize, tag: u32) -> u32 {
        tag | ((set as u32) << self.offset_bits)
    }

    /// Line size in bytes.
    pub const fn block_size(&self) -> u32 {
        self.block_size
    }

    /// Number of sets.
    pub const fn num_sets(&self) -> usize {
        self.num_sets
    }
}
