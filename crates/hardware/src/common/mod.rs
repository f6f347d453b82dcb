//! Common types shared by every cache component.
//!
//! This module provides the building blocks the cache levels are assembled from:
//! 1. **Address Decoding:** Validated set-index and tag extraction.
//! 2. **Access Kinds:** Classification of demand, prefetch, and promotion traffic.
//! 3. **Error Handling:** Configuration error types.

/// Address decomposition (set index, tag, line address).
pub mod addr;

/// Access kind definitions.
pub mod data;

/// Configuration error types.
pub mod error;

pub use addr::AddressDecoder;
pub use data::AccessKind;
pub use error::ConfigError;
