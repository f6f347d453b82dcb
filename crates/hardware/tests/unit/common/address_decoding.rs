//! Address Decoder Unit Tests.
//!
//! Verifies set-index and tag extraction, line alignment, and the
//! power-of-two precondition checked at construction.

use cachesim_core::common::addr::log2_exact;
use cachesim_core::common::{AddressDecoder, ConfigError};
use rstest::rstest;

// ══════════════════════════════════════════════════════════
// 1. log2
// ══════════════════════════════════════════════════════════

#[rstest]
#[case(1, 0)]
#[case(2, 1)]
#[case(16, 4)]
#[case(64, 6)]
#[case(1 << 20, 20)]
fn log2_of_powers_of_two(#[case] value: usize, #[case] expected: u32) {
    assert_eq!(log2_exact("x", value).unwrap(), expected);
}

#[rstest]
#[case(0)]
#[case(3)]
#[case(48)]
#[case(100)]
fn log2_rejects_non_powers_of_two(#[case] value: usize) {
    assert_eq!(
        log2_exact("line_bytes", value),
        Err(ConfigError::NotPowerOfTwo {
            field: "line_bytes",
            value
        })
    );
}

// ══════════════════════════════════════════════════════════
// 2. Field extraction
// ══════════════════════════════════════════════════════════

/// 4 sets of 16-byte lines: offset = bits 0..4, index = bits 4..6, tag = bits 6..32.
#[rstest]
#[case(0, 0, 0)]
#[case(15, 0, 0)]
#[case(16, 1, 0)]
#[case(48, 3, 0)]
#[case(64, 0, 64)]
#[case(100, 2, 64)]
#[case(0xFFFF_FFFF, 3, 0xFFFF_FFC0)]
fn decode_small_geometry(#[case] addr: u32, #[case] set: usize, #[case] tag: u32) {
    let decoder = AddressDecoder::new(16, 4).unwrap();
    assert_eq!(decoder.decode(addr), (set, tag));
}

/// Reference L1 geometry: 64 sets of 64-byte lines.
#[test]
fn decode_reference_l1_geometry() {
    let decoder = AddressDecoder::new(64, 64).unwrap();
    assert_eq!(decoder.set_index(100), 1);
    assert_eq!(decoder.tag(100), 0);
    assert_eq!(decoder.set_index(4096 + 200), 3);
    assert_eq!(decoder.tag(4096 + 200), 4096);
}

/// Tag keeps the upper bits in place, so it is always a multiple of sets * block.
#[test]
fn tag_is_aligned_to_set_span() {
    let decoder = AddressDecoder::new(32, 8).unwrap();
    for addr in [0u32, 1, 255, 256, 1000, 0xDEAD_BEEF] {
        assert_eq!(decoder.tag(addr) % 256, 0);
    }
}

#[test]
fn line_address_clears_offset() {
    let decoder = AddressDecoder::new(64, 4).unwrap();
    assert_eq!(decoder.line_address(0x1234), 0x1200);
    assert_eq!(decoder.line_address(0x1240), 0x1240);
}

/// compose(set, tag) rebuilds the line address of any address.
#[test]
fn compose_inverts_decode() {
    let decoder = AddressDecoder::new(16, 4).unwrap();
    for addr in [0u32, 16, 100, 0x8000_0030, 0xFFFF_FFF0] {
        let (set, tag) = decoder.decode(addr);
        assert_eq!(decoder.compose(set, tag), decoder.line_address(addr));
    }
}

/// A single set has no index bits: every address maps to set 0.
#[test]
fn single_set_geometry() {
    let decoder = AddressDecoder::new(64, 1).unwrap();
    assert_eq!(decoder.set_index(0xFFFF_FFFF), 0);
    assert_eq!(decoder.tag(0x1040), 0x1040);
}

// ══════════════════════════════════════════════════════════
// 3. Construction errors
// ══════════════════════════════════════════════════════════

#[test]
fn rejects_non_power_of_two_sets() {
    assert_eq!(
        AddressDecoder::new(64, 6),
        Err(ConfigError::NotPowerOfTwo {
            field: "num_sets",
            value: 6
        })
    );
}

#[test]
fn rejects_fields_wider_than_address() {
    assert!(matches!(
        AddressDecoder::new(1 << 16, 1 << 17),
        Err(ConfigError::AddressTooNarrow { .. })
    ));
}

#[test]
fn accepts_fields_exactly_filling_address() {
    let decoder = AddressDecoder::new(1 << 16, 1 << 16).unwrap();
    assert_eq!(decoder.tag(0xFFFF_FFFF), 0);
    assert_eq!(decoder.set_index(0xFFFF_FFFF), 0xFFFF);
}
