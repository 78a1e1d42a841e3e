//! Cache Geometry Tests.
//!
//! Verifies field-width derivation, rejection of invalid geometries and
//! mask-based address decomposition.

use cachesim_core::cache::CacheGeometry;
use cachesim_core::common::{Address, ConfigError, DecodedAddress};
use cachesim_core::config::WritePolicy;
use pretty_assertions::assert_eq;
use rstest::rstest;

use crate::common::harness::options;

fn geometry(size: u64, block_size: u64, ways: usize) -> Result<CacheGeometry, ConfigError> {
    CacheGeometry::new(&options(size, block_size, ways, WritePolicy::WriteBack))
}

// ══════════════════════════════════════════════════════════
// 1. Derived widths
// ══════════════════════════════════════════════════════════

#[rstest]
#[case(1024, 32, 1, 32, 10, 5, 5, 0)]
#[case(1024, 32, 2, 16, 10, 4, 5, 1)]
#[case(8192, 64, 4, 32, 13, 5, 6, 2)]
#[case(256, 64, 4, 1, 8, 0, 6, 2)]
#[case(3072, 32, 3, 32, 11, 5, 5, 1)]
fn derives_field_widths(
    #[case] size: u64,
    #[case] block_size: u64,
    #[case] ways: usize,
    #[case] num_sets: usize,
    #[case] total_bits: u32,
    #[case] set_index_bits: u32,
    #[case] block_offset_bits: u32,
    #[case] tag_bits: u32,
) {
    let g = geometry(size, block_size, ways).unwrap();
    assert_eq!(g.num_sets, num_sets);
    assert_eq!(g.total_bits, total_bits);
    assert_eq!(g.set_index_bits, set_index_bits);
    assert_eq!(g.block_offset_bits, block_offset_bits);
    assert_eq!(g.tag_bits, tag_bits);
    assert_eq!(g.num_sets as u64 * ways as u64 * block_size, size);
}

// ══════════════════════════════════════════════════════════
// 2. Rejected geometries
// ══════════════════════════════════════════════════════════

#[rstest]
#[case(0, 32, 1, ConfigError::Zero { field: "size" })]
#[case(1024, 0, 1, ConfigError::Zero { field: "block_size" })]
#[case(1024, 32, 0, ConfigError::Zero { field: "associativity" })]
#[case(1024, 24, 1, ConfigError::NotPowerOfTwo { field: "block_size", value: 24 })]
#[case(1000, 32, 1, ConfigError::Indivisible { size: 1000, set_bytes: 32 })]
#[case(64, 32, 4, ConfigError::Indivisible { size: 64, set_bytes: 128 })]
#[case(3072, 32, 2, ConfigError::NotPowerOfTwo { field: "num_sets", value: 48 })]
fn rejects_invalid_geometry(
    #[case] size: u64,
    #[case] block_size: u64,
    #[case] ways: usize,
    #[case] expected: ConfigError,
) {
    assert_eq!(geometry(size, block_size, ways), Err(expected));
}

// ══════════════════════════════════════════════════════════
// 3. Decomposition
// ══════════════════════════════════════════════════════════

/// 0x1234 with 5 offset bits and 5 index bits:
///   offset = 0x1234 & 0x1f        = 0x14
///   set    = (0x1234 >> 5) & 0x1f = 0x11
///   tag    = 0x1234 >> 10         = 0x4
#[test]
fn decodes_fields_with_exact_masks() {
    let g = geometry(1024, 32, 1).unwrap();
    assert_eq!(
        g.decode(Address(0x1234)),
        DecodedAddress {
            tag: 0x4,
            set_index: 0x11,
            block_offset: 0x14,
        }
    );
}

#[test]
fn extreme_bits_decode_like_in_range_addresses() {
    let g = geometry(1024, 32, 1).unwrap();
    let top = g.decode(Address(u64::MAX));
    assert_eq!(top.block_offset, 31);
    assert_eq!(top.set_index, 31);
    assert_eq!(top.tag, u64::MAX >> 10);

    let low = g.decode(Address(0x3ff));
    assert_eq!((low.tag, low.set_index, low.block_offset), (0, 31, 31));
}

#[test]
fn single_set_cache_uses_set_zero() {
    let g = geometry(256, 64, 4).unwrap();
    for addr in [0u64, 0x40, 0xfff_ffc0, u64::MAX] {
        assert_eq!(g.decode(Address(addr)).set_index, 0);
    }
    assert_eq!(g.decode(Address(0x140)).tag, 5);
}

#[test]
fn decode_str_accepts_prefixed_and_rejects_garbage() {
    let g = geometry(1024, 32, 2).unwrap();
    assert_eq!(g.decode_str("0x220").unwrap(), g.decode(Address(0x220)));
    assert!(g.decode_str("0xnope").is_err());
}

#[test]
fn encode_reassembles_decoded_fields() {
    let g = geometry(8192, 64, 4).unwrap();
    for addr in [0u64, 0x1fff, 0xdead_beef, u64::MAX] {
        assert_eq!(g.encode(&g.decode(Address(addr))), Address(addr));
    }
}
