//! Cache geometry and address decomposition.
//!
//! A set-associative cache splits every address into three fields:
//!
//! ```text
//!  63                                                    0
//! +----------------------+-------------------+-------------+
//! |         tag          |     set index     | block offset|
//! +----------------------+-------------------+-------------+
//!                         <- set_index_bits -><- offset -->
//! ```
//!
//! The widths are derived once from the [`CacheOptions`] and every field is
//! extracted with an exact mask, so addresses with bits set at the extremes
//! of a field decode exactly like in-range addresses.

use crate::common::addr::{Address, DecodedAddress};
use crate::common::error::{ConfigError, DecodeError};
use crate::config::CacheOptions;

/// Returns a mask of the low `bits` bits.
#[inline]
const fn low_mask(bits: u32) -> u64 {
    if bits >= u64::BITS {
        u64::MAX
    } else {
        (1u64 << bits) - 1
    }
}

/// Derived, immutable layout of a cache.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CacheGeometry {
    /// `log2(size)`, rounded down.
    pub total_bits: u32,
    /// `size / (block_size * associativity)`.
    pub num_sets: usize,
    /// Lines per set.
    pub associativity: usize,
    /// Bytes per line.
    pub block_size: u64,
    /// `log2(num_sets)`.
    pub set_index_bits: u32,
    /// `log2(block_size)`.
    pub block_offset_bits: u32,
    /// `total_bits - set_index_bits - block_offset_bits`.
    pub tag_bits: u32,
}

impl CacheGeometry {
    /// Validates `options` and derives the field widths.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when any size is zero, the block size is not a
    /// power of two, the size is not a whole number of sets, or the resulting
    /// set count is not a power of two.
    pub fn new(options: &CacheOptions) -> Result<Self, ConfigError> {
        if options.size == 0 {
            return Err(ConfigError::Zero { field: "size" });
        }
        if options.block_size == 0 {
            return Err(ConfigError::Zero {
                field: "block_size",
            });
        }
        if options.associativity == 0 {
            return Err(ConfigError::Zero {
                field: "associativity",
            });
        }
        if !options.block_size.is_power_of_two() {
            return Err(ConfigError::NotPowerOfTwo {
                field: "block_size",
                value: options.block_size,
            });
        }

        let set_bytes = options
            .block_size
            .checked_mul(options.associativity as u64)
            .filter(|&bytes| bytes <= options.size && options.size % bytes == 0)
            .ok_or(ConfigError::Indivisible {
                size: options.size,
                set_bytes: options.block_size.saturating_mul(options.associativity as u64),
            })?;

        let num_sets = options.size / set_bytes;
        if !num_sets.is_power_of_two() {
            return Err(ConfigError::NotPowerOfTwo {
                field: "num_sets",
                value: num_sets,
            });
        }

        let total_bits = options.size.ilog2();
        let set_index_bits = num_sets.ilog2();
        let block_offset_bits = options.block_size.ilog2();

        Ok(Self {
            total_bits,
            num_sets: num_sets as usize,
            associativity: options.associativity,
            block_size: options.block_size,
            set_index_bits,
            block_offset_bits,
            tag_bits: total_bits.saturating_sub(set_index_bits + block_offset_bits),
        })
    }

    /// Splits a numeric address into `(tag, set_index, block_offset)`.
    #[inline]
    pub const fn decode(&self, address: Address) -> DecodedAddress {
        let addr = address.val();
        let block_offset = addr & low_mask(self.block_offset_bits);
        let set_index = (addr >> self.block_offset_bits) & low_mask(self.set_index_bits);
        let tag = addr >> (self.block_offset_bits + self.set_index_bits);
        DecodedAddress {
            tag,
            set_index: set_index as usize,
            block_offset,
        }
    }

    /// Parses a base-16 address token and decodes it.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError`] if the token is not a valid 64-bit hex value.
    pub fn decode_str(&self, text: &str) -> Result<DecodedAddress, DecodeError> {
        Address::parse_hex(text).map(|addr| self.decode(addr))
    }

    /// Reassembles decoded fields into the address they came from.
    #[inline]
    pub const fn encode(&self, decoded: &DecodedAddress) -> Address {
        let tag = decoded.tag << (self.block_offset_bits + self.set_index_bits);
        let set = (decoded.set_index as u64) << self.block_offset_bits;
        Address(tag | set | decoded.block_offset)
    }
}
