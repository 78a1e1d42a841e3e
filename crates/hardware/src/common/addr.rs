//! Trace address types.
//!
//! This module defines the address representation used by the cache engine. It provides:
//! 1. **Type Safety:** A strong type for raw byte addresses read from a trace.
//! 2. **Parsing:** Conversion from base-16 text tokens (with an optional `0x` prefix).
//! 3. **Decomposition Result:** The `(tag, set index, block offset)` triple produced by decoding.

use std::fmt;
use std::str::FromStr;

use super::error::DecodeError;

/// A byte address in the simulated address space.
///
/// Addresses occupy the full 64-bit machine word; anything wider is rejected
/// while parsing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Address(pub u64);

impl Address {
    /// Creates a new address from a raw 64-bit value.
    #[inline(always)]
    pub const fn new(addr: u64) -> Self {
        Self(addr)
    }

    /// Returns the raw 64-bit address value.
    #[inline(always)]
    pub const fn val(&self) -> u64 {
        self.0
    }

    /// Parses a base-16 address token.
    ///
    /// Surrounding whitespace and a single leading `0x`/`0X` are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::Empty`] for an empty token and
    /// [`DecodeError::Malformed`] when the digits are not valid hexadecimal,
    /// carry a sign, or the value does not fit in 64 bits.
    pub fn parse_hex(text: &str) -> Result<Self, DecodeError> {
        let trimmed = text.trim();
        let digits = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);
        if digits.is_empty() {
            return Err(DecodeError::Empty);
        }
        // `from_str_radix` accepts a leading `+`.
        if digits.starts_with('+') {
            return Err(DecodeError::Malformed {
                text: text.to_owned(),
                source: None,
            });
        }
        u64::from_str_radix(digits, 16)
            .map(Self)
            .map_err(|source| DecodeError::Malformed {
                text: text.to_owned(),
                source: Some(source),
            })
    }
}

impl FromStr for Address {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_hex(s)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

impl From<u64> for Address {
    fn from(addr: u64) -> Self {
        Self(addr)
    }
}

/// An address split into the three fields a set-associative cache indexes by.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DecodedAddress {
    /// High-order bits identifying the memory block.
    pub tag: u64,
    /// Middle bits selecting the set.
    pub set_index: usize,
    /// Low-order bits locating the byte within the block.
    pub block_offset: u64,
}
