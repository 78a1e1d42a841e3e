//! Error definitions.
//!
//! This module defines every failure the simulator reports. It provides:
//! 1. **Configuration Errors:** Raised once, when cache options do not describe a valid geometry.
//! 2. **Access Errors:** Raised per access, for malformed addresses or unknown operation codes.
//! 3. **Simulation Errors:** Raised by the trace driver for I/O, JSON and trace-format problems.
//!
//! All errors are plain values. A failed access never mutates cache state.

use std::num::ParseIntError;

use thiserror::Error;

/// Invalid cache options, detected when a cache is constructed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A size parameter was zero.
    #[error("{field} must be non-zero")]
    Zero {
        /// Name of the offending option.
        field: &'static str,
    },

    /// A parameter that must be a power of two was not.
    #[error("{field} must be a power of two (got {value})")]
    NotPowerOfTwo {
        /// Name of the offending option or derived quantity.
        field: &'static str,
        /// The rejected value.
        value: u64,
    },

    /// The cache size is not a whole number of sets.
    #[error("cache size {size} is not a multiple of block_size * associativity ({set_bytes})")]
    Indivisible {
        /// Total cache size in bytes.
        size: u64,
        /// Bytes covered by one set.
        set_bytes: u64,
    },

    /// A policy name was not recognized.
    #[error("unknown cache policy '{0}'")]
    UnknownPolicy(String),

    /// A cache organization code was not recognized.
    #[error("unknown cache organization '{0}'")]
    UnknownOrganization(String),
}

/// Failure to turn an address token into `(tag, set, offset)`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The address token was empty.
    #[error("empty address")]
    Empty,

    /// The address token was not an unsigned base-16 integer that fits in 64 bits.
    #[error("malformed address '{text}'")]
    Malformed {
        /// The rejected token.
        text: String,
        /// Underlying integer parse failure, absent when the token was
        /// rejected for carrying a sign.
        #[source]
        source: Option<ParseIntError>,
    },
}

/// Failure of a single cache access.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessError {
    /// The address could not be decoded.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// The operation code is neither a load nor a store.
    #[error("bad cache operation code: {0}")]
    InvalidOperation(i64),
}

/// Failure of a whole simulation run, as seen by the trace driver.
#[derive(Debug, Error)]
pub enum SimError {
    /// Reading a trace or config file failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// A JSON configuration could not be parsed.
    #[error("invalid JSON configuration: {0}")]
    Json(#[from] serde_json::Error),

    /// The cache options were rejected.
    #[error("invalid cache configuration: {0}")]
    Config(#[from] ConfigError),

    /// The trace text did not follow the trace format.
    #[error("trace line {line}: {reason}")]
    Trace {
        /// 1-based line number in the trace.
        line: usize,
        /// What was wrong with it.
        reason: String,
    },
}
