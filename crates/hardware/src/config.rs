//! Configuration system for the cache simulator.
//!
//! This module defines all configuration structures and enums used to parameterize
//! the simulator. It provides:
//! 1. **Defaults:** Baseline cache parameters used when a field is omitted.
//! 2. **Structures:** Per-cache options and the two-cache simulation config.
//! 3. **Enums:** Write (hit) policy, allocation (miss) policy and cache organization.
//!
//! Configuration is supplied via JSON (`SimConfig::from_json_str`) or built from a
//! trace header by the driver in [`crate::sim`].

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;

use crate::common::error::{ConfigError, SimError};

/// Default configuration constants for the simulator.
///
/// These values define the baseline cache when not explicitly overridden.
mod defaults {
    /// Default cache size in bytes (1 KiB).
    pub const CACHE_SIZE: u64 = 1024;

    /// Default block (line) size in bytes.
    pub const BLOCK_SIZE: u64 = 32;

    /// Default associativity (1 way = direct-mapped).
    pub const ASSOCIATIVITY: usize = 1;
}

/// Policy for propagating stores to backing memory (the "hit policy").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum WritePolicy {
    /// Stores mark the line dirty; memory is written when a dirty line is evicted.
    #[default]
    #[serde(rename = "write-back", alias = "wb", alias = "WriteBack")]
    WriteBack,
    /// Every store is written to memory immediately.
    #[serde(rename = "write-through", alias = "wt", alias = "WriteThrough")]
    WriteThrough,
}

/// Policy for stores that miss (the "miss policy").
///
/// Recorded and reported; the replacement algorithm allocates on every miss
/// regardless.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum AllocatePolicy {
    /// A store miss brings the block into the cache.
    #[default]
    #[serde(rename = "write-allocate", alias = "wa", alias = "WriteAllocate")]
    WriteAllocate,
    /// A store miss writes around the cache.
    #[serde(
        rename = "no-write-allocate",
        alias = "nw",
        alias = "nwa",
        alias = "NoWriteAllocate"
    )]
    NoWriteAllocate,
}

/// How instruction fetches and data accesses share cache capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheOrganization {
    /// One cache serves both instruction fetches and data accesses.
    #[default]
    #[serde(alias = "Unified")]
    Unified,
    /// Separate instruction and data caches.
    #[serde(alias = "Split")]
    Split,
}

impl FromStr for WritePolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "wb" | "write-back" | "writeback" => Ok(Self::WriteBack),
            "wt" | "write-through" | "writethrough" => Ok(Self::WriteThrough),
            _ => Err(ConfigError::UnknownPolicy(s.to_owned())),
        }
    }
}

impl FromStr for AllocatePolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "wa" | "write-allocate" | "writeallocate" => Ok(Self::WriteAllocate),
            "nw" | "nwa" | "no-write-allocate" | "nowriteallocate" => Ok(Self::NoWriteAllocate),
            _ => Err(ConfigError::UnknownPolicy(s.to_owned())),
        }
    }
}

impl FromStr for CacheOrganization {
    type Err = ConfigError;

    /// Accepts the trace header codes (`0` unified, `1` split) as well as names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "0" | "unified" => Ok(Self::Unified),
            "1" | "split" => Ok(Self::Split),
            _ => Err(ConfigError::UnknownOrganization(s.to_owned())),
        }
    }
}

impl fmt::Display for WritePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WriteBack => f.write_str("WRITE BACK"),
            Self::WriteThrough => f.write_str("WRITE THROUGH"),
        }
    }
}

impl fmt::Display for AllocatePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WriteAllocate => f.write_str("WRITE ALLOCATE"),
            Self::NoWriteAllocate => f.write_str("NO WRITE ALLOCATE"),
        }
    }
}

/// Options for a single cache instance.
///
/// Immutable for the lifetime of the engine built from it. Geometry is
/// validated by [`CacheGeometry::new`](crate::cache::CacheGeometry::new).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CacheOptions {
    /// Total capacity in bytes.
    #[serde(default = "CacheOptions::default_size")]
    pub size: u64,

    /// Lines per set.
    #[serde(default = "CacheOptions::default_associativity")]
    pub associativity: usize,

    /// Bytes per line.
    #[serde(default = "CacheOptions::default_block_size")]
    pub block_size: u64,

    /// Write (hit) policy.
    #[serde(default)]
    pub hit_policy: WritePolicy,

    /// Allocation (miss) policy.
    #[serde(default)]
    pub miss_policy: AllocatePolicy,
}

impl CacheOptions {
    /// Returns the default cache size in bytes.
    const fn default_size() -> u64 {
        defaults::CACHE_SIZE
    }

    /// Returns the default associativity.
    const fn default_associativity() -> usize {
        defaults::ASSOCIATIVITY
    }

    /// Returns the default block size in bytes.
    const fn default_block_size() -> u64 {
        defaults::BLOCK_SIZE
    }

    /// Returns `true` when stores dirty lines instead of writing through.
    #[inline]
    pub fn is_write_back(&self) -> bool {
        self.hit_policy == WritePolicy::WriteBack
    }
}

impl Default for CacheOptions {
    fn default() -> Self {
        Self {
            size: defaults::CACHE_SIZE,
            associativity: defaults::ASSOCIATIVITY,
            block_size: defaults::BLOCK_SIZE,
            hit_policy: WritePolicy::default(),
            miss_policy: AllocatePolicy::default(),
        }
    }
}

/// Root configuration for a trace-driven run.
///
/// # Examples
///
/// ```
/// use cachesim_core::config::{CacheOrganization, SimConfig, WritePolicy};
///
/// let json = r#"{
///     "organization": "split",
///     "data": { "size": 2048, "associativity": 2, "block_size": 32, "hit_policy": "wt" },
///     "instruction": { "size": 1024, "associativity": 2, "block_size": 32 }
/// }"#;
///
/// let config = SimConfig::from_json_str(json).unwrap();
/// assert_eq!(config.organization, CacheOrganization::Split);
/// assert_eq!(config.data.hit_policy, WritePolicy::WriteThrough);
/// assert_eq!(config.instruction_options().size, 1024);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SimConfig {
    /// Unified or split instruction/data caches.
    #[serde(default)]
    pub organization: CacheOrganization,

    /// Options for the data cache (and for the shared cache when unified).
    #[serde(default)]
    pub data: CacheOptions,

    /// Options for the instruction cache. Falls back to `data` when omitted.
    #[serde(default)]
    pub instruction: Option<CacheOptions>,
}

impl SimConfig {
    /// Parses a configuration from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Json`] if the text is not a valid configuration.
    pub fn from_json_str(json: &str) -> Result<Self, SimError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Io`] if the file cannot be read and
    /// [`SimError::Json`] if it does not parse.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, SimError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Options used for the instruction-side cache.
    ///
    /// A unified organization always mirrors the data cache, so the data
    /// options are used there even when `instruction` is set.
    pub fn instruction_options(&self) -> CacheOptions {
        match (self.organization, &self.instruction) {
            (CacheOrganization::Split, Some(options)) => options.clone(),
            _ => self.data.clone(),
        }
    }
}
