//! Trace-driven set-associative cache simulator library.
//!
//! This crate reproduces the hit/miss behavior and memory traffic of a hardware cache:
//! 1. **Cache:** Address decomposition, per-set LRU tag storage and the access pipeline.
//! 2. **Policies:** Write-back / write-through accounting of block reads and writes.
//! 3. **Statistics:** Hits, misses, replacements, memory traffic and derived rates.
//! 4. **Simulation:** Trace parsing, split or unified instruction/data caches, reporting.
//!
//! ```
//! use cachesim_core::{CacheEngine, CacheOptions, Operation};
//!
//! let mut cache = CacheEngine::new(CacheOptions::default()).unwrap();
//! cache.execute(Operation::Load, "1f40").unwrap();
//! cache.execute(Operation::Load, "1f44").unwrap();
//! assert_eq!(cache.stats().hits, 1);
//! assert_eq!(cache.stats().misses, 1);
//! ```

/// Set-associative cache engine (geometry, sets, access pipeline).
pub mod cache;
/// Common types (addresses, access kinds, errors).
pub mod common;
/// Cache options, policies and simulation configuration.
pub mod config;
/// Trace parsing, the instruction/data driver and reporting.
pub mod sim;
/// Cache statistics and derived rates.
pub mod stats;

/// Single cache engine; construct with `CacheEngine::new`.
pub use crate::cache::CacheEngine;
/// Access kind presented to an engine.
pub use crate::common::Operation;
/// Per-cache options; use `CacheOptions::default()` or deserialize from JSON.
pub use crate::config::{CacheOptions, SimConfig};
/// Trace driver owning an instruction cache and a data cache.
pub use crate::sim::Simulator;
/// Counters accumulated by an engine.
pub use crate::stats::CacheStats;
