//! Cache statistics collection and reporting.
//!
//! This module tracks the counters a cache engine accumulates over a run. It provides:
//! 1. **Lookups:** Hit and miss counts, plus the caller-maintained access count.
//! 2. **Memory traffic:** Block reads and block writes the cache would issue to memory.
//! 3. **Replacements:** Capacity evictions caused by read misses.
//! 4. **Derived metrics:** Miss rate and hit rate, rounded to four decimal places.

use std::fmt;
use std::io::{self, Write};

/// Statistics for a single cache engine.
///
/// All counters increase monotonically. The engine maintains every counter
/// except `accesses`, which is left to the caller so a driver can count
/// accesses per stream independently of lookup bookkeeping.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Accesses presented by the driver.
    pub accesses: u64,
    /// Lookups that found the tag resident.
    pub hits: u64,
    /// Lookups that did not.
    pub misses: u64,
    /// Blocks fetched from backing memory.
    pub reads: u64,
    /// Blocks written to backing memory.
    pub writes: u64,
    /// Full-set evictions caused by load misses.
    pub replaces: u64,
}

/// Rounds to four decimal places.
fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

impl CacheStats {
    /// Total lookups (`hits + misses`).
    #[inline]
    pub const fn lookups(&self) -> u64 {
        self.hits + self.misses
    }

    /// Fraction of lookups that missed, rounded to four decimal places.
    ///
    /// Returns `0.0` when no lookup has been performed.
    pub fn miss_rate(&self) -> f64 {
        let total = self.lookups();
        if total == 0 {
            return 0.0;
        }
        round4(self.misses as f64 / total as f64)
    }

    /// `1 - miss_rate`, rounded to four decimal places.
    ///
    /// Returns `0.0` when no lookup has been performed; an idle cache has no
    /// hit rate to speak of.
    pub fn hit_rate(&self) -> f64 {
        if self.lookups() == 0 {
            return 0.0;
        }
        round4(1.0 - self.miss_rate())
    }

    /// Writes the per-cache report block.
    ///
    /// # Errors
    ///
    /// Propagates any error from the underlying writer.
    pub fn write_report<W: Write>(&self, out: &mut W) -> io::Result<()> {
        write!(out, "{self}")
    }
}

impl fmt::Display for CacheStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "accesses: {}", self.accesses)?;
        writeln!(f, "hits: {}", self.hits)?;
        writeln!(f, "misses: {}", self.misses)?;
        writeln!(
            f,
            "miss rate: {:.4} (hit rate: {:.4})",
            self.miss_rate(),
            self.hit_rate()
        )?;
        writeln!(f, "replaces: {}", self.replaces)?;
        writeln!(f, "reads: {}", self.reads)?;
        writeln!(f, "writes: {}", self.writes)
    }
}
