//! End-of-run report.
//!
//! Renders the cache settings followed by per-stream statistics:
//!
//! ```text
//! ***CACHE SETTINGS***
//! Split I- D-cache
//! I-cache size: 1024
//! D-cache size: 1024
//! Associativity: 2
//! Block Size: 32
//! Write Policy: WRITE BACK
//! Allocation Policy: WRITE ALLOCATE
//!
//! ***CACHE STATISTICS***
//! INSTRUCTIONS
//! accesses: 3
//! hits: 1
//! ...
//! ```

use std::fmt;
use std::io::{self, Write};

use crate::config::CacheOrganization;

use super::simulator::Simulator;

/// Borrowed view of a finished (or in-progress) run.
#[derive(Clone, Copy, Debug)]
pub struct SimReport<'a> {
    sim: &'a Simulator,
}

impl<'a> SimReport<'a> {
    /// Wraps `sim`.
    pub const fn new(sim: &'a Simulator) -> Self {
        Self { sim }
    }

    /// Writes the report to `out`.
    ///
    /// # Errors
    ///
    /// Propagates any error from the underlying writer.
    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        write!(out, "{self}")
    }
}

impl fmt::Display for SimReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let config = self.sim.config();
        let data = self.sim.data().options();

        writeln!(f, "***CACHE SETTINGS***")?;
        match config.organization {
            CacheOrganization::Split => {
                writeln!(f, "Split I- D-cache")?;
                writeln!(f, "I-cache size: {}", self.sim.instruction().options().size)?;
                writeln!(f, "D-cache size: {}", data.size)?;
            }
            CacheOrganization::Unified => {
                writeln!(f, "Unified I- D-cache")?;
                writeln!(f, "Size: {}", data.size)?;
            }
        }
        writeln!(f, "Associativity: {}", data.associativity)?;
        writeln!(f, "Block Size: {}", data.block_size)?;
        writeln!(f, "Write Policy: {}", data.hit_policy)?;
        writeln!(f, "Allocation Policy: {}", data.miss_policy)?;

        writeln!(f)?;
        writeln!(f, "***CACHE STATISTICS***")?;
        writeln!(f, "INSTRUCTIONS")?;
        write!(f, "{}", self.sim.instruction().stats())?;
        writeln!(f, "DATA")?;
        write!(f, "{}", self.sim.data().stats())
    }
}
