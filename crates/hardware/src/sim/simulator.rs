//! Simulator: owns the instruction and data caches side-by-side.
//!
//! Instruction fetches are routed to the instruction cache and loads/stores to
//! the data cache. In a unified organization the two engines model one shared
//! cache: after every access the engine that served it copies the touched
//! set into the other, so each engine keeps its own statistics while both
//! always hold the same blocks.

use crate::cache::{AccessOutcome, CacheEngine};
use crate::common::addr::Address;
use crate::common::data::TraceOp;
use crate::common::error::{AccessError, ConfigError};
use crate::config::{CacheOrganization, SimConfig};

use super::report::SimReport;
use super::trace::TraceRecord;

/// A trace record that could not be executed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccessFailure {
    /// Trace line of the failed record.
    pub line: usize,
    /// Why it failed.
    pub error: AccessError,
}

/// Top-level simulator: instruction cache + data cache.
#[derive(Clone, Debug)]
pub struct Simulator {
    config: SimConfig,
    instruction: CacheEngine,
    data: CacheEngine,
    failures: Vec<AccessFailure>,
}

impl Simulator {
    /// Creates a simulator with two cold caches.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if either cache's options are invalid.
    pub fn new(config: SimConfig) -> Result<Self, ConfigError> {
        let data = CacheEngine::new(config.data.clone())?;
        let instruction = CacheEngine::new(config.instruction_options())?;
        tracing::debug!(organization = ?config.organization, "simulator ready");
        Ok(Self {
            config,
            instruction,
            data,
            failures: Vec::new(),
        })
    }

    /// Executes one access and counts it against the cache that serves it.
    ///
    /// The access counter advances even when the access fails.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError`] for a malformed address or unknown operation.
    pub fn step(&mut self, op: TraceOp, address: &str) -> Result<AccessOutcome, AccessError> {
        let fetch = op.is_fetch();
        let engine = if fetch {
            &mut self.instruction
        } else {
            &mut self.data
        };

        let result = Address::parse_hex(address)
            .map_err(AccessError::from)
            .and_then(|addr| Ok(engine.access(op.operation()?, addr)));
        engine.record_access();

        if let Ok(outcome) = &result
            && self.config.organization == CacheOrganization::Unified
        {
            let set_index = outcome.decoded.set_index;
            if fetch {
                self.data.mirror_set_from(&self.instruction, set_index);
            } else {
                self.instruction.mirror_set_from(&self.data, set_index);
            }
        }
        result
    }

    /// Executes every record, collecting failures instead of stopping.
    ///
    /// Returns the number of records that failed.
    pub fn run<'a, I>(&mut self, records: I) -> usize
    where
        I: IntoIterator<Item = &'a TraceRecord>,
    {
        let before = self.failures.len();
        for record in records {
            if let Err(error) = self.step(record.op, &record.address) {
                tracing::warn!(line = record.line, %error, "access skipped");
                self.failures.push(AccessFailure {
                    line: record.line,
                    error,
                });
            }
        }
        self.failures.len() - before
    }

    /// Report over the current state of both caches.
    pub const fn report(&self) -> SimReport<'_> {
        SimReport::new(self)
    }

    /// Configuration the simulator was built from.
    #[inline]
    pub const fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Instruction-side cache.
    #[inline]
    pub const fn instruction(&self) -> &CacheEngine {
        &self.instruction
    }

    /// Data-side cache.
    #[inline]
    pub const fn data(&self) -> &CacheEngine {
        &self.data
    }

    /// Accesses that failed so far, in trace order.
    #[inline]
    pub fn failures(&self) -> &[AccessFailure] {
        &self.failures
    }
}
