//! Trace-driven simulation.
//!
//! Parses access traces, drives the instruction and data caches with them,
//! and renders the end-of-run report.

/// End-of-run report rendering.
pub mod report;

/// Instruction/data cache driver.
pub mod simulator;

/// Trace header and record parsing.
pub mod trace;

pub use report::SimReport;
pub use simulator::{AccessFailure, Simulator};
pub use trace::{Trace, TraceRecord};

use crate::common::error::SimError;

/// Parses `text` as a full trace and runs it to completion.
///
/// Per-access failures are collected on the returned simulator rather than
/// aborting the run.
///
/// # Errors
///
/// Returns [`SimError`] if the trace is malformed or its cache options are invalid.
pub fn run_trace(text: &str) -> Result<Simulator, SimError> {
    let trace = Trace::parse(text)?;
    run(&trace)
}

/// Runs an already-parsed trace to completion.
///
/// # Errors
///
/// Returns [`SimError::Config`] if the trace's cache options are invalid.
pub fn run(trace: &Trace) -> Result<Simulator, SimError> {
    let mut sim = Simulator::new(trace.config.clone())?;
    let failed = sim.run(&trace.records);
    tracing::info!(
        records = trace.records.len(),
        failed,
        "trace complete"
    );
    Ok(sim)
}
