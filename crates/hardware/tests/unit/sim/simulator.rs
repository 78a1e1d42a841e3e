//! Simulator Routing Tests.
//!
//! Verifies that fetches reach the instruction cache and loads/stores the
//! data cache, that a unified organization shares resident lines between the
//! two engines, and that failed records are counted and collected.

use cachesim_core::common::{AccessError, Address, ConfigError, DecodeError, TraceOp};
use cachesim_core::config::{CacheOptions, CacheOrganization, SimConfig};
use cachesim_core::sim::{self, AccessFailure, Simulator, Trace};
use cachesim_core::stats::CacheStats;
use pretty_assertions::assert_eq;

use crate::common::harness::init_logging;

fn config(organization: CacheOrganization) -> SimConfig {
    SimConfig {
        organization,
        data: CacheOptions::default(),
        instruction: None,
    }
}

#[test]
fn split_caches_are_independent() {
    init_logging();
    let mut sim = Simulator::new(config(CacheOrganization::Split)).unwrap();
    assert!(!sim.step(TraceOp::InstructionFetch, "0").unwrap().hit);
    assert!(!sim.step(TraceOp::DataLoad, "0").unwrap().hit);
    assert!(sim.step(TraceOp::DataStore, "4").unwrap().hit);

    assert_eq!(sim.instruction().stats().accesses, 1);
    assert_eq!(sim.instruction().stats().misses, 1);
    assert_eq!(sim.data().stats().accesses, 2);
    assert_eq!(sim.data().stats().hits, 1);
}

#[test]
fn unified_caches_share_resident_lines() {
    init_logging();
    let mut sim = Simulator::new(config(CacheOrganization::Unified)).unwrap();
    assert!(!sim.step(TraceOp::InstructionFetch, "0").unwrap().hit);
    assert!(sim.step(TraceOp::DataLoad, "0").unwrap().hit);
    assert!(!sim.step(TraceOp::DataStore, "400").unwrap().hit);

    assert!(sim.instruction().contains(Address(0x400)));
    assert!(!sim.instruction().contains(Address(0x0)));
    assert_eq!(sim.instruction().sets(), sim.data().sets());

    // Statistics stay per stream.
    assert_eq!(sim.instruction().stats().misses, 1);
    assert_eq!(sim.data().stats().hits, 1);
    assert_eq!(sim.data().stats().misses, 1);
}

#[test]
fn unified_caches_stay_in_step_under_mixed_traffic() {
    init_logging();
    let mut cfg = config(CacheOrganization::Unified);
    cfg.data = CacheOptions {
        size: 4096,
        associativity: 2,
        ..CacheOptions::default()
    };
    let mut sim = Simulator::new(cfg).unwrap();

    let ops = [
        TraceOp::InstructionFetch,
        TraceOp::DataLoad,
        TraceOp::DataStore,
        TraceOp::InstructionFetch,
        TraceOp::DataStore,
    ];
    for (step, op) in (0..400_u64).zip(ops.iter().cycle()) {
        // Each address is touched twice in a row so the second access hits.
        let address = format!("{:x}", (step / 2 * 0x2a4) % 0x6000);
        let _ = sim.step(*op, &address).unwrap();
        assert_eq!(sim.instruction().sets(), sim.data().sets(), "step {step}");
    }
    assert!(sim.data().stats().replaces > 0);
    assert!(sim.instruction().stats().hits > 0);
}

#[test]
fn split_instruction_size_comes_from_config() {
    let mut cfg = config(CacheOrganization::Split);
    cfg.instruction = Some(CacheOptions {
        size: 4096,
        ..CacheOptions::default()
    });
    let sim = Simulator::new(cfg).unwrap();
    assert_eq!(sim.instruction().geometry().num_sets, 128);
    assert_eq!(sim.data().geometry().num_sets, 32);
}

#[test]
fn invalid_instruction_geometry_is_rejected() {
    let mut cfg = config(CacheOrganization::Split);
    cfg.instruction = Some(CacheOptions {
        size: 0,
        ..CacheOptions::default()
    });
    assert_eq!(
        Simulator::new(cfg).unwrap_err(),
        ConfigError::Zero { field: "size" }
    );
}

#[test]
fn failed_steps_still_count_as_accesses() {
    let mut sim = Simulator::new(config(CacheOrganization::Split)).unwrap();
    assert_eq!(
        sim.step(TraceOp::Unknown(3), "10"),
        Err(AccessError::InvalidOperation(3))
    );
    assert_eq!(
        sim.step(TraceOp::InstructionFetch, ""),
        Err(AccessError::Decode(DecodeError::Empty))
    );

    assert_eq!(
        *sim.data().stats(),
        CacheStats {
            accesses: 1,
            ..CacheStats::default()
        }
    );
    assert_eq!(sim.instruction().stats().accesses, 1);
    assert_eq!(sim.instruction().stats().lookups(), 0);
}

#[test]
fn run_collects_failures_and_continues() {
    init_logging();
    let trace = Trace::parse("32\n0\n1\nwb\nwa\n1024\n1 0\n4 0\n1 q\n1 0\n").unwrap();
    let sim = sim::run(&trace).unwrap();

    assert_eq!(sim.data().stats().accesses, 4);
    assert_eq!(sim.data().stats().hits, 1);
    assert_eq!(sim.data().stats().misses, 1);
    assert_eq!(sim.failures().len(), 2);
    assert_eq!(
        sim.failures()[0],
        AccessFailure {
            line: 8,
            error: AccessError::InvalidOperation(4),
        }
    );
    assert_eq!(sim.failures()[1].line, 9);
}

#[test]
fn negative_operation_codes_fail_only_their_record() {
    let sim = sim::run_trace("32\n0\n1\nwb\nwa\n1024\n-1 0\n1 0\n").unwrap();
    assert_eq!(
        sim.failures(),
        &[AccessFailure {
            line: 7,
            error: AccessError::InvalidOperation(-1),
        }]
    );
    assert_eq!(sim.data().stats().accesses, 2);
    assert_eq!(sim.data().stats().misses, 1);
}

#[test]
fn run_trace_rejects_invalid_geometry() {
    let err = sim::run_trace("24\n0\n1\nwb\nwa\n1024\n").unwrap_err();
    assert!(matches!(
        err,
        cachesim_core::common::SimError::Config(ConfigError::NotPowerOfTwo { .. })
    ));
}
