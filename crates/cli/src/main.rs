//! Trace-driven cache simulator CLI.
//!
//! This binary reads an access trace and prints the cache report. It performs:
//! 1. **Trace run:** Parse a trace with its configuration header and simulate it.
//! 2. **Config override:** Take the cache configuration from a JSON file and treat
//!    the trace as a bare record stream.

use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use cachesim_core::SimConfig;
use cachesim_core::common::SimError;
use cachesim_core::sim::{self, Simulator, Trace};

#[derive(Parser, Debug)]
#[command(
    name = "cachesim",
    author,
    version,
    about = "Trace-driven set-associative cache simulator",
    long_about = "Simulate a set-associative cache with LRU replacement over a load/store trace.\n\nExamples:\n  cachesim run traces/gcc.trace\n  cachesim run --config l1.json traces/records.trace\n  cat traces/gcc.trace | cachesim run"
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace). RUST_LOG takes precedence.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a trace and print the cache report.
    Run {
        /// Trace file; reads stdin when omitted or `-`.
        trace: Option<PathBuf>,

        /// JSON cache configuration. The trace must then contain records only.
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Print every access that could not be executed after the report.
        #[arg(long)]
        errors: bool,
    },
}

/// Installs the stderr log subscriber.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn read_input(path: Option<&PathBuf>) -> Result<String, SimError> {
    match path {
        Some(path) if path.as_os_str() != "-" => Ok(fs::read_to_string(path)?),
        _ => {
            let mut text = String::new();
            let _ = io::stdin().lock().read_to_string(&mut text)?;
            Ok(text)
        }
    }
}

/// Parses the trace, runs it and writes the report to stdout.
fn cmd_run(
    trace: Option<&PathBuf>,
    config: Option<&PathBuf>,
    show_errors: bool,
) -> Result<(), SimError> {
    let text = read_input(trace)?;
    let trace = match config {
        Some(path) => Trace::parse_records(&text, SimConfig::from_json_file(path)?)?,
        None => Trace::parse(&text)?,
    };
    let sim: Simulator = sim::run(&trace)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    sim.report().write_to(&mut out)?;
    if show_errors {
        for failure in sim.failures() {
            writeln!(out, "line {}: {}", failure.line, failure.error)?;
        }
    }
    out.flush()?;
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match &cli.command {
        Commands::Run {
            trace,
            config,
            errors,
        } => cmd_run(trace.as_ref(), config.as_ref(), *errors),
    };

    if let Err(e) = result {
        eprintln!("[!] FATAL: {e}");
        process::exit(1);
    }
}
