//! Cache hierarchy simulator CLI.
//!
//! This binary drives a two-level cache hierarchy with a stream of accesses. It performs:
//! 1. **Demo run:** Replay the built-in five-access reference pattern.
//! 2. **Trace run:** Replay a text trace of `R`/`W` accesses (see [`trace`]).
//!
//! The hierarchy uses the built-in defaults (L1 32 KiB, L2 256 KiB, 64-byte lines,
//! 8-way) unless a JSON configuration is given with `--config`. Cache events are
//! logged through `tracing`; raise verbosity with `-v`/`-vv` or `RUST_LOG`.

mod trace;

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

use cachesim_core::common::ConfigError;
use cachesim_core::{CacheHierarchy, HierarchyConfig};

use crate::trace::Access;

#[derive(Parser, Debug)]
#[command(
    name = "cachesim",
    author,
    version,
    about = "Set-associative L1/L2 cache hierarchy simulator",
    long_about = "Replay memory accesses against an L1/L2 cache hierarchy with pseudo-LRU replacement, victim buffers, next-line prefetch and write-back.\n\nExamples:\n  cachesim demo\n  cachesim run traces/stream.trace\n  cachesim -vv --config hierarchy.json run traces/stream.trace"
)]
struct Cli {
    /// JSON hierarchy configuration (defaults are used for missing fields).
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v: write-backs and evictions, -vv: every event).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Skip the statistics report.
    #[arg(long, global = true)]
    no_stats: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Replay the built-in reference access pattern.
    Demo,

    /// Replay an access trace file.
    Run {
        /// Trace file: one `R <addr>` or `W <addr>` per line.
        trace: PathBuf,
    },
}

/// Errors reported by the CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// A file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// Path that failed.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The configuration file is not valid JSON for a hierarchy config.
    #[error("invalid configuration: {0}")]
    Json(#[from] serde_json::Error),

    /// The configured geometry is rejected by the simulator.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A trace line could not be parsed.
    #[error("trace line {line}: {reason}")]
    Trace {
        /// 1-based line number.
        line: usize,
        /// What was wrong with it.
        reason: String,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Installs the `tracing` subscriber; `RUST_LOG` takes precedence over `-v`.
fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "cachesim_core=debug",
        _ => "cachesim_core=trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<(), CliError> {
    let config = match &cli.config {
        Some(path) => HierarchyConfig::from_json(&read(path)?)?,
        None => HierarchyConfig::default(),
    };
    let mut hierarchy = CacheHierarchy::new(&config)?;
    tracing::info!(l1 = ?config.l1, l2 = ?config.l2, "hierarchy configured");

    let accesses = match &cli.command {
        Commands::Demo => trace::DEMO_PATTERN.to_vec(),
        Commands::Run { trace: path } => trace::parse(&read(path)?)?,
    };

    replay(&mut hierarchy, &accesses);

    if !cli.no_stats {
        print_stats(&hierarchy);
    }
    Ok(())
}

fn read(path: &Path) -> Result<String, CliError> {
    fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Replays `accesses` in order, printing one result line per access.
fn replay(hierarchy: &mut CacheHierarchy, accesses: &[Access]) {
    for access in accesses {
        let hit = hierarchy.access_memory(access.addr, access.is_write);
        println!(
            "{:<5} {:#010x}  {}",
            if access.is_write { "Write" } else { "Read" },
            access.addr,
            if hit { "Hit" } else { "Miss" }
        );
    }
}

fn print_stats(hierarchy: &CacheHierarchy) {
    println!("\n==========================================================");
    println!("CACHE HIERARCHY STATISTICS");
    println!("==========================================================");
    for level in [hierarchy.l1(), hierarchy.l2()] {
        println!("{}", level.name());
        println!("{}", level.stats());
        println!("----------------------------------------------------------");
    }
}
