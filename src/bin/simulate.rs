//! Level balance simulator CLI.
//!
//! Plays seeded sessions of each level with a greedy auto-player and prints a summary.
//!
//! Usage:
//!   cargo run --bin simulate -- [OPTIONS]
//!
//! Examples:
//!   cargo run --bin simulate                      # 100 runs of every level
//!   cargo run --bin simulate -- -n 20 -l 3        # 20 runs of level 3
//!   cargo run --bin simulate -- --seed 42 --json  # Reproducible, save JSON report

use clap::Parser;
use std::fs;
use std::path::PathBuf;
use tile_cascade::simulator::{run_simulation, SimConfig, SimError};
use tracing_subscriber::EnvFilter;

/// Monte Carlo balance simulator for the standard levels.
#[derive(Debug, Parser)]
#[command(name = "simulate", version, about)]
struct Args {
    /// Sessions per level.
    #[arg(short = 'n', long, value_name = "N")]
    runs: Option<u32>,

    /// Base RNG seed; run i uses seed + i.
    #[arg(short, long)]
    seed: Option<u64>,

    /// Level to simulate (1-based, repeatable). Defaults to all levels.
    #[arg(short, long = "level", value_name = "LEVEL", value_parser = clap::value_parser!(u32).range(1..))]
    levels: Vec<u32>,

    /// JSON file with a SimConfig; flags override its values.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Write the report to sim_report_<timestamp>.json.
    #[arg(long)]
    json: bool,

    /// Print one line per run and raise log verbosity (-vv for debug logs).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<(), SimError> {
    let args = Args::parse();

    let default_filter = match args.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut config = match &args.config {
        Some(path) => SimConfig::from_file(path)?,
        None => SimConfig::default(),
    };
    if let Some(runs) = args.runs {
        config.num_runs = runs;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    if !args.levels.is_empty() {
        config.levels = args.levels.iter().map(|l| (*l - 1) as usize).collect();
    }
    config.verbosity = config.verbosity.max(args.verbose + 1);

    println!("╔═══════════════════════════════════════════════════════════════╗");
    println!("║              TILE CASCADE BALANCE SIMULATOR                   ║");
    println!("╚═══════════════════════════════════════════════════════════════╝");
    println!();
    println!("Configuration:");
    println!("  Runs:           {}", config.num_runs);
    println!(
        "  Levels:         {}",
        config
            .levels
            .iter()
            .map(|l| (l + 1).to_string())
            .collect::<Vec<_>>()
            .join(", ")
    );
    println!("  Move Guard:     {}", config.max_moves_guard);
    if let Some(seed) = config.seed {
        println!("  Seed:           {}", seed);
    }
    println!();
    println!("Running simulation...");
    println!();

    let report = run_simulation(&config)?;
    println!("{}", report.to_text());

    if args.json {
        let path = report.file_name();
        fs::write(&path, report.to_json()?).map_err(|source| SimError::Io {
            path: path.clone(),
            source,
        })?;
        println!("Report written to {}", path);
    }

    Ok(())
}
