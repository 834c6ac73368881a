#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs outbreak simulations and generates maps.
//!
//! `run` prints exactly two lines to stdout on success, `Time = <seconds>` and
//! `Cores = <workers>`, which benchmarking harnesses scrape. Logs go to stderr.

use std::{io, num::NonZeroUsize, path::PathBuf, thread};

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use outbreak_map_format::{read_map, write_map, write_snapshot};
use outbreak_system_driver::Driver;
use outbreak_system_map_generation::{generate_grid, MapDensity};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Grid-based infection spread simulator.
#[derive(Debug, Parser)]
#[command(name = "outbreak", version)]
struct Cli {
    /// Raise log verbosity (-v info, -vv debug). `RUST_LOG` takes precedence.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: CliCommand,
}

#[derive(Debug, Subcommand)]
enum CliCommand {
    /// Simulate a map for a number of days and write the final grid.
    Run {
        /// Map file with an `N M` header followed by N rows of H, Z and . tokens.
        map: PathBuf,
        /// Number of days to simulate.
        days: u32,
        /// Worker threads for row tasks. Defaults to the available parallelism.
        workers: Option<NonZeroUsize>,
        /// Where to write the final grid.
        #[arg(long, default_value = "final_map.txt")]
        output: PathBuf,
    },
    /// Generate a random square map.
    Generate {
        /// Side length of the map.
        size: usize,
        /// Seed for reproducible maps. Drawn from entropy when omitted.
        #[arg(long)]
        seed: Option<u64>,
        /// Share of cells that start as humans.
        #[arg(long, default_value_t = 60)]
        human_percent: u8,
        /// Share of cells that start as zombies.
        #[arg(long, default_value_t = 5)]
        zombie_percent: u8,
        /// Where to write the map.
        #[arg(long, default_value = "map.txt")]
        output: PathBuf,
    },
}

/// Entry point for the outbreak command-line interface.
fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        CliCommand::Run {
            map,
            days,
            workers,
            output,
        } => run(map, days, workers, output),
        CliCommand::Generate {
            size,
            seed,
            human_percent,
            zombie_percent,
            output,
        } => generate(size, seed, human_percent, zombie_percent, output),
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(map: PathBuf, days: u32, workers: Option<NonZeroUsize>, output: PathBuf) -> Result<()> {
    let grid =
        read_map(&map).with_context(|| format!("failed to load map '{}'", map.display()))?;
    let workers = workers.map_or_else(default_workers, NonZeroUsize::get);

    let driver = Driver::new(workers).context("failed to start the worker pool")?;
    let report = driver.run(grid, days).context("simulation failed")?;

    write_snapshot(&report.grid, &output)
        .with_context(|| format!("failed to write final grid '{}'", output.display()))?;

    let census = report.grid.census();
    info!(
        humans = census.humans,
        zombies = census.zombies,
        empty = census.empty,
        output = %output.display(),
        "final grid written"
    );

    println!("Time = {:.6}", report.elapsed.as_secs_f64());
    println!("Cores = {}", report.workers);
    Ok(())
}

fn generate(
    size: usize,
    seed: Option<u64>,
    human_percent: u8,
    zombie_percent: u8,
    output: PathBuf,
) -> Result<()> {
    let density = MapDensity::new(human_percent, zombie_percent)?;
    let seed = seed.unwrap_or_else(rand::random);
    let grid = generate_grid(size, density, seed).context("failed to generate map")?;

    write_map(&grid, &output)
        .with_context(|| format!("failed to write map '{}'", output.display()))?;
    info!(size, seed, output = %output.display(), "map generated");
    Ok(())
}

fn default_workers() -> usize {
    thread::available_parallelism().map_or(1, NonZeroUsize::get)
}
