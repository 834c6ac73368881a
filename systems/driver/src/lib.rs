#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Simulation driver that advances the world one day at a time.
//!
//! Every day runs the step synchronizer to completion, builds the next
//! generation from the assembled marks, and commits it to the world before the
//! following day starts. Days never overlap.

use std::time::{Duration, Instant};

use outbreak_core::{Command, Event, GenerationError, Grid};
use outbreak_system_generation::build_next_generation;
use outbreak_system_step::{StepError, StepSynchronizer};
use outbreak_world::{self as world, query, Phase, World};
use thiserror::Error;
use tracing::{debug, info};

/// Failures that end a simulation run.
#[derive(Debug, Error)]
pub enum DriverError {
    /// A day could not be computed.
    #[error(transparent)]
    Step(#[from] StepError),
    /// The world refused a generation produced by the driver.
    #[error("world rejected generation: {0}")]
    GenerationRejected(GenerationError),
    /// The world finished without holding a grid.
    #[error("simulation finished without a final grid")]
    MissingGrid,
}

/// Outcome of a completed run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunReport {
    /// Grid after the last simulated day.
    pub grid: Grid,
    /// Number of days that were simulated.
    pub days: u32,
    /// Worker threads used for row tasks.
    pub workers: usize,
    /// Wall-clock time spent in the day loop.
    pub elapsed: Duration,
}

/// Runs simulations on a fixed worker pool.
#[derive(Debug)]
pub struct Driver {
    synchronizer: StepSynchronizer,
}

impl Driver {
    /// Creates a driver backed by a pool of `workers` threads.
    pub fn new(workers: usize) -> Result<Self, DriverError> {
        Ok(Self {
            synchronizer: StepSynchronizer::new(workers)?,
        })
    }

    /// Number of worker threads in the pool.
    #[must_use]
    pub const fn workers(&self) -> usize {
        self.synchronizer.workers()
    }

    /// Simulates `total_days` days starting from `grid`.
    pub fn run(&self, grid: Grid, total_days: u32) -> Result<RunReport, DriverError> {
        let mut world = World::new();
        let mut events = Vec::new();

        info!(
            side = grid.side(),
            total_days,
            workers = self.workers(),
            "simulation starting"
        );
        world::apply(
            &mut world,
            Command::LoadGrid { grid, total_days },
            &mut events,
        );

        let started = Instant::now();
        while query::phase(&world) == Phase::Running {
            let previous = query::grid(&world).ok_or(DriverError::MissingGrid)?;
            let marks = self.synchronizer.compute_marks(previous)?;
            let next = build_next_generation(previous, &marks);

            events.clear();
            world::apply(&mut world, Command::CommitGeneration { next }, &mut events);
            record_events(&events)?;
        }
        let elapsed = started.elapsed();

        let days = query::day(&world);
        let grid = world::into_final_grid(world).ok_or(DriverError::MissingGrid)?;
        info!(days, elapsed_secs = elapsed.as_secs_f64(), "simulation completed");

        Ok(RunReport {
            grid,
            days,
            workers: self.workers(),
            elapsed,
        })
    }
}

fn record_events(events: &[Event]) -> Result<(), DriverError> {
    for event in events {
        match event {
            Event::DayAdvanced { day, census } => debug!(
                day,
                humans = census.humans,
                zombies = census.zombies,
                "day advanced"
            ),
            Event::GenerationRejected { reason } => {
                return Err(DriverError::GenerationRejected(*reason));
            }
            Event::GridLoaded { .. } | Event::SimulationCompleted { .. } => {}
        }
    }
    Ok(())
}
