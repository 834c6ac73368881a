#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative simulation state for the outbreak engine.

use outbreak_core::{Command, Event, GenerationError, Grid};

/// Lifecycle phase of a simulation run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    /// No grid has been installed yet.
    Loading,
    /// Generations are being committed, one per day.
    Running,
    /// The requested number of days has elapsed and the grid is final.
    Completed,
}

/// Represents the authoritative simulation state.
#[derive(Debug)]
pub struct World {
    grid: Option<Grid>,
    day: u32,
    total_days: u32,
    phase: Phase,
}

impl World {
    /// Creates an empty world waiting for a grid.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            grid: None,
            day: 0,
            total_days: 0,
            phase: Phase::Loading,
        }
    }

    fn phase_after(day: u32, total_days: u32) -> Phase {
        if day >= total_days {
            Phase::Completed
        } else {
            Phase::Running
        }
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::LoadGrid { grid, total_days } => {
            out_events.push(Event::GridLoaded {
                side: grid.side(),
                total_days,
            });
            world.grid = Some(grid);
            world.day = 0;
            world.total_days = total_days;
            world.phase = World::phase_after(0, total_days);

            if world.phase == Phase::Completed {
                out_events.push(Event::SimulationCompleted { days: 0 });
            }
        }
        Command::CommitGeneration { next } => {
            if world.phase != Phase::Running {
                out_events.push(Event::GenerationRejected {
                    reason: GenerationError::NotRunning,
                });
                return;
            }
            let Some(current) = world.grid.as_ref() else {
                out_events.push(Event::GenerationRejected {
                    reason: GenerationError::NotRunning,
                });
                return;
            };
            if current.side() != next.side() {
                out_events.push(Event::GenerationRejected {
                    reason: GenerationError::SideMismatch {
                        expected: current.side(),
                        found: next.side(),
                    },
                });
                return;
            }

            world.day = world.day.saturating_add(1);
            out_events.push(Event::DayAdvanced {
                day: world.day,
                census: next.census(),
            });
            world.grid = Some(next);
            world.phase = World::phase_after(world.day, world.total_days);

            if world.phase == Phase::Completed {
                out_events.push(Event::SimulationCompleted { days: world.day });
            }
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use super::{Phase, World};
    use outbreak_core::Grid;

    /// Provides read-only access to the current generation, if one is loaded.
    #[must_use]
    pub fn grid(world: &World) -> Option<&Grid> {
        world.grid.as_ref()
    }

    /// Number of days committed since the grid was loaded.
    #[must_use]
    pub fn day(world: &World) -> u32 {
        world.day
    }

    /// Number of days requested when the grid was loaded.
    #[must_use]
    pub fn total_days(world: &World) -> u32 {
        world.total_days
    }

    /// Current lifecycle phase.
    #[must_use]
    pub fn phase(world: &World) -> Phase {
        world.phase
    }
}

/// Consumes a completed world and yields its final grid.
///
/// Returns `None` unless the world has reached [`Phase::Completed`].
#[must_use]
pub fn into_final_grid(world: World) -> Option<Grid> {
    if world.phase == Phase::Completed {
        world.grid
    } else {
        None
    }
}
