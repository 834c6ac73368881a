#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic random map generation for benchmark inputs.

use outbreak_core::{CellState, Grid, GridError};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use thiserror::Error;

const DEFAULT_HUMAN_PERCENT: u8 = 60;
const DEFAULT_ZOMBIE_PERCENT: u8 = 5;

/// Errors raised while generating a map.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum MapGenerationError {
    /// Human and zombie shares together exceed the whole map.
    #[error("human ({human}%) and zombie ({zombie}%) shares exceed 100%")]
    DensityOverflow {
        /// Requested human share.
        human: u8,
        /// Requested zombie share.
        zombie: u8,
    },
    /// The requested side length cannot form a grid.
    #[error(transparent)]
    Grid(#[from] GridError),
}

/// Percentage of cells seeded with each inhabitant. The rest is empty terrain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MapDensity {
    human_percent: u8,
    zombie_percent: u8,
}

impl MapDensity {
    /// Creates a density whose shares sum to at most 100%.
    pub fn new(human_percent: u8, zombie_percent: u8) -> Result<Self, MapGenerationError> {
        if u16::from(human_percent) + u16::from(zombie_percent) > 100 {
            return Err(MapGenerationError::DensityOverflow {
                human: human_percent,
                zombie: zombie_percent,
            });
        }
        Ok(Self {
            human_percent,
            zombie_percent,
        })
    }

    /// Share of cells that start as humans.
    #[must_use]
    pub const fn human_percent(&self) -> u8 {
        self.human_percent
    }

    /// Share of cells that start as zombies.
    #[must_use]
    pub const fn zombie_percent(&self) -> u8 {
        self.zombie_percent
    }

    fn classify(&self, roll: u8) -> CellState {
        if roll < self.human_percent {
            CellState::Human
        } else if roll < self.human_percent + self.zombie_percent {
            CellState::Zombie
        } else {
            CellState::Empty
        }
    }
}

impl Default for MapDensity {
    fn default() -> Self {
        Self {
            human_percent: DEFAULT_HUMAN_PERCENT,
            zombie_percent: DEFAULT_ZOMBIE_PERCENT,
        }
    }
}

/// Generates a `side` x `side` grid. The same seed always yields the same grid.
pub fn generate_grid(
    side: usize,
    density: MapDensity,
    seed: u64,
) -> Result<Grid, MapGenerationError> {
    let count = side.checked_mul(side).ok_or(GridError::SideTooLarge(side))?;
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let cells = (0..count)
        .map(|_| density.classify(rng.gen_range(0..100)))
        .collect();
    Ok(Grid::from_cells(side, cells)?)
}

#[cfg(test)]
mod tests {
    use super::MapDensity;
    use outbreak_core::CellState;

    #[test]
    fn rolls_split_at_density_thresholds() {
        let density = MapDensity::new(60, 5).expect("valid density");
        assert_eq!(density.classify(0), CellState::Human);
        assert_eq!(density.classify(59), CellState::Human);
        assert_eq!(density.classify(60), CellState::Zombie);
        assert_eq!(density.classify(64), CellState::Zombie);
        assert_eq!(density.classify(65), CellState::Empty);
        assert_eq!(density.classify(99), CellState::Empty);
    }
}
