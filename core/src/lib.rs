#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the outbreak simulation engine.
//!
//! This crate defines the grid model and the message surface that connects
//! adapters, the authoritative world, and pure systems. Systems read an
//! immutable [`Grid`] snapshot, compute a per-day [`MarkGrid`], and hand the
//! world a freshly built generation through a [`Command`]. The world answers
//! with [`Event`] values describing how the simulation advanced.

use std::{fmt, slice::ChunksExact};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Ordered list of the eight neighbor offsets probed around a zombie.
///
/// Each entry is `(row_delta, column_delta)`. The order is significant: the
/// first in-bounds human found along this sequence is the one that gets
/// marked.
pub const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// State of a single grid cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellState {
    /// Uninfected inhabitant that may be converted by an adjacent zombie.
    Human,
    /// Infected inhabitant. Zombies never revert.
    Zombie,
    /// Terrain that nothing enters or leaves.
    Empty,
}

impl CellState {
    /// Parses a single map token, ignoring ASCII case.
    pub fn from_token(token: &str) -> Result<Self, GridError> {
        match token {
            "H" | "h" => Ok(Self::Human),
            "Z" | "z" => Ok(Self::Zombie),
            "." => Ok(Self::Empty),
            other => Err(GridError::UnknownToken(other.to_owned())),
        }
    }

    /// Canonical uppercase symbol used when writing snapshots.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Human => 'H',
            Self::Zombie => 'Z',
            Self::Empty => '.',
        }
    }
}

impl fmt::Display for CellState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Location of a single grid cell expressed as zero-based row and column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    row: usize,
    column: usize,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> usize {
        self.row
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> usize {
        self.column
    }

    /// Applies a signed offset, returning the neighbor only if it lies inside a
    /// square grid with the provided side length.
    #[must_use]
    pub fn offset_within(
        self,
        (row_delta, column_delta): (isize, isize),
        side: usize,
    ) -> Option<Self> {
        let row = self.row.checked_add_signed(row_delta)?;
        let column = self.column.checked_add_signed(column_delta)?;
        (row < side && column < side).then_some(Self { row, column })
    }
}

/// Errors raised when constructing a grid model.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GridError {
    /// Grids must contain at least one cell.
    #[error("grid side length must be at least 1")]
    ZeroSide,
    /// `side * side` does not fit in memory addressing.
    #[error("grid side length {0} is too large")]
    SideTooLarge(usize),
    /// The number of supplied cells did not match `side * side`.
    #[error("expected {expected} cells for the grid, found {found}")]
    CellCount {
        /// Number of cells a square grid of the requested side holds.
        expected: usize,
        /// Number of cells actually supplied.
        found: usize,
    },
    /// A token did not name any known cell state.
    #[error("unknown cell token '{0}'")]
    UnknownToken(String),
}

/// Square NxN snapshot of cell states for a single generation.
///
/// A grid is never mutated once published. Every generation is a new
/// instance with the same side length.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Grid {
    side: usize,
    cells: Vec<CellState>,
}

impl Grid {
    /// Creates a grid from row-major cells.
    pub fn from_cells(side: usize, cells: Vec<CellState>) -> Result<Self, GridError> {
        if side == 0 {
            return Err(GridError::ZeroSide);
        }
        let expected = side.checked_mul(side).ok_or(GridError::SideTooLarge(side))?;
        if cells.len() != expected {
            return Err(GridError::CellCount {
                expected,
                found: cells.len(),
            });
        }
        Ok(Self { side, cells })
    }

    /// Creates a grid where every cell holds the same state.
    pub fn filled(side: usize, state: CellState) -> Result<Self, GridError> {
        let count = side.checked_mul(side).ok_or(GridError::SideTooLarge(side))?;
        Self::from_cells(side, vec![state; count])
    }

    /// Side length N of the grid.
    #[must_use]
    pub const fn side(&self) -> usize {
        self.side
    }

    /// Retrieves the state at the provided coordinate, if it lies inside the grid.
    #[must_use]
    pub fn get(&self, cell: CellCoord) -> Option<CellState> {
        if cell.row >= self.side || cell.column >= self.side {
            return None;
        }
        self.cells.get(cell.row * self.side + cell.column).copied()
    }

    /// Borrows a single row.
    ///
    /// # Panics
    ///
    /// Panics if `row >= self.side()`.
    #[must_use]
    pub fn row(&self, row: usize) -> &[CellState] {
        let start = row * self.side;
        &self.cells[start..start + self.side]
    }

    /// Iterates over the rows from top to bottom.
    pub fn rows(&self) -> ChunksExact<'_, CellState> {
        self.cells.chunks_exact(self.side)
    }

    /// Row-major view of every cell.
    #[must_use]
    pub fn cells(&self) -> &[CellState] {
        &self.cells
    }

    /// Builds a grid of the same shape by mapping every cell.
    #[must_use]
    pub fn map<F>(&self, mut f: F) -> Self
    where
        F: FnMut(CellCoord, CellState) -> CellState,
    {
        let side = self.side;
        let cells = self
            .cells
            .iter()
            .enumerate()
            .map(|(index, cell)| f(CellCoord::new(index / side, index % side), *cell))
            .collect();
        Self { side, cells }
    }

    /// Counts the cells in each state.
    #[must_use]
    pub fn census(&self) -> Census {
        self.cells.iter().fold(Census::default(), |mut census, cell| {
            match cell {
                CellState::Human => census.humans += 1,
                CellState::Zombie => census.zombies += 1,
                CellState::Empty => census.empty += 1,
            }
            census
        })
    }
}

/// Per-day record of which cells have been marked for infection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MarkGrid {
    side: usize,
    cells: Vec<bool>,
}

impl MarkGrid {
    /// Creates an unmarked grid with the provided side length.
    #[must_use]
    pub fn new(side: usize) -> Self {
        Self {
            side,
            cells: vec![false; side * side],
        }
    }

    /// Side length N of the mark grid.
    #[must_use]
    pub const fn side(&self) -> usize {
        self.side
    }

    /// Reports whether the provided cell carries an infection mark.
    #[must_use]
    pub fn is_marked(&self, cell: CellCoord) -> bool {
        if cell.row >= self.side || cell.column >= self.side {
            return false;
        }
        self.cells[cell.row * self.side + cell.column]
    }

    /// Borrows the marks recorded for a single row.
    ///
    /// # Panics
    ///
    /// Panics if `row >= self.side()`.
    #[must_use]
    pub fn row(&self, row: usize) -> &[bool] {
        let start = row * self.side;
        &self.cells[start..start + self.side]
    }

    /// Mutable row-major storage. Callers partition it into rows of
    /// `side()` entries so each writer owns a disjoint slice.
    pub fn cells_mut(&mut self) -> &mut [bool] {
        &mut self.cells
    }

    /// Number of marked cells.
    #[must_use]
    pub fn marked_count(&self) -> usize {
        self.cells.iter().filter(|marked| **marked).count()
    }
}

/// Number of cells in each state at a given moment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Census {
    /// Cells holding a human.
    pub humans: usize,
    /// Cells holding a zombie.
    pub zombies: usize,
    /// Empty terrain cells.
    pub empty: usize,
}

/// Reasons the world refuses a proposed generation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GenerationError {
    /// No simulation is running, either because nothing was loaded or the
    /// requested number of days has already elapsed.
    NotRunning,
    /// The proposed grid does not share the side length of the loaded grid.
    SideMismatch {
        /// Side length fixed when the grid was loaded.
        expected: usize,
        /// Side length of the rejected grid.
        found: usize,
    },
}

impl fmt::Display for GenerationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotRunning => write!(f, "simulation is not running"),
            Self::SideMismatch { expected, found } => {
                write!(f, "generation side {found} does not match loaded side {expected}")
            }
        }
    }
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Installs the initial grid and the number of days to simulate.
    LoadGrid {
        /// Parsed input grid that becomes day 0.
        grid: Grid,
        /// Number of days the simulation should run for.
        total_days: u32,
    },
    /// Replaces the current grid with the next generation.
    CommitGeneration {
        /// Grid produced for the following day.
        next: Grid,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Confirms that a grid was installed.
    GridLoaded {
        /// Side length of the loaded grid.
        side: usize,
        /// Number of days requested for the run.
        total_days: u32,
    },
    /// Announces that a generation was committed.
    DayAdvanced {
        /// Day counter after the commit.
        day: u32,
        /// Cell counts of the new generation.
        census: Census,
    },
    /// Announces that the requested number of days has elapsed.
    SimulationCompleted {
        /// Number of days that were simulated.
        days: u32,
    },
    /// Reports that a proposed generation was refused.
    GenerationRejected {
        /// Specific reason the commit failed.
        reason: GenerationError,
    },
}

#[cfg(test)]
mod tests {
    use super::{CellCoord, CellState, Census, GenerationError, Grid, GridError, MarkGrid};
    use serde::{de::DeserializeOwned, Serialize};

    fn assert_round_trip<T>(value: &T)
    where
        T: Serialize + DeserializeOwned + PartialEq + std::fmt::Debug,
    {
        let bytes = bincode::serialize(value).expect("serialize");
        let restored: T = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(&restored, value);
    }

    #[test]
    fn tokens_parse_case_insensitively() {
        assert_eq!(CellState::from_token("H"), Ok(CellState::Human));
        assert_eq!(CellState::from_token("h"), Ok(CellState::Human));
        assert_eq!(CellState::from_token("Z"), Ok(CellState::Zombie));
        assert_eq!(CellState::from_token("z"), Ok(CellState::Zombie));
        assert_eq!(CellState::from_token("."), Ok(CellState::Empty));
        assert_eq!(
            CellState::from_token("x"),
            Err(GridError::UnknownToken("x".to_owned()))
        );
    }

    #[test]
    fn grid_rejects_wrong_cell_count() {
        let error = Grid::from_cells(2, vec![CellState::Human; 3]).unwrap_err();
        assert_eq!(
            error,
            GridError::CellCount {
                expected: 4,
                found: 3
            }
        );
    }

    #[test]
    fn grid_rejects_zero_side() {
        assert_eq!(Grid::from_cells(0, Vec::new()), Err(GridError::ZeroSide));
        assert_eq!(Grid::filled(0, CellState::Empty), Err(GridError::ZeroSide));
    }

    #[test]
    fn offset_within_respects_bounds() {
        let corner = CellCoord::new(0, 0);
        assert_eq!(corner.offset_within((-1, -1), 3), None);
        assert_eq!(corner.offset_within((0, 1), 3), Some(CellCoord::new(0, 1)));
        let far = CellCoord::new(2, 2);
        assert_eq!(far.offset_within((1, 0), 3), None);
        assert_eq!(far.offset_within((-1, -2), 3), Some(CellCoord::new(1, 0)));
    }

    #[test]
    fn census_counts_every_state() {
        let grid = Grid::from_cells(
            2,
            vec![
                CellState::Human,
                CellState::Zombie,
                CellState::Empty,
                CellState::Human,
            ],
        )
        .expect("valid grid");
        assert_eq!(
            grid.census(),
            Census {
                humans: 2,
                zombies: 1,
                empty: 1
            }
        );
    }

    #[test]
    fn rows_follow_row_major_layout() {
        let grid = Grid::from_cells(
            2,
            vec![
                CellState::Human,
                CellState::Zombie,
                CellState::Empty,
                CellState::Human,
            ],
        )
        .expect("valid grid");
        assert_eq!(grid.row(1), &[CellState::Empty, CellState::Human]);
        assert_eq!(grid.rows().count(), 2);
        assert_eq!(grid.get(CellCoord::new(0, 1)), Some(CellState::Zombie));
        assert_eq!(grid.get(CellCoord::new(2, 0)), None);
    }

    #[test]
    fn mark_grid_defaults_to_unmarked() {
        let mut marks = MarkGrid::new(3);
        assert_eq!(marks.marked_count(), 0);
        marks.cells_mut()[4] = true;
        assert!(marks.is_marked(CellCoord::new(1, 1)));
        assert!(!marks.is_marked(CellCoord::new(5, 5)));
        assert_eq!(marks.row(1), &[false, true, false]);
    }

    #[test]
    fn cell_state_round_trips_through_bincode() {
        assert_round_trip(&CellState::Zombie);
    }

    #[test]
    fn census_round_trips_through_bincode() {
        assert_round_trip(&Census {
            humans: 7,
            zombies: 2,
            empty: 0,
        });
    }

    #[test]
    fn generation_error_round_trips_through_bincode() {
        assert_round_trip(&GenerationError::SideMismatch {
            expected: 4,
            found: 5,
        });
    }
}
