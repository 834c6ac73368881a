#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure infection kernel: the neighbor rule for a single zombie and the row
//! task that applies it across one grid row.
//!
//! Nothing here touches shared mutable state, so a row can be evaluated on any
//! worker thread given only a shared borrow of the previous generation.

use outbreak_core::{CellCoord, CellState, Grid, NEIGHBOR_OFFSETS};

/// Evaluates the neighbor rule for the zombie at `zombie`.
///
/// Offsets are probed in [`NEIGHBOR_OFFSETS`] order and scanning stops at the
/// first in-bounds human. The returned mark sits on the zombie's own row at the
/// human's column, so diagonal and vertical finds land on a different row than
/// the human that was found.
///
/// Returns `None` when no neighbor is a human. The caller is responsible for
/// only passing zombie cells.
#[must_use]
pub fn infection_mark(grid: &Grid, zombie: CellCoord) -> Option<CellCoord> {
    let side = grid.side();
    NEIGHBOR_OFFSETS
        .iter()
        .filter_map(|offset| zombie.offset_within(*offset, side))
        .find(|neighbor| grid.get(*neighbor) == Some(CellState::Human))
        .map(|human| CellCoord::new(zombie.row(), human.column()))
}

/// Records the infection marks produced by every zombie in `row`.
///
/// `marks` is the row's own slice of the day's mark grid and must hold exactly
/// `grid.side()` entries. Marks are only ever set, never cleared.
pub fn mark_row(grid: &Grid, row: usize, marks: &mut [bool]) {
    debug_assert_eq!(marks.len(), grid.side(), "row slice must span the grid");

    for (column, cell) in grid.row(row).iter().enumerate() {
        if *cell != CellState::Zombie {
            continue;
        }
        if let Some(mark) = infection_mark(grid, CellCoord::new(row, column)) {
            marks[mark.column()] = true;
        }
    }
}

/// Computes the marks for `row` into a freshly allocated vector.
#[must_use]
pub fn row_marks(grid: &Grid, row: usize) -> Vec<bool> {
    let mut marks = vec![false; grid.side()];
    mark_row(grid, row, &mut marks);
    marks
}
