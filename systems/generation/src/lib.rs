#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure generation builder that folds a completed mark grid into the next grid.

use outbreak_core::{CellState, Grid, MarkGrid};

/// Builds the next generation from the previous grid and the day's marks.
///
/// Zombies stay zombies, empty terrain stays empty, and a human turns into a
/// zombie only when its own cell is marked. `marks` must share the grid's
/// side length.
#[must_use]
pub fn build_next_generation(previous: &Grid, marks: &MarkGrid) -> Grid {
    debug_assert_eq!(previous.side(), marks.side(), "mark grid must match grid");

    previous.map(|cell, state| next_state(state, marks.is_marked(cell)))
}

fn next_state(previous: CellState, marked: bool) -> CellState {
    match previous {
        CellState::Human if marked => CellState::Zombie,
        state => state,
    }
}

#[cfg(test)]
mod tests {
    use super::next_state;
    use outbreak_core::CellState;

    #[test]
    fn only_marked_humans_change() {
        assert_eq!(next_state(CellState::Human, true), CellState::Zombie);
        assert_eq!(next_state(CellState::Human, false), CellState::Human);
        assert_eq!(next_state(CellState::Zombie, false), CellState::Zombie);
        assert_eq!(next_state(CellState::Zombie, true), CellState::Zombie);
        assert_eq!(next_state(CellState::Empty, true), CellState::Empty);
        assert_eq!(next_state(CellState::Empty, false), CellState::Empty);
    }
}
