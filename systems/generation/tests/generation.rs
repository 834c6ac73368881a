use outbreak_core::{CellCoord, CellState, Grid, MarkGrid};
use outbreak_system_generation::build_next_generation;

fn grid(rows: &[&str]) -> Grid {
    let cells = rows
        .iter()
        .flat_map(|row| row.split_whitespace())
        .map(|token| CellState::from_token(token).expect("fixture token"))
        .collect();
    Grid::from_cells(rows.len(), cells).expect("fixture grid")
}

fn marks_at(side: usize, cells: &[(usize, usize)]) -> MarkGrid {
    let mut marks = MarkGrid::new(side);
    for (row, column) in cells {
        marks.cells_mut()[row * side + column] = true;
    }
    marks
}

#[test]
fn marked_humans_turn_into_zombies() {
    let previous = grid(&["H H", "H Z"]);
    let marks = marks_at(2, &[(0, 1)]);

    let next = build_next_generation(&previous, &marks);

    assert_eq!(next, grid(&["H Z", "H Z"]));
}

#[test]
fn zombies_and_terrain_ignore_marks() {
    let previous = grid(&["Z .", ". Z"]);
    let marks = marks_at(2, &[(0, 0), (0, 1), (1, 0), (1, 1)]);

    let next = build_next_generation(&previous, &marks);

    assert_eq!(next, previous, "zombies and empty cells are immutable");
}

#[test]
fn unmarked_grid_is_unchanged() {
    let previous = grid(&["H Z .", ". H H", "Z . H"]);

    let next = build_next_generation(&previous, &MarkGrid::new(3));

    assert_eq!(next, previous);
    assert_eq!(next.get(CellCoord::new(2, 0)), Some(CellState::Zombie));
}
