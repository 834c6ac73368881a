use outbreak_core::{CellState, GridError};
use outbreak_system_map_generation::{generate_grid, MapDensity, MapGenerationError};

#[test]
fn same_seed_reproduces_the_same_map() {
    let first = generate_grid(40, MapDensity::default(), 0x5eed).expect("map generates");
    let second = generate_grid(40, MapDensity::default(), 0x5eed).expect("map generates");

    assert_eq!(first, second, "seeded generation must be deterministic");
}

#[test]
fn different_seeds_produce_different_maps() {
    let first = generate_grid(40, MapDensity::default(), 1).expect("map generates");
    let second = generate_grid(40, MapDensity::default(), 2).expect("map generates");

    assert_ne!(first, second);
}

#[test]
fn default_density_is_roughly_respected() {
    let grid = generate_grid(200, MapDensity::default(), 7).expect("map generates");
    let census = grid.census();
    let total = 200 * 200;

    assert_eq!(census.humans + census.zombies + census.empty, total);
    assert!(
        (total * 55 / 100..total * 65 / 100).contains(&census.humans),
        "humans: {}",
        census.humans
    );
    assert!(
        (total * 3 / 100..total * 7 / 100).contains(&census.zombies),
        "zombies: {}",
        census.zombies
    );
}

#[test]
fn saturated_densities_fill_the_map() {
    let humans = generate_grid(8, MapDensity::new(100, 0).expect("valid"), 3).expect("map");
    assert!(humans.cells().iter().all(|cell| *cell == CellState::Human));

    let zombies = generate_grid(8, MapDensity::new(0, 100).expect("valid"), 3).expect("map");
    assert!(zombies.cells().iter().all(|cell| *cell == CellState::Zombie));

    let empty = generate_grid(8, MapDensity::new(0, 0).expect("valid"), 3).expect("map");
    assert!(empty.cells().iter().all(|cell| *cell == CellState::Empty));
}

#[test]
fn overflowing_density_is_rejected() {
    assert_eq!(
        MapDensity::new(70, 40),
        Err(MapGenerationError::DensityOverflow {
            human: 70,
            zombie: 40
        })
    );
}

#[test]
fn zero_side_is_rejected() {
    assert_eq!(
        generate_grid(0, MapDensity::default(), 1),
        Err(MapGenerationError::Grid(GridError::ZeroSide))
    );
}
