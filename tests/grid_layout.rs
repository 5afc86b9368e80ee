use grid_pathfinder::{CellKind, CellType, Coordinate, Grid, GridError, GridQuery};

#[test]
fn layout_round_trips_through_display() {
    let layout = "S..#\n.R#.\n...G\n";
    let grid: Grid = layout.parse().unwrap();
    assert_eq!(grid.to_string(), layout);
    assert_eq!(grid.dimensions(), (3, 4));
    assert_eq!(grid.origin(), Some(Coordinate::new(0, 0)));
    assert_eq!(grid.destination(), Some(Coordinate::new(2, 3)));
    assert_eq!(grid.kind(Coordinate::new(1, 1)), Some(CellKind::Recharger));
}

#[test]
fn layout_ignores_surrounding_whitespace() {
    let grid: Grid = "\n  S.G  \n  ...\n\n".parse().unwrap();
    assert_eq!(grid.dimensions(), (2, 3));
}

#[test]
fn malformed_layouts_are_rejected() {
    assert_eq!("".parse::<Grid>(), Err(GridError::EmptyLayout));
    assert_eq!(
        "S..\n..".parse::<Grid>(),
        Err(GridError::RaggedLayout {
            row: 1,
            expected: 3,
            found: 2
        })
    );
    assert_eq!(
        "S.?".parse::<Grid>(),
        Err(GridError::UnknownCell {
            symbol: '?',
            row: 0,
            column: 2
        })
    );
    assert_eq!("S.S".parse::<Grid>(), Err(GridError::DuplicateOrigin));
    assert_eq!("G.G".parse::<Grid>(), Err(GridError::DuplicateDestination));
}

#[test]
fn showcase_matches_the_default_scene() {
    let grid = Grid::showcase();
    assert_eq!(grid.dimensions(), (10, 17));
    assert_eq!(grid.origin(), Some(Coordinate::new(3, 0)));
    assert_eq!(grid.destination(), Some(Coordinate::new(6, 16)));
    assert_eq!(grid.count(CellKind::Wall), 14);
    for row in 4..10 {
        assert_eq!(
            grid.cell_type(Coordinate::new(row, 7)),
            Some(CellType::Wall)
        );
    }
}

#[test]
fn clicking_cycles_through_designations() {
    let mut grid = Grid::new(2, 2).unwrap();
    let cell = Coordinate::new(1, 0);

    assert_eq!(grid.cycle_cell(cell), Ok(CellKind::Origin));
    assert_eq!(grid.origin(), Some(cell));
    assert_eq!(grid.cycle_cell(cell), Ok(CellKind::Destination));
    assert_eq!(grid.origin(), None);
    assert_eq!(grid.destination(), Some(cell));
    assert_eq!(grid.cycle_cell(cell), Ok(CellKind::Wall));
    assert_eq!(grid.destination(), None);
    assert_eq!(grid.cycle_cell(cell), Ok(CellKind::Recharger));
    assert_eq!(grid.cycle_cell(cell), Ok(CellKind::Default));
}

#[test]
fn clicking_outside_the_grid_fails() {
    let mut grid = Grid::new(2, 2).unwrap();
    let outside = Coordinate::new(2, 0);
    assert_eq!(grid.cycle_cell(outside), Err(GridError::OutOfBounds(outside)));
}

#[test]
fn resize_starts_from_a_blank_grid() {
    let mut grid = Grid::showcase();
    grid.resize(4, 6).unwrap();
    assert_eq!(grid.dimensions(), (4, 6));
    assert_eq!(grid.origin(), None);
    assert_eq!(grid.destination(), None);
    assert_eq!(grid.count(CellKind::Default), 24);

    assert!(grid.resize(0, 3).is_err());
}

#[test]
fn second_destination_replaces_the_first() {
    let mut grid: Grid = "S.G".parse().unwrap();
    grid.define_destination(Coordinate::new(0, 1)).unwrap();
    assert_eq!(grid.to_string(), "SG.\n");
}
