use crate::grid::Coordinate;

/// Compass moves on the grid, listed in expansion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    NorthWest,
    West,
    SouthWest,
    South,
    SouthEast,
    East,
    NorthEast,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::NorthWest,
        Direction::West,
        Direction::SouthWest,
        Direction::South,
        Direction::SouthEast,
        Direction::East,
        Direction::NorthEast,
    ];

    /// `(row delta, column delta)`.
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Direction::North => (-1, 0),
            Direction::NorthWest => (-1, -1),
            Direction::West => (0, -1),
            Direction::SouthWest => (1, -1),
            Direction::South => (1, 0),
            Direction::SouthEast => (1, 1),
            Direction::East => (0, 1),
            Direction::NorthEast => (-1, 1),
        }
    }

    pub const fn is_diagonal(self) -> bool {
        let (row, column) = self.offset();
        row != 0 && column != 0
    }

    pub fn apply(self, coordinate: Coordinate) -> Option<Coordinate> {
        let (row, column) = self.offset();
        coordinate.offset(row, column)
    }
}

/// The moves available to one search, fixed for its whole run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectionSet {
    directions: Vec<Direction>,
}

impl DirectionSet {
    pub fn new(include_diagonal_directions: bool) -> Self {
        let directions = Direction::ALL
            .into_iter()
            .filter(|direction| include_diagonal_directions || !direction.is_diagonal())
            .collect();
        DirectionSet { directions }
    }

    pub fn iter(&self) -> impl Iterator<Item = Direction> + '_ {
        self.directions.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.directions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.directions.is_empty()
    }

    pub fn includes_diagonals(&self) -> bool {
        self.directions.iter().any(|direction| direction.is_diagonal())
    }

    /// Cells one move away from `coordinate`, in expansion order. Moves whose
    /// target is not representable as a [`Coordinate`] are skipped.
    pub fn neighbors(&self, coordinate: Coordinate) -> impl Iterator<Item = Coordinate> + '_ {
        self.iter()
            .filter_map(move |direction| direction.apply(coordinate))
    }
}
