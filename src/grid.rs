use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::algorithms::common::{GridQuery, SearchObserver};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Coordinate {
    pub row: i32,
    pub column: i32,
}

impl Coordinate {
    pub const fn new(row: i32, column: i32) -> Self {
        Coordinate { row, column }
    }

    /// Coordinate shifted by the given deltas. May fall outside any grid;
    /// `None` when either component overflows `i32`.
    pub const fn offset(self, row_delta: i32, column_delta: i32) -> Option<Self> {
        match (
            self.row.checked_add(row_delta),
            self.column.checked_add(column_delta),
        ) {
            (Some(row), Some(column)) => Some(Coordinate { row, column }),
            _ => None,
        }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.column)
    }
}

/// The view of a cell the search engine works with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellType {
    Passable,
    Wall,
    Origin,
    Destination,
}

/// Every display state a cell can be in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum CellKind {
    #[default]
    Default,
    Origin,
    Destination,
    Wall,
    Recharger,
    CheckedPath,
    Path,
    Explored,
}

/// Inputs driving [`CellKind::transition`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellEvent {
    /// User click: default -> origin -> destination -> wall -> recharger -> default.
    Cycle,
    Validated,
    Explored,
    OnPath,
    ClearMarks,
}

impl CellKind {
    /// The single transition function for cell display states.
    ///
    /// Search marks only ever land on cells without a user-designated role;
    /// origin, destination, wall and recharger cells keep their kind.
    pub fn transition(self, event: CellEvent) -> CellKind {
        match event {
            CellEvent::Cycle => match self {
                CellKind::Default
                | CellKind::CheckedPath
                | CellKind::Path
                | CellKind::Explored => CellKind::Origin,
                CellKind::Origin => CellKind::Destination,
                CellKind::Destination => CellKind::Wall,
                CellKind::Wall => CellKind::Recharger,
                CellKind::Recharger => CellKind::Default,
            },
            CellEvent::Validated if self.is_markable() => CellKind::CheckedPath,
            CellEvent::Explored if self.is_markable() => CellKind::Explored,
            CellEvent::OnPath if self.is_markable() => CellKind::Path,
            CellEvent::ClearMarks if self.is_markable() => CellKind::Default,
            CellEvent::Validated
            | CellEvent::Explored
            | CellEvent::OnPath
            | CellEvent::ClearMarks => self,
        }
    }

    /// Whether the kind is either blank or a search mark.
    pub fn is_markable(self) -> bool {
        matches!(
            self,
            CellKind::Default | CellKind::CheckedPath | CellKind::Path | CellKind::Explored
        )
    }

    /// Recharger cells are inert: they are traversed like any blank cell.
    pub fn cell_type(self) -> CellType {
        match self {
            CellKind::Wall => CellType::Wall,
            CellKind::Origin => CellType::Origin,
            CellKind::Destination => CellType::Destination,
            CellKind::Default
            | CellKind::Recharger
            | CellKind::CheckedPath
            | CellKind::Path
            | CellKind::Explored => CellType::Passable,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            CellKind::Default => '.',
            CellKind::Origin => 'S',
            CellKind::Destination => 'G',
            CellKind::Wall => '#',
            CellKind::Recharger => 'R',
            CellKind::CheckedPath => 'o',
            CellKind::Path => '*',
            CellKind::Explored => 'x',
        }
    }

    pub fn from_symbol(symbol: char) -> Option<Self> {
        let kind = match symbol {
            '.' => CellKind::Default,
            'S' => CellKind::Origin,
            'G' => CellKind::Destination,
            '#' => CellKind::Wall,
            'R' => CellKind::Recharger,
            'o' => CellKind::CheckedPath,
            '*' => CellKind::Path,
            'x' => CellKind::Explored,
            _ => return None,
        };
        Some(kind)
    }
}

/// Search figures shown on a cell once it has been validated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellAnnotation {
    pub steps_from_origin: u32,
    pub distance_to_destination: f64,
    pub total_cost: f64,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    #[error("grid dimensions must be non-zero, got {rows}x{columns}")]
    InvalidDimensions { rows: usize, columns: usize },
    #[error("cell {0} lies outside the grid")]
    OutOfBounds(Coordinate),
    #[error("layout contains no rows")]
    EmptyLayout,
    #[error("layout row {row} has {found} cells, expected {expected}")]
    RaggedLayout {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("unknown cell symbol {symbol:?} at row {row}, column {column}")]
    UnknownCell {
        symbol: char,
        row: usize,
        column: usize,
    },
    #[error("layout defines more than one origin")]
    DuplicateOrigin,
    #[error("layout defines more than one destination")]
    DuplicateDestination,
    #[error("random grids need at least two columns, got {0}")]
    TooNarrow(usize),
    #[error("grid dimensions {rows}x{columns} exceed the i32 coordinate range")]
    TooLarge { rows: usize, columns: usize },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    rows: usize,
    columns: usize,
    cells: Vec<Vec<CellKind>>,
    annotations: Vec<Vec<Option<CellAnnotation>>>,
    origin: Option<Coordinate>,
    destination: Option<Coordinate>,
}

impl Grid {
    pub const SHOWCASE_ROWS: usize = 10;
    /// Largest row or column count whose indices all fit a [`Coordinate`].
    pub const MAX_DIMENSION: usize = i32::MAX as usize;

    /// Creates a blank grid.
    pub fn new(rows: usize, columns: usize) -> Result<Self, GridError> {
        Self::check_dimensions(rows, columns)?;
        Ok(Self::blank(rows, columns))
    }

    fn check_dimensions(rows: usize, columns: usize) -> Result<(), GridError> {
        if rows == 0 || columns == 0 {
            return Err(GridError::InvalidDimensions { rows, columns });
        }
        if rows > Self::MAX_DIMENSION || columns > Self::MAX_DIMENSION {
            return Err(GridError::TooLarge { rows, columns });
        }
        Ok(())
    }

    fn blank(rows: usize, columns: usize) -> Self {
        Grid {
            rows,
            columns,
            cells: vec![vec![CellKind::Default; columns]; rows],
            annotations: vec![vec![None; columns]; rows],
            origin: None,
            destination: None,
        }
    }

    /// The layout the visualizer opens with: a 16:9 grid with a winding set of
    /// walls between the origin and the destination.
    pub fn showcase() -> Self {
        let rows = Self::SHOWCASE_ROWS;
        let columns = rows * 16 / 9;
        let mut grid = Self::blank(rows, columns);

        grid.place(3, 0, CellKind::Origin);
        grid.place(6, 16, CellKind::Destination);
        let walls = [
            (3, 2),
            (4, 2),
            (5, 2),
            (6, 3),
            (7, 4),
            (7, 5),
            (6, 5),
            (5, 5),
            (4, 7),
            (5, 7),
            (6, 7),
            (7, 7),
            (8, 7),
            (9, 7),
        ];
        for (row, column) in walls {
            grid.place(row, column, CellKind::Wall);
        }
        grid
    }

    /// Generates a grid with the origin in the left half, the destination in
    /// the right half and up to `num_walls` walls on the remaining cells.
    pub fn random(
        rows: usize,
        columns: usize,
        num_walls: usize,
        seed: Option<u64>,
    ) -> Result<Self, GridError> {
        Self::check_dimensions(rows, columns)?;
        if columns < 2 {
            return Err(GridError::TooNarrow(columns));
        }

        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut grid = Self::blank(rows, columns);
        let origin = (rng.gen_range(0..rows), rng.gen_range(0..columns / 2));
        let destination = (rng.gen_range(0..rows), rng.gen_range(columns / 2..columns));
        grid.place(origin.0, origin.1, CellKind::Origin);
        grid.place(destination.0, destination.1, CellKind::Destination);

        let mut walls_placed = 0;
        let mut attempts = 0;
        while walls_placed < num_walls && attempts < num_walls * 3 {
            let row = rng.gen_range(0..rows);
            let column = rng.gen_range(0..columns);
            if grid.cells[row][column] == CellKind::Default {
                grid.place(row, column, CellKind::Wall);
                walls_placed += 1;
            }
            attempts += 1;
        }

        Ok(grid)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    fn index(&self, coordinate: Coordinate) -> Option<(usize, usize)> {
        let row = usize::try_from(coordinate.row).ok()?;
        let column = usize::try_from(coordinate.column).ok()?;
        (row < self.rows && column < self.columns).then_some((row, column))
    }

    pub fn kind(&self, coordinate: Coordinate) -> Option<CellKind> {
        self.index(coordinate)
            .map(|(row, column)| self.cells[row][column])
    }

    pub fn annotation(&self, coordinate: Coordinate) -> Option<CellAnnotation> {
        self.index(coordinate)
            .and_then(|(row, column)| self.annotations[row][column])
    }

    /// Designates a cell. Keeps at most one origin and one destination: the
    /// previous holder of either role falls back to a blank cell.
    pub fn set_kind(&mut self, coordinate: Coordinate, kind: CellKind) -> Result<(), GridError> {
        let (row, column) = self
            .index(coordinate)
            .ok_or(GridError::OutOfBounds(coordinate))?;
        self.place(row, column, kind);
        Ok(())
    }

    /// `row` and `column` are in bounds, and every constructor caps the
    /// dimensions at [`Self::MAX_DIMENSION`], so the casts are lossless.
    fn place(&mut self, row: usize, column: usize, kind: CellKind) {
        let coordinate = Coordinate::new(row as i32, column as i32);

        if self.origin == Some(coordinate) && kind != CellKind::Origin {
            self.origin = None;
        }
        if self.destination == Some(coordinate) && kind != CellKind::Destination {
            self.destination = None;
        }

        match kind {
            CellKind::Origin => {
                if let Some((old_row, old_column)) = self.origin.and_then(|old| self.index(old)) {
                    self.cells[old_row][old_column] = CellKind::Default;
                }
                self.origin = Some(coordinate);
            }
            CellKind::Destination => {
                if let Some((old_row, old_column)) =
                    self.destination.and_then(|old| self.index(old))
                {
                    self.cells[old_row][old_column] = CellKind::Default;
                }
                self.destination = Some(coordinate);
            }
            _ => {}
        }

        self.cells[row][column] = kind;
        self.annotations[row][column] = None;
    }

    pub fn define_origin(&mut self, coordinate: Coordinate) -> Result<(), GridError> {
        self.set_kind(coordinate, CellKind::Origin)
    }

    pub fn define_destination(&mut self, coordinate: Coordinate) -> Result<(), GridError> {
        self.set_kind(coordinate, CellKind::Destination)
    }

    pub fn define_wall(&mut self, coordinate: Coordinate) -> Result<(), GridError> {
        self.set_kind(coordinate, CellKind::Wall)
    }

    pub fn define_recharger(&mut self, coordinate: Coordinate) -> Result<(), GridError> {
        self.set_kind(coordinate, CellKind::Recharger)
    }

    /// Advances a cell through the click cycle and returns its new kind.
    pub fn cycle_cell(&mut self, coordinate: Coordinate) -> Result<CellKind, GridError> {
        let current = self
            .kind(coordinate)
            .ok_or(GridError::OutOfBounds(coordinate))?;
        let next = current.transition(CellEvent::Cycle);
        self.set_kind(coordinate, next)?;
        Ok(next)
    }

    /// Replaces the grid with a blank one of the new size.
    pub fn resize(&mut self, rows: usize, columns: usize) -> Result<(), GridError> {
        *self = Self::new(rows, columns)?;
        Ok(())
    }

    /// Wipes everything a previous search painted onto the grid.
    pub fn clear_search_marks(&mut self) {
        for (cells, annotations) in self.cells.iter_mut().zip(self.annotations.iter_mut()) {
            for (cell, annotation) in cells.iter_mut().zip(annotations.iter_mut()) {
                *cell = cell.transition(CellEvent::ClearMarks);
                *annotation = None;
            }
        }
    }

    pub fn count(&self, kind: CellKind) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|&&cell| cell == kind)
            .count()
    }

    fn apply(&mut self, coordinate: Coordinate, event: CellEvent) {
        if let Some((row, column)) = self.index(coordinate) {
            let cell = &mut self.cells[row][column];
            *cell = cell.transition(event);
        }
    }

    /// Layout with row and column numbers, as shown by the terminal view.
    pub fn render_with_axes(&self) -> String {
        let mut out = String::from("   ");
        for column in 0..self.columns {
            out.push_str(&format!("{:2}", column % 10));
        }
        out.push('\n');

        for (row, cells) in self.cells.iter().enumerate() {
            out.push_str(&format!("{:2} ", row));
            for cell in cells {
                out.push(cell.symbol());
                out.push(' ');
            }
            out.push('\n');
        }
        out
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for cells in &self.cells {
            let line: String = cells.iter().map(|cell| cell.symbol()).collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

impl FromStr for Grid {
    type Err = GridError;

    fn from_str(layout: &str) -> Result<Self, Self::Err> {
        let lines: Vec<&str> = layout
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();

        let Some(first) = lines.first() else {
            return Err(GridError::EmptyLayout);
        };
        let columns = first.chars().count();
        Self::check_dimensions(lines.len(), columns)?;
        let mut grid = Self::blank(lines.len(), columns);

        for (row, line) in lines.iter().enumerate() {
            let found = line.chars().count();
            if found != columns {
                return Err(GridError::RaggedLayout {
                    row,
                    expected: columns,
                    found,
                });
            }

            for (column, symbol) in line.chars().enumerate() {
                let kind = CellKind::from_symbol(symbol).ok_or(GridError::UnknownCell {
                    symbol,
                    row,
                    column,
                })?;
                match kind {
                    CellKind::Origin if grid.origin.is_some() => {
                        return Err(GridError::DuplicateOrigin)
                    }
                    CellKind::Destination if grid.destination.is_some() => {
                        return Err(GridError::DuplicateDestination)
                    }
                    _ => grid.place(row, column, kind),
                }
            }
        }

        Ok(grid)
    }
}

impl GridQuery for Grid {
    fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.columns)
    }

    fn cell_type(&self, coordinate: Coordinate) -> Option<CellType> {
        self.kind(coordinate).map(CellKind::cell_type)
    }

    fn origin(&self) -> Option<Coordinate> {
        self.origin
    }

    fn destination(&self) -> Option<Coordinate> {
        self.destination
    }
}

impl SearchObserver for Grid {
    fn on_cell_validated(
        &mut self,
        coordinate: Coordinate,
        steps_from_origin: u32,
        heuristic: f64,
        total_cost: f64,
    ) {
        if let Some((row, column)) = self.index(coordinate) {
            self.annotations[row][column] = Some(CellAnnotation {
                steps_from_origin,
                distance_to_destination: heuristic,
                total_cost,
            });
        }
        self.apply(coordinate, CellEvent::Validated);
    }

    fn on_cell_explored(&mut self, coordinate: Coordinate) {
        self.apply(coordinate, CellEvent::Explored);
    }

    fn on_path_cell(&mut self, coordinate: Coordinate) {
        self.apply(coordinate, CellEvent::OnPath);
    }
}
