use crate::algorithms::common::GridQuery;
use crate::algorithms::directions::DirectionSet;
use crate::grid::{CellType, Coordinate};
use pathfinding::prelude::astar;

/// True shortest paths over the same moves the best-first engine uses,
/// computed with the `pathfinding` crate's A*.
///
/// The engine's straight-line heuristic can overestimate on a grid, so its
/// route is not always optimal; this gives the yardstick to compare against.
#[derive(Debug, Clone)]
pub struct ReferenceAStar {
    directions: DirectionSet,
}

impl ReferenceAStar {
    pub fn new(include_diagonal_directions: bool) -> Self {
        ReferenceAStar {
            directions: DirectionSet::new(include_diagonal_directions),
        }
    }

    /// Finds a shortest path between the grid's origin and destination.
    ///
    /// # Returns
    ///
    /// The path including both endpoints, or `None` when an endpoint is
    /// missing or the destination cannot be reached.
    pub fn find_path<G: GridQuery + ?Sized>(&self, grid: &G) -> Option<Vec<Coordinate>> {
        let origin = grid.origin()?;
        let destination = grid.destination()?;
        let diagonal = self.directions.includes_diagonals();

        let result = astar(
            &origin,
            |cell| {
                // Every move costs one step, walls and the grid edge block.
                self.directions
                    .neighbors(*cell)
                    .filter(|next| {
                        grid.contains(*next)
                            && !matches!(grid.cell_type(*next), None | Some(CellType::Wall))
                    })
                    .map(|next| (next, 1u32))
                    .collect::<Vec<_>>()
            },
            |cell| {
                let rows = cell.row.abs_diff(destination.row);
                let columns = cell.column.abs_diff(destination.column);
                if diagonal {
                    rows.max(columns)
                } else {
                    rows + columns
                }
            },
            |cell| *cell == destination,
        );

        result.map(|(path, _)| path)
    }

    /// Number of moves on a shortest path, if one exists.
    pub fn step_count<G: GridQuery + ?Sized>(&self, grid: &G) -> Option<u32> {
        self.find_path(grid)
            .map(|path| u32::try_from(path.len().saturating_sub(1)).unwrap_or(u32::MAX))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Grid;

    #[test]
    fn open_grid_uses_manhattan_steps() {
        let grid: Grid = "S...\n....\n...G".parse().unwrap();
        assert_eq!(ReferenceAStar::new(false).step_count(&grid), Some(5));
        assert_eq!(ReferenceAStar::new(true).step_count(&grid), Some(3));
    }

    #[test]
    fn walled_off_destination_has_no_path() {
        let grid: Grid = "S#.\n.#.\n.#G".parse().unwrap();
        assert_eq!(ReferenceAStar::new(true).find_path(&grid), None);
    }

    #[test]
    fn missing_endpoint_has_no_path() {
        let grid: Grid = "S..\n...".parse().unwrap();
        assert_eq!(ReferenceAStar::new(false).find_path(&grid), None);
    }
}
