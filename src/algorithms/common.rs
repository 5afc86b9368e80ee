use crate::grid::{CellType, Coordinate};

/// Read access to a grid, as consumed by the search engine.
pub trait GridQuery {
    /// `(rows, columns)`.
    fn dimensions(&self) -> (usize, usize);

    /// `None` for coordinates outside the grid.
    fn cell_type(&self, coordinate: Coordinate) -> Option<CellType>;

    fn origin(&self) -> Option<Coordinate>;

    fn destination(&self) -> Option<Coordinate>;

    fn contains(&self, coordinate: Coordinate) -> bool {
        let (rows, columns) = self.dimensions();
        usize::try_from(coordinate.row).is_ok_and(|row| row < rows)
            && usize::try_from(coordinate.column).is_ok_and(|column| column < columns)
    }
}

/// Visual-state signals emitted while a search runs. Every method defaults to
/// a no-op, so implementors only pick the signals they care about.
pub trait SearchObserver {
    fn on_cell_validated(
        &mut self,
        _coordinate: Coordinate,
        _steps_from_origin: u32,
        _heuristic: f64,
        _total_cost: f64,
    ) {
    }

    fn on_cell_explored(&mut self, _coordinate: Coordinate) {}

    fn on_path_cell(&mut self, _coordinate: Coordinate) {}
}

impl<T: GridQuery + ?Sized> GridQuery for &T {
    fn dimensions(&self) -> (usize, usize) {
        (**self).dimensions()
    }

    fn cell_type(&self, coordinate: Coordinate) -> Option<CellType> {
        (**self).cell_type(coordinate)
    }

    fn origin(&self) -> Option<Coordinate> {
        (**self).origin()
    }

    fn destination(&self) -> Option<Coordinate> {
        (**self).destination()
    }
}

/// A shared borrow cannot be painted on; searching through one is silent.
impl<T: ?Sized> SearchObserver for &T {}

impl<T: GridQuery + ?Sized> GridQuery for &mut T {
    fn dimensions(&self) -> (usize, usize) {
        (**self).dimensions()
    }

    fn cell_type(&self, coordinate: Coordinate) -> Option<CellType> {
        (**self).cell_type(coordinate)
    }

    fn origin(&self) -> Option<Coordinate> {
        (**self).origin()
    }

    fn destination(&self) -> Option<Coordinate> {
        (**self).destination()
    }
}

impl<T: SearchObserver + ?Sized> SearchObserver for &mut T {
    fn on_cell_validated(
        &mut self,
        coordinate: Coordinate,
        steps_from_origin: u32,
        heuristic: f64,
        total_cost: f64,
    ) {
        (**self).on_cell_validated(coordinate, steps_from_origin, heuristic, total_cost);
    }

    fn on_cell_explored(&mut self, coordinate: Coordinate) {
        (**self).on_cell_explored(coordinate);
    }

    fn on_path_cell(&mut self, coordinate: Coordinate) {
        (**self).on_path_cell(coordinate);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Signal {
    Validated {
        coordinate: Coordinate,
        steps_from_origin: u32,
        heuristic: f64,
        total_cost: f64,
    },
    Explored(Coordinate),
    Path(Coordinate),
}

/// Wraps a grid, forwarding every query and signal while keeping an ordered
/// log of the signals it saw.
#[derive(Debug, Clone, Default)]
pub struct SignalRecorder<G> {
    inner: G,
    signals: Vec<Signal>,
}

impl<G> SignalRecorder<G> {
    pub fn new(inner: G) -> Self {
        SignalRecorder {
            inner,
            signals: Vec::new(),
        }
    }

    pub fn signals(&self) -> &[Signal] {
        &self.signals
    }

    pub fn take_signals(&mut self) -> Vec<Signal> {
        std::mem::take(&mut self.signals)
    }

    pub fn validated_cells(&self) -> Vec<Coordinate> {
        self.signals
            .iter()
            .filter_map(|signal| match signal {
                Signal::Validated { coordinate, .. } => Some(*coordinate),
                _ => None,
            })
            .collect()
    }

    pub fn explored_cells(&self) -> Vec<Coordinate> {
        self.signals
            .iter()
            .filter_map(|signal| match signal {
                Signal::Explored(coordinate) => Some(*coordinate),
                _ => None,
            })
            .collect()
    }

    pub fn path_cells(&self) -> Vec<Coordinate> {
        self.signals
            .iter()
            .filter_map(|signal| match signal {
                Signal::Path(coordinate) => Some(*coordinate),
                _ => None,
            })
            .collect()
    }

    pub fn inner(&self) -> &G {
        &self.inner
    }

    pub fn inner_mut(&mut self) -> &mut G {
        &mut self.inner
    }

    pub fn into_inner(self) -> G {
        self.inner
    }
}

impl<G: GridQuery> GridQuery for SignalRecorder<G> {
    fn dimensions(&self) -> (usize, usize) {
        self.inner.dimensions()
    }

    fn cell_type(&self, coordinate: Coordinate) -> Option<CellType> {
        self.inner.cell_type(coordinate)
    }

    fn origin(&self) -> Option<Coordinate> {
        self.inner.origin()
    }

    fn destination(&self) -> Option<Coordinate> {
        self.inner.destination()
    }
}

impl<G: SearchObserver> SearchObserver for SignalRecorder<G> {
    fn on_cell_validated(
        &mut self,
        coordinate: Coordinate,
        steps_from_origin: u32,
        heuristic: f64,
        total_cost: f64,
    ) {
        self.signals.push(Signal::Validated {
            coordinate,
            steps_from_origin,
            heuristic,
            total_cost,
        });
        self.inner
            .on_cell_validated(coordinate, steps_from_origin, heuristic, total_cost);
    }

    fn on_cell_explored(&mut self, coordinate: Coordinate) {
        self.signals.push(Signal::Explored(coordinate));
        self.inner.on_cell_explored(coordinate);
    }

    fn on_path_cell(&mut self, coordinate: Coordinate) {
        self.signals.push(Signal::Path(coordinate));
        self.inner.on_path_cell(coordinate);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Grid;

    #[test]
    fn contains_matches_dimensions() {
        let grid = Grid::new(2, 3).unwrap();
        assert!(grid.contains(Coordinate::new(1, 2)));
        assert!(!grid.contains(Coordinate::new(2, 0)));
        assert!(!grid.contains(Coordinate::new(0, -1)));
    }

    #[test]
    fn recorder_forwards_signals_to_the_grid() {
        let mut recorder = SignalRecorder::new(Grid::new(2, 2).unwrap());
        recorder.on_cell_explored(Coordinate::new(0, 1));
        recorder.on_path_cell(Coordinate::new(1, 1));

        assert_eq!(recorder.explored_cells(), vec![Coordinate::new(0, 1)]);
        assert_eq!(recorder.path_cells(), vec![Coordinate::new(1, 1)]);
        assert_eq!(
            recorder.inner().kind(Coordinate::new(1, 1)),
            Some(crate::grid::CellKind::Path)
        );
    }
}
