//! Grid pathfinding visualizer.
//!
//! A best-first search (steps taken plus straight-line distance) runs over a
//! grid of origin, destination, wall and recharger cells, optionally animated
//! one frontier expansion at a time, and paints what it explores and the path
//! it finds back onto the grid.

pub mod algorithms;
pub mod config;
pub mod grid;
pub mod pacing;
pub mod statistics;
pub mod visualizer;

pub use algorithms::a_star::ReferenceAStar;
pub use algorithms::best_first::{
    Exhaustion, FoundPath, SearchEngine, SearchOutcome, SearchReport, SearchRun, SearchState,
};
pub use algorithms::common::{GridQuery, SearchObserver, Signal, SignalRecorder};
pub use algorithms::cost::distance;
pub use config::{ConfigError, CostUpdate, SearchConfig};
pub use grid::{CellKind, CellType, Coordinate, Grid, GridError};
