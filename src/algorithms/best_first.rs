//! Best-first grid search with a straight-line heuristic.
//!
//! The frontier is scanned linearly for its cheapest node instead of being
//! kept in a heap: selection must return the *first* minimum in insertion
//! order, and cheaper rediscoveries patch frontier nodes in place, which a
//! heap could not observe without re-insertion.

use std::iter;
use std::time::Instant;

use log::{debug, info, trace, warn};
use rustc_hash::FxHashMap;

use crate::algorithms::common::{GridQuery, SearchObserver};
use crate::algorithms::cost::{NodeId, NodeRole, SearchNode};
use crate::algorithms::directions::DirectionSet;
use crate::config::{ConfigError, CostUpdate, SearchConfig};
use crate::grid::{CellType, Coordinate};
use crate::pacing::{CancellationToken, Pacer, ThreadPacer};
use crate::statistics::SearchStats;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchState {
    Idle,
    Running,
    Succeeded,
    Exhausted,
    Cancelled,
}

/// Why a search ended without a path. None of these are failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exhaustion {
    MissingOrigin,
    MissingDestination,
    NoPath,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FoundPath {
    /// Every cell from origin to destination, both included.
    pub cells: Vec<Coordinate>,
    /// Step count recorded on the node that reached the destination.
    pub steps: u32,
    pub total_cost: f64,
}

impl FoundPath {
    /// Cells strictly between origin and destination.
    pub fn intermediate_cells(&self) -> &[Coordinate] {
        match self.cells.len() {
            0..=2 => &[],
            len => &self.cells[1..len - 1],
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    Succeeded(FoundPath),
    Exhausted(Exhaustion),
    Cancelled,
}

impl SearchOutcome {
    pub fn state(&self) -> SearchState {
        match self {
            SearchOutcome::Succeeded(_) => SearchState::Succeeded,
            SearchOutcome::Exhausted(_) => SearchState::Exhausted,
            SearchOutcome::Cancelled => SearchState::Cancelled,
        }
    }

    pub fn path(&self) -> Option<&FoundPath> {
        match self {
            SearchOutcome::Succeeded(path) => Some(path),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchReport {
    pub outcome: SearchOutcome,
    pub stats: SearchStats,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Frontier,
    Visited,
}

/// Search engine bound to one grid.
///
/// The grid answers cell queries and receives the visual signals; the pacer
/// is invoked at every suspension point of an animated search. Runs borrow
/// the engine mutably, so only one search can be in flight per grid.
pub struct SearchEngine<G, P = ThreadPacer> {
    grid: G,
    pacer: P,
    cancellation: CancellationToken,
    state: SearchState,
}

impl<G> SearchEngine<G> {
    pub fn new(grid: G) -> Self {
        SearchEngine {
            grid,
            pacer: ThreadPacer,
            cancellation: CancellationToken::new(),
            state: SearchState::Idle,
        }
    }
}

impl<G, P> SearchEngine<G, P> {
    pub fn with_pacer<Q>(self, pacer: Q) -> SearchEngine<G, Q> {
        SearchEngine {
            grid: self.grid,
            pacer,
            cancellation: self.cancellation,
            state: self.state,
        }
    }

    pub fn grid(&self) -> &G {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut G {
        &mut self.grid
    }

    pub fn into_grid(self) -> G {
        self.grid
    }

    pub fn state(&self) -> SearchState {
        self.state
    }

    /// Handle that stops the current (or next) run at its next check.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancellation.clone()
    }
}

impl<G, P> SearchEngine<G, P>
where
    G: GridQuery + SearchObserver,
    P: Pacer<G>,
{
    /// Runs a whole search, pausing between iterations when animated.
    pub fn find_best_path(&mut self, config: &SearchConfig) -> Result<SearchReport, ConfigError> {
        let mut run = self.start(config)?;
        loop {
            if let Some(report) = run.step() {
                return Ok(report);
            }
        }
    }

    /// Prepares a run that the caller advances with [`SearchRun::step`].
    ///
    /// Clears any cancellation left over from a previous run.
    pub fn start(&mut self, config: &SearchConfig) -> Result<SearchRun<'_, G, P>, ConfigError> {
        config.validate()?;
        self.cancellation.reset();
        self.state = SearchState::Running;
        Ok(SearchRun::new(self, config.clone()))
    }
}

/// One search in progress.
pub struct SearchRun<'e, G, P> {
    engine: &'e mut SearchEngine<G, P>,
    config: SearchConfig,
    directions: DirectionSet,
    destination: Option<Coordinate>,
    nodes: Vec<SearchNode>,
    frontier: Vec<NodeId>,
    visited: Vec<NodeId>,
    index: FxHashMap<Coordinate, (NodeId, Slot)>,
    stats: SearchStats,
    started: Instant,
    report: Option<SearchReport>,
}

impl<'e, G, P> SearchRun<'e, G, P>
where
    G: GridQuery + SearchObserver,
    P: Pacer<G>,
{
    fn new(engine: &'e mut SearchEngine<G, P>, config: SearchConfig) -> Self {
        let origin = engine.grid.origin();
        let destination = engine.grid.destination();

        let mut run = SearchRun {
            engine,
            directions: DirectionSet::new(config.include_diagonal_directions),
            config,
            destination,
            nodes: Vec::new(),
            frontier: Vec::new(),
            visited: Vec::new(),
            index: FxHashMap::default(),
            stats: SearchStats::default(),
            started: Instant::now(),
            report: None,
        };

        match (origin, destination) {
            (None, _) => {
                run.finish(SearchOutcome::Exhausted(Exhaustion::MissingOrigin));
            }
            (_, None) => {
                run.finish(SearchOutcome::Exhausted(Exhaustion::MissingDestination));
            }
            (Some(origin), Some(destination)) => {
                info!(
                    "searching from {} to {} ({} directions)",
                    origin,
                    destination,
                    run.directions.len()
                );
                let root = SearchNode::root(origin, destination);
                run.insert_frontier(root);
            }
        }

        run
    }

    /// Performs one outer iteration. Returns the report once the run is
    /// over; further calls keep returning the same report.
    pub fn step(&mut self) -> Option<SearchReport> {
        if let Some(report) = &self.report {
            return Some(report.clone());
        }

        if self.frontier.is_empty() {
            return Some(self.finish(SearchOutcome::Exhausted(Exhaustion::NoPath)));
        }

        if self.config.animate {
            self.pause();
        }
        if self.engine.cancellation.is_cancelled() {
            return Some(self.finish(SearchOutcome::Cancelled));
        }

        let position = self.select_best()?;
        let selected = self.frontier[position];
        self.stats.iterations += 1;

        let node = self.nodes[selected.0];
        debug!(
            "selected {} (cost {:.3}, steps {}, frontier {})",
            node.coordinate,
            node.total_cost,
            node.steps_from_origin,
            self.frontier.len()
        );

        if node.reached_destination() {
            let outcome = self.succeed(selected);
            return Some(self.finish(outcome));
        }

        self.frontier.remove(position);
        self.visited.push(selected);
        self.index.insert(node.coordinate, (selected, Slot::Visited));

        self.expand(selected);
        self.stats.frontier_peak = self.stats.frontier_peak.max(self.frontier.len());

        None
    }

    pub fn cancellation_token(&self) -> CancellationToken {
        self.engine.cancellation.clone()
    }

    pub fn is_finished(&self) -> bool {
        self.report.is_some()
    }

    /// Frontier nodes in their current iteration order.
    pub fn frontier(&self) -> impl Iterator<Item = &SearchNode> + '_ {
        self.frontier.iter().map(|id| &self.nodes[id.0])
    }

    /// Visited nodes in expansion order.
    pub fn visited(&self) -> impl Iterator<Item = &SearchNode> + '_ {
        self.visited.iter().map(|id| &self.nodes[id.0])
    }

    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    fn pause(&mut self) {
        let duration = self.config.animation_duration();
        let engine = &mut *self.engine;
        engine.pacer.pause(&engine.grid, duration);
    }

    /// Position of the first frontier node with the lowest total cost.
    fn select_best(&self) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for (position, id) in self.frontier.iter().enumerate() {
            let cost = self.nodes[id.0].total_cost;
            match best {
                Some((_, best_cost)) if cost >= best_cost => {}
                _ => best = Some((position, cost)),
            }
        }
        best.map(|(position, _)| position)
    }

    fn is_traversable(&self, coordinate: Coordinate) -> bool {
        let grid = &self.engine.grid;
        if !grid.contains(coordinate) {
            return false;
        }
        matches!(
            grid.cell_type(coordinate),
            Some(CellType::Passable | CellType::Destination)
        )
    }

    fn expand(&mut self, selected: NodeId) {
        let Some(destination) = self.destination else {
            return;
        };
        let parent = self.nodes[selected.0];

        let mut candidates = Vec::with_capacity(self.directions.len());
        for coordinate in self.directions.neighbors(parent.coordinate) {
            if !self.is_traversable(coordinate) {
                trace!("skipping blocked cell {}", coordinate);
                continue;
            }
            if matches!(self.index.get(&coordinate), Some((_, Slot::Visited))) {
                trace!("skipping visited cell {}", coordinate);
                continue;
            }

            let child = SearchNode::child(selected, &parent, coordinate, destination);
            self.stats.validated += 1;
            if self.config.show_validated_cells {
                self.engine.grid.on_cell_validated(
                    child.coordinate,
                    child.steps_from_origin,
                    child.distance_to_destination,
                    child.total_cost,
                );
            }
            candidates.push(child);
        }

        for child in candidates {
            self.merge(child);
        }
    }

    fn merge(&mut self, child: SearchNode) {
        match self.index.get(&child.coordinate).copied() {
            None => self.insert_frontier(child),
            Some((id, Slot::Frontier)) => {
                let existing = &mut self.nodes[id.0];
                if child.total_cost < existing.total_cost {
                    trace!(
                        "cheaper route to {}: {:.3} -> {:.3}",
                        child.coordinate,
                        existing.total_cost,
                        child.total_cost
                    );
                    existing.total_cost = child.total_cost;
                    if self.config.cost_update == CostUpdate::CostAndLineage {
                        existing.parent = child.parent;
                        existing.steps_from_origin = child.steps_from_origin;
                    }
                }
            }
            Some((_, Slot::Visited)) => {}
        }
    }

    fn insert_frontier(&mut self, node: SearchNode) {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        self.frontier.push(id);
        self.index.insert(node.coordinate, (id, Slot::Frontier));
    }

    fn succeed(&mut self, selected: NodeId) -> SearchOutcome {
        if self.config.show_explored_cells {
            for id in self.visited.iter().chain(iter::once(&selected)) {
                let node = &self.nodes[id.0];
                if node.role == NodeRole::Intermediate {
                    self.engine.grid.on_cell_explored(node.coordinate);
                    self.stats.explored_signals += 1;
                }
            }
        }

        let mut chain = Vec::new();
        let mut cursor = Some(selected);
        while let Some(id) = cursor {
            chain.push(id);
            cursor = self.nodes[id.0].parent;
        }

        for &id in &chain {
            if self.config.animate {
                self.pause();
                if self.engine.cancellation.is_cancelled() {
                    return SearchOutcome::Cancelled;
                }
            }
            let node = self.nodes[id.0];
            if node.role == NodeRole::Intermediate {
                self.engine.grid.on_path_cell(node.coordinate);
                self.stats.path_signals += 1;
            }
        }

        let goal = self.nodes[selected.0];
        SearchOutcome::Succeeded(FoundPath {
            cells: chain
                .iter()
                .rev()
                .map(|id| self.nodes[id.0].coordinate)
                .collect(),
            steps: goal.steps_from_origin,
            total_cost: goal.total_cost,
        })
    }

    fn finish(&mut self, outcome: SearchOutcome) -> SearchReport {
        self.stats.expanded = self.visited.len();
        self.stats.elapsed = self.started.elapsed();
        self.engine.state = outcome.state();

        match &outcome {
            SearchOutcome::Succeeded(path) => info!(
                "path found: {} steps after {} iterations",
                path.steps, self.stats.iterations
            ),
            SearchOutcome::Exhausted(reason) => info!("search exhausted: {:?}", reason),
            SearchOutcome::Cancelled => warn!(
                "search cancelled after {} iterations",
                self.stats.iterations
            ),
        }

        let report = SearchReport {
            outcome,
            stats: self.stats.clone(),
        };
        self.report = Some(report.clone());
        report
    }
}

impl<G, P> Drop for SearchRun<'_, G, P> {
    fn drop(&mut self) {
        if self.report.is_none() {
            self.engine.state = SearchState::Cancelled;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Grid;
    use crate::pacing::NoPacer;

    fn engine(layout: &str) -> SearchEngine<Grid, NoPacer> {
        SearchEngine::new(layout.parse::<Grid>().unwrap()).with_pacer(NoPacer)
    }

    #[test]
    fn selection_takes_the_first_minimum() {
        let mut engine = engine("S..\n...\n..G");
        let mut run = engine.start(&SearchConfig::default()).unwrap();
        assert!(run.step().is_none());

        // Origin (0,0) expanded: south (1,0) then east (0,1), both cost 1 + sqrt(5).
        let frontier: Vec<_> = run.frontier().map(|node| node.coordinate).collect();
        assert_eq!(frontier, vec![Coordinate::new(1, 0), Coordinate::new(0, 1)]);
        assert_eq!(run.select_best(), Some(0));
    }

    #[test]
    fn expanded_nodes_leave_the_frontier() {
        let mut engine = engine("S.G");
        let mut run = engine.start(&SearchConfig::default()).unwrap();
        assert!(run.step().is_none());

        let visited: Vec<_> = run.visited().map(|node| node.coordinate).collect();
        assert_eq!(visited, vec![Coordinate::new(0, 0)]);
        assert!(run.frontier().all(|node| node.coordinate != Coordinate::new(0, 0)));
    }

    #[test]
    fn cost_only_policy_keeps_lineage() {
        let destination = Coordinate::new(0, 5);
        let root = SearchNode::root(Coordinate::new(0, 0), destination);
        let mut engine = engine("S....G");
        let mut run = engine.start(&SearchConfig::default()).unwrap();

        let far = SearchNode {
            steps_from_origin: 4,
            total_cost: 8.0,
            parent: Some(NodeId(0)),
            ..SearchNode::child(NodeId(0), &root, Coordinate::new(0, 1), destination)
        };
        let near = SearchNode {
            steps_from_origin: 1,
            total_cost: 5.0,
            parent: None,
            ..far
        };
        run.frontier.clear();
        run.index.clear();
        run.insert_frontier(far);
        run.merge(near);

        let patched = run.frontier().next().unwrap();
        assert_eq!(patched.total_cost, 5.0);
        assert_eq!(patched.steps_from_origin, 4);
        assert_eq!(patched.parent, Some(NodeId(0)));
    }

    #[test]
    fn lineage_policy_reparents() {
        let destination = Coordinate::new(0, 5);
        let root = SearchNode::root(Coordinate::new(0, 0), destination);
        let mut engine = engine("S....G");
        let config = SearchConfig {
            cost_update: CostUpdate::CostAndLineage,
            ..SearchConfig::default()
        };
        let mut run = engine.start(&config).unwrap();

        let far = SearchNode {
            steps_from_origin: 4,
            total_cost: 8.0,
            ..SearchNode::child(NodeId(0), &root, Coordinate::new(0, 1), destination)
        };
        let near = SearchNode {
            steps_from_origin: 1,
            total_cost: 5.0,
            parent: None,
            ..far
        };
        run.frontier.clear();
        run.index.clear();
        run.insert_frontier(far);
        run.merge(near);

        let patched = run.frontier().next().unwrap();
        assert_eq!(patched.total_cost, 5.0);
        assert_eq!(patched.steps_from_origin, 1);
        assert_eq!(patched.parent, None);
    }

    #[test]
    fn costlier_rediscovery_is_ignored() {
        let destination = Coordinate::new(0, 5);
        let root = SearchNode::root(Coordinate::new(0, 0), destination);
        let mut engine = engine("S....G");
        let mut run = engine.start(&SearchConfig::default()).unwrap();

        let node = SearchNode::child(NodeId(0), &root, Coordinate::new(0, 1), destination);
        let worse = SearchNode {
            total_cost: node.total_cost + 1.0,
            ..node
        };
        run.frontier.clear();
        run.index.clear();
        run.insert_frontier(node);
        run.merge(worse);

        assert_eq!(run.frontier().count(), 1);
        assert_eq!(run.frontier().next().unwrap().total_cost, node.total_cost);
    }

    #[test]
    fn dropping_an_unfinished_run_marks_cancelled() {
        let mut engine = engine("S...G");
        {
            let mut run = engine.start(&SearchConfig::default()).unwrap();
            run.step();
        }
        assert_eq!(engine.state(), SearchState::Cancelled);
    }

    #[test]
    fn finished_run_repeats_its_report() {
        let mut engine = engine("SG");
        let mut run = engine.start(&SearchConfig::default()).unwrap();
        let first = loop {
            if let Some(report) = run.step() {
                break report;
            }
        };
        assert!(run.is_finished());
        assert_eq!(run.step(), Some(first));
    }
}
