//! Stepwise search strategies sharing one lifecycle.
//!
//! Every strategy is a [Search] parameterized by a [FrontierPolicy], which
//! decides how pending nodes are stored, which one is expanded next, which
//! entries are stale and which neighbours are admitted. Neighbour generation,
//! bookkeeping, path reconstruction and metrics are shared.
use grid_util::point::Point;
use log::{debug, info, trace};
use std::sync::Arc;

use crate::error::ConfigError;
use crate::grid::OccupancyGrid;
use crate::metrics::SearchMetrics;
use crate::Strategy;

pub mod astar;
pub mod bfs;
pub mod dfs;
pub mod gbfs;
mod queue;
mod state;
pub mod ucs;

pub use state::SearchState;

/// Manhattan distance, the heuristic used by greedy best-first search and A*.
pub fn manhattan(p1: &Point, p2: &Point) -> usize {
    p1.manhattan_distance(p2) as usize
}

/// A pending node together with the cost of the path it was discovered by.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrontierEntry {
    pub node: Point,
    /// Selection key for prioritized frontiers, 0 for FIFO and LIFO ones.
    pub priority: usize,
    /// Accumulated cost from the start.
    pub g: usize,
    pub parent: Option<Point>,
}

/// The lifecycle shared by every strategy: reset once, step until done, then
/// read the results.
pub trait SearchAlgorithm {
    fn strategy(&self) -> Strategy;

    /// Clears all search state and seeds the frontier with `start`. Both
    /// coordinates must lie on passable cells of `grid`.
    fn reset(
        &mut self,
        grid: Arc<OccupancyGrid>,
        start: Point,
        goal: Point,
    ) -> Result<(), ConfigError>;

    /// Pops one live frontier entry and expands it. Does nothing once done.
    fn step(&mut self);

    fn is_done(&self) -> bool;

    /// Cost of the found path, 0 if there is none (yet).
    fn cost(&self) -> usize;

    /// Nodes from start to goal inclusive, empty if there is no path (yet).
    fn path(&self) -> &[Point];

    /// Snapshot of the pending nodes, stale entries included. The order carries
    /// no meaning.
    fn frontier(&self) -> Vec<Point>;

    /// Snapshot of the explored set in expansion order.
    fn explored(&self) -> Vec<Point>;

    fn metrics(&self) -> SearchMetrics;

    /// Resets using the start and goal markers of `grid`.
    fn reset_from_markers(&mut self, grid: Arc<OccupancyGrid>) -> Result<(), ConfigError> {
        let (start, goal) = (grid.start(), grid.goal());
        self.reset(grid, start, goal)
    }
    fn number_of_expanded(&self) -> usize {
        self.metrics().expanded
    }
    fn max_depth(&self) -> usize {
        self.metrics().max_depth
    }
    fn max_frontier_size(&self) -> usize {
        self.metrics().max_frontier_size
    }
    fn max_memory_usage(&self) -> usize {
        self.metrics().max_memory_usage
    }
}

/// Storage and ordering rules of one strategy's frontier.
pub trait FrontierPolicy: Default {
    const STRATEGY: Strategy;

    /// Seeds a fresh frontier with the start node.
    fn seed(&mut self, state: &SearchState);

    /// Removes and returns the next entry to expand, silently discarding stale
    /// entries. [None] means the frontier is exhausted.
    fn pop_live(&mut self, state: &SearchState) -> Option<FrontierEntry>;

    /// Admits the passable `neighbours` of the just expanded `entry` and
    /// returns the largest depth recorded for any of them, 0 if none was admitted.
    fn expand(&mut self, state: &mut SearchState, entry: &FrontierEntry, neighbours: &[Point])
        -> usize;

    /// Number of entries held, stale ones included.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn nodes(&self) -> Vec<Point>;
}

/// A stepwise search driven by the frontier policy `P`.
#[derive(Clone, Debug)]
pub struct Search<P> {
    state: SearchState,
    frontier: P,
}

impl<P: FrontierPolicy> Default for Search<P> {
    fn default() -> Self {
        Search {
            state: SearchState::default(),
            frontier: P::default(),
        }
    }
}

impl<P: FrontierPolicy> Search<P> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    fn update_metrics(&mut self, deepest: usize) {
        let frontier_len = self.frontier.len();
        self.state.update_metrics(frontier_len, deepest);
    }
}

impl<P: FrontierPolicy> SearchAlgorithm for Search<P> {
    fn strategy(&self) -> Strategy {
        P::STRATEGY
    }

    fn reset(
        &mut self,
        grid: Arc<OccupancyGrid>,
        start: Point,
        goal: Point,
    ) -> Result<(), ConfigError> {
        for point in [start, goal] {
            if !grid.in_bounds(point) {
                return Err(ConfigError::OutOfBounds(point));
            }
            if !grid.can_move_to(point) {
                return Err(ConfigError::Blocked(point));
            }
        }
        debug!("{}: searching from {} to {}", P::STRATEGY, start, goal);
        self.state = SearchState::new(grid, start, goal);
        self.frontier = P::default();
        self.frontier.seed(&self.state);
        Ok(())
    }

    fn step(&mut self) {
        if self.state.is_done() {
            return;
        }
        let Some(entry) = self.frontier.pop_live(&self.state) else {
            info!("{}: frontier exhausted, no path", P::STRATEGY);
            self.state.finish_unsolved();
            self.update_metrics(0);
            return;
        };
        trace!("{}: expanding {} (g = {})", P::STRATEGY, entry.node, entry.g);
        self.state.mark_explored(entry.node);

        if entry.node == self.state.goal() {
            self.state.finish_solved(&entry);
            info!(
                "{}: goal reached with cost {} after {} expansions",
                P::STRATEGY,
                entry.g,
                self.state.explored_len()
            );
            self.update_metrics(0);
            return;
        }

        let neighbours = self.state.neighbours(&entry.node);
        let deepest = self.frontier.expand(&mut self.state, &entry, &neighbours);
        self.update_metrics(deepest);
    }

    fn is_done(&self) -> bool {
        self.state.is_done()
    }

    fn cost(&self) -> usize {
        self.state.cost()
    }

    fn path(&self) -> &[Point] {
        self.state.path()
    }

    fn frontier(&self) -> Vec<Point> {
        self.frontier.nodes()
    }

    fn explored(&self) -> Vec<Point> {
        self.state.explored()
    }

    fn metrics(&self) -> SearchMetrics {
        self.state.metrics()
    }
}
