use fxhash::{FxBuildHasher, FxHashMap, FxHashSet};
use grid_util::point::Point;
use indexmap::{IndexMap, IndexSet};
use smallvec::SmallVec;
use std::iter;
use std::sync::Arc;

use super::FrontierEntry;
use crate::grid::OccupancyGrid;
use crate::metrics::SearchMetrics;

type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;
type FxIndexSet<K> = IndexSet<K, FxBuildHasher>;

/// Parent index stored for the start node.
const NO_PARENT: usize = usize::MAX;

/// Bookkeeping shared by all strategies: explored set, predecessors, depths,
/// the result and the metric counters.
///
/// Predecessors are kept in an insertion-ordered map that stores the index of
/// the parent entry, so reconstructing a path only chases indices.
#[derive(Clone, Debug)]
pub struct SearchState {
    grid: Option<Arc<OccupancyGrid>>,
    start: Point,
    goal: Point,
    explored: FxIndexSet<Point>,
    parents: FxIndexMap<Point, usize>,
    depths: FxHashMap<Point, usize>,
    done: bool,
    cost: usize,
    path: Vec<Point>,
    metrics: SearchMetrics,
}

impl Default for SearchState {
    /// A state that was never reset: done, without a result.
    fn default() -> Self {
        SearchState {
            grid: None,
            start: Point::new(0, 0),
            goal: Point::new(0, 0),
            explored: FxIndexSet::default(),
            parents: FxIndexMap::default(),
            depths: FxHashMap::default(),
            done: true,
            cost: 0,
            path: Vec::new(),
            metrics: SearchMetrics::default(),
        }
    }
}

impl SearchState {
    pub(crate) fn new(grid: Arc<OccupancyGrid>, start: Point, goal: Point) -> SearchState {
        let mut state = SearchState {
            grid: Some(grid),
            start,
            goal,
            done: false,
            ..SearchState::default()
        };
        state.parents.insert(start, NO_PARENT);
        state.depths.insert(start, 0);
        state
    }

    pub fn start(&self) -> Point {
        self.start
    }
    pub fn goal(&self) -> Point {
        self.goal
    }
    pub fn is_done(&self) -> bool {
        self.done
    }
    pub fn cost(&self) -> usize {
        self.cost
    }
    pub fn path(&self) -> &[Point] {
        &self.path
    }
    pub fn metrics(&self) -> SearchMetrics {
        self.metrics
    }
    pub fn is_explored(&self, node: &Point) -> bool {
        self.explored.contains(node)
    }
    pub fn explored_len(&self) -> usize {
        self.explored.len()
    }
    pub fn explored(&self) -> Vec<Point> {
        self.explored.iter().copied().collect()
    }
    /// Discovery depth of `node`, if it has been discovered.
    pub fn depth(&self, node: &Point) -> Option<usize> {
        self.depths.get(node).copied()
    }
    /// The node `node` was (last) discovered from, [None] for the start and
    /// undiscovered nodes.
    pub fn parent(&self, node: &Point) -> Option<Point> {
        let parent_ix = *self.parents.get(node)?;
        self.parents.get_index(parent_ix).map(|(parent, _)| *parent)
    }

    pub(crate) fn neighbours(&self, node: &Point) -> SmallVec<[Point; 4]> {
        self.grid
            .as_ref()
            .map(|grid| grid.neighbours(node))
            .unwrap_or_default()
    }

    pub(crate) fn mark_explored(&mut self, node: Point) {
        self.explored.insert(node);
    }

    /// Records that `node` was reached from `parent`, overwriting an earlier
    /// discovery, and returns its new depth.
    pub(crate) fn discover(&mut self, node: Point, parent: &Point) -> usize {
        let parent_ix = self.parents.get_index_of(parent).unwrap_or(NO_PARENT);
        let depth = self.depths.get(parent).map_or(0, |d| d + 1);
        self.parents.insert(node, parent_ix);
        self.depths.insert(node, depth);
        depth
    }

    pub(crate) fn finish_solved(&mut self, entry: &FrontierEntry) {
        self.path = self.reconstruct_path(&entry.node);
        self.cost = entry.g;
        self.done = true;
    }

    pub(crate) fn finish_unsolved(&mut self) {
        self.path.clear();
        self.cost = 0;
        self.done = true;
    }

    pub(crate) fn update_metrics(&mut self, frontier_len: usize, deepest: usize) {
        self.metrics
            .update(frontier_len, self.explored.len(), deepest);
    }

    /// Follows parent indices from `end` back to the start and reverses the result.
    fn reconstruct_path(&self, end: &Point) -> Vec<Point> {
        let first = self
            .parents
            .get_full(end)
            .map(|(_, node, &parent)| (*node, parent));
        let mut path = iter::successors(first, |&(_, parent_ix)| {
            self.parents
                .get_index(parent_ix)
                .map(|(node, &parent)| (*node, parent))
        })
        .map(|(node, _)| node)
        .collect::<Vec<_>>();
        path.reverse();
        path
    }
}

/// Membership set of pending nodes for strategies that never queue a node twice.
#[derive(Clone, Debug, Default)]
pub(crate) struct PendingSet {
    pending: FxHashSet<Point>,
}

impl PendingSet {
    pub(crate) fn insert(&mut self, node: Point) {
        self.pending.insert(node);
    }

    pub(crate) fn remove(&mut self, node: &Point) {
        self.pending.remove(node);
    }

    /// Discovers every neighbour that is neither explored nor pending, marks it
    /// pending and returns it with its depth, keeping the enumeration order.
    pub(crate) fn admit(
        &mut self,
        state: &mut SearchState,
        parent: &Point,
        neighbours: &[Point],
    ) -> SmallVec<[(Point, usize); 4]> {
        let mut admitted = SmallVec::new();
        for &neighbour in neighbours {
            if state.is_explored(&neighbour) || self.pending.contains(&neighbour) {
                continue;
            }
            let depth = state.discover(neighbour, parent);
            self.pending.insert(neighbour);
            admitted.push((neighbour, depth));
        }
        admitted
    }
}
