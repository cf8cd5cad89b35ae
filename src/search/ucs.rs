use fxhash::FxHashMap;
use grid_util::point::Point;
use std::marker::PhantomData;

use super::queue::PriorityQueue;
use super::{FrontierEntry, FrontierPolicy, Search, SearchState};
use crate::Strategy;

/// Selection key of a cost-tracking frontier, computed from the accumulated
/// cost of an entry and its node.
pub trait CostRank {
    const STRATEGY: Strategy;

    fn rank(g: usize, node: &Point, goal: &Point) -> usize;
}

/// Ranks entries by accumulated cost alone.
#[derive(Clone, Copy, Debug, Default)]
pub struct ByCost;

impl CostRank for ByCost {
    const STRATEGY: Strategy = Strategy::Ucs;

    fn rank(g: usize, _: &Point, _: &Point) -> usize {
        g
    }
}

/// Frontier that keeps the lowest known cost per node and uses lazy deletion:
/// when a cheaper path to a pending node is found a new entry is pushed and
/// the old one stays in the heap until it is popped and discarded as stale.
/// Stale entries count towards the frontier size.
#[derive(Clone, Debug)]
pub struct CostFrontier<R> {
    queue: PriorityQueue,
    best: FxHashMap<Point, usize>,
    rank: PhantomData<R>,
}

impl<R> Default for CostFrontier<R> {
    fn default() -> Self {
        CostFrontier {
            queue: PriorityQueue::default(),
            best: FxHashMap::default(),
            rank: PhantomData,
        }
    }
}

impl<R> CostFrontier<R> {
    /// Lowest accumulated cost known for `node`.
    pub fn best_cost(&self, node: &Point) -> Option<usize> {
        self.best.get(node).copied()
    }

    fn is_stale(&self, entry: &FrontierEntry, state: &SearchState) -> bool {
        self.best_cost(&entry.node) != Some(entry.g) || state.is_explored(&entry.node)
    }
}

pub type UcsFrontier = CostFrontier<ByCost>;
pub type UcsSearch = Search<UcsFrontier>;

impl<R: CostRank> FrontierPolicy for CostFrontier<R> {
    const STRATEGY: Strategy = R::STRATEGY;

    fn seed(&mut self, state: &SearchState) {
        let start = state.start();
        self.best.insert(start, 0);
        self.queue.push(FrontierEntry {
            node: start,
            priority: R::rank(0, &start, &state.goal()),
            g: 0,
            parent: None,
        });
    }

    fn pop_live(&mut self, state: &SearchState) -> Option<FrontierEntry> {
        while let Some(entry) = self.queue.pop() {
            if !self.is_stale(&entry, state) {
                return Some(entry);
            }
        }
        None
    }

    /// Only a strictly cheaper path rewrites the cost, predecessor and depth of a
    /// neighbour; equal costs keep the first discovery.
    fn expand(
        &mut self,
        state: &mut SearchState,
        entry: &FrontierEntry,
        neighbours: &[Point],
    ) -> usize {
        let goal = state.goal();
        let mut deepest = 0;
        for &node in neighbours {
            if state.is_explored(&node) {
                continue;
            }
            let tentative = entry.g + 1;
            if self.best_cost(&node).is_some_and(|best| best <= tentative) {
                continue;
            }
            self.best.insert(node, tentative);
            deepest = deepest.max(state.discover(node, &entry.node));
            self.queue.push(FrontierEntry {
                node,
                priority: R::rank(tentative, &node, &goal),
                g: tentative,
                parent: Some(entry.node),
            });
        }
        deepest
    }

    fn len(&self) -> usize {
        self.queue.len()
    }

    fn nodes(&self) -> Vec<Point> {
        self.queue.nodes()
    }
}
