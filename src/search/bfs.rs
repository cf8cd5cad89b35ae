use grid_util::point::Point;
use std::collections::VecDeque;

use super::state::PendingSet;
use super::{FrontierEntry, FrontierPolicy, Search, SearchState};
use crate::Strategy;

/// FIFO frontier. Nodes are expanded in non-decreasing depth, so the first
/// expansion of the goal yields a path with the fewest edges.
#[derive(Clone, Debug, Default)]
pub struct BfsFrontier {
    queue: VecDeque<FrontierEntry>,
    pending: PendingSet,
}

pub type BfsSearch = Search<BfsFrontier>;

impl FrontierPolicy for BfsFrontier {
    const STRATEGY: Strategy = Strategy::Bfs;

    fn seed(&mut self, state: &SearchState) {
        let start = state.start();
        self.pending.insert(start);
        self.queue.push_back(FrontierEntry {
            node: start,
            priority: 0,
            g: 0,
            parent: None,
        });
    }

    fn pop_live(&mut self, state: &SearchState) -> Option<FrontierEntry> {
        while let Some(entry) = self.queue.pop_front() {
            self.pending.remove(&entry.node);
            if !state.is_explored(&entry.node) {
                return Some(entry);
            }
        }
        None
    }

    fn expand(
        &mut self,
        state: &mut SearchState,
        entry: &FrontierEntry,
        neighbours: &[Point],
    ) -> usize {
        let mut deepest = 0;
        for (node, depth) in self.pending.admit(state, &entry.node, neighbours) {
            deepest = deepest.max(depth);
            self.queue.push_back(FrontierEntry {
                node,
                priority: 0,
                g: entry.g + 1,
                parent: Some(entry.node),
            });
        }
        deepest
    }

    fn len(&self) -> usize {
        self.queue.len()
    }

    fn nodes(&self) -> Vec<Point> {
        self.queue.iter().map(|e| e.node).collect()
    }
}
