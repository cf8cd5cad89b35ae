use grid_util::point::Point;

use super::queue::PriorityQueue;
use super::state::PendingSet;
use super::{manhattan, FrontierEntry, FrontierPolicy, Search, SearchState};
use crate::Strategy;

/// Greedy best-first frontier: always expands the pending node closest to the
/// goal by Manhattan distance, first inserted among ties. The accumulated cost
/// is tracked for reporting only. Paths are not optimal.
#[derive(Clone, Debug, Default)]
pub struct GbfsFrontier {
    queue: PriorityQueue,
    pending: PendingSet,
}

pub type GbfsSearch = Search<GbfsFrontier>;

impl FrontierPolicy for GbfsFrontier {
    const STRATEGY: Strategy = Strategy::Gbfs;

    fn seed(&mut self, state: &SearchState) {
        let start = state.start();
        self.pending.insert(start);
        self.queue.push(FrontierEntry {
            node: start,
            priority: manhattan(&start, &state.goal()),
            g: 0,
            parent: None,
        });
    }

    fn pop_live(&mut self, state: &SearchState) -> Option<FrontierEntry> {
        while let Some(entry) = self.queue.pop() {
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
        let goal = state.goal();
        let mut deepest = 0;
        for (node, depth) in self.pending.admit(state, &entry.node, neighbours) {
            deepest = deepest.max(depth);
            self.queue.push(FrontierEntry {
                node,
                priority: manhattan(&node, &goal),
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
        self.queue.nodes()
    }
}
