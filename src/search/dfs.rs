use grid_util::point::Point;

use super::state::PendingSet;
use super::{FrontierEntry, FrontierPolicy, Search, SearchState};
use crate::Strategy;

/// LIFO frontier. Admitted neighbours are pushed in reverse enumeration order
/// so the search descends into the first enumerated one (up) first. A node is
/// never pushed while it is pending or explored, which bounds the stack by the
/// number of cells. Paths are not optimal.
#[derive(Clone, Debug, Default)]
pub struct DfsFrontier {
    stack: Vec<FrontierEntry>,
    pending: PendingSet,
}

pub type DfsSearch = Search<DfsFrontier>;

impl FrontierPolicy for DfsFrontier {
    const STRATEGY: Strategy = Strategy::Dfs;

    fn seed(&mut self, state: &SearchState) {
        let start = state.start();
        self.pending.insert(start);
        self.stack.push(FrontierEntry {
            node: start,
            priority: 0,
            g: 0,
            parent: None,
        });
    }

    fn pop_live(&mut self, state: &SearchState) -> Option<FrontierEntry> {
        while let Some(entry) = self.stack.pop() {
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
        let admitted = self.pending.admit(state, &entry.node, neighbours);
        let deepest = admitted.iter().map(|&(_, depth)| depth).max().unwrap_or(0);
        self.stack
            .extend(admitted.into_iter().rev().map(|(node, _)| FrontierEntry {
                node,
                priority: 0,
                g: entry.g + 1,
                parent: Some(entry.node),
            }));
        deepest
    }

    fn len(&self) -> usize {
        self.stack.len()
    }

    fn nodes(&self) -> Vec<Point> {
        self.stack.iter().map(|e| e.node).collect()
    }
}
