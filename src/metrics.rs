/// Counters reported by every search strategy. All of them only ever grow
/// between two resets.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchMetrics {
    /// Number of distinct nodes in the explored set.
    pub expanded: usize,
    /// Largest discovery depth (edges from the start) seen so far.
    pub max_depth: usize,
    /// Largest frontier length observed at the end of a step, stale entries included.
    pub max_frontier_size: usize,
    /// Largest `frontier + explored` total observed at the end of a step.
    pub max_memory_usage: usize,
}

impl SearchMetrics {
    /// Folds the sizes observed at the end of a step into the counters.
    pub fn update(&mut self, frontier_len: usize, explored_len: usize, deepest: usize) {
        self.expanded = self.expanded.max(explored_len);
        self.max_depth = self.max_depth.max(deepest);
        self.max_frontier_size = self.max_frontier_size.max(frontier_len);
        self.max_memory_usage = self.max_memory_usage.max(frontier_len + explored_len);
    }
}
