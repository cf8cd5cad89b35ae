use core::fmt;
use log::{info, warn};
use std::sync::Arc;

use crate::error::SearchError;
use crate::grid::OccupancyGrid;
use crate::metrics::SearchMetrics;
use crate::search::SearchAlgorithm;
use crate::{Searcher, Strategy};

/// Steps `search` until it is done. Fails if it is still running after
/// `max_steps` steps, which only happens when a strategy breaks the contract.
/// Returns the number of steps taken.
pub fn run_to_completion<S: SearchAlgorithm + ?Sized>(
    search: &mut S,
    max_steps: usize,
) -> Result<usize, SearchError> {
    let mut steps = 0;
    while !search.is_done() {
        if steps == max_steps {
            warn!(
                "{} did not terminate within {} steps",
                search.strategy(),
                max_steps
            );
            return Err(SearchError::DidNotTerminate { steps });
        }
        search.step();
        steps += 1;
    }
    Ok(steps)
}

/// Outcome of a complete headless run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchReport {
    pub strategy: Strategy,
    pub maze: String,
    pub cost: usize,
    pub path_len: usize,
    pub steps: usize,
    pub metrics: SearchMetrics,
}

impl SearchReport {
    pub fn from_search<S: SearchAlgorithm + ?Sized>(
        search: &S,
        maze: impl Into<String>,
        steps: usize,
    ) -> SearchReport {
        SearchReport {
            strategy: search.strategy(),
            maze: maze.into(),
            cost: search.cost(),
            path_len: search.path().len(),
            steps,
            metrics: search.metrics(),
        }
    }
}

/// Prints `key=value` lines in the order of the headless report.
impl fmt::Display for SearchReport {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "algo={} maze={}", self.strategy, self.maze)?;
        writeln!(f, "cost={}", self.cost)?;
        writeln!(f, "expanded={}", self.metrics.expanded)?;
        writeln!(f, "max_depth={}", self.metrics.max_depth)?;
        writeln!(f, "max_frontier={}", self.metrics.max_frontier_size)?;
        writeln!(f, "max_memory={}", self.metrics.max_memory_usage)?;
        write!(f, "path_len={}", self.path_len)
    }
}

/// Runs `strategy` from the start to the goal marker of `grid`.
pub fn solve(
    strategy: Strategy,
    grid: Arc<OccupancyGrid>,
    maze: impl Into<String>,
    max_steps: usize,
) -> Result<SearchReport, SearchError> {
    let mut searcher = Searcher::new(strategy);
    searcher.reset_from_markers(grid)?;
    let steps = run_to_completion(&mut searcher, max_steps)?;
    let report = SearchReport::from_search(&searcher, maze, steps);
    info!(
        "{} finished in {} steps: cost {}, path length {}",
        strategy, steps, report.cost, report.path_len
    );
    Ok(report)
}
