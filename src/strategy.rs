use core::fmt;
use grid_util::point::Point;
use std::str::FromStr;
use std::sync::Arc;

use crate::error::ConfigError;
use crate::grid::OccupancyGrid;
use crate::metrics::SearchMetrics;
use crate::search::astar::AstarSearch;
use crate::search::bfs::BfsSearch;
use crate::search::dfs::DfsSearch;
use crate::search::gbfs::GbfsSearch;
use crate::search::ucs::UcsSearch;
use crate::search::SearchAlgorithm;

/// The closed set of available search strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Strategy {
    Bfs,
    Dfs,
    Ucs,
    Gbfs,
    Astar,
}

impl Strategy {
    pub const ALL: [Strategy; 5] = [
        Strategy::Bfs,
        Strategy::Dfs,
        Strategy::Ucs,
        Strategy::Gbfs,
        Strategy::Astar,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Strategy::Bfs => "bfs",
            Strategy::Dfs => "dfs",
            Strategy::Ucs => "ucs",
            Strategy::Gbfs => "gbfs",
            Strategy::Astar => "astar",
        }
    }

    /// Whether the strategy always returns a cost-minimal path.
    pub fn is_optimal(self) -> bool {
        matches!(self, Strategy::Bfs | Strategy::Ucs | Strategy::Astar)
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Strategy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Strategy::ALL
            .into_iter()
            .find(|strategy| strategy.name() == s)
            .ok_or_else(|| ConfigError::UnknownStrategy(s.to_owned()))
    }
}

/// A search of any [Strategy], selected at runtime.
#[derive(Clone, Debug)]
pub enum Searcher {
    Bfs(BfsSearch),
    Dfs(DfsSearch),
    Ucs(UcsSearch),
    Gbfs(GbfsSearch),
    Astar(AstarSearch),
}

impl Searcher {
    pub fn new(strategy: Strategy) -> Searcher {
        match strategy {
            Strategy::Bfs => Searcher::Bfs(BfsSearch::new()),
            Strategy::Dfs => Searcher::Dfs(DfsSearch::new()),
            Strategy::Ucs => Searcher::Ucs(UcsSearch::new()),
            Strategy::Gbfs => Searcher::Gbfs(GbfsSearch::new()),
            Strategy::Astar => Searcher::Astar(AstarSearch::new()),
        }
    }
}

macro_rules! dispatch {
    ($searcher:expr, $search:ident => $body:expr) => {
        match $searcher {
            Searcher::Bfs($search) => $body,
            Searcher::Dfs($search) => $body,
            Searcher::Ucs($search) => $body,
            Searcher::Gbfs($search) => $body,
            Searcher::Astar($search) => $body,
        }
    };
}

impl SearchAlgorithm for Searcher {
    fn strategy(&self) -> Strategy {
        dispatch!(self, s => s.strategy())
    }
    fn reset(
        &mut self,
        grid: Arc<OccupancyGrid>,
        start: Point,
        goal: Point,
    ) -> Result<(), ConfigError> {
        dispatch!(self, s => s.reset(grid, start, goal))
    }
    fn step(&mut self) {
        dispatch!(self, s => s.step())
    }
    fn is_done(&self) -> bool {
        dispatch!(self, s => s.is_done())
    }
    fn cost(&self) -> usize {
        dispatch!(self, s => s.cost())
    }
    fn path(&self) -> &[Point] {
        dispatch!(self, s => s.path())
    }
    fn frontier(&self) -> Vec<Point> {
        dispatch!(self, s => s.frontier())
    }
    fn explored(&self) -> Vec<Point> {
        dispatch!(self, s => s.explored())
    }
    fn metrics(&self) -> SearchMetrics {
        dispatch!(self, s => s.metrics())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_names_only() {
        for strategy in Strategy::ALL {
            assert_eq!(strategy.name().parse::<Strategy>().unwrap(), strategy);
            assert_eq!(strategy.to_string(), strategy.name());
        }
        assert!(matches!(
            "dijkstra".parse::<Strategy>(),
            Err(ConfigError::UnknownStrategy(name)) if name == "dijkstra"
        ));
        assert!("BFS".parse::<Strategy>().is_err());
    }

    #[test]
    fn searcher_runs_selected_strategy() {
        for strategy in Strategy::ALL {
            let searcher = Searcher::new(strategy);
            assert_eq!(searcher.strategy(), strategy);
        }
    }
}
