//! # grid_search
//!
//! Stepwise search on 4-connected occupancy grids. Implements
//! [breadth-first](https://en.wikipedia.org/wiki/Breadth-first_search),
//! [depth-first](https://en.wikipedia.org/wiki/Depth-first_search),
//! uniform-cost, greedy best-first and
//! [A*](https://en.wikipedia.org/wiki/A*_search_algorithm) search behind one
//! [SearchAlgorithm] lifecycle: [reset](SearchAlgorithm::reset) once, call
//! [step](SearchAlgorithm::step) until [is_done](SearchAlgorithm::is_done),
//! then read the path, cost and metrics. Every step expands at most one node,
//! so the frontier and explored set can be inspected (or drawn) in between.
//!
//! Edges have unit cost, neighbours are enumerated up, down, left, right, and
//! ties are broken by insertion order, which makes every run deterministic.
//!
//! ```
//! use grid_search::{run_to_completion, OccupancyGrid, SearchAlgorithm, Searcher, Strategy};
//! use std::sync::Arc;
//!
//! let grid: OccupancyGrid = "2 0 0\n1 1 0\n3 0 0".parse().unwrap();
//! let mut searcher = Searcher::new(Strategy::Astar);
//! searcher.reset_from_markers(Arc::new(grid)).unwrap();
//! run_to_completion(&mut searcher, grid_search::DEFAULT_STEP_LIMIT).unwrap();
//! assert_eq!(searcher.cost(), 6);
//! ```
mod driver;
pub mod error;
pub mod grid;
pub mod metrics;
pub mod search;
mod strategy;

pub use driver::{run_to_completion, solve, SearchReport};
pub use error::{ConfigError, SearchError};
pub use grid::{Cell, OccupancyGrid};
pub use metrics::SearchMetrics;
pub use search::{FrontierEntry, SearchAlgorithm};
pub use strategy::{Searcher, Strategy};

/// Step ceiling applied by drivers to catch strategies that never finish.
pub const DEFAULT_STEP_LIMIT: usize = 1_000_000;
