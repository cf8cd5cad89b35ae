//! Error types. Everything that can go wrong is detected before a search
//! starts ([ConfigError]) or by the driver's step ceiling ([SearchError]); an
//! unreachable goal is a normal terminal state, not an error.
use grid_util::point::Point;
use std::path::PathBuf;
use thiserror::Error;

use crate::grid::Cell;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("expected exactly 1 {marker:?} cell, found {found}")]
    MarkerCount { marker: Cell, found: usize },
    #[error("grid has no cells")]
    EmptyGrid,
    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("invalid cell value {value:?} at row {row}, column {col}")]
    InvalidCell {
        row: usize,
        col: usize,
        value: String,
    },
    #[error("{0} lies outside the grid")]
    OutOfBounds(Point),
    #[error("{0} is a wall")]
    Blocked(Point),
    #[error("unknown strategy {0:?}, expected one of bfs, dfs, ucs, gbfs, astar")]
    UnknownStrategy(String),
    #[error("could not read grid file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Error, Debug)]
pub enum SearchError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("search did not terminate within {steps} steps")]
    DidNotTerminate { steps: usize },
}
