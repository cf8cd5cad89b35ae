use grid_util::point::Point;

use super::manhattan;
use super::ucs::{CostFrontier, CostRank};
use super::Search;
use crate::Strategy;

/// Ranks entries by accumulated cost plus the Manhattan distance to the goal.
/// The heuristic is consistent on a unit-cost 4-connected grid, so the first
/// expansion of the goal is optimal.
#[derive(Clone, Copy, Debug, Default)]
pub struct ByEstimate;

impl CostRank for ByEstimate {
    const STRATEGY: Strategy = Strategy::Astar;

    fn rank(g: usize, node: &Point, goal: &Point) -> usize {
        g + manhattan(node, goal)
    }
}

pub type AstarFrontier = CostFrontier<ByEstimate>;
pub type AstarSearch = Search<AstarFrontier>;
