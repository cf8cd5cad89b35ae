use core::fmt;
use grid_util::grid::{BoolGrid, ValueGrid};
use grid_util::point::Point;
use itertools::Itertools;
use log::info;
use petgraph::unionfind::UnionFind;
use smallvec::SmallVec;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use crate::error::ConfigError;

/// Offsets `(dx, dy)` in enumeration order: up, down, left, right. Every
/// strategy breaks ties by this order, so it must not change.
const CARDINAL_OFFSETS: [(i32, i32); 4] = [(0, -1), (0, 1), (-1, 0), (1, 0)];

/// Kind of a single grid cell, with the numeric code used in maze files.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Cell {
    Free,
    Wall,
    Start,
    Goal,
}

impl Cell {
    pub fn from_code(code: u8) -> Option<Cell> {
        match code {
            0 => Some(Cell::Free),
            1 => Some(Cell::Wall),
            2 => Some(Cell::Start),
            3 => Some(Cell::Goal),
            _ => None,
        }
    }
    pub fn code(self) -> u8 {
        match self {
            Cell::Free => 0,
            Cell::Wall => 1,
            Cell::Start => 2,
            Cell::Goal => 3,
        }
    }
    fn symbol(self) -> char {
        match self {
            Cell::Free => '.',
            Cell::Wall => '#',
            Cell::Start => 'S',
            Cell::Goal => 'G',
        }
    }
}

/// Immutable 4-connected occupancy grid with a unique start and goal.
///
/// Nodes are [Point]s where `x` is the column and `y` the row, so the cell at
/// `(row, col)` is `Point::new(col, row)`. Walls are stored as `true` in the
/// [BoolGrid]. Connected components are computed once on construction using a
/// [UnionFind] so reachability can be checked without searching.
#[derive(Clone, Debug)]
pub struct OccupancyGrid {
    pub grid: BoolGrid,
    pub components: UnionFind<usize>,
    start: Point,
    goal: Point,
}

impl OccupancyGrid {
    /// Builds a grid from rows of cell codes (0 free, 1 wall, 2 start, 3 goal).
    pub fn from_codes(rows: &[Vec<u8>]) -> Result<OccupancyGrid, ConfigError> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if width == 0 {
            return Err(ConfigError::EmptyGrid);
        }
        let mut grid = BoolGrid::new(width, height, false);
        let mut starts = Vec::new();
        let mut goals = Vec::new();
        for (row, values) in rows.iter().enumerate() {
            if values.len() != width {
                return Err(ConfigError::RaggedRow {
                    row,
                    expected: width,
                    found: values.len(),
                });
            }
            for (col, &code) in values.iter().enumerate() {
                let cell = Cell::from_code(code).ok_or_else(|| ConfigError::InvalidCell {
                    row,
                    col,
                    value: code.to_string(),
                })?;
                let point = Point::new(col as i32, row as i32);
                match cell {
                    Cell::Wall => grid.set(point.x, point.y, true),
                    Cell::Start => starts.push(point),
                    Cell::Goal => goals.push(point),
                    Cell::Free => {}
                }
            }
        }
        let start = unique_marker(&starts, Cell::Start)?;
        let goal = unique_marker(&goals, Cell::Goal)?;
        let mut occupancy = OccupancyGrid {
            grid,
            components: UnionFind::new(width * height),
            start,
            goal,
        };
        occupancy.generate_components();
        Ok(occupancy)
    }

    /// Reads a whitespace-delimited maze file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<OccupancyGrid, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let grid: OccupancyGrid = text.parse()?;
        info!(
            "Loaded {}x{} grid from {}",
            grid.width(),
            grid.height(),
            path.display()
        );
        Ok(grid)
    }

    pub fn width(&self) -> usize {
        self.grid.width
    }
    pub fn height(&self) -> usize {
        self.grid.height
    }
    pub fn start(&self) -> Point {
        self.start
    }
    pub fn goal(&self) -> Point {
        self.goal
    }

    pub fn in_bounds(&self, point: Point) -> bool {
        self.grid.point_in_bounds(point)
    }

    /// The kind of cell at `point`, or [None] outside the grid.
    pub fn cell(&self, point: Point) -> Option<Cell> {
        if !self.in_bounds(point) {
            None
        } else if self.grid.get_point(point) {
            Some(Cell::Wall)
        } else if point == self.start {
            Some(Cell::Start)
        } else if point == self.goal {
            Some(Cell::Goal)
        } else {
            Some(Cell::Free)
        }
    }

    pub fn can_move_to(&self, point: Point) -> bool {
        self.in_bounds(point) && !self.grid.get_point(point)
    }

    /// Passable cardinal neighbours of `point` in the order up, down, left, right.
    pub fn neighbours(&self, point: &Point) -> SmallVec<[Point; 4]> {
        CARDINAL_OFFSETS
            .iter()
            .map(|&(dx, dy)| Point::new(point.x + dx, point.y + dy))
            .filter(|p| self.can_move_to(*p))
            .collect()
    }

    /// Checks that start and goal are passable and on the same component.
    pub fn reachable(&self, start: &Point, goal: &Point) -> bool {
        self.can_move_to(*start)
            && self.can_move_to(*goal)
            && self.components.equiv(
                self.grid.get_ix_point(start),
                self.grid.get_ix_point(goal),
            )
    }

    pub fn unreachable(&self, start: &Point, goal: &Point) -> bool {
        !self.reachable(start, goal)
    }

    /// Number of passable cells on the same component as `point`, itself included.
    pub fn component_size(&self, point: &Point) -> usize {
        if !self.can_move_to(*point) {
            return 0;
        }
        let root = self.components.find(self.grid.get_ix_point(point));
        self.passable_points()
            .filter(|p| self.components.find(self.grid.get_ix_point(p)) == root)
            .count()
    }

    /// Checks that `path` is a non-empty chain of cardinal moves between passable cells.
    pub fn is_valid_path(&self, path: &[Point]) -> bool {
        !path.is_empty()
            && path.iter().all(|p| self.can_move_to(*p))
            && path
                .iter()
                .tuple_windows()
                .all(|(a, b)| a.manhattan_distance(b) == 1)
    }

    fn passable_points(&self) -> impl Iterator<Item = Point> + '_ {
        (0..self.height() as i32)
            .cartesian_product(0..self.width() as i32)
            .map(|(y, x)| Point::new(x, y))
            .filter(|p| self.can_move_to(*p))
    }

    /// Links every passable cell to its passable right and lower neighbour.
    fn generate_components(&mut self) {
        self.components = UnionFind::new(self.width() * self.height());
        let points = self.passable_points().collect::<Vec<_>>();
        for point in points {
            let ix = self.grid.get_ix_point(&point);
            for next in [Point::new(point.x + 1, point.y), Point::new(point.x, point.y + 1)] {
                if self.can_move_to(next) {
                    let next_ix = self.grid.get_ix_point(&next);
                    self.components.union(ix, next_ix);
                }
            }
        }
    }
}

fn unique_marker(found: &[Point], marker: Cell) -> Result<Point, ConfigError> {
    match found {
        [point] => Ok(*point),
        _ => Err(ConfigError::MarkerCount {
            marker,
            found: found.len(),
        }),
    }
}

fn parse_code(token: &str, row: usize, col: usize) -> Result<u8, ConfigError> {
    let invalid = || ConfigError::InvalidCell {
        row,
        col,
        value: token.to_owned(),
    };
    let value: f64 = token.parse().map_err(|_| invalid())?;
    if value.fract() != 0.0 || !(0.0..=3.0).contains(&value) {
        return Err(invalid());
    }
    Ok(value as u8)
}

impl FromStr for OccupancyGrid {
    type Err = ConfigError;

    /// Parses a whitespace-delimited matrix of cell codes, one row per line.
    /// Blank lines are ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows = s
            .lines()
            .filter(|line| !line.trim().is_empty())
            .enumerate()
            .map(|(row, line)| {
                line.split_whitespace()
                    .enumerate()
                    .map(|(col, token)| parse_code(token, row, col))
                    .collect::<Result<Vec<u8>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;
        OccupancyGrid::from_codes(&rows)
    }
}

impl fmt::Display for OccupancyGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for y in 0..self.height() as i32 {
            let row = (0..self.width() as i32)
                .filter_map(|x| self.cell(Point::new(x, y)))
                .map(Cell::symbol)
                .collect::<String>();
            writeln!(f, "{}", row)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_codes_and_markers() {
        let grid: OccupancyGrid = "2 0 1\n0 1.0 3\n".parse().unwrap();
        assert_eq!((grid.width(), grid.height()), (3, 2));
        assert_eq!(grid.start(), Point::new(0, 0));
        assert_eq!(grid.goal(), Point::new(2, 1));
        assert_eq!(grid.cell(Point::new(1, 1)), Some(Cell::Wall));
        assert_eq!(grid.cell(Point::new(1, 0)), Some(Cell::Free));
        assert_eq!(grid.cell(Point::new(3, 0)), None);
        assert_eq!(grid.to_string(), "S.#\n.#G\n");
    }

    #[test]
    fn rejects_missing_or_duplicate_markers() {
        let missing = "0 0\n0 3".parse::<OccupancyGrid>();
        assert!(matches!(
            missing,
            Err(ConfigError::MarkerCount {
                marker: Cell::Start,
                found: 0
            })
        ));
        let duplicate = "2 3\n3 0".parse::<OccupancyGrid>();
        assert!(matches!(
            duplicate,
            Err(ConfigError::MarkerCount {
                marker: Cell::Goal,
                found: 2
            })
        ));
    }

    #[test]
    fn rejects_malformed_matrices() {
        assert!(matches!(
            "".parse::<OccupancyGrid>(),
            Err(ConfigError::EmptyGrid)
        ));
        assert!(matches!(
            "2 0\n0".parse::<OccupancyGrid>(),
            Err(ConfigError::RaggedRow { row: 1, .. })
        ));
        assert!(matches!(
            "2 7\n0 3".parse::<OccupancyGrid>(),
            Err(ConfigError::InvalidCell { row: 0, col: 1, .. })
        ));
        assert!(matches!(
            "2 0.5\n0 3".parse::<OccupancyGrid>(),
            Err(ConfigError::InvalidCell { .. })
        ));
    }

    #[test]
    fn neighbours_are_cardinal_and_ordered() {
        // |...|
        // |.S#|
        // |.G.|
        let grid = OccupancyGrid::from_codes(&[
            vec![0, 0, 0],
            vec![0, 2, 1],
            vec![0, 3, 0],
        ])
        .unwrap();
        let n = grid.neighbours(&Point::new(1, 1));
        assert_eq!(
            n.as_slice(),
            &[Point::new(1, 0), Point::new(1, 2), Point::new(0, 1)]
        );
        let corner = grid.neighbours(&Point::new(0, 0));
        assert_eq!(corner.as_slice(), &[Point::new(0, 1), Point::new(1, 0)]);
    }

    /// Tests whether points are correctly mapped to different connected components
    #[test]
    fn test_component_generation() {
        //  ___
        // |S#.|
        // |.#G|
        //  ___
        let grid = OccupancyGrid::from_codes(&[vec![2, 1, 0], vec![0, 1, 3]]).unwrap();
        let start = grid.start();
        let goal = grid.goal();
        assert!(grid.unreachable(&start, &goal));
        assert!(grid.reachable(&start, &Point::new(0, 1)));
        assert!(grid.reachable(&goal, &Point::new(2, 0)));
        assert!(grid.unreachable(&start, &Point::new(1, 0)));
        assert_eq!(grid.component_size(&start), 2);
        assert_eq!(grid.component_size(&Point::new(1, 1)), 0);
    }

    #[test]
    fn validates_paths() {
        let grid = OccupancyGrid::from_codes(&[vec![2, 0], vec![1, 3]]).unwrap();
        let good = [Point::new(0, 0), Point::new(1, 0), Point::new(1, 1)];
        let through_wall = [Point::new(0, 0), Point::new(0, 1), Point::new(1, 1)];
        let diagonal = [Point::new(0, 0), Point::new(1, 1)];
        assert!(grid.is_valid_path(&good));
        assert!(!grid.is_valid_path(&through_wall));
        assert!(!grid.is_valid_path(&diagonal));
        assert!(!grid.is_valid_path(&[]));
    }
}
