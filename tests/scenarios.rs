use grid_search::{
    run_to_completion, solve, ConfigError, OccupancyGrid, SearchAlgorithm, SearchError,
    SearchMetrics, Searcher, Strategy, DEFAULT_STEP_LIMIT,
};
use grid_util::point::Point;
use std::sync::Arc;

fn grid(rows: &[Vec<u8>]) -> Arc<OccupancyGrid> {
    Arc::new(OccupancyGrid::from_codes(rows).unwrap())
}

fn maze(id: u32) -> Arc<OccupancyGrid> {
    Arc::new(OccupancyGrid::load(format!("mazes/maze{id}.txt")).unwrap())
}

fn run(strategy: Strategy, grid: &Arc<OccupancyGrid>) -> Searcher {
    let mut searcher = Searcher::new(strategy);
    searcher.reset_from_markers(grid.clone()).unwrap();
    run_to_completion(&mut searcher, DEFAULT_STEP_LIMIT).unwrap();
    searcher
}

/// 5x5 grid without walls, start and goal in opposite corners.
#[test]
fn scenario_a_open_grid() {
    let grid = maze(1);
    for strategy in [Strategy::Bfs, Strategy::Ucs, Strategy::Astar] {
        let searcher = run(strategy, &grid);
        assert_eq!(searcher.cost(), 8, "{strategy}");
        assert_eq!(searcher.path().len(), 9, "{strategy}");
        assert!(grid.is_valid_path(searcher.path()));
    }
}

/// The goal is walled in: every strategy explores the start's component and gives up.
#[test]
fn scenario_b_enclosed_goal() {
    let grid = maze(3);
    let start = grid.start();
    assert!(grid.unreachable(&start, &grid.goal()));
    for strategy in Strategy::ALL {
        let searcher = run(strategy, &grid);
        assert!(searcher.is_done());
        assert_eq!(searcher.cost(), 0, "{strategy}");
        assert!(searcher.path().is_empty(), "{strategy}");
        assert_eq!(
            searcher.number_of_expanded(),
            grid.component_size(&start),
            "{strategy}"
        );
        assert_eq!(searcher.number_of_expanded(), 21);
    }
}

#[test]
fn scenario_c_adjacent_goal() {
    for rows in [vec![vec![2, 3]], vec![vec![2, 0, 0], vec![3, 0, 0]]] {
        let grid = grid(&rows);
        for strategy in Strategy::ALL {
            let searcher = run(strategy, &grid);
            assert_eq!(searcher.cost(), 1, "{strategy}");
            assert_eq!(searcher.path(), &[grid.start(), grid.goal()]);
            assert!(searcher.number_of_expanded() <= 2, "{strategy}");
        }
    }
}

/// Resetting a finished search onto a new grid leaves nothing of the old run behind.
#[test]
fn scenario_d_reset_clears_state() {
    let first = maze(2);
    let second = maze(1);
    for strategy in Strategy::ALL {
        let mut searcher = run(strategy, &first);
        assert!(searcher.number_of_expanded() > 0);

        searcher.reset_from_markers(second.clone()).unwrap();
        assert!(!searcher.is_done());
        assert_eq!(searcher.cost(), 0);
        assert!(searcher.path().is_empty());
        assert!(searcher.explored().is_empty());
        assert_eq!(searcher.frontier(), vec![second.start()]);
        assert_eq!(searcher.metrics(), SearchMetrics::default());

        run_to_completion(&mut searcher, DEFAULT_STEP_LIMIT).unwrap();
        let fresh = run(strategy, &second);
        assert_eq!(searcher.path(), fresh.path(), "{strategy}");
        assert_eq!(searcher.metrics(), fresh.metrics(), "{strategy}");
    }
}

#[test]
fn stepping_after_done_changes_nothing() {
    for id in 1..=3 {
        let grid = maze(id);
        for strategy in Strategy::ALL {
            let mut searcher = run(strategy, &grid);
            let cost = searcher.cost();
            let path = searcher.path().to_vec();
            let metrics = searcher.metrics();
            let frontier = searcher.frontier();
            for _ in 0..10 {
                searcher.step();
            }
            assert!(searcher.is_done());
            assert_eq!(searcher.cost(), cost);
            assert_eq!(searcher.path(), path.as_slice());
            assert_eq!(searcher.metrics(), metrics);
            assert_eq!(searcher.frontier(), frontier);
        }
    }
}

/// Checks the metric definitions against the state observed after every step.
#[test]
fn metrics_follow_observed_state() {
    for id in 1..=3 {
        let grid = maze(id);
        for strategy in Strategy::ALL {
            let mut searcher = Searcher::new(strategy);
            searcher.reset_from_markers(grid.clone()).unwrap();
            let mut previous = SearchMetrics::default();
            let mut max_frontier = 0;
            let mut max_memory = 0;
            while !searcher.is_done() {
                searcher.step();
                let explored = searcher.explored();
                let mut distinct = explored.clone();
                distinct.sort_by_key(|p| (p.y, p.x));
                distinct.dedup();
                assert_eq!(distinct.len(), explored.len());

                let metrics = searcher.metrics();
                assert_eq!(metrics.expanded, explored.len());
                assert!(metrics.expanded >= previous.expanded);
                assert!(metrics.max_depth >= previous.max_depth);
                let frontier_len = searcher.frontier().len();
                max_frontier = max_frontier.max(frontier_len);
                max_memory = max_memory.max(frontier_len + explored.len());
                previous = metrics;
            }
            assert_eq!(previous.max_frontier_size, max_frontier, "{strategy}");
            assert_eq!(previous.max_memory_usage, max_memory, "{strategy}");
        }
    }
}

#[test]
fn optimal_strategies_agree_on_maze() {
    let grid = maze(2);
    for strategy in Strategy::ALL {
        let searcher = run(strategy, &grid);
        assert!(grid.is_valid_path(searcher.path()), "{strategy}");
        assert_eq!(searcher.path().first(), Some(&grid.start()));
        assert_eq!(searcher.path().last(), Some(&grid.goal()));
        assert_eq!(searcher.cost(), searcher.path().len() - 1);
        if strategy.is_optimal() {
            assert_eq!(searcher.cost(), 20, "{strategy}");
        } else {
            assert!(searcher.cost() >= 20, "{strategy}");
        }
    }
}

#[test]
fn report_for_maze_file() {
    let report = solve(Strategy::Gbfs, maze(2), "2", DEFAULT_STEP_LIMIT).unwrap();
    assert_eq!(
        report.to_string(),
        "algo=gbfs maze=2\ncost=26\nexpanded=27\nmax_depth=26\nmax_frontier=4\nmax_memory=30\npath_len=27"
    );
}

#[test]
fn configuration_errors_surface_before_search() {
    let missing = OccupancyGrid::load("mazes/does_not_exist.txt");
    assert!(matches!(missing, Err(ConfigError::Io { .. })));

    let grid = maze(1);
    let mut searcher = Searcher::new(Strategy::Dfs);
    let result = searcher.reset(grid.clone(), Point::new(5, 0), grid.goal());
    assert!(matches!(result, Err(ConfigError::OutOfBounds(_))));

    let stuck = solve(Strategy::Bfs, grid, "1", 5);
    assert!(matches!(
        stuck,
        Err(SearchError::DidNotTerminate { steps: 5 })
    ));
}
