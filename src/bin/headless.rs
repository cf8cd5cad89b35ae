//! Headless runner: solves one maze without any rendering and prints the
//! results as `key=value` lines.
//!
//! ```text
//! headless --algo astar --maze-id 1
//! headless --all --maze-id 2 --mazes-dir ./mazes -v
//! ```
use anyhow::Context;
use clap::Parser;
use flexi_logger::Logger;
use grid_search::{solve, OccupancyGrid, Strategy, DEFAULT_STEP_LIMIT};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "headless")]
#[command(about = "Runs a grid search strategy on a maze file without a window")]
struct Cli {
    /// Strategy to run: bfs, dfs, ucs, gbfs or astar
    #[arg(long, required_unless_present = "all")]
    algo: Option<String>,

    /// Run every strategy on the maze
    #[arg(long, conflicts_with = "algo")]
    all: bool,

    /// Maze number; the grid is read from `<mazes-dir>/maze<id>.txt`
    #[arg(long = "maze-id", alias = "maze_id")]
    maze_id: u32,

    /// Directory holding the maze files
    #[arg(long, default_value = "mazes")]
    mazes_dir: PathBuf,

    /// Abort a search still running after this many steps
    #[arg(long, default_value_t = DEFAULT_STEP_LIMIT)]
    max_steps: usize,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let _logger = Logger::try_with_env_or_str(level)?.start()?;

    let strategies = match cli.algo.as_deref() {
        Some(name) => vec![name.parse::<Strategy>()?],
        None => Strategy::ALL.to_vec(),
    };

    let maze_path = cli.mazes_dir.join(format!("maze{}.txt", cli.maze_id));
    let grid = Arc::new(
        OccupancyGrid::load(&maze_path)
            .with_context(|| format!("failed to load maze {}", cli.maze_id))?,
    );

    let mut reports = Vec::with_capacity(strategies.len());
    for strategy in strategies {
        let report = solve(strategy, grid.clone(), cli.maze_id.to_string(), cli.max_steps)
            .with_context(|| format!("{} failed on maze {}", strategy, cli.maze_id))?;
        reports.push(report.to_string());
    }
    println!("{}", reports.join("\n\n"));
    Ok(())
}
