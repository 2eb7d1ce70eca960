//! Solve command handler for running one search strategy on a maze file.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Args;

use mazesolver_lib::{
    load_maze, render_maze, solve_maze, solve_maze_with_observer, LoggingObserver, Position,
    SearchPhase, SolveAlgorithm, SolveRequest, SolveSummary,
};

use super::{friendly_error, resolve_config};
use crate::output::OutputFormat;

/// Exit status when the search ends without a path.
pub const NO_PATH_EXIT: u8 = 2;

#[derive(Args, Debug, Clone)]
pub struct SolveArgs {
    /// Maze text file (0 open, 1 wall, 2 start, 3 goal).
    pub maze: PathBuf,
    /// Search strategy: bfs, dfs, dijkstra, astar, bidirectional.
    #[arg(short, long, default_value = "astar")]
    pub algorithm: String,
    /// Wall-clock budget in seconds (overrides MAZESOLVER_TIMEOUT_SECS).
    #[arg(long)]
    pub timeout: Option<f64>,
    /// Run without a wall-clock budget.
    #[arg(long, conflicts_with = "timeout")]
    pub no_timeout: bool,
    /// Replace the maze's goal cells with ROW,COL (repeatable).
    #[arg(long = "goal", value_name = "ROW,COL", value_parser = parse_position)]
    pub goals: Vec<Position>,
    /// Draw the maze with the path overlaid.
    #[arg(long)]
    pub show_maze: bool,
    /// Log search checkpoints (visible with RUST_LOG=debug).
    #[arg(long)]
    pub progress: bool,
}

/// Handle the solve subcommand.
///
/// Exits with [`NO_PATH_EXIT`] when the frontier is exhausted or the budget
/// runs out; both are reported on stdout rather than as errors.
pub fn handle_solve_command(format: OutputFormat, args: &SolveArgs) -> Result<ExitCode> {
    let algorithm: SolveAlgorithm = args.algorithm.parse().map_err(friendly_error)?;
    let config = resolve_config(args.timeout, args.no_timeout)?;

    let mut grid = load_maze(&args.maze)
        .map_err(friendly_error)
        .with_context(|| format!("failed to load maze from {}", args.maze.display()))?;
    if !args.goals.is_empty() {
        grid = grid
            .with_goals(args.goals.iter().copied())
            .map_err(friendly_error)?;
    }

    let request = SolveRequest::from_config(algorithm, &config);
    let outcome = if args.progress {
        let mut observer = LoggingObserver::new(config.progress_interval);
        solve_maze_with_observer(&grid, &request, &mut observer)
    } else {
        solve_maze(&grid, &request)
    }
    .map_err(friendly_error)?;

    let summary = SolveSummary::from_outcome(&grid, &outcome);
    let overlay = args
        .show_maze
        .then(|| render_maze(&grid, outcome.path.as_deref()));
    format
        .render_solve(&summary, overlay.as_deref())
        .context("failed to write solve output")?;

    if outcome.found() {
        return Ok(ExitCode::SUCCESS);
    }
    match outcome.statistics.status {
        SearchPhase::TimedOut => eprintln!(
            "Search timed out. Try a larger --timeout, --no-timeout, or a faster algorithm (for example, --algorithm astar)."
        ),
        _ => eprintln!("The start cell is walled off from every goal."),
    }
    Ok(ExitCode::from(NO_PATH_EXIT))
}

/// Parse `ROW,COL` into a position.
pub fn parse_position(value: &str) -> std::result::Result<Position, String> {
    let (row, col) = value
        .split_once(',')
        .ok_or_else(|| format!("expected ROW,COL, got '{value}'"))?;
    let row = row
        .trim()
        .parse::<usize>()
        .map_err(|err| format!("invalid row '{row}': {err}"))?;
    let col = col
        .trim()
        .parse::<usize>()
        .map_err(|err| format!("invalid column '{col}': {err}"))?;
    Ok(Position::new(row, col))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_row_col_pairs() {
        assert_eq!(parse_position("2,3"), Ok(Position::new(2, 3)));
        assert_eq!(parse_position(" 0 , 10 "), Ok(Position::new(0, 10)));
        assert!(parse_position("2").is_err());
        assert!(parse_position("a,1").is_err());
        assert!(parse_position("-1,1").is_err());
    }
}
