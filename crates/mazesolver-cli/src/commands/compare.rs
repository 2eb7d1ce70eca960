//! Compare command handler for benchmarking several strategies on one or more mazes.

use std::path::PathBuf;

use anyhow::{ensure, Context, Result};
use clap::Args;

use mazesolver_lib::benchmark::DEFAULT_RUNS;
use mazesolver_lib::{load_maze, run_benchmark_suite, save_report, BenchmarkConfig, SolveAlgorithm};

use super::{friendly_error, resolve_config};
use crate::output::OutputFormat;

#[derive(Args, Debug, Clone)]
pub struct CompareArgs {
    /// Maze text files, benchmarked in the order given.
    #[arg(required = true)]
    pub mazes: Vec<PathBuf>,
    /// Comma-separated strategies to compare (default: all).
    #[arg(short, long, value_delimiter = ',')]
    pub algorithms: Vec<String>,
    /// Runs per strategy.
    #[arg(short, long, default_value_t = DEFAULT_RUNS)]
    pub runs: usize,
    /// Wall-clock budget per run in seconds.
    #[arg(long)]
    pub timeout: Option<f64>,
    /// Run without a wall-clock budget.
    #[arg(long, conflicts_with = "timeout")]
    pub no_timeout: bool,
    /// Also write the report as JSON to this file.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Handle the compare subcommand.
pub fn handle_compare_command(format: OutputFormat, args: &CompareArgs) -> Result<()> {
    ensure!(args.runs > 0, "--runs must be at least 1");

    let algorithms = if args.algorithms.is_empty() {
        SolveAlgorithm::ALL.to_vec()
    } else {
        args.algorithms
            .iter()
            .map(|name| name.parse::<SolveAlgorithm>().map_err(friendly_error))
            .collect::<Result<Vec<_>>>()?
    };
    let config = resolve_config(args.timeout, args.no_timeout)?;

    let mut mazes = Vec::with_capacity(args.mazes.len());
    for path in &args.mazes {
        let grid = load_maze(path)
            .map_err(friendly_error)
            .with_context(|| format!("failed to load maze from {}", path.display()))?;
        mazes.push((path.display().to_string(), grid));
    }

    let benchmark = BenchmarkConfig {
        algorithms,
        runs: args.runs,
        timeout: config.timeout,
    };
    let suite = run_benchmark_suite(&mazes, &benchmark).map_err(friendly_error)?;

    if let Some(path) = &args.output {
        save_report(&suite, path)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
    }

    format
        .render_benchmark(&suite)
        .context("failed to write benchmark output")
}
