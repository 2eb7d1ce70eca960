//! Multi-run comparison of search strategies on one or more mazes.
//!
//! Algorithms run one after another on the calling thread so their timings
//! are not skewed by contention. The grid is shared read-only and every run
//! allocates its own search state.

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::Serialize;

use crate::error::Result;
use crate::grid::Grid;
use crate::solver::{solve_maze, RunStatistics, SolveAlgorithm, SolveRequest};

pub const DEFAULT_RUNS: usize = 3;

/// Which algorithms to compare and how often to run each.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BenchmarkConfig {
    pub algorithms: Vec<SolveAlgorithm>,
    pub runs: usize,
    pub timeout: Option<Duration>,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            algorithms: SolveAlgorithm::ALL.to_vec(),
            runs: DEFAULT_RUNS,
            timeout: SolveRequest::new(SolveAlgorithm::default()).timeout,
        }
    }
}

/// Aggregated results for one algorithm. Means are taken over successful
/// runs only and are `None` when no run succeeded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlgorithmSummary {
    pub algorithm: SolveAlgorithm,
    pub runs: usize,
    pub successes: usize,
    pub success_rate: f64,
    pub mean_elapsed_secs: Option<f64>,
    /// Sample standard deviation; `0.0` with a single success.
    pub std_elapsed_secs: Option<f64>,
    pub mean_nodes_explored: Option<f64>,
    pub mean_path_length: Option<f64>,
    pub mean_max_frontier: Option<f64>,
    /// Mean of [`RunStatistics::state_size`], a proxy for memory use.
    pub mean_state_size: Option<f64>,
}

impl AlgorithmSummary {
    fn from_runs(algorithm: SolveAlgorithm, runs: &[RunStatistics]) -> Self {
        let successful: Vec<&RunStatistics> =
            runs.iter().filter(|stats| stats.path_length > 0).collect();
        let elapsed: Vec<f64> = successful
            .iter()
            .map(|stats| stats.elapsed.as_secs_f64())
            .collect();
        let success_rate = if runs.is_empty() {
            0.0
        } else {
            successful.len() as f64 / runs.len() as f64
        };

        Self {
            algorithm,
            runs: runs.len(),
            successes: successful.len(),
            success_rate,
            mean_elapsed_secs: mean(&elapsed),
            std_elapsed_secs: sample_std_dev(&elapsed),
            mean_nodes_explored: mean_of(&successful, |stats| stats.nodes_explored),
            mean_path_length: mean_of(&successful, |stats| stats.path_length),
            mean_max_frontier: mean_of(&successful, |stats| stats.max_frontier_size),
            mean_state_size: mean_of(&successful, |stats| stats.state_size),
        }
    }
}

/// Best performer per category. `None` when no algorithm qualifies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Comparisons {
    pub fastest: Option<SolveAlgorithm>,
    /// Fewest nodes explored.
    pub most_efficient: Option<SolveAlgorithm>,
    pub shortest_path: Option<SolveAlgorithm>,
    pub most_reliable: Option<SolveAlgorithm>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BenchmarkReport {
    pub rows: usize,
    pub cols: usize,
    pub runs_per_algorithm: usize,
    pub algorithms: Vec<AlgorithmSummary>,
    pub comparisons: Comparisons,
}

/// Report for one named maze of a suite.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MazeBenchmark {
    pub name: String,
    pub report: BenchmarkReport,
}

/// Reports for several mazes, in input order. Comparisons stay per maze.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BenchmarkSuite {
    pub runs_per_algorithm: usize,
    pub mazes: Vec<MazeBenchmark>,
}

/// Run every configured algorithm `config.runs` times on `grid`.
pub fn run_benchmark(grid: &Grid, config: &BenchmarkConfig) -> Result<BenchmarkReport> {
    let mut algorithms = config.algorithms.clone();
    algorithms.sort();
    algorithms.dedup();

    let mut summaries = Vec::with_capacity(algorithms.len());
    for algorithm in algorithms {
        let request = SolveRequest::new(algorithm).with_timeout(config.timeout);
        let runs = (0..config.runs)
            .map(|run| {
                tracing::debug!(%algorithm, run = run + 1, "benchmark run");
                solve_maze(grid, &request).map(|outcome| outcome.statistics)
            })
            .collect::<Result<Vec<_>>>()?;
        summaries.push(AlgorithmSummary::from_runs(algorithm, &runs));
    }

    let comparisons = compare(&summaries);
    tracing::info!(
        "benchmarked {} algorithms x {} runs on {}x{} maze",
        summaries.len(),
        config.runs,
        grid.rows(),
        grid.cols()
    );

    Ok(BenchmarkReport {
        rows: grid.rows(),
        cols: grid.cols(),
        runs_per_algorithm: config.runs,
        algorithms: summaries,
        comparisons,
    })
}

/// Benchmark each `(name, grid)` pair in turn with the same configuration.
pub fn run_benchmark_suite(
    mazes: &[(String, Grid)],
    config: &BenchmarkConfig,
) -> Result<BenchmarkSuite> {
    let mut reports = Vec::with_capacity(mazes.len());
    for (name, grid) in mazes {
        tracing::debug!(maze = %name, "benchmarking maze");
        reports.push(MazeBenchmark {
            name: name.clone(),
            report: run_benchmark(grid, config)?,
        });
    }
    tracing::info!("benchmarked {} mazes", reports.len());
    Ok(BenchmarkSuite {
        runs_per_algorithm: config.runs,
        mazes: reports,
    })
}

/// Write a report or suite to `path` as pretty-printed JSON.
pub fn save_report<T: Serialize + ?Sized>(report: &T, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    fs::write(path, json)?;
    tracing::info!("benchmark results saved to {}", path.display());
    Ok(())
}

/// Pick the best summary per category. `summaries` is in canonical algorithm
/// order and only a strictly better value displaces the current best, so
/// ties go to the earlier algorithm.
fn compare(summaries: &[AlgorithmSummary]) -> Comparisons {
    Comparisons {
        fastest: best_by(summaries, |s| s.mean_elapsed_secs, Goal::Lowest),
        most_efficient: best_by(summaries, |s| s.mean_nodes_explored, Goal::Lowest),
        shortest_path: best_by(summaries, |s| s.mean_path_length, Goal::Lowest),
        most_reliable: best_by(summaries, |s| Some(s.success_rate), Goal::Highest),
    }
}

#[derive(Clone, Copy)]
enum Goal {
    Lowest,
    Highest,
}

fn best_by(
    summaries: &[AlgorithmSummary],
    metric: impl Fn(&AlgorithmSummary) -> Option<f64>,
    goal: Goal,
) -> Option<SolveAlgorithm> {
    let mut best: Option<(SolveAlgorithm, f64)> = None;
    for summary in summaries {
        let Some(value) = metric(summary) else {
            continue;
        };
        let better = match (best, goal) {
            (None, _) => true,
            (Some((_, current)), Goal::Lowest) => value < current,
            (Some((_, current)), Goal::Highest) => value > current,
        };
        if better {
            best = Some((summary.algorithm, value));
        }
    }
    best.map(|(algorithm, _)| algorithm)
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

fn mean_of(runs: &[&RunStatistics], field: impl Fn(&RunStatistics) -> usize) -> Option<f64> {
    let values: Vec<f64> = runs.iter().map(|stats| field(stats) as f64).collect();
    mean(&values)
}

fn sample_std_dev(values: &[f64]) -> Option<f64> {
    let avg = mean(values)?;
    if values.len() < 2 {
        return Some(0.0);
    }
    let variance =
        values.iter().map(|v| (v - avg).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    Some(variance.sqrt())
}
