//! Run driver for maze searches.
//!
//! This module provides:
//! - [`SolveAlgorithm`] - Supported search strategies
//! - [`SolveRequest`] - Algorithm plus wall-clock budget for one run
//! - [`RunStatistics`] - Complete telemetry snapshot of a finished run
//! - [`AlgorithmInfo`] - Descriptive catalog entry for each strategy
//! - [`solve_maze`] - Main entry point for running a strategy on a grid
//!
//! # Strategy Pattern
//!
//! Each algorithm is wrapped in a planner implementing [`SearchPlanner`]; the
//! driver selects one with [`select_planner`] and never matches on the
//! algorithm itself.
//!
//! # Example
//!
//! ```ignore
//! use mazesolver_lib::{load_maze, solve_maze, SolveRequest, SolveAlgorithm};
//!
//! let grid = load_maze(Path::new("maze.txt"))?;
//! let outcome = solve_maze(&grid, &SolveRequest::new(SolveAlgorithm::AStar))?;
//! println!("explored {} nodes", outcome.statistics.nodes_explored);
//! ```

mod planner;

pub use planner::{
    select_planner, AStarPlanner, BfsPlanner, BidirectionalPlanner, DfsPlanner, DijkstraPlanner,
    SearchPlanner,
};

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Serialize, Serializer};

use crate::config::SolverConfig;
use crate::error::{Error, Result};
use crate::grid::{Grid, Position};
use crate::search::{Deadline, NoopObserver, SearchContext, SearchObserver, SearchPhase};

/// Minimum similarity for an algorithm name to be offered as a suggestion.
const SUGGESTION_THRESHOLD: f64 = 0.7;

/// Supported search strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SolveAlgorithm {
    /// Breadth-first search (shortest path).
    Bfs,
    /// Depth-first search (some path).
    Dfs,
    /// Dijkstra's algorithm (shortest path, uniform step cost).
    Dijkstra,
    /// A* search guided by Manhattan distance.
    #[default]
    #[serde(rename = "astar")]
    AStar,
    /// Breadth-first search from both ends at once.
    Bidirectional,
}

impl SolveAlgorithm {
    /// Every algorithm, in canonical order. Comparisons break ties by this order.
    pub const ALL: [SolveAlgorithm; 5] = [
        SolveAlgorithm::Bfs,
        SolveAlgorithm::Dfs,
        SolveAlgorithm::Dijkstra,
        SolveAlgorithm::AStar,
        SolveAlgorithm::Bidirectional,
    ];

    /// Canonical identifier accepted by [`FromStr`].
    pub fn as_str(self) -> &'static str {
        match self {
            SolveAlgorithm::Bfs => "bfs",
            SolveAlgorithm::Dfs => "dfs",
            SolveAlgorithm::Dijkstra => "dijkstra",
            SolveAlgorithm::AStar => "astar",
            SolveAlgorithm::Bidirectional => "bidirectional",
        }
    }

    /// Closest canonical identifiers to an unrecognised name, best first.
    fn suggestions_for(name: &str, limit: usize) -> Vec<String> {
        let mut scored: Vec<(f64, SolveAlgorithm)> = Self::ALL
            .iter()
            .map(|algorithm| (strsim::jaro_winkler(name, algorithm.as_str()), *algorithm))
            .filter(|(score, _)| *score >= SUGGESTION_THRESHOLD)
            .collect();
        scored.sort_by(|a, b| b.0.total_cmp(&a.0).then(a.1.cmp(&b.1)));
        scored
            .into_iter()
            .take(limit)
            .map(|(_, algorithm)| algorithm.as_str().to_string())
            .collect()
    }
}

impl fmt::Display for SolveAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SolveAlgorithm {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "bfs" => Ok(SolveAlgorithm::Bfs),
            "dfs" => Ok(SolveAlgorithm::Dfs),
            "dijkstra" => Ok(SolveAlgorithm::Dijkstra),
            "astar" | "a-star" | "a_star" | "a*" => Ok(SolveAlgorithm::AStar),
            "bidirectional" | "bidi" => Ok(SolveAlgorithm::Bidirectional),
            _ => Err(Error::UnsupportedAlgorithm {
                name: value.to_string(),
                suggestions: Self::suggestions_for(&normalized, 3),
            }),
        }
    }
}

/// Descriptive metadata for one strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AlgorithmInfo {
    pub algorithm: SolveAlgorithm,
    pub name: &'static str,
    pub description: &'static str,
    /// Worst-case time complexity.
    pub complexity: &'static str,
    /// Returned paths are always shortest paths.
    pub optimal: bool,
    /// Finds a path whenever one exists, given enough time.
    pub complete: bool,
}

impl SolveAlgorithm {
    /// Catalog entry for this algorithm. Optimality comes from the planner.
    pub fn info(self) -> AlgorithmInfo {
        let (name, description, complexity) = match self {
            SolveAlgorithm::Bfs => (
                "Breadth-First Search",
                "Expands cells level by level from the start; the first goal reached is a nearest one.",
                "O(V + E)",
            ),
            SolveAlgorithm::Dfs => (
                "Depth-First Search",
                "Follows one corridor as deep as possible before backtracking; finds some path quickly.",
                "O(V + E)",
            ),
            SolveAlgorithm::Dijkstra => (
                "Dijkstra's Algorithm",
                "Expands the cheapest known cell first; shortest paths under non-negative step costs.",
                "O((V + E) log V)",
            ),
            SolveAlgorithm::AStar => (
                "A* (A-Star)",
                "Dijkstra guided by the Manhattan distance to the nearest goal.",
                "O((V + E) log V)",
            ),
            SolveAlgorithm::Bidirectional => (
                "Bidirectional Search",
                "Breadth-first waves from the start and from every goal that stop where they meet.",
                "O(b^(d/2))",
            ),
        };
        AlgorithmInfo {
            algorithm: self,
            name,
            description,
            complexity,
            optimal: select_planner(self).is_optimal(),
            complete: true,
        }
    }
}

/// Catalog entries for every algorithm, in canonical order.
pub fn algorithm_catalog() -> Vec<AlgorithmInfo> {
    SolveAlgorithm::ALL.iter().map(|algorithm| algorithm.info()).collect()
}

/// One strategy run over a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolveRequest {
    pub algorithm: SolveAlgorithm,
    /// Wall-clock budget. `None` runs until the frontier empties.
    pub timeout: Option<Duration>,
}

impl SolveRequest {
    /// Request with the default budget from [`SolverConfig::default`].
    pub fn new(algorithm: SolveAlgorithm) -> Self {
        Self::from_config(algorithm, &SolverConfig::default())
    }

    pub fn from_config(algorithm: SolveAlgorithm, config: &SolverConfig) -> Self {
        Self {
            algorithm,
            timeout: config.timeout,
        }
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Telemetry for one finished run. Always produced, whatever the outcome.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunStatistics {
    pub algorithm: SolveAlgorithm,
    /// Terminal phase: `succeeded`, `exhausted` or `timed_out`.
    pub status: SearchPhase,
    pub nodes_explored: usize,
    pub max_frontier_size: usize,
    /// Visited, predecessor and cost entries held at the end of the run.
    pub state_size: usize,
    /// Positions on the path, start and goal inclusive. `0` without a path.
    pub path_length: usize,
    pub path_cost: Option<u32>,
    #[serde(rename = "elapsed_secs", serialize_with = "serialize_secs")]
    pub elapsed: Duration,
    pub timed_out: bool,
    /// Goal the path ends at.
    pub end_reached: Option<Position>,
    /// Bidirectional search only.
    pub meeting_point: Option<Position>,
}

fn serialize_secs<S>(duration: &Duration, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_f64(duration.as_secs_f64())
}

/// Path (when found) plus statistics for one run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SolveOutcome {
    pub path: Option<Vec<Position>>,
    pub statistics: RunStatistics,
}

impl SolveOutcome {
    pub fn found(&self) -> bool {
        self.path.is_some()
    }

    /// Number of moves along the path.
    pub fn step_count(&self) -> usize {
        self.path
            .as_ref()
            .map_or(0, |path| path.len().saturating_sub(1))
    }
}

/// Run one strategy on `grid` without progress reporting.
pub fn solve_maze(grid: &Grid, request: &SolveRequest) -> Result<SolveOutcome> {
    let mut observer = NoopObserver;
    solve_maze_with_observer(grid, request, &mut observer)
}

/// Run one strategy on `grid`, reporting progress to `observer`.
///
/// Exhaustion and timeouts are returned as outcomes; only reconstruction
/// defects surface as errors.
pub fn solve_maze_with_observer(
    grid: &Grid,
    request: &SolveRequest,
    observer: &mut dyn SearchObserver,
) -> Result<SolveOutcome> {
    let planner = select_planner(request.algorithm);
    tracing::debug!(
        algorithm = %request.algorithm,
        rows = grid.rows(),
        cols = grid.cols(),
        optimal = planner.is_optimal(),
        timeout = ?request.timeout,
        "starting search"
    );

    let deadline = Deadline::new(request.timeout);
    let run = {
        let mut ctx = SearchContext::new(grid, deadline, observer);
        planner.search(&mut ctx)?
    };
    let elapsed = deadline.elapsed();

    let statistics = RunStatistics {
        algorithm: request.algorithm,
        status: run.phase,
        nodes_explored: run.nodes_explored,
        max_frontier_size: run.max_frontier_size,
        state_size: run.state_size,
        path_length: run.path.as_ref().map_or(0, Vec::len),
        path_cost: run.path_cost,
        elapsed,
        timed_out: run.phase == SearchPhase::TimedOut,
        end_reached: run.end_reached,
        meeting_point: run.meeting_point,
    };

    match statistics.status {
        SearchPhase::TimedOut => tracing::warn!(
            algorithm = %request.algorithm,
            nodes_explored = statistics.nodes_explored,
            "search timed out after {:.3}s",
            elapsed.as_secs_f64()
        ),
        _ => tracing::debug!(
            algorithm = %request.algorithm,
            status = ?statistics.status,
            nodes_explored = statistics.nodes_explored,
            path_length = statistics.path_length,
            "search finished in {:.3}s",
            elapsed.as_secs_f64()
        ),
    }

    Ok(SolveOutcome {
        path: run.path,
        statistics,
    })
}
