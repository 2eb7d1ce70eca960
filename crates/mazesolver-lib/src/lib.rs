//! Mazesolver library entry points.
//!
//! This crate exposes the grid model, the maze text codec, the five search
//! strategies, and the run driver that executes one of them under a
//! wall-clock budget. Higher-level consumers (the CLI, benchmarks) should only
//! depend on the functions exported here instead of reimplementing behavior.
//!

pub mod benchmark;
pub mod config;
pub mod error;
pub mod generator;
pub mod grid;
pub mod maze;
pub mod output;
pub mod path;
pub mod search;
pub mod solver;

pub use benchmark::{
    run_benchmark, run_benchmark_suite, save_report, AlgorithmSummary, BenchmarkConfig,
    BenchmarkReport, BenchmarkSuite, MazeBenchmark,
};
pub use config::SolverConfig;
pub use error::{Error, Result};
pub use generator::{generate_maze, GeneratedMaze, GeneratorConfig};
pub use grid::{CellKind, Grid, Position};
pub use maze::{encode_maze, load_maze, parse_maze, save_maze};
pub use output::{render_maze, SolveSummary};
pub use path::reconstruct_path;
pub use search::{
    LoggingObserver, NoopObserver, ProgressRecorder, SearchObserver, SearchPhase, SearchProgress,
};
pub use solver::{
    algorithm_catalog, solve_maze, solve_maze_with_observer, AlgorithmInfo, RunStatistics,
    SolveAlgorithm, SolveOutcome, SolveRequest,
};
