//! Search strategies implementing the Strategy pattern.
//!
//! This module provides the `SearchPlanner` trait and one implementation per
//! algorithm. The driver in [`super::solve_maze_with_observer`] only talks to
//! the trait, so adding an algorithm means adding a planner and a
//! [`SolveAlgorithm`] variant.

use crate::error::Result;
use crate::path::{
    search_a_star, search_bfs, search_bidirectional, search_dfs, search_dijkstra, SearchRun,
};
use crate::search::SearchContext;

use super::SolveAlgorithm;

/// Trait for maze search strategies.
///
/// Implementations own no state between runs; all bookkeeping lives in the
/// run's own `SearchState`.
pub trait SearchPlanner: Send + Sync {
    /// The algorithm identifier for this planner.
    fn algorithm(&self) -> SolveAlgorithm;

    /// Run the search to a terminal phase.
    fn search(&self, ctx: &mut SearchContext<'_>) -> Result<SearchRun>;

    /// Whether the returned path is guaranteed to be a shortest path.
    fn is_optimal(&self) -> bool {
        true
    }
}

/// Breadth-first search planner.
///
/// Explores level by level, so the first goal reached is a nearest one.
#[derive(Debug, Clone, Default)]
pub struct BfsPlanner;

impl SearchPlanner for BfsPlanner {
    fn algorithm(&self) -> SolveAlgorithm {
        SolveAlgorithm::Bfs
    }

    fn search(&self, ctx: &mut SearchContext<'_>) -> Result<SearchRun> {
        search_bfs(ctx)
    }
}

/// Depth-first search planner. Finds some path, not necessarily a short one.
#[derive(Debug, Clone, Default)]
pub struct DfsPlanner;

impl SearchPlanner for DfsPlanner {
    fn algorithm(&self) -> SolveAlgorithm {
        SolveAlgorithm::Dfs
    }

    fn search(&self, ctx: &mut SearchContext<'_>) -> Result<SearchRun> {
        search_dfs(ctx)
    }

    fn is_optimal(&self) -> bool {
        false
    }
}

/// Dijkstra planner over uniform step costs.
#[derive(Debug, Clone, Default)]
pub struct DijkstraPlanner;

impl SearchPlanner for DijkstraPlanner {
    fn algorithm(&self) -> SolveAlgorithm {
        SolveAlgorithm::Dijkstra
    }

    fn search(&self, ctx: &mut SearchContext<'_>) -> Result<SearchRun> {
        search_dijkstra(ctx)
    }
}

/// A* planner using Manhattan distance to the nearest goal.
#[derive(Debug, Clone, Default)]
pub struct AStarPlanner;

impl SearchPlanner for AStarPlanner {
    fn algorithm(&self) -> SolveAlgorithm {
        SolveAlgorithm::AStar
    }

    fn search(&self, ctx: &mut SearchContext<'_>) -> Result<SearchRun> {
        search_a_star(ctx)
    }
}

/// Bidirectional breadth-first planner.
///
/// Alternating on queue length means the two halves need not be balanced, so
/// the joined path is valid but not guaranteed shortest.
#[derive(Debug, Clone, Default)]
pub struct BidirectionalPlanner;

impl SearchPlanner for BidirectionalPlanner {
    fn algorithm(&self) -> SolveAlgorithm {
        SolveAlgorithm::Bidirectional
    }

    fn search(&self, ctx: &mut SearchContext<'_>) -> Result<SearchRun> {
        search_bidirectional(ctx)
    }

    fn is_optimal(&self) -> bool {
        false
    }
}

/// Select the planner for an algorithm.
pub fn select_planner(algorithm: SolveAlgorithm) -> Box<dyn SearchPlanner> {
    match algorithm {
        SolveAlgorithm::Bfs => Box::new(BfsPlanner),
        SolveAlgorithm::Dfs => Box::new(DfsPlanner),
        SolveAlgorithm::Dijkstra => Box::new(DijkstraPlanner),
        SolveAlgorithm::AStar => Box::new(AStarPlanner),
        SolveAlgorithm::Bidirectional => Box::new(BidirectionalPlanner),
    }
}
