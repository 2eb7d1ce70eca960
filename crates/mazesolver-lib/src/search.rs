//! Per-run search bookkeeping and progress reporting.
//!
//! Every strategy run owns a fresh [`SearchState`]; nothing here is shared
//! between runs. Renderers observe a run through [`SearchObserver`], which
//! receives [`SearchProgress`] snapshots at a cadence the observer chooses.

use std::collections::{HashMap, HashSet};
use std::time::{Duration, Instant};

use serde::Serialize;

use crate::grid::{Grid, Position};

/// Lifecycle of one strategy run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchPhase {
    /// Frontier seeded, nothing popped yet.
    Initialized,
    Running,
    /// A goal (or, bidirectionally, a meeting point) was popped.
    Succeeded,
    /// Frontier emptied without reaching a goal.
    Exhausted,
    /// Wall-clock budget ran out before a terminal condition.
    TimedOut,
}

impl SearchPhase {
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            SearchPhase::Succeeded | SearchPhase::Exhausted | SearchPhase::TimedOut
        )
    }
}

/// Which search tree a snapshot or predecessor map belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchSide {
    /// Rooted at the start cell.
    Forward,
    /// Rooted at the goal cells (bidirectional search only).
    Backward,
}

/// Cooperative wall-clock budget, polled between expansion steps.
#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    started: Instant,
    budget: Option<Duration>,
}

impl Deadline {
    pub fn new(budget: Option<Duration>) -> Self {
        Self {
            started: Instant::now(),
            budget,
        }
    }

    /// A deadline that never expires.
    pub fn unbounded() -> Self {
        Self::new(None)
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// `true` once the elapsed time reaches the budget. A zero budget is
    /// expired immediately.
    pub fn expired(&self) -> bool {
        match self.budget {
            Some(budget) => self.started.elapsed() >= budget,
            None => false,
        }
    }
}

/// Snapshot handed to observers at checkpoints.
#[derive(Debug, Clone)]
pub struct SearchProgress<'a> {
    pub side: SearchSide,
    pub current: Position,
    /// Live frontier contents in no particular order for heap-based searches.
    pub frontier: Vec<Position>,
    /// Visited set of the side being advanced.
    pub visited: &'a HashSet<Position>,
    pub nodes_explored: usize,
}

/// Receives progress from a running search.
///
/// Implementations must not influence the search outcome; strategies call
/// them synchronously and continue regardless of what they do.
pub trait SearchObserver {
    /// Report every `n`th explored node. `0` disables progress snapshots.
    fn checkpoint_interval(&self) -> usize {
        0
    }

    /// Called at each checkpoint.
    fn on_progress(&mut self, _progress: &SearchProgress<'_>) {}

    /// Called on every phase transition, including the terminal one.
    fn on_phase(&mut self, _phase: SearchPhase) {}
}

/// Observer that ignores everything; used for headless runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl SearchObserver for NoopObserver {}

/// Observer that emits progress checkpoints as `debug` tracing events.
#[derive(Debug, Clone, Copy)]
pub struct LoggingObserver {
    interval: usize,
}

impl LoggingObserver {
    pub fn new(interval: usize) -> Self {
        Self { interval }
    }
}

impl SearchObserver for LoggingObserver {
    fn checkpoint_interval(&self) -> usize {
        self.interval
    }

    fn on_progress(&mut self, progress: &SearchProgress<'_>) {
        tracing::debug!(
            side = ?progress.side,
            current = %progress.current,
            frontier = progress.frontier.len(),
            visited = progress.visited.len(),
            nodes_explored = progress.nodes_explored,
            "search checkpoint"
        );
    }

    fn on_phase(&mut self, phase: SearchPhase) {
        if phase.is_terminal() {
            tracing::debug!(?phase, "search ended");
        } else {
            tracing::trace!(?phase, "search phase");
        }
    }
}

/// Owned copy of a [`SearchProgress`] snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressFrame {
    pub side: SearchSide,
    pub current: Position,
    pub frontier: Vec<Position>,
    pub visited: Vec<Position>,
    pub nodes_explored: usize,
}

/// Observer that keeps every snapshot and phase it sees, for replay by a
/// renderer or for inspection in tests.
#[derive(Debug, Clone, Default)]
pub struct ProgressRecorder {
    interval: usize,
    pub frames: Vec<ProgressFrame>,
    pub phases: Vec<SearchPhase>,
}

impl ProgressRecorder {
    pub fn new(interval: usize) -> Self {
        Self {
            interval,
            frames: Vec::new(),
            phases: Vec::new(),
        }
    }
}

impl SearchObserver for ProgressRecorder {
    fn checkpoint_interval(&self) -> usize {
        self.interval
    }

    fn on_progress(&mut self, progress: &SearchProgress<'_>) {
        let mut frontier = progress.frontier.clone();
        frontier.sort();
        let mut visited: Vec<Position> = progress.visited.iter().copied().collect();
        visited.sort();
        self.frames.push(ProgressFrame {
            side: progress.side,
            current: progress.current,
            frontier,
            visited,
            nodes_explored: progress.nodes_explored,
        });
    }

    fn on_phase(&mut self, phase: SearchPhase) {
        self.phases.push(phase);
    }
}

/// Everything a strategy needs for one run. Grid is borrowed read-only.
pub struct SearchContext<'a> {
    pub grid: &'a Grid,
    pub deadline: Deadline,
    observer: &'a mut dyn SearchObserver,
    interval: usize,
}

impl<'a> SearchContext<'a> {
    pub fn new(grid: &'a Grid, deadline: Deadline, observer: &'a mut dyn SearchObserver) -> Self {
        let interval = observer.checkpoint_interval();
        Self {
            grid,
            deadline,
            observer,
            interval,
        }
    }

    pub(crate) fn phase(&mut self, phase: SearchPhase) {
        self.observer.on_phase(phase);
    }

    /// Whether a snapshot should be taken after `nodes_explored` expansions.
    pub(crate) fn wants_checkpoint(&self, nodes_explored: usize) -> bool {
        self.interval != 0 && nodes_explored % self.interval == 0
    }

    pub(crate) fn report(&mut self, progress: &SearchProgress<'_>) {
        self.observer.on_progress(progress);
    }
}

/// Mutable bookkeeping for one direction of one run.
#[derive(Debug, Default, Clone)]
pub struct SearchState {
    /// Expanded positions (closed set).
    pub visited: HashSet<Position>,
    /// Positions that have ever entered the frontier, roots included.
    pub discovered: HashSet<Position>,
    pub predecessors: HashMap<Position, Position>,
    /// Best known step cost from the root (cost-aware searches only).
    pub costs: HashMap<Position, u32>,
    pub nodes_explored: usize,
    pub max_frontier_size: usize,
}

impl SearchState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a root position with zero cost.
    pub fn seed(&mut self, root: Position) {
        self.discovered.insert(root);
        self.costs.insert(root, 0);
    }

    pub fn is_visited(&self, pos: Position) -> bool {
        self.visited.contains(&pos)
    }

    pub fn is_discovered(&self, pos: Position) -> bool {
        self.discovered.contains(&pos)
    }

    /// Mark `pos` expanded and count it. Returns `false` if it already was.
    pub fn expand(&mut self, pos: Position) -> bool {
        if !self.visited.insert(pos) {
            return false;
        }
        self.nodes_explored += 1;
        true
    }

    /// Record `parent` as the predecessor of `pos` unless `pos` was already
    /// discovered. First writer wins.
    pub fn discover(&mut self, pos: Position, parent: Position) -> bool {
        if !self.discovered.insert(pos) {
            return false;
        }
        self.predecessors.insert(pos, parent);
        true
    }

    pub fn cost(&self, pos: Position) -> Option<u32> {
        self.costs.get(&pos).copied()
    }

    /// Overwrite cost and predecessor when `cost` strictly improves the best
    /// known value.
    pub fn relax(&mut self, pos: Position, parent: Position, cost: u32) -> bool {
        if self.cost(pos).is_some_and(|known| known <= cost) {
            return false;
        }
        self.costs.insert(pos, cost);
        self.predecessors.insert(pos, parent);
        self.discovered.insert(pos);
        true
    }

    pub fn track_frontier(&mut self, size: usize) {
        self.max_frontier_size = self.max_frontier_size.max(size);
    }

    /// Entries held across the visited set, predecessor map and cost table.
    pub fn footprint(&self) -> usize {
        self.visited.len() + self.predecessors.len() + self.costs.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discover_keeps_first_predecessor() {
        let mut state = SearchState::new();
        let root = Position::new(0, 0);
        state.seed(root);
        assert!(state.discover(Position::new(0, 1), root));
        assert!(!state.discover(Position::new(0, 1), Position::new(1, 1)));
        assert_eq!(state.predecessors[&Position::new(0, 1)], root);
        assert!(!state.discover(root, Position::new(0, 1)));
        assert!(!state.predecessors.contains_key(&root));
    }

    #[test]
    fn relax_only_accepts_strict_improvements() {
        let mut state = SearchState::new();
        let target = Position::new(2, 2);
        assert!(state.relax(target, Position::new(1, 2), 5));
        assert!(!state.relax(target, Position::new(2, 1), 5));
        assert!(state.relax(target, Position::new(2, 1), 4));
        assert_eq!(state.cost(target), Some(4));
        assert_eq!(state.predecessors[&target], Position::new(2, 1));
    }

    #[test]
    fn expand_counts_each_position_once() {
        let mut state = SearchState::new();
        assert!(state.expand(Position::new(0, 0)));
        assert!(!state.expand(Position::new(0, 0)));
        assert_eq!(state.nodes_explored, 1);
    }

    #[test]
    fn footprint_counts_every_table() {
        let mut state = SearchState::new();
        let root = Position::new(0, 0);
        state.seed(root);
        state.expand(root);
        state.relax(Position::new(0, 1), root, 1);
        assert_eq!(state.footprint(), 1 + 1 + 2);
    }

    #[test]
    fn zero_budget_deadline_is_expired() {
        assert!(Deadline::new(Some(Duration::ZERO)).expired());
        assert!(!Deadline::unbounded().expired());
        assert!(!Deadline::new(Some(Duration::from_secs(3600))).expired());
    }

    #[test]
    fn terminal_phases() {
        assert!(!SearchPhase::Initialized.is_terminal());
        assert!(!SearchPhase::Running.is_terminal());
        assert!(SearchPhase::Succeeded.is_terminal());
        assert!(SearchPhase::Exhausted.is_terminal());
        assert!(SearchPhase::TimedOut.is_terminal());
    }
}
