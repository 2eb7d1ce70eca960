use std::collections::HashSet;
use std::fmt::Write;

use serde::Serialize;

use crate::grid::{CellKind, Grid, Position};
use crate::search::SearchPhase;
use crate::solver::{RunStatistics, SolveAlgorithm, SolveOutcome};

/// Position visited by a solved path.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct PathStep {
    pub index: usize,
    pub position: Position,
}

/// Structured representation of a solve that higher-level consumers can serialise.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SolveSummary {
    pub algorithm: SolveAlgorithm,
    pub status: SearchPhase,
    pub rows: usize,
    pub cols: usize,
    pub start: Position,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goal: Option<Position>,
    pub steps: Vec<PathStep>,
    pub statistics: RunStatistics,
}

impl SolveSummary {
    pub fn from_outcome(grid: &Grid, outcome: &SolveOutcome) -> Self {
        let steps = outcome
            .path
            .iter()
            .flatten()
            .enumerate()
            .map(|(index, &position)| PathStep { index, position })
            .collect();

        Self {
            algorithm: outcome.statistics.algorithm,
            status: outcome.statistics.status,
            rows: grid.rows(),
            cols: grid.cols(),
            start: grid.find_start(),
            goal: outcome.statistics.end_reached,
            steps,
            statistics: outcome.statistics.clone(),
        }
    }

    /// Number of moves along the path.
    pub fn moves(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }

    pub fn render_plain(&self) -> String {
        let mut buffer = String::new();
        let stats = &self.statistics;
        match self.goal {
            Some(goal) => {
                let _ = writeln!(
                    buffer,
                    "Path: {} -> {} ({} moves, algorithm: {})",
                    self.start,
                    goal,
                    self.moves(),
                    self.algorithm
                );
                for step in &self.steps {
                    let _ = writeln!(buffer, "{:>3}: {}", step.index, step.position);
                }
            }
            None => {
                let reason = if stats.timed_out {
                    "timed out"
                } else {
                    "no path exists"
                };
                let _ = writeln!(
                    buffer,
                    "No path from {} ({reason}, algorithm: {})",
                    self.start, self.algorithm
                );
            }
        }

        let _ = writeln!(
            buffer,
            "Explored {} nodes, max frontier {}, {:.3} ms",
            stats.nodes_explored,
            stats.max_frontier_size,
            stats.elapsed.as_secs_f64() * 1000.0
        );
        if let Some(meeting) = stats.meeting_point {
            let _ = writeln!(buffer, "Searches met at {meeting}");
        }
        buffer
    }
}

/// Draw the grid as ASCII: `#` wall, `S` start, `G` goal, `*` path, `.` open.
pub fn render_maze(grid: &Grid, path: Option<&[Position]>) -> String {
    let on_path: HashSet<Position> = path.unwrap_or_default().iter().copied().collect();
    let mut buffer = String::with_capacity(grid.len() + grid.rows());
    for (row, cells) in grid.iter_rows().enumerate() {
        for (col, kind) in cells.iter().enumerate() {
            let pos = Position::new(row, col);
            let glyph = match kind {
                CellKind::Wall => '#',
                CellKind::Start => 'S',
                _ if grid.is_goal(pos) => 'G',
                _ if on_path.contains(&pos) => '*',
                _ => '.',
            };
            buffer.push(glyph);
        }
        buffer.push('\n');
    }
    buffer
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maze::parse_maze;
    use crate::solver::{solve_maze, SolveRequest};

    #[test]
    fn summary_lists_steps_from_start() {
        let grid = parse_maze("2 0 0\n1 1 0\n0 0 3").expect("maze");
        let outcome = solve_maze(&grid, &SolveRequest::new(SolveAlgorithm::Bfs)).expect("solve");
        let summary = SolveSummary::from_outcome(&grid, &outcome);
        assert_eq!(summary.moves(), 4);
        assert_eq!(summary.steps[0].position, Position::new(0, 0));

        let text = summary.render_plain();
        assert!(text.starts_with("Path: (0, 0) -> (2, 2) (4 moves, algorithm: bfs)"));
        assert!(text.contains("  4: (2, 2)"));
    }

    #[test]
    fn summary_explains_missing_path() {
        let grid = parse_maze("2 1 0\n1 1 0\n0 0 3").expect("maze");
        let outcome = solve_maze(&grid, &SolveRequest::new(SolveAlgorithm::Dfs)).expect("solve");
        let summary = SolveSummary::from_outcome(&grid, &outcome);
        assert!(summary.steps.is_empty());
        assert!(summary.render_plain().contains("no path exists"));

        let json = serde_json::to_value(&summary).expect("serialize");
        assert_eq!(json["status"], "exhausted");
        assert!(json.get("goal").is_none());
    }

    #[test]
    fn maze_overlay_marks_path() {
        let grid = parse_maze("2 0 0\n1 1 0\n3 0 0").expect("maze");
        let outcome = solve_maze(&grid, &SolveRequest::new(SolveAlgorithm::AStar)).expect("solve");
        let drawn = render_maze(&grid, outcome.path.as_deref());
        assert_eq!(drawn, "S**\n##*\nG**\n");
        assert_eq!(render_maze(&grid, None), "S..\n##.\nG..\n");
    }
}
