use std::collections::HashSet;
use std::fmt;

use serde::Serialize;

use crate::error::{Error, Result};

/// Smallest accepted edge length for a maze grid.
pub const MIN_DIMENSION: usize = 3;

/// Axis-aligned moves in the fixed expansion order: up, down, left, right.
///
/// Depth-first results and priority-queue tie-breaks depend on this order.
const DIRECTIONS: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Kind of a single maze cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CellKind {
    Open,
    Wall,
    Start,
    Goal,
}

impl CellKind {
    /// Decode the integer tag used by the maze text format.
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(CellKind::Open),
            1 => Some(CellKind::Wall),
            2 => Some(CellKind::Start),
            3 => Some(CellKind::Goal),
            _ => None,
        }
    }

    /// Integer tag used by the maze text format.
    pub fn code(self) -> u8 {
        match self {
            CellKind::Open => 0,
            CellKind::Wall => 1,
            CellKind::Start => 2,
            CellKind::Goal => 3,
        }
    }
}

/// Zero-based `(row, col)` coordinate within a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Manhattan distance `|dr| + |dc|`.
    pub fn manhattan(self, other: Position) -> u32 {
        (self.row.abs_diff(other.row) + self.col.abs_diff(other.col)) as u32
    }

    /// Whether `other` is one axis-aligned step away.
    pub fn is_adjacent(self, other: Position) -> bool {
        self.manhattan(other) == 1
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl From<(usize, usize)> for Position {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}

/// Immutable rectangular maze.
///
/// Construction validates the grid once; every search afterwards only reads
/// it, so a single `Grid` can be shared by concurrent runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<CellKind>,
    start: Position,
    goals: Vec<Position>,
    goal_set: HashSet<Position>,
}

impl Grid {
    /// Build a grid from rows of cell kinds, locating the start and goal cells.
    ///
    /// Fails when the grid is empty, non-rectangular, smaller than 3×3, has no
    /// start or more than one, or has no goal.
    pub fn from_rows(rows: Vec<Vec<CellKind>>) -> Result<Self> {
        let Some(first) = rows.first() else {
            return Err(Error::invalid_maze("maze is empty"));
        };
        let cols = first.len();
        let row_count = rows.len();

        for (index, row) in rows.iter().enumerate() {
            if row.len() != cols {
                return Err(Error::invalid_maze(format!(
                    "inconsistent row length at row {}: expected {}, found {}",
                    index + 1,
                    cols,
                    row.len()
                )));
            }
        }

        if row_count < MIN_DIMENSION || cols < MIN_DIMENSION {
            return Err(Error::invalid_maze(format!(
                "maze must be at least {MIN_DIMENSION}x{MIN_DIMENSION}, found {row_count}x{cols}"
            )));
        }

        let cells: Vec<CellKind> = rows.into_iter().flatten().collect();

        let mut start = None;
        let mut goals = Vec::new();
        for (index, kind) in cells.iter().enumerate() {
            let pos = Position::new(index / cols, index % cols);
            match kind {
                CellKind::Start => {
                    if let Some(existing) = start {
                        return Err(Error::invalid_maze(format!(
                            "multiple start cells (2) found at {existing} and {pos}"
                        )));
                    }
                    start = Some(pos);
                }
                CellKind::Goal => goals.push(pos),
                CellKind::Open | CellKind::Wall => {}
            }
        }

        let Some(start) = start else {
            return Err(Error::invalid_maze("start position (2) not found in maze"));
        };
        if goals.is_empty() {
            return Err(Error::invalid_maze(
                "at least one goal position (3) must be present in maze",
            ));
        }

        tracing::debug!(
            rows = row_count,
            cols,
            %start,
            goals = goals.len(),
            "maze validation passed"
        );

        let goal_set = goals.iter().copied().collect();
        Ok(Self {
            rows: row_count,
            cols,
            cells,
            start,
            goals,
            goal_set,
        })
    }

    /// Build a grid from the integer tags of the maze text format.
    pub fn from_codes(codes: &[Vec<i64>]) -> Result<Self> {
        let mut rows = Vec::with_capacity(codes.len());
        for (r, row) in codes.iter().enumerate() {
            let mut kinds = Vec::with_capacity(row.len());
            for (c, &code) in row.iter().enumerate() {
                let kind = CellKind::from_code(code).ok_or_else(|| {
                    Error::invalid_maze(format!("unknown cell code {code} at ({r}, {c})"))
                })?;
                kinds.push(kind);
            }
            rows.push(kinds);
        }
        Self::from_rows(rows)
    }

    /// Replace the goal set with explicit positions.
    ///
    /// Goals must be in bounds and not walls. Former goal cells become open
    /// and the new ones are stored as goal cells, so the grid encodes to the
    /// retargeted maze. A goal may coincide with the start cell; that cell
    /// keeps its start kind and counts as a goal through the goal set only.
    pub fn with_goals(mut self, goals: impl IntoIterator<Item = Position>) -> Result<Self> {
        let mut ordered = Vec::new();
        let mut set = HashSet::new();
        for goal in goals {
            match self.cell(goal) {
                None => {
                    return Err(Error::invalid_maze(format!(
                        "goal {goal} is outside the {}x{} grid",
                        self.rows, self.cols
                    )))
                }
                Some(CellKind::Wall) => {
                    return Err(Error::invalid_maze(format!("goal {goal} is a wall cell")))
                }
                Some(_) => {
                    if set.insert(goal) {
                        ordered.push(goal);
                    }
                }
            }
        }
        if ordered.is_empty() {
            return Err(Error::invalid_maze("goal set must not be empty"));
        }
        ordered.sort();

        for previous in &self.goals {
            let index = self.index(*previous);
            if self.cells[index] == CellKind::Goal {
                self.cells[index] = CellKind::Open;
            }
        }
        for goal in &ordered {
            let index = self.index(*goal);
            if self.cells[index] != CellKind::Start {
                self.cells[index] = CellKind::Goal;
            }
        }
        self.goals = ordered;
        self.goal_set = set;
        Ok(self)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always `false` for a validated grid; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Whether `pos` lies inside the grid bounds.
    pub fn contains(&self, pos: Position) -> bool {
        pos.row < self.rows && pos.col < self.cols
    }

    /// Row-major index of an in-bounds position.
    fn index(&self, pos: Position) -> usize {
        pos.row * self.cols + pos.col
    }

    /// Cell kind at `pos`, or `None` when out of bounds.
    pub fn cell(&self, pos: Position) -> Option<CellKind> {
        if self.contains(pos) {
            Some(self.cells[self.index(pos)])
        } else {
            None
        }
    }

    /// Out-of-bounds positions count as walls.
    pub fn is_wall(&self, pos: Position) -> bool {
        matches!(self.cell(pos), None | Some(CellKind::Wall))
    }

    pub fn is_goal(&self, pos: Position) -> bool {
        self.goal_set.contains(&pos)
    }

    pub fn find_start(&self) -> Position {
        self.start
    }

    /// Goal positions in row-major order.
    pub fn find_goals(&self) -> &[Position] {
        &self.goals
    }

    /// Manhattan distance from `pos` to the nearest goal.
    pub fn nearest_goal_distance(&self, pos: Position) -> u32 {
        self.goals
            .iter()
            .map(|goal| pos.manhattan(*goal))
            .min()
            .unwrap_or(0)
    }

    /// In-bounds axis-aligned neighbours of `pos` in up, down, left, right order.
    ///
    /// Walls are included; callers filter with [`Grid::is_wall`].
    pub fn neighbors(&self, pos: Position) -> impl Iterator<Item = Position> + '_ {
        DIRECTIONS.iter().filter_map(move |&(dr, dc)| {
            let row = pos.row.checked_add_signed(dr)?;
            let col = pos.col.checked_add_signed(dc)?;
            let next = Position::new(row, col);
            self.contains(next).then_some(next)
        })
    }

    /// Neighbours of `pos` that are not walls, in the fixed expansion order.
    pub fn open_neighbors(&self, pos: Position) -> impl Iterator<Item = Position> + '_ {
        self.neighbors(pos).filter(move |next| !self.is_wall(*next))
    }

    /// Iterate over rows of cell kinds.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[CellKind]> {
        self.cells.chunks(self.cols)
    }
}
