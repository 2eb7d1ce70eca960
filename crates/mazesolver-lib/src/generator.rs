//! Seeded random maze generation.
//!
//! Interior cells are walled at random, then a monotone corridor moving only
//! down or right is carved from the top-left to the bottom-right corner, so
//! every generated maze is solvable.

use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};
use serde::Serialize;

use crate::error::{Error, Result};
use crate::grid::{CellKind, Grid, Position, MIN_DIMENSION};

/// Largest accepted edge length for a generated maze.
pub const MAX_DIMENSION: usize = 50;

/// Edge length used when no size is requested.
pub const DEFAULT_DIMENSION: usize = 25;

pub const DEFAULT_WALL_DENSITY: f64 = 0.5;

/// Parameters for [`generate_maze`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeneratorConfig {
    pub rows: usize,
    pub cols: usize,
    /// Probability that an interior cell starts out as a wall.
    pub wall_density: f64,
    /// Fixed seed for reproducible mazes; drawn at random when `None`.
    pub seed: Option<u64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_DIMENSION,
            cols: DEFAULT_DIMENSION,
            wall_density: DEFAULT_WALL_DENSITY,
            seed: None,
        }
    }
}

impl GeneratorConfig {
    /// Square maze with default density.
    pub fn square(size: usize) -> Self {
        Self {
            rows: size,
            cols: size,
            ..Self::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_wall_density(mut self, wall_density: f64) -> Self {
        self.wall_density = wall_density;
        self
    }

    pub fn validate(&self) -> Result<()> {
        for (label, value) in [("rows", self.rows), ("cols", self.cols)] {
            if !(MIN_DIMENSION..=MAX_DIMENSION).contains(&value) {
                return Err(Error::InvalidGeneratorConfig {
                    message: format!(
                        "{label} must be between {MIN_DIMENSION} and {MAX_DIMENSION}, got {value}"
                    ),
                });
            }
        }
        if !(0.0..=1.0).contains(&self.wall_density) {
            return Err(Error::InvalidGeneratorConfig {
                message: format!(
                    "wall density must be between 0.0 and 1.0, got {}",
                    self.wall_density
                ),
            });
        }
        Ok(())
    }
}

/// A generated grid together with the seed that reproduces it.
#[derive(Debug, Clone)]
pub struct GeneratedMaze {
    pub grid: Grid,
    pub seed: u64,
}

/// Generate a solvable maze, drawing a seed when none is configured.
pub fn generate_maze(config: &GeneratorConfig) -> Result<GeneratedMaze> {
    config.validate()?;
    let seed = config.seed.unwrap_or_else(|| rand::rng().random());
    let mut rng = StdRng::seed_from_u64(seed);
    let grid = generate_maze_with(config, &mut rng)?;
    tracing::info!(
        "generated {}x{} maze (seed {seed}, density {:.2})",
        config.rows,
        config.cols,
        config.wall_density
    );
    Ok(GeneratedMaze { grid, seed })
}

/// Generate a solvable maze using the caller's random source. The `seed`
/// field of `config` is ignored.
pub fn generate_maze_with<R: RngExt + ?Sized>(
    config: &GeneratorConfig,
    rng: &mut R,
) -> Result<Grid> {
    config.validate()?;
    let (rows, cols) = (config.rows, config.cols);
    let mut cells = vec![vec![CellKind::Wall; cols]; rows];

    for row in cells.iter_mut().take(rows - 1).skip(1) {
        for cell in row.iter_mut().take(cols - 1).skip(1) {
            if !rng.random_bool(config.wall_density) {
                *cell = CellKind::Open;
            }
        }
    }

    for pos in carve_corridor(rows, cols, rng) {
        cells[pos.row][pos.col] = CellKind::Open;
    }
    cells[0][0] = CellKind::Start;
    cells[rows - 1][cols - 1] = CellKind::Goal;

    Grid::from_rows(cells)
}

/// Monotone corridor from `(0, 0)` to `(rows - 1, cols - 1)`: random down or
/// right steps until an edge is reached, then straight along it.
fn carve_corridor<R: RngExt + ?Sized>(rows: usize, cols: usize, rng: &mut R) -> Vec<Position> {
    let mut corridor = Vec::with_capacity(rows + cols - 1);
    let (mut row, mut col) = (0, 0);
    corridor.push(Position::new(row, col));
    while row < rows - 1 || col < cols - 1 {
        let down = if row == rows - 1 {
            false
        } else if col == cols - 1 {
            true
        } else {
            rng.random_bool(0.5)
        };
        if down {
            row += 1;
        } else {
            col += 1;
        }
        corridor.push(Position::new(row, col));
    }
    corridor
}
