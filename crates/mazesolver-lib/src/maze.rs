//! Maze text format.
//!
//! One row per line, each cell an integer tag: `0` open, `1` wall, `2` start,
//! `3` goal. Rows may be whitespace separated (`2 0 1`), comma separated
//! (`2,0,1`), or written as a bracketed list (`[2, 0, 1]`). Blank lines are
//! ignored.

use std::fmt::Write;
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::grid::Grid;

/// Decode maze text into a validated [`Grid`].
pub fn parse_maze(text: &str) -> Result<Grid> {
    let mut codes = Vec::new();
    for (index, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        codes.push(parse_row(line, index + 1)?);
    }

    if codes.is_empty() {
        return Err(Error::invalid_maze("maze file is empty"));
    }

    Grid::from_codes(&codes)
}

/// Load and validate a maze from a text file.
pub fn load_maze(path: &Path) -> Result<Grid> {
    if !path.exists() {
        return Err(Error::MazeNotFound {
            path: path.to_path_buf(),
        });
    }
    let text = fs::read_to_string(path)?;
    let grid = parse_maze(&text)?;
    tracing::info!(
        "loaded maze from {}: {}x{}",
        path.display(),
        grid.rows(),
        grid.cols()
    );
    Ok(grid)
}

/// Encode a grid in the whitespace-separated text form.
pub fn encode_maze(grid: &Grid) -> String {
    let mut buffer = String::with_capacity(grid.len() * 2);
    for row in grid.iter_rows() {
        let line = row
            .iter()
            .map(|kind| kind.code().to_string())
            .collect::<Vec<_>>()
            .join(" ");
        let _ = writeln!(buffer, "{line}");
    }
    buffer
}

/// Write a grid to `path` in the whitespace-separated text form.
pub fn save_maze(grid: &Grid, path: &Path) -> Result<()> {
    fs::write(path, encode_maze(grid))?;
    tracing::info!("saved maze to {}", path.display());
    Ok(())
}

fn parse_row(line: &str, line_number: usize) -> Result<Vec<i64>> {
    let body = match (line.strip_prefix('['), line.ends_with(']')) {
        (Some(rest), true) => &rest[..rest.len() - 1],
        (Some(_), false) => {
            return Err(Error::MazeParse {
                line: line_number,
                message: "unterminated '[' row".to_string(),
            })
        }
        (None, _) => line,
    };

    body.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .map(|token| {
            token.parse::<i64>().map_err(|err| Error::MazeParse {
                line: line_number,
                message: format!("invalid cell '{token}': {err}"),
            })
        })
        .collect()
}
