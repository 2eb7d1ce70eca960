//! Generate command handler for producing random solvable mazes.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use mazesolver_lib::generator::{DEFAULT_DIMENSION, DEFAULT_WALL_DENSITY};
use mazesolver_lib::{encode_maze, generate_maze, save_maze, GeneratorConfig};

use super::friendly_error;
use crate::output::{render_json, OutputFormat};

#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    /// Number of rows.
    #[arg(long, default_value_t = DEFAULT_DIMENSION)]
    pub rows: usize,
    /// Number of columns.
    #[arg(long, default_value_t = DEFAULT_DIMENSION)]
    pub cols: usize,
    /// Probability (0.0-1.0) that an interior cell is a wall.
    #[arg(long, default_value_t = DEFAULT_WALL_DENSITY)]
    pub density: f64,
    /// Seed for a reproducible maze.
    #[arg(long)]
    pub seed: Option<u64>,
    /// Write the maze to this file instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Serialize)]
struct GeneratedView<'a> {
    rows: usize,
    cols: usize,
    seed: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    path: Option<&'a PathBuf>,
    maze: String,
}

/// Handle the generate subcommand.
pub fn handle_generate_command(format: OutputFormat, args: &GenerateArgs) -> Result<()> {
    let config = GeneratorConfig {
        rows: args.rows,
        cols: args.cols,
        wall_density: args.density,
        seed: args.seed,
    };
    let generated = generate_maze(&config).map_err(friendly_error)?;

    if let Some(path) = &args.output {
        save_maze(&generated.grid, path)
            .map_err(friendly_error)
            .with_context(|| format!("failed to write maze to {}", path.display()))?;
    }

    match format {
        OutputFormat::Json => {
            let view = GeneratedView {
                rows: generated.grid.rows(),
                cols: generated.grid.cols(),
                seed: generated.seed,
                path: args.output.as_ref(),
                maze: encode_maze(&generated.grid),
            };
            render_json(&view).context("failed to write generate output")?;
        }
        OutputFormat::Text | OutputFormat::Basic => match &args.output {
            Some(path) => println!(
                "Wrote {}x{} maze to {} (seed {})",
                generated.grid.rows(),
                generated.grid.cols(),
                path.display(),
                generated.seed
            ),
            None => {
                print!("{}", encode_maze(&generated.grid));
                eprintln!("seed: {}", generated.seed);
            }
        },
    }
    Ok(())
}
