//! Algorithms command handler listing the available search strategies.

use anyhow::{Context, Result};

use mazesolver_lib::algorithm_catalog;

use crate::output::OutputFormat;

/// Handle the algorithms subcommand.
pub fn handle_algorithms_command(format: OutputFormat) -> Result<()> {
    format
        .render_catalog(&algorithm_catalog())
        .context("failed to write algorithm list")
}
