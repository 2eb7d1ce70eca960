// Module exports for CLI subcommands
//
// Each module handles one subcommand. main.rs parses arguments, initialises
// logging and dispatches to these handlers.

pub mod algorithms;
pub mod compare;
pub mod generate;
pub mod solve;

use std::time::Duration;

use anyhow::anyhow;

use mazesolver_lib::{Error as SolveError, SolverConfig};

/// Apply `--timeout <secs>` / `--no-timeout` on top of the environment
/// configuration.
pub fn resolve_config(timeout_secs: Option<f64>, no_timeout: bool) -> anyhow::Result<SolverConfig> {
    let config = SolverConfig::from_env();
    if no_timeout {
        return Ok(config.with_timeout(None));
    }
    match timeout_secs {
        None => Ok(config),
        Some(secs) => {
            let budget = Duration::try_from_secs_f64(secs)
                .map_err(|_| anyhow!("--timeout must be a non-negative number of seconds"))?;
            Ok(config.with_timeout(Some(budget)))
        }
    }
}

/// Map library errors to messages that point at the offending input.
pub fn friendly_error(err: SolveError) -> anyhow::Error {
    match err {
        SolveError::UnsupportedAlgorithm { name, suggestions } => {
            anyhow!(format_unknown_algorithm_message(&name, &suggestions))
        }
        SolveError::MazeNotFound { path } => anyhow!(
            "Maze file not found at {}. Generate one with `mazesolver generate --output {}`.",
            path.display(),
            path.display()
        ),
        SolveError::MazeParse { line, message } => {
            anyhow!("Could not read maze: line {line}: {message}.")
        }
        SolveError::InvalidMaze { reason } => anyhow!("Invalid maze: {reason}."),
        other => anyhow::Error::new(other),
    }
}

fn format_unknown_algorithm_message(name: &str, suggestions: &[String]) -> String {
    let mut message = format!("Unknown algorithm '{}'.", name);
    if let Some(first) = suggestions.first() {
        let formatted = if suggestions.len() == 1 {
            format!("Did you mean '{first}'?")
        } else {
            let joined = suggestions
                .iter()
                .map(|s| format!("'{}'", s))
                .collect::<Vec<_>>()
                .join(", ");
            format!("Did you mean one of: {}?", joined)
        };
        message.push(' ');
        message.push_str(&formatted);
    }
    message.push_str(" Supported: bfs, dfs, dijkstra, astar, bidirectional.");
    message
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_algorithm_message_lists_suggestion() {
        let message = format_unknown_algorithm_message("bsf", &["bfs".to_string()]);
        assert!(message.starts_with("Unknown algorithm 'bsf'. Did you mean 'bfs'?"));
    }

    #[test]
    fn timeout_flags_override_budget() {
        let config = resolve_config(Some(1.5), false).expect("valid");
        assert_eq!(config.timeout, Some(Duration::from_millis(1500)));
        let config = resolve_config(Some(0.0), false).expect("valid");
        assert_eq!(config.timeout, Some(Duration::ZERO));
        let config = resolve_config(Some(1.5), true).expect("valid");
        assert_eq!(config.timeout, None);
        assert!(resolve_config(Some(-1.0), false).is_err());
    }
}
