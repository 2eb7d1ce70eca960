use std::path::PathBuf;

use thiserror::Error;

use crate::grid::Position;

/// Convenient result alias for the maze solver library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// The grid violates a structural or semantic invariant.
    #[error("invalid maze: {reason}")]
    InvalidMaze { reason: String },

    /// A maze text line could not be decoded into cell codes.
    #[error("invalid maze format at line {line}: {message}")]
    MazeParse { line: usize, message: String },

    /// Maze file could not be located at the given path.
    #[error("maze file not found at {path}")]
    MazeNotFound { path: PathBuf },

    /// Raised when an algorithm identifier is not one of the supported strategies.
    #[error("unsupported algorithm: {name}{}", format_suggestions(.suggestions))]
    UnsupportedAlgorithm {
        name: String,
        suggestions: Vec<String>,
    },

    /// Raised when a predecessor map cannot be walked back to its root,
    /// either because the chain breaks or because it cycles past the cap.
    #[error("path reconstruction from {from} to {to} failed: {reason}")]
    PathReconstruction {
        from: Position,
        to: Position,
        reason: String,
    },

    /// Raised when random maze generation parameters are out of range.
    #[error("invalid generator configuration: {message}")]
    InvalidGeneratorConfig { message: String },

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Wrapper for JSON serialization errors.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn invalid_maze(reason: impl Into<String>) -> Self {
        Error::InvalidMaze {
            reason: reason.into(),
        }
    }
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else if suggestions.len() == 1 {
        format!(". Did you mean '{}'?", suggestions[0])
    } else {
        format!(
            ". Did you mean one of: {}?",
            suggestions
                .iter()
                .map(|s| format!("'{}'", s))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}
