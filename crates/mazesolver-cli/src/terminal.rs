//! Terminal styling and color utilities.
//!
//! This module provides ANSI escape code definitions and color detection
//! for terminal output formatting.

/// ANSI escape codes for text styling and colors.
pub mod colors {
    /// Reset all styling.
    pub const RESET: &str = "\x1b[0m";

    /// Bold green for the start cell and successful runs.
    pub const START: &str = "\x1b[1;32m";
    /// Bold magenta for goal cells.
    pub const GOAL: &str = "\x1b[1;35m";
    /// Yellow for path cells.
    pub const PATH: &str = "\x1b[33m";
    /// Gray for walls and secondary text.
    pub const GRAY: &str = "\x1b[90m";
    /// Bright bold white for emphasis (headings, coordinates).
    pub const WHITE_BOLD: &str = "\x1b[1;97m";
    /// Cyan for banners.
    pub const CYAN: &str = "\x1b[36m";
    /// Red for failed or timed-out runs.
    pub const RED: &str = "\x1b[31m";
}

/// A collection of resolved color codes, either actual ANSI sequences
/// or empty strings when color is disabled.
#[derive(Debug, Clone, Copy)]
pub struct ColorPalette {
    pub reset: &'static str,
    pub start: &'static str,
    pub goal: &'static str,
    pub path: &'static str,
    pub gray: &'static str,
    pub white_bold: &'static str,
    pub cyan: &'static str,
    pub red: &'static str,
}

impl ColorPalette {
    /// Create a palette with actual ANSI color codes.
    #[must_use]
    pub const fn colored() -> Self {
        Self {
            reset: colors::RESET,
            start: colors::START,
            goal: colors::GOAL,
            path: colors::PATH,
            gray: colors::GRAY,
            white_bold: colors::WHITE_BOLD,
            cyan: colors::CYAN,
            red: colors::RED,
        }
    }

    /// Create a palette with no colors (empty strings).
    #[must_use]
    pub const fn plain() -> Self {
        Self {
            reset: "",
            start: "",
            goal: "",
            path: "",
            gray: "",
            white_bold: "",
            cyan: "",
            red: "",
        }
    }

    /// `colored()` if the terminal supports ANSI colors, otherwise `plain()`.
    #[must_use]
    pub fn detect() -> Self {
        if supports_color() {
            Self::colored()
        } else {
            Self::plain()
        }
    }
}

impl Default for ColorPalette {
    fn default() -> Self {
        Self::detect()
    }
}

/// Check if the terminal supports ANSI color codes.
///
/// This function respects:
/// - The `NO_COLOR` environment variable (https://no-color.org/)
/// - The `TERM=dumb` convention for non-capable terminals
#[must_use]
pub fn supports_color() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    if let Ok(term) = std::env::var("TERM") {
        if term.eq_ignore_ascii_case("dumb") {
            return false;
        }
    }
    true
}

/// Check if the terminal supports Unicode characters, based on the `LANG`
/// and `LC_ALL` locale hints.
#[must_use]
pub fn supports_unicode() -> bool {
    for key in ["LANG", "LC_ALL"] {
        if let Ok(value) = std::env::var(key) {
            if value.to_uppercase().contains("UTF") {
                return true;
            }
        }
    }
    // On Windows, assume Unicode support unless TERM suggests otherwise
    #[cfg(windows)]
    {
        if let Ok(term) = std::env::var("TERM") {
            return !term.eq_ignore_ascii_case("dumb");
        }
        return true;
    }
    #[cfg(not(windows))]
    {
        false
    }
}

/// Format a number with thousand separators (commas).
///
/// # Examples
///
/// ```
/// # use mazesolver_cli::terminal::format_with_separators;
/// assert_eq!(format_with_separators(999), "999");
/// assert_eq!(format_with_separators(1000), "1,000");
/// assert_eq!(format_with_separators(1234567), "1,234,567");
/// ```
#[must_use]
pub fn format_with_separators(n: u64) -> String {
    let digits = n.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
