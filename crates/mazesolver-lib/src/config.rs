//! Solver defaults.
//!
//! # Environment Variables
//!
//! - `MAZESOLVER_TIMEOUT_SECS`: wall-clock budget per run in seconds
//!   (default: `30`). `none` or `off` disables the budget.
//! - `MAZESOLVER_PROGRESS_INTERVAL`: report progress every N explored nodes
//!   (default: `25`, `0` disables progress reports).
//!
//! Unparseable values are logged at `warn` and replaced by the default.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default wall-clock budget for one run.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default number of explored nodes between progress reports.
pub const DEFAULT_PROGRESS_INTERVAL: usize = 25;

pub const TIMEOUT_ENV: &str = "MAZESOLVER_TIMEOUT_SECS";
pub const PROGRESS_INTERVAL_ENV: &str = "MAZESOLVER_PROGRESS_INTERVAL";

/// Configuration shared by every run started from one front end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolverConfig {
    /// `None` means no budget.
    pub timeout: Option<Duration>,
    pub progress_interval: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            timeout: Some(DEFAULT_TIMEOUT),
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
        }
    }
}

impl SolverConfig {
    /// Create configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let timeout = match lookup(TIMEOUT_ENV) {
            Some(raw) => parse_timeout(&raw).unwrap_or_else(|| {
                tracing::warn!(
                    "ignoring invalid {TIMEOUT_ENV}='{raw}', using {}s",
                    DEFAULT_TIMEOUT.as_secs()
                );
                defaults.timeout
            }),
            None => defaults.timeout,
        };

        let progress_interval = match lookup(PROGRESS_INTERVAL_ENV) {
            Some(raw) => raw.trim().parse::<usize>().unwrap_or_else(|_| {
                tracing::warn!(
                    "ignoring invalid {PROGRESS_INTERVAL_ENV}='{raw}', using {DEFAULT_PROGRESS_INTERVAL}"
                );
                defaults.progress_interval
            }),
            None => defaults.progress_interval,
        };

        Self {
            timeout,
            progress_interval,
        }
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}

/// `Some(None)` disables the budget; `None` means the value is invalid.
fn parse_timeout(raw: &str) -> Option<Option<Duration>> {
    let value = raw.trim();
    if value.eq_ignore_ascii_case("none") || value.eq_ignore_ascii_case("off") {
        return Some(None);
    }
    let secs = value.parse::<f64>().ok()?;
    Duration::try_from_secs_f64(secs).ok().map(Some)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = SolverConfig::from_lookup(lookup(&[]));
        assert_eq!(config, SolverConfig::default());
        assert_eq!(config.timeout, Some(Duration::from_secs(30)));
        assert_eq!(config.progress_interval, 25);
    }

    #[test]
    fn reads_fractional_timeout_and_interval() {
        let config = SolverConfig::from_lookup(lookup(&[
            (TIMEOUT_ENV, "0.5"),
            (PROGRESS_INTERVAL_ENV, "100"),
        ]));
        assert_eq!(config.timeout, Some(Duration::from_millis(500)));
        assert_eq!(config.progress_interval, 100);
    }

    #[test]
    fn timeout_can_be_disabled() {
        let config = SolverConfig::from_lookup(lookup(&[(TIMEOUT_ENV, "off")]));
        assert_eq!(config.timeout, None);
    }

    #[test]
    fn invalid_values_fall_back_to_defaults() {
        let config = SolverConfig::from_lookup(lookup(&[
            (TIMEOUT_ENV, "-3"),
            (PROGRESS_INTERVAL_ENV, "often"),
        ]));
        assert_eq!(config, SolverConfig::default());
    }
}
