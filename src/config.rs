//! Navigation timing configuration
//!
//! Defaults match the product contract: 10 s navigation budget, polling
//! backoff 100 ms × 1.5 capped at 500 ms, 2 s highlight. A YAML file can
//! override individual fields; unknown fields are rejected so typos fail
//! loudly instead of silently keeping a default.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_NAVIGATE_TIMEOUT_MS: u64 = 10_000;
pub const DEFAULT_POLL_INITIAL_MS: u64 = 100;
pub const DEFAULT_POLL_MULTIPLIER: f64 = 1.5;
pub const DEFAULT_POLL_CAP_MS: u64 = 500;
pub const DEFAULT_HIGHLIGHT_MS: u64 = 2_000;

/// Errors that can occur loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// Polling fallback backoff curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PollBackoff {
    pub initial: Duration,
    pub multiplier: f64,
    pub cap: Duration,
}

impl PollBackoff {
    /// The delay following `current` on the curve.
    pub fn next(&self, current: Duration) -> Duration {
        current.mul_f64(self.multiplier).min(self.cap)
    }
}

impl Default for PollBackoff {
    fn default() -> Self {
        Self {
            initial: Duration::from_millis(DEFAULT_POLL_INITIAL_MS),
            multiplier: DEFAULT_POLL_MULTIPLIER,
            cap: Duration::from_millis(DEFAULT_POLL_CAP_MS),
        }
    }
}

/// Navigation engine configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NavConfig {
    /// Overall budget for one navigation request
    pub navigate_timeout_ms: u64,
    /// First polling delay when waiting for an element
    pub poll_initial_ms: u64,
    /// Backoff multiplier applied per missed poll
    pub poll_multiplier: f64,
    /// Upper bound on the polling delay
    pub poll_cap_ms: u64,
    /// Duration of the reveal highlight
    pub highlight_ms: u64,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            navigate_timeout_ms: DEFAULT_NAVIGATE_TIMEOUT_MS,
            poll_initial_ms: DEFAULT_POLL_INITIAL_MS,
            poll_multiplier: DEFAULT_POLL_MULTIPLIER,
            poll_cap_ms: DEFAULT_POLL_CAP_MS,
            highlight_ms: DEFAULT_HIGHLIGHT_MS,
        }
    }
}

impl NavConfig {
    /// Load configuration from a YAML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_yaml::from_str(&raw)?)
    }

    /// Default config file location (~/.local/share/citelink/citelink.yaml)
    pub fn default_path() -> PathBuf {
        let data_dir = dirs::data_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_default().join(".local/share"));
        data_dir.join("citelink").join("citelink.yaml")
    }

    pub fn navigate_timeout(&self) -> Duration {
        Duration::from_millis(self.navigate_timeout_ms)
    }

    pub fn highlight(&self) -> Duration {
        Duration::from_millis(self.highlight_ms)
    }

    pub fn backoff(&self) -> PollBackoff {
        PollBackoff {
            initial: Duration::from_millis(self.poll_initial_ms),
            multiplier: self.poll_multiplier,
            cap: Duration::from_millis(self.poll_cap_ms),
        }
    }
}
