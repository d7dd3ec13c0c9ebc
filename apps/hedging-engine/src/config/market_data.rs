//! Market data source configuration.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Where hedging prices come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// Fixed prices from `prices`.
    Static,
    /// Recorded prices from `replay_path`.
    Replay,
}

/// Market data configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketDataConfig {
    /// Provider kind.
    #[serde(default = "default_provider")]
    pub provider: ProviderKind,
    /// Prices for the static provider, keyed by instrument.
    #[serde(default)]
    pub prices: HashMap<String, f64>,
    /// CSV file for the replay provider (`timestamp,symbol,price`).
    #[serde(default)]
    pub replay_path: Option<String>,
    /// Timeout per request in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Oldest price accepted, in seconds (omit to disable).
    #[serde(default = "default_max_staleness_secs")]
    pub max_staleness_secs: Option<u64>,
    /// Retry policy for transient failures.
    #[serde(default)]
    pub retry: RetryConfig,
}

impl Default for MarketDataConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            prices: HashMap::new(),
            replay_path: None,
            timeout_ms: default_timeout_ms(),
            max_staleness_secs: default_max_staleness_secs(),
            retry: RetryConfig::default(),
        }
    }
}

/// Retry configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Retries after the first attempt.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    /// First backoff in milliseconds.
    #[serde(default = "default_initial_backoff_ms")]
    pub initial_backoff_ms: u64,
    /// Backoff cap in milliseconds.
    #[serde(default = "default_max_backoff_ms")]
    pub max_backoff_ms: u64,
    /// Backoff growth factor.
    #[serde(default = "default_multiplier")]
    pub multiplier: f64,
    /// Relative jitter (0.2 = ±20%).
    #[serde(default = "default_jitter")]
    pub jitter: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            initial_backoff_ms: default_initial_backoff_ms(),
            max_backoff_ms: default_max_backoff_ms(),
            multiplier: default_multiplier(),
            jitter: default_jitter(),
        }
    }
}

const fn default_provider() -> ProviderKind {
    ProviderKind::Static
}

const fn default_timeout_ms() -> u64 {
    5000
}

#[allow(clippy::unnecessary_wraps)]
const fn default_max_staleness_secs() -> Option<u64> {
    Some(300)
}

const fn default_max_retries() -> u32 {
    3
}

const fn default_initial_backoff_ms() -> u64 {
    200
}

const fn default_max_backoff_ms() -> u64 {
    5000
}

const fn default_multiplier() -> f64 {
    2.0
}

const fn default_jitter() -> f64 {
    0.2
}
