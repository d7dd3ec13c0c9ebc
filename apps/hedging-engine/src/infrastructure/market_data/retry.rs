//! Retry policy with exponential backoff for market-data requests.
//!
//! Only errors flagged by [`MarketDataError::is_retryable`] are retried:
//!
//! | Retryable | Non-Retryable |
//! |-----------|---------------|
//! | Timeout | Data unavailable (series exhausted) |
//! | I/O error | Invalid price |
//! | | Stale price |
//!
//! [`MarketDataError::is_retryable`]: crate::application::ports::MarketDataError::is_retryable

use std::time::Duration;

use rand::Rng;

/// Retry policy for market-data requests.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Retries after the first attempt (0 disables retry).
    pub max_retries: u32,
    /// Delay before the first retry.
    pub initial_backoff: Duration,
    /// Upper bound on any delay.
    pub max_backoff: Duration,
    /// Growth factor between retries.
    pub multiplier: f64,
    /// Relative jitter applied to each delay (0.2 = ±20%).
    pub jitter: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_backoff: Duration::from_millis(200),
            max_backoff: Duration::from_secs(5),
            multiplier: 2.0,
            jitter: 0.2,
        }
    }
}

impl RetryPolicy {
    /// Start a backoff sequence for one request.
    #[must_use]
    pub const fn backoff(&self) -> ExponentialBackoff {
        ExponentialBackoff {
            attempt: 0,
            max_retries: self.max_retries,
            initial_ms: self.initial_backoff.as_millis() as u64,
            max_ms: self.max_backoff.as_millis() as u64,
            multiplier: self.multiplier,
            jitter: self.jitter,
        }
    }
}

/// Backoff delays for successive retries of one request.
#[derive(Debug)]
pub struct ExponentialBackoff {
    attempt: u32,
    max_retries: u32,
    initial_ms: u64,
    max_ms: u64,
    multiplier: f64,
    jitter: f64,
}

impl ExponentialBackoff {
    /// Delay before the next retry, or `None` once retries are spent.
    pub fn next_delay(&mut self) -> Option<Duration> {
        if self.attempt >= self.max_retries {
            return None;
        }

        let base = self.base_delay_ms();
        let delay = self.jittered(base).min(self.max_ms);
        self.attempt += 1;

        Some(Duration::from_millis(delay))
    }

    /// Retries handed out so far.
    #[must_use]
    pub const fn attempt(&self) -> u32 {
        self.attempt
    }

    fn base_delay_ms(&self) -> u64 {
        let factor = self.multiplier.powi(self.attempt as i32);
        let delay = (self.initial_ms as f64 * factor) as u64;
        delay.min(self.max_ms)
    }

    fn jittered(&self, base_ms: u64) -> u64 {
        if self.jitter <= 0.0 || base_ms == 0 {
            return base_ms;
        }
        let spread = base_ms as f64 * self.jitter;
        let low = (base_ms as f64 - spread).max(0.0);
        let high = base_ms as f64 + spread;
        rand::rng().random_range(low..=high) as u64
    }
}
