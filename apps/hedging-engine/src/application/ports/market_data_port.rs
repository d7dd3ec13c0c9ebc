//! Market Data Port (Driven Port)
//!
//! Interface for fetching the latest spot price of a hedging instrument.
//! Timeouts, retry and staleness checks belong to the adapters.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::shared::{Symbol, Timestamp};

/// A single price observed for an instrument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceObservation {
    /// Instrument the price belongs to.
    pub instrument: Symbol,
    /// Observed price.
    pub price: f64,
    /// When the price was observed.
    pub observed_at: Timestamp,
}

impl PriceObservation {
    /// Create an observation stamped now.
    #[must_use]
    pub fn new(instrument: Symbol, price: f64) -> Self {
        Self::at(instrument, price, Timestamp::now())
    }

    /// Create an observation with an explicit time.
    #[must_use]
    pub const fn at(instrument: Symbol, price: f64, observed_at: Timestamp) -> Self {
        Self {
            instrument,
            price,
            observed_at,
        }
    }

    /// Age of the observation relative to `now`.
    #[must_use]
    pub fn age(&self, now: Timestamp) -> chrono::Duration {
        now.duration_since(self.observed_at)
    }
}

/// Market data error.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MarketDataError {
    /// No price can be supplied (empty or exhausted series).
    #[error("Price data unavailable for {instrument}: {reason}")]
    DataUnavailable {
        /// Instrument requested.
        instrument: String,
        /// Why no price is available.
        reason: String,
    },

    /// Latest price is older than the allowed age.
    #[error("Stale price for {instrument}: {age_secs}s old (max {max_age_secs}s)")]
    Stale {
        /// Instrument requested.
        instrument: String,
        /// Age of the latest price.
        age_secs: i64,
        /// Maximum age accepted.
        max_age_secs: u64,
    },

    /// Provider returned a price that cannot be used.
    #[error("Invalid price for {instrument}: {price}")]
    InvalidPrice {
        /// Instrument requested.
        instrument: String,
        /// Price received.
        price: f64,
    },

    /// Provider did not answer in time.
    #[error("Market data request for {instrument} timed out after {timeout_ms}ms")]
    Timeout {
        /// Instrument requested.
        instrument: String,
        /// Timeout applied.
        timeout_ms: u64,
    },

    /// Reading the underlying source failed.
    #[error("Market data I/O error: {message}")]
    Io {
        /// Error details.
        message: String,
    },
}

impl MarketDataError {
    /// Whether a later attempt may succeed.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Timeout { .. } | Self::Io { .. })
    }
}

/// Port for fetching spot prices.
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Latest price for an instrument.
    async fn latest_price(&self, instrument: &Symbol) -> Result<PriceObservation, MarketDataError>;
}
