//! Replay of recorded prices from a CSV file.
//!
//! Format: `timestamp,symbol,price` with RFC 3339 timestamps. Each request
//! for an instrument consumes its next observation in time order.

use std::collections::{HashMap, VecDeque};
use std::path::Path;

use async_trait::async_trait;
use serde::Deserialize;
use tokio::sync::Mutex;
use tracing::debug;

use crate::application::ports::{MarketDataError, MarketDataProvider, PriceObservation};
use crate::domain::shared::{Symbol, Timestamp};

#[derive(Debug, Deserialize)]
struct ReplayRecord {
    timestamp: Timestamp,
    symbol: String,
    price: f64,
}

/// Market data replayed from recorded observations.
#[derive(Debug, Default)]
pub struct ReplayMarketData {
    series: Mutex<HashMap<Symbol, VecDeque<PriceObservation>>>,
}

impl ReplayMarketData {
    /// Load observations from a CSV file.
    ///
    /// # Errors
    ///
    /// Returns `MarketDataError::Io` if the file cannot be read or a row is malformed.
    pub fn from_csv(path: impl AsRef<Path>) -> Result<Self, MarketDataError> {
        let path = path.as_ref();
        let mut reader = csv::Reader::from_path(path).map_err(|e| MarketDataError::Io {
            message: format!("failed to open {}: {e}", path.display()),
        })?;

        let mut observations = Vec::new();
        for (index, record) in reader.deserialize::<ReplayRecord>().enumerate() {
            let record = record.map_err(|e| MarketDataError::Io {
                message: format!("{} row {}: {e}", path.display(), index + 1),
            })?;
            observations.push(PriceObservation::at(
                Symbol::new(record.symbol),
                record.price,
                record.timestamp,
            ));
        }

        debug!(path = %path.display(), rows = observations.len(), "Replay series loaded");
        Ok(Self::from_observations(observations))
    }

    /// Build from in-memory observations.
    #[must_use]
    pub fn from_observations(observations: impl IntoIterator<Item = PriceObservation>) -> Self {
        let mut sorted: Vec<PriceObservation> = observations.into_iter().collect();
        sorted.sort_by_key(|obs| obs.observed_at);

        let mut series: HashMap<Symbol, VecDeque<PriceObservation>> = HashMap::new();
        for obs in sorted {
            series.entry(obs.instrument.clone()).or_default().push_back(obs);
        }

        Self {
            series: Mutex::new(series),
        }
    }

    /// Observations left for an instrument.
    pub async fn remaining(&self, instrument: &Symbol) -> usize {
        self.series
            .lock()
            .await
            .get(instrument)
            .map_or(0, VecDeque::len)
    }
}

#[async_trait]
impl MarketDataProvider for ReplayMarketData {
    async fn latest_price(&self, instrument: &Symbol) -> Result<PriceObservation, MarketDataError> {
        let mut series = self.series.lock().await;
        let Some(queue) = series.get_mut(instrument) else {
            return Err(MarketDataError::DataUnavailable {
                instrument: instrument.to_string(),
                reason: "no recorded series".to_string(),
            });
        };

        queue.pop_front().ok_or_else(|| MarketDataError::DataUnavailable {
            instrument: instrument.to_string(),
            reason: "series exhausted".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn replays_in_time_order() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "timestamp,symbol,price").unwrap();
        writeln!(file, "2026-01-19T12:02:00Z,EURUSD=X,1.09").unwrap();
        writeln!(file, "2026-01-19T12:00:00Z,EURUSD=X,1.07").unwrap();
        writeln!(file, "2026-01-19T12:01:00Z,AAPL,101.5").unwrap();
        writeln!(file, "2026-01-19T12:01:00Z,EURUSD=X,1.08").unwrap();
        file.flush().unwrap();

        let replay = ReplayMarketData::from_csv(file.path()).unwrap();
        let eur = Symbol::new("EURUSD=X");

        assert_eq!(replay.remaining(&eur).await, 3);
        assert_eq!(replay.latest_price(&eur).await.unwrap().price, 1.07);
        assert_eq!(replay.latest_price(&eur).await.unwrap().price, 1.08);
        assert_eq!(replay.latest_price(&eur).await.unwrap().price, 1.09);

        let err = replay.latest_price(&eur).await.unwrap_err();
        assert!(matches!(err, MarketDataError::DataUnavailable { .. }));
        assert_eq!(
            replay.latest_price(&Symbol::new("aapl")).await.unwrap().price,
            101.5
        );
    }

    #[tokio::test]
    async fn unknown_instrument_is_unavailable() {
        let replay = ReplayMarketData::from_observations(Vec::new());
        assert!(replay.latest_price(&Symbol::new("EURUSD=X")).await.is_err());
    }

    #[test]
    fn malformed_row_is_io_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "timestamp,symbol,price").unwrap();
        writeln!(file, "yesterday,EURUSD=X,1.07").unwrap();
        file.flush().unwrap();

        let err = ReplayMarketData::from_csv(file.path()).unwrap_err();
        assert!(matches!(err, MarketDataError::Io { .. }));
    }

    #[test]
    fn missing_file_is_io_error() {
        assert!(ReplayMarketData::from_csv("/nonexistent/prices.csv").is_err());
    }
}
