//! In-memory market data for tests and static runs.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;

use crate::application::ports::{MarketDataError, MarketDataProvider, PriceObservation};
use crate::domain::shared::Symbol;

/// Market data served from a settable price map.
///
/// Observations are stamped with the time of the request.
#[derive(Debug, Default)]
pub struct InMemoryMarketData {
    prices: RwLock<HashMap<Symbol, f64>>,
}

impl InMemoryMarketData {
    /// Create an empty provider.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a provider seeded with prices.
    #[must_use]
    pub fn with_prices(prices: impl IntoIterator<Item = (Symbol, f64)>) -> Self {
        Self {
            prices: RwLock::new(prices.into_iter().collect()),
        }
    }

    /// Set the price for an instrument.
    pub fn set_price(&self, instrument: impl Into<Symbol>, price: f64) {
        self.prices
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(instrument.into(), price);
    }

    /// Remove an instrument.
    pub fn remove(&self, instrument: &Symbol) {
        self.prices
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(instrument);
    }
}

#[async_trait]
impl MarketDataProvider for InMemoryMarketData {
    async fn latest_price(&self, instrument: &Symbol) -> Result<PriceObservation, MarketDataError> {
        let price = self
            .prices
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(instrument)
            .copied();

        price
            .map(|price| PriceObservation::new(instrument.clone(), price))
            .ok_or_else(|| MarketDataError::DataUnavailable {
                instrument: instrument.to_string(),
                reason: "no price set".to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn serves_latest_price() {
        let market = InMemoryMarketData::new();
        market.set_price("EURUSD=X", 1.07);
        market.set_price("EURUSD=X", 1.08);

        let obs = market.latest_price(&Symbol::new("EURUSD=X")).await.unwrap();
        assert_eq!(obs.price, 1.08);
        assert_eq!(obs.instrument.as_str(), "EURUSD=X");
    }

    #[tokio::test]
    async fn missing_instrument_is_unavailable() {
        let market = InMemoryMarketData::with_prices([(Symbol::new("AAPL"), 100.0)]);
        market.remove(&Symbol::new("AAPL"));

        let err = market.latest_price(&Symbol::new("AAPL")).await.unwrap_err();
        assert!(matches!(err, MarketDataError::DataUnavailable { .. }));
    }
}
