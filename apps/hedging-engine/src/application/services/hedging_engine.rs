//! Hedging Engine Service
//!
//! Delta-hedges a strangle against the latest spot of its hedging instrument.
//! One run: snapshot, fetch the spot, reprice the legs, open an offsetting
//! spot position if the aggregate delta is not flat, snapshot again, export
//! every recap row the store has not accepted yet.

use std::sync::Arc;

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

use crate::application::ports::{
    MarketDataError, MarketDataProvider, PersistenceError, RecapRow, RecapStore,
};
use crate::domain::position::Position;
use crate::domain::pricing::PricingError;
use crate::domain::shared::Timestamp;
use crate::domain::strangle::{Strangle, StrangleError};

/// Default quote suffix for FX hedging instruments.
pub const DEFAULT_FX_SUFFIX: &str = "=X";

/// Settings for the hedging engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HedgingSettings {
    /// Suffix appended to FX tickers to get the quoted instrument.
    pub fx_suffix: String,
}

impl Default for HedgingSettings {
    fn default() -> Self {
        Self {
            fx_suffix: DEFAULT_FX_SUFFIX.to_string(),
        }
    }
}

/// Result of one hedging run.
#[derive(Debug, Clone, PartialEq)]
pub enum HedgeOutcome {
    /// Aggregate delta was flat after repricing; no hedge opened.
    AlreadyNeutral {
        /// Spot the legs were repriced at.
        spot: f64,
    },
    /// A hedge was opened.
    Hedged {
        /// Spot the legs were repriced at.
        spot: f64,
        /// Aggregate delta before the hedge.
        delta: Decimal,
        /// The hedge position appended to the ledger.
        hedge: Position,
    },
}

impl HedgeOutcome {
    /// Check if a hedge was opened.
    #[must_use]
    pub const fn is_hedged(&self) -> bool {
        matches!(self, Self::Hedged { .. })
    }
}

/// Hedging engine errors.
#[derive(Debug, Error)]
pub enum HedgingError {
    /// No usable price for the hedging instrument. The strangle is unchanged.
    #[error("market data unavailable for {instrument}: {source}")]
    MarketDataUnavailable {
        /// Instrument requested.
        instrument: String,
        /// Provider error.
        #[source]
        source: MarketDataError,
    },

    /// Pricing failed.
    #[error("pricing error: {0}")]
    Pricing(#[from] PricingError),

    /// Strangle operation failed.
    #[error("strangle error: {0}")]
    Strangle(#[from] StrangleError),

    /// Recap rows could not be loaded or exported.
    #[error("recap persistence error: {0}")]
    Persistence(#[from] PersistenceError),
}

/// Delta-hedging service over a market-data provider and a recap store.
pub struct HedgingEngine<M: ?Sized, S: ?Sized> {
    market_data: Arc<M>,
    recap_store: Arc<S>,
    settings: HedgingSettings,
}

impl<M, S> HedgingEngine<M, S>
where
    M: MarketDataProvider + ?Sized,
    S: RecapStore + ?Sized,
{
    /// Create a new hedging engine.
    pub fn new(market_data: Arc<M>, recap_store: Arc<S>, settings: HedgingSettings) -> Self {
        Self {
            market_data,
            recap_store,
            settings,
        }
    }

    /// Get the settings.
    #[must_use]
    pub const fn settings(&self) -> &HedgingSettings {
        &self.settings
    }

    /// Reload persisted recap rows into a fresh strangle.
    ///
    /// # Errors
    ///
    /// Returns `HedgingError::Persistence` if the store cannot be read and
    /// `HedgingError::Strangle` if the strangle already has snapshots.
    pub async fn restore(&self, strangle: &mut Strangle) -> Result<usize, HedgingError> {
        let rows = self.recap_store.load().await?;
        let restored = strangle.restore_recap(rows.into_iter().map(Into::into))?;
        debug!(restored, "Recap history restored");
        Ok(restored)
    }

    /// Run one delta-hedging pass on `strangle`.
    ///
    /// On `MarketDataUnavailable` nothing in the strangle has changed. On
    /// `Persistence` the strangle holds the run's hedge and snapshots; the
    /// unexported rows are sent again by the next run.
    #[instrument(skip(self, strangle), fields(underlying = %strangle.underlying()))]
    pub async fn delta_hedging(&self, strangle: &mut Strangle) -> Result<HedgeOutcome, HedgingError> {
        let pre_hedge = strangle.snapshot(Timestamp::now())?;
        let instrument = strangle.hedge_instrument(&self.settings.fx_suffix);

        let observation = self
            .market_data
            .latest_price(&instrument.symbol)
            .await
            .map_err(|source| {
                warn!(instrument = %instrument.symbol, error = %source, "No price for hedging instrument");
                HedgingError::MarketDataUnavailable {
                    instrument: instrument.symbol.to_string(),
                    source,
                }
            })?;
        let spot = observation.price;

        strangle.update_spot(spot)?;
        strangle.record(pre_hedge);

        let outcome = match strangle.open_hedge(&instrument, spot)? {
            None => {
                info!(spot, "Strangle already delta-neutral");
                HedgeOutcome::AlreadyNeutral { spot }
            }
            Some(hedge) => {
                let delta = -hedge.signed_quantity();
                strangle.record(strangle.snapshot(Timestamp::now())?);
                info!(
                    spot,
                    delta = %delta,
                    side = %hedge.side(),
                    quantity = %hedge.size(),
                    instrument = %instrument.symbol,
                    "Delta hedged"
                );
                HedgeOutcome::Hedged { spot, delta, hedge }
            }
        };

        let rows: Vec<RecapRow> = strangle
            .recap()
            .pending_export()
            .iter()
            .map(RecapRow::from)
            .collect();
        self.recap_store.append(&rows).await.map_err(|error| {
            warn!(pending = rows.len(), error = %error, "Recap export failed, rows kept for next run");
            HedgingError::Persistence(error)
        })?;
        strangle.mark_recap_exported(rows.len());

        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{NoOpRecapStore, PriceObservation};
    use crate::domain::instruments::{OptionContract, OptionTerms};
    use crate::domain::position::PositionSide;
    use crate::domain::pricing::Rates;
    use crate::domain::shared::Symbol;
    use async_trait::async_trait;
    use rust_decimal_macros::dec;
    use std::sync::Mutex;

    struct FixedPrice {
        price: Mutex<f64>,
        requested: Mutex<Vec<Symbol>>,
    }

    impl FixedPrice {
        fn new(price: f64) -> Self {
            Self {
                price: Mutex::new(price),
                requested: Mutex::new(Vec::new()),
            }
        }

        fn set(&self, price: f64) {
            *self.price.lock().unwrap() = price;
        }
    }

    #[async_trait]
    impl MarketDataProvider for FixedPrice {
        async fn latest_price(
            &self,
            instrument: &Symbol,
        ) -> Result<PriceObservation, MarketDataError> {
            self.requested.lock().unwrap().push(instrument.clone());
            Ok(PriceObservation::new(
                instrument.clone(),
                *self.price.lock().unwrap(),
            ))
        }
    }

    struct Unavailable;

    #[async_trait]
    impl MarketDataProvider for Unavailable {
        async fn latest_price(
            &self,
            instrument: &Symbol,
        ) -> Result<PriceObservation, MarketDataError> {
            Err(MarketDataError::DataUnavailable {
                instrument: instrument.to_string(),
                reason: "feed down".to_string(),
            })
        }
    }

    /// Rejects the first `failures` appends, then stores rows.
    struct FlakyStore {
        failures: Mutex<usize>,
        rows: Mutex<Vec<RecapRow>>,
    }

    impl FlakyStore {
        fn failing(failures: usize) -> Self {
            Self {
                failures: Mutex::new(failures),
                rows: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl RecapStore for FlakyStore {
        async fn load(&self) -> Result<Vec<RecapRow>, PersistenceError> {
            Ok(self.rows.lock().unwrap().clone())
        }

        async fn append(&self, rows: &[RecapRow]) -> Result<(), PersistenceError> {
            let mut failures = self.failures.lock().unwrap();
            if *failures > 0 {
                *failures -= 1;
                return Err(PersistenceError::Io {
                    path: "recap.csv".to_string(),
                    source: std::io::Error::other("disk full"),
                });
            }
            self.rows.lock().unwrap().extend_from_slice(rows);
            Ok(())
        }
    }

    fn short_eurusd() -> Strangle {
        let rates = Rates::Fx {
            domestic: 0.0476,
            foreign: 0.0225,
        };
        Strangle::new(
            OptionContract::new(OptionTerms::call("EURUSD", 1.08, 0.25, 0.1), rates, 1.07).unwrap(),
            OptionContract::new(OptionTerms::put("EURUSD", 1.06, 0.25, 0.1), rates, 1.07).unwrap(),
            dec!(1000000),
            PositionSide::Short,
        )
        .unwrap()
    }

    fn engine<M: MarketDataProvider>(market: Arc<M>) -> HedgingEngine<M, NoOpRecapStore> {
        HedgingEngine::new(market, Arc::new(NoOpRecapStore), HedgingSettings::default())
    }

    #[tokio::test]
    async fn first_run_hedges_and_records_two_snapshots() {
        let market = Arc::new(FixedPrice::new(1.07));
        let engine = engine(Arc::clone(&market));
        let mut strangle = short_eurusd();

        let outcome = engine.delta_hedging(&mut strangle).await.unwrap();

        match outcome {
            HedgeOutcome::Hedged { spot, delta, hedge } => {
                assert_eq!(spot, 1.07);
                assert_eq!(delta, dec!(-0.12));
                assert_eq!(hedge.side(), PositionSide::Long);
                assert_eq!(hedge.size(), dec!(0.12));
            }
            other => panic!("expected a hedge, got {other:?}"),
        }
        assert_eq!(strangle.recap().len(), 2);
        assert_eq!(strangle.hedges().len(), 1);
        assert_eq!(
            market.requested.lock().unwrap().as_slice(),
            &[Symbol::new("EURUSD=X")]
        );
    }

    #[tokio::test]
    async fn second_run_at_same_price_is_neutral() {
        let market = Arc::new(FixedPrice::new(1.07));
        let engine = engine(market);
        let mut strangle = short_eurusd();

        engine.delta_hedging(&mut strangle).await.unwrap();
        let outcome = engine.delta_hedging(&mut strangle).await.unwrap();

        assert_eq!(outcome, HedgeOutcome::AlreadyNeutral { spot: 1.07 });
        assert_eq!(strangle.hedges().len(), 1);
        assert_eq!(strangle.recap().len(), 3);
    }

    #[tokio::test]
    async fn spot_move_triggers_new_hedge() {
        let market = Arc::new(FixedPrice::new(1.07));
        let engine = engine(Arc::clone(&market));
        let mut strangle = short_eurusd();

        engine.delta_hedging(&mut strangle).await.unwrap();
        market.set(1.09);
        let outcome = engine.delta_hedging(&mut strangle).await.unwrap();

        assert!(outcome.is_hedged());
        assert_eq!(strangle.hedge_delta(), dec!(0.39));
        assert_eq!(strangle.aggregate_delta().unwrap(), Decimal::ZERO);
        assert_eq!(strangle.recap().len(), 4);
    }

    #[tokio::test]
    async fn pre_hedge_snapshot_uses_previous_spot() {
        let market = Arc::new(FixedPrice::new(1.09));
        let engine = engine(market);
        let mut strangle = short_eurusd();

        engine.delta_hedging(&mut strangle).await.unwrap();

        let recap = strangle.recap().as_slice();
        assert_eq!(recap[0].spot, 1.07);
        assert_eq!(recap[1].spot, 1.09);
        assert!(recap[1].global_delta.abs() < 0.01);
    }

    #[tokio::test]
    async fn market_data_failure_leaves_strangle_untouched() {
        let engine = engine(Arc::new(Unavailable));
        let mut strangle = short_eurusd();
        let before = strangle.clone();

        let err = engine.delta_hedging(&mut strangle).await.unwrap_err();

        assert!(matches!(
            err,
            HedgingError::MarketDataUnavailable { ref instrument, .. } if instrument == "EURUSD=X"
        ));
        assert_eq!(strangle, before);
    }

    #[tokio::test]
    async fn invalid_price_leaves_strangle_untouched() {
        let engine = engine(Arc::new(FixedPrice::new(0.0)));
        let mut strangle = short_eurusd();
        let before = strangle.clone();

        let err = engine.delta_hedging(&mut strangle).await.unwrap_err();

        assert!(matches!(err, HedgingError::Pricing(_)));
        assert_eq!(strangle, before);
    }

    #[tokio::test]
    async fn failed_export_is_retried_by_next_run() {
        let market = Arc::new(FixedPrice::new(1.07));
        let store = Arc::new(FlakyStore::failing(1));
        let engine = HedgingEngine::new(
            Arc::clone(&market),
            Arc::clone(&store),
            HedgingSettings::default(),
        );
        let mut strangle = short_eurusd();

        let err = engine.delta_hedging(&mut strangle).await.unwrap_err();
        assert!(matches!(err, HedgingError::Persistence(_)));
        assert_eq!(strangle.recap().len(), 2);
        assert_eq!(strangle.recap().pending_export().len(), 2);
        assert!(store.rows.lock().unwrap().is_empty());

        market.set(1.09);
        engine.delta_hedging(&mut strangle).await.unwrap();

        let stored = store.rows.lock().unwrap().clone();
        let expected: Vec<RecapRow> = strangle.recap().iter().map(RecapRow::from).collect();
        assert_eq!(strangle.recap().len(), 4);
        assert_eq!(stored, expected);
        assert!(strangle.recap().pending_export().is_empty());
    }
}
