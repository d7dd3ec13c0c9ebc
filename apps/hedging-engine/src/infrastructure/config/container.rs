//! Dependency Injection Container
//!
//! Builds the strangle, the market-data provider and the recap store from
//! configuration and hands out a wired `HedgingEngine`.

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tracing::{debug, info};

use crate::application::ports::{
    MarketDataError, MarketDataProvider, NoOpRecapStore, RecapStore,
};
use crate::application::services::{HedgingEngine, HedgingSettings};
use crate::config::{
    Config, HedgingConfig, MarketDataConfig, OptionStyle, PricingConfig, ProviderKind,
    StrangleConfig,
};
use crate::domain::instruments::{OptionContract, OptionTerms};
use crate::domain::pricing::{PricingError, Rates, forward_price};
use crate::domain::shared::Symbol;
use crate::domain::strangle::{DeltaPolicy, Strangle, StrangleError};
use crate::infrastructure::market_data::{
    GuardPolicy, GuardedMarketData, InMemoryMarketData, ReplayMarketData, RetryPolicy,
};
use crate::infrastructure::persistence::CsvRecapStore;

/// Errors raised while wiring components.
#[derive(Debug, Error)]
pub enum ContainerError {
    /// A leg could not be priced.
    #[error("Failed to price strangle leg: {0}")]
    Pricing(#[from] PricingError),

    /// The legs do not form a valid strangle.
    #[error("Invalid strangle: {0}")]
    Strangle(#[from] StrangleError),

    /// The market-data provider could not be created.
    #[error("Failed to create market data provider: {0}")]
    MarketData(#[from] MarketDataError),
}

/// Hedging engine over type-erased ports.
pub type DynHedgingEngine = HedgingEngine<dyn MarketDataProvider, dyn RecapStore>;

/// Dependency injection container.
///
/// Holds the configuration and the wired ports. Use `Container::from_config`
/// for the configured adapters or `Container::new` to inject your own.
pub struct Container {
    config: Config,
    market_data: Arc<dyn MarketDataProvider>,
    recap_store: Arc<dyn RecapStore>,
}

impl Container {
    /// Create a container with explicit ports.
    pub fn new(
        config: Config,
        market_data: Arc<dyn MarketDataProvider>,
        recap_store: Arc<dyn RecapStore>,
    ) -> Self {
        Self {
            config,
            market_data,
            recap_store,
        }
    }

    /// Wire the adapters named in `config`.
    ///
    /// # Errors
    ///
    /// Returns `ContainerError::MarketData` if the replay file cannot be loaded.
    pub fn from_config(config: Config) -> Result<Self, ContainerError> {
        let market_data = build_market_data(&config.market_data)?;
        let recap_store: Arc<dyn RecapStore> = if config.persistence.enabled {
            info!(path = %config.persistence.recap_path, "Recap export enabled");
            Arc::new(CsvRecapStore::new(&config.persistence.recap_path))
        } else {
            info!("Recap export disabled");
            Arc::new(NoOpRecapStore)
        };
        Ok(Self::new(config, market_data, recap_store))
    }

    /// Get the configuration.
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Get the market-data port.
    pub fn market_data(&self) -> Arc<dyn MarketDataProvider> {
        Arc::clone(&self.market_data)
    }

    /// Get the recap-store port.
    pub fn recap_store(&self) -> Arc<dyn RecapStore> {
        Arc::clone(&self.recap_store)
    }

    /// Build the configured strangle.
    ///
    /// # Errors
    ///
    /// Returns a `ContainerError` if a leg cannot be priced or the legs
    /// violate a strangle invariant.
    pub fn strangle(&self) -> Result<Strangle, ContainerError> {
        build_strangle(
            &self.config.strangle,
            &self.config.pricing,
            &self.config.hedging,
        )
    }

    /// Create a `HedgingEngine` over the wired ports.
    pub fn hedging_engine(&self) -> DynHedgingEngine {
        HedgingEngine::new(
            Arc::clone(&self.market_data),
            Arc::clone(&self.recap_store),
            hedging_settings(&self.config.hedging),
        )
    }
}

/// Settings for the hedging service.
pub fn hedging_settings(config: &HedgingConfig) -> HedgingSettings {
    HedgingSettings {
        fx_suffix: config.fx_suffix.clone(),
    }
}

/// Rounding policy for aggregate greeks.
pub const fn delta_policy(config: &HedgingConfig) -> DeltaPolicy {
    DeltaPolicy {
        precision: config.delta_precision,
        neutral_band: config.neutral_band,
    }
}

/// Rates for the configured option style.
pub const fn rates(style: OptionStyle, pricing: &PricingConfig) -> Rates {
    match style {
        OptionStyle::Vanilla => Rates::Flat {
            rate: pricing.risk_free_rate,
        },
        OptionStyle::Fx => Rates::Fx {
            domestic: pricing.domestic_rate,
            foreign: pricing.foreign_rate,
        },
    }
}

/// At-the-money-forward strike.
///
/// FX uses the domestic/foreign differential; vanilla carries at the
/// risk-free rate.
pub fn atm_forward_strike(style: OptionStyle, pricing: &PricingConfig, days: u32) -> f64 {
    match style {
        OptionStyle::Vanilla => forward_price(pricing.spot, pricing.risk_free_rate, 0.0, days),
        OptionStyle::Fx => forward_price(
            pricing.spot,
            pricing.domestic_rate,
            pricing.foreign_rate,
            days,
        ),
    }
}

/// Build a strangle from configuration.
///
/// # Errors
///
/// Returns a `ContainerError` if a leg cannot be priced or the legs violate
/// a strangle invariant.
pub fn build_strangle(
    strangle: &StrangleConfig,
    pricing: &PricingConfig,
    hedging: &HedgingConfig,
) -> Result<Strangle, ContainerError> {
    let underlying = Symbol::new(&strangle.underlying);
    let rates = rates(strangle.style, pricing);
    let atm = atm_forward_strike(strangle.style, pricing, strangle.forward_days);
    let call_strike = strangle.call_strike.unwrap_or(atm);
    let put_strike = strangle.put_strike.unwrap_or(atm);

    debug!(
        underlying = %underlying,
        call_strike,
        put_strike,
        maturity = strangle.maturity_years,
        volatility = pricing.volatility,
        "Building strangle"
    );

    let call = OptionContract::new(
        OptionTerms::call(
            underlying.clone(),
            call_strike,
            strangle.maturity_years,
            pricing.volatility,
        ),
        rates,
        pricing.spot,
    )?;
    let put = OptionContract::new(
        OptionTerms::put(
            underlying,
            put_strike,
            strangle.maturity_years,
            pricing.volatility,
        ),
        rates,
        pricing.spot,
    )?;

    Ok(Strangle::new(call, put, strangle.size, strangle.side)?.with_policy(delta_policy(hedging)))
}

/// Guard limits from configuration.
pub fn guard_policy(config: &MarketDataConfig) -> GuardPolicy {
    let retry = &config.retry;
    GuardPolicy {
        timeout: Duration::from_millis(config.timeout_ms),
        max_staleness: config.max_staleness_secs.map(Duration::from_secs),
        retry: RetryPolicy {
            max_retries: retry.max_retries,
            initial_backoff: Duration::from_millis(retry.initial_backoff_ms),
            max_backoff: Duration::from_millis(retry.max_backoff_ms),
            multiplier: retry.multiplier,
            jitter: retry.jitter,
        },
    }
}

/// Build the configured provider, wrapped in the guard.
///
/// # Errors
///
/// Returns `MarketDataError` if the replay file cannot be loaded.
pub fn build_market_data(
    config: &MarketDataConfig,
) -> Result<Arc<dyn MarketDataProvider>, MarketDataError> {
    let inner: Arc<dyn MarketDataProvider> = match config.provider {
        ProviderKind::Static => Arc::new(InMemoryMarketData::with_prices(
            config
                .prices
                .iter()
                .map(|(instrument, price)| (Symbol::new(instrument), *price)),
        )),
        ProviderKind::Replay => {
            let path = config.replay_path.as_deref().ok_or_else(|| MarketDataError::Io {
                message: "replay provider configured without replay_path".to_string(),
            })?;
            Arc::new(ReplayMarketData::from_csv(path)?)
        }
    };
    info!(provider = ?config.provider, "Market data provider ready");
    Ok(Arc::new(GuardedMarketData::new(inner, guard_policy(config))))
}
