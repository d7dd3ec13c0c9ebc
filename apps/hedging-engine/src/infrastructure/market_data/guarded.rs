//! Timeout, retry and sanity checks around any market-data provider.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};

use super::RetryPolicy;
use crate::application::ports::{MarketDataError, MarketDataProvider, PriceObservation};
use crate::domain::shared::{Symbol, Timestamp};

/// Limits applied to every request.
#[derive(Debug, Clone, PartialEq)]
pub struct GuardPolicy {
    /// Time allowed for one attempt.
    pub timeout: Duration,
    /// Oldest observation accepted (`None` disables the check).
    pub max_staleness: Option<Duration>,
    /// Retry policy for retryable errors.
    pub retry: RetryPolicy,
}

impl Default for GuardPolicy {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(5),
            max_staleness: Some(Duration::from_secs(300)),
            retry: RetryPolicy::default(),
        }
    }
}

/// Provider wrapper that times out, retries and rejects unusable prices.
pub struct GuardedMarketData<M: ?Sized> {
    inner: Arc<M>,
    policy: GuardPolicy,
}

impl<M: MarketDataProvider + ?Sized> GuardedMarketData<M> {
    /// Wrap a provider.
    pub const fn new(inner: Arc<M>, policy: GuardPolicy) -> Self {
        Self { inner, policy }
    }

    /// Get the policy.
    #[must_use]
    pub const fn policy(&self) -> &GuardPolicy {
        &self.policy
    }

    async fn attempt(&self, instrument: &Symbol) -> Result<PriceObservation, MarketDataError> {
        let observation = tokio::time::timeout(self.policy.timeout, self.inner.latest_price(instrument))
            .await
            .map_err(|_| MarketDataError::Timeout {
                instrument: instrument.to_string(),
                timeout_ms: self.policy.timeout.as_millis() as u64,
            })??;

        self.check(instrument, observation)
    }

    fn check(
        &self,
        instrument: &Symbol,
        observation: PriceObservation,
    ) -> Result<PriceObservation, MarketDataError> {
        if !observation.price.is_finite() || observation.price <= 0.0 {
            return Err(MarketDataError::InvalidPrice {
                instrument: instrument.to_string(),
                price: observation.price,
            });
        }

        if let Some(max) = self.policy.max_staleness {
            let age = observation.age(Timestamp::now());
            if age.num_milliseconds() > max.as_millis() as i64 {
                return Err(MarketDataError::Stale {
                    instrument: instrument.to_string(),
                    age_secs: age.num_seconds(),
                    max_age_secs: max.as_secs(),
                });
            }
        }

        Ok(observation)
    }
}

#[async_trait]
impl<M: MarketDataProvider + ?Sized> MarketDataProvider for GuardedMarketData<M> {
    async fn latest_price(&self, instrument: &Symbol) -> Result<PriceObservation, MarketDataError> {
        let mut backoff = self.policy.retry.backoff();
        loop {
            match self.attempt(instrument).await {
                Ok(observation) => {
                    debug!(instrument = %instrument, price = observation.price, "Price received");
                    return Ok(observation);
                }
                Err(err) if err.is_retryable() => {
                    let Some(delay) = backoff.next_delay() else {
                        return Err(err);
                    };
                    warn!(
                        instrument = %instrument,
                        error = %err,
                        retry = backoff.attempt(),
                        delay_ms = delay.as_millis() as u64,
                        "Market data request failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(err) => return Err(err),
            }
        }
    }
}
