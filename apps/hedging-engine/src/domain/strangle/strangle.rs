//! Strangle Aggregate

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use super::policy::to_decimal;
use super::{DeltaPolicy, HedgeLedger, RecapLog, RecapSnapshot, StrangleError};
use crate::domain::instruments::{OptionContract, SpotAsset, SpotClass};
use crate::domain::pricing::{OptionType, PricingError};
use crate::domain::position::{Position, PositionSide};
use crate::domain::shared::{Symbol, Timestamp};

/// Spot instrument used to hedge a strangle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HedgeInstrument {
    /// Ticker to request prices for.
    pub symbol: Symbol,
    /// Currency for FX strangles, equity otherwise.
    pub class: SpotClass,
}

/// A call and a put held on the same side, with their hedges.
///
/// Leg 1 is always the call and leg 2 the put. The hedge ledger and recap
/// log only grow.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Strangle {
    leg1: Position,
    leg2: Position,
    underlying: Symbol,
    fx: bool,
    spot: f64,
    policy: DeltaPolicy,
    hedges: HedgeLedger,
    recap: RecapLog,
}

impl Strangle {
    /// Build a strangle from its two options.
    ///
    /// Checks run in order: maturity, strike ordering, leg types, shared
    /// underlying and rates, size.
    ///
    /// # Errors
    ///
    /// Returns the `StrangleError` naming the first rule violated.
    pub fn new(
        call: OptionContract,
        put: OptionContract,
        size: Decimal,
        side: PositionSide,
    ) -> Result<Self, StrangleError> {
        if call.maturity() != put.maturity() {
            return Err(StrangleError::MaturityMismatch {
                call: call.maturity(),
                put: put.maturity(),
            });
        }
        if call.strike() < put.strike() {
            return Err(StrangleError::StrikeOrdering {
                call: call.strike(),
                put: put.strike(),
            });
        }
        for (leg, expected, actual) in [
            ("leg1", OptionType::Call, call.option_type()),
            ("leg2", OptionType::Put, put.option_type()),
        ] {
            if actual != expected {
                return Err(StrangleError::LegTypeMismatch {
                    leg,
                    expected,
                    actual,
                });
            }
        }
        if call.underlying() != put.underlying() {
            return Err(StrangleError::UnderlyingMismatch {
                call: call.underlying().clone(),
                put: put.underlying().clone(),
            });
        }
        if call.rates() != put.rates() {
            return Err(StrangleError::RatesMismatch {
                call: call.rates(),
                put: put.rates(),
            });
        }

        let underlying = call.underlying().clone();
        let fx = call.is_fx();
        let spot = call.spot();
        Ok(Self {
            leg1: Position::new(side, call, size)?,
            leg2: Position::new(side, put, size)?,
            underlying,
            fx,
            spot,
            policy: DeltaPolicy::default(),
            hedges: HedgeLedger::new(),
            recap: RecapLog::new(),
        })
    }

    /// Use a non-default rounding policy.
    #[must_use]
    pub fn with_policy(mut self, policy: DeltaPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Get the call leg.
    #[must_use]
    pub const fn leg1(&self) -> &Position {
        &self.leg1
    }

    /// Get the put leg.
    #[must_use]
    pub const fn leg2(&self) -> &Position {
        &self.leg2
    }

    /// Get the side shared by both legs.
    #[must_use]
    pub const fn side(&self) -> PositionSide {
        self.leg1.side()
    }

    /// Get the size of each leg.
    #[must_use]
    pub const fn size(&self) -> Decimal {
        self.leg1.size()
    }

    /// Spot the legs are currently priced at.
    #[must_use]
    pub const fn spot(&self) -> f64 {
        self.spot
    }

    /// Underlying ticker shared by both legs.
    #[must_use]
    pub const fn underlying(&self) -> &Symbol {
        &self.underlying
    }

    /// Check if the legs are FX options.
    #[must_use]
    pub const fn is_fx(&self) -> bool {
        self.fx
    }

    /// Get the rounding policy.
    #[must_use]
    pub const fn policy(&self) -> &DeltaPolicy {
        &self.policy
    }

    /// Hedges opened so far.
    #[must_use]
    pub const fn hedges(&self) -> &HedgeLedger {
        &self.hedges
    }

    /// Snapshots recorded so far.
    #[must_use]
    pub const fn recap(&self) -> &RecapLog {
        &self.recap
    }

    /// Net quantity held in hedges.
    #[must_use]
    pub fn hedge_delta(&self) -> Decimal {
        self.hedges.net_quantity()
    }

    /// Legs plus hedges, rounded and snapped to zero inside the neutral band.
    pub fn aggregate_delta(&self) -> Result<Decimal, StrangleError> {
        let legs = to_decimal("delta", self.leg1.delta()? + self.leg2.delta()?)?;
        Ok(self.policy.snap(legs + self.hedge_delta()))
    }

    /// Gamma of the two legs, rounded. Hedges carry no gamma.
    pub fn aggregate_gamma(&self) -> Result<Decimal, StrangleError> {
        let legs = to_decimal("gamma", self.leg1.gamma()? + self.leg2.gamma()?)?;
        Ok(self.policy.round(legs))
    }

    /// Reprice both legs at a new spot. Nothing changes on error.
    pub fn update_spot(&mut self, spot: f64) -> Result<(), PricingError> {
        let leg1 = self.leg1.reprice(spot)?;
        let leg2 = self.leg2.reprice(spot)?;
        self.leg1 = leg1;
        self.leg2 = leg2;
        self.spot = spot;
        Ok(())
    }

    /// Raw delta state at `timestamp`, without rounding.
    pub fn snapshot(&self, timestamp: Timestamp) -> Result<RecapSnapshot, PricingError> {
        let leg1_delta = self.leg1.delta()?;
        let leg2_delta = self.leg2.delta()?;
        let strangle_delta = leg1_delta + leg2_delta;
        // Decimal to f64 cannot fail
        let hedge_delta = self.hedge_delta().to_f64().unwrap_or_default();
        Ok(RecapSnapshot {
            timestamp,
            spot: self.spot,
            leg1_delta,
            leg2_delta,
            strangle_delta,
            hedge_delta,
            global_delta: strangle_delta + hedge_delta,
        })
    }

    /// Append a snapshot to the recap log.
    pub fn record(&mut self, snapshot: RecapSnapshot) {
        self.recap.push(snapshot);
    }

    /// Record that the next `count` pending recap snapshots were stored.
    pub fn mark_recap_exported(&mut self, count: usize) {
        self.recap.mark_exported(count);
    }

    /// Reload persisted snapshots at startup. They count as already exported.
    ///
    /// # Errors
    ///
    /// Returns `StrangleError::RecapNotEmpty` if snapshots were already recorded.
    pub fn restore_recap(
        &mut self,
        history: impl IntoIterator<Item = RecapSnapshot>,
    ) -> Result<usize, StrangleError> {
        if !self.recap.is_empty() {
            return Err(StrangleError::RecapNotEmpty {
                len: self.recap.len(),
            });
        }
        for snapshot in history {
            self.recap.push(snapshot);
        }
        self.recap.mark_exported(self.recap.len());
        Ok(self.recap.len())
    }

    /// Instrument to hedge with: FX pairs take the quote suffix.
    #[must_use]
    pub fn hedge_instrument(&self, fx_suffix: &str) -> HedgeInstrument {
        if self.fx {
            HedgeInstrument {
                symbol: self.underlying.with_suffix(fx_suffix),
                class: SpotClass::Currency,
            }
        } else {
            HedgeInstrument {
                symbol: self.underlying.clone(),
                class: SpotClass::Equity,
            }
        }
    }

    /// Offset the current aggregate delta with a spot position at `price`.
    ///
    /// Returns `None` when the strangle is already flat.
    ///
    /// # Errors
    ///
    /// Returns `StrangleError::Pricing` if the delta or the hedge price is invalid.
    pub fn open_hedge(
        &mut self,
        instrument: &HedgeInstrument,
        price: f64,
    ) -> Result<Option<Position>, StrangleError> {
        let delta = self.aggregate_delta()?;
        if delta.is_zero() {
            return Ok(None);
        }

        let asset = SpotAsset::new(instrument.class, instrument.symbol.clone(), price)?;
        let hedge = Position::new(PositionSide::offsetting(delta), asset, delta.abs())?;
        debug!(
            instrument = %instrument.symbol,
            side = %hedge.side(),
            quantity = %hedge.size(),
            price,
            "Hedge opened"
        );
        self.hedges.push(hedge.clone());
        Ok(Some(hedge))
    }
}

impl fmt::Display for Strangle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} strangle x{}: {} / {}",
            self.side(),
            self.size(),
            self.leg1.asset(),
            self.leg2.asset()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::instruments::OptionTerms;
    use crate::domain::pricing::Rates;
    use rust_decimal_macros::dec;

    const EUR_RATES: Rates = Rates::Fx {
        domestic: 0.0476,
        foreign: 0.0225,
    };

    fn fx_option(terms: OptionTerms) -> OptionContract {
        OptionContract::new(terms, EUR_RATES, 1.07).unwrap()
    }

    fn short_eurusd() -> Strangle {
        Strangle::new(
            fx_option(OptionTerms::call("EURUSD", 1.08, 0.25, 0.1)),
            fx_option(OptionTerms::put("EURUSD", 1.06, 0.25, 0.1)),
            dec!(1000000),
            PositionSide::Short,
        )
        .unwrap()
    }

    fn eurusd_hedge() -> HedgeInstrument {
        HedgeInstrument {
            symbol: Symbol::new("EURUSD=X"),
            class: SpotClass::Currency,
        }
    }

    #[test]
    fn construction_succeeds_with_ordered_strikes() {
        let strangle = short_eurusd();
        assert_eq!(strangle.side(), PositionSide::Short);
        assert_eq!(strangle.size(), dec!(1000000));
        assert!(strangle.hedges().is_empty());
        assert!(strangle.recap().is_empty());
    }

    #[test]
    fn construction_rejects_inverted_strikes() {
        let result = Strangle::new(
            fx_option(OptionTerms::call("EURUSD", 1.05, 0.25, 0.1)),
            fx_option(OptionTerms::put("EURUSD", 1.06, 0.25, 0.1)),
            dec!(1),
            PositionSide::Short,
        );
        assert!(matches!(result, Err(StrangleError::StrikeOrdering { .. })));
    }

    #[test]
    fn construction_rejects_maturity_mismatch() {
        let result = Strangle::new(
            fx_option(OptionTerms::call("EURUSD", 1.08, 0.25, 0.1)),
            fx_option(OptionTerms::put("EURUSD", 1.06, 0.5, 0.1)),
            dec!(1),
            PositionSide::Short,
        );
        assert!(matches!(result, Err(StrangleError::MaturityMismatch { .. })));
    }

    #[test]
    fn maturity_checked_before_strikes() {
        let result = Strangle::new(
            fx_option(OptionTerms::call("EURUSD", 1.05, 0.25, 0.1)),
            fx_option(OptionTerms::put("EURUSD", 1.06, 0.5, 0.1)),
            dec!(1),
            PositionSide::Long,
        );
        assert!(matches!(result, Err(StrangleError::MaturityMismatch { .. })));
    }

    #[test]
    fn construction_rejects_swapped_leg_types() {
        let result = Strangle::new(
            fx_option(OptionTerms::put("EURUSD", 1.08, 0.25, 0.1)),
            fx_option(OptionTerms::put("EURUSD", 1.06, 0.25, 0.1)),
            dec!(1),
            PositionSide::Long,
        );
        assert_eq!(
            result.unwrap_err(),
            StrangleError::LegTypeMismatch {
                leg: "leg1",
                expected: OptionType::Call,
                actual: OptionType::Put,
            }
        );
    }

    #[test]
    fn construction_rejects_foreign_put() {
        let result = Strangle::new(
            fx_option(OptionTerms::call("EURUSD", 1.08, 0.25, 0.1)),
            fx_option(OptionTerms::put("GBPUSD", 1.06, 0.25, 0.1)),
            dec!(1),
            PositionSide::Short,
        );
        assert_eq!(
            result.unwrap_err(),
            StrangleError::UnderlyingMismatch {
                call: Symbol::new("EURUSD"),
                put: Symbol::new("GBPUSD"),
            }
        );
    }

    #[test]
    fn construction_rejects_mixed_rate_models() {
        let vanilla_put = OptionContract::new(
            OptionTerms::put("EURUSD", 1.06, 0.25, 0.1),
            Rates::Flat { rate: 0.0476 },
            1.07,
        )
        .unwrap();
        let result = Strangle::new(
            fx_option(OptionTerms::call("EURUSD", 1.08, 0.25, 0.1)),
            vanilla_put,
            dec!(1),
            PositionSide::Short,
        );
        assert!(matches!(result, Err(StrangleError::RatesMismatch { .. })));
    }

    #[test]
    fn construction_rejects_zero_size() {
        let result = Strangle::new(
            fx_option(OptionTerms::call("EURUSD", 1.08, 0.25, 0.1)),
            fx_option(OptionTerms::put("EURUSD", 1.06, 0.25, 0.1)),
            Decimal::ZERO,
            PositionSide::Long,
        );
        assert!(matches!(
            result,
            Err(StrangleError::NonPositiveQuantity { .. })
        ));
    }

    #[test]
    fn aggregate_greeks_at_inception() {
        let strangle = short_eurusd();
        // Raw: delta -0.117587..., gamma -0.051961...
        assert_eq!(strangle.aggregate_delta().unwrap(), dec!(-0.12));
        assert_eq!(strangle.aggregate_gamma().unwrap(), dec!(-0.05));
    }

    #[test]
    fn hedge_flattens_delta() {
        let mut strangle = short_eurusd();
        let hedge = strangle
            .open_hedge(&eurusd_hedge(), 1.07)
            .unwrap()
            .unwrap();

        assert_eq!(hedge.side(), PositionSide::Long);
        assert_eq!(hedge.size(), dec!(0.12));
        assert_eq!(strangle.hedge_delta(), dec!(0.12));
        assert_eq!(strangle.aggregate_delta().unwrap(), Decimal::ZERO);

        // Already flat: nothing more to open
        assert!(strangle.open_hedge(&eurusd_hedge(), 1.07).unwrap().is_none());
        assert_eq!(strangle.hedges().len(), 1);
    }

    #[test]
    fn spot_move_reopens_delta() {
        let mut strangle = short_eurusd();
        strangle.open_hedge(&eurusd_hedge(), 1.07).unwrap();
        strangle.update_spot(1.09).unwrap();

        // -0.389663... + 0.12
        assert_eq!(strangle.aggregate_delta().unwrap(), dec!(-0.27));
        assert_eq!(strangle.spot(), 1.09);
    }

    #[test]
    fn update_spot_is_atomic() {
        let mut strangle = short_eurusd();
        let before = strangle.clone();

        assert!(strangle.update_spot(0.0).is_err());
        assert_eq!(strangle, before);
    }

    #[test]
    fn snapshot_is_raw() {
        let mut strangle = short_eurusd();
        strangle.open_hedge(&eurusd_hedge(), 1.07).unwrap();
        let ts = Timestamp::parse("2026-01-19T12:00:00Z").unwrap();
        let snapshot = strangle.snapshot(ts).unwrap();

        assert_eq!(snapshot.timestamp, ts);
        assert_eq!(snapshot.spot, 1.07);
        assert!((snapshot.strangle_delta - -0.117_587_632_003_927_41).abs() < 1e-12);
        assert!((snapshot.hedge_delta - 0.12).abs() < 1e-15);
        assert!((snapshot.global_delta - (snapshot.strangle_delta + 0.12)).abs() < 1e-15);
        assert!(strangle.recap().is_empty());
    }

    #[test]
    fn hedge_instrument_follows_option_style() {
        let fx = short_eurusd();
        assert_eq!(fx.hedge_instrument("=X"), eurusd_hedge());

        let vanilla = |terms| OptionContract::new(terms, Rates::Flat { rate: 0.05 }, 100.0).unwrap();
        let equity = Strangle::new(
            vanilla(OptionTerms::call("AAPL", 110.0, 1.0, 0.2)),
            vanilla(OptionTerms::put("AAPL", 90.0, 1.0, 0.2)),
            dec!(100),
            PositionSide::Long,
        )
        .unwrap();
        let instrument = equity.hedge_instrument("=X");
        assert_eq!(instrument.symbol.as_str(), "AAPL");
        assert_eq!(instrument.class, SpotClass::Equity);
    }

    #[test]
    fn restore_recap_only_into_empty_log() {
        let mut strangle = short_eurusd();
        let snapshot = strangle.snapshot(Timestamp::now()).unwrap();

        assert_eq!(strangle.restore_recap(vec![snapshot, snapshot]).unwrap(), 2);
        assert!(strangle.recap().pending_export().is_empty());
        assert!(matches!(
            strangle.restore_recap(vec![snapshot]),
            Err(StrangleError::RecapNotEmpty { len: 2 })
        ));
    }

    #[test]
    fn display_describes_legs() {
        let strangle = short_eurusd();
        assert_eq!(
            strangle.to_string(),
            "Short strangle x1000000: CALL maturity 3 months, strike 1.08 / PUT maturity 3 months, strike 1.06"
        );
    }
}
