//! Hedging loop configuration.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::application::services::DEFAULT_FX_SUFFIX;
use crate::domain::strangle::DEFAULT_DELTA_PRECISION;

/// Hedging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HedgingConfig {
    /// Suffix appended to FX tickers for the hedging instrument.
    #[serde(default = "default_fx_suffix")]
    pub fx_suffix: String,
    /// Decimal places of aggregate delta and gamma.
    #[serde(default = "default_delta_precision")]
    pub delta_precision: u32,
    /// Deltas smaller than this are treated as flat.
    #[serde(default = "default_neutral_band")]
    pub neutral_band: Decimal,
    /// Hedging runs performed by the driver.
    #[serde(default = "default_runs")]
    pub runs: u32,
}

impl Default for HedgingConfig {
    fn default() -> Self {
        Self {
            fx_suffix: default_fx_suffix(),
            delta_precision: default_delta_precision(),
            neutral_band: default_neutral_band(),
            runs: default_runs(),
        }
    }
}

fn default_fx_suffix() -> String {
    DEFAULT_FX_SUFFIX.to_string()
}

const fn default_delta_precision() -> u32 {
    DEFAULT_DELTA_PRECISION
}

const fn default_neutral_band() -> Decimal {
    Decimal::from_parts(1, 0, 0, false, 2)
}

const fn default_runs() -> u32 {
    1
}
