//! Market parameters the legs are priced with.

use serde::{Deserialize, Serialize};

/// Pricing model configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingConfig {
    /// Spot of the underlying at inception.
    pub spot: f64,
    /// Annualized volatility.
    #[serde(default = "default_volatility")]
    pub volatility: f64,
    /// Risk-free rate for vanilla options.
    #[serde(default = "default_risk_free_rate")]
    pub risk_free_rate: f64,
    /// Domestic rate for FX options.
    #[serde(default)]
    pub domestic_rate: f64,
    /// Foreign rate for FX options.
    #[serde(default)]
    pub foreign_rate: f64,
}

const fn default_volatility() -> f64 {
    0.1
}

const fn default_risk_free_rate() -> f64 {
    0.05
}
