//! Configuration for the hedging engine.
//!
//! Loads a YAML file, interpolates environment variables and validates the
//! values before anything is priced.
//!
//! # Usage
//!
//! ```rust,ignore
//! use hedging_engine::config::load_config;
//!
//! // Load from default path (hedging.yaml)
//! let config = load_config(None)?;
//!
//! // Load from custom path
//! let config = load_config(Some("config/eurusd.yaml"))?;
//!
//! println!("underlying: {}", config.strangle.underlying);
//! ```

mod hedging;
mod market_data;
mod observability;
mod persistence;
mod pricing;
mod strangle;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::shared::Symbol;

pub use hedging::HedgingConfig;
pub use market_data::{MarketDataConfig, ProviderKind, RetryConfig};
pub use observability::{LoggingConfig, ObservabilityConfig};
pub use persistence::PersistenceConfig;
pub use pricing::PricingConfig;
pub use strangle::{OptionStyle, StrangleConfig};

/// Default configuration path.
pub const DEFAULT_CONFIG_PATH: &str = "hedging.yaml";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        /// Path to the config file.
        path: String,
        /// The underlying IO error.
        source: std::io::Error,
    },

    /// Failed to parse YAML configuration.
    #[error("Failed to parse config YAML: {0}")]
    ParseError(#[from] serde_yaml_bw::Error),

    /// Configuration validation failed.
    #[error("Config validation failed: {0}")]
    ValidationError(String),
}

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Strangle definition.
    pub strangle: StrangleConfig,
    /// Market parameters.
    pub pricing: PricingConfig,
    /// Hedging loop settings.
    #[serde(default)]
    pub hedging: HedgingConfig,
    /// Market data source.
    #[serde(default)]
    pub market_data: MarketDataConfig,
    /// Recap persistence.
    #[serde(default)]
    pub persistence: PersistenceConfig,
    /// Observability configuration.
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

pub(crate) const fn default_true() -> bool {
    true
}

// ============================================
// Configuration Loading
// ============================================

/// Load configuration from a YAML file with environment variable interpolation.
///
/// # Arguments
///
/// * `path` - Optional path to the config file. Defaults to "hedging.yaml".
///
/// # Errors
///
/// Returns a `ConfigError` if the file cannot be read, parsed, or validated.
pub fn load_config(path: Option<&str>) -> Result<Config, ConfigError> {
    let path = path.unwrap_or(DEFAULT_CONFIG_PATH);

    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_string(),
        source: e,
    })?;

    load_config_from_string(&contents)
}

/// Load configuration from a YAML string (useful for testing).
///
/// # Errors
///
/// Returns a `ConfigError` if the YAML cannot be parsed or validated.
pub fn load_config_from_string(yaml: &str) -> Result<Config, ConfigError> {
    let interpolated = interpolate_env_vars(yaml);
    let config: Config = serde_yaml_bw::from_str(&interpolated)?;
    validate_config(&config)?;
    Ok(config)
}

/// Interpolate environment variables in a string.
///
/// Supports both `${VAR}` and `${VAR:-default}` syntax.
#[allow(clippy::expect_used)] // Regex is a compile-time constant
fn interpolate_env_vars(input: &str) -> String {
    use std::sync::OnceLock;

    static ENV_VAR_REGEX: OnceLock<regex::Regex> = OnceLock::new();

    let mut result = input.to_string();

    let re = ENV_VAR_REGEX.get_or_init(|| {
        regex::Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)(?::-([^}]*))?\}")
            .expect("env var regex is valid")
    });

    for cap in re.captures_iter(input) {
        let Some(full_match) = cap.get(0) else {
            continue;
        };
        let Some(var_match) = cap.get(1) else {
            continue;
        };
        let full_match = full_match.as_str();
        let var_name = var_match.as_str();
        let default_value = cap.get(2).map(|m| m.as_str());

        let value = match std::env::var(var_name) {
            Ok(v) if !v.is_empty() => v,
            _ => default_value.map_or_else(String::new, str::to_string),
        };

        result = result.replace(full_match, &value);
    }

    result
}

fn invalid(message: impl Into<String>) -> ConfigError {
    ConfigError::ValidationError(message.into())
}

fn require_positive(name: &str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(format!("{name} must be positive, got {value}")))
    }
}

fn require_rate(name: &str, value: f64) -> Result<(), ConfigError> {
    if (-1.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(invalid(format!("{name} must be between -1.0 and 1.0, got {value}")))
    }
}

/// Validate configuration values.
fn validate_config(config: &Config) -> Result<(), ConfigError> {
    let strangle = &config.strangle;
    Symbol::new(&strangle.underlying)
        .validate()
        .map_err(|e| invalid(format!("strangle.underlying: {e}")))?;
    if strangle.size <= rust_decimal::Decimal::ZERO {
        return Err(invalid(format!(
            "strangle.size must be positive, got {}",
            strangle.size
        )));
    }
    require_positive("strangle.maturity_years", strangle.maturity_years)?;
    if let Some(strike) = strangle.call_strike {
        require_positive("strangle.call_strike", strike)?;
    }
    if let Some(strike) = strangle.put_strike {
        require_positive("strangle.put_strike", strike)?;
    }

    let pricing = &config.pricing;
    require_positive("pricing.spot", pricing.spot)?;
    require_positive("pricing.volatility", pricing.volatility)?;
    require_rate("pricing.risk_free_rate", pricing.risk_free_rate)?;
    require_rate("pricing.domestic_rate", pricing.domestic_rate)?;
    require_rate("pricing.foreign_rate", pricing.foreign_rate)?;

    let hedging = &config.hedging;
    if hedging.neutral_band <= rust_decimal::Decimal::ZERO {
        return Err(invalid("hedging.neutral_band must be positive"));
    }

    let market_data = &config.market_data;
    if market_data.provider == ProviderKind::Replay && market_data.replay_path.is_none() {
        return Err(invalid(
            "market_data.replay_path is required for the replay provider",
        ));
    }
    if market_data.timeout_ms == 0 {
        return Err(invalid("market_data.timeout_ms must be positive"));
    }
    for (instrument, price) in &market_data.prices {
        require_positive(&format!("market_data.prices.{instrument}"), *price)?;
    }
    let retry = &market_data.retry;
    if retry.multiplier < 1.0 {
        return Err(invalid("market_data.retry.multiplier must be at least 1.0"));
    }
    if !(0.0..=1.0).contains(&retry.jitter) {
        return Err(invalid("market_data.retry.jitter must be between 0.0 and 1.0"));
    }

    let valid_formats = ["json", "pretty"];
    if !valid_formats.contains(&config.observability.logging.format.as_str()) {
        return Err(invalid(format!(
            "observability.logging.format must be one of: {valid_formats:?}"
        )));
    }

    Ok(())
}
