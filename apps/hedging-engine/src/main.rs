//! Hedging Engine Binary
//!
//! Builds the configured strangle and delta-hedges it against the
//! configured market data.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin hedging-engine
//! ```
//!
//! # Environment Variables
//!
//! - `HEDGING_CONFIG`: config file path (default: hedging.yaml)
//! - `RUST_LOG`: overrides the configured log level
//!
//! Any `${VAR}` referenced by the config file is read from the environment
//! or a `.env` file.

use anyhow::Context;
use hedging_engine::application::services::HedgeOutcome;
use hedging_engine::config::{Config, DEFAULT_CONFIG_PATH, load_config};
use hedging_engine::domain::strangle::Strangle;
use hedging_engine::infrastructure::config::Container;
use hedging_engine::telemetry::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    load_dotenv();

    let path = std::env::var("HEDGING_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let config = load_config(Some(&path)).with_context(|| format!("loading {path}"))?;
    init_tracing(&config.observability.logging).context("installing tracing subscriber")?;

    tracing::info!(config = %path, "Starting hedging engine");
    log_config(&config);

    if let Err(e) = run(config).await {
        tracing::error!(error = %format!("{e:#}"), "Hedging engine failed");
        return Err(e);
    }

    tracing::info!("Hedging engine stopped");
    Ok(())
}

/// Build, restore and hedge for the configured number of runs.
async fn run(config: Config) -> anyhow::Result<()> {
    let runs = config.hedging.runs;
    let container = Container::from_config(config).context("wiring components")?;
    let mut strangle = container.strangle().context("building strangle")?;
    tracing::info!(strangle = %strangle, "Strangle opened");

    let engine = container.hedging_engine();
    let restored = engine
        .restore(&mut strangle)
        .await
        .context("restoring recap history")?;
    if restored > 0 {
        tracing::info!(restored, "Resumed from persisted recap");
    }

    for run in 1..=runs {
        let outcome = engine
            .delta_hedging(&mut strangle)
            .await
            .with_context(|| format!("hedging run {run}"))?;
        log_outcome(run, &outcome);
    }

    log_recap(&strangle);
    Ok(())
}

/// Load .env file from current or ancestor directories.
fn load_dotenv() {
    if dotenvy::dotenv().is_ok() {
        return;
    }

    if let Ok(cwd) = std::env::current_dir() {
        let mut dir = cwd.as_path();
        while let Some(parent) = dir.parent() {
            let env_path = parent.join(".env");
            if env_path.exists() {
                let _ = dotenvy::from_path(&env_path);
                return;
            }
            dir = parent;
        }
    }
}

fn log_config(config: &Config) {
    tracing::info!(
        underlying = %config.strangle.underlying,
        style = ?config.strangle.style,
        side = %config.strangle.side,
        size = %config.strangle.size,
        provider = ?config.market_data.provider,
        runs = config.hedging.runs,
        persistence = config.persistence.enabled,
        "Configuration loaded"
    );
}

fn log_outcome(run: u32, outcome: &HedgeOutcome) {
    match outcome {
        HedgeOutcome::AlreadyNeutral { spot } => {
            tracing::info!(run, spot, "Strangle already delta neutral");
        }
        HedgeOutcome::Hedged { spot, delta, hedge } => {
            tracing::info!(run, spot, delta = %delta, hedge = %hedge, "Hedge opened");
        }
    }
}

fn log_recap(strangle: &Strangle) {
    for row in strangle.recap() {
        tracing::info!(
            time = %row.timestamp,
            spot = row.spot,
            leg1 = row.leg1_delta,
            leg2 = row.leg2_delta,
            strangle = row.strangle_delta,
            hedge = row.hedge_delta,
            global = row.global_delta,
            "Recap"
        );
    }
    tracing::info!(
        snapshots = strangle.recap().len(),
        hedges = strangle.hedges().len(),
        net_hedge = %strangle.hedges().net_quantity(),
        "Recap complete"
    );
}
