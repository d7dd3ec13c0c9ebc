//! Integration tests for configuration-driven runs.
//!
//! Loads the shipped `hedging.yaml`, wires it through the container and
//! replays the recorded EURUSD prices into a CSV recap.

use std::path::{Path, PathBuf};

use hedging_engine::application::ports::RECAP_COLUMNS;
use hedging_engine::config::{Config, OptionStyle, ProviderKind, load_config};
use hedging_engine::{Container, HedgingError, PositionSide, forward_price};

fn manifest_path(relative: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join(relative)
}

fn shipped_config(recap_path: &Path) -> Config {
    let path = manifest_path("hedging.yaml");
    let mut config = match load_config(path.to_str()) {
        Ok(c) => c,
        Err(e) => panic!("shipped config should load: {e}"),
    };
    config.strangle.underlying = "EURUSD".to_string();
    config.market_data.provider = ProviderKind::Replay;
    config.market_data.replay_path = Some(
        manifest_path("data/eurusd_replay.csv")
            .to_string_lossy()
            .into_owned(),
    );
    config.persistence.enabled = true;
    config.persistence.recap_path = recap_path.to_string_lossy().into_owned();
    config
}

#[test]
fn test_shipped_config_loads() {
    let config = load_config(manifest_path("hedging.yaml").to_str()).unwrap();

    assert_eq!(config.strangle.style, OptionStyle::Fx);
    assert_eq!(config.strangle.side, PositionSide::Short);
    assert_eq!(config.hedging.fx_suffix, "=X");
    assert_eq!(config.market_data.max_staleness_secs, None);
}

#[test]
fn test_missing_config_file_is_a_read_error() {
    let result = load_config(Some("/nonexistent/hedging.yaml"));
    let Err(err) = result else {
        panic!("expected read error");
    };
    assert!(err.to_string().contains("/nonexistent/hedging.yaml"));
}

#[tokio::test]
async fn test_replay_run_until_prices_are_exhausted() {
    let dir = tempfile::tempdir().unwrap();
    let recap_path = dir.path().join("recap.csv");
    let container = Container::from_config(shipped_config(&recap_path)).unwrap();
    let mut strangle = container.strangle().unwrap();
    let engine = container.hedging_engine();

    let atm = forward_price(1.07, 0.0476, 0.0225, 90);
    assert!((strangle.leg1().asset().as_option().unwrap().strike() - atm).abs() < 1e-12);

    let mut spots = Vec::new();
    for _ in 0..4 {
        engine.delta_hedging(&mut strangle).await.unwrap();
        spots.push(strangle.spot());
    }
    assert_eq!(spots, vec![1.0712, 1.0756, 1.0689, 1.0701]);

    let recorded = strangle.recap().len();
    let result = engine.delta_hedging(&mut strangle).await;
    assert!(matches!(
        result,
        Err(HedgingError::MarketDataUnavailable { .. })
    ));
    assert_eq!(strangle.recap().len(), recorded);
    assert_eq!(strangle.spot(), 1.0701);

    let contents = std::fs::read_to_string(&recap_path).unwrap();
    let mut lines = contents.lines();
    assert_eq!(lines.next(), Some(RECAP_COLUMNS.join(",").as_str()));
    assert_eq!(lines.count(), recorded);
}

#[tokio::test]
async fn test_second_process_resumes_recap() {
    let dir = tempfile::tempdir().unwrap();
    let recap_path = dir.path().join("recap.csv");

    let first = Container::from_config(shipped_config(&recap_path)).unwrap();
    let mut strangle = first.strangle().unwrap();
    let engine = first.hedging_engine();
    engine.delta_hedging(&mut strangle).await.unwrap();
    engine.delta_hedging(&mut strangle).await.unwrap();

    let second = Container::from_config(shipped_config(&recap_path)).unwrap();
    let mut resumed = second.strangle().unwrap();
    let restored = second.hedging_engine().restore(&mut resumed).await.unwrap();

    assert_eq!(restored, strangle.recap().len());
    assert_eq!(resumed.recap().as_slice(), strangle.recap().as_slice());
    assert!(resumed.hedges().is_empty());
}
