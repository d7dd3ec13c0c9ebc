//! Recap Store Port (Driven Port)
//!
//! Append-only tabular sink for recap snapshots, reloaded at startup.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::shared::Timestamp;
use crate::domain::strangle::RecapSnapshot;

/// One recap row, in the fixed column layout of the export.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RecapRow {
    /// Snapshot time.
    #[serde(rename = "Time")]
    pub time: Timestamp,
    /// Spot the legs were priced at.
    #[serde(rename = "Spot price")]
    pub spot_price: f64,
    /// Call leg delta.
    #[serde(rename = "DELTA leg1")]
    pub delta_leg1: f64,
    /// Put leg delta.
    #[serde(rename = "DELTA leg2")]
    pub delta_leg2: f64,
    /// Sum of both legs.
    #[serde(rename = "DELTA strangle")]
    pub delta_strangle: f64,
    /// Net hedge quantity.
    #[serde(rename = "DELTA hedge")]
    pub delta_hedge: f64,
    /// Strangle plus hedge.
    #[serde(rename = "DELTA global")]
    pub delta_global: f64,
}

/// Column names, in order.
pub const RECAP_COLUMNS: [&str; 7] = [
    "Time",
    "Spot price",
    "DELTA leg1",
    "DELTA leg2",
    "DELTA strangle",
    "DELTA hedge",
    "DELTA global",
];

impl From<&RecapSnapshot> for RecapRow {
    fn from(snapshot: &RecapSnapshot) -> Self {
        Self {
            time: snapshot.timestamp,
            spot_price: snapshot.spot,
            delta_leg1: snapshot.leg1_delta,
            delta_leg2: snapshot.leg2_delta,
            delta_strangle: snapshot.strangle_delta,
            delta_hedge: snapshot.hedge_delta,
            delta_global: snapshot.global_delta,
        }
    }
}

impl From<RecapRow> for RecapSnapshot {
    fn from(row: RecapRow) -> Self {
        Self {
            timestamp: row.time,
            spot: row.spot_price,
            leg1_delta: row.delta_leg1,
            leg2_delta: row.delta_leg2,
            strangle_delta: row.delta_strangle,
            hedge_delta: row.delta_hedge,
            global_delta: row.delta_global,
        }
    }
}

/// Recap persistence error.
#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    /// Underlying storage could not be read or written.
    #[error("Recap store I/O error at {path}: {source}")]
    Io {
        /// Storage location.
        path: String,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// A row could not be encoded or decoded.
    #[error("Recap row {row} is malformed: {message}")]
    Malformed {
        /// 1-based row number (header excluded).
        row: usize,
        /// Decoder message.
        message: String,
    },

    /// Stored header does not match the recap columns.
    #[error("Recap header mismatch: expected {expected}, found {found}")]
    HeaderMismatch {
        /// Expected header.
        expected: String,
        /// Header on disk.
        found: String,
    },
}

/// Port for persisting recap rows.
#[async_trait]
pub trait RecapStore: Send + Sync {
    /// All stored rows, oldest first.
    async fn load(&self) -> Result<Vec<RecapRow>, PersistenceError>;

    /// Append rows after the existing ones.
    async fn append(&self, rows: &[RecapRow]) -> Result<(), PersistenceError>;
}

/// Recap store that keeps nothing.
#[derive(Debug, Clone, Default)]
pub struct NoOpRecapStore;

#[async_trait]
impl RecapStore for NoOpRecapStore {
    async fn load(&self) -> Result<Vec<RecapRow>, PersistenceError> {
        Ok(Vec::new())
    }

    async fn append(&self, _rows: &[RecapRow]) -> Result<(), PersistenceError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> RecapSnapshot {
        RecapSnapshot {
            timestamp: Timestamp::parse("2026-01-19T12:00:00Z").unwrap(),
            spot: 1.07,
            leg1_delta: -0.48,
            leg2_delta: 0.36,
            strangle_delta: -0.12,
            hedge_delta: 0.12,
            global_delta: 0.0,
        }
    }

    #[test]
    fn row_mirrors_snapshot() {
        let snap = snapshot();
        let row = RecapRow::from(&snap);

        assert_eq!(row.spot_price, 1.07);
        assert_eq!(row.delta_hedge, 0.12);
        assert_eq!(RecapSnapshot::from(row), snap);
    }

    #[test]
    fn row_serializes_with_column_names() {
        let json = serde_json::to_value(RecapRow::from(&snapshot())).unwrap();
        for column in RECAP_COLUMNS {
            assert!(json.get(column).is_some(), "missing column {column}");
        }
    }

    #[tokio::test]
    async fn no_op_store_is_empty() {
        let store = NoOpRecapStore;
        store.append(&[RecapRow::from(&snapshot())]).await.unwrap();
        assert!(store.load().await.unwrap().is_empty());
    }
}
