//! Append-only hedge ledger and recap log.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::position::Position;
use crate::domain::shared::Timestamp;

/// Delta state of a strangle at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RecapSnapshot {
    /// When the snapshot was taken.
    pub timestamp: Timestamp,
    /// Spot the legs were priced at.
    pub spot: f64,
    /// Signed delta of the call leg.
    pub leg1_delta: f64,
    /// Signed delta of the put leg.
    pub leg2_delta: f64,
    /// Sum of the two legs.
    pub strangle_delta: f64,
    /// Sum of hedge signed quantities.
    pub hedge_delta: f64,
    /// Strangle plus hedge.
    pub global_delta: f64,
}

/// Hedge positions in the order they were opened.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct HedgeLedger(Vec<Position>);

impl HedgeLedger {
    /// Create an empty ledger.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    pub(super) fn push(&mut self, hedge: Position) {
        self.0.push(hedge);
    }

    /// Sum of signed quantities.
    #[must_use]
    pub fn net_quantity(&self) -> Decimal {
        self.0.iter().map(Position::signed_quantity).sum()
    }

    /// Entries as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[Position] {
        &self.0
    }

    /// Iterate over entries.
    pub fn iter(&self) -> std::slice::Iter<'_, Position> {
        self.0.iter()
    }

    /// Number of hedges.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if no hedge was opened yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> IntoIterator for &'a HedgeLedger {
    type Item = &'a Position;
    type IntoIter = std::slice::Iter<'a, Position>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Snapshots in the order they were taken. Entries are never edited.
///
/// Tracks how many leading entries have reached the recap store, so rows
/// that failed to export go out with the next batch.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RecapLog {
    entries: Vec<RecapSnapshot>,
    #[serde(skip)]
    exported: usize,
}

impl RecapLog {
    /// Create an empty log.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
            exported: 0,
        }
    }

    /// Append a snapshot.
    pub fn push(&mut self, snapshot: RecapSnapshot) {
        self.entries.push(snapshot);
    }

    /// Snapshots not yet written to the recap store, oldest first.
    #[must_use]
    pub fn pending_export(&self) -> &[RecapSnapshot] {
        self.entries.get(self.exported..).unwrap_or_default()
    }

    /// Record that the next `count` pending snapshots were stored.
    pub(super) fn mark_exported(&mut self, count: usize) {
        self.exported = (self.exported + count).min(self.entries.len());
    }

    /// Entries as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[RecapSnapshot] {
        &self.entries
    }

    /// Iterate over entries.
    pub fn iter(&self) -> std::slice::Iter<'_, RecapSnapshot> {
        self.entries.iter()
    }

    /// Number of snapshots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the log is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a RecapLog {
    type Item = &'a RecapSnapshot;
    type IntoIter = std::slice::Iter<'a, RecapSnapshot>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
