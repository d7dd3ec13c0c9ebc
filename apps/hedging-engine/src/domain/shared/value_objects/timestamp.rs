//! UTC instant stamped on recap snapshots and price observations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A UTC instant. Serializes as RFC 3339, which is also the recap `Time` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Wall-clock time.
    #[must_use]
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Parse an RFC 3339 string with any offset, normalized to UTC.
    ///
    /// # Errors
    ///
    /// Returns `chrono::ParseError` if `s` is not RFC 3339.
    pub fn parse(s: &str) -> Result<Self, chrono::ParseError> {
        DateTime::parse_from_rfc3339(s).map(|dt| Self(dt.with_timezone(&Utc)))
    }

    /// Signed time elapsed from `earlier` to `self`.
    #[must_use]
    pub fn duration_since(&self, earlier: Self) -> chrono::Duration {
        self.0 - earlier.0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_rfc3339())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets_normalize_to_utc() {
        let paris = Timestamp::parse("2026-01-19T13:00:00+01:00").unwrap();
        let utc = Timestamp::parse("2026-01-19T12:00:00Z").unwrap();
        assert_eq!(paris, utc);
        assert_eq!(paris.to_string(), "2026-01-19T12:00:00+00:00");
    }

    #[test]
    fn rejects_non_rfc3339() {
        assert!(Timestamp::parse("19/01/2026 12:00").is_err());
    }

    #[test]
    fn elapsed_is_signed() {
        let open = Timestamp::parse("2026-01-19T12:00:00Z").unwrap();
        let close = Timestamp::parse("2026-01-19T13:00:00Z").unwrap();
        assert!(open < close);
        assert_eq!(close.duration_since(open).num_hours(), 1);
        assert_eq!(open.duration_since(close).num_hours(), -1);
    }

    #[test]
    fn json_is_a_plain_string() {
        let ts = Timestamp::parse("2026-01-19T12:00:00Z").unwrap();
        let json = serde_json::to_string(&ts).unwrap();
        assert_eq!(json, "\"2026-01-19T12:00:00Z\"");
        assert_eq!(serde_json::from_str::<Timestamp>(&json).unwrap(), ts);
    }
}
