//! Shared value types for the squad domain.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Time
// ---------------------------------------------------------------------------

/// A UTC wall-clock timestamp.
///
/// Wraps [`chrono::DateTime<Utc>`] so callers never depend on `chrono` types
/// directly; the underlying representation can change without affecting the
/// domain API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Returns the current UTC time as a [`Timestamp`].
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Creates a [`Timestamp`] from a [`DateTime<Utc>`].
    pub fn from_utc(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// Returns the underlying [`DateTime<Utc>`].
    pub fn as_datetime(self) -> DateTime<Utc> {
        self.0
    }

    /// Wall-clock time from `self` to `later`, clamped to zero.
    pub fn elapsed_until(self, later: Timestamp) -> std::time::Duration {
        (later.0 - self.0).to_std().unwrap_or_default()
    }

    /// [`Timestamp::elapsed_until`] in whole milliseconds, saturating at
    /// `u64::MAX`.
    pub fn millis_until(self, later: Timestamp) -> u64 {
        u64::try_from(self.elapsed_until(later).as_millis()).unwrap_or(u64::MAX)
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamps_display_as_rfc3339() {
        let dt = DateTime::parse_from_rfc3339("2025-12-01T09:30:00Z")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(Timestamp::from_utc(dt).to_string(), "2025-12-01T09:30:00+00:00");
    }

    #[test]
    fn elapsed_is_never_negative() {
        let later = Timestamp::now();
        let earlier = Timestamp::from_utc(later.as_datetime() - chrono::Duration::seconds(5));
        assert_eq!(earlier.elapsed_until(later).as_secs(), 5);
        assert_eq!(later.elapsed_until(earlier).as_secs(), 0);
    }

    #[test]
    fn millis_until_counts_whole_milliseconds() {
        let start = Timestamp::now();
        let end = Timestamp::from_utc(start.as_datetime() + chrono::Duration::milliseconds(1_250));
        assert_eq!(start.millis_until(end), 1_250);
        assert_eq!(end.millis_until(start), 0);
    }
}
