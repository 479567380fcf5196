//! Timestamp value object for immutable points in time.

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Immutable point in time, always UTC.
///
/// Aggregates receive timestamps from a `Clock`; nothing in the domain
/// reads the wall clock directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Creates a timestamp for the current moment.
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Creates a timestamp from a DateTime<Utc>.
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// Returns the inner DateTime.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Checks if this timestamp is before another.
    pub fn is_before(&self, other: &Timestamp) -> bool {
        self.0 < other.0
    }

    /// Checks if this timestamp is after another.
    pub fn is_after(&self, other: &Timestamp) -> bool {
        self.0 > other.0
    }

    /// Returns the duration from another timestamp to this one.
    ///
    /// Returns negative duration if other is after self.
    pub fn duration_since(&self, other: &Timestamp) -> Duration {
        self.0.signed_duration_since(other.0)
    }

    /// Offsets by `duration`, or `None` past the representable range.
    pub fn checked_plus(&self, duration: Duration) -> Option<Self> {
        self.0.checked_add_signed(duration).map(Self)
    }

    /// Creates a new timestamp offset by the given duration.
    ///
    /// Saturates at the representable range.
    pub fn plus(&self, duration: Duration) -> Self {
        self.checked_plus(duration).unwrap_or_else(|| {
            if duration < Duration::zero() {
                Self(DateTime::<Utc>::MIN_UTC)
            } else {
                Self(DateTime::<Utc>::MAX_UTC)
            }
        })
    }

    /// Creates a new timestamp by adding the specified number of seconds.
    ///
    /// Negative values move backwards. Saturates like `plus`.
    pub fn plus_secs(&self, secs: i64) -> Self {
        let duration = Duration::try_seconds(secs).unwrap_or(if secs < 0 {
            Duration::min_value()
        } else {
            Duration::max_value()
        });
        self.plus(duration)
    }

    /// Creates a timestamp from Unix seconds.
    ///
    /// Returns `None` when the value is outside the representable range.
    pub fn from_unix_secs(secs: i64) -> Option<Self> {
        Utc.timestamp_opt(secs, 0).single().map(Self)
    }

    /// Returns the timestamp as Unix seconds.
    pub fn as_unix_secs(&self) -> i64 {
        self.0.timestamp()
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }
}

impl From<Timestamp> for DateTime<Utc> {
    fn from(ts: Timestamp) -> Self {
        ts.0
    }
}
