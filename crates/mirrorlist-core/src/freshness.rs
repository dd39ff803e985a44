//! Timestamp staleness checks.
//!
//! The status endpoint encodes its own refresh time with sub-second precision
//! and each mirror's last sync without it, so callers name the format
//! explicitly through [`TimestampFormat`].

use std::fmt;

use chrono::{DateTime, NaiveDateTime, TimeDelta, Utc};

use crate::error::{MirrorlistError, Result};

/// Same layout as [`TimestampFormat::Fractional`]; `%.f` scales the digits
/// into a fraction where `%f` reads them as a nanosecond count.
const FRACTION_SCALED: &str = "%Y-%m-%dT%H:%M:%S%.fZ";

/// Timestamp layouts used by the mirror status document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimestampFormat {
    /// `2024-05-01T12:00:00.123456Z`, used by `last_check`.
    Fractional,
    /// `2024-05-01T12:00:00Z`, used by each mirror's `last_sync`.
    Whole,
}

impl TimestampFormat {
    /// Returns the `chrono` format string for this layout.
    pub fn pattern(&self) -> &'static str {
        match self {
            Self::Fractional => "%Y-%m-%dT%H:%M:%S.%fZ",
            Self::Whole => "%Y-%m-%dT%H:%M:%SZ",
        }
    }

    /// Parses `timestamp` as a UTC instant.
    ///
    /// # Errors
    ///
    /// Returns [`MirrorlistError::TimeParse`] if the string does not match
    /// this layout.
    pub fn parse(&self, timestamp: &str) -> Result<DateTime<Utc>> {
        let parsed = match self {
            Self::Fractional => NaiveDateTime::parse_from_str(timestamp, self.pattern())
                .and_then(|_| NaiveDateTime::parse_from_str(timestamp, FRACTION_SCALED)),
            Self::Whole => NaiveDateTime::parse_from_str(timestamp, self.pattern()),
        };

        parsed
            .map(|naive| naive.and_utc())
            .map_err(|source| {
                MirrorlistError::TimeParse {
                    timestamp: timestamp.to_string(),
                    format: *self,
                    source,
                }
            })
    }
}

impl fmt::Display for TimestampFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.pattern())
    }
}

/// Checks whether `timestamp` is older than `max_age` relative to `now`.
///
/// Only an age strictly greater than `max_age` counts as stale. Timestamps
/// ahead of `now` are never stale.
///
/// # Arguments
///
/// * `timestamp` - The encoded point in time
/// * `format` - The layout `timestamp` was encoded with
/// * `now` - Reference instant, captured once per run
/// * `max_age` - Largest acceptable age
///
/// # Errors
///
/// Returns [`MirrorlistError::TimeParse`] if `timestamp` does not match
/// `format`.
pub fn is_stale(
    timestamp: &str,
    format: TimestampFormat,
    now: DateTime<Utc>,
    max_age: TimeDelta,
) -> Result<bool> {
    let parsed = format.parse(timestamp)?;
    Ok(now.signed_duration_since(parsed) > max_age)
}
