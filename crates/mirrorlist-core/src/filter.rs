//! Selection of mirrors worth writing to the mirrorlist.

use chrono::{DateTime, Utc};

use crate::{
    config::FilterCriteria,
    constants::SERVER_PATH_SUFFIX,
    error::Result,
    freshness::{is_stale, TimestampFormat},
    status::MirrorEntry,
};

impl FilterCriteria {
    /// Checks a single mirror against every threshold.
    ///
    /// Checks run in a fixed order and stop at the first failure, so a
    /// malformed `last_sync` only surfaces for mirrors that passed every
    /// other check. Missing metrics never pass.
    ///
    /// # Errors
    ///
    /// Returns [`MirrorlistError::TimeParse`](crate::error::MirrorlistError::TimeParse)
    /// if `last_sync` is not in [`TimestampFormat::Whole`].
    pub fn accepts(&self, entry: &MirrorEntry, now: DateTime<Utc>) -> Result<bool> {
        if self
            .denylist
            .iter()
            .any(|host| entry.url.contains(host.as_str()))
        {
            return Ok(false);
        }

        if !entry.active || entry.protocol != self.protocol {
            return Ok(false);
        }

        if !entry
            .completion_pct
            .is_some_and(|pct| pct >= self.min_completion)
        {
            return Ok(false);
        }

        if !entry.score.is_some_and(|score| score < self.max_score) {
            return Ok(false);
        }

        let Some(last_sync) = entry.last_sync.as_deref() else {
            return Ok(false);
        };

        Ok(!is_stale(
            last_sync,
            TimestampFormat::Whole,
            now,
            self.max_sync_age,
        )?)
    }
}

/// Formats a mirror as a pacman `Server` line.
///
/// `$repo` and `$arch` are left for pacman to expand.
pub fn server_line(url: &str) -> String {
    format!("Server = {url}{SERVER_PATH_SUFFIX}\n")
}

/// Lazily yields a `Server` line for every mirror meeting `criteria`,
/// preserving the order of `entries`.
///
/// Rejected mirrors are skipped silently. An `Err` item means a timestamp
/// could not be parsed; callers should stop there.
pub fn usable_mirrors<'a>(
    entries: &'a [MirrorEntry],
    criteria: &'a FilterCriteria,
    now: DateTime<Utc>,
) -> impl Iterator<Item = Result<String>> + 'a {
    entries.iter().filter_map(move |entry| {
        match criteria.accepts(entry, now) {
            Ok(true) => Some(Ok(server_line(&entry.url))),
            Ok(false) => None,
            Err(err) => Some(Err(err)),
        }
    })
}
