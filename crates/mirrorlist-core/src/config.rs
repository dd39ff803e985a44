//! Tunables for a mirrorlist update.
//!
//! Every value is fixed at build time; [`UpdaterConfig::default`] gathers the
//! constants so that the rest of the crate never reads them directly.

use std::path::PathBuf;

use chrono::TimeDelta;

use crate::constants::{
    MAX_LAST_SYNC_HOURS, MAX_SCORE, MINIMUM_COMPLETION_PERCENTAGE, MIRRORLIST_PATH,
    REQUIRED_PROTOCOL, STATUS_URL, URL_DENYLIST, USER_AGENT,
};

/// Quality thresholds a mirror must meet to be written.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterCriteria {
    /// Substrings that disqualify a mirror URL.
    pub denylist: Vec<String>,

    /// Exact protocol a mirror must use.
    pub protocol: String,

    /// Minimum `completion_pct`, inclusive.
    pub min_completion: f64,

    /// Maximum `score`, exclusive.
    pub max_score: f64,

    /// Largest accepted age of a mirror's `last_sync`. Also used for the
    /// status document's own `last_check`.
    pub max_sync_age: TimeDelta,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            denylist: URL_DENYLIST.iter().map(|host| host.to_string()).collect(),
            protocol: REQUIRED_PROTOCOL.to_string(),
            min_completion: MINIMUM_COMPLETION_PERCENTAGE,
            max_score: MAX_SCORE,
            max_sync_age: TimeDelta::hours(MAX_LAST_SYNC_HOURS),
        }
    }
}

/// Application's configuration
#[derive(Debug, Clone, PartialEq)]
pub struct UpdaterConfig {
    /// Mirror status endpoint.
    pub status_url: String,

    /// File overwritten with the selected mirrors.
    pub mirrorlist_path: PathBuf,

    /// User agent for the status request.
    pub user_agent: String,

    pub criteria: FilterCriteria,
}

impl Default for UpdaterConfig {
    fn default() -> Self {
        Self {
            status_url: STATUS_URL.to_string(),
            mirrorlist_path: PathBuf::from(MIRRORLIST_PATH),
            user_agent: USER_AGENT.to_string(),
            criteria: FilterCriteria::default(),
        }
    }
}
