//! Orchestration of a single mirrorlist refresh.

use std::{fmt, path::PathBuf};

use chrono::{DateTime, TimeDelta, Utc};
use tracing::{debug, warn};

use crate::{
    config::UpdaterConfig,
    error::Result,
    filter::usable_mirrors,
    freshness::{is_stale, TimestampFormat},
    status::StatusSource,
    writer::write_mirrorlist,
};

/// A degraded condition that does not abort the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advisory {
    /// The registry itself has not refreshed within the sync threshold.
    StaleStatus {
        last_check: String,
        max_age: TimeDelta,
    },
    /// No mirror met the criteria, so the mirrorlist was left as it was.
    NotUpdated { path: PathBuf },
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Advisory::StaleStatus {
                last_check,
                max_age,
            } => {
                write!(
                    f,
                    "The mirror status was last checked at {last_check}, more than {} hours ago",
                    max_age.num_hours()
                )
            }
            Advisory::NotUpdated {
                path,
            } => {
                write!(
                    f,
                    "No mirror met the criteria, {} was not updated",
                    path.display()
                )
            }
        }
    }
}

/// Outcome of a successful refresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateReport {
    /// Number of `Server` lines written.
    pub written: usize,

    /// Advisories in the order they were raised.
    pub advisories: Vec<Advisory>,
}

impl UpdateReport {
    pub fn is_updated(&self) -> bool {
        self.written > 0
    }
}

/// Fetches the mirror status and rewrites the mirrorlist.
///
/// Preconditions are not checked here, see [`preflight`](crate::system::preflight).
/// Each advisory is logged at `WARN` when raised and returned in the report.
///
/// Every usable mirror is gathered before the file is opened, so a timestamp
/// error never leaves a half-written mirrorlist behind.
///
/// # Arguments
///
/// * `config` - Thresholds and paths
/// * `source` - Where the status document comes from
/// * `now` - Reference instant for every freshness check
///
/// # Errors
///
/// Returns the first fatal error: network, parse, timestamp or I/O.
pub fn update<S: StatusSource + ?Sized>(
    config: &UpdaterConfig,
    source: &S,
    now: DateTime<Utc>,
) -> Result<UpdateReport> {
    let mut advisories = Vec::new();
    let mut raise = |advisory: Advisory| {
        warn!("{advisory}");
        advisories.push(advisory);
    };

    let status = source.fetch()?;
    debug!(
        "Mirror status lists {} mirrors, last checked at {}",
        status.urls.len(),
        status.last_check
    );

    let max_age = config.criteria.max_sync_age;
    if is_stale(&status.last_check, TimestampFormat::Fractional, now, max_age)? {
        raise(Advisory::StaleStatus {
            last_check: status.last_check.clone(),
            max_age,
        });
    }

    let lines = usable_mirrors(&status.urls, &config.criteria, now).collect::<Result<Vec<_>>>()?;
    let written = write_mirrorlist(&config.mirrorlist_path, &lines)?;

    if written == 0 {
        raise(Advisory::NotUpdated {
            path: config.mirrorlist_path.clone(),
        });
    }

    Ok(UpdateReport {
        written,
        advisories,
    })
}

#[cfg(test)]
mod tests {
    use std::{cell::Cell, fs};

    use chrono::TimeZone;
    use tempfile::{tempdir, TempDir};

    use super::*;
    use crate::{
        error::MirrorlistError,
        status::{MirrorEntry, MirrorStatus},
    };

    struct StaticSource {
        status: MirrorStatus,
        calls: Cell<usize>,
    }

    impl StaticSource {
        fn new(last_check: &str, urls: Vec<MirrorEntry>) -> Self {
            Self {
                status: MirrorStatus {
                    cutoff: Some(86400),
                    last_check: last_check.to_string(),
                    num_checks: Some(24),
                    check_frequency: Some(3600),
                    version: Some(3),
                    urls,
                },
                calls: Cell::new(0),
            }
        }
    }

    impl StatusSource for StaticSource {
        fn fetch(&self) -> Result<MirrorStatus> {
            self.calls.set(self.calls.get() + 1);
            Ok(self.status.clone())
        }
    }

    struct FailingSource;

    impl StatusSource for FailingSource {
        fn fetch(&self) -> Result<MirrorStatus> {
            Err(MirrorlistError::Parse(
                serde_json::from_str::<MirrorStatus>("{").unwrap_err(),
            ))
        }
    }

    const FRESH_CHECK: &str = "2024-05-01T17:30:00.000Z";
    const KNOWN_GOOD: &str = "Server = https://known-good.example/$repo/os/$arch\n";

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 18, 0, 0).unwrap()
    }

    fn entry(url: &str) -> MirrorEntry {
        MirrorEntry {
            url: url.to_string(),
            protocol: "https".into(),
            last_sync: Some("2024-05-01T18:00:00Z".into()),
            completion_pct: Some(1.0),
            delay: None,
            duration_avg: None,
            duration_stddev: None,
            score: Some(0.5),
            active: true,
            country: String::new(),
            country_code: String::new(),
            isos: false,
            ipv4: true,
            ipv6: false,
            details: String::new(),
        }
    }

    fn setup() -> (TempDir, UpdaterConfig) {
        let dir = tempdir().unwrap();
        let path = dir.path().join("mirrorlist");
        fs::write(&path, KNOWN_GOOD).unwrap();

        let config = UpdaterConfig {
            mirrorlist_path: path,
            ..Default::default()
        };
        (dir, config)
    }

    #[test]
    fn test_single_good_mirror() {
        let (_dir, config) = setup();
        let source = StaticSource::new(FRESH_CHECK, vec![entry("mirror.example/")]);

        let report = update(&config, &source, now()).unwrap();

        assert_eq!(report.written, 1);
        assert!(report.is_updated());
        assert!(report.advisories.is_empty());
        assert_eq!(source.calls.get(), 1);
        assert_eq!(
            fs::read_to_string(&config.mirrorlist_path).unwrap(),
            "Server = mirror.example/$repo/os/$arch\n"
        );
    }

    #[test]
    fn test_http_only_leaves_file_untouched() {
        let (_dir, config) = setup();
        let mut plain = entry("mirror.example/");
        plain.protocol = "http".into();
        let source = StaticSource::new(FRESH_CHECK, vec![plain]);

        let report = update(&config, &source, now()).unwrap();

        assert_eq!(report.written, 0);
        assert!(!report.is_updated());
        assert_eq!(
            report.advisories,
            vec![Advisory::NotUpdated {
                path: config.mirrorlist_path.clone()
            }]
        );
        assert_eq!(
            fs::read_to_string(&config.mirrorlist_path).unwrap(),
            KNOWN_GOOD
        );
    }

    #[test]
    fn test_denylisted_leaves_file_untouched() {
        let (_dir, config) = setup();
        let source = StaticSource::new(
            FRESH_CHECK,
            vec![entry("https://mirrors.lug.mtu.edu/archlinux/")],
        );

        let report = update(&config, &source, now()).unwrap();

        assert_eq!(report.written, 0);
        assert_eq!(
            fs::read_to_string(&config.mirrorlist_path).unwrap(),
            KNOWN_GOOD
        );
    }

    #[test]
    fn test_stale_status_still_writes() {
        let (_dir, config) = setup();
        let source = StaticSource::new(
            "2024-05-01T08:00:00.000000Z",
            vec![entry("mirror.example/")],
        );

        let report = update(&config, &source, now()).unwrap();

        assert_eq!(report.written, 1);
        assert_eq!(
            report.advisories,
            vec![Advisory::StaleStatus {
                last_check: "2024-05-01T08:00:00.000000Z".into(),
                max_age: TimeDelta::hours(6),
            }]
        );
        assert_eq!(
            fs::read_to_string(&config.mirrorlist_path).unwrap(),
            "Server = mirror.example/$repo/os/$arch\n"
        );
    }

    #[test]
    fn test_both_advisories() {
        let (_dir, config) = setup();
        let source = StaticSource::new("2024-04-30T00:00:00.000Z", vec![]);

        let report = update(&config, &source, now()).unwrap();

        assert_eq!(report.advisories.len(), 2);
        assert!(matches!(
            report.advisories[0],
            Advisory::StaleStatus { .. }
        ));
        assert!(matches!(
            report.advisories[1],
            Advisory::NotUpdated { .. }
        ));
    }

    #[test]
    fn test_fetch_failure_is_fatal() {
        let (_dir, config) = setup();

        let err = update(&config, &FailingSource, now()).unwrap_err();

        assert!(matches!(err, MirrorlistError::Parse(_)));
        assert_eq!(
            fs::read_to_string(&config.mirrorlist_path).unwrap(),
            KNOWN_GOOD
        );
    }

    #[test]
    fn test_bad_last_check_is_fatal() {
        let (_dir, config) = setup();
        let source = StaticSource::new("2024-05-01 17:30", vec![entry("mirror.example/")]);

        let err = update(&config, &source, now()).unwrap_err();

        assert!(matches!(
            err,
            MirrorlistError::TimeParse {
                format: TimestampFormat::Fractional,
                ..
            }
        ));
    }

    #[test]
    fn test_bad_last_sync_leaves_file_untouched() {
        let (_dir, config) = setup();
        let mut broken = entry("https://broken.example/");
        broken.last_sync = Some("not a date".into());
        let source = StaticSource::new(
            FRESH_CHECK,
            vec![entry("https://first.example/"), broken],
        );

        let err = update(&config, &source, now()).unwrap_err();

        assert!(matches!(err, MirrorlistError::TimeParse { .. }));
        assert_eq!(
            fs::read_to_string(&config.mirrorlist_path).unwrap(),
            KNOWN_GOOD
        );
    }

    #[test]
    fn test_write_failure_is_fatal() {
        let dir = tempdir().unwrap();
        let config = UpdaterConfig {
            mirrorlist_path: dir.path().join("missing").join("mirrorlist"),
            ..Default::default()
        };
        let source = StaticSource::new(FRESH_CHECK, vec![entry("mirror.example/")]);

        let err = update(&config, &source, now()).unwrap_err();

        assert!(matches!(err, MirrorlistError::Io { .. }));
    }

    #[test]
    fn test_advisory_display() {
        let advisory = Advisory::StaleStatus {
            last_check: "2024-05-01T08:00:00.000Z".into(),
            max_age: TimeDelta::hours(6),
        };
        assert_eq!(
            advisory.to_string(),
            "The mirror status was last checked at 2024-05-01T08:00:00.000Z, more than 6 hours ago"
        );

        let advisory = Advisory::NotUpdated {
            path: PathBuf::from("/etc/pacman.d/mirrorlist"),
        };
        assert_eq!(
            advisory.to_string(),
            "No mirror met the criteria, /etc/pacman.d/mirrorlist was not updated"
        );
    }
}
