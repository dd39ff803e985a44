//! Error types for mirrorlist-core.
//!
//! This module defines [`MirrorlistError`], the error type used throughout
//! the crate, along with helper traits for error context.

use miette::Diagnostic;
use thiserror::Error;

use crate::freshness::TimestampFormat;

/// Errors that abort a mirrorlist update.
///
/// Non-fatal conditions are reported as [`Advisory`](crate::updater::Advisory)
/// values instead.
#[derive(Error, Diagnostic, Debug)]
pub enum MirrorlistError {
    #[error("Unsupported platform `{os}`, pacman mirrorlists only exist on linux")]
    #[diagnostic(code(mirrorlist::platform))]
    Platform { os: String },

    #[error("The mirrorlist can only be updated by root")]
    #[diagnostic(
        code(mirrorlist::privilege),
        help("Re-run the command with sudo or doas")
    )]
    Privilege,

    #[error("Failed to fetch {url}")]
    #[diagnostic(
        code(mirrorlist::network),
        help("Check your internet connection and try again")
    )]
    Network {
        url: String,
        #[source]
        source: Box<ureq::Error>,
    },

    #[error("Failed to parse the mirror status document")]
    #[diagnostic(
        code(mirrorlist::parse),
        help("The status endpoint returned something other than UTF-8 JSON")
    )]
    Parse(#[from] serde_json::Error),

    #[error("Timestamp `{timestamp}` does not match format `{}`", .format.pattern())]
    #[diagnostic(code(mirrorlist::time_parse))]
    TimeParse {
        timestamp: String,
        format: TimestampFormat,
        #[source]
        source: chrono::ParseError,
    },

    #[error("Error while {action}")]
    #[diagnostic(code(mirrorlist::io), help("Check file permissions and disk space"))]
    Io {
        action: String,
        #[source]
        source: std::io::Error,
    },
}

impl MirrorlistError {
    pub(crate) fn network(url: &str, source: ureq::Error) -> Self {
        Self::Network {
            url: url.to_string(),
            source: Box::new(source),
        }
    }
}

/// A specialized Result type for mirrorlist operations.
pub type Result<T> = std::result::Result<T, MirrorlistError>;

/// Extension trait for adding context to I/O errors.
pub trait ErrorContext<T> {
    /// Adds context to an error, describing what action was being performed.
    fn with_context<C>(self, context: C) -> Result<T>
    where
        C: FnOnce() -> String;
}

impl<T> ErrorContext<T> for std::io::Result<T> {
    fn with_context<C>(self, context: C) -> Result<T>
    where
        C: FnOnce() -> String,
    {
        self.map_err(|err| {
            MirrorlistError::Io {
                action: context(),
                source: err,
            }
        })
    }
}
