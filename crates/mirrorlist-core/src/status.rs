//! Mirror status document and the fetcher that retrieves it.
//!
//! The document is published by archlinux.org and describes every registered
//! mirror along with the quality metrics gathered by the last check run.

use serde::Deserialize;
use tracing::debug;
use ureq::Agent;

use crate::{
    config::UpdaterConfig,
    constants::MAX_STATUS_BODY_SIZE,
    error::{MirrorlistError, Result},
    http_client::ClientConfig,
};

/// Response of the mirror status endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct MirrorStatus {
    /// Seconds after which a mirror is considered out of sync by the registry.
    #[serde(default)]
    pub cutoff: Option<u64>,

    /// When the registry last refreshed, `%Y-%m-%dT%H:%M:%S.%fZ`.
    pub last_check: String,

    #[serde(default)]
    pub num_checks: Option<u64>,

    #[serde(default)]
    pub check_frequency: Option<u64>,

    #[serde(default)]
    pub version: Option<u64>,

    /// Candidate mirrors, in the registry's preference order.
    pub urls: Vec<MirrorEntry>,
}

/// A single mirror as reported by the status endpoint.
///
/// Metrics are `null` for mirrors that were never successfully checked.
#[derive(Debug, Clone, Deserialize)]
pub struct MirrorEntry {
    /// Base URL, including the trailing slash.
    pub url: String,

    pub protocol: String,

    /// Last confirmed sync, `%Y-%m-%dT%H:%M:%SZ`.
    pub last_sync: Option<String>,

    /// Fraction of the package set present on the mirror, `0.0..=1.0`.
    pub completion_pct: Option<f64>,

    #[serde(default)]
    pub delay: Option<i64>,

    #[serde(default)]
    pub duration_avg: Option<f64>,

    #[serde(default)]
    pub duration_stddev: Option<f64>,

    /// Composite of latency and reliability. Lower is better.
    pub score: Option<f64>,

    pub active: bool,

    #[serde(default)]
    pub country: String,

    #[serde(default)]
    pub country_code: String,

    #[serde(default)]
    pub isos: bool,

    #[serde(default)]
    pub ipv4: bool,

    #[serde(default)]
    pub ipv6: bool,

    #[serde(default)]
    pub details: String,
}

impl MirrorStatus {
    /// Decodes a status document from raw response bytes.
    ///
    /// # Errors
    ///
    /// Returns [`MirrorlistError::Parse`] if the bytes are not UTF-8 or not a
    /// valid status document.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }
}

/// Where the mirror status document comes from.
pub trait StatusSource {
    fn fetch(&self) -> Result<MirrorStatus>;
}

/// Fetches the status document over HTTP with a single GET.
pub struct HttpSource {
    url: String,
    agent: Agent,
}

impl HttpSource {
    pub fn new(url: impl Into<String>, client: &ClientConfig) -> Self {
        Self {
            url: url.into(),
            agent: client.build(),
        }
    }

    pub fn from_config(config: &UpdaterConfig) -> Self {
        let client = ClientConfig {
            user_agent: Some(config.user_agent.clone()),
            ..Default::default()
        };
        Self::new(&config.status_url, &client)
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl StatusSource for HttpSource {
    /// Issues the request and decodes the body.
    ///
    /// There are no retries: a failed attempt is returned as is.
    ///
    /// # Errors
    ///
    /// * [`MirrorlistError::Network`] if the connection fails or the server
    ///   answers with a non-success status
    /// * [`MirrorlistError::Parse`] if the body is not a status document
    fn fetch(&self) -> Result<MirrorStatus> {
        debug!("Fetching mirror status from {}", self.url);

        let mut response = self
            .agent
            .get(self.url.as_str())
            .call()
            .map_err(|err| MirrorlistError::network(&self.url, err))?;

        let body = response
            .body_mut()
            .with_config()
            .limit(MAX_STATUS_BODY_SIZE)
            .read_to_vec()
            .map_err(|err| MirrorlistError::network(&self.url, err))?;

        debug!("Received {} bytes of mirror status", body.len());

        MirrorStatus::from_slice(&body)
    }
}
