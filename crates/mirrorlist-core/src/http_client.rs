use std::time::Duration;

use ureq::{Agent, Proxy};

use crate::constants::USER_AGENT;

#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub user_agent: Option<String>,
    pub proxy: Option<Proxy>,
    pub timeout: Option<Duration>,
}

impl Default for ClientConfig {
    /// Creates a ClientConfig that identifies as the updater, honours the
    /// proxy environment variables and leaves the timeout to the transport.
    ///
    /// # Examples
    ///
    /// ```
    /// use mirrorlist_core::http_client::ClientConfig;
    ///
    /// let cfg = ClientConfig::default();
    /// assert!(cfg.user_agent.unwrap().starts_with("pkgforge/mirrorlist-updater"));
    /// assert!(cfg.timeout.is_none());
    /// ```
    fn default() -> Self {
        Self {
            user_agent: Some(USER_AGENT.into()),
            proxy: Proxy::try_from_env(),
            timeout: None,
        }
    }
}

impl ClientConfig {
    /// Builds an HTTP `Agent` configured from this `ClientConfig`.
    ///
    /// Non-success statuses are reported by the agent as
    /// `ureq::Error::StatusCode`.
    ///
    /// # Examples
    ///
    /// ```
    /// use mirrorlist_core::http_client::ClientConfig;
    ///
    /// let agent = ClientConfig::default().build();
    /// let _req = agent.get("https://www.archlinux.org/mirrors/status/json/");
    /// ```
    pub fn build(&self) -> Agent {
        let mut config = ureq::Agent::config_builder()
            .proxy(self.proxy.clone())
            .http_status_as_error(true)
            .timeout_global(self.timeout);

        if let Some(user_agent) = &self.user_agent {
            config = config.user_agent(user_agent);
        }

        config.build().into()
    }
}
