use std::time::Duration;

use school_finder_sources::{
    DEFAULT_FALLBACK_URL, DEFAULT_OVERPASS_MIRRORS, DEFAULT_USER_AGENT, NOMINATIM_SEARCH_URL,
};

use crate::{error::SchoolFinderError, export::CsvQuoting, query::DEFAULT_OVERPASS_TIMEOUT_SECS};

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(90);

/// Overpass mirrors are interchangeable; a single mirror leaves nothing to fail over to.
pub const MIN_OVERPASS_MIRRORS: usize = 2;

/// Endpoints, credentials and knobs for a [`crate::SchoolFinder`].
#[derive(Debug, Clone, PartialEq)]
pub struct FinderConfig {
    pub geocoder_url: String,
    /// Tried strictly in this order.
    pub overpass_mirrors: Vec<String>,
    /// Server-side budget written into the query as `[timeout:N]`.
    pub overpass_timeout_secs: u32,
    pub fallback_url: String,
    pub fallback_api_key: Option<String>,
    pub fallback_enabled: bool,
    pub user_agent: String,
    /// Client-side limit for a single HTTP exchange.
    pub request_timeout: Duration,
    pub csv_quoting: CsvQuoting,
}

impl Default for FinderConfig {
    fn default() -> Self {
        Self {
            geocoder_url: NOMINATIM_SEARCH_URL.to_owned(),
            overpass_mirrors: DEFAULT_OVERPASS_MIRRORS.iter().map(|m| (*m).to_owned()).collect(),
            overpass_timeout_secs: DEFAULT_OVERPASS_TIMEOUT_SECS,
            fallback_url: DEFAULT_FALLBACK_URL.to_owned(),
            fallback_api_key: None,
            fallback_enabled: true,
            user_agent: DEFAULT_USER_AGENT.to_owned(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            csv_quoting: CsvQuoting::default(),
        }
    }
}

impl FinderConfig {
    pub fn builder() -> FinderConfigBuilder {
        FinderConfigBuilder::new()
    }
}

/// Builder for [`FinderConfig`] with the public-service defaults.
#[derive(Debug, Clone, Default)]
pub struct FinderConfigBuilder {
    config: FinderConfig,
}

impl FinderConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: FinderConfig::default(),
        }
    }

    /// A configuration for offline use: no fallback requests are ever made.
    pub fn offline_fallback() -> Self {
        Self::new().fallback_enabled(false)
    }

    pub fn geocoder_url(mut self, url: impl Into<String>) -> Self {
        self.config.geocoder_url = url.into();
        self
    }

    /// Replace the mirror list. At least [`MIN_OVERPASS_MIRRORS`] are required.
    pub fn overpass_mirrors<I, S>(mut self, mirrors: I) -> Result<Self, SchoolFinderError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mirrors: Vec<String> = mirrors.into_iter().map(Into::into).collect();
        if mirrors.len() < MIN_OVERPASS_MIRRORS {
            return Err(SchoolFinderError::ConfigError(format!(
                "At least {MIN_OVERPASS_MIRRORS} Overpass mirrors are required, got {}",
                mirrors.len()
            )));
        }
        if let Some(blank) = mirrors.iter().position(|m| m.trim().is_empty()) {
            return Err(SchoolFinderError::ConfigError(format!(
                "Overpass mirror #{blank} is empty"
            )));
        }
        self.config.overpass_mirrors = mirrors;
        Ok(self)
    }

    pub fn overpass_timeout_secs(mut self, secs: u32) -> Result<Self, SchoolFinderError> {
        if secs == 0 {
            return Err(SchoolFinderError::ConfigError(
                "Overpass timeout must be at least one second".into(),
            ));
        }
        self.config.overpass_timeout_secs = secs;
        Ok(self)
    }

    pub fn fallback_url(mut self, url: impl Into<String>) -> Self {
        self.config.fallback_url = url.into();
        self
    }

    pub fn fallback_api_key(mut self, key: impl Into<String>) -> Self {
        self.config.fallback_api_key = Some(key.into());
        self
    }

    pub fn fallback_enabled(mut self, enabled: bool) -> Self {
        self.config.fallback_enabled = enabled;
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    pub fn request_timeout(mut self, timeout: Duration) -> Result<Self, SchoolFinderError> {
        if timeout.is_zero() {
            return Err(SchoolFinderError::ConfigError(
                "Request timeout must be non-zero".into(),
            ));
        }
        self.config.request_timeout = timeout;
        Ok(self)
    }

    pub fn csv_quoting(mut self, quoting: CsvQuoting) -> Self {
        self.config.csv_quoting = quoting;
        self
    }

    pub fn build(self) -> FinderConfig {
        self.config
    }
}
