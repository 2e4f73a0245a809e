use std::time::Duration;

use url::Url;

use crate::error::ConfigError;

pub const DEFAULT_TRACKING_BASE_URL: &str = "http://api.cio.football";
pub const DEFAULT_SIGNUP_BASE_URL: &str = "http://api.cio.football";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Endpoints and limits for the two outbound calls the page makes.
///
/// Base URLs are stored without a trailing slash so endpoint paths can be
/// appended directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LandingConfig {
    tracking_base_url: String,
    signup_base_url: String,
    pub request_timeout: Duration,
}

impl Default for LandingConfig {
    fn default() -> Self {
        Self {
            tracking_base_url: DEFAULT_TRACKING_BASE_URL.to_string(),
            signup_base_url: DEFAULT_SIGNUP_BASE_URL.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

impl LandingConfig {
    pub fn new(tracking_base_url: &str, signup_base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            tracking_base_url: normalize_base_url(tracking_base_url)?,
            signup_base_url: normalize_base_url(signup_base_url)?,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        })
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn tracking_base_url(&self) -> &str {
        &self.tracking_base_url
    }

    pub fn signup_base_url(&self) -> &str {
        &self.signup_base_url
    }
}

pub(crate) fn normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    let raw = raw.trim();
    let parsed = Url::parse(raw).map_err(|err| ConfigError::InvalidBaseUrl {
        url: raw.to_string(),
        reason: err.to_string(),
    })?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidBaseUrl {
            url: raw.to_string(),
            reason: format!("unsupported scheme '{}'", parsed.scheme()),
        });
    }

    if parsed.query().is_some() || parsed.fragment().is_some() {
        return Err(ConfigError::InvalidBaseUrl {
            url: raw.to_string(),
            reason: "query and fragment are not allowed".to_string(),
        });
    }

    Ok(raw.trim_end_matches('/').to_string())
}
