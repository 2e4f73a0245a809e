use std::{fs, io, path::Path, time::Duration};

use anyhow::Context;
use client_core::{
    config::{DEFAULT_SIGNUP_BASE_URL, DEFAULT_TRACKING_BASE_URL},
    LandingConfig,
};
use serde::Deserialize;
use shared::domain::PageContext;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub tracking_url: String,
    pub signup_url: String,
    pub request_timeout_secs: u64,
    pub page: String,
    pub referrer: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tracking_url: DEFAULT_TRACKING_BASE_URL.into(),
            signup_url: DEFAULT_SIGNUP_BASE_URL.into(),
            request_timeout_secs: 10,
            page: "/".into(),
            referrer: String::new(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileSettings {
    tracking_url: Option<String>,
    signup_url: Option<String>,
    request_timeout_secs: Option<u64>,
    page: Option<String>,
    referrer: Option<String>,
}

/// Defaults, then the optional settings file, then the environment.
pub fn load_settings(path: &Path) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    match fs::read_to_string(path) {
        Ok(raw) => settings
            .apply_file(&raw)
            .with_context(|| format!("failed to parse settings file '{}'", path.display()))?,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(err) => {
            return Err(err)
                .with_context(|| format!("failed to read settings file '{}'", path.display()))
        }
    }

    settings.apply_env(|key| std::env::var(key).ok())?;
    Ok(settings)
}

impl Settings {
    fn apply_file(&mut self, raw: &str) -> anyhow::Result<()> {
        let file_cfg: FileSettings = toml::from_str(raw)?;
        if let Some(v) = file_cfg.tracking_url {
            self.tracking_url = v;
        }
        if let Some(v) = file_cfg.signup_url {
            self.signup_url = v;
        }
        if let Some(v) = file_cfg.request_timeout_secs {
            self.request_timeout_secs = v;
        }
        if let Some(v) = file_cfg.page {
            self.page = v;
        }
        if let Some(v) = file_cfg.referrer {
            self.referrer = v;
        }
        Ok(())
    }

    fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) -> anyhow::Result<()> {
        if let Some(v) = var("LANDING_TRACKING_URL") {
            self.tracking_url = v;
        }
        if let Some(v) = var("APP__TRACKING_URL") {
            self.tracking_url = v;
        }

        if let Some(v) = var("LANDING_SIGNUP_URL") {
            self.signup_url = v;
        }
        if let Some(v) = var("APP__SIGNUP_URL") {
            self.signup_url = v;
        }

        if let Some(v) = var("APP__REQUEST_TIMEOUT_SECS") {
            self.request_timeout_secs = v
                .parse()
                .with_context(|| format!("APP__REQUEST_TIMEOUT_SECS is not a number: '{v}'"))?;
        }

        Ok(())
    }

    pub fn landing_config(&self) -> anyhow::Result<LandingConfig> {
        if self.request_timeout_secs == 0 {
            anyhow::bail!("request timeout must be at least one second");
        }
        let config = LandingConfig::new(&self.tracking_url, &self.signup_url)
            .context("invalid endpoint configuration")?
            .with_request_timeout(Duration::from_secs(self.request_timeout_secs));
        Ok(config)
    }

    pub fn page_context(&self) -> PageContext {
        PageContext::new(self.page.clone(), self.referrer.clone())
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
