//! HTTP seams to the external tracking and signup services.

use async_trait::async_trait;
use reqwest::Client;
use shared::protocol::{
    SignupRequest, SignupResponse, TrackVisitRequest, VisitorResponse, EMAIL_SIGNUP_PATH,
    TRACK_VISIT_PATH,
};
use tracing::debug;

use crate::{
    config::LandingConfig,
    error::{ConfigError, SubmissionError, TrackingError},
};

#[async_trait]
pub trait TrackingTransport: Send + Sync {
    /// Base URL the visit is reported to. The beacon re-fires when this changes.
    fn tracking_url(&self) -> &str;

    async fn track_visit(
        &self,
        request: &TrackVisitRequest,
    ) -> Result<VisitorResponse, TrackingError>;
}

#[async_trait]
pub trait SignupTransport: Send + Sync {
    /// `Ok(())` only when the service answered `success: true`.
    async fn sign_up(&self, request: &SignupRequest) -> Result<(), SubmissionError>;
}

/// reqwest-backed transport. The client keeps a cookie store so the tracking
/// service can correlate repeat visits into one session.
#[derive(Clone)]
pub struct HttpTransport {
    http: Client,
    tracking_base_url: String,
    signup_base_url: String,
}

impl HttpTransport {
    pub fn new(config: &LandingConfig) -> Result<Self, ConfigError> {
        let http = Client::builder()
            .cookie_store(true)
            .timeout(config.request_timeout)
            .build()?;
        Ok(Self::with_client(http, config))
    }

    pub fn with_client(http: Client, config: &LandingConfig) -> Self {
        Self {
            http,
            tracking_base_url: config.tracking_base_url().to_string(),
            signup_base_url: config.signup_base_url().to_string(),
        }
    }
}

#[async_trait]
impl TrackingTransport for HttpTransport {
    fn tracking_url(&self) -> &str {
        &self.tracking_base_url
    }

    async fn track_visit(
        &self,
        request: &TrackVisitRequest,
    ) -> Result<VisitorResponse, TrackingError> {
        let res = self
            .http
            .post(format!("{}{TRACK_VISIT_PATH}", self.tracking_base_url))
            .json(request)
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            return Err(TrackingError::Status(status.as_u16()));
        }

        let body = res.bytes().await?;
        serde_json::from_slice(&body).map_err(|err| TrackingError::Malformed(err.to_string()))
    }
}

#[async_trait]
impl SignupTransport for HttpTransport {
    async fn sign_up(&self, request: &SignupRequest) -> Result<(), SubmissionError> {
        let res = self
            .http
            .post(format!("{}{EMAIL_SIGNUP_PATH}", self.signup_base_url))
            .json(request)
            .send()
            .await
            .map_err(SubmissionError::transport)?;

        // The body decides the outcome; the status code is only logged.
        let status = res.status();
        let body = res.bytes().await.map_err(SubmissionError::transport)?;
        let body: SignupResponse = serde_json::from_slice(&body).map_err(|err| {
            SubmissionError::transport(format!("status {status}: undecodable body: {err}"))
        })?;
        debug!(%status, success = body.success, "signup service answered");

        if body.success {
            Ok(())
        } else {
            // An empty message leaves the hint line in place.
            Err(SubmissionError::Rejected(body.error.unwrap_or_default()))
        }
    }
}

#[cfg(test)]
#[path = "tests/transport_tests.rs"]
mod tests;
