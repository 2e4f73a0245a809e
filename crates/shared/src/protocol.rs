use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{EmailAddress, PageContext};

pub const TRACK_VISIT_PATH: &str = "/visitors/track";
pub const EMAIL_SIGNUP_PATH: &str = "/email/signup";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackVisitRequest {
    /// ISO-8601, UTC, millisecond precision.
    pub timestamp: String,
    pub page: String,
    pub referrer: String,
}

impl TrackVisitRequest {
    pub fn new(at: DateTime<Utc>, context: &PageContext) -> Self {
        Self {
            timestamp: at.to_rfc3339_opts(SecondsFormat::Millis, true),
            page: context.page.clone(),
            referrer: context.referrer.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisitorResponse {
    pub success: bool,
    pub counted: bool,
    pub is_new_visitor: bool,
    pub is_new_session: bool,
    pub total_visitors: u64,
    pub session_visitors: u64,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignupRequest {
    pub email: EmailAddress,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignupResponse {
    /// Absent counts as a rejection.
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
