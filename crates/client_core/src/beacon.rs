//! One-shot visitor beacon.

use std::sync::Arc;

use chrono::Utc;
use shared::{
    domain::PageContext,
    protocol::{TrackVisitRequest, VisitorResponse},
};
use tokio::{sync::watch, task::JoinHandle};
use tracing::{info, warn};

use crate::{error::TrackingError, transport::TrackingTransport};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackingState {
    pub is_tracked: bool,
    pub is_new_visitor: bool,
    pub error: Option<String>,
}

impl TrackingState {
    /// Failures keep whatever flags were already recorded.
    pub fn record(&mut self, result: Result<VisitorResponse, TrackingError>) {
        match result {
            Ok(response) => {
                self.is_tracked = response.counted;
                self.is_new_visitor = response.is_new_visitor;
                self.error = None;
            }
            Err(err) => {
                self.error = Some(err.to_string());
            }
        }
    }
}

/// Handle to a visit report that was sent once, in the background.
///
/// Dropping the handle does not cancel the request; a late answer simply has
/// nobody left to observe it.
pub struct VisitorBeacon {
    tracking_url: String,
    state: watch::Receiver<TrackingState>,
    task: JoinHandle<()>,
}

impl VisitorBeacon {
    /// Spawns the report on the current tokio runtime.
    pub fn fire(transport: Arc<dyn TrackingTransport>, context: PageContext) -> Self {
        let tracking_url = transport.tracking_url().to_string();
        let (tx, rx) = watch::channel(TrackingState::default());

        let task = tokio::spawn(async move {
            let request = TrackVisitRequest::new(Utc::now(), &context);
            let result = transport.track_visit(&request).await;
            match &result {
                Ok(response) => info!(
                    page = %request.page,
                    counted = response.counted,
                    new_visitor = response.is_new_visitor,
                    new_session = response.is_new_session,
                    "visit tracked"
                ),
                Err(error) => warn!(page = %request.page, %error, "visit tracking failed"),
            }
            tx.send_modify(|state| state.record(result));
        });

        Self {
            tracking_url,
            state: rx,
            task,
        }
    }

    pub fn tracking_url(&self) -> &str {
        &self.tracking_url
    }

    pub fn state(&self) -> TrackingState {
        self.state.borrow().clone()
    }

    pub fn is_settled(&self) -> bool {
        self.task.is_finished()
    }

    /// Waits until the report has been answered (or has failed).
    pub async fn settled(&mut self) -> TrackingState {
        // Errs once the task is gone and its result was already seen.
        let _ = self.state.changed().await;
        self.state()
    }
}

#[cfg(test)]
#[path = "tests/beacon_tests.rs"]
mod tests;
