use std::sync::Arc;

use shared::domain::PageContext;
use tracing::info;

pub mod beacon;
pub mod config;
pub mod controller;
pub mod error;
pub mod signup;
pub mod transport;
pub mod view;

pub use beacon::{TrackingState, VisitorBeacon};
pub use config::LandingConfig;
pub use controller::SignupController;
pub use error::{ConfigError, SubmissionError, TrackingError, ValidationError};
pub use signup::{Key, SignupEvent, SignupPhase, SignupState};
pub use transport::{HttpTransport, SignupTransport, TrackingTransport};
pub use view::LandingView;

/// A mounted landing page: the visit beacon plus the signup form.
///
/// The two halves share nothing; a failed beacon never affects the form.
pub struct LandingPage {
    context: PageContext,
    beacon: VisitorBeacon,
    form: SignupController,
}

impl LandingPage {
    /// Mounts against the real services. Must be called inside a tokio runtime.
    pub fn mount(config: &LandingConfig, context: PageContext) -> Result<Self, ConfigError> {
        let transport = Arc::new(HttpTransport::new(config)?);
        Ok(Self::mount_with(transport.clone(), transport, context))
    }

    pub fn mount_with(
        tracking: Arc<dyn TrackingTransport>,
        signup: Arc<dyn SignupTransport>,
        context: PageContext,
    ) -> Self {
        info!(page = %context.page, "landing page mounted");
        Self {
            beacon: VisitorBeacon::fire(tracking, context.clone()),
            form: SignupController::new(signup),
            context,
        }
    }

    pub fn form(&self) -> &SignupController {
        &self.form
    }

    pub fn beacon(&self) -> &VisitorBeacon {
        &self.beacon
    }

    pub fn beacon_mut(&mut self) -> &mut VisitorBeacon {
        &mut self.beacon
    }

    pub fn tracking(&self) -> TrackingState {
        self.beacon.state()
    }

    /// Swaps the tracking endpoint. The visit is reported again only when the
    /// endpoint actually differs; returns whether a new report went out.
    pub fn set_tracking_transport(&mut self, tracking: Arc<dyn TrackingTransport>) -> bool {
        if tracking.tracking_url() == self.beacon.tracking_url() {
            return false;
        }
        info!(tracking_url = %tracking.tracking_url(), "tracking endpoint changed");
        self.beacon = VisitorBeacon::fire(tracking, self.context.clone());
        true
    }
}

#[cfg(test)]
#[path = "tests/support.rs"]
mod test_support;

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
