//! Drives the signup state machine against a transport.

use std::sync::Arc;

use shared::protocol::SignupRequest;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::{
    signup::{transition, Key, SignupEffect, SignupEvent, SignupState},
    transport::SignupTransport,
};

/// Owns the form state and publishes every change, so a view can show the
/// spinner while a request is in flight.
pub struct SignupController {
    transport: Arc<dyn SignupTransport>,
    state: watch::Sender<SignupState>,
}

impl SignupController {
    pub fn new(transport: Arc<dyn SignupTransport>) -> Self {
        let (state, _) = watch::channel(SignupState::default());
        Self { transport, state }
    }

    pub fn state(&self) -> SignupState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SignupState> {
        self.state.subscribe()
    }

    /// Applies one event without touching the network.
    pub fn apply(&self, event: SignupEvent) -> Option<SignupEffect> {
        let mut effect = None;
        self.state.send_modify(|state| {
            let (next, next_effect) = transition(std::mem::take(state), event);
            debug!(
                phase = ?next.phase(),
                has_error = next.error().is_some(),
                "signup state updated"
            );
            *state = next;
            effect = next_effect;
        });
        effect
    }

    /// Applies an event and, if it starts a submission, runs it to completion.
    pub async fn dispatch(&self, event: SignupEvent) -> SignupState {
        if let Some(SignupEffect::Submit(email)) = self.apply(event) {
            let domain = email.domain().to_string();
            let outcome = self.transport.sign_up(&SignupRequest { email }).await;
            match &outcome {
                Ok(()) => info!(%domain, "email signup accepted"),
                Err(error) => warn!(%domain, %error, "email signup failed"),
            }
            self.apply(SignupEvent::Completed(outcome));
        }
        self.state()
    }

    pub fn input(&self, raw: &str) {
        self.apply(SignupEvent::Input(raw.to_string()));
    }

    pub fn blur(&self) {
        self.apply(SignupEvent::Blur);
    }

    pub async fn key_down(&self, key: Key) -> SignupState {
        self.dispatch(SignupEvent::KeyDown(key)).await
    }

    pub async fn submit(&self) -> SignupState {
        self.dispatch(SignupEvent::SubmitClicked).await
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
