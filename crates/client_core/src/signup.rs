//! Email signup form as a pure state machine.
//!
//! `transition` never performs I/O. When a submission should go out it hands
//! back a [`SignupEffect::Submit`]; the caller sends the request and feeds the
//! result back in as [`SignupEvent::Completed`].

use shared::{
    domain::{is_input_whitespace, EmailAddress},
    error::{SubmissionError, ValidationError, EMAIL_ERROR_MESSAGE},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SignupPhase {
    #[default]
    Editing,
    Submitting,
    /// Terminal for the lifetime of the page.
    Success,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SignupState {
    value: String,
    error: Option<String>,
    phase: SignupPhase,
}

impl SignupState {
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn phase(&self) -> SignupPhase {
        self.phase
    }

    pub fn loading(&self) -> bool {
        self.phase == SignupPhase::Submitting
    }

    pub fn success(&self) -> bool {
        self.phase == SignupPhase::Success
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignupEvent {
    /// New raw contents of the input field.
    Input(String),
    KeyDown(Key),
    Blur,
    SubmitClicked,
    Completed(Result<(), SubmissionError>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignupEffect {
    Submit(EmailAddress),
}

/// Trims the same whitespace set the shape check rejects.
pub fn trim_input(raw: &str) -> &str {
    raw.trim_matches(is_input_whitespace)
}

pub fn validate(value: &str) -> Result<EmailAddress, ValidationError> {
    EmailAddress::parse(value)
}

pub fn transition(
    mut state: SignupState,
    event: SignupEvent,
) -> (SignupState, Option<SignupEffect>) {
    if state.phase == SignupPhase::Success {
        return (state, None);
    }

    match event {
        SignupEvent::Input(raw) => {
            state.value = trim_input(&raw).to_string();
            state.error = None;
            (state, None)
        }
        SignupEvent::KeyDown(Key::Other) => {
            state.error = None;
            (state, None)
        }
        SignupEvent::KeyDown(Key::Enter) => {
            state.error = None;
            begin_submission(state)
        }
        SignupEvent::SubmitClicked => begin_submission(state),
        SignupEvent::Blur => {
            if state.phase == SignupPhase::Editing {
                state.error = validate(&state.value)
                    .err()
                    .map(|_| EMAIL_ERROR_MESSAGE.to_string());
            }
            (state, None)
        }
        SignupEvent::Completed(outcome) => {
            if state.phase != SignupPhase::Submitting {
                return (state, None);
            }
            match outcome {
                Ok(()) => {
                    state.value.clear();
                    state.error = None;
                    state.phase = SignupPhase::Success;
                }
                Err(err) => {
                    let message = err.user_message();
                    state.error = (!message.is_empty()).then(|| message.to_string());
                    state.phase = SignupPhase::Editing;
                }
            }
            (state, None)
        }
    }
}

fn begin_submission(mut state: SignupState) -> (SignupState, Option<SignupEffect>) {
    // One request in flight at a time.
    if state.phase == SignupPhase::Submitting {
        return (state, None);
    }

    match validate(&state.value) {
        Ok(email) => {
            state.error = None;
            state.phase = SignupPhase::Submitting;
            (state, Some(SignupEffect::Submit(email)))
        }
        Err(err) => {
            state.error = Some(err.to_string());
            (state, None)
        }
    }
}

#[cfg(test)]
#[path = "tests/signup_tests.rs"]
mod tests;
