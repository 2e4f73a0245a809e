use thiserror::Error;

pub const EMAIL_ERROR_MESSAGE: &str = "Please enter a valid email address.";
pub const DEFAULT_ERROR_MESSAGE: &str = "Something went wrong. Please try again.";

/// Client-local failure; never sent over the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{}", EMAIL_ERROR_MESSAGE)]
    InvalidEmail,
}

/// Why a signup attempt did not go through.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionError {
    /// The signup service answered `success: false`.
    #[error("{0}")]
    Rejected(String),
    /// The request never produced a usable answer.
    #[error("signup request failed: {0}")]
    Transport(String),
}

impl SubmissionError {
    pub fn transport(reason: impl ToString) -> Self {
        Self::Transport(reason.to_string())
    }

    /// The text shown under the input. Transport causes are not exposed.
    pub fn user_message(&self) -> &str {
        match self {
            Self::Rejected(message) => message,
            Self::Transport(_) => DEFAULT_ERROR_MESSAGE,
        }
    }
}
