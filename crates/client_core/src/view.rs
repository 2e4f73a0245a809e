//! What the landing page shows for a given form state.

use crate::signup::SignupState;

pub const BADGE: &str = "WEBSITE";
pub const HEADLINE: &str = "Coming soon";
pub const INPUT_PLACEHOLDER: &str = "Enter your email address";
pub const HINT: &str = "There is something waiting for you";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SocialLink {
    pub network: &'static str,
    pub handle: &'static str,
    pub href: &'static str,
}

pub const SOCIAL_LINKS: &[SocialLink] = &[
    SocialLink {
        network: "Instagram",
        handle: "cio.football",
        href: "https://www.instagram.com/cio.football",
    },
    SocialLink {
        network: "Facebook",
        handle: "cio.football",
        href: "https://www.facebook.com/cio.football/",
    },
    SocialLink {
        network: "TikTok",
        handle: "cio.football",
        href: "https://www.tiktok.com/@cio.football",
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tagline {
    Invite,
    CheckInbox,
}

impl Tagline {
    pub fn text(self) -> &'static str {
        match self {
            Self::Invite => "Get notified when we launch something extraordinary",
            Self::CheckInbox => "Check your inbox!",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendButton {
    Send,
    Spinner,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormFooter<'a> {
    Error(&'a str),
    Hint,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormView<'a> {
    Input {
        value: &'a str,
        button: SendButton,
        footer: FormFooter<'a>,
    },
    Checkmark,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LandingView<'a> {
    pub tagline: Tagline,
    pub form: FormView<'a>,
}

impl<'a> LandingView<'a> {
    pub fn of(state: &'a SignupState) -> Self {
        if state.success() {
            return Self {
                tagline: Tagline::CheckInbox,
                form: FormView::Checkmark,
            };
        }

        let button = if state.loading() {
            SendButton::Spinner
        } else {
            SendButton::Send
        };
        let footer = match state.error() {
            Some(message) if !message.is_empty() => FormFooter::Error(message),
            _ => FormFooter::Hint,
        };

        Self {
            tagline: Tagline::Invite,
            form: FormView::Input {
                value: state.value(),
                button,
                footer,
            },
        }
    }
}
