use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// An address that passed the client-side `local@domain.tld` shape check.
///
/// This is deliberately loose: no whitespace, exactly one `@`, a non-empty
/// local part, and a domain with at least one `.` that is neither its first
/// nor its last character. Anything stricter is the signup service's job.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    pub fn parse(candidate: &str) -> Result<Self, ValidationError> {
        if candidate.is_empty() || candidate.chars().any(is_input_whitespace) {
            return Err(ValidationError::InvalidEmail);
        }

        let Some((local, domain)) = candidate.split_once('@') else {
            return Err(ValidationError::InvalidEmail);
        };

        if local.is_empty() || domain.contains('@') {
            return Err(ValidationError::InvalidEmail);
        }

        let has_inner_dot = domain
            .char_indices()
            .any(|(idx, ch)| ch == '.' && idx > 0 && idx + 1 < domain.len());
        if !has_inner_dot {
            return Err(ValidationError::InvalidEmail);
        }

        Ok(Self(candidate.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Everything after the `@`; safe to put in logs.
    pub fn domain(&self) -> &str {
        self.0
            .split_once('@')
            .map(|(_, domain)| domain)
            .unwrap_or_default()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

/// Whitespace as browsers define it for `\s` and `String.prototype.trim`.
///
/// Differs from `char::is_whitespace`: U+FEFF counts, U+0085 does not.
pub fn is_input_whitespace(ch: char) -> bool {
    matches!(
        ch,
        '\t' | '\n'
            | '\u{0B}'
            | '\u{0C}'
            | '\r'
            | ' '
            | '\u{A0}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200A}'
            | '\u{2028}'
            | '\u{2029}'
            | '\u{202F}'
            | '\u{205F}'
            | '\u{3000}'
            | '\u{FEFF}'
    )
}

/// Where the visitor is and how they got here, captured once at mount time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageContext {
    pub page: String,
    pub referrer: String,
}

impl PageContext {
    pub fn new(page: impl Into<String>, referrer: impl Into<String>) -> Self {
        Self {
            page: page.into(),
            referrer: referrer.into(),
        }
    }
}
