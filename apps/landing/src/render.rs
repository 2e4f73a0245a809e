//! Plain-text rendition of the landing view.

use client_core::view::{
    FormFooter, FormView, LandingView, SendButton, BADGE, HEADLINE, HINT, INPUT_PLACEHOLDER,
    SOCIAL_LINKS,
};

pub fn page(view: &LandingView<'_>) -> String {
    let mut out = format!("[{BADGE}]\n{HEADLINE}\n{}\n\n", view.tagline.text());
    out.push_str(&form(view));
    out.push('\n');
    for link in SOCIAL_LINKS {
        out.push_str(&format!(
            "  {} {}  <{}>\n",
            link.network, link.handle, link.href
        ));
    }
    out
}

pub fn form(view: &LandingView<'_>) -> String {
    match view.form {
        FormView::Checkmark => "  [✓]\n".to_string(),
        FormView::Input {
            value,
            button,
            footer,
        } => {
            let field = if value.is_empty() {
                format!("<{INPUT_PLACEHOLDER}>")
            } else {
                value.to_string()
            };
            let button = match button {
                SendButton::Send => "[send]",
                SendButton::Spinner => "[ ... ]",
            };
            let footer = match footer {
                FormFooter::Error(message) => format!("! {message}"),
                FormFooter::Hint => format!("↑ {HINT} ↑"),
            };
            format!("  {field} {button}\n  {footer}\n")
        }
    }
}
