use std::{path::PathBuf, time::Duration};

use anyhow::{Context, Result};
use clap::Parser;
use client_core::{Key, LandingPage, LandingView, SignupState};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

mod config;
mod render;

use config::{load_settings, Settings};

/// How long to wait for the visit report before exiting.
const BEACON_GRACE: Duration = Duration::from_secs(3);

#[derive(Parser, Debug)]
#[command(name = "landing", about = "Coming-soon page with email signup")]
struct Args {
    #[arg(long, default_value = "landing.toml")]
    config: PathBuf,
    #[arg(long)]
    tracking_url: Option<String>,
    #[arg(long)]
    signup_url: Option<String>,
    #[arg(long)]
    page: Option<String>,
    #[arg(long)]
    referrer: Option<String>,
    #[arg(long)]
    request_timeout_secs: Option<u64>,
    /// Submit this address once instead of reading addresses from stdin.
    #[arg(long)]
    email: Option<String>,
}

impl Args {
    fn apply(&self, settings: &mut Settings) {
        if let Some(v) = &self.tracking_url {
            settings.tracking_url = v.clone();
        }
        if let Some(v) = &self.signup_url {
            settings.signup_url = v.clone();
        }
        if let Some(v) = &self.page {
            settings.page = v.clone();
        }
        if let Some(v) = &self.referrer {
            settings.referrer = v.clone();
        }
        if let Some(v) = self.request_timeout_secs {
            settings.request_timeout_secs = v;
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let mut settings = load_settings(&args.config)?;
    args.apply(&mut settings);
    let landing_config = settings.landing_config()?;
    info!(
        tracking_url = %landing_config.tracking_base_url(),
        signup_url = %landing_config.signup_base_url(),
        "starting landing page"
    );

    let mut page = LandingPage::mount(&landing_config, settings.page_context())
        .context("failed to mount landing page")?;
    print!("{}", render::page(&LandingView::of(&page.form().state())));

    let mut updates = page.form().subscribe();
    tokio::spawn(async move {
        while updates.changed().await.is_ok() {
            let state = updates.borrow_and_update().clone();
            if state.loading() {
                print!("{}", render::form(&LandingView::of(&state)));
            }
        }
    });

    match &args.email {
        Some(email) => {
            submit_line(&page, email).await;
        }
        None => {
            let mut lines = BufReader::new(tokio::io::stdin()).lines();
            while let Some(line) = lines.next_line().await.context("failed to read stdin")? {
                if submit_line(&page, &line).await.success() {
                    break;
                }
            }
        }
    }

    match tokio::time::timeout(BEACON_GRACE, page.beacon_mut().settled()).await {
        Ok(tracking) => debug!(?tracking, "visit report settled"),
        Err(_) => debug!("visit report still in flight at exit"),
    }

    Ok(())
}

/// One line of input is typed into the field and confirmed with Enter.
async fn submit_line(page: &LandingPage, line: &str) -> SignupState {
    let form = page.form();
    form.input(line);
    let state = form.key_down(Key::Enter).await;

    let view = LandingView::of(&state);
    if state.success() {
        print!("{}", render::page(&view));
    } else {
        print!("{}", render::form(&view));
    }
    state
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
