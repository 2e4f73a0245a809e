use super::*;

use std::{
    collections::HashMap,
    env,
    time::{SystemTime, UNIX_EPOCH},
};

fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn defaults_target_production_api_and_root_page() {
    let settings = Settings::default();
    assert_eq!(settings.tracking_url, "http://api.cio.football");
    assert_eq!(settings.page, "/");
    assert_eq!(settings.referrer, "");

    let config = settings.landing_config().expect("config");
    assert_eq!(config.request_timeout, Duration::from_secs(10));
}

#[test]
fn file_values_override_defaults() {
    let mut settings = Settings::default();
    settings
        .apply_file(
            r#"
            tracking_url = "https://track.example.com/"
            signup_url = "https://api.example.com"
            request_timeout_secs = 3
            page = "/launch"
            "#,
        )
        .expect("parse");

    assert_eq!(settings.tracking_url, "https://track.example.com/");
    assert_eq!(settings.page, "/launch");
    assert_eq!(settings.referrer, "");

    let config = settings.landing_config().expect("config");
    assert_eq!(config.tracking_base_url(), "https://track.example.com");
    assert_eq!(config.signup_base_url(), "https://api.example.com");
    assert_eq!(config.request_timeout, Duration::from_secs(3));
}

#[test]
fn unknown_file_keys_are_rejected() {
    let mut settings = Settings::default();
    assert!(settings.apply_file("traking_url = \"x\"").is_err());
}

#[test]
fn app_prefixed_env_wins_over_landing_prefixed_env() {
    let mut settings = Settings::default();
    settings
        .apply_env(vars(&[
            ("LANDING_TRACKING_URL", "https://a.example"),
            ("APP__TRACKING_URL", "https://b.example"),
            ("LANDING_SIGNUP_URL", "https://signup.example"),
            ("APP__REQUEST_TIMEOUT_SECS", "7"),
        ]))
        .expect("env");

    assert_eq!(settings.tracking_url, "https://b.example");
    assert_eq!(settings.signup_url, "https://signup.example");
    assert_eq!(settings.request_timeout_secs, 7);
}

#[test]
fn non_numeric_timeout_env_is_an_error() {
    let mut settings = Settings::default();
    let err = settings
        .apply_env(vars(&[("APP__REQUEST_TIMEOUT_SECS", "soon")]))
        .expect_err("must fail");
    assert!(err.to_string().contains("soon"));
}

#[test]
fn invalid_urls_and_zero_timeout_are_rejected() {
    let settings = Settings {
        tracking_url: "api.cio.football".into(),
        ..Settings::default()
    };
    assert!(settings.landing_config().is_err());

    let settings = Settings {
        request_timeout_secs: 0,
        ..Settings::default()
    };
    assert!(settings.landing_config().is_err());
}

#[test]
fn missing_settings_file_falls_back_to_defaults() {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let path = env::temp_dir().join(format!("landing_missing_{suffix}.toml"));

    let settings = load_settings(&path).expect("load");
    assert_eq!(settings.page, "/");
}

#[test]
fn settings_file_is_read_from_disk() {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let temp_root = env::temp_dir().join(format!("landing_config_test_{suffix}"));
    fs::create_dir_all(&temp_root).expect("temp root");
    let path = temp_root.join("landing.toml");
    fs::write(&path, "page = \"/teaser\"\nreferrer = \"https://ref.example\"\n").expect("write");

    let settings = load_settings(&path).expect("load");
    assert_eq!(
        settings.page_context(),
        PageContext::new("/teaser", "https://ref.example")
    );

    fs::remove_dir_all(temp_root).expect("cleanup");
}

#[test]
fn broken_settings_file_names_the_path() {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let temp_root = env::temp_dir().join(format!("landing_config_broken_{suffix}"));
    fs::create_dir_all(&temp_root).expect("temp root");
    let path = temp_root.join("landing.toml");
    fs::write(&path, "page = ").expect("write");

    let err = load_settings(&path).expect_err("must fail");
    assert!(format!("{err:#}").contains("landing.toml"));

    fs::remove_dir_all(temp_root).expect("cleanup");
}
