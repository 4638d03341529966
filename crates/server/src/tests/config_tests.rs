use super::{load_settings_from, normalize_public_url, prepare_static_dir, Settings};

use std::{collections::HashMap, fs, path::PathBuf};

fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |name| vars.get(name).cloned()
}

#[test]
fn defaults_apply_without_file_or_env() {
    let dir = tempfile::tempdir().expect("tempdir");
    let settings = load_settings_from(&dir.path().join("missing.toml"), env(&[])).expect("load");
    assert_eq!(settings, Settings::default());
    assert_eq!(settings.autoplay_interval().as_millis(), 2500);
}

#[test]
fn file_values_are_overridden_by_env() {
    let dir = tempfile::tempdir().expect("tempdir");
    let file = dir.path().join("server.toml");
    fs::write(
        &file,
        "bind_addr = \"0.0.0.0:9000\"\nstatic_dir = \"/srv/titan\"\nautoplay_interval_ms = 4000\n",
    )
    .expect("write");

    let settings = load_settings_from(
        &file,
        env(&[
            ("SITE_BIND", "127.0.0.1:1"),
            ("APP__BIND_ADDR", "127.0.0.1:2"),
            ("SITE_PUBLIC_URL", "https://titanshield.example/"),
            ("APP__LOG_FILTER", "debug"),
        ]),
    )
    .expect("load");

    assert_eq!(settings.bind_addr, "127.0.0.1:2");
    assert_eq!(settings.static_dir, PathBuf::from("/srv/titan"));
    assert_eq!(settings.autoplay_interval_ms, 4000);
    assert_eq!(
        settings.public_url.as_deref(),
        Some("https://titanshield.example")
    );
    assert_eq!(settings.log_filter, "debug");
}

#[test]
fn malformed_interval_env_keeps_previous_value() {
    let dir = tempfile::tempdir().expect("tempdir");
    let settings = load_settings_from(
        &dir.path().join("missing.toml"),
        env(&[("APP__AUTOPLAY_INTERVAL_MS", "soon")]),
    )
    .expect("load");
    assert_eq!(settings.autoplay_interval_ms, 2500);
}

#[test]
fn unknown_file_keys_are_rejected() {
    let dir = tempfile::tempdir().expect("tempdir");
    let file = dir.path().join("server.toml");
    fs::write(&file, "database_url = \"sqlite://x\"\n").expect("write");
    assert!(load_settings_from(&file, env(&[])).is_err());
}

#[test]
fn public_url_must_be_absolute_http() {
    assert!(normalize_public_url("not a url").is_err());
    assert!(normalize_public_url("ftp://titanshield.example").is_err());
    assert_eq!(
        normalize_public_url(" http://localhost:8080/ ").expect("url"),
        "http://localhost:8080"
    );
}

#[test]
fn creates_missing_static_dir() {
    let dir = tempfile::tempdir().expect("tempdir");
    let static_dir = dir.path().join("public").join("assets");
    let prepared = prepare_static_dir(&static_dir).expect("prepare");
    assert!(prepared.is_dir());
}
