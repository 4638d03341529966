use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{bail, Context};
use serde::Deserialize;
use url::Url;

const SETTINGS_FILE: &str = "server.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub bind_addr: String,
    pub static_dir: PathBuf,
    pub content_path: Option<PathBuf>,
    pub public_url: Option<String>,
    pub autoplay_interval_ms: u64,
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8080".into(),
            static_dir: PathBuf::from("./public"),
            content_path: None,
            public_url: None,
            autoplay_interval_ms: 2500,
            log_filter: "info".into(),
        }
    }
}

/// Keys accepted in `server.toml`; everything is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileSettings {
    bind_addr: Option<String>,
    static_dir: Option<PathBuf>,
    content_path: Option<PathBuf>,
    public_url: Option<String>,
    autoplay_interval_ms: Option<u64>,
    log_filter: Option<String>,
}

impl Settings {
    pub fn autoplay_interval(&self) -> Duration {
        Duration::from_millis(self.autoplay_interval_ms)
    }

    fn apply_file(&mut self, raw: &str) -> anyhow::Result<()> {
        let file: FileSettings = toml::from_str(raw).context("invalid settings file")?;
        if let Some(v) = file.bind_addr {
            self.bind_addr = v;
        }
        if let Some(v) = file.static_dir {
            self.static_dir = v;
        }
        if let Some(v) = file.content_path {
            self.content_path = Some(v);
        }
        if let Some(v) = file.public_url {
            self.public_url = Some(v);
        }
        if let Some(v) = file.autoplay_interval_ms {
            self.autoplay_interval_ms = v;
        }
        if let Some(v) = file.log_filter {
            self.log_filter = v;
        }
        Ok(())
    }

    /// Later names win, so `APP__*` overrides the short `SITE_*` form.
    fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) {
        let first = |names: &[&str]| names.iter().rev().find_map(|name| var(name));

        if let Some(v) = first(&["SITE_BIND", "APP__BIND_ADDR"]) {
            self.bind_addr = v;
        }
        if let Some(v) = first(&["SITE_STATIC_DIR", "APP__STATIC_DIR"]) {
            self.static_dir = PathBuf::from(v);
        }
        if let Some(v) = first(&["SITE_CONTENT_PATH", "APP__CONTENT_PATH"]) {
            self.content_path = Some(PathBuf::from(v));
        }
        if let Some(v) = first(&["SITE_PUBLIC_URL", "APP__PUBLIC_URL"]) {
            self.public_url = Some(v);
        }
        if let Some(v) = var("APP__AUTOPLAY_INTERVAL_MS") {
            if let Ok(parsed) = v.trim().parse::<u64>() {
                self.autoplay_interval_ms = parsed;
            }
        }
        if let Some(v) = var("APP__LOG_FILTER") {
            self.log_filter = v;
        }
    }
}

/// Defaults, then `server.toml` in the working directory, then environment.
pub fn load_settings() -> anyhow::Result<Settings> {
    load_settings_from(Path::new(SETTINGS_FILE), |name| std::env::var(name).ok())
}

fn load_settings_from(
    file: &Path,
    var: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string(file) {
        settings
            .apply_file(&raw)
            .with_context(|| format!("failed to apply '{}'", file.display()))?;
    }
    settings.apply_env(var);

    if let Some(raw) = settings.public_url.take() {
        settings.public_url = Some(normalize_public_url(&raw)?);
    }
    Ok(settings)
}

/// Absolute http(s) URL without a trailing slash, ready to prefix paths.
pub fn normalize_public_url(raw: &str) -> anyhow::Result<String> {
    let url = Url::parse(raw.trim()).with_context(|| format!("invalid public url '{raw}'"))?;
    if !matches!(url.scheme(), "http" | "https") {
        bail!("public url '{raw}' must use http or https");
    }
    Ok(url.as_str().trim_end_matches('/').to_string())
}

pub fn prepare_static_dir(static_dir: &Path) -> anyhow::Result<PathBuf> {
    fs::create_dir_all(static_dir).with_context(|| {
        format!(
            "failed to create static directory '{}'",
            static_dir.display()
        )
    })?;
    Ok(static_dir.to_path_buf())
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
