use std::{collections::HashMap, fs, path::Path, time::Duration};

use anyhow::{bail, Context};
use serde::Deserialize;
use url::Url;

pub const DEFAULT_SETTINGS_FILE: &str = "predictor.toml";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub api_base_url: String,
    pub request_timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8000".into(),
            request_timeout_secs: 30,
        }
    }
}

impl Settings {
    /// `None` when `request_timeout_secs` is 0, meaning requests never time out.
    pub fn request_timeout(&self) -> Option<Duration> {
        (self.request_timeout_secs > 0).then(|| Duration::from_secs(self.request_timeout_secs))
    }
}

/// Defaults, then `predictor.toml` in the working directory if present, then
/// environment overrides.
pub fn load_settings() -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string(DEFAULT_SETTINGS_FILE) {
        apply_file_overrides(&mut settings, &raw);
    }
    apply_env_overrides(&mut settings);

    settings
}

/// Like [`load_settings`] but reads an explicit file, which must exist and
/// parse.
pub fn load_settings_from(path: &Path) -> anyhow::Result<Settings> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read settings file '{}'", path.display()))?;
    let file_cfg = toml::from_str::<HashMap<String, toml::Value>>(&raw)
        .with_context(|| format!("settings file '{}' is not valid TOML", path.display()))?;

    let mut settings = Settings::default();
    apply_file_values(&mut settings, &file_cfg);
    apply_env_overrides(&mut settings);
    Ok(settings)
}

fn apply_file_overrides(settings: &mut Settings, raw: &str) {
    match toml::from_str::<HashMap<String, toml::Value>>(raw) {
        Ok(file_cfg) => apply_file_values(settings, &file_cfg),
        Err(err) => tracing::warn!(error = %err, "ignoring malformed settings file"),
    }
}

fn apply_file_values(settings: &mut Settings, file_cfg: &HashMap<String, toml::Value>) {
    match file_cfg.get("api_base_url") {
        Some(toml::Value::String(v)) => settings.api_base_url = v.clone(),
        Some(other) => tracing::warn!(value = %other, "ignoring non-string api_base_url"),
        None => {}
    }
    if let Some(v) = file_cfg.get("request_timeout_secs") {
        match parse_secs(v) {
            Some(parsed) => settings.request_timeout_secs = parsed,
            None => tracing::warn!(value = %v, "ignoring invalid request_timeout_secs"),
        }
    }
}

/// Accepts `10` as well as `"10"`.
fn parse_secs(value: &toml::Value) -> Option<u64> {
    match value {
        toml::Value::Integer(n) => u64::try_from(*n).ok(),
        toml::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn apply_env_overrides(settings: &mut Settings) {
    if let Ok(v) = std::env::var("PREDICTOR_API_BASE_URL") {
        settings.api_base_url = v;
    }
    if let Ok(v) = std::env::var("APP__API_BASE_URL") {
        settings.api_base_url = v;
    }

    if let Ok(v) = std::env::var("APP__REQUEST_TIMEOUT_SECS") {
        if let Ok(parsed) = v.parse::<u64>() {
            settings.request_timeout_secs = parsed;
        }
    }
}

/// Trims whitespace and trailing slashes so endpoint paths can be appended
/// directly, and rejects anything that is not an http(s) URL.
pub fn normalize_base_url(raw: &str) -> anyhow::Result<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Ok(Settings::default().api_base_url);
    }

    let parsed =
        Url::parse(trimmed).with_context(|| format!("invalid prediction API url '{trimmed}'"))?;
    match parsed.scheme() {
        "http" | "https" => {}
        other => bail!("unsupported scheme '{other}' in prediction API url '{trimmed}'"),
    }
    if parsed.host_str().is_none() {
        bail!("prediction API url '{trimmed}' has no host");
    }

    Ok(trimmed.to_string())
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
